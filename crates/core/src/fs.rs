//! Locating the observation database on disk

use std::path::{Path, PathBuf};

use log::debug;

use crate::{get_xdg_data_dir, DEFAULT_DATABASE_FILE};

#[derive(thiserror::Error, Debug)]
#[error("database file not found, searched: {}", format_paths(.searched))]
pub struct DatabaseNotFound {
    pub searched: Vec<PathBuf>,
}

fn format_paths(paths: &[PathBuf]) -> String {
    paths
        .iter()
        .map(|p| p.display().to_string())
        .collect::<Vec<_>>()
        .join(", ")
}

/// Find the database file to serve.
///
/// An explicit path is used as-is and must exist. Otherwise the first existing
/// file among `./Resources/hawaii.sqlite`, `./hawaii.sqlite` and the XDG data
/// directory wins.
pub fn locate_database(explicit: Option<&str>) -> Result<PathBuf, DatabaseNotFound> {
    let candidates = match explicit {
        Some(path) => vec![PathBuf::from(path)],
        None => default_candidates(),
    };

    for candidate in &candidates {
        debug!("looking for database at {}", candidate.display());
        if is_file(candidate) {
            return Ok(candidate.clone());
        }
    }

    Err(DatabaseNotFound {
        searched: candidates,
    })
}

fn default_candidates() -> Vec<PathBuf> {
    vec![
        Path::new("Resources").join(DEFAULT_DATABASE_FILE),
        PathBuf::from(DEFAULT_DATABASE_FILE),
        get_xdg_data_dir().join(DEFAULT_DATABASE_FILE),
    ]
}

fn is_file(path: &Path) -> bool {
    path.exists() && path.is_file()
}
