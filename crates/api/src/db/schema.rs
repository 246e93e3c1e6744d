use log::debug;
use sqlx::SqliteConnection;

use super::Error;

pub const MEASUREMENT_TABLE: &str = "measurement";
pub const STATION_TABLE: &str = "station";

/// Columns each route relies on; anything else in the file is ignored
const REQUIRED_COLUMNS: &[(&str, &[&str])] = &[
    (MEASUREMENT_TABLE, &["station", "date", "prcp", "tobs"]),
    (
        STATION_TABLE,
        &["station", "name", "latitude", "longitude", "elevation"],
    ),
];

#[derive(Debug, Clone, PartialEq)]
pub struct Column {
    pub name: String,
    pub declared_type: String,
}

#[derive(Debug, Clone, PartialEq)]
pub struct TableSchema {
    pub name: String,
    pub columns: Vec<Column>,
}

impl TableSchema {
    pub fn has_column(&self, column: &str) -> bool {
        self.columns
            .iter()
            .any(|c| c.name.eq_ignore_ascii_case(column))
    }
}

/// Shape of the two observation tables as found in the database file
#[derive(Debug, Clone, PartialEq)]
pub struct Schema {
    pub measurement: TableSchema,
    pub station: TableSchema,
}

impl Schema {
    /// Read the column layout of both tables.
    pub async fn reflect(conn: &mut SqliteConnection) -> Result<Self, Error> {
        let measurement = reflect_table(conn, MEASUREMENT_TABLE).await?;
        let station = reflect_table(conn, STATION_TABLE).await?;
        Ok(Self {
            measurement,
            station,
        })
    }

    pub fn table(&self, name: &str) -> Option<&TableSchema> {
        [&self.measurement, &self.station]
            .into_iter()
            .find(|t| t.name == name)
    }

    /// Ensure every column the queries touch is present.
    pub fn verify(&self) -> Result<(), Error> {
        for (table_name, columns) in REQUIRED_COLUMNS {
            let table = self
                .table(table_name)
                .filter(|t| !t.columns.is_empty())
                .ok_or_else(|| Error::MissingTable(table_name.to_string()))?;

            if let Some(missing) = columns.iter().find(|c| !table.has_column(c)) {
                return Err(Error::MissingColumn {
                    table: table_name.to_string(),
                    column: missing.to_string(),
                });
            }
        }
        Ok(())
    }
}

async fn reflect_table(conn: &mut SqliteConnection, table: &str) -> Result<TableSchema, Error> {
    let columns: Vec<(String, String)> =
        sqlx::query_as("SELECT name, type FROM pragma_table_info(?)")
            .bind(table)
            .fetch_all(&mut *conn)
            .await?;

    let columns: Vec<Column> = columns
        .into_iter()
        .map(|(name, declared_type)| Column {
            name,
            declared_type,
        })
        .collect();

    debug!(
        "reflected table {}: {}",
        table,
        columns
            .iter()
            .map(|c| format!("{} {}", c.name, c.declared_type))
            .collect::<Vec<_>>()
            .join(", ")
    );

    Ok(TableSchema {
        name: table.to_string(),
        columns,
    })
}
