pub mod climate_data;
pub mod dates;
pub mod schema;

pub use climate_data::*;
pub use dates::*;
pub use schema::{Schema, TableSchema};

/// One row of `measurement`, reduced to its precipitation reading
#[derive(Debug, Clone, PartialEq)]
pub struct PrecipitationReading {
    pub date: String,
    pub precipitation: Option<f64>,
}

/// One temperature observation of a single station
#[derive(Debug, Clone, PartialEq)]
pub struct TemperatureReading {
    pub date: String,
    pub tobs: Option<f64>,
}

/// Min/max/avg of a measurement column; all `None` when no rows matched
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct Aggregate {
    pub min: Option<f64>,
    pub max: Option<f64>,
    pub avg: Option<f64>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct StationSummary {
    pub station_id: String,
    pub name: String,
    pub latitude: Option<f64>,
    pub longitude: Option<f64>,
    pub elevation: Option<f64>,
    pub precipitation: Aggregate,
    pub temperature: Aggregate,
}

/// The station with the most measurement rows
#[derive(Debug, Clone, PartialEq)]
pub struct ActiveStation {
    pub station_id: String,
    pub name: String,
    pub observations: i64,
}
