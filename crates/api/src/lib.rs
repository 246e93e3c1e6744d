pub mod db;
pub mod routes;
mod startup;
pub mod templates;
mod utils;

pub use db::{
    ActiveStation, Aggregate, ClimateAccess, ClimateData, DateRange, DateWindow,
    PrecipitationReading, StationSummary, TemperatureReading,
};
pub use routes::*;
pub use startup::*;
pub use utils::*;
