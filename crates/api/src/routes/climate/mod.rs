pub mod precipitation;
pub mod stations;
pub mod temperature;
pub mod tobs;

pub use precipitation::*;
pub use stations::*;
pub use temperature::*;
pub use tobs::*;

/// Round to two decimal places, the precision averages are reported with.
/// Ties round half away from zero (`0.125` becomes `0.13`), not to even.
pub fn round_hundredths(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}
