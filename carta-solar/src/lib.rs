//! Closed-form solar position calculations.
//!
//! The crate implements the NOAA solar ephemeris formulas: given a geographic
//! position and a UTC time it calculates the apparent elevation and azimuth
//! of the sun, the solar declination, the equation of time and the local
//! solar noon. The formulas are accurate to a fraction of a degree for years
//! 1800 to 2100, which is sufficient for daylight analysis, shading and
//! rendering purposes.
//!
//! ```
//! use carta_solar::SolarCalculator;
//! use chrono::{TimeZone, Utc};
//!
//! // Greenwich observatory
//! let calculator = SolarCalculator::new(51.4778, -0.0015);
//! let time = Utc.with_ymd_and_hms(2024, 6, 21, 12, 2, 0).unwrap();
//!
//! let position = calculator.position(time);
//! assert!(position.elevation > 61.0 && position.elevation < 62.5);
//! ```

pub mod julian;

mod position;

pub use position::{
    declination_at, equation_of_time_at, SolarCalculator, SolarPosition, CIVIL_TWILIGHT,
};
