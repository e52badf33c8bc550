use chrono::{DateTime, Duration, NaiveDate, NaiveDateTime, NaiveTime, Timelike, Utc};
use serde::{Deserialize, Serialize};

use crate::julian::{julian_century, julian_day};

/// Elevation angle of the civil twilight boundary, in degrees.
///
/// Below this angle the sun no longer illuminates the scene for practical
/// purposes, and [`SolarCalculator::position`] reports its position as NaN by
/// default.
pub const CIVIL_TWILIGHT: f64 = -6.0;

/// Apparent position of the sun, as seen from a point on the Earth surface.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SolarPosition {
    /// Angle over the horizon, in degrees, corrected for atmospheric
    /// refraction.
    pub elevation: f64,
    /// Angle from the north, clockwise, in degrees.
    pub azimuth: f64,
}

/// Calculates the apparent position of the sun for a fixed observer.
///
/// The calculator is built for a geographic position and can then be queried
/// for any time. Calculations follow the NOAA solar ephemeris: closed-form
/// polynomial approximations of the solar longitude, the obliquity of the
/// ecliptic and the orbit eccentricity, combined into hour-angle based
/// horizontal coordinates with an atmospheric refraction correction.
#[derive(Debug, Clone, Copy)]
pub struct SolarCalculator {
    latitude: f64,
    longitude: f64,
    twilight: Option<f64>,
}

impl SolarCalculator {
    /// Creates a calculator for the observer at the given latitude and
    /// longitude (in degrees, north and east positive).
    ///
    /// Out-of-range coordinates are brought back into the valid domain:
    /// latitude is clamped to `[-90, 90]`, longitude is wrapped to
    /// `[-180, 180)`. The twilight threshold defaults to [`CIVIL_TWILIGHT`].
    pub fn new(latitude: f64, longitude: f64) -> Self {
        Self {
            latitude: latitude.clamp(-90.0, 90.0),
            longitude: (longitude + 180.0).rem_euclid(360.0) - 180.0,
            twilight: Some(CIVIL_TWILIGHT),
        }
    }

    /// Sets the twilight threshold, in degrees of elevation.
    ///
    /// When the apparent elevation of the sun is below the threshold,
    /// [`position`](Self::position) reports both angles as NaN. Pass `None`
    /// to always report the geometric position.
    pub fn with_twilight(mut self, twilight: Option<f64>) -> Self {
        self.twilight = twilight;
        self
    }

    /// Latitude of the observer in degrees.
    pub fn latitude(&self) -> f64 {
        self.latitude
    }

    /// Longitude of the observer in degrees.
    pub fn longitude(&self) -> f64 {
        self.longitude
    }

    /// Apparent position of the sun at the given time.
    ///
    /// Both angles are NaN if the sun is below the twilight threshold.
    pub fn position(&self, time: DateTime<Utc>) -> SolarPosition {
        let t = julian_century(julian_day(time));

        let declination = declination(t).to_radians();
        let latitude = self.latitude.to_radians();
        let hour_angle = self.hour_angle(time, t).to_radians();

        let cos_zenith = latitude.sin() * declination.sin()
            + latitude.cos() * declination.cos() * hour_angle.cos();
        let zenith = cos_zenith.clamp(-1.0, 1.0).acos();

        let elevation = 90.0 - zenith.to_degrees();
        let elevation = elevation + refraction_correction(elevation);

        if let Some(twilight) = self.twilight {
            if elevation < twilight {
                return SolarPosition {
                    elevation: f64::NAN,
                    azimuth: f64::NAN,
                };
            }
        }

        let azimuth = if zenith.sin().abs() < 1e-9 || latitude.cos().abs() < 1e-9 {
            // the sun is in zenith or the observer is on a pole, every
            // direction is as good as any other
            180.0
        } else {
            let cos_azimuth = (latitude.sin() * zenith.cos() - declination.sin())
                / (latitude.cos() * zenith.sin());
            let angle = cos_azimuth.clamp(-1.0, 1.0).acos().to_degrees();

            if hour_angle > 0.0 {
                (angle + 180.0).rem_euclid(360.0)
            } else {
                (540.0 - angle).rem_euclid(360.0)
            }
        };

        SolarPosition { elevation, azimuth }
    }

    /// Apparent elevation of the sun at the given time, in degrees.
    pub fn elevation(&self, time: DateTime<Utc>) -> f64 {
        self.position(time).elevation
    }

    /// Azimuth of the sun at the given time, in degrees from the north.
    pub fn azimuth(&self, time: DateTime<Utc>) -> f64 {
        self.position(time).azimuth
    }

    /// Time of the solar transit (local solar noon) on the given UTC date.
    pub fn noon(&self, date: NaiveDate) -> DateTime<Utc> {
        let midnight = NaiveDateTime::new(date, NaiveTime::MIN).and_utc();

        // the equation of time drifts during the day, so evaluate it at the
        // first-guess transit and refine once
        let mut noon_minutes = 720.0 - 4.0 * self.longitude;
        for _ in 0..2 {
            let guess = midnight + Duration::milliseconds((noon_minutes * 60_000.0) as i64);
            let t = julian_century(julian_day(guess));
            noon_minutes = 720.0 - 4.0 * self.longitude - equation_of_time(t);
        }

        midnight + Duration::milliseconds((noon_minutes * 60_000.0) as i64)
    }

    /// Hour angle of the sun in degrees: zero at the solar transit, negative
    /// before it.
    fn hour_angle(&self, time: DateTime<Utc>, t: f64) -> f64 {
        let minutes = time.num_seconds_from_midnight() as f64 / 60.0;
        let true_solar_minutes =
            (minutes + equation_of_time(t) + 4.0 * self.longitude).rem_euclid(1440.0);

        true_solar_minutes / 4.0 - 180.0
    }
}

/// Declination of the sun at the given time: the latitude at which the sun is
/// in zenith. Degrees.
pub fn declination_at(time: DateTime<Utc>) -> f64 {
    declination(julian_century(julian_day(time)))
}

/// Equation of time at the given moment: the difference between the apparent
/// and the mean solar time, in minutes.
pub fn equation_of_time_at(time: DateTime<Utc>) -> f64 {
    equation_of_time(julian_century(julian_day(time)))
}

/// Geometric mean longitude of the sun, in degrees.
fn mean_longitude(t: f64) -> f64 {
    (280.46646 + t * (36000.76983 + t * 0.0003032)).rem_euclid(360.0)
}

/// Geometric mean anomaly of the sun, in degrees.
fn mean_anomaly(t: f64) -> f64 {
    357.52911 + t * (35999.05029 - 0.0001537 * t)
}

/// Eccentricity of the Earth orbit.
fn eccentricity(t: f64) -> f64 {
    0.016708634 - t * (0.000042037 + 0.0000001267 * t)
}

/// Difference between the true and the mean solar longitude, in degrees.
fn equation_of_center(t: f64) -> f64 {
    let m = mean_anomaly(t).to_radians();

    m.sin() * (1.914602 - t * (0.004817 + 0.000014 * t))
        + (2.0 * m).sin() * (0.019993 - 0.000101 * t)
        + (3.0 * m).sin() * 0.000289
}

/// Apparent longitude of the sun corrected for nutation and aberration, in
/// degrees.
fn apparent_longitude(t: f64) -> f64 {
    let true_longitude = mean_longitude(t) + equation_of_center(t);
    let omega = (125.04 - 1934.136 * t).to_radians();

    true_longitude - 0.00569 - 0.00478 * omega.sin()
}

/// Obliquity of the ecliptic corrected for nutation, in degrees.
fn corrected_obliquity(t: f64) -> f64 {
    let mean =
        23.0 + (26.0 + (21.448 - t * (46.815 + t * (0.00059 - t * 0.001813))) / 60.0) / 60.0;
    let omega = (125.04 - 1934.136 * t).to_radians();

    mean + 0.00256 * omega.cos()
}

fn declination(t: f64) -> f64 {
    let obliquity = corrected_obliquity(t).to_radians();
    let longitude = apparent_longitude(t).to_radians();

    (obliquity.sin() * longitude.sin()).asin().to_degrees()
}

fn equation_of_time(t: f64) -> f64 {
    let obliquity = corrected_obliquity(t).to_radians();
    let l0 = mean_longitude(t).to_radians();
    let e = eccentricity(t);
    let m = mean_anomaly(t).to_radians();

    let y = (obliquity / 2.0).tan().powi(2);
    let radians = y * (2.0 * l0).sin() - 2.0 * e * m.sin()
        + 4.0 * e * y * m.sin() * (2.0 * l0).cos()
        - 0.5 * y * y * (4.0 * l0).sin()
        - 1.25 * e * e * (2.0 * m).sin();

    radians.to_degrees() * 4.0
}

/// Atmospheric refraction correction for the given geometric elevation, in
/// degrees (NOAA piecewise approximation).
fn refraction_correction(elevation: f64) -> f64 {
    if elevation > 85.0 {
        return 0.0;
    }

    let tan_elevation = elevation.to_radians().tan();
    let arc_seconds = if elevation > 5.0 {
        58.1 / tan_elevation - 0.07 / tan_elevation.powi(3)
            + 0.000086 / tan_elevation.powi(5)
    } else if elevation > -0.575 {
        1735.0
            + elevation
                * (-518.2 + elevation * (103.4 + elevation * (-12.79 + elevation * 0.711)))
    } else {
        -20.774 / tan_elevation
    };

    arc_seconds / 3600.0
}
