//! Device location sources.
//!
//! A terminal has no GPS, so the "current position" comes from configuration
//! (`[location]` table, `PROPFINDER_LOCATION`, or `--location`). The search
//! form only sees the [`LocationProvider`] trait.

use crate::model::error::LocationError;
use std::fmt;

/// A latitude/longitude pair in decimal degrees.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Coordinates {
    pub latitude: f64,
    pub longitude: f64,
}

impl Coordinates {
    /// Validate and build coordinates.
    ///
    /// # Errors
    ///
    /// Returns `LocationError::InvalidCoordinates` when either value is not
    /// finite or out of range.
    pub fn new(latitude: f64, longitude: f64) -> Result<Self, LocationError> {
        let invalid = |reason: &str| LocationError::InvalidCoordinates {
            input: format!("{latitude},{longitude}"),
            reason: reason.to_string(),
        };

        if !latitude.is_finite() || !(-90.0..=90.0).contains(&latitude) {
            return Err(invalid("latitude must be between -90 and 90"));
        }
        if !longitude.is_finite() || !(-180.0..=180.0).contains(&longitude) {
            return Err(invalid("longitude must be between -180 and 180"));
        }

        Ok(Self {
            latitude,
            longitude,
        })
    }

    /// Parse a `"<lat>,<lon>"` string. Whitespace around either number is allowed.
    ///
    /// # Errors
    ///
    /// Returns `LocationError::InvalidCoordinates` for anything else.
    pub fn parse(input: &str) -> Result<Self, LocationError> {
        let invalid = |reason: &str| LocationError::InvalidCoordinates {
            input: input.to_string(),
            reason: reason.to_string(),
        };

        let (lat, lon) = input
            .split_once(',')
            .ok_or_else(|| invalid("expected \"<lat>,<lon>\""))?;
        let latitude: f64 = lat
            .trim()
            .parse()
            .map_err(|_| invalid("latitude is not a number"))?;
        let longitude: f64 = lon
            .trim()
            .parse()
            .map_err(|_| invalid("longitude is not a number"))?;

        Self::new(latitude, longitude)
    }
}

/// Formats as `"<lat>,<lon>"`, the form the `centre_point` filter expects.
impl fmt::Display for Coordinates {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{},{}", self.latitude, self.longitude)
    }
}

/// Supplies the current device position.
pub trait LocationProvider {
    /// # Errors
    ///
    /// Returns a `LocationError` describing why no position is available.
    fn current_position(&self) -> Result<Coordinates, LocationError>;
}

/// Always reports the same position.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FixedLocation(pub Coordinates);

impl LocationProvider for FixedLocation {
    fn current_position(&self) -> Result<Coordinates, LocationError> {
        Ok(self.0)
    }
}

/// Used when no position is configured.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct NoLocation;

impl LocationProvider for NoLocation {
    fn current_position(&self) -> Result<Coordinates, LocationError> {
        Err(LocationError::Unavailable)
    }
}

/// Pick a provider for optional configured coordinates.
pub fn provider_for(coordinates: Option<Coordinates>) -> Box<dyn LocationProvider + Send> {
    match coordinates {
        Some(c) => Box::new(FixedLocation(c)),
        None => Box::new(NoLocation),
    }
}
