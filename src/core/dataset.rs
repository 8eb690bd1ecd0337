//! Narrative dataset: crash sites, the flights involved, and their text.
//!
//! The JSON keeps its French field names (`coord`, `vols`, `nom`); the Rust
//! side exposes them under descriptive names.

use super::constants::{MAX_LATITUDE, MAX_LONGITUDE};
use super::projection::GeoPoint;
use serde::Deserialize;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum DatasetError {
    #[error("invalid JSON: {0}")]
    Json(#[from] serde_json::Error),
    #[error("{what}: coordinate ({lon}, {lat}) is out of range")]
    InvalidCoordinate { what: String, lon: f64, lat: f64 },
    #[error("topology has no object named `{0}`")]
    MissingObject(String),
    #[error("arc index {index} out of range ({count} arcs)")]
    ArcOutOfRange { index: i64, count: usize },
}

#[derive(Clone, Debug, Deserialize, PartialEq)]
pub struct Place {
    pub longitude: f64,
    pub latitude: f64,
    #[serde(rename = "nom", default)]
    pub name: String,
}

impl Place {
    pub fn point(&self) -> GeoPoint {
        GeoPoint::new(self.longitude, self.latitude)
    }

    fn validate(&self, what: impl FnOnce() -> String) -> Result<(), DatasetError> {
        let (lon, lat) = (self.longitude, self.latitude);
        let valid = lon.is_finite()
            && lat.is_finite()
            && lon.abs() <= MAX_LONGITUDE
            && lat.abs() <= MAX_LATITUDE;
        if valid {
            Ok(())
        } else {
            Err(DatasetError::InvalidCoordinate {
                what: what(),
                lon,
                lat,
            })
        }
    }
}

#[derive(Clone, Debug, Deserialize, PartialEq)]
pub struct Flight {
    pub departure: Place,
    pub destination: Place,
    #[serde(rename = "nom", default)]
    pub name: String,
}

#[derive(Clone, Debug, Deserialize, PartialEq)]
pub struct Crash {
    pub coord: Place,
    #[serde(rename = "vols", default)]
    pub flights: Vec<Flight>,
    #[serde(default)]
    pub text: Vec<String>,
}

impl Crash {
    pub fn location(&self) -> GeoPoint {
        self.coord.point()
    }
}

/// Parse and validate the crash list.
pub fn parse_crashes(json: &str) -> Result<Vec<Crash>, DatasetError> {
    let crashes: Vec<Crash> = serde_json::from_str(json)?;
    for (i, crash) in crashes.iter().enumerate() {
        crash.coord.validate(|| format!("crash {i}"))?;
        for (j, flight) in crash.flights.iter().enumerate() {
            flight
                .departure
                .validate(|| format!("crash {i} flight {j} departure"))?;
            flight
                .destination
                .validate(|| format!("crash {i} flight {j} destination"))?;
        }
    }
    log::info!("[data] {} crashes loaded", crashes.len());
    Ok(crashes)
}
