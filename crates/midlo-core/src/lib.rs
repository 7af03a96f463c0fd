//! Shared types and configuration for the midlo backend.

mod app_config;
mod config;

pub use app_config::{AppConfig, Environment};
pub use config::{load_app_config, load_app_config_from_env};

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// A WGS-84 latitude/longitude pair in decimal degrees.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Coordinate {
    pub lat: f64,
    pub lng: f64,
}

impl Coordinate {
    #[must_use]
    pub const fn new(lat: f64, lng: f64) -> Self {
        Self { lat, lng }
    }

    /// The arithmetic midpoint of two coordinates.
    ///
    /// Good enough for two meeting parties in the same region; the place
    /// discovery layer compensates for sparse midpoints by widening its
    /// search, so a geodesic midpoint buys nothing here.
    #[must_use]
    pub fn midpoint(a: Self, b: Self) -> Self {
        Self {
            lat: (a.lat + b.lat) / 2.0,
            lng: (a.lng + b.lng) / 2.0,
        }
    }

    /// Whether the coordinate lies in the valid lat/lng ranges.
    #[must_use]
    pub fn is_in_range(&self) -> bool {
        (-90.0..=90.0).contains(&self.lat) && (-180.0..=180.0).contains(&self.lng)
    }
}

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("missing required environment variable: {0}")]
    MissingEnvVar(String),

    #[error("invalid value for environment variable {var}: {reason}")]
    InvalidEnvVar { var: String, reason: String },
}
