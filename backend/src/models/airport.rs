//! Airport description
//!
//! The static input to a simulation: the runway inventory and an optional
//! compatibility graph. Validated once before a simulation is constructed.

use crate::models::compatibility::{CompatibilityError, RunwayCompatibility};
use crate::models::runway::Runway;
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;
use std::path::Path;
use thiserror::Error;

/// Errors raised while loading or validating an airport description
#[derive(Debug, Error)]
pub enum AirportError {
    #[error("airport {0} has no runways")]
    NoRunways(String),

    #[error("duplicate runway designation: {0}")]
    DuplicateRunway(String),

    #[error("runway {runway} has non-positive minimum separation ({seconds}s)")]
    InvalidSeparation { runway: String, seconds: f64 },

    #[error("runway {runway} has true bearing {bearing} outside [0, 360)")]
    InvalidBearing { runway: String, bearing: f64 },

    #[error("runway {runway} has negative {limit} limit: {value}")]
    NegativeWindLimit {
        runway: String,
        limit: &'static str,
        value: f64,
    },

    #[error("Compatibility error: {0}")]
    Compatibility(#[from] CompatibilityError),

    #[error("Failed to parse airport description: {0}")]
    Parse(#[from] serde_json::Error),

    #[error("Failed to read airport description: {0}")]
    Io(#[from] std::io::Error),
}

/// A physical airport and its runways
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Airport {
    pub name: String,

    #[serde(default)]
    pub iata_code: String,

    #[serde(default)]
    pub icao_code: String,

    #[serde(default)]
    pub city: String,

    #[serde(default)]
    pub country: String,

    pub runways: Vec<Runway>,

    /// Which runways may operate together (absent = all compatible)
    #[serde(default)]
    pub runway_compatibility: RunwayCompatibility,
}

impl Airport {
    /// Create an airport whose runways are all mutually compatible
    pub fn new(name: impl Into<String>, runways: Vec<Runway>) -> Self {
        Self {
            name: name.into(),
            iata_code: String::new(),
            icao_code: String::new(),
            city: String::new(),
            country: String::new(),
            runways,
            runway_compatibility: RunwayCompatibility::all_compatible(),
        }
    }

    /// Attach a compatibility graph
    pub fn with_compatibility(mut self, compatibility: RunwayCompatibility) -> Self {
        self.runway_compatibility = compatibility;
        self
    }

    /// Set IATA/ICAO codes
    pub fn with_codes(mut self, iata: impl Into<String>, icao: impl Into<String>) -> Self {
        self.iata_code = iata.into();
        self.icao_code = icao.into();
        self
    }

    /// Runway designations in declaration order
    pub fn runway_ids(&self) -> Vec<String> {
        self.runways.iter().map(|r| r.designation.clone()).collect()
    }

    /// Look up a runway by designation
    pub fn runway(&self, designation: &str) -> Option<&Runway> {
        self.runways.iter().find(|r| r.designation == designation)
    }

    /// Validate runways and the compatibility graph
    pub fn validate(&self) -> Result<(), AirportError> {
        if self.runways.is_empty() {
            return Err(AirportError::NoRunways(self.name.clone()));
        }

        let mut seen = BTreeSet::new();
        for runway in &self.runways {
            if !seen.insert(runway.designation.as_str()) {
                return Err(AirportError::DuplicateRunway(runway.designation.clone()));
            }
            if runway.separation_seconds() <= 0.0 {
                return Err(AirportError::InvalidSeparation {
                    runway: runway.designation.clone(),
                    seconds: runway.separation_seconds(),
                });
            }
            if !(0.0..360.0).contains(&runway.true_bearing) {
                return Err(AirportError::InvalidBearing {
                    runway: runway.designation.clone(),
                    bearing: runway.true_bearing,
                });
            }
            if runway.crosswind_limit_knots < 0.0 {
                return Err(AirportError::NegativeWindLimit {
                    runway: runway.designation.clone(),
                    limit: "crosswind",
                    value: runway.crosswind_limit_knots,
                });
            }
            if runway.tailwind_limit_knots < 0.0 {
                return Err(AirportError::NegativeWindLimit {
                    runway: runway.designation.clone(),
                    limit: "tailwind",
                    value: runway.tailwind_limit_knots,
                });
            }
        }

        self.runway_compatibility.validate(&self.runway_ids())?;
        Ok(())
    }

    /// Parse and validate a JSON airport description
    ///
    /// # Example
    /// ```
    /// use airport_capacity_core_rs::Airport;
    ///
    /// let airport = Airport::from_json_str(r#"{
    ///     "name": "Demo",
    ///     "runways": [
    ///         {"designation": "09", "true_bearing": 90.0, "minimum_separation_seconds": 60}
    ///     ]
    /// }"#).unwrap();
    /// assert_eq!(airport.runway_ids(), vec!["09".to_string()]);
    /// ```
    pub fn from_json_str(json: &str) -> Result<Self, AirportError> {
        let airport: Airport = serde_json::from_str(json)?;
        airport.validate()?;
        Ok(airport)
    }

    /// Read, parse and validate a JSON airport description file
    pub fn from_json_file(path: impl AsRef<Path>) -> Result<Self, AirportError> {
        let contents = std::fs::read_to_string(path)?;
        Self::from_json_str(&contents)
    }
}
