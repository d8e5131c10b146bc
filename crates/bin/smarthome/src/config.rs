//! Configuration loading — TOML file with environment variable overrides.
//!
//! Looks for `smarthome.toml` in the working directory, or at the path in
//! `SMARTHOME_CONFIG`. Every field has a sensible default so the file is
//! optional. Environment variables take precedence over file values.

use std::path::PathBuf;

use serde::Deserialize;
use smarthome_domain::error::ValidationError;
use smarthome_domain::location::{GpsCoordinates, Location};
use smarthome_domain::settings::RangeSettings;

/// Top-level configuration.
#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Logging settings.
    pub logging: LoggingConfig,
    /// Component catalogue location.
    pub catalogue: CatalogueConfig,
    /// The house to build at startup.
    pub house: HouseConfig,
}

/// Logging configuration.
#[derive(Debug, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    /// Filter directive (`RUST_LOG` syntax).
    pub filter: String,
}

/// Where the type catalogue lives.
#[derive(Debug, Deserialize)]
#[serde(default)]
pub struct CatalogueConfig {
    /// Path to a TOML file with `sensor` and `actuator` arrays.
    pub path: PathBuf,
}

/// The house and its rooms.
#[derive(Debug, Deserialize)]
#[serde(default)]
pub struct HouseConfig {
    pub name: String,
    pub location: Option<LocationConfig>,
    pub rooms: Vec<RoomConfig>,
}

/// Postal address and GPS position of the house.
#[derive(Debug, Deserialize)]
pub struct LocationConfig {
    pub door: String,
    pub street: String,
    pub city: String,
    pub postal_code: String,
    pub country: String,
    pub latitude: f64,
    pub longitude: f64,
}

impl LocationConfig {
    /// # Errors
    ///
    /// Returns the first field the location rejects.
    pub fn location(&self) -> Result<Location, ValidationError> {
        Location::builder()
            .door(self.door.as_str())
            .street(self.street.as_str())
            .city(self.city.as_str())
            .postal_code(self.postal_code.as_str())
            .country(self.country.as_str())
            .gps(GpsCoordinates::new(self.latitude, self.longitude)?)
            .build()
    }
}

#[derive(Debug, Deserialize)]
pub struct RoomConfig {
    pub name: String,
    #[serde(default)]
    pub floor: i32,
    pub width: f64,
    pub length: f64,
    pub height: f64,
    /// Outside the building envelope, e.g. a garden.
    #[serde(default)]
    pub outdoor: bool,
    #[serde(default)]
    pub devices: Vec<DeviceConfig>,
}

#[derive(Debug, Deserialize)]
pub struct DeviceConfig {
    pub name: String,
    #[serde(default)]
    pub model: String,
    #[serde(default)]
    pub sensors: Vec<SensorConfig>,
    #[serde(default)]
    pub actuators: Vec<ActuatorConfig>,
}

#[derive(Debug, Deserialize)]
pub struct SensorConfig {
    #[serde(rename = "type")]
    pub type_id: String,
    pub name: String,
    /// Raw readings replayed by a simulated source; none means no source.
    #[serde(default)]
    pub readings: Vec<String>,
}

/// An actuator entry. Limits are strings so their literal digits are kept.
#[derive(Debug, Deserialize)]
pub struct ActuatorConfig {
    #[serde(rename = "type")]
    pub type_id: String,
    pub name: String,
    pub lower: Option<String>,
    pub upper: Option<String>,
    pub precision: Option<String>,
}

impl ActuatorConfig {
    /// Range settings described by `lower`, `upper` and `precision`.
    ///
    /// No limits means no settings; a precision makes them decimal.
    ///
    /// # Errors
    ///
    /// Returns [`ValidationError::MissingSettings`] when only some limits are
    /// given, or whatever the settings constructors reject.
    pub fn settings(&self) -> Result<Option<RangeSettings>, ValidationError> {
        match (&self.lower, &self.upper, &self.precision) {
            (None, None, None) => Ok(None),
            (Some(lower), Some(upper), None) => RangeSettings::integer(lower, upper).map(Some),
            (Some(lower), Some(upper), Some(precision)) => {
                RangeSettings::decimal(lower, upper, precision).map(Some)
            }
            _ => Err(ValidationError::MissingSettings),
        }
    }
}

impl Config {
    /// Load configuration from `smarthome.toml` (or `SMARTHOME_CONFIG`, if
    /// set) then apply environment-variable overrides.
    ///
    /// # Errors
    ///
    /// Returns an error if the TOML file exists but is malformed.
    pub fn load() -> Result<Self, ConfigError> {
        let path =
            std::env::var("SMARTHOME_CONFIG").unwrap_or_else(|_| "smarthome.toml".to_string());
        let mut config = Self::from_file(&path)?;
        config.apply_env_overrides();
        config.validate()?;
        Ok(config)
    }

    /// Parse configuration from TOML text.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Parse`] for malformed TOML.
    pub fn from_toml(content: &str) -> Result<Self, ConfigError> {
        toml::from_str(content).map_err(ConfigError::Parse)
    }

    fn from_file(path: &str) -> Result<Self, ConfigError> {
        match std::fs::read_to_string(path) {
            Ok(content) => Self::from_toml(&content),
            Err(err) if err.kind() == std::io::ErrorKind::NotFound => Ok(Self::default()),
            Err(err) => Err(ConfigError::Io(err)),
        }
    }

    fn apply_env_overrides(&mut self) {
        if let Ok(val) = std::env::var("SMARTHOME_CATALOGUE") {
            self.catalogue.path = PathBuf::from(val);
        }
        if let Ok(val) = std::env::var("SMARTHOME_LOG") {
            self.logging.filter = val;
        }
        if let Ok(val) = std::env::var("RUST_LOG") {
            self.logging.filter = val;
        }
    }

    fn validate(&self) -> Result<(), ConfigError> {
        if self.catalogue.path.as_os_str().is_empty() {
            return Err(ConfigError::Validation(
                "catalogue path must not be empty".to_string(),
            ));
        }
        if self.house.name.trim().is_empty() {
            return Err(ConfigError::Validation(
                "house name must not be empty".to_string(),
            ));
        }
        Ok(())
    }
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            filter: "smarthome=info,smarthome_app=info,smarthome_domain=info".to_string(),
        }
    }
}

impl Default for CatalogueConfig {
    fn default() -> Self {
        Self {
            path: PathBuf::from("catalogue.toml"),
        }
    }
}

impl Default for HouseConfig {
    fn default() -> Self {
        Self {
            name: "Home".to_string(),
            location: None,
            rooms: Vec::new(),
        }
    }
}

/// Configuration errors.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    /// TOML parse failure.
    #[error("failed to parse config file")]
    Parse(#[from] toml::de::Error),
    /// File I/O failure.
    #[error("failed to read config file")]
    Io(#[from] std::io::Error),
    /// Semantic validation failure.
    #[error("invalid configuration: {0}")]
    Validation(String),
}
