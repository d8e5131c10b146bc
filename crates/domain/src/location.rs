//! Location — postal address and GPS position of the house.

use serde::Serialize;

use crate::error::ValidationError;

/// Latitude and longitude in decimal degrees.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct GpsCoordinates {
    latitude: f64,
    longitude: f64,
}

impl GpsCoordinates {
    /// # Errors
    ///
    /// Returns [`ValidationError::InvalidCoordinate`] when latitude is outside
    /// `[-90, 90]` or longitude outside `[-180, 180]`.
    pub fn new(latitude: f64, longitude: f64) -> Result<Self, ValidationError> {
        if !(-90.0..=90.0).contains(&latitude) {
            return Err(ValidationError::InvalidCoordinate { field: "latitude" });
        }
        if !(-180.0..=180.0).contains(&longitude) {
            return Err(ValidationError::InvalidCoordinate { field: "longitude" });
        }
        Ok(Self {
            latitude,
            longitude,
        })
    }

    #[must_use]
    pub fn latitude(&self) -> f64 {
        self.latitude
    }

    #[must_use]
    pub fn longitude(&self) -> f64 {
        self.longitude
    }
}

/// Where the house stands.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Location {
    door: String,
    street: String,
    city: String,
    postal_code: String,
    country: String,
    gps: GpsCoordinates,
}

impl Location {
    /// Create a builder for constructing a [`Location`].
    #[must_use]
    pub fn builder() -> LocationBuilder {
        LocationBuilder::default()
    }

    #[must_use]
    pub fn door(&self) -> &str {
        &self.door
    }

    #[must_use]
    pub fn street(&self) -> &str {
        &self.street
    }

    #[must_use]
    pub fn city(&self) -> &str {
        &self.city
    }

    #[must_use]
    pub fn postal_code(&self) -> &str {
        &self.postal_code
    }

    #[must_use]
    pub fn country(&self) -> &str {
        &self.country
    }

    #[must_use]
    pub fn gps(&self) -> GpsCoordinates {
        self.gps
    }
}

/// Step-by-step builder for [`Location`].
#[derive(Debug, Default)]
pub struct LocationBuilder {
    door: String,
    street: String,
    city: String,
    postal_code: String,
    country: String,
    gps: Option<GpsCoordinates>,
}

impl LocationBuilder {
    #[must_use]
    pub fn door(mut self, door: impl Into<String>) -> Self {
        self.door = door.into();
        self
    }

    #[must_use]
    pub fn street(mut self, street: impl Into<String>) -> Self {
        self.street = street.into();
        self
    }

    #[must_use]
    pub fn city(mut self, city: impl Into<String>) -> Self {
        self.city = city.into();
        self
    }

    #[must_use]
    pub fn postal_code(mut self, postal_code: impl Into<String>) -> Self {
        self.postal_code = postal_code.into();
        self
    }

    #[must_use]
    pub fn country(mut self, country: impl Into<String>) -> Self {
        self.country = country.into();
        self
    }

    #[must_use]
    pub fn gps(mut self, gps: GpsCoordinates) -> Self {
        self.gps = Some(gps);
        self
    }

    /// Consume the builder, validate, and return a [`Location`].
    ///
    /// # Errors
    ///
    /// Returns [`ValidationError::BlankLocationField`] naming the first blank
    /// field, or [`ValidationError::InvalidCoordinate`] when no position was given.
    pub fn build(self) -> Result<Location, ValidationError> {
        for (field, value) in [
            ("door", &self.door),
            ("street", &self.street),
            ("city", &self.city),
            ("postal_code", &self.postal_code),
            ("country", &self.country),
        ] {
            if value.trim().is_empty() {
                return Err(ValidationError::BlankLocationField { field });
            }
        }
        let gps = self
            .gps
            .ok_or(ValidationError::InvalidCoordinate { field: "latitude" })?;
        Ok(Location {
            door: self.door,
            street: self.street,
            city: self.city,
            postal_code: self.postal_code,
            country: self.country,
            gps,
        })
    }
}
