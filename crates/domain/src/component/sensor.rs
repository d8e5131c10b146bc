//! Sensor — a component that reports raw readings.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::error::{HardwareError, ValidationError};
use crate::hardware::{SharedReadingSource, SourceDebug};
use crate::id::{ComponentId, DeviceId};
use crate::time::{Timestamp, now};
use crate::type_id::ComponentTypeId;

/// A single raw reading taken from a sensor's source.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Reading {
    pub value: String,
    pub recorded_at: Timestamp,
}

/// A component that observes its environment.
#[derive(Clone)]
pub struct Sensor {
    id: ComponentId,
    name: String,
    type_id: ComponentTypeId,
    owner: Option<DeviceId>,
    source: Option<SharedReadingSource>,
    log: Vec<Reading>,
}

impl Sensor {
    /// Create a builder for constructing a [`Sensor`].
    #[must_use]
    pub fn builder() -> SensorBuilder {
        SensorBuilder::default()
    }

    #[must_use]
    pub fn id(&self) -> ComponentId {
        self.id
    }

    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    #[must_use]
    pub fn type_id(&self) -> &ComponentTypeId {
        &self.type_id
    }

    #[must_use]
    pub fn owner(&self) -> Option<DeviceId> {
        self.owner
    }

    /// Take a reading from the attached source and append it to the log.
    ///
    /// # Errors
    ///
    /// Returns [`HardwareError::NoSource`] when the sensor was built without a
    /// source, or whatever the source reports when it cannot produce a value.
    pub fn read(&mut self) -> Result<Reading, HardwareError> {
        let source = self.source.as_ref().ok_or(HardwareError::NoSource)?;
        let reading = Reading {
            value: source.read()?,
            recorded_at: now(),
        };
        self.log.push(reading.clone());
        Ok(reading)
    }

    /// Every reading taken so far, oldest first.
    #[must_use]
    pub fn log(&self) -> &[Reading] {
        &self.log
    }
}

impl fmt::Debug for Sensor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Sensor")
            .field("id", &self.id)
            .field("name", &self.name)
            .field("type_id", &self.type_id)
            .field("owner", &self.owner)
            .field("source", &SourceDebug(&self.source))
            .field("log", &self.log)
            .finish()
    }
}

/// Step-by-step builder for [`Sensor`].
#[derive(Default)]
pub struct SensorBuilder {
    id: Option<ComponentId>,
    name: Option<String>,
    type_id: Option<ComponentTypeId>,
    owner: Option<DeviceId>,
    source: Option<SharedReadingSource>,
}

impl SensorBuilder {
    #[must_use]
    pub fn id(mut self, id: ComponentId) -> Self {
        self.id = Some(id);
        self
    }

    #[must_use]
    pub fn name(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    #[must_use]
    pub fn type_id(mut self, type_id: impl Into<ComponentTypeId>) -> Self {
        self.type_id = Some(type_id.into());
        self
    }

    #[must_use]
    pub fn owner(mut self, owner: DeviceId) -> Self {
        self.owner = Some(owner);
        self
    }

    #[must_use]
    pub fn source(mut self, source: SharedReadingSource) -> Self {
        self.source = Some(source);
        self
    }

    /// Consume the builder, validate, and return a [`Sensor`].
    ///
    /// # Errors
    ///
    /// Returns [`ValidationError::EmptyName`] if `name` is missing or blank.
    pub fn build(self) -> Result<Sensor, ValidationError> {
        let name = self.name.unwrap_or_default();
        if name.trim().is_empty() {
            return Err(ValidationError::EmptyName);
        }
        Ok(Sensor {
            id: self.id.unwrap_or_default(),
            name,
            type_id: self.type_id.unwrap_or_else(|| ComponentTypeId::new("Sensor")),
            owner: self.owner,
            source: self.source,
            log: Vec::new(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::hardware::ReadingSource;
    use std::sync::Arc;
    use std::sync::atomic::{AtomicUsize, Ordering};

    struct Counting(AtomicUsize);

    impl ReadingSource for Counting {
        fn read(&self) -> Result<String, HardwareError> {
            let n = self.0.fetch_add(1, Ordering::SeqCst);
            Ok(format!("{}.5", 20 + n))
        }
    }

    struct Broken;

    impl ReadingSource for Broken {
        fn read(&self) -> Result<String, HardwareError> {
            Err(HardwareError::Unavailable("offline".to_string()))
        }
    }

    #[test]
    fn should_build_sensor_when_name_provided() {
        let sensor = Sensor::builder()
            .name("Thermometer")
            .type_id("TemperatureSensor")
            .build()
            .unwrap();
        assert_eq!(sensor.name(), "Thermometer");
        assert!(sensor.log().is_empty());
    }

    #[test]
    fn should_reject_blank_name() {
        let result = Sensor::builder().name("   ").build();
        assert!(matches!(result, Err(ValidationError::EmptyName)));
    }

    #[test]
    fn should_append_readings_to_log_in_order() {
        let mut sensor = Sensor::builder()
            .name("Thermometer")
            .source(Arc::new(Counting(AtomicUsize::new(0))))
            .build()
            .unwrap();

        assert_eq!(sensor.read().unwrap().value, "20.5");
        assert_eq!(sensor.read().unwrap().value, "21.5");

        let values: Vec<_> = sensor.log().iter().map(|r| r.value.as_str()).collect();
        assert_eq!(values, ["20.5", "21.5"]);
    }

    #[test]
    fn should_fail_reading_without_source() {
        let mut sensor = Sensor::builder().name("Orphan").build().unwrap();
        assert_eq!(sensor.read(), Err(HardwareError::NoSource));
    }

    #[test]
    fn should_not_log_failed_reading() {
        let mut sensor = Sensor::builder()
            .name("Flaky")
            .source(Arc::new(Broken))
            .build()
            .unwrap();
        assert!(sensor.read().is_err());
        assert!(sensor.log().is_empty());
    }
}
