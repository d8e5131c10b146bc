//! Component — a sensor or actuator hosted by a device.
//!
//! Components are produced by the
//! [`ComponentFactory`](crate::factory::ComponentFactory) and owned by the
//! device they were added to. Every component carries a name that is unique
//! within its device and the [`ComponentTypeId`] it was created from; the type
//! id is also the functionality the component contributes to the device.

mod actuator;
mod sensor;

pub use actuator::{
    Actuator, ActuatorBuilder, ActuatorCommand, CommandOutcome, Control, MAX_POSITION,
};
pub use sensor::{Reading, Sensor, SensorBuilder};

use crate::collection::Named;
use crate::id::{ComponentId, DeviceId};
use crate::type_id::{ComponentKind, ComponentTypeId, FunctionalityTag};

/// A constructed sensor or actuator.
#[derive(Debug, Clone)]
pub enum Component {
    Sensor(Sensor),
    Actuator(Actuator),
}

impl Component {
    #[must_use]
    pub fn id(&self) -> ComponentId {
        match self {
            Self::Sensor(s) => s.id(),
            Self::Actuator(a) => a.id(),
        }
    }

    #[must_use]
    pub fn name(&self) -> &str {
        match self {
            Self::Sensor(s) => s.name(),
            Self::Actuator(a) => a.name(),
        }
    }

    #[must_use]
    pub fn type_id(&self) -> &ComponentTypeId {
        match self {
            Self::Sensor(s) => s.type_id(),
            Self::Actuator(a) => a.type_id(),
        }
    }

    #[must_use]
    pub fn kind(&self) -> ComponentKind {
        match self {
            Self::Sensor(_) => ComponentKind::Sensor,
            Self::Actuator(_) => ComponentKind::Actuator,
        }
    }

    #[must_use]
    pub fn owner(&self) -> Option<DeviceId> {
        match self {
            Self::Sensor(s) => s.owner(),
            Self::Actuator(a) => a.owner(),
        }
    }

    /// The capability this component contributes to its device.
    #[must_use]
    pub fn functionality(&self) -> &FunctionalityTag {
        self.type_id()
    }

    #[must_use]
    pub fn as_sensor(&self) -> Option<&Sensor> {
        match self {
            Self::Sensor(s) => Some(s),
            Self::Actuator(_) => None,
        }
    }

    #[must_use]
    pub fn as_sensor_mut(&mut self) -> Option<&mut Sensor> {
        match self {
            Self::Sensor(s) => Some(s),
            Self::Actuator(_) => None,
        }
    }

    #[must_use]
    pub fn as_actuator(&self) -> Option<&Actuator> {
        match self {
            Self::Actuator(a) => Some(a),
            Self::Sensor(_) => None,
        }
    }

    #[must_use]
    pub fn as_actuator_mut(&mut self) -> Option<&mut Actuator> {
        match self {
            Self::Actuator(a) => Some(a),
            Self::Sensor(_) => None,
        }
    }
}

impl Named for Component {
    fn name(&self) -> &str {
        Component::name(self)
    }
}

impl From<Sensor> for Component {
    fn from(sensor: Sensor) -> Self {
        Self::Sensor(sensor)
    }
}

impl From<Actuator> for Component {
    fn from(actuator: Actuator) -> Self {
        Self::Actuator(actuator)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn should_expose_type_id_as_functionality() {
        let component: Component = Sensor::builder()
            .name("Living Room Thermometer")
            .type_id("TemperatureSensor")
            .build()
            .unwrap()
            .into();
        assert_eq!(component.functionality().as_str(), "TemperatureSensor");
        assert_eq!(component.kind(), ComponentKind::Sensor);
        assert!(component.as_sensor().is_some());
        assert!(component.as_actuator().is_none());
    }

    #[test]
    fn should_report_owner_of_actuator() {
        let owner = DeviceId::new();
        let component: Component = Actuator::builder()
            .name("Main Switch")
            .type_id("SwitchActuator")
            .owner(owner)
            .control(Control::Switch { on: false })
            .build()
            .unwrap()
            .into();
        assert_eq!(component.owner(), Some(owner));
        assert_eq!(component.kind(), ComponentKind::Actuator);
    }
}
