//! Device — a physical thing in a room that hosts sensors and actuators.

use crate::collection::{Named, UniqueCollection};
use crate::component::{Actuator, Component, Sensor};
use crate::error::{SmartHomeError, ValidationError};
use crate::factory::{ComponentFactory, ComponentSpec};
use crate::id::DeviceId;
use crate::type_id::FunctionalityTag;

/// A device and the components it owns.
///
/// Component names are unique within the device across sensors and
/// actuators. Components can only be added while the device is active.
#[derive(Debug, Clone)]
pub struct Device {
    id: DeviceId,
    name: String,
    model: String,
    room: String,
    active: bool,
    components: UniqueCollection<Component>,
}

impl Device {
    /// Create a builder for constructing a [`Device`].
    #[must_use]
    pub fn builder() -> DeviceBuilder {
        DeviceBuilder::default()
    }

    #[must_use]
    pub fn id(&self) -> DeviceId {
        self.id
    }

    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    #[must_use]
    pub fn model(&self) -> &str {
        &self.model
    }

    /// Name of the room this device was added to.
    #[must_use]
    pub fn room(&self) -> &str {
        &self.room
    }

    #[must_use]
    pub fn is_active(&self) -> bool {
        self.active
    }

    /// Mark the device inactive. Existing components are kept.
    pub fn deactivate(&mut self) {
        self.active = false;
    }

    /// Create a component through `factory` and add it to this device.
    ///
    /// The device always sets itself as the component's owner. The
    /// constructor is not run when the name is already taken.
    ///
    /// # Errors
    ///
    /// - [`ValidationError::InactiveDevice`] if the device was deactivated
    /// - [`SmartHomeError::DuplicateName`] if a component already has this name
    /// - [`SmartHomeError::Create`] if the factory rejects the request
    pub fn add_component(
        &mut self,
        factory: &ComponentFactory,
        spec: ComponentSpec,
    ) -> Result<&mut Component, SmartHomeError> {
        if !self.active {
            return Err(ValidationError::InactiveDevice.into());
        }
        let name = spec.name().to_string();
        let spec = spec.owner(self.id);
        Ok(self.components.try_add(&name, || factory.create(spec))?)
    }

    #[must_use]
    pub fn components(&self) -> &UniqueCollection<Component> {
        &self.components
    }

    #[must_use]
    pub fn component(&self, name: &str) -> Option<&Component> {
        self.components.find_by_name(name)
    }

    #[must_use]
    pub fn component_mut(&mut self, name: &str) -> Option<&mut Component> {
        self.components.find_by_name_mut(name)
    }

    pub fn sensors(&self) -> impl Iterator<Item = &Sensor> {
        self.components.iter().filter_map(Component::as_sensor)
    }

    pub fn actuators(&self) -> impl Iterator<Item = &Actuator> {
        self.components.iter().filter_map(Component::as_actuator)
    }

    /// Distinct functionality tags of the owned components, first seen first.
    #[must_use]
    pub fn functionalities(&self) -> Vec<&FunctionalityTag> {
        let mut tags: Vec<&FunctionalityTag> = Vec::new();
        for component in &self.components {
            let tag = component.functionality();
            if !tags.contains(&tag) {
                tags.push(tag);
            }
        }
        tags
    }

    #[must_use]
    pub fn has_functionality(&self, tag: &str) -> bool {
        self.components
            .iter()
            .any(|component| component.functionality().matches(tag))
    }
}

impl Named for Device {
    fn name(&self) -> &str {
        &self.name
    }
}

/// Step-by-step builder for [`Device`].
#[derive(Debug, Default)]
pub struct DeviceBuilder {
    id: Option<DeviceId>,
    name: Option<String>,
    model: Option<String>,
    room: Option<String>,
}

impl DeviceBuilder {
    #[must_use]
    pub fn id(mut self, id: DeviceId) -> Self {
        self.id = Some(id);
        self
    }

    #[must_use]
    pub fn name(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    #[must_use]
    pub fn model(mut self, model: impl Into<String>) -> Self {
        self.model = Some(model.into());
        self
    }

    #[must_use]
    pub fn room(mut self, room: impl Into<String>) -> Self {
        self.room = Some(room.into());
        self
    }

    /// Consume the builder, validate, and return an active [`Device`].
    ///
    /// # Errors
    ///
    /// Returns [`ValidationError::EmptyName`] if `name` is missing or blank.
    pub fn build(self) -> Result<Device, ValidationError> {
        let name = self.name.unwrap_or_default();
        if name.trim().is_empty() {
            return Err(ValidationError::EmptyName);
        }
        Ok(Device {
            id: self.id.unwrap_or_default(),
            name,
            model: self.model.unwrap_or_default(),
            room: self.room.unwrap_or_default(),
            active: true,
            components: UniqueCollection::new("component"),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::CreateError;
    use crate::settings::RangeSettings;
    use crate::testing;

    fn device() -> Device {
        Device::builder()
            .name("Weather Station")
            .model("WS-100")
            .room("Garden")
            .build()
            .unwrap()
    }

    #[test]
    fn should_build_active_device() {
        let device = device();
        assert!(device.is_active());
        assert_eq!(device.room(), "Garden");
        assert!(device.components().is_empty());
    }

    #[test]
    fn should_reject_device_without_name() {
        assert_eq!(
            Device::builder().model("X").build().unwrap_err(),
            ValidationError::EmptyName
        );
    }

    #[test]
    fn should_add_component_owned_by_device() {
        let factory = testing::builtin_factory();
        let mut device = device();

        let component = device
            .add_component(
                &factory,
                ComponentSpec::new("TemperatureSensor", "Thermometer"),
            )
            .unwrap();
        assert_eq!(component.owner(), Some(device.id()));
        assert!(device.component("THERMOMETER").is_some());
    }

    #[test]
    fn should_reject_component_name_shared_across_sensor_and_actuator() {
        let factory = testing::builtin_factory();
        let mut device = device();
        device
            .add_component(&factory, ComponentSpec::new("SwitchSensor", "Main"))
            .unwrap();

        let err = device
            .add_component(&factory, ComponentSpec::new("SwitchActuator", "main"))
            .unwrap_err();
        assert!(matches!(err, SmartHomeError::DuplicateName(_)));
        assert_eq!(device.components().len(), 1);
    }

    #[test]
    fn should_surface_factory_failure_and_leave_device_unchanged() {
        let factory = testing::builtin_factory();
        let mut device = device();
        let err = device
            .add_component(&factory, ComponentSpec::new("LaserSensor", "Laser"))
            .unwrap_err();
        assert!(matches!(
            err,
            SmartHomeError::Create(CreateError::UnknownType(_))
        ));
        assert!(device.components().is_empty());
    }

    #[test]
    fn should_refuse_components_once_deactivated() {
        let factory = testing::builtin_factory();
        let mut device = device();
        device.deactivate();
        assert!(matches!(
            device.add_component(&factory, ComponentSpec::new("WindSensor", "Wind")),
            Err(SmartHomeError::Validation(ValidationError::InactiveDevice))
        ));
    }

    #[test]
    fn should_report_each_functionality_once() {
        let factory = testing::builtin_factory();
        let mut device = device();
        for name in ["North", "South"] {
            device
                .add_component(&factory, ComponentSpec::new("TemperatureSensor", name))
                .unwrap();
        }
        device
            .add_component(
                &factory,
                ComponentSpec::new("IntegerValueActuator", "Fan")
                    .settings(RangeSettings::integer("0", "5").unwrap()),
            )
            .unwrap();

        let tags: Vec<_> = device
            .functionalities()
            .into_iter()
            .map(FunctionalityTag::as_str)
            .collect();
        assert_eq!(tags, ["TemperatureSensor", "IntegerValueActuator"]);
        assert!(device.has_functionality("integervalueactuator"));
        assert_eq!(device.sensors().count(), 2);
        assert_eq!(device.actuators().count(), 1);
    }
}
