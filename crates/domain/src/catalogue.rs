//! Built-in component constructors.
//!
//! [`register_builtins`] binds a constructor for every type listed in
//! [`SENSOR_TYPES`] and [`ACTUATOR_TYPES`]. Which of them can actually be
//! created is still decided by the catalogue the registry was loaded from.

use crate::component::{Actuator, Component, Control, Sensor};
use crate::error::{AlreadyRegisteredError, ValidationError};
use crate::factory::{ComponentDescriptor, ComponentFactory, ConstructArgs};
use crate::registry::TypeCatalogue;
use crate::settings::RangeSettings;

pub const SENSOR_TYPES: &[&str] = &[
    "TemperatureSensor",
    "HumiditySensor",
    "DewPointSensor",
    "WindSensor",
    "SolarIrradianceSensor",
    "PowerConsumptionSensor",
    "AveragePowerConsumptionSensor",
    "EnergyConsumptionSensor",
    "PositionSensor",
    "SwitchSensor",
    "SunriseSensor",
    "SunsetSensor",
];

pub const ACTUATOR_TYPES: &[&str] = &[
    "SwitchActuator",
    "RollerBlindActuator",
    "IntegerValueActuator",
    "DecimalValueActuator",
];

/// A catalogue that permits every built-in type.
#[must_use]
pub fn builtin_catalogue() -> TypeCatalogue {
    TypeCatalogue {
        sensor: SENSOR_TYPES.iter().map(ToString::to_string).collect(),
        actuator: ACTUATOR_TYPES.iter().map(ToString::to_string).collect(),
    }
}

/// Bind all built-in constructors. Every one of them requires an owner.
///
/// # Errors
///
/// Returns [`AlreadyRegisteredError`] for the first built-in type that is
/// already bound on `factory`; bindings made before it are kept.
pub fn register_builtins(factory: &mut ComponentFactory) -> Result<(), AlreadyRegisteredError> {
    for &type_id in SENSOR_TYPES {
        factory.register(ComponentDescriptor::new(type_id, sensor).requires_owner())?;
    }
    factory.register(ComponentDescriptor::new("SwitchActuator", switch).requires_owner())?;
    factory
        .register(ComponentDescriptor::new("RollerBlindActuator", roller_blind).requires_owner())?;
    factory.register(
        ComponentDescriptor::new("IntegerValueActuator", integer_value).requires_owner(),
    )?;
    factory.register(
        ComponentDescriptor::new("DecimalValueActuator", decimal_value).requires_owner(),
    )?;
    Ok(())
}

fn sensor(args: ConstructArgs) -> Result<Component, ValidationError> {
    let mut builder = Sensor::builder().name(args.name).type_id(args.type_id);
    if let Some(owner) = args.owner {
        builder = builder.owner(owner);
    }
    if let Some(source) = args.source {
        builder = builder.source(source);
    }
    builder.build().map(Component::from)
}

fn actuator(args: ConstructArgs, control: Control) -> Result<Component, ValidationError> {
    let mut builder = Actuator::builder()
        .name(args.name)
        .type_id(args.type_id)
        .control(control);
    if let Some(owner) = args.owner {
        builder = builder.owner(owner);
    }
    builder.build().map(Component::from)
}

fn switch(args: ConstructArgs) -> Result<Component, ValidationError> {
    actuator(args, Control::Switch { on: false })
}

fn roller_blind(args: ConstructArgs) -> Result<Component, ValidationError> {
    actuator(args, Control::Position { percent: 0 })
}

fn integer_value(args: ConstructArgs) -> Result<Component, ValidationError> {
    match args.settings {
        Some(settings @ RangeSettings::Integer(_)) => {
            actuator(args, Control::from_settings(settings))
        }
        Some(RangeSettings::Decimal(_)) => {
            Err(ValidationError::SettingsKindMismatch { expected: "integer" })
        }
        None => Err(ValidationError::MissingSettings),
    }
}

fn decimal_value(args: ConstructArgs) -> Result<Component, ValidationError> {
    match args.settings {
        Some(settings @ RangeSettings::Decimal(_)) => {
            actuator(args, Control::from_settings(settings))
        }
        Some(RangeSettings::Integer(_)) => {
            Err(ValidationError::SettingsKindMismatch { expected: "decimal" })
        }
        None => Err(ValidationError::MissingSettings),
    }
}
