//! Actuator — a component that changes its environment.
//!
//! An actuator's [`Control`] is fixed by the type it was created from. Tunable
//! controls carry [`RangeSettings`] and a current value that always lies
//! within them.

use serde::Serialize;

use crate::decimal::Decimal;
use crate::error::ValidationError;
use crate::hardware::CommandSink;
use crate::id::{ComponentId, DeviceId};
use crate::settings::{DecimalSettings, IntegerSettings, RangeSettings};
use crate::type_id::ComponentTypeId;

/// Highest position of a roller blind, fully open.
pub const MAX_POSITION: i64 = 100;

/// What an actuator controls and its current value.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(tag = "control", rename_all = "snake_case")]
pub enum Control {
    Switch {
        on: bool,
    },
    /// Percentage open, `0..=100`.
    Position {
        percent: i64,
    },
    Integer {
        settings: IntegerSettings,
        value: i64,
    },
    Decimal {
        settings: DecimalSettings,
        value: Decimal,
    },
}

impl Control {
    /// A tunable control starting at the lower limit of `settings`.
    #[must_use]
    pub fn from_settings(settings: RangeSettings) -> Self {
        match settings {
            RangeSettings::Integer(settings) => Self::Integer {
                value: settings.lower(),
                settings,
            },
            RangeSettings::Decimal(settings) => Self::Decimal {
                value: settings.lower(),
                settings,
            },
        }
    }

    #[must_use]
    pub fn settings(&self) -> Option<RangeSettings> {
        match self {
            Self::Integer { settings, .. } => Some(RangeSettings::Integer(*settings)),
            Self::Decimal { settings, .. } => Some(RangeSettings::Decimal(*settings)),
            Self::Switch { .. } | Self::Position { .. } => None,
        }
    }
}

/// Result of a command that passed validation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CommandOutcome {
    /// The hardware accepted the value as given.
    Applied,
    /// The value had excess precision and was rounded before being applied.
    Rounded(Decimal),
    /// The hardware refused; the actuator state is unchanged.
    Rejected,
}

/// A command addressed to an actuator.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ActuatorCommand {
    Switch(bool),
    Toggle,
    Position(i64),
    Integer(i64),
    /// Decimal value as typed, rounded to the precision if needed.
    Decimal(String),
}

/// A component that acts on its environment.
#[derive(Debug, Clone)]
pub struct Actuator {
    id: ComponentId,
    name: String,
    type_id: ComponentTypeId,
    owner: Option<DeviceId>,
    control: Control,
}

impl Actuator {
    /// Create a builder for constructing an [`Actuator`].
    #[must_use]
    pub fn builder() -> ActuatorBuilder {
        ActuatorBuilder::default()
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

    #[must_use]
    pub fn control(&self) -> &Control {
        &self.control
    }

    #[must_use]
    pub fn settings(&self) -> Option<RangeSettings> {
        self.control.settings()
    }

    /// Replace the settings of a tunable actuator.
    ///
    /// The current value is reset to the new lower limit.
    ///
    /// # Errors
    ///
    /// Returns [`ValidationError::UnsupportedCommand`] for switches and blinds,
    /// and [`ValidationError::SettingsKindMismatch`] when the settings flavour
    /// differs from the one the actuator was built with.
    pub fn rebind_settings(&mut self, settings: RangeSettings) -> Result<(), ValidationError> {
        match (&self.control, settings) {
            (Control::Integer { .. }, RangeSettings::Integer(_))
            | (Control::Decimal { .. }, RangeSettings::Decimal(_)) => {
                self.control = Control::from_settings(settings);
                Ok(())
            }
            (Control::Integer { .. }, RangeSettings::Decimal(_)) => {
                Err(ValidationError::SettingsKindMismatch { expected: "integer" })
            }
            (Control::Decimal { .. }, RangeSettings::Integer(_)) => {
                Err(ValidationError::SettingsKindMismatch { expected: "decimal" })
            }
            (Control::Switch { .. } | Control::Position { .. }, _) => {
                Err(ValidationError::UnsupportedCommand {
                    command: "rebind_settings",
                })
            }
        }
    }

    /// Dispatch `command` to the matching operation.
    ///
    /// # Errors
    ///
    /// Whatever the dispatched operation returns.
    pub fn execute(
        &mut self,
        sink: &dyn CommandSink,
        command: &ActuatorCommand,
    ) -> Result<CommandOutcome, ValidationError> {
        match command {
            ActuatorCommand::Switch(on) => self.switch(sink, *on),
            ActuatorCommand::Toggle => self.toggle(sink),
            ActuatorCommand::Position(percent) => self.set_position(sink, *percent),
            ActuatorCommand::Integer(value) => self.set_integer(sink, *value),
            ActuatorCommand::Decimal(raw) => self.set_decimal(sink, raw),
        }
    }

    /// Turn a switch on or off.
    ///
    /// # Errors
    ///
    /// Returns [`ValidationError::UnsupportedCommand`] unless this is a switch.
    pub fn switch(
        &mut self,
        sink: &dyn CommandSink,
        on: bool,
    ) -> Result<CommandOutcome, ValidationError> {
        let Control::Switch { on: state } = &mut self.control else {
            return Err(ValidationError::UnsupportedCommand { command: "switch" });
        };
        if !sink.send_switch(on) {
            return Ok(CommandOutcome::Rejected);
        }
        *state = on;
        Ok(CommandOutcome::Applied)
    }

    /// Flip a switch.
    ///
    /// # Errors
    ///
    /// Returns [`ValidationError::UnsupportedCommand`] unless this is a switch.
    pub fn toggle(&mut self, sink: &dyn CommandSink) -> Result<CommandOutcome, ValidationError> {
        let Control::Switch { on } = self.control else {
            return Err(ValidationError::UnsupportedCommand { command: "toggle" });
        };
        self.switch(sink, !on)
    }

    /// Move a roller blind to `percent` open.
    ///
    /// # Errors
    ///
    /// Returns [`ValidationError::UnsupportedCommand`] unless this is a blind
    /// and [`ValidationError::OutOfRange`] outside `0..=100`.
    pub fn set_position(
        &mut self,
        sink: &dyn CommandSink,
        percent: i64,
    ) -> Result<CommandOutcome, ValidationError> {
        let Control::Position { percent: current } = &mut self.control else {
            return Err(ValidationError::UnsupportedCommand {
                command: "set_position",
            });
        };
        if !(0..=MAX_POSITION).contains(&percent) {
            return Err(ValidationError::OutOfRange {
                value: percent.to_string(),
            });
        }
        if !sink.send_integer(percent) {
            return Ok(CommandOutcome::Rejected);
        }
        *current = percent;
        Ok(CommandOutcome::Applied)
    }

    /// Set an integer actuator to `value`.
    ///
    /// # Errors
    ///
    /// Returns [`ValidationError::UnsupportedCommand`] unless this actuator has
    /// integer settings and [`ValidationError::OutOfRange`] outside them.
    pub fn set_integer(
        &mut self,
        sink: &dyn CommandSink,
        value: i64,
    ) -> Result<CommandOutcome, ValidationError> {
        let Control::Integer {
            settings,
            value: current,
        } = &mut self.control
        else {
            return Err(ValidationError::UnsupportedCommand {
                command: "set_integer",
            });
        };
        if !settings.contains(value) {
            return Err(ValidationError::OutOfRange {
                value: value.to_string(),
            });
        }
        if !sink.send_integer(value) {
            return Ok(CommandOutcome::Rejected);
        }
        *current = value;
        Ok(CommandOutcome::Applied)
    }

    /// Set a decimal actuator from its textual value.
    ///
    /// A value written with more fractional digits than the precision allows
    /// is rounded to that many digits before it is applied.
    ///
    /// # Errors
    ///
    /// Returns [`ValidationError::UnsupportedCommand`] unless this actuator has
    /// decimal settings, [`ValidationError::InvalidNumber`] when `raw` is not a
    /// decimal, and [`ValidationError::OutOfRange`] outside the limits.
    pub fn set_decimal(
        &mut self,
        sink: &dyn CommandSink,
        raw: &str,
    ) -> Result<CommandOutcome, ValidationError> {
        let Control::Decimal {
            settings,
            value: current,
        } = &mut self.control
        else {
            return Err(ValidationError::UnsupportedCommand {
                command: "set_decimal",
            });
        };
        let requested: Decimal = raw.parse().map_err(|_| ValidationError::InvalidNumber {
            field: "value",
            value: raw.to_string(),
        })?;
        if !settings.contains(requested) {
            return Err(ValidationError::OutOfRange {
                value: raw.to_string(),
            });
        }

        let digits = settings.precision().fraction_digits();
        let rounded = requested.fraction_digits() > digits;
        let value = requested.round_to(digits);

        if !sink.send_decimal(value.to_f64()) {
            return Ok(CommandOutcome::Rejected);
        }
        *current = value;
        Ok(if rounded {
            CommandOutcome::Rounded(value)
        } else {
            CommandOutcome::Applied
        })
    }
}

/// Step-by-step builder for [`Actuator`].
#[derive(Default)]
pub struct ActuatorBuilder {
    id: Option<ComponentId>,
    name: Option<String>,
    type_id: Option<ComponentTypeId>,
    owner: Option<DeviceId>,
    control: Option<Control>,
}

impl ActuatorBuilder {
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
    pub fn control(mut self, control: Control) -> Self {
        self.control = Some(control);
        self
    }

    /// Consume the builder, validate, and return an [`Actuator`].
    ///
    /// Without an explicit control the actuator is a switch that starts off.
    ///
    /// # Errors
    ///
    /// Returns [`ValidationError::EmptyName`] if `name` is missing or blank.
    pub fn build(self) -> Result<Actuator, ValidationError> {
        let name = self.name.unwrap_or_default();
        if name.trim().is_empty() {
            return Err(ValidationError::EmptyName);
        }
        Ok(Actuator {
            id: self.id.unwrap_or_default(),
            name,
            type_id: self
                .type_id
                .unwrap_or_else(|| ComponentTypeId::new("Actuator")),
            owner: self.owner,
            control: self.control.unwrap_or(Control::Switch { on: false }),
        })
    }
}
