//! Component type identifiers and kinds.
//!
//! A [`ComponentTypeId`] names a constructible component kind, e.g.
//! `"TemperatureSensor"`. Identifiers compare and hash case-insensitively but
//! keep the spelling they were declared with for display.

use std::fmt;
use std::hash::{Hash, Hasher};

use serde::{Deserialize, Serialize};

use crate::collection::{fold_case, same_name};

/// Case-insensitive identifier of a constructible component type.
///
/// The type id doubles as the functionality tag a component contributes to
/// its owning device.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ComponentTypeId(String);

/// Capability label contributed by a component to its owning device.
pub type FunctionalityTag = ComponentTypeId;

impl ComponentTypeId {
    #[must_use]
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Whether `other` names the same type, ignoring case the same way
    /// collection names do.
    #[must_use]
    pub fn matches(&self, other: &str) -> bool {
        same_name(&self.0, other)
    }
}

impl PartialEq for ComponentTypeId {
    fn eq(&self, other: &Self) -> bool {
        self.matches(&other.0)
    }
}

impl Eq for ComponentTypeId {}

impl Hash for ComponentTypeId {
    fn hash<H: Hasher>(&self, state: &mut H) {
        for c in fold_case(&self.0) {
            c.hash(state);
        }
        state.write_u8(0xff);
    }
}

impl fmt::Display for ComponentTypeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for ComponentTypeId {
    fn from(value: &str) -> Self {
        Self::new(value)
    }
}

/// Whether a component observes (sensor) or acts (actuator).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ComponentKind {
    Sensor,
    Actuator,
}

impl ComponentKind {
    /// The catalogue key this kind is declared under.
    #[must_use]
    pub fn catalogue_key(self) -> &'static str {
        match self {
            Self::Sensor => "sensor",
            Self::Actuator => "actuator",
        }
    }
}

impl fmt::Display for ComponentKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.catalogue_key())
    }
}
