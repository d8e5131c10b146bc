//! Common error types used across the workspace.
//!
//! Each failure class has its own typed enum; [`SmartHomeError`] is the
//! umbrella that layers convert into via `#[from]`.
//!
//! [`ConfigError`] is fatal: it only ever surfaces while building a
//! [`TypeRegistry`](crate::registry::TypeRegistry) and no partially loaded
//! registry survives it. Every other kind is recoverable and returned to the
//! caller as a value.

use crate::type_id::{ComponentKind, ComponentTypeId};

/// Top-level error for the smart-home workspace.
#[derive(Debug, thiserror::Error)]
pub enum SmartHomeError {
    #[error("configuration error")]
    Config(#[from] ConfigError),

    #[error("component creation failed")]
    Create(#[from] CreateError),

    #[error("validation error")]
    Validation(#[from] ValidationError),

    #[error(transparent)]
    NotFound(#[from] NotFoundError),

    #[error(transparent)]
    DuplicateName(#[from] DuplicateNameError),

    #[error(transparent)]
    AlreadyRegistered(#[from] AlreadyRegisteredError),

    #[error("hardware error")]
    Hardware(#[from] HardwareError),

    #[error("storage error")]
    Storage(#[source] Box<dyn std::error::Error + Send + Sync>),
}

/// Invalid or missing component catalogue.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    /// The catalogue source could not be read (absent file, IO failure, parse failure).
    #[error("component catalogue is unavailable")]
    Unavailable(#[source] Box<dyn std::error::Error + Send + Sync>),

    /// The catalogue was read but declares no component types at all.
    #[error("component catalogue declares no types")]
    Empty,

    /// An entry under `key` is blank.
    #[error("blank type identifier under `{key}`")]
    BlankTypeId { key: &'static str },
}

/// Domain invariant violations.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ValidationError {
    #[error("name must not be blank")]
    EmptyName,

    #[error("an owning device is required")]
    MissingOwner,

    #[error("`{field}` is not a valid number: {value:?}")]
    InvalidNumber { field: &'static str, value: String },

    #[error("lower limit must be strictly below upper limit")]
    LowerNotBelowUpper,

    #[error("precision must be strictly between 0 and 1")]
    PrecisionOutOfRange,

    #[error("`{field}` has more fractional digits than the precision allows")]
    PrecisionMismatch { field: &'static str },

    #[error("range settings are required")]
    MissingSettings,

    #[error("expected {expected} range settings")]
    SettingsKindMismatch { expected: &'static str },

    #[error("value {value} is outside the allowed range")]
    OutOfRange { value: String },

    #[error("room dimension `{field}` must be positive")]
    InvalidDimension { field: &'static str },

    #[error("device is inactive")]
    InactiveDevice,

    #[error("command `{command}` is not supported by this actuator")]
    UnsupportedCommand { command: &'static str },

    #[error("time window must start before it ends and end no later than now")]
    InvalidWindow,

    #[error("instant delta must be positive")]
    InvalidDelta,

    #[error("device must be placed in an {expected} room")]
    DeviceLocation { expected: &'static str },

    #[error("location field `{field}` must not be blank")]
    BlankLocationField { field: &'static str },

    #[error("{field} is outside the valid coordinate range")]
    InvalidCoordinate { field: &'static str },
}

/// Failure of [`ComponentFactory::create`](crate::factory::ComponentFactory::create).
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum CreateError {
    /// The type id is not registered, or no constructor is bound to it.
    #[error("unknown component type `{0}`")]
    UnknownType(String),

    /// The request was rejected before the constructor ran.
    #[error("invalid parameters")]
    InvalidParameters(#[source] ValidationError),

    /// The bound constructor refused to build the component.
    #[error("constructor for `{type_id}` failed")]
    ConstructionFailure {
        type_id: ComponentTypeId,
        #[source]
        source: ValidationError,
    },

    /// The constructor produced a component of the wrong kind.
    #[error("constructor for `{type_id}` produced a {produced}, registry declares a {declared}")]
    KindMismatch {
        type_id: ComponentTypeId,
        declared: ComponentKind,
        produced: ComponentKind,
    },
}

/// Binding a second constructor to an already bound type id.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("a constructor is already registered for `{0}`")]
pub struct AlreadyRegisteredError(pub ComponentTypeId);

/// A named item already exists in a collection.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("{collection} named `{name}` already exists")]
pub struct DuplicateNameError {
    pub collection: &'static str,
    pub name: String,
}

/// A lookup by name or id came back empty.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("{entity} `{id}` not found")]
pub struct NotFoundError {
    pub entity: &'static str,
    pub id: String,
}

/// Failures talking to simulated hardware.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum HardwareError {
    #[error("no reading source attached")]
    NoSource,

    #[error("reading source is unavailable: {0}")]
    Unavailable(String),
}
