//! Random UUID identities for the entities of the house hierarchy.
//!
//! Names are what callers look things up by; these ids only tell two entities
//! with the same name apart across snapshots and serialized reports.

use serde::{Deserialize, Serialize};

macro_rules! entity_id {
    ($(#[doc = $doc:expr])* $name:ident) => {
        $(#[doc = $doc])*
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
        #[serde(transparent)]
        pub struct $name(uuid::Uuid);

        impl Default for $name {
            fn default() -> Self {
                Self(uuid::Uuid::new_v4())
            }
        }

        impl $name {
            #[must_use]
            pub fn new() -> Self {
                Self::default()
            }
        }
    };
}

entity_id!(
    /// Identity of a [`Component`](crate::component::Component).
    ComponentId
);

entity_id!(
    /// Identity of a [`Device`](crate::device::Device); components record it as their owner.
    DeviceId
);

entity_id!(
    /// Identity of a [`Room`](crate::room::Room).
    RoomId
);

entity_id!(
    /// Identity of a [`House`](crate::house::House).
    HouseId
);
