//! # smarthome-domain
//!
//! Pure domain model for the smart-home simulator.
//!
//! ## Responsibilities
//! - Foundational types: typed identifiers, error conventions, timestamps, decimals
//! - Load the **type registry** (whitelist of constructible component types)
//! - Bind constructors in the **component factory** and create components
//! - Validate **range settings** for tunable actuators
//! - Keep **name-unique collections** of components, devices and rooms
//! - Model the **device → room → house** hierarchy
//! - Roll up **functionalities** across the hierarchy
//! - Query **reading history** over time windows
//!
//! ## Dependency rule
//! This crate has **no internal dependencies**.
//! It must never import anything from `app`, adapters, or external IO crates.
//! Hardware is reached through the traits in [`hardware`]; persistence ports
//! live in the `app` crate.

pub mod error;
pub mod id;
pub mod time;

pub mod catalogue;
pub mod collection;
pub mod component;
pub mod decimal;
pub mod device;
pub mod factory;
pub mod functionality;
pub mod hardware;
pub mod history;
pub mod house;
pub mod location;
pub mod registry;
pub mod room;
pub mod settings;
pub mod type_id;

#[cfg(test)]
pub(crate) mod testing {
    use std::sync::Arc;

    use crate::catalogue::{builtin_catalogue, register_builtins};
    use crate::component::{Component, Sensor};
    use crate::factory::ComponentFactory;
    use crate::registry::{TypeCatalogue, TypeRegistry};

    /// Factory with every built-in type registered and bound.
    pub fn builtin_factory() -> ComponentFactory {
        let registry = TypeRegistry::load(&builtin_catalogue()).unwrap();
        let mut factory = ComponentFactory::new(Arc::new(registry));
        register_builtins(&mut factory).unwrap();
        factory
    }

    /// Factory whose types are plain sensors named after `tags`.
    pub fn tagged_factory(tags: &[&str]) -> ComponentFactory {
        let catalogue = TypeCatalogue {
            sensor: tags.iter().map(ToString::to_string).collect(),
            actuator: Vec::new(),
        };
        let registry = TypeRegistry::load(&catalogue).unwrap();
        let mut factory = ComponentFactory::new(Arc::new(registry));
        for tag in tags {
            factory
                .register_constructor(*tag, |args| {
                    Sensor::builder()
                        .name(args.name)
                        .type_id(args.type_id)
                        .build()
                        .map(Component::from)
                })
                .unwrap();
        }
        factory
    }
}
