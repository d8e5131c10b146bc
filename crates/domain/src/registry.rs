//! Type registry — the whitelist of constructible component types.
//!
//! The registry is loaded once from a [`CatalogueSource`] and never changes
//! afterwards. Loading either succeeds completely or fails with a
//! [`ConfigError`]; a partially populated registry is never returned.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

use crate::error::ConfigError;
use crate::type_id::{ComponentKind, ComponentTypeId};

/// Raw catalogue content: permitted type ids keyed by component kind.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct TypeCatalogue {
    pub sensor: Vec<String>,
    pub actuator: Vec<String>,
}

impl TypeCatalogue {
    fn entries(&self) -> impl Iterator<Item = (ComponentKind, &str)> {
        let sensors = self.sensor.iter().map(|s| (ComponentKind::Sensor, s.as_str()));
        let actuators = self
            .actuator
            .iter()
            .map(|s| (ComponentKind::Actuator, s.as_str()));
        sensors.chain(actuators)
    }
}

/// Where a [`TypeRegistry`] reads its catalogue from.
pub trait CatalogueSource {
    /// Read the full catalogue.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Unavailable`] if the source is missing or unreadable.
    fn read_catalogue(&self) -> Result<TypeCatalogue, ConfigError>;
}

impl CatalogueSource for TypeCatalogue {
    fn read_catalogue(&self) -> Result<TypeCatalogue, ConfigError> {
        Ok(self.clone())
    }
}

/// A registered type id together with the kind it was declared as.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RegisteredType {
    pub type_id: ComponentTypeId,
    pub kind: ComponentKind,
}

/// Immutable, ordered set of permitted component types.
#[derive(Debug, Clone)]
pub struct TypeRegistry {
    types: Vec<RegisteredType>,
    index: HashMap<ComponentTypeId, usize>,
}

impl TypeRegistry {
    /// Load the registry from `source`.
    ///
    /// Sensors are listed before actuators, each in declaration order. Entries
    /// are trimmed; a type declared more than once keeps its first
    /// declaration, even across the two keys.
    ///
    /// # Errors
    ///
    /// - [`ConfigError::Unavailable`] if the source cannot be read
    /// - [`ConfigError::BlankTypeId`] if any entry is blank
    /// - [`ConfigError::Empty`] if the catalogue declares no types at all
    pub fn load(source: &dyn CatalogueSource) -> Result<Self, ConfigError> {
        let catalogue = source.read_catalogue()?;

        let mut types = Vec::new();
        let mut index = HashMap::new();
        for (kind, raw) in catalogue.entries() {
            let trimmed = raw.trim();
            if trimmed.is_empty() {
                return Err(ConfigError::BlankTypeId {
                    key: kind.catalogue_key(),
                });
            }
            let type_id = ComponentTypeId::new(trimmed);
            if index.contains_key(&type_id) {
                tracing::debug!(%type_id, %kind, "ignoring duplicate catalogue entry");
                continue;
            }
            index.insert(type_id.clone(), types.len());
            types.push(RegisteredType { type_id, kind });
        }

        if types.is_empty() {
            return Err(ConfigError::Empty);
        }
        tracing::debug!(count = types.len(), "type registry loaded");
        Ok(Self { types, index })
    }

    /// Case-insensitive membership test.
    #[must_use]
    pub fn is_registered(&self, type_id: &str) -> bool {
        self.get(type_id).is_some()
    }

    #[must_use]
    pub fn get(&self, type_id: &str) -> Option<&RegisteredType> {
        self.index
            .get(&ComponentTypeId::new(type_id))
            .map(|&idx| &self.types[idx])
    }

    #[must_use]
    pub fn kind_of(&self, type_id: &str) -> Option<ComponentKind> {
        self.get(type_id).map(|registered| registered.kind)
    }

    /// Registered type ids in declaration order.
    ///
    /// Every call starts a fresh iteration over the same, finite sequence.
    pub fn list_registered_types(&self) -> impl Iterator<Item = &ComponentTypeId> + '_ {
        self.types.iter().map(|registered| &registered.type_id)
    }

    /// Registered type ids of one kind, in declaration order.
    pub fn types_of(&self, kind: ComponentKind) -> impl Iterator<Item = &ComponentTypeId> + '_ {
        self.types
            .iter()
            .filter(move |registered| registered.kind == kind)
            .map(|registered| &registered.type_id)
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.types.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.types.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    struct Unreadable;

    impl CatalogueSource for Unreadable {
        fn read_catalogue(&self) -> Result<TypeCatalogue, ConfigError> {
            Err(ConfigError::Unavailable("no such file".into()))
        }
    }

    fn catalogue(sensor: &[&str], actuator: &[&str]) -> TypeCatalogue {
        TypeCatalogue {
            sensor: sensor.iter().map(ToString::to_string).collect(),
            actuator: actuator.iter().map(ToString::to_string).collect(),
        }
    }

    fn names(registry: &TypeRegistry) -> Vec<&str> {
        registry
            .list_registered_types()
            .map(ComponentTypeId::as_str)
            .collect()
    }

    #[test]
    fn should_list_types_in_declaration_order() {
        let registry = TypeRegistry::load(&catalogue(
            &["TemperatureSensor", "HumiditySensor"],
            &["SwitchActuator"],
        ))
        .unwrap();
        assert_eq!(
            names(&registry),
            ["TemperatureSensor", "HumiditySensor", "SwitchActuator"]
        );
    }

    #[test]
    fn should_match_type_ids_ignoring_case() {
        let registry = TypeRegistry::load(&catalogue(&["TemperatureSensor"], &[])).unwrap();
        assert!(registry.is_registered("temperaturesensor"));
        assert!(registry.is_registered("TEMPERATURESENSOR"));
        assert!(!registry.is_registered("Temperature"));
        assert!(!registry.is_registered("TemperatureSensor*"));
    }

    #[test]
    fn should_keep_size_and_order_when_type_declared_twice() {
        let once = TypeRegistry::load(&catalogue(&["A", "B"], &["C"])).unwrap();
        let twice = TypeRegistry::load(&catalogue(&["A", "B", "a"], &["C", "b"])).unwrap();
        assert_eq!(names(&once), names(&twice));
        assert_eq!(twice.len(), 3);
    }

    #[test]
    fn should_keep_first_kind_when_type_declared_under_both_keys() {
        let registry = TypeRegistry::load(&catalogue(&["Hybrid"], &["hybrid"])).unwrap();
        assert_eq!(registry.kind_of("HYBRID"), Some(ComponentKind::Sensor));
        assert_eq!(registry.types_of(ComponentKind::Actuator).count(), 0);
    }

    #[test]
    fn should_trim_whitespace_around_entries() {
        let registry = TypeRegistry::load(&catalogue(&["  WindSensor "], &[])).unwrap();
        assert_eq!(names(&registry), ["WindSensor"]);
    }

    #[test]
    fn should_fail_when_source_unreadable() {
        assert!(matches!(
            TypeRegistry::load(&Unreadable),
            Err(ConfigError::Unavailable(_))
        ));
    }

    #[test]
    fn should_fail_when_catalogue_empty() {
        assert!(matches!(
            TypeRegistry::load(&TypeCatalogue::default()),
            Err(ConfigError::Empty)
        ));
    }

    #[test]
    fn should_fail_whole_load_when_any_entry_blank() {
        let result = TypeRegistry::load(&catalogue(&["A"], &["B", "  "]));
        assert!(matches!(
            result,
            Err(ConfigError::BlankTypeId { key: "actuator" })
        ));
    }

    #[test]
    fn should_restart_iteration_on_each_call() {
        let registry = TypeRegistry::load(&catalogue(&["A", "B"], &[])).unwrap();
        assert_eq!(registry.list_registered_types().count(), 2);
        assert_eq!(registry.list_registered_types().count(), 2);
    }

    #[test]
    fn should_deserialize_catalogue_with_missing_key() {
        let catalogue: TypeCatalogue =
            serde_json::from_str(r#"{"sensor": ["TemperatureSensor"]}"#).unwrap();
        assert!(catalogue.actuator.is_empty());
    }
}
