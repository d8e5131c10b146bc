//! Session context — the registry and factory every use-case shares.

use std::sync::Arc;

use smarthome_domain::catalogue::register_builtins;
use smarthome_domain::error::SmartHomeError;
use smarthome_domain::factory::ComponentFactory;
use smarthome_domain::registry::{CatalogueSource, TypeRegistry};

/// Owns the type registry and component factory for one session.
///
/// Both are immutable once the context exists, so it is cheap to clone and
/// safe to share across tasks without locking.
#[derive(Debug, Clone)]
pub struct HomeContext {
    factory: Arc<ComponentFactory>,
}

impl HomeContext {
    /// Load the registry from `source` and bind the built-in constructors.
    ///
    /// # Errors
    ///
    /// Returns [`SmartHomeError::Config`] if the catalogue cannot be loaded.
    pub fn bootstrap(source: &dyn CatalogueSource) -> Result<Self, SmartHomeError> {
        let registry = TypeRegistry::load(source)?;
        let mut factory = ComponentFactory::new(Arc::new(registry));
        register_builtins(&mut factory)?;
        tracing::info!(
            registered = factory.registry().len(),
            creatable = factory.creatable_types().count(),
            "component registry ready"
        );
        Ok(Self::with_factory(factory))
    }

    /// Wrap a factory that was assembled by hand.
    #[must_use]
    pub fn with_factory(factory: ComponentFactory) -> Self {
        Self {
            factory: Arc::new(factory),
        }
    }

    #[must_use]
    pub fn factory(&self) -> &ComponentFactory {
        &self.factory
    }

    #[must_use]
    pub fn registry(&self) -> &TypeRegistry {
        self.factory.registry()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use smarthome_domain::error::ConfigError;
    use smarthome_domain::registry::TypeCatalogue;

    #[test]
    fn should_bootstrap_registry_and_builtins() {
        let catalogue = TypeCatalogue {
            sensor: vec!["TemperatureSensor".to_string()],
            actuator: vec!["SwitchActuator".to_string(), "CustomActuator".to_string()],
        };
        let context = HomeContext::bootstrap(&catalogue).unwrap();

        assert_eq!(context.registry().len(), 3);
        let creatable: Vec<_> = context
            .factory()
            .creatable_types()
            .map(|t| t.as_str())
            .collect();
        assert_eq!(creatable, ["TemperatureSensor", "SwitchActuator"]);
    }

    #[test]
    fn should_fail_bootstrap_when_catalogue_empty() {
        let result = HomeContext::bootstrap(&TypeCatalogue::default());
        assert!(matches!(
            result,
            Err(SmartHomeError::Config(ConfigError::Empty))
        ));
    }
}
