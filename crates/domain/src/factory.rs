//! Component factory — resolves a type id to a constructor and runs it.
//!
//! Constructors are bound explicitly at startup with
//! [`ComponentFactory::register`]. A type can only be created when it is both
//! listed in the [`TypeRegistry`] and bound to a constructor. Every failure is
//! returned as a [`CreateError`]; nothing panics across this boundary.

use std::collections::HashMap;
use std::fmt;
use std::sync::Arc;

use crate::component::Component;
use crate::error::{AlreadyRegisteredError, CreateError, ValidationError};
use crate::hardware::{SharedReadingSource, SourceDebug};
use crate::id::DeviceId;
use crate::registry::TypeRegistry;
use crate::settings::RangeSettings;
use crate::type_id::ComponentTypeId;

/// Validated inputs handed to a constructor.
///
/// `type_id` carries the spelling the registry declared, whatever casing the
/// caller used.
pub struct ConstructArgs {
    pub type_id: ComponentTypeId,
    pub name: String,
    pub owner: Option<DeviceId>,
    pub settings: Option<RangeSettings>,
    pub source: Option<SharedReadingSource>,
}

/// Constructor closure bound to a type id.
pub type Constructor =
    Box<dyn Fn(ConstructArgs) -> Result<Component, ValidationError> + Send + Sync>;

/// Binds a type id to its constructor.
pub struct ComponentDescriptor {
    type_id: ComponentTypeId,
    requires_owner: bool,
    constructor: Constructor,
}

impl ComponentDescriptor {
    pub fn new<F>(type_id: impl Into<ComponentTypeId>, constructor: F) -> Self
    where
        F: Fn(ConstructArgs) -> Result<Component, ValidationError> + Send + Sync + 'static,
    {
        Self {
            type_id: type_id.into(),
            requires_owner: false,
            constructor: Box::new(constructor),
        }
    }

    /// Reject creation requests that name no owning device.
    #[must_use]
    pub fn requires_owner(mut self) -> Self {
        self.requires_owner = true;
        self
    }

    #[must_use]
    pub fn type_id(&self) -> &ComponentTypeId {
        &self.type_id
    }
}

impl fmt::Debug for ComponentDescriptor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ComponentDescriptor")
            .field("type_id", &self.type_id)
            .field("requires_owner", &self.requires_owner)
            .finish_non_exhaustive()
    }
}

/// A creation request.
#[derive(Clone)]
pub struct ComponentSpec {
    type_id: String,
    name: String,
    owner: Option<DeviceId>,
    settings: Option<RangeSettings>,
    source: Option<SharedReadingSource>,
}

impl ComponentSpec {
    pub fn new(type_id: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            type_id: type_id.into(),
            name: name.into(),
            owner: None,
            settings: None,
            source: None,
        }
    }

    #[must_use]
    pub fn owner(mut self, owner: DeviceId) -> Self {
        self.owner = Some(owner);
        self
    }

    #[must_use]
    pub fn settings(mut self, settings: RangeSettings) -> Self {
        self.settings = Some(settings);
        self
    }

    #[must_use]
    pub fn source(mut self, source: SharedReadingSource) -> Self {
        self.source = Some(source);
        self
    }

    #[must_use]
    pub fn type_id(&self) -> &str {
        &self.type_id
    }

    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }
}

impl fmt::Debug for ComponentSpec {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ComponentSpec")
            .field("type_id", &self.type_id)
            .field("name", &self.name)
            .field("owner", &self.owner)
            .field("settings", &self.settings)
            .field("source", &SourceDebug(&self.source))
            .finish()
    }
}

/// Creates components for registered, bound type ids.
pub struct ComponentFactory {
    registry: Arc<TypeRegistry>,
    descriptors: HashMap<ComponentTypeId, ComponentDescriptor>,
}

impl ComponentFactory {
    #[must_use]
    pub fn new(registry: Arc<TypeRegistry>) -> Self {
        Self {
            registry,
            descriptors: HashMap::new(),
        }
    }

    #[must_use]
    pub fn registry(&self) -> &TypeRegistry {
        &self.registry
    }

    /// Bind a descriptor's constructor to its type id.
    ///
    /// The type does not have to be in the registry yet; it only becomes
    /// creatable once it is.
    ///
    /// # Errors
    ///
    /// Returns [`AlreadyRegisteredError`] if the type id (ignoring case) is
    /// already bound. The existing binding is kept.
    pub fn register(&mut self, descriptor: ComponentDescriptor) -> Result<(), AlreadyRegisteredError> {
        if self.descriptors.contains_key(descriptor.type_id()) {
            return Err(AlreadyRegisteredError(descriptor.type_id));
        }
        tracing::debug!(type_id = %descriptor.type_id, "constructor bound");
        self.descriptors.insert(descriptor.type_id.clone(), descriptor);
        Ok(())
    }

    /// Shorthand for [`register`](Self::register) without an owner requirement.
    ///
    /// # Errors
    ///
    /// See [`register`](Self::register).
    pub fn register_constructor<F>(
        &mut self,
        type_id: impl Into<ComponentTypeId>,
        constructor: F,
    ) -> Result<(), AlreadyRegisteredError>
    where
        F: Fn(ConstructArgs) -> Result<Component, ValidationError> + Send + Sync + 'static,
    {
        self.register(ComponentDescriptor::new(type_id, constructor))
    }

    /// Whether `type_id` is bound to a constructor.
    #[must_use]
    pub fn is_bound(&self, type_id: &str) -> bool {
        self.descriptors.contains_key(&ComponentTypeId::new(type_id))
    }

    /// Type ids that are both registered and bound, in registry order.
    pub fn creatable_types(&self) -> impl Iterator<Item = &ComponentTypeId> + '_ {
        self.registry
            .list_registered_types()
            .filter(|type_id| self.descriptors.contains_key(*type_id))
    }

    /// Create a component from `spec`.
    ///
    /// The new component is returned to the caller; inserting it into a
    /// collection is up to them.
    ///
    /// # Errors
    ///
    /// - [`CreateError::UnknownType`] if the type is not registered or not bound
    /// - [`CreateError::InvalidParameters`] for a blank name or a missing
    ///   required owner
    /// - [`CreateError::ConstructionFailure`] if the constructor rejects its input
    /// - [`CreateError::KindMismatch`] if the constructor produced a sensor for
    ///   an actuator type or vice versa
    pub fn create(&self, spec: ComponentSpec) -> Result<Component, CreateError> {
        let result = self.try_create(spec);
        if let Err(err) = &result {
            tracing::warn!(error = %err, "component creation rejected");
        }
        result
    }

    fn try_create(&self, spec: ComponentSpec) -> Result<Component, CreateError> {
        let registered = self
            .registry
            .get(&spec.type_id)
            .ok_or_else(|| CreateError::UnknownType(spec.type_id.clone()))?;
        let descriptor = self
            .descriptors
            .get(&registered.type_id)
            .ok_or_else(|| CreateError::UnknownType(spec.type_id.clone()))?;

        if spec.name.trim().is_empty() {
            return Err(CreateError::InvalidParameters(ValidationError::EmptyName));
        }
        if descriptor.requires_owner && spec.owner.is_none() {
            return Err(CreateError::InvalidParameters(ValidationError::MissingOwner));
        }

        let args = ConstructArgs {
            type_id: registered.type_id.clone(),
            name: spec.name,
            owner: spec.owner,
            settings: spec.settings,
            source: spec.source,
        };
        let component =
            (descriptor.constructor)(args).map_err(|source| CreateError::ConstructionFailure {
                type_id: registered.type_id.clone(),
                source,
            })?;

        if component.kind() != registered.kind {
            return Err(CreateError::KindMismatch {
                type_id: registered.type_id.clone(),
                declared: registered.kind,
                produced: component.kind(),
            });
        }

        tracing::info!(
            type_id = %registered.type_id,
            name = component.name(),
            "component created"
        );
        Ok(component)
    }
}

impl fmt::Debug for ComponentFactory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ComponentFactory")
            .field("registry", &self.registry)
            .field("bound", &self.descriptors.keys().collect::<Vec<_>>())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::collection::UniqueCollection;
    use crate::component::{Actuator, Control, Sensor};
    use crate::registry::TypeCatalogue;
    use crate::type_id::ComponentKind;
    use std::sync::atomic::{AtomicUsize, Ordering};

    fn registry(sensor: &[&str], actuator: &[&str]) -> Arc<TypeRegistry> {
        let catalogue = TypeCatalogue {
            sensor: sensor.iter().map(ToString::to_string).collect(),
            actuator: actuator.iter().map(ToString::to_string).collect(),
        };
        Arc::new(TypeRegistry::load(&catalogue).unwrap())
    }

    fn switch(args: ConstructArgs) -> Result<Component, ValidationError> {
        Actuator::builder()
            .name(args.name)
            .type_id(args.type_id)
            .control(Control::Switch { on: false })
            .build()
            .map(Component::from)
    }

    fn thermometer(args: ConstructArgs) -> Result<Component, ValidationError> {
        Sensor::builder()
            .name(args.name)
            .type_id(args.type_id)
            .build()
            .map(Component::from)
    }

    #[test]
    fn should_return_unknown_type_when_not_registered() {
        let factory = ComponentFactory::new(registry(&["TemperatureSensor"], &[]));
        let result = factory.create(ComponentSpec::new("NoSuchType", "X"));
        assert_eq!(result.unwrap_err(), CreateError::UnknownType("NoSuchType".to_string()));
    }

    #[test]
    fn should_return_unknown_type_when_registered_but_unbound() {
        let factory = ComponentFactory::new(registry(&["TemperatureSensor"], &[]));
        assert!(matches!(
            factory.create(ComponentSpec::new("TemperatureSensor", "T")),
            Err(CreateError::UnknownType(_))
        ));
    }

    #[test]
    fn should_return_unknown_type_when_bound_but_not_registered() {
        let mut factory = ComponentFactory::new(registry(&["TemperatureSensor"], &[]));
        factory.register_constructor("SwitchActuator", switch).unwrap();
        assert!(factory.is_bound("switchactuator"));
        assert!(matches!(
            factory.create(ComponentSpec::new("SwitchActuator", "S")),
            Err(CreateError::UnknownType(_))
        ));
    }

    #[test]
    fn should_create_component_ignoring_type_id_case() {
        let mut factory = ComponentFactory::new(registry(&[], &["SwitchActuator"]));
        factory.register_constructor("SwitchActuator", switch).unwrap();

        let component = factory
            .create(ComponentSpec::new("switchACTUATOR", "Kitchen Switch"))
            .unwrap();
        assert_eq!(component.name(), "Kitchen Switch");
        assert_eq!(component.type_id().as_str(), "SwitchActuator");
    }

    #[test]
    fn should_reject_blank_name_as_invalid_parameters() {
        let mut factory = ComponentFactory::new(registry(&[], &["SwitchActuator"]));
        factory.register_constructor("SwitchActuator", switch).unwrap();
        assert_eq!(
            factory.create(ComponentSpec::new("SwitchActuator", "  ")).unwrap_err(),
            CreateError::InvalidParameters(ValidationError::EmptyName)
        );
    }

    #[test]
    fn should_reject_missing_owner_when_descriptor_requires_one() {
        let mut factory = ComponentFactory::new(registry(&[], &["SwitchActuator"]));
        factory
            .register(ComponentDescriptor::new("SwitchActuator", switch).requires_owner())
            .unwrap();

        assert_eq!(
            factory.create(ComponentSpec::new("SwitchActuator", "S")).unwrap_err(),
            CreateError::InvalidParameters(ValidationError::MissingOwner)
        );
        assert!(
            factory
                .create(ComponentSpec::new("SwitchActuator", "S").owner(DeviceId::new()))
                .is_ok()
        );
    }

    #[test]
    fn should_wrap_constructor_error_as_construction_failure() {
        let mut factory = ComponentFactory::new(registry(&[], &["IntegerValueActuator"]));
        factory
            .register_constructor("IntegerValueActuator", |_| {
                Err(ValidationError::MissingSettings)
            })
            .unwrap();

        let err = factory
            .create(ComponentSpec::new("IntegerValueActuator", "Dimmer"))
            .unwrap_err();
        assert_eq!(
            err,
            CreateError::ConstructionFailure {
                type_id: ComponentTypeId::new("IntegerValueActuator"),
                source: ValidationError::MissingSettings,
            }
        );
    }

    #[test]
    fn should_reject_component_of_wrong_kind() {
        let mut factory = ComponentFactory::new(registry(&[], &["SwitchActuator"]));
        factory.register_constructor("SwitchActuator", thermometer).unwrap();

        assert!(matches!(
            factory.create(ComponentSpec::new("SwitchActuator", "S")),
            Err(CreateError::KindMismatch {
                declared: ComponentKind::Actuator,
                produced: ComponentKind::Sensor,
                ..
            })
        ));
    }

    #[test]
    fn should_keep_first_binding_when_registered_twice() {
        let mut factory = ComponentFactory::new(registry(&["TemperatureSensor"], &[]));
        factory
            .register_constructor("TemperatureSensor", thermometer)
            .unwrap();
        let err = factory
            .register_constructor("temperaturesensor", switch)
            .unwrap_err();
        assert_eq!(err.0.as_str(), "temperaturesensor");

        let component = factory
            .create(ComponentSpec::new("TemperatureSensor", "T"))
            .unwrap();
        assert_eq!(component.kind(), ComponentKind::Sensor);
        assert_eq!(factory.registry().len(), 1);
    }

    #[test]
    fn should_list_only_registered_and_bound_types() {
        let mut factory =
            ComponentFactory::new(registry(&["TemperatureSensor", "WindSensor"], &[]));
        factory.register_constructor("WindSensor", thermometer).unwrap();
        factory.register_constructor("Unlisted", thermometer).unwrap();
        let creatable: Vec<_> = factory.creatable_types().map(ComponentTypeId::as_str).collect();
        assert_eq!(creatable, ["WindSensor"]);
    }

    #[test]
    fn should_invoke_constructor_once_when_same_name_added_twice() {
        let calls = Arc::new(AtomicUsize::new(0));
        let mut factory = ComponentFactory::new(registry(&[], &["SwitchActuator"]));
        let counter = Arc::clone(&calls);
        factory
            .register_constructor("SwitchActuator", move |args| {
                counter.fetch_add(1, Ordering::SeqCst);
                switch(args)
            })
            .unwrap();

        let mut components = UniqueCollection::new("component");
        let first = components.add("Kitchen Switch", || {
            factory.create(ComponentSpec::new("SwitchActuator", "Kitchen Switch"))
        });
        let second = components.add("Kitchen Switch", || {
            factory.create(ComponentSpec::new("SwitchActuator", "Kitchen Switch"))
        });

        assert!(first);
        assert!(!second);
        assert_eq!(components.len(), 1);
        assert_eq!(calls.load(Ordering::SeqCst), 1);
    }
}
