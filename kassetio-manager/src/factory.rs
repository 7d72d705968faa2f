//! Registry of available backend implementations.

use std::collections::BTreeMap;
use std::sync::Arc;

use tracing::info;

use crate::config::ManagerConfig;
use crate::error::ManagerError;
use crate::interface::ManagerInterface;
use crate::manager::Manager;

type Constructor = Box<dyn Fn() -> Arc<dyn ManagerInterface> + Send + Sync>;

/// Maps backend identifiers to constructors, and instantiates the backend
/// a [`ManagerConfig`] selects.
///
/// Registration happens once at adapter startup; the populated factory is
/// read-only afterwards.
#[derive(Default)]
pub struct ManagerFactory {
    constructors: BTreeMap<String, Constructor>,
}

impl ManagerFactory {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers a backend constructor under its identifier. A repeated
    /// identifier replaces the earlier registration.
    pub fn register(
        &mut self,
        identifier: impl Into<String>,
        constructor: impl Fn() -> Arc<dyn ManagerInterface> + Send + Sync + 'static,
    ) {
        self.constructors
            .insert(identifier.into(), Box::new(constructor));
    }

    /// Identifiers of all registered backends.
    pub fn identifiers(&self) -> impl Iterator<Item = &str> {
        self.constructors.keys().map(String::as_str)
    }

    /// Instantiates the backend registered under `identifier`, without
    /// initializing it.
    pub fn create(&self, identifier: &str) -> Result<Manager, ManagerError> {
        let constructor = self.constructors.get(identifier).ok_or_else(|| {
            ManagerError::Config(format!("no manager registered for '{identifier}'"))
        })?;
        Ok(Manager::new(constructor()))
    }

    /// Instantiates and initializes the backend a config selects.
    pub fn default_manager_for_config(
        &self,
        config: &ManagerConfig,
    ) -> Result<Manager, ManagerError> {
        let manager = self.create(&config.identifier)?;
        manager.initialize(config.settings.clone())?;
        info!(
            identifier = %config.identifier,
            display_name = %manager.display_name(),
            "initialized default manager"
        );
        Ok(manager)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::access::{
        EntityTraitsAccess, PolicyAccess, PublishAccess, RelationsAccess, ResolveAccess,
    };
    use crate::context::Context;
    use crate::interface::{ReferencePager, Settings};
    use crate::reference::EntityReference;
    use kassetio_traits::{TraitSet, TraitsData};

    struct NullManager;

    impl ManagerInterface for NullManager {
        fn identifier(&self) -> &str {
            "org.test.null"
        }

        fn display_name(&self) -> &str {
            "Null"
        }

        fn initialize(&self, _settings: Settings) -> Result<(), ManagerError> {
            Ok(())
        }

        fn is_entity_reference_string(&self, candidate: &str) -> bool {
            candidate.starts_with("null:///")
        }

        fn management_policy(
            &self,
            _trait_set: &TraitSet,
            _access: PolicyAccess,
            _context: &Context,
        ) -> TraitsData {
            TraitsData::new()
        }

        fn resolve(
            &self,
            _reference: &EntityReference,
            _trait_ids: &TraitSet,
            _access: ResolveAccess,
            _context: &Context,
        ) -> Result<TraitsData, ManagerError> {
            Ok(TraitsData::new())
        }

        fn preflight(
            &self,
            reference: &EntityReference,
            _payload: &TraitsData,
            _access: PublishAccess,
            _context: &Context,
        ) -> Result<EntityReference, ManagerError> {
            Ok(reference.clone())
        }

        fn register(
            &self,
            reference: &EntityReference,
            _payload: &TraitsData,
            _access: PublishAccess,
            _context: &Context,
        ) -> Result<EntityReference, ManagerError> {
            Ok(reference.clone())
        }

        fn get_with_relationship(
            &self,
            _reference: &EntityReference,
            _relationship: &TraitsData,
            _page_size: usize,
            _access: RelationsAccess,
            _context: &Context,
        ) -> Result<Box<dyn ReferencePager>, ManagerError> {
            Err(ManagerError::OperationUnsupported(
                "relationships".to_string(),
            ))
        }

        fn entity_traits(
            &self,
            _reference: &EntityReference,
            _access: EntityTraitsAccess,
            _context: &Context,
        ) -> Result<TraitSet, ManagerError> {
            Ok(TraitSet::new())
        }
    }

    #[test]
    fn create_instantiates_registered_backend() {
        let mut factory = ManagerFactory::new();
        factory.register("org.test.null", || Arc::new(NullManager));

        let manager = factory.create("org.test.null").unwrap();
        assert_eq!(manager.display_name(), "Null");
    }

    #[test]
    fn unknown_identifier_is_a_config_error() {
        let factory = ManagerFactory::new();
        assert!(matches!(
            factory.create("org.absent"),
            Err(ManagerError::Config(_))
        ));
    }

    #[test]
    fn reference_validation_goes_through_backend() {
        let mut factory = ManagerFactory::new();
        factory.register("org.test.null", || Arc::new(NullManager));
        let manager = factory.create("org.test.null").unwrap();

        assert!(manager.create_entity_reference("null:///cat").is_ok());
        assert!(matches!(
            manager.create_entity_reference("/a/file/path"),
            Err(ManagerError::MalformedReference(_))
        ));
        assert!(manager.create_entity_reference_if_valid("/a/file/path").is_none());
    }
}
