//! Host-facing wrapper over a [`ManagerInterface`].

use std::sync::Arc;

use kassetio_traits::{TraitSet, TraitsData};

use crate::access::{
    EntityTraitsAccess, PolicyAccess, PublishAccess, RelationsAccess, ResolveAccess,
};
use crate::context::Context;
use crate::error::ManagerError;
use crate::interface::{InfoDictionary, ManagerInterface, ReferencePager, Settings};
use crate::reference::EntityReference;

/// A handle to a configured backend.
///
/// Adds host-side conveniences over the raw interface — most importantly
/// validating construction of [`EntityReference`]s, so downstream code
/// never carries an unchecked string where a reference is expected.
/// Cheap to clone; clones share the backend.
#[derive(Clone)]
pub struct Manager {
    interface: Arc<dyn ManagerInterface>,
}

impl Manager {
    #[must_use]
    pub fn new(interface: Arc<dyn ManagerInterface>) -> Self {
        Self { interface }
    }

    pub fn identifier(&self) -> &str {
        self.interface.identifier()
    }

    pub fn display_name(&self) -> &str {
        self.interface.display_name()
    }

    pub fn info(&self) -> InfoDictionary {
        self.interface.info()
    }

    pub fn initialize(&self, settings: Settings) -> Result<(), ManagerError> {
        self.interface.initialize(settings)
    }

    /// Creates the call context to thread through subsequent queries.
    #[must_use]
    pub fn create_context(&self) -> Context {
        Context::new()
    }

    pub fn is_entity_reference_string(&self, candidate: &str) -> bool {
        self.interface.is_entity_reference_string(candidate)
    }

    /// Validates `candidate` and wraps it as a reference.
    pub fn create_entity_reference(
        &self,
        candidate: &str,
    ) -> Result<EntityReference, ManagerError> {
        if self.interface.is_entity_reference_string(candidate) {
            Ok(EntityReference::new(candidate))
        } else {
            Err(ManagerError::MalformedReference(candidate.to_string()))
        }
    }

    /// As [`create_entity_reference`](Self::create_entity_reference), but
    /// `None` for invalid input rather than an error.
    #[must_use]
    pub fn create_entity_reference_if_valid(&self, candidate: &str) -> Option<EntityReference> {
        self.interface
            .is_entity_reference_string(candidate)
            .then(|| EntityReference::new(candidate))
    }

    pub fn management_policy(
        &self,
        trait_set: &TraitSet,
        access: PolicyAccess,
        context: &Context,
    ) -> TraitsData {
        self.interface.management_policy(trait_set, access, context)
    }

    pub fn resolve(
        &self,
        reference: &EntityReference,
        trait_ids: &TraitSet,
        access: ResolveAccess,
        context: &Context,
    ) -> Result<TraitsData, ManagerError> {
        self.interface.resolve(reference, trait_ids, access, context)
    }

    pub fn preflight(
        &self,
        reference: &EntityReference,
        payload: &TraitsData,
        access: PublishAccess,
        context: &Context,
    ) -> Result<EntityReference, ManagerError> {
        self.interface.preflight(reference, payload, access, context)
    }

    pub fn register(
        &self,
        reference: &EntityReference,
        payload: &TraitsData,
        access: PublishAccess,
        context: &Context,
    ) -> Result<EntityReference, ManagerError> {
        self.interface.register(reference, payload, access, context)
    }

    pub fn get_with_relationship(
        &self,
        reference: &EntityReference,
        relationship: &TraitsData,
        page_size: usize,
        access: RelationsAccess,
        context: &Context,
    ) -> Result<Box<dyn ReferencePager>, ManagerError> {
        self.interface
            .get_with_relationship(reference, relationship, page_size, access, context)
    }

    pub fn entity_traits(
        &self,
        reference: &EntityReference,
        access: EntityTraitsAccess,
        context: &Context,
    ) -> Result<TraitSet, ManagerError> {
        self.interface.entity_traits(reference, access, context)
    }
}
