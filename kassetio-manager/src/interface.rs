//! The backend contract: [`ManagerInterface`] and its supporting types.

use std::collections::BTreeMap;

use kassetio_traits::{TraitSet, TraitsData};

use crate::access::{
    EntityTraitsAccess, PolicyAccess, PublishAccess, RelationsAccess, ResolveAccess,
};
use crate::context::Context;
use crate::error::ManagerError;
use crate::reference::EntityReference;

/// String-valued backend settings, as supplied by configuration or a host
/// `initialize` command.
pub type Settings = BTreeMap<String, String>;

/// Free-form backend self-description returned by
/// [`ManagerInterface::info`].
pub type InfoDictionary = BTreeMap<String, String>;

/// [`InfoDictionary`] key under which a backend advertises the fixed prefix
/// all of its entity references start with.
pub const ENTITY_REFERENCES_MATCH_PREFIX: &str = "entityReferencesMatchPrefix";

/// The operations a swappable asset-management backend must provide.
///
/// All methods are synchronous and may perform I/O. Methods taking
/// [`EntityReference`] may assume it was validated by
/// [`is_entity_reference_string`](Self::is_entity_reference_string).
/// Optional capabilities are declined with
/// [`ManagerError::OperationUnsupported`]; any other error is a real
/// failure.
pub trait ManagerInterface: Send + Sync {
    /// Stable reverse-DNS identifier of this backend.
    fn identifier(&self) -> &str;

    /// Human-readable backend name for diagnostics.
    fn display_name(&self) -> &str;

    /// Backend self-description (see [`ENTITY_REFERENCES_MATCH_PREFIX`]).
    fn info(&self) -> InfoDictionary {
        InfoDictionary::new()
    }

    /// (Re-)configures the backend. Partial updates are permitted: settings
    /// not named keep their current values.
    fn initialize(&self, settings: Settings) -> Result<(), ManagerError>;

    /// Whether `candidate` is syntactically an entity reference of this
    /// backend. Must not touch the backing store.
    fn is_entity_reference_string(&self, candidate: &str) -> bool;

    /// How the backend wants entities of shape `trait_set` handled. A
    /// response without the `Managed` policy trait means "hands off".
    fn management_policy(
        &self,
        trait_set: &TraitSet,
        access: PolicyAccess,
        context: &Context,
    ) -> TraitsData;

    /// Queries trait data for an entity, filtered to `trait_ids`.
    fn resolve(
        &self,
        reference: &EntityReference,
        trait_ids: &TraitSet,
        access: ResolveAccess,
        context: &Context,
    ) -> Result<TraitsData, ManagerError>;

    /// First phase of publishing: the backend reserves or stages, and
    /// returns the working reference to use for the remainder of the
    /// publish. Nothing is durably committed.
    fn preflight(
        &self,
        reference: &EntityReference,
        payload: &TraitsData,
        access: PublishAccess,
        context: &Context,
    ) -> Result<EntityReference, ManagerError>;

    /// Second phase of publishing: durably commits the entity with its
    /// final metadata, returning the reference of the published entity.
    fn register(
        &self,
        reference: &EntityReference,
        payload: &TraitsData,
        access: PublishAccess,
        context: &Context,
    ) -> Result<EntityReference, ManagerError>;

    /// Queries entities related to `reference` by the relationship
    /// described in `relationship` (trait properties act as filter
    /// predicates). Results arrive in pages of at most `page_size`.
    fn get_with_relationship(
        &self,
        reference: &EntityReference,
        relationship: &TraitsData,
        page_size: usize,
        access: RelationsAccess,
        context: &Context,
    ) -> Result<Box<dyn ReferencePager>, ManagerError>;

    /// The full set of traits the backend knows for an entity.
    fn entity_traits(
        &self,
        reference: &EntityReference,
        access: EntityTraitsAccess,
        context: &Context,
    ) -> Result<TraitSet, ManagerError>;
}

/// Cursor over pages of related entity references.
pub trait ReferencePager {
    /// The current page. An empty page means the results are exhausted.
    fn get(&self) -> Vec<EntityReference>;

    /// Advances to the next page.
    fn next(&mut self);

    /// Whether a further non-empty page exists after the current one.
    fn has_next(&self) -> bool;
}

/// A [`ReferencePager`] over an in-memory result list, paged by a fixed
/// size. Convenient for backends that materialize results eagerly.
pub struct VecPager {
    references: Vec<EntityReference>,
    page_size: usize,
    offset: usize,
}

impl VecPager {
    #[must_use]
    pub fn new(references: Vec<EntityReference>, page_size: usize) -> Self {
        Self {
            references,
            page_size: page_size.max(1),
            offset: 0,
        }
    }
}

impl ReferencePager for VecPager {
    fn get(&self) -> Vec<EntityReference> {
        self.references
            .iter()
            .skip(self.offset)
            .take(self.page_size)
            .cloned()
            .collect()
    }

    fn next(&mut self) {
        self.offset = (self.offset + self.page_size).min(self.references.len());
    }

    fn has_next(&self) -> bool {
        self.offset + self.page_size < self.references.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn refs(names: &[&str]) -> Vec<EntityReference> {
        names.iter().map(|name| EntityReference::new(*name)).collect()
    }

    #[test]
    fn vec_pager_pages_through_results() {
        let mut pager = VecPager::new(refs(&["a", "b", "c"]), 2);

        assert_eq!(pager.get(), refs(&["a", "b"]));
        assert!(pager.has_next());

        pager.next();
        assert_eq!(pager.get(), refs(&["c"]));
        assert!(!pager.has_next());

        pager.next();
        assert!(pager.get().is_empty());
    }

    #[test]
    fn vec_pager_clamps_zero_page_size() {
        let pager = VecPager::new(refs(&["a"]), 0);
        assert_eq!(pager.get(), refs(&["a"]));
    }
}
