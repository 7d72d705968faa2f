use kassetio_traits::{TraitSet, TraitsData};

use crate::StringMap;

/// Per-asset-kind publish behaviour.
///
/// Strategies are pure payload builders: they never call the manager and
/// never fail. Missing argument keys always mean "skip that enrichment",
/// not an error.
pub trait PublishStrategy: Send + Sync {
    /// The trait set identifying this asset kind, used for the backend's
    /// write-policy query. Constant per strategy.
    fn asset_trait_set(&self) -> &TraitSet;

    /// Builds the payload for the backend's `preflight` step.
    ///
    /// Invoked before any backend mutation; must not assume a staging
    /// location is known yet.
    ///
    /// `fields` is the host's field map from a prior get-fields call;
    /// `args` carries free-form asset-kind-specific hints.
    fn pre_publish_payload(&self, fields: &StringMap, args: &StringMap) -> TraitsData;

    /// Builds the payload for the backend's `register` step.
    ///
    /// Performs the same enrichment as the pre-publish step, and
    /// additionally records the staging location from `fields` (as a URL)
    /// when one was assigned during preflight.
    fn post_publish_payload(&self, fields: &StringMap, args: &StringMap) -> TraitsData;
}
