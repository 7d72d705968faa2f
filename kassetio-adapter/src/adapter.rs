//! The host-facing adapter: full asset call surface plus the two-phase
//! publish orchestrator.

use tracing::{debug, warn};

use kassetio_manager::{
    Context, ENTITY_REFERENCES_MATCH_PREFIX, EntityReference, EntityTraitsAccess, Manager,
    ManagerConfig, ManagerError, ManagerFactory, PolicyAccess, PublishAccess, RelationsAccess,
    ResolveAccess, file_url,
};
use kassetio_traits::specifications::EntityVersionsRelationshipSpecification;
use kassetio_traits::{TraitSet, TraitsData, mediacreation};

use crate::asset_id::AssetId;
use crate::error::AdapterError;
use crate::publish::PublishStrategies;
use crate::{StringMap, fields, sequence};

/// Separator replacing `.` in attribute keys, which the host reserves for
/// group-attribute nesting.
const ASSET_FIELD_KEY_SEP: &str = ",";

/// Implements the host application's asset-plugin contract over a
/// configured [`Manager`].
///
/// Construction wires up the strategy catalog and call context; after
/// that the adapter is immutable and every method is an independent,
/// synchronous translation onto manager operations. Thread safety across
/// overlapping host calls is therefore entirely the backend's concern.
pub struct AssetAdapter {
    manager: Manager,
    context: Context,
    strategies: PublishStrategies,
}

impl AssetAdapter {
    #[must_use]
    pub fn new(manager: Manager) -> Self {
        let context = manager.create_context();
        Self {
            manager,
            context,
            strategies: PublishStrategies::new(),
        }
    }

    /// Builds an adapter around the backend named by the default
    /// configuration file (see [`kassetio_manager::DEFAULT_CONFIG_ENV_VAR`]).
    pub fn from_default_config(factory: &ManagerFactory) -> Result<Self, AdapterError> {
        let config = ManagerConfig::load()?;
        let manager = factory.default_manager_for_config(&config)?;
        Ok(Self::new(manager))
    }

    #[must_use]
    pub fn manager(&self) -> &Manager {
        &self.manager
    }

    // ================================================================
    // Identification
    // ================================================================

    /// Whether `name` is syntactically an asset ID of the active backend.
    #[must_use]
    pub fn is_asset_id(&self, name: &str) -> bool {
        self.manager.is_entity_reference_string(name)
    }

    /// Whether `name` contains an asset ID anywhere within it.
    pub fn contains_asset_id(&self, name: &str) -> Result<bool, AdapterError> {
        let info = self.manager.info();
        let prefix = info.get(ENTITY_REFERENCES_MATCH_PREFIX).ok_or_else(|| {
            ManagerError::Backend(
                "manager does not advertise an entity-reference prefix".to_string(),
            )
        })?;
        Ok(name.contains(prefix.as_str()))
    }

    /// Runs a host plugin command. `"initialize"` re-initializes the
    /// backend with updated string settings; failure is reported as
    /// `false` rather than an error, per the host contract.
    pub fn run_command(&self, command: &str, command_args: &StringMap) -> bool {
        debug!(command, "run_command");
        if command == "initialize"
            && let Err(err) = self.manager.initialize(command_args.clone())
        {
            debug!(error = %err, "manager re-initialization failed");
            return false;
        }
        true
    }

    // ================================================================
    // Resolution
    // ================================================================

    /// Resolves an asset ID to the path (or other string) it references.
    ///
    /// An ID carrying a staging path — the result of an in-flight
    /// [`create_asset_and_path`](Self::create_asset_and_path) — resolves
    /// to that path directly; anything else asks the backend for its
    /// content location.
    pub fn resolve_asset(&self, asset_id: &str) -> Result<String, AdapterError> {
        debug!(asset_id, "resolve_asset");
        let id = AssetId::parse(asset_id);
        if let Some(staged_path) = id.staged_path {
            return Ok(staged_path);
        }

        let reference = self.manager.create_entity_reference(&id.reference)?;
        let data = self.manager.resolve(
            &reference,
            &trait_ids(&[mediacreation::LocatableContent::ID]),
            ResolveAccess::Read,
            &self.context,
        )?;
        let url = mediacreation::LocatableContent::location(&data).ok_or_else(|| {
            ManagerError::EntityResolution {
                reference: reference.to_string(),
                message: "entity has no location".to_string(),
            }
        })?;

        let resolved = file_url::path_from_url(url)?;
        debug!(asset_id, resolved = %resolved, "resolve_asset done");
        Ok(resolved)
    }

    /// Resolves an asset ID to a path, substituting `frame` when the
    /// result is a file-sequence template.
    pub fn resolve_path(&self, asset_id: &str, frame: i64) -> Result<String, AdapterError> {
        let mut resolved = self.resolve_asset(asset_id)?;
        if sequence::is_file_sequence(&resolved) {
            resolved = sequence::resolve_file_sequence(&resolved, frame, true);
        }
        Ok(resolved)
    }

    /// Resolves the version tag an asset ID refers to.
    ///
    /// With an explicit `version` (possibly a meta-version such as
    /// `"latest"`), the tag of the entity corresponding to that version
    /// is resolved instead.
    pub fn resolve_asset_version(
        &self,
        asset_id: &str,
        version: Option<&str>,
    ) -> Result<String, AdapterError> {
        debug!(asset_id, ?version, "resolve_asset_version");
        let reference = match version {
            None => self.manager.create_entity_reference(asset_id)?,
            Some(tag) => self
                .reference_for_id_and_version(asset_id, tag)?
                .ok_or_else(|| ManagerError::EntityResolution {
                    reference: asset_id.to_string(),
                    message: format!("no entity found for version '{tag}'"),
                })?,
        };

        let data = self.manager.resolve(
            &reference,
            &trait_ids(&[mediacreation::Version::ID]),
            ResolveAccess::Read,
            &self.context,
        )?;
        Ok(mediacreation::Version::stable_tag(&data)
            .unwrap_or_default()
            .to_string())
    }

    /// Returns a display string for an asset ID. Invalid references and
    /// entities without a name fall back to the ID itself, since hosts
    /// routinely pass plain file paths here.
    pub fn get_asset_display_name(&self, asset_id: &str) -> Result<String, AdapterError> {
        let mut name = String::new();
        if let Some(reference) = self.manager.create_entity_reference_if_valid(asset_id) {
            let data = self.manager.resolve(
                &reference,
                &trait_ids(&[mediacreation::DisplayName::ID]),
                ResolveAccess::Read,
                &self.context,
            )?;
            name = mediacreation::DisplayName::name(&data)
                .unwrap_or_default()
                .to_string();
        }

        if name.is_empty() {
            name = asset_id.to_string();
        }
        Ok(name)
    }

    /// Lists the version tags available for an asset.
    pub fn get_asset_versions(&self, asset_id: &str) -> Result<Vec<String>, AdapterError> {
        debug!(asset_id, "get_asset_versions");
        let reference = self.manager.create_entity_reference(asset_id)?;

        let mut pager = self.manager.get_with_relationship(
            &reference,
            &EntityVersionsRelationshipSpecification::create(),
            fields::PAGE_SIZE,
            RelationsAccess::Read,
            &self.context,
        )?;

        let mut version_refs = Vec::new();
        loop {
            let page = pager.get();
            if page.is_empty() {
                break;
            }
            version_refs.extend(page);
            pager.next();
        }

        let mut versions = Vec::with_capacity(version_refs.len());
        for version_ref in &version_refs {
            let data = self.manager.resolve(
                version_ref,
                &trait_ids(&[mediacreation::Version::ID]),
                ResolveAccess::Read,
                &self.context,
            )?;
            versions.push(
                mediacreation::Version::specified_tag(&data)
                    .unwrap_or_default()
                    .to_string(),
            );
        }
        Ok(versions)
    }

    /// Returns a scenegraph location path uniquely representing the asset
    /// (e.g. where look-file materials load into the scene by default).
    pub fn get_unique_scenegraph_location(
        &self,
        asset_id: &str,
        include_version: bool,
    ) -> Result<String, AdapterError> {
        let requested = if include_version {
            trait_ids(&[mediacreation::SourcePath::ID, mediacreation::Version::ID])
        } else {
            trait_ids(&[mediacreation::SourcePath::ID])
        };

        let reference = self.manager.create_entity_reference(asset_id)?;
        let data = self
            .manager
            .resolve(&reference, &requested, ResolveAccess::Read, &self.context)?;

        let mut location = mediacreation::SourcePath::path(&data).unwrap_or("/").to_string();
        if include_version
            && let Some(tag) = mediacreation::Version::stable_tag(&data)
        {
            location.push('/');
            location.push_str(tag);
        }
        Ok(location)
    }

    // ================================================================
    // Fields
    // ================================================================

    /// Converts an asset ID to named string fields.
    ///
    /// The host only standardizes `name` and `version`; the entity
    /// reference (and any staging path riding on the ID) travel in
    /// reserved double-underscore fields that the host preserves but
    /// ignores. The include-defaults flag has no meaning here — every
    /// field the manager knows is always returned.
    pub fn get_asset_fields(
        &self,
        asset_id: &str,
        _include_defaults: bool,
    ) -> Result<StringMap, AdapterError> {
        debug!(asset_id, "get_asset_fields");
        let id = AssetId::parse(asset_id);
        let reference = self.manager.create_entity_reference(&id.reference)?;

        let data = self.manager.resolve(
            &reference,
            &trait_ids(&[mediacreation::DisplayName::ID, mediacreation::Version::ID]),
            ResolveAccess::Read,
            &self.context,
        )?;

        let mut asset_fields = StringMap::new();
        asset_fields.insert(fields::ENTITY_REFERENCE.to_string(), reference.to_string());
        if let Some(staged_path) = id.staged_path {
            asset_fields.insert(fields::MANAGER_DRIVEN_VALUE.to_string(), staged_path);
        }
        asset_fields.insert(
            fields::NAME.to_string(),
            mediacreation::DisplayName::name(&data)
                .unwrap_or_default()
                .to_string(),
        );
        asset_fields.insert(
            fields::VERSION.to_string(),
            mediacreation::Version::specified_tag(&data)
                .unwrap_or_default()
                .to_string(),
        );
        Ok(asset_fields)
    }

    /// Converts asset fields back to an asset ID — the inverse of
    /// [`get_asset_fields`](Self::get_asset_fields).
    ///
    /// The host uses this to switch between versions of one asset: when
    /// the fields name a version, the reference related to that version
    /// is returned instead, falling back to the input reference when no
    /// single match exists.
    pub fn build_asset_id(&self, asset_fields: &StringMap) -> Result<String, AdapterError> {
        debug!(?asset_fields, "build_asset_id");
        let reference = asset_fields
            .get(fields::ENTITY_REFERENCE)
            .ok_or(AdapterError::MissingWorkingReference("field list"))?;

        let asset_id = match asset_fields.get(fields::MANAGER_DRIVEN_VALUE) {
            Some(staged_path) => AssetId::with_staged_path(reference, staged_path).to_string(),
            None => reference.clone(),
        };

        if let Some(version_tag) = asset_fields.get(fields::VERSION)
            && let Some(versioned) = self.reference_for_id_and_version(reference, version_tag)?
        {
            return Ok(versioned.into_string());
        }
        Ok(asset_id)
    }

    /// Returns an asset's metadata as a flat string map.
    ///
    /// Every trait the backend knows for the entity appears as a key,
    /// even when it has no resolvable properties, so the caller can
    /// recover the full trait set. The host parses keys into nested group
    /// attributes on `.`, so trait-ID dots are replaced with `,`.
    pub fn get_asset_attributes(
        &self,
        asset_id: &str,
        _scope: &str,
    ) -> Result<StringMap, AdapterError> {
        debug!(asset_id, "get_asset_attributes");
        let reference = self.manager.create_entity_reference(asset_id)?;

        let trait_set = self.manager.entity_traits(
            &reference,
            EntityTraitsAccess::Read,
            &self.context,
        )?;
        let data = self
            .manager
            .resolve(&reference, &trait_set, ResolveAccess::Read, &self.context)?;

        let mut attributes = StringMap::new();
        for trait_id in &trait_set {
            attributes.insert(munge_attribute_key(trait_id), String::new());

            for key in data.property_keys(trait_id) {
                if let Some(value) = data.property(trait_id, key) {
                    let attr_key = format!("{trait_id}{ASSET_FIELD_KEY_SEP}{key}");
                    attributes.insert(munge_attribute_key(&attr_key), value.to_string());
                }
            }
        }
        Ok(attributes)
    }

    // ================================================================
    // Publishing
    // ================================================================

    /// First publish phase: preflights the entity with the backend and
    /// returns the working asset ID for the host to write against.
    ///
    /// The returned ID carries the backend's chosen staging path when one
    /// could be resolved, so the imminent resolve/post-create calls can
    /// recover it. With `args["versionUp"] == "False"` the publish is
    /// redirected at the entity's current explicit version where the
    /// backend supports that; in every fallback case the preflight result
    /// is used as-is.
    pub fn create_asset_and_path(
        &self,
        asset_type: &str,
        asset_fields: &StringMap,
        args: &StringMap,
        _create_directory: bool,
    ) -> Result<String, AdapterError> {
        debug!(asset_type, ?asset_fields, ?args, "create_asset_and_path");

        let reference_text = asset_fields
            .get(fields::ENTITY_REFERENCE)
            .ok_or(AdapterError::MissingWorkingReference("publish"))?;

        let strategy = self.strategies.strategy_for_asset_type(asset_type)?;

        let policy = self.manager.management_policy(
            strategy.asset_trait_set(),
            PolicyAccess::Write,
            &self.context,
        );
        if !mediacreation::Managed::is_imbued_to(&policy) {
            warn!(
                manager = self.manager.display_name(),
                asset_type, "manager does not accept this entity shape for publishing"
            );
            return Err(AdapterError::PolicyUnsupported {
                manager: self.manager.display_name().to_string(),
            });
        }

        let entity_reference = self.manager.create_entity_reference(reference_text)?;
        let preflighted = self.manager.preflight(
            &entity_reference,
            &strategy.pre_publish_payload(asset_fields, args),
            PublishAccess::Write,
            &self.context,
        )?;

        // Any "versionUp" other than the literal "False" (including its
        // absence) keeps the default new-version semantics.
        let working = if args.get("versionUp").map(String::as_str) == Some("False") {
            self.explicit_version_target(&entity_reference, preflighted)?
        } else {
            preflighted
        };

        let mut asset_id = AssetId::bare(working.as_str());

        // The host will immediately resolve this ID expecting a writable
        // path, and the later post-create call is never told which path
        // was used. Pre-empt both by resolving the manager-driven
        // location now and encoding it into the ID.
        match self.manager.resolve(
            &working,
            &trait_ids(&[mediacreation::LocatableContent::ID]),
            ResolveAccess::ManagerDriven,
            &self.context,
        ) {
            Ok(data) => {
                if let Some(url) = mediacreation::LocatableContent::location(&data) {
                    asset_id.staged_path = Some(file_url::path_from_url(url)?);
                }
            }
            // Managers without staging support simply leave the ID bare.
            Err(ManagerError::OperationUnsupported(_)) => {}
            Err(err) => return Err(err.into()),
        }

        let asset_id = asset_id.to_string();
        debug!(asset_id = %asset_id, "create_asset_and_path done");
        Ok(asset_id)
    }

    /// Second publish phase: registers the entity with its final
    /// metadata, returning the published asset ID.
    pub fn post_create_asset(
        &self,
        asset_type: &str,
        asset_fields: &StringMap,
        args: &StringMap,
    ) -> Result<String, AdapterError> {
        debug!(asset_type, ?asset_fields, ?args, "post_create_asset");

        // A prior get-fields call on the in-flight ID re-populates the
        // working reference.
        let reference_text = asset_fields
            .get(fields::ENTITY_REFERENCE)
            .ok_or(AdapterError::MissingWorkingReference("post-publish"))?;

        let strategy = self.strategies.strategy_for_asset_type(asset_type)?;

        let working = self
            .manager
            .create_entity_reference_if_valid(reference_text)
            .ok_or_else(|| ManagerError::MalformedReference(reference_text.clone()))?;

        let registered = self.manager.register(
            &working,
            &strategy.post_publish_payload(asset_fields, args),
            PublishAccess::Write,
            &self.context,
        )?;

        debug!(asset_id = %registered, "post_create_asset done");
        Ok(registered.into_string())
    }

    // ================================================================
    // Internals
    // ================================================================

    /// Finds the single reference related to `asset_id` that points to
    /// `version_tag` (which may be a meta-version such as `"latest"`).
    ///
    /// Assumes the version tag acts as a strict filter predicate in the
    /// relationship query, meta-versions included. That behaviour is not
    /// guaranteed by every backend; ones that diverge surface here first.
    fn reference_for_id_and_version(
        &self,
        asset_id: &str,
        version_tag: &str,
    ) -> Result<Option<EntityReference>, AdapterError> {
        let source = self.manager.create_entity_reference(asset_id)?;

        let mut relationship = EntityVersionsRelationshipSpecification::create();
        mediacreation::Version::set_specified_tag(&mut relationship, version_tag);

        let pager = self.manager.get_with_relationship(
            &source,
            &relationship,
            1,
            RelationsAccess::Read,
            &self.context,
        )?;

        if pager.has_next() {
            debug!(
                asset_id,
                version_tag, "multiple results for version query, ignoring remainder"
            );
        }
        Ok(pager.get().into_iter().next())
    }

    /// Attempts to redirect an in-flight publish at the entity's current
    /// explicit version, instead of the new version implied by
    /// `preflighted`.
    ///
    /// Backends that cannot name the current version, don't support
    /// write-access relationship queries, or return anything but exactly
    /// one writable match keep the preflight result.
    fn explicit_version_target(
        &self,
        entity_reference: &EntityReference,
        preflighted: EntityReference,
    ) -> Result<EntityReference, AdapterError> {
        let version_data = self.manager.resolve(
            entity_reference,
            &trait_ids(&[mediacreation::Version::ID]),
            ResolveAccess::Read,
            &self.context,
        )?;
        let Some(stable_tag) = mediacreation::Version::stable_tag(&version_data) else {
            return Ok(preflighted);
        };

        // {Relationship, Singular, Version} with a stable-tag filter
        // predicate: "I want to write to this specific version rather
        // than create a new one". The backend may allow overwriting or
        // may create a revision of the same version.
        let mut relationship = TraitsData::new();
        mediacreation::Relationship::imbue_to(&mut relationship);
        mediacreation::Singular::imbue_to(&mut relationship);
        mediacreation::Version::set_stable_tag(&mut relationship, stable_tag);

        let pager = match self.manager.get_with_relationship(
            &preflighted,
            &relationship,
            1,
            RelationsAccess::Write,
            &self.context,
        ) {
            Ok(pager) => pager,
            // Backends without this workflow keep new-version semantics.
            Err(ManagerError::OperationUnsupported(_)) => return Ok(preflighted),
            Err(err) => return Err(err.into()),
        };

        let mut writable = pager.get();
        if writable.len() == 1 {
            Ok(writable.remove(0))
        } else {
            Ok(preflighted)
        }
    }
}

/// Builds a trait set from static trait IDs.
fn trait_ids(ids: &[&str]) -> TraitSet {
    ids.iter().map(|id| (*id).to_string()).collect()
}

/// Replaces `.` with the host-safe attribute key separator.
fn munge_attribute_key(key: &str) -> String {
    key.replace('.', ASSET_FIELD_KEY_SEP)
}
