//! Specification shapes: the fixed trait sets that identify whole entity
//! kinds, plus payload constructors pre-imbued with those sets.
//!
//! A specification's trait set is what gets passed to a backend's
//! management-policy query ("do you accept entities shaped like this for
//! writing?"), and its payload is the starting point for publish metadata.

use crate::data::{TraitSet, TraitsData};
use crate::mediacreation;

fn trait_set_of(ids: &[&str]) -> TraitSet {
    ids.iter().map(|id| (*id).to_string()).collect()
}

/// An application working document: scene files, exports, settings.
pub struct WorkfileSpecification;

impl WorkfileSpecification {
    pub const TRAIT_IDS: [&'static str; 3] = [
        mediacreation::Entity::ID,
        mediacreation::Work::ID,
        mediacreation::LocatableContent::ID,
    ];

    #[must_use]
    pub fn trait_set() -> TraitSet {
        trait_set_of(&Self::TRAIT_IDS)
    }

    #[must_use]
    pub fn create() -> TraitsData {
        TraitsData::from_trait_set(&Self::trait_set())
    }
}

/// A 2D raster image resource (renders, textures, histograms).
pub struct BitmapImageResourceSpecification;

impl BitmapImageResourceSpecification {
    pub const TRAIT_IDS: [&'static str; 4] = [
        mediacreation::Entity::ID,
        mediacreation::Image::ID,
        mediacreation::PixelBased::ID,
        mediacreation::LocatableContent::ID,
    ];

    #[must_use]
    pub fn trait_set() -> TraitSet {
        trait_set_of(&Self::TRAIT_IDS)
    }

    #[must_use]
    pub fn create() -> TraitsData {
        TraitsData::from_trait_set(&Self::trait_set())
    }
}

/// A 3D scene-lighting resource (light rigs).
pub struct SceneLightingResourceSpecification;

impl SceneLightingResourceSpecification {
    pub const TRAIT_IDS: [&'static str; 4] = [
        mediacreation::Entity::ID,
        mediacreation::Spatial::ID,
        mediacreation::Lighting::ID,
        mediacreation::LocatableContent::ID,
    ];

    #[must_use]
    pub fn trait_set() -> TraitSet {
        trait_set_of(&Self::TRAIT_IDS)
    }

    #[must_use]
    pub fn create() -> TraitsData {
        TraitsData::from_trait_set(&Self::trait_set())
    }
}

/// A relationship between the versions of one logical entity.
///
/// Adding a [`mediacreation::Version`] tag property to the created payload
/// turns it into a filter predicate for a specific version.
pub struct EntityVersionsRelationshipSpecification;

impl EntityVersionsRelationshipSpecification {
    pub const TRAIT_IDS: [&'static str; 2] =
        [mediacreation::Relationship::ID, mediacreation::Version::ID];

    #[must_use]
    pub fn trait_set() -> TraitSet {
        trait_set_of(&Self::TRAIT_IDS)
    }

    #[must_use]
    pub fn create() -> TraitsData {
        TraitsData::from_trait_set(&Self::trait_set())
    }
}
