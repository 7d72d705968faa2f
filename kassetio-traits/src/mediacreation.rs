//! The media-creation trait vocabulary.
//!
//! Each type is a zero-size view over a [`TraitsData`] payload: an
//! associated trait ID, property-key constants, and typed accessors.
//! Marker traits (no properties) only offer `imbue_to`/`is_imbued_to`
//! helpers.

use crate::data::TraitsData;

/// Marks a payload as describing a publishable entity.
pub struct Entity;

impl Entity {
    pub const ID: &'static str = "openassetio-mediacreation:usage.Entity";

    pub fn imbue_to(data: &mut TraitsData) {
        data.imbue(Self::ID);
    }
}

/// Marks a payload as describing a relationship between entities.
pub struct Relationship;

impl Relationship {
    pub const ID: &'static str = "openassetio-mediacreation:usage.Relationship";

    pub fn imbue_to(data: &mut TraitsData) {
        data.imbue(Self::ID);
    }
}

/// A relationship expected to yield exactly one related entity.
pub struct Singular;

impl Singular {
    pub const ID: &'static str = "openassetio-mediacreation:relationship.Singular";

    pub fn imbue_to(data: &mut TraitsData) {
        data.imbue(Self::ID);
    }
}

/// An application working document (scene file, exported settings, ...).
pub struct Work;

impl Work {
    pub const ID: &'static str = "openassetio-mediacreation:application.Work";

    pub fn imbue_to(data: &mut TraitsData) {
        data.imbue(Self::ID);
    }
}

/// Pure configuration data, as opposed to renderable content.
pub struct Config;

impl Config {
    pub const ID: &'static str = "openassetio-mediacreation:application.Config";

    pub fn imbue_to(data: &mut TraitsData) {
        data.imbue(Self::ID);
    }
}

/// Content that exists at a URL, with an optional MIME type.
///
/// The `location` property always holds a URL, never a raw filesystem
/// path — conversion happens at the adapter boundary.
pub struct LocatableContent;

impl LocatableContent {
    pub const ID: &'static str = "openassetio-mediacreation:content.LocatableContent";
    pub const LOCATION: &'static str = "location";
    pub const MIME_TYPE: &'static str = "mimeType";

    pub fn imbue_to(data: &mut TraitsData) {
        data.imbue(Self::ID);
    }

    pub fn set_location(data: &mut TraitsData, url: impl Into<String>) {
        data.set_property(Self::ID, Self::LOCATION, url.into());
    }

    pub fn location(data: &TraitsData) -> Option<&str> {
        data.string_property(Self::ID, Self::LOCATION)
    }

    pub fn set_mime_type(data: &mut TraitsData, mime: impl Into<String>) {
        data.set_property(Self::ID, Self::MIME_TYPE, mime.into());
    }

    pub fn mime_type(data: &TraitsData) -> Option<&str> {
        data.string_property(Self::ID, Self::MIME_TYPE)
    }
}

/// Human-facing naming for an entity.
pub struct DisplayName;

impl DisplayName {
    pub const ID: &'static str = "openassetio-mediacreation:identity.DisplayName";
    pub const NAME: &'static str = "name";
    pub const QUALIFIED_NAME: &'static str = "qualifiedName";

    pub fn set_name(data: &mut TraitsData, name: impl Into<String>) {
        data.set_property(Self::ID, Self::NAME, name.into());
    }

    pub fn name(data: &TraitsData) -> Option<&str> {
        data.string_property(Self::ID, Self::NAME)
    }

    pub fn set_qualified_name(data: &mut TraitsData, name: impl Into<String>) {
        data.set_property(Self::ID, Self::QUALIFIED_NAME, name.into());
    }
}

/// Version labels of an entity.
///
/// `stableTag` is a concrete, resolved version (e.g. `"2"`);
/// `specifiedTag` is the version as requested, possibly a meta-version
/// (e.g. `"latest"`). In a relationship payload either tag acts as a
/// filter predicate.
pub struct Version;

impl Version {
    pub const ID: &'static str = "openassetio-mediacreation:lifecycle.Version";
    pub const SPECIFIED_TAG: &'static str = "specifiedTag";
    pub const STABLE_TAG: &'static str = "stableTag";

    pub fn imbue_to(data: &mut TraitsData) {
        data.imbue(Self::ID);
    }

    pub fn set_specified_tag(data: &mut TraitsData, tag: impl Into<String>) {
        data.set_property(Self::ID, Self::SPECIFIED_TAG, tag.into());
    }

    pub fn specified_tag(data: &TraitsData) -> Option<&str> {
        data.string_property(Self::ID, Self::SPECIFIED_TAG)
    }

    pub fn set_stable_tag(data: &mut TraitsData, tag: impl Into<String>) {
        data.set_property(Self::ID, Self::STABLE_TAG, tag.into());
    }

    pub fn stable_tag(data: &TraitsData) -> Option<&str> {
        data.string_property(Self::ID, Self::STABLE_TAG)
    }
}

/// Management-policy response marker: the backend accepts entities of the
/// queried shape.
pub struct Managed;

impl Managed {
    pub const ID: &'static str = "openassetio-mediacreation:managementPolicy.Managed";

    pub fn imbue_to(data: &mut TraitsData) {
        data.imbue(Self::ID);
    }

    pub fn is_imbued_to(data: &TraitsData) -> bool {
        data.has_trait(Self::ID)
    }
}

/// OCIO colour management applied to image content.
pub struct OcioColorManaged;

impl OcioColorManaged {
    pub const ID: &'static str = "openassetio-mediacreation:color.OCIOColorManaged";
    pub const COLORSPACE: &'static str = "colorspace";

    pub fn set_colorspace(data: &mut TraitsData, colorspace: impl Into<String>) {
        data.set_property(Self::ID, Self::COLORSPACE, colorspace.into());
    }

    pub fn colorspace(data: &TraitsData) -> Option<&str> {
        data.string_property(Self::ID, Self::COLORSPACE)
    }
}

/// Content spanning a frame range.
pub struct FrameRanged;

impl FrameRanged {
    pub const ID: &'static str = "openassetio-mediacreation:timeDomain.FrameRanged";
    pub const START_FRAME: &'static str = "startFrame";
    pub const END_FRAME: &'static str = "endFrame";
    pub const IN_FRAME: &'static str = "inFrame";
    pub const OUT_FRAME: &'static str = "outFrame";

    pub fn imbue_to(data: &mut TraitsData) {
        data.imbue(Self::ID);
    }

    pub fn set_start_frame(data: &mut TraitsData, frame: i64) {
        data.set_property(Self::ID, Self::START_FRAME, frame);
    }

    pub fn set_end_frame(data: &mut TraitsData, frame: i64) {
        data.set_property(Self::ID, Self::END_FRAME, frame);
    }

    pub fn set_in_frame(data: &mut TraitsData, frame: i64) {
        data.set_property(Self::ID, Self::IN_FRAME, frame);
    }

    pub fn set_out_frame(data: &mut TraitsData, frame: i64) {
        data.set_property(Self::ID, Self::OUT_FRAME, frame);
    }

    pub fn start_frame(data: &TraitsData) -> Option<i64> {
        data.property(Self::ID, Self::START_FRAME)?.as_int()
    }

    pub fn end_frame(data: &TraitsData) -> Option<i64> {
        data.property(Self::ID, Self::END_FRAME)?.as_int()
    }
}

pub struct Image;

impl Image {
    pub const ID: &'static str = "openassetio-mediacreation:twoDimensional.Image";

    pub fn imbue_to(data: &mut TraitsData) {
        data.imbue(Self::ID);
    }
}

pub struct PixelBased;

impl PixelBased {
    pub const ID: &'static str = "openassetio-mediacreation:twoDimensional.PixelBased";

    pub fn imbue_to(data: &mut TraitsData) {
        data.imbue(Self::ID);
    }
}

/// Deep image data (per-pixel sample lists).
pub struct Deep;

impl Deep {
    pub const ID: &'static str = "openassetio-mediacreation:twoDimensional.Deep";

    pub fn imbue_to(data: &mut TraitsData) {
        data.imbue(Self::ID);
    }

    pub fn is_imbued_to(data: &TraitsData) -> bool {
        data.has_trait(Self::ID)
    }
}

pub struct Spatial;

impl Spatial {
    pub const ID: &'static str = "openassetio-mediacreation:threeDimensional.Spatial";

    pub fn imbue_to(data: &mut TraitsData) {
        data.imbue(Self::ID);
    }
}

pub struct Lighting;

impl Lighting {
    pub const ID: &'static str = "openassetio-mediacreation:threeDimensional.Lighting";

    pub fn imbue_to(data: &mut TraitsData) {
        data.imbue(Self::ID);
    }
}

/// A scene-hierarchy path associated with 3D content.
pub struct SourcePath;

impl SourcePath {
    pub const ID: &'static str = "openassetio-mediacreation:threeDimensional.SourcePath";
    pub const PATH: &'static str = "path";

    pub fn set_path(data: &mut TraitsData, path: impl Into<String>) {
        data.set_property(Self::ID, Self::PATH, path.into());
    }

    pub fn path(data: &TraitsData) -> Option<&str> {
        data.string_property(Self::ID, Self::PATH)
    }
}
