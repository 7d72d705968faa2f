//! Host-application-specific traits.
//!
//! These mark entity payloads with the Katana document kind that produced
//! them, so a backend can distinguish e.g. a macro from a full project
//! scene. All are property-less markers except [`PresetResolution`].

use crate::data::TraitsData;

/// A full Katana project scene (`.katana`).
pub struct Project;

impl Project {
    pub const ID: &'static str = "katana-openassetio:application.Project";

    pub fn imbue_to(data: &mut TraitsData) {
        data.imbue(Self::ID);
    }
}

/// A baked look file, either a `.klf` archive or a per-pass directory.
pub struct LookFile;

impl LookFile {
    pub const ID: &'static str = "katana-openassetio:application.LookFile";

    pub fn imbue_to(data: &mut TraitsData) {
        data.imbue(Self::ID);
    }
}

/// A node macro saved from a Parameters panel.
pub struct Macro;

impl Macro {
    pub const ID: &'static str = "katana-openassetio:application.Macro";

    pub fn imbue_to(data: &mut TraitsData) {
        data.imbue(Self::ID);
    }
}

/// Exported Scene Graph bookmarks.
pub struct SceneGraphBookmarks;

impl SceneGraphBookmarks {
    pub const ID: &'static str = "katana-openassetio:application.SceneGraphBookmarks";

    pub fn imbue_to(data: &mut TraitsData) {
        data.imbue(Self::ID);
    }
}

/// A published LiveGroup (single group exported as XML).
pub struct LiveGroup;

impl LiveGroup {
    pub const ID: &'static str = "katana-openassetio:nodes.LiveGroup";

    pub fn imbue_to(data: &mut TraitsData) {
        data.imbue(Self::ID);
    }
}

/// A GafferThree light rig export.
pub struct GafferThree;

impl GafferThree {
    pub const ID: &'static str = "katana-openassetio:nodes.GafferThree";

    pub fn imbue_to(data: &mut TraitsData) {
        data.imbue(Self::ID);
    }
}

/// Exported LookFileManager settings.
pub struct LookFileManager;

impl LookFileManager {
    pub const ID: &'static str = "katana-openassetio:nodes.LookFileManager";

    pub fn imbue_to(data: &mut TraitsData) {
        data.imbue(Self::ID);
    }
}

/// An exported function curve (`.fcurve`).
pub struct FCurve;

impl FCurve {
    pub const ID: &'static str = "katana-openassetio:timeDomain.FCurve";

    pub fn imbue_to(data: &mut TraitsData) {
        data.imbue(Self::ID);
    }
}

/// A named render-resolution preset (e.g. `"square_512"`).
pub struct PresetResolution;

impl PresetResolution {
    pub const ID: &'static str = "katana-openassetio:twoDimensional.PresetResolution";
    pub const PRESET_NAME: &'static str = "presetName";

    pub fn set_preset_name(data: &mut TraitsData, name: impl Into<String>) {
        data.set_property(Self::ID, Self::PRESET_NAME, name.into());
    }

    pub fn preset_name(data: &TraitsData) -> Option<&str> {
        data.string_property(Self::ID, Self::PRESET_NAME)
    }
}
