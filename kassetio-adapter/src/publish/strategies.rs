//! The per-asset-kind publisher implementations.

use kassetio_manager::file_url;
use kassetio_traits::specifications::{
    BitmapImageResourceSpecification, SceneLightingResourceSpecification, WorkfileSpecification,
};
use kassetio_traits::{TraitSet, TraitsData, katana, mediacreation};

use crate::publish::strategy::PublishStrategy;
use crate::{StringMap, fields, sequence};

// MIME types for the host's own document formats. Katana assigns none
// itself, so these identify the formats to downstream consumers.
const KATANA_PROJECT_MIME: &str = "application/vnd.foundry.katana.project";
const LIVE_GROUP_MIME: &str = "application/vnd.foundry.katana.livegroup+xml";
const LOOK_FILE_ARCHIVE_MIME: &str = "application/vnd.foundry.katana.lookfile";
const DIRECTORY_MIME: &str = "inode/directory";
const LOOK_FILE_MANAGER_SETTINGS_MIME: &str =
    "application/vnd.foundry.katana.lookfilemanager-settings+xml";
const GAFFER_THREE_RIG_MIME: &str = "application/vnd.foundry.katana.rig+xml";
const MACRO_MIME: &str = "application/vnd.foundry.katana.macro";
const FCURVE_MIME: &str = "application/vnd.foundry.katana.fcurve+xml";
const SCENEGRAPH_BOOKMARKS_MIME: &str =
    "application/vnd.foundry.katana.scenegraph-bookmarks+xml";

/// Image file extensions carrying deep (per-pixel sample) data.
const DEEP_EXTENSIONS: [&str; 3] = ["deepexr", "deepshad", "dtex"];

/// MIME type for a render output file extension, when recognized.
fn mime_for_extension(extension: &str) -> Option<&'static str> {
    match extension {
        "exr" | "deepexr" => Some("image/x-exr"),
        "png" => Some("image/png"),
        "tif" => Some("image/tiff"),
        "jpg" => Some("image/jpeg"),
        "rla" => Some("image/x-rla"),
        "dtex" => Some("image/x-dtex"),
        "deepshad" => Some("image/x-deepshad"),
        "hist" => Some("application/vnd.foundry.katana.histogram+xml"),
        _ => None,
    }
}

/// Records the staging path from `fields` (assigned during preflight) as
/// the payload's content location, converted to a URL.
///
/// Strategies never fail, so a path the URL converter rejects is skipped
/// like any other absent hint.
fn apply_staged_location(fields: &StringMap, data: &mut TraitsData) {
    if let Some(path) = fields.get(fields::MANAGER_DRIVEN_VALUE)
        && let Ok(url) = file_url::path_to_url(path)
    {
        mediacreation::LocatableContent::set_location(data, url);
    }
}

/// Shared publisher for kinds whose enrichment is a fixed set of marker
/// traits and (usually) a fixed MIME type over a specification shape.
pub(crate) struct MarkerPublisher {
    trait_set: TraitSet,
    create: fn() -> TraitsData,
    markers: &'static [&'static str],
    mime_type: Option<&'static str>,
}

impl MarkerPublisher {
    fn new(
        trait_set: TraitSet,
        create: fn() -> TraitsData,
        markers: &'static [&'static str],
        mime_type: Option<&'static str>,
    ) -> Self {
        Self {
            trait_set,
            create,
            markers,
            mime_type,
        }
    }

    fn enrich(&self, data: &mut TraitsData) {
        for marker in self.markers {
            data.imbue(marker);
        }
        if let Some(mime_type) = self.mime_type {
            mediacreation::LocatableContent::set_mime_type(data, mime_type);
        }
    }
}

impl PublishStrategy for MarkerPublisher {
    fn asset_trait_set(&self) -> &TraitSet {
        &self.trait_set
    }

    fn pre_publish_payload(&self, _fields: &StringMap, _args: &StringMap) -> TraitsData {
        let mut data = (self.create)();
        self.enrich(&mut data);
        data
    }

    fn post_publish_payload(&self, fields: &StringMap, _args: &StringMap) -> TraitsData {
        let mut data = (self.create)();
        apply_staged_location(fields, &mut data);
        self.enrich(&mut data);
        data
    }
}

/// A full project scene (`.katana` file).
pub(crate) fn katana_scene_publisher() -> MarkerPublisher {
    MarkerPublisher::new(
        WorkfileSpecification::trait_set(),
        WorkfileSpecification::create,
        &[katana::Project::ID],
        Some(KATANA_PROJECT_MIME),
    )
}

/// A LiveGroup export: a scene file holding a single group, as XML.
pub(crate) fn live_group_publisher() -> MarkerPublisher {
    MarkerPublisher::new(
        WorkfileSpecification::trait_set(),
        WorkfileSpecification::create,
        &[katana::LiveGroup::ID],
        Some(LIVE_GROUP_MIME),
    )
}

/// Exported LookFileManager settings: an XML document that is purely
/// configuration, hence the extra `Config` marker.
pub(crate) fn look_file_manager_settings_publisher() -> MarkerPublisher {
    MarkerPublisher::new(
        WorkfileSpecification::trait_set(),
        WorkfileSpecification::create,
        &[mediacreation::Config::ID, katana::LookFileManager::ID],
        Some(LOOK_FILE_MANAGER_SETTINGS_MIME),
    )
}

/// A GafferThree rig export, shaped as scene lighting rather than a
/// generic work file.
pub(crate) fn gaffer_three_rig_publisher() -> MarkerPublisher {
    MarkerPublisher::new(
        SceneLightingResourceSpecification::trait_set(),
        SceneLightingResourceSpecification::create,
        &[katana::GafferThree::ID],
        Some(GAFFER_THREE_RIG_MIME),
    )
}

/// A node macro saved from a Parameters panel.
pub(crate) fn macro_publisher() -> MarkerPublisher {
    MarkerPublisher::new(
        WorkfileSpecification::trait_set(),
        WorkfileSpecification::create,
        &[katana::Macro::ID],
        Some(MACRO_MIME),
    )
}

/// An exported function curve.
pub(crate) fn fcurve_publisher() -> MarkerPublisher {
    MarkerPublisher::new(
        WorkfileSpecification::trait_set(),
        WorkfileSpecification::create,
        &[katana::FCurve::ID],
        Some(FCURVE_MIME),
    )
}

/// Exported Scene Graph bookmarks: settings, hence `Config`.
pub(crate) fn scenegraph_bookmarks_publisher() -> MarkerPublisher {
    MarkerPublisher::new(
        WorkfileSpecification::trait_set(),
        WorkfileSpecification::create,
        &[mediacreation::Config::ID, katana::SceneGraphBookmarks::ID],
        Some(SCENEGRAPH_BOOKMARKS_MIME),
    )
}

/// LookFile publishing.
///
/// A look file bakes either to a single `.klf` archive or to a directory
/// of per-pass files, and additional output formats can be registered by
/// scripts. The two cases are disambiguated by MIME type: the default
/// `"as archive"` format gets the archive type, any other declared format
/// gets the generic directory type, and an undeclared format leaves the
/// MIME type unset.
pub(crate) struct LookFilePublisher {
    trait_set: TraitSet,
}

impl LookFilePublisher {
    pub(crate) fn new() -> Self {
        Self {
            trait_set: WorkfileSpecification::trait_set(),
        }
    }

    fn enrich(args: &StringMap, data: &mut TraitsData) {
        katana::LookFile::imbue_to(data);
        if let Some(output_format) = args.get("outputFormat") {
            let mime_type = if output_format == "as archive" {
                LOOK_FILE_ARCHIVE_MIME
            } else {
                DIRECTORY_MIME
            };
            mediacreation::LocatableContent::set_mime_type(data, mime_type);
        }
    }
}

impl PublishStrategy for LookFilePublisher {
    fn asset_trait_set(&self) -> &TraitSet {
        &self.trait_set
    }

    fn pre_publish_payload(&self, _fields: &StringMap, args: &StringMap) -> TraitsData {
        let mut data = WorkfileSpecification::create();
        Self::enrich(args, &mut data);
        data
    }

    fn post_publish_payload(&self, fields: &StringMap, args: &StringMap) -> TraitsData {
        let mut data = WorkfileSpecification::create();
        apply_staged_location(fields, &mut data);
        Self::enrich(args, &mut data);
        data
    }
}

/// Image publishing (renders, catalog exports).
///
/// The richest strategy: colour space, display name, resolution preset
/// and MIME type all come from render-node args, and the post-publish
/// payload carries the frame range actually found on disk.
pub(crate) struct ImagePublisher {
    trait_set: TraitSet,
}

impl ImagePublisher {
    pub(crate) fn new() -> Self {
        Self {
            trait_set: BitmapImageResourceSpecification::trait_set(),
        }
    }

    fn apply_args(args: &StringMap, data: &mut TraitsData) {
        if let Some(colorspace) = args.get("colorspace") {
            mediacreation::OcioColorManaged::set_colorspace(data, colorspace.clone());
        }

        if let Some(output_name) = args.get("outputName") {
            mediacreation::DisplayName::set_name(data, output_name.clone());
            mediacreation::DisplayName::set_qualified_name(data, output_name.clone());
        }

        if let Some(extension) = args.get("ext") {
            if let Some(mime_type) = mime_for_extension(extension) {
                mediacreation::LocatableContent::set_mime_type(data, mime_type);
            }
            if DEEP_EXTENSIONS.contains(&extension.as_str()) {
                mediacreation::Deep::imbue_to(data);
            }
        }

        if let Some(preset) = args.get("res") {
            katana::PresetResolution::set_preset_name(data, preset.clone());
        }
    }
}

impl PublishStrategy for ImagePublisher {
    fn asset_trait_set(&self) -> &TraitSet {
        &self.trait_set
    }

    fn pre_publish_payload(&self, _fields: &StringMap, args: &StringMap) -> TraitsData {
        let mut data = BitmapImageResourceSpecification::create();
        Self::apply_args(args, &mut data);
        // A render is assumed to produce a range of frames; which frames
        // is unknowable until the files exist, so only the marker goes in
        // here. The range itself is discovered at register time.
        mediacreation::FrameRanged::imbue_to(&mut data);
        data
    }

    fn post_publish_payload(&self, fields: &StringMap, args: &StringMap) -> TraitsData {
        let mut data = BitmapImageResourceSpecification::create();
        apply_staged_location(fields, &mut data);
        Self::apply_args(args, &mut data);

        // The staging path assigned at preflight is a sequence template;
        // glob its directory for the frame range actually rendered.
        if let Some(staged_path) = fields.get(fields::MANAGER_DRIVEN_VALUE)
            && let Some((min_frame, max_frame)) = sequence::find_frame_range(staged_path)
        {
            mediacreation::FrameRanged::set_start_frame(&mut data, min_frame);
            mediacreation::FrameRanged::set_end_frame(&mut data, max_frame);
            mediacreation::FrameRanged::set_in_frame(&mut data, min_frame);
            mediacreation::FrameRanged::set_out_frame(&mut data, max_frame);
        }

        data
    }
}
