//! End-to-end two-phase publish scenarios against the reference library
//! backend, mirroring the host's actual call sequences.

mod common;

use pretty_assertions::assert_eq;

use common::{adapter_for, cat_library, named_version, string_map, with_staging};
use kassetio_adapter::{AdapterError, StringMap};
use kassetio_library::{EntityRecord, LibraryDocument};
use kassetio_manager::ManagerError;

/// Runs the full host publish sequence: get fields, create, re-get
/// fields on the in-flight ID, post-create. Returns the final asset ID.
fn publish(
    adapter: &kassetio_adapter::AssetAdapter,
    asset_type: &str,
    asset_id: &str,
    args: &StringMap,
) -> String {
    let asset_fields = adapter.get_asset_fields(asset_id, true).unwrap();
    let in_flight = adapter
        .create_asset_and_path(asset_type, &asset_fields, args, true)
        .unwrap();
    let in_flight_fields = adapter.get_asset_fields(&in_flight, false).unwrap();
    adapter
        .post_create_asset(asset_type, &in_flight_fields, args)
        .unwrap()
}

#[test]
fn look_file_publish_as_archive() {
    let adapter = adapter_for(cat_library("/some/staging/area"));
    let args = string_map(&[("outputFormat", "as archive")]);

    let asset_fields = adapter.get_asset_fields("lib:///cat?v=1", true).unwrap();
    assert_eq!(
        asset_fields,
        string_map(&[
            ("__entityReference", "lib:///cat?v=1"),
            ("name", "Cat"),
            ("version", "1"),
        ])
    );

    let in_flight = adapter
        .create_asset_and_path("look file", &asset_fields, &args, true)
        .unwrap();
    assert_eq!(in_flight, "lib:///cat#value=/some/staging/area/cat.klf");

    // The in-flight ID resolves straight to the staging area.
    assert_eq!(
        adapter.resolve_asset(&in_flight).unwrap(),
        "/some/staging/area/cat.klf"
    );

    let in_flight_fields = adapter.get_asset_fields(&in_flight, false).unwrap();
    assert_eq!(
        in_flight_fields,
        string_map(&[
            ("__entityReference", "lib:///cat"),
            ("__managerDrivenValue", "/some/staging/area/cat.klf"),
            ("name", "Cat"),
            ("version", "latest"),
        ])
    );

    let new_asset_id = adapter
        .post_create_asset("look file", &in_flight_fields, &args)
        .unwrap();
    assert_eq!(new_asset_id, "lib:///cat?v=2");

    let attributes = adapter.get_asset_attributes(&new_asset_id, "").unwrap();
    assert_eq!(
        attributes.get("openassetio-mediacreation:content,LocatableContent,location"),
        Some(&"file:///some/staging/area/cat.klf".to_string())
    );
    assert_eq!(
        attributes.get("openassetio-mediacreation:content,LocatableContent,mimeType"),
        Some(&"application/vnd.foundry.katana.lookfile".to_string())
    );
    // The kind marker travels with the registered payload.
    assert!(attributes.contains_key("katana-openassetio:application,LookFile"));
}

#[test]
fn look_file_publish_as_other_format() {
    let adapter = adapter_for(cat_library("/some/staging/area"));
    let args = string_map(&[("outputFormat", "anything else")]);

    let new_asset_id = publish(&adapter, "look file", "lib:///cat?v=1", &args);

    let attributes = adapter.get_asset_attributes(&new_asset_id, "").unwrap();
    assert_eq!(
        attributes.get("openassetio-mediacreation:content,LocatableContent,mimeType"),
        Some(&"inode/directory".to_string())
    );
}

#[test]
fn image_publish_discovers_frame_range_on_disk() {
    let staging = tempfile::tempdir().unwrap();
    for frame in 1..=10 {
        std::fs::File::create(staging.path().join(format!("cat.{frame:04}.exr"))).unwrap();
    }

    let mut document = LibraryDocument::default();
    document.entities.insert(
        "cat".to_string(),
        EntityRecord {
            staging_dir: Some(staging.path().to_str().unwrap().to_string()),
            staging: Some("cat.####.exr".to_string()),
            versions: vec![named_version("Cat")],
            ..EntityRecord::default()
        },
    );
    let adapter = adapter_for(document);

    let args = string_map(&[
        ("colorspace", "linear"),
        ("ext", "deepexr"),
        ("outputName", "deep"),
        ("res", "square_512"),
    ]);
    let new_asset_id = publish(&adapter, "image", "lib:///cat?v=1", &args);
    assert_eq!(new_asset_id, "lib:///cat?v=2");

    let attributes = adapter.get_asset_attributes(&new_asset_id, "").unwrap();

    // Frame range globbed from the staged sequence.
    assert_eq!(
        attributes.get("openassetio-mediacreation:timeDomain,FrameRanged,startFrame"),
        Some(&"1".to_string())
    );
    assert_eq!(
        attributes.get("openassetio-mediacreation:timeDomain,FrameRanged,endFrame"),
        Some(&"10".to_string())
    );

    // Arg-driven enrichment.
    assert_eq!(
        attributes.get("openassetio-mediacreation:color,OCIOColorManaged,colorspace"),
        Some(&"linear".to_string())
    );
    assert_eq!(
        attributes.get("openassetio-mediacreation:identity,DisplayName,name"),
        Some(&"deep".to_string())
    );
    assert_eq!(
        attributes.get("openassetio-mediacreation:content,LocatableContent,mimeType"),
        Some(&"image/x-exr".to_string())
    );
    assert!(attributes.contains_key("openassetio-mediacreation:twoDimensional,Deep"));
    assert_eq!(
        attributes.get("katana-openassetio:twoDimensional,PresetResolution,presetName"),
        Some(&"square_512".to_string())
    );
}

#[test]
fn image_publish_without_rendered_frames_omits_range() {
    let staging = tempfile::tempdir().unwrap();

    let mut document = LibraryDocument::default();
    document.entities.insert(
        "cat".to_string(),
        EntityRecord {
            staging_dir: Some(staging.path().to_str().unwrap().to_string()),
            staging: Some("cat.####.exr".to_string()),
            versions: vec![named_version("Cat")],
            ..EntityRecord::default()
        },
    );
    let adapter = adapter_for(document);

    let new_asset_id = publish(&adapter, "image", "lib:///cat?v=1", &StringMap::new());
    let attributes = adapter.get_asset_attributes(&new_asset_id, "").unwrap();

    assert!(!attributes.contains_key("openassetio-mediacreation:timeDomain,FrameRanged"));
    assert!(
        !attributes.contains_key("openassetio-mediacreation:timeDomain,FrameRanged,startFrame")
    );
}

#[test]
fn version_up_false_redirects_to_explicit_version() {
    let mut document = LibraryDocument::default();
    document.entities.insert(
        "cat".to_string(),
        EntityRecord {
            staging_dir: Some("/some/staging/area".to_string()),
            staging: Some("cat.v2.rev1.katana".to_string()),
            versions: vec![with_staging(named_version("Cat"), "cat.v1.rev2.katana")],
            ..EntityRecord::default()
        },
    );
    let adapter = adapter_for(document);

    let args = string_map(&[("versionUp", "False"), ("publish", "False")]);
    let asset_fields = adapter.get_asset_fields("lib:///cat?v=1", false).unwrap();

    let in_flight = adapter
        .create_asset_and_path("katana scene", &asset_fields, &args, true)
        .unwrap();
    // The working reference is the relationship-supplied explicit
    // version, staged over its own file.
    assert_eq!(
        in_flight,
        "lib:///cat?v=1#value=/some/staging/area/cat.v1.rev2.katana"
    );

    let in_flight_fields = adapter.get_asset_fields(&in_flight, false).unwrap();
    let new_asset_id = adapter
        .post_create_asset("katana scene", &in_flight_fields, &args)
        .unwrap();
    assert_eq!(new_asset_id, "lib:///cat?v=1");
}

#[test]
fn version_up_true_keeps_new_version_semantics() {
    let mut document = LibraryDocument::default();
    document.entities.insert(
        "cat".to_string(),
        EntityRecord {
            staging_dir: Some("/some/staging/area".to_string()),
            staging: Some("cat.v2.rev1.katana".to_string()),
            versions: vec![with_staging(named_version("Cat"), "cat.v1.rev2.katana")],
            ..EntityRecord::default()
        },
    );
    let adapter = adapter_for(document);

    let args = string_map(&[("versionUp", "True"), ("publish", "True")]);
    let asset_fields = adapter.get_asset_fields("lib:///cat?v=1", false).unwrap();

    let in_flight = adapter
        .create_asset_and_path("katana scene", &asset_fields, &args, true)
        .unwrap();
    assert_eq!(
        in_flight,
        "lib:///cat#value=/some/staging/area/cat.v2.rev1.katana"
    );

    let in_flight_fields = adapter.get_asset_fields(&in_flight, false).unwrap();
    let new_asset_id = adapter
        .post_create_asset("katana scene", &in_flight_fields, &args)
        .unwrap();
    assert_eq!(new_asset_id, "lib:///cat?v=2");
}

#[test]
fn version_up_redirection_falls_back_when_backend_declines() {
    let mut document = LibraryDocument::default();
    document.entities.insert(
        "dog".to_string(),
        EntityRecord {
            staging_dir: Some("/some/staging/area".to_string()),
            staging: Some("dog.katana".to_string()),
            overwritable: false,
            versions: vec![named_version("Dog")],
            ..EntityRecord::default()
        },
    );
    let adapter = adapter_for(document);

    let args = string_map(&[("versionUp", "False")]);
    let asset_fields = adapter.get_asset_fields("lib:///dog?v=1", false).unwrap();

    // No error surfaces; the preflight result is used as-is.
    let in_flight = adapter
        .create_asset_and_path("katana scene", &asset_fields, &args, true)
        .unwrap();
    assert_eq!(in_flight, "lib:///dog#value=/some/staging/area/dog.katana");

    let in_flight_fields = adapter.get_asset_fields(&in_flight, false).unwrap();
    let new_asset_id = adapter
        .post_create_asset("katana scene", &in_flight_fields, &args)
        .unwrap();
    assert_eq!(new_asset_id, "lib:///dog?v=2");
}

#[test]
fn backend_without_staging_support_yields_a_bare_working_id() {
    let mut document = LibraryDocument::default();
    document.entities.insert(
        "emu".to_string(),
        EntityRecord {
            manager_driven: false,
            versions: vec![named_version("Emu")],
            ..EntityRecord::default()
        },
    );
    let adapter = adapter_for(document);

    let asset_fields = adapter.get_asset_fields("lib:///emu?v=1", true).unwrap();
    let in_flight = adapter
        .create_asset_and_path("macro", &asset_fields, &StringMap::new(), true)
        .unwrap();

    assert_eq!(in_flight, "lib:///emu");
}

#[test]
fn publish_declined_by_write_policy() {
    let mut document = cat_library("/some/staging/area");
    // Only an implausible shape is managed; every real kind is declined.
    document.managed_trait_sets = Some(vec![vec!["ns:test.Nothing".to_string()]]);
    let adapter = adapter_for(document);

    let asset_fields = adapter.get_asset_fields("lib:///cat?v=1", true).unwrap();
    let result =
        adapter.create_asset_and_path("look file", &asset_fields, &StringMap::new(), true);

    assert!(matches!(
        result,
        Err(AdapterError::PolicyUnsupported { .. })
    ));
}

#[test]
fn unknown_asset_kind_is_unsupported() {
    let adapter = adapter_for(cat_library("/some/staging/area"));
    let asset_fields = adapter.get_asset_fields("lib:///cat?v=1", true).unwrap();

    let result = adapter.create_asset_and_path("alembic", &asset_fields, &StringMap::new(), true);
    assert!(matches!(
        result,
        Err(AdapterError::UnsupportedAssetKind(kind)) if kind == "alembic"
    ));
}

#[test]
fn missing_working_reference_is_a_protocol_violation() {
    let adapter = adapter_for(cat_library("/some/staging/area"));

    let create = adapter.create_asset_and_path(
        "look file",
        &StringMap::new(),
        &StringMap::new(),
        true,
    );
    assert!(matches!(
        create,
        Err(AdapterError::MissingWorkingReference(_))
    ));

    let post = adapter.post_create_asset("look file", &StringMap::new(), &StringMap::new());
    assert!(matches!(post, Err(AdapterError::MissingWorkingReference(_))));
}

#[test]
fn backend_errors_propagate_verbatim() {
    let adapter = adapter_for(cat_library("/some/staging/area"));

    // A reference to a missing entity passes validation (prefix match)
    // but fails at preflight.
    let asset_fields = string_map(&[("__entityReference", "lib:///missing")]);
    let result =
        adapter.create_asset_and_path("macro", &asset_fields, &StringMap::new(), true);

    assert!(matches!(
        result,
        Err(AdapterError::Manager(ManagerError::EntityResolution { .. }))
    ));
}

#[test]
fn marker_kinds_register_their_fixed_mime_types() {
    let cases = [
        ("macro", "application/vnd.foundry.katana.macro"),
        ("live group", "application/vnd.foundry.katana.livegroup+xml"),
        ("fcurve file", "application/vnd.foundry.katana.fcurve+xml"),
        ("gafferthree rig", "application/vnd.foundry.katana.rig+xml"),
        (
            "look file manager settings",
            "application/vnd.foundry.katana.lookfilemanager-settings+xml",
        ),
        (
            "scenegraph bookmarks",
            "application/vnd.foundry.katana.scenegraph-bookmarks+xml",
        ),
        ("katana scene", "application/vnd.foundry.katana.project"),
    ];

    for (asset_type, expected_mime) in cases {
        let adapter = adapter_for(cat_library("/some/staging/area"));
        let new_asset_id = publish(&adapter, asset_type, "lib:///cat?v=1", &StringMap::new());

        let attributes = adapter.get_asset_attributes(&new_asset_id, "").unwrap();
        assert_eq!(
            attributes.get("openassetio-mediacreation:content,LocatableContent,mimeType"),
            Some(&expected_mime.to_string()),
            "kind '{asset_type}'"
        );
    }
}
