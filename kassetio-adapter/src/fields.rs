//! Field keys and host constants shared across the adapter.

/// Field carrying the entity reference, as produced by
/// [`crate::AssetAdapter::get_asset_fields`].
pub const ENTITY_REFERENCE: &str = "__entityReference";

/// Field carrying the backend-chosen staging path of an in-flight publish.
pub const MANAGER_DRIVEN_VALUE: &str = "__managerDrivenValue";

/// The host's standardized display-name field.
pub const NAME: &str = "name";

/// The host's standardized version field.
pub const VERSION: &str = "version";

/// Page size for relationship queries that enumerate versions.
pub const PAGE_SIZE: usize = 256;

/// Host asset-type tags with a registered publish strategy.
pub mod asset_type {
    pub const KATANA_SCENE: &str = "katana scene";
    pub const MACRO: &str = "macro";
    pub const LIVE_GROUP: &str = "live group";
    pub const IMAGE: &str = "image";
    pub const LOOK_FILE: &str = "look file";
    pub const LOOK_FILE_MANAGER_SETTINGS: &str = "look file manager settings";
    pub const FCURVE_FILE: &str = "fcurve file";
    pub const GAFFER_THREE_RIG: &str = "gafferthree rig";
    pub const SCENEGRAPH_BOOKMARKS: &str = "scenegraph bookmarks";
}
