//! The asset-kind → strategy catalog.

use std::collections::HashMap;

use crate::error::AdapterError;
use crate::fields::asset_type;
use crate::publish::strategies;
use crate::publish::strategy::PublishStrategy;

/// Maps host asset-type tags to their publish strategies.
///
/// Built once at adapter construction and read-only afterwards. Kinds the
/// host only ever ingests (alembic, casting sheet, attribute file, shader)
/// are deliberately absent: asking to publish one is an
/// [`AdapterError::UnsupportedAssetKind`], not a silent default.
pub struct PublishStrategies {
    strategies: HashMap<&'static str, Box<dyn PublishStrategy>>,
}

impl Default for PublishStrategies {
    fn default() -> Self {
        Self::new()
    }
}

impl PublishStrategies {
    #[must_use]
    pub fn new() -> Self {
        let mut strategies: HashMap<&'static str, Box<dyn PublishStrategy>> = HashMap::new();
        strategies.insert(
            asset_type::KATANA_SCENE,
            Box::new(strategies::katana_scene_publisher()),
        );
        strategies.insert(asset_type::MACRO, Box::new(strategies::macro_publisher()));
        strategies.insert(
            asset_type::LIVE_GROUP,
            Box::new(strategies::live_group_publisher()),
        );
        strategies.insert(
            asset_type::IMAGE,
            Box::new(strategies::ImagePublisher::new()),
        );
        strategies.insert(
            asset_type::LOOK_FILE,
            Box::new(strategies::LookFilePublisher::new()),
        );
        strategies.insert(
            asset_type::LOOK_FILE_MANAGER_SETTINGS,
            Box::new(strategies::look_file_manager_settings_publisher()),
        );
        strategies.insert(
            asset_type::FCURVE_FILE,
            Box::new(strategies::fcurve_publisher()),
        );
        strategies.insert(
            asset_type::GAFFER_THREE_RIG,
            Box::new(strategies::gaffer_three_rig_publisher()),
        );
        strategies.insert(
            asset_type::SCENEGRAPH_BOOKMARKS,
            Box::new(strategies::scenegraph_bookmarks_publisher()),
        );
        Self { strategies }
    }

    /// Looks up the strategy for a host asset-type tag.
    pub fn strategy_for_asset_type(
        &self,
        asset_type: &str,
    ) -> Result<&dyn PublishStrategy, AdapterError> {
        self.strategies
            .get(asset_type)
            .map(Box::as_ref)
            .ok_or_else(|| AdapterError::UnsupportedAssetKind(asset_type.to_string()))
    }
}
