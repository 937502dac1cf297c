//! Build-time configuration.

use cg_core::Category;
use cg_paths::StitchConfig;
use cg_spatial::{DEFAULT_RESOLVE_WINDOW, IndexConfig};

use crate::{AtlasError, AtlasResult};

/// Everything an [`AtlasBuilder`](crate::AtlasBuilder) can be tuned with.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct AtlasConfig {
    pub stitch: StitchConfig,

    /// KD-tree leaf capacity and depth limit, shared by every category.
    pub index: IndexConfig,

    /// Name-index positions scanned on each side when resolving a street.
    /// Default: 500.
    pub resolve_window: usize,

    /// Categories that get no spatial index.  Range queries over them fall
    /// back to a linear bounding-box scan.  Default: coastline, whose few
    /// large rings cover most of any viewport anyway.
    pub unindexed: Vec<Category>,

    /// Worker thread count for the `parallel` feature.  `None` uses Rayon's
    /// global pool.  Ignored without the feature.
    pub num_threads: Option<usize>,
}

impl Default for AtlasConfig {
    fn default() -> Self {
        Self {
            stitch:         StitchConfig::default(),
            index:          IndexConfig::default(),
            resolve_window: DEFAULT_RESOLVE_WINDOW,
            unindexed:      vec![Category::Coastline],
            num_threads:    None,
        }
    }
}

impl AtlasConfig {
    /// Reject settings no build could honour.
    pub fn validate(&self) -> AtlasResult<()> {
        if self.stitch.coastline_prefix.is_empty() {
            // An empty prefix would turn every named relation into coastline.
            return Err(AtlasError::Config("stitch.coastline_prefix must not be empty".into()));
        }
        if self.index.leaf_capacity == 0 {
            return Err(AtlasError::Config("index.leaf_capacity must be at least 1".into()));
        }
        if self.num_threads == Some(0) {
            return Err(AtlasError::Config("num_threads must be at least 1".into()));
        }
        Ok(())
    }

    pub fn is_indexed(&self, category: Category) -> bool {
        !self.unindexed.contains(&category)
    }
}
