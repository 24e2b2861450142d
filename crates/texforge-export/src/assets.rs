//! Source asset descriptors
//!
//! A [`SourceAsset`] is the input unit of an export session: where the asset
//! lives, what it is, where its output goes, and how to get at its pixels.

use std::path::Path;

use texforge_core::{AssetCategory, AssetKey};

use crate::semantics::TextureSource;

/// Descriptor for one asset entering the export pipeline
#[derive(Debug, Clone)]
pub struct SourceAsset {
    /// Identity used for registry deduplication
    pub key: AssetKey,
    /// Registry namespace this asset belongs to
    pub category: AssetCategory,
    /// Declared logical output name (relative, '/'-separated)
    pub output_name: String,
    /// The asset's image payload, decoded or decodable
    pub image: TextureSource,
}

impl SourceAsset {
    pub fn new(
        key: AssetKey,
        category: AssetCategory,
        output_name: impl Into<String>,
        image: TextureSource,
    ) -> Self {
        Self {
            key,
            category,
            output_name: output_name.into(),
            image,
        }
    }

    /// Path of the backing container file on disk
    pub fn container_path(&self) -> &Path {
        Path::new(&self.key.container)
    }
}
