//! Export session manifests
//!
//! A manifest is the externally authored description of an export session:
//! the asset list plus the semantic references each texture participates
//! in. The engine never derives semantics itself; the manifest supplies
//! them, and [`ManifestResolver`] replays them through the
//! [`SemanticResolver`] interface.

use std::collections::HashMap;
use std::fs::File;
use std::io::BufReader;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use texforge_core::{AssetCategory, AssetKey};
use thiserror::Error;

use crate::assets::SourceAsset;
use crate::semantics::{
    SemanticReference, SemanticResolver, SmoothnessChannel, TextureSemantic, TextureSource,
};

/// Manifest loading errors
#[derive(Error, Debug)]
pub enum ManifestError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Manifest parse error: {0}")]
    Parse(#[from] serde_json::Error),
}

pub type ManifestResult<T> = Result<T, ManifestError>;

/// One asset entry as authored in the manifest
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ManifestAsset {
    /// Path of the container file on disk
    pub container: String,
    /// In-container asset name
    pub name: String,
    pub category: AssetCategory,
    /// Declared relative output name
    pub output_name: String,
    /// Semantic references for texture assets
    #[serde(default)]
    pub references: Vec<ManifestReference>,
}

/// One semantic reference as authored in the manifest
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ManifestReference {
    pub semantic: TextureSemantic,
    /// Path of the auxiliary texture completing the conversion
    #[serde(default)]
    pub smoothness_source: Option<PathBuf>,
    #[serde(default)]
    pub smoothness_channel: SmoothnessChannel,
}

/// A full export session description
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Manifest {
    pub assets: Vec<ManifestAsset>,
}

impl Manifest {
    /// Load a manifest from a JSON file
    pub fn load(path: impl AsRef<Path>) -> ManifestResult<Self> {
        let file = File::open(path.as_ref())?;
        Ok(serde_json::from_reader(BufReader::new(file))?)
    }

    /// Parse a manifest from a JSON string
    pub fn from_json(json: &str) -> ManifestResult<Self> {
        Ok(serde_json::from_str(json)?)
    }

    /// Build the source-asset list this manifest describes
    pub fn source_assets(&self) -> Vec<SourceAsset> {
        self.assets
            .iter()
            .map(|asset| {
                SourceAsset::new(
                    AssetKey::new(&asset.container, &asset.name),
                    asset.category,
                    asset.output_name.clone(),
                    TextureSource::File(PathBuf::from(&asset.container)),
                )
            })
            .collect()
    }

    /// Build a resolver replaying the manifest's authored references
    pub fn resolver(&self) -> ManifestResolver {
        let mut references = HashMap::new();
        for asset in &self.assets {
            let resolved: Vec<SemanticReference> = asset
                .references
                .iter()
                .map(|reference| SemanticReference {
                    semantic: reference.semantic,
                    smoothness_source: reference
                        .smoothness_source
                        .as_ref()
                        .map(|path| TextureSource::File(path.clone())),
                    smoothness_channel: reference.smoothness_channel,
                })
                .collect();
            references.insert(AssetKey::new(&asset.container, &asset.name), resolved);
        }
        ManifestResolver { references }
    }
}

/// Semantic resolver backed by a manifest's authored references
pub struct ManifestResolver {
    references: HashMap<AssetKey, Vec<SemanticReference>>,
}

impl SemanticResolver for ManifestResolver {
    fn resolve(&self, asset: &SourceAsset) -> Vec<SemanticReference> {
        self.references.get(&asset.key).cloned().unwrap_or_default()
    }
}
