//! Texforge Export Pipeline
//!
//! Converts per-material texture sets authored for one PBR shading workflow
//! (metallic-glossiness or specular-glossiness) into the packed
//! metallic-roughness format expected by the target engine:
//! - channel repacking with resolution-mismatch resampling
//! - deduplicated asset path registry (mesh / material / texture)
//! - manifest-driven export sessions

pub mod assets;
pub mod destination;
pub mod manifest;
pub mod registry;
pub mod semantics;
pub mod textures;

pub use assets::SourceAsset;
pub use destination::{Destination, FsDestination, MemoryDestination};
pub use manifest::{Manifest, ManifestResolver};
pub use registry::AssetPathRegistry;
pub use semantics::{SemanticReference, SemanticResolver, SmoothnessChannel, TextureSemantic, TextureSource};
pub use textures::{ExportOutcome, TextureExporter};
