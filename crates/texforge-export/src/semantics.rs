//! Texture semantics and source images
//!
//! Semantic references describe the physically-based-rendering role a
//! texture plays for some material, and which auxiliary texture/channel is
//! needed to complete a workflow conversion. They are produced by an
//! external resolver; the engine only consumes them.

use std::borrow::Cow;
use std::path::PathBuf;

use image::RgbaImage;
use serde::{Deserialize, Serialize};

use crate::assets::SourceAsset;
use crate::textures::{TextureError, TextureResult};

/// PBR role a texture plays for a referencing material
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TextureSemantic {
    /// Metalness in red, glossiness in alpha
    MetallicGlossiness,
    /// Specular color map with glossiness in alpha
    SpecularGlossiness,
    /// Diffuse/albedo base color
    Diffuse,
    /// No transforming semantic; also the fallback for tags the engine
    /// does not implement
    #[serde(other)]
    Other,
}

impl TextureSemantic {
    /// Whether this semantic requires a channel-repacking conversion
    pub fn is_transforming(&self) -> bool {
        !matches!(self, TextureSemantic::Other)
    }
}

/// Which texture's alpha channel holds the smoothness value
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SmoothnessChannel {
    /// Alpha of the metallic or specular-gloss map itself
    #[default]
    MetallicAlpha,
    /// Alpha of the albedo/diffuse map
    AlbedoAlpha,
}

/// A source image that is either already decoded or decodable from a
/// backing file.
///
/// Making pixels accessible is a fallible precondition of conversion, not
/// a mutation of any import state: decoding happens at most once per
/// conversion call, and a source that cannot be decoded fails the
/// conversion with [`TextureError::UnreadableSource`].
#[derive(Debug, Clone)]
pub enum TextureSource {
    /// Pixels already in memory
    Decoded(RgbaImage),
    /// Pixels decodable from a file on disk
    File(PathBuf),
}

impl TextureSource {
    /// Decode the source to an RGBA8 buffer
    pub fn decode(&self) -> TextureResult<Cow<'_, RgbaImage>> {
        match self {
            TextureSource::Decoded(image) => Ok(Cow::Borrowed(image)),
            TextureSource::File(path) => {
                let image = image::open(path).map_err(|source| TextureError::UnreadableSource {
                    path: path.clone(),
                    source,
                })?;
                Ok(Cow::Owned(image.to_rgba8()))
            }
        }
    }
}

/// One reason a base texture participates in conversion
#[derive(Debug, Clone)]
pub struct SemanticReference {
    /// The role the base texture plays
    pub semantic: TextureSemantic,
    /// Auxiliary texture completing the conversion (e.g. the smoothness or
    /// diffuse counterpart); the base texture itself when absent
    pub smoothness_source: Option<TextureSource>,
    /// Which texture's alpha carries smoothness
    pub smoothness_channel: SmoothnessChannel,
}

impl SemanticReference {
    pub fn new(semantic: TextureSemantic) -> Self {
        Self {
            semantic,
            smoothness_source: None,
            smoothness_channel: SmoothnessChannel::default(),
        }
    }

    pub fn with_smoothness_source(mut self, source: TextureSource) -> Self {
        self.smoothness_source = Some(source);
        self
    }

    pub fn with_smoothness_channel(mut self, channel: SmoothnessChannel) -> Self {
        self.smoothness_channel = channel;
        self
    }
}

/// External collaborator that knows which semantic roles a texture plays.
///
/// The engine never recomputes material-to-texture semantics itself.
pub trait SemanticResolver {
    /// Resolve all semantic references for the given asset
    fn resolve(&self, asset: &SourceAsset) -> Vec<SemanticReference>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_unknown_semantic_tag_falls_back_to_other() {
        let semantic: TextureSemantic = serde_json::from_str("\"normal_map\"").unwrap();
        assert_eq!(semantic, TextureSemantic::Other);
        assert!(!semantic.is_transforming());
    }

    #[test]
    fn test_known_semantic_tags() {
        let semantic: TextureSemantic = serde_json::from_str("\"metallic_glossiness\"").unwrap();
        assert_eq!(semantic, TextureSemantic::MetallicGlossiness);
        assert!(semantic.is_transforming());
    }

    #[test]
    fn test_decode_missing_file_is_unreadable() {
        let source = TextureSource::File(PathBuf::from("/nonexistent/texture.png"));
        let err = source.decode().unwrap_err();
        assert!(matches!(err, TextureError::UnreadableSource { .. }));
    }

    #[test]
    fn test_decode_borrows_decoded_pixels() {
        let image = RgbaImage::from_pixel(2, 2, image::Rgba([10, 20, 30, 40]));
        let source = TextureSource::Decoded(image);
        let decoded = source.decode().unwrap();
        assert_eq!(decoded.get_pixel(1, 1).0, [10, 20, 30, 40]);
    }
}
