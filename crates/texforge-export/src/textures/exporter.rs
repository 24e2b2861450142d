//! Texture export orchestrator
//!
//! Drives one source asset through the conversion pipeline: check the
//! backing file, register the asset's output path, resolve semantic
//! references, and dispatch each reference to its conversion case. A
//! reference with no transforming semantic results in a single verbatim
//! copy of the source file, no matter how many such references exist.

use std::io::Write;

use image::RgbaImage;
use texforge_core::AssetNamespace;
use tracing::{debug, error, warn};

use crate::assets::SourceAsset;
use crate::destination::Destination;
use crate::registry::AssetPathRegistry;
use crate::semantics::{SemanticReference, SemanticResolver, TextureSemantic};
use crate::textures::{
    convert_diffuse, convert_metallic_gloss, convert_specular_gloss, encode_png, TextureError,
    TextureResult,
};

fn check_dimensions(image: &RgbaImage) -> TextureResult<()> {
    let (width, height) = image.dimensions();
    if width == 0 || height == 0 {
        return Err(TextureError::InvalidDimensions { width, height });
    }
    Ok(())
}

/// Terminal state of one asset's export
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExportOutcome {
    /// At least one reference was converted and encoded
    Transformed {
        /// Number of packed images written
        outputs: usize,
        /// Whether a verbatim copy was also made for non-transforming references
        copied: bool,
    },
    /// Only a verbatim copy was made
    PassThroughCopied,
    /// Nothing was written (missing file, declined streams, or failed references)
    Skipped,
}

/// Exports texture assets through a destination, recording assigned paths
/// in the session registry.
pub struct TextureExporter<'a> {
    registry: &'a mut AssetPathRegistry,
    resolver: &'a dyn SemanticResolver,
    destination: &'a dyn Destination,
}

impl<'a> TextureExporter<'a> {
    pub fn new(
        registry: &'a mut AssetPathRegistry,
        resolver: &'a dyn SemanticResolver,
        destination: &'a dyn Destination,
    ) -> Self {
        Self {
            registry,
            resolver,
            destination,
        }
    }

    /// Export one source asset.
    ///
    /// A missing backing file skips the whole asset. Each transforming
    /// reference runs its own conversion; a reference whose sources cannot
    /// be read is abandoned with a warning and the remaining references
    /// still run. No partial output is ever left behind: pixels are
    /// converted and encoded fully before the destination stream is opened.
    pub fn export_asset(&mut self, asset: &SourceAsset) -> texforge_core::Result<ExportOutcome> {
        let source_path = asset.container_path();
        if !source_path.exists() {
            let err = TextureError::SourceMissing(source_path.to_path_buf());
            error!(error = %err, "Skipping asset");
            return Ok(ExportOutcome::Skipped);
        }

        // Record the base texture's path first so dependent exporters can
        // reference it regardless of conversion results.
        self.registry.register(
            AssetNamespace::Texture,
            asset.key.clone(),
            asset.output_name.clone(),
        );

        let references = self.resolver.resolve(asset);

        // A texture nothing references still ships verbatim.
        if references.is_empty() {
            self.destination
                .copy_file(source_path, &asset.output_name)?;
            return Ok(ExportOutcome::PassThroughCopied);
        }

        let mut outputs = 0;
        let mut copied = false;
        for reference in &references {
            match reference.semantic {
                TextureSemantic::MetallicGlossiness
                | TextureSemantic::SpecularGlossiness
                | TextureSemantic::Diffuse => match self.transform(asset, reference) {
                    Ok(written) => outputs += written,
                    Err(err) => {
                        warn!(
                            asset = %asset.key,
                            semantic = ?reference.semantic,
                            error = %err,
                            "Conversion abandoned for reference"
                        );
                    }
                },
                TextureSemantic::Other => {
                    if !copied {
                        self.destination
                            .copy_file(source_path, &asset.output_name)?;
                        copied = true;
                    }
                }
            }
        }

        Ok(match (outputs, copied) {
            (0, false) => ExportOutcome::Skipped,
            (0, true) => ExportOutcome::PassThroughCopied,
            (outputs, copied) => ExportOutcome::Transformed { outputs, copied },
        })
    }

    /// Run one transforming reference; returns the number of outputs written
    /// (0 when the destination declines the stream).
    fn transform(
        &self,
        asset: &SourceAsset,
        reference: &SemanticReference,
    ) -> TextureResult<usize> {
        let base = asset.image.decode()?;
        check_dimensions(&base)?;
        let auxiliary = match &reference.smoothness_source {
            Some(source) => {
                let decoded = source.decode()?;
                check_dimensions(&decoded)?;
                Some(decoded)
            }
            None => None,
        };

        let packed = match reference.semantic {
            TextureSemantic::MetallicGlossiness => {
                // the metallic map doubles as smoothness source when no
                // auxiliary is given
                let smoothness: &RgbaImage = auxiliary.as_deref().unwrap_or(&base);
                convert_metallic_gloss(&base, smoothness)
            }
            TextureSemantic::SpecularGlossiness => convert_specular_gloss(
                &base,
                auxiliary.as_deref(),
                reference.smoothness_channel,
            ),
            TextureSemantic::Diffuse => convert_diffuse(&base, auxiliary.as_deref()),
            TextureSemantic::Other => return Ok(0),
        };

        let name = texture_output_name(&asset.output_name, reference.semantic);
        self.write_encoded(&packed, &name)
    }

    fn write_encoded(&self, image: &RgbaImage, name: &str) -> TextureResult<usize> {
        let bytes = encode_png(image)?;
        let Some(mut stream) = self.destination.create(name)? else {
            debug!(output = %name, "Destination declined output, skipping");
            return Ok(0);
        };
        stream.write_all(&bytes)?;
        stream.flush()?;
        Ok(1)
    }
}

/// Destination file name for a converted texture.
///
/// Replaces everything after the last '.' occurring after the last '/'
/// with the semantic's suffix; when the name has no extension the suffix
/// is appended. Non-transforming semantics keep the base name.
pub fn texture_output_name(base_name: &str, semantic: TextureSemantic) -> String {
    match semantic {
        TextureSemantic::MetallicGlossiness | TextureSemantic::SpecularGlossiness => {
            replace_extension(base_name, ".MetallicRoughness.png")
        }
        TextureSemantic::Diffuse => replace_extension(base_name, ".BaseColor.png"),
        TextureSemantic::Other => base_name.to_string(),
    }
}

fn replace_extension(name: &str, new_ext: &str) -> String {
    let last_dot = name.rfind('.');
    let last_slash = name.rfind('/');
    match (last_dot, last_slash) {
        (Some(dot), Some(slash)) if dot > slash => format!("{}{}", &name[..dot], new_ext),
        (Some(dot), None) => format!("{}{}", &name[..dot], new_ext),
        _ => format!("{name}{new_ext}"),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_output_name_replaces_extension() {
        assert_eq!(
            texture_output_name("Foo/Bar.tga", TextureSemantic::MetallicGlossiness),
            "Foo/Bar.MetallicRoughness.png"
        );
        assert_eq!(
            texture_output_name("Foo/Bar.tga", TextureSemantic::SpecularGlossiness),
            "Foo/Bar.MetallicRoughness.png"
        );
        assert_eq!(
            texture_output_name("Foo/Bar.tga", TextureSemantic::Diffuse),
            "Foo/Bar.BaseColor.png"
        );
    }

    #[test]
    fn test_output_name_appends_when_no_extension() {
        assert_eq!(
            texture_output_name("Foo/Bar", TextureSemantic::MetallicGlossiness),
            "Foo/Bar.MetallicRoughness.png"
        );
    }

    #[test]
    fn test_output_name_ignores_dot_in_directory() {
        assert_eq!(
            texture_output_name("Foo.v2/Bar", TextureSemantic::MetallicGlossiness),
            "Foo.v2/Bar.MetallicRoughness.png"
        );
    }

    #[test]
    fn test_output_name_without_directory() {
        assert_eq!(
            texture_output_name("Bar.png", TextureSemantic::Diffuse),
            "Bar.BaseColor.png"
        );
    }

    #[test]
    fn test_output_name_passthrough_keeps_base() {
        assert_eq!(
            texture_output_name("Foo/Bar.tga", TextureSemantic::Other),
            "Foo/Bar.tga"
        );
    }
}
