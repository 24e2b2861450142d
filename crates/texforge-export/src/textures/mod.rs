//! Texture conversion engine
//!
//! Repacks PBR workflow textures (metallic-glossiness, specular-glossiness,
//! diffuse) into the engine's metallic-roughness convention, with
//! nearest-neighbor resampling across mismatched source resolutions.

mod exporter;
mod repack;
mod sampler;

pub use exporter::{texture_output_name, ExportOutcome, TextureExporter};
pub use repack::{convert_diffuse, convert_metallic_gloss, convert_specular_gloss, encode_png};
pub use sampler::{luminance, sample};

use std::path::PathBuf;

use thiserror::Error;

/// Texture conversion errors
#[derive(Error, Debug)]
pub enum TextureError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Image error: {0}")]
    Image(#[from] image::ImageError),

    #[error("Source file missing: {0}")]
    SourceMissing(PathBuf),

    #[error("Unreadable source image {path}: {source}")]
    UnreadableSource {
        path: PathBuf,
        source: image::ImageError,
    },

    #[error("Invalid dimensions: {width}x{height}")]
    InvalidDimensions { width: u32, height: u32 },
}

pub type TextureResult<T> = Result<T, TextureError>;

impl From<TextureError> for texforge_core::Error {
    fn from(err: TextureError) -> Self {
        match err {
            TextureError::Io(source) => texforge_core::Error::Io(source),
            TextureError::SourceMissing(path) => texforge_core::Error::FileNotFound(path),
            TextureError::UnreadableSource { path, .. } => {
                texforge_core::Error::UnreadableSource { path }
            }
            TextureError::Image(source) => {
                texforge_core::Error::export_failed(source.to_string())
            }
            TextureError::InvalidDimensions { width, height } => {
                texforge_core::Error::invalid_data(format!("invalid dimensions {width}x{height}"))
            }
        }
    }
}
