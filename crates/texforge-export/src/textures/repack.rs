//! Channel repacking conversions
//!
//! Each conversion allocates a fresh output buffer sized to the largest of
//! its inputs; mismatched sources are resampled onto that grid texel by
//! texel. Per-pixel math runs on normalized floats and is quantized back to
//! 8-bit with clamping, matching the write-back behavior of the authoring
//! tools these maps come from.

use image::codecs::png::PngEncoder;
use image::{ExtendedColorType, ImageEncoder, Rgba, RgbaImage};
use texforge_core::Color;

use crate::semantics::SmoothnessChannel;
use crate::textures::{luminance, sample, TextureResult};

/// Assemble an output texel from normalized float channels, quantizing
/// with clamping on write-back
fn pack(r: f32, g: f32, b: f32, a: f32) -> Rgba<u8> {
    let color = Color::from_float(r, g, b, a);
    Rgba([color.r, color.g, color.b, color.a])
}

fn output_size(inputs: &[&RgbaImage]) -> (u32, u32) {
    let width = inputs.iter().map(|i| i.width()).max().unwrap_or(1);
    let height = inputs.iter().map(|i| i.height()).max().unwrap_or(1);
    (width, height)
}

/// Lighten a diffuse map by the specular contribution before it is
/// re-encoded as an engine-native base-color map.
///
/// Output RGB is the channel-wise sum of the diffuse and smoothness-source
/// texels (saturating at white); alpha is taken from the diffuse unchanged.
/// An absent smoothness source contributes opaque black, leaving the
/// diffuse untouched.
pub fn convert_diffuse(diffuse: &RgbaImage, smoothness_source: Option<&RgbaImage>) -> RgbaImage {
    let fallback;
    let specular = match smoothness_source {
        Some(image) => image,
        None => {
            fallback = RgbaImage::from_pixel(1, 1, Rgba([0, 0, 0, 255]));
            &fallback
        }
    };

    let (width, height) = output_size(&[diffuse, specular]);
    RgbaImage::from_fn(width, height, |x, y| {
        let s = sample(specular, x, y, width, height);
        let d = sample(diffuse, x, y, width, height);
        pack(
            d.0[0] as f32 / 255.0 + s.0[0] as f32 / 255.0,
            d.0[1] as f32 / 255.0 + s.0[1] as f32 / 255.0,
            d.0[2] as f32 / 255.0 + s.0[2] as f32 / 255.0,
            d.0[3] as f32 / 255.0,
        )
    })
}

/// Repack a metallic-glossiness map into metallic-roughness.
///
/// Red receives roughness (inverted glossiness from the smoothness source's
/// alpha), green receives metalness (the metallic map's red channel), blue
/// is zeroed and alpha forced opaque. The smoothness source may be the
/// metallic map itself.
pub fn convert_metallic_gloss(metallic: &RgbaImage, smoothness: &RgbaImage) -> RgbaImage {
    let (width, height) = output_size(&[metallic, smoothness]);
    RgbaImage::from_fn(width, height, |x, y| {
        let roughness = 1.0 - sample(smoothness, x, y, width, height).0[3] as f32 / 255.0;
        let metalness = sample(metallic, x, y, width, height).0[0] as f32 / 255.0;
        pack(roughness, metalness, 0.0, 1.0)
    })
}

/// Repack a specular-glossiness map into metallic-roughness.
///
/// Roughness is inverted glossiness taken from the alpha of either the
/// specular-gloss map or the diffuse map, per the channel selector.
/// Metalness is derived from luminances as `s / (d + s)`; a texel where
/// both luminances are zero has no specular evidence and is treated as
/// dielectric (metalness 0) instead of propagating the undefined division.
/// A missing diffuse map contributes opaque black.
pub fn convert_specular_gloss(
    specular: &RgbaImage,
    diffuse: Option<&RgbaImage>,
    channel: SmoothnessChannel,
) -> RgbaImage {
    let fallback;
    let diffuse = match diffuse {
        Some(image) => image,
        None => {
            fallback = RgbaImage::from_pixel(1, 1, Rgba([0, 0, 0, 255]));
            &fallback
        }
    };
    let smoothness = match channel {
        SmoothnessChannel::MetallicAlpha => specular,
        SmoothnessChannel::AlbedoAlpha => diffuse,
    };

    let (width, height) = output_size(&[specular, diffuse, smoothness]);
    RgbaImage::from_fn(width, height, |x, y| {
        let roughness = 1.0 - sample(smoothness, x, y, width, height).0[3] as f32 / 255.0;
        let d = luminance(sample(diffuse, x, y, width, height));
        let s = luminance(sample(specular, x, y, width, height));
        let metalness = if d + s > 0.0 { s / (d + s) } else { 0.0 };
        pack(roughness, metalness, 0.0, 1.0)
    })
}

/// Encode a pixel buffer as lossless PNG, fully in memory.
///
/// Encoding completes before any destination byte is written, so a failed
/// conversion never leaves a partial file behind.
pub fn encode_png(image: &RgbaImage) -> TextureResult<Vec<u8>> {
    let mut bytes = Vec::new();
    PngEncoder::new(&mut bytes).write_image(
        image.as_raw(),
        image.width(),
        image.height(),
        ExtendedColorType::Rgba8,
    )?;
    Ok(bytes)
}
