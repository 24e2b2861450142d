//! Pixel sampling and luminance
//!
//! Nearest-neighbor lookup by integer scaling, plus the perceptual
//! luminance weighting used to derive metalness from color maps.

use image::{Rgba, RgbaImage};

/// Resolve the source texel for destination coordinate (x, y) in a
/// dst_w × dst_h output grid.
///
/// Maps via truncating integer scaling: `src_x = x * src_w / dst_w`,
/// `src_y = y * src_h / dst_h`. Degenerates to an identity lookup when
/// source and destination dimensions match. Callers guarantee
/// `x < dst_w`, `y < dst_h` and nonzero dimensions on both sides, which
/// keeps the computed index in range.
pub fn sample(src: &RgbaImage, x: u32, y: u32, dst_w: u32, dst_h: u32) -> Rgba<u8> {
    let src_x = (x as u64 * src.width() as u64 / dst_w as u64) as u32;
    let src_y = (y as u64 * src.height() as u64 / dst_h as u64) as u32;
    *src.get_pixel(src_x, src_y)
}

/// Perceptually weighted brightness of an RGBA texel, in [0, 1]
pub fn luminance(color: Rgba<u8>) -> f32 {
    let r = color.0[0] as f32 / 255.0;
    let g = color.0[1] as f32 / 255.0;
    let b = color.0[2] as f32 / 255.0;
    0.2126 * r + 0.7152 * g + 0.0722 * b
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    fn make_gradient(width: u32, height: u32) -> RgbaImage {
        RgbaImage::from_fn(width, height, |x, y| {
            Rgba([(x % 256) as u8, (y % 256) as u8, 0, 255])
        })
    }

    #[test]
    fn test_sample_identity_when_dimensions_match() {
        let src = make_gradient(4, 4);
        for y in 0..4 {
            for x in 0..4 {
                assert_eq!(sample(&src, x, y, 4, 4), *src.get_pixel(x, y));
            }
        }
    }

    #[test]
    fn test_sample_upscale_repeats_texels() {
        let src = make_gradient(2, 2);
        // 2x2 -> 4x4: each source texel covers a 2x2 block
        assert_eq!(sample(&src, 0, 0, 4, 4), *src.get_pixel(0, 0));
        assert_eq!(sample(&src, 1, 1, 4, 4), *src.get_pixel(0, 0));
        assert_eq!(sample(&src, 2, 0, 4, 4), *src.get_pixel(1, 0));
        assert_eq!(sample(&src, 3, 3, 4, 4), *src.get_pixel(1, 1));
    }

    #[test]
    fn test_sample_downscale_truncates() {
        let src = make_gradient(4, 4);
        // 4x4 -> 2x2: picks texels 0 and 2, not interpolated
        assert_eq!(sample(&src, 0, 0, 2, 2), *src.get_pixel(0, 0));
        assert_eq!(sample(&src, 1, 0, 2, 2), *src.get_pixel(2, 0));
        assert_eq!(sample(&src, 1, 1, 2, 2), *src.get_pixel(2, 2));
    }

    #[test]
    fn test_luminance_black_and_white() {
        assert!(luminance(Rgba([0, 0, 0, 255])).abs() < 1e-6);
        assert!((luminance(Rgba([255, 255, 255, 255])) - 1.0).abs() < 1e-6);
    }

    #[test]
    fn test_luminance_ignores_alpha() {
        let opaque = luminance(Rgba([80, 120, 200, 255]));
        let transparent = luminance(Rgba([80, 120, 200, 0]));
        assert_eq!(opaque, transparent);
    }

    #[test]
    fn test_luminance_weights() {
        let green = luminance(Rgba([0, 255, 0, 255]));
        assert!((green - 0.7152).abs() < 1e-6);
        let red = luminance(Rgba([255, 0, 0, 255]));
        assert!((red - 0.2126).abs() < 1e-6);
    }

    proptest! {
        #[test]
        fn prop_sample_index_always_in_range(
            src_w in 1u32..64,
            src_h in 1u32..64,
            dst_w in 1u32..64,
            dst_h in 1u32..64,
        ) {
            let src = make_gradient(src_w, src_h);
            // every destination coordinate must hit a valid source texel
            for y in 0..dst_h {
                for x in 0..dst_w {
                    let src_x = (x as u64 * src_w as u64 / dst_w as u64) as u32;
                    let src_y = (y as u64 * src_h as u64 / dst_h as u64) as u32;
                    prop_assert!(src_x < src_w && src_y < src_h);
                    sample(&src, x, y, dst_w, dst_h);
                }
            }
        }

        #[test]
        fn prop_luminance_monotonic_per_channel(v in 0u8..255) {
            prop_assert!(luminance(Rgba([v + 1, 0, 0, 255])) > luminance(Rgba([v, 0, 0, 255])));
            prop_assert!(luminance(Rgba([0, v + 1, 0, 255])) > luminance(Rgba([0, v, 0, 255])));
            prop_assert!(luminance(Rgba([0, 0, v + 1, 255])) > luminance(Rgba([0, 0, v, 255])));
        }
    }
}
