//! The per-filter pixel transforms.
//!
//! Every function maps a source raster to a new raster of identical
//! dimensions; inputs are never mutated. Point transforms go through
//! [`map_pixels`]; the convolving filters (blur, sharpen) use the clamped
//! sampling helpers from [`super::sampling`].

use super::sampling::{convolve_rgb, neighborhood_mean};
use crate::raster::{Pixel, Raster};

/// Flat brightness shift added to each color channel.
const BRIGHTNESS_SHIFT: f32 = 0.3;
/// Contrast scaling about middle gray.
const CONTRAST_FACTOR: f32 = 1.5;
/// Saturation scaling about per-pixel luminance.
const SATURATE_FACTOR: f32 = 1.5;

/// Center-emphasis sharpening kernel.
const SHARPEN_KERNEL: [[f32; 3]; 3] = [[0.0, -0.5, 0.0], [-0.5, 3.0, -0.5], [0.0, -0.5, 0.0]];

/// Apply a point transform to every pixel.
fn map_pixels(src: &Raster, f: impl Fn(Pixel) -> Pixel) -> Raster {
    Raster::from_fn(src.width(), src.height(), |x, y| f(src.get(x, y)))
}

/// Replace RGB with the Rec. 709 luminance, alpha preserved.
pub fn black_and_white(src: &Raster) -> Raster {
    map_pixels(src, |p| {
        let gray = p.luma();
        Pixel::rgba(gray, gray, gray, p.a)
    })
}

/// Warm brownish remap of the RGB channels, alpha preserved.
///
/// The weighted sums can exceed 1.0 for bright inputs, so each channel is
/// capped at 1.0; inputs are non-negative, so no lower clamp is needed.
pub fn sepia(src: &Raster) -> Raster {
    map_pixels(src, |p| {
        Pixel::rgba(
            (p.r * 0.393 + p.g * 0.769 + p.b * 0.189).min(1.0),
            (p.r * 0.349 + p.g * 0.686 + p.b * 0.168).min(1.0),
            (p.r * 0.272 + p.g * 0.534 + p.b * 0.131).min(1.0),
            p.a,
        )
    })
}

/// 3×3 box average with edge replication, alpha averaged like the color
/// channels.
pub fn blur(src: &Raster) -> Raster {
    Raster::from_fn(src.width(), src.height(), |x, y| {
        neighborhood_mean(src, x, y)
    })
}

/// 3×3 sharpening convolution on RGB, clamped to [0, 1].
///
/// Alpha is the unweighted mean of the nine sampled alphas rather than a
/// convolution with the kernel weights. That asymmetry matches the
/// shipped behavior and is kept as-is.
pub fn sharpen(src: &Raster) -> Raster {
    Raster::from_fn(src.width(), src.height(), |x, y| {
        let p = convolve_rgb(src, x, y, &SHARPEN_KERNEL);
        Pixel::rgba(
            p.r.clamp(0.0, 1.0),
            p.g.clamp(0.0, 1.0),
            p.b.clamp(0.0, 1.0),
            p.a.clamp(0.0, 1.0),
        )
    })
}

/// Negate each color channel, alpha preserved.
pub fn color_invert(src: &Raster) -> Raster {
    map_pixels(src, |p| Pixel::rgba(1.0 - p.r, 1.0 - p.g, 1.0 - p.b, p.a))
}

/// Mirror the raster along the horizontal axis.
pub fn flip_vertical(src: &Raster) -> Raster {
    Raster::from_fn(src.width(), src.height(), |x, y| {
        src.get(x, src.height() - 1 - y)
    })
}

/// Scale each channel's distance from middle gray, clamped to [0, 1].
pub fn contrast(src: &Raster) -> Raster {
    map_pixels(src, |p| {
        let adjust = |v: f32| ((v - 0.5) * CONTRAST_FACTOR + 0.5).clamp(0.0, 1.0);
        Pixel::rgba(adjust(p.r), adjust(p.g), adjust(p.b), p.a)
    })
}

/// Shift each color channel up by a flat amount, capped at 1.0.
pub fn brightness(src: &Raster) -> Raster {
    map_pixels(src, |p| {
        Pixel::rgba(
            (p.r + BRIGHTNESS_SHIFT).min(1.0),
            (p.g + BRIGHTNESS_SHIFT).min(1.0),
            (p.b + BRIGHTNESS_SHIFT).min(1.0),
            p.a,
        )
    })
}

/// Scale each channel's distance from its pixel's luminance, clamped.
pub fn saturate(src: &Raster) -> Raster {
    map_pixels(src, |p| {
        let luma = p.luma();
        let adjust = |v: f32| (luma + (v - luma) * SATURATE_FACTOR).clamp(0.0, 1.0);
        Pixel::rgba(adjust(p.r), adjust(p.g), adjust(p.b), p.a)
    })
}
