//! Shared pixel-sampling helpers for the convolving filters.
//!
//! Neighbor coordinates are clamped to the raster bounds (edge
//! replication), never wrapped around.

use crate::raster::{Pixel, Raster};

/// Sample (x, y) with coordinates clamped into [0, W−1] × [0, H−1].
pub fn sample_clamped(src: &Raster, x: i64, y: i64) -> Pixel {
    let cx = x.clamp(0, src.width() as i64 - 1) as u32;
    let cy = y.clamp(0, src.height() as i64 - 1) as u32;
    src.get(cx, cy)
}

/// Unweighted mean of the 3×3 neighborhood around (x, y), every channel
/// including alpha averaged independently.
pub fn neighborhood_mean(src: &Raster, x: u32, y: u32) -> Pixel {
    let mut sum = Pixel::default();
    for ky in -1..=1i64 {
        for kx in -1..=1i64 {
            let p = sample_clamped(src, x as i64 + kx, y as i64 + ky);
            sum.r += p.r;
            sum.g += p.g;
            sum.b += p.b;
            sum.a += p.a;
        }
    }
    Pixel {
        r: sum.r / 9.0,
        g: sum.g / 9.0,
        b: sum.b / 9.0,
        a: sum.a / 9.0,
    }
}

/// 3×3 convolution of the RGB channels around (x, y).
///
/// Alpha is deliberately *not* convolved: the returned alpha is the plain
/// mean of the nine sampled alphas. The RGB sums are returned unclamped.
pub fn convolve_rgb(src: &Raster, x: u32, y: u32, kernel: &[[f32; 3]; 3]) -> Pixel {
    let (mut r, mut g, mut b, mut a) = (0.0f32, 0.0f32, 0.0f32, 0.0f32);
    for ky in -1..=1i64 {
        for kx in -1..=1i64 {
            let p = sample_clamped(src, x as i64 + kx, y as i64 + ky);
            let weight = kernel[(ky + 1) as usize][(kx + 1) as usize];
            r += p.r * weight;
            g += p.g * weight;
            b += p.b * weight;
            a += p.a;
        }
    }
    Pixel {
        r,
        g,
        b,
        a: a / 9.0,
    }
}
