//! Shared test utilities for the rasterize test suite.
//!
//! Synthetic rasters and on-disk fixtures: a diagonal gradient exercises
//! every channel with distinct values, which is what the filter and
//! conversion tests need to detect accidental channel swaps or identity
//! transforms.

use crate::raster::{Pixel, Raster};
use std::path::Path;

/// Diagonal RGB gradient with fully opaque alpha.
pub fn gradient(width: u32, height: u32) -> Raster {
    Raster::from_fn(width, height, |x, y| {
        let w = width.max(1) as f32;
        let h = height.max(1) as f32;
        Pixel::rgba(
            x as f32 / w,
            y as f32 / h,
            (x + y) as f32 / (w + h),
            1.0,
        )
    })
}

/// Write a gradient PNG fixture to disk for decode/batch tests.
pub fn write_gradient_png(path: &Path, width: u32, height: u32) {
    gradient(width, height).to_rgba_image().save(path).unwrap();
}

/// Assert two rasters match pixel-for-pixel within `eps` per channel.
pub fn assert_rasters_close(actual: &Raster, expected: &Raster, eps: f32) {
    assert_eq!(actual.dimensions(), expected.dimensions());
    for (i, (a, e)) in actual.pixels().zip(expected.pixels()).enumerate() {
        for (got, want) in [(a.r, e.r), (a.g, e.g), (a.b, e.b), (a.a, e.a)] {
            assert!(
                (got - want).abs() <= eps,
                "pixel {i}: got {got}, want {want} (±{eps})"
            );
        }
    }
}
