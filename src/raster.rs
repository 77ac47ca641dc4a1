//! Immutable raster buffer with normalized-float RGBA pixels.
//!
//! A [`Raster`] is a row-major grid of [`Pixel`]s with every channel in
//! [0, 1]. It is never mutated after construction: filters and the
//! conversion service read one raster and produce another. That is what
//! makes concurrent filter/convert calls on different rasters safe with
//! no synchronization.

use image::RgbaImage;

/// One RGBA pixel, each channel normalized to [0, 1].
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Pixel {
    pub r: f32,
    pub g: f32,
    pub b: f32,
    pub a: f32,
}

impl Pixel {
    /// Opaque pixel from RGB channels.
    pub fn rgb(r: f32, g: f32, b: f32) -> Self {
        Self { r, g, b, a: 1.0 }
    }

    pub fn rgba(r: f32, g: f32, b: f32, a: f32) -> Self {
        Self { r, g, b, a }
    }

    /// Rec. 709 relative luminance of the RGB channels.
    pub fn luma(self) -> f32 {
        0.2126 * self.r + 0.7152 * self.g + 0.0722 * self.b
    }
}

/// A W×H grid of normalized RGBA pixels, row-major.
///
/// Zero-area rasters (width or height 0) are valid values; filters map
/// them to equally degenerate outputs without error.
#[derive(Debug, Clone, PartialEq)]
pub struct Raster {
    width: u32,
    height: u32,
    data: Vec<Pixel>,
}

impl Raster {
    /// Build a raster by evaluating `f` at every (x, y) coordinate.
    pub fn from_fn(width: u32, height: u32, mut f: impl FnMut(u32, u32) -> Pixel) -> Self {
        let mut data = Vec::with_capacity(width as usize * height as usize);
        for y in 0..height {
            for x in 0..width {
                data.push(f(x, y));
            }
        }
        Self {
            width,
            height,
            data,
        }
    }

    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn height(&self) -> u32 {
        self.height
    }

    pub fn dimensions(&self) -> (u32, u32) {
        (self.width, self.height)
    }

    /// Pixel at (x, y). Panics when out of bounds.
    pub fn get(&self, x: u32, y: u32) -> Pixel {
        debug_assert!(x < self.width && y < self.height);
        self.data[y as usize * self.width as usize + x as usize]
    }

    /// All pixels in row-major order.
    pub fn pixels(&self) -> impl Iterator<Item = Pixel> + '_ {
        self.data.iter().copied()
    }

    /// Convert an 8-bit RGBA image into normalized floats.
    pub fn from_rgba_image(img: &RgbaImage) -> Self {
        Self::from_fn(img.width(), img.height(), |x, y| {
            let p = img.get_pixel(x, y).0;
            Pixel {
                r: p[0] as f32 / 255.0,
                g: p[1] as f32 / 255.0,
                b: p[2] as f32 / 255.0,
                a: p[3] as f32 / 255.0,
            }
        })
    }

    /// Project the raster back to 8-bit RGBA for encoding.
    pub fn to_rgba_image(&self) -> RgbaImage {
        RgbaImage::from_fn(self.width, self.height, |x, y| {
            let p = self.get(x, y);
            image::Rgba([
                channel_to_u8(p.r),
                channel_to_u8(p.g),
                channel_to_u8(p.b),
                channel_to_u8(p.a),
            ])
        })
    }
}

/// Quantize one normalized channel to a byte.
pub(crate) fn channel_to_u8(v: f32) -> u8 {
    (v.clamp(0.0, 1.0) * 255.0).round() as u8
}
