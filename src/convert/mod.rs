//! Format conversion with a PNG fallback policy.
//!
//! [`convert`] encodes a raster into one of the supported formats and
//! writes exactly one file. Every format is encoded to memory first and
//! written in a single step, so a failed encode never leaves a truncated
//! file at the requested path. When a format-specific encoder cannot
//! handle the raster, the service writes a PNG at the same base name
//! instead and reports the substitution through [`Converted::fell_back`]
//! plus a stderr notice — only a failure of that PNG fallback itself is
//! an error.

mod pdf;
mod svg;

use crate::raster::Raster;
use serde::Serialize;
use std::io::Cursor;
use std::path::{Path, PathBuf};
use thiserror::Error;

#[derive(Error, Debug)]
pub enum ConvertError {
    /// The requested format token is outside the supported set. Raised
    /// before any filesystem I/O.
    #[error("Unsupported format: {0}")]
    UnsupportedFormat(String),
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    /// Even the PNG fallback could not be produced. Fatal.
    #[error("PNG fallback failed: {0}")]
    FallbackFailed(String),
}

/// A persisted output format.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    Png,
    Jpg,
    Gif,
    Tiff,
    Pdf,
    Svg,
    Heif,
}

/// Every supported format, in stable listing order.
pub const ALL_FORMATS: [OutputFormat; 7] = [
    OutputFormat::Png,
    OutputFormat::Jpg,
    OutputFormat::Gif,
    OutputFormat::Tiff,
    OutputFormat::Pdf,
    OutputFormat::Svg,
    OutputFormat::Heif,
];

impl OutputFormat {
    /// Display token, as shown by `list_formats`.
    pub fn token(self) -> &'static str {
        match self {
            OutputFormat::Png => "PNG",
            OutputFormat::Jpg => "JPG",
            OutputFormat::Gif => "GIF",
            OutputFormat::Tiff => "TIFF",
            OutputFormat::Pdf => "PDF",
            OutputFormat::Svg => "SVG",
            OutputFormat::Heif => "HEIF",
        }
    }

    /// Canonical file extension.
    pub fn extension(self) -> &'static str {
        match self {
            OutputFormat::Png => "png",
            OutputFormat::Jpg => "jpg",
            OutputFormat::Gif => "gif",
            OutputFormat::Tiff => "tiff",
            OutputFormat::Pdf => "pdf",
            OutputFormat::Svg => "svg",
            OutputFormat::Heif => "heif",
        }
    }

    /// Parse a format token, case-insensitively.
    pub fn parse(token: &str) -> Result<Self, ConvertError> {
        ALL_FORMATS
            .iter()
            .copied()
            .find(|f| f.token().eq_ignore_ascii_case(token))
            .ok_or_else(|| ConvertError::UnsupportedFormat(token.to_string()))
    }
}

/// Display tokens of all supported formats, in stable order.
pub fn list_formats() -> Vec<&'static str> {
    ALL_FORMATS.iter().map(|f| f.token()).collect()
}

/// The file a conversion actually produced.
///
/// The extension of `path` is authoritative: when `fell_back` is true the
/// requested format could not be encoded and a PNG was written instead.
#[derive(Debug, Clone, Serialize)]
pub struct Converted {
    pub path: PathBuf,
    pub format: OutputFormat,
    pub fell_back: bool,
}

/// Convert `raster` to the format named by `token`.
///
/// The token is validated before any I/O; an unknown token is
/// [`ConvertError::UnsupportedFormat`] and nothing is written.
pub fn convert(
    raster: &Raster,
    token: &str,
    out_dir: &Path,
    base_name: &str,
) -> Result<Converted, ConvertError> {
    let format = OutputFormat::parse(token)?;
    convert_to(raster, format, out_dir, base_name)
}

/// Convert `raster` to an already-validated format.
///
/// Creates `out_dir` (and parents) if absent. Output naming is
/// `<base_name>.<canonical extension>`, or `<base_name>.png` when the
/// fallback triggers.
pub fn convert_to(
    raster: &Raster,
    format: OutputFormat,
    out_dir: &Path,
    base_name: &str,
) -> Result<Converted, ConvertError> {
    std::fs::create_dir_all(out_dir)?;
    let target = out_dir.join(format!("{base_name}.{}", format.extension()));

    let encoded = match format {
        OutputFormat::Png | OutputFormat::Jpg | OutputFormat::Gif | OutputFormat::Tiff => {
            encode_raster(raster, format).map_err(|e| e.to_string())
        }
        OutputFormat::Pdf => pdf::document_bytes(raster).map_err(|e| e.to_string()),
        OutputFormat::Svg => png_bytes(raster)
            .map(|png| svg::document_bytes(raster, &png))
            .map_err(|e| e.to_string()),
        OutputFormat::Heif => return convert_heif(raster, out_dir, base_name),
    };

    match encoded {
        Ok(bytes) => {
            std::fs::write(&target, bytes)?;
            Ok(Converted {
                path: target,
                format,
                fell_back: false,
            })
        }
        Err(reason) => {
            eprintln!(
                "Failed to write {} format ({reason}), using PNG as fallback",
                format.token()
            );
            write_png_fallback(raster, out_dir, base_name)
        }
    }
}

/// HEIF placeholder: PNG bytes are written under a `.heif` name, or under
/// `.png` if even that write fails. Not a genuine HEIF bitstream; this
/// mirrors the shipped behavior and the naming is documented as-is.
fn convert_heif(
    raster: &Raster,
    out_dir: &Path,
    base_name: &str,
) -> Result<Converted, ConvertError> {
    let bytes =
        png_bytes(raster).map_err(|e| ConvertError::FallbackFailed(e.to_string()))?;
    let target = out_dir.join(format!("{base_name}.heif"));
    match std::fs::write(&target, &bytes) {
        Ok(()) => Ok(Converted {
            path: target,
            format: OutputFormat::Heif,
            fell_back: false,
        }),
        Err(_) => {
            let fallback = out_dir.join(format!("{base_name}.png"));
            std::fs::write(&fallback, &bytes)?;
            Ok(Converted {
                path: fallback,
                format: OutputFormat::Png,
                fell_back: true,
            })
        }
    }
}

/// Write the PNG substitute for a format whose encoder failed.
fn write_png_fallback(
    raster: &Raster,
    out_dir: &Path,
    base_name: &str,
) -> Result<Converted, ConvertError> {
    let bytes =
        png_bytes(raster).map_err(|e| ConvertError::FallbackFailed(e.to_string()))?;
    let path = out_dir.join(format!("{base_name}.png"));
    std::fs::write(&path, bytes)?;
    Ok(Converted {
        path,
        format: OutputFormat::Png,
        fell_back: true,
    })
}

/// Encode the raster's RGBA8 projection with one of the `image` crate
/// encoders, into memory.
///
/// Not every encoder accepts RGBA input for every raster — JPEG in
/// particular rejects it — and such failures are what the fallback
/// policy exists for.
fn encode_raster(raster: &Raster, format: OutputFormat) -> Result<Vec<u8>, image::ImageError> {
    let wire = match format {
        OutputFormat::Png => image::ImageFormat::Png,
        OutputFormat::Jpg => image::ImageFormat::Jpeg,
        OutputFormat::Gif => image::ImageFormat::Gif,
        OutputFormat::Tiff => image::ImageFormat::Tiff,
        _ => unreachable!("not an image-crate format"),
    };
    let mut buf = Cursor::new(Vec::new());
    raster.to_rgba_image().write_to(&mut buf, wire)?;
    Ok(buf.into_inner())
}

/// PNG-encode the raster into memory. Shared by the SVG embed, the HEIF
/// placeholder, and the fallback path.
pub(crate) fn png_bytes(raster: &Raster) -> Result<Vec<u8>, image::ImageError> {
    encode_raster(raster, OutputFormat::Png)
}
