//! File decoding and image property extraction.
//!
//! [`decode`] is the seam between the filesystem and the in-memory
//! [`Raster`]: it maps a file to normalized RGBA pixels or surfaces the
//! decode failure unchanged — no fallback applies here, there is nothing
//! to convert yet. [`ImageInfo`] collects the file and container
//! properties shown to the user.

use crate::raster::Raster;
use image::ImageReader;
use serde::Serialize;
use std::path::{Path, PathBuf};
use thiserror::Error;

#[derive(Error, Debug)]
pub enum DecodeError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("Failed to decode {path}: {source}")]
    Undecodable {
        path: PathBuf,
        source: image::ImageError,
    },
}

/// Decode an image file into a raster.
pub fn decode(path: &Path) -> Result<Raster, DecodeError> {
    let img = ImageReader::open(path)?
        .with_guessed_format()?
        .decode()
        .map_err(|e| DecodeError::Undecodable {
            path: path.to_path_buf(),
            source: e,
        })?;
    Ok(Raster::from_rgba_image(&img.to_rgba8()))
}

/// File and container properties of an image on disk.
#[derive(Debug, Clone, Serialize)]
pub struct ImageInfo {
    pub filename: String,
    pub path: String,
    /// Human-readable file size (B / KB / MB).
    pub size: String,
    pub width: u32,
    pub height: u32,
    /// MIME type of the detected container, when recognized.
    pub format: Option<String>,
}

impl ImageInfo {
    /// Probe a file for its properties without a full pixel decode.
    pub fn probe(path: &Path) -> Result<Self, DecodeError> {
        let metadata = std::fs::metadata(path)?;
        let reader = ImageReader::open(path)?.with_guessed_format()?;
        let format = reader.format().map(|f| f.to_mime_type().to_string());
        let (width, height) =
            reader
                .into_dimensions()
                .map_err(|e| DecodeError::Undecodable {
                    path: path.to_path_buf(),
                    source: e,
                })?;

        Ok(Self {
            filename: path
                .file_name()
                .map(|n| n.to_string_lossy().into_owned())
                .unwrap_or_default(),
            path: path.display().to_string(),
            size: format_file_size(metadata.len()),
            width,
            height,
            format,
        })
    }

    /// Properties as ordered label/value pairs for display.
    pub fn properties(&self) -> Vec<(&'static str, String)> {
        let mut props = vec![
            ("Filename", self.filename.clone()),
            ("Path", self.path.clone()),
            ("Size", self.size.clone()),
            ("Width", format!("{} px", self.width)),
            ("Height", format!("{} px", self.height)),
        ];
        if let Some(format) = &self.format {
            props.push(("Format", format.clone()));
        }
        props
    }
}

/// Format a byte count as B, KB, or MB with two decimals.
fn format_file_size(size: u64) -> String {
    if size < 1024 {
        format!("{size} B")
    } else if size < 1024 * 1024 {
        format!("{:.2} KB", size as f64 / 1024.0)
    } else {
        format!("{:.2} MB", size as f64 / (1024.0 * 1024.0))
    }
}
