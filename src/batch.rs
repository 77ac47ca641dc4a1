//! Parallel batch conversion over the rayon pool.
//!
//! The filter and conversion core is synchronous; all asynchrony lives
//! here in the caller layer. Each request is submitted to the worker
//! pool and reports a completion signal over an mpsc channel, so the
//! consumer (the CLI's printer thread) can stream progress while the
//! batch runs. There is no cancellation: work that should not run must
//! simply not be submitted.

use crate::convert::{self, OutputFormat};
use crate::decode;
use crate::filters::Filter;
use rayon::prelude::*;
use serde::Serialize;
use std::path::{Path, PathBuf};
use std::sync::mpsc::Sender;

/// One source image to convert, with an optional filter applied first.
#[derive(Debug, Clone)]
pub struct BatchRequest {
    pub source: PathBuf,
    pub filter: Option<Filter>,
    pub format: OutputFormat,
}

/// Per-request completion signal.
#[derive(Debug, Clone)]
pub enum BatchEvent {
    Started { source: PathBuf },
    Converted {
        source: PathBuf,
        output: PathBuf,
        fell_back: bool,
    },
    Failed { source: PathBuf, message: String },
}

/// Outcome counts for a completed batch.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct BatchSummary {
    pub converted: usize,
    /// Conversions that succeeded with a substituted PNG artifact.
    pub fallbacks: usize,
    pub failed: usize,
}

impl BatchSummary {
    fn absorb(mut self, other: Self) -> Self {
        self.converted += other.converted;
        self.fallbacks += other.fallbacks;
        self.failed += other.failed;
        self
    }
}

/// Run every request on the rayon pool, sending one `Started` and one
/// terminal event per request.
///
/// Send errors are ignored: a dropped receiver means nobody is watching,
/// not that the batch should stop.
pub fn run_batch(
    requests: &[BatchRequest],
    out_dir: &Path,
    events: &Sender<BatchEvent>,
) -> BatchSummary {
    requests
        .par_iter()
        .map_with(events.clone(), |tx, request| {
            tx.send(BatchEvent::Started {
                source: request.source.clone(),
            })
            .ok();

            match convert_one(request, out_dir) {
                Ok(result) => {
                    let fell_back = result.fell_back;
                    tx.send(BatchEvent::Converted {
                        source: request.source.clone(),
                        output: result.path,
                        fell_back,
                    })
                    .ok();
                    BatchSummary {
                        converted: 1,
                        fallbacks: usize::from(fell_back),
                        failed: 0,
                    }
                }
                Err(message) => {
                    tx.send(BatchEvent::Failed {
                        source: request.source.clone(),
                        message,
                    })
                    .ok();
                    BatchSummary {
                        failed: 1,
                        ..BatchSummary::default()
                    }
                }
            }
        })
        .reduce(BatchSummary::default, BatchSummary::absorb)
}

/// Decode, optionally filter, and convert a single request.
fn convert_one(request: &BatchRequest, out_dir: &Path) -> Result<convert::Converted, String> {
    let raster = decode::decode(&request.source).map_err(|e| e.to_string())?;
    let raster = match request.filter {
        Some(filter) => filter.apply(&raster),
        None => raster,
    };
    let base_name = request
        .source
        .file_stem()
        .map(|s| s.to_string_lossy().into_owned())
        .ok_or_else(|| format!("No file name in {}", request.source.display()))?;
    convert::convert_to(&raster, request.format, out_dir, &base_name).map_err(|e| e.to_string())
}
