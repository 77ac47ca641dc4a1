//! # Rasterize
//!
//! Deterministic per-pixel filters over raster buffers, plus a conversion
//! service that persists a raster into one of several formats with
//! graceful PNG fallback when the target format cannot be produced.
//!
//! # Data Flow
//!
//! ```text
//! file ──decode──► Raster ──(optional) filter──► Raster′ ──convert──► file
//! ```
//!
//! # Module Map
//!
//! | Module | Role |
//! |--------|------|
//! | [`raster`] | Immutable normalized-float RGBA buffer with coordinate access |
//! | [`filters`] | Closed filter catalog + the nine per-pixel transforms |
//! | [`convert`] | Multi-format encoding with the PNG fallback policy |
//! | [`decode`] | File → raster decoding and image property extraction |
//! | [`batch`] | rayon worker-pool submission with per-request completion events |
//!
//! # Design Decisions
//!
//! ## Immutable Rasters
//!
//! Filters and conversions never mutate their input: every call reads one
//! [`raster::Raster`] and produces a fresh one. There is no shared mutable
//! state anywhere in the core, so concurrent calls on different rasters
//! need no synchronization — the [`batch`] layer leans on exactly that.
//!
//! ## Fallback, Not Failure
//!
//! A format-specific encoder that cannot handle a raster is not an error:
//! the conversion service writes a PNG at the same base name and returns
//! it as a success with [`convert::Converted::fell_back`] set. The written
//! file's extension is authoritative and may differ from the request. Only
//! two things fail a conversion: an unsupported format token (checked
//! before any I/O) and a failure of the PNG fallback write itself.
//!
//! ## Pure-Rust Encoding
//!
//! PNG, JPEG, GIF and TIFF go through the `image` crate; PDF documents are
//! assembled directly with `lopdf`; SVG output wraps the PNG-encoded
//! raster in a data URI. No system codecs, no subprocesses — the binary is
//! fully self-contained.
//!
//! ## Synchronous Core, Parallel Caller
//!
//! Each filter or conversion call is synchronous and runs to completion;
//! cancellation and scheduling belong to the caller. The [`batch`] module
//! is that caller: it fans requests out over the rayon pool and streams a
//! completion signal per request through an mpsc channel.

pub mod batch;
pub mod convert;
pub mod decode;
pub mod filters;
pub mod raster;

#[cfg(test)]
pub(crate) mod test_helpers;
