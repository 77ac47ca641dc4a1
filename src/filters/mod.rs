//! Per-pixel raster filters.
//!
//! | Piece | Role |
//! |---|---|
//! | [`catalog`] | Closed name → filter registry, case-insensitive lookup |
//! | `transforms` | The nine pixel transforms (pure `&Raster -> Raster`) |
//! | `sampling` | Clamped neighbor sampling shared by blur and sharpen |
//!
//! Every filter preserves the source dimensions and returns a fresh
//! raster; the only filter-related error is an unknown name at catalog
//! lookup.

pub mod catalog;
mod sampling;
mod transforms;

pub use catalog::{ALL_FILTERS, Filter, UnknownFilterError, apply_filter, create, list_filters};
