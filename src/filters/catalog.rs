//! Closed, enumerable registry of the available filters.
//!
//! The set of filters is fixed at compile time: adding one means adding
//! an enum variant and a display name here, not a plugin mechanism.
//! Lookup is by display name and case-insensitive; listing order is the
//! declaration order below and never changes between runs.

use super::transforms;
use crate::raster::Raster;
use thiserror::Error;

/// A requested filter name that matches none of the known filters.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("Unknown filter: {0}")]
pub struct UnknownFilterError(pub String);

/// One of the nine built-in filters.
///
/// Filters are cheap value objects: [`create`] hands out a fresh copy per
/// call and [`Filter::apply`] never mutates its input raster.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Filter {
    BlackAndWhite,
    Sepia,
    Blur,
    Sharpen,
    ColorInvert,
    FlipImage,
    Contrast,
    Brightness,
    Saturate,
}

/// Every filter, in stable listing order.
pub const ALL_FILTERS: [Filter; 9] = [
    Filter::BlackAndWhite,
    Filter::Sepia,
    Filter::Blur,
    Filter::Sharpen,
    Filter::ColorInvert,
    Filter::FlipImage,
    Filter::Contrast,
    Filter::Brightness,
    Filter::Saturate,
];

impl Filter {
    /// Canonical display name, as shown by `list_filters`.
    pub fn name(self) -> &'static str {
        match self {
            Filter::BlackAndWhite => "Black and White",
            Filter::Sepia => "Sepia",
            Filter::Blur => "Blur",
            Filter::Sharpen => "Sharpen",
            Filter::ColorInvert => "Color Invert",
            Filter::FlipImage => "Flip Image",
            Filter::Contrast => "Contrast",
            Filter::Brightness => "Brightness",
            Filter::Saturate => "Saturate",
        }
    }

    /// Produce a new raster of identical dimensions with this filter
    /// applied. Never fails on well-formed input.
    pub fn apply(self, src: &Raster) -> Raster {
        match self {
            Filter::BlackAndWhite => transforms::black_and_white(src),
            Filter::Sepia => transforms::sepia(src),
            Filter::Blur => transforms::blur(src),
            Filter::Sharpen => transforms::sharpen(src),
            Filter::ColorInvert => transforms::color_invert(src),
            Filter::FlipImage => transforms::flip_vertical(src),
            Filter::Contrast => transforms::contrast(src),
            Filter::Brightness => transforms::brightness(src),
            Filter::Saturate => transforms::saturate(src),
        }
    }
}

/// Display names of all filters, in stable order.
pub fn list_filters() -> Vec<&'static str> {
    ALL_FILTERS.iter().map(|f| f.name()).collect()
}

/// Look a filter up by display name, case-insensitively.
pub fn create(name: &str) -> Result<Filter, UnknownFilterError> {
    ALL_FILTERS
        .iter()
        .copied()
        .find(|f| f.name().eq_ignore_ascii_case(name))
        .ok_or_else(|| UnknownFilterError(name.to_string()))
}

/// Look up `name` and apply it to `src` in one step.
pub fn apply_filter(name: &str, src: &Raster) -> Result<Raster, UnknownFilterError> {
    Ok(create(name)?.apply(src))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_helpers::gradient;

    #[test]
    fn listing_is_stable_and_complete() {
        let names = list_filters();
        assert_eq!(
            names,
            vec![
                "Black and White",
                "Sepia",
                "Blur",
                "Sharpen",
                "Color Invert",
                "Flip Image",
                "Contrast",
                "Brightness",
                "Saturate",
            ]
        );
        assert_eq!(names, list_filters());
    }

    #[test]
    fn lookup_is_case_insensitive() {
        for name in ["black and white", "BLACK AND WHITE", "Black And White"] {
            assert_eq!(create(name).unwrap(), Filter::BlackAndWhite);
        }
        assert_eq!(create("fLiP iMaGe").unwrap(), Filter::FlipImage);
    }

    #[test]
    fn case_variants_behave_identically() {
        let src = gradient(4, 4);
        let a = create("black and white").unwrap().apply(&src);
        let b = create("BLACK AND WHITE").unwrap().apply(&src);
        assert_eq!(a, b);
    }

    #[test]
    fn unknown_name_is_an_error() {
        let err = create("not-a-filter").unwrap_err();
        assert_eq!(err, UnknownFilterError("not-a-filter".to_string()));
        assert!(err.to_string().contains("not-a-filter"));
    }

    #[test]
    fn every_filter_is_listed_under_its_own_name() {
        for filter in ALL_FILTERS {
            assert_eq!(create(filter.name()).unwrap(), filter);
        }
    }

    #[test]
    fn apply_filter_matches_direct_application() {
        let src = gradient(5, 3);
        let via_name = apply_filter("Sepia", &src).unwrap();
        assert_eq!(via_name, Filter::Sepia.apply(&src));
    }
}
