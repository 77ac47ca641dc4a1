//! SVG wrapper construction.
//!
//! Raster-in-vector-wrapper, not vectorization: the document's canvas
//! equals the raster's pixel dimensions and a single `<image>` element
//! covers it, with the PNG-encoded pixels inlined as a base64 data URI
//! and inline styling.

use crate::raster::Raster;
use base64::Engine as _;
use base64::engine::general_purpose::STANDARD;

/// Serialize an SVG document embedding the already-PNG-encoded raster.
pub(super) fn document_bytes(raster: &Raster, png: &[u8]) -> Vec<u8> {
    let (width, height) = raster.dimensions();
    let data = STANDARD.encode(png);
    format!(
        concat!(
            "<?xml version=\"1.0\" encoding=\"UTF-8\"?>\n",
            "<svg xmlns=\"http://www.w3.org/2000/svg\" ",
            "xmlns:xlink=\"http://www.w3.org/1999/xlink\" ",
            "width=\"{w}\" height=\"{h}\" viewBox=\"0 0 {w} {h}\">\n",
            "  <image x=\"0\" y=\"0\" width=\"{w}\" height=\"{h}\" ",
            "style=\"image-rendering:auto\" ",
            "xlink:href=\"data:image/png;base64,{data}\"/>\n",
            "</svg>\n",
        ),
        w = width,
        h = height,
        data = data,
    )
    .into_bytes()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::convert::png_bytes;
    use crate::test_helpers::gradient;

    #[test]
    fn canvas_matches_raster_dimensions() {
        let raster = gradient(40, 25);
        let png = png_bytes(&raster).unwrap();
        let text = String::from_utf8(document_bytes(&raster, &png)).unwrap();
        assert!(text.starts_with("<?xml"));
        assert!(text.contains("viewBox=\"0 0 40 25\""));
        assert!(text.contains("style=\"image-rendering:auto\""));
    }

    #[test]
    fn embedded_data_uri_round_trips() {
        let raster = gradient(6, 6);
        let png = png_bytes(&raster).unwrap();
        let text = String::from_utf8(document_bytes(&raster, &png)).unwrap();
        let start = text.find("base64,").unwrap() + "base64,".len();
        let end = text[start..].find('"').unwrap() + start;
        let decoded = STANDARD.decode(&text[start..end]).unwrap();
        assert_eq!(decoded, png);
    }
}
