//! Single-page PDF construction.
//!
//! The page is sized exactly to the raster's pixel dimensions (1 px =
//! 1 pt) and the raster is embedded as a DeviceRGB image XObject drawn
//! over the whole page from the origin. The document tree is built with
//! `lopdf` and serialized into memory; the caller owns the write.

use crate::raster::{Raster, channel_to_u8};
use lopdf::content::{Content, Operation};
use lopdf::{Document, Object, Stream, dictionary};

/// Serialize a one-page PDF embedding `raster` as a full-page image.
pub(super) fn document_bytes(raster: &Raster) -> Result<Vec<u8>, lopdf::Error> {
    let width = raster.width() as f32;
    let height = raster.height() as f32;

    let mut doc = Document::with_version("1.5");
    let pages_id = doc.new_object_id();

    // Raw interleaved RGB rows; alpha is dropped (PDF image XObjects
    // carry no alpha channel without a separate soft mask).
    let mut rgb = Vec::with_capacity(raster.pixels().count() * 3);
    for pixel in raster.pixels() {
        rgb.push(channel_to_u8(pixel.r));
        rgb.push(channel_to_u8(pixel.g));
        rgb.push(channel_to_u8(pixel.b));
    }

    let image_id = doc.add_object(Stream::new(
        dictionary! {
            "Type" => "XObject",
            "Subtype" => "Image",
            "Width" => raster.width() as i64,
            "Height" => raster.height() as i64,
            "ColorSpace" => "DeviceRGB",
            "BitsPerComponent" => 8,
        },
        rgb,
    ));

    // The image XObject occupies the unit square; the cm matrix scales it
    // to cover the full page with its lower-left corner at the origin.
    let content = Content {
        operations: vec![
            Operation::new("q", vec![]),
            Operation::new(
                "cm",
                vec![
                    Object::Real(width),
                    Object::Real(0.0),
                    Object::Real(0.0),
                    Object::Real(height),
                    Object::Real(0.0),
                    Object::Real(0.0),
                ],
            ),
            Operation::new("Do", vec!["Im0".into()]),
            Operation::new("Q", vec![]),
        ],
    };
    let content_id = doc.add_object(Stream::new(dictionary! {}, content.encode()?));

    let page_id = doc.add_object(dictionary! {
        "Type" => "Page",
        "Parent" => pages_id,
        "MediaBox" => vec![
            Object::Real(0.0),
            Object::Real(0.0),
            Object::Real(width),
            Object::Real(height),
        ],
        "Contents" => content_id,
        "Resources" => dictionary! {
            "XObject" => dictionary! { "Im0" => image_id },
        },
    });

    doc.objects.insert(
        pages_id,
        Object::Dictionary(dictionary! {
            "Type" => "Pages",
            "Kids" => vec![page_id.into()],
            "Count" => 1,
        }),
    );

    let catalog_id = doc.add_object(dictionary! {
        "Type" => "Catalog",
        "Pages" => pages_id,
    });
    doc.trailer.set("Root", catalog_id);
    doc.compress();

    let mut bytes = Vec::new();
    doc.save_to(&mut bytes)?;
    Ok(bytes)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_helpers::gradient;

    /// Whole-number reals may round-trip through serialization as
    /// integers.
    fn number(obj: &Object) -> f32 {
        match obj {
            Object::Integer(i) => *i as f32,
            Object::Real(r) => *r,
            other => panic!("not a number: {other:?}"),
        }
    }

    #[test]
    fn produced_bytes_are_a_pdf() {
        let bytes = document_bytes(&gradient(30, 20)).unwrap();
        assert_eq!(&bytes[..5], b"%PDF-");
        assert!(bytes.windows(5).rev().any(|w| w == b"%%EOF"));
    }

    #[test]
    fn page_box_matches_raster_dimensions() {
        let bytes = document_bytes(&gradient(123, 45)).unwrap();
        let doc = Document::load_mem(&bytes).unwrap();
        let page_id = doc.page_iter().next().unwrap();
        let page = doc.get_dictionary(page_id).unwrap();
        let media_box = page.get(b"MediaBox").unwrap().as_array().unwrap();
        assert_eq!(number(&media_box[2]), 123.0);
        assert_eq!(number(&media_box[3]), 45.0);
    }

    #[test]
    fn document_has_exactly_one_page() {
        let bytes = document_bytes(&gradient(10, 10)).unwrap();
        let doc = Document::load_mem(&bytes).unwrap();
        assert_eq!(doc.page_iter().count(), 1);
    }
}
