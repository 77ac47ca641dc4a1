//! End-to-end pipeline tests: decode → filter → convert against real
//! files in a temp directory.

use rasterize::batch::{BatchRequest, run_batch};
use rasterize::convert::{self, OutputFormat};
use rasterize::decode;
use rasterize::filters;
use rasterize::raster::{Pixel, Raster};
use std::path::Path;
use std::sync::mpsc;

/// 100×100 diagonal gradient, the shape the conversion properties are
/// specified against.
fn gradient_raster() -> Raster {
    Raster::from_fn(100, 100, |x, y| {
        Pixel::rgba(
            x as f32 / 100.0,
            y as f32 / 100.0,
            (x + y) as f32 / 200.0,
            1.0,
        )
    })
}

fn write_png(path: &Path, raster: &Raster) {
    raster.to_rgba_image().save(path).unwrap();
}

#[test]
fn sharpened_tiff_differs_from_unfiltered_encode() {
    let tmp = tempfile::TempDir::new().unwrap();
    let raster = gradient_raster();
    let sharpened = filters::create("Sharpen").unwrap().apply(&raster);
    assert_eq!(sharpened.dimensions(), (100, 100));

    let plain = convert::convert(&raster, "TIFF", tmp.path(), "plain").unwrap();
    let filtered = convert::convert(&sharpened, "TIFF", tmp.path(), "sharpened").unwrap();

    // Same outcome either way: both real TIFFs or both PNG fallbacks.
    assert_eq!(plain.format, filtered.format);
    let plain_bytes = std::fs::read(&plain.path).unwrap();
    let filtered_bytes = std::fs::read(&filtered.path).unwrap();
    assert_ne!(plain_bytes, filtered_bytes);
}

#[test]
fn decode_filter_convert_round_trip() {
    let tmp = tempfile::TempDir::new().unwrap();
    let source = tmp.path().join("source.png");
    write_png(&source, &gradient_raster());

    let raster = decode::decode(&source).unwrap();
    let inverted = filters::apply_filter("Color Invert", &raster).unwrap();
    let result = convert::convert(&inverted, "png", tmp.path(), "inverted").unwrap();
    assert!(!result.fell_back);

    // Inverting the decoded output restores the original pixels exactly:
    // inversion is an involution on quantized channels.
    let back = filters::apply_filter("color invert", &decode::decode(&result.path).unwrap())
        .unwrap();
    assert_eq!(back.to_rgba_image(), raster.to_rgba_image());
}

#[test]
fn every_format_token_yields_exactly_one_file() {
    let raster = gradient_raster();
    for token in convert::list_formats() {
        let tmp = tempfile::TempDir::new().unwrap();
        let result = convert::convert(&raster, token, tmp.path(), "out").unwrap();
        assert!(result.path.exists(), "{token} wrote nothing");

        let written: Vec<_> = std::fs::read_dir(tmp.path())
            .unwrap()
            .map(|e| e.unwrap().path())
            .collect();
        assert_eq!(written.len(), 1, "{token} left extra files: {written:?}");
        assert_eq!(written[0], result.path);
    }
}

#[test]
fn unsupported_format_leaves_no_trace() {
    let tmp = tempfile::TempDir::new().unwrap();
    let out_dir = tmp.path().join("out");
    let err = convert::convert(&gradient_raster(), "BMP", &out_dir, "sample").unwrap_err();
    assert!(matches!(
        err,
        convert::ConvertError::UnsupportedFormat(token) if token == "BMP"
    ));
    assert!(!out_dir.exists());
}

#[test]
fn batch_with_filter_over_real_files() {
    let tmp = tempfile::TempDir::new().unwrap();
    let sources: Vec<_> = (0..4)
        .map(|i| {
            let path = tmp.path().join(format!("photo-{i}.png"));
            write_png(&path, &gradient_raster());
            path
        })
        .collect();

    let requests: Vec<_> = sources
        .iter()
        .map(|source| BatchRequest {
            source: source.clone(),
            filter: Some(filters::Filter::Sepia),
            format: OutputFormat::Png,
        })
        .collect();

    let out_dir = tmp.path().join("converted");
    let (tx, rx) = mpsc::channel();
    let summary = run_batch(&requests, &out_dir, &tx);
    drop(tx);

    assert_eq!(summary.converted, 4);
    assert_eq!(summary.failed, 0);
    for i in 0..4 {
        assert!(out_dir.join(format!("photo-{i}.png")).exists());
    }
    // One Started and one terminal event per request.
    assert_eq!(rx.iter().count(), 8);
}
