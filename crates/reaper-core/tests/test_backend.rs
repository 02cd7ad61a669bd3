mod common;

use image::GenericImageView;

use reaper_core::config::ResizeFilter;
use reaper_core::edit::{EditParams, LocalBackend, ProcessingBackend};
use reaper_core::error::ReaperError;
use reaper_core::format::FileFormat;
use reaper_core::geometry::{CropRect, ImageSize};

use common::encoded;

#[test]
fn test_crop_keeps_pixels_and_format() {
    let src = encoded(64, 48, FileFormat::Png);
    let out = LocalBackend::default()
        .crop(&src, CropRect::new(0, 0, 16, 12))
        .unwrap();
    assert_eq!(out.size(), ImageSize::new(16, 12));
    assert_eq!(out.format(), FileFormat::Png);

    // The top-left quarter of the gradient is solid red.
    let decoded = out.decode().unwrap();
    assert_eq!(decoded.get_pixel(3, 3).0, [255, 0, 0, 255]);
}

#[test]
fn test_crop_outside_source_is_rejected() {
    let src = encoded(20, 20, FileFormat::Png);
    let err = LocalBackend::default()
        .crop(&src, CropRect::new(10, 10, 11, 5))
        .unwrap_err();
    assert!(matches!(err, ReaperError::InvalidSelection(_)));
}

#[test]
fn test_resize_exact_dimensions() {
    let src = encoded(40, 30, FileFormat::Bmp);
    let backend = LocalBackend::new(ResizeFilter::Nearest);
    let out = backend.resize(&src, 13, 70).unwrap();
    assert_eq!(out.size(), ImageSize::new(13, 70));
    assert_eq!(out.format(), FileFormat::Bmp);
}

#[test]
fn test_resize_rejects_zero_dimension() {
    let src = encoded(8, 8, FileFormat::Png);
    let err = LocalBackend::default().resize(&src, 0, 8).unwrap_err();
    assert!(matches!(
        err,
        ReaperError::InvalidDimensions { width: 0, height: 8 }
    ));
}

#[test]
fn test_resize_rejects_dimension_above_cap() {
    let src = encoded(8, 8, FileFormat::Png);
    let err = LocalBackend::default()
        .resize(&src, 4, u32::MAX)
        .unwrap_err();
    assert!(matches!(
        err,
        ReaperError::InvalidDimensions { width: 4, height: u32::MAX }
    ));
}

#[test]
fn test_convert_to_every_format() {
    let src = encoded(16, 16, FileFormat::Png);
    let backend = LocalBackend::default();
    for &target in FileFormat::ALL {
        let out = backend.convert(&src, target).unwrap();
        assert_eq!(out.format(), target, "converting to {target}");
        assert_eq!(out.size(), ImageSize::new(16, 16), "converting to {target}");
        out.decode().unwrap();
    }
}

#[test]
fn test_run_routes_params() {
    let src = encoded(10, 10, FileFormat::Png);
    let backend = LocalBackend::default();
    let out = backend
        .run(&src, &EditParams::Convert { target: FileFormat::Jpeg })
        .unwrap();
    assert_eq!(out.format(), FileFormat::Jpeg);
    let out = backend
        .run(&src, &EditParams::Resize { width: 5, height: 2 })
        .unwrap();
    assert_eq!(out.size(), ImageSize::new(5, 2));
}
