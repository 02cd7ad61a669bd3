mod common;

use std::sync::Arc;

use reaper_core::consts::MAX_DIMENSION;
use reaper_core::edit::{EditDispatcher, EditStatus};
use reaper_core::error::ReaperError;
use reaper_core::format::FileFormat;
use reaper_core::geometry::ImageSize;
use reaper_core::views::{ConvertView, ResizeView};

use common::{local_dispatcher, poll_until, source, GatedBackend, PanickingBackend};

#[test]
fn test_resize_view_requires_positive_dimensions() {
    let mut view = ResizeView::new(local_dispatcher());
    assert!(matches!(view.submit(), Err(ReaperError::NoSource)));

    view.set_source(source(30, 20, "icon.png"));
    assert_eq!(view.dimensions(), (0, 0));
    assert!(matches!(
        view.submit(),
        Err(ReaperError::InvalidDimensions { .. })
    ));
    assert_eq!(view.status(), &EditStatus::Idle);

    assert!(view.set_dimensions(60, 10));
    view.submit().unwrap().unwrap();
    assert!(poll_until(|| view.poll()));

    let presenter = view.presenter().unwrap();
    let artifact = presenter.artifact_metadata().unwrap();
    assert_eq!(artifact.size, ImageSize::new(60, 10));
    assert_eq!(presenter.download_name().as_deref(), Some("icon-60x10.png"));
}

#[test]
fn test_resize_view_rejects_oversized_dimensions() {
    let mut view = ResizeView::new(local_dispatcher());
    view.set_source(source(30, 20, "icon.png"));
    view.set_dimensions(u32::MAX, 10);
    assert!(matches!(
        view.submit(),
        Err(ReaperError::InvalidDimensions { width: u32::MAX, height: 10 })
    ));
    assert_eq!(view.status(), &EditStatus::Idle);

    view.set_dimensions(MAX_DIMENSION, 1);
    assert!(view.submit().unwrap().is_some());
}

#[test]
fn test_backend_panic_fails_request_and_allows_retry() {
    let dispatcher =
        EditDispatcher::spawn(Arc::new(PanickingBackend::default()), "resize", Arc::new(|| {}))
            .unwrap();
    let mut view = ResizeView::new(dispatcher);
    view.set_source(source(16, 16, "a.png"));
    view.set_dimensions(8, 8);
    view.submit().unwrap().unwrap();
    assert!(poll_until(|| view.poll()));

    match view.status() {
        EditStatus::Failed { error, .. } => assert!(error.contains("decoder blew up")),
        other => panic!("expected failure, got {other:?}"),
    }

    // The worker survived the panic and serves the next request.
    view.submit().unwrap().unwrap();
    assert!(poll_until(|| view.poll()));
    let artifact = view.presenter().unwrap().artifact_metadata().unwrap();
    assert_eq!(artifact.size, ImageSize::new(8, 8));
}

#[test]
fn test_resize_inputs_frozen_while_pending() {
    let (backend, gate) = GatedBackend::new();
    let dispatcher =
        EditDispatcher::spawn(Arc::clone(&backend), "resize", Arc::new(|| {})).unwrap();
    let mut view = ResizeView::new(dispatcher);
    view.set_source(source(16, 16, "a.png"));
    view.set_dimensions(8, 8);
    view.submit().unwrap().unwrap();

    assert!(!view.set_dimensions(4, 4));
    assert_eq!(view.dimensions(), (8, 8));
    assert_eq!(view.submit().unwrap(), None);

    gate.release();
    assert!(poll_until(|| view.poll()));
    assert_eq!(backend.calls(), 1);
}

#[test]
fn test_resize_clear_resets_inputs() {
    let mut view = ResizeView::new(local_dispatcher());
    view.set_source(source(16, 16, "a.png"));
    view.set_dimensions(8, 8);
    view.submit().unwrap().unwrap();
    assert!(poll_until(|| view.poll()));

    view.clear();
    assert!(view.source().is_none());
    assert_eq!(view.dimensions(), (0, 0));
    assert_eq!(view.status(), &EditStatus::Idle);
}

#[test]
fn test_convert_view_uses_default_target() {
    let mut view = ConvertView::new(local_dispatcher(), FileFormat::WebP);
    view.set_source(source(12, 12, "photo.png"));
    assert_eq!(view.target(), FileFormat::WebP);

    assert!(view.set_target(FileFormat::Jpeg));
    view.submit().unwrap().unwrap();
    assert!(poll_until(|| view.poll()));

    let presenter = view.presenter().unwrap();
    assert_eq!(presenter.artifact().unwrap().format(), FileFormat::Jpeg);
    assert_eq!(presenter.download_name().as_deref(), Some("photo.jpeg"));
    drop(presenter);

    view.clear();
    assert_eq!(view.target(), FileFormat::WebP);
}

#[test]
fn test_dismiss_result_keeps_source() {
    let mut view = ConvertView::new(local_dispatcher(), FileFormat::Png);
    view.set_source(source(12, 12, "photo.png"));
    view.submit().unwrap().unwrap();
    assert!(poll_until(|| view.poll()));
    assert!(!view.is_editable());

    view.dismiss_result();
    assert!(view.is_editable());
    assert_eq!(view.source().unwrap().file_name(), Some("photo.png"));
}
