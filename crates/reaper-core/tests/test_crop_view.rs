mod common;

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;
use std::time::Instant;

use approx::assert_relative_eq;

use reaper_core::consts::CROP_DEBOUNCE;
use reaper_core::edit::{EditDispatcher, EditParams, EditStatus};
use reaper_core::error::ReaperError;
use reaper_core::geometry::{CropRect, CropRegion, ImageSize, Point, Size};
use reaper_core::viewport::{InteractionMode, PointerInput};
use reaper_core::views::CropView;

use common::{poll_until, source, GatedBackend};

fn gated_view() -> (CropView, Arc<GatedBackend>, common::Gate, Arc<AtomicUsize>) {
    let (backend, gate) = GatedBackend::new();
    let wakes = Arc::new(AtomicUsize::new(0));
    let counter = Arc::clone(&wakes);
    let dispatcher = EditDispatcher::spawn(
        Arc::clone(&backend),
        "crop",
        Arc::new(move || {
            counter.fetch_add(1, Ordering::SeqCst);
        }),
    )
    .unwrap();
    let mut view = CropView::new(dispatcher, CROP_DEBOUNCE);
    view.set_source(source(800, 600, "scene.png"));
    view.set_rendered_size(Size::new(400.0, 300.0));
    (view, backend, gate, wakes)
}

fn select(view: &mut CropView, region: CropRegion) {
    let t0 = Instant::now();
    assert!(view.update_selection(region, t0));
    assert!(view.tick(t0 + CROP_DEBOUNCE));
}

#[test]
fn test_half_scale_selection_crops_source_pixels() {
    let (mut view, _backend, gate, _) = gated_view();
    select(&mut view, CropRegion::new(100.0, 50.0, 200.0, 100.0));

    view.submit().unwrap().unwrap();
    match view.status() {
        EditStatus::Pending { params, .. } => {
            assert_eq!(params, &EditParams::Crop(CropRect::new(200, 100, 400, 200)));
        }
        other => panic!("expected pending, got {other:?}"),
    }

    gate.release();
    assert!(poll_until(|| view.poll()));
    let presenter = view.presenter().unwrap();
    assert!(presenter.in_result_mode());
    assert_eq!(presenter.artifact().unwrap().size(), ImageSize::new(400, 200));
    assert_eq!(presenter.download_name().as_deref(), Some("scene-cropped.png"));
}

#[test]
fn test_second_submit_while_pending_is_ignored() {
    let (mut view, backend, gate, _) = gated_view();
    select(&mut view, CropRegion::new(0.0, 0.0, 100.0, 100.0));

    let first = view.submit().unwrap();
    assert!(first.is_some());
    assert!(poll_until(|| backend.calls() == 1));
    let before = view.status().clone();

    assert_eq!(view.submit().unwrap(), None);
    assert_eq!(view.status(), &before);

    // Input is frozen while pending.
    assert!(!view.update_selection(CropRegion::new(5.0, 5.0, 10.0, 10.0), Instant::now()));
    view.zoom_in();
    assert_relative_eq!(view.viewport().zoom(), 1.0);

    gate.release();
    assert!(poll_until(|| view.poll()));
    assert_eq!(backend.calls(), 1);
}

#[test]
fn test_failed_request_allows_retry() {
    let (mut view, backend, gate, _) = gated_view();
    select(&mut view, CropRegion::new(10.0, 10.0, 50.0, 50.0));

    backend.fail_next();
    view.submit().unwrap().unwrap();
    gate.release();
    assert!(poll_until(|| view.poll()));

    let presenter = view.presenter().unwrap();
    assert!(presenter.error().unwrap().contains("backend unavailable"));
    assert!(presenter.artifact().is_none());
    assert_eq!(presenter.source_metadata().size, ImageSize::new(800, 600));
    assert!(view.is_editable());

    view.submit().unwrap().unwrap();
    gate.release();
    assert!(poll_until(|| view.poll()));
    assert!(view.presenter().unwrap().in_result_mode());
    assert_eq!(backend.calls(), 2);
}

#[test]
fn test_result_after_clear_is_discarded() {
    let (mut view, _backend, gate, wakes) = gated_view();
    select(&mut view, CropRegion::new(0.0, 0.0, 40.0, 40.0));
    view.submit().unwrap().unwrap();

    view.set_source(source(64, 64, "other.png"));
    gate.release();
    assert!(poll_until(|| wakes.load(Ordering::SeqCst) == 1));

    assert!(!view.poll());
    assert_eq!(view.status(), &EditStatus::Idle);
    assert_eq!(view.source().unwrap().size(), ImageSize::new(64, 64));
}

#[test]
fn test_outside_selection_is_rejected_locally() {
    let (mut view, backend, _gate, _) = gated_view();
    select(&mut view, CropRegion::new(450.0, 10.0, 30.0, 30.0));

    let err = view.submit().unwrap_err();
    assert!(matches!(err, ReaperError::InvalidSelection(_)));
    assert_eq!(view.status(), &EditStatus::Idle);
    assert_eq!(backend.calls(), 0);
}

#[test]
fn test_zoom_out_to_one_resets_pan() {
    let (mut view, _backend, _gate, _) = gated_view();
    for _ in 0..10 {
        view.zoom_in();
    }
    assert_relative_eq!(view.viewport().zoom(), 2.0);

    view.set_mode(InteractionMode::Pan);
    assert!(view.pointer_down(PointerInput::Mouse(Point::new(200.0, 150.0))));
    view.pointer_move(PointerInput::Mouse(Point::new(230.0, 120.0)), &|| {});
    assert!(view.on_frame());
    assert!(view.pointer_up());
    assert_eq!(view.viewport().pan(), Point::new(30.0, -30.0));

    for _ in 0..10 {
        view.zoom_out();
    }
    assert_relative_eq!(view.viewport().zoom(), 1.0);
    assert_eq!(view.viewport().pan(), Point::ZERO);
}

#[test]
fn test_touch_release_outside_element_ends_gesture() {
    let (mut view, _backend, _gate, _) = gated_view();
    view.zoom_in();
    view.set_mode(InteractionMode::Pan);
    let touches = [Point::new(10.0, 10.0)];
    assert!(view.pointer_down(PointerInput::Touch(&touches)));
    assert!(view.release_listeners().is_listening());

    let moved = [Point::new(4.0, 12.0)];
    view.pointer_move(PointerInput::Touch(&moved), &|| {});
    assert!(view.global_release());
    assert!(!view.is_panning());
    assert!(!view.release_listeners().is_listening());
    assert_eq!(view.viewport().pan(), Point::new(-6.0, 2.0));
}
