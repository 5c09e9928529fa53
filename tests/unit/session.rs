use std::sync::Arc;

use super::*;
use crate::assets::color::Color;
use crate::assets::source::InMemoryAssetSource;
use crate::config::EngineConfig;
use crate::encode::sink::InMemoryExportSink;
use crate::entitlement::LocalQuota;
use crate::template::{Backdrop, Orientation};

fn session(template: Template) -> EditorSession {
    let compositor = Compositor::new(
        EngineConfig::default(),
        Arc::new(InMemoryAssetSource::new()),
    );
    EditorSession::new(compositor, template)
}

fn image(w: u32, h: u32) -> SourceImage {
    SourceImage::from_rgba8(w, h, [0, 128, 255, 255].repeat((w * h) as usize)).unwrap()
}

fn phone() -> Template {
    Template::device(DeviceKind::phone(Orientation::Portrait))
}

#[test]
fn nothing_renders_before_an_image_arrives() {
    let mut s = session(phone());
    assert!(matches!(s.render(), RenderOutcome::Skipped));
    assert!(matches!(s.apply_fill(FillPreset::All), RenderOutcome::Skipped));
    assert!(s.frame().is_none());
}

#[test]
fn undecodable_bytes_are_rejected_without_rendering() {
    let mut s = session(phone());
    let err = s.load_image_bytes(b"definitely not an image").unwrap_err();
    assert!(matches!(err, ShotframeError::UnsupportedImage(_)));
    assert!(s.image().is_none());
    assert!(s.frame().is_none());
}

#[test]
fn new_image_resets_template_and_transform() {
    let mut s = session(phone());
    assert!(s.set_image(image(100, 200)).is_rendered());
    s.set_template(Template::device(DeviceKind::Laptop));
    s.set_transform(ImageTransform::new(2.0, 5.0, 5.0));

    assert!(s.set_image(image(50, 50)).is_rendered());
    assert_eq!(s.template(), &phone());
    assert_eq!(s.transform(), ImageTransform::IDENTITY);
}

#[test]
fn changing_device_identity_resets_transform() {
    let mut s = session(phone());
    s.set_image(image(100, 200));
    let moved = ImageTransform::new(1.5, 12.0, -4.0);
    s.set_transform(moved);

    s.set_template(phone().with_background(Backdrop::solid(Color::BLACK)));
    assert_eq!(s.transform(), moved);

    s.set_template(Template::device(DeviceKind::phone(Orientation::Landscape)));
    assert_eq!(s.transform(), ImageTransform::IDENTITY);
}

#[test]
fn slider_zoom_is_clamped_but_fill_is_not() {
    let mut s = session(phone());
    s.set_image(image(1000, 10));
    s.set_zoom(10.0);
    assert_eq!(s.transform().scale, 3.0);
    s.set_zoom(0.01);
    assert_eq!(s.transform().scale, 0.5);

    assert!(s.apply_fill(FillPreset::All).is_rendered());
    assert!(s.transform().scale > 3.0);
}

#[test]
fn fill_uses_real_screen_size_of_last_render() {
    let mut s = session(Template::device(DeviceKind::BrowserWindow));
    s.set_image(image(600, 600));
    let layout_screen = s.last_layout().unwrap().screen_size();
    assert_eq!(layout_screen, Size::new(1200.0, 675.0));

    s.apply_fill(FillPreset::Horizontal);
    let draw_w = crate::fit::place(
        s.last_layout().unwrap().screen_rect,
        Size::new(600.0, 600.0),
        s.transform(),
    )
    .width;
    assert!((draw_w - 1200.0).abs() < 1e-9);
}

#[test]
fn fill_falls_back_to_fixed_screens_without_a_render() {
    let s = session(Template::device(DeviceKind::phone(Orientation::Landscape)));
    assert_eq!(s.fill_screen_size(Size::new(10.0, 10.0)), Size::new(780.0, 380.0));
}

#[test]
fn drag_moves_device_image_and_ignores_flat() {
    let mut s = session(phone());
    s.set_image(image(100, 200));
    s.pointer_down(Point::new(300.0, 400.0));
    assert!(s.is_dragging());
    assert!(s.pointer_move(Point::new(320.0, 390.0)).is_rendered());
    assert_eq!(s.transform(), ImageTransform::new(1.0, 20.0, -10.0));
    s.pointer_up();
    assert!(matches!(s.pointer_move(Point::new(0.0, 0.0)), RenderOutcome::Skipped));

    s.set_template(Template::flat(Backdrop::solid(Color::WHITE)));
    s.pointer_down(Point::new(10.0, 10.0));
    assert!(!s.is_dragging());
}

#[test]
fn failed_render_keeps_previous_frame() {
    let mut s = session(phone());
    s.set_image(image(100, 200));
    let before = s.frame().unwrap().fingerprint();

    let outcome = s.set_template(Template::flat(Backdrop::gradient(Vec::<Color>::new(), 0.0)));
    assert!(matches!(outcome, RenderOutcome::Failed(_)));
    assert_eq!(s.frame().unwrap().fingerprint(), before);
    assert_eq!(s.frame_entitled, None);
}

#[test]
fn invalid_transform_is_rejected_before_it_is_stored() {
    let mut s = session(phone());
    s.set_image(image(100, 200));
    s.set_transform(ImageTransform::new(1.5, 4.0, 0.0));
    let before = s.frame().unwrap().fingerprint();

    for bad in [
        ImageTransform::new(0.0, 0.0, 0.0),
        ImageTransform::new(f64::NAN, 0.0, 0.0),
        ImageTransform::new(1.0, f64::INFINITY, 0.0),
    ] {
        assert!(matches!(
            s.set_transform(bad),
            RenderOutcome::Failed(ShotframeError::Validation(_))
        ));
    }
    assert!(matches!(s.set_zoom(f64::NAN), RenderOutcome::Failed(_)));
    assert_eq!(s.transform(), ImageTransform::new(1.5, 4.0, 0.0));
    assert_eq!(s.frame().unwrap().fingerprint(), before);
    assert_eq!(s.frame_entitled, Some(false));
}

#[test]
fn stale_clean_frame_is_never_exported_to_free_tier() {
    let mut s = session(phone());
    s.set_image(image(40, 80));
    assert!(s.set_entitled(true).is_rendered());
    let clean = s.frame().unwrap().clone();

    // Any state that cannot render leaves the clean frame behind.
    s.transform = ImageTransform::new(0.0, 0.0, 0.0);
    assert!(matches!(s.set_entitled(false), RenderOutcome::Failed(_)));
    assert_eq!(s.frame(), Some(&clean));

    let mut sink = InMemoryExportSink::new();
    let mut quota = LocalQuota::new(3);
    assert!(s.export(&mut sink, &mut quota, "free").is_err());
    assert!(sink.is_empty());
    assert_eq!(quota.used(), 0);
}

#[test]
fn export_rerenders_a_frame_made_under_other_entitlement() {
    let mut s = session(phone());
    s.set_image(image(40, 80));
    s.set_entitled(true);
    let clean = s.frame().unwrap().clone();

    let mut sink = InMemoryExportSink::new();
    let mut quota = LocalQuota::new(3);
    s.export(&mut sink, &mut quota, "free").unwrap();
    assert_eq!(s.frame_entitled, Some(false));
    assert_ne!(s.frame(), Some(&clean));
    assert_eq!(quota.used(), 1);
}

#[test]
fn export_gate_counts_free_uses() {
    let mut s = session(phone());
    s.set_image(image(40, 80));
    let mut sink = InMemoryExportSink::new();
    let mut quota = LocalQuota::new(1);

    s.export(&mut sink, &mut quota, "first").unwrap();
    assert_eq!(quota.used(), 1);
    let err = s.export(&mut sink, &mut quota, "second").unwrap_err();
    assert!(matches!(err, ShotframeError::QuotaExhausted(_)));
    assert_eq!(quota.used(), 1);
    assert_eq!(sink.len(), 1);
}

#[test]
fn export_without_a_frame_fails_and_records_nothing() {
    let mut s = session(phone());
    let mut sink = InMemoryExportSink::new();
    let mut quota = LocalQuota::default();
    assert!(s.export(&mut sink, &mut quota, "x").is_err());
    assert_eq!(quota.used(), 0);
}
