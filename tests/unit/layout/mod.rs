use std::sync::Arc;

use super::*;
use crate::assets::color::Color;
use crate::assets::source::InMemoryAssetSource;
use crate::template::{DeviceKind, Orientation};

fn empty_cache() -> FrameAssetCache {
    FrameAssetCache::new(Arc::new(InMemoryAssetSource::new()))
}

#[test]
fn flat_wide_image_is_scaled_to_max_width() {
    let cfg = EngineConfig::default();
    let t = Template::flat(Backdrop::solid(Color::BLACK));
    let l = resolve_layout(&t, Size::new(3200.0, 1000.0), &cfg, &mut empty_cache()).unwrap();
    assert_eq!(l.canvas, Canvas { width: 1800, height: 700 });
    assert_eq!(l.screen_rect, ScreenRect::new(100.0, 100.0, 1600.0, 500.0));
    assert_eq!(l.frame, FrameSource::None);
}

#[test]
fn flat_small_image_is_never_upscaled() {
    let cfg = EngineConfig::default();
    let t = Template::flat(Backdrop::solid(Color::BLACK));
    let l = resolve_layout(&t, Size::new(500.0, 500.0), &cfg, &mut empty_cache()).unwrap();
    assert_eq!(l.canvas, Canvas { width: 700, height: 700 });
    assert_eq!(l.screen_size(), Size::new(500.0, 500.0));
}

#[test]
fn device_without_background_gets_default_backdrop() {
    let cfg = EngineConfig::default();
    let t = Template::device(DeviceKind::Laptop);
    let l = resolve_layout(&t, Size::new(10.0, 10.0), &cfg, &mut empty_cache()).unwrap();
    assert_eq!(l.backdrop, cfg.default_device_backdrop);

    let chosen = Backdrop::solid(Color::rgb(1, 2, 3));
    let t = Template::device(DeviceKind::Laptop).with_background(chosen.clone());
    let l = resolve_layout(&t, Size::new(10.0, 10.0), &cfg, &mut empty_cache()).unwrap();
    assert_eq!(l.backdrop, chosen);
}

#[test]
fn missing_assets_fall_back_to_fixed_screens() {
    let cfg = EngineConfig::default();
    let mut cache = empty_cache();

    let portrait = Template::device(DeviceKind::phone(Orientation::Portrait));
    let l = resolve_layout(&portrait, Size::new(10.0, 10.0), &cfg, &mut cache).unwrap();
    assert_eq!(l.screen_size(), Size::new(380.0, 780.0));
    assert!(matches!(l.frame, FrameSource::Fallback { .. }));

    let landscape = Template::device(DeviceKind::phone(Orientation::Landscape));
    let l = resolve_layout(&landscape, Size::new(10.0, 10.0), &cfg, &mut cache).unwrap();
    assert_eq!(l.screen_size(), Size::new(780.0, 380.0));

    let tablet = Template::device(DeviceKind::tablet());
    let l = resolve_layout(&tablet, Size::new(10.0, 10.0), &cfg, &mut cache).unwrap();
    assert_eq!(l.screen_size(), Size::new(1024.0, 768.0));
}

#[test]
fn browser_canvas_adds_title_bar_and_padding() {
    let cfg = EngineConfig::default();
    let t = Template::device(DeviceKind::BrowserWindow);
    let l = resolve_layout(&t, Size::new(640.0, 480.0), &cfg, &mut empty_cache()).unwrap();
    assert_eq!(l.canvas, Canvas { width: 1400, height: 915 });
}

#[test]
fn invalid_templates_and_images_are_rejected() {
    let cfg = EngineConfig::default();
    let empty = Template::flat(Backdrop::Gradient {
        colors: vec![],
        angle_degrees: 0.0,
    });
    assert!(resolve_layout(&empty, Size::new(10.0, 10.0), &cfg, &mut empty_cache()).is_err());

    let flat = Template::flat(Backdrop::solid(Color::WHITE));
    assert!(resolve_layout(&flat, Size::new(0.0, 10.0), &cfg, &mut empty_cache()).is_err());
}

#[test]
fn layout_result_serializes_frame_mode() {
    let cfg = EngineConfig::default();
    let t = Template::device(DeviceKind::Laptop);
    let l = resolve_layout(&t, Size::new(10.0, 10.0), &cfg, &mut empty_cache()).unwrap();
    let v = serde_json::to_value(&l).unwrap();
    assert_eq!(v["frame"]["mode"], "procedural");
    let back: LayoutResult = serde_json::from_value(v).unwrap();
    assert_eq!(back, l);
}
