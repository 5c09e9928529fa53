use super::*;
use crate::assets::source::InMemoryAssetSource;
use crate::foundation::core::Canvas;
use crate::foundation::error::ShotframeError;
use crate::layout::FrameSource;
use crate::template::{Backdrop, DeviceKind, Orientation};

fn red_image(w: u32, h: u32) -> SourceImage {
    SourceImage::from_rgba8(w, h, [255, 0, 0, 255].repeat((w * h) as usize)).unwrap()
}

fn compositor_without_assets() -> Compositor {
    Compositor::new(EngineConfig::default(), Arc::new(InMemoryAssetSource::new()))
}

/// Request without branding, so pixel checks do not depend on installed fonts.
fn entitled<'a>(image: &'a SourceImage, template: &'a Template) -> ComposeRequest<'a> {
    let mut req = ComposeRequest::new(image, template);
    req.entitled = true;
    req
}

fn close(px: [u8; 4], want: [u8; 4]) -> bool {
    px.iter().zip(want).all(|(a, b)| a.abs_diff(b) <= 2)
}

#[test]
fn fallback_phone_fills_screen_then_draws_image() {
    let mut c = compositor_without_assets();
    let image = red_image(100, 200);
    let template = Template::device(DeviceKind::phone(Orientation::Portrait));
    let out = c.compose(entitled(&image, &template)).unwrap();

    assert_eq!(out.layout.canvas, Canvas { width: 608, height: 1008 });
    assert!(matches!(out.layout.frame, FrameSource::Fallback { .. }));
    let d = out.draw_rect;
    let want = ScreenRect::new(114.0, 124.0, 380.0, 760.0);
    assert!(
        (d.x - want.x).abs() < 1e-9
            && (d.y - want.y).abs() < 1e-9
            && (d.width - want.width).abs() < 1e-9
            && (d.height - want.height).abs() < 1e-9,
        "{d:?}"
    );

    let centre = out.frame.pixel(304, 504).unwrap();
    assert!(close(centre, [255, 0, 0, 255]), "{centre:?}");
    // Above the image, below the top screen edge: uncovered screen area.
    let gap = out.frame.pixel(200, 118).unwrap();
    assert!(close(gap, [255, 255, 255, 255]), "{gap:?}");
}

#[test]
fn black_screen_fill_shows_around_zoomed_out_image() {
    let mut c = compositor_without_assets();
    let image = red_image(100, 200);
    let template = Template::device(DeviceKind::phone(Orientation::Portrait));
    let mut req = entitled(&image, &template);
    req.transform = ImageTransform::new(0.5, 0.0, 0.0);
    req.screen_fill = ScreenFill::Black;
    let out = c.compose(req).unwrap();

    let beside = out.frame.pixel(150, 504).unwrap();
    assert!(close(beside, [0, 0, 0, 255]), "{beside:?}");
    let centre = out.frame.pixel(304, 504).unwrap();
    assert!(close(centre, [255, 0, 0, 255]), "{centre:?}");
}

#[test]
fn flat_background_ignores_user_transform() {
    let mut c = compositor_without_assets();
    let image = red_image(500, 500);
    let template = Template::flat(Backdrop::solid(Color::rgb(0, 0, 255)));
    let mut req = entitled(&image, &template);
    req.transform = ImageTransform::new(2.5, 40.0, -10.0);
    let out = c.compose(req).unwrap();

    assert_eq!(out.layout.canvas, Canvas { width: 700, height: 700 });
    assert_eq!(out.draw_rect, out.layout.screen_rect);
    assert!(close(out.frame.pixel(2, 2).unwrap(), [0, 0, 255, 255]));
    assert!(close(out.frame.pixel(350, 350).unwrap(), [255, 0, 0, 255]));
}

#[test]
fn invalid_transform_is_rejected() {
    let mut c = compositor_without_assets();
    let image = red_image(10, 10);
    let template = Template::device(DeviceKind::Laptop);
    let mut req = entitled(&image, &template);
    req.transform = ImageTransform::new(0.0, 0.0, 0.0);
    assert!(c.compose(req).is_err());
}

#[test]
fn frame_assets_are_read_once_across_composites() {
    let mut src = InMemoryAssetSource::new();
    let json = serde_json::json!({
        "frameSize": { "width": 400, "height": 800 },
        "screen": { "x": 20, "y": 20, "width": 360, "height": 760 }
    });
    src.insert("frames/phone.json", serde_json::to_vec(&json).unwrap())
        .unwrap();
    let png = {
        let img = image::RgbaImage::from_pixel(40, 80, image::Rgba([0, 0, 0, 0]));
        let mut out = std::io::Cursor::new(Vec::new());
        img.write_to(&mut out, image::ImageFormat::Png).unwrap();
        out.into_inner()
    };
    src.insert("frames/phone.png", png).unwrap();
    let src = Arc::new(src);

    let mut c = Compositor::new(EngineConfig::default(), src.clone());
    let image = red_image(20, 40);
    let template = Template::device(DeviceKind::phone(Orientation::Portrait));
    c.compose(entitled(&image, &template)).unwrap();
    let reads = src.read_count();
    c.compose(entitled(&image, &template)).unwrap();
    assert_eq!(src.read_count(), reads);
}

#[test]
fn composites_are_deterministic() {
    let mut c = compositor_without_assets();
    let image = red_image(64, 48);
    let template = Template::device(DeviceKind::BrowserWindow);
    let a = c.compose(entitled(&image, &template)).unwrap();
    let b = c.compose(entitled(&image, &template)).unwrap();
    assert_eq!(a.frame.fingerprint(), b.frame.fingerprint());
}

#[test]
fn free_tier_without_a_font_fails_instead_of_dropping_branding() {
    let mut c = compositor_without_assets();
    c.watermark = Watermarker::without_font(c.cfg.watermark.clone());
    let image = red_image(40, 80);
    let template = Template::device(DeviceKind::phone(Orientation::Portrait));

    let err = c
        .compose(ComposeRequest::new(&image, &template))
        .unwrap_err();
    assert!(matches!(err, ShotframeError::Render(_)));
    assert!(c.compose(entitled(&image, &template)).is_ok());
}

#[test]
fn free_tier_composite_is_branded_or_refused() {
    let mut c = compositor_without_assets();
    let image = red_image(40, 80);
    let template = Template::flat(Backdrop::solid(Color::rgb(0, 0, 255)));
    let clean = c.compose(entitled(&image, &template)).unwrap();

    match c.compose(ComposeRequest::new(&image, &template)) {
        Ok(branded) => {
            assert_ne!(branded.frame.fingerprint(), clean.frame.fingerprint());
            let (w, h) = (branded.frame.width, branded.frame.height);
            let corner_changed = (h / 2..h)
                .flat_map(|y| (w / 2..w).map(move |x| (x, y)))
                .any(|(x, y)| branded.frame.pixel(x, y) != clean.frame.pixel(x, y));
            assert!(corner_changed, "branding missing from bottom-right");
        }
        Err(e) => assert!(matches!(e, ShotframeError::Render(_)), "{e}"),
    }
}

#[test]
fn very_wide_source_still_composites() {
    let mut c = compositor_without_assets();
    let image = red_image(66_000, 4);
    let template = Template::device(DeviceKind::Laptop);
    let out = c.compose(entitled(&image, &template)).unwrap();
    assert!(out.draw_rect.width > 0.0);
}
