use super::*;
use crate::render::surface::{Painter, Surface};

#[test]
fn chrome_positions_follow_title_bar() {
    let c = BrowserChrome::new(ScreenRect::new(100.0, 100.0, 1200.0, 715.0), 40.0);
    assert_eq!(c.lights, [(120.0, 120.0), (140.0, 120.0), (160.0, 120.0)]);
    assert_eq!(c.separator, ScreenRect::new(100.0, 139.0, 1200.0, 1.0));
    assert_eq!(c.address_bar, ScreenRect::new(400.0, 108.0, 600.0, 24.0));
}

#[test]
fn ornamentation_paints_traffic_lights_and_leaves_content_clear() {
    let cfg = EngineConfig::default();
    let device = BrowserWindow {
        cfg: &cfg,
        backdrop: Backdrop::solid(Color::WHITE),
    };
    let layout = device.resolve_layout(Size::new(10.0, 10.0)).unwrap();
    let mut surface = Surface::new(layout.canvas);
    let mut painter = Painter::new();
    device
        .draw_ornamentation(
            &layout,
            &mut DrawTarget {
                painter: &mut painter,
                surface: &mut surface,
            },
        )
        .unwrap();
    let f = surface.into_frame();

    assert_eq!(f.pixel(120, 120), Some([0xff, 0x5f, 0x57, 255]));
    assert_eq!(f.pixel(140, 120), Some([0xfe, 0xbc, 0x2e, 255]));
    assert_eq!(f.pixel(160, 120), Some([0x28, 0xc8, 0x40, 255]));
    assert_eq!(f.pixel(700, 120), Some([255, 255, 255, 255]));
    assert_eq!(f.pixel(300, 110), Some([0xe8, 0xe8, 0xed, 255]));
    assert_eq!(f.pixel(700, 500), Some([0, 0, 0, 0]));
}
