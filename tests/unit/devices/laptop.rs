use super::*;
use crate::render::surface::{Painter, Surface};

#[test]
fn parts_wrap_the_screen() {
    let g = LaptopGeometry::default();
    let parts = LaptopParts::new(ScreenRect::new(204.0, 128.0, 1280.0, 800.0), &g);
    assert_eq!(parts.lid, ScreenRect::new(190.0, 100.0, 1308.0, 842.0));
    assert_eq!(parts.hinge.y, 942.0);
    assert_eq!(parts.hinge.height, 3.0);
    assert_eq!(parts.base[0], (130.0, 945.0));
    assert_eq!(parts.base[2], (1588.0, 967.0));
    assert_eq!(parts.base_bounds(), ScreenRect::new(100.0, 945.0, 1488.0, 22.0));
}

#[test]
fn ornamentation_draws_bezel_and_base() {
    let cfg = EngineConfig::default();
    let device = Laptop {
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

    // Side bezel, away from the rim.
    assert_eq!(f.pixel(198, 500), Some([0x1d, 0x1d, 0x1f, 255]));
    // Screen middle untouched.
    assert_eq!(f.pixel(844, 600), Some([0, 0, 0, 0]));
    // Base is opaque silver.
    let base = f.pixel(300, 956).unwrap();
    assert_eq!(base[3], 255);
    assert!(base[0] > 150, "{base:?}");
}
