use super::*;
use crate::foundation::core::Point;
use crate::render::surface::{Painter, Surface};

fn fallback_phone(cfg: &EngineConfig, orientation: Orientation) -> Phone<'_> {
    Phone {
        cfg,
        orientation,
        asset_path: crate::template::DEFAULT_PHONE_ASSET.to_string(),
        asset: None,
        backdrop: Backdrop::solid(Color::WHITE),
    }
}

#[test]
fn fallback_draws_island_near_top_edge_in_portrait() {
    let cfg = EngineConfig::default();
    let phone = fallback_phone(&cfg, Orientation::Portrait);
    let layout = phone.resolve_layout(Size::new(100.0, 100.0)).unwrap();
    let mut surface = Surface::new(layout.canvas);
    let mut painter = Painter::new();
    phone
        .draw_ornamentation(
            &layout,
            &mut DrawTarget {
                painter: &mut painter,
                surface: &mut surface,
            },
        )
        .unwrap();
    let frame = surface.into_frame();
    let s = layout.screen_rect;
    let island = Point::new(s.center().x, s.y + 12.0 + 8.0);
    assert_eq!(frame.pixel(island.x as u32, island.y as u32), Some([0, 0, 0, 255]));
    // Lower screen area stays clear for the user image.
    assert_eq!(
        frame.pixel(s.center().x as u32, s.center().y as u32),
        Some([0, 0, 0, 0])
    );
}

#[test]
fn fallback_island_moves_to_the_side_in_landscape() {
    let cfg = EngineConfig::default();
    let phone = fallback_phone(&cfg, Orientation::Landscape);
    let layout = phone.resolve_layout(Size::new(100.0, 100.0)).unwrap();
    let mut surface = Surface::new(layout.canvas);
    let mut painter = Painter::new();
    phone
        .draw_ornamentation(
            &layout,
            &mut DrawTarget {
                painter: &mut painter,
                surface: &mut surface,
            },
        )
        .unwrap();
    let frame = surface.into_frame();
    let s = layout.screen_rect;
    assert_eq!(
        frame.pixel((s.x + 12.0 + 8.0) as u32, s.center().y as u32),
        Some([0, 0, 0, 255])
    );
    assert_eq!(
        frame.pixel(s.center().x as u32, (s.y + 12.0 + 8.0) as u32),
        Some([0, 0, 0, 0])
    );
}
