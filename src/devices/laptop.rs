use crate::assets::color::Color;
use crate::config::{EngineConfig, LaptopGeometry};
use crate::devices::{Device, DrawTarget};
use crate::foundation::core::{ScreenRect, Size};
use crate::foundation::error::ShotframeResult;
use crate::layout::LayoutResult;
use crate::layout::resolver::laptop_layout;
use crate::render::backdrop::rasterize_backdrop;
use crate::render::blur::{ShadowSpec, draw_drop_shadow};
use crate::render::shapes::{affine_to_cpu, circle, fill, polygon, rounded_rect};
use crate::render::surface::image_paint;
use crate::template::Backdrop;

const LID_RADIUS: f64 = 18.0;
const RIM: Color = Color::rgb(0x8e, 0x8e, 0x93);
const BEZEL: Color = Color::rgb(0x1d, 0x1d, 0x1f);
const CAMERA: Color = Color::rgb(0x3a, 0x3a, 0x3c);
const HINGE: Color = Color::rgb(0x48, 0x48, 0x4a);
const BASE_TOP: Color = Color::rgb(0xe3, 0xe3, 0xe8);
const BASE_BOTTOM: Color = Color::rgb(0xa8, 0xa8, 0xad);
const THUMB_NOTCH: Color = Color::rgb(0x9a, 0x9a, 0x9f);

const LAPTOP_SHADOW: ShadowSpec = ShadowSpec {
    radius: 36,
    sigma: 18.0,
    offset_y: 20.0,
    alpha: 70,
};

pub(crate) struct Laptop<'a> {
    pub(crate) cfg: &'a EngineConfig,
    pub(crate) backdrop: Backdrop,
}

/// Canvas-space parts of the procedural laptop, derived from the resolved screen rect.
#[derive(Clone, Debug, PartialEq)]
pub(crate) struct LaptopParts {
    pub(crate) lid: ScreenRect,
    /// Camera housing hanging from the top bezel into the screen.
    pub(crate) notch: ScreenRect,
    pub(crate) hinge: ScreenRect,
    /// Base trapezoid corners, clockwise from top-left.
    pub(crate) base: [(f64, f64); 4],
}

impl LaptopParts {
    pub(crate) fn new(screen: ScreenRect, g: &LaptopGeometry) -> Self {
        let lid_size = g.lid();
        let lid = ScreenRect::new(
            screen.x - g.bezel_side,
            screen.y - g.bezel_top,
            lid_size.width,
            lid_size.height,
        );
        let notch_w = screen.width * 0.1;
        let notch = ScreenRect::new(
            lid.center().x - notch_w / 2.0,
            screen.y - 4.0,
            notch_w,
            4.0 + g.bezel_top * 0.6,
        );
        let hinge = ScreenRect::new(lid.x + LID_RADIUS, lid.bottom(), lid.width - 2.0 * LID_RADIUS, g.hinge_gap);

        let cx = lid.center().x;
        let top = lid.bottom() + g.hinge_gap;
        let bottom = top + g.base_height;
        let top_half = lid.width / 2.0 + g.base_top_overhang;
        let bottom_half = lid.width / 2.0 + g.base_bottom_overhang;
        Self {
            lid,
            notch,
            hinge,
            base: [
                (cx - top_half, top),
                (cx + top_half, top),
                (cx + bottom_half, bottom),
                (cx - bottom_half, bottom),
            ],
        }
    }

    fn base_bounds(&self) -> ScreenRect {
        let xs = self.base.map(|(x, _)| x);
        let ys = self.base.map(|(_, y)| y);
        let x0 = xs.iter().copied().fold(f64::INFINITY, f64::min);
        let x1 = xs.iter().copied().fold(f64::NEG_INFINITY, f64::max);
        let y0 = ys.iter().copied().fold(f64::INFINITY, f64::min);
        let y1 = ys.iter().copied().fold(f64::NEG_INFINITY, f64::max);
        ScreenRect::new(x0, y0, x1 - x0, y1 - y0)
    }
}

impl Device for Laptop<'_> {
    fn resolve_layout(&self, _image_size: Size) -> ShotframeResult<LayoutResult> {
        laptop_layout(self.backdrop.clone(), self.cfg)
    }

    fn draw_underlay(
        &self,
        layout: &LayoutResult,
        target: &mut DrawTarget<'_>,
    ) -> ShotframeResult<()> {
        let parts = LaptopParts::new(layout.screen_rect, &self.cfg.laptop);
        draw_drop_shadow(target.surface, parts.lid, LAPTOP_SHADOW)
    }

    fn draw_ornamentation(
        &self,
        layout: &LayoutResult,
        target: &mut DrawTarget<'_>,
    ) -> ShotframeResult<()> {
        let parts = LaptopParts::new(layout.screen_rect, &self.cfg.laptop);

        let rim = rounded_rect(parts.lid, LID_RADIUS);
        let bezel = rounded_rect(parts.lid.inflate(-2.0), LID_RADIUS - 2.0);
        let screen = rounded_rect(layout.screen_rect, layout.screen_radius);
        target.painter.draw_masked(
            target.surface,
            true,
            |ctx| {
                fill(ctx, &rim, RIM);
                fill(ctx, &bezel, BEZEL);
                Ok(())
            },
            |ctx| {
                fill(ctx, &screen, Color::WHITE);
                Ok(())
            },
        )?;

        // Base: silver vertical gradient clipped to the trapezoid.
        let bounds = parts.base_bounds();
        let (bw, bh) = (bounds.width.ceil().max(1.0) as u32, bounds.height.ceil().max(1.0) as u32);
        let silver = rasterize_backdrop(&Backdrop::gradient([BASE_TOP, BASE_BOTTOM], 90.0), bw, bh)?;
        let silver = image_paint(&silver, bw, bh)?;
        let local_base = polygon(&parts.base.map(|(x, y)| (x - bounds.x, y - bounds.y)));
        let base_xf = affine_to_cpu(kurbo::Affine::translate((bounds.x, bounds.y)));

        let notch = rounded_rect(parts.notch, 6.0);
        let cam = circle(parts.notch.center().x, parts.notch.y + parts.notch.height * 0.55, 3.0);
        let hinge = rounded_rect(parts.hinge, 0.0);
        let thumb = rounded_rect(
            ScreenRect::new(bounds.center().x - 70.0, bounds.y, 140.0, bounds.height * 0.3),
            4.0,
        );

        target.painter.draw(target.surface, |ctx| {
            fill(ctx, &notch, BEZEL);
            fill(ctx, &cam, CAMERA);
            fill(ctx, &hinge, HINGE);

            ctx.set_transform(base_xf);
            ctx.set_paint(silver);
            ctx.fill_path(&local_base);

            fill(ctx, &thumb, THUMB_NOTCH);
            Ok(())
        })
    }
}

#[cfg(test)]
#[path = "../../tests/unit/devices/laptop.rs"]
mod tests;
