use std::sync::Arc;

use crate::assets::color::Color;
use crate::assets::frame::DeviceFrameAsset;
use crate::config::EngineConfig;
use crate::devices::{Device, DrawTarget, draw_fallback_body, draw_frame_bitmap};
use crate::foundation::core::{ScreenRect, Size};
use crate::foundation::error::ShotframeResult;
use crate::layout::resolver::{PHONE_FALLBACK_BEZEL, bitmap_device_layout, fallback_device_layout};
use crate::layout::{FrameSource, LayoutResult};
use crate::render::shapes::{fill, pill, rounded_rect};
use crate::template::{Backdrop, Orientation};

const ISLAND: Color = Color::rgb(0, 0, 0);
const BUTTON: Color = Color::rgb(0x2c, 0x2c, 0x2e);

pub(crate) struct Phone<'a> {
    pub(crate) cfg: &'a EngineConfig,
    pub(crate) orientation: Orientation,
    pub(crate) asset_path: String,
    pub(crate) asset: Option<Arc<DeviceFrameAsset>>,
    pub(crate) backdrop: Backdrop,
}

impl Device for Phone<'_> {
    fn resolve_layout(&self, _image_size: Size) -> ShotframeResult<LayoutResult> {
        match &self.asset {
            Some(a) => bitmap_device_layout(
                &self.asset_path,
                a.frame_size,
                a.screen_rect,
                self.cfg.phone_display_scale,
                self.orientation == Orientation::Landscape,
                self.backdrop.clone(),
                self.cfg,
            ),
            None => fallback_device_layout(
                self.cfg.fallback.phone_for(self.orientation),
                PHONE_FALLBACK_BEZEL,
                self.backdrop.clone(),
                self.cfg,
            ),
        }
    }

    fn draw_ornamentation(
        &self,
        layout: &LayoutResult,
        target: &mut DrawTarget<'_>,
    ) -> ShotframeResult<()> {
        match (&self.asset, &layout.frame) {
            (
                Some(asset),
                FrameSource::Bitmap {
                    display_scale,
                    rotated,
                    ..
                },
            ) => draw_frame_bitmap(target, asset, layout.device_rect, *display_scale, *rotated),
            _ => self.draw_fallback(layout, target),
        }
    }
}

impl Phone<'_> {
    fn draw_fallback(&self, layout: &LayoutResult, target: &mut DrawTarget<'_>) -> ShotframeResult<()> {
        draw_fallback_body(target, layout, PHONE_FALLBACK_BEZEL)?;

        let s = layout.screen_rect;
        let d = layout.device_rect;
        let landscape = self.orientation == Orientation::Landscape;
        let short = s.width.min(s.height);
        let (island_long, island_short) = (short * 0.32, (short * 0.09).min(34.0));
        let inset = 12.0;

        let island = if landscape {
            ScreenRect::new(
                s.x + inset,
                s.center().y - island_long / 2.0,
                island_short,
                island_long,
            )
        } else {
            ScreenRect::new(
                s.center().x - island_long / 2.0,
                s.y + inset,
                island_long,
                island_short,
            )
        };

        // Along the long edge: two volume buttons on one side, power on the other.
        let long = if landscape { d.width } else { d.height };
        let spans = [(0.20, 0.08), (0.31, 0.08), (0.25, 0.12)];
        let buttons: Vec<ScreenRect> = spans
            .iter()
            .enumerate()
            .map(|(i, &(at, len))| {
                let first_side = i < 2;
                if landscape {
                    let x = d.right() - (at + len) * long;
                    let y = if first_side { d.bottom() } else { d.y - 3.0 };
                    ScreenRect::new(x, y, len * long, 3.0)
                } else {
                    let x = if first_side { d.x - 3.0 } else { d.right() };
                    ScreenRect::new(x, d.y + at * long, 3.0, len * long)
                }
            })
            .collect();

        target.painter.draw(target.surface, |ctx| {
            fill(ctx, &pill(island), ISLAND);
            for b in &buttons {
                fill(ctx, &rounded_rect(*b, 1.5), BUTTON);
            }
            Ok(())
        })
    }
}

#[cfg(test)]
#[path = "../../tests/unit/devices/phone.rs"]
mod tests;
