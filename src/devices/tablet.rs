use std::sync::Arc;

use crate::assets::color::Color;
use crate::assets::frame::DeviceFrameAsset;
use crate::config::EngineConfig;
use crate::devices::{Device, DrawTarget, draw_fallback_body, draw_frame_bitmap};
use crate::foundation::core::Size;
use crate::foundation::error::ShotframeResult;
use crate::layout::resolver::{TABLET_FALLBACK_BEZEL, bitmap_device_layout, fallback_device_layout};
use crate::layout::{FrameSource, LayoutResult};
use crate::render::shapes::{circle, fill};
use crate::template::Backdrop;

const CAMERA: Color = Color::rgb(0x3a, 0x3a, 0x3c);

/// Fixed-landscape tablet. The asset is authored landscape, so it is never rotated.
pub(crate) struct Tablet<'a> {
    pub(crate) cfg: &'a EngineConfig,
    pub(crate) asset_path: String,
    pub(crate) asset: Option<Arc<DeviceFrameAsset>>,
    pub(crate) backdrop: Backdrop,
}

impl Device for Tablet<'_> {
    fn resolve_layout(&self, _image_size: Size) -> ShotframeResult<LayoutResult> {
        match &self.asset {
            Some(a) => bitmap_device_layout(
                &self.asset_path,
                a.frame_size,
                a.screen_rect,
                self.cfg.tablet_display_scale,
                false,
                self.backdrop.clone(),
                self.cfg,
            ),
            None => fallback_device_layout(
                self.cfg.fallback.tablet,
                TABLET_FALLBACK_BEZEL,
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
        if let (Some(asset), FrameSource::Bitmap { display_scale, .. }) =
            (&self.asset, &layout.frame)
        {
            return draw_frame_bitmap(target, asset, layout.device_rect, *display_scale, false);
        }

        draw_fallback_body(target, layout, TABLET_FALLBACK_BEZEL)?;
        let d = layout.device_rect;
        let cam = circle(d.center().x, d.y + TABLET_FALLBACK_BEZEL / 2.0, 4.0);
        target.painter.draw(target.surface, |ctx| {
            fill(ctx, &cam, CAMERA);
            Ok(())
        })
    }
}
