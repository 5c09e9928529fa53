//! Per-device capability implementations.
//!
//! One [`Device`] is selected per render from the template variant. It resolves the layout and
//! paints everything device specific: shadows beneath the screen content (`draw_underlay`) and
//! ornamentation above it (`draw_ornamentation`).

mod browser;
mod flat;
mod laptop;
mod phone;
mod tablet;

use std::sync::Arc;

use crate::assets::color::Color;
use crate::assets::frame::{DeviceFrameAsset, FrameAssetCache};
use crate::config::EngineConfig;
use crate::foundation::core::{Point, ScreenRect, Size};
use crate::foundation::error::ShotframeResult;
use crate::layout::LayoutResult;
use crate::layout::rotate::landscape_frame_affine;
use crate::render::shapes::{affine_to_cpu, fill, rounded_rect};
use crate::render::surface::{Painter, Surface, source_image_paint};
use crate::template::{DeviceKind, Template};

pub(crate) use browser::BrowserWindow;
pub(crate) use flat::FlatCard;
pub(crate) use laptop::Laptop;
pub(crate) use phone::Phone;
pub(crate) use tablet::Tablet;

/// Surface plus painter handed to device drawing code.
pub(crate) struct DrawTarget<'a> {
    pub(crate) painter: &'a mut Painter,
    pub(crate) surface: &'a mut Surface,
}

pub(crate) trait Device {
    fn resolve_layout(&self, image_size: Size) -> ShotframeResult<LayoutResult>;

    /// Paint below the screen content, on top of the backdrop.
    fn draw_underlay(
        &self,
        _layout: &LayoutResult,
        _target: &mut DrawTarget<'_>,
    ) -> ShotframeResult<()> {
        Ok(())
    }

    /// Paint device chrome above the clipped screen content.
    fn draw_ornamentation(
        &self,
        layout: &LayoutResult,
        target: &mut DrawTarget<'_>,
    ) -> ShotframeResult<()>;
}

/// Pick the capability implementation for `template`, loading bitmap assets through `cache`.
pub(crate) fn select_device<'a>(
    template: &Template,
    cfg: &'a EngineConfig,
    cache: &mut FrameAssetCache,
) -> ShotframeResult<Box<dyn Device + 'a>> {
    template.validate()?;
    let backdrop = template.resolved_backdrop(&cfg.default_device_backdrop);
    let device: Box<dyn Device + 'a> = match template {
        Template::FlatBackground { .. } => Box::new(FlatCard { cfg, backdrop }),
        Template::Device { device, .. } => match device {
            DeviceKind::Phone { orientation, asset } => Box::new(Phone {
                cfg,
                orientation: *orientation,
                asset_path: asset.clone(),
                asset: cache.load(asset),
                backdrop,
            }),
            DeviceKind::Tablet { asset } => Box::new(Tablet {
                cfg,
                asset_path: asset.clone(),
                asset: cache.load(asset),
                backdrop,
            }),
            DeviceKind::Laptop => Box::new(Laptop { cfg, backdrop }),
            DeviceKind::BrowserWindow => Box::new(BrowserWindow { cfg, backdrop }),
        },
    };
    Ok(device)
}

/// Bezel color of the simplified fallback frames.
pub(crate) const FALLBACK_BEZEL: Color = Color::rgb(0x1c, 0x1c, 0x1e);

/// Draw a cached frame bitmap over the device box.
///
/// Upright frames are scaled into place. Rotated frames use the quarter-turn affine shared with
/// the screen-rect rotation, drawing in native portrait coordinates.
pub(crate) fn draw_frame_bitmap(
    target: &mut DrawTarget<'_>,
    asset: &Arc<DeviceFrameAsset>,
    device_rect: ScreenRect,
    scale: f64,
    rotated: bool,
) -> ShotframeResult<()> {
    let native = asset.frame_size.size();
    let uploaded = source_image_paint(&asset.frame_bitmap)?;
    let (bw, bh) = (f64::from(uploaded.width), f64::from(uploaded.height));
    let to_native = kurbo::Affine::scale_non_uniform(native.width / bw, native.height / bh);
    let place = if rotated {
        landscape_frame_affine(native, scale, Point::new(device_rect.x, device_rect.y))
    } else {
        kurbo::Affine::translate((device_rect.x, device_rect.y)) * kurbo::Affine::scale(scale)
    };
    let paint = uploaded.paint;
    let xf = affine_to_cpu(place * to_native);
    target.painter.draw(target.surface, |ctx| {
        ctx.set_transform(xf);
        ctx.set_paint(paint);
        ctx.fill_rect(&vello_cpu::kurbo::Rect::new(0.0, 0.0, bw, bh));
        Ok(())
    })
}

/// Flat dark body around the screen, leaving the screen itself untouched.
pub(crate) fn draw_fallback_body(
    target: &mut DrawTarget<'_>,
    layout: &LayoutResult,
    bezel: f64,
) -> ShotframeResult<()> {
    let body = rounded_rect(layout.device_rect, layout.screen_radius + bezel);
    let hole = rounded_rect(layout.screen_rect, layout.screen_radius);
    target.painter.draw_masked(
        target.surface,
        true,
        |ctx| {
            fill(ctx, &body, FALLBACK_BEZEL);
            Ok(())
        },
        |ctx| {
            fill(ctx, &hole, Color::WHITE);
            Ok(())
        },
    )
}

#[cfg(test)]
#[path = "../../tests/unit/devices/mod.rs"]
mod tests;
