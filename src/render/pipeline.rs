use std::path::PathBuf;
use std::sync::Arc;

use crate::assets::color::Color;
use crate::assets::decode::SourceImage;
use crate::assets::frame::FrameAssetCache;
use crate::assets::source::{AssetSource, FsAssetSource};
use crate::config::EngineConfig;
use crate::devices::{DrawTarget, select_device};
use crate::fit::{ImageTransform, place};
use crate::foundation::core::{ScreenRect, Size};
use crate::foundation::error::ShotframeResult;
use crate::layout::LayoutResult;
use crate::render::backdrop::rasterize_backdrop;
use crate::render::shapes::{fill, rect, rounded_rect};
use crate::render::surface::{FrameRGBA, Painter, Surface, source_image_paint};
use crate::template::Template;
use crate::text::watermark::{Watermarker, plan_stamps};

/// Color painted behind the user image inside the screen clip.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum ScreenFill {
    #[default]
    White,
    Black,
}

impl ScreenFill {
    pub fn color(self) -> Color {
        match self {
            Self::White => Color::WHITE,
            Self::Black => Color::BLACK,
        }
    }
}

/// Everything one composite depends on.
#[derive(Clone, Copy, Debug)]
pub struct ComposeRequest<'a> {
    pub image: &'a SourceImage,
    pub template: &'a Template,
    /// Ignored for flat backgrounds, where the scaled image is the screen.
    pub transform: ImageTransform,
    pub custom_text: &'a str,
    pub entitled: bool,
    pub screen_fill: ScreenFill,
}

impl<'a> ComposeRequest<'a> {
    pub fn new(image: &'a SourceImage, template: &'a Template) -> Self {
        Self {
            image,
            template,
            transform: ImageTransform::IDENTITY,
            custom_text: "",
            entitled: false,
            screen_fill: ScreenFill::White,
        }
    }
}

/// A finished render and the geometry it was produced from.
#[derive(Clone, Debug)]
pub struct Composite {
    /// Premultiplied RGBA8 pixels.
    pub frame: FrameRGBA,
    pub layout: LayoutResult,
    /// Where the user image was drawn, before clipping.
    pub draw_rect: ScreenRect,
}

/// Owns the frame asset cache and render scratch state across composites.
pub struct Compositor {
    cfg: EngineConfig,
    assets: FrameAssetCache,
    painter: Painter,
    watermark: Watermarker,
}

impl std::fmt::Debug for Compositor {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Compositor")
            .field("assets", &self.assets)
            .field("painter", &self.painter)
            .finish_non_exhaustive()
    }
}

impl Compositor {
    pub fn new(cfg: EngineConfig, source: Arc<dyn AssetSource + Send + Sync>) -> Self {
        let watermark = Watermarker::new(cfg.watermark.clone());
        Self {
            cfg,
            assets: FrameAssetCache::new(source),
            painter: Painter::new(),
            watermark,
        }
    }

    /// Compositor reading frame assets from `cfg.assets_dir`, or `./assets` when unset.
    pub fn from_config(cfg: EngineConfig) -> Self {
        let root = cfg
            .assets_dir
            .clone()
            .unwrap_or_else(|| PathBuf::from("assets"));
        Self::new(cfg, Arc::new(FsAssetSource::new(root)))
    }

    pub fn config(&self) -> &EngineConfig {
        &self.cfg
    }

    pub fn resolve_layout(
        &mut self,
        template: &Template,
        image_size: Size,
    ) -> ShotframeResult<LayoutResult> {
        crate::layout::resolve_layout(template, image_size, &self.cfg, &mut self.assets)
    }

    /// Render `req` into a fresh surface.
    ///
    /// Layers, back to front: backdrop, device underlay (shadows), screen fill and user image
    /// clipped to the rounded screen rect, device ornamentation, watermark stamps.
    #[tracing::instrument(skip(self, req), fields(flat = req.template.is_flat(), entitled = req.entitled))]
    pub fn compose(&mut self, req: ComposeRequest<'_>) -> ShotframeResult<Composite> {
        req.transform.validate()?;
        let device = select_device(req.template, &self.cfg, &mut self.assets)?;
        let image_size = req.image.size();
        let layout = device.resolve_layout(image_size)?;
        let canvas = layout.canvas;
        tracing::debug!(
            width = canvas.width,
            height = canvas.height,
            frame = ?layout.frame,
            "layout resolved"
        );

        let backdrop = rasterize_backdrop(&layout.backdrop, canvas.width, canvas.height)?;
        let mut surface = Surface::from_premul(canvas, backdrop)?;
        tracing::debug!("backdrop rasterized");

        let mut target = DrawTarget {
            painter: &mut self.painter,
            surface: &mut surface,
        };
        device.draw_underlay(&layout, &mut target)?;

        let transform = if req.template.is_flat() {
            ImageTransform::IDENTITY
        } else {
            req.transform
        };
        let draw_rect = place(layout.screen_rect, image_size, transform);
        draw_screen(&mut target, &layout, req.image, draw_rect, req.screen_fill)?;
        tracing::debug!(?draw_rect, "screen content drawn");

        device.draw_ornamentation(&layout, &mut target)?;
        tracing::debug!("ornamentation drawn");

        let stamps = plan_stamps(self.watermark.branding_text(), req.custom_text, req.entitled);
        let stamped = self
            .watermark
            .stamp(&mut self.painter, &mut surface, &stamps)?;
        tracing::debug!(planned = stamps.len(), stamped, "watermark applied");

        Ok(Composite {
            frame: surface.into_frame(),
            layout,
            draw_rect,
        })
    }
}

fn draw_screen(
    target: &mut DrawTarget<'_>,
    layout: &LayoutResult,
    image: &SourceImage,
    draw_rect: ScreenRect,
    screen_fill: ScreenFill,
) -> ShotframeResult<()> {
    let uploaded = source_image_paint(image)?;
    let (iw, ih) = (f64::from(uploaded.width), f64::from(uploaded.height));
    let paint = uploaded.paint;
    let to_draw = kurbo::Affine::translate((draw_rect.x, draw_rect.y))
        * kurbo::Affine::scale_non_uniform(draw_rect.width / iw, draw_rect.height / ih);
    let xf = crate::render::shapes::affine_to_cpu(to_draw);
    let clip = rounded_rect(layout.screen_rect, layout.screen_radius);
    let screen = layout.screen_rect;

    target.painter.draw_masked(
        target.surface,
        false,
        |ctx| {
            ctx.set_transform(vello_cpu::kurbo::Affine::IDENTITY);
            ctx.set_paint(screen_fill.color().to_cpu());
            ctx.fill_rect(&rect(screen));
            ctx.set_transform(xf);
            ctx.set_paint(paint);
            ctx.fill_rect(&vello_cpu::kurbo::Rect::new(0.0, 0.0, iw, ih));
            Ok(())
        },
        |ctx| {
            fill(ctx, &clip, Color::WHITE);
            Ok(())
        },
    )
}

#[cfg(test)]
#[path = "../../tests/unit/render/pipeline.rs"]
mod tests;
