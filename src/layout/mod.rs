//! Layout resolution: canvas size, screen rectangle, and backdrop per template.
//!
//! [`LayoutResult`] is an explicit value threaded to both the renderer and the fit engine;
//! templates are never mutated to carry computed screen dimensions.

pub(crate) mod resolver;
pub(crate) mod rotate;

use crate::assets::frame::FrameAssetCache;
use crate::config::EngineConfig;
use crate::foundation::core::{Canvas, ScreenRect, Size};
use crate::foundation::error::ShotframeResult;
use crate::template::{Backdrop, Template};

/// How a template's ornamentation is produced.
#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(tag = "mode", rename_all = "camelCase")]
pub enum FrameSource {
    /// Flat background: no ornamentation.
    None,
    /// Cached bitmap asset drawn at `display_scale`, optionally turned a quarter.
    Bitmap {
        asset_path: String,
        display_scale: f64,
        rotated: bool,
    },
    /// Simplified flat-color frame used when a bitmap asset is unavailable.
    Fallback { bezel: f64 },
    /// Procedurally drawn device (laptop, browser window).
    Procedural,
}

/// Resolved geometry for one render.
#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct LayoutResult {
    /// Output surface size.
    pub canvas: Canvas,
    /// Region the user image is clipped to. Also the real post-layout screen size consumed by
    /// fill presets.
    pub screen_rect: ScreenRect,
    /// Corner radius of the screen clip.
    pub screen_radius: f64,
    /// Outer bounds of the device body (or the image card for flat backgrounds).
    pub device_rect: ScreenRect,
    pub frame: FrameSource,
    pub backdrop: Backdrop,
}

impl LayoutResult {
    /// Real screen size for fill-preset math.
    pub fn screen_size(&self) -> Size {
        self.screen_rect.size()
    }
}

/// Resolve `template` for an image of `image_size`, loading frame assets through `cache`.
///
/// Unavailable frame assets degrade to the fallback geometry; this only fails for invalid
/// templates or degenerate sizes.
#[tracing::instrument(skip(cfg, cache, template), fields(flat = template.is_flat()))]
pub fn resolve_layout(
    template: &Template,
    image_size: Size,
    cfg: &EngineConfig,
    cache: &mut FrameAssetCache,
) -> ShotframeResult<LayoutResult> {
    let device = crate::devices::select_device(template, cfg, cache)?;
    device.resolve_layout(image_size)
}

#[cfg(test)]
#[path = "../../tests/unit/layout/mod.rs"]
mod tests;
