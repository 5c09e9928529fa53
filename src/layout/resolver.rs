use crate::assets::frame::FrameSize;
use crate::config::EngineConfig;
use crate::foundation::core::{Canvas, ScreenRect, Size};
use crate::foundation::error::{ShotframeError, ShotframeResult};
use crate::layout::rotate::rotate_screen_rect;
use crate::layout::{FrameSource, LayoutResult};
use crate::template::Backdrop;

/// Bezel width of the simplified phone frame drawn when the asset is unavailable.
pub const PHONE_FALLBACK_BEZEL: f64 = 14.0;
/// Bezel width of the simplified tablet frame.
pub const TABLET_FALLBACK_BEZEL: f64 = 20.0;

fn check_image_size(image: Size) -> ShotframeResult<()> {
    if !(image.width.is_finite() && image.height.is_finite())
        || image.width <= 0.0
        || image.height <= 0.0
    {
        return Err(ShotframeError::validation(format!(
            "image size must be finite and > 0 (got {}x{})",
            image.width, image.height
        )));
    }
    Ok(())
}

fn padded_canvas(body: Size, padding: f64) -> ShotframeResult<Canvas> {
    Canvas::from_f64(body.width + 2.0 * padding, body.height + 2.0 * padding)
}

/// Flat background: the image scaled down to `flat_max_width` (never up) is the screen.
pub(crate) fn flat_layout(
    image: Size,
    backdrop: Backdrop,
    cfg: &EngineConfig,
) -> ShotframeResult<LayoutResult> {
    check_image_size(image)?;
    let s = (cfg.flat_max_width / image.width).min(1.0);
    let card = Size::new(image.width * s, image.height * s);
    let p = cfg.padding;
    let rect = ScreenRect::new(p, p, card.width, card.height);
    Ok(LayoutResult {
        canvas: padded_canvas(card, p)?,
        screen_rect: rect,
        screen_radius: cfg.radii.flat_card,
        device_rect: rect,
        frame: FrameSource::None,
        backdrop,
    })
}

/// Bitmap-framed device at `scale`. With `rotated`, the portrait asset is turned a quarter for
/// landscape display and the screen rect is rotated algebraically.
pub(crate) fn bitmap_device_layout(
    asset_path: &str,
    frame: FrameSize,
    native_screen: ScreenRect,
    scale: f64,
    rotated: bool,
    backdrop: Backdrop,
    cfg: &EngineConfig,
) -> ShotframeResult<LayoutResult> {
    let p = cfg.padding;
    let native = frame.size();
    let (body, screen) = if rotated {
        let body = Size::new(native.height * scale, native.width * scale);
        (body, rotate_screen_rect(native_screen, native, body))
    } else {
        let body = Size::new(native.width * scale, native.height * scale);
        (body, native_screen.scale(scale))
    };
    Ok(LayoutResult {
        canvas: padded_canvas(body, p)?,
        screen_rect: screen.translate(p, p),
        screen_radius: cfg.radii.device_screen,
        device_rect: ScreenRect::new(p, p, body.width, body.height),
        frame: FrameSource::Bitmap {
            asset_path: asset_path.to_string(),
            display_scale: scale,
            rotated,
        },
        backdrop,
    })
}

/// Hardcoded screen size wrapped in a flat bezel of width `bezel`.
pub(crate) fn fallback_device_layout(
    screen: Size,
    bezel: f64,
    backdrop: Backdrop,
    cfg: &EngineConfig,
) -> ShotframeResult<LayoutResult> {
    let p = cfg.padding;
    let body = Size::new(screen.width + 2.0 * bezel, screen.height + 2.0 * bezel);
    Ok(LayoutResult {
        canvas: padded_canvas(body, p)?,
        screen_rect: ScreenRect::new(p + bezel, p + bezel, screen.width, screen.height),
        screen_radius: cfg.radii.device_screen,
        device_rect: ScreenRect::new(p, p, body.width, body.height),
        frame: FrameSource::Fallback { bezel },
        backdrop,
    })
}

/// Laptop: lid (screen plus bezels), hinge gap, and a base trapezoid wider than the lid.
///
/// `device_rect` spans the lid, hinge, and base; the base bottom edge is the widest part when
/// the overhangs are positive.
pub(crate) fn laptop_layout(backdrop: Backdrop, cfg: &EngineConfig) -> ShotframeResult<LayoutResult> {
    let g = &cfg.laptop;
    let p = cfg.padding;
    let lid = g.lid();
    let overhang = g.base_top_overhang.max(g.base_bottom_overhang).max(0.0);
    let body = Size::new(
        lid.width + 2.0 * overhang,
        lid.height + g.hinge_gap + g.base_height,
    );
    let lid_x = p + overhang;
    Ok(LayoutResult {
        canvas: padded_canvas(body, p)?,
        screen_rect: ScreenRect::new(
            lid_x + g.bezel_side,
            p + g.bezel_top,
            g.screen.width,
            g.screen.height,
        ),
        screen_radius: cfg.radii.laptop_content,
        device_rect: ScreenRect::new(p, p, body.width, body.height),
        frame: FrameSource::Procedural,
        backdrop,
    })
}

/// Browser window: title bar stacked above a fixed content area.
pub(crate) fn browser_layout(backdrop: Backdrop, cfg: &EngineConfig) -> ShotframeResult<LayoutResult> {
    let g = &cfg.browser;
    let p = cfg.padding;
    let body = Size::new(g.content.width, g.content.height + g.title_bar_height);
    Ok(LayoutResult {
        canvas: padded_canvas(body, p)?,
        screen_rect: ScreenRect::new(
            p,
            p + g.title_bar_height,
            g.content.width,
            g.content.height,
        ),
        screen_radius: cfg.radii.browser_content,
        device_rect: ScreenRect::new(p, p, body.width, body.height),
        frame: FrameSource::Procedural,
        backdrop,
    })
}
