//! Image transform and fit engine.
//!
//! [`ImageTransform::scale`] is relative to the fit scale, the largest uniform scale that keeps
//! the whole image inside the screen rect. `x`/`y` offset the image centre from the screen
//! centre in output-canvas pixels.

pub(crate) mod drag;

use crate::foundation::core::{ScreenRect, Size};
use crate::foundation::error::{ShotframeError, ShotframeResult};

#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
/// User pan/zoom state.
pub struct ImageTransform {
    /// Zoom relative to the fit scale. Must be finite and > 0.
    pub scale: f64,
    /// Horizontal offset of the image centre from the screen centre.
    #[serde(default)]
    pub x: f64,
    /// Vertical offset of the image centre from the screen centre.
    #[serde(default)]
    pub y: f64,
}

impl ImageTransform {
    pub const IDENTITY: Self = Self {
        scale: 1.0,
        x: 0.0,
        y: 0.0,
    };

    pub fn new(scale: f64, x: f64, y: f64) -> Self {
        Self { scale, x, y }
    }

    pub fn validate(&self) -> ShotframeResult<()> {
        if !self.scale.is_finite() || self.scale <= 0.0 {
            return Err(ShotframeError::validation(format!(
                "transform scale must be finite and > 0 (got {})",
                self.scale
            )));
        }
        if !self.x.is_finite() || !self.y.is_finite() {
            return Err(ShotframeError::validation("transform offsets must be finite"));
        }
        Ok(())
    }
}

impl Default for ImageTransform {
    fn default() -> Self {
        Self::IDENTITY
    }
}

/// Cover-fit variants applied by the fill buttons.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum FillPreset {
    /// Cover the whole screen; cropping allowed.
    All,
    /// Touch left and right edges.
    Horizontal,
    /// Touch top and bottom edges.
    Vertical,
}

/// Largest uniform scale that keeps `image` entirely inside `screen`.
pub fn base_scale(screen: Size, image: Size) -> f64 {
    (screen.width / image.width).min(screen.height / image.height)
}

/// Smallest uniform scale that makes `image` cover `screen`.
pub fn cover_scale(screen: Size, image: Size) -> f64 {
    (screen.width / image.width).max(screen.height / image.height)
}

/// Rectangle the image is drawn into for `transform`.
pub fn place(screen: ScreenRect, image: Size, transform: ImageTransform) -> ScreenRect {
    let s = base_scale(screen.size(), image) * transform.scale;
    let w = image.width * s;
    let h = image.height * s;
    let c = screen.center();
    ScreenRect::new(
        c.x + transform.x - w / 2.0,
        c.y + transform.y - h / 2.0,
        w,
        h,
    )
}

/// Transform produced by a fill preset: relative scale for the preset, centred.
pub fn fill_transform(preset: FillPreset, screen: Size, image: Size) -> ImageTransform {
    let base = base_scale(screen, image);
    let target = match preset {
        FillPreset::All => cover_scale(screen, image),
        FillPreset::Horizontal => screen.width / image.width,
        FillPreset::Vertical => screen.height / image.height,
    };
    ImageTransform::new(target / base, 0.0, 0.0)
}

#[cfg(test)]
#[path = "../../tests/unit/fit/mod.rs"]
mod tests;
