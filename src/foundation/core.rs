use crate::foundation::error::{ShotframeError, ShotframeResult};

pub use kurbo::{Point, Size, Vec2};

/// Output canvas dimensions in pixels.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
pub struct Canvas {
    /// Width in pixels.
    pub width: u32,
    /// Height in pixels.
    pub height: u32,
}

impl Canvas {
    /// Build a canvas from fractional pixel sizes, truncating to whole pixels.
    ///
    /// Fails for non-finite sizes or sizes that truncate to zero.
    pub fn from_f64(width: f64, height: f64) -> ShotframeResult<Self> {
        fn to_px(v: f64, what: &str) -> ShotframeResult<u32> {
            if !v.is_finite() || v < 1.0 {
                return Err(ShotframeError::validation(format!(
                    "canvas {what} must be finite and >= 1 (got {v})"
                )));
            }
            if v > f64::from(u16::MAX) {
                return Err(ShotframeError::validation(format!(
                    "canvas {what} exceeds {} px (got {v})",
                    u16::MAX
                )));
            }
            Ok(v.trunc() as u32)
        }

        Ok(Self {
            width: to_px(width, "width")?,
            height: to_px(height, "height")?,
        })
    }

    /// Canvas size as floating-point pixels.
    pub fn size(self) -> Size {
        Size::new(f64::from(self.width), f64::from(self.height))
    }

    /// Number of bytes in a tightly packed RGBA8 buffer of this size.
    pub fn rgba8_len(self) -> usize {
        (self.width as usize)
            .saturating_mul(self.height as usize)
            .saturating_mul(4)
    }
}

/// Axis-aligned rectangle in output-canvas pixel space.
///
/// Uses the `{x, y, width, height}` shape of device frame descriptors rather than the
/// two-corner form of `kurbo::Rect`.
#[derive(Clone, Copy, Debug, Default, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct ScreenRect {
    /// Left edge.
    pub x: f64,
    /// Top edge.
    pub y: f64,
    /// Width in pixels.
    pub width: f64,
    /// Height in pixels.
    pub height: f64,
}

impl ScreenRect {
    /// Create a rectangle from origin and size.
    pub const fn new(x: f64, y: f64, width: f64, height: f64) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }

    /// Right edge.
    pub fn right(self) -> f64 {
        self.x + self.width
    }

    /// Bottom edge.
    pub fn bottom(self) -> f64 {
        self.y + self.height
    }

    /// Rectangle centre.
    pub fn center(self) -> Point {
        Point::new(self.x + self.width * 0.5, self.y + self.height * 0.5)
    }

    /// Rectangle size.
    pub fn size(self) -> Size {
        Size::new(self.width, self.height)
    }

    /// Offset the rectangle by `(dx, dy)`.
    pub fn translate(self, dx: f64, dy: f64) -> Self {
        Self::new(self.x + dx, self.y + dy, self.width, self.height)
    }

    /// Scale origin and size uniformly about the coordinate origin.
    pub fn scale(self, s: f64) -> Self {
        Self::new(self.x * s, self.y * s, self.width * s, self.height * s)
    }

    /// Grow the rectangle by `d` on every side.
    pub fn inflate(self, d: f64) -> Self {
        Self::new(
            self.x - d,
            self.y - d,
            self.width + 2.0 * d,
            self.height + 2.0 * d,
        )
    }

    /// Return `true` when the rectangle has a finite, strictly positive area.
    pub fn is_valid(self) -> bool {
        self.x.is_finite()
            && self.y.is_finite()
            && self.width.is_finite()
            && self.height.is_finite()
            && self.width > 0.0
            && self.height > 0.0
    }

    /// Convert to a `vello_cpu` rectangle for drawing.
    pub(crate) fn to_cpu(self) -> vello_cpu::kurbo::Rect {
        vello_cpu::kurbo::Rect::new(self.x, self.y, self.right(), self.bottom())
    }
}

/// Premultiplied RGBA8 (r,g,b already multiplied by a).
#[derive(Clone, Copy, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct Rgba8Premul {
    /// Red channel premultiplied by alpha.
    pub r: u8,
    /// Green channel premultiplied by alpha.
    pub g: u8,
    /// Blue channel premultiplied by alpha.
    pub b: u8,
    /// Alpha channel.
    pub a: u8,
}

impl Rgba8Premul {
    /// Fully transparent black.
    pub fn transparent() -> Self {
        Self {
            r: 0,
            g: 0,
            b: 0,
            a: 0,
        }
    }

    /// Convert straight-alpha RGBA8 into premultiplied RGBA8.
    pub fn from_straight_rgba(r: u8, g: u8, b: u8, a: u8) -> Self {
        fn premul(c: u8, a: u8) -> u8 {
            let c = u16::from(c);
            let a = u16::from(a);
            (((c * a) + 127) / 255) as u8
        }

        Self {
            r: premul(r, a),
            g: premul(g, a),
            b: premul(b, a),
            a,
        }
    }

    /// Pixel bytes in `[r, g, b, a]` order.
    pub fn to_array(self) -> [u8; 4] {
        [self.r, self.g, self.b, self.a]
    }
}

#[cfg(test)]
#[path = "../../tests/unit/foundation/core.rs"]
mod tests;
