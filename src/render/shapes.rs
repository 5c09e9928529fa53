//! Path helpers in `vello_cpu`'s geometry types.

use vello_cpu::kurbo::{BezPath, Circle, Point, Rect, RoundedRect, Shape};

use crate::assets::color::Color;
use crate::foundation::core::ScreenRect;

const TOLERANCE: f64 = 0.1;

pub(crate) fn affine_to_cpu(a: kurbo::Affine) -> vello_cpu::kurbo::Affine {
    vello_cpu::kurbo::Affine::new(a.as_coeffs())
}

pub(crate) fn rect(r: ScreenRect) -> Rect {
    r.to_cpu()
}

/// Rounded rectangle with the radius clamped to half the shorter side.
pub(crate) fn rounded_rect(r: ScreenRect, radius: f64) -> BezPath {
    let max_r = (r.width.min(r.height) / 2.0).max(0.0);
    RoundedRect::from_rect(r.to_cpu(), radius.clamp(0.0, max_r)).to_path(TOLERANCE)
}

pub(crate) fn circle(cx: f64, cy: f64, radius: f64) -> BezPath {
    Circle::new(Point::new(cx, cy), radius).to_path(TOLERANCE)
}

/// Pill (fully rounded rectangle).
pub(crate) fn pill(r: ScreenRect) -> BezPath {
    rounded_rect(r, r.width.min(r.height) / 2.0)
}

/// Closed polygon through `points`.
pub(crate) fn polygon(points: &[(f64, f64)]) -> BezPath {
    let mut p = BezPath::new();
    let mut it = points.iter();
    if let Some(&(x, y)) = it.next() {
        p.move_to(Point::new(x, y));
        for &(x, y) in it {
            p.line_to(Point::new(x, y));
        }
        p.close_path();
    }
    p
}

/// Solid paint for a straight-alpha color.
pub(crate) fn paint(c: Color) -> vello_cpu::peniko::Color {
    c.to_cpu()
}

/// Fill `path` with `color` under the identity transform.
pub(crate) fn fill(ctx: &mut vello_cpu::RenderContext, path: &BezPath, color: Color) {
    ctx.set_transform(vello_cpu::kurbo::Affine::IDENTITY);
    ctx.set_paint(paint(color));
    ctx.fill_path(path);
}
