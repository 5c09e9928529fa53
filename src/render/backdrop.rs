use crate::assets::color::Color;
use crate::foundation::error::{ShotframeError, ShotframeResult};
use crate::foundation::math::lerp_u8;
use crate::template::Backdrop;

/// Rasterize `backdrop` into a premultiplied RGBA8 buffer of `width` x `height`.
///
/// Gradients run through the centre along `(cos θ, sin θ)` scaled by the buffer size, with
/// stops evenly spaced at `i/(n-1)`. One color renders as a solid fill.
pub(crate) fn rasterize_backdrop(
    backdrop: &Backdrop,
    width: u32,
    height: u32,
) -> ShotframeResult<Vec<u8>> {
    backdrop.validate()?;
    match backdrop {
        Backdrop::Solid { color } => Ok(solid(*color, width, height)),
        Backdrop::Gradient {
            colors,
            angle_degrees,
        } => match colors.as_slice() {
            [] => Err(ShotframeError::validation("gradient has no colors")),
            [only] => Ok(solid(*only, width, height)),
            stops => Ok(linear_gradient(stops, *angle_degrees, width, height)),
        },
    }
}

fn solid(color: Color, width: u32, height: u32) -> Vec<u8> {
    color
        .to_rgba8_premul()
        .to_array()
        .repeat((width as usize) * (height as usize))
}

fn linear_gradient(stops: &[Color], angle_degrees: f64, width: u32, height: u32) -> Vec<u8> {
    let (w, h) = (f64::from(width), f64::from(height));
    let theta = angle_degrees.to_radians();
    let half = (theta.cos() * w / 2.0, theta.sin() * h / 2.0);
    let start = (w / 2.0 - half.0, h / 2.0 - half.1);
    let axis = (2.0 * half.0, 2.0 * half.1);
    let len2 = axis.0 * axis.0 + axis.1 * axis.1;

    let mut out = vec![0u8; (width as usize) * (height as usize) * 4];
    for y in 0..height {
        let py = f64::from(y) + 0.5 - start.1;
        for x in 0..width {
            let px = f64::from(x) + 0.5 - start.0;
            let t = if len2 <= f64::EPSILON {
                0.0
            } else {
                ((px * axis.0 + py * axis.1) / len2).clamp(0.0, 1.0)
            };
            let c = sample_stops(stops, t).to_rgba8_premul().to_array();
            let idx = ((y as usize) * (width as usize) + (x as usize)) * 4;
            out[idx..idx + 4].copy_from_slice(&c);
        }
    }
    out
}

/// Color at `t` for stops evenly spaced over `[0, 1]`.
pub(crate) fn sample_stops(stops: &[Color], t: f64) -> Color {
    match stops {
        [] => Color::rgba(0, 0, 0, 0),
        [only] => *only,
        _ => {
            let segments = (stops.len() - 1) as f64;
            let pos = t.clamp(0.0, 1.0) * segments;
            let i = (pos.floor() as usize).min(stops.len() - 2);
            let local = pos - i as f64;
            let (a, b) = (stops[i], stops[i + 1]);
            Color::rgba(
                lerp_u8(a.r, b.r, local),
                lerp_u8(a.g, b.g, local),
                lerp_u8(a.b, b.b, local),
                lerp_u8(a.a, b.a, local),
            )
        }
    }
}

#[cfg(test)]
#[path = "../../tests/unit/render/backdrop.rs"]
mod tests;
