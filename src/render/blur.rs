//! Gaussian drop shadows.
//!
//! A Gaussian is separable and so is an axis-aligned rectangle, so the blurred coverage of a
//! rectangle is the product of two blurred 1D coverage profiles. Shadows are built from those
//! profiles instead of blurring a full-canvas buffer.

use crate::foundation::core::ScreenRect;
use crate::foundation::error::{ShotframeError, ShotframeResult};
use crate::foundation::math::mul_div255_u8;
use crate::render::composite::premul_over_px;
use crate::render::surface::Surface;

/// Soft shadow parameters.
#[derive(Clone, Copy, Debug, PartialEq)]
pub(crate) struct ShadowSpec {
    /// Blur radius in pixels (kernel half-width).
    pub(crate) radius: u32,
    pub(crate) sigma: f32,
    pub(crate) offset_y: f64,
    /// Peak shadow alpha, 0-255.
    pub(crate) alpha: u8,
}

pub(crate) fn gaussian_kernel_q16(radius: u32, sigma: f32) -> ShotframeResult<Vec<u32>> {
    if radius == 0 {
        return Ok(vec![1 << 16]);
    }
    if !sigma.is_finite() || sigma <= 0.0 {
        return Err(ShotframeError::validation("blur sigma must be > 0"));
    }

    let r = radius as i32;
    let mut weights_f = Vec::<f64>::with_capacity((2 * r + 1) as usize);
    let mut sum = 0.0f64;
    let sigma = sigma as f64;
    let denom = 2.0 * sigma * sigma;
    for i in -r..=r {
        let x = i as f64;
        let w = (-x * x / denom).exp();
        weights_f.push(w);
        sum += w;
    }
    if sum <= 0.0 {
        return Err(ShotframeError::render("gaussian kernel sum is zero"));
    }

    let mut weights = Vec::<u32>::with_capacity(weights_f.len());
    let mut acc: i64 = 0;
    for &wf in &weights_f {
        let q = ((wf / sum) * 65536.0).round() as i64;
        let q = q.clamp(0, 65536);
        weights.push(q as u32);
        acc += q;
    }
    let delta = 65536 - acc;
    if delta != 0 {
        let mid = weights.len() / 2;
        let new_mid = (i64::from(weights[mid]) + delta).clamp(0, 65536);
        weights[mid] = new_mid as u32;
    }

    Ok(weights)
}

/// Blur a 1D coverage row (0-255) with a q16 kernel, clamping at the edges.
pub(crate) fn blur_row(src: &[u8], kernel: &[u32]) -> Vec<u8> {
    let radius = (kernel.len() / 2) as i64;
    let n = src.len() as i64;
    let mut out = vec![0u8; src.len()];
    if n == 0 {
        return out;
    }
    for (x, o) in out.iter_mut().enumerate() {
        let mut acc = 0u64;
        for (ki, &kw) in kernel.iter().enumerate() {
            let sx = (x as i64 + ki as i64 - radius).clamp(0, n - 1);
            acc += u64::from(kw) * u64::from(src[sx as usize]);
        }
        *o = q16_to_u8(acc);
    }
    out
}

fn q16_to_u8(acc: u64) -> u8 {
    let v = (acc + 32768) >> 16;
    v.min(255) as u8
}

/// Coverage of `[start, end)` over `len` pixels, antialiased at fractional edges.
fn coverage_row(len: u32, start: f64, end: f64) -> Vec<u8> {
    (0..len)
        .map(|i| {
            let a = f64::from(i).max(start);
            let b = (f64::from(i) + 1.0).min(end);
            ((b - a).clamp(0.0, 1.0) * 255.0).round() as u8
        })
        .collect()
}

/// Paint a blurred black shadow of `rect` (shifted by `offset_y`) onto `surface`.
pub(crate) fn draw_drop_shadow(
    surface: &mut Surface,
    rect: ScreenRect,
    spec: ShadowSpec,
) -> ShotframeResult<()> {
    let (w, h) = (surface.width(), surface.height());
    let kernel = gaussian_kernel_q16(spec.radius, spec.sigma)?;
    let r = rect.translate(0.0, spec.offset_y);

    // Pad the rows so edge clamping never bleeds coverage from the canvas border.
    let pad = spec.radius;
    let col = blur_row(
        &coverage_row(w + 2 * pad, r.x + f64::from(pad), r.right() + f64::from(pad)),
        &kernel,
    );
    let row = blur_row(
        &coverage_row(h + 2 * pad, r.y + f64::from(pad), r.bottom() + f64::from(pad)),
        &kernel,
    );

    let alpha = u16::from(spec.alpha);
    let width = w as usize;
    let data = surface.data_mut();
    for y in 0..h as usize {
        let cy = row[y + pad as usize];
        if cy == 0 {
            continue;
        }
        for x in 0..width {
            let cx = col[x + pad as usize];
            if cx == 0 {
                continue;
            }
            let a = mul_div255_u8(u16::from(mul_div255_u8(u16::from(cx), u16::from(cy))), alpha);
            if a == 0 {
                continue;
            }
            let i = (y * width + x) * 4;
            let dst = [data[i], data[i + 1], data[i + 2], data[i + 3]];
            data[i..i + 4].copy_from_slice(&premul_over_px(dst, [0, 0, 0, a]));
        }
    }
    Ok(())
}

#[cfg(test)]
#[path = "../../tests/unit/render/blur.rs"]
mod tests;
