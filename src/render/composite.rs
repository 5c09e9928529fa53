use crate::foundation::error::{ShotframeError, ShotframeResult};
use crate::foundation::math::mul_div255_u8;

/// Source-over for premultiplied RGBA8 buffers of equal length.
pub(crate) fn premul_over_in_place(dst: &mut [u8], src: &[u8]) -> ShotframeResult<()> {
    if dst.len() != src.len() || !dst.len().is_multiple_of(4) {
        return Err(ShotframeError::render(
            "premul_over_in_place expects equal-length rgba8 buffers",
        ));
    }
    for (d, s) in dst.chunks_exact_mut(4).zip(src.chunks_exact(4)) {
        let sa = s[3] as u16;
        if sa == 0 {
            continue;
        }
        let inv = 255u16 - sa;
        d[3] = add_sat_u8(sa as u8, mul_div255_u8(d[3] as u16, inv));
        for c in 0..3 {
            let dc = mul_div255_u8(d[c] as u16, inv);
            d[c] = add_sat_u8(s[c], dc);
        }
    }
    Ok(())
}

/// Scale every channel of `src` by the mask's alpha (or its complement when `inverted`).
pub(crate) fn mask_apply_alpha_in_place(
    src: &mut [u8],
    mask: &[u8],
    inverted: bool,
) -> ShotframeResult<()> {
    if src.len() != mask.len() || !src.len().is_multiple_of(4) {
        return Err(ShotframeError::render(
            "mask_apply expects equal-length rgba8 buffers",
        ));
    }
    for (s, m) in src.chunks_exact_mut(4).zip(mask.chunks_exact(4)) {
        let mut w = m[3];
        if inverted {
            w = 255 - w;
        }
        if w == 255 {
            continue;
        }
        let w16 = u16::from(w);
        for c in s.iter_mut() {
            *c = mul_div255_u8(u16::from(*c), w16);
        }
    }
    Ok(())
}

/// Source-over of a single premultiplied pixel.
pub(crate) fn premul_over_px(dst: [u8; 4], src: [u8; 4]) -> [u8; 4] {
    let sa = src[3] as u16;
    if sa == 0 {
        return dst;
    }
    let inv = 255u16 - sa;
    let mut out = [0u8; 4];
    out[3] = add_sat_u8(src[3], mul_div255_u8(u16::from(dst[3]), inv));
    for c in 0..3 {
        let dc = mul_div255_u8(u16::from(dst[c]), inv);
        out[c] = add_sat_u8(src[c], dc);
    }
    out
}

fn add_sat_u8(a: u8, b: u8) -> u8 {
    a.saturating_add(b)
}

#[cfg(test)]
#[path = "../../tests/unit/render/composite.rs"]
mod tests;
