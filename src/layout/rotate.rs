//! Quarter-turn geometry for landscape phones.
//!
//! The portrait frame asset is reused for landscape display. A native point `(x, y)` inside a
//! frame of size `(fw, fh)` lands at `(y·W/fh, (fw − x)·H/fw)` inside the rotated device box of
//! size `(W, H)`. Rectangles and the ornamentation bitmap both go through this one map, so the
//! screen clip and the bezel cut-out coincide.

use kurbo::Affine;

use crate::foundation::core::{Point, ScreenRect, Size};

/// Rotate a portrait screen rect into a landscape device box of size `rotated`.
///
/// `x' = sy/fh·W`, `y' = (fw − sx − sw)/fw·H`, `w' = sh/fh·W`, `h' = sw/fw·H`.
pub fn rotate_screen_rect(screen: ScreenRect, frame: Size, rotated: Size) -> ScreenRect {
    let (fw, fh) = (frame.width, frame.height);
    let (w, h) = (rotated.width, rotated.height);
    ScreenRect::new(
        screen.y / fh * w,
        (fw - screen.x - screen.width) / fw * h,
        screen.height / fh * w,
        screen.width / fw * h,
    )
}

/// Inverse of [`rotate_screen_rect`].
pub fn unrotate_screen_rect(rotated_rect: ScreenRect, frame: Size, rotated: Size) -> ScreenRect {
    let (fw, fh) = (frame.width, frame.height);
    let (w, h) = (rotated.width, rotated.height);
    let sw = rotated_rect.height / h * fw;
    let sh = rotated_rect.width / w * fh;
    let sy = rotated_rect.x / w * fh;
    let sx = fw - sw - rotated_rect.y / h * fw;
    ScreenRect::new(sx, sy, sw, sh)
}

/// Map a native portrait point into the rotated device box.
pub fn rotate_point(p: Point, frame: Size, rotated: Size) -> Point {
    Point::new(
        p.y * rotated.width / frame.height,
        (frame.width - p.x) * rotated.height / frame.width,
    )
}

/// Affine drawing native portrait frame pixels into a landscape device box at `origin` with
/// uniform `scale`: translate to the box centre, turn a quarter, then draw around the native
/// centre.
pub fn landscape_frame_affine(frame: Size, scale: f64, origin: Point) -> Affine {
    let rotated = Size::new(frame.height * scale, frame.width * scale);
    let center = origin + (rotated.width / 2.0, rotated.height / 2.0);
    Affine::translate(center.to_vec2())
        * Affine::rotate(-std::f64::consts::FRAC_PI_2)
        * Affine::scale(scale)
        * Affine::translate((-frame.width / 2.0, -frame.height / 2.0))
}

#[cfg(test)]
#[path = "../../tests/unit/layout/rotate.rs"]
mod tests;
