use crate::assets::decode::unpremultiply_rgba8_in_place;
use crate::foundation::error::{ShotframeError, ShotframeResult};
use crate::render::surface::FrameRGBA;

/// Encode `frame` as a straight-alpha RGBA8 PNG. The frame itself is left untouched.
pub fn encode_png(frame: &FrameRGBA) -> ShotframeResult<Vec<u8>> {
    let expected = (frame.width as usize)
        .saturating_mul(frame.height as usize)
        .saturating_mul(4);
    if frame.width == 0 || frame.height == 0 || frame.data.len() != expected {
        return Err(ShotframeError::encode(format!(
            "frame buffer does not match {}x{}",
            frame.width, frame.height
        )));
    }

    let mut straight = frame.data.clone();
    if frame.premultiplied {
        unpremultiply_rgba8_in_place(&mut straight);
    }

    let mut out = std::io::Cursor::new(Vec::new());
    image::write_buffer_with_format(
        &mut out,
        &straight,
        frame.width,
        frame.height,
        image::ExtendedColorType::Rgba8,
        image::ImageFormat::Png,
    )
    .map_err(|e| ShotframeError::encode(format!("png encode failed: {e}")))?;
    Ok(out.into_inner())
}

#[cfg(test)]
#[path = "../../tests/unit/encode/png.rs"]
mod tests;
