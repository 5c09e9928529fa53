use std::sync::Arc;

use crate::foundation::core::Size;
use crate::foundation::error::{ShotframeError, ShotframeResult};

/// Decoded raster image in premultiplied RGBA8 form.
#[derive(Clone, Debug, PartialEq)]
pub struct SourceImage {
    /// Width in pixels.
    pub width: u32,
    /// Height in pixels.
    pub height: u32,
    /// Pixel bytes in row-major premultiplied RGBA8.
    pub rgba8_premul: Arc<Vec<u8>>,
}

impl SourceImage {
    /// Build an image from straight-alpha RGBA8 bytes.
    pub fn from_rgba8(width: u32, height: u32, mut rgba: Vec<u8>) -> ShotframeResult<Self> {
        if width == 0 || height == 0 {
            return Err(ShotframeError::unsupported_image("image has zero size"));
        }
        if rgba.len() != (width as usize) * (height as usize) * 4 {
            return Err(ShotframeError::validation(
                "rgba8 byte length does not match width*height*4",
            ));
        }
        premultiply_rgba8_in_place(&mut rgba);
        Ok(Self {
            width,
            height,
            rgba8_premul: Arc::new(rgba),
        })
    }

    /// Native pixel size.
    pub fn size(&self) -> Size {
        Size::new(f64::from(self.width), f64::from(self.height))
    }
}

/// Decode encoded image bytes (any format the `image` crate recognizes) into premultiplied
/// RGBA8.
///
/// Bytes that do not sniff as a known image format are rejected with
/// [`ShotframeError::UnsupportedImage`] before any decode work happens. Images with a side
/// longer than 65535 pixels are accepted and downscaled when drawn.
pub fn decode_image(bytes: &[u8]) -> ShotframeResult<SourceImage> {
    let format = image::guess_format(bytes)
        .map_err(|e| ShotframeError::unsupported_image(format!("unrecognized format: {e}")))?;
    let dyn_img = image::load_from_memory_with_format(bytes, format).map_err(|e| {
        ShotframeError::unsupported_image(format!("decode {format:?} image: {e}"))
    })?;
    let rgba = dyn_img.to_rgba8();
    let (width, height) = rgba.dimensions();
    SourceImage::from_rgba8(width, height, rgba.into_raw())
}

pub(crate) fn premultiply_rgba8_in_place(rgba: &mut [u8]) {
    for px in rgba.chunks_exact_mut(4) {
        let a = px[3] as u16;
        if a == 0 {
            px[0] = 0;
            px[1] = 0;
            px[2] = 0;
            continue;
        }
        px[0] = ((px[0] as u16 * a + 127) / 255) as u8;
        px[1] = ((px[1] as u16 * a + 127) / 255) as u8;
        px[2] = ((px[2] as u16 * a + 127) / 255) as u8;
    }
}

pub(crate) fn unpremultiply_rgba8_in_place(rgba: &mut [u8]) {
    for px in rgba.chunks_exact_mut(4) {
        let a = px[3] as u16;
        if a == 0 || a == 255 {
            continue;
        }
        for c in px.iter_mut().take(3) {
            *c = ((*c as u16 * 255 + a / 2) / a).min(255) as u8;
        }
    }
}

#[cfg(test)]
#[path = "../../tests/unit/assets/decode.rs"]
mod tests;
