use std::sync::Arc;

use crate::assets::decode::SourceImage;
use crate::foundation::core::Canvas;
use crate::foundation::error::{ShotframeError, ShotframeResult};
use crate::foundation::math::Fnv1a64;
use crate::render::composite::{mask_apply_alpha_in_place, premul_over_in_place};

#[derive(Clone, Debug, PartialEq, Eq)]
/// A rendered frame in CPU memory.
pub struct FrameRGBA {
    /// Frame width in pixels.
    pub width: u32,
    /// Frame height in pixels.
    pub height: u32,
    /// RGBA8 bytes, tightly packed, row-major.
    pub data: Vec<u8>,
    /// Whether the `data` is premultiplied alpha.
    pub premultiplied: bool,
}

impl FrameRGBA {
    /// RGBA8 bytes at `(x, y)`, or `None` outside the frame.
    pub fn pixel(&self, x: u32, y: u32) -> Option<[u8; 4]> {
        if x >= self.width || y >= self.height {
            return None;
        }
        let i = ((y as usize) * (self.width as usize) + (x as usize)) * 4;
        let px = self.data.get(i..i + 4)?;
        Some([px[0], px[1], px[2], px[3]])
    }

    /// Stable FNV-1a 64 hash over size, alpha mode, and pixel bytes.
    pub fn fingerprint(&self) -> u64 {
        let mut h = Fnv1a64::new_default();
        h.write_u32(self.width);
        h.write_u32(self.height);
        h.write_bytes(&[u8::from(self.premultiplied)]);
        h.write_bytes(&self.data);
        h.finish()
    }
}

/// Premultiplied RGBA8 working canvas that layers are composited onto.
#[derive(Clone, Debug)]
pub(crate) struct Surface {
    width: u32,
    height: u32,
    data: Vec<u8>,
}

impl Surface {
    pub(crate) fn new(canvas: Canvas) -> Self {
        Self {
            width: canvas.width,
            height: canvas.height,
            data: vec![0u8; canvas.rgba8_len()],
        }
    }

    /// Wrap an already rasterized premultiplied buffer.
    pub(crate) fn from_premul(canvas: Canvas, data: Vec<u8>) -> ShotframeResult<Self> {
        if data.len() != canvas.rgba8_len() {
            return Err(ShotframeError::render("surface byte length mismatch"));
        }
        Ok(Self {
            width: canvas.width,
            height: canvas.height,
            data,
        })
    }

    pub(crate) fn width(&self) -> u32 {
        self.width
    }

    pub(crate) fn height(&self) -> u32 {
        self.height
    }

    pub(crate) fn data(&self) -> &[u8] {
        &self.data
    }

    pub(crate) fn data_mut(&mut self) -> &mut [u8] {
        &mut self.data
    }

    /// Composite a full-size premultiplied layer over the surface.
    pub(crate) fn over(&mut self, layer: &[u8]) -> ShotframeResult<()> {
        premul_over_in_place(&mut self.data, layer)
    }

    /// Composite `layer` restricted to `mask` alpha (or outside it when `inverted`).
    pub(crate) fn over_masked(
        &mut self,
        mut layer: Vec<u8>,
        mask: &[u8],
        inverted: bool,
    ) -> ShotframeResult<()> {
        mask_apply_alpha_in_place(&mut layer, mask, inverted)?;
        premul_over_in_place(&mut self.data, &layer)
    }

    pub(crate) fn into_frame(self) -> FrameRGBA {
        FrameRGBA {
            width: self.width,
            height: self.height,
            data: self.data,
            premultiplied: true,
        }
    }
}

/// Draws vector layers with a reused `vello_cpu` context.
///
/// Every layer renders into a fresh transparent pixmap of the surface size; the caller decides how
/// it is composited.
#[derive(Default)]
pub(crate) struct Painter {
    ctx: Option<vello_cpu::RenderContext>,
}

impl std::fmt::Debug for Painter {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Painter")
            .field("has_ctx", &self.ctx.is_some())
            .finish()
    }
}

impl Painter {
    pub(crate) fn new() -> Self {
        Self::default()
    }

    /// Render one layer of `width` x `height` and return its premultiplied bytes.
    pub(crate) fn layer(
        &mut self,
        width: u32,
        height: u32,
        f: impl FnOnce(&mut vello_cpu::RenderContext) -> ShotframeResult<()>,
    ) -> ShotframeResult<Vec<u8>> {
        let w: u16 = width
            .try_into()
            .map_err(|_| ShotframeError::render("layer width exceeds u16"))?;
        let h: u16 = height
            .try_into()
            .map_err(|_| ShotframeError::render("layer height exceeds u16"))?;

        let mut ctx = match self.ctx.take() {
            Some(ctx) if ctx.width() == w && ctx.height() == h => ctx,
            _ => vello_cpu::RenderContext::new(w, h),
        };
        ctx.reset();
        ctx.set_transform(vello_cpu::kurbo::Affine::IDENTITY);
        ctx.set_paint_transform(vello_cpu::kurbo::Affine::IDENTITY);
        ctx.set_blend_mode(vello_cpu::peniko::BlendMode::default());

        f(&mut ctx)?;

        let mut pixmap = vello_cpu::Pixmap::new(w, h);
        ctx.flush();
        ctx.render_to_pixmap(&mut pixmap);
        self.ctx = Some(ctx);
        Ok(pixmap.data_as_u8_slice().to_vec())
    }

    /// Render a layer and composite it over `surface`.
    pub(crate) fn draw(
        &mut self,
        surface: &mut Surface,
        f: impl FnOnce(&mut vello_cpu::RenderContext) -> ShotframeResult<()>,
    ) -> ShotframeResult<()> {
        let layer = self.layer(surface.width(), surface.height(), f)?;
        surface.over(&layer)
    }

    /// Render `content` and composite it through the alpha of a separately rendered `mask`.
    pub(crate) fn draw_masked(
        &mut self,
        surface: &mut Surface,
        inverted: bool,
        content: impl FnOnce(&mut vello_cpu::RenderContext) -> ShotframeResult<()>,
        mask: impl FnOnce(&mut vello_cpu::RenderContext) -> ShotframeResult<()>,
    ) -> ShotframeResult<()> {
        let (w, h) = (surface.width(), surface.height());
        let layer = self.layer(w, h, content)?;
        let mask = self.layer(w, h, mask)?;
        surface.over_masked(layer, &mask, inverted)
    }
}

/// Upload premultiplied bytes as a `vello_cpu` image paint.
pub(crate) fn image_paint(
    bytes_premul: &[u8],
    width: u32,
    height: u32,
) -> ShotframeResult<vello_cpu::Image> {
    let w: u16 = width
        .try_into()
        .map_err(|_| ShotframeError::render("image width exceeds u16"))?;
    let h: u16 = height
        .try_into()
        .map_err(|_| ShotframeError::render("image height exceeds u16"))?;
    if bytes_premul.len()
        != (width as usize)
            .saturating_mul(height as usize)
            .saturating_mul(4)
    {
        return Err(ShotframeError::render("image byte len mismatch"));
    }
    let mut pixels = Vec::<vello_cpu::peniko::color::PremulRgba8>::with_capacity(
        (width as usize) * (height as usize),
    );
    for px in bytes_premul.chunks_exact(4) {
        pixels.push(vello_cpu::peniko::color::PremulRgba8::from_u8_array([
            px[0], px[1], px[2], px[3],
        ]));
    }
    let may_have_opacities = bytes_premul.chunks_exact(4).any(|px| px[3] != 255);
    let pixmap = vello_cpu::Pixmap::from_parts_with_opacity(pixels, w, h, may_have_opacities);
    Ok(vello_cpu::Image {
        image: vello_cpu::ImageSource::Pixmap(Arc::new(pixmap)),
        sampler: vello_cpu::peniko::ImageSampler::default(),
    })
}

/// Longest side a `vello_cpu` pixmap can hold.
pub(crate) const MAX_PAINT_SIDE: u32 = u16::MAX as u32;

/// An uploaded image paint and the pixel size it was uploaded at.
pub(crate) struct SourcePaint {
    pub(crate) paint: vello_cpu::Image,
    pub(crate) width: u32,
    pub(crate) height: u32,
}

/// Image paint for a decoded source image, downscaled to fit [`MAX_PAINT_SIDE`] when needed.
pub(crate) fn source_image_paint(img: &SourceImage) -> ShotframeResult<SourcePaint> {
    let longest = img.width.max(img.height);
    if longest <= MAX_PAINT_SIDE {
        return Ok(SourcePaint {
            paint: image_paint(&img.rgba8_premul, img.width, img.height)?,
            width: img.width,
            height: img.height,
        });
    }

    let k = f64::from(MAX_PAINT_SIDE) / f64::from(longest);
    let fit = |side: u32| ((f64::from(side) * k).round() as u32).clamp(1, MAX_PAINT_SIDE);
    let (w, h) = (fit(img.width), fit(img.height));
    let full = image::RgbaImage::from_raw(img.width, img.height, img.rgba8_premul.to_vec())
        .ok_or_else(|| ShotframeError::render("source image byte len mismatch"))?;
    let small = image::imageops::resize(&full, w, h, image::imageops::FilterType::Triangle);
    tracing::debug!(
        from_w = img.width,
        from_h = img.height,
        to_w = w,
        to_h = h,
        "downscaled oversized image for upload"
    );
    Ok(SourcePaint {
        paint: image_paint(small.as_raw(), w, h)?,
        width: w,
        height: h,
    })
}

#[cfg(test)]
#[path = "../../tests/unit/render/surface.rs"]
mod tests;
