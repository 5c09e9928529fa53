use anyhow::Context as _;

use crate::foundation::error::{ShotframeError, ShotframeResult};

/// Parse SVG bytes into a `usvg` tree with default options.
pub(crate) fn parse_svg(bytes: &[u8]) -> ShotframeResult<usvg::Tree> {
    let opts = usvg::Options::default();
    let tree = usvg::Tree::from_data(bytes, &opts).context("parse svg tree")?;
    Ok(tree)
}

/// Rasterize `tree` stretched to exactly `width` x `height` pixels.
///
/// Output is premultiplied RGBA8, which is what `tiny_skia` stores natively.
pub(crate) fn rasterize_svg_to_premul_rgba8(
    tree: &usvg::Tree,
    width: u32,
    height: u32,
) -> ShotframeResult<Vec<u8>> {
    const MAX_DIM: u32 = 16_384;
    if width == 0 || height == 0 || width > MAX_DIM || height > MAX_DIM {
        return Err(ShotframeError::asset(format!(
            "svg raster size out of range: {width}x{height} (max {MAX_DIM}x{MAX_DIM})"
        )));
    }

    let mut pixmap = resvg::tiny_skia::Pixmap::new(width, height)
        .ok_or_else(|| ShotframeError::asset("failed to allocate svg pixmap"))?;

    let sx = (width as f32) / tree.size().width();
    let sy = (height as f32) / tree.size().height();
    let xform = resvg::tiny_skia::Transform::from_scale(sx, sy);

    resvg::render(tree, xform, &mut pixmap.as_mut());
    Ok(pixmap.data().to_vec())
}
