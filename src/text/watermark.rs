//! Watermark compositor.
//!
//! Non-entitled renders carry low-opacity branding bottom-right. A non-empty custom text is
//! stamped bottom-centre for everyone, outlined dark and filled light so it reads on any
//! backdrop. Branding is drawn first so custom text wins any overlap.

use crate::config::{DEFAULT_BRANDING_TEXT, WatermarkConfig};
use crate::foundation::error::{ShotframeError, ShotframeResult};
use crate::render::surface::{Painter, Surface};
use crate::text::engine::{TextBrushRgba8, TextLayoutEngine, fill_layout};
use crate::text::fonts::{LoadedFont, load_font};

#[derive(Clone, Copy, Debug, PartialEq, Eq, serde::Serialize)]
#[serde(rename_all = "camelCase")]
pub enum StampKind {
    /// Free-tier branding, bottom-right.
    Branding,
    /// User text, bottom-centre.
    Custom,
}

#[derive(Clone, Debug, PartialEq, Eq, serde::Serialize)]
pub struct Stamp {
    pub kind: StampKind,
    pub text: String,
}

/// Decide which stamps a render gets, in drawing order.
///
/// Non-entitled renders always get branding; blank `branding_text` falls back to the default.
pub fn plan_stamps(branding_text: &str, custom_text: &str, entitled: bool) -> Vec<Stamp> {
    let mut out = Vec::with_capacity(2);
    if !entitled {
        let branding = match branding_text.trim() {
            "" => DEFAULT_BRANDING_TEXT,
            t => t,
        };
        out.push(Stamp {
            kind: StampKind::Branding,
            text: branding.to_string(),
        });
    }
    let custom = custom_text.trim();
    if !custom.is_empty() {
        out.push(Stamp {
            kind: StampKind::Custom,
            text: custom.to_string(),
        });
    }
    out
}

const BRANDING_FILL: TextBrushRgba8 = TextBrushRgba8 {
    r: 255,
    g: 255,
    b: 255,
    a: 128,
};
const CUSTOM_OUTLINE: TextBrushRgba8 = TextBrushRgba8 {
    r: 0,
    g: 0,
    b: 0,
    a: 204,
};
const CUSTOM_FILL: TextBrushRgba8 = TextBrushRgba8 {
    r: 255,
    g: 255,
    b: 255,
    a: 242,
};
const OUTLINE_PX: f64 = 2.0;
const MARGIN_PX: f64 = 16.0;

/// Font size for `kind` on a canvas `canvas_width` pixels wide.
pub(crate) fn stamp_font_size(kind: StampKind, canvas_width: u32) -> f32 {
    let w = canvas_width as f32;
    match kind {
        StampKind::Branding => (w * 0.02).clamp(12.0, 28.0),
        StampKind::Custom => (w * 0.03).clamp(16.0, 40.0),
    }
}

struct FontState {
    engine: TextLayoutEngine,
    font: vello_cpu::peniko::FontData,
}

/// Draws planned stamps with a lazily resolved font.
pub(crate) struct Watermarker {
    cfg: WatermarkConfig,
    state: Option<Option<FontState>>,
}

impl Watermarker {
    pub(crate) fn new(cfg: WatermarkConfig) -> Self {
        Self { cfg, state: None }
    }

    /// A watermarker whose font lookup already came back empty.
    #[cfg(test)]
    pub(crate) fn without_font(cfg: WatermarkConfig) -> Self {
        Self {
            cfg,
            state: Some(None),
        }
    }

    pub(crate) fn branding_text(&self) -> &str {
        &self.cfg.branding_text
    }

    fn font_state(&mut self) -> Option<&mut FontState> {
        if self.state.is_none() {
            let loaded: Option<LoadedFont> = load_font(self.cfg.font_path.as_deref());
            let state = loaded.and_then(|f| match TextLayoutEngine::with_font(&f.data) {
                Ok(engine) => {
                    tracing::debug!(family = engine.family_name(), "watermark font ready");
                    Some(FontState {
                        engine,
                        font: f.font_data(),
                    })
                }
                Err(e) => {
                    tracing::warn!(error = %e, "watermark font rejected");
                    None
                }
            });
            self.state = Some(state);
        }
        self.state.as_mut().and_then(|s| s.as_mut())
    }

    /// Whether glyphs can be drawn at all.
    #[cfg(test)]
    pub(crate) fn has_font(&mut self) -> bool {
        self.font_state().is_some()
    }

    /// Stamp `stamps` onto `surface`. Returns how many were drawn.
    ///
    /// Without a usable font, custom text is skipped but branding is a render error.
    pub(crate) fn stamp(
        &mut self,
        painter: &mut Painter,
        surface: &mut Surface,
        stamps: &[Stamp],
    ) -> ShotframeResult<usize> {
        if stamps.is_empty() {
            return Ok(0);
        }
        let (w, h) = (surface.width(), surface.height());
        let Some(fs) = self.font_state() else {
            if stamps.iter().any(|s| s.kind == StampKind::Branding) {
                return Err(ShotframeError::render(
                    "no usable font for the branding watermark",
                ));
            }
            tracing::warn!(count = stamps.len(), "skipping custom text without a font");
            return Ok(0);
        };

        let mut drawn = 0;
        for stamp in stamps {
            let size = stamp_font_size(stamp.kind, w);
            let layout = fs.engine.layout_plain(&stamp.text, size, CUSTOM_FILL)?;
            let (lw, lh) = (f64::from(layout.width()), f64::from(layout.height()));
            let font = &fs.font;
            match stamp.kind {
                StampKind::Branding => {
                    let x = f64::from(w) - MARGIN_PX - lw;
                    let y = f64::from(h) - MARGIN_PX - lh;
                    painter.draw(surface, |ctx| {
                        fill_layout(ctx, font, &layout, x, y, Some(BRANDING_FILL));
                        Ok(())
                    })?;
                }
                StampKind::Custom => {
                    let x = (f64::from(w) - lw) / 2.0;
                    let y = f64::from(h) - 2.0 * MARGIN_PX - lh;
                    painter.draw(surface, |ctx| {
                        for (dx, dy) in outline_offsets() {
                            fill_layout(ctx, font, &layout, x + dx, y + dy, Some(CUSTOM_OUTLINE));
                        }
                        fill_layout(ctx, font, &layout, x, y, Some(CUSTOM_FILL));
                        Ok(())
                    })?;
                }
            }
            drawn += 1;
        }
        tracing::debug!(drawn, "watermark stamped");
        Ok(drawn)
    }
}

fn outline_offsets() -> [(f64, f64); 8] {
    let d = OUTLINE_PX;
    [
        (-d, -d),
        (0.0, -d),
        (d, -d),
        (-d, 0.0),
        (d, 0.0),
        (-d, d),
        (0.0, d),
        (d, d),
    ]
}

#[cfg(test)]
#[path = "../../tests/unit/text/watermark.rs"]
mod tests;
