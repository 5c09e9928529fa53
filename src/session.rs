//! Editor session: the state one user edits, re-composited on every change.
//!
//! Renders go to a fresh surface and replace the current frame only on success, so a failed
//! render leaves the previous frame in place. A frame kept that way no longer matches the
//! session state and is never exported as-is.

use crate::assets::decode::{SourceImage, decode_image};
use crate::encode::sink::ExportSink;
use crate::entitlement::Entitlement;
use crate::fit::drag::DragState;
use crate::fit::{FillPreset, ImageTransform, fill_transform};
use crate::foundation::core::{Point, Size};
use crate::foundation::error::{ShotframeError, ShotframeResult};
use crate::layout::LayoutResult;
use crate::render::pipeline::{ComposeRequest, Compositor, ScreenFill};
use crate::render::surface::FrameRGBA;
use crate::template::{DeviceKind, Template};

/// Result of a synchronous re-composite.
#[derive(Debug)]
pub enum RenderOutcome {
    /// A new frame replaced the previous one.
    Rendered { fingerprint: u64 },
    /// Nothing to render yet (no image loaded).
    Skipped,
    /// The render failed; the previous frame is still current.
    Failed(ShotframeError),
}

impl RenderOutcome {
    pub fn is_rendered(&self) -> bool {
        matches!(self, Self::Rendered { .. })
    }
}

#[derive(Debug)]
pub struct EditorSession {
    compositor: Compositor,
    initial_template: Template,
    image: Option<SourceImage>,
    template: Template,
    transform: ImageTransform,
    custom_text: String,
    entitled: bool,
    screen_fill: ScreenFill,
    drag: DragState,
    last_layout: Option<LayoutResult>,
    frame: Option<FrameRGBA>,
    /// Entitlement the current frame was rendered with; `None` once a later render failed.
    frame_entitled: Option<bool>,
}

impl EditorSession {
    /// Session starting on `template`; new images return to it.
    pub fn new(compositor: Compositor, template: Template) -> Self {
        Self {
            compositor,
            initial_template: template.clone(),
            image: None,
            template,
            transform: ImageTransform::IDENTITY,
            custom_text: String::new(),
            entitled: false,
            screen_fill: ScreenFill::White,
            drag: DragState::default(),
            last_layout: None,
            frame: None,
            frame_entitled: None,
        }
    }

    pub fn template(&self) -> &Template {
        &self.template
    }

    pub fn transform(&self) -> ImageTransform {
        self.transform
    }

    pub fn image(&self) -> Option<&SourceImage> {
        self.image.as_ref()
    }

    /// The current frame, if any render has succeeded.
    pub fn frame(&self) -> Option<&FrameRGBA> {
        self.frame.as_ref()
    }

    /// Layout of the last successful render: the real screen size used by fill presets.
    pub fn last_layout(&self) -> Option<&LayoutResult> {
        self.last_layout.as_ref()
    }

    pub fn is_dragging(&self) -> bool {
        self.drag.is_active()
    }

    /// Decode `bytes` and start over with it. Undecodable input is rejected without rendering.
    pub fn load_image_bytes(&mut self, bytes: &[u8]) -> ShotframeResult<RenderOutcome> {
        let image = decode_image(bytes).inspect_err(|e| {
            tracing::warn!(error = %e, "rejected input image");
        })?;
        Ok(self.set_image(image))
    }

    /// Start over with `image`: template and transform return to their initial values.
    pub fn set_image(&mut self, image: SourceImage) -> RenderOutcome {
        tracing::debug!(width = image.width, height = image.height, "new source image");
        self.image = Some(image);
        self.template = self.initial_template.clone();
        self.transform = ImageTransform::IDENTITY;
        self.drag.end();
        self.last_layout = None;
        self.render()
    }

    /// Switch template. A different device identity resets the transform and forgets the
    /// previous screen size.
    pub fn set_template(&mut self, template: Template) -> RenderOutcome {
        if template.device_identity() != self.template.device_identity() {
            self.transform = ImageTransform::IDENTITY;
            self.drag.end();
            self.last_layout = None;
        }
        self.template = template;
        self.render()
    }

    /// Replace the transform. An invalid transform is rejected and the state is left as it was.
    pub fn set_transform(&mut self, transform: ImageTransform) -> RenderOutcome {
        if let Err(e) = transform.validate() {
            tracing::warn!(error = %e, "rejected transform");
            return RenderOutcome::Failed(e);
        }
        self.transform = transform;
        self.render()
    }

    /// Slider input: zoom clamped to the configured range, offsets kept.
    pub fn set_zoom(&mut self, scale: f64) -> RenderOutcome {
        let transform = ImageTransform {
            scale: self.compositor.config().clamp_zoom(scale),
            ..self.transform
        };
        self.set_transform(transform)
    }

    /// Apply a fill preset against the real screen size of the last render.
    pub fn apply_fill(&mut self, preset: FillPreset) -> RenderOutcome {
        let Some(image_size) = self.image.as_ref().map(SourceImage::size) else {
            return RenderOutcome::Skipped;
        };
        let screen = self.fill_screen_size(image_size);
        self.transform = fill_transform(preset, screen, image_size);
        tracing::debug!(?preset, scale = self.transform.scale, "fill preset applied");
        self.render()
    }

    pub fn set_custom_text(&mut self, text: impl Into<String>) -> RenderOutcome {
        self.custom_text = text.into();
        self.render()
    }

    pub fn set_entitled(&mut self, entitled: bool) -> RenderOutcome {
        self.entitled = entitled;
        self.render()
    }

    pub fn set_screen_fill(&mut self, fill: ScreenFill) -> RenderOutcome {
        self.screen_fill = fill;
        self.render()
    }

    /// Start a drag. Ignored for flat backgrounds and before an image is loaded.
    pub fn pointer_down(&mut self, pointer: Point) {
        if self.template.is_flat() || self.image.is_none() {
            return;
        }
        self.drag.begin(pointer, &self.transform);
    }

    /// Move an active drag, re-rendering at the new offset.
    pub fn pointer_move(&mut self, pointer: Point) -> RenderOutcome {
        if !self.drag.update(pointer, &mut self.transform) {
            return RenderOutcome::Skipped;
        }
        self.render()
    }

    /// Pointer released or left the canvas.
    pub fn pointer_up(&mut self) {
        self.drag.end();
    }

    /// Re-composite the current state.
    pub fn render(&mut self) -> RenderOutcome {
        let Some(image) = self.image.as_ref() else {
            return RenderOutcome::Skipped;
        };
        let req = ComposeRequest {
            image,
            template: &self.template,
            transform: self.transform,
            custom_text: &self.custom_text,
            entitled: self.entitled,
            screen_fill: self.screen_fill,
        };
        match self.compositor.compose(req) {
            Ok(out) => {
                let fingerprint = out.frame.fingerprint();
                self.last_layout = Some(out.layout);
                self.frame = Some(out.frame);
                self.frame_entitled = Some(self.entitled);
                RenderOutcome::Rendered { fingerprint }
            }
            Err(e) => {
                tracing::warn!(error = %e, "render failed; keeping previous frame");
                self.frame_entitled = None;
                RenderOutcome::Failed(e)
            }
        }
    }

    /// Export the current frame through `sink`, gated by `entitlement`.
    ///
    /// Non-entitled users need a free use left; a successful non-entitled export records
    /// exactly one use. The watermark follows the collaborator's current status: a frame that
    /// is stale or was rendered under another entitlement is re-rendered first, and a failed
    /// re-render aborts the export without charging.
    #[tracing::instrument(skip(self, sink, entitlement))]
    pub fn export(
        &mut self,
        sink: &mut dyn ExportSink,
        entitlement: &mut dyn Entitlement,
        filename: &str,
    ) -> ShotframeResult<String> {
        let entitled = entitlement.is_entitled();
        if !entitled && entitlement.remaining_free_uses() == 0 {
            return Err(ShotframeError::quota_exhausted(
                "no free exports left; upgrade to keep exporting",
            ));
        }
        if self.frame_entitled != Some(entitled)
            && let RenderOutcome::Failed(e) = self.set_entitled(entitled)
        {
            return Err(e);
        }
        if self.frame_entitled != Some(entitled) {
            return Err(ShotframeError::validation("nothing rendered to export"));
        }
        let frame = self
            .frame
            .as_ref()
            .ok_or_else(|| ShotframeError::validation("nothing rendered to export"))?;
        let written = sink.export(frame, filename)?;
        if !entitled {
            entitlement.record_use();
        }
        tracing::info!(target = %written, entitled, "export complete");
        Ok(written)
    }

    fn fill_screen_size(&self, image_size: Size) -> Size {
        if let Some(layout) = &self.last_layout {
            return layout.screen_size();
        }
        let cfg = self.compositor.config();
        match &self.template {
            Template::FlatBackground { .. } => {
                let s = (cfg.flat_max_width / image_size.width).min(1.0);
                Size::new(image_size.width * s, image_size.height * s)
            }
            Template::Device { device, .. } => match device {
                DeviceKind::Phone { orientation, .. } => cfg.fallback.phone_for(*orientation),
                DeviceKind::Tablet { .. } => cfg.fallback.tablet,
                DeviceKind::Laptop => cfg.laptop.screen,
                DeviceKind::BrowserWindow => cfg.browser.content,
            },
        }
    }
}

#[cfg(test)]
#[path = "../tests/unit/session.rs"]
mod tests;
