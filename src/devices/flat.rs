use crate::config::EngineConfig;
use crate::devices::{Device, DrawTarget};
use crate::foundation::core::Size;
use crate::foundation::error::ShotframeResult;
use crate::layout::LayoutResult;
use crate::layout::resolver::flat_layout;
use crate::render::blur::{ShadowSpec, draw_drop_shadow};
use crate::template::Backdrop;

pub(crate) const CARD_SHADOW: ShadowSpec = ShadowSpec {
    radius: 24,
    sigma: 12.0,
    offset_y: 12.0,
    alpha: 90,
};

/// Image card on a backdrop. There is no chrome; the card casts a soft shadow.
pub(crate) struct FlatCard<'a> {
    pub(crate) cfg: &'a EngineConfig,
    pub(crate) backdrop: Backdrop,
}

impl Device for FlatCard<'_> {
    fn resolve_layout(&self, image_size: Size) -> ShotframeResult<LayoutResult> {
        flat_layout(image_size, self.backdrop.clone(), self.cfg)
    }

    fn draw_underlay(
        &self,
        layout: &LayoutResult,
        target: &mut DrawTarget<'_>,
    ) -> ShotframeResult<()> {
        draw_drop_shadow(target.surface, layout.device_rect, CARD_SHADOW)
    }

    fn draw_ornamentation(
        &self,
        _layout: &LayoutResult,
        _target: &mut DrawTarget<'_>,
    ) -> ShotframeResult<()> {
        Ok(())
    }
}
