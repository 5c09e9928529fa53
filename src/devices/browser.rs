use crate::assets::color::Color;
use crate::config::EngineConfig;
use crate::devices::{Device, DrawTarget};
use crate::foundation::core::{ScreenRect, Size};
use crate::foundation::error::ShotframeResult;
use crate::layout::LayoutResult;
use crate::layout::resolver::browser_layout;
use crate::render::blur::{ShadowSpec, draw_drop_shadow};
use crate::render::shapes::{circle, fill, rounded_rect};
use crate::template::Backdrop;

const WINDOW_RADIUS: f64 = 10.0;
const BORDER: Color = Color::rgb(0xc7, 0xc7, 0xcc);
const TITLE_BAR: Color = Color::rgb(0xe8, 0xe8, 0xed);
const SEPARATOR: Color = Color::rgb(0xd1, 0xd1, 0xd6);
const ADDRESS_BAR: Color = Color::rgb(0xff, 0xff, 0xff);
const TRAFFIC_LIGHTS: [Color; 3] = [
    Color::rgb(0xff, 0x5f, 0x57),
    Color::rgb(0xfe, 0xbc, 0x2e),
    Color::rgb(0x28, 0xc8, 0x40),
];
const LIGHT_RADIUS: f64 = 6.0;
const ADDRESS_BAR_SIZE: (f64, f64) = (600.0, 24.0);

const WINDOW_SHADOW: ShadowSpec = ShadowSpec {
    radius: 30,
    sigma: 15.0,
    offset_y: 16.0,
    alpha: 80,
};

/// Desktop browser chrome: title bar with traffic lights and an address bar.
pub(crate) struct BrowserWindow<'a> {
    pub(crate) cfg: &'a EngineConfig,
    pub(crate) backdrop: Backdrop,
}

/// Title-bar element rectangles for a window whose outer bounds are `window`.
#[derive(Clone, Debug, PartialEq)]
pub(crate) struct BrowserChrome {
    /// One-pixel line along the bottom of the title bar.
    pub(crate) separator: ScreenRect,
    /// Centres of the close, minimize and zoom buttons.
    pub(crate) lights: [(f64, f64); 3],
    pub(crate) address_bar: ScreenRect,
}

impl BrowserChrome {
    pub(crate) fn new(window: ScreenRect, title_bar_height: f64) -> Self {
        let cy = window.y + title_bar_height / 2.0;
        let lights = [20.0, 40.0, 60.0].map(|dx| (window.x + dx, cy));
        let (aw, ah) = (ADDRESS_BAR_SIZE.0.min(window.width * 0.5), ADDRESS_BAR_SIZE.1);
        Self {
            separator: ScreenRect::new(
                window.x,
                window.y + title_bar_height - 1.0,
                window.width,
                1.0,
            ),
            lights,
            address_bar: ScreenRect::new(window.center().x - aw / 2.0, cy - ah / 2.0, aw, ah),
        }
    }
}

impl Device for BrowserWindow<'_> {
    fn resolve_layout(&self, _image_size: Size) -> ShotframeResult<LayoutResult> {
        browser_layout(self.backdrop.clone(), self.cfg)
    }

    fn draw_underlay(
        &self,
        layout: &LayoutResult,
        target: &mut DrawTarget<'_>,
    ) -> ShotframeResult<()> {
        draw_drop_shadow(target.surface, layout.device_rect, WINDOW_SHADOW)
    }

    fn draw_ornamentation(
        &self,
        layout: &LayoutResult,
        target: &mut DrawTarget<'_>,
    ) -> ShotframeResult<()> {
        let window = layout.device_rect;
        let chrome = BrowserChrome::new(window, self.cfg.browser.title_bar_height);
        let border = rounded_rect(window.inflate(1.0), WINDOW_RADIUS + 1.0);
        let body = rounded_rect(window, WINDOW_RADIUS);
        let content = rounded_rect(layout.screen_rect, layout.screen_radius);

        target.painter.draw_masked(
            target.surface,
            true,
            |ctx| {
                fill(ctx, &border, BORDER);
                fill(ctx, &body, TITLE_BAR);
                fill(ctx, &rounded_rect(chrome.separator, 0.0), SEPARATOR);
                for ((cx, cy), color) in chrome.lights.iter().zip(TRAFFIC_LIGHTS) {
                    fill(ctx, &circle(*cx, *cy, LIGHT_RADIUS), color);
                }
                fill(ctx, &rounded_rect(chrome.address_bar, 6.0), ADDRESS_BAR);
                Ok(())
            },
            |ctx| {
                fill(ctx, &content, Color::WHITE);
                Ok(())
            },
        )
    }
}

#[cfg(test)]
#[path = "../../tests/unit/devices/browser.rs"]
mod tests;
