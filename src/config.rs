//! Engine configuration: layout constants, device geometry, and watermark settings.
//!
//! Every field has a default so a partial JSON file (or none at all) yields a working engine.
//! Selected fields can be overridden from the environment:
//!
//! | variable                   | field                      |
//! |----------------------------|----------------------------|
//! | `SHOTFRAME_PADDING`        | `padding`                  |
//! | `SHOTFRAME_WATERMARK_TEXT` | `watermark.branding_text`  |
//! | `SHOTFRAME_FONT_PATH`      | `watermark.font_path`      |
//! | `SHOTFRAME_ASSETS_DIR`     | `assets_dir`               |

use std::io::Read;
use std::path::{Path, PathBuf};

use anyhow::Context as _;

use crate::assets::color::Color;
use crate::foundation::core::Size;
use crate::foundation::error::{ShotframeError, ShotframeResult};
use crate::template::{Backdrop, Orientation};

#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(default)]
/// Top-level engine configuration.
pub struct EngineConfig {
    /// Margin added on every side of the device or card.
    pub padding: f64,
    /// Display scale applied to the native phone frame.
    pub phone_display_scale: f64,
    /// Display scale applied to the native tablet frame.
    pub tablet_display_scale: f64,
    /// Flat-background images wider than this are scaled down; never up.
    pub flat_max_width: f64,
    /// Lower bound of the zoom slider.
    pub zoom_min: f64,
    /// Upper bound of the zoom slider.
    pub zoom_max: f64,
    /// Screen sizes used when a frame asset is unavailable.
    pub fallback: FallbackScreens,
    pub laptop: LaptopGeometry,
    pub browser: BrowserGeometry,
    pub radii: CornerRadii,
    pub watermark: WatermarkConfig,
    /// Backdrop for device templates that do not pick one.
    pub default_device_backdrop: Backdrop,
    /// Root directory for device frame assets.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub assets_dir: Option<PathBuf>,
}

#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(default)]
/// Hardcoded screen dimensions for devices whose frame asset failed to load.
pub struct FallbackScreens {
    /// Portrait phone screen; landscape swaps the axes.
    pub phone: Size,
    pub tablet: Size,
}

#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(default)]
/// Procedural laptop geometry in output pixels.
pub struct LaptopGeometry {
    pub screen: Size,
    pub bezel_top: f64,
    pub bezel_side: f64,
    pub bezel_bottom: f64,
    /// Gap between lid and base.
    pub hinge_gap: f64,
    /// Height of the keyboard base trapezoid.
    pub base_height: f64,
    /// How far the base top edge extends past the lid on each side.
    pub base_top_overhang: f64,
    /// How far the base bottom edge extends past the lid on each side.
    pub base_bottom_overhang: f64,
}

#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(default)]
/// Procedural browser window geometry in output pixels.
pub struct BrowserGeometry {
    pub content: Size,
    pub title_bar_height: f64,
}

#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(default)]
/// Screen clip corner radii per template family.
pub struct CornerRadii {
    pub device_screen: f64,
    pub laptop_content: f64,
    pub browser_content: f64,
    pub flat_card: f64,
}

#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(default)]
pub struct WatermarkConfig {
    /// Free-tier branding stamped bottom-right for non-entitled users.
    pub branding_text: String,
    /// Font file for watermark text. System sans-serif fonts are used when unset.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub font_path: Option<PathBuf>,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            padding: 100.0,
            phone_display_scale: 0.22,
            tablet_display_scale: 0.35,
            flat_max_width: 1600.0,
            zoom_min: 0.5,
            zoom_max: 3.0,
            fallback: FallbackScreens::default(),
            laptop: LaptopGeometry::default(),
            browser: BrowserGeometry::default(),
            radii: CornerRadii::default(),
            watermark: WatermarkConfig::default(),
            default_device_backdrop: Backdrop::gradient(
                [Color::rgb(0x66, 0x7e, 0xea), Color::rgb(0x76, 0x4b, 0xa2)],
                135.0,
            ),
            assets_dir: None,
        }
    }
}

impl Default for FallbackScreens {
    fn default() -> Self {
        Self {
            phone: Size::new(380.0, 780.0),
            tablet: Size::new(1024.0, 768.0),
        }
    }
}

impl FallbackScreens {
    /// Fallback phone screen for `orientation`.
    pub fn phone_for(&self, orientation: Orientation) -> Size {
        match orientation {
            Orientation::Portrait => self.phone,
            Orientation::Landscape => Size::new(self.phone.height, self.phone.width),
        }
    }
}

impl Default for LaptopGeometry {
    fn default() -> Self {
        Self {
            screen: Size::new(1280.0, 800.0),
            bezel_top: 28.0,
            bezel_side: 14.0,
            bezel_bottom: 14.0,
            hinge_gap: 3.0,
            base_height: 22.0,
            base_top_overhang: 60.0,
            base_bottom_overhang: 90.0,
        }
    }
}

impl LaptopGeometry {
    /// Lid size: screen plus bezels.
    pub fn lid(&self) -> Size {
        Size::new(
            self.screen.width + 2.0 * self.bezel_side,
            self.screen.height + self.bezel_top + self.bezel_bottom,
        )
    }
}

impl Default for BrowserGeometry {
    fn default() -> Self {
        Self {
            content: Size::new(1200.0, 675.0),
            title_bar_height: 40.0,
        }
    }
}

impl Default for CornerRadii {
    fn default() -> Self {
        Self {
            device_screen: 37.0,
            laptop_content: 2.0,
            browser_content: 2.0,
            flat_card: 12.0,
        }
    }
}

impl Default for WatermarkConfig {
    fn default() -> Self {
        Self {
            branding_text: DEFAULT_BRANDING_TEXT.to_string(),
            font_path: None,
        }
    }
}

/// Branding stamped on non-entitled renders unless configured otherwise.
pub const DEFAULT_BRANDING_TEXT: &str = "Made with Shotframe";

impl EngineConfig {
    /// Parse a JSON config file.
    pub fn from_path(path: &Path) -> ShotframeResult<Self> {
        let file =
            std::fs::File::open(path).with_context(|| format!("open config '{}'", path.display()))?;
        Self::from_reader(file)
    }

    /// Parse JSON config from a reader.
    pub fn from_reader(reader: impl Read) -> ShotframeResult<Self> {
        let cfg: Self = serde_json::from_reader(reader)
            .map_err(|e| ShotframeError::serde(format!("parse engine config: {e}")))?;
        cfg.validate()?;
        Ok(cfg)
    }

    /// Apply `SHOTFRAME_*` environment overrides.
    pub fn with_env_overrides(self) -> ShotframeResult<Self> {
        self.with_overrides_from(|key| std::env::var(key).ok())
    }

    /// Apply overrides using `lookup` in place of the process environment.
    pub fn with_overrides_from(
        mut self,
        lookup: impl Fn(&str) -> Option<String>,
    ) -> ShotframeResult<Self> {
        if let Some(v) = lookup("SHOTFRAME_PADDING") {
            self.padding = v.trim().parse::<f64>().map_err(|_| {
                ShotframeError::validation(format!("SHOTFRAME_PADDING is not a number: '{v}'"))
            })?;
        }
        if let Some(v) = lookup("SHOTFRAME_WATERMARK_TEXT") {
            self.watermark.branding_text = v;
        }
        if let Some(v) = lookup("SHOTFRAME_FONT_PATH").filter(|v| !v.trim().is_empty()) {
            self.watermark.font_path = Some(PathBuf::from(v));
        }
        if let Some(v) = lookup("SHOTFRAME_ASSETS_DIR").filter(|v| !v.trim().is_empty()) {
            self.assets_dir = Some(PathBuf::from(v));
        }
        self.validate()?;
        Ok(self)
    }

    /// Clamp a slider zoom value into `[zoom_min, zoom_max]`.
    pub fn clamp_zoom(&self, scale: f64) -> f64 {
        scale.clamp(self.zoom_min, self.zoom_max)
    }

    pub fn validate(&self) -> ShotframeResult<()> {
        fn positive(name: &str, v: f64) -> ShotframeResult<()> {
            if !v.is_finite() || v <= 0.0 {
                return Err(ShotframeError::validation(format!(
                    "{name} must be finite and > 0 (got {v})"
                )));
            }
            Ok(())
        }
        fn non_negative(name: &str, v: f64) -> ShotframeResult<()> {
            if !v.is_finite() || v < 0.0 {
                return Err(ShotframeError::validation(format!(
                    "{name} must be finite and >= 0 (got {v})"
                )));
            }
            Ok(())
        }

        non_negative("padding", self.padding)?;
        positive("phone_display_scale", self.phone_display_scale)?;
        positive("tablet_display_scale", self.tablet_display_scale)?;
        positive("flat_max_width", self.flat_max_width)?;
        positive("zoom_min", self.zoom_min)?;
        positive("zoom_max", self.zoom_max)?;
        if self.zoom_min > self.zoom_max {
            return Err(ShotframeError::validation(format!(
                "zoom range is inverted: {} > {}",
                self.zoom_min, self.zoom_max
            )));
        }

        for (name, s) in [
            ("fallback.phone", self.fallback.phone),
            ("fallback.tablet", self.fallback.tablet),
            ("laptop.screen", self.laptop.screen),
            ("browser.content", self.browser.content),
        ] {
            positive(&format!("{name}.width"), s.width)?;
            positive(&format!("{name}.height"), s.height)?;
        }

        let l = &self.laptop;
        for (name, v) in [
            ("laptop.bezel_top", l.bezel_top),
            ("laptop.bezel_side", l.bezel_side),
            ("laptop.bezel_bottom", l.bezel_bottom),
            ("laptop.hinge_gap", l.hinge_gap),
            ("laptop.base_height", l.base_height),
            ("laptop.base_top_overhang", l.base_top_overhang),
            ("laptop.base_bottom_overhang", l.base_bottom_overhang),
            ("browser.title_bar_height", self.browser.title_bar_height),
            ("radii.device_screen", self.radii.device_screen),
            ("radii.laptop_content", self.radii.laptop_content),
            ("radii.browser_content", self.radii.browser_content),
            ("radii.flat_card", self.radii.flat_card),
        ] {
            non_negative(name, v)?;
        }

        if self.watermark.branding_text.trim().is_empty() {
            return Err(ShotframeError::validation(
                "watermark.branding_text must not be empty",
            ));
        }

        self.default_device_backdrop.validate()
    }
}

#[cfg(test)]
#[path = "../tests/unit/config.rs"]
mod tests;
