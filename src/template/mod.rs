//! Template data model.
//!
//! A [`Template`] is either a flat backdrop that frames the user image as a card, or a device
//! (phone, tablet, laptop, browser window) sitting on an optional backdrop. The serde shape is
//! internally tagged so template JSON reads naturally:
//!
//! ```json
//! { "kind": "device",
//!   "device": { "deviceKind": "phone", "orientation": "landscape" },
//!   "background": { "style": "solid", "color": "#202020" } }
//! ```

pub(crate) mod presets;

use crate::assets::color::Color;
use crate::foundation::error::{ShotframeError, ShotframeResult};

/// Default phone frame asset path (without extension).
pub const DEFAULT_PHONE_ASSET: &str = "frames/phone";
/// Default tablet frame asset path (without extension).
pub const DEFAULT_TABLET_ASSET: &str = "frames/tablet";

#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(tag = "kind", rename_all = "camelCase")]
/// Visual template the user image is composited into.
pub enum Template {
    /// Backdrop only; the scaled user image is the screen.
    FlatBackground {
        /// Backdrop painted around the image card.
        backdrop: Backdrop,
    },
    /// Simulated hardware or browser frame.
    Device {
        /// Which device, with its per-kind settings.
        device: DeviceKind,
        /// Backdrop around the device. The configured default gradient applies when absent.
        #[serde(default, skip_serializing_if = "Option::is_none")]
        background: Option<Backdrop>,
    },
}

#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(tag = "style", rename_all = "camelCase")]
/// Backdrop fill specification.
pub enum Backdrop {
    /// Linear gradient with evenly spaced stops.
    Gradient {
        /// Ordered stop colors, placed at `i/(n-1)`.
        colors: Vec<Color>,
        /// Direction angle in degrees; 0 runs left to right.
        #[serde(rename = "angleDegrees", default)]
        angle_degrees: f64,
    },
    /// Single flat color.
    Solid {
        /// Fill color.
        color: Color,
    },
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "camelCase")]
/// Phone orientation. Other devices have a fixed orientation.
pub enum Orientation {
    #[default]
    Portrait,
    Landscape,
}

#[derive(Clone, Debug, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
#[serde(tag = "deviceKind", rename_all = "camelCase")]
/// Device variant with its own strongly typed settings.
pub enum DeviceKind {
    /// Bitmap-framed phone; landscape reuses the portrait asset rotated.
    Phone {
        #[serde(default)]
        orientation: Orientation,
        /// Asset path without extension (`<asset>.json` + `<asset>.png|svg`).
        #[serde(default = "default_phone_asset")]
        asset: String,
    },
    /// Bitmap-framed tablet in fixed landscape.
    Tablet {
        /// Asset path without extension.
        #[serde(default = "default_tablet_asset")]
        asset: String,
    },
    /// Procedural laptop (lid, hinge, base).
    Laptop,
    /// Procedural browser window chrome.
    BrowserWindow,
}

fn default_phone_asset() -> String {
    DEFAULT_PHONE_ASSET.to_string()
}

fn default_tablet_asset() -> String {
    DEFAULT_TABLET_ASSET.to_string()
}

impl DeviceKind {
    /// Portrait phone using the default asset.
    pub fn phone(orientation: Orientation) -> Self {
        Self::Phone {
            orientation,
            asset: default_phone_asset(),
        }
    }

    /// Tablet using the default asset.
    pub fn tablet() -> Self {
        Self::Tablet {
            asset: default_tablet_asset(),
        }
    }

    /// Short lowercase label used in logs.
    pub fn label(&self) -> &'static str {
        match self {
            Self::Phone {
                orientation: Orientation::Portrait,
                ..
            } => "phone-portrait",
            Self::Phone {
                orientation: Orientation::Landscape,
                ..
            } => "phone-landscape",
            Self::Tablet { .. } => "tablet",
            Self::Laptop => "laptop",
            Self::BrowserWindow => "browser-window",
        }
    }

    /// Frame asset path for bitmap-framed devices.
    pub fn asset_path(&self) -> Option<&str> {
        match self {
            Self::Phone { asset, .. } | Self::Tablet { asset } => Some(asset.as_str()),
            Self::Laptop | Self::BrowserWindow => None,
        }
    }
}

impl Backdrop {
    pub fn solid(color: Color) -> Self {
        Self::Solid { color }
    }

    pub fn gradient(colors: impl Into<Vec<Color>>, angle_degrees: f64) -> Self {
        Self::Gradient {
            colors: colors.into(),
            angle_degrees,
        }
    }

    pub fn validate(&self) -> ShotframeResult<()> {
        match self {
            Self::Gradient {
                colors,
                angle_degrees,
            } => {
                if colors.is_empty() {
                    return Err(ShotframeError::validation(
                        "gradient backdrop needs at least one color",
                    ));
                }
                if !angle_degrees.is_finite() {
                    return Err(ShotframeError::validation(
                        "gradient angleDegrees must be finite",
                    ));
                }
                Ok(())
            }
            Self::Solid { .. } => Ok(()),
        }
    }
}

impl Template {
    /// Flat backdrop template.
    pub fn flat(backdrop: Backdrop) -> Self {
        Self::FlatBackground { backdrop }
    }

    /// Device template on the default backdrop.
    pub fn device(device: DeviceKind) -> Self {
        Self::Device {
            device,
            background: None,
        }
    }

    /// Replace the device backdrop. No effect on flat templates.
    pub fn with_background(mut self, backdrop: Backdrop) -> Self {
        if let Self::Device { background, .. } = &mut self {
            *background = Some(backdrop);
        }
        self
    }

    /// Device identity; a change of identity resets the user transform.
    pub fn device_identity(&self) -> Option<&DeviceKind> {
        match self {
            Self::FlatBackground { .. } => None,
            Self::Device { device, .. } => Some(device),
        }
    }

    pub fn is_flat(&self) -> bool {
        matches!(self, Self::FlatBackground { .. })
    }

    /// Backdrop to paint, substituting `default_device` for devices without one.
    pub fn resolved_backdrop(&self, default_device: &Backdrop) -> Backdrop {
        match self {
            Self::FlatBackground { backdrop } => backdrop.clone(),
            Self::Device { background, .. } => background
                .clone()
                .unwrap_or_else(|| default_device.clone()),
        }
    }

    pub fn validate(&self) -> ShotframeResult<()> {
        match self {
            Self::FlatBackground { backdrop } => backdrop.validate(),
            Self::Device { device, background } => {
                if let Some(path) = device.asset_path() {
                    crate::assets::source::normalize_rel_path(path)?;
                }
                match background {
                    Some(b) => b.validate(),
                    None => Ok(()),
                }
            }
        }
    }
}

#[cfg(test)]
#[path = "../../tests/unit/template/mod.rs"]
mod tests;
