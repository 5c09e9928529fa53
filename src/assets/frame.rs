use std::collections::{HashMap, HashSet};
use std::sync::Arc;

use anyhow::Context as _;

use crate::assets::decode::{SourceImage, decode_image};
use crate::assets::source::{AssetSource, normalize_rel_path};
use crate::assets::svg_raster::{parse_svg, rasterize_svg_to_premul_rgba8};
use crate::foundation::core::{ScreenRect, Size};
use crate::foundation::error::{ShotframeError, ShotframeResult};

/// Native pixel size of a device frame bitmap.
#[derive(Clone, Copy, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct FrameSize {
    pub width: u32,
    pub height: u32,
}

impl FrameSize {
    pub fn size(self) -> Size {
        Size::new(f64::from(self.width), f64::from(self.height))
    }
}

/// Sidecar JSON shipped next to each device frame bitmap.
///
/// ```json
/// { "frameSize": { "width": 1022, "height": 2082 },
///   "screen": { "x": 52, "y": 46, "width": 918, "height": 1990 } }
/// ```
#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FrameDescriptor {
    pub frame_size: FrameSize,
    pub screen: ScreenRect,
}

impl FrameDescriptor {
    pub fn validate(&self) -> ShotframeResult<()> {
        if self.frame_size.width == 0 || self.frame_size.height == 0 {
            return Err(ShotframeError::asset("frame descriptor has zero frameSize"));
        }
        if !self.screen.is_valid() {
            return Err(ShotframeError::asset(
                "frame descriptor screen rect must be finite with positive size",
            ));
        }
        let fw = f64::from(self.frame_size.width);
        let fh = f64::from(self.frame_size.height);
        if self.screen.x < 0.0
            || self.screen.y < 0.0
            || self.screen.right() > fw
            || self.screen.bottom() > fh
        {
            return Err(ShotframeError::asset(
                "frame descriptor screen rect lies outside the frame",
            ));
        }
        Ok(())
    }
}

/// One device's ornamentation in native, unscaled portrait pixel space.
#[derive(Clone, Debug)]
pub struct DeviceFrameAsset {
    pub frame_bitmap: SourceImage,
    pub frame_size: FrameSize,
    pub screen_rect: ScreenRect,
}

/// Load `<asset_path>.json` plus `<asset_path>.png` (or `<asset_path>.svg`) without caching.
pub fn load_frame_asset(
    source: &dyn AssetSource,
    asset_path: &str,
) -> ShotframeResult<DeviceFrameAsset> {
    let base = normalize_rel_path(asset_path)?;

    let json = source.read(&format!("{base}.json"))?;
    let desc: FrameDescriptor = serde_json::from_slice(&json)
        .with_context(|| format!("parse frame descriptor '{base}.json'"))?;
    desc.validate()?;

    let frame_bitmap = match source.read(&format!("{base}.png")) {
        Ok(bytes) => decode_image(&bytes)
            .map_err(|e| ShotframeError::asset(format!("decode '{base}.png': {e}")))?,
        Err(png_err) => {
            let svg = source.read(&format!("{base}.svg")).map_err(|_| {
                ShotframeError::asset(format!("no bitmap for '{base}' ({png_err})"))
            })?;
            let tree = parse_svg(&svg)?;
            let (w, h) = (desc.frame_size.width, desc.frame_size.height);
            let premul = rasterize_svg_to_premul_rgba8(&tree, w, h)?;
            SourceImage {
                width: w,
                height: h,
                rgba8_premul: Arc::new(premul),
            }
        }
    };

    Ok(DeviceFrameAsset {
        frame_bitmap,
        frame_size: desc.frame_size,
        screen_rect: desc.screen,
    })
}

/// Process-lifetime cache of device frame assets keyed by normalized asset path.
///
/// Misses are remembered too, so a missing asset is read and reported once. There is no
/// eviction.
pub struct FrameAssetCache {
    source: Arc<dyn AssetSource + Send + Sync>,
    entries: HashMap<String, Arc<DeviceFrameAsset>>,
    misses: HashSet<String>,
}

impl FrameAssetCache {
    pub fn new(source: Arc<dyn AssetSource + Send + Sync>) -> Self {
        Self {
            source,
            entries: HashMap::new(),
            misses: HashSet::new(),
        }
    }

    /// Return the cached asset for `asset_path`, loading it on first use.
    ///
    /// Returns `None` when the asset is unavailable; callers fall back to procedural frames.
    pub fn load(&mut self, asset_path: &str) -> Option<Arc<DeviceFrameAsset>> {
        let key = match normalize_rel_path(asset_path) {
            Ok(k) => k,
            Err(e) => {
                tracing::warn!(asset_path, error = %e, "invalid frame asset path");
                return None;
            }
        };
        if let Some(hit) = self.entries.get(&key) {
            return Some(Arc::clone(hit));
        }
        if self.misses.contains(&key) {
            return None;
        }

        match load_frame_asset(self.source.as_ref(), &key) {
            Ok(asset) => {
                tracing::debug!(
                    asset_path = %key,
                    frame_w = asset.frame_size.width,
                    frame_h = asset.frame_size.height,
                    "loaded frame asset"
                );
                let asset = Arc::new(asset);
                self.entries.insert(key, Arc::clone(&asset));
                Some(asset)
            }
            Err(e) => {
                tracing::warn!(asset_path = %key, error = %e, "frame asset unavailable; using fallback frame");
                self.misses.insert(key);
                None
            }
        }
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn contains(&self, asset_path: &str) -> bool {
        normalize_rel_path(asset_path)
            .map(|k| self.entries.contains_key(&k))
            .unwrap_or(false)
    }
}

impl std::fmt::Debug for FrameAssetCache {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("FrameAssetCache")
            .field("entries", &self.entries.keys().collect::<Vec<_>>())
            .finish()
    }
}

#[cfg(test)]
#[path = "../../tests/unit/assets/frame.rs"]
mod tests;
