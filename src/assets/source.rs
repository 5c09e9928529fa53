use std::collections::BTreeMap;
use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicUsize, Ordering};

use anyhow::Context as _;

use crate::foundation::error::{ShotframeError, ShotframeResult};

/// Byte-level access to shipped device assets, addressed by relative path.
pub trait AssetSource {
    /// Read the full contents of `rel_path`.
    fn read(&self, rel_path: &str) -> ShotframeResult<Vec<u8>>;
}

/// Normalize and validate asset-relative paths.
///
/// The normalized result uses `/` separators, removes `.` segments, and rejects absolute paths or
/// parent traversals (`..`).
pub fn normalize_rel_path(source: &str) -> ShotframeResult<String> {
    let s = source.replace('\\', "/");
    if s.starts_with('/') {
        return Err(ShotframeError::validation("asset paths must be relative"));
    }
    if s.is_empty() {
        return Err(ShotframeError::validation("asset path must be non-empty"));
    }

    let mut out = Vec::<&str>::new();
    for part in s.split('/') {
        if part.is_empty() || part == "." {
            continue;
        }
        if part == ".." {
            return Err(ShotframeError::validation(
                "asset paths must not contain '..'",
            ));
        }
        out.push(part);
    }

    if out.is_empty() {
        return Err(ShotframeError::validation(
            "asset path must contain a file name",
        ));
    }

    Ok(out.join("/"))
}

/// Reads assets from a directory on disk.
#[derive(Clone, Debug)]
pub struct FsAssetSource {
    root: PathBuf,
}

impl FsAssetSource {
    /// Serve assets relative to `root`.
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    /// Asset root directory.
    pub fn root(&self) -> &Path {
        &self.root
    }
}

impl AssetSource for FsAssetSource {
    fn read(&self, rel_path: &str) -> ShotframeResult<Vec<u8>> {
        let norm = normalize_rel_path(rel_path)?;
        let p = self.root.join(Path::new(&norm));
        let bytes = std::fs::read(&p).with_context(|| format!("read asset '{}'", p.display()))?;
        Ok(bytes)
    }
}

/// In-memory asset table for tests and embedding.
///
/// Counts every `read` call so callers can verify caching behavior.
#[derive(Debug, Default)]
pub struct InMemoryAssetSource {
    files: BTreeMap<String, Vec<u8>>,
    reads: AtomicUsize,
}

impl InMemoryAssetSource {
    /// Create an empty source.
    pub fn new() -> Self {
        Self::default()
    }

    /// Register `bytes` under `rel_path`.
    pub fn insert(&mut self, rel_path: &str, bytes: Vec<u8>) -> ShotframeResult<()> {
        let norm = normalize_rel_path(rel_path)?;
        self.files.insert(norm, bytes);
        Ok(())
    }

    /// Number of `read` calls served so far, including misses.
    pub fn read_count(&self) -> usize {
        self.reads.load(Ordering::Relaxed)
    }
}

impl AssetSource for InMemoryAssetSource {
    fn read(&self, rel_path: &str) -> ShotframeResult<Vec<u8>> {
        self.reads.fetch_add(1, Ordering::Relaxed);
        let norm = normalize_rel_path(rel_path)?;
        self.files
            .get(&norm)
            .cloned()
            .ok_or_else(|| ShotframeError::asset(format!("asset '{norm}' not found")))
    }
}

#[cfg(test)]
#[path = "../../tests/unit/assets/source.rs"]
mod tests;
