use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

use anyhow::Context as _;

use crate::encode::png::encode_png;
use crate::foundation::error::{ShotframeError, ShotframeResult};
use crate::render::surface::FrameRGBA;

/// Destination for exported frames.
pub trait ExportSink {
    /// Write `frame` as `<filename>.png`. Returns where it went.
    fn export(&mut self, frame: &FrameRGBA, filename: &str) -> ShotframeResult<String>;
}

/// Validate an export basename: a trailing `.png` is dropped, separators are rejected.
pub fn sanitize_filename(filename: &str) -> ShotframeResult<String> {
    let trimmed = filename.trim();
    let base = trimmed
        .strip_suffix(".png")
        .or_else(|| trimmed.strip_suffix(".PNG"))
        .unwrap_or(trimmed);
    if base.is_empty() || base == "." || base == ".." {
        return Err(ShotframeError::validation("export filename must not be empty"));
    }
    if base.contains(['/', '\\']) || base.contains('\0') {
        return Err(ShotframeError::validation(format!(
            "export filename must not contain path separators: '{filename}'"
        )));
    }
    Ok(base.to_string())
}

/// Writes PNG files into a directory, creating it on first export.
#[derive(Clone, Debug)]
pub struct FsExportSink {
    dir: PathBuf,
}

impl FsExportSink {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }
}

impl ExportSink for FsExportSink {
    fn export(&mut self, frame: &FrameRGBA, filename: &str) -> ShotframeResult<String> {
        let name = sanitize_filename(filename)?;
        let bytes = encode_png(frame)?;
        std::fs::create_dir_all(&self.dir)
            .with_context(|| format!("failed to create export dir '{}'", self.dir.display()))?;
        let path = self.dir.join(format!("{name}.png"));
        std::fs::write(&path, &bytes)
            .with_context(|| format!("failed to write '{}'", path.display()))?;
        tracing::info!(path = %path.display(), bytes = bytes.len(), "exported png");
        Ok(path.display().to_string())
    }
}

/// Keeps encoded PNGs in memory, keyed by `<filename>.png`.
#[derive(Clone, Debug, Default)]
pub struct InMemoryExportSink {
    files: BTreeMap<String, Vec<u8>>,
}

impl InMemoryExportSink {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get(&self, name: &str) -> Option<&[u8]> {
        self.files.get(name).map(Vec::as_slice)
    }

    pub fn len(&self) -> usize {
        self.files.len()
    }

    pub fn is_empty(&self) -> bool {
        self.files.is_empty()
    }
}

impl ExportSink for InMemoryExportSink {
    fn export(&mut self, frame: &FrameRGBA, filename: &str) -> ShotframeResult<String> {
        let name = format!("{}.png", sanitize_filename(filename)?);
        let bytes = encode_png(frame)?;
        tracing::info!(name = %name, bytes = bytes.len(), "exported png to memory");
        self.files.insert(name.clone(), bytes);
        Ok(name)
    }
}

#[cfg(test)]
#[path = "../../tests/unit/encode/sink.rs"]
mod tests;
