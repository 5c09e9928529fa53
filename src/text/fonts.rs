use std::path::Path;
use std::sync::Arc;

/// Font file bytes plus the face index inside the file.
#[derive(Clone, Debug)]
pub(crate) struct LoadedFont {
    pub(crate) data: Arc<Vec<u8>>,
    pub(crate) index: u32,
}

impl LoadedFont {
    pub(crate) fn font_data(&self) -> vello_cpu::peniko::FontData {
        vello_cpu::peniko::FontData::new(
            vello_cpu::peniko::Blob::from(self.data.as_ref().clone()),
            self.index,
        )
    }
}

const PREFERRED_FAMILIES: [&str; 6] = [
    "DejaVu Sans",
    "Liberation Sans",
    "Noto Sans",
    "Arial",
    "Helvetica",
    "Roboto",
];

/// Resolve the watermark font: `path` when readable, else a common system sans-serif face.
pub(crate) fn load_font(path: Option<&Path>) -> Option<LoadedFont> {
    if let Some(p) = path {
        match std::fs::read(p) {
            Ok(bytes) => {
                return Some(LoadedFont {
                    data: Arc::new(bytes),
                    index: 0,
                });
            }
            Err(e) => {
                tracing::warn!(path = %p.display(), error = %e, "watermark font unreadable; trying system fonts");
            }
        }
    }
    let font = load_system_sans();
    if font.is_none() {
        tracing::warn!("no usable system font; watermark text will be skipped");
    }
    font
}

fn load_system_sans() -> Option<LoadedFont> {
    let mut db = usvg::fontdb::Database::new();
    db.load_system_fonts();

    let named = PREFERRED_FAMILIES.iter().map(|n| usvg::fontdb::Family::Name(n));
    for family in named.chain(std::iter::once(usvg::fontdb::Family::SansSerif)) {
        let families = [family];
        let query = usvg::fontdb::Query {
            families: &families,
            ..Default::default()
        };
        let Some(id) = db.query(&query) else {
            continue;
        };
        let font = db.with_face_data(id, |data, index| LoadedFont {
            data: Arc::new(data.to_vec()),
            index,
        });
        if let Some(font) = font {
            tracing::debug!(face_index = font.index, bytes = font.data.len(), "selected system font");
            return Some(font);
        }
    }
    None
}
