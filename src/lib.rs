#![forbid(unsafe_code)]

pub(crate) mod assets;
pub(crate) mod config;
pub(crate) mod devices;
pub(crate) mod encode;
pub(crate) mod entitlement;
pub(crate) mod fit;
pub(crate) mod foundation;
pub(crate) mod layout;
pub(crate) mod render;
pub(crate) mod session;
pub(crate) mod template;
pub(crate) mod text;

pub use assets::color::Color;
pub use assets::decode::{SourceImage, decode_image};
pub use assets::frame::{
    DeviceFrameAsset, FrameAssetCache, FrameDescriptor, FrameSize, load_frame_asset,
};
pub use assets::source::{AssetSource, FsAssetSource, InMemoryAssetSource, normalize_rel_path};
pub use config::{
    BrowserGeometry, CornerRadii, EngineConfig, FallbackScreens, LaptopGeometry, WatermarkConfig,
};
pub use encode::png::encode_png;
pub use encode::sink::{ExportSink, FsExportSink, InMemoryExportSink, sanitize_filename};
pub use entitlement::{Entitlement, EntitlementRecord, LocalQuota};
pub use fit::drag::DragState;
pub use fit::{FillPreset, ImageTransform, base_scale, cover_scale, fill_transform, place};
pub use foundation::core::{Canvas, Point, Rgba8Premul, ScreenRect, Size, Vec2};
pub use foundation::error::{ShotframeError, ShotframeResult};
pub use layout::rotate::{
    landscape_frame_affine, rotate_point, rotate_screen_rect, unrotate_screen_rect,
};
pub use layout::{FrameSource, LayoutResult, resolve_layout};
pub use render::pipeline::{ComposeRequest, Composite, Compositor, ScreenFill};
pub use render::surface::FrameRGBA;
pub use session::{EditorSession, RenderOutcome};
pub use template::presets::{NamedTemplate, builtin_templates, template_by_name};
pub use template::{
    Backdrop, DEFAULT_PHONE_ASSET, DEFAULT_TABLET_ASSET, DeviceKind, Orientation, Template,
};
pub use text::watermark::{Stamp, StampKind, plan_stamps};
