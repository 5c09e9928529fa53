//! CPU compositing: backdrop rasterization, layer drawing, shadows, and the render pipeline.

pub(crate) mod backdrop;
pub(crate) mod blur;
pub(crate) mod composite;
pub(crate) mod pipeline;
pub(crate) mod shapes;
pub(crate) mod surface;
