use crate::fit::ImageTransform;
use crate::foundation::core::{Point, Vec2};

/// Pointer-drag repositioning.
///
/// On press the anchor `pointer − (x, y)` is captured; every move sets the offset to
/// `pointer − anchor`. Release or leave ends the drag.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct DragState {
    anchor: Option<Vec2>,
}

impl DragState {
    pub fn is_active(&self) -> bool {
        self.anchor.is_some()
    }

    pub fn begin(&mut self, pointer: Point, transform: &ImageTransform) {
        self.anchor = Some(Vec2::new(pointer.x - transform.x, pointer.y - transform.y));
    }

    /// Apply a pointer move. Returns `false` (leaving `transform` untouched) when no drag is
    /// active.
    pub fn update(&self, pointer: Point, transform: &mut ImageTransform) -> bool {
        let Some(anchor) = self.anchor else {
            return false;
        };
        transform.x = pointer.x - anchor.x;
        transform.y = pointer.y - anchor.y;
        true
    }

    pub fn end(&mut self) {
        self.anchor = None;
    }
}
