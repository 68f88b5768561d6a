//! Pen state threaded through a traversal

/// Position, indent, and remaining width for the current nesting level.
///
/// `x` is relative to `base_x`; emitted glyph runs land at `base_x + x`.
/// `y` only ever grows within a block (tables reset it per cell while laying
/// out columns side by side). `marker` carries a pending list-item marker from
/// the list container to the item that draws it.
#[derive(Debug, Clone, Default)]
pub struct Cursor {
    pub x: i32,
    pub y: i32,
    pub base_x: i32,
    pub width: i32,
    pub marker: Option<String>,
}

impl Cursor {
    pub fn new(width: i32) -> Self {
        Self {
            width,
            ..Self::default()
        }
    }
}
