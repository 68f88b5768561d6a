//! Backend-agnostic draw commands
//!
//! A paint pass emits a flat list of these in document-space coordinates
//! (y = 0 at the top of the document, before scrolling). Backends apply the
//! scroll offset at composition time and map logical colors through a theme.

use crate::layout::metrics::FontFace;
use crate::layout::style::Style;

/// Axis-aligned rectangle in document space.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Rect {
    pub x: i32,
    pub y: i32,
    pub w: i32,
    pub h: i32,
}

impl Rect {
    pub fn contains(&self, x: i32, y: i32) -> bool {
        x >= self.x && x < self.x + self.w && y >= self.y && y < self.y + self.h
    }

    /// Smallest rectangle covering both `self` and `other`.
    pub fn union(&self, other: &Rect) -> Rect {
        let x = self.x.min(other.x);
        let y = self.y.min(other.y);
        let right = (self.x + self.w).max(other.x + other.w);
        let bottom = (self.y + self.h).max(other.y + other.h);
        Rect {
            x,
            y,
            w: right - x,
            h: bottom - y,
        }
    }
}

/// What a filled rectangle represents.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Fill {
    /// Panel behind code, inline or block.
    CodeBackground,
    /// Vertical bar marking a block quote.
    QuoteBar,
    /// Horizontal rule or table grid line.
    Rule,
}

/// One paint instruction.
#[derive(Debug, Clone, PartialEq)]
pub enum DrawCmd {
    Fill { rect: Rect, kind: Fill },
    Glyphs {
        x: i32,
        y: i32,
        text: String,
        style: Style,
        face: FontFace,
        /// Uniform scale applied to the run, used by heading transforms.
        /// Coordinates are already scaled; backends only scale the glyphs.
        scale: f32,
    },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn contains_is_half_open() {
        let r = Rect { x: 2, y: 3, w: 4, h: 2 };
        assert!(r.contains(2, 3));
        assert!(r.contains(5, 4));
        assert!(!r.contains(6, 3));
        assert!(!r.contains(2, 5));
    }

    #[test]
    fn union_covers_both() {
        let a = Rect { x: 0, y: 0, w: 2, h: 2 };
        let b = Rect { x: 5, y: 1, w: 2, h: 4 };
        assert_eq!(a.union(&b), Rect { x: 0, y: 0, w: 7, h: 5 });
    }
}
