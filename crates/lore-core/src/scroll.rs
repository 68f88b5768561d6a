//! Scroll controller
//!
//! Maps content height to a scrollbar thumb and pointer/wheel input back to a
//! clamped offset. Two states: idle, and dragging with the grab point inside
//! the thumb remembered as a fraction of the thumb height, so the thumb never
//! jumps under the pointer when a drag starts.
//!
//! Invariant: `0 <= offset <= max_offset` after every operation.

/// Default wheel sensitivity, in content units per wheel unit.
pub const DEFAULT_SENSITIVITY: f32 = 0.2;

/// Thumb geometry in viewport-local coordinates.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Thumb {
    pub y: i32,
    pub height: i32,
}

#[derive(Debug, Clone, Copy, PartialEq)]
enum Drag {
    Idle,
    Dragging { grab: f32 },
}

/// Scroll state for one viewport.
#[derive(Debug, Clone, PartialEq)]
pub struct ScrollState {
    offset: i32,
    max_offset: i32,
    viewport_height: i32,
    content_height: i32,
    bottom_padding: i32,
    sensitivity: f32,
    drag: Drag,
}

impl ScrollState {
    pub fn new(viewport_height: i32) -> Self {
        Self {
            offset: 0,
            max_offset: 0,
            viewport_height,
            content_height: 0,
            bottom_padding: 0,
            sensitivity: DEFAULT_SENSITIVITY,
            drag: Drag::Idle,
        }
    }

    pub fn offset(&self) -> i32 {
        self.offset
    }

    pub fn max_offset(&self) -> i32 {
        self.max_offset
    }

    pub fn viewport_height(&self) -> i32 {
        self.viewport_height
    }

    pub fn is_dragging(&self) -> bool {
        matches!(self.drag, Drag::Dragging { .. })
    }

    /// Slack kept below the last line when computing the scroll range.
    pub fn set_bottom_padding(&mut self, padding: i32) {
        self.bottom_padding = padding;
        self.recompute();
    }

    pub fn set_sensitivity(&mut self, sensitivity: f32) {
        self.sensitivity = sensitivity;
    }

    /// Back to the top, drag released. Called when a new document binds.
    pub fn reset(&mut self) {
        self.offset = 0;
        self.drag = Drag::Idle;
    }

    pub fn set_viewport_height(&mut self, height: i32) {
        self.viewport_height = height;
        self.recompute();
    }

    /// Called after every paint with the measured content height.
    pub fn set_content_height(&mut self, height: i32) {
        self.content_height = height;
        self.recompute();
    }

    fn recompute(&mut self) {
        self.max_offset =
            (self.content_height - self.viewport_height + self.bottom_padding).max(0);
        self.offset = self.offset.clamp(0, self.max_offset);
    }

    /// Scroll by a signed amount of content units, clamped to the range.
    pub fn scroll_by(&mut self, delta: i32) {
        self.offset = (self.offset + delta).clamp(0, self.max_offset);
    }

    pub fn scroll_to_top(&mut self) {
        self.offset = 0;
    }

    pub fn scroll_to_bottom(&mut self) {
        self.offset = self.max_offset;
    }

    /// Wheel input: positive deltas scroll down. The step is
    /// `round(delta * sensitivity)`.
    pub fn wheel(&mut self, delta: f32) {
        self.scroll_by((delta * self.sensitivity).round() as i32);
    }

    /// Thumb height is the viewport's share of the scrollable extent; when
    /// nothing overflows the thumb fills the track.
    pub fn thumb(&self) -> Thumb {
        let viewport = self.viewport_height;
        let extent = (self.content_height + self.bottom_padding).max(viewport).max(1);
        let height = ((viewport as f32) * (viewport as f32 / extent as f32)) as i32;
        let height = height.clamp(1, viewport.max(1));
        let y = if self.max_offset == 0 {
            0
        } else {
            ((viewport - height) as f32 * (self.offset as f32 / self.max_offset as f32)).round()
                as i32
        };
        Thumb { y, height }
    }

    /// Pointer pressed at `y` within the scrollbar track.
    ///
    /// Inside the thumb, the drag begins with the grab fraction preserved.
    /// Elsewhere on the track, the thumb jumps so its center lands on the
    /// pointer and the drag continues from there. Returns whether the press
    /// engaged the bar.
    pub fn pointer_down(&mut self, y: i32) -> bool {
        let thumb = self.thumb();
        if thumb.height >= self.viewport_height {
            return false;
        }
        if y >= thumb.y && y < thumb.y + thumb.height {
            self.drag = Drag::Dragging {
                grab: (y - thumb.y) as f32 / thumb.height as f32,
            };
            true
        } else if y >= 0 && y < self.viewport_height {
            self.drag = Drag::Dragging { grab: 0.5 };
            self.drag_to(y);
            true
        } else {
            false
        }
    }

    /// Pointer moved while a drag may be active. Returns whether the offset
    /// was driven by a drag.
    pub fn pointer_move(&mut self, y: i32) -> bool {
        if self.is_dragging() {
            self.drag_to(y);
            true
        } else {
            false
        }
    }

    pub fn pointer_up(&mut self) {
        self.drag = Drag::Idle;
    }

    /// Map the pointer back to an offset: the thumb's top edge (pointer minus
    /// grab) as a fraction of the free track, scaled to the scroll range.
    fn drag_to(&mut self, y: i32) {
        let Drag::Dragging { grab } = self.drag else {
            return;
        };
        let thumb = self.thumb();
        let track = self.viewport_height - thumb.height;
        if track <= 0 {
            self.offset = 0;
            return;
        }
        let top = y as f32 - grab * thumb.height as f32;
        let target = (top / track as f32 * self.max_offset as f32).round() as i32;
        self.offset = target.clamp(0, self.max_offset);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::prelude::*;

    #[test]
    fn overflow_math() {
        let mut scroll = ScrollState::new(200);
        scroll.set_content_height(1000);
        assert_eq!(scroll.max_offset(), 800);
        let thumb = scroll.thumb();
        // 200 * (200 / 1000) = 40.
        assert_eq!(thumb.height, 40);
        assert_eq!(thumb.y, 0);
    }

    #[test]
    fn drag_to_bottom_reaches_max_offset() {
        let mut scroll = ScrollState::new(200);
        scroll.set_content_height(1000);
        assert!(scroll.pointer_down(0), "press inside the thumb");
        scroll.pointer_move(160);
        assert_eq!(scroll.offset(), 800);
        // Overshoot clamps.
        scroll.pointer_move(10_000);
        assert_eq!(scroll.offset(), 800);
        scroll.pointer_up();
        assert!(!scroll.is_dragging());
    }

    #[test]
    fn grab_fraction_prevents_thumb_jump() {
        let mut scroll = ScrollState::new(200);
        scroll.set_content_height(1000);
        // Press the middle of the thumb (height 40, so y = 20) and do not
        // move: the offset must stay put.
        assert!(scroll.pointer_down(20));
        scroll.pointer_move(20);
        assert_eq!(scroll.offset(), 0);
    }

    #[test]
    fn track_click_jumps_and_keeps_dragging() {
        let mut scroll = ScrollState::new(200);
        scroll.set_content_height(1000);
        assert!(scroll.pointer_down(120));
        // Thumb centered on the pointer: top = 120 - 20, over 160 of track.
        assert_eq!(scroll.offset(), 500);
        assert!(scroll.is_dragging());
    }

    #[test]
    fn no_overflow_collapses_to_zero() {
        let mut scroll = ScrollState::new(200);
        scroll.set_content_height(150);
        assert_eq!(scroll.max_offset(), 0);
        assert_eq!(scroll.thumb().height, 200);
        scroll.wheel(500.0);
        assert_eq!(scroll.offset(), 0);
        assert!(!scroll.pointer_down(50), "full thumb ignores presses");
    }

    #[test]
    fn bottom_padding_extends_the_range() {
        let mut scroll = ScrollState::new(200);
        scroll.set_bottom_padding(10);
        scroll.set_content_height(1000);
        assert_eq!(scroll.max_offset(), 810);
    }

    #[test]
    fn shrinking_content_reclamps_offset() {
        let mut scroll = ScrollState::new(200);
        scroll.set_content_height(1000);
        scroll.scroll_to_bottom();
        assert_eq!(scroll.offset(), 800);
        scroll.set_content_height(300);
        assert_eq!(scroll.offset(), 100);
    }

    #[test]
    fn wheel_steps_by_sensitivity() {
        let mut scroll = ScrollState::new(200);
        scroll.set_content_height(1000);
        scroll.set_sensitivity(0.2);
        scroll.wheel(120.0);
        assert_eq!(scroll.offset(), 24);
        scroll.wheel(-120.0);
        assert_eq!(scroll.offset(), 0);
    }

    #[test]
    fn offset_invariant_under_random_input() {
        let mut rng = StdRng::seed_from_u64(0x5c80);
        let mut scroll = ScrollState::new(200);
        for _ in 0..2000 {
            match rng.gen_range(0..7) {
                0 => scroll.wheel(rng.gen_range(-500.0..500.0)),
                1 => scroll.set_content_height(rng.gen_range(0..5000)),
                2 => scroll.set_viewport_height(rng.gen_range(1..600)),
                3 => {
                    scroll.pointer_down(rng.gen_range(-100..700));
                }
                4 => {
                    scroll.pointer_move(rng.gen_range(-100..700));
                }
                5 => scroll.pointer_up(),
                _ => scroll.scroll_by(rng.gen_range(-1000..1000)),
            }
            assert!(scroll.offset() >= 0);
            assert!(scroll.offset() <= scroll.max_offset());
        }
    }
}
