//! Entry-pane list scrolling
//!
//! Selection and windowing for the entry index: a cursor, the first visible
//! row, and enough arithmetic to keep the cursor on screen as it moves.

/// Scroll and selection state for the entry list.
#[derive(Debug, Clone)]
pub struct ListScroll {
    /// Currently selected index.
    pub selected: usize,
    /// First visible item.
    pub offset: usize,
    /// Number of items in the list.
    pub total: usize,
    /// Rows available for items.
    pub visible_height: usize,
}

impl Default for ListScroll {
    fn default() -> Self {
        Self {
            selected: 0,
            offset: 0,
            total: 0,
            visible_height: 10,
        }
    }
}

impl ListScroll {
    /// Update the item count; called whenever the filter changes the list.
    pub fn set_total(&mut self, total: usize) {
        self.total = total;
        if self.selected >= total && total > 0 {
            self.selected = total - 1;
        }
        if total == 0 {
            self.selected = 0;
            self.offset = 0;
        }
        self.ensure_visible();
    }

    /// Set the visible height (call after layout).
    pub fn set_visible_height(&mut self, height: usize) {
        self.visible_height = height.max(1);
        self.ensure_visible();
    }

    pub fn next(&mut self) {
        if self.total == 0 {
            return;
        }
        if self.selected < self.total - 1 {
            self.selected += 1;
            self.ensure_visible();
        }
    }

    pub fn prev(&mut self) {
        if self.selected > 0 {
            self.selected -= 1;
            self.ensure_visible();
        }
    }

    fn ensure_visible(&mut self) {
        if self.selected < self.offset {
            self.offset = self.selected;
        } else if self.selected >= self.offset + self.visible_height {
            self.offset = self.selected - self.visible_height + 1;
        }
    }

    /// Range of indices currently on screen.
    pub fn visible_range(&self) -> std::ops::Range<usize> {
        let end = (self.offset + self.visible_height).min(self.total);
        self.offset..end
    }

    pub fn is_selected(&self, index: usize) -> bool {
        index == self.selected
    }

    /// Map a clicked row (relative to the first visible item) to its index.
    pub fn index_at_row(&self, row: usize) -> Option<usize> {
        let index = self.offset + row;
        (row < self.visible_height && index < self.total).then_some(index)
    }
}
