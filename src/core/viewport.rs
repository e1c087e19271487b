//! Vertical scroll window over a block of rendered lines.

/// Scroll state for one pane.
///
/// `y_offset` is always within `0..=max_offset()`; every mutator clamps.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Viewport {
    pub width: u16,
    pub height: u16,
    y_offset: usize,
    content_height: usize,
}

impl Viewport {
    pub fn new(width: u16, height: u16) -> Self {
        Self {
            width,
            height,
            ..Default::default()
        }
    }

    pub fn y_offset(&self) -> usize {
        self.y_offset
    }

    pub fn content_height(&self) -> usize {
        self.content_height
    }

    pub fn max_offset(&self) -> usize {
        self.content_height.saturating_sub(self.height as usize)
    }

    pub fn resize(&mut self, width: u16, height: u16) {
        self.width = width;
        self.height = height;
        self.clamp();
    }

    /// Record the number of lines currently rendered into this pane.
    pub fn set_content_height(&mut self, lines: usize) {
        self.content_height = lines;
        self.clamp();
    }

    pub fn set_y_offset(&mut self, offset: usize) {
        self.y_offset = offset;
        self.clamp();
    }

    pub fn scroll_up(&mut self, lines: usize) {
        self.set_y_offset(self.y_offset.saturating_sub(lines));
    }

    pub fn scroll_down(&mut self, lines: usize) {
        self.set_y_offset(self.y_offset.saturating_add(lines));
    }

    pub fn half_page_up(&mut self) {
        self.scroll_up(self.half_page());
    }

    pub fn half_page_down(&mut self) {
        self.scroll_down(self.half_page());
    }

    pub fn goto_top(&mut self) {
        self.y_offset = 0;
    }

    pub fn goto_bottom(&mut self) {
        self.y_offset = self.max_offset();
    }

    /// Nudge the offset by the minimum amount that brings `line` into view.
    pub fn ensure_visible(&mut self, line: usize) {
        let height = self.height as usize;
        if height == 0 {
            return;
        }
        if line < self.y_offset {
            self.set_y_offset(line);
        } else if line >= self.y_offset + height {
            self.set_y_offset(line + 1 - height);
        }
    }

    fn half_page(&self) -> usize {
        (self.height as usize / 2).max(1)
    }

    fn clamp(&mut self) {
        self.y_offset = self.y_offset.min(self.max_offset());
    }
}
