//! `CanvasFrame`: a thin wrapper around the render target that clamps all
//! drawing to the visible area.
//!
//! Overlay painting computes rectangles from live component bounds, and
//! those can drift partially outside the canvas (a panel anchored near an
//! edge, a drop guide one cell past a row). Writing out of bounds into the
//! underlying `Buffer` can panic or corrupt rendering, so every draw call
//! is clipped here instead of guarded at each call site.

use ratatui::Frame;
use ratatui::buffer::{Buffer, Cell};
use ratatui::layout::Rect;
use ratatui::widgets::Widget;

pub struct CanvasFrame<'a> {
    area: Rect,
    buffer: &'a mut Buffer,
}

impl<'a> CanvasFrame<'a> {
    pub fn new(frame: &'a mut Frame<'_>) -> Self {
        let area = frame.area();
        let buffer = frame.buffer_mut();
        Self { area, buffer }
    }

    /// Construct directly from an area and buffer. This powers the test
    /// rendering path, where paint routines draw into a detached buffer.
    pub fn from_parts(area: Rect, buffer: &'a mut Buffer) -> Self {
        Self { area, buffer }
    }

    pub fn area(&self) -> Rect {
        self.area
    }

    pub fn buffer_mut(&mut self) -> &mut Buffer {
        self.buffer
    }

    fn clip_rect(&self, rect: Rect) -> Option<Rect> {
        let clipped = rect.intersection(self.area);
        if clipped.width == 0 || clipped.height == 0 {
            None
        } else {
            Some(clipped)
        }
    }

    pub fn render_widget<W>(&mut self, widget: W, area: Rect)
    where
        W: Widget,
    {
        if let Some(clipped) = self.clip_rect(area) {
            widget.render(clipped, self.buffer);
        }
    }

    /// Mutable access to one cell, or `None` when it is off-canvas.
    pub fn cell_mut(&mut self, x: u16, y: u16) -> Option<&mut Cell> {
        if x < self.area.x
            || y < self.area.y
            || x >= self.area.x.saturating_add(self.area.width)
            || y >= self.area.y.saturating_add(self.area.height)
        {
            return None;
        }
        self.buffer.cell_mut((x, y))
    }

    /// Write a string starting at `(x, y)`, clipped to the canvas.
    pub fn set_string(&mut self, x: u16, y: u16, s: &str, style: ratatui::style::Style) {
        if y < self.area.y || y >= self.area.y.saturating_add(self.area.height) {
            return;
        }
        let right = self.area.x.saturating_add(self.area.width);
        if x < self.area.x || x >= right {
            return;
        }
        let max = (right - x) as usize;
        self.buffer.set_stringn(x, y, s, max, style);
    }
}
