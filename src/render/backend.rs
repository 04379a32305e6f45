//! Render backend trait for pluggable drawing surfaces.
//!
//! The engine never draws anything itself. Once per frame (or once per printed
//! page) it hands a [`Frame`] to a [`GridRenderer`]; the backend reads the
//! tracks and viewport from it and draws however it likes.

use crate::layout::{Axis, HeaderTrack, Viewport, VisibleRegion};
use crate::types::{HeaderConfig, Rect, Selection};

/// Separator being dragged, for drawing a guide before the resize is committed.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ResizePreview {
    pub axis: Axis,
    /// Header whose trailing edge is being dragged
    pub index: u32,
    /// Size under the pointer
    pub size: f32,
}

/// Everything a backend needs to draw one frame or one printed page.
#[derive(Debug, Clone)]
pub struct Frame<'a> {
    pub viewport: &'a Viewport,
    /// Rows and columns intersecting the viewport; `None` when nothing shows
    pub region: Option<VisibleRegion>,
    pub rows: &'a HeaderTrack,
    pub cols: &'a HeaderTrack,
    /// Screen position of the cell area's top-left corner (after header bands,
    /// or the printable origin of a page)
    pub origin: (f32, f32),
    /// Header bands to draw; `None` for printed pages
    pub headers: Option<&'a HeaderConfig>,
    /// Current selection (for highlighting)
    pub selection: Option<&'a Selection>,
    pub resize_preview: Option<ResizePreview>,
}

impl<'a> Frame<'a> {
    /// Frame without header bands, selection or drag feedback.
    pub fn bare(
        viewport: &'a Viewport,
        region: Option<VisibleRegion>,
        rows: &'a HeaderTrack,
        cols: &'a HeaderTrack,
        origin: (f32, f32),
    ) -> Self {
        Self {
            viewport,
            region,
            rows,
            cols,
            origin,
            headers: None,
            selection: None,
            resize_preview: None,
        }
    }

    /// Track for `axis`.
    pub fn track(&self, axis: Axis) -> &'a HeaderTrack {
        match axis {
            Axis::Row => self.rows,
            Axis::Column => self.cols,
        }
    }

    /// Screen coordinate of logical position `logical` along `axis`.
    pub fn screen_position(&self, axis: Axis, logical: f32) -> f32 {
        let origin = match axis {
            Axis::Column => self.origin.0,
            Axis::Row => self.origin.1,
        };
        origin + self.viewport.to_screen_axis(axis, logical)
    }

    /// Screen span `(start, length)` of header `index` along `axis`.
    pub fn header_span(&self, axis: Axis, index: u32) -> (f32, f32) {
        let track = self.track(axis);
        (
            self.screen_position(axis, track.position(index)),
            track.effective_size(index) * self.viewport.scale(),
        )
    }

    /// Screen rectangle of a cell.
    pub fn cell_rect(&self, row: u32, col: u32) -> Rect {
        let (x, width) = self.header_span(Axis::Column, col);
        let (y, height) = self.header_span(Axis::Row, row);
        Rect::new(x, y, width, height)
    }
}

/// A drawing surface for grid frames.
///
/// Implementations handle the actual drawing for a concrete technology
/// (canvas, GPU, PDF page, test recorder).
pub trait GridRenderer {
    /// Draw one frame.
    fn render_frame(&mut self, frame: &Frame<'_>);
}

#[cfg(test)]
#[allow(
    clippy::unwrap_used,
    clippy::expect_used,
    clippy::indexing_slicing,
    clippy::float_cmp,
    clippy::panic
)]
mod tests {
    use super::*;

    #[test]
    fn test_cell_rect_under_zoom_and_scroll() {
        let rows = HeaderTrack::new(Axis::Row, 10, 20.0);
        let cols = HeaderTrack::new(Axis::Column, 10, 100.0);
        let mut viewport = Viewport::new();
        viewport.set_scale(2.0);
        viewport.scroll_x = 50.0;

        let frame = Frame::bare(&viewport, None, &rows, &cols, (40.0, 20.0));
        let rect = frame.cell_rect(1, 1);
        assert_eq!(rect, Rect::new(40.0 + 100.0, 20.0 + 40.0, 200.0, 40.0));
    }
}
