//! Scroll, zoom and frame production for `GridView`.

use super::GridView;
use crate::layout::{Axis, VisibleRegion};
use crate::render::{Frame, GridRenderer, ResizePreview};
use crate::types::Selection;

impl GridView {
    /// Scroll by delta amounts in logical units.
    ///
    /// Returns true if the scroll position actually moved.
    pub fn scroll_by(&mut self, delta_x: f32, delta_y: f32) -> bool {
        let before = (self.viewport.scroll_x, self.viewport.scroll_y);
        self.viewport.scroll_by(delta_x, delta_y, &self.cols, &self.rows);
        self.scroll_changed(before)
    }

    /// Set the absolute scroll position (logical units), clamped to the content.
    pub fn set_scroll(&mut self, x: f32, y: f32) -> bool {
        let before = (self.viewport.scroll_x, self.viewport.scroll_y);
        self.viewport.set_scroll(x, y, &self.cols, &self.rows);
        self.scroll_changed(before)
    }

    fn scroll_changed(&mut self, before: (f32, f32)) -> bool {
        let dx = self.viewport.scroll_x - before.0;
        let dy = self.viewport.scroll_y - before.1;
        let moved = dx.abs() > f32::EPSILON || dy.abs() > f32::EPSILON;
        if moved {
            self.needs_render = true;
        }
        moved
    }

    /// Set the zoom factor, clamped to the configured limits.
    pub fn set_zoom(&mut self, scale: f32) -> bool {
        let changed = self.viewport.set_scale(scale);
        if changed {
            self.viewport.clamp_scroll(&self.cols, &self.rows);
            self.needs_render = true;
        }
        changed
    }

    /// Zoom keeping the cell under surface point `(x, y)` fixed.
    pub fn zoom_at(&mut self, scale: f32, x: f32, y: f32) -> bool {
        let before = self.viewport.scale();
        let anchor_x = (x - self.config.headers.band_width()).max(0.0);
        let anchor_y = (y - self.config.headers.band_height()).max(0.0);
        self.viewport
            .zoom_at(scale, anchor_x, anchor_y, &self.cols, &self.rows);
        let changed = (self.viewport.scale() - before).abs() > f32::EPSILON;
        if changed {
            self.needs_render = true;
        }
        changed
    }

    pub fn scale(&self) -> f32 {
        self.viewport.scale()
    }

    /// Resize the whole surface (header bands included), in screen pixels.
    pub fn resize(&mut self, width: f32, height: f32) {
        self.viewport.resize(
            width - self.config.headers.band_width(),
            height - self.config.headers.band_height(),
        );
        self.viewport.clamp_scroll(&self.cols, &self.rows);
        self.needs_render = true;
    }

    /// Rows and columns currently on screen.
    pub fn visible_region(&self) -> Option<VisibleRegion> {
        self.viewport.visible_region(&self.cols, &self.rows)
    }

    /// Separator being dragged, if any.
    pub fn resize_preview(&self) -> Option<ResizePreview> {
        [&self.col_resize, &self.row_resize]
            .into_iter()
            .find_map(|resize| {
                resize.session().map(|session| ResizePreview {
                    axis: resize.axis(),
                    index: session.target_index,
                    size: session.provisional_size,
                })
            })
    }

    /// Frame describing the current state for `region`, highlighting `selection`.
    pub fn frame<'a>(
        &'a self,
        region: Option<VisibleRegion>,
        selection: Option<&'a Selection>,
    ) -> Frame<'a> {
        Frame {
            headers: Some(&self.config.headers),
            selection,
            resize_preview: self.resize_preview(),
            ..Frame::bare(
                &self.viewport,
                region,
                &self.rows,
                &self.cols,
                (
                    self.config.headers.band_width(),
                    self.config.headers.band_height(),
                ),
            )
        }
    }

    /// Hand the current frame to `renderer` and clear the redraw flag.
    pub fn render(&mut self, renderer: &mut dyn GridRenderer) {
        let region = self.visible_region();
        let selection = self.displayed_selection();
        renderer.render_frame(&self.frame(region, selection.as_ref()));
        self.needs_render = false;
    }

    /// Logical position of the top-left visible cell.
    pub fn scroll_position(&self) -> (f32, f32) {
        (
            self.viewport.offset(Axis::Column),
            self.viewport.offset(Axis::Row),
        )
    }
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
    use crate::config::GridConfig;

    #[test]
    fn test_resize_excludes_header_bands() {
        let mut view = GridView::new(100, 100, GridConfig::default());
        view.resize(440.0, 220.0);
        assert_eq!(view.viewport().width, 400.0);
        assert_eq!(view.viewport().height, 200.0);
        assert_eq!(view.visible_region().unwrap().rows, 0..11);
    }

    #[test]
    fn test_scroll_reports_movement() {
        let mut view = GridView::new(10, 10, GridConfig::default());
        view.resize(240.0, 120.0);
        assert!(view.scroll_by(30.0, 0.0));
        assert!(view.scroll_by(-100.0, 0.0));
        assert_eq!(view.scroll_position(), (0.0, 0.0));
        assert!(!view.scroll_by(-10.0, 0.0));
    }

    #[test]
    fn test_render_clears_flag() {
        struct Count(usize);
        impl GridRenderer for Count {
            fn render_frame(&mut self, frame: &Frame<'_>) {
                assert!(frame.region.is_some());
                self.0 += 1;
            }
        }
        let mut view = GridView::new(10, 10, GridConfig::default());
        assert!(view.needs_render());
        let mut renderer = Count(0);
        view.render(&mut renderer);
        assert_eq!(renderer.0, 1);
        assert!(!view.needs_render());
    }
}
