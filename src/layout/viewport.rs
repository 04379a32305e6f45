//! Viewport state management for scrolling and zoom.

use std::ops::Range;

use serde::{Deserialize, Serialize};

use super::{Axis, HeaderTrack};

/// Smallest zoom factor accepted by default (10%)
pub const DEFAULT_MIN_SCALE: f32 = 0.1;

/// Largest zoom factor accepted by default (400%)
pub const DEFAULT_MAX_SCALE: f32 = 4.0;

/// Viewport state - represents the visible area of the grid
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Viewport {
    /// Horizontal scroll position in logical coordinates
    pub scroll_x: f32,
    /// Vertical scroll position in logical coordinates
    pub scroll_y: f32,
    /// Viewport width in screen pixels
    pub width: f32,
    /// Viewport height in screen pixels
    pub height: f32,
    /// Zoom scale factor (1.0 = 100%), always within `[min_scale, max_scale]`
    scale: f32,
    min_scale: f32,
    max_scale: f32,
}

/// Index ranges currently on screen, handed to the rendering backend.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct VisibleRegion {
    /// Rows intersecting the viewport (end exclusive)
    pub rows: Range<u32>,
    /// Columns intersecting the viewport (end exclusive)
    pub cols: Range<u32>,
}

impl Default for Viewport {
    fn default() -> Self {
        Self::new()
    }
}

impl Viewport {
    /// Create a new viewport with default values
    pub fn new() -> Self {
        Self::with_scale_limits(DEFAULT_MIN_SCALE, DEFAULT_MAX_SCALE)
    }

    /// Create a viewport whose zoom is clamped to `[min_scale, max_scale]`.
    ///
    /// Limits that are not positive and finite fall back to the defaults, and
    /// swapped limits are reordered.
    pub fn with_scale_limits(min_scale: f32, max_scale: f32) -> Self {
        let valid = |s: f32| s.is_finite() && s > 0.0;
        let min_scale = if valid(min_scale) { min_scale } else { DEFAULT_MIN_SCALE };
        let max_scale = if valid(max_scale) { max_scale } else { DEFAULT_MAX_SCALE };
        let (min_scale, max_scale) = if min_scale <= max_scale {
            (min_scale, max_scale)
        } else {
            (max_scale, min_scale)
        };
        Self {
            scroll_x: 0.0,
            scroll_y: 0.0,
            width: 800.0,
            height: 600.0,
            scale: 1.0_f32.clamp(min_scale, max_scale),
            min_scale,
            max_scale,
        }
    }

    /// Transient viewport for one printed page: scrolled to the page's logical
    /// top-left and zoomed to the print scale.
    pub fn for_page(origin_x: f32, origin_y: f32, width: f32, height: f32, scale: f32) -> Self {
        let mut viewport = Self::new();
        viewport.scroll_x = origin_x;
        viewport.scroll_y = origin_y;
        viewport.width = width;
        viewport.height = height;
        viewport.set_scale(scale);
        viewport
    }

    /// Current zoom factor.
    pub fn scale(&self) -> f32 {
        self.scale
    }

    /// Configured zoom limits.
    pub fn scale_limits(&self) -> (f32, f32) {
        (self.min_scale, self.max_scale)
    }

    /// Set the zoom factor, clamped silently to the configured limits.
    ///
    /// Non-finite values are ignored. Returns true if the scale changed.
    pub fn set_scale(&mut self, scale: f32) -> bool {
        if !scale.is_finite() {
            return false;
        }
        let clamped = scale.clamp(self.min_scale, self.max_scale);
        let changed = (clamped - self.scale).abs() > f32::EPSILON;
        self.scale = clamped;
        changed
    }

    /// Scroll offset along an axis.
    pub fn offset(&self, axis: Axis) -> f32 {
        match axis {
            Axis::Column => self.scroll_x,
            Axis::Row => self.scroll_y,
        }
    }

    /// Viewport extent along an axis in screen pixels.
    pub fn extent(&self, axis: Axis) -> f32 {
        match axis {
            Axis::Column => self.width,
            Axis::Row => self.height,
        }
    }

    /// Viewport extent along an axis in logical units.
    pub fn logical_extent(&self, axis: Axis) -> f32 {
        self.extent(axis) / self.scale
    }

    /// Convert a logical position on `axis` to a screen position.
    pub fn to_screen_axis(&self, axis: Axis, logical: f32) -> f32 {
        (logical - self.offset(axis)) * self.scale
    }

    /// Convert a screen position on `axis` to a logical position.
    pub fn to_logical_axis(&self, axis: Axis, screen: f32) -> f32 {
        screen / self.scale + self.offset(axis)
    }

    /// Convert logical coordinates to screen coordinates
    pub fn to_screen(&self, x: f32, y: f32) -> (f32, f32) {
        (
            self.to_screen_axis(Axis::Column, x),
            self.to_screen_axis(Axis::Row, y),
        )
    }

    /// Convert screen coordinates to logical coordinates
    pub fn to_logical(&self, screen_x: f32, screen_y: f32) -> (f32, f32) {
        (
            self.to_logical_axis(Axis::Column, screen_x),
            self.to_logical_axis(Axis::Row, screen_y),
        )
    }

    /// Clamp scroll position to `[0, total_extent - viewport_extent]` per axis
    /// (0 when the content is smaller than the viewport).
    pub fn clamp_scroll(&mut self, cols: &HeaderTrack, rows: &HeaderTrack) {
        let max_x = (cols.total_extent() - self.logical_extent(Axis::Column)).max(0.0);
        let max_y = (rows.total_extent() - self.logical_extent(Axis::Row)).max(0.0);

        self.scroll_x = if self.scroll_x.is_finite() {
            self.scroll_x.clamp(0.0, max_x)
        } else {
            0.0
        };
        self.scroll_y = if self.scroll_y.is_finite() {
            self.scroll_y.clamp(0.0, max_y)
        } else {
            0.0
        };
    }

    /// Scroll by delta amounts (logical units)
    pub fn scroll_by(&mut self, delta_x: f32, delta_y: f32, cols: &HeaderTrack, rows: &HeaderTrack) {
        self.scroll_x += delta_x;
        self.scroll_y += delta_y;
        self.clamp_scroll(cols, rows);
    }

    /// Set absolute scroll position
    pub fn set_scroll(&mut self, x: f32, y: f32, cols: &HeaderTrack, rows: &HeaderTrack) {
        self.scroll_x = x;
        self.scroll_y = y;
        self.clamp_scroll(cols, rows);
    }

    /// Zoom to `scale` keeping the logical point under the screen anchor fixed.
    pub fn zoom_at(
        &mut self,
        scale: f32,
        anchor_x: f32,
        anchor_y: f32,
        cols: &HeaderTrack,
        rows: &HeaderTrack,
    ) {
        let (logical_x, logical_y) = self.to_logical(anchor_x, anchor_y);
        if !self.set_scale(scale) {
            return;
        }
        self.scroll_x = logical_x - anchor_x / self.scale;
        self.scroll_y = logical_y - anchor_y / self.scale;
        self.clamp_scroll(cols, rows);
    }

    /// Resize the viewport
    pub fn resize(&mut self, width: f32, height: f32) {
        self.width = width.max(0.0);
        self.height = height.max(0.0);
    }

    /// Header indices of `track` intersecting the viewport, end exclusive.
    ///
    /// `None` when the track has no extent inside the viewport.
    pub fn visible_range(&self, track: &HeaderTrack) -> Option<Range<u32>> {
        let axis = track.axis();
        let start_pos = self.offset(axis).max(0.0);
        let end_pos = start_pos + self.logical_extent(axis);
        if start_pos >= track.total_extent() || end_pos <= start_pos {
            return None;
        }
        let start = track.find_index_at_position(start_pos)?;
        let end = track
            .find_index_at_position(end_pos)
            .map_or(track.len(), |last| last.saturating_add(1));
        Some(start..end)
    }

    /// Get visible row range
    pub fn visible_rows(&self, rows: &HeaderTrack) -> Option<Range<u32>> {
        self.visible_range(rows)
    }

    /// Get visible column range
    pub fn visible_cols(&self, cols: &HeaderTrack) -> Option<Range<u32>> {
        self.visible_range(cols)
    }

    /// Rows and columns the rendering backend has to draw this frame.
    pub fn visible_region(&self, cols: &HeaderTrack, rows: &HeaderTrack) -> Option<VisibleRegion> {
        Some(VisibleRegion {
            rows: self.visible_rows(rows)?,
            cols: self.visible_cols(cols)?,
        })
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

    fn tracks() -> (HeaderTrack, HeaderTrack) {
        (
            HeaderTrack::new(Axis::Column, 100, 80.0),
            HeaderTrack::new(Axis::Row, 1000, 20.0),
        )
    }

    #[test]
    fn test_to_screen_with_scale() {
        let mut viewport = Viewport::new();
        viewport.set_scale(2.0);
        assert_eq!(viewport.to_screen_axis(Axis::Column, 100.0), 200.0);
        assert_eq!(viewport.to_logical_axis(Axis::Column, 200.0), 100.0);
    }

    #[test]
    fn test_scroll_offsets_are_independent() {
        let mut viewport = Viewport::new();
        viewport.scroll_x = 50.0;
        viewport.scroll_y = 10.0;
        assert_eq!(viewport.to_screen(150.0, 30.0), (100.0, 20.0));
        assert_eq!(viewport.to_logical(100.0, 20.0), (150.0, 30.0));
    }

    #[test]
    fn test_scale_clamps_silently() {
        let mut viewport = Viewport::new();
        viewport.set_scale(10.0);
        assert_eq!(viewport.scale(), DEFAULT_MAX_SCALE);
        viewport.set_scale(0.0);
        assert_eq!(viewport.scale(), DEFAULT_MIN_SCALE);
        assert!(!viewport.set_scale(f32::NAN));
        assert_eq!(viewport.scale(), DEFAULT_MIN_SCALE);
    }

    #[test]
    fn test_swapped_limits() {
        let viewport = Viewport::with_scale_limits(3.0, 0.5);
        assert_eq!(viewport.scale_limits(), (0.5, 3.0));
    }

    #[test]
    fn test_clamp_scroll() {
        let (cols, rows) = tracks();
        let mut viewport = Viewport::new();
        viewport.set_scroll(-10.0, 1.0e9, &cols, &rows);
        assert_eq!(viewport.scroll_x, 0.0);
        assert_eq!(viewport.scroll_y, 20_000.0 - 600.0);

        // Zoomed out, more content fits so the maximum scroll shrinks
        viewport.set_scale(0.5);
        viewport.clamp_scroll(&cols, &rows);
        assert_eq!(viewport.scroll_y, 20_000.0 - 1200.0);
    }

    #[test]
    fn test_content_smaller_than_viewport() {
        let cols = HeaderTrack::new(Axis::Column, 2, 80.0);
        let rows = HeaderTrack::new(Axis::Row, 2, 20.0);
        let mut viewport = Viewport::new();
        viewport.scroll_by(500.0, 500.0, &cols, &rows);
        assert_eq!((viewport.scroll_x, viewport.scroll_y), (0.0, 0.0));
    }

    #[test]
    fn test_visible_region() {
        let (cols, rows) = tracks();
        let mut viewport = Viewport::new();
        viewport.scroll_y = 200.0;
        let region = viewport.visible_region(&cols, &rows).unwrap();
        assert_eq!(region.rows, 10..41);
        assert_eq!(region.cols, 0..11);
    }

    #[test]
    fn test_zoom_at_keeps_anchor() {
        let (cols, rows) = tracks();
        let mut viewport = Viewport::new();
        viewport.set_scroll(400.0, 400.0, &cols, &rows);
        let before = viewport.to_logical(100.0, 100.0);
        viewport.zoom_at(2.0, 100.0, 100.0, &cols, &rows);
        assert_eq!(viewport.to_logical(100.0, 100.0), before);
    }
}
