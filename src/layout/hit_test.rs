//! Screen-point to header resolution, including the separator grab band.

use serde::Serialize;

use super::{HeaderTrack, Viewport};

/// Distance in screen pixels from a header boundary that still counts as
/// grabbing the separator.
pub const DEFAULT_SEPARATOR_TOLERANCE: f32 = 3.0;

/// Result of locating a screen coordinate on a header track.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct HeaderHit {
    /// Header containing the point
    pub index: u32,
    /// The point lies within the tolerance band of a separator
    pub near_separator: bool,
    /// Header whose trailing edge is the touched separator (the one a drag
    /// resizes); `None` unless `near_separator`
    pub separator: Option<u32>,
}

impl HeaderHit {
    fn body(index: u32) -> Self {
        Self {
            index,
            near_separator: false,
            separator: None,
        }
    }

    /// Header a resize drag starting here would act on.
    pub fn resize_target(&self) -> Option<u32> {
        self.separator
    }
}

/// Resolves screen coordinates along one track under a viewport transform.
#[derive(Debug, Clone, Copy)]
pub struct HitTester<'a> {
    track: &'a HeaderTrack,
    viewport: &'a Viewport,
    tolerance: f32,
}

impl<'a> HitTester<'a> {
    /// Hit tester with the default separator tolerance.
    pub fn new(track: &'a HeaderTrack, viewport: &'a Viewport) -> Self {
        Self {
            track,
            viewport,
            tolerance: DEFAULT_SEPARATOR_TOLERANCE,
        }
    }

    /// Override the separator tolerance (screen pixels, negative treated as 0).
    #[must_use]
    pub fn with_tolerance(mut self, tolerance: f32) -> Self {
        self.tolerance = if tolerance.is_finite() {
            tolerance.max(0.0)
        } else {
            DEFAULT_SEPARATOR_TOLERANCE
        };
        self
    }

    /// Locate a screen coordinate, local to the track's content area.
    ///
    /// Coordinates before the first header resolve to the first visible header
    /// with no separator. Coordinates past the last visible header return
    /// `None`, as does a track with nothing visible.
    ///
    /// The binary search runs in logical units, but the answer is settled
    /// against header edges mapped to screen space, so a point sitting exactly
    /// on `to_screen(position(i))` belongs to header `i` at any scroll and zoom.
    pub fn locate(&self, screen: f32) -> Option<HeaderHit> {
        if screen.is_nan() {
            return None;
        }
        if screen < self.to_screen(0.0) {
            return self.track.first_visible().map(HeaderHit::body);
        }
        let total = self.track.total_extent();
        if screen >= self.to_screen(total) {
            return None;
        }
        let logical = self
            .viewport
            .to_logical_axis(self.track.axis(), screen)
            .clamp(0.0, total);
        let found = match self.track.find_index_at_position(logical) {
            Some(index) => index,
            None => self.track.last_visible()?,
        };
        let index = self.settle(found, screen);

        let to_start = screen - self.to_screen(self.track.position(index));
        let to_end = self.to_screen(self.track.edge(index)) - screen;

        let leading = if to_start <= self.tolerance {
            self.track.prev_visible(index)
        } else {
            None
        };
        let trailing = (to_end <= self.tolerance).then_some(index);

        let separator = match (leading, trailing) {
            (Some(prev), Some(_)) if to_start < to_end => Some(prev),
            (Some(_), Some(current)) => Some(current),
            (Some(prev), None) => Some(prev),
            (None, trailing) => trailing,
        };

        Some(HeaderHit {
            index,
            near_separator: separator.is_some(),
            separator,
        })
    }

    fn to_screen(&self, logical: f32) -> f32 {
        self.viewport.to_screen_axis(self.track.axis(), logical)
    }

    /// Step to the neighbour whose screen span `[start, end)` holds `screen`.
    /// Rounding in the logical lookup is off by at most one visible header.
    fn settle(&self, mut index: u32, screen: f32) -> u32 {
        while self.to_screen(self.track.edge(index)) <= screen {
            match self.track.next_visible(index) {
                Some(next) => index = next,
                None => break,
            }
        }
        while screen < self.to_screen(self.track.position(index)) {
            match self.track.prev_visible(index) {
                Some(prev) => index = prev,
                None => break,
            }
        }
        index
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
    use crate::layout::Axis;

    fn four_columns() -> HeaderTrack {
        HeaderTrack::new(Axis::Column, 4, 100.0)
    }

    #[test]
    fn test_locate_body() {
        let cols = four_columns();
        let viewport = Viewport::new();
        let hit = HitTester::new(&cols, &viewport).locate(250.0).unwrap();
        assert_eq!(hit.index, 2);
        assert!(!hit.near_separator);
        assert_eq!(hit.separator, None);
    }

    #[test]
    fn test_locate_near_separator() {
        let cols = four_columns();
        let viewport = Viewport::new();
        let tester = HitTester::new(&cols, &viewport);

        let before = tester.locate(199.0).unwrap();
        assert_eq!(before.index, 1);
        assert!(before.near_separator);
        assert_eq!(before.resize_target(), Some(1));

        let after = tester.locate(201.0).unwrap();
        assert_eq!(after.index, 2);
        assert_eq!(after.resize_target(), Some(1));

        assert!(!tester.locate(196.5).unwrap().near_separator);
    }

    #[test]
    fn test_first_leading_edge_is_not_a_separator() {
        let cols = four_columns();
        let viewport = Viewport::new();
        let hit = HitTester::new(&cols, &viewport).locate(1.0).unwrap();
        assert_eq!(hit.index, 0);
        assert!(!hit.near_separator);
    }

    #[test]
    fn test_outside_content() {
        let cols = four_columns();
        let viewport = Viewport::new();
        let tester = HitTester::new(&cols, &viewport);
        assert_eq!(tester.locate(-20.0), Some(HeaderHit::body(0)));
        assert_eq!(tester.locate(400.0), None);
        assert_eq!(tester.locate(f32::NAN), None);
    }

    #[test]
    fn test_tolerance_scales_with_zoom() {
        let cols = four_columns();
        let mut viewport = Viewport::new();
        viewport.set_scale(2.0);
        let tester = HitTester::new(&cols, &viewport);
        // Screen 394 is logical 197: 3 logical units away but 6 screen pixels
        assert!(!tester.locate(394.0).unwrap().near_separator);
        assert!(tester.locate(398.0).unwrap().near_separator);
    }

    #[test]
    fn test_hidden_headers_are_skipped() {
        let mut cols = four_columns();
        cols.set_visible(1, false).unwrap();
        let viewport = Viewport::new();
        let tester = HitTester::new(&cols, &viewport);
        assert_eq!(tester.locate(150.0).unwrap().index, 2);
        // The boundary at 100 now belongs to column 0
        assert_eq!(tester.locate(101.0).unwrap().resize_target(), Some(0));
    }

    #[test]
    fn test_leading_edge_under_fractional_scroll_and_zoom() {
        let mut cols = HeaderTrack::new(Axis::Column, 200, 64.0);
        for i in 0..200 {
            cols.set_size(i, 30.0 + (i % 5) as f32 * 17.0).unwrap();
        }
        let mut viewport = Viewport::new();
        viewport.set_scale(1.75);
        viewport.scroll_x = 1010.5;
        let tester = HitTester::new(&cols, &viewport);

        for i in 0..200 {
            let screen = viewport.to_screen_axis(Axis::Column, cols.position(i));
            let hit = tester.locate(screen).unwrap();
            assert_eq!(hit.index, i, "leading edge of column {i}");
            if i > 0 {
                assert_eq!(hit.resize_target(), Some(i - 1));
            }
        }
    }

    #[test]
    fn test_empty_track() {
        let cols = HeaderTrack::new(Axis::Column, 0, 100.0);
        let viewport = Viewport::new();
        assert_eq!(HitTester::new(&cols, &viewport).locate(-5.0), None);
        assert_eq!(HitTester::new(&cols, &viewport).locate(5.0), None);
    }
}
