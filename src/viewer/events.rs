//! Pointer event handling for `GridView`.
//!
//! Every event goes through [`GridView::hit_test`] first. Header hits are then
//! offered to the resize controller of that axis, and only if it declines, to
//! the selection controller.

use super::{GridView, HitTarget};
use crate::error::Result;
use crate::interaction::{CommandLog, CursorHint, PointerButton, PointerEvent, PointerKind};
use crate::layout::{Axis, HeaderHit, HitTester};
use crate::types::Selection;

impl GridView {
    /// Resolve a point in surface coordinates to the region under it.
    pub fn hit_test(&self, x: f32, y: f32) -> HitTarget {
        let header_width = self.config.headers.band_width();
        let header_height = self.config.headers.band_height();

        // Check for corner header (select all)
        if x < header_width && y < header_height {
            return HitTarget::CornerHeader;
        }

        // Check for column header
        if y < header_height {
            return match self.locate_header(Axis::Column, x - header_width) {
                Some(hit) => HitTarget::ColumnHeader(hit),
                None => HitTarget::None,
            };
        }

        // Check for row header
        if x < header_width {
            return match self.locate_header(Axis::Row, y - header_height) {
                Some(hit) => HitTarget::RowHeader(hit),
                None => HitTarget::None,
            };
        }

        let (sheet_x, sheet_y) = self.viewport.to_logical(x - header_width, y - header_height);
        match (
            self.rows.find_index_at_position(sheet_y),
            self.cols.find_index_at_position(sheet_x),
        ) {
            (Some(row), Some(col)) => HitTarget::Cell(row, col),
            _ => HitTarget::None,
        }
    }

    /// Locate a coordinate local to the content area along `axis`.
    fn locate_header(&self, axis: Axis, local: f32) -> Option<HeaderHit> {
        HitTester::new(self.track(axis), &self.viewport)
            .with_tolerance(self.config.separator_tolerance)
            .locate(local)
    }

    /// Coordinate of `event` along `axis`, local to the content area.
    fn local_coordinate(&self, axis: Axis, event: &PointerEvent) -> f32 {
        match axis {
            Axis::Column => event.x - self.config.headers.band_width(),
            Axis::Row => event.y - self.config.headers.band_height(),
        }
    }

    /// Handle a pointer press.
    ///
    /// Returns true if the event was consumed. Non-primary buttons and presses
    /// outside the grid pass through.
    ///
    /// # Errors
    /// `FocusBusy` if a session is already active.
    pub fn pointer_down(&mut self, event: &PointerEvent) -> Result<bool> {
        if event.button != PointerButton::Primary {
            return Ok(false);
        }
        match self.hit_test(event.x, event.y) {
            HitTarget::None => Ok(false),
            HitTarget::CornerHeader => {
                self.selection = Some(Selection::all());
                self.needs_render = true;
                Ok(true)
            }
            HitTarget::ColumnHeader(hit) => self.header_down(Axis::Column, hit),
            HitTarget::RowHeader(hit) => self.header_down(Axis::Row, hit),
            HitTarget::Cell(row, col) => {
                self.selection = Some(Selection::cell_range(row, col, row, col));
                self.needs_render = true;
                Ok(true)
            }
        }
    }

    fn header_down(&mut self, axis: Axis, hit: HeaderHit) -> Result<bool> {
        let (resize, select, track) = match axis {
            Axis::Column => (&mut self.col_resize, &mut self.col_select, &self.cols),
            Axis::Row => (&mut self.row_resize, &mut self.row_select, &self.rows),
        };
        if resize.pointer_down(Some(hit), track, &mut self.focus)? {
            self.needs_render = true;
            return Ok(true);
        }
        let started = select
            .pointer_down(Some(hit), self.selection.as_ref(), &mut self.focus)?
            .is_some();
        if started {
            self.needs_render = true;
        }
        Ok(started)
    }

    /// Handle pointer movement and report the cursor to show.
    pub fn pointer_move(&mut self, event: &PointerEvent) -> CursorHint {
        for axis in [Axis::Column, Axis::Row] {
            let local = self.local_coordinate(axis, event);
            let resize = match axis {
                Axis::Column => &mut self.col_resize,
                Axis::Row => &mut self.row_resize,
            };
            if resize.is_active() {
                if resize.pointer_move(self.viewport.to_logical_axis(axis, local)) {
                    self.needs_render = true;
                }
                return CursorHint::resize(axis);
            }

            let index = self.locate_header(axis, local).map(|hit| hit.index);
            let select = match axis {
                Axis::Column => &mut self.col_select,
                Axis::Row => &mut self.row_select,
            };
            if select.is_active() {
                if select.pointer_move(index).is_some() {
                    self.needs_render = true;
                }
                return CursorHint::SelectHeader;
            }
        }
        self.hover_cursor(event)
    }

    fn hover_cursor(&self, event: &PointerEvent) -> CursorHint {
        let (axis, hit, select_enabled) = match self.hit_test(event.x, event.y) {
            HitTarget::ColumnHeader(hit) => (Axis::Column, hit, self.col_select.is_enabled()),
            HitTarget::RowHeader(hit) => (Axis::Row, hit, self.row_select.is_enabled()),
            _ => return CursorHint::Default,
        };
        let resize_enabled = match axis {
            Axis::Column => self.col_resize.is_enabled(),
            Axis::Row => self.row_resize.is_enabled(),
        };
        if resize_enabled && hit.resize_target().is_some() {
            CursorHint::resize(axis)
        } else if select_enabled && !hit.near_separator {
            CursorHint::SelectHeader
        } else {
            CursorHint::Default
        }
    }

    /// Handle a pointer release, committing whatever session was active.
    ///
    /// A finished resize is applied to the track and recorded in `log`.
    /// Returns true if a session ended.
    pub fn pointer_up(&mut self, event: &PointerEvent, log: &mut dyn CommandLog) -> Result<bool> {
        // Take the final position into account even if no move preceded the release
        self.pointer_move(event);

        for axis in [Axis::Column, Axis::Row] {
            let (resize, select, track) = match axis {
                Axis::Column => (&mut self.col_resize, &mut self.col_select, &self.cols),
                Axis::Row => (&mut self.row_resize, &mut self.row_select, &self.rows),
            };
            if resize.is_active() {
                let command = resize.pointer_up(track, self.selection.as_ref(), &mut self.focus);
                self.needs_render = true;
                if let Some(command) = command {
                    self.commit(command, log)?;
                }
                return Ok(true);
            }
            if select.is_active() {
                if let Some(selection) = select.pointer_up(&mut self.focus) {
                    self.selection = Some(selection);
                }
                self.needs_render = true;
                return Ok(true);
            }
        }
        Ok(false)
    }

    /// Route `event` by its kind and report the cursor to show afterwards.
    ///
    /// For hosts that forward one normalized event stream instead of calling
    /// the down/move/up handlers separately.
    ///
    /// # Errors
    /// As [`GridView::pointer_down`] and [`GridView::pointer_up`].
    pub fn handle_pointer(
        &mut self,
        event: &PointerEvent,
        log: &mut dyn CommandLog,
    ) -> Result<CursorHint> {
        match event.kind {
            PointerKind::Down => {
                self.pointer_down(event)?;
                Ok(self.hover_cursor(event))
            }
            PointerKind::Move => Ok(self.pointer_move(event)),
            PointerKind::Up => {
                self.pointer_up(event, log)?;
                Ok(self.hover_cursor(event))
            }
        }
    }

    /// Abandon any active session without committing (e.g. the surface lost focus).
    pub fn cancel_interaction(&mut self) {
        self.col_resize.cancel(&mut self.focus);
        self.row_resize.cancel(&mut self.focus);
        self.col_select.cancel(&mut self.focus);
        self.row_select.cancel(&mut self.focus);
        self.needs_render = true;
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
    use crate::interaction::HeaderCommand;

    fn view() -> GridView {
        // Header bands 40 x 20, columns 100 wide, rows 20 high
        let config = GridConfig {
            default_col_width: 100.0,
            ..GridConfig::default()
        };
        GridView::new(100, 10, config)
    }

    #[test]
    fn test_hit_test_regions() {
        let view = view();
        assert_eq!(view.hit_test(10.0, 10.0), HitTarget::CornerHeader);
        assert!(matches!(
            view.hit_test(40.0 + 250.0, 10.0),
            HitTarget::ColumnHeader(HeaderHit { index: 2, near_separator: false, .. })
        ));
        assert!(matches!(
            view.hit_test(10.0, 20.0 + 45.0),
            HitTarget::RowHeader(HeaderHit { index: 2, .. })
        ));
        assert_eq!(view.hit_test(40.0 + 150.0, 20.0 + 30.0), HitTarget::Cell(1, 1));
        assert_eq!(view.hit_test(40.0 + 1500.0, 10.0), HitTarget::None);
    }

    #[test]
    fn test_secondary_button_passes_through() {
        let mut view = view();
        let event = PointerEvent::down(60.0, 40.0).with_button(PointerButton::Secondary);
        assert!(!view.pointer_down(&event).unwrap());
        assert!(view.selection().is_none());
    }

    #[test]
    fn test_hover_cursor() {
        let mut view = view();
        assert_eq!(
            view.pointer_move(&PointerEvent::moved(40.0 + 199.0, 10.0)),
            CursorHint::ResizeColumn
        );
        assert_eq!(
            view.pointer_move(&PointerEvent::moved(40.0 + 250.0, 10.0)),
            CursorHint::SelectHeader
        );
        assert_eq!(
            view.pointer_move(&PointerEvent::moved(200.0, 200.0)),
            CursorHint::Default
        );
    }

    #[test]
    fn test_release_without_move_commits_final_position() {
        let mut view = view();
        let mut log: Vec<HeaderCommand> = Vec::new();
        assert!(view.pointer_down(&PointerEvent::down(40.0 + 200.0, 10.0)).unwrap());
        assert!(view.pointer_up(&PointerEvent::up(40.0 + 260.0, 10.0), &mut log).unwrap());
        assert_eq!(view.cols().size(1), 160.0);
        assert_eq!(log.len(), 1);
    }
}
