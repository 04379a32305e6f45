//! `GridView` - one interactive grid surface.
//!
//! This module ties the pieces together:
//! - Owns the row/column tracks, the viewport and the committed selection
//! - Owns the input focus and one resize and one selection controller per axis
//! - Routes pointer events through a single root hit test
//! - Applies committed commands to the tracks and hands them to the host's log
//!
//! Several views can coexist; none of their state is global.

mod events;
mod scroll;

use std::ops::Range;

use crate::config::GridConfig;
use crate::error::Result;
use crate::interaction::{
    CommandLog, Focus, FocusOwner, HeaderCommand, RangeSelectController, ResizeController,
};
use crate::layout::{Axis, HeaderHit, HeaderTrack, Viewport};
use crate::types::Selection;

/// Target of a hit test (what is under the pointer)
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HitTarget {
    /// A regular cell at (row, col)
    Cell(u32, u32),
    /// The row header band
    RowHeader(HeaderHit),
    /// The column header band
    ColumnHeader(HeaderHit),
    /// The corner header (select all)
    CornerHeader,
    /// Nothing (outside any interactive region)
    None,
}

/// An interactive grid: tracks, viewport, selection and interaction state.
#[derive(Debug)]
pub struct GridView {
    config: GridConfig,
    rows: HeaderTrack,
    cols: HeaderTrack,
    viewport: Viewport,
    selection: Option<Selection>,
    focus: Focus,
    col_resize: ResizeController,
    row_resize: ResizeController,
    col_select: RangeSelectController,
    row_select: RangeSelectController,
    needs_render: bool,
}

impl GridView {
    /// Create a view over `rows` x `cols` default-size headers.
    pub fn new(rows: u32, cols: u32, config: GridConfig) -> Self {
        let rows = HeaderTrack::new(Axis::Row, rows, config.default_size(Axis::Row));
        let cols = HeaderTrack::new(Axis::Column, cols, config.default_size(Axis::Column));
        Self::with_tracks(rows, cols, config)
    }

    /// Create a view over existing tracks.
    pub fn with_tracks(rows: HeaderTrack, cols: HeaderTrack, config: GridConfig) -> Self {
        let viewport = Viewport::with_scale_limits(config.min_scale, config.max_scale);
        let mut view = Self {
            col_resize: ResizeController::new(Axis::Column, config.resize_enabled(Axis::Column)),
            row_resize: ResizeController::new(Axis::Row, config.resize_enabled(Axis::Row)),
            col_select: RangeSelectController::new(Axis::Column, config.select_enabled(Axis::Column)),
            row_select: RangeSelectController::new(Axis::Row, config.select_enabled(Axis::Row)),
            config,
            rows,
            cols,
            viewport,
            selection: None,
            focus: Focus::new(),
            needs_render: true,
        };
        let (width, height) = (view.viewport.width, view.viewport.height);
        view.resize(width, height);
        view
    }

    pub fn config(&self) -> &GridConfig {
        &self.config
    }

    pub fn rows(&self) -> &HeaderTrack {
        &self.rows
    }

    pub fn cols(&self) -> &HeaderTrack {
        &self.cols
    }

    /// Track for `axis`.
    pub fn track(&self, axis: Axis) -> &HeaderTrack {
        match axis {
            Axis::Row => &self.rows,
            Axis::Column => &self.cols,
        }
    }

    fn track_mut(&mut self, axis: Axis) -> &mut HeaderTrack {
        match axis {
            Axis::Row => &mut self.rows,
            Axis::Column => &mut self.cols,
        }
    }

    pub fn viewport(&self) -> &Viewport {
        &self.viewport
    }

    /// Committed selection.
    pub fn selection(&self) -> Option<&Selection> {
        self.selection.as_ref()
    }

    /// Selection to show: the one being dragged out, else the committed one.
    pub fn displayed_selection(&self) -> Option<Selection> {
        self.col_select
            .provisional()
            .or_else(|| self.row_select.provisional())
            .or_else(|| self.selection.clone())
    }

    pub fn set_selection(&mut self, selection: Option<Selection>) {
        self.selection = selection;
        self.needs_render = true;
    }

    /// Component holding input focus, if a session is active.
    pub fn focus_owner(&self) -> Option<FocusOwner> {
        self.focus.owner()
    }

    /// Enable or disable drag-resize along `axis`.
    pub fn set_resize_enabled(&mut self, axis: Axis, enabled: bool) {
        match axis {
            Axis::Row => self.row_resize.set_enabled(enabled),
            Axis::Column => self.col_resize.set_enabled(enabled),
        }
    }

    /// Enable or disable full row/column selection from the header band of `axis`.
    pub fn set_select_enabled(&mut self, axis: Axis, enabled: bool) {
        match axis {
            Axis::Row => self.row_select.set_enabled(enabled),
            Axis::Column => self.col_select.set_enabled(enabled),
        }
    }

    pub fn needs_render(&self) -> bool {
        self.needs_render
    }

    /// Resize the header range `range` to `size` as one command.
    ///
    /// # Errors
    /// `InvalidSize` or `IndexOutOfRange`; nothing is changed or logged.
    pub fn resize_headers(
        &mut self,
        axis: Axis,
        range: Range<u32>,
        size: f32,
        log: &mut dyn CommandLog,
    ) -> Result<()> {
        let command = HeaderCommand::set_sizes(self.track(axis), range, size)?;
        self.commit(command, log)
    }

    /// Show or hide one header.
    pub fn set_header_visible(
        &mut self,
        axis: Axis,
        index: u32,
        visible: bool,
        log: &mut dyn CommandLog,
    ) -> Result<()> {
        let command = HeaderCommand::set_visible(self.track(axis), index, visible)?;
        self.commit(command, log)
    }

    /// Insert `count` default-size headers before `at`.
    pub fn insert_headers(
        &mut self,
        axis: Axis,
        at: u32,
        count: u32,
        log: &mut dyn CommandLog,
    ) -> Result<()> {
        self.commit(HeaderCommand::insert(axis, at, count), log)
    }

    /// Remove the headers in `range`.
    pub fn remove_headers(
        &mut self,
        axis: Axis,
        range: Range<u32>,
        log: &mut dyn CommandLog,
    ) -> Result<()> {
        let command = HeaderCommand::remove(self.track(axis), range)?;
        self.commit(command, log)
    }

    /// Replace the label of one header. Labels are not part of the undo history.
    pub fn set_header_text(&mut self, axis: Axis, index: u32, text: Option<String>) -> Result<()> {
        self.track_mut(axis).set_custom_text(index, text)?;
        self.needs_render = true;
        Ok(())
    }

    /// Re-apply a command from the host's log (redo).
    pub fn apply_command(&mut self, command: &HeaderCommand) -> Result<()> {
        command.apply(self.track_mut(command.axis()))?;
        self.after_track_change();
        Ok(())
    }

    /// Undo a command from the host's log.
    pub fn revert_command(&mut self, command: &HeaderCommand) -> Result<()> {
        command.revert(self.track_mut(command.axis()))?;
        self.after_track_change();
        Ok(())
    }

    fn commit(&mut self, command: HeaderCommand, log: &mut dyn CommandLog) -> Result<()> {
        self.apply_command(&command)?;
        log::debug!("committed: {command}");
        log.record(command);
        Ok(())
    }

    fn after_track_change(&mut self) {
        self.viewport.clamp_scroll(&self.cols, &self.rows);
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
    use crate::error::GridError;

    #[test]
    fn test_programmatic_commands_are_logged() {
        let mut view = GridView::new(10, 5, GridConfig::default());
        let mut log: Vec<HeaderCommand> = Vec::new();

        view.resize_headers(Axis::Column, 1..3, 100.0, &mut log).unwrap();
        view.set_header_visible(Axis::Row, 0, false, &mut log).unwrap();
        view.insert_headers(Axis::Row, 10, 2, &mut log).unwrap();
        assert_eq!(log.len(), 3);
        assert_eq!(view.cols().size(2), 100.0);
        assert_eq!(view.rows().len(), 12);

        for command in log.iter().rev() {
            view.revert_command(command).unwrap();
        }
        assert_eq!(view.cols().total_extent(), 5.0 * 64.0);
        assert_eq!(view.rows().total_extent(), 10.0 * 20.0);
    }

    #[test]
    fn test_rejected_command_is_not_logged() {
        let mut view = GridView::new(10, 5, GridConfig::default());
        let mut log: Vec<HeaderCommand> = Vec::new();
        let err = view
            .resize_headers(Axis::Column, 0..1, f32::NAN, &mut log)
            .unwrap_err();
        assert!(matches!(err, GridError::InvalidSize { .. }));
        assert!(log.is_empty());
        assert!(view.remove_headers(Axis::Row, 5..20, &mut log).is_err());
        assert!(log.is_empty());
    }
}
