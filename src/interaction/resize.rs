//! Separator drag: Idle -> Resizing -> Idle.
//!
//! While dragging, the new size only lives in the session. The track is
//! mutated once, through the command produced on release, so a cancelled drag
//! leaves the model untouched.

use super::{Focus, FocusOwner, HeaderCommand};
use crate::error::Result;
use crate::layout::{Axis, HeaderHit, HeaderTrack};
use crate::types::Selection;

/// State of an active separator drag
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ResizeSession {
    /// Header whose trailing edge is being dragged
    pub target_index: u32,
    /// Logical leading edge of the target header
    pub header_start: f32,
    /// Size when the drag started
    pub original_size: f32,
    /// Size under the pointer, not yet committed
    pub provisional_size: f32,
}

/// Drag-to-resize state machine for one axis.
#[derive(Debug)]
pub struct ResizeController {
    axis: Axis,
    enabled: bool,
    session: Option<ResizeSession>,
}

impl ResizeController {
    /// Idle controller for `axis`. A disabled controller declines every press.
    pub fn new(axis: Axis, enabled: bool) -> Self {
        Self {
            axis,
            enabled,
            session: None,
        }
    }

    /// Axis whose separators this controller drags.
    pub fn axis(&self) -> Axis {
        self.axis
    }

    pub fn is_enabled(&self) -> bool {
        self.enabled
    }

    /// Enable or disable new drags. An active drag is left alone.
    pub fn set_enabled(&mut self, enabled: bool) {
        self.enabled = enabled;
    }

    /// Active drag, if any.
    pub fn session(&self) -> Option<&ResizeSession> {
        self.session.as_ref()
    }

    /// True while a drag is in progress.
    pub fn is_active(&self) -> bool {
        self.session.is_some()
    }

    fn owner(&self) -> FocusOwner {
        FocusOwner::Resize(self.axis)
    }

    /// Pointer pressed. Starts a drag if the hit is on a separator.
    ///
    /// Returns `Ok(false)` when the press is not for this controller.
    ///
    /// # Errors
    /// `FocusBusy` if another session holds input focus.
    pub fn pointer_down(
        &mut self,
        hit: Option<HeaderHit>,
        track: &HeaderTrack,
        focus: &mut Focus,
    ) -> Result<bool> {
        if !self.enabled || self.session.is_some() {
            return Ok(false);
        }
        let Some(target_index) = hit.and_then(|h| h.resize_target()) else {
            return Ok(false);
        };
        focus.set_focus(self.owner())?;

        let original_size = track.size(target_index);
        self.session = Some(ResizeSession {
            target_index,
            header_start: track.position(target_index),
            original_size,
            provisional_size: original_size,
        });
        log::debug!("{} {target_index}: resize started at {original_size}", self.axis);
        Ok(true)
    }

    /// Pointer moved to logical coordinate `logical` along the axis.
    ///
    /// Returns true if the provisional size changed and a redraw is needed.
    pub fn pointer_move(&mut self, logical: f32) -> bool {
        let Some(session) = self.session.as_mut() else {
            return false;
        };
        if !logical.is_finite() {
            return false;
        }
        let size = (logical - session.header_start).max(0.0);
        let changed = (size - session.provisional_size).abs() > f32::EPSILON;
        session.provisional_size = size;
        changed
    }

    /// Pointer released. Ends the drag and frees focus.
    ///
    /// Returns the command to commit when the size changed. If the target is
    /// one of several fully selected rows/columns, the command resizes the
    /// whole selection.
    pub fn pointer_up(
        &mut self,
        track: &HeaderTrack,
        selection: Option<&Selection>,
        focus: &mut Focus,
    ) -> Option<HeaderCommand> {
        let session = self.session.take()?;
        focus.free_focus(self.owner());

        if (session.provisional_size - session.original_size).abs() <= f32::EPSILON {
            log::trace!("{} {}: resize released unchanged", self.axis, session.target_index);
            return None;
        }

        let target = session.target_index;
        let range = selection
            .and_then(|s| s.full_axis_indices(self.axis))
            .filter(|r| r.contains(&target) && r.start() != r.end())
            .map_or(target..target.saturating_add(1), |r| {
                *r.start()..r.end().saturating_add(1).min(track.len())
            });

        match HeaderCommand::set_sizes(track, range, session.provisional_size) {
            Ok(command) => {
                log::debug!("commit: {command}");
                Some(command)
            }
            Err(err) => {
                log::warn!("resize of {} {target} dropped: {err}", self.axis);
                None
            }
        }
    }

    /// Discard the drag without committing (e.g. focus lost).
    pub fn cancel(&mut self, focus: &mut Focus) {
        if let Some(session) = self.session.take() {
            log::debug!("{} {}: resize cancelled", self.axis, session.target_index);
        }
        focus.free_focus(self.owner());
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
    use crate::layout::{HitTester, Viewport};

    fn hit(track: &HeaderTrack, screen: f32) -> Option<HeaderHit> {
        HitTester::new(track, &Viewport::new()).locate(screen)
    }

    #[test]
    fn test_drag_commits_single_header() {
        let mut cols = HeaderTrack::new(Axis::Column, 4, 100.0);
        let mut focus = Focus::new();
        let mut resize = ResizeController::new(Axis::Column, true);

        assert!(resize.pointer_down(hit(&cols, 199.0), &cols, &mut focus).unwrap());
        assert_eq!(focus.owner(), Some(FocusOwner::Resize(Axis::Column)));
        assert!(resize.pointer_move(250.0));
        assert_eq!(resize.session().unwrap().provisional_size, 150.0);
        assert_eq!(cols.size(1), 100.0, "track untouched while dragging");

        let command = resize.pointer_up(&cols, None, &mut focus).unwrap();
        assert!(focus.is_free());
        command.apply(&mut cols).unwrap();
        assert_eq!(cols.size(1), 150.0);

        command.revert(&mut cols).unwrap();
        assert_eq!(cols.size(1), 100.0);
    }

    #[test]
    fn test_body_press_is_ignored() {
        let cols = HeaderTrack::new(Axis::Column, 4, 100.0);
        let mut focus = Focus::new();
        let mut resize = ResizeController::new(Axis::Column, true);
        assert!(!resize.pointer_down(hit(&cols, 250.0), &cols, &mut focus).unwrap());
        assert!(!resize.pointer_down(None, &cols, &mut focus).unwrap());
        assert!(focus.is_free());
    }

    #[test]
    fn test_disabled_axis() {
        let cols = HeaderTrack::new(Axis::Column, 4, 100.0);
        let mut focus = Focus::new();
        let mut resize = ResizeController::new(Axis::Column, false);
        assert!(!resize.pointer_down(hit(&cols, 199.0), &cols, &mut focus).unwrap());
    }

    #[test]
    fn test_disabling_mid_drag_keeps_the_drag() {
        let cols = HeaderTrack::new(Axis::Column, 4, 100.0);
        let mut focus = Focus::new();
        let mut resize = ResizeController::new(Axis::Column, true);
        assert_eq!(resize.axis(), Axis::Column);

        assert!(resize.pointer_down(hit(&cols, 199.0), &cols, &mut focus).unwrap());
        resize.set_enabled(false);
        assert!(!resize.is_enabled());
        assert!(resize.is_active());
        assert!(resize.pointer_move(230.0));
        assert!(resize.pointer_up(&cols, None, &mut focus).is_some());

        // The next press is declined
        assert!(!resize.pointer_down(hit(&cols, 199.0), &cols, &mut focus).unwrap());
    }

    #[test]
    fn test_size_never_negative() {
        let cols = HeaderTrack::new(Axis::Column, 4, 100.0);
        let mut focus = Focus::new();
        let mut resize = ResizeController::new(Axis::Column, true);
        resize.pointer_down(hit(&cols, 299.0), &cols, &mut focus).unwrap();
        resize.pointer_move(-500.0);
        assert_eq!(resize.session().unwrap().provisional_size, 0.0);
    }

    #[test]
    fn test_unchanged_release_commits_nothing() {
        let cols = HeaderTrack::new(Axis::Column, 4, 100.0);
        let mut focus = Focus::new();
        let mut resize = ResizeController::new(Axis::Column, true);
        resize.pointer_down(hit(&cols, 199.0), &cols, &mut focus).unwrap();
        assert!(resize.pointer_up(&cols, None, &mut focus).is_none());
        assert!(focus.is_free());
    }

    #[test]
    fn test_selection_resized_together() {
        let cols = HeaderTrack::new(Axis::Column, 6, 100.0);
        let mut focus = Focus::new();
        let mut resize = ResizeController::new(Axis::Column, true);
        let selection = Selection::column_range(3, 1);

        resize.pointer_down(hit(&cols, 199.0), &cols, &mut focus).unwrap();
        resize.pointer_move(180.0);
        let command = resize.pointer_up(&cols, Some(&selection), &mut focus).unwrap();
        assert_eq!(command.range(), 1..4);
    }

    #[test]
    fn test_target_outside_selection_resized_alone() {
        let cols = HeaderTrack::new(Axis::Column, 6, 100.0);
        let mut focus = Focus::new();
        let mut resize = ResizeController::new(Axis::Column, true);
        let selection = Selection::column_range(3, 4);

        resize.pointer_down(hit(&cols, 199.0), &cols, &mut focus).unwrap();
        resize.pointer_move(180.0);
        let command = resize.pointer_up(&cols, Some(&selection), &mut focus).unwrap();
        assert_eq!(command.range(), 1..2);
    }

    #[test]
    fn test_cancel_discards_and_frees_focus() {
        let cols = HeaderTrack::new(Axis::Column, 4, 100.0);
        let mut focus = Focus::new();
        let mut resize = ResizeController::new(Axis::Column, true);
        resize.pointer_down(hit(&cols, 199.0), &cols, &mut focus).unwrap();
        resize.pointer_move(300.0);
        resize.cancel(&mut focus);
        assert!(!resize.is_active());
        assert!(focus.is_free());
        assert!(resize.pointer_up(&cols, None, &mut focus).is_none());
    }

    #[test]
    fn test_busy_focus_blocks_start() {
        let cols = HeaderTrack::new(Axis::Column, 4, 100.0);
        let mut focus = Focus::new();
        focus.set_focus(FocusOwner::Select(Axis::Row)).unwrap();
        let mut resize = ResizeController::new(Axis::Column, true);
        assert!(matches!(
            resize.pointer_down(hit(&cols, 199.0), &cols, &mut focus),
            Err(GridError::FocusBusy(_))
        ));
        assert!(!resize.is_active());
    }
}
