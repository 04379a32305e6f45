//! Whole-row/column selection by dragging across headers:
//! Idle -> SelectingFullAxis -> Idle.

use super::{Focus, FocusOwner};
use crate::error::Result;
use crate::layout::{Axis, HeaderHit};
use crate::types::Selection;

/// State of an active header range selection
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SelectSession {
    /// Header where the drag started
    pub anchor_index: u32,
    /// Header currently under the pointer
    pub extent_index: u32,
}

/// Full-axis range selection state machine for one axis.
#[derive(Debug)]
pub struct RangeSelectController {
    axis: Axis,
    enabled: bool,
    session: Option<SelectSession>,
}

impl RangeSelectController {
    /// Idle controller for whole-row or whole-column drags along `axis`.
    pub fn new(axis: Axis, enabled: bool) -> Self {
        Self {
            axis,
            enabled,
            session: None,
        }
    }

    pub fn axis(&self) -> Axis {
        self.axis
    }

    pub fn is_enabled(&self) -> bool {
        self.enabled
    }

    /// Enable or disable new selection drags.
    pub fn set_enabled(&mut self, enabled: bool) {
        self.enabled = enabled;
    }

    /// Active selection drag, if any.
    pub fn session(&self) -> Option<&SelectSession> {
        self.session.as_ref()
    }

    pub fn is_active(&self) -> bool {
        self.session.is_some()
    }

    /// Selection covering the session's anchor..=extent, if selecting.
    pub fn provisional(&self) -> Option<Selection> {
        self.session
            .map(|s| Selection::full_axis(self.axis, s.anchor_index, s.extent_index))
    }

    fn owner(&self) -> FocusOwner {
        FocusOwner::Select(self.axis)
    }

    /// Pointer pressed on a header body.
    ///
    /// Returns the provisional selection when a session starts. Presses on
    /// separators, with selection disabled, or on the header that already is
    /// the sole selected row/column pass through as `None`.
    ///
    /// # Errors
    /// `FocusBusy` if another session holds input focus.
    pub fn pointer_down(
        &mut self,
        hit: Option<HeaderHit>,
        current: Option<&Selection>,
        focus: &mut Focus,
    ) -> Result<Option<Selection>> {
        if !self.enabled || self.session.is_some() {
            return Ok(None);
        }
        let Some(hit) = hit.filter(|h| !h.near_separator) else {
            return Ok(None);
        };
        if current.is_some_and(|s| s.is_sole_full_axis(self.axis, hit.index)) {
            return Ok(None);
        }
        focus.set_focus(self.owner())?;
        self.session = Some(SelectSession {
            anchor_index: hit.index,
            extent_index: hit.index,
        });
        log::trace!("{} selection anchored at {}", self.axis, hit.index);
        Ok(self.provisional())
    }

    /// Pointer moved over header `index` (`None` outside the headers keeps the
    /// current extent).
    ///
    /// Returns the updated provisional selection when the extent changed.
    pub fn pointer_move(&mut self, index: Option<u32>) -> Option<Selection> {
        let session = self.session.as_mut()?;
        let index = index?;
        if session.extent_index == index {
            return None;
        }
        session.extent_index = index;
        self.provisional()
    }

    /// Pointer released: returns the final selection and frees focus.
    pub fn pointer_up(&mut self, focus: &mut Focus) -> Option<Selection> {
        let selection = self.provisional();
        self.session = None;
        focus.free_focus(self.owner());
        if let Some(s) = &selection {
            log::debug!("{} selection committed: {:?}", self.axis, s.bounds());
        }
        selection
    }

    /// Drop the session without committing.
    pub fn cancel(&mut self, focus: &mut Focus) {
        self.session = None;
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

    fn body(index: u32) -> Option<HeaderHit> {
        Some(HeaderHit {
            index,
            near_separator: false,
            separator: None,
        })
    }

    #[test]
    fn test_drag_extends_inclusive_range() {
        let mut focus = Focus::new();
        let mut select = RangeSelectController::new(Axis::Row, true);

        let started = select.pointer_down(body(5), None, &mut focus).unwrap().unwrap();
        assert_eq!(started, Selection::row_range(5, 5));
        assert_eq!(select.pointer_move(Some(2)), Some(Selection::row_range(5, 2)));
        assert_eq!(select.pointer_move(Some(2)), None);
        assert_eq!(select.pointer_move(None), None);

        let done = select.pointer_up(&mut focus).unwrap();
        assert_eq!(done.bounds(), (2, 0, 5, u32::MAX));
        assert!(focus.is_free());
        assert!(!select.is_active());
    }

    #[test]
    fn test_disabled_passes_through() {
        let mut focus = Focus::new();
        let mut select = RangeSelectController::new(Axis::Column, false);
        assert_eq!(select.pointer_down(body(1), None, &mut focus).unwrap(), None);
        assert!(focus.is_free());
    }

    #[test]
    fn test_separator_press_ignored() {
        let mut focus = Focus::new();
        let mut select = RangeSelectController::new(Axis::Column, true);
        let hit = Some(HeaderHit {
            index: 1,
            near_separator: true,
            separator: Some(1),
        });
        assert_eq!(select.pointer_down(hit, None, &mut focus).unwrap(), None);
    }

    #[test]
    fn test_already_sole_selection_ignored() {
        let mut focus = Focus::new();
        let mut select = RangeSelectController::new(Axis::Column, true);
        let current = Selection::column_range(3, 3);
        assert_eq!(
            select.pointer_down(body(3), Some(&current), &mut focus).unwrap(),
            None
        );
        assert!(select
            .pointer_down(body(4), Some(&current), &mut focus)
            .unwrap()
            .is_some());
    }
}
