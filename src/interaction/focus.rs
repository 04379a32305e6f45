//! Exclusive input focus for interaction sessions.

use crate::error::{GridError, Result};
use crate::layout::Axis;

/// Component holding input focus
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FocusOwner {
    /// A separator drag on the given axis
    Resize(Axis),
    /// A full-axis range selection on the given axis
    Select(Axis),
}

impl FocusOwner {
    /// Human-readable name, used in `FocusBusy` errors.
    pub fn name(self) -> &'static str {
        match self {
            FocusOwner::Resize(Axis::Column) => "column resize",
            FocusOwner::Resize(Axis::Row) => "row resize",
            FocusOwner::Select(Axis::Column) => "column selection",
            FocusOwner::Select(Axis::Row) => "row selection",
        }
    }
}

/// Input focus slot. At most one owner at a time.
#[derive(Debug, Default)]
pub struct Focus {
    owner: Option<FocusOwner>,
}

impl Focus {
    /// Empty slot; nobody holds focus.
    pub fn new() -> Self {
        Self::default()
    }

    /// Current owner, if any.
    pub fn owner(&self) -> Option<FocusOwner> {
        self.owner
    }

    /// True when no session holds focus.
    pub fn is_free(&self) -> bool {
        self.owner.is_none()
    }

    /// Acquire focus for `owner`.
    ///
    /// # Errors
    /// `FocusBusy` if another owner holds focus. Re-acquiring by the current
    /// owner is allowed.
    pub fn set_focus(&mut self, owner: FocusOwner) -> Result<()> {
        match self.owner {
            Some(current) if current != owner => Err(GridError::FocusBusy(current.name())),
            _ => {
                self.owner = Some(owner);
                Ok(())
            }
        }
    }

    /// Release focus if `owner` holds it. Returns true if it was released.
    pub fn free_focus(&mut self, owner: FocusOwner) -> bool {
        if self.owner == Some(owner) {
            self.owner = None;
            true
        } else {
            false
        }
    }
}
