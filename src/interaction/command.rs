//! Reversible header mutations handed to the host's undo log.
//!
//! Each command captures enough of the prior state to be reverted exactly.
//! The engine never keeps an undo stack itself.

use std::fmt;
use std::ops::Range;

use serde::{Deserialize, Serialize};

use crate::error::{GridError, Result};
use crate::layout::{Axis, HeaderDescriptor, HeaderTrack};

/// A named, reversible change to one header track.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "camelCase")]
pub enum HeaderCommand {
    /// Set every header in `start..start + previous.len()` to `size`
    #[serde(rename_all = "camelCase")]
    SetSizes {
        axis: Axis,
        start: u32,
        size: f32,
        previous: Vec<f32>,
    },
    /// Show or hide one header
    #[serde(rename_all = "camelCase")]
    SetVisible {
        axis: Axis,
        index: u32,
        visible: bool,
        previous: bool,
    },
    /// Insert `count` default-size headers before `at`
    #[serde(rename_all = "camelCase")]
    Insert { axis: Axis, at: u32, count: u32 },
    /// Remove the captured headers starting at `at`
    #[serde(rename_all = "camelCase")]
    Remove {
        axis: Axis,
        at: u32,
        removed: Vec<HeaderDescriptor>,
    },
}

impl HeaderCommand {
    /// Build a resize of `range` to `size`, capturing the current sizes.
    ///
    /// The track is not modified; call [`apply`](Self::apply) to do so.
    pub fn set_sizes(track: &HeaderTrack, range: Range<u32>, size: f32) -> Result<Self> {
        track.check_range(&range)?;
        track.check_size(range.start, size)?;
        Ok(Self::SetSizes {
            axis: track.axis(),
            start: range.start,
            size,
            previous: range.map(|i| track.size(i)).collect(),
        })
    }

    /// Build a visibility change, capturing the current visibility.
    pub fn set_visible(track: &HeaderTrack, index: u32, visible: bool) -> Result<Self> {
        let previous = track
            .descriptor(index)
            .map(|header| header.visible)
            .ok_or(GridError::IndexOutOfRange {
                axis: track.axis(),
                index,
                len: track.len(),
            })?;
        Ok(Self::SetVisible {
            axis: track.axis(),
            index,
            visible,
            previous,
        })
    }

    /// Build an insertion.
    pub fn insert(axis: Axis, at: u32, count: u32) -> Self {
        Self::Insert { axis, at, count }
    }

    /// Build a removal, capturing the headers that will be removed.
    pub fn remove(track: &HeaderTrack, range: Range<u32>) -> Result<Self> {
        track.check_range(&range)?;
        let removed = range
            .clone()
            .filter_map(|i| track.descriptor(i).cloned())
            .collect();
        Ok(Self::Remove {
            axis: track.axis(),
            at: range.start,
            removed,
        })
    }

    /// Track this command targets.
    pub fn axis(&self) -> Axis {
        match self {
            Self::SetSizes { axis, .. }
            | Self::SetVisible { axis, .. }
            | Self::Insert { axis, .. }
            | Self::Remove { axis, .. } => *axis,
        }
    }

    /// Headers affected, in indices before the command is applied.
    pub fn range(&self) -> Range<u32> {
        match self {
            Self::SetSizes {
                start, previous, ..
            } => *start..start.saturating_add(len_u32(previous.len())),
            Self::SetVisible { index, .. } => *index..index.saturating_add(1),
            Self::Insert { at, .. } => *at..*at,
            Self::Remove { at, removed, .. } => *at..at.saturating_add(len_u32(removed.len())),
        }
    }

    /// Perform the command on `track`.
    pub fn apply(&self, track: &mut HeaderTrack) -> Result<()> {
        match self {
            Self::SetSizes { size, .. } => track.set_sizes(self.range(), *size).map(drop),
            Self::SetVisible { index, visible, .. } => track.set_visible(*index, *visible).map(drop),
            Self::Insert { at, count, .. } => track.insert(*at, *count),
            Self::Remove { .. } => track.remove(self.range()).map(drop),
        }
    }

    /// Undo the command on `track`, restoring the captured state exactly.
    pub fn revert(&self, track: &mut HeaderTrack) -> Result<()> {
        match self {
            Self::SetSizes {
                start, previous, ..
            } => track.restore_sizes(*start, previous),
            Self::SetVisible {
                index, previous, ..
            } => track.set_visible(*index, *previous).map(drop),
            Self::Insert { at, count, .. } => {
                track.remove(*at..at.saturating_add(*count)).map(drop)
            }
            Self::Remove { at, removed, .. } => track.restore(*at, removed.clone()),
        }
    }
}

impl fmt::Display for HeaderCommand {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let range = self.range();
        match self {
            Self::SetSizes { axis, size, .. } => write!(
                f,
                "set sizes of {axis}s [{}, {}) to {size}",
                range.start, range.end
            ),
            Self::SetVisible {
                axis,
                index,
                visible: true,
                ..
            } => write!(f, "show {axis} {index}"),
            Self::SetVisible { axis, index, .. } => write!(f, "hide {axis} {index}"),
            Self::Insert { axis, at, count } => write!(f, "insert {count} {axis}s at {at}"),
            Self::Remove { axis, .. } => write!(
                f,
                "remove {axis}s [{}, {})",
                range.start, range.end
            ),
        }
    }
}

/// Receiver for committed commands (the host's undo/redo log).
pub trait CommandLog {
    /// Record a command that has already been applied.
    fn record(&mut self, command: HeaderCommand);
}

impl CommandLog for Vec<HeaderCommand> {
    fn record(&mut self, command: HeaderCommand) {
        self.push(command);
    }
}

fn len_u32(len: usize) -> u32 {
    u32::try_from(len).unwrap_or(u32::MAX)
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
    fn test_set_sizes_round_trip() {
        let mut track = HeaderTrack::new(Axis::Column, 5, 64.0);
        track.set_size(2, 90.0).unwrap();
        let command = HeaderCommand::set_sizes(&track, 1..4, 120.0).unwrap();
        command.apply(&mut track).unwrap();
        assert_eq!(track.size(2), 120.0);
        command.revert(&mut track).unwrap();
        assert_eq!(track.size(1), 64.0);
        assert_eq!(track.size(2), 90.0);
        assert_eq!(command.to_string(), "set sizes of columns [1, 4) to 120");
    }

    #[test]
    fn test_set_sizes_rejects_invalid() {
        let track = HeaderTrack::new(Axis::Row, 3, 20.0);
        assert!(matches!(
            HeaderCommand::set_sizes(&track, 0..2, -3.0),
            Err(GridError::InvalidSize { .. })
        ));
        assert!(matches!(
            HeaderCommand::set_sizes(&track, 0..7, 30.0),
            Err(GridError::IndexOutOfRange { .. })
        ));
    }

    #[test]
    fn test_remove_and_insert_round_trip() {
        let mut track = HeaderTrack::new(Axis::Row, 6, 20.0);
        track.set_size(3, 55.0).unwrap();
        let before = track.extents();

        let remove = HeaderCommand::remove(&track, 2..5).unwrap();
        assert_eq!(track.len(), 6, "building a command must not mutate");
        remove.apply(&mut track).unwrap();
        assert_eq!(track.len(), 3);
        remove.revert(&mut track).unwrap();
        assert_eq!(track.extents(), before);

        let insert = HeaderCommand::insert(Axis::Row, 1, 2);
        insert.apply(&mut track).unwrap();
        assert_eq!(track.len(), 8);
        insert.revert(&mut track).unwrap();
        assert_eq!(track.extents(), before);
    }

    #[test]
    fn test_visibility_round_trip() {
        let mut track = HeaderTrack::new(Axis::Column, 3, 10.0);
        let hide = HeaderCommand::set_visible(&track, 1, false).unwrap();
        assert_eq!(hide.to_string(), "hide column 1");
        hide.apply(&mut track).unwrap();
        assert_eq!(track.total_extent(), 20.0);
        hide.revert(&mut track).unwrap();
        assert_eq!(track.total_extent(), 30.0);
    }

    #[test]
    fn test_serialized_shape() {
        let command = HeaderCommand::insert(Axis::Column, 2, 1);
        let json = serde_json::to_string(&command).unwrap();
        assert_eq!(json, r#"{"type":"insert","axis":"column","at":2,"count":1}"#);
    }
}
