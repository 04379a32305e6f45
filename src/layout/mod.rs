//! Layout engine for header positions and viewport management.
//!
//! This module handles:
//! - Cumulative row/column positions with lazy recomputation
//! - Viewport state (scroll position, zoom, visible range)
//! - Binary search for header lookup at screen coordinates
//! - Separator hit-testing for drag-resize

mod header_track;
mod hit_test;
mod viewport;

use std::fmt;

use serde::{Deserialize, Serialize};

pub use header_track::{column_label, HeaderDescriptor, HeaderTrack};
pub use hit_test::{HeaderHit, HitTester, DEFAULT_SEPARATOR_TOLERANCE};
pub use viewport::{VisibleRegion, Viewport, DEFAULT_MAX_SCALE, DEFAULT_MIN_SCALE};

/// Which header track a value refers to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum Axis {
    /// Row headers, laid out vertically.
    Row,
    /// Column headers, laid out horizontally.
    Column,
}

impl fmt::Display for Axis {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Axis::Row => f.write_str("row"),
            Axis::Column => f.write_str("column"),
        }
    }
}

/// Default column width in pixels (Excel default ~64px at 100% zoom)
pub const DEFAULT_COL_WIDTH: f32 = 64.0;

/// Default row height in pixels (Excel default ~20px at 100% zoom)
pub const DEFAULT_ROW_HEIGHT: f32 = 20.0;
