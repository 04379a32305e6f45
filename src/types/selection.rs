use std::ops::RangeInclusive;

use serde::{Deserialize, Serialize};

use crate::layout::Axis;

/// Type of selection for row/column headers
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum SelectionType {
    /// Standard cell selection (default)
    #[default]
    CellRange,
    /// Entire row(s) selected
    RowRange,
    /// Entire column(s) selected
    ColumnRange,
    /// All cells selected (corner click)
    All,
}

/// Selection state supporting cell, row, column, and all selection types
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Selection {
    pub selection_type: SelectionType,
    pub start_row: u32,
    pub start_col: u32,
    pub end_row: u32,
    pub end_col: u32,
}

impl Selection {
    /// Create a new cell range selection
    pub fn cell_range(start_row: u32, start_col: u32, end_row: u32, end_col: u32) -> Self {
        Self {
            selection_type: SelectionType::CellRange,
            start_row,
            start_col,
            end_row,
            end_col,
        }
    }

    /// Create a row range selection
    pub fn row_range(start_row: u32, end_row: u32) -> Self {
        Self {
            selection_type: SelectionType::RowRange,
            start_row,
            start_col: 0,
            end_row,
            end_col: u32::MAX,
        }
    }

    /// Create a column range selection
    pub fn column_range(start_col: u32, end_col: u32) -> Self {
        Self {
            selection_type: SelectionType::ColumnRange,
            start_row: 0,
            start_col,
            end_row: u32::MAX,
            end_col,
        }
    }

    /// Full-axis selection anchored at `anchor` extending to `extent`.
    pub fn full_axis(axis: Axis, anchor: u32, extent: u32) -> Self {
        match axis {
            Axis::Row => Self::row_range(anchor, extent),
            Axis::Column => Self::column_range(anchor, extent),
        }
    }

    /// Create a select-all selection
    pub fn all() -> Self {
        Self {
            selection_type: SelectionType::All,
            start_row: 0,
            start_col: 0,
            end_row: u32::MAX,
            end_col: u32::MAX,
        }
    }

    /// Get normalized bounds (min/max)
    pub fn bounds(&self) -> (u32, u32, u32, u32) {
        (
            self.start_row.min(self.end_row),
            self.start_col.min(self.end_col),
            self.start_row.max(self.end_row),
            self.start_col.max(self.end_col),
        )
    }

    /// Indices of `axis` selected in full (whole rows or whole columns).
    ///
    /// Select-all covers every index; cell ranges select no full axis.
    pub fn full_axis_indices(&self, axis: Axis) -> Option<RangeInclusive<u32>> {
        let (min_row, min_col, max_row, max_col) = self.bounds();
        match (self.selection_type, axis) {
            (SelectionType::RowRange, Axis::Row) => Some(min_row..=max_row),
            (SelectionType::ColumnRange, Axis::Column) => Some(min_col..=max_col),
            (SelectionType::All, _) => Some(0..=u32::MAX),
            _ => None,
        }
    }

    /// True if exactly header `index` of `axis` is selected as a full row/column.
    pub fn is_sole_full_axis(&self, axis: Axis, index: u32) -> bool {
        self.full_axis_indices(axis)
            .is_some_and(|range| *range.start() == index && *range.end() == index)
    }
}

/// Configuration for row and column header bands
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct HeaderConfig {
    /// Whether headers are visible
    pub visible: bool,
    /// Width of row headers in pixels (~40px default)
    pub row_header_width: f32,
    /// Height of column headers in pixels (~20px default)
    pub col_header_height: f32,
}

impl Default for HeaderConfig {
    fn default() -> Self {
        Self {
            visible: true,
            row_header_width: 40.0,
            col_header_height: 20.0,
        }
    }
}

impl HeaderConfig {
    /// Width of the row header band, 0 when headers are hidden
    pub fn band_width(&self) -> f32 {
        if self.visible {
            self.row_header_width
        } else {
            0.0
        }
    }

    /// Height of the column header band, 0 when headers are hidden
    pub fn band_height(&self) -> f32 {
        if self.visible {
            self.col_header_height
        } else {
            0.0
        }
    }
}
