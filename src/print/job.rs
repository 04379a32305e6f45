//! Print jobs: the sheets to paginate and the settings to use.
//!
//! Jobs are usually built from JSON:
//!
//! ```json
//! {
//!   "sheets": [
//!     { "name": "Sheet1", "rowCount": 120, "colCount": 12,
//!       "colWidths": { "0": 120 }, "hiddenRows": [3], "rowBreaks": [] }
//!   ],
//!   "settings": { "paperSize": 9, "pageOrder": "overThenDown" }
//! }
//! ```

use std::collections::{HashMap, HashSet};

use serde::Deserialize;

use super::{PageBreakList, PageDescriptor, PrintSettings};
use crate::error::Result;
use crate::layout::{Axis, HeaderTrack, DEFAULT_COL_WIDTH, DEFAULT_ROW_HEIGHT};
use crate::render::Frame;

/// One sheet's layout as the paginator sees it.
#[derive(Debug, Clone)]
pub struct PrintSheet {
    pub name: String,
    pub rows: HeaderTrack,
    pub cols: HeaderTrack,
    /// Explicit breaks; empty axes are split automatically
    pub breaks: PageBreakList,
}

impl PrintSheet {
    pub fn new(name: impl Into<String>, rows: HeaderTrack, cols: HeaderTrack) -> Self {
        Self {
            name: name.into(),
            rows,
            cols,
            breaks: PageBreakList::default(),
        }
    }

    #[must_use]
    pub fn with_breaks(mut self, breaks: PageBreakList) -> Self {
        self.breaks = breaks;
        self
    }

    /// Track for `axis`.
    pub fn track(&self, axis: Axis) -> &HeaderTrack {
        match axis {
            Axis::Row => &self.rows,
            Axis::Column => &self.cols,
        }
    }

    /// True if there is at least one visible row and one visible column.
    pub fn has_content(&self) -> bool {
        self.rows.total_extent() > 0.0 && self.cols.total_extent() > 0.0
    }
}

fn default_row_height() -> f32 {
    DEFAULT_ROW_HEIGHT
}

fn default_col_width() -> f32 {
    DEFAULT_COL_WIDTH
}

/// Serialized form of a sheet (sparse sizes and hidden sets)
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SheetSpec {
    pub name: String,
    pub row_count: u32,
    pub col_count: u32,
    #[serde(default = "default_row_height")]
    pub default_row_height: f32,
    #[serde(default = "default_col_width")]
    pub default_col_width: f32,
    #[serde(default)]
    pub row_heights: HashMap<u32, f32>,
    #[serde(default)]
    pub col_widths: HashMap<u32, f32>,
    #[serde(default)]
    pub hidden_rows: HashSet<u32>,
    #[serde(default)]
    pub hidden_cols: HashSet<u32>,
    #[serde(default)]
    pub row_breaks: Vec<u32>,
    #[serde(default)]
    pub col_breaks: Vec<u32>,
}

impl SheetSpec {
    /// Build the header tracks.
    ///
    /// # Errors
    /// `InvalidSize` or `IndexOutOfRange` for bad overrides. Break lists are
    /// checked later, when the sheet is paginated.
    pub fn into_sheet(self) -> Result<PrintSheet> {
        let rows = HeaderTrack::from_sparse(
            Axis::Row,
            self.row_count,
            self.default_row_height,
            &self.row_heights,
            &self.hidden_rows,
        )?;
        let cols = HeaderTrack::from_sparse(
            Axis::Column,
            self.col_count,
            self.default_col_width,
            &self.col_widths,
            &self.hidden_cols,
        )?;
        Ok(PrintSheet::new(self.name, rows, cols)
            .with_breaks(PageBreakList::new(self.row_breaks, self.col_breaks)))
    }
}

/// Serialized form of a job
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct JobSpec {
    pub sheets: Vec<SheetSpec>,
    #[serde(default)]
    pub settings: PrintSettings,
}

/// Sheets to print, in order, with shared settings.
#[derive(Debug, Clone, Default)]
pub struct PrintJob {
    pub sheets: Vec<PrintSheet>,
    pub settings: PrintSettings,
}

impl PrintJob {
    pub fn new(sheets: Vec<PrintSheet>, settings: PrintSettings) -> Self {
        Self { sheets, settings }
    }

    /// Parse a job from JSON.
    ///
    /// # Errors
    /// `Json` for malformed documents, or the first sheet conversion error.
    pub fn from_json(json: &str) -> Result<Self> {
        let spec: JobSpec = serde_json::from_str(json)?;
        Self::from_spec(spec)
    }

    pub fn from_spec(spec: JobSpec) -> Result<Self> {
        let sheets = spec
            .sheets
            .into_iter()
            .map(SheetSpec::into_sheet)
            .collect::<Result<Vec<_>>>()?;
        Ok(Self::new(sheets, spec.settings))
    }

    /// Frame for drawing `page`, or `None` if the page is not from this job.
    pub fn frame<'a>(&'a self, page: &'a PageDescriptor) -> Option<Frame<'a>> {
        let sheet = self.sheets.get(page.sheet)?;
        Some(Frame::bare(
            &page.viewport,
            Some(page.region()),
            &sheet.rows,
            &sheet.cols,
            (page.target_rect.x, page.target_rect.y),
        ))
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
    fn test_job_from_json() {
        let job = PrintJob::from_json(
            r#"{
                "sheets": [{
                    "name": "Data", "rowCount": 5, "colCount": 3,
                    "colWidths": { "1": 100 }, "hiddenRows": [0],
                    "rowBreaks": [0, 2, 5]
                }],
                "settings": { "paperSize": 9 }
            }"#,
        )
        .unwrap();
        let sheet = &job.sheets[0];
        assert_eq!(sheet.cols.total_extent(), 64.0 + 100.0 + 64.0);
        assert_eq!(sheet.rows.total_extent(), 4.0 * 20.0);
        assert_eq!(sheet.breaks.rows, vec![0, 2, 5]);
        assert!(sheet.breaks.cols.is_empty());
        assert_eq!(job.settings.paper_size, 9);
    }

    #[test]
    fn test_bad_override_rejected() {
        let err = PrintJob::from_json(
            r#"{ "sheets": [{ "name": "S", "rowCount": 2, "colCount": 2, "rowHeights": { "1": -4 } }] }"#,
        )
        .unwrap_err();
        assert!(matches!(err, GridError::InvalidSize { axis: Axis::Row, index: 1, .. }));
        assert!(matches!(PrintJob::from_json("[]"), Err(GridError::Json(_))));
    }

    #[test]
    fn test_has_content() {
        let rows = HeaderTrack::new(Axis::Row, 3, 20.0);
        let empty_cols = HeaderTrack::new(Axis::Column, 0, 64.0);
        assert!(!PrintSheet::new("S", rows.clone(), empty_cols).has_content());
        let cols = HeaderTrack::new(Axis::Column, 2, 64.0);
        assert!(PrintSheet::new("S", rows, cols).has_content());
    }
}
