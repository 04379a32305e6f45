//! Grid configuration.
//!
//! Every field has a default, so a partial JSON document only overrides what
//! it names:
//!
//! ```json
//! { "maxScale": 2.0, "headers": { "rowHeaderWidth": 48 }, "resizeRows": false }
//! ```

use serde::{Deserialize, Serialize};

use crate::error::Result;
use crate::layout::{
    Axis, DEFAULT_COL_WIDTH, DEFAULT_MAX_SCALE, DEFAULT_MIN_SCALE, DEFAULT_ROW_HEIGHT,
    DEFAULT_SEPARATOR_TOLERANCE,
};
use crate::types::HeaderConfig;

/// Settings for one interactive grid surface.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct GridConfig {
    /// Width of columns without an explicit size
    pub default_col_width: f32,
    /// Height of rows without an explicit size
    pub default_row_height: f32,
    /// Lower zoom limit
    pub min_scale: f32,
    /// Upper zoom limit
    pub max_scale: f32,
    /// Separator grab band in screen pixels on either side of a boundary
    pub separator_tolerance: f32,
    /// Header band layout
    pub headers: HeaderConfig,
    /// Allow dragging column separators
    pub resize_columns: bool,
    /// Allow dragging row separators
    pub resize_rows: bool,
    /// Allow whole-column selection from the column header band
    pub select_columns: bool,
    /// Allow whole-row selection from the row header band
    pub select_rows: bool,
}

impl Default for GridConfig {
    fn default() -> Self {
        Self {
            default_col_width: DEFAULT_COL_WIDTH,
            default_row_height: DEFAULT_ROW_HEIGHT,
            min_scale: DEFAULT_MIN_SCALE,
            max_scale: DEFAULT_MAX_SCALE,
            separator_tolerance: DEFAULT_SEPARATOR_TOLERANCE,
            headers: HeaderConfig::default(),
            resize_columns: true,
            resize_rows: true,
            select_columns: true,
            select_rows: true,
        }
    }
}

impl GridConfig {
    /// Parse a configuration from JSON, filling unspecified fields with defaults.
    ///
    /// # Errors
    /// Returns `Json` if the document is malformed.
    pub fn from_json(json: &str) -> Result<Self> {
        Ok(serde_json::from_str(json)?)
    }

    /// Default header size along `axis`.
    pub fn default_size(&self, axis: Axis) -> f32 {
        match axis {
            Axis::Row => self.default_row_height,
            Axis::Column => self.default_col_width,
        }
    }

    /// Whether separators along `axis` can be dragged.
    pub fn resize_enabled(&self, axis: Axis) -> bool {
        match axis {
            Axis::Row => self.resize_rows,
            Axis::Column => self.resize_columns,
        }
    }

    /// Whether header clicks along `axis` select full rows/columns.
    pub fn select_enabled(&self, axis: Axis) -> bool {
        match axis {
            Axis::Row => self.select_rows,
            Axis::Column => self.select_columns,
        }
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

    #[test]
    fn test_partial_json_keeps_defaults() {
        let config = GridConfig::from_json(
            r#"{ "maxScale": 2.0, "headers": { "rowHeaderWidth": 48 }, "resizeRows": false }"#,
        )
        .unwrap();
        assert_eq!(config.max_scale, 2.0);
        assert_eq!(config.min_scale, DEFAULT_MIN_SCALE);
        assert_eq!(config.headers.row_header_width, 48.0);
        assert_eq!(config.headers.col_header_height, 20.0);
        assert!(!config.resize_enabled(Axis::Row));
        assert!(config.resize_enabled(Axis::Column));
    }

    #[test]
    fn test_malformed_json() {
        assert!(GridConfig::from_json("{ maxScale: }").is_err());
    }
}
