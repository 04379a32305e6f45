//! Structured error types for sheetgrid.
//!
//! Hit-testing outside the grid is not an error: locators return `None`.

use crate::layout::Axis;

/// All errors that can occur in layout, interaction and pagination.
#[derive(Debug, thiserror::Error)]
pub enum GridError {
    /// A header size was negative, NaN or infinite. The track is unchanged.
    #[error("Invalid size {size} for {axis} {index}")]
    InvalidSize {
        /// Axis of the rejected header.
        axis: Axis,
        /// Index of the rejected header.
        index: u32,
        /// The rejected value.
        size: f32,
    },

    /// A header index outside the track.
    #[error("{axis} index {index} out of range (track has {len} headers)")]
    IndexOutOfRange {
        /// Axis of the track.
        axis: Axis,
        /// Requested index.
        index: u32,
        /// Number of headers in the track.
        len: u32,
    },

    /// An explicit break list that is not strictly increasing from 0 to the track length.
    #[error("Invalid {axis} page breaks: {reason}")]
    InvalidBreaks {
        /// Axis of the break list.
        axis: Axis,
        /// What is wrong with the list.
        reason: String,
    },

    /// A print pass was requested while another one is still active.
    #[error("A print session is already in progress")]
    AlreadyPrinting,

    /// The sheet has no visible rows or columns to paginate.
    #[error("Sheet '{0}' has no content to paginate")]
    EmptyContent(String),

    /// An interaction session tried to start while another holds input focus.
    #[error("Input focus is held by {0}")]
    FocusBusy(&'static str),

    /// JSON (de)serialization of configuration or print jobs.
    #[error("JSON: {0}")]
    Json(#[from] serde_json::Error),
}

/// Convenience alias used throughout the crate.
pub type Result<T> = std::result::Result<T, GridError>;

#[cfg(target_arch = "wasm32")]
impl From<GridError> for wasm_bindgen::JsValue {
    fn from(e: GridError) -> Self {
        wasm_bindgen::JsValue::from_str(&e.to_string())
    }
}
