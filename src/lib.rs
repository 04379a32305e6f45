//! sheetgrid - grid layout, viewport and print pagination for spreadsheet surfaces
//!
//! The engine behind a spreadsheet canvas, without the cells:
//! - Row/column header tracks with cumulative positions and O(log n) lookup
//! - Scroll and zoom transforms between screen and logical coordinates
//! - Header hit-testing with a separator grab band for drag-resize
//! - Drag-resize and whole row/column selection as reversible commands
//! - Print pagination with explicit or automatic page breaks
//!
//! Drawing, cell storage and the undo log belong to the host, which plugs in
//! through [`render::GridRenderer`] and [`interaction::CommandLog`].
//!
//! # Usage (JavaScript)
//!
//! ```javascript
//! import init, { SheetGridView, paginate_json } from 'sheetgrid';
//! await init();
//! const view = new SheetGridView(1000, 26, null);
//! view.pointer_down(x, y, 0);
//! const pages = JSON.parse(paginate_json(jobJson));
//! ```

pub mod bindings;
pub mod config;
pub mod error;
pub mod interaction;
pub mod layout;
pub mod print;
pub mod render;
pub mod types;
pub mod viewer;

use wasm_bindgen::prelude::*;

pub use bindings::SheetGridView;
pub use config::GridConfig;
pub use error::{GridError, Result};
pub use viewer::{GridView, HitTarget};

/// Paginate a JSON print job and return the pages as a JSON string.
///
/// # Errors
/// Returns `Json` for a malformed job, or the first pagination error.
pub fn paginate_job_json(json: &str) -> Result<String> {
    let job = print::PrintJob::from_json(json)?;
    let pages = print::paginate(&job)?;
    Ok(serde_json::to_string(&pages)?)
}

/// Paginate a JSON print job and return a JSON string of page descriptors
///
/// # Arguments
/// * `job` - JSON document with `sheets` and optional `settings`
///
/// # Errors
/// Returns an error if the job is malformed or a sheet has invalid page breaks.
#[wasm_bindgen]
pub fn paginate_json(job: &str) -> std::result::Result<String, JsValue> {
    paginate_job_json(job).map_err(|e| JsValue::from_str(&e.to_string()))
}

/// Paginate a JSON print job and return the pages as a `JsValue`
///
/// This is more efficient than `paginate_json` when the result will be
/// used directly in JavaScript.
///
/// # Errors
/// Returns an error if the job is malformed or a sheet has invalid page breaks.
#[wasm_bindgen]
pub fn paginate_to_js(job: &str) -> std::result::Result<JsValue, JsValue> {
    let job = print::PrintJob::from_json(job).map_err(|e| JsValue::from_str(&e.to_string()))?;
    let pages = print::paginate(&job).map_err(|e| JsValue::from_str(&e.to_string()))?;

    serde_wasm_bindgen::to_value(&pages)
        .map_err(|e| JsValue::from_str(&format!("Serialization error: {e}")))
}

/// Get the library version
#[must_use]
#[wasm_bindgen]
pub fn version() -> String {
    env!("CARGO_PKG_VERSION").to_string()
}
