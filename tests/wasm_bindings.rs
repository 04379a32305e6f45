//! Browser-side tests for the JavaScript bindings.
//!
//! Run with: wasm-pack test --headless --chrome
#![cfg(target_arch = "wasm32")]
#![allow(clippy::unwrap_used, clippy::expect_used, clippy::indexing_slicing)]

use sheetgrid::interaction::HeaderCommand;
use sheetgrid::{paginate_json, SheetGridView};
use wasm_bindgen::JsValue;
use wasm_bindgen_test::*;

wasm_bindgen_test_configure!(run_in_browser);

fn view() -> SheetGridView {
    SheetGridView::new(100, 10, Some(r#"{ "defaultColWidth": 100 }"#.to_string())).unwrap()
}

#[wasm_bindgen_test]
fn drag_resize_queues_command() {
    let mut view = view();
    // Column band starts after the 40px row header band
    assert!(view.pointer_down(240.0, 10.0, 0).unwrap());
    assert_eq!(view.pointer_move(260.0, 10.0), "col-resize");
    assert!(view.pointer_up(260.0, 10.0).unwrap());

    assert_eq!(command_count(&view.take_commands().unwrap()), 1);
    // Drained
    assert_eq!(command_count(&view.take_commands().unwrap()), 0);
}

#[wasm_bindgen_test]
fn undo_through_js_value() {
    let mut view = view();
    view.resize_headers("column", 0, 2, 150.0).unwrap();
    let commands: Vec<HeaderCommand> =
        serde_wasm_bindgen::from_value(view.take_commands().unwrap()).unwrap();
    let command = serde_wasm_bindgen::to_value(&commands[0]).unwrap();

    view.revert_command(command.clone()).unwrap();
    view.apply_command(command).unwrap();
    assert!(view.needs_render());
}

#[wasm_bindgen_test]
fn rejects_unknown_axis_and_bad_config() {
    let mut view = view();
    assert!(view.resize_headers("diagonal", 0, 1, 10.0).is_err());
    assert!(SheetGridView::new(1, 1, Some("{".to_string())).is_err());
}

#[wasm_bindgen_test]
fn secondary_button_passes_through() {
    let mut view = view();
    assert!(!view.pointer_down(240.0, 10.0, 2).unwrap());
    assert_eq!(view.pointer_move(500.0, 300.0), "default");
}

#[wasm_bindgen_test]
fn paginate_json_round_trip() {
    let job = r#"{ "sheets": [ { "name": "Sheet1", "rowCount": 100, "colCount": 3 } ] }"#;
    let pages = paginate_json(job).unwrap();
    assert!(pages.starts_with('['));
    assert!(pages.contains("\"pageNumber\":3"));
    assert!(paginate_json("{}").is_err());
}

fn command_count(value: &JsValue) -> usize {
    serde_wasm_bindgen::from_value::<Vec<serde_json::Value>>(value.clone())
        .map(|v| v.len())
        .unwrap_or(0)
}
