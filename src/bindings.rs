//! JavaScript bindings for an interactive grid.
//!
//! `SheetGridView` wraps a [`GridView`] and keeps committed commands in a
//! queue until the host drains them with `take_commands`. Commands come back
//! through `apply_command` / `revert_command` for redo and undo.

use wasm_bindgen::prelude::*;

use crate::config::GridConfig;
use crate::interaction::{HeaderCommand, PointerButton, PointerEvent};
use crate::layout::Axis;
use crate::viewer::GridView;

fn js_err(e: impl std::fmt::Display) -> JsValue {
    JsValue::from_str(&e.to_string())
}

fn parse_axis(axis: &str) -> Result<Axis, JsValue> {
    match axis {
        "row" | "rows" => Ok(Axis::Row),
        "column" | "col" | "columns" => Ok(Axis::Column),
        other => Err(JsValue::from_str(&format!("Unknown axis '{other}'"))),
    }
}

/// Interactive grid surface exported to JavaScript.
#[wasm_bindgen]
pub struct SheetGridView {
    view: GridView,
    commands: Vec<HeaderCommand>,
}

#[wasm_bindgen]
impl SheetGridView {
    /// Create a grid of `rows` x `cols` headers.
    ///
    /// # Errors
    /// Returns an error if `config` is present but not valid JSON.
    #[wasm_bindgen(constructor)]
    pub fn new(rows: u32, cols: u32, config: Option<String>) -> Result<SheetGridView, JsValue> {
        console_error_panic_hook::set_once();
        let config = match config {
            Some(json) => GridConfig::from_json(&json).map_err(js_err)?,
            None => GridConfig::default(),
        };
        Ok(Self {
            view: GridView::new(rows, cols, config),
            commands: Vec::new(),
        })
    }

    /// Pointer pressed at surface coordinates. `button` is `MouseEvent.button`.
    ///
    /// # Errors
    /// Returns an error if another interaction holds focus.
    pub fn pointer_down(&mut self, x: f32, y: f32, button: i16) -> Result<bool, JsValue> {
        let event = PointerEvent::down(x, y).with_button(PointerButton::from_dom(button));
        self.view.pointer_down(&event).map_err(js_err)
    }

    /// Pointer moved; returns the CSS cursor to show.
    pub fn pointer_move(&mut self, x: f32, y: f32) -> String {
        self.view.pointer_move(&PointerEvent::moved(x, y)).css().to_string()
    }

    /// Pointer released; committed commands are queued for `take_commands`.
    ///
    /// # Errors
    /// Returns an error if the committed command could not be applied.
    pub fn pointer_up(&mut self, x: f32, y: f32) -> Result<bool, JsValue> {
        self.view
            .pointer_up(&PointerEvent::up(x, y), &mut self.commands)
            .map_err(js_err)
    }

    /// Abandon the active drag without committing.
    pub fn cancel_interaction(&mut self) {
        self.view.cancel_interaction();
    }

    /// Drain queued commands as an array of plain objects.
    ///
    /// # Errors
    /// Returns an error if serialization fails.
    pub fn take_commands(&mut self) -> Result<JsValue, JsValue> {
        let commands = std::mem::take(&mut self.commands);
        serde_wasm_bindgen::to_value(&commands).map_err(js_err)
    }

    /// Redo a command previously returned by `take_commands`.
    ///
    /// # Errors
    /// Returns an error if the value is not a command or does not fit the grid.
    pub fn apply_command(&mut self, command: JsValue) -> Result<(), JsValue> {
        let command: HeaderCommand = serde_wasm_bindgen::from_value(command).map_err(js_err)?;
        self.view.apply_command(&command).map_err(js_err)
    }

    /// Undo a command previously returned by `take_commands`.
    ///
    /// # Errors
    /// Returns an error if the value is not a command or does not fit the grid.
    pub fn revert_command(&mut self, command: JsValue) -> Result<(), JsValue> {
        let command: HeaderCommand = serde_wasm_bindgen::from_value(command).map_err(js_err)?;
        self.view.revert_command(&command).map_err(js_err)
    }

    /// Resize headers `start..end` of `axis` ("row" or "column").
    ///
    /// # Errors
    /// Returns an error for an unknown axis, a bad range or a bad size.
    pub fn resize_headers(&mut self, axis: &str, start: u32, end: u32, size: f32) -> Result<(), JsValue> {
        let axis = parse_axis(axis)?;
        self.view
            .resize_headers(axis, start..end, size, &mut self.commands)
            .map_err(js_err)
    }

    /// Show or hide one header.
    ///
    /// # Errors
    /// Returns an error for an unknown axis or index.
    pub fn set_header_visible(&mut self, axis: &str, index: u32, visible: bool) -> Result<(), JsValue> {
        let axis = parse_axis(axis)?;
        self.view
            .set_header_visible(axis, index, visible, &mut self.commands)
            .map_err(js_err)
    }

    /// Insert `count` headers before `at`.
    ///
    /// # Errors
    /// Returns an error for an unknown axis or position.
    pub fn insert_headers(&mut self, axis: &str, at: u32, count: u32) -> Result<(), JsValue> {
        let axis = parse_axis(axis)?;
        self.view
            .insert_headers(axis, at, count, &mut self.commands)
            .map_err(js_err)
    }

    /// Remove headers `start..end`.
    ///
    /// # Errors
    /// Returns an error for an unknown axis or a bad range.
    pub fn remove_headers(&mut self, axis: &str, start: u32, end: u32) -> Result<(), JsValue> {
        let axis = parse_axis(axis)?;
        self.view
            .remove_headers(axis, start..end, &mut self.commands)
            .map_err(js_err)
    }

    pub fn scroll_by(&mut self, delta_x: f32, delta_y: f32) -> bool {
        self.view.scroll_by(delta_x, delta_y)
    }

    pub fn set_scroll(&mut self, x: f32, y: f32) -> bool {
        self.view.set_scroll(x, y)
    }

    pub fn set_zoom(&mut self, scale: f32) -> bool {
        self.view.set_zoom(scale)
    }

    /// Zoom keeping the point under `(x, y)` fixed (e.g. ctrl+wheel).
    pub fn zoom_at(&mut self, scale: f32, x: f32, y: f32) -> bool {
        self.view.zoom_at(scale, x, y)
    }

    pub fn scale(&self) -> f32 {
        self.view.scale()
    }

    /// Resize the surface, header bands included.
    pub fn resize(&mut self, width: f32, height: f32) {
        self.view.resize(width, height);
    }

    pub fn needs_render(&self) -> bool {
        self.view.needs_render()
    }

    /// Visible `{ rows, cols }` index ranges, or `undefined`.
    ///
    /// # Errors
    /// Returns an error if serialization fails.
    pub fn visible_region(&self) -> Result<JsValue, JsValue> {
        serde_wasm_bindgen::to_value(&self.view.visible_region()).map_err(js_err)
    }

    /// Current selection, or `undefined`.
    ///
    /// # Errors
    /// Returns an error if serialization fails.
    pub fn selection(&self) -> Result<JsValue, JsValue> {
        serde_wasm_bindgen::to_value(&self.view.displayed_selection()).map_err(js_err)
    }
}
