//! Interaction tests for sheetgrid
//!
//! Drives a `GridView` with pointer events the way a host surface would:
//! separator drags, whole row/column selection, focus exclusivity,
//! cancellation and the reversible commands handed to the host's log.
//!
//! Every view here has 40 x 20 header bands, 100px columns and 20px rows, so
//! the separator after column `n` sits at surface x = 40 + 100 * (n + 1).
#![allow(
    clippy::unwrap_used,
    clippy::expect_used,
    clippy::indexing_slicing,
    clippy::float_cmp,
    clippy::panic
)]

use sheetgrid::interaction::{CursorHint, FocusOwner, HeaderCommand, PointerEvent};
use sheetgrid::layout::{Axis, VisibleRegion};
use sheetgrid::render::{Frame, GridRenderer, ResizePreview};
use sheetgrid::types::Selection;
use sheetgrid::{GridConfig, GridError, GridView};

const BAND_W: f32 = 40.0;
const BAND_H: f32 = 20.0;

fn config() -> GridConfig {
    GridConfig {
        default_col_width: 100.0,
        ..GridConfig::default()
    }
}

fn view() -> GridView {
    GridView::new(100, 10, config())
}

/// Surface x of a logical column position at 100% zoom and no scroll.
fn col_x(logical: f32) -> f32 {
    BAND_W + logical
}

/// Surface y of a logical row position at 100% zoom and no scroll.
fn row_y(logical: f32) -> f32 {
    BAND_H + logical
}

/// Press, move and release along the column header band.
fn drag_columns(view: &mut GridView, from: f32, to: f32, log: &mut Vec<HeaderCommand>) {
    assert!(view.pointer_down(&PointerEvent::down(from, 10.0)).unwrap());
    view.pointer_move(&PointerEvent::moved(to, 10.0));
    assert!(view.pointer_up(&PointerEvent::up(to, 10.0), log).unwrap());
}

#[derive(Default)]
struct Recorder {
    previews: Vec<Option<ResizePreview>>,
    regions: Vec<Option<VisibleRegion>>,
    selections: Vec<Option<Selection>>,
}

impl GridRenderer for Recorder {
    fn render_frame(&mut self, frame: &Frame<'_>) {
        self.previews.push(frame.resize_preview);
        self.regions.push(frame.region.clone());
        self.selections.push(frame.selection.cloned());
    }
}

// ============================================================================
// Drag resize
// ============================================================================

#[test]
fn test_drag_resize_commits_and_reverts() {
    let mut view = view();
    let mut log: Vec<HeaderCommand> = Vec::new();
    let before: Vec<f32> = (0..=10).map(|i| view.cols().position(i)).collect();

    assert!(view.pointer_down(&PointerEvent::down(col_x(200.0), 10.0)).unwrap());
    assert_eq!(view.focus_owner(), Some(FocusOwner::Resize(Axis::Column)));
    assert_eq!(
        view.pointer_move(&PointerEvent::moved(col_x(250.0), 10.0)),
        CursorHint::ResizeColumn
    );
    // Nothing is committed while dragging
    assert_eq!(view.cols().size(1), 100.0);
    assert!(view.pointer_up(&PointerEvent::up(col_x(250.0), 10.0), &mut log).unwrap());

    assert_eq!(view.cols().size(1), 150.0);
    assert_eq!(view.cols().position(2), 250.0);
    assert_eq!(view.focus_owner(), None);
    assert_eq!(log.len(), 1);

    view.revert_command(&log[0]).unwrap();
    let after: Vec<f32> = (0..=10).map(|i| view.cols().position(i)).collect();
    assert_eq!(before, after);
}

#[test]
fn test_drag_resize_rows() {
    let mut view = view();
    let mut log: Vec<HeaderCommand> = Vec::new();

    // Separator after row 2 is at logical y = 60
    assert!(view.pointer_down(&PointerEvent::down(10.0, row_y(60.0))).unwrap());
    assert_eq!(
        view.pointer_move(&PointerEvent::moved(10.0, row_y(75.0))),
        CursorHint::ResizeRow
    );
    assert!(view.pointer_up(&PointerEvent::up(10.0, row_y(75.0)), &mut log).unwrap());

    assert_eq!(view.rows().size(2), 35.0);
    assert_eq!(log.len(), 1);
    assert_eq!(log[0].axis(), Axis::Row);
}

#[test]
fn test_drag_under_zoom_uses_logical_sizes() {
    let mut view = view();
    let mut log: Vec<HeaderCommand> = Vec::new();
    assert!(view.set_zoom(2.0));

    // Separator after column 0 is at logical 100, screen 200
    drag_columns(&mut view, col_x(200.0), col_x(300.0), &mut log);
    assert_eq!(view.cols().size(0), 150.0);
}

#[test]
fn test_drag_while_scrolled() {
    let mut view = view();
    let mut log: Vec<HeaderCommand> = Vec::new();
    assert!(view.set_scroll(150.0, 0.0));

    // Separator after column 1 (logical 200) is now at screen 50
    drag_columns(&mut view, col_x(50.0), col_x(100.0), &mut log);
    assert_eq!(view.cols().size(1), 150.0);
}

#[test]
fn test_drag_past_header_start_clamps_to_zero() {
    let mut view = view();
    let mut log: Vec<HeaderCommand> = Vec::new();

    drag_columns(&mut view, col_x(200.0), col_x(50.0), &mut log);
    assert_eq!(view.cols().size(1), 0.0);
    assert_eq!(view.cols().total_extent(), 900.0);
}

#[test]
fn test_unchanged_drag_logs_nothing() {
    let mut view = view();
    let mut log: Vec<HeaderCommand> = Vec::new();

    drag_columns(&mut view, col_x(200.0), col_x(200.0), &mut log);
    assert!(log.is_empty());
    assert_eq!(view.focus_owner(), None);
}

#[test]
fn test_drag_inside_full_selection_resizes_all_selected() {
    let mut view = view();
    let mut log: Vec<HeaderCommand> = Vec::new();
    view.set_selection(Some(Selection::column_range(1, 3)));

    // Separator after column 2 is at logical 300
    drag_columns(&mut view, col_x(300.0), col_x(330.0), &mut log);

    assert_eq!(view.cols().size(0), 100.0);
    for col in 1..=3 {
        assert_eq!(view.cols().size(col), 130.0, "column {col}");
    }
    assert_eq!(view.cols().size(4), 100.0);
    assert_eq!(log.len(), 1);
    assert_eq!(log[0].range(), 1..4);

    // One undo step restores all three
    view.revert_command(&log[0]).unwrap();
    assert_eq!(view.cols().total_extent(), 1000.0);
}

#[test]
fn test_drag_outside_selection_resizes_one() {
    let mut view = view();
    let mut log: Vec<HeaderCommand> = Vec::new();
    view.set_selection(Some(Selection::column_range(1, 3)));

    drag_columns(&mut view, col_x(600.0), col_x(640.0), &mut log);

    assert_eq!(view.cols().size(5), 140.0);
    assert_eq!(view.cols().size(2), 100.0);
    assert_eq!(log[0].range(), 5..6);
}

#[test]
fn test_resize_preview_reaches_renderer() {
    let mut view = view();
    let mut recorder = Recorder::default();

    assert!(view.pointer_down(&PointerEvent::down(col_x(200.0), 10.0)).unwrap());
    view.pointer_move(&PointerEvent::moved(col_x(260.0), 10.0));
    assert!(view.needs_render());
    view.render(&mut recorder);
    assert!(!view.needs_render());

    assert_eq!(
        recorder.previews.last().copied().flatten(),
        Some(ResizePreview {
            axis: Axis::Column,
            index: 1,
            size: 160.0,
        })
    );
    assert!(recorder.regions.last().unwrap().is_some());
}

#[test]
fn test_event_stream_routes_by_kind() {
    let mut view = view();
    let mut log: Vec<HeaderCommand> = Vec::new();
    let events: Vec<PointerEvent> = serde_json::from_str(
        r#"[
            { "kind": "down", "x": 240, "y": 10 },
            { "kind": "move", "x": 270, "y": 10 },
            { "kind": "up", "x": 270, "y": 10 }
        ]"#,
    )
    .unwrap();

    let cursors: Vec<CursorHint> = events
        .iter()
        .map(|event| view.handle_pointer(event, &mut log).unwrap())
        .collect();

    assert_eq!(cursors[0], CursorHint::ResizeColumn);
    assert_eq!(cursors[1], CursorHint::ResizeColumn);
    assert_eq!(view.cols().size(1), 130.0);
    assert_eq!(log.len(), 1);
    assert_eq!(view.focus_owner(), None);
}

// ============================================================================
// Header range selection
// ============================================================================

#[test]
fn test_column_range_selection_drag() {
    let mut view = view();
    let mut log: Vec<HeaderCommand> = Vec::new();

    assert!(view.pointer_down(&PointerEvent::down(col_x(150.0), 10.0)).unwrap());
    assert_eq!(view.focus_owner(), Some(FocusOwner::Select(Axis::Column)));
    assert_eq!(view.displayed_selection(), Some(Selection::column_range(1, 1)));

    assert_eq!(
        view.pointer_move(&PointerEvent::moved(col_x(350.0), 10.0)),
        CursorHint::SelectHeader
    );
    assert_eq!(view.displayed_selection(), Some(Selection::column_range(1, 3)));
    // Provisional until release
    assert_eq!(view.selection(), None);

    assert!(view.pointer_up(&PointerEvent::up(col_x(350.0), 10.0), &mut log).unwrap());
    assert_eq!(view.selection(), Some(&Selection::column_range(1, 3)));
    assert_eq!(view.focus_owner(), None);
    assert!(log.is_empty());
}

#[test]
fn test_row_range_selection_drag_backwards() {
    let mut view = view();
    let mut log: Vec<HeaderCommand> = Vec::new();

    assert!(view.pointer_down(&PointerEvent::down(10.0, row_y(105.0))).unwrap());
    view.pointer_move(&PointerEvent::moved(10.0, row_y(45.0)));
    assert!(view.pointer_up(&PointerEvent::up(10.0, row_y(45.0)), &mut log).unwrap());

    let selection = view.selection().unwrap();
    assert_eq!(selection.full_axis_indices(Axis::Row), Some(2..=5));
    assert_eq!(selection.full_axis_indices(Axis::Column), None);
}

#[test]
fn test_selection_shows_in_rendered_frame() {
    let mut view = view();
    let mut recorder = Recorder::default();

    assert!(view.pointer_down(&PointerEvent::down(col_x(150.0), 10.0)).unwrap());
    view.pointer_move(&PointerEvent::moved(col_x(250.0), 10.0));
    view.render(&mut recorder);

    assert_eq!(
        recorder.selections.last().cloned().flatten(),
        Some(Selection::column_range(1, 2))
    );
}

#[test]
fn test_press_on_sole_selected_header_passes_through() {
    let mut view = view();
    view.set_selection(Some(Selection::column_range(2, 2)));

    assert!(!view.pointer_down(&PointerEvent::down(col_x(250.0), 10.0)).unwrap());
    assert_eq!(view.focus_owner(), None);
    assert_eq!(view.selection(), Some(&Selection::column_range(2, 2)));
}

#[test]
fn test_corner_and_cell_presses() {
    let mut view = view();
    assert!(view.pointer_down(&PointerEvent::down(10.0, 10.0)).unwrap());
    assert_eq!(view.selection(), Some(&Selection::all()));

    assert!(view.pointer_down(&PointerEvent::down(col_x(150.0), row_y(30.0))).unwrap());
    assert_eq!(view.selection(), Some(&Selection::cell_range(1, 1, 1, 1)));
    assert_eq!(view.focus_owner(), None);
}

// ============================================================================
// Enable flags, focus and cancellation
// ============================================================================

#[test]
fn test_disabled_column_resize() {
    let mut view = GridView::new(
        100,
        10,
        GridConfig {
            resize_columns: false,
            ..config()
        },
    );

    assert_eq!(
        view.pointer_move(&PointerEvent::moved(col_x(199.0), 10.0)),
        CursorHint::Default
    );
    assert!(!view.pointer_down(&PointerEvent::down(col_x(200.0), 10.0)).unwrap());
    assert_eq!(view.focus_owner(), None);

    // Rows are unaffected
    assert!(view.pointer_down(&PointerEvent::down(10.0, row_y(60.0))).unwrap());
    assert_eq!(view.focus_owner(), Some(FocusOwner::Resize(Axis::Row)));
}

#[test]
fn test_disabled_row_selection() {
    let mut view = view();
    view.set_select_enabled(Axis::Row, false);

    assert!(!view.pointer_down(&PointerEvent::down(10.0, row_y(45.0))).unwrap());
    assert_eq!(view.selection(), None);
    assert_eq!(
        view.pointer_move(&PointerEvent::moved(10.0, row_y(45.0))),
        CursorHint::Default
    );
}

#[test]
fn test_second_session_is_refused_while_dragging() {
    let mut view = view();
    assert!(view.pointer_down(&PointerEvent::down(col_x(200.0), 10.0)).unwrap());

    let err = view
        .pointer_down(&PointerEvent::down(10.0, row_y(45.0)))
        .unwrap_err();
    assert!(matches!(err, GridError::FocusBusy(_)));
    assert_eq!(view.focus_owner(), Some(FocusOwner::Resize(Axis::Column)));
    assert!(view.resize_preview().is_some());
}

#[test]
fn test_cancel_discards_drag() {
    let mut view = view();
    let mut log: Vec<HeaderCommand> = Vec::new();

    assert!(view.pointer_down(&PointerEvent::down(col_x(200.0), 10.0)).unwrap());
    view.pointer_move(&PointerEvent::moved(col_x(260.0), 10.0));
    view.cancel_interaction();

    assert_eq!(view.resize_preview(), None);
    assert_eq!(view.focus_owner(), None);
    assert!(!view.pointer_up(&PointerEvent::up(col_x(260.0), 10.0), &mut log).unwrap());
    assert_eq!(view.cols().size(1), 100.0);
    assert!(log.is_empty());
}

#[test]
fn test_cancel_discards_selection_drag() {
    let mut view = view();
    view.set_selection(Some(Selection::cell_range(0, 0, 0, 0)));

    assert!(view.pointer_down(&PointerEvent::down(col_x(150.0), 10.0)).unwrap());
    view.pointer_move(&PointerEvent::moved(col_x(450.0), 10.0));
    view.cancel_interaction();

    assert_eq!(view.displayed_selection(), Some(Selection::cell_range(0, 0, 0, 0)));
}

// ============================================================================
// Commands
// ============================================================================

#[test]
fn test_commands_survive_json_round_trip_for_undo() {
    let mut view = view();
    let mut log: Vec<HeaderCommand> = Vec::new();
    drag_columns(&mut view, col_x(200.0), col_x(250.0), &mut log);
    view.set_header_visible(Axis::Row, 3, false, &mut log).unwrap();

    let json = serde_json::to_string(&log).unwrap();
    assert!(json.contains(r#""type":"setSizes""#));
    let restored: Vec<HeaderCommand> = serde_json::from_str(&json).unwrap();
    assert_eq!(restored, log);

    for command in restored.iter().rev() {
        view.revert_command(command).unwrap();
    }
    assert_eq!(view.cols().size(1), 100.0);
    assert!(view.rows().is_visible(3));

    for command in &restored {
        view.apply_command(command).unwrap();
    }
    assert_eq!(view.cols().size(1), 150.0);
    assert!(!view.rows().is_visible(3));
}

#[test]
fn test_removing_headers_clamps_scroll() {
    let mut view = view();
    let mut log: Vec<HeaderCommand> = Vec::new();
    assert!(view.set_scroll(240.0, 0.0));

    view.remove_headers(Axis::Column, 0..5, &mut log).unwrap();
    assert_eq!(view.scroll_position(), (0.0, 0.0));

    view.revert_command(&log[0]).unwrap();
    assert_eq!(view.cols().len(), 10);
}

#[test]
fn test_config_from_json_drives_view() {
    let config =
        GridConfig::from_json(r#"{ "defaultColWidth": 100, "resizeRows": false, "maxScale": 2.0 }"#)
            .unwrap();
    let mut view = GridView::new(100, 10, config);

    assert!(!view.pointer_down(&PointerEvent::down(10.0, row_y(60.0))).unwrap());
    view.set_zoom(3.0);
    assert_eq!(view.scale(), 2.0);
}
