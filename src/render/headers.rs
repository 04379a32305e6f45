//! Row and column header decoration.
//!
//! This module lays out the header cells of a [`Frame`] and decides how each
//! one looks:
//! - Column headers: A, B, C, ... Z, AA, AB, ... (or custom text)
//! - Row headers: 1, 2, 3, ... (or custom text)
//! - Selection highlighting for partially and fully selected rows/columns
//! - A guide line at the provisional separator during a resize drag
//!
//! Drawing goes through the [`HeaderPainter`] capability so any backend can
//! reuse the same decisions.

use std::ops::RangeInclusive;

use super::Frame;
use crate::layout::Axis;
use crate::types::{Rect, SelectionType};

/// Labels are skipped on headers narrower than this
const MIN_LABEL_WIDTH: f32 = 20.0;
/// Labels are skipped on headers shorter than this
const MIN_LABEL_HEIGHT: f32 = 12.0;

/// Semantic colour role; the painter maps it to its own palette.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum HeaderTone {
    Background,
    /// Header intersecting a cell selection
    SelectedBackground,
    /// Header of a fully selected row/column
    ActiveBackground,
    Border,
    Text,
    SelectedText,
    /// Separator guide while resizing
    Guide,
}

/// Primitive drawing operations a backend offers for headers.
pub trait HeaderPainter {
    fn fill_rect(&mut self, rect: Rect, tone: HeaderTone);
    fn stroke_line(&mut self, from: (f32, f32), to: (f32, f32), tone: HeaderTone);
    /// Draw `text` centered in `bounds`.
    fn draw_text(&mut self, text: &str, bounds: Rect, tone: HeaderTone);
}

/// How a single header cell is drawn.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum HeaderDecoration {
    /// Unselected header with its label
    Label(String),
    /// Header intersecting the selection; `full` when the whole row/column is selected
    Selected { label: String, full: bool },
    /// The corner cell; `all` when everything is selected
    Corner { all: bool },
    /// Provisional separator of a resize drag
    ResizeGuide,
}

impl HeaderDecoration {
    /// Paint this decoration into `bounds`.
    pub fn draw(&self, painter: &mut dyn HeaderPainter, bounds: Rect) {
        match self {
            Self::Label(label) => {
                painter.fill_rect(bounds, HeaderTone::Background);
                draw_cell_borders(painter, bounds);
                draw_label(painter, label, bounds, HeaderTone::Text);
            }
            Self::Selected { label, full } => {
                let (background, text) = if *full {
                    (HeaderTone::ActiveBackground, HeaderTone::SelectedText)
                } else {
                    (HeaderTone::SelectedBackground, HeaderTone::Text)
                };
                painter.fill_rect(bounds, background);
                draw_cell_borders(painter, bounds);
                draw_label(painter, label, bounds, text);
            }
            Self::Corner { all } => {
                let background = if *all {
                    HeaderTone::ActiveBackground
                } else {
                    HeaderTone::Background
                };
                painter.fill_rect(bounds, background);
                draw_cell_borders(painter, bounds);
            }
            Self::ResizeGuide => {
                painter.stroke_line((bounds.x, bounds.y), (bounds.right(), bounds.bottom()), HeaderTone::Guide);
            }
        }
    }
}

fn draw_cell_borders(painter: &mut dyn HeaderPainter, bounds: Rect) {
    let (right, bottom) = (bounds.right() - 0.5, bounds.bottom() - 0.5);
    painter.stroke_line((right, bounds.y), (right, bounds.bottom()), HeaderTone::Border);
    painter.stroke_line((bounds.x, bottom), (bounds.right(), bottom), HeaderTone::Border);
}

fn draw_label(painter: &mut dyn HeaderPainter, label: &str, bounds: Rect, tone: HeaderTone) {
    if bounds.width >= MIN_LABEL_WIDTH && bounds.height >= MIN_LABEL_HEIGHT {
        painter.draw_text(label, bounds, tone);
    }
}

/// One header cell positioned on screen.
#[derive(Debug, Clone, PartialEq)]
pub struct HeaderCell {
    pub axis: Axis,
    pub index: u32,
    pub bounds: Rect,
    pub decoration: HeaderDecoration,
}

/// Header cells of `axis` visible in `frame`, in index order.
///
/// Empty when the frame has no header bands or nothing is visible. Hidden and
/// zero-size headers have empty bounds and are skipped.
pub fn header_cells(frame: &Frame<'_>, axis: Axis) -> Vec<HeaderCell> {
    let (Some(config), Some(region)) = (frame.headers, frame.region.as_ref()) else {
        return Vec::new();
    };
    if !config.visible {
        return Vec::new();
    }
    let range = match axis {
        Axis::Row => region.rows.clone(),
        Axis::Column => region.cols.clone(),
    };
    let track = frame.track(axis);
    let (selected, fully_selected) = selected_indices(frame, axis);

    range
        .filter_map(|index| {
            let (start, length) = frame.header_span(axis, index);
            let bounds = match axis {
                Axis::Column => Rect::new(start, 0.0, length, config.col_header_height),
                Axis::Row => Rect::new(0.0, start, config.row_header_width, length),
            };
            if bounds.is_empty() {
                return None;
            }
            let label = track.label(index);
            let decoration = if fully_selected.as_ref().is_some_and(|r| r.contains(&index)) {
                HeaderDecoration::Selected { label, full: true }
            } else if selected.as_ref().is_some_and(|r| r.contains(&index)) {
                HeaderDecoration::Selected { label, full: false }
            } else {
                HeaderDecoration::Label(label)
            };
            Some(HeaderCell {
                axis,
                index,
                bounds,
                decoration,
            })
        })
        .collect()
}

/// Indices of `axis` that intersect the selection, and those fully selected.
fn selected_indices(
    frame: &Frame<'_>,
    axis: Axis,
) -> (Option<RangeInclusive<u32>>, Option<RangeInclusive<u32>>) {
    let Some(selection) = frame.selection else {
        return (None, None);
    };
    let full = selection.full_axis_indices(axis);
    if full.is_some() {
        return (full.clone(), full);
    }
    let (min_row, min_col, max_row, max_col) = selection.bounds();
    let partial = match (selection.selection_type, axis) {
        (SelectionType::CellRange, Axis::Row) => Some(min_row..=max_row),
        (SelectionType::CellRange, Axis::Column) => Some(min_col..=max_col),
        // A row selection does not highlight column headers and vice versa
        _ => None,
    };
    (partial, None)
}

/// Paint the header bands of `frame`: corner, column headers, row headers and
/// the resize guide, in that order.
pub fn paint_headers(frame: &Frame<'_>, painter: &mut dyn HeaderPainter) {
    let Some(config) = frame.headers.filter(|c| c.visible) else {
        return;
    };

    let all = frame
        .selection
        .is_some_and(|s| s.selection_type == SelectionType::All);
    HeaderDecoration::Corner { all }.draw(
        painter,
        Rect::new(0.0, 0.0, config.row_header_width, config.col_header_height),
    );

    for cell in header_cells(frame, Axis::Column)
        .into_iter()
        .chain(header_cells(frame, Axis::Row))
    {
        cell.decoration.draw(painter, cell.bounds);
    }

    if let Some(guide) = resize_guide_bounds(frame) {
        HeaderDecoration::ResizeGuide.draw(painter, guide);
    }
}

/// Line segment (as a zero-width or zero-height rect) at the provisional
/// separator of an active resize drag.
pub fn resize_guide_bounds(frame: &Frame<'_>) -> Option<Rect> {
    let preview = frame.resize_preview?;
    let track = frame.track(preview.axis);
    let edge = frame.screen_position(preview.axis, track.position(preview.index) + preview.size);
    let (width, height) = (
        frame.origin.0 + frame.viewport.width,
        frame.origin.1 + frame.viewport.height,
    );
    Some(match preview.axis {
        Axis::Column => Rect::new(edge, 0.0, 0.0, height),
        Axis::Row => Rect::new(0.0, edge, width, 0.0),
    })
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
    use crate::layout::{HeaderTrack, Viewport, VisibleRegion};
    use crate::render::ResizePreview;
    use crate::types::{HeaderConfig, Selection};

    #[derive(Default)]
    struct Recorder {
        fills: Vec<(Rect, HeaderTone)>,
        lines: Vec<((f32, f32), (f32, f32), HeaderTone)>,
        texts: Vec<(String, HeaderTone)>,
    }

    impl HeaderPainter for Recorder {
        fn fill_rect(&mut self, rect: Rect, tone: HeaderTone) {
            self.fills.push((rect, tone));
        }
        fn stroke_line(&mut self, from: (f32, f32), to: (f32, f32), tone: HeaderTone) {
            self.lines.push((from, to, tone));
        }
        fn draw_text(&mut self, text: &str, _bounds: Rect, tone: HeaderTone) {
            self.texts.push((text.to_string(), tone));
        }
    }

    struct Fixture {
        rows: HeaderTrack,
        cols: HeaderTrack,
        viewport: Viewport,
        config: HeaderConfig,
    }

    impl Fixture {
        fn new() -> Self {
            let mut viewport = Viewport::new();
            viewport.resize(400.0, 100.0);
            Self {
                rows: HeaderTrack::new(Axis::Row, 100, 20.0),
                cols: HeaderTrack::new(Axis::Column, 10, 100.0),
                viewport,
                config: HeaderConfig::default(),
            }
        }

        fn region(&self) -> VisibleRegion {
            self.viewport.visible_region(&self.cols, &self.rows).unwrap()
        }

        fn frame<'a>(&'a self, region: VisibleRegion, selection: Option<&'a Selection>) -> Frame<'a> {
            Frame {
                headers: Some(&self.config),
                selection,
                ..Frame::bare(&self.viewport, Some(region), &self.rows, &self.cols, (40.0, 20.0))
            }
        }
    }

    #[test]
    fn test_column_cells_follow_track() {
        let mut fixture = Fixture::new();
        fixture.cols.set_visible(1, false).unwrap();
        let region = fixture.region();
        let cells = header_cells(&fixture.frame(region.clone(), None), Axis::Column);

        let indices: Vec<u32> = cells.iter().map(|c| c.index).collect();
        assert_eq!(indices, vec![0, 2, 3, 4, 5]);
        assert_eq!(cells[1].bounds, Rect::new(140.0, 0.0, 100.0, 20.0));
        assert_eq!(cells[1].decoration, HeaderDecoration::Label("C".into()));
    }

    #[test]
    fn test_zero_size_headers_and_bands_have_no_cells() {
        let mut fixture = Fixture::new();
        fixture.cols.set_size(2, 0.0).unwrap();
        let region = VisibleRegion {
            rows: 0..3,
            cols: 0..4,
        };
        let cells = header_cells(&fixture.frame(region.clone(), None), Axis::Column);
        let indices: Vec<u32> = cells.iter().map(|c| c.index).collect();
        assert_eq!(indices, vec![0, 1, 3]);

        fixture.config.col_header_height = 0.0;
        assert!(header_cells(&fixture.frame(region, None), Axis::Column).is_empty());
    }

    #[test]
    fn test_selection_highlighting() {
        let fixture = Fixture::new();
        let region = fixture.region();

        let columns = Selection::column_range(1, 2);
        let frame = fixture.frame(region.clone(), Some(&columns));
        let cols = header_cells(&frame, Axis::Column);
        assert_eq!(
            cols[1].decoration,
            HeaderDecoration::Selected { label: "B".into(), full: true }
        );
        assert_eq!(cols[0].decoration, HeaderDecoration::Label("A".into()));
        let rows = header_cells(&frame, Axis::Row);
        assert!(rows.iter().all(|c| matches!(c.decoration, HeaderDecoration::Label(_))));

        let cells = Selection::cell_range(0, 0, 1, 0);
        let frame = fixture.frame(region.clone(), Some(&cells));
        let rows = header_cells(&frame, Axis::Row);
        assert_eq!(
            rows[1].decoration,
            HeaderDecoration::Selected { label: "2".into(), full: false }
        );
    }

    #[test]
    fn test_paint_skips_labels_on_narrow_headers() {
        let mut fixture = Fixture::new();
        fixture.cols.set_size(0, 10.0).unwrap();
        let region = fixture.region();
        let mut painter = Recorder::default();
        paint_headers(&fixture.frame(region.clone(), None), &mut painter);

        assert!(!painter.texts.iter().any(|(t, _)| t == "A"));
        assert!(painter.texts.iter().any(|(t, _)| t == "B"));
        assert_eq!(painter.fills[0].0, Rect::new(0.0, 0.0, 40.0, 20.0));
    }

    #[test]
    fn test_resize_guide() {
        let fixture = Fixture::new();
        let region = fixture.region();
        let frame = Frame {
            resize_preview: Some(ResizePreview {
                axis: Axis::Column,
                index: 1,
                size: 150.0,
            }),
            ..fixture.frame(region.clone(), None)
        };
        let guide = resize_guide_bounds(&frame).unwrap();
        assert_eq!(guide.x, 40.0 + 250.0);

        let mut painter = Recorder::default();
        paint_headers(&frame, &mut painter);
        assert_eq!(painter.lines.last().unwrap().2, HeaderTone::Guide);
    }

    #[test]
    fn test_no_headers_for_print_frames() {
        let fixture = Fixture::new();
        let region = fixture.region();
        let frame = Frame::bare(&fixture.viewport, Some(region), &fixture.rows, &fixture.cols, (0.0, 0.0));
        assert!(header_cells(&frame, Axis::Row).is_empty());
        let mut painter = Recorder::default();
        paint_headers(&frame, &mut painter);
        assert!(painter.fills.is_empty());
    }
}
