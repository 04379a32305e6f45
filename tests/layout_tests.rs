//! Layout tests for sheetgrid
//!
//! Tests for cumulative header positions, lookup under hidden headers,
//! the scroll/zoom transform and separator hit-testing.
#![allow(
    clippy::unwrap_used,
    clippy::expect_used,
    clippy::indexing_slicing,
    clippy::float_cmp,
    clippy::panic,
    clippy::cast_possible_truncation,
    clippy::cast_precision_loss,
    clippy::cast_lossless
)]

use sheetgrid::layout::{column_label, Axis, HeaderTrack, HitTester, Viewport};
use test_case::test_case;

fn approx(a: f32, b: f32) -> bool {
    (a - b).abs() < 1e-3
}

/// Positions recomputed from scratch, for checking the cached ones.
fn naive_position(track: &HeaderTrack, index: u32) -> f32 {
    (0..index).map(|i| track.effective_size(i)).sum()
}

fn assert_cumulative(track: &HeaderTrack) {
    for i in 0..=track.len() {
        assert!(
            approx(track.position(i), naive_position(track, i)),
            "position({i}) = {}, expected {}",
            track.position(i),
            naive_position(track, i)
        );
    }
    assert!(approx(track.total_extent(), naive_position(track, track.len())));
}

// ============================================================================
// Cumulative positions
// ============================================================================

#[test]
fn test_positions_survive_mixed_mutations() {
    let mut track = HeaderTrack::new(Axis::Row, 200, 20.0);
    assert_cumulative(&track);

    // Deterministic pseudo-random walk over every mutation kind
    let mut seed = 17_u32;
    let mut next = |bound: u32| {
        seed = seed.wrapping_mul(1_103_515_245).wrapping_add(12_345);
        (seed >> 16) % bound
    };
    for step in 0..300 {
        let len = track.len();
        match step % 5 {
            0 => {
                let index = next(len);
                track.set_size(index, next(60) as f32).unwrap();
            }
            1 => {
                let index = next(len);
                track.set_visible(index, next(3) != 0).unwrap();
            }
            2 => {
                let start = next(len);
                let end = (start + next(5)).min(len);
                track.set_sizes(start..end, 5.0 + next(40) as f32).unwrap();
            }
            3 => track.insert(next(len + 1), 1 + next(3)).unwrap(),
            _ if len > 10 => {
                let start = next(len - 3);
                track.remove(start..start + 2).unwrap();
            }
            _ => {}
        }
        assert_cumulative(&track);
    }
}

#[test]
fn test_hidden_header_has_no_extent() {
    let mut track = HeaderTrack::new(Axis::Column, 5, 64.0);
    track.set_size(2, 100.0).unwrap();
    track.set_visible(2, false).unwrap();

    assert_eq!(track.size(2), 100.0);
    assert_eq!(track.effective_size(2), 0.0);
    assert_eq!(track.position(2), track.position(3));
    assert_eq!(track.total_extent(), 4.0 * 64.0);

    // Showing it again restores the stored size
    assert!(!track.set_visible(2, true).unwrap());
    assert_eq!(track.total_extent(), 4.0 * 64.0 + 100.0);
}

#[test]
fn test_lookup_skips_hidden_headers() {
    let mut track = HeaderTrack::new(Axis::Row, 6, 10.0);
    track.set_visible(1, false).unwrap();
    track.set_visible(2, false).unwrap();

    assert_eq!(track.find_index_at_position(9.9), Some(0));
    assert_eq!(track.find_index_at_position(10.0), Some(3));
    assert_eq!(track.find_index_at_position(39.9), Some(5));
    assert_eq!(track.find_index_at_position(40.0), None);
    assert_eq!(track.find_index_at_position(-0.5), None);
}

#[test]
fn test_all_hidden_track_has_no_lookup() {
    let mut track = HeaderTrack::new(Axis::Column, 3, 64.0);
    for i in 0..3 {
        track.set_visible(i, false).unwrap();
    }
    assert_eq!(track.total_extent(), 0.0);
    assert_eq!(track.find_index_at_position(0.0), None);
    assert_eq!(track.first_visible(), None);
}

#[test]
fn test_remove_then_restore_is_exact() {
    let mut track = HeaderTrack::new(Axis::Column, 8, 64.0);
    track.set_size(3, 90.0).unwrap();
    track.set_custom_text(4, Some("Total".to_string())).unwrap();
    let before: Vec<f32> = (0..=8).map(|i| track.position(i)).collect();

    let removed = track.remove(2..5).unwrap();
    assert_eq!(track.len(), 5);
    track.restore(2, removed).unwrap();

    let after: Vec<f32> = (0..=8).map(|i| track.position(i)).collect();
    assert_eq!(before, after);
    assert_eq!(track.label(4), "Total");
}

#[test_case(0, "A")]
#[test_case(25, "Z")]
#[test_case(26, "AA")]
#[test_case(701, "ZZ")]
#[test_case(702, "AAA")]
fn test_column_labels(col: u32, expected: &str) {
    assert_eq!(column_label(col), expected);
}

// ============================================================================
// Viewport transform
// ============================================================================

#[test_case(1.0, 0.0, 0.0 ; "identity")]
#[test_case(2.0, 0.0, 0.0 ; "zoomed in")]
#[test_case(0.5, 120.0, 40.0 ; "zoomed out and scrolled")]
#[test_case(3.3, 1234.5, 98.25 ; "fractional")]
fn test_transform_round_trips(scale: f32, scroll_x: f32, scroll_y: f32) {
    let mut viewport = Viewport::new();
    viewport.set_scale(scale);
    viewport.scroll_x = scroll_x;
    viewport.scroll_y = scroll_y;

    for &(x, y) in &[(0.0, 0.0), (17.0, 300.0), (640.5, 2.25), (5000.0, 7000.0)] {
        let (sx, sy) = viewport.to_screen(x, y);
        let (lx, ly) = viewport.to_logical(sx, sy);
        assert!(approx(lx, x) && approx(ly, y), "({x}, {y}) came back as ({lx}, {ly})");
    }
}

#[test]
fn test_scale_two_doubles_screen_distance() {
    let mut viewport = Viewport::new();
    viewport.set_scale(2.0);
    assert_eq!(viewport.to_screen_axis(Axis::Column, 100.0), 200.0);
    assert_eq!(viewport.to_logical_axis(Axis::Column, 200.0), 100.0);
}

#[test]
fn test_scale_is_clamped_to_limits() {
    let mut viewport = Viewport::with_scale_limits(0.5, 2.0);
    viewport.set_scale(10.0);
    assert_eq!(viewport.scale(), 2.0);
    viewport.set_scale(0.01);
    assert_eq!(viewport.scale(), 0.5);
    assert!(!viewport.set_scale(f32::NAN));
    assert_eq!(viewport.scale(), 0.5);
}

#[test]
fn test_scroll_is_clamped_to_content() {
    let cols = HeaderTrack::new(Axis::Column, 20, 100.0);
    let rows = HeaderTrack::new(Axis::Row, 10, 20.0);
    let mut viewport = Viewport::new();
    viewport.resize(800.0, 600.0);

    viewport.set_scroll(5000.0, 5000.0, &cols, &rows);
    assert_eq!(viewport.scroll_x, 2000.0 - 800.0);
    // Rows are shorter than the viewport
    assert_eq!(viewport.scroll_y, 0.0);

    viewport.scroll_by(-3000.0, 0.0, &cols, &rows);
    assert_eq!(viewport.scroll_x, 0.0);
}

#[test]
fn test_zoom_at_keeps_anchor_fixed() {
    let cols = HeaderTrack::new(Axis::Column, 100, 100.0);
    let rows = HeaderTrack::new(Axis::Row, 1000, 20.0);
    let mut viewport = Viewport::new();
    viewport.set_scroll(300.0, 200.0, &cols, &rows);

    let before = viewport.to_logical(250.0, 120.0);
    viewport.zoom_at(2.0, 250.0, 120.0, &cols, &rows);
    let after = viewport.to_logical(250.0, 120.0);

    assert_eq!(viewport.scale(), 2.0);
    assert!(approx(before.0, after.0) && approx(before.1, after.1));
}

#[test]
fn test_visible_region_tracks_scroll() {
    let cols = HeaderTrack::new(Axis::Column, 100, 100.0);
    let rows = HeaderTrack::new(Axis::Row, 1000, 20.0);
    let mut viewport = Viewport::new();
    viewport.resize(450.0, 100.0);
    viewport.set_scroll(150.0, 40.0, &cols, &rows);

    let region = viewport.visible_region(&cols, &rows).unwrap();
    assert_eq!(region.cols, 1..7);
    assert_eq!(region.rows, 2..8);
}

// ============================================================================
// Hit testing
// ============================================================================

#[test]
fn test_hit_body_and_separator() {
    let cols = HeaderTrack::new(Axis::Column, 4, 100.0);
    let viewport = Viewport::new();
    let tester = HitTester::new(&cols, &viewport);

    let body = tester.locate(250.0).unwrap();
    assert_eq!(body.index, 2);
    assert!(!body.near_separator);

    let edge = tester.locate(199.0).unwrap();
    assert_eq!(edge.index, 1);
    assert!(edge.near_separator);
    assert_eq!(edge.resize_target(), Some(1));

    // Just past the boundary still grabs the separator of the previous header
    let after = tester.locate(201.0).unwrap();
    assert_eq!(after.index, 2);
    assert_eq!(after.resize_target(), Some(1));
}

#[test_case(1.0, 0.0 ; "identity")]
#[test_case(2.0, 0.0 ; "zoomed in")]
#[test_case(0.5, 333.0 ; "zoomed out and scrolled")]
#[test_case(1.75, 1010.5 ; "fractional")]
fn test_locate_finds_header_under_its_own_span(scale: f32, scroll: f32) {
    let mut cols = HeaderTrack::new(Axis::Column, 200, 64.0);
    for i in 0..200 {
        cols.set_size(i, 30.0 + (i % 5) as f32 * 17.0).unwrap();
        if i % 7 == 3 {
            cols.set_visible(i, false).unwrap();
        }
    }
    let mut viewport = Viewport::new();
    viewport.set_scale(scale);
    viewport.scroll_x = scroll;
    let tester = HitTester::new(&cols, &viewport);

    for i in (0..200).filter(|&i| cols.is_visible(i)) {
        // 0.0 is the leading edge, where the inverse transform can round below position(i)
        for fraction in [0.0, 0.1, 0.5, 0.9] {
            let logical = cols.position(i) + fraction * cols.size(i);
            let screen = viewport.to_screen_axis(Axis::Column, logical);
            let hit = tester.locate(screen).unwrap();
            assert_eq!(hit.index, i, "logical {logical} at scale {scale}");
        }
    }
}

#[test]
fn test_hit_tolerance_is_in_screen_pixels() {
    let cols = HeaderTrack::new(Axis::Column, 4, 100.0);
    let mut viewport = Viewport::new();
    viewport.set_scale(2.0);
    let tester = HitTester::new(&cols, &viewport);

    // Separator after column 0 is at screen 200; 4 screen px away is outside a 3 px band
    assert!(tester.locate(196.0).is_some_and(|hit| !hit.near_separator));
    assert_eq!(tester.locate(198.0).unwrap().resize_target(), Some(0));
}

#[test]
fn test_hit_ignores_hidden_neighbour() {
    let mut cols = HeaderTrack::new(Axis::Column, 4, 100.0);
    cols.set_visible(1, false).unwrap();
    let viewport = Viewport::new();
    let tester = HitTester::new(&cols, &viewport);

    // The boundary at 100 is shared by columns 0, 1 and 2; dragging resizes 0
    let hit = tester.locate(101.0).unwrap();
    assert_eq!(hit.index, 2);
    assert_eq!(hit.resize_target(), Some(0));
}

#[test]
fn test_hit_outside_track() {
    let cols = HeaderTrack::new(Axis::Column, 4, 100.0);
    let viewport = Viewport::new();
    let tester = HitTester::new(&cols, &viewport);
    assert!(tester.locate(450.0).is_none());
    assert_eq!(tester.locate(-5.0).unwrap().index, 0);
}
