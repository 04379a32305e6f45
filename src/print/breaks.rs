//! Page break lists and automatic splitting.
//!
//! A break list for a track of `n` headers is strictly increasing, starts at 0
//! and ends at `n`. Consecutive entries bound one page: `[0, 4, 9]` prints
//! headers 0..4 on the first page and 4..9 on the second.

use std::ops::Range;

use serde::{Deserialize, Serialize};

use crate::error::{GridError, Result};
use crate::layout::Axis;

/// Rounding allowance when packing headers, in logical pixels. Fit-to scales
/// are derived from the content size, so an exact fit can come back a hair short.
const FIT_SLACK: f32 = 1e-2;

/// Bisection rounds when searching for a fit-to scale.
const FIT_SEARCH_STEPS: u32 = 24;

/// Explicit row and column breaks for a sheet. An empty list means "split
/// automatically" for that axis.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct PageBreakList {
    pub rows: Vec<u32>,
    pub cols: Vec<u32>,
}

impl PageBreakList {
    pub fn new(rows: Vec<u32>, cols: Vec<u32>) -> Self {
        Self { rows, cols }
    }

    /// Breaks for `axis`.
    pub fn get(&self, axis: Axis) -> &[u32] {
        match axis {
            Axis::Row => &self.rows,
            Axis::Column => &self.cols,
        }
    }
}

/// Check that `breaks` is a usable break list for a track of `count` headers.
///
/// # Errors
/// `InvalidBreaks` describing the first problem found.
pub fn validate(axis: Axis, breaks: &[u32], count: u32) -> Result<()> {
    let invalid = |reason: String| Err(GridError::InvalidBreaks { axis, reason });
    match (breaks.first(), breaks.last()) {
        (None, _) | (_, None) => return invalid("empty list".into()),
        (Some(&first), _) if first != 0 => return invalid(format!("starts at {first}, not 0")),
        (_, Some(&last)) if last != count => {
            return invalid(format!("ends at {last}, expected {count}"))
        }
        _ => {}
    }
    if let Some(pair) = breaks.windows(2).find(|pair| !matches!(pair, [a, b] if a < b)) {
        return invalid(format!("not strictly increasing at {pair:?}"));
    }
    Ok(())
}

/// Page intervals described by a break list.
pub fn intervals(breaks: &[u32]) -> impl Iterator<Item = Range<u32>> + '_ {
    breaks.windows(2).filter_map(|pair| match pair {
        [start, end] => Some(*start..*end),
        _ => None,
    })
}

/// Split a track into pages.
///
/// `extents` are the effective header sizes in logical pixels, `paper_extent`
/// the printable length in layout pixels and `scale` the print scale. Headers
/// are packed greedily; a header larger than a whole page gets a page of its
/// own. Zero-extent (hidden) headers never start a page.
///
/// Returns a valid break list for `extents.len()` headers (`[0]` when empty).
pub fn auto_split(extents: &[f32], paper_extent: f32, scale: f32) -> Vec<u32> {
    let scale = if scale.is_finite() && scale > 0.0 { scale } else { 1.0 };
    let available = paper_extent.max(0.0) / scale + FIT_SLACK;

    let mut breaks = vec![0];
    let mut used = 0.0_f32;
    for (index, &extent) in (0_u32..).zip(extents) {
        if extent > 0.0 && used > 0.0 && used + extent > available {
            breaks.push(index);
            used = 0.0;
        }
        used += extent;
    }
    let count = u32::try_from(extents.len()).unwrap_or(u32::MAX);
    if count > 0 {
        breaks.push(count);
    }
    breaks
}

/// Largest scale no greater than `scale` at which [`auto_split`] needs at
/// most `pages` pages, searched down to `floor`.
///
/// Greedy packing never uses more pages when the page grows, so the page
/// count is monotone in the scale and a bisection finds the boundary. When
/// even `floor` overflows the result is `floor`; `pages == 0` leaves `scale`
/// as is.
pub fn fit_scale(extents: &[f32], paper_extent: f32, pages: u32, scale: f32, floor: f32) -> f32 {
    let target = usize::try_from(pages).unwrap_or(usize::MAX);
    let fits = |s: f32| auto_split(extents, paper_extent, s).len().saturating_sub(1) <= target;
    if pages == 0 || fits(scale) {
        return scale;
    }
    if scale <= floor || !fits(floor) {
        return scale.min(floor);
    }
    let (mut low, mut high) = (floor, scale);
    for _ in 0..FIT_SEARCH_STEPS {
        let mid = (low + high) / 2.0;
        if fits(mid) {
            low = mid;
        } else {
            high = mid;
        }
    }
    low
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
    use test_case::test_case;

    #[test_case(&[0, 4, 9], 9 ; "valid")]
    #[test_case(&[0], 0 ; "empty track")]
    fn test_validate_accepts(breaks: &[u32], count: u32) {
        validate(Axis::Row, breaks, count).unwrap();
    }

    #[test_case(&[], 9 ; "empty list")]
    #[test_case(&[1, 9], 9 ; "does not start at zero")]
    #[test_case(&[0, 4], 9 ; "does not reach the end")]
    #[test_case(&[0, 4, 4, 9], 9 ; "repeated break")]
    #[test_case(&[0, 6, 4, 9], 9 ; "decreasing")]
    fn test_validate_rejects(breaks: &[u32], count: u32) {
        assert!(matches!(
            validate(Axis::Column, breaks, count),
            Err(GridError::InvalidBreaks { axis: Axis::Column, .. })
        ));
    }

    #[test]
    fn test_intervals() {
        let pages: Vec<_> = intervals(&[0, 3, 5, 9]).collect();
        assert_eq!(pages, vec![0..3, 3..5, 5..9]);
        assert_eq!(intervals(&[0]).count(), 0);
    }

    #[test]
    fn test_auto_split_greedy() {
        assert_eq!(auto_split(&[40.0; 10], 100.0, 1.0), vec![0, 2, 4, 6, 8, 10]);
        // At 50% twice as much content fits
        assert_eq!(auto_split(&[40.0; 10], 100.0, 0.5), vec![0, 5, 10]);
    }

    #[test]
    fn test_auto_split_oversized_and_hidden() {
        assert_eq!(auto_split(&[250.0, 0.0, 30.0], 100.0, 1.0), vec![0, 2, 3]);
        assert_eq!(auto_split(&[250.0, 0.0], 100.0, 1.0), vec![0, 2]);
        assert_eq!(auto_split(&[], 100.0, 1.0), vec![0]);
    }

    #[test]
    fn test_auto_split_is_valid() {
        let extents: Vec<f32> = (0..57).map(|i| (i % 7) as f32 * 13.0).collect();
        let breaks = auto_split(&extents, 120.0, 1.3);
        validate(Axis::Row, &breaks, 57).unwrap();
    }

    #[test]
    fn test_fit_scale_lowers_until_page_count_fits() {
        // 7 headers of 30 on a 100 page: the ratio 200 / 210 packs only 3 per page
        let extents = [30.0; 7];
        let ratio = 200.0 / 210.0;
        assert_eq!(auto_split(&extents, 100.0, ratio).len() - 1, 3);

        let scale = fit_scale(&extents, 100.0, 2, ratio, 0.1);
        assert!(scale < ratio && scale >= 0.1);
        assert_eq!(auto_split(&extents, 100.0, scale), vec![0, 4, 7]);
    }

    #[test]
    fn test_fit_scale_keeps_fitting_scale_and_stops_at_floor() {
        assert_eq!(fit_scale(&[30.0; 7], 100.0, 3, 1.0, 0.1), 1.0);
        assert_eq!(fit_scale(&[30.0; 7], 100.0, 0, 1.0, 0.1), 1.0);
        // 12000 px still needs 13 pages at 10%
        assert_eq!(fit_scale(&[30.0; 400], 100.0, 1, 0.5, 0.1), 0.1);
    }
}
