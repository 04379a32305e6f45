//! Ordered row or column header model.
//!
//! A track is the single source of truth for "where is index i". Positions are
//! derived from sizes: hidden headers keep their index and size but contribute
//! nothing to the cumulative sum. The cumulative table is dropped on every
//! mutation and rebuilt on the next query, so bulk edits stay O(n) total.

use std::cell::OnceCell;
use std::collections::{HashMap, HashSet};
use std::ops::Range;

use serde::{Deserialize, Serialize};

use super::Axis;
use crate::error::{GridError, Result};

/// One row or column header. Its index is its position in the owning track.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct HeaderDescriptor {
    /// Size in logical pixels, kept while hidden so showing restores it
    pub size: f32,
    /// Hidden headers have no extent and are never hit
    pub visible: bool,
    /// Label override for the header cell
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub custom_text: Option<String>,
}

impl HeaderDescriptor {
    /// A visible header of the given size.
    pub fn new(size: f32) -> Self {
        Self {
            size,
            visible: true,
            custom_text: None,
        }
    }

    /// Size this header contributes to the track extent.
    pub fn effective_size(&self) -> f32 {
        if self.visible {
            self.size
        } else {
            0.0
        }
    }
}

/// Ordered sequence of headers with cached cumulative positions.
#[derive(Debug, Clone)]
pub struct HeaderTrack {
    axis: Axis,
    default_size: f32,
    headers: Vec<HeaderDescriptor>,
    /// `positions[i]` = leading edge of header i; one extra entry for the end
    positions: OnceCell<Vec<f32>>,
}

impl HeaderTrack {
    /// Create a track of `count` visible headers of `default_size`.
    ///
    /// A negative or non-finite default is treated as 0.
    pub fn new(axis: Axis, count: u32, default_size: f32) -> Self {
        let default_size = sanitize(default_size);
        Self {
            axis,
            default_size,
            headers: vec![HeaderDescriptor::new(default_size); count as usize],
            positions: OnceCell::new(),
        }
    }

    /// Create a track from sparse size overrides and a hidden set.
    ///
    /// # Arguments
    /// * `count` - Number of headers
    /// * `default_size` - Size for headers without an override
    /// * `sizes` - Map of header index to size
    /// * `hidden` - Set of hidden header indices
    ///
    /// # Errors
    /// Returns `InvalidSize` for a negative or non-finite override and
    /// `IndexOutOfRange` for overrides past `count`.
    pub fn from_sparse(
        axis: Axis,
        count: u32,
        default_size: f32,
        sizes: &HashMap<u32, f32>,
        hidden: &HashSet<u32>,
    ) -> Result<Self> {
        let mut track = Self::new(axis, count, default_size);
        for (&index, &size) in sizes {
            track.check_size(index, size)?;
            let header = track.header_mut(index)?;
            header.size = size;
        }
        for &index in hidden {
            track.header_mut(index)?.visible = false;
        }
        Ok(track)
    }

    /// Axis this track lays out.
    pub fn axis(&self) -> Axis {
        self.axis
    }

    /// Size given to newly inserted headers.
    pub fn default_size(&self) -> f32 {
        self.default_size
    }

    /// Number of headers, hidden ones included.
    pub fn len(&self) -> u32 {
        u32::try_from(self.headers.len()).unwrap_or(u32::MAX)
    }

    /// True if the track has no headers at all.
    pub fn is_empty(&self) -> bool {
        self.headers.is_empty()
    }

    /// Header at `index`, if any.
    pub fn descriptor(&self, index: u32) -> Option<&HeaderDescriptor> {
        self.headers.get(index as usize)
    }

    /// Stored size of a header (hidden headers keep theirs).
    ///
    /// Indices past the end report the default size.
    pub fn size(&self, index: u32) -> f32 {
        self.descriptor(index)
            .map_or(self.default_size, |header| header.size)
    }

    /// Size the header occupies on screen: 0 when hidden or out of range.
    pub fn effective_size(&self, index: u32) -> f32 {
        self.descriptor(index)
            .map_or(0.0, HeaderDescriptor::effective_size)
    }

    /// Whether the header at `index` is visible.
    pub fn is_visible(&self, index: u32) -> bool {
        self.descriptor(index).is_some_and(|header| header.visible)
    }

    /// Leading edge of header `index`. Indices at or past the end map to the
    /// total extent.
    pub fn position(&self, index: u32) -> f32 {
        let positions = self.positions();
        positions
            .get(index as usize)
            .or_else(|| positions.last())
            .copied()
            .unwrap_or(0.0)
    }

    /// Trailing edge of header `index` (the separator it owns).
    pub fn edge(&self, index: u32) -> f32 {
        self.position(index.saturating_add(1))
    }

    /// Total logical extent of the track.
    pub fn total_extent(&self) -> f32 {
        self.positions().last().copied().unwrap_or(0.0)
    }

    /// Effective sizes of all headers in order, for page splitting.
    pub fn extents(&self) -> Vec<f32> {
        self.headers
            .iter()
            .map(HeaderDescriptor::effective_size)
            .collect()
    }

    /// Find the header containing logical position `pos` (binary search).
    ///
    /// Returns `None` outside `[0, total_extent)`. Hidden and zero-size headers
    /// have no extent and are never returned.
    pub fn find_index_at_position(&self, pos: f32) -> Option<u32> {
        let positions = self.positions();
        let total = positions.last().copied().unwrap_or(0.0);
        if !(pos >= 0.0 && pos < total) {
            return None;
        }
        let starts = positions.get(..self.headers.len())?;
        // Ties only occur across zero-extent headers; the last of a tie run is
        // the one that owns the span.
        let after = starts.partition_point(|&start| start <= pos);
        u32::try_from(after.checked_sub(1)?).ok()
    }

    /// First header with a non-zero extent.
    pub fn first_visible(&self) -> Option<u32> {
        self.headers
            .iter()
            .position(|header| header.effective_size() > 0.0)
            .and_then(|i| u32::try_from(i).ok())
    }

    /// Last header with a non-zero extent.
    pub fn last_visible(&self) -> Option<u32> {
        self.headers
            .iter()
            .rposition(|header| header.effective_size() > 0.0)
            .and_then(|i| u32::try_from(i).ok())
    }

    /// Nearest header before `index` with a non-zero extent.
    pub fn prev_visible(&self, index: u32) -> Option<u32> {
        (0..index.min(self.len()))
            .rev()
            .find(|&i| self.effective_size(i) > 0.0)
    }

    /// Nearest header after `index` with a non-zero extent.
    pub fn next_visible(&self, index: u32) -> Option<u32> {
        (index.saturating_add(1)..self.len()).find(|&i| self.effective_size(i) > 0.0)
    }

    /// Set the size of one header.
    ///
    /// # Errors
    /// `InvalidSize` for negative or non-finite sizes, `IndexOutOfRange` for a
    /// bad index. The track is unchanged on error.
    pub fn set_size(&mut self, index: u32, size: f32) -> Result<()> {
        self.check_size(index, size)?;
        self.header_mut(index)?.size = size;
        self.invalidate();
        Ok(())
    }

    /// Set every header in `range` to `size`, returning the previous sizes.
    ///
    /// Validation happens before any header is touched.
    pub fn set_sizes(&mut self, range: Range<u32>, size: f32) -> Result<Vec<f32>> {
        self.check_range(&range)?;
        self.check_size(range.start, size)?;
        let previous = self
            .headers
            .get_mut(range.start as usize..range.end as usize)
            .map(|headers| {
                headers
                    .iter_mut()
                    .map(|header| std::mem::replace(&mut header.size, size))
                    .collect()
            })
            .unwrap_or_default();
        self.invalidate();
        Ok(previous)
    }

    /// Write back per-header sizes starting at `start` (inverse of `set_sizes`).
    pub fn restore_sizes(&mut self, start: u32, sizes: &[f32]) -> Result<()> {
        let end = start.saturating_add(u32::try_from(sizes.len()).unwrap_or(u32::MAX));
        self.check_range(&(start..end))?;
        if let Some(bad) = sizes.iter().position(|&s| !is_valid_size(s)) {
            let index = start.saturating_add(u32::try_from(bad).unwrap_or(u32::MAX));
            let size = sizes.get(bad).copied().unwrap_or(f32::NAN);
            return Err(GridError::InvalidSize {
                axis: self.axis,
                index,
                size,
            });
        }
        if let Some(headers) = self.headers.get_mut(start as usize..end as usize) {
            for (header, &size) in headers.iter_mut().zip(sizes) {
                header.size = size;
            }
        }
        self.invalidate();
        Ok(())
    }

    /// Show or hide a header, returning its previous visibility.
    pub fn set_visible(&mut self, index: u32, visible: bool) -> Result<bool> {
        let header = self.header_mut(index)?;
        let previous = std::mem::replace(&mut header.visible, visible);
        self.invalidate();
        Ok(previous)
    }

    /// Replace a header's label override, returning the previous one.
    pub fn set_custom_text(&mut self, index: u32, text: Option<String>) -> Result<Option<String>> {
        let header = self.header_mut(index)?;
        Ok(std::mem::replace(&mut header.custom_text, text))
    }

    /// Display label: custom text, else column letters or 1-based row number.
    pub fn label(&self, index: u32) -> String {
        if let Some(text) = self.descriptor(index).and_then(|h| h.custom_text.as_ref()) {
            return text.clone();
        }
        match self.axis {
            Axis::Column => column_label(index),
            Axis::Row => index.saturating_add(1).to_string(),
        }
    }

    /// Insert `count` default-size headers before `at` (`at == len` appends).
    pub fn insert(&mut self, at: u32, count: u32) -> Result<()> {
        if at > self.len() {
            return Err(out_of_range(self.axis, at, self.headers.len()));
        }
        let fresh = std::iter::repeat(HeaderDescriptor::new(self.default_size)).take(count as usize);
        self.headers.splice(at as usize..at as usize, fresh);
        self.invalidate();
        Ok(())
    }

    /// Remove the headers in `range`, returning them for a later `restore`.
    pub fn remove(&mut self, range: Range<u32>) -> Result<Vec<HeaderDescriptor>> {
        self.check_range(&range)?;
        let removed = self
            .headers
            .drain(range.start as usize..range.end as usize)
            .collect();
        self.invalidate();
        Ok(removed)
    }

    /// Re-insert previously removed headers before `at`.
    pub fn restore(&mut self, at: u32, headers: Vec<HeaderDescriptor>) -> Result<()> {
        if at > self.len() {
            return Err(out_of_range(self.axis, at, self.headers.len()));
        }
        self.headers.splice(at as usize..at as usize, headers);
        self.invalidate();
        Ok(())
    }

    fn positions(&self) -> &[f32] {
        self.positions.get_or_init(|| {
            let mut positions = Vec::with_capacity(self.headers.len() + 1);
            let mut pos: f32 = 0.0;
            for header in &self.headers {
                positions.push(pos);
                pos += header.effective_size();
            }
            positions.push(pos); // Final edge
            positions
        })
    }

    fn invalidate(&mut self) {
        self.positions.take();
    }

    fn header_mut(&mut self, index: u32) -> Result<&mut HeaderDescriptor> {
        let (axis, len) = (self.axis, self.headers.len());
        self.headers
            .get_mut(index as usize)
            .ok_or_else(|| out_of_range(axis, index, len))
    }

    pub(crate) fn check_size(&self, index: u32, size: f32) -> Result<()> {
        if is_valid_size(size) {
            Ok(())
        } else {
            log::debug!("rejected {} size {size} at {index}", self.axis);
            Err(GridError::InvalidSize {
                axis: self.axis,
                index,
                size,
            })
        }
    }

    pub(crate) fn check_range(&self, range: &Range<u32>) -> Result<()> {
        if range.start > range.end || range.end > self.len() {
            return Err(out_of_range(self.axis, range.end, self.headers.len()));
        }
        Ok(())
    }
}

/// Convert a 0-based column index to Excel column letters (A, B, ..., Z, AA, AB, ...)
pub fn column_label(col: u32) -> String {
    let mut result = String::new();
    let mut n = u64::from(col) + 1; // Convert to 1-based
    while n > 0 {
        n -= 1;
        let offset = u32::try_from(n % 26).unwrap_or(0);
        result.insert(0, char::from_u32(u32::from(b'A') + offset).unwrap_or('A'));
        n /= 26;
    }
    result
}

fn is_valid_size(size: f32) -> bool {
    size.is_finite() && size >= 0.0
}

fn sanitize(size: f32) -> f32 {
    if is_valid_size(size) {
        size
    } else {
        0.0
    }
}

fn out_of_range(axis: Axis, index: u32, len: usize) -> GridError {
    GridError::IndexOutOfRange {
        axis,
        index,
        len: u32::try_from(len).unwrap_or(u32::MAX),
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

    fn assert_cumulative(track: &HeaderTrack) {
        for i in 0..track.len() {
            assert_eq!(
                track.position(i + 1),
                track.position(i) + track.effective_size(i),
                "positions out of step at {i}"
            );
            assert!(track.position(i + 1) >= track.position(i));
        }
        assert_eq!(track.position(track.len()), track.total_extent());
    }

    #[test]
    fn test_basic_track() {
        let track = HeaderTrack::new(Axis::Column, 4, 100.0);
        assert_eq!(track.len(), 4);
        assert_eq!(track.total_extent(), 400.0);
        assert_eq!(track.position(2), 200.0);
        assert_eq!(track.edge(2), 300.0);
        assert_cumulative(&track);
    }

    #[test]
    fn test_invalid_size_leaves_track_unchanged() {
        let mut track = HeaderTrack::new(Axis::Row, 3, 20.0);
        for bad in [-1.0, f32::NAN, f32::INFINITY] {
            let err = track.set_size(1, bad).unwrap_err();
            assert!(matches!(err, GridError::InvalidSize { index: 1, .. }));
        }
        assert!(track.set_sizes(0..3, -5.0).is_err());
        assert_eq!(track.size(1), 20.0);
        assert_eq!(track.total_extent(), 60.0);
    }

    #[test]
    fn test_hidden_headers_keep_size() {
        let mut track = HeaderTrack::new(Axis::Column, 4, 50.0);
        track.set_size(1, 80.0).unwrap();
        track.set_visible(1, false).unwrap();
        assert_eq!(track.position(2), 50.0);
        assert_eq!(track.size(1), 80.0);
        assert_eq!(track.effective_size(1), 0.0);
        assert_cumulative(&track);

        track.set_visible(1, true).unwrap();
        assert_eq!(track.position(2), 130.0);
        assert_cumulative(&track);
    }

    #[test]
    fn test_find_index_skips_hidden() {
        let mut track = HeaderTrack::new(Axis::Column, 5, 10.0);
        track.set_visible(1, false).unwrap();
        track.set_size(2, 0.0).unwrap();
        assert_eq!(track.find_index_at_position(0.0), Some(0));
        assert_eq!(track.find_index_at_position(9.9), Some(0));
        assert_eq!(track.find_index_at_position(10.0), Some(3));
        assert_eq!(track.find_index_at_position(25.0), Some(4));
        assert_eq!(track.find_index_at_position(30.0), None);
        assert_eq!(track.find_index_at_position(-1.0), None);
        assert_eq!(track.find_index_at_position(f32::NAN), None);
        assert_eq!(track.next_visible(0), Some(3));
        assert_eq!(track.prev_visible(3), Some(0));
        assert_eq!(track.next_visible(4), None);
    }

    #[test]
    fn test_bulk_set_sizes_and_restore() {
        let mut track = HeaderTrack::new(Axis::Row, 6, 20.0);
        track.set_size(3, 35.0).unwrap();
        let previous = track.set_sizes(2..5, 40.0).unwrap();
        assert_eq!(previous, vec![20.0, 35.0, 20.0]);
        assert_eq!(track.total_extent(), 20.0 * 3.0 + 40.0 * 3.0);
        track.restore_sizes(2, &previous).unwrap();
        assert_eq!(track.size(3), 35.0);
        assert_cumulative(&track);
    }

    #[test]
    fn test_insert_remove_restore() {
        let mut track = HeaderTrack::new(Axis::Column, 3, 10.0);
        track.set_size(2, 30.0).unwrap();
        track.insert(1, 2).unwrap();
        assert_eq!(track.len(), 5);
        assert_eq!(track.size(1), 10.0);
        assert_eq!(track.size(4), 30.0);

        let removed = track.remove(3..5).unwrap();
        assert_eq!(removed.len(), 2);
        assert_eq!(track.total_extent(), 30.0);

        track.restore(3, removed).unwrap();
        assert_eq!(track.total_extent(), 70.0);
        assert!(track.remove(4..9).is_err());
        assert!(track.insert(9, 1).is_err());
    }

    #[test]
    fn test_labels() {
        let mut cols = HeaderTrack::new(Axis::Column, 30, 64.0);
        let rows = HeaderTrack::new(Axis::Row, 3, 20.0);
        assert_eq!(cols.label(0), "A");
        assert_eq!(cols.label(27), "AB");
        assert_eq!(rows.label(2), "3");
        cols.set_custom_text(0, Some("Name".into())).unwrap();
        assert_eq!(cols.label(0), "Name");
    }

    #[test]
    fn test_column_label() {
        assert_eq!(column_label(0), "A");
        assert_eq!(column_label(25), "Z");
        assert_eq!(column_label(26), "AA");
        assert_eq!(column_label(701), "ZZ");
        assert_eq!(column_label(702), "AAA");
    }

    #[test]
    fn test_from_sparse() {
        let sizes = HashMap::from([(1, 120.0)]);
        let hidden = HashSet::from([2]);
        let track = HeaderTrack::from_sparse(Axis::Column, 4, 64.0, &sizes, &hidden).unwrap();
        assert_eq!(track.total_extent(), 64.0 + 120.0 + 64.0);
        assert!(!track.is_visible(2));

        let bad = HashMap::from([(9, 10.0)]);
        assert!(HeaderTrack::from_sparse(Axis::Column, 4, 64.0, &bad, &HashSet::new()).is_err());
    }

    #[test]
    fn test_cumulative_after_mixed_operations() {
        let mut track = HeaderTrack::new(Axis::Row, 50, 18.0);
        for i in (0..50).step_by(3) {
            track.set_size(i, 18.0 + i as f32).unwrap();
        }
        for i in (0..50).step_by(7) {
            track.set_visible(i, false).unwrap();
        }
        track.set_visible(14, true).unwrap();
        assert_cumulative(&track);
    }
}
