//! Splits one sheet into an ordered sequence of printable pages.
//!
//! Break lists are resolved once, up front. Pages are produced on demand from
//! a page index, so the sequence is finite and can be walked any number of
//! times without recomputation.

use std::ops::Range;

use serde::Serialize;

use super::breaks::{self, auto_split};
use super::{PageOrder, PrintSettings, PrintSheet};
use crate::error::{GridError, Result};
use crate::layout::{Axis, HeaderTrack, Viewport, VisibleRegion};
use crate::types::Rect;

/// One printed page.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PageDescriptor {
    /// Index of the sheet in its job
    pub sheet: usize,
    /// 1-based page number within the job
    pub page_number: u32,
    /// Rows on this page (end exclusive)
    pub row_range: Range<u32>,
    /// Columns on this page (end exclusive)
    pub col_range: Range<u32>,
    /// Where the content lands on the paper, in layout pixels
    pub target_rect: Rect,
    /// Print scale for this page
    pub scale: f32,
    /// Transient viewport: scrolled to the page's logical top-left, zoomed to `scale`
    pub viewport: Viewport,
}

impl PageDescriptor {
    /// Rows and columns on this page as a render region.
    pub fn region(&self) -> VisibleRegion {
        VisibleRegion {
            rows: self.row_range.clone(),
            cols: self.col_range.clone(),
        }
    }
}

/// Page breaks along one axis with the logical position of every break.
#[derive(Debug, Clone)]
struct AxisPages {
    breaks: Vec<u32>,
    origins: Vec<f32>,
}

impl AxisPages {
    fn resolve(track: &HeaderTrack, explicit: &[u32], paper_extent: f32, scale: f32) -> Result<Self> {
        let breaks = if explicit.is_empty() {
            let breaks = auto_split(&track.extents(), paper_extent, scale);
            log::debug!(
                "auto-split {} {}s into {} pages",
                track.len(),
                track.axis(),
                breaks.len().saturating_sub(1)
            );
            breaks
        } else {
            breaks::validate(track.axis(), explicit, track.len())?;
            explicit.to_vec()
        };
        let origins = breaks.iter().map(|&b| track.position(b)).collect();
        Ok(Self { breaks, origins })
    }

    fn count(&self) -> usize {
        self.breaks.len().saturating_sub(1)
    }

    /// Index range and logical `(origin, extent)` of page `n` along this axis.
    fn page(&self, n: usize) -> Option<(Range<u32>, f32, f32)> {
        let (&start, &end) = (self.breaks.get(n)?, self.breaks.get(n + 1)?);
        let (&from, &to) = (self.origins.get(n)?, self.origins.get(n + 1)?);
        Some((start..end, from, to - from))
    }
}

/// Pagination of a single sheet.
#[derive(Debug, Clone)]
pub struct Paginator {
    sheet: usize,
    rows: AxisPages,
    cols: AxisPages,
    order: PageOrder,
    scale: f32,
    printable: Rect,
    first_page_number: u32,
}

impl Paginator {
    /// Paginate `sheet` on its own; page numbers start at 1.
    ///
    /// # Errors
    /// `EmptyContent` if the sheet has no visible rows or columns, and
    /// `InvalidBreaks` for malformed explicit breaks.
    pub fn for_sheet(sheet: &PrintSheet, settings: &PrintSettings) -> Result<Self> {
        Self::for_job_sheet(0, sheet, settings, 1)
    }

    /// Paginate the `index`-th sheet of a job whose pages so far end at
    /// `first_page_number - 1`.
    pub(crate) fn for_job_sheet(
        index: usize,
        sheet: &PrintSheet,
        settings: &PrintSettings,
        first_page_number: u32,
    ) -> Result<Self> {
        if !sheet.has_content() {
            return Err(GridError::EmptyContent(sheet.name.clone()));
        }
        let printable = settings.printable_rect();
        let estimate = settings.effective_scale(sheet.cols.total_extent(), sheet.rows.total_extent());
        let mut scale = estimate;
        // Lowering the scale for one axis never adds pages on the other
        for (track, paper_extent) in [(&sheet.rows, printable.height), (&sheet.cols, printable.width)] {
            let Some(pages) = settings.fit_pages(track.axis()) else {
                continue;
            };
            if sheet.breaks.get(track.axis()).is_empty() {
                scale = breaks::fit_scale(
                    &track.extents(),
                    paper_extent,
                    pages,
                    scale,
                    PrintSettings::min_scale_factor(),
                );
            }
        }
        if scale < estimate {
            log::debug!("fit-to scale for {} lowered from {estimate} to {scale}", sheet.name);
        }
        let rows = AxisPages::resolve(&sheet.rows, sheet.breaks.get(Axis::Row), printable.height, scale)?;
        let cols = AxisPages::resolve(&sheet.cols, sheet.breaks.get(Axis::Column), printable.width, scale)?;
        Ok(Self {
            sheet: index,
            rows,
            cols,
            order: settings.page_order,
            scale,
            printable,
            first_page_number,
        })
    }

    /// Number of pages (row pages x column pages).
    pub fn page_count(&self) -> usize {
        self.rows.count().saturating_mul(self.cols.count())
    }

    pub fn scale(&self) -> f32 {
        self.scale
    }

    /// Resolved row breaks.
    pub fn row_breaks(&self) -> &[u32] {
        &self.rows.breaks
    }

    /// Resolved column breaks.
    pub fn col_breaks(&self) -> &[u32] {
        &self.cols.breaks
    }

    /// Page `n` (0-based, in print order), or `None` past the end.
    pub fn page(&self, n: usize) -> Option<PageDescriptor> {
        let (row_pages, col_pages) = (self.rows.count(), self.cols.count());
        if n >= self.page_count() {
            return None;
        }
        let (row_page, col_page) = match self.order {
            PageOrder::DownThenOver => (n % row_pages, n / row_pages),
            PageOrder::OverThenDown => (n / col_pages, n % col_pages),
        };
        let (row_range, top, height) = self.rows.page(row_page)?;
        let (col_range, left, width) = self.cols.page(col_page)?;

        let target_rect = Rect::new(
            self.printable.x,
            self.printable.y,
            (width * self.scale).min(self.printable.width),
            (height * self.scale).min(self.printable.height),
        );
        let viewport = Viewport::for_page(left, top, target_rect.width, target_rect.height, self.scale);
        let offset = u32::try_from(n).unwrap_or(u32::MAX);
        Some(PageDescriptor {
            sheet: self.sheet,
            page_number: self.first_page_number.saturating_add(offset),
            row_range,
            col_range,
            target_rect,
            scale: self.scale,
            viewport,
        })
    }

    /// All pages in print order. Can be called repeatedly.
    pub fn pages(&self) -> Pages<'_> {
        Pages {
            paginator: self,
            next: 0,
        }
    }
}

/// Iterator over a paginator's pages.
#[derive(Debug, Clone)]
pub struct Pages<'a> {
    paginator: &'a Paginator,
    next: usize,
}

impl Iterator for Pages<'_> {
    type Item = PageDescriptor;

    fn next(&mut self) -> Option<Self::Item> {
        let page = self.paginator.page(self.next)?;
        self.next += 1;
        Some(page)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let remaining = self.paginator.page_count().saturating_sub(self.next);
        (remaining, Some(remaining))
    }
}

impl ExactSizeIterator for Pages<'_> {}

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
    use crate::print::PageBreakList;

    fn sheet(rows: u32, cols: u32) -> PrintSheet {
        PrintSheet::new(
            "Sheet1",
            HeaderTrack::new(Axis::Row, rows, 20.0),
            HeaderTrack::new(Axis::Column, cols, 100.0),
        )
    }

    #[test]
    fn test_explicit_breaks_page_geometry() {
        let sheet = sheet(10, 6).with_breaks(PageBreakList::new(vec![0, 4, 10], vec![0, 3, 6]));
        let paginator = Paginator::for_sheet(&sheet, &PrintSettings::default()).unwrap();
        assert_eq!(paginator.page_count(), 4);

        let second = paginator.page(1).unwrap();
        assert_eq!(second.page_number, 2);
        assert_eq!((second.row_range.clone(), second.col_range.clone()), (4..10, 0..3));
        assert_eq!(second.viewport.scroll_x, 0.0);
        assert_eq!(second.viewport.scroll_y, 80.0);
        assert_eq!(second.target_rect.height, 120.0);
        assert_eq!(second.target_rect.x, PrintSettings::default().printable_rect().x);
    }

    #[test]
    fn test_pages_restartable() {
        let sheet = sheet(200, 20);
        let paginator = Paginator::for_sheet(&sheet, &PrintSettings::default()).unwrap();
        let first: Vec<_> = paginator.pages().map(|p| p.page_number).collect();
        let second: Vec<_> = paginator.pages().map(|p| p.page_number).collect();
        assert_eq!(first, second);
        assert_eq!(paginator.pages().len(), paginator.page_count());
        assert!(paginator.page(paginator.page_count()).is_none());
    }

    #[test]
    fn test_invalid_explicit_breaks() {
        let sheet = sheet(10, 6).with_breaks(PageBreakList::new(vec![0, 4], vec![]));
        assert!(matches!(
            Paginator::for_sheet(&sheet, &PrintSettings::default()),
            Err(GridError::InvalidBreaks { axis: Axis::Row, .. })
        ));
    }

    #[test]
    fn test_empty_sheet() {
        let mut sheet = sheet(3, 1);
        sheet.cols.set_visible(0, false).unwrap();
        assert!(matches!(
            Paginator::for_sheet(&sheet, &PrintSettings::default()),
            Err(GridError::EmptyContent(name)) if name == "Sheet1"
        ));
    }

    #[test]
    fn test_target_rect_clipped_to_printable() {
        // One 2000px column cannot fit on any page
        let sheet = PrintSheet::new(
            "Wide",
            HeaderTrack::new(Axis::Row, 1, 20.0),
            HeaderTrack::new(Axis::Column, 1, 2000.0),
        );
        let settings = PrintSettings::default();
        let page = Paginator::for_sheet(&sheet, &settings).unwrap().page(0).unwrap();
        assert_eq!(page.target_rect.width, settings.printable_rect().width);
    }
}
