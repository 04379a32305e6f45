//! Print passes over a whole job.
//!
//! A [`Printer`] allows one pass at a time. The pass walks the job's sheets in
//! order, skipping sheets with nothing to print, and yields pages lazily so a
//! caller can stop between any two pages.

use std::cell::Cell;
use std::rc::Rc;

use serde::Serialize;

use super::{PageDescriptor, Paginator, PrintJob};
use crate::error::{GridError, Result};
use crate::render::{Frame, GridRenderer};

/// What the page callback wants next.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PageControl {
    Continue,
    /// Stop the pass after this page
    Abort,
}

/// Outcome of a print pass
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PrintSummary {
    pub pages_printed: u32,
    pub sheets_skipped: u32,
    pub aborted: bool,
}

/// Entry point for print passes. Clones share the same "printing" state.
#[derive(Debug, Clone, Default)]
pub struct Printer {
    active: Rc<Cell<bool>>,
}

impl Printer {
    pub fn new() -> Self {
        Self::default()
    }

    /// True while a pass started by this printer (or a clone) is alive.
    pub fn is_printing(&self) -> bool {
        self.active.get()
    }

    /// Start a pass over `job`. The pass ends when the session is dropped.
    ///
    /// # Errors
    /// `AlreadyPrinting` if another pass is still alive.
    pub fn begin<'j>(&self, job: &'j PrintJob) -> Result<PrintSession<'j>> {
        if self.active.replace(true) {
            log::warn!("print requested while a print pass is active");
            return Err(GridError::AlreadyPrinting);
        }
        log::debug!("print pass started: {} sheets", job.sheets.len());
        Ok(PrintSession {
            job,
            active: Rc::clone(&self.active),
            next_sheet: 0,
            current: None,
            next_page_number: 1,
            sheets_skipped: 0,
        })
    }

    /// Run a full pass, handing every page and its frame to `on_page`.
    ///
    /// # Errors
    /// `AlreadyPrinting`, or the first sheet error other than empty content.
    pub fn print<F>(&self, job: &PrintJob, mut on_page: F) -> Result<PrintSummary>
    where
        F: FnMut(&PageDescriptor, &Frame<'_>) -> PageControl,
    {
        let mut session = self.begin(job)?;
        let mut summary = PrintSummary::default();
        for page in session.by_ref() {
            let page = page?;
            let Some(frame) = job.frame(&page) else {
                continue;
            };
            let control = on_page(&page, &frame);
            summary.pages_printed = summary.pages_printed.saturating_add(1);
            if control == PageControl::Abort {
                log::info!("print aborted after page {}", page.page_number);
                summary.aborted = true;
                break;
            }
        }
        summary.sheets_skipped = session.sheets_skipped();
        log::debug!(
            "print pass finished: {} pages, {} sheets skipped",
            summary.pages_printed,
            summary.sheets_skipped
        );
        Ok(summary)
    }

    /// Run a full pass drawing every page with `renderer`.
    pub fn render_job(&self, job: &PrintJob, renderer: &mut dyn GridRenderer) -> Result<PrintSummary> {
        self.print(job, |_, frame| {
            renderer.render_frame(frame);
            PageControl::Continue
        })
    }
}

/// An active print pass. Yields pages across all sheets in job order.
#[derive(Debug)]
pub struct PrintSession<'j> {
    job: &'j PrintJob,
    active: Rc<Cell<bool>>,
    next_sheet: usize,
    current: Option<(Paginator, usize)>,
    next_page_number: u32,
    sheets_skipped: u32,
}

impl PrintSession<'_> {
    /// Sheets skipped so far for having no content.
    pub fn sheets_skipped(&self) -> u32 {
        self.sheets_skipped
    }
}

impl Iterator for PrintSession<'_> {
    type Item = Result<PageDescriptor>;

    fn next(&mut self) -> Option<Self::Item> {
        // Every round either yields, fails or consumes a sheet
        for _ in 0..=self.job.sheets.len() {
            if let Some((paginator, cursor)) = self.current.as_mut() {
                if let Some(page) = paginator.page(*cursor) {
                    *cursor += 1;
                    return Some(Ok(page));
                }
                self.current = None;
            }

            let index = self.next_sheet;
            let sheet = self.job.sheets.get(index)?;
            self.next_sheet += 1;
            match Paginator::for_job_sheet(index, sheet, &self.job.settings, self.next_page_number) {
                Ok(paginator) => {
                    let count = u32::try_from(paginator.page_count()).unwrap_or(u32::MAX);
                    self.next_page_number = self.next_page_number.saturating_add(count);
                    self.current = Some((paginator, 0));
                }
                Err(GridError::EmptyContent(name)) => {
                    log::debug!("skipping sheet '{name}': nothing to print");
                    self.sheets_skipped = self.sheets_skipped.saturating_add(1);
                }
                Err(err) => {
                    // Fail once, then end the pass
                    self.next_sheet = self.job.sheets.len();
                    return Some(Err(err));
                }
            }
        }
        None
    }
}

impl Drop for PrintSession<'_> {
    fn drop(&mut self) {
        self.active.set(false);
    }
}

/// Every page of `job` in print order.
///
/// # Errors
/// `InvalidBreaks` for a sheet with malformed explicit breaks.
pub fn paginate(job: &PrintJob) -> Result<Vec<PageDescriptor>> {
    Printer::new().begin(job)?.collect()
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
    use crate::layout::{Axis, HeaderTrack};
    use crate::print::{PageBreakList, PrintSettings, PrintSheet};

    fn sheet(name: &str, rows: u32, cols: u32) -> PrintSheet {
        PrintSheet::new(
            name,
            HeaderTrack::new(Axis::Row, rows, 20.0),
            HeaderTrack::new(Axis::Column, cols, 100.0),
        )
        .with_breaks(PageBreakList::new(vec![0, rows], vec![0, cols]))
    }

    #[test]
    fn test_session_releases_on_drop() {
        let job = PrintJob::new(vec![sheet("A", 2, 2)], PrintSettings::default());
        let printer = Printer::new();
        {
            let _session = printer.begin(&job).unwrap();
            assert!(printer.is_printing());
            assert!(matches!(printer.begin(&job), Err(GridError::AlreadyPrinting)));
        }
        assert!(!printer.is_printing());
        assert!(printer.begin(&job).is_ok());
    }

    #[test]
    fn test_empty_sheets_skipped() {
        let job = PrintJob::new(
            vec![sheet("Empty", 0, 0), sheet("A", 2, 2), sheet("Blank", 3, 0), sheet("B", 1, 1)],
            PrintSettings::default(),
        );
        let pages = paginate(&job).unwrap();
        let sheets: Vec<usize> = pages.iter().map(|p| p.sheet).collect();
        assert_eq!(sheets, vec![1, 3]);
        assert_eq!(pages[1].page_number, 2);

        let summary = Printer::new().print(&job, |_, _| PageControl::Continue).unwrap();
        assert_eq!(summary.sheets_skipped, 2);
        assert_eq!(summary.pages_printed, 2);
    }

    #[test]
    fn test_all_sheets_empty() {
        let job = PrintJob::new(vec![sheet("E1", 0, 3), sheet("E2", 2, 0)], PrintSettings::default());
        assert!(paginate(&job).unwrap().is_empty());
    }

    #[test]
    fn test_abort_between_pages() {
        let job = PrintJob::new(vec![sheet("A", 2, 2), sheet("B", 2, 2)], PrintSettings::default());
        let printer = Printer::new();
        let summary = printer.print(&job, |_, _| PageControl::Abort).unwrap();
        assert!(summary.aborted);
        assert_eq!(summary.pages_printed, 1);
        assert!(!printer.is_printing());
    }

    #[test]
    fn test_reentrant_print_rejected() {
        let job = PrintJob::new(vec![sheet("A", 2, 2)], PrintSettings::default());
        let printer = Printer::new();
        let inner = printer.clone();
        let mut nested = None;
        printer
            .print(&job, |_, _| {
                nested = Some(inner.print(&job, |_, _| PageControl::Continue));
                PageControl::Continue
            })
            .unwrap();
        assert!(matches!(nested, Some(Err(GridError::AlreadyPrinting))));
    }

    #[test]
    fn test_error_ends_pass() {
        let bad = sheet("Bad", 4, 2).with_breaks(PageBreakList::new(vec![0, 9], vec![]));
        let job = PrintJob::new(vec![sheet("A", 2, 2), bad, sheet("C", 2, 2)], PrintSettings::default());
        let mut session = Printer::new().begin(&job).unwrap();
        assert!(session.next().unwrap().is_ok());
        assert!(matches!(session.next(), Some(Err(GridError::InvalidBreaks { .. }))));
        assert!(session.next().is_none());
    }
}
