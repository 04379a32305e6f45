//! Print pagination.
//!
//! This module handles:
//! - Page setup (paper, orientation, margins, scale, fit-to-pages, page order)
//! - Explicit page break validation and automatic splitting
//! - Turning a sheet into an ordered, restartable sequence of pages
//! - Multi-sheet print passes with abort and single-pass exclusivity

pub mod breaks;
mod job;
mod paginator;
mod session;
mod settings;

pub use breaks::{auto_split, fit_scale, PageBreakList};
pub use job::{JobSpec, PrintJob, PrintSheet, SheetSpec};
pub use paginator::{PageDescriptor, Pages, Paginator};
pub use session::{paginate, PageControl, PrintSession, PrintSummary, Printer};
pub use settings::{
    Orientation, PageMargins, PageOrder, PrintSettings, MAX_SCALE_PERCENT, MIN_SCALE_PERCENT,
};
