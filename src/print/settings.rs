//! Page setup: paper, orientation, margins, scale and page order.

use serde::{Deserialize, Serialize};

use crate::layout::Axis;
use crate::types::Rect;

/// Lowest print scale percentage accepted
pub const MIN_SCALE_PERCENT: u32 = 10;
/// Highest print scale percentage accepted
pub const MAX_SCALE_PERCENT: u32 = 400;

const DEFAULT_DPI: f32 = 96.0;

/// Page margins in inches
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PageMargins {
    pub left: f32,
    pub right: f32,
    pub top: f32,
    pub bottom: f32,
    pub header: f32,
    pub footer: f32,
}

impl Default for PageMargins {
    /// Excel's "Normal" margins
    fn default() -> Self {
        Self {
            left: 0.7,
            right: 0.7,
            top: 0.75,
            bottom: 0.75,
            header: 0.3,
            footer: 0.3,
        }
    }
}

/// Page orientation
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum Orientation {
    #[default]
    Portrait,
    Landscape,
}

/// Order in which a sheet's pages are emitted
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum PageOrder {
    /// Walk down a column of pages before moving right (columns outer, rows inner)
    #[default]
    DownThenOver,
    /// Walk across a row of pages before moving down (rows outer, columns inner)
    OverThenDown,
}

/// Print settings for a job
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct PrintSettings {
    /// Paper size code (e.g., 1=Letter, 9=A4)
    pub paper_size: u32,
    /// Page orientation
    pub orientation: Orientation,
    /// Page margins in inches
    pub margins: PageMargins,
    /// Print scale percentage (10-400)
    pub scale: u32,
    /// Number of pages wide to fit to (0 or absent = don't fit)
    pub fit_to_width: Option<u32>,
    /// Number of pages tall to fit to (0 or absent = don't fit)
    pub fit_to_height: Option<u32>,
    /// Page order within each sheet
    pub page_order: PageOrder,
    /// Layout pixels per inch
    pub dpi: f32,
}

impl Default for PrintSettings {
    fn default() -> Self {
        Self {
            paper_size: 1,
            orientation: Orientation::Portrait,
            margins: PageMargins::default(),
            scale: 100,
            fit_to_width: None,
            fit_to_height: None,
            page_order: PageOrder::DownThenOver,
            dpi: DEFAULT_DPI,
        }
    }
}

impl PrintSettings {
    /// Paper dimensions in inches after orientation. Unknown codes print on Letter.
    pub fn paper_inches(&self) -> (f32, f32) {
        let (width, height) = match self.paper_size {
            3 => (11.0, 17.0),   // Tabloid
            5 => (8.5, 14.0),    // Legal
            8 => (11.69, 16.54), // A3
            9 => (8.27, 11.69),  // A4
            11 => (5.83, 8.27),  // A5
            _ => (8.5, 11.0),    // Letter
        };
        match self.orientation {
            Orientation::Portrait => (width, height),
            Orientation::Landscape => (height, width),
        }
    }

    /// Layout pixels per inch, falling back to 96 for unusable values.
    pub fn dpi(&self) -> f32 {
        if self.dpi.is_finite() && self.dpi > 0.0 {
            self.dpi
        } else {
            DEFAULT_DPI
        }
    }

    /// Full paper rectangle in layout pixels.
    pub fn paper_rect(&self) -> Rect {
        let (width, height) = self.paper_inches();
        let dpi = self.dpi();
        Rect::new(0.0, 0.0, width * dpi, height * dpi)
    }

    /// Area inside the margins, in layout pixels.
    pub fn printable_rect(&self) -> Rect {
        let dpi = self.dpi();
        let m = &self.margins;
        let inch = |v: f32| if v.is_finite() { v.max(0.0) * dpi } else { 0.0 };
        self.paper_rect()
            .inset(inch(m.left), inch(m.top), inch(m.right), inch(m.bottom))
    }

    /// Configured scale as a factor, clamped to 10%..400%.
    pub fn scale_factor(&self) -> f32 {
        let percent = self.scale.clamp(MIN_SCALE_PERCENT, MAX_SCALE_PERCENT);
        percent as f32 / 100.0
    }

    /// First estimate of the scale for a sheet whose content measures
    /// `content_width` x `content_height` logical pixels.
    ///
    /// With fit-to-pages set, the configured scale is reduced by the ratio of
    /// printable to content length on that axis, never below the 10% floor.
    /// Whole headers can't fill every page exactly, so the paginator lowers
    /// this further until the split really fits (see [`fit_scale`]).
    ///
    /// [`fit_scale`]: super::breaks::fit_scale
    pub fn effective_scale(&self, content_width: f32, content_height: f32) -> f32 {
        let printable = self.printable_rect();
        let fit = |pages: Option<u32>, paper: f32, content: f32| match pages {
            Some(pages) if pages > 0 && content > 0.0 => Some(paper * pages as f32 / content),
            _ => None,
        };
        [
            fit(self.fit_to_width, printable.width, content_width),
            fit(self.fit_to_height, printable.height, content_height),
        ]
        .into_iter()
        .flatten()
        .fold(self.scale_factor(), f32::min)
        .max(Self::min_scale_factor())
    }

    /// The 10% floor as a factor.
    pub fn min_scale_factor() -> f32 {
        MIN_SCALE_PERCENT as f32 / 100.0
    }

    /// Requested page count along `axis`: `fit_to_height` for rows,
    /// `fit_to_width` for columns. Zero counts as unset.
    pub fn fit_pages(&self, axis: Axis) -> Option<u32> {
        match axis {
            Axis::Row => self.fit_to_height,
            Axis::Column => self.fit_to_width,
        }
        .filter(|&pages| pages > 0)
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
    use test_case::test_case;

    #[test_case(1, (8.5, 11.0) ; "letter")]
    #[test_case(9, (8.27, 11.69) ; "a4")]
    #[test_case(5, (8.5, 14.0) ; "legal")]
    #[test_case(999, (8.5, 11.0) ; "unknown falls back to letter")]
    fn test_paper_sizes(code: u32, expected: (f32, f32)) {
        let settings = PrintSettings {
            paper_size: code,
            ..PrintSettings::default()
        };
        assert_eq!(settings.paper_inches(), expected);
    }

    #[test]
    fn test_landscape_swaps_dimensions() {
        let settings = PrintSettings {
            orientation: Orientation::Landscape,
            ..PrintSettings::default()
        };
        assert_eq!(settings.paper_inches(), (11.0, 8.5));
    }

    #[test]
    fn test_printable_rect() {
        let settings = PrintSettings {
            margins: PageMargins {
                left: 0.5,
                right: 0.5,
                top: 1.0,
                bottom: 1.0,
                ..PageMargins::default()
            },
            ..PrintSettings::default()
        };
        assert_eq!(settings.printable_rect(), Rect::new(48.0, 96.0, 720.0, 864.0));
    }

    #[test_case(100, 1.0)]
    #[test_case(5, 0.1)]
    #[test_case(1000, 4.0)]
    #[test_case(50, 0.5)]
    fn test_scale_factor_clamped(percent: u32, expected: f32) {
        let settings = PrintSettings {
            scale: percent,
            ..PrintSettings::default()
        };
        assert_eq!(settings.scale_factor(), expected);
    }

    #[test]
    fn test_fit_to_width() {
        let settings = PrintSettings {
            margins: PageMargins {
                left: 0.0,
                right: 0.0,
                top: 0.0,
                bottom: 0.0,
                ..PageMargins::default()
            },
            fit_to_width: Some(1),
            ..PrintSettings::default()
        };
        // Letter is 816 px wide at 96 dpi
        assert_eq!(settings.effective_scale(1632.0, 100.0), 0.5);
        // Content already fits: keep the configured scale
        assert_eq!(settings.effective_scale(400.0, 100.0), 1.0);
        // Never below the floor
        assert_eq!(settings.effective_scale(1.0e6, 100.0), 0.1);
    }

    #[test]
    fn test_deserialize_partial() {
        let settings: PrintSettings =
            serde_json::from_str(r#"{ "paperSize": 9, "pageOrder": "overThenDown", "fitToWidth": 0 }"#)
                .unwrap();
        assert_eq!(settings.paper_size, 9);
        assert_eq!(settings.page_order, PageOrder::OverThenDown);
        assert_eq!(settings.scale, 100);
        assert_eq!(settings.effective_scale(1.0e5, 1.0e5), 1.0);
        assert_eq!(settings.fit_pages(Axis::Column), None);
        assert_eq!(settings.fit_pages(Axis::Row), None);
    }
}
