//! Rendering contract with pluggable backends.
//!
//! This module provides:
//! - The per-frame data handed to a backend ([`Frame`], [`GridRenderer`])
//! - Header cell layout and decoration drawn through [`HeaderPainter`]

pub mod backend;
pub mod headers;

pub use backend::{Frame, GridRenderer, ResizePreview};
pub use headers::{
    header_cells, paint_headers, resize_guide_bounds, HeaderCell, HeaderDecoration,
    HeaderPainter, HeaderTone,
};
