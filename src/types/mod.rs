//! Data types shared by the layout, interaction and print modules.

mod geometry;
mod selection;

pub use geometry::*;
pub use selection::*;
