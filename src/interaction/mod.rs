//! Pointer-driven interaction state machines.
//!
//! Only one session (resize drag or header range selection) can be active at a
//! time. Exclusivity is enforced by an owned [`Focus`] value handed to each
//! controller, not by global state, so several grids can coexist.

mod command;
mod focus;
mod pointer;
mod resize;
mod select;

pub use command::{CommandLog, HeaderCommand};
pub use focus::{Focus, FocusOwner};
pub use pointer::{CursorHint, PointerButton, PointerEvent, PointerKind};
pub use resize::{ResizeController, ResizeSession};
pub use select::{RangeSelectController, SelectSession};
