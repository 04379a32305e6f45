use serde::{Deserialize, Serialize};

use crate::layout::Axis;

/// Phase of a normalized pointer event
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum PointerKind {
    Down,
    Move,
    Up,
}

/// Mouse button or equivalent
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum PointerButton {
    #[default]
    Primary,
    Secondary,
    Middle,
}

impl PointerButton {
    /// Map a DOM `MouseEvent.button` code
    pub fn from_dom(button: i16) -> Self {
        match button {
            1 => Self::Middle,
            2 => Self::Secondary,
            _ => Self::Primary,
        }
    }
}

/// Pointer event in surface coordinates (screen pixels, origin at the
/// top-left of the surface including header bands).
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PointerEvent {
    pub kind: PointerKind,
    pub x: f32,
    pub y: f32,
    #[serde(default)]
    pub button: PointerButton,
}

impl PointerEvent {
    pub fn down(x: f32, y: f32) -> Self {
        Self {
            kind: PointerKind::Down,
            x,
            y,
            button: PointerButton::Primary,
        }
    }

    pub fn moved(x: f32, y: f32) -> Self {
        Self {
            kind: PointerKind::Move,
            x,
            y,
            button: PointerButton::Primary,
        }
    }

    pub fn up(x: f32, y: f32) -> Self {
        Self {
            kind: PointerKind::Up,
            x,
            y,
            button: PointerButton::Primary,
        }
    }

    #[must_use]
    pub fn with_button(mut self, button: PointerButton) -> Self {
        self.button = button;
        self
    }
}

/// Cursor feedback for the host while hovering or dragging
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum CursorHint {
    #[default]
    Default,
    /// Over a column separator: horizontal resize cursor
    ResizeColumn,
    /// Over a row separator: vertical resize cursor
    ResizeRow,
    /// Over a header body that selects a whole row or column
    SelectHeader,
}

impl CursorHint {
    /// Resize cursor for separators of `axis`
    pub fn resize(axis: Axis) -> Self {
        match axis {
            Axis::Column => Self::ResizeColumn,
            Axis::Row => Self::ResizeRow,
        }
    }

    /// CSS cursor name
    pub fn css(self) -> &'static str {
        match self {
            Self::Default => "default",
            Self::ResizeColumn => "col-resize",
            Self::ResizeRow => "row-resize",
            Self::SelectHeader => "pointer",
        }
    }
}
