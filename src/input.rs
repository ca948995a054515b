//! Input model: modifier keys, keyboard shortcuts, and the gesture state machine.
//!
//! `Modifiers` and `Key` capture the user's intent at the time of an event.
//! `InputState` is the active gesture tracked between pointer-down and
//! pointer-up, carrying the context needed to recompute positions from the
//! gesture origin on every move (never accumulated frame-to-frame).
//! `Shortcut::resolve` maps a key press to an editor command.

#[cfg(test)]
#[path = "input_test.rs"]
mod input_test;

use std::collections::HashMap;

use crate::element::ElementId;
use crate::viewport::Point;

/// Keyboard modifier keys held during an event.
#[allow(clippy::struct_excessive_bools)]
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Modifiers {
    /// Shift key is held.
    pub shift: bool,
    /// Ctrl key is held.
    pub ctrl: bool,
    /// Alt / Option key is held.
    pub alt: bool,
    /// Meta / Command key is held.
    pub meta: bool,
}

impl Modifiers {
    /// Ctrl on Windows/Linux or Cmd on macOS.
    #[must_use]
    pub fn command(self) -> bool {
        self.ctrl || self.meta
    }
}

/// A keyboard key as reported by the browser's `KeyboardEvent.key` (e.g. `"z"`, `"Delete"`).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Key(pub String);

impl Key {
    #[must_use]
    pub fn new(name: &str) -> Self {
        Self(name.to_string())
    }
}

/// Where keyboard focus sits when a key is pressed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum FocusTarget {
    /// Canvas, toolbar or document body: shortcuts apply.
    #[default]
    Canvas,
    /// An input, textarea or content-editable node: shortcuts are suppressed.
    Editable,
}

/// Direction of an arrow-key nudge.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Nudge {
    Left,
    Right,
    Up,
    Down,
}

impl Nudge {
    /// Unit vector in design space (y grows downward).
    #[must_use]
    pub fn unit(self) -> Point {
        match self {
            Self::Left => Point::new(-1.0, 0.0),
            Self::Right => Point::new(1.0, 0.0),
            Self::Up => Point::new(0.0, -1.0),
            Self::Down => Point::new(0.0, 1.0),
        }
    }
}

/// Editor commands reachable from the keyboard.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Shortcut {
    Undo,
    Redo,
    Duplicate,
    Save,
    Group,
    Ungroup,
    Delete,
    /// Move the selection; `large` is the Shift-held step.
    Nudge { direction: Nudge, large: bool },
    ClearSelection,
}

impl Shortcut {
    /// Map a key press to a command. Returns `None` for unbound keys and for
    /// any key pressed while focus is inside editable text.
    #[must_use]
    pub fn resolve(key: &Key, modifiers: Modifiers, focus: FocusTarget) -> Option<Self> {
        if focus == FocusTarget::Editable {
            return None;
        }
        let name = key.0.as_str();

        if modifiers.command() {
            return match name.to_ascii_lowercase().as_str() {
                "z" if modifiers.shift => Some(Self::Redo),
                "z" => Some(Self::Undo),
                "y" => Some(Self::Redo),
                "d" => Some(Self::Duplicate),
                "s" => Some(Self::Save),
                "g" if modifiers.shift => Some(Self::Ungroup),
                "g" => Some(Self::Group),
                _ => None,
            };
        }

        let large = modifiers.shift;
        match name {
            "Delete" | "Backspace" => Some(Self::Delete),
            "Escape" => Some(Self::ClearSelection),
            "ArrowLeft" => Some(Self::Nudge { direction: Nudge::Left, large }),
            "ArrowRight" => Some(Self::Nudge { direction: Nudge::Right, large }),
            "ArrowUp" => Some(Self::Nudge { direction: Nudge::Up, large }),
            "ArrowDown" => Some(Self::Nudge { direction: Nudge::Down, large }),
            _ => None,
        }
    }
}

/// Internal state for the pointer gesture state machine.
///
/// Selection resolution happens synchronously inside pointer-down, so the
/// machine goes straight from `Idle` to `Dragging` or `Resizing`.
#[derive(Debug, Clone, Default)]
pub enum InputState {
    /// No gesture in progress; waiting for the next pointer-down.
    #[default]
    Idle,
    /// The user is moving the selection across the canvas.
    Dragging {
        /// Element whose position drives snapping.
        primary_id: ElementId,
        /// Screen-space pointer position at pointer-down.
        start_screen: Point,
        /// Center of every selected element at pointer-down.
        initial_positions: HashMap<ElementId, Point>,
        /// Whether any pointer-move changed a position.
        moved: bool,
    },
    /// The user is resizing one element by its handle.
    Resizing {
        /// Id of the element being resized.
        id: ElementId,
        /// `width / height` at pointer-down, used for aspect locking.
        start_aspect: f64,
        /// Size at pointer-down.
        start_width: f64,
        start_height: f64,
        /// Whether any pointer-move changed the size.
        moved: bool,
    },
}

impl InputState {
    /// Returns `true` while a drag or resize is in progress.
    #[must_use]
    pub fn is_active(&self) -> bool {
        !matches!(self, Self::Idle)
    }
}
