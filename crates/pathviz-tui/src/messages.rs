//! Input events: [`Msg`], [`Key`], [`MouseAction`].

use pathviz_core::Pos;

/// A keyboard key.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Key {
    ArrowUp,
    ArrowDown,
    ArrowLeft,
    ArrowRight,
    Escape,
    Enter,
    Space,
    Backspace,
    Delete,
    /// A printable character.
    Char(char),
}

/// A mouse action. Held-button drags report the button again so that
/// painting follows the pointer.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum MouseAction {
    /// Primary (left) button pressed or dragged.
    Main,
    /// Secondary (right) button pressed or dragged.
    Secondary,
    /// Button released.
    Release,
    /// Mouse moved with no button held.
    Move,
}

/// An input message delivered to the model.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Msg {
    /// A key was pressed.
    KeyDown { key: Key },
    /// A mouse event at a terminal cell (row = line, col = column).
    Mouse { action: MouseAction, pos: Pos },
    /// The terminal was resized.
    Screen { width: i32, height: i32 },
    /// Sent at the fixed tick rate; drives animation.
    Tick,
    /// Sent once when the application starts.
    Init,
    /// Request to quit.
    Quit,
}

impl Msg {
    /// Convenience: a `KeyDown` message.
    pub fn key(key: Key) -> Self {
        Self::KeyDown { key }
    }

    /// Convenience: a `Mouse` message.
    pub fn mouse(action: MouseAction, row: i32, col: i32) -> Self {
        Self::Mouse {
            action,
            pos: Pos::new(row, col),
        }
    }
}
