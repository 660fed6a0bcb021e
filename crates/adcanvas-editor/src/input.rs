//! Input abstraction layer.
//!
//! Normalizes DOM pointer, wheel and keyboard events into a unified
//! `InputEvent` enum consumed by the canvas editor. Pointer coordinates are
//! viewport-local pixels: relative to the canvas container's top-left corner,
//! before the pan/zoom transform.

/// Keyboard modifier keys held during an event.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Modifiers {
    pub shift: bool,
    pub ctrl: bool,
    pub alt: bool,
    pub meta: bool,
}

impl Modifiers {
    pub const NONE: Modifiers = Modifiers {
        shift: false,
        ctrl: false,
        alt: false,
        meta: false,
    };

    pub const SHIFT: Modifiers = Modifiers {
        shift: true,
        ..Modifiers::NONE
    };

    pub const CMD: Modifiers = Modifiers {
        ctrl: true,
        ..Modifiers::NONE
    };

    /// The platform command key: ⌘ on macOS, Ctrl elsewhere.
    pub fn command(&self) -> bool {
        self.ctrl || self.meta
    }

    /// Whether a click should toggle membership instead of replacing the selection.
    pub fn toggles_selection(&self) -> bool {
        self.shift || self.command()
    }
}

/// Mouse button identifier.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Button {
    #[default]
    Primary,
    Middle,
    Secondary,
}

impl Button {
    /// Map a DOM `MouseEvent.button` value.
    pub fn from_dom(button: i16) -> Self {
        match button {
            1 => Button::Middle,
            2 => Button::Secondary,
            _ => Button::Primary,
        }
    }
}

/// A normalized input event.
#[derive(Debug, Clone, PartialEq)]
pub enum InputEvent {
    /// Pointer pressed.
    PointerDown {
        x: f64,
        y: f64,
        button: Button,
        modifiers: Modifiers,
    },

    /// Pointer moved. Delivered even when outside the canvas while a gesture
    /// is active.
    PointerMove { x: f64, y: f64, modifiers: Modifiers },

    /// Pointer released, possibly outside the canvas.
    PointerUp { x: f64, y: f64, modifiers: Modifiers },

    /// Double click on the canvas.
    DoubleClick { x: f64, y: f64 },

    /// Wheel / trackpad scroll.
    Wheel {
        dx: f64,
        dy: f64,
        modifiers: Modifiers,
    },

    /// Key pressed. `key` is the DOM `KeyboardEvent.key` value.
    KeyDown {
        key: String,
        modifiers: Modifiers,
        repeat: bool,
    },

    /// Key released.
    KeyUp { key: String },
}

impl InputEvent {
    pub fn pointer_down(x: f64, y: f64, modifiers: Modifiers) -> Self {
        Self::PointerDown {
            x,
            y,
            button: Button::Primary,
            modifiers,
        }
    }

    pub fn pointer_move(x: f64, y: f64) -> Self {
        Self::PointerMove {
            x,
            y,
            modifiers: Modifiers::NONE,
        }
    }

    pub fn pointer_up(x: f64, y: f64) -> Self {
        Self::PointerUp {
            x,
            y,
            modifiers: Modifiers::NONE,
        }
    }

    pub fn key(key: &str, modifiers: Modifiers) -> Self {
        Self::KeyDown {
            key: key.to_string(),
            modifiers,
            repeat: false,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn command_key_is_ctrl_or_meta() {
        assert!(Modifiers::CMD.command());
        assert!(
            Modifiers {
                meta: true,
                ..Modifiers::NONE
            }
            .command()
        );
        assert!(!Modifiers::SHIFT.command());
    }

    #[test]
    fn toggle_requires_a_modifier() {
        assert!(!Modifiers::NONE.toggles_selection());
        assert!(Modifiers::SHIFT.toggles_selection());
        assert!(Modifiers::CMD.toggles_selection());
    }

    #[test]
    fn dom_buttons_map_to_roles() {
        assert_eq!(Button::from_dom(0), Button::Primary);
        assert_eq!(Button::from_dom(1), Button::Middle);
        assert_eq!(Button::from_dom(2), Button::Secondary);
    }
}
