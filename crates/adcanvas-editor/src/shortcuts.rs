//! Keyboard shortcut mapping.
//!
//! Maps key + modifier combos to semantic `ShortcutAction`s. The map lives
//! in Rust so the browser host only forwards raw `KeyboardEvent.key` values.
//!
//! ⌘ means Meta on macOS and Ctrl elsewhere; either one is accepted.

use crate::input::Modifiers;

/// Actions that keyboard shortcuts can trigger.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ShortcutAction {
    // ── Edit ──
    Undo,
    Redo,
    Delete,
    SelectAll,
    Duplicate,
    Copy,
    Paste,

    // ── View ──
    ZoomIn,
    ZoomOut,
    ZoomReset,
    PanStart,
    PanEnd,

    // ── UI ──
    /// Cancel a pending connection and clear the selection.
    Deselect,
}

pub struct ShortcutMap;

impl ShortcutMap {
    /// Resolve a keydown to an action.
    ///
    /// `key` is the `KeyboardEvent.key` value (e.g. `"z"`, `"Delete"`).
    /// Returns `None` if the combo has no binding.
    pub fn resolve(key: &str, modifiers: Modifiers) -> Option<ShortcutAction> {
        let cmd = modifiers.command();

        if cmd && modifiers.shift {
            return match key {
                "z" | "Z" => Some(ShortcutAction::Redo),
                _ => None,
            };
        }

        if cmd {
            return match key {
                "z" | "Z" => Some(ShortcutAction::Undo),
                "y" | "Y" => Some(ShortcutAction::Redo),
                "a" | "A" => Some(ShortcutAction::SelectAll),
                "d" | "D" => Some(ShortcutAction::Duplicate),
                "c" | "C" => Some(ShortcutAction::Copy),
                "v" | "V" => Some(ShortcutAction::Paste),
                "=" | "+" => Some(ShortcutAction::ZoomIn),
                "-" => Some(ShortcutAction::ZoomOut),
                "0" => Some(ShortcutAction::ZoomReset),
                _ => None,
            };
        }

        match key {
            "Delete" | "Backspace" => Some(ShortcutAction::Delete),
            "Escape" => Some(ShortcutAction::Deselect),
            " " => Some(ShortcutAction::PanStart),
            _ => None,
        }
    }

    /// Resolve a keyup. Only the pan key has a release action.
    pub fn resolve_release(key: &str) -> Option<ShortcutAction> {
        match key {
            " " => Some(ShortcutAction::PanEnd),
            _ => None,
        }
    }
}
