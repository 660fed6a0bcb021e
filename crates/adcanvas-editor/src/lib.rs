//! Interaction engine for the ad canvas.
//!
//! | Module | Role |
//! |--------|------|
//! | [`input`] | normalized pointer, wheel and key events |
//! | [`drag`] | press/drag/click state machine with parent clamping |
//! | [`selection`] | click, toggle, marquee, bulk-edit panel |
//! | [`connect`] | pending-connection state machine and committed edges |
//! | [`history`] | snapshot undo/redo |
//! | [`clipboard`] | copy, paste, duplicate |
//! | [`shortcuts`] | key combo → action |
//! | [`events`] | notices and change events for the host |
//! | [`canvas`] | `CanvasEditor`, which owns and wires all of the above |

pub mod canvas;
pub mod clipboard;
pub mod connect;
pub mod drag;
pub mod events;
pub mod history;
pub mod input;
pub mod selection;
pub mod shortcuts;

pub use canvas::CanvasEditor;
pub use events::{EditorEvent, Notice, NoticeLevel};
pub use input::{Button, InputEvent, Modifiers};
