//! Terminal input module.
//!
//! Maps `crossterm` events into [`crate::types::GameCommand`]. Every command is discrete
//! (one key press, one command), so there is no auto-repeat handling here; terminals that
//! report key releases or repeats have those filtered out.

pub mod map;

pub use blockfall_types as types;

pub use map::{classify, handle_key_event, should_quit, InputEvent};
