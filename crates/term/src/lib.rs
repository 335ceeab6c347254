//! Terminal presentation for blockfall.
//!
//! Renders into a simple framebuffer that is diffed and flushed to the terminal, rather
//! than going through a widget toolkit.
//!
//! - [`model`]: screen state rebuilt from presenter calls
//! - [`view`]: pure model-to-framebuffer rendering
//! - [`renderer`]: crossterm output with run-length diffs
//! - [`presenter`]: ties the three together behind `blockfall_core::Presenter`
//! - [`audio`]: background music and sound effect backends

pub mod audio;
pub mod fb;
pub mod model;
pub mod presenter;
pub mod renderer;
pub mod view;

pub use blockfall_core as core;
pub use blockfall_types as types;

pub use audio::{AudioService, MusicCall, RodioAudio, Sfx, Silent};
pub use fb::{Cell, CellStyle, FrameBuffer, Rgb};
pub use model::FieldModel;
pub use presenter::TerminalPresenter;
pub use renderer::{encode_diff_into, encode_full_into, TerminalRenderer};
pub use view::{FieldView, Viewport};
