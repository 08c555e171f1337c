//! `rodio` audio output.
//!
//! The output stream lives on its own thread (`audio::thread`). The rest of
//! the app talks to it through `AudioPlayer` commands and gets `AudioEvent`s
//! back; `RodioOutput` adapts that pair to the controller's `AudioOutput`.

mod output;
mod player;
mod sink;
mod thread;
mod types;

pub use output::*;
pub use player::*;
pub use types::*;
