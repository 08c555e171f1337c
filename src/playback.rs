//! The queue/playback state machine.
//!
//! `PlaybackController` is the single owner of the pending queue and of the
//! `Idle`/`Playing` state. It drives an `AudioOutput` and reports what changed
//! as `PlaybackNotice`s; it never renders anything itself.

mod controller;
mod output;
pub mod progress;
mod queue;
mod types;

pub use controller::*;
pub use output::*;
pub use queue::*;
pub use types::*;
