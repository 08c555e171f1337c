//! Application module: the presentation model used by the TUI and runtime.
//!
//! The `App` model lives in `app::model` and holds everything the screen
//! shows; `app::presenter` defines how the core notifies it.

mod model;
mod presenter;

pub use model::*;
pub use presenter::*;

#[cfg(test)]
mod tests;
