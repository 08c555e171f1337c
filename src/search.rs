//! Search input handling: debouncing keystrokes and ordering responses.

mod debounce;
mod sequence;

pub use debounce::*;
pub use sequence::*;
