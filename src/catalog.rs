//! Catalog client: turns a free-text query into track descriptors.
//!
//! The HTTP client lives in `catalog::client`, the background search thread
//! in `catalog::worker`. Nothing here keeps state between searches.

mod client;
mod error;
mod model;
mod worker;

pub use client::*;
pub use error::*;
pub use model::*;
pub use worker::*;

#[cfg(test)]
mod tests;
