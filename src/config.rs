//! Settings for every part of encore.
//!
//! Defaults live on the schema types; `Settings::load` layers the optional
//! TOML file and `ENCORE__*` environment variables on top.

mod load;
mod schema;

pub use load::default_state_dir;
pub use schema::*;
