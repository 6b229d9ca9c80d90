//! Configuration for property sweep grids
//!
//! Provides types and parsing for TOML sweep config files.

pub mod loader;
pub mod schema;

pub use loader::{load_config_file, load_grid, ConfigError};
pub use schema::*;
