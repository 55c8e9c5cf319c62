//! Configuration types
//!
//! Board-agnostic display configuration, loaded from a small TOML subset.

pub mod parse;
pub mod types;

pub use parse::{parse_config, ParseError};
pub use types::*;
