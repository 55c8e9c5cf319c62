//! Display abstraction traits
//!
//! These traits define the interface between application code and the
//! display drivers.

pub mod display;

pub use display::{CharacterDisplay, DisplayExt, COLUMNS, ROWS};
