//! Board-agnostic core for OpenLCD character displays
//!
//! This crate contains everything that does not depend on a specific bus
//! or board:
//!
//! - Display configuration types and the `display.toml` parser
//! - The character display trait implemented by the drivers

#![no_std]
#![deny(unsafe_code)]

#[cfg(test)]
extern crate std;

pub mod config;
pub mod traits;
