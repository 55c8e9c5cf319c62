//! OpenLCD I2C Command Protocol
//!
//! This crate encodes the commands understood by the SparkFun SerLCD
//! (OpenLCD firmware) 16x2 RGB character display. It performs no I/O:
//! every driver operation is turned into a [`Sequence`] of bus writes and
//! pauses which a driver replays onto an I2C bus.
//!
//! # Protocol Overview
//!
//! ```text
//! ┌──────────────┬───────────────┬──────────────────────────────┐
//! │ Setting      │ 0x7C, cmd     │ reset, clear, backlight, ... │
//! │ Cursor move  │ 0xFE, 0x80|p  │ p = col, +0x40 for row 1     │
//! │ Character    │ byte          │ shown at the cursor          │
//! └──────────────┴───────────────┴──────────────────────────────┘
//! ```
//!
//! Each byte is written on its own, flagged as either holding the bus for a
//! repeated start or releasing it. The flag pattern per command comes from
//! the vendor's examples and is reproduced exactly.

#![no_std]
#![deny(unsafe_code)]

#[cfg(test)]
extern crate std;

pub mod command;
pub mod sequence;
pub mod text;

pub use command::{
    backlight_levels, cmd, cursor_position, BACKLIGHT_BASE, BACKLIGHT_DEFAULT, COMMAND_PREFIX,
    CURSOR_BASE, CURSOR_PREFIX, DEFAULT_ADDRESS, MAX_BACKLIGHT_LEVEL, ROW_OFFSET,
};
pub use openlcd_hal::Framing;
pub use sequence::{Operation, Sequence, Step, Timing, MAX_SEQUENCE_STEPS};
pub use text::{data_byte, decimal, MAX_DECIMAL_LEN};
