//! Text to data bytes
//!
//! The display has no character-set handling on our side: a character is
//! sent as the low byte of its code point.

use core::fmt::Write;
use heapless::String;

/// Longest decimal rendering of an `i32` ("-2147483648")
pub const MAX_DECIMAL_LEN: usize = 11;

/// Data byte for a character
pub fn data_byte(ch: char) -> u8 {
    (ch as u32 & 0xFF) as u8
}

/// Render an integer in decimal
pub fn decimal(n: i32) -> String<MAX_DECIMAL_LEN> {
    let mut s = String::new();
    // Cannot fail: every i32 fits in MAX_DECIMAL_LEN bytes
    let _ = write!(s, "{}", n);
    s
}
