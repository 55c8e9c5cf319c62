//! Command bytes and the arithmetic behind them

/// Factory default I2C address of the display
pub const DEFAULT_ADDRESS: u8 = 0x72;

/// Prefix announcing a setting command
pub const COMMAND_PREFIX: u8 = 0x7C;

/// Prefix announcing a cursor move (HD44780 "set DDRAM address")
pub const CURSOR_PREFIX: u8 = 0xFE;

/// Position byte for column 0, row 0
pub const CURSOR_BASE: u8 = 0x80;

/// Added to the position byte for the second row
pub const ROW_OFFSET: u8 = 0x40;

/// Highest brightness level per backlight channel
pub const MAX_BACKLIGHT_LEVEL: u8 = 29;

/// Setting command bytes (sent after [`COMMAND_PREFIX`])
pub mod cmd {
    /// Software reset
    pub const RESET: u8 = 0x08;
    /// Clear the display and home the cursor
    pub const CLEAR: u8 = 0x2D;
    /// Enable status messages (persisted by the display)
    pub const SYSTEM_MESSAGES_ON: u8 = 0x2E;
    /// Disable status messages (persisted by the display)
    pub const SYSTEM_MESSAGES_OFF: u8 = 0x2F;
}

/// Command bytes for level 0 of the red, green and blue channels
///
/// Sending all three turns the backlight off.
pub const BACKLIGHT_BASE: [u8; 3] = [0x80, 0x9E, 0xBC];

/// Command bytes for the default (full white) backlight
pub const BACKLIGHT_DEFAULT: [u8; 3] = [0x9D, 0xBB, 0xD9];

/// Compute the cursor position byte
///
/// Only two rows exist: any `row > 0` selects the second one. Columns are
/// not bounds checked; values past 15 address off-screen DDRAM.
pub fn cursor_position(col: u8, row: u8) -> u8 {
    let position = CURSOR_BASE.wrapping_add(col);
    if row > 0 {
        position.wrapping_add(ROW_OFFSET)
    } else {
        position
    }
}

/// Compute the three backlight command bytes for channel levels
///
/// Levels above [`MAX_BACKLIGHT_LEVEL`] are not rejected. They run into the
/// next channel's command range, which the display interprets as it sees fit.
pub fn backlight_levels(red: u8, green: u8, blue: u8) -> [u8; 3] {
    [
        BACKLIGHT_BASE[0].wrapping_add(red),
        BACKLIGHT_BASE[1].wrapping_add(green),
        BACKLIGHT_BASE[2].wrapping_add(blue),
    ]
}
