//! Configuration type definitions

use openlcd_protocol::DEFAULT_ADDRESS;

pub use openlcd_protocol::Timing;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Backlight state applied after reset
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum BacklightConfig {
    /// Default backlight
    #[default]
    On,
    /// Backlight off
    Off,
    /// Channel levels, 0-29 each
    Color { red: u8, green: u8, blue: u8 },
}

/// Display configuration
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct LcdConfig {
    /// 7-bit I2C address of the display
    pub address: u8,
    /// I2C clock in Hz
    pub frequency: u32,
    /// Status message setting to write, `None` leaves the display's
    /// persisted setting alone
    pub system_messages: Option<bool>,
    /// Backlight after reset
    pub backlight: BacklightConfig,
    /// Settle and guard times
    pub timing: Timing,
}

impl Default for LcdConfig {
    fn default() -> Self {
        Self {
            address: DEFAULT_ADDRESS,
            frequency: 100_000,
            system_messages: None,
            backlight: BacklightConfig::default(),
            timing: Timing::DEFAULT,
        }
    }
}

impl LcdConfig {
    /// Default configuration for a display at `address`
    pub fn with_address(address: u8) -> Self {
        Self {
            address,
            ..Self::default()
        }
    }
}
