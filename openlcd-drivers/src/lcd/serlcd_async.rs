//! SerLCD 16x2 RGB driver (async)
//!
//! Same operations as [`SerLcd`](super::SerLcd), awaiting the bus and the
//! settle times instead of blocking, so an embassy executor keeps running
//! other tasks during the multi-second reset.

use embedded_hal_async::delay::DelayNs;
use openlcd_core::config::{BacklightConfig, LcdConfig};
use openlcd_hal::AsyncI2cBus;
use openlcd_protocol::{data_byte, decimal, Operation, Step, Timing, DEFAULT_ADDRESS};

/// Async SerLCD driver
pub struct SerLcdAsync<B, D> {
    bus: B,
    delay: D,
    address: u8,
    timing: Timing,
}

impl<B, D> SerLcdAsync<B, D>
where
    B: AsyncI2cBus,
    D: DelayNs,
{
    /// Create a driver for a display at the default address
    pub fn new(bus: B, delay: D) -> Self {
        Self {
            bus,
            delay,
            address: DEFAULT_ADDRESS,
            timing: Timing::DEFAULT,
        }
    }

    /// Create a driver using the address and timing from a config
    pub fn with_config(bus: B, delay: D, config: &LcdConfig) -> Self {
        Self {
            bus,
            delay,
            address: config.address,
            timing: config.timing,
        }
    }

    /// Current device address
    pub fn address(&self) -> u8 {
        self.address
    }

    /// Current settle times
    pub fn timing(&self) -> &Timing {
        &self.timing
    }

    /// Replace the settle times
    pub fn set_timing(&mut self, timing: Timing) {
        self.timing = timing;
    }

    /// Give back the bus and delay
    pub fn release(self) -> (B, D) {
        (self.bus, self.delay)
    }

    /// Store the device address and reset the display
    ///
    /// Awaits the power-up and reboot pauses around the reset command.
    pub async fn init(&mut self, address: u8) -> Result<(), B::Error> {
        self.address = address;

        #[cfg(feature = "defmt")]
        defmt::debug!("SerLCD reset at address {=u8:#x}", address);

        self.run(Operation::Reset).await
    }

    /// [`init`](Self::init) at the factory default address 0x72
    pub async fn init_default(&mut self) -> Result<(), B::Error> {
        self.init(DEFAULT_ADDRESS).await
    }

    /// Reset and apply a full configuration
    ///
    /// Order: reset, system message setting (if any), backlight, clear.
    pub async fn setup(&mut self, config: &LcdConfig) -> Result<(), B::Error> {
        self.timing = config.timing;
        self.init(config.address).await?;

        if let Some(enabled) = config.system_messages {
            self.run(Operation::SystemMessages(enabled)).await?;
        }

        self.apply_backlight(config.backlight).await?;
        self.clear().await
    }

    /// Clear the display and move the cursor home
    pub async fn clear(&mut self) -> Result<(), B::Error> {
        self.run(Operation::Clear).await
    }

    /// Show text at the cursor
    ///
    /// Each character goes out as the low byte of its code point.
    pub async fn show_string(&mut self, s: &str) -> Result<(), B::Error> {
        for ch in s.chars() {
            self.run(Operation::Data(data_byte(ch))).await?;
        }
        Ok(())
    }

    /// Show raw character codes at the cursor
    pub async fn show_bytes(&mut self, bytes: &[u8]) -> Result<(), B::Error> {
        for &byte in bytes {
            self.run(Operation::Data(byte)).await?;
        }
        Ok(())
    }

    /// Show a number in decimal at the cursor
    pub async fn show_number(&mut self, n: i32) -> Result<(), B::Error> {
        self.show_string(decimal(n).as_str()).await
    }

    /// Move the cursor to column `col` of row `row`
    pub async fn set_cursor(&mut self, col: u8, row: u8) -> Result<(), B::Error> {
        self.run(Operation::MoveCursor { col, row }).await
    }

    /// Turn on the backlight at default brightness
    pub async fn backlight_on(&mut self) -> Result<(), B::Error> {
        self.run(Operation::BacklightOn).await
    }

    /// Turn off the backlight
    pub async fn backlight_off(&mut self) -> Result<(), B::Error> {
        self.run(Operation::BacklightOff).await
    }

    /// Set the backlight color, 0-29 per channel
    pub async fn backlight_color(&mut self, red: u8, green: u8, blue: u8) -> Result<(), B::Error> {
        #[cfg(feature = "defmt")]
        if red.max(green).max(blue) > openlcd_protocol::MAX_BACKLIGHT_LEVEL {
            defmt::warn!("Backlight level out of range: {} {} {}", red, green, blue);
        }

        self.run(Operation::BacklightColor { red, green, blue }).await
    }

    /// Apply a configured backlight state
    pub async fn apply_backlight(&mut self, backlight: BacklightConfig) -> Result<(), B::Error> {
        match backlight {
            BacklightConfig::On => self.backlight_on().await,
            BacklightConfig::Off => self.backlight_off().await,
            BacklightConfig::Color { red, green, blue } => {
                self.backlight_color(red, green, blue).await
            }
        }
    }

    /// Turn on the display's status messages (remembered by the display)
    pub async fn system_messages_on(&mut self) -> Result<(), B::Error> {
        self.run(Operation::SystemMessages(true)).await
    }

    /// Turn off the display's status messages (remembered by the display)
    pub async fn system_messages_off(&mut self) -> Result<(), B::Error> {
        self.run(Operation::SystemMessages(false)).await
    }

    /// Put one operation on the wire
    async fn run(&mut self, op: Operation) -> Result<(), B::Error> {
        #[cfg(feature = "defmt")]
        defmt::trace!("SerLCD {}", op);

        for step in op.encode(&self.timing).iter() {
            match *step {
                Step::Write { byte, framing } => {
                    self.bus.write_byte(self.address, byte, framing).await?
                }
                Step::Pause(ms) => self.delay.delay_ms(ms).await,
            }
        }
        Ok(())
    }
}
