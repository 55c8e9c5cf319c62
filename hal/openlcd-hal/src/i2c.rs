//! I2C bus abstractions
//!
//! The display protocol is expressed as single-byte writes, each tagged
//! with whether the bus is held for a repeated start afterwards.

/// What happens on the bus after a byte has been written
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Framing {
    /// Keep the bus; the next write continues with a repeated start
    RepeatedStart,
    /// Release the bus with a stop condition
    Stop,
}

impl Framing {
    /// Check if the bus is held after the write
    pub const fn is_repeated_start(self) -> bool {
        matches!(self, Framing::RepeatedStart)
    }
}

/// Blocking I2C master, byte at a time
///
/// This is the write primitive the display driver talks to. The driver
/// never reads from the device.
pub trait I2cBus {
    /// Error type for I2C operations
    type Error;

    /// Write one byte to the device at the given address
    ///
    /// # Arguments
    /// * `address` - 7-bit I2C address
    /// * `byte` - Byte to write
    /// * `framing` - Whether to hold the bus afterwards
    fn write_byte(&mut self, address: u8, byte: u8, framing: Framing) -> Result<(), Self::Error>;
}

impl<T: I2cBus + ?Sized> I2cBus for &mut T {
    type Error = T::Error;

    fn write_byte(&mut self, address: u8, byte: u8, framing: Framing) -> Result<(), Self::Error> {
        T::write_byte(self, address, byte, framing)
    }
}

/// Async I2C master, byte at a time
#[allow(async_fn_in_trait)]
pub trait AsyncI2cBus {
    /// Error type for I2C operations
    type Error;

    /// Write one byte to the device at the given address
    async fn write_byte(
        &mut self,
        address: u8,
        byte: u8,
        framing: Framing,
    ) -> Result<(), Self::Error>;
}

impl<T: AsyncI2cBus + ?Sized> AsyncI2cBus for &mut T {
    type Error = T::Error;

    async fn write_byte(
        &mut self,
        address: u8,
        byte: u8,
        framing: Framing,
    ) -> Result<(), Self::Error> {
        T::write_byte(self, address, byte, framing).await
    }
}

/// I2C configuration
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct I2cConfig {
    /// Clock frequency in Hz
    pub frequency: u32,
}

impl Default for I2cConfig {
    fn default() -> Self {
        Self::STANDARD
    }
}

impl I2cConfig {
    /// Standard mode (100 kHz)
    pub const STANDARD: Self = Self { frequency: 100_000 };

    /// Fast mode (400 kHz), the fastest the display accepts
    pub const FAST: Self = Self { frequency: 400_000 };
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_framing_flag() {
        assert!(Framing::RepeatedStart.is_repeated_start());
        assert!(!Framing::Stop.is_repeated_start());
    }

    #[test]
    fn test_default_config_is_standard_mode() {
        assert_eq!(I2cConfig::default().frequency, 100_000);
        assert_eq!(I2cConfig::FAST.frequency, 400_000);
    }
}
