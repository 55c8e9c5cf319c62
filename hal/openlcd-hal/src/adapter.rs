//! Adapters from `embedded-hal` I2C masters
//!
//! Held bytes are collected in a [`HeldWrite`] and flushed as one write
//! when a byte with [`Framing::Stop`] arrives, so a command prefix and its
//! command byte reach the device in a single transfer.
//!
//! ```ignore
//! let bus = BlockingI2c::new(i2c);
//! let mut lcd = SerLcd::new(bus, delay);
//! lcd.init_default()?;
//! ```

use crate::held::HeldWrite;
use crate::i2c::{AsyncI2cBus, Framing, I2cBus};

/// Errors from the adapters
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum BusError<E> {
    /// The underlying I2C master failed
    Bus(E),
    /// Too many bytes written without a stop
    HeldOverflow,
}

/// [`I2cBus`] over a blocking `embedded_hal::i2c::I2c`
pub struct BlockingI2c<I> {
    i2c: I,
    held: HeldWrite,
}

impl<I> BlockingI2c<I>
where
    I: embedded_hal::i2c::I2c,
{
    /// Wrap an I2C master
    pub fn new(i2c: I) -> Self {
        Self {
            i2c,
            held: HeldWrite::new(),
        }
    }

    /// Send any held bytes with a stop
    pub fn flush(&mut self) -> Result<(), BusError<I::Error>> {
        if let Some(address) = self.held.address() {
            let result = self.i2c.write(address, self.held.bytes());
            self.held.clear();
            result.map_err(BusError::Bus)?;
        }
        Ok(())
    }

    /// Give back the I2C master, dropping held bytes
    pub fn release(self) -> I {
        self.i2c
    }
}

impl<I> I2cBus for BlockingI2c<I>
where
    I: embedded_hal::i2c::I2c,
{
    type Error = BusError<I::Error>;

    fn write_byte(&mut self, address: u8, byte: u8, framing: Framing) -> Result<(), Self::Error> {
        if self.held.pending_for_other(address).is_some() {
            self.flush()?;
        }

        if self.held.hold(address, byte).is_err() {
            self.held.clear();
            return Err(BusError::HeldOverflow);
        }

        if framing.is_repeated_start() {
            Ok(())
        } else {
            self.flush()
        }
    }
}

/// [`AsyncI2cBus`] over an `embedded_hal_async::i2c::I2c`
pub struct AsyncI2c<I> {
    i2c: I,
    held: HeldWrite,
}

impl<I> AsyncI2c<I>
where
    I: embedded_hal_async::i2c::I2c,
{
    /// Wrap an async I2C master
    pub fn new(i2c: I) -> Self {
        Self {
            i2c,
            held: HeldWrite::new(),
        }
    }

    /// Send any held bytes with a stop
    pub async fn flush(&mut self) -> Result<(), BusError<I::Error>> {
        if let Some(address) = self.held.address() {
            let result = self.i2c.write(address, self.held.bytes()).await;
            self.held.clear();
            result.map_err(BusError::Bus)?;
        }
        Ok(())
    }

    /// Give back the I2C master, dropping held bytes
    pub fn release(self) -> I {
        self.i2c
    }
}

impl<I> AsyncI2cBus for AsyncI2c<I>
where
    I: embedded_hal_async::i2c::I2c,
{
    type Error = BusError<I::Error>;

    async fn write_byte(
        &mut self,
        address: u8,
        byte: u8,
        framing: Framing,
    ) -> Result<(), Self::Error> {
        if self.held.pending_for_other(address).is_some() {
            self.flush().await?;
        }

        if self.held.hold(address, byte).is_err() {
            self.held.clear();
            return Err(BusError::HeldOverflow);
        }

        if framing.is_repeated_start() {
            Ok(())
        } else {
            self.flush().await
        }
    }
}
