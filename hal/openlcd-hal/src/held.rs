//! Bytes written while the bus is held
//!
//! `embedded-hal` masters have no "write a byte and keep the bus" call.
//! Bytes written with [`Framing::RepeatedStart`](crate::Framing) are
//! collected here and go out as one transfer when a byte with a stop
//! arrives.

use heapless::Vec;

/// Longest run of held bytes the display protocol produces
/// (three backlight commands: five held bytes and the final one).
pub const MAX_HELD_BYTES: usize = 8;

/// Held bytes exceeded [`MAX_HELD_BYTES`]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct HeldOverflow;

/// A transfer being assembled for a single device
#[derive(Debug, Clone, Default)]
pub struct HeldWrite {
    address: Option<u8>,
    bytes: Vec<u8, MAX_HELD_BYTES>,
}

impl HeldWrite {
    /// Create an empty transfer
    pub const fn new() -> Self {
        Self {
            address: None,
            bytes: Vec::new(),
        }
    }

    /// Append a byte for `address`
    pub fn hold(&mut self, address: u8, byte: u8) -> Result<(), HeldOverflow> {
        self.bytes.push(byte).map_err(|_| HeldOverflow)?;
        self.address = Some(address);
        Ok(())
    }

    /// Address of a pending transfer that targets a different device
    pub fn pending_for_other(&self, address: u8) -> Option<u8> {
        self.address.filter(|&held| held != address)
    }

    /// Address of the pending transfer, if any
    pub fn address(&self) -> Option<u8> {
        self.address
    }

    /// Bytes collected so far
    pub fn bytes(&self) -> &[u8] {
        &self.bytes
    }

    /// Check if nothing is held
    pub fn is_empty(&self) -> bool {
        self.bytes.is_empty()
    }

    /// Drop the pending transfer
    pub fn clear(&mut self) {
        self.bytes.clear();
        self.address = None;
    }
}
