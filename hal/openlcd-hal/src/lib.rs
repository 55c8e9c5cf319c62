//! OpenLCD Hardware Abstraction Layer
//!
//! This crate defines the bus primitive the display driver is written
//! against: a single-byte I2C write that either keeps the bus (repeated
//! start) or releases it with a stop condition. Any `embedded-hal` I2C
//! master can be wrapped into that primitive with the adapters in
//! [`adapter`].
//!
//! # Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────┐
//! │  openlcd-drivers (SerLcd, SerLcdAsync)  │
//! └─────────────────────────────────────────┘
//!                     │
//!                     ▼
//! ┌─────────────────────────────────────────┐
//! │  openlcd-hal (this crate - traits)      │
//! └─────────────────────────────────────────┘
//!                     │
//!         ┌───────────┴───────────┐
//!         ▼                       ▼
//! ┌───────────────┐       ┌───────────────┐
//! │ embedded-hal  │       │ embedded-hal- │
//! │   i2c::I2c    │       │  async I2c    │
//! └───────────────┘       └───────────────┘
//! ```
//!
//! # Traits
//!
//! - [`i2c::I2cBus`] - Blocking single-byte writes
//! - [`i2c::AsyncI2cBus`] - Async single-byte writes

#![no_std]
#![deny(unsafe_code)]

pub mod adapter;
pub mod held;
pub mod i2c;

// Re-export key types at crate root for convenience
pub use adapter::{AsyncI2c, BlockingI2c, BusError};
pub use held::{HeldOverflow, HeldWrite, MAX_HELD_BYTES};
pub use i2c::{AsyncI2cBus, Framing, I2cBus, I2cConfig};
