//! OpenLCD demo firmware
//!
//! Drives a SparkFun SerLCD 16x2 RGB display from an RP2040 over I2C0
//! (SDA = GPIO4, SCL = GPIO5, the Qwiic pins on most RP2040 boards).

#![no_std]
#![no_main]

use defmt::*;
use embassy_executor::Spawner;
use embassy_rp::bind_interrupts;
use embassy_rp::i2c::{self, I2c};
use embassy_rp::peripherals::I2C0;
use embassy_time::Delay;
use openlcd_drivers::lcd::SerLcdAsync;
use openlcd_hal::{AsyncI2c, I2cConfig};
use {defmt_rtt as _, panic_probe as _};

mod config;
mod tasks;

bind_interrupts!(struct Irqs {
    I2C0_IRQ => i2c::InterruptHandler<I2C0>;
});

/// Main entry point
#[embassy_executor::main]
async fn main(spawner: Spawner) {
    info!("OpenLCD firmware starting...");

    let p = embassy_rp::init(Default::default());

    let config = config::load_config();

    let mut i2c_config = i2c::Config::default();
    // The display's I2C slave tops out at fast mode
    i2c_config.frequency = config.frequency.min(I2cConfig::FAST.frequency);
    let bus = I2c::new_async(p.I2C0, p.PIN_5, p.PIN_4, Irqs, i2c_config);

    let mut lcd: tasks::Lcd = SerLcdAsync::with_config(AsyncI2c::new(bus), Delay, &config);

    // Reset takes ~3 s with default timing
    match lcd.setup(&config).await {
        Ok(()) => info!("Display at {=u8:#x} ready", lcd.address()),
        Err(e) => error!("Display setup failed: {:?}", e),
    }

    spawner.spawn(tasks::display_task(lcd)).unwrap();
}
