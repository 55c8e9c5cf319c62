//! Display task
//!
//! Shows a banner on the first row and an uptime counter on the second,
//! refreshed once per second.

use core::fmt::Write as _;

use defmt::*;
use embassy_rp::i2c::{Async, I2c};
use embassy_rp::peripherals::I2C0;
use embassy_time::{Delay, Duration, Ticker};
use heapless::String;
use openlcd_core::traits::{COLUMNS, ROWS};
use openlcd_drivers::lcd::SerLcdAsync;
use openlcd_hal::{AsyncI2c, BusError};

/// The display as wired on this board
pub type Lcd = SerLcdAsync<AsyncI2c<I2c<'static, I2C0, Async>>, Delay>;

type LcdError = BusError<embassy_rp::i2c::Error>;

const BANNER: &str = "OpenLCD ready";

/// Bottom row holds the counter
const UPTIME_ROW: u8 = ROWS - 1;

/// Display task - banner plus uptime counter
#[embassy_executor::task]
pub async fn display_task(mut lcd: Lcd) {
    info!("Display task started");

    if let Err(e) = show_banner(&mut lcd).await {
        warn!("Failed to draw banner: {:?}", e);
    }

    let mut ticker = Ticker::every(Duration::from_secs(1));
    let mut seconds: i32 = 0;

    loop {
        if let Err(e) = show_uptime(&mut lcd, seconds).await {
            warn!("Failed to update uptime: {:?}", e);
        }

        seconds = seconds.wrapping_add(1);
        ticker.next().await;
    }
}

async fn show_banner(lcd: &mut Lcd) -> Result<(), LcdError> {
    lcd.set_cursor(0, 0).await?;
    lcd.show_string(BANNER).await
}

/// Rewrite the bottom row as `Up <n>s`, padded to the full row
async fn show_uptime(lcd: &mut Lcd, seconds: i32) -> Result<(), LcdError> {
    let mut line: String<{ COLUMNS as usize }> = String::new();
    // Cannot overflow: "Up " + 11 digits + "s" fits in 16 columns
    let _ = write!(line, "Up {}s", seconds);
    while line.push(' ').is_ok() {}

    lcd.set_cursor(0, UPTIME_ROW).await?;
    lcd.show_string(&line).await
}
