//! SerLCD 16x2 RGB driver (blocking)
//!
//! The SparkFun SerLCD runs the OpenLCD firmware, which takes characters
//! and setting commands over I2C. This driver provides:
//! - Software reset at a chosen address
//! - Text, raw bytes and decimal numbers at the cursor
//! - Cursor positioning on the two rows
//! - RGB backlight control
//! - The persisted system message setting
//!
//! Every call blocks for the display's settle times (10 ms per character,
//! 25 ms per command, seconds for reset). Nothing is read back from the
//! display and nothing is validated: column and backlight levels outside
//! their ranges go out as corrupt bytes.
//!
//! # Usage
//!
//! ```ignore
//! let mut lcd = SerLcd::new(BlockingI2c::new(i2c), delay);
//! lcd.init(0x72)?;
//! lcd.backlight_color(29, 0, 0)?;
//! lcd.set_cursor(0, 1)?;
//! lcd.show_string("Hello")?;
//! ```

use embedded_hal::delay::DelayNs;
use openlcd_core::config::{BacklightConfig, LcdConfig};
use openlcd_core::traits::CharacterDisplay;
use openlcd_hal::I2cBus;
use openlcd_protocol::{data_byte, decimal, Operation, Step, Timing, DEFAULT_ADDRESS};

/// SerLCD driver
///
/// Owns the bus and delay it was given. The device address is set by
/// [`init`](Self::init); until then writes go to the configured address
/// (0x72 unless built from an [`LcdConfig`]).
pub struct SerLcd<B, D> {
    bus: B,
    delay: D,
    address: u8,
    timing: Timing,
}

impl<B, D> SerLcd<B, D>
where
    B: I2cBus,
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
    /// Waits for the display to power up before the reset and for it to
    /// reboot afterwards (3 s in total with default timing).
    pub fn init(&mut self, address: u8) -> Result<(), B::Error> {
        self.address = address;

        #[cfg(feature = "defmt")]
        defmt::debug!("SerLCD reset at address {=u8:#x}", address);

        self.run(Operation::Reset)
    }

    /// [`init`](Self::init) at the factory default address 0x72
    pub fn init_default(&mut self) -> Result<(), B::Error> {
        self.init(DEFAULT_ADDRESS)
    }

    /// Reset and apply a full configuration
    ///
    /// Order: reset, system message setting (if any), backlight, clear.
    pub fn setup(&mut self, config: &LcdConfig) -> Result<(), B::Error> {
        self.timing = config.timing;
        self.init(config.address)?;

        if let Some(enabled) = config.system_messages {
            self.system_messages(enabled)?;
        }

        self.apply_backlight(config.backlight)?;
        self.clear()
    }

    /// Clear the display and move the cursor home
    pub fn clear(&mut self) -> Result<(), B::Error> {
        self.run(Operation::Clear)
    }

    /// Show text at the cursor
    ///
    /// Each character goes out as the low byte of its code point. No line
    /// wrap or bounds checks; the display decides what overflow looks like.
    pub fn show_string(&mut self, s: &str) -> Result<(), B::Error> {
        for ch in s.chars() {
            self.run(Operation::Data(data_byte(ch)))?;
        }
        Ok(())
    }

    /// Show raw character codes at the cursor
    pub fn show_bytes(&mut self, bytes: &[u8]) -> Result<(), B::Error> {
        for &byte in bytes {
            self.run(Operation::Data(byte))?;
        }
        Ok(())
    }

    /// Show a number in decimal at the cursor
    pub fn show_number(&mut self, n: i32) -> Result<(), B::Error> {
        self.show_string(decimal(n).as_str())
    }

    /// Move the cursor to column `col` of row `row`
    pub fn set_cursor(&mut self, col: u8, row: u8) -> Result<(), B::Error> {
        self.run(Operation::MoveCursor { col, row })
    }

    /// Turn on the backlight at default brightness
    pub fn backlight_on(&mut self) -> Result<(), B::Error> {
        self.run(Operation::BacklightOn)
    }

    /// Turn off the backlight
    pub fn backlight_off(&mut self) -> Result<(), B::Error> {
        self.run(Operation::BacklightOff)
    }

    /// Set the backlight color, 0-29 per channel
    pub fn backlight_color(&mut self, red: u8, green: u8, blue: u8) -> Result<(), B::Error> {
        #[cfg(feature = "defmt")]
        if red.max(green).max(blue) > openlcd_protocol::MAX_BACKLIGHT_LEVEL {
            defmt::warn!("Backlight level out of range: {} {} {}", red, green, blue);
        }

        self.run(Operation::BacklightColor { red, green, blue })
    }

    /// Apply a configured backlight state
    pub fn apply_backlight(&mut self, backlight: BacklightConfig) -> Result<(), B::Error> {
        match backlight {
            BacklightConfig::On => self.backlight_on(),
            BacklightConfig::Off => self.backlight_off(),
            BacklightConfig::Color { red, green, blue } => self.backlight_color(red, green, blue),
        }
    }

    /// Turn on the display's status messages (remembered by the display)
    pub fn system_messages_on(&mut self) -> Result<(), B::Error> {
        self.system_messages(true)
    }

    /// Turn off the display's status messages (remembered by the display)
    pub fn system_messages_off(&mut self) -> Result<(), B::Error> {
        self.system_messages(false)
    }

    fn system_messages(&mut self, enabled: bool) -> Result<(), B::Error> {
        self.run(Operation::SystemMessages(enabled))
    }

    /// Put one operation on the wire
    fn run(&mut self, op: Operation) -> Result<(), B::Error> {
        #[cfg(feature = "defmt")]
        defmt::trace!("SerLCD {}", op);

        for step in op.encode(&self.timing).iter() {
            match *step {
                Step::Write { byte, framing } => {
                    self.bus.write_byte(self.address, byte, framing)?
                }
                Step::Pause(ms) => self.delay.delay_ms(ms),
            }
        }
        Ok(())
    }
}

impl<B, D> CharacterDisplay for SerLcd<B, D>
where
    B: I2cBus,
    D: DelayNs,
{
    type Error = B::Error;

    fn clear(&mut self) -> Result<(), Self::Error> {
        SerLcd::clear(self)
    }

    fn set_cursor(&mut self, col: u8, row: u8) -> Result<(), Self::Error> {
        SerLcd::set_cursor(self, col, row)
    }

    fn print(&mut self, text: &str) -> Result<(), Self::Error> {
        self.show_string(text)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use core::cell::RefCell;
    use embedded_hal::i2c::{ErrorKind, ErrorType, Operation as I2cOperation};
    use heapless::Vec;
    use openlcd_core::traits::DisplayExt;
    use openlcd_hal::{BlockingI2c, Framing};
    use proptest::prelude::*;

    const RS: Framing = Framing::RepeatedStart;
    const STOP: Framing = Framing::Stop;

    #[derive(Debug, Clone, Copy, PartialEq, Eq)]
    enum Event {
        Write(u8, u8, Framing),
        Pause(u32),
        /// One I2C write transaction of `len` bytes
        Transfer(u8, usize),
    }

    type Log = RefCell<Vec<Event, 64>>;

    struct MockBus<'a> {
        log: &'a Log,
        fail: bool,
    }

    impl I2cBus for MockBus<'_> {
        type Error = ();

        fn write_byte(&mut self, address: u8, byte: u8, framing: Framing) -> Result<(), ()> {
            if self.fail {
                return Err(());
            }
            self.log
                .borrow_mut()
                .push(Event::Write(address, byte, framing))
                .map_err(|_| ())
        }
    }

    struct MockDelay<'a> {
        log: &'a Log,
    }

    impl DelayNs for MockDelay<'_> {
        fn delay_ns(&mut self, _ns: u32) {}

        fn delay_ms(&mut self, ms: u32) {
            self.log.borrow_mut().push(Event::Pause(ms)).unwrap();
        }
    }

    /// embedded-hal master behind the real adapter
    struct RecordingI2c<'a> {
        log: &'a Log,
        sent: Vec<u8, 16>,
    }

    impl ErrorType for RecordingI2c<'_> {
        type Error = ErrorKind;
    }

    impl embedded_hal::i2c::I2c for RecordingI2c<'_> {
        fn transaction(
            &mut self,
            address: u8,
            operations: &mut [I2cOperation<'_>],
        ) -> Result<(), ErrorKind> {
            for op in operations.iter() {
                if let I2cOperation::Write(bytes) = op {
                    self.log
                        .borrow_mut()
                        .push(Event::Transfer(address, bytes.len()))
                        .map_err(|_| ErrorKind::Other)?;
                    self.sent
                        .extend_from_slice(bytes)
                        .map_err(|_| ErrorKind::Other)?;
                }
            }
            Ok(())
        }
    }

    fn lcd(log: &Log) -> SerLcd<MockBus<'_>, MockDelay<'_>> {
        SerLcd::new(MockBus { log, fail: false }, MockDelay { log })
    }

    /// Written bytes only
    fn bytes(log: &Log) -> Vec<u8, 64> {
        log.borrow()
            .iter()
            .filter_map(|e| match *e {
                Event::Write(_, byte, _) => Some(byte),
                _ => None,
            })
            .collect()
    }

    /// Pauses only
    fn pauses(log: &Log) -> Vec<u32, 64> {
        log.borrow()
            .iter()
            .filter_map(|e| match *e {
                Event::Pause(ms) => Some(ms),
                _ => None,
            })
            .collect()
    }

    #[test]
    fn test_init_stores_address_and_resets() {
        let log = Log::default();
        let mut lcd = lcd(&log);

        lcd.init(0x3A).unwrap();
        assert_eq!(lcd.address(), 0x3A);
        assert_eq!(
            &log.borrow()[..],
            &[
                Event::Pause(1000),
                Event::Write(0x3A, 0x7C, RS),
                Event::Write(0x3A, 0x08, STOP),
                Event::Pause(25),
                Event::Pause(2000),
            ]
        );
    }

    #[test]
    fn test_default_address_before_init() {
        let log = Log::default();
        let mut lcd = lcd(&log);

        lcd.clear().unwrap();
        assert_eq!(log.borrow()[0], Event::Write(0x72, 0x7C, RS));
    }

    #[test]
    fn test_clear_is_single_command() {
        let log = Log::default();
        lcd(&log).clear().unwrap();

        assert_eq!(
            &log.borrow()[..],
            &[
                Event::Write(0x72, 0x7C, RS),
                Event::Write(0x72, 0x2D, STOP),
                Event::Pause(25),
            ]
        );
    }

    #[test]
    fn test_show_string_writes_each_char() {
        let log = Log::default();
        lcd(&log).show_string("AB").unwrap();

        assert_eq!(
            &log.borrow()[..],
            &[
                Event::Write(0x72, 65, STOP),
                Event::Pause(10),
                Event::Write(0x72, 66, STOP),
                Event::Pause(10),
            ]
        );
    }

    #[test]
    fn test_show_number_matches_show_string() {
        let number_log = Log::default();
        lcd(&number_log).show_number(42).unwrap();

        let string_log = Log::default();
        lcd(&string_log).show_string("42").unwrap();

        assert_eq!(&number_log.borrow()[..], &string_log.borrow()[..]);
    }

    #[test]
    fn test_show_negative_number() {
        let log = Log::default();
        lcd(&log).show_number(-5).unwrap();
        assert_eq!(&bytes(&log)[..], b"-5");
    }

    #[test]
    fn test_show_bytes_passes_codes_through() {
        let log = Log::default();
        lcd(&log).show_bytes(&[0x00, 0xFF]).unwrap();
        assert_eq!(&bytes(&log)[..], &[0x00, 0xFF]);
    }

    #[test]
    fn test_set_cursor_rows() {
        let log = Log::default();
        let mut lcd = lcd(&log);

        lcd.set_cursor(5, 0).unwrap();
        lcd.set_cursor(5, 1).unwrap();
        lcd.set_cursor(5, 7).unwrap();

        assert_eq!(&bytes(&log)[..], &[0xFE, 0x85, 0xFE, 0xC5, 0xFE, 0xC5]);
        assert_eq!(&pauses(&log)[..], &[25, 25, 25]);
    }

    #[test]
    fn test_backlight_color_black_matches_off() {
        let off_log = Log::default();
        lcd(&off_log).backlight_off().unwrap();

        let black_log = Log::default();
        lcd(&black_log).backlight_color(0, 0, 0).unwrap();

        assert_eq!(&off_log.borrow()[..], &black_log.borrow()[..]);
        assert_eq!(&bytes(&off_log)[..], &[0x7C, 0x80, 0x7C, 0x9E, 0x7C, 0xBC]);
    }

    #[test]
    fn test_backlight_on_flag_pattern() {
        let log = Log::default();
        lcd(&log).backlight_on().unwrap();

        let framing: Vec<Framing, 8> = log
            .borrow()
            .iter()
            .filter_map(|e| match *e {
                Event::Write(_, _, framing) => Some(framing),
                _ => None,
            })
            .collect();
        assert_eq!(&framing[..], &[RS, RS, RS, RS, RS, STOP]);
        assert_eq!(&bytes(&log)[..], &[0x7C, 0x9D, 0x7C, 0xBB, 0x7C, 0xD9]);
    }

    #[test]
    fn test_system_messages_bracketed() {
        let log = Log::default();
        let mut lcd = lcd(&log);

        lcd.system_messages_on().unwrap();
        lcd.system_messages_off().unwrap();

        assert_eq!(&bytes(&log)[..], &[0x7C, 0x2E, 0x7C, 0x2F]);
        assert_eq!(&pauses(&log)[..], &[1500, 25, 1500, 1500, 25, 1500]);
    }

    #[test]
    fn test_setup_applies_config() {
        let log = Log::default();
        let mut lcd = lcd(&log);
        let config = LcdConfig {
            address: 0x71,
            system_messages: Some(false),
            backlight: BacklightConfig::Color {
                red: 1,
                green: 2,
                blue: 3,
            },
            timing: Timing::NONE,
            ..LcdConfig::default()
        };

        lcd.setup(&config).unwrap();

        assert_eq!(lcd.address(), 0x71);
        assert!(pauses(&log).is_empty());
        assert_eq!(
            &bytes(&log)[..],
            &[
                0x7C, 0x08, // reset
                0x7C, 0x2F, // system messages off
                0x7C, 0x81, 0x7C, 0xA0, 0x7C, 0xBF, // backlight
                0x7C, 0x2D, // clear
            ]
        );
    }

    #[test]
    fn test_bus_error_stops_operation() {
        let log = Log::default();
        let mut lcd = SerLcd::new(MockBus { log: &log, fail: true }, MockDelay { log: &log });

        assert_eq!(lcd.init(0x72), Err(()));
        // The power-up pause ran, nothing after the failed write
        assert_eq!(&log.borrow()[..], &[Event::Pause(1000)]);
    }

    #[test]
    fn test_print_line_through_display_trait() {
        let log = Log::default();
        let mut lcd = lcd(&log);
        lcd.set_timing(Timing::NONE);

        lcd.print_line(1, "Hi").unwrap();

        let written = bytes(&log);
        assert_eq!(&written[..2], &[0xFE, 0xC0]);
        assert_eq!(&written[2..4], b"Hi");
        assert_eq!(written.len(), 2 + 16);
    }

    #[test]
    fn test_backlight_through_adapter_is_one_transfer() {
        let log = Log::default();
        let bus = BlockingI2c::new(RecordingI2c {
            log: &log,
            sent: Vec::new(),
        });
        let mut lcd = SerLcd::new(bus, MockDelay { log: &log });

        lcd.backlight_on().unwrap();

        // Settles between held commands run before the bus sees anything
        assert_eq!(
            &log.borrow()[..],
            &[
                Event::Pause(25),
                Event::Pause(25),
                Event::Transfer(0x72, 6),
                Event::Pause(25),
            ]
        );

        let (bus, _) = lcd.release();
        assert_eq!(
            &bus.release().sent[..],
            &[0x7C, 0x9D, 0x7C, 0xBB, 0x7C, 0xD9]
        );
    }

    #[test]
    fn test_clear_through_adapter() {
        let log = Log::default();
        let bus = BlockingI2c::new(RecordingI2c {
            log: &log,
            sent: Vec::new(),
        });
        let mut lcd = SerLcd::new(bus, MockDelay { log: &log });

        lcd.init(0x71).unwrap();
        lcd.clear().unwrap();

        assert_eq!(
            &log.borrow()[..],
            &[
                Event::Pause(1000),
                Event::Transfer(0x71, 2),
                Event::Pause(25),
                Event::Pause(2000),
                Event::Transfer(0x71, 2),
                Event::Pause(25),
            ]
        );
    }

    proptest! {
        #[test]
        fn init_targets_any_address(address in 0u8..=0x7F) {
            let log = Log::default();
            let mut lcd = lcd(&log);

            lcd.init(address).unwrap();
            lcd.show_string("x").unwrap();
            lcd.set_cursor(3, 1).unwrap();
            lcd.clear().unwrap();

            prop_assert_eq!(lcd.address(), address);
            let all_writes_target_address = log.borrow().iter().all(|e| match *e {
                Event::Write(a, ..) => a == address,
                _ => true,
            });
            prop_assert!(all_writes_target_address);
        }
    }
}
