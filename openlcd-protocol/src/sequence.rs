//! Operations encoded as bus writes and pauses
//!
//! A [`Sequence`] is everything one driver call puts on the wire, in order:
//!
//! - Data byte: the byte with a stop, then the data settle time
//! - Command: [`COMMAND_PREFIX`] held, the command byte, then the command
//!   settle time
//! - Cursor move: [`CURSOR_PREFIX`] held, the position byte with a stop,
//!   then the cursor settle time
//!
//! Reset and the system message toggles add their own pauses around the
//! command.

use heapless::Vec;
use openlcd_hal::Framing;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::command::{
    backlight_levels, cmd, cursor_position, BACKLIGHT_DEFAULT, COMMAND_PREFIX, CURSOR_PREFIX,
};

/// Longest sequence any operation produces (three commands)
pub const MAX_SEQUENCE_STEPS: usize = 12;

/// Framing of the three backlight commands
const BACKLIGHT_FRAMING: [Framing; 3] = [
    Framing::RepeatedStart,
    Framing::RepeatedStart,
    Framing::Stop,
];

/// Settle and guard times in milliseconds
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Timing {
    /// After each character
    pub data_ms: u32,
    /// After each setting command
    pub command_ms: u32,
    /// After a cursor move
    pub cursor_ms: u32,
    /// Before the reset command (display power-up)
    pub reset_lead_ms: u32,
    /// After the reset command (display reboot)
    pub reset_recovery_ms: u32,
    /// Before and after a persisted setting change
    pub setting_guard_ms: u32,
}

impl Timing {
    /// Timing the display firmware needs
    pub const DEFAULT: Self = Self {
        data_ms: 10,
        command_ms: 25,
        cursor_ms: 25,
        reset_lead_ms: 1000,
        reset_recovery_ms: 2000,
        setting_guard_ms: 1500,
    };

    /// No pauses at all (simulators and tests)
    pub const NONE: Self = Self {
        data_ms: 0,
        command_ms: 0,
        cursor_ms: 0,
        reset_lead_ms: 0,
        reset_recovery_ms: 0,
        setting_guard_ms: 0,
    };
}

impl Default for Timing {
    fn default() -> Self {
        Self::DEFAULT
    }
}

/// One bus action
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Step {
    /// Write a single byte
    Write { byte: u8, framing: Framing },
    /// Wait for the given number of milliseconds
    Pause(u32),
}

/// Steps of one operation
pub type Sequence = Vec<Step, MAX_SEQUENCE_STEPS>;

/// A display operation
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Operation {
    /// Software reset, with power-up and reboot pauses
    Reset,
    /// Clear the display and home the cursor
    Clear,
    /// Show one character at the cursor
    Data(u8),
    /// Move the cursor
    MoveCursor { col: u8, row: u8 },
    /// Default backlight
    BacklightOn,
    /// Backlight off
    BacklightOff,
    /// Backlight channel levels (0-29 each)
    BacklightColor { red: u8, green: u8, blue: u8 },
    /// Enable or disable the display's status messages
    SystemMessages(bool),
}

impl Operation {
    /// Encode this operation for the given timing
    pub fn encode(&self, timing: &Timing) -> Sequence {
        let mut seq = SequenceBuilder::new(timing);

        match *self {
            Operation::Reset => {
                seq.pause(timing.reset_lead_ms);
                seq.command(cmd::RESET, Framing::Stop);
                seq.pause(timing.reset_recovery_ms);
            }
            Operation::Clear => seq.command(cmd::CLEAR, Framing::Stop),
            Operation::Data(byte) => seq.data(byte, Framing::Stop),
            Operation::MoveCursor { col, row } => seq.move_cursor(col, row),
            Operation::BacklightOn => seq.backlight(BACKLIGHT_DEFAULT),
            Operation::BacklightOff => seq.backlight(backlight_levels(0, 0, 0)),
            Operation::BacklightColor { red, green, blue } => {
                seq.backlight(backlight_levels(red, green, blue))
            }
            Operation::SystemMessages(enabled) => {
                let command = if enabled {
                    cmd::SYSTEM_MESSAGES_ON
                } else {
                    cmd::SYSTEM_MESSAGES_OFF
                };
                seq.pause(timing.setting_guard_ms);
                seq.command(command, Framing::Stop);
                seq.pause(timing.setting_guard_ms);
            }
        }

        seq.finish()
    }
}

struct SequenceBuilder<'a> {
    timing: &'a Timing,
    steps: Sequence,
}

impl<'a> SequenceBuilder<'a> {
    fn new(timing: &'a Timing) -> Self {
        Self {
            timing,
            steps: Vec::new(),
        }
    }

    fn push(&mut self, step: Step) {
        // MAX_SEQUENCE_STEPS covers the longest operation
        debug_assert!(self.steps.len() < MAX_SEQUENCE_STEPS);
        let _ = self.steps.push(step);
    }

    fn write(&mut self, byte: u8, framing: Framing) {
        self.push(Step::Write { byte, framing });
    }

    fn pause(&mut self, ms: u32) {
        if ms > 0 {
            self.push(Step::Pause(ms));
        }
    }

    fn data(&mut self, byte: u8, framing: Framing) {
        self.write(byte, framing);
        self.pause(self.timing.data_ms);
    }

    fn command(&mut self, command: u8, framing: Framing) {
        self.write(COMMAND_PREFIX, Framing::RepeatedStart);
        self.write(command, framing);
        self.pause(self.timing.command_ms);
    }

    fn move_cursor(&mut self, col: u8, row: u8) {
        self.write(CURSOR_PREFIX, Framing::RepeatedStart);
        self.write(cursor_position(col, row), Framing::Stop);
        self.pause(self.timing.cursor_ms);
    }

    fn backlight(&mut self, commands: [u8; 3]) {
        for (command, framing) in commands.into_iter().zip(BACKLIGHT_FRAMING) {
            self.command(command, framing);
        }
    }

    fn finish(self) -> Sequence {
        self.steps
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::command::BACKLIGHT_BASE;

    const RS: Framing = Framing::RepeatedStart;
    const STOP: Framing = Framing::Stop;

    fn w(byte: u8, framing: Framing) -> Step {
        Step::Write { byte, framing }
    }

    /// Only the written bytes, in order
    fn bytes(seq: &Sequence) -> Vec<u8, MAX_SEQUENCE_STEPS> {
        seq.iter()
            .filter_map(|step| match *step {
                Step::Write { byte, .. } => Some(byte),
                Step::Pause(_) => None,
            })
            .collect()
    }

    #[test]
    fn test_reset_sequence() {
        let seq = Operation::Reset.encode(&Timing::DEFAULT);
        assert_eq!(
            &seq[..],
            &[
                Step::Pause(1000),
                w(0x7C, RS),
                w(0x08, STOP),
                Step::Pause(25),
                Step::Pause(2000),
            ]
        );
    }

    #[test]
    fn test_clear_is_one_command() {
        let seq = Operation::Clear.encode(&Timing::DEFAULT);
        assert_eq!(&seq[..], &[w(0x7C, RS), w(0x2D, STOP), Step::Pause(25)]);
    }

    #[test]
    fn test_data_byte() {
        let seq = Operation::Data(b'A').encode(&Timing::DEFAULT);
        assert_eq!(&seq[..], &[w(65, STOP), Step::Pause(10)]);
    }

    #[test]
    fn test_move_cursor() {
        let seq = Operation::MoveCursor { col: 3, row: 1 }.encode(&Timing::DEFAULT);
        assert_eq!(&seq[..], &[w(0xFE, RS), w(0xC3, STOP), Step::Pause(25)]);
    }

    #[test]
    fn test_backlight_on_framing() {
        let seq = Operation::BacklightOn.encode(&Timing::DEFAULT);
        assert_eq!(
            &seq[..],
            &[
                w(0x7C, RS),
                w(0x9D, RS),
                Step::Pause(25),
                w(0x7C, RS),
                w(0xBB, RS),
                Step::Pause(25),
                w(0x7C, RS),
                w(0xD9, STOP),
                Step::Pause(25),
            ]
        );
    }

    #[test]
    fn test_backlight_off_bytes() {
        let seq = Operation::BacklightOff.encode(&Timing::DEFAULT);
        assert_eq!(&bytes(&seq)[..], &[0x7C, 0x80, 0x7C, 0x9E, 0x7C, 0xBC]);
    }

    #[test]
    fn test_black_color_matches_backlight_off() {
        let timing = Timing::DEFAULT;
        let black = Operation::BacklightColor {
            red: 0,
            green: 0,
            blue: 0,
        };
        assert_eq!(black.encode(&timing), Operation::BacklightOff.encode(&timing));
    }

    #[test]
    fn test_backlight_color_offsets_each_channel() {
        let seq = Operation::BacklightColor {
            red: 29,
            green: 10,
            blue: 1,
        }
        .encode(&Timing::NONE);
        assert_eq!(
            &bytes(&seq)[..],
            &[
                0x7C,
                BACKLIGHT_BASE[0] + 29,
                0x7C,
                BACKLIGHT_BASE[1] + 10,
                0x7C,
                BACKLIGHT_BASE[2] + 1,
            ]
        );
    }

    #[test]
    fn test_system_messages_guarded() {
        let on = Operation::SystemMessages(true).encode(&Timing::DEFAULT);
        assert_eq!(
            &on[..],
            &[
                Step::Pause(1500),
                w(0x7C, RS),
                w(0x2E, STOP),
                Step::Pause(25),
                Step::Pause(1500),
            ]
        );

        let off = Operation::SystemMessages(false).encode(&Timing::DEFAULT);
        assert_eq!(&bytes(&off)[..], &[0x7C, 0x2F]);
    }

    #[test]
    fn test_no_timing_drops_pauses() {
        let seq = Operation::Reset.encode(&Timing::NONE);
        assert_eq!(&seq[..], &[w(0x7C, RS), w(0x08, STOP)]);
    }

    #[test]
    fn test_longest_sequence_fits() {
        let seq = Operation::BacklightOn.encode(&Timing::DEFAULT);
        assert!(seq.len() <= MAX_SEQUENCE_STEPS);
    }
}
