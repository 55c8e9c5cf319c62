//! Parser for `display.toml`
//!
//! A minimal line-based parser for the subset of TOML the display
//! configuration uses. It does NOT support the full TOML spec.
//!
//! Supported features:
//! - `[display]`, `[backlight]` and `[timing]` section headers
//! - Key = value pairs (string, integer, boolean)
//! - Hex, octal and binary integers (`0x72`) and digit separators (`100_000`)
//! - Basic (`"..."`) and literal (`'...'`) strings
//! - Comments (# ...), also after section headers
//!
//! ```toml
//! [display]
//! address = 0x72
//! frequency = 100_000
//! system_messages = false
//!
//! [backlight]
//! mode = "color"
//! red = 29
//! green = 10
//! blue = 0
//! ```

use super::types::{BacklightConfig, LcdConfig};

/// Parse error
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum ParseError {
    /// Unknown section header
    InvalidSection,
    /// Value has the wrong type or is out of range
    InvalidValue,
    /// Key not valid in its section
    UnknownKey,
}

/// Current parsing context
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Section {
    Root,
    Display,
    Backlight,
    Timing,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum BacklightMode {
    On,
    Off,
    Color,
}

/// Backlight keys seen so far; resolved once the whole file is read
#[derive(Debug, Default)]
struct BacklightDraft {
    mode: Option<BacklightMode>,
    red: Option<u8>,
    green: Option<u8>,
    blue: Option<u8>,
}

impl BacklightDraft {
    fn has_levels(&self) -> bool {
        self.red.is_some() || self.green.is_some() || self.blue.is_some()
    }

    fn finish(self, fallback: BacklightConfig) -> BacklightConfig {
        match self.mode {
            Some(BacklightMode::On) => BacklightConfig::On,
            Some(BacklightMode::Off) => BacklightConfig::Off,
            Some(BacklightMode::Color) => self.color(),
            None if self.has_levels() => self.color(),
            None => fallback,
        }
    }

    fn color(&self) -> BacklightConfig {
        BacklightConfig::Color {
            red: self.red.unwrap_or(0),
            green: self.green.unwrap_or(0),
            blue: self.blue.unwrap_or(0),
        }
    }
}

/// Parse TOML configuration into LcdConfig
///
/// Keys that are not present keep their [`LcdConfig::default`] values.
pub fn parse_config(input: &str) -> Result<LcdConfig, ParseError> {
    let mut config = LcdConfig::default();
    let mut section = Section::Root;
    let mut backlight = BacklightDraft::default();

    for line in input.lines() {
        let line = line.trim();

        // Skip empty lines and comments
        if line.is_empty() || line.starts_with('#') {
            continue;
        }

        if line.starts_with('[') {
            let header = strip_comment(line)
                .strip_prefix('[')
                .and_then(|h| h.strip_suffix(']'))
                .ok_or(ParseError::InvalidSection)?;
            section = parse_section_header(header)?;
            continue;
        }

        if let Some((key, value)) = parse_key_value(line) {
            apply_value(section, key, value, &mut config, &mut backlight)?;
        }
    }

    config.backlight = backlight.finish(config.backlight);
    Ok(config)
}

fn parse_section_header(header: &str) -> Result<Section, ParseError> {
    match header.trim() {
        "display" => Ok(Section::Display),
        "backlight" => Ok(Section::Backlight),
        "timing" => Ok(Section::Timing),
        _ => Err(ParseError::InvalidSection),
    }
}

fn apply_value(
    section: Section,
    key: &str,
    value: &str,
    config: &mut LcdConfig,
    backlight: &mut BacklightDraft,
) -> Result<(), ParseError> {
    match section {
        Section::Root => return Err(ParseError::UnknownKey),
        Section::Display => match key {
            "address" => config.address = parse_int(value)?,
            "frequency" => config.frequency = parse_int(value)?,
            "system_messages" => config.system_messages = Some(parse_bool(value)?),
            _ => return Err(ParseError::UnknownKey),
        },
        Section::Backlight => match key {
            "mode" => backlight.mode = Some(parse_backlight_mode(value)?),
            "red" => backlight.red = Some(parse_int(value)?),
            "green" => backlight.green = Some(parse_int(value)?),
            "blue" => backlight.blue = Some(parse_int(value)?),
            _ => return Err(ParseError::UnknownKey),
        },
        Section::Timing => {
            let timing = &mut config.timing;
            let field = match key {
                "data_ms" => &mut timing.data_ms,
                "command_ms" => &mut timing.command_ms,
                "cursor_ms" => &mut timing.cursor_ms,
                "reset_lead_ms" => &mut timing.reset_lead_ms,
                "reset_recovery_ms" => &mut timing.reset_recovery_ms,
                "setting_guard_ms" => &mut timing.setting_guard_ms,
                _ => return Err(ParseError::UnknownKey),
            };
            *field = parse_int(value)?;
        }
    }
    Ok(())
}

/// Parse key = value line
fn parse_key_value(line: &str) -> Option<(&str, &str)> {
    let eq_pos = line.find('=')?;
    let key = line[..eq_pos].trim();
    let value = strip_comment(&line[eq_pos + 1..]);

    if key.is_empty() || value.is_empty() {
        return None;
    }

    Some((key, value))
}

/// Cut a trailing `# comment`, ignoring `#` inside quoted strings
fn strip_comment(text: &str) -> &str {
    let mut quote = None;
    for (i, ch) in text.char_indices() {
        match (quote, ch) {
            (None, '"' | '\'') => quote = Some(ch),
            (Some(q), _) if ch == q => quote = None,
            (None, '#') => return text[..i].trim(),
            _ => {}
        }
    }
    text.trim()
}

/// Parse a string value (removes `"` or `'` quotes)
fn parse_string(value: &str) -> &str {
    for quote in ['"', '\''] {
        if let Some(inner) = value
            .strip_prefix(quote)
            .and_then(|v| v.strip_suffix(quote))
        {
            return inner;
        }
    }
    // Allow unquoted strings for simple values
    value
}

/// Parse a TOML integer (decimal, `0x`, `0o` or `0b`), allowing `_` separators
fn parse_int<T: TryFrom<u32>>(value: &str) -> Result<T, ParseError> {
    let (digits, radix) = if let Some(hex) = value.strip_prefix("0x") {
        (hex, 16)
    } else if let Some(oct) = value.strip_prefix("0o") {
        (oct, 8)
    } else if let Some(bin) = value.strip_prefix("0b") {
        (bin, 2)
    } else {
        (value.strip_prefix('+').unwrap_or(value), 10)
    };

    if digits.is_empty() || digits.starts_with('_') {
        return Err(ParseError::InvalidValue);
    }

    let mut n: u32 = 0;
    for ch in digits.chars().filter(|&ch| ch != '_') {
        let digit = ch.to_digit(radix).ok_or(ParseError::InvalidValue)?;
        n = n
            .checked_mul(radix)
            .and_then(|n| n.checked_add(digit))
            .ok_or(ParseError::InvalidValue)?;
    }

    T::try_from(n).map_err(|_| ParseError::InvalidValue)
}

/// Parse a boolean value
fn parse_bool(value: &str) -> Result<bool, ParseError> {
    match value {
        "true" => Ok(true),
        "false" => Ok(false),
        _ => Err(ParseError::InvalidValue),
    }
}

/// Parse backlight mode
fn parse_backlight_mode(value: &str) -> Result<BacklightMode, ParseError> {
    match parse_string(value) {
        "on" | "On" => Ok(BacklightMode::On),
        "off" | "Off" => Ok(BacklightMode::Off),
        "color" | "colour" | "Color" => Ok(BacklightMode::Color),
        _ => Err(ParseError::InvalidValue),
    }
}
