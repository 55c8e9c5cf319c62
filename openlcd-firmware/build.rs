//! Build script for openlcd-firmware
//!
//! - Sets up linker search paths for memory.x
//! - Validates display.toml at compile time

use std::env;
use std::fs::{self, File};
use std::io::Write;
use std::path::{Path, PathBuf};

/// Highest level per backlight channel
const MAX_BACKLIGHT_LEVEL: i64 = 29;

/// Keys `parse_config` accepts in each section
const DISPLAY_KEYS: &[&str] = &["address", "frequency", "system_messages"];
const BACKLIGHT_KEYS: &[&str] = &["mode", "red", "green", "blue"];
const TIMING_KEYS: &[&str] = &[
    "data_ms",
    "command_ms",
    "cursor_ms",
    "reset_lead_ms",
    "reset_recovery_ms",
    "setting_guard_ms",
];

fn main() {
    setup_linker();
    validate_config();
}

/// Set up linker search paths and scripts
fn setup_linker() {
    let out_dir = PathBuf::from(env::var("OUT_DIR").unwrap());

    // Copy memory.x to the output directory
    let memory_x = include_bytes!("memory.x");
    let mut f = File::create(out_dir.join("memory.x")).unwrap();
    f.write_all(memory_x).unwrap();

    // Tell rustc where to find memory.x
    println!("cargo:rustc-link-search={}", out_dir.display());

    println!("cargo:rustc-link-arg-bins=--nmagic");
    println!("cargo:rustc-link-arg-bins=-Tlink.x");
    println!("cargo:rustc-link-arg-bins=-Tlink-rp.x");
    if env::var_os("CARGO_FEATURE_DEFMT").is_some() {
        println!("cargo:rustc-link-arg-bins=-Tdefmt.x");
    }

    // Re-run if memory.x changes
    println!("cargo:rerun-if-changed=memory.x");
    println!("cargo:rerun-if-changed=build.rs");
}

/// Validate display.toml configuration at compile time
fn validate_config() {
    println!("cargo:rerun-if-changed=display.toml");

    let config_path = Path::new("display.toml");

    let config_content = match fs::read_to_string(config_path) {
        Ok(content) => content,
        Err(e) => {
            panic!(
                "\n\
                ╔══════════════════════════════════════════════════════════════════╗\n\
                ║  ERROR: Failed to read display.toml                              ║\n\
                ║                                                                  ║\n\
                ║  Error: {:<56} ║\n\
                ╚══════════════════════════════════════════════════════════════════╝\n",
                e
            );
        }
    };

    let config: toml::Value = match toml::from_str(&config_content) {
        Ok(value) => value,
        Err(e) => {
            let error_msg = e.to_string();
            panic!(
                "\n\
                ╔══════════════════════════════════════════════════════════════════╗\n\
                ║  ERROR: Invalid TOML syntax in display.toml                      ║\n\
                ╠══════════════════════════════════════════════════════════════════╣\n\
                {}\n\
                ╚══════════════════════════════════════════════════════════════════╝\n",
                format_error_lines(&error_msg)
            );
        }
    };

    let mut errors = Vec::new();
    validate_sections(&config, &mut errors);
    validate_display(&config, &mut errors);
    validate_backlight(&config, &mut errors);
    validate_timing(&config, &mut errors);

    // The firmware reads the file with its own parser; whatever it
    // rejects would silently boot on the default config
    if errors.is_empty() {
        if let Err(e) = openlcd_core::config::parse_config(&config_content) {
            errors.push(format!("firmware config parser rejected the file: {:?}", e));
        }
    }

    if !errors.is_empty() {
        panic!(
            "\n\
            ╔══════════════════════════════════════════════════════════════════╗\n\
            ║  ERROR: Invalid display configuration                            ║\n\
            ╠══════════════════════════════════════════════════════════════════╣\n\
            {}\n\
            ╚══════════════════════════════════════════════════════════════════╝\n",
            errors
                .iter()
                .map(|e| format!("║  • {:<62} ║", e))
                .collect::<Vec<_>>()
                .join("\n")
        );
    }

    println!("cargo:warning=display.toml validated successfully");
}

/// Format error message lines with box drawing
fn format_error_lines(msg: &str) -> String {
    msg.lines()
        .map(|line| {
            let truncated = if line.len() > 64 {
                format!("{}...", &line[..61])
            } else {
                line.to_string()
            };
            format!("║  {:<64} ║", truncated)
        })
        .collect::<Vec<_>>()
        .join("\n")
}

/// Only the sections the firmware parser knows
fn validate_sections(config: &toml::Value, errors: &mut Vec<String>) {
    let Some(table) = config.as_table() else {
        return;
    };

    for (name, value) in table {
        if !["display", "backlight", "timing"].contains(&name.as_str()) {
            errors.push(format!("unknown section [{}]", name));
        } else if !value.is_table() {
            errors.push(format!("[{}] must be a table", name));
        }
    }
}

/// Report keys of `[section]` the firmware parser does not know
fn validate_keys(section: &str, table: &toml::Value, known: &[&str], errors: &mut Vec<String>) {
    let Some(table) = table.as_table() else {
        return;
    };

    for key in table.keys() {
        if !known.contains(&key.as_str()) {
            errors.push(format!("[{}] unknown key '{}'", section, key));
        }
    }
}

fn validate_display(config: &toml::Value, errors: &mut Vec<String>) {
    let Some(display) = config.get("display") else {
        return;
    };
    validate_keys("display", display, DISPLAY_KEYS, errors);

    if let Some(address) = display.get("address") {
        match address.as_integer() {
            // 0x00-0x07 and 0x78-0x7F are reserved I2C addresses
            Some(a) if (0x08..=0x77).contains(&a) => {}
            _ => errors.push("[display] address must be 0x08-0x77".to_string()),
        }
    }

    if let Some(frequency) = display.get("frequency") {
        match frequency.as_integer() {
            Some(f) if (1..=400_000).contains(&f) => {}
            _ => errors.push("[display] frequency must be 1-400000 Hz".to_string()),
        }
    }

    if let Some(value) = display.get("system_messages") {
        if !value.is_bool() {
            errors.push("[display] system_messages must be true or false".to_string());
        }
    }
}

fn validate_backlight(config: &toml::Value, errors: &mut Vec<String>) {
    let Some(backlight) = config.get("backlight") else {
        return;
    };
    validate_keys("backlight", backlight, BACKLIGHT_KEYS, errors);

    if let Some(mode) = backlight.get("mode") {
        match mode.as_str() {
            Some("on" | "off" | "color") => {}
            _ => errors.push("[backlight] mode must be 'on', 'off' or 'color'".to_string()),
        }
    }

    for channel in ["red", "green", "blue"] {
        if let Some(level) = backlight.get(channel) {
            match level.as_integer() {
                Some(l) if (0..=MAX_BACKLIGHT_LEVEL).contains(&l) => {}
                _ => errors.push(format!(
                    "[backlight] {} must be 0-{}",
                    channel, MAX_BACKLIGHT_LEVEL
                )),
            }
        }
    }
}

fn validate_timing(config: &toml::Value, errors: &mut Vec<String>) {
    let Some(timing) = config.get("timing") else {
        return;
    };
    validate_keys("timing", timing, TIMING_KEYS, errors);

    for key in TIMING_KEYS {
        if let Some(value) = timing.get(*key) {
            match value.as_integer() {
                Some(ms) if (0..=60_000).contains(&ms) => {}
                _ => errors.push(format!("[timing] {} must be 0-60000", key)),
            }
        }
    }
}
