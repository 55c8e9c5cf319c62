//! Configuration loading
//!
//! The display configuration is compiled in from `display.toml` (already
//! validated by build.rs) and parsed at startup.

use defmt::*;
use openlcd_core::config::{parse_config, LcdConfig};

/// Embedded default configuration (compiled into firmware)
/// Edit display.toml and rebuild to customize
const EMBEDDED_CONFIG: &str = include_str!("../display.toml");

/// Parse the embedded configuration, falling back to defaults
pub fn load_config() -> LcdConfig {
    match parse_config(EMBEDDED_CONFIG) {
        Ok(config) => {
            info!(
                "Display config: addr={=u8:#x}, {} Hz, backlight={}",
                config.address, config.frequency, config.backlight
            );
            config
        }
        Err(e) => {
            error!("Failed to parse embedded config: {:?}", e);
            warn!("Using default display config");
            LcdConfig::default()
        }
    }
}
