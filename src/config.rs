/// External configuration loader.
///
/// Reads the glyph/timing configuration named on the command line.
/// `.toml` files are parsed as TOML, anything else as JSON. Glyphs are
/// required, timing keys fall back to defaults. A missing or malformed
/// file is fatal.

use std::path::Path;
use std::time::Duration;

use serde::Deserialize;

use crate::error::{GameError, Result};

// ── Public Config Struct ──

#[derive(Clone, Debug, Deserialize, PartialEq, Eq)]
pub struct GameConfig {
    pub player: String,
    pub ghost: String,
    pub wall: String,
    pub dot: String,
    pub pill: String,
    pub death: String,
    pub space: String,
    #[serde(default)]
    pub use_emoji: bool,
    /// Glyph for an empowered adversary.
    pub ghost_blue: String,
    #[serde(default = "default_pill_duration")]
    pub pill_duration_secs: u64,
    #[serde(default = "default_tick_ms")]
    pub tick_ms: u64,
    #[serde(default = "default_death_pause_ms")]
    pub death_pause_ms: u64,
}

// ── Defaults ──

fn default_pill_duration() -> u64 { 10 }
fn default_tick_ms() -> u64 { 200 }
fn default_death_pause_ms() -> u64 { 1000 }

// ── Loading ──

impl GameConfig {
    pub fn load(path: &Path) -> Result<Self> {
        let text = std::fs::read_to_string(path).map_err(|source| GameError::Config {
            path: path.to_path_buf(),
            source,
        })?;

        let is_toml = path.extension().is_some_and(|ext| ext.eq_ignore_ascii_case("toml"));
        let parsed = if is_toml { Self::from_toml(&text) } else { Self::from_json(&text) };

        let config = parsed.map_err(|reason| GameError::ConfigFormat {
            path: path.to_path_buf(),
            reason,
        })?;
        log::info!("loaded configuration {} (emoji: {})", path.display(), config.use_emoji);
        Ok(config)
    }

    pub fn from_json(text: &str) -> std::result::Result<Self, String> {
        serde_json::from_str(text).map_err(|e| e.to_string())
    }

    pub fn from_toml(text: &str) -> std::result::Result<Self, String> {
        toml::from_str(text).map_err(|e| e.to_string())
    }

    pub fn pill_duration(&self) -> Duration {
        Duration::from_secs(self.pill_duration_secs)
    }

    pub fn tick_interval(&self) -> Duration {
        Duration::from_millis(self.tick_ms)
    }

    pub fn death_pause(&self) -> Duration {
        Duration::from_millis(self.death_pause_ms)
    }

    /// Terminal columns per maze cell. Emoji glyphs are double width.
    pub fn cell_width(&self) -> usize {
        if self.use_emoji { 2 } else { 1 }
    }
}
