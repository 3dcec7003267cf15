//! qreveal configuration system
//!
//! Settings are read from `qreveal.toml` in the working directory, then
//! overridden by `QREVEAL_*` environment variables.

use std::path::{Path, PathBuf};
use std::time::Duration;

use engine_core::{ColorLinPremul, ColorParseError};
use qreveal_code::{EncodeOptions, ErrorCorrection};
use qreveal_scene::{GeometryStyle, RevealEasing, RevealMode, RevealParams, RevealTimeline};
use serde::{Deserialize, Serialize};

/// Default configuration file name.
pub const CONFIG_FILE: &str = "qreveal.toml";

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("failed to read config file {path:?}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("failed to parse config file: {0}")]
    Parse(#[from] toml::de::Error),
    #[error("invalid color: {0}")]
    Color(#[from] ColorParseError),
}

/// Main configuration structure
#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq)]
#[serde(default)]
pub struct QrevealConfig {
    /// Window and initial content
    pub demo: DemoConfig,
    /// QR encoder settings
    pub code: CodeConfig,
    /// Reveal timeline settings
    pub animation: AnimationConfig,
    /// Colors as `#rrggbb` / `#rrggbbaa`
    pub colors: ColorsConfig,
    /// Rendering engine settings
    pub rendering: RenderingConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct DemoConfig {
    /// Text encoded at startup
    pub text: String,
    pub title: String,
    pub width: u32,
    pub height: u32,
    /// Share of the window's short side covered by the code
    pub fill: f32,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct CodeConfig {
    pub error_correction: ErrorCorrection,
    /// Smallest QR version tried (1..=40)
    pub min_version: i16,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct AnimationConfig {
    /// Length of one sweep of the reveal progress
    pub duration_ms: u64,
    pub mode: RevealMode,
    pub easing: RevealEasing,
    /// Sweep from 1 to 0
    pub reverse: bool,
    /// Vertical travel of a fully progressed dot, in modules
    pub offset_scale: f32,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct ColorsConfig {
    pub dot: String,
    pub background: String,
    /// Window clear color around the code
    pub clear: String,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct RenderingConfig {
    /// 4 or more uses 4x; anything lower disables multisampling
    pub msaa_samples: u32,
}

impl Default for DemoConfig {
    fn default() -> Self {
        Self {
            text: "https://example.com".to_string(),
            title: "qreveal".to_string(),
            width: 640,
            height: 640,
            fill: 0.8,
        }
    }
}

impl Default for CodeConfig {
    fn default() -> Self {
        let options = EncodeOptions::default();
        Self {
            error_correction: options.error_correction,
            min_version: options.min_version,
        }
    }
}

impl Default for AnimationConfig {
    fn default() -> Self {
        Self {
            duration_ms: 2500,
            mode: RevealMode::PingPong,
            easing: RevealEasing::Linear,
            reverse: false,
            offset_scale: RevealParams::default().offset_scale,
        }
    }
}

impl Default for ColorsConfig {
    fn default() -> Self {
        Self {
            dot: "#ff0000".to_string(),
            background: "#ffffff".to_string(),
            clear: "#000000".to_string(),
        }
    }
}

impl Default for RenderingConfig {
    fn default() -> Self {
        Self { msaa_samples: 4 }
    }
}

impl QrevealConfig {
    /// Load configuration from a TOML file
    pub fn load_from_file<P: AsRef<Path>>(path: P) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        Ok(toml::from_str(&content)?)
    }

    /// Load from `qreveal.toml` in the current directory, or defaults if it
    /// is missing or invalid.
    pub fn load_or_default() -> Self {
        if !Path::new(CONFIG_FILE).exists() {
            return Self::default();
        }
        Self::load_from_file(CONFIG_FILE).unwrap_or_else(|err| {
            log::warn!("ignoring {CONFIG_FILE}: {err}");
            Self::default()
        })
    }

    /// Merge configuration with environment variables
    ///
    /// Environment variables take precedence over configuration file values.
    pub fn merge_with_env(&mut self) {
        self.merge_vars(|key| std::env::var(key).ok());
    }

    /// Apply overrides from any `QREVEAL_*` lookup. Unparseable values are
    /// logged and skipped.
    pub fn merge_vars(&mut self, lookup: impl Fn(&str) -> Option<String>) {
        if let Some(text) = lookup("QREVEAL_TEXT") {
            self.demo.text = text;
        }
        if let Some(val) = lookup("QREVEAL_DURATION_MS") {
            match val.parse() {
                Ok(ms) => self.animation.duration_ms = ms,
                Err(_) => log::warn!("QREVEAL_DURATION_MS={val} is not a number of milliseconds"),
            }
        }
        if let Some(val) = lookup("QREVEAL_MODE") {
            match val.as_str() {
                "once" => self.animation.mode = RevealMode::Once,
                "loop" => self.animation.mode = RevealMode::Loop,
                "ping_pong" | "pingpong" => self.animation.mode = RevealMode::PingPong,
                _ => log::warn!("QREVEAL_MODE={val} is not one of once, loop, ping_pong"),
            }
        }
        if let Some(val) = lookup("QREVEAL_EC_LEVEL") {
            match val.parse() {
                Ok(level) => self.code.error_correction = level,
                Err(err) => log::warn!("QREVEAL_EC_LEVEL: {err}"),
            }
        }
        if let Some(val) = lookup("QREVEAL_OFFSET_SCALE") {
            match val.parse() {
                Ok(scale) => self.animation.offset_scale = scale,
                Err(_) => log::warn!("QREVEAL_OFFSET_SCALE={val} is not a number"),
            }
        }
    }

    /// Load configuration with environment variable overrides
    ///
    /// 1. Load from qreveal.toml (or use defaults if not found)
    /// 2. Override with environment variables if present
    pub fn load() -> Self {
        let mut config = Self::load_or_default();
        config.merge_with_env();
        config
    }

    pub fn encode_options(&self) -> EncodeOptions {
        EncodeOptions {
            error_correction: self.code.error_correction,
            min_version: self.code.min_version,
        }
    }

    pub fn reveal_params(&self) -> RevealParams {
        RevealParams {
            offset_scale: self.animation.offset_scale,
        }
    }

    pub fn timeline(&self) -> RevealTimeline {
        RevealTimeline::new(Duration::from_millis(self.animation.duration_ms))
            .with_mode(self.animation.mode)
            .with_easing(self.animation.easing)
            .reversed(self.animation.reverse)
    }

    pub fn style(&self) -> Result<GeometryStyle, ConfigError> {
        Ok(GeometryStyle {
            dot: ColorLinPremul::from_hex(&self.colors.dot)?,
            background: ColorLinPremul::from_hex(&self.colors.background)?,
        })
    }

    pub fn clear_color(&self) -> Result<ColorLinPremul, ConfigError> {
        Ok(ColorLinPremul::from_hex(&self.colors.clear)?)
    }
}
