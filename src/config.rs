//! Built-in guitar configuration
//!
//! The constants live in `assets/guitar.ron`, embedded at compile time and
//! deserialized with RON at startup. Nothing is read from disk.

use serde::{Deserialize, Serialize};

/// Embedded RON source for the built-in configuration
const BUILTIN_RON: &str = include_str!("../assets/guitar.ron");

/// Validation limits
pub mod limits {
    /// Highest fret the table will be built for
    pub const MAX_FRETS: usize = 24;
    /// Maximum number of strings
    pub const MAX_STRINGS: usize = 12;
    /// Longest sample we are willing to precompute (seconds)
    pub const MAX_DURATION: f64 = 10.0;
}

/// Error type for configuration loading
#[derive(Debug)]
pub enum ConfigError {
    ParseError(ron::error::SpannedError),
    ValidationError(String),
}

impl From<ron::error::SpannedError> for ConfigError {
    fn from(e: ron::error::SpannedError) -> Self {
        ConfigError::ParseError(e)
    }
}

impl std::fmt::Display for ConfigError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ConfigError::ParseError(e) => write!(f, "Parse error: {}", e),
            ConfigError::ValidationError(e) => write!(f, "Validation error: {}", e),
        }
    }
}

/// Window settings
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WindowConfig {
    pub title: String,
    pub width: u32,
    pub height: u32,
}

/// Sample synthesis settings
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct AudioConfig {
    /// Output and synthesis rate in Hz
    pub sample_rate: u32,
    /// Length of every precomputed sample in seconds
    pub duration: f64,
}

/// One open string of the tuning
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OpenString {
    /// Note name, e.g. "E2"
    pub name: String,
    /// Open-string frequency in Hz
    pub frequency: f64,
}

/// Complete guitar configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GuitarConfig {
    pub window: WindowConfig,
    pub audio: AudioConfig,
    /// Open strings, low to high
    pub tuning: Vec<OpenString>,
    /// Number of fretted positions per string (fret 0 is extra)
    pub fret_count: usize,
}

impl GuitarConfig {
    /// Load the compiled-in configuration
    pub fn builtin() -> Result<Self, ConfigError> {
        Self::from_ron_str(BUILTIN_RON)
    }

    /// Parse and validate a configuration from a RON string
    pub fn from_ron_str(s: &str) -> Result<Self, ConfigError> {
        let config: GuitarConfig = ron::from_str(s)?;
        config.validate()?;
        Ok(config)
    }

    /// Number of strings in the tuning
    pub fn string_count(&self) -> usize {
        self.tuning.len()
    }

    /// Check that every value is usable for synthesis and layout
    pub fn validate(&self) -> Result<(), ConfigError> {
        validate_window(&self.window, self.string_count(), self.fret_count)
            .map_err(ConfigError::ValidationError)?;
        validate_audio(&self.audio).map_err(ConfigError::ValidationError)?;

        if self.tuning.is_empty() {
            return Err(ConfigError::ValidationError("tuning has no strings".to_string()));
        }
        if self.tuning.len() > limits::MAX_STRINGS {
            return Err(ConfigError::ValidationError(format!(
                "too many strings ({} > {})",
                self.tuning.len(), limits::MAX_STRINGS
            )));
        }
        for (i, string) in self.tuning.iter().enumerate() {
            if !string.frequency.is_finite() || string.frequency <= 0.0 {
                return Err(ConfigError::ValidationError(format!(
                    "tuning[{}] ({}): invalid frequency {}",
                    i, string.name, string.frequency
                )));
            }
        }
        if self.fret_count > limits::MAX_FRETS {
            return Err(ConfigError::ValidationError(format!(
                "too many frets ({} > {})",
                self.fret_count, limits::MAX_FRETS
            )));
        }
        Ok(())
    }
}

fn validate_window(window: &WindowConfig, strings: usize, fret_count: usize) -> Result<(), String> {
    // Cell spacing is an integer division; it must not collapse to zero
    if (window.width as usize) < fret_count + 1 {
        return Err(format!("window width {} too small for {} frets", window.width, fret_count));
    }
    if (window.height as usize) < strings + 1 {
        return Err(format!("window height {} too small for {} strings", window.height, strings));
    }
    Ok(())
}

fn validate_audio(audio: &AudioConfig) -> Result<(), String> {
    if audio.sample_rate == 0 {
        return Err("sample rate must be positive".to_string());
    }
    if !audio.duration.is_finite() || audio.duration <= 0.0 || audio.duration > limits::MAX_DURATION {
        return Err(format!("invalid duration {}", audio.duration));
    }
    if (audio.sample_rate as f64 * audio.duration) < 1.0 {
        return Err("duration shorter than one sample".to_string());
    }
    Ok(())
}
