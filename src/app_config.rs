use anyhow::{anyhow, Result};
use serde::{Deserialize, Serialize};
use std::default::Default;

/// Application configuration module
/// This module handles the application configuration including loading,
/// validating and saving configuration settings.
/// Represents the application configuration
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, Default)]
pub struct Config {
    /// Rendering options
    #[serde(default)]
    pub render: RenderConfig,

    /// Log level
    #[serde(default)]
    pub log_level: LogLevel,
}

/// SRT presentation style
#[derive(Debug, Serialize, Deserialize, Clone, Copy, PartialEq, Eq, Default)]
#[serde(rename_all = "snake_case")]
pub enum RenderMode {
    // @mode: One cue per word, word highlighted inside its segment
    Highlight,
    // @mode: One cue per word, word alone
    SingleWords,
    // @mode: One cue per segment
    #[default]
    PlainText,
}

impl RenderMode {
    // @returns: Human readable mode name
    pub fn display_name(&self) -> &str {
        match self {
            Self::Highlight => "Highlighted words",
            Self::SingleWords => "Single words",
            Self::PlainText => "Plain text",
        }
    }

    // @returns: Config identifier
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Highlight => "highlight",
            Self::SingleWords => "single_words",
            Self::PlainText => "plain_text",
        }
    }
}

impl std::fmt::Display for RenderMode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl std::str::FromStr for RenderMode {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.to_lowercase().replace('-', "_").as_str() {
            "highlight" => Ok(Self::Highlight),
            "single_words" => Ok(Self::SingleWords),
            "plain_text" | "plain" => Ok(Self::PlainText),
            _ => Err(anyhow!("Invalid render mode: {}", s)),
        }
    }
}

/// Rendering configuration
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
pub struct RenderConfig {
    /// SRT style to produce
    #[serde(default)]
    pub mode: RenderMode,

    /// Color placed in the `<font color>` tag of highlighted words.
    /// Passed through verbatim; the player must understand it.
    #[serde(default = "default_highlight_color")]
    pub highlight_color: String,

    /// Regroup words into segments of this size before plain-text rendering
    #[serde(default)]
    pub words_per_segment: Option<usize>,

    /// Segment size used when an input file is a flat word list
    #[serde(default = "default_input_words_per_segment")]
    pub input_words_per_segment: usize,
}

impl Default for RenderConfig {
    fn default() -> Self {
        Self {
            mode: RenderMode::default(),
            highlight_color: default_highlight_color(),
            words_per_segment: None,
            input_words_per_segment: default_input_words_per_segment(),
        }
    }
}

/// Log verbosity level
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, Default)]
#[serde(rename_all = "lowercase")]
pub enum LogLevel {
    Error,
    Warn,
    #[default]
    Info,
    Debug,
    Trace,
}

impl LogLevel {
    // @returns: Matching log crate filter
    pub fn to_level_filter(&self) -> log::LevelFilter {
        match self {
            LogLevel::Error => log::LevelFilter::Error,
            LogLevel::Warn => log::LevelFilter::Warn,
            LogLevel::Info => log::LevelFilter::Info,
            LogLevel::Debug => log::LevelFilter::Debug,
            LogLevel::Trace => log::LevelFilter::Trace,
        }
    }
}

fn default_highlight_color() -> String {
    "red".to_string()
}

fn default_input_words_per_segment() -> usize {
    5
}

impl Config {
    /// Validate the configuration for consistency and required values
    pub fn validate(&self) -> Result<()> {
        if self.render.words_per_segment == Some(0) {
            return Err(anyhow!("words_per_segment must be at least 1"));
        }

        if self.render.input_words_per_segment == 0 {
            return Err(anyhow!("input_words_per_segment must be at least 1"));
        }

        if self.render.mode == RenderMode::Highlight && self.render.highlight_color.trim().is_empty() {
            return Err(anyhow!("highlight_color is required for highlight rendering"));
        }

        Ok(())
    }
}
