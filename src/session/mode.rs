use std::fmt;
use std::str::FromStr;

use thiserror::Error;

use super::bionic::{DEFAULT_FIXATION, clamp_fixation};
use super::rsvp::{DEFAULT_WPM, RsvpSession, clamp_wpm};

/// How extracted text is presented.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "cli", derive(serde::Serialize))]
#[cfg_attr(feature = "cli", serde(rename_all = "lowercase"))]
pub enum ReadingMode {
    /// One word at a time.
    #[default]
    Rsvp,
    /// Whole text with emphasized word prefixes.
    Bionic,
}

impl ReadingMode {
    pub fn toggle(self) -> Self {
        match self {
            ReadingMode::Rsvp => ReadingMode::Bionic,
            ReadingMode::Bionic => ReadingMode::Rsvp,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            ReadingMode::Rsvp => "rsvp",
            ReadingMode::Bionic => "bionic",
        }
    }
}

impl fmt::Display for ReadingMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("unknown reading mode: {0} (expected rsvp or bionic)")]
pub struct UnknownMode(String);

impl FromStr for ReadingMode {
    type Err = UnknownMode;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "rsvp" => Ok(ReadingMode::Rsvp),
            "bionic" => Ok(ReadingMode::Bionic),
            _ => Err(UnknownMode(s.to_string())),
        }
    }
}

/// Reader preferences.
///
/// Values are clamped on construction through the builder methods and
/// setters, so a config is always within the supported ranges.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "cli", derive(serde::Serialize))]
pub struct ReaderConfig {
    pub mode: ReadingMode,
    pub wpm: u32,
    pub fixation_percent: u8,
}

impl Default for ReaderConfig {
    fn default() -> Self {
        Self {
            mode: ReadingMode::default(),
            wpm: DEFAULT_WPM,
            fixation_percent: DEFAULT_FIXATION,
        }
    }
}

impl ReaderConfig {
    pub fn with_mode(mut self, mode: ReadingMode) -> Self {
        self.mode = mode;
        self
    }

    pub fn with_wpm(mut self, wpm: u32) -> Self {
        self.set_wpm(wpm);
        self
    }

    pub fn with_fixation_percent(mut self, percent: u8) -> Self {
        self.set_fixation_percent(percent);
        self
    }

    pub fn set_wpm(&mut self, wpm: u32) {
        self.wpm = clamp_wpm(wpm);
    }

    pub fn set_fixation_percent(&mut self, percent: u8) {
        self.fixation_percent = clamp_fixation(percent);
    }

    pub fn toggle_mode(&mut self) {
        self.mode = self.mode.toggle();
    }

    /// A fresh RSVP session at this config's pace.
    pub fn session(&self) -> RsvpSession {
        RsvpSession::with_wpm(self.wpm)
    }
}
