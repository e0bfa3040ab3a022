//! Level parsing and the atomic level controller.

use std::fmt;
use std::str::FromStr;
use std::sync::atomic::{AtomicU8, Ordering};

use crate::error::LoggerError;

/// Record severity, ordered from least to most severe.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[repr(u8)]
pub enum Level {
    Debug = 0,
    Info = 1,
    Warn = 2,
    Error = 3,
    Fatal = 4,
}

impl Level {
    pub const ALL: [Level; 5] = [
        Level::Debug,
        Level::Info,
        Level::Warn,
        Level::Error,
        Level::Fatal,
    ];

    /// Lower-case configuration name.
    pub fn as_str(&self) -> &'static str {
        match self {
            Level::Debug => "debug",
            Level::Info => "info",
            Level::Warn => "warn",
            Level::Error => "error",
            Level::Fatal => "fatal",
        }
    }

    /// Upper-case name written to the `level` record key.
    pub fn as_upper_str(&self) -> &'static str {
        match self {
            Level::Debug => "DEBUG",
            Level::Info => "INFO",
            Level::Warn => "WARN",
            Level::Error => "ERROR",
            Level::Fatal => "FATAL",
        }
    }

    /// Whether records at this severity carry a stack trace.
    pub fn captures_stacktrace(&self) -> bool {
        *self >= Level::Error
    }

    fn from_u8(raw: u8) -> Self {
        match raw {
            0 => Level::Debug,
            1 => Level::Info,
            2 => Level::Warn,
            3 => Level::Error,
            _ => Level::Fatal,
        }
    }
}

impl fmt::Display for Level {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Level {
    type Err = LoggerError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "debug" => Ok(Level::Debug),
            "info" => Ok(Level::Info),
            "warn" | "warning" => Ok(Level::Warn),
            "error" => Ok(Level::Error),
            "fatal" => Ok(Level::Fatal),
            _ => Err(LoggerError::InvalidLevel(s.to_string())),
        }
    }
}

impl From<log::Level> for Level {
    fn from(level: log::Level) -> Self {
        match level {
            log::Level::Trace | log::Level::Debug => Level::Debug,
            log::Level::Info => Level::Info,
            log::Level::Warn => Level::Warn,
            log::Level::Error => Level::Error,
        }
    }
}

/// Mutable minimum level shared by every log call of a logger.
///
/// Readers never block. A change is visible to calls that start after
/// `set` returns; calls already past the gate are not affected.
#[derive(Debug)]
pub struct LevelController {
    current: AtomicU8,
}

impl LevelController {
    pub fn new(level: Level) -> Self {
        Self {
            current: AtomicU8::new(level as u8),
        }
    }

    pub fn level(&self) -> Level {
        Level::from_u8(self.current.load(Ordering::Relaxed))
    }

    pub fn set(&self, level: Level) {
        self.current.store(level as u8, Ordering::Relaxed);
    }

    /// Parse `name` and apply it. On failure the current level is kept.
    pub fn set_level(&self, name: &str) -> Result<Level, LoggerError> {
        let level: Level = name.parse()?;
        self.set(level);
        Ok(level)
    }

    /// True iff `candidate` is at or above the current level.
    #[inline]
    pub fn enabled(&self, candidate: Level) -> bool {
        candidate as u8 >= self.current.load(Ordering::Relaxed)
    }
}

impl Default for LevelController {
    fn default() -> Self {
        Self::new(Level::Info)
    }
}
