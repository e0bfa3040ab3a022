//! Configuration record and default filling.

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

pub const DEFAULT_LEVEL: &str = "info";
pub const DEFAULT_FILE_NAME: &str = "./logs/app.log";
pub const DEFAULT_MAX_SIZE_MB: u64 = 100;
pub const DEFAULT_MAX_AGE_DAYS: u64 = 7;
pub const DEFAULT_MAX_BACKUPS: usize = 10;
pub const DEFAULT_COMPRESS: bool = true;
pub const DEFAULT_TIME_ZONE: &str = "Asia/Shanghai";

/// Logger configuration.
///
/// `Default` yields an *unset* record: empty strings, zero bounds and no
/// compression preference. Unset fields are filled from
/// [`LoggerConfig::defaults`] when a logger is constructed. Zero never
/// means "unlimited".
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct LoggerConfig {
    pub level: String,
    #[serde(alias = "filename")]
    pub file_name: PathBuf,
    /// Maximum active segment size in megabytes.
    #[serde(alias = "maxsize")]
    pub max_size: u64,
    /// Maximum age of a segment in days.
    #[serde(alias = "maxage")]
    pub max_age: u64,
    #[serde(alias = "maxbackups")]
    pub max_backups: usize,
    /// `None` uses the default; `Some(false)` disables compression.
    pub compress: Option<bool>,
    #[serde(alias = "timezone")]
    pub time_zone: String,
}

impl LoggerConfig {
    /// The fully populated default configuration.
    pub fn defaults() -> Self {
        Self {
            level: DEFAULT_LEVEL.to_string(),
            file_name: PathBuf::from(DEFAULT_FILE_NAME),
            max_size: DEFAULT_MAX_SIZE_MB,
            max_age: DEFAULT_MAX_AGE_DAYS,
            max_backups: DEFAULT_MAX_BACKUPS,
            compress: Some(DEFAULT_COMPRESS),
            time_zone: DEFAULT_TIME_ZONE.to_string(),
        }
    }

    pub fn with_level(mut self, level: impl Into<String>) -> Self {
        self.level = level.into();
        self
    }

    pub fn with_file_name(mut self, path: impl Into<PathBuf>) -> Self {
        self.file_name = path.into();
        self
    }

    pub fn with_max_size(mut self, megabytes: u64) -> Self {
        self.max_size = megabytes;
        self
    }

    pub fn with_max_age(mut self, days: u64) -> Self {
        self.max_age = days;
        self
    }

    pub fn with_max_backups(mut self, backups: usize) -> Self {
        self.max_backups = backups;
        self
    }

    pub fn with_compress(mut self, compress: bool) -> Self {
        self.compress = Some(compress);
        self
    }

    pub fn with_time_zone(mut self, zone: impl Into<String>) -> Self {
        self.time_zone = zone.into();
        self
    }

    /// Fill every unset field from the defaults, field by field.
    pub fn fill_defaults(mut self) -> Self {
        let defaults = Self::defaults();

        if self.level.trim().is_empty() {
            self.level = defaults.level;
        }
        if self.file_name.as_os_str().is_empty() {
            self.file_name = defaults.file_name;
        }
        if self.max_size == 0 {
            self.max_size = defaults.max_size;
        }
        if self.max_age == 0 {
            self.max_age = defaults.max_age;
        }
        if self.max_backups == 0 {
            self.max_backups = defaults.max_backups;
        }
        if self.compress.is_none() {
            self.compress = defaults.compress;
        }
        if self.time_zone.trim().is_empty() {
            self.time_zone = defaults.time_zone;
        }

        self
    }

    pub fn compress_enabled(&self) -> bool {
        self.compress.unwrap_or(DEFAULT_COMPRESS)
    }

    /// Directory holding the active segment, if the path names one.
    pub fn sink_dir(&self) -> Option<&Path> {
        self.file_name
            .parent()
            .filter(|dir| !dir.as_os_str().is_empty() && *dir != Path::new("."))
    }

    pub fn max_size_bytes(&self) -> u64 {
        self.max_size.saturating_mul(1024 * 1024)
    }
}
