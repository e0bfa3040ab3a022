//! Error types for the logging facade.
//!
//! Only a handful of operations are fallible from the caller's point of
//! view: `set_level`, `sync` and installing the `log` bridge. Everything
//! else degrades silently.

use std::io;

use thiserror::Error;

/// Logger errors
#[derive(Error, Debug)]
pub enum LoggerError {
    #[error("unrecognized level: {0:?}")]
    InvalidLevel(String),
    #[error("failed to flush {sink} sink: {source}")]
    Sync {
        sink: &'static str,
        #[source]
        source: io::Error,
    },
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),
    #[error("a global `log` logger is already installed")]
    BridgeInstalled,
}

pub type Result<T> = std::result::Result<T, LoggerError>;
