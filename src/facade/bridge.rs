//! Forwarding of `log` crate records into the process-wide logger.
//!
//! Once installed, `log::info!` and friends from any crate end up in the
//! same JSON stream as direct calls. Each record is routed to whatever
//! [`default_logger`] returns at that moment, so a later
//! [`set_global_config`](super::global::set_global_config) takes effect.

use log::{LevelFilter, Log, Metadata, Record};

use crate::error::{LoggerError, Result};
use crate::facade::global::default_logger;
use crate::level::Level;
use crate::logging::{CallSite, Field};

/// Field carrying the `log` target (usually the module path).
pub const TARGET_KEY: &str = "target";

struct LogBridge;

static BRIDGE: LogBridge = LogBridge;

impl Log for LogBridge {
    fn enabled(&self, metadata: &Metadata<'_>) -> bool {
        default_logger().enabled(Level::from(metadata.level()))
    }

    fn log(&self, record: &Record<'_>) {
        let logger = default_logger();
        let level = Level::from(record.level());
        if !logger.enabled(level) {
            return;
        }

        let caller = CallSite::new(
            record.file().unwrap_or("<unknown>"),
            record.line().unwrap_or(0),
        );
        let msg = record.args().to_string();
        let fields = vec![Field::new(TARGET_KEY, record.target().to_string())];

        logger.log_at(level, None, &msg, fields, caller);
    }

    fn flush(&self) {
        let _ = default_logger().sync();
    }
}

/// Install the bridge as the `log` crate's global logger. Level filtering
/// is left to the facade's own gate.
pub fn init_log_bridge() -> Result<()> {
    log::set_logger(&BRIDGE).map_err(|_| LoggerError::BridgeInstalled)?;
    log::set_max_level(LevelFilter::Trace);
    Ok(())
}
