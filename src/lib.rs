//! ctxlog - structured logging facade with trace correlation
//!
//! A process-wide, thread-safe logger writing one JSON record per line to
//! both the console and a size/age-rotated file. The implementation
//! prioritizes:
//!
//! 1. **Never failing the host** - misconfiguration degrades silently
//! 2. **Correlation** - a request's trace id lands on every record
//! 3. **Cheap gating** - disabled levels cost one atomic load
//!
//! ## Architecture
//!
//! The crate is organized into modules:
//! - `level` - Severity levels and the atomic level gate
//! - `config` - Configuration record, defaults and time zones
//! - `sink` - Console, in-memory and rotating file destinations
//! - `logging` - Record layout and fan-out to sinks
//! - `context` - Request contexts and trace id enrichment
//! - `facade` - The `Logger`, the process-wide instance and the `log` bridge
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use ctxlog::{field, Logger, LoggerConfig, RequestContext};
//!
//! let logger = Logger::new(Some(
//!     LoggerConfig::default()
//!         .with_level("debug")
//!         .with_file_name("./logs/api.log"),
//! ));
//!
//! let ctx = RequestContext::with_trace_id("abc");
//! logger.info(Some(&ctx), "hello", vec![field("k", "v")]);
//! logger.sync().expect("flush log file");
//! ```

pub mod config;
pub mod context;
pub mod error;
pub mod facade;
pub mod level;
pub mod logging;
mod macros;
pub mod sink;

pub use config::{LoggerConfig, TimeZoneSpec};
pub use context::{enrich, RequestContext, TraceSource, TRACE_ID_KEY};
pub use error::{LoggerError, Result};
pub use facade::{
    debug, debugf, default_logger, error, errorf, fatal, fatalf, get_config, info, infof,
    init_log_bridge, set_global_config, set_global_logger, set_level, sync, warn, warnf, Ctx,
    Logger, LoggerHandle,
};
pub use level::{Level, LevelController};
pub use logging::{field, CallSite, Field};
pub use sink::{ConsoleSink, MemorySink, RotatingFileSink, RotationPolicy, Sink};
