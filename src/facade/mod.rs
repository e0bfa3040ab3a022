//! Public logging surface.
//!
//! - `logger` - the `Logger` facade (leveled and formatted calls)
//! - `global` - the process-wide instance and its convenience functions
//! - `bridge` - forwarding from the `log` crate

pub mod bridge;
pub mod global;
pub mod logger;

pub use bridge::init_log_bridge;
pub use global::{
    debug, debugf, default_logger, error, errorf, fatal, fatalf, get_config, info, infof,
    set_global_config, set_global_logger, set_level, sync, warn, warnf, LoggerHandle,
};
pub use logger::{Ctx, Logger};
