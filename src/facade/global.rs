//! Process-wide logger.
//!
//! The shared instance has a two-phase lifecycle: it is built lazily from
//! the default configuration on first use, and can be replaced at any time
//! with [`set_global_config`]. A replacement is never overwritten by the
//! lazy path. Replacing does not flush the previous instance.

use std::fmt;
use std::sync::Arc;

use lazy_static::lazy_static;
use parking_lot::{RwLock, RwLockUpgradableReadGuard};

use crate::config::LoggerConfig;
use crate::error::Result;
use crate::facade::logger::{Ctx, Logger};
use crate::logging::Field;

/// Slot holding a lazily created, replaceable logger.
///
/// The process-wide instance is one of these; tests and embedders can
/// hold their own to avoid shared global state.
#[derive(Debug, Default)]
pub struct LoggerHandle {
    slot: RwLock<Option<Arc<Logger>>>,
}

impl LoggerHandle {
    pub fn new() -> Self {
        Self::default()
    }

    /// Current logger, if one was created or installed.
    pub fn get(&self) -> Option<Arc<Logger>> {
        self.slot.read().clone()
    }

    /// Return the current logger, running `init` exactly once if none
    /// exists yet. Concurrent first callers all receive the instance built
    /// by the winner.
    pub fn get_or_init(&self, init: impl FnOnce() -> Logger) -> Arc<Logger> {
        if let Some(logger) = self.slot.read().as_ref() {
            return Arc::clone(logger);
        }

        // Only one upgradable guard exists at a time, so `init` runs once.
        let slot = self.slot.upgradable_read();
        if let Some(logger) = slot.as_ref() {
            return Arc::clone(logger);
        }

        let logger = Arc::new(init());
        let mut slot = RwLockUpgradableReadGuard::upgrade(slot);
        *slot = Some(Arc::clone(&logger));
        logger
    }

    /// Install `logger`, returning the previous instance.
    pub fn replace(&self, logger: Logger) -> Option<Arc<Logger>> {
        self.slot.write().replace(Arc::new(logger))
    }
}

lazy_static! {
    static ref GLOBAL_LOGGER: LoggerHandle = LoggerHandle::new();
}

/// The process-wide logger, built from the default configuration on first
/// use.
pub fn default_logger() -> Arc<Logger> {
    GLOBAL_LOGGER.get_or_init(|| Logger::new(None))
}

/// Build a new logger from `config` and make it the process-wide one.
pub fn set_global_config(config: Option<LoggerConfig>) {
    GLOBAL_LOGGER.replace(Logger::new(config));
}

/// Install an already constructed logger as the process-wide one.
pub fn set_global_logger(logger: Logger) {
    GLOBAL_LOGGER.replace(logger);
}

#[track_caller]
pub fn debug(ctx: Ctx<'_>, msg: &str, fields: Vec<Field>) {
    default_logger().debug(ctx, msg, fields);
}

#[track_caller]
pub fn info(ctx: Ctx<'_>, msg: &str, fields: Vec<Field>) {
    default_logger().info(ctx, msg, fields);
}

#[track_caller]
pub fn warn(ctx: Ctx<'_>, msg: &str, fields: Vec<Field>) {
    default_logger().warn(ctx, msg, fields);
}

#[track_caller]
pub fn error(ctx: Ctx<'_>, msg: &str, fields: Vec<Field>) {
    default_logger().error(ctx, msg, fields);
}

#[track_caller]
pub fn fatal(ctx: Ctx<'_>, msg: &str, fields: Vec<Field>) -> ! {
    default_logger().fatal(ctx, msg, fields)
}

#[track_caller]
pub fn debugf(ctx: Ctx<'_>, args: fmt::Arguments<'_>) {
    default_logger().debugf(ctx, args);
}

#[track_caller]
pub fn infof(ctx: Ctx<'_>, args: fmt::Arguments<'_>) {
    default_logger().infof(ctx, args);
}

#[track_caller]
pub fn warnf(ctx: Ctx<'_>, args: fmt::Arguments<'_>) {
    default_logger().warnf(ctx, args);
}

#[track_caller]
pub fn errorf(ctx: Ctx<'_>, args: fmt::Arguments<'_>) {
    default_logger().errorf(ctx, args);
}

#[track_caller]
pub fn fatalf(ctx: Ctx<'_>, args: fmt::Arguments<'_>) -> ! {
    default_logger().fatalf(ctx, args)
}

pub fn set_level(name: &str) -> Result<()> {
    default_logger().set_level(name)
}

pub fn get_config() -> LoggerConfig {
    default_logger().get_config()
}

pub fn sync() -> Result<()> {
    default_logger().sync()
}
