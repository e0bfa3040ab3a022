//! The logger facade.
//!
//! Composes trace enrichment, the level gate and the emitter behind one
//! leveled API. Every method is `#[track_caller]` so the `caller` key
//! names the user's call site rather than this module.

use std::fmt;
use std::fs;
use std::panic::Location;
use std::process;
use std::sync::Arc;

use parking_lot::RwLock;

use crate::config::{LoggerConfig, TimeZoneSpec};
use crate::context::{enrich, TraceSource};
use crate::error::Result;
use crate::level::{Level, LevelController};
use crate::logging::{CallSite, Emitter, Field};
use crate::sink::{ConsoleSink, RotatingFileSink, RotationPolicy, Sink};

/// Optional request context passed to every log call.
pub type Ctx<'a> = Option<&'a dyn TraceSource>;

/// Exit status used after a fatal record has been flushed.
const FATAL_EXIT_CODE: i32 = 1;

struct Core {
    config: RwLock<LoggerConfig>,
    level: LevelController,
    emitter: Emitter,
    degraded: bool,
}

/// Structured logger writing JSON records to the console and a rotating
/// file.
///
/// Construction never fails: a bad time zone falls back to local time, a
/// bad level to `info`, and a sink that cannot be opened to a
/// console-only pipeline (see [`Logger::is_degraded`]).
pub struct Logger {
    core: Arc<Core>,
    name: Option<Arc<str>>,
}

impl Logger {
    /// Build a logger from `config`, filling unset fields from
    /// [`LoggerConfig::defaults`].
    pub fn new(config: Option<LoggerConfig>) -> Self {
        let config = config.unwrap_or_else(LoggerConfig::defaults).fill_defaults();
        let zone = TimeZoneSpec::resolve(&config.time_zone);

        match open_file_sink(&config) {
            Ok(file) => {
                let sinks: Vec<Arc<dyn Sink>> = vec![Arc::new(ConsoleSink::new()), Arc::new(file)];
                Self::assemble(config, zone, sinks, false)
            }
            Err(_) => {
                let sinks: Vec<Arc<dyn Sink>> = vec![Arc::new(ConsoleSink::new())];
                Self::assemble(config, zone, sinks, true)
            }
        }
    }

    /// Build a logger writing to caller-supplied sinks instead of the
    /// console and the configured file.
    pub fn with_sinks(config: Option<LoggerConfig>, sinks: Vec<Arc<dyn Sink>>) -> Self {
        let config = config.unwrap_or_else(LoggerConfig::defaults).fill_defaults();
        let zone = TimeZoneSpec::resolve(&config.time_zone);
        Self::assemble(config, zone, sinks, false)
    }

    fn assemble(
        mut config: LoggerConfig,
        zone: TimeZoneSpec,
        sinks: Vec<Arc<dyn Sink>>,
        degraded: bool,
    ) -> Self {
        let level = config.level.parse::<Level>().unwrap_or(Level::Info);
        config.level = level.as_str().to_string();

        Self {
            core: Arc::new(Core {
                config: RwLock::new(config),
                level: LevelController::new(level),
                emitter: Emitter::new(zone, sinks),
                degraded,
            }),
            name: None,
        }
    }

    /// A child logger sharing this logger's sinks and level, tagging its
    /// records with `"logger": name`.
    pub fn named(&self, name: impl Into<Arc<str>>) -> Self {
        Self {
            core: Arc::clone(&self.core),
            name: Some(name.into()),
        }
    }

    pub fn name(&self) -> Option<&str> {
        self.name.as_deref()
    }

    /// True when the file sink could not be opened and records only go to
    /// the console.
    pub fn is_degraded(&self) -> bool {
        self.core.degraded
    }

    pub fn time_zone(&self) -> TimeZoneSpec {
        self.core.emitter.zone()
    }

    pub fn level(&self) -> Level {
        self.core.level.level()
    }

    #[inline]
    pub fn enabled(&self, level: Level) -> bool {
        self.core.level.enabled(level)
    }

    /// Change the minimum level. Unrecognized names are rejected and the
    /// current level is kept.
    pub fn set_level(&self, name: &str) -> Result<()> {
        let mut config = self.core.config.write();
        let level = self.core.level.set_level(name)?;
        config.level = level.as_str().to_string();
        Ok(())
    }

    /// Snapshot of the applied configuration.
    pub fn get_config(&self) -> LoggerConfig {
        self.core.config.read().clone()
    }

    /// Flush every sink. Benign console errors are swallowed; file sink
    /// failures are returned.
    pub fn sync(&self) -> Result<()> {
        self.core.emitter.sync()
    }

    /// Log at `level`. `Level::Fatal` terminates the process like
    /// [`Logger::fatal`].
    #[track_caller]
    pub fn log(&self, level: Level, ctx: Ctx<'_>, msg: &str, fields: Vec<Field>) {
        self.log_at(level, ctx, msg, fields, Location::caller().into());
        if level == Level::Fatal {
            self.terminate();
        }
    }

    #[track_caller]
    pub fn debug(&self, ctx: Ctx<'_>, msg: &str, fields: Vec<Field>) {
        self.log_at(Level::Debug, ctx, msg, fields, Location::caller().into());
    }

    #[track_caller]
    pub fn info(&self, ctx: Ctx<'_>, msg: &str, fields: Vec<Field>) {
        self.log_at(Level::Info, ctx, msg, fields, Location::caller().into());
    }

    #[track_caller]
    pub fn warn(&self, ctx: Ctx<'_>, msg: &str, fields: Vec<Field>) {
        self.log_at(Level::Warn, ctx, msg, fields, Location::caller().into());
    }

    #[track_caller]
    pub fn error(&self, ctx: Ctx<'_>, msg: &str, fields: Vec<Field>) {
        self.log_at(Level::Error, ctx, msg, fields, Location::caller().into());
    }

    /// Write the record, flush every sink and exit the process.
    #[track_caller]
    pub fn fatal(&self, ctx: Ctx<'_>, msg: &str, fields: Vec<Field>) -> ! {
        self.log_at(Level::Fatal, ctx, msg, fields, Location::caller().into());
        self.terminate()
    }

    #[track_caller]
    pub fn debugf(&self, ctx: Ctx<'_>, args: fmt::Arguments<'_>) {
        self.log_fmt_at(Level::Debug, ctx, args, Location::caller().into());
    }

    #[track_caller]
    pub fn infof(&self, ctx: Ctx<'_>, args: fmt::Arguments<'_>) {
        self.log_fmt_at(Level::Info, ctx, args, Location::caller().into());
    }

    #[track_caller]
    pub fn warnf(&self, ctx: Ctx<'_>, args: fmt::Arguments<'_>) {
        self.log_fmt_at(Level::Warn, ctx, args, Location::caller().into());
    }

    #[track_caller]
    pub fn errorf(&self, ctx: Ctx<'_>, args: fmt::Arguments<'_>) {
        self.log_fmt_at(Level::Error, ctx, args, Location::caller().into());
    }

    #[track_caller]
    pub fn fatalf(&self, ctx: Ctx<'_>, args: fmt::Arguments<'_>) -> ! {
        self.log_fmt_at(Level::Fatal, ctx, args, Location::caller().into());
        self.terminate()
    }

    /// Log with an explicit call site, for records that originate outside
    /// a direct method call (e.g. the `log` crate bridge).
    pub(crate) fn log_at(
        &self,
        level: Level,
        ctx: Ctx<'_>,
        msg: &str,
        fields: Vec<Field>,
        caller: CallSite<'_>,
    ) {
        if !self.core.level.enabled(level) {
            return;
        }
        let fields = enrich(ctx, fields);
        self.core
            .emitter
            .emit(level, self.name.as_deref(), caller, msg, &fields);
    }

    fn log_fmt_at(
        &self,
        level: Level,
        ctx: Ctx<'_>,
        args: fmt::Arguments<'_>,
        caller: CallSite<'_>,
    ) {
        if !self.core.level.enabled(level) {
            return;
        }
        let msg = fmt::format(args);
        let fields = enrich(ctx, Vec::new());
        self.core
            .emitter
            .emit(level, self.name.as_deref(), caller, &msg, &fields);
    }

    fn terminate(&self) -> ! {
        let _ = self.sync();
        process::exit(FATAL_EXIT_CODE)
    }
}

impl fmt::Debug for Logger {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Logger")
            .field("name", &self.name)
            .field("level", &self.level())
            .field("degraded", &self.core.degraded)
            .field("emitter", &self.core.emitter)
            .finish()
    }
}

fn open_file_sink(config: &LoggerConfig) -> Result<RotatingFileSink> {
    if let Some(dir) = config.sink_dir() {
        fs::create_dir_all(dir)?;
    }
    let sink = RotatingFileSink::open(&config.file_name, RotationPolicy::from_config(config))?;
    Ok(sink)
}
