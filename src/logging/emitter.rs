//! Record formatting and fan-out to sinks.

use std::backtrace::Backtrace;
use std::sync::Arc;

use chrono::Utc;

use crate::config::TimeZoneSpec;
use crate::error::LoggerError;
use crate::level::Level;
use crate::logging::record::{CallSite, Field, Record};
use crate::sink::Sink;

/// Formats records and writes them to every configured sink.
pub struct Emitter {
    zone: TimeZoneSpec,
    sinks: Vec<Arc<dyn Sink>>,
}

impl Emitter {
    pub fn new(zone: TimeZoneSpec, sinks: Vec<Arc<dyn Sink>>) -> Self {
        Self { zone, sinks }
    }

    pub fn zone(&self) -> TimeZoneSpec {
        self.zone
    }

    pub fn sink_names(&self) -> Vec<&'static str> {
        self.sinks.iter().map(|s| s.name()).collect()
    }

    /// Build one record and write it to every sink. Write failures are
    /// swallowed per sink so the remaining sinks are still attempted.
    pub fn emit(
        &self,
        level: Level,
        logger: Option<&str>,
        caller: CallSite<'_>,
        msg: &str,
        fields: &[Field],
    ) {
        let record = Record {
            time: self.zone.format(Utc::now()),
            level,
            logger,
            caller: caller.short(),
            msg,
            stacktrace: level
                .captures_stacktrace()
                .then(|| Backtrace::force_capture().to_string()),
            fields,
        };

        let line = match record.to_line() {
            Ok(line) => line,
            Err(_) => return,
        };

        for sink in &self.sinks {
            let _ = sink.write_record(&line);
        }
    }

    /// Flush every sink. Benign errors reported by a sink are dropped; the
    /// first genuine failure is returned after all sinks were attempted.
    pub fn sync(&self) -> Result<(), LoggerError> {
        let mut first_err = None;

        for sink in &self.sinks {
            if let Err(err) = sink.flush() {
                if sink.is_benign_flush_error(&err) {
                    continue;
                }
                if first_err.is_none() {
                    first_err = Some(LoggerError::Sync {
                        sink: sink.name(),
                        source: err,
                    });
                }
            }
        }

        match first_err {
            Some(err) => Err(err),
            None => Ok(()),
        }
    }
}

impl std::fmt::Debug for Emitter {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Emitter")
            .field("zone", &self.zone)
            .field("sinks", &self.sink_names())
            .finish()
    }
}
