//! Record destinations.
//!
//! A sink receives fully serialized records. Every sink gets identical
//! bytes; serialization of concurrent writes is each sink's own concern.

pub mod console;
pub mod memory;
pub mod rotating;

use std::io;

pub use console::*;
pub use memory::*;
pub use rotating::*;

/// A destination for serialized log records.
pub trait Sink: Send + Sync {
    /// Short name used in flush errors.
    fn name(&self) -> &'static str;

    /// Write one serialized record, newline included.
    fn write_record(&self, record: &[u8]) -> io::Result<()>;

    /// Flush buffered bytes to the underlying medium.
    fn flush(&self) -> io::Result<()>;

    /// Whether a flush error from this sink is a known platform quirk that
    /// should not be reported to the caller.
    fn is_benign_flush_error(&self, _err: &io::Error) -> bool {
        false
    }
}
