//! Standard output sink.

use std::io::{self, Write};

use super::Sink;

/// Writes records to the process's standard output.
#[derive(Debug, Default, Clone, Copy)]
pub struct ConsoleSink;

impl ConsoleSink {
    pub fn new() -> Self {
        Self
    }
}

impl Sink for ConsoleSink {
    fn name(&self) -> &'static str {
        "console"
    }

    fn write_record(&self, record: &[u8]) -> io::Result<()> {
        let mut out = io::stdout().lock();
        out.write_all(record)
    }

    fn flush(&self) -> io::Result<()> {
        io::stdout().lock().flush()
    }

    fn is_benign_flush_error(&self, err: &io::Error) -> bool {
        is_benign_console_error(err)
    }
}

const EBADF: i32 = 9;
const EINVAL: i32 = 22;

/// Console flush errors that depend on what stdout is attached to (a
/// closed descriptor, a terminal or pipe that rejects syncing) rather
/// than on a real failure.
pub fn is_benign_console_error(err: &io::Error) -> bool {
    if matches!(err.raw_os_error(), Some(EBADF) | Some(EINVAL)) {
        return true;
    }

    let msg = err.to_string().to_ascii_lowercase();
    msg.contains("bad file descriptor")
        || msg.contains("invalid argument")
        || msg.contains("stdout")
}
