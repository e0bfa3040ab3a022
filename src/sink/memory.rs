//! In-memory sink for embedders and tests.

use std::io;
use std::sync::Arc;

use parking_lot::Mutex;

use super::Sink;

/// Collects records in memory. Clones share the same buffer.
#[derive(Debug, Default, Clone)]
pub struct MemorySink {
    records: Arc<Mutex<Vec<Vec<u8>>>>,
}

impl MemorySink {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.records.lock().len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.lock().is_empty()
    }

    /// Records written so far, one string per record without the newline.
    pub fn lines(&self) -> Vec<String> {
        self.records
            .lock()
            .iter()
            .map(|r| String::from_utf8_lossy(r).trim_end().to_string())
            .collect()
    }

    /// Records parsed back into JSON objects. Fails on the first record
    /// that is not valid JSON.
    pub fn json_records(&self) -> serde_json::Result<Vec<serde_json::Value>> {
        self.lines()
            .iter()
            .map(|line| serde_json::from_str(line))
            .collect()
    }

    pub fn clear(&self) {
        self.records.lock().clear();
    }
}

impl Sink for MemorySink {
    fn name(&self) -> &'static str {
        "memory"
    }

    fn write_record(&self, record: &[u8]) -> io::Result<()> {
        self.records.lock().push(record.to_vec());
        Ok(())
    }

    fn flush(&self) -> io::Result<()> {
        Ok(())
    }
}
