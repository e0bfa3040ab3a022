//! Request-scoped trace correlation.
//!
//! Provides the carrier type requests thread through their handlers and
//! the enrichment step that copies its trace id onto every record.

pub mod trace;

pub use trace::*;
