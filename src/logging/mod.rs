//! Structured record building and fan-out.
//!
//! A record is one JSON object per line with a fixed key order:
//! `time`, `level`, `logger`, `caller`, `msg`, `stacktrace`, then
//! caller-supplied fields in call order.

pub mod emitter;
pub mod record;

pub use emitter::*;
pub use record::*;
