//! Severity levels and the dynamic level gate.
//!
//! The gate is read on every log call and written rarely, so it is kept
//! in an atomic rather than behind the configuration lock.

pub mod controller;

pub use controller::*;
