//! Logger configuration.
//!
//! Provides the plain-data configuration record, its default values and
//! time zone resolution for record timestamps.

pub mod settings;
pub mod timezone;

pub use settings::*;
pub use timezone::*;
