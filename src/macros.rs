//! Formatted logging macros.
//!
//! Each macro wraps `format_args!` so interpolation only happens after the
//! level gate passes. Without a `logger = ...;` prefix the process-wide
//! logger is used.
//!
//! ```rust,no_run
//! use ctxlog::{infof, Logger, RequestContext};
//!
//! let ctx = RequestContext::with_trace_id("req-42");
//! infof!(Some(&ctx), "user {} logged in", "john");
//!
//! let logger = Logger::new(None);
//! infof!(logger = logger; None, "{} attempts remaining", 3);
//! ```

/// Log a formatted debug message.
#[macro_export]
macro_rules! debugf {
    (logger = $logger:expr; $ctx:expr, $($arg:tt)+) => {
        $logger.debugf($ctx, format_args!($($arg)+))
    };
    ($ctx:expr, $($arg:tt)+) => {
        $crate::debugf($ctx, format_args!($($arg)+))
    };
}

/// Log a formatted info message.
#[macro_export]
macro_rules! infof {
    (logger = $logger:expr; $ctx:expr, $($arg:tt)+) => {
        $logger.infof($ctx, format_args!($($arg)+))
    };
    ($ctx:expr, $($arg:tt)+) => {
        $crate::infof($ctx, format_args!($($arg)+))
    };
}

/// Log a formatted warning.
#[macro_export]
macro_rules! warnf {
    (logger = $logger:expr; $ctx:expr, $($arg:tt)+) => {
        $logger.warnf($ctx, format_args!($($arg)+))
    };
    ($ctx:expr, $($arg:tt)+) => {
        $crate::warnf($ctx, format_args!($($arg)+))
    };
}

/// Log a formatted error.
#[macro_export]
macro_rules! errorf {
    (logger = $logger:expr; $ctx:expr, $($arg:tt)+) => {
        $logger.errorf($ctx, format_args!($($arg)+))
    };
    ($ctx:expr, $($arg:tt)+) => {
        $crate::errorf($ctx, format_args!($($arg)+))
    };
}

/// Log a formatted fatal message, flush and exit the process.
#[macro_export]
macro_rules! fatalf {
    (logger = $logger:expr; $ctx:expr, $($arg:tt)+) => {
        $logger.fatalf($ctx, format_args!($($arg)+))
    };
    ($ctx:expr, $($arg:tt)+) => {
        $crate::fatalf($ctx, format_args!($($arg)+))
    };
}
