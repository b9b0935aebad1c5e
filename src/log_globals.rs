//! Global log stream instances.
//!
//! One stream per execution context so each ring has a single producer.

use crate::logging::LogStream;

/// Written only from the sample interrupt (scheduler, call timing).
pub static ISR_LOG_STREAM: LogStream = LogStream::new();

/// Written only from the foreground loop (keypad, entry, controller).
pub static FG_LOG_STREAM: LogStream = LogStream::new();
