//! Log output: drains both log streams into a text sink.
//!
//! On hardware the sink is the serial console (stdout of the ESP-IDF
//! runtime, fed from a background thread). On host it is stdout of the
//! offline render.

use core::fmt::Write;

use crate::logging::{LogEntry, LogStream};
use crate::{FG_LOG_STREAM, ISR_LOG_STREAM};

/// Format one entry as `[timestamp_ms] LEVEL: message`.
pub fn format_log_entry(entry: &LogEntry, out: &mut impl Write) -> core::fmt::Result {
    writeln!(
        out,
        "[{:8}] {}: {}",
        entry.timestamp_ms,
        entry.level.as_str(),
        entry.text()
    )
}

/// Drain one stream into `out`, returns the number of entries written.
pub fn drain_stream<const N: usize>(
    stream: &LogStream<N>,
    tag: &str,
    out: &mut impl Write,
) -> usize {
    let mut count = 0;

    while let Some(entry) = stream.drain() {
        let _ = format_log_entry(&entry, out);
        count += 1;
    }

    let dropped = stream.take_dropped();
    if dropped > 0 {
        let _ = writeln!(out, "[--------] WARN: {} dropped {} messages", tag, dropped);
    }

    count
}

/// Drain the interrupt stream, then the foreground stream.
pub fn drain_logs(out: &mut impl Write) -> usize {
    drain_stream(&ISR_LOG_STREAM, "isr", out) + drain_stream(&FG_LOG_STREAM, "fg", out)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::logging::LogLevel;

    #[test]
    fn test_format_log_entry() {
        let stream = LogStream::<4>::new();
        stream.push(1234, LogLevel::Info, b"call 250ms x4");
        let entry = stream.drain().unwrap();

        let mut out = String::new();
        format_log_entry(&entry, &mut out).unwrap();

        assert!(out.contains("1234"));
        assert!(out.contains("INFO"));
        assert!(out.contains("call 250ms x4"));
        assert!(out.ends_with('\n'));
    }

    #[test]
    fn test_drain_reports_dropped() {
        let stream = LogStream::<2>::new();
        stream.push(1, LogLevel::Debug, b"a");
        stream.push(2, LogLevel::Debug, b"b");
        stream.push(3, LogLevel::Debug, b"c");

        let mut out = String::new();
        assert_eq!(drain_stream(&stream, "isr", &mut out), 2);
        assert!(out.contains("isr dropped 1 messages"));
        assert!(!out.contains(": c"));

        out.clear();
        assert_eq!(drain_stream(&stream, "isr", &mut out), 0);
        assert!(out.is_empty());
    }
}
