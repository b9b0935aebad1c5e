//! Interrupt-safe logging for CricketCall.
//!
//! # Architecture
//!
//! ```text
//! Sample ISR             LogStream            Drain (console thread)
//! ──────────             ─────────            ──────────────────────
//!
//! rt_trace!() ────────▶ [L0][L1][L2] ──────▶ serial / stdout
//! Foreground
//! rt_info!()  ────────▶ [L0][L1][L2] ──────▶
//!                       lock-free             blocking ok
//! ```
//!
//! # Rules
//!
//! - Messages are formatted into a stack buffer, never the heap
//! - Pushing never waits for the drain; a full ring drops and counts
//! - One stream per execution context, drained by a single consumer

use core::cell::UnsafeCell;
use core::sync::atomic::{AtomicU32, Ordering};

/// Maximum message length.
pub const MAX_MSG_LEN: usize = 96;

/// Log buffer size (number of entries).
pub const LOG_BUFFER_SIZE: usize = 64;

/// Log level.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord)]
#[repr(u8)]
pub enum LogLevel {
    Error = 0,
    Warn = 1,
    Info = 2,
    Debug = 3,
    Trace = 4,
}

impl LogLevel {
    /// Convert to string for output.
    pub fn as_str(self) -> &'static str {
        match self {
            LogLevel::Error => "ERROR",
            LogLevel::Warn => "WARN",
            LogLevel::Info => "INFO",
            LogLevel::Debug => "DEBUG",
            LogLevel::Trace => "TRACE",
        }
    }
}

/// A single log entry.
#[derive(Clone, Copy)]
pub struct LogEntry {
    /// Uptime in milliseconds.
    pub timestamp_ms: u32,
    pub level: LogLevel,
    /// Message length.
    pub len: u8,
    /// Message bytes (not null-terminated).
    pub msg: [u8; MAX_MSG_LEN],
}

impl LogEntry {
    const EMPTY: Self = Self {
        timestamp_ms: 0,
        level: LogLevel::Info,
        len: 0,
        msg: [0; MAX_MSG_LEN],
    };

    /// Message text, lossy on a truncated multi-byte character.
    pub fn text(&self) -> &str {
        let bytes = &self.msg[..self.len as usize];
        match core::str::from_utf8(bytes) {
            Ok(s) => s,
            Err(e) => core::str::from_utf8(&bytes[..e.valid_up_to()]).unwrap_or(""),
        }
    }
}

impl Default for LogEntry {
    fn default() -> Self {
        Self::EMPTY
    }
}

/// One ring slot and its publication stamp.
///
/// For the slot serving write position `pos` the stamp reads `lap` while
/// free and `lap + 1` once written, where `lap = pos & !MASK`. Draining
/// advances it to the next lap.
struct Slot {
    stamp: AtomicU32,
    entry: UnsafeCell<LogEntry>,
}

#[allow(clippy::declare_interior_mutable_const)]
const EMPTY_SLOT: Slot = Slot {
    stamp: AtomicU32::new(0),
    entry: UnsafeCell::new(LogEntry::EMPTY),
};

/// Lock-free bounded log ring.
///
/// Producers claim a slot with a compare-and-swap on `write_idx`, fill it,
/// then publish it through the slot stamp. The drain only takes slots whose
/// stamp says they are complete, so an entry is never read half-written.
/// Nothing here spins on another context: an interrupt preempting a
/// producer of the same stream claims the next slot.
pub struct LogStream<const N: usize = LOG_BUFFER_SIZE> {
    slots: [Slot; N],
    write_idx: AtomicU32,
    read_idx: AtomicU32,
    dropped: AtomicU32,
}

// SAFETY: A slot's entry is written only by the producer that won the
// `write_idx` swap for it and read only by the consumer that won the
// `read_idx` swap, each gated by the slot stamp (Release on publish,
// Acquire on check).
unsafe impl<const N: usize> Sync for LogStream<N> {}
unsafe impl<const N: usize> Send for LogStream<N> {}

impl<const N: usize> LogStream<N> {
    const MASK: u32 = (N as u32).wrapping_sub(1);

    /// Create a new empty log stream.
    pub const fn new() -> Self {
        assert!(N.is_power_of_two(), "Log buffer size must be power of 2");

        Self {
            slots: [EMPTY_SLOT; N],
            write_idx: AtomicU32::new(0),
            read_idx: AtomicU32::new(0),
            dropped: AtomicU32::new(0),
        }
    }

    #[inline]
    fn slot(&self, pos: u32) -> &Slot {
        &self.slots[(pos & Self::MASK) as usize]
    }

    /// Push a log entry, never waits for the consumer.
    ///
    /// Returns `false` if the ring was full and the message was dropped.
    #[inline]
    pub fn push(&self, timestamp_ms: u32, level: LogLevel, msg: &[u8]) -> bool {
        let len = msg.len().min(MAX_MSG_LEN);
        let mut pos = self.write_idx.load(Ordering::Relaxed);

        loop {
            let slot = self.slot(pos);
            let lap = pos & !Self::MASK;
            let ahead = slot.stamp.load(Ordering::Acquire).wrapping_sub(lap) as i32;

            if ahead < 0 {
                // Still holds last lap's entry
                self.dropped.fetch_add(1, Ordering::Relaxed);
                return false;
            }

            if ahead > 0 {
                // Another producer took this position
                pos = self.write_idx.load(Ordering::Relaxed);
                continue;
            }

            match self.write_idx.compare_exchange_weak(
                pos,
                pos.wrapping_add(1),
                Ordering::Relaxed,
                Ordering::Relaxed,
            ) {
                Ok(_) => {
                    // SAFETY: winning the swap makes this the only writer of
                    // the slot until the stamp below publishes it
                    let entry = unsafe { &mut *slot.entry.get() };
                    entry.timestamp_ms = timestamp_ms;
                    entry.level = level;
                    entry.len = len as u8;
                    entry.msg[..len].copy_from_slice(&msg[..len]);

                    slot.stamp.store(lap.wrapping_add(1), Ordering::Release);
                    return true;
                }
                Err(current) => pos = current,
            }
        }
    }

    /// Format and push in one step.
    #[inline]
    pub fn push_fmt(&self, timestamp_ms: u32, level: LogLevel, args: core::fmt::Arguments<'_>) -> bool {
        let mut buf = [0u8; MAX_MSG_LEN];
        let len = format_to_buffer(&mut buf, args);
        self.push(timestamp_ms, level, &buf[..len])
    }

    /// Take the oldest entry, `None` when empty.
    #[inline]
    pub fn drain(&self) -> Option<LogEntry> {
        let mut pos = self.read_idx.load(Ordering::Relaxed);

        loop {
            let slot = self.slot(pos);
            let lap = pos & !Self::MASK;
            let ahead = slot
                .stamp
                .load(Ordering::Acquire)
                .wrapping_sub(lap.wrapping_add(1)) as i32;

            if ahead < 0 {
                // Not published yet
                return None;
            }

            if ahead > 0 {
                pos = self.read_idx.load(Ordering::Relaxed);
                continue;
            }

            match self.read_idx.compare_exchange_weak(
                pos,
                pos.wrapping_add(1),
                Ordering::Relaxed,
                Ordering::Relaxed,
            ) {
                Ok(_) => {
                    // SAFETY: the stamp shows a complete entry and winning the
                    // swap makes this the only reader of it
                    let entry = unsafe { *slot.entry.get() };
                    slot.stamp.store(lap.wrapping_add(N as u32), Ordering::Release);
                    return Some(entry);
                }
                Err(current) => pos = current,
            }
        }
    }

    /// Get count of dropped messages.
    #[inline]
    pub fn dropped(&self) -> u32 {
        self.dropped.load(Ordering::Relaxed)
    }

    /// Read and zero the dropped counter.
    #[inline]
    pub fn take_dropped(&self) -> u32 {
        self.dropped.swap(0, Ordering::Relaxed)
    }

    /// Get number of entries claimed and not yet drained.
    #[inline]
    pub fn pending(&self) -> u32 {
        let write = self.write_idx.load(Ordering::Acquire);
        let read = self.read_idx.load(Ordering::Acquire);
        write.wrapping_sub(read)
    }
}

impl<const N: usize> Default for LogStream<N> {
    fn default() -> Self {
        Self::new()
    }
}

/// Format a message into a buffer, truncating at the end.
///
/// Returns the number of bytes written.
#[inline]
pub fn format_to_buffer(buf: &mut [u8], args: core::fmt::Arguments<'_>) -> usize {
    use core::fmt::Write;

    struct BufWriter<'a> {
        buf: &'a mut [u8],
        pos: usize,
    }

    impl Write for BufWriter<'_> {
        fn write_str(&mut self, s: &str) -> core::fmt::Result {
            let bytes = s.as_bytes();
            let to_write = bytes.len().min(self.buf.len() - self.pos);
            self.buf[self.pos..self.pos + to_write].copy_from_slice(&bytes[..to_write]);
            self.pos += to_write;
            Ok(())
        }
    }

    let mut writer = BufWriter { buf, pos: 0 };
    let _ = core::fmt::write(&mut writer, args);
    writer.pos
}

/// Non-blocking log macro.
///
/// ```ignore
/// rt_log!(LogLevel::Info, FG_LOG_STREAM, shared.uptime_ms(), "key {}", key);
/// ```
#[macro_export]
macro_rules! rt_log {
    ($level:expr, $stream:expr, $timestamp:expr, $($arg:tt)*) => {{
        let _ = $stream.push_fmt($timestamp, $level, format_args!($($arg)*));
    }};
}

#[macro_export]
macro_rules! rt_error {
    ($stream:expr, $timestamp:expr, $($arg:tt)*) => {
        $crate::rt_log!($crate::logging::LogLevel::Error, $stream, $timestamp, $($arg)*)
    };
}

#[macro_export]
macro_rules! rt_warn {
    ($stream:expr, $timestamp:expr, $($arg:tt)*) => {
        $crate::rt_log!($crate::logging::LogLevel::Warn, $stream, $timestamp, $($arg)*)
    };
}

#[macro_export]
macro_rules! rt_info {
    ($stream:expr, $timestamp:expr, $($arg:tt)*) => {
        $crate::rt_log!($crate::logging::LogLevel::Info, $stream, $timestamp, $($arg)*)
    };
}

#[macro_export]
macro_rules! rt_debug {
    ($stream:expr, $timestamp:expr, $($arg:tt)*) => {
        $crate::rt_log!($crate::logging::LogLevel::Debug, $stream, $timestamp, $($arg)*)
    };
}

/// Maximum verbosity; used for per-chirp and per-syllable events.
#[macro_export]
macro_rules! rt_trace {
    ($stream:expr, $timestamp:expr, $($arg:tt)*) => {
        $crate::rt_log!($crate::logging::LogLevel::Trace, $stream, $timestamp, $($arg)*)
    };
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_log_stream_basic() {
        let stream = LogStream::<16>::new();

        assert!(stream.push(1000, LogLevel::Info, b"chirp start"));
        assert_eq!(stream.pending(), 1);

        let entry = stream.drain().unwrap();
        assert_eq!(entry.timestamp_ms, 1000);
        assert_eq!(entry.level, LogLevel::Info);
        assert_eq!(entry.text(), "chirp start");

        assert!(stream.drain().is_none());
    }

    #[test]
    fn test_log_stream_full_drops() {
        let stream = LogStream::<4>::new();

        for t in 0..4 {
            assert!(stream.push(t, LogLevel::Info, b"x"));
        }
        assert!(!stream.push(5, LogLevel::Info, b"5"));
        assert_eq!(stream.take_dropped(), 1);
        assert_eq!(stream.dropped(), 0);

        stream.drain();
        assert!(stream.push(6, LogLevel::Info, b"6"));
    }

    #[test]
    fn test_macro_formats_and_truncates() {
        let stream = LogStream::<4>::new();
        crate::rt_info!(stream, 7, "key {}", 10);
        assert_eq!(stream.drain().unwrap().text(), "key 10");

        let long = "x".repeat(MAX_MSG_LEN * 2);
        crate::rt_warn!(stream, 8, "{}", long);
        let entry = stream.drain().unwrap();
        assert_eq!(entry.len as usize, MAX_MSG_LEN);
        assert_eq!(entry.level, LogLevel::Warn);
    }

    #[test]
    fn test_producer_consumer_threads() {
        use std::sync::Arc;
        use std::thread;

        let stream = Arc::new(LogStream::<64>::new());
        let producer = {
            let stream = Arc::clone(&stream);
            thread::spawn(move || {
                for t in 0..500u32 {
                    while !stream.push(t, LogLevel::Debug, b"tick") {
                        thread::yield_now();
                    }
                }
            })
        };

        let mut next = 0u32;
        while next < 500 {
            if let Some(entry) = stream.drain() {
                assert_eq!(entry.timestamp_ms, next, "entries arrive in order");
                next += 1;
            } else {
                thread::yield_now();
            }
        }
        producer.join().unwrap();
        assert_eq!(stream.pending(), 0);
    }

    #[test]
    fn test_concurrent_producers_lose_nothing() {
        use std::thread;

        let stream = LogStream::<8>::new();
        let mut seen = [0u32; 2];

        thread::scope(|s| {
            for id in 0..2u32 {
                let stream = &stream;
                s.spawn(move || {
                    for t in 0..300u32 {
                        while !stream.push(id, LogLevel::Trace, &t.to_le_bytes()) {
                            thread::yield_now();
                        }
                    }
                });
            }

            let mut total = 0;
            while total < 600 {
                match stream.drain() {
                    Some(entry) => {
                        let id = entry.timestamp_ms as usize;
                        let bytes = [entry.msg[0], entry.msg[1], entry.msg[2], entry.msg[3]];
                        assert_eq!(entry.len, 4, "entry read whole");
                        assert_eq!(u32::from_le_bytes(bytes), seen[id], "per-producer order");
                        seen[id] += 1;
                        total += 1;
                    }
                    None => thread::yield_now(),
                }
            }
        });

        assert_eq!(seen, [300, 300]);
        assert_eq!(stream.pending(), 0);
    }
}
