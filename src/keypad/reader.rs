//! Blocking key reader: scanner + debouncer + shared debounce timer.

use embedded_hal::delay::DelayNs;

use super::{Debouncer, KeySource, KeypadPort, KeypadScanner, RawKey};
use crate::log_globals::FG_LOG_STREAM;
use crate::shared::SharedState;

/// Foreground key reader.
///
/// Scans continuously; the debouncer only sees the scan taken when the
/// interrupt-driven debounce timer has run out, everything in between is
/// discarded.
pub struct KeyReader<'a, P, D> {
    scanner: KeypadScanner<P, D>,
    debouncer: Debouncer,
    shared: &'a SharedState,
    interval_ms: u8,
}

impl<'a, P: KeypadPort, D: DelayNs> KeyReader<'a, P, D> {
    pub fn new(scanner: KeypadScanner<P, D>, shared: &'a SharedState, interval_ms: u8) -> Self {
        shared.debounce().reload(interval_ms);
        Self {
            scanner,
            debouncer: Debouncer::new(),
            shared,
            interval_ms,
        }
    }

    pub fn scanner_mut(&mut self) -> &mut KeypadScanner<P, D> {
        &mut self.scanner
    }
}

impl<'a, P: KeypadPort, D: DelayNs> KeySource for KeyReader<'a, P, D> {
    fn wait_key(&mut self) -> RawKey {
        let timer = self.shared.debounce();
        self.debouncer.reset();

        let key = loop {
            let scan = self.scanner.scan();
            timer.arm();

            if timer.expired() {
                timer.reload(self.interval_ms);
                if let Some(key) = self.debouncer.evaluate(scan) {
                    break key;
                }
            }
        };

        timer.disarm();
        timer.reload(self.interval_ms);

        crate::rt_debug!(FG_LOG_STREAM, self.shared.uptime_ms(), "key {}", key.value());
        key
    }
}
