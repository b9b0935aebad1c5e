//! Sample-rate interrupt body.
//!
//! One [`Scheduler::tick`] per timer interrupt at [`SAMPLE_RATE_HZ`]:
//! produce the PWM duty for this sample, then derive the millisecond tick
//! that drives the call timers and the keypad debounce timer.
//!
//! Never blocks, never fails.

use crate::call::CallTiming;
use crate::config::{OUTPUT_MIDPOINT, SAMPLE_RATE_HZ};
use crate::log_globals::ISR_LOG_STREAM;
use crate::shared::SharedState;

/// Fractional divider from the sample rate down to 1 kHz.
///
/// 62.5 samples per millisecond: fires alternately after 62 and 63 samples,
/// exactly 1000 times per 62_500 samples.
#[derive(Debug, Default)]
pub struct MsDivider {
    phase: u32,
}

impl MsDivider {
    pub const fn new() -> Self {
        Self { phase: 0 }
    }

    /// Count one sample, true when a millisecond boundary is crossed.
    #[inline]
    pub fn tick(&mut self) -> bool {
        self.phase += 1000;
        if self.phase >= SAMPLE_RATE_HZ {
            self.phase -= SAMPLE_RATE_HZ;
            true
        } else {
            false
        }
    }
}

/// Interrupt-context driver.
pub struct Scheduler<'a> {
    shared: &'a SharedState,
    timing: CallTiming,
    divider: MsDivider,
    was_playing: bool,
    restarts_seen: u32,
}

impl<'a> Scheduler<'a> {
    pub fn new(shared: &'a SharedState) -> Self {
        Self {
            shared,
            timing: CallTiming::new(),
            divider: MsDivider::new(),
            was_playing: false,
            restarts_seen: shared.restart_count(),
        }
    }

    /// Run one sample period and return the PWM duty to load.
    #[inline]
    pub fn tick(&mut self) -> u8 {
        let playing = self.shared.is_playing();
        let restarts = self.shared.restart_count();

        // Start, stop, or a start while already playing
        if playing != self.was_playing || restarts != self.restarts_seen {
            self.timing.reset();
            crate::rt_debug!(
                ISR_LOG_STREAM,
                self.shared.uptime_ms(),
                "output {}",
                if playing { "on" } else { "off" }
            );
            self.was_playing = playing;
            self.restarts_seen = restarts;
        }

        let duty = if playing {
            self.timing.sample_tick(self.shared)
        } else {
            OUTPUT_MIDPOINT
        };

        if self.divider.tick() {
            self.shared.tick_millisecond(playing);
        }

        duty
    }

    pub fn timing(&self) -> &CallTiming {
        &self.timing
    }

    pub fn shared(&self) -> &'a SharedState {
        self.shared
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_divider_exact_rate() {
        let mut div = MsDivider::new();
        let fired = (0..SAMPLE_RATE_HZ).filter(|_| div.tick()).count();
        assert_eq!(fired, 1000);
    }

    #[test]
    fn test_divider_spacing() {
        let mut div = MsDivider::new();
        let mut last = 0u32;
        let mut gaps = Vec::new();
        for n in 1..=1000u32 {
            if div.tick() {
                gaps.push(n - last);
                last = n;
            }
        }
        assert!(gaps.iter().all(|&g| g == 62 || g == 63), "gaps: {:?}", gaps);
    }
}
