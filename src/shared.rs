//! State shared between the sample interrupt and the foreground loop.
//!
//! # Ownership
//!
//! | Field        | Writer                          | Reader     |
//! |--------------|---------------------------------|------------|
//! | `playing`    | foreground                      | interrupt  |
//! | `restarts`   | foreground, on start            | interrupt  |
//! | `params`     | foreground, only while stopped  | interrupt  |
//! | `ramp`       | foreground, on start            | interrupt  |
//! | `timers`     | interrupt (foreground on start) | both       |
//! | `debounce`   | both (reload / countdown)       | foreground |
//! | `uptime_ms`  | interrupt                       | both       |
//!
//! Everything is a plain 32-bit atomic; the interrupt never takes a lock.
//! The four call timers are packed into one word, so a chirp restart is a
//! single store and a snapshot is either entirely before or entirely after
//! it. Parameters and ramp span two words each and are only written while
//! the interrupt is not reading them; the `playing` store publishes them.

use core::sync::atomic::{AtomicBool, AtomicU32, AtomicU8, Ordering};

use crate::call::{CallEvent, CallTimers};
use crate::config::params::{CallParameters, RampWindow};
use crate::config::DEBOUNCE_INTERVAL_MS;

/// Countdown gating how often the debouncer samples the keypad.
///
/// Decremented by the interrupt once per millisecond while armed,
/// reloaded by the foreground after each evaluation.
pub struct DebounceTimer {
    armed: AtomicBool,
    remaining: AtomicU8,
}

impl DebounceTimer {
    pub const fn new(interval_ms: u8) -> Self {
        Self {
            armed: AtomicBool::new(false),
            remaining: AtomicU8::new(interval_ms),
        }
    }

    /// Let the interrupt count this timer down.
    #[inline]
    pub fn arm(&self) {
        self.armed.store(true, Ordering::Release);
    }

    /// Stop counting.
    #[inline]
    pub fn disarm(&self) {
        self.armed.store(false, Ordering::Release);
    }

    #[inline]
    pub fn is_armed(&self) -> bool {
        self.armed.load(Ordering::Acquire)
    }

    #[inline]
    pub fn reload(&self, interval_ms: u8) {
        self.remaining.store(interval_ms, Ordering::Release);
    }

    #[inline]
    pub fn expired(&self) -> bool {
        self.remaining.load(Ordering::Acquire) == 0
    }

    #[inline]
    pub fn remaining(&self) -> u8 {
        self.remaining.load(Ordering::Acquire)
    }

    /// Millisecond tick (interrupt context). Stops at zero.
    #[inline]
    pub fn tick(&self) {
        if self.is_armed() {
            let _ = self
                .remaining
                .fetch_update(Ordering::AcqRel, Ordering::Acquire, |t| t.checked_sub(1));
        }
    }
}

/// Handle passed to both the interrupt tick and the foreground controller.
pub struct SharedState {
    playing: AtomicBool,
    restarts: AtomicU32,
    /// chirp_repeat | burst_frequency << 16
    params_lo: AtomicU32,
    /// syllables | duration << 8 | syllable_repeat << 16
    params_hi: AtomicU32,
    ramp_down_start: AtomicU32,
    ramp_down_end: AtomicU32,
    timers: AtomicU32,
    debounce: DebounceTimer,
    uptime_ms: AtomicU32,
}

const fn params_lo(p: &CallParameters) -> u32 {
    p.chirp_repeat_interval_ms as u32 | (p.burst_frequency_hz as u32) << 16
}

const fn params_hi(p: &CallParameters) -> u32 {
    p.number_of_syllables as u32
        | (p.syllable_duration_ms as u32) << 8
        | (p.syllable_repeat_interval_ms as u32) << 16
}

const fn unpack_params(lo: u32, hi: u32) -> CallParameters {
    CallParameters {
        chirp_repeat_interval_ms: lo as u16,
        burst_frequency_hz: (lo >> 16) as u16,
        number_of_syllables: hi as u8,
        syllable_duration_ms: (hi >> 8) as u8,
        syllable_repeat_interval_ms: (hi >> 16) as u8,
    }
}

impl SharedState {
    /// Stopped, default parameters, all timers expired.
    pub const fn new() -> Self {
        let params = CallParameters::DEFAULT;
        let ramp = RampWindow::for_duration(params.syllable_duration_ms);
        Self {
            playing: AtomicBool::new(false),
            restarts: AtomicU32::new(0),
            params_lo: AtomicU32::new(params_lo(&params)),
            params_hi: AtomicU32::new(params_hi(&params)),
            ramp_down_start: AtomicU32::new(ramp.ramp_down_start),
            ramp_down_end: AtomicU32::new(ramp.ramp_down_end),
            timers: AtomicU32::new(CallTimers::EXPIRED.to_bits()),
            debounce: DebounceTimer::new(DEBOUNCE_INTERVAL_MS),
            uptime_ms: AtomicU32::new(0),
        }
    }

    #[inline]
    pub fn is_playing(&self) -> bool {
        self.playing.load(Ordering::Acquire)
    }

    /// Number of [`start_playback`](Self::start_playback) calls so far.
    ///
    /// The interrupt compares it with the last value it saw to notice a
    /// start issued while already playing.
    #[inline]
    pub fn restart_count(&self) -> u32 {
        self.restarts.load(Ordering::Acquire)
    }

    #[inline]
    pub fn parameters(&self) -> CallParameters {
        unpack_params(
            self.params_lo.load(Ordering::Acquire),
            self.params_hi.load(Ordering::Acquire),
        )
    }

    /// Replace the call parameters (foreground, playback stopped).
    pub fn commit_parameters(&self, params: CallParameters) {
        debug_assert!(!self.is_playing(), "parameters written while playing");
        debug_assert!(params.is_valid(), "parameters outside entry ranges");
        self.params_lo.store(params_lo(&params), Ordering::Release);
        self.params_hi.store(params_hi(&params), Ordering::Release);
    }

    #[inline]
    pub fn ramp(&self) -> RampWindow {
        RampWindow {
            ramp_down_start: self.ramp_down_start.load(Ordering::Acquire),
            ramp_down_end: self.ramp_down_end.load(Ordering::Acquire),
        }
    }

    /// Consistent copy of all call timers.
    #[inline]
    pub fn timers(&self) -> CallTimers {
        CallTimers::from_bits(self.timers.load(Ordering::Acquire))
    }

    /// Chirp restart and syllable start for one sample (interrupt context).
    ///
    /// Compare-and-swap on the packed word: a start stored by the foreground
    /// in between is re-read, never overwritten.
    #[inline]
    pub fn advance_call(&self, params: &CallParameters) -> CallEvent {
        let mut event = CallEvent::default();
        let _ = self
            .timers
            .fetch_update(Ordering::AcqRel, Ordering::Acquire, |bits| {
                let mut timers = CallTimers::from_bits(bits);
                event = timers.advance(params);
                Some(timers.to_bits())
            });
        event
    }

    /// Millisecond tick (interrupt context).
    ///
    /// Call timers only run while playing; the debounce timer always runs.
    pub fn tick_millisecond(&self, playing: bool) {
        self.uptime_ms.fetch_add(1, Ordering::Relaxed);

        if playing {
            let _ = self
                .timers
                .fetch_update(Ordering::AcqRel, Ordering::Acquire, |bits| {
                    let mut timers = CallTimers::from_bits(bits);
                    timers.tick_ms();
                    Some(timers.to_bits())
                });
        }

        self.debounce.tick();
    }

    /// Begin playback with the committed parameters (foreground).
    ///
    /// Recomputes the ramp window, expires every timer so the first chirp
    /// starts on the next sample, and bumps the restart count so the
    /// interrupt drops a syllable that is still sounding.
    pub fn start_playback(&self) {
        let ramp = self.parameters().ramp_window();
        self.ramp_down_start.store(ramp.ramp_down_start, Ordering::Release);
        self.ramp_down_end.store(ramp.ramp_down_end, Ordering::Release);
        self.timers.store(CallTimers::EXPIRED.to_bits(), Ordering::Release);
        self.restarts.fetch_add(1, Ordering::AcqRel);
        self.playing.store(true, Ordering::Release);
    }

    /// Silence the output. Timers freeze until the next start.
    pub fn stop_playback(&self) {
        self.playing.store(false, Ordering::Release);
    }

    #[inline]
    pub fn debounce(&self) -> &DebounceTimer {
        &self.debounce
    }

    #[inline]
    pub fn uptime_ms(&self) -> u32 {
        self.uptime_ms.load(Ordering::Relaxed)
    }
}

impl Default for SharedState {
    fn default() -> Self {
        Self::new()
    }
}
