//! Call timing: chirp → syllable-repeat → syllable-duration.
//!
//! Three countdown timers decide when the DDS engine sounds and when a new
//! syllable reseeds phase and envelope. The timers themselves live in
//! [`SharedState`] as one packed word; everything in this module runs in the
//! interrupt context.
//!
//! # Per-sample order
//!
//! 1. Chirp timer at 0 → reload all four timer fields at once
//! 2. Syllable-repeat timer at 0 with syllables left → start a syllable
//! 3. Syllable-duration timer above 0 → emit a shaped sample, else silence

use crate::audio::{DdsEngine, EnvelopePhase, SyllableEnvelope};
use crate::config::params::{
    CallParameters, MAX_CHIRP_REPEAT_MS, MAX_SYLLABLES, MAX_SYLLABLE_DURATION_MS,
    MAX_SYLLABLE_REPEAT_MS,
};
use crate::config::{OUTPUT_MIDPOINT, SYLLABLE_GUARD_MS};
use crate::log_globals::ISR_LOG_STREAM;
use crate::shared::SharedState;

/// Countdown timers of the running call, in milliseconds.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct CallTimers {
    /// Time until the next chirp starts.
    pub chirp_repeat: u16,
    /// Time until the next syllable starts.
    pub syllable_repeat: u8,
    /// Time the current syllable keeps the engine running.
    pub syllable_duration: u8,
    /// Syllables left in the current chirp.
    pub syllable_count: u8,
}

/// What [`CallTimers::advance`] did on this sample.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct CallEvent {
    pub chirp_started: bool,
    pub syllable_started: bool,
    /// Syllable-duration timer is running: the engine produces audio.
    pub sounding: bool,
}

impl CallTimers {
    /// All timers expired: the next sample starts a chirp.
    pub const EXPIRED: Self = Self {
        chirp_repeat: 0,
        syllable_repeat: 0,
        syllable_duration: 0,
        syllable_count: 0,
    };

    /// Timer values at the start of a chirp.
    pub fn chirp_start(params: &CallParameters) -> Self {
        Self {
            chirp_repeat: params.chirp_repeat_interval_ms,
            syllable_repeat: params.syllable_repeat_interval_ms,
            syllable_duration: syllable_window(params),
            syllable_count: params.number_of_syllables,
        }
    }

    /// Evaluate chirp and syllable transitions for one sample.
    ///
    /// The chirp reload replaces all four fields in one assignment; callers
    /// publish the result with a single store of [`CallTimers::to_bits`].
    pub fn advance(&mut self, params: &CallParameters) -> CallEvent {
        let mut event = CallEvent::default();

        if self.chirp_repeat == 0 {
            *self = Self::chirp_start(params);
            event.chirp_started = true;
        }

        if self.syllable_repeat == 0 && self.syllable_count > 0 {
            self.syllable_repeat = params.syllable_repeat_interval_ms;
            self.syllable_duration = syllable_window(params);
            self.syllable_count -= 1;
            event.syllable_started = true;
        }

        event.sounding = self.syllable_duration > 0;
        event
    }

    /// One millisecond elapsed. Timers stop at zero.
    #[inline]
    pub fn tick_ms(&mut self) {
        self.chirp_repeat = self.chirp_repeat.saturating_sub(1);
        self.syllable_repeat = self.syllable_repeat.saturating_sub(1);
        self.syllable_duration = self.syllable_duration.saturating_sub(1);
    }
}

// Packed layout, LSB first: chirp_repeat 11 bits, then syllable_repeat,
// syllable_duration, syllable_count at 7 bits each.
const CHIRP_BITS: u32 = 11;
const FIELD_BITS: u32 = 7;
const CHIRP_MASK: u32 = (1 << CHIRP_BITS) - 1;
const FIELD_MASK: u32 = (1 << FIELD_BITS) - 1;
const REPEAT_SHIFT: u32 = CHIRP_BITS;
const DURATION_SHIFT: u32 = CHIRP_BITS + FIELD_BITS;
const COUNT_SHIFT: u32 = CHIRP_BITS + 2 * FIELD_BITS;

const _: () = assert!(CHIRP_BITS + 3 * FIELD_BITS == u32::BITS);
const _: () = assert!(MAX_CHIRP_REPEAT_MS as u32 <= CHIRP_MASK);
const _: () = assert!(MAX_SYLLABLE_REPEAT_MS as u32 <= FIELD_MASK);
const _: () = assert!(MAX_SYLLABLE_DURATION_MS as u32 + SYLLABLE_GUARD_MS as u32 <= FIELD_MASK);
const _: () = assert!(MAX_SYLLABLES as u32 <= FIELD_MASK);

impl CallTimers {
    /// Pack into one word for the shared atomic.
    ///
    /// Lossless for timers seeded from parameters inside the entry ranges.
    #[inline]
    pub const fn to_bits(self) -> u32 {
        (self.chirp_repeat as u32 & CHIRP_MASK)
            | ((self.syllable_repeat as u32 & FIELD_MASK) << REPEAT_SHIFT)
            | ((self.syllable_duration as u32 & FIELD_MASK) << DURATION_SHIFT)
            | ((self.syllable_count as u32 & FIELD_MASK) << COUNT_SHIFT)
    }

    #[inline]
    pub const fn from_bits(bits: u32) -> Self {
        Self {
            chirp_repeat: (bits & CHIRP_MASK) as u16,
            syllable_repeat: ((bits >> REPEAT_SHIFT) & FIELD_MASK) as u8,
            syllable_duration: ((bits >> DURATION_SHIFT) & FIELD_MASK) as u8,
            syllable_count: ((bits >> COUNT_SHIFT) & FIELD_MASK) as u8,
        }
    }
}

#[inline]
fn syllable_window(params: &CallParameters) -> u8 {
    params.syllable_duration_ms.saturating_add(SYLLABLE_GUARD_MS)
}

/// Interrupt-owned half of the call: oscillator plus envelope.
#[derive(Debug, Default)]
pub struct CallTiming {
    dds: DdsEngine,
    envelope: SyllableEnvelope,
    sounding: bool,
}

impl CallTiming {
    pub const fn new() -> Self {
        Self {
            dds: DdsEngine::new(),
            envelope: SyllableEnvelope::new(),
            sounding: false,
        }
    }

    /// Forget the current syllable; called on every start, restart and stop.
    pub fn reset(&mut self) {
        self.envelope.silence();
        self.sounding = false;
    }

    /// Produce one output sample while playing.
    #[inline]
    pub fn sample_tick(&mut self, shared: &SharedState) -> u8 {
        let params = shared.parameters();
        let event = shared.advance_call(&params);

        if event.chirp_started {
            crate::rt_trace!(ISR_LOG_STREAM, shared.uptime_ms(), "chirp start");
        }

        if event.syllable_started {
            self.envelope.restart(shared.ramp());
            self.dds.retune(params.burst_frequency_hz);
            crate::rt_trace!(
                ISR_LOG_STREAM,
                shared.uptime_ms(),
                "syllable @ {} Hz",
                params.burst_frequency_hz
            );
        }

        self.sounding = event.sounding;
        if !self.sounding {
            return OUTPUT_MIDPOINT;
        }

        let duty = self.dds.step(self.envelope.index());
        self.envelope.advance();
        duty
    }

    /// Current envelope phase, [`EnvelopePhase::Idle`] between syllables.
    pub fn phase(&self) -> EnvelopePhase {
        if self.sounding {
            self.envelope.phase()
        } else {
            EnvelopePhase::Idle
        }
    }

    pub fn envelope(&self) -> &SyllableEnvelope {
        &self.envelope
    }

    pub fn dds(&self) -> &DdsEngine {
        &self.dds
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn params() -> CallParameters {
        CallParameters {
            chirp_repeat_interval_ms: 250,
            number_of_syllables: 4,
            syllable_duration_ms: 18,
            syllable_repeat_interval_ms: 30,
            burst_frequency_hz: 4500,
        }
    }

    #[test]
    fn test_expired_timers_start_chirp() {
        let mut timers = CallTimers::EXPIRED;
        let event = timers.advance(&params());

        assert!(event.chirp_started);
        assert!(!event.syllable_started);
        assert_eq!(timers, CallTimers::chirp_start(&params()));
        assert_eq!(timers.syllable_duration, 26);
    }

    #[test]
    fn test_syllable_starts_when_repeat_expires() {
        let p = params();
        let mut timers = CallTimers::chirp_start(&p);
        timers.syllable_repeat = 0;

        let event = timers.advance(&p);
        assert!(event.syllable_started);
        assert!(event.sounding);
        assert_eq!(timers.syllable_count, 3);
        assert_eq!(timers.syllable_repeat, 30);
    }

    #[test]
    fn test_no_syllable_when_count_exhausted() {
        let p = params();
        let mut timers = CallTimers {
            chirp_repeat: 100,
            syllable_repeat: 0,
            syllable_duration: 0,
            syllable_count: 0,
        };

        let event = timers.advance(&p);
        assert!(!event.syllable_started);
        assert!(!event.sounding);
    }

    #[test]
    fn test_tick_saturates_at_zero() {
        let mut timers = CallTimers {
            chirp_repeat: 1,
            syllable_repeat: 0,
            syllable_duration: 2,
            syllable_count: 3,
        };
        timers.tick_ms();
        timers.tick_ms();
        timers.tick_ms();
        assert_eq!(timers.chirp_repeat, 0);
        assert_eq!(timers.syllable_repeat, 0);
        assert_eq!(timers.syllable_duration, 0);
        assert_eq!(timers.syllable_count, 3, "count is not a timer");
    }

    #[test]
    fn test_widest_call_fits_one_word() {
        let widest = CallParameters {
            chirp_repeat_interval_ms: MAX_CHIRP_REPEAT_MS,
            number_of_syllables: MAX_SYLLABLES,
            syllable_duration_ms: MAX_SYLLABLE_DURATION_MS,
            syllable_repeat_interval_ms: MAX_SYLLABLE_REPEAT_MS,
            burst_frequency_hz: 6000,
        };
        let timers = CallTimers::chirp_start(&widest);

        assert_eq!(timers.syllable_duration, 108);
        assert_eq!(CallTimers::from_bits(timers.to_bits()), timers);
        assert_eq!(CallTimers::EXPIRED.to_bits(), 0);
    }
}
