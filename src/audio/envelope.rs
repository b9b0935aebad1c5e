//! Syllable envelope: linear attack, hold, linear release
//!
//! Driven one step per sample. The index produced here selects an entry of
//! [`ENVELOPE_TABLE`](super::lut::ENVELOPE_TABLE); the table shapes the attack
//! slope, the release walks the index back down by itself.

use crate::config::params::RampWindow;
use crate::config::ATTACK_SAMPLES;

/// Envelope phase of the current syllable
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EnvelopePhase {
    /// No syllable sounding (syllable timer expired)
    Idle,
    /// Index ramping up
    Attack,
    /// Index pinned at 255
    Sustain,
    /// Index ramping down
    Release,
    /// Past the release window, index forced to 0
    Silent,
}

/// Per-syllable envelope state, owned by the interrupt context
#[derive(Debug)]
pub struct SyllableEnvelope {
    /// Samples since syllable start
    sample: u32,
    /// Current envelope table index
    index: u8,
    ramp: RampWindow,
}

impl SyllableEnvelope {
    /// Create an envelope that stays silent until [`restart`](Self::restart)
    pub const fn new() -> Self {
        Self {
            sample: u32::MAX,
            index: 0,
            ramp: RampWindow::for_duration(0),
        }
    }

    /// Start a new syllable at index 0
    #[inline]
    pub fn restart(&mut self, ramp: RampWindow) {
        self.sample = 0;
        self.index = 0;
        self.ramp = ramp;
    }

    /// Park in the silent phase (e.g. before the first syllable of a call)
    #[inline]
    pub fn silence(&mut self) {
        self.sample = u32::MAX;
        self.index = 0;
    }

    /// Index to use for the sample being generated now
    #[inline]
    pub fn index(&self) -> u8 {
        self.index
    }

    /// Samples generated since the syllable started
    #[inline]
    pub fn sample_count(&self) -> u32 {
        self.sample
    }

    /// Never [`EnvelopePhase::Idle`]; the call timing reports that
    /// between syllables.
    #[inline]
    pub fn phase(&self) -> EnvelopePhase {
        if self.sample <= ATTACK_SAMPLES {
            EnvelopePhase::Attack
        } else if self.sample <= self.ramp.ramp_down_start {
            EnvelopePhase::Sustain
        } else if self.sample <= self.ramp.ramp_down_end {
            EnvelopePhase::Release
        } else {
            EnvelopePhase::Silent
        }
    }

    /// Count one generated sample and move the index
    #[inline]
    pub fn advance(&mut self) {
        self.sample = self.sample.saturating_add(1);

        self.index = match self.phase() {
            EnvelopePhase::Attack => self.index.saturating_add(1),
            EnvelopePhase::Sustain => u8::MAX,
            EnvelopePhase::Release => self.index.saturating_sub(1),
            _ => 0,
        };
    }
}

impl Default for SyllableEnvelope {
    fn default() -> Self {
        Self::new()
    }
}
