//! Direct digital synthesis engine
//!
//! 32-bit phase accumulator, top 8 bits index the sine table.
//! Output is an 8-bit PWM duty centred on [`OUTPUT_MIDPOINT`].

use super::lut::{ENVELOPE_TABLE, SINE_TABLE};
use crate::config::{OUTPUT_MIDPOINT, SAMPLE_RATE_HZ};

/// Phase increment for `freq_hz` at the DDS sample rate
///
/// `round(2^32 * freq / sample_rate)`, e.g. 1000 Hz → 68_719_477
#[inline]
pub const fn phase_increment(freq_hz: u32) -> u32 {
    let rate = SAMPLE_RATE_HZ as u64;
    ((((freq_hz as u64) << 32) + rate / 2) / rate) as u32
}

/// Phase accumulator oscillator
///
/// The increment is fixed for a whole syllable; [`DdsEngine::retune`]
/// sets it and phase-locks the accumulator at every syllable start.
#[derive(Debug, Default)]
pub struct DdsEngine {
    /// Phase accumulator, wraps modulo 2^32
    accumulator: u32,
    /// Phase advance per sample
    increment: u32,
}

impl DdsEngine {
    pub const fn new() -> Self {
        Self {
            accumulator: 0,
            increment: 0,
        }
    }

    /// Load a new frequency and reset phase to 0°
    #[inline]
    pub fn retune(&mut self, freq_hz: u16) {
        self.increment = phase_increment(freq_hz as u32);
        self.accumulator = 0;
    }

    #[inline]
    pub fn increment(&self) -> u32 {
        self.increment
    }

    #[inline]
    pub fn accumulator(&self) -> u32 {
        self.accumulator
    }

    /// Advance one sample and return the PWM duty
    ///
    /// `128 + (sine[phase >> 24] * envelope[envelope_index]) >> 7`.
    /// Sine is within ±127 and the envelope within 0..=127, so the
    /// result always lies in 1..=254.
    #[inline]
    pub fn step(&mut self, envelope_index: u8) -> u8 {
        self.accumulator = self.accumulator.wrapping_add(self.increment);
        let sample_index = (self.accumulator >> 24) as usize;

        let shaped =
            (SINE_TABLE[sample_index] as i32 * ENVELOPE_TABLE[envelope_index as usize] as i32) >> 7;

        (OUTPUT_MIDPOINT as i32 + shaped) as u8
    }
}
