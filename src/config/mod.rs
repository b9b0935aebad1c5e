//! Module: config
//!
//! Purpose: Timing constants and foreground configuration for CricketCall.
//!
//! Architecture:
//! - Constants: sample rate, envelope windows, debounce interval
//! - [`KeypadConfig`]: key assignments and digit entry policy
//! - [`params`]: call parameters and the ordered field table used by entry
//!
//! Safety: Constants only. Shared runtime state lives in [`crate::shared`].

pub mod params;

pub use params::{CallParameters, ParamField, RampWindow, PARAM_FIELDS};

use crate::keypad::RawKey;

/// CPU clock driving the sample timer.
pub const CPU_CLOCK_HZ: u32 = 16_000_000;

/// Timer overflow divider (8-bit PWM period).
pub const PWM_DIVIDER: u32 = 256;

/// DDS sample rate: one interrupt per PWM period.
pub const SAMPLE_RATE_HZ: u32 = CPU_CLOCK_HZ / PWM_DIVIDER;

/// Samples per millisecond, doubled (62.5 samples/ms kept exact).
pub const SAMPLES_PER_MS_X2: u32 = SAMPLE_RATE_HZ * 2 / 1000;

/// Attack window in samples (4 ms at 62.5 kHz).
///
/// Must stay below 256: the envelope index is 8 bits wide.
pub const ATTACK_SAMPLES: u32 = 250;

/// Release window in milliseconds, appended after the syllable duration.
pub const RELEASE_MS: u32 = 4;

/// Extra milliseconds the syllable timer runs past the nominal duration.
///
/// Covers the release window plus a silent tail.
pub const SYLLABLE_GUARD_MS: u8 = 8;

/// PWM duty for silence (50 %).
pub const OUTPUT_MIDPOINT: u8 = 128;

/// Keypad sampling period for the debouncer.
pub const DEBOUNCE_INTERVAL_MS: u8 = 30;

/// Settling time after switching keypad port direction.
pub const KEY_SETTLE_US: u32 = 5;

/// Maximum number of digits held for one numeric entry.
pub const KEY_BUFFER_LEN: usize = 5;

const _: () = assert!(ATTACK_SAMPLES < 256);
const _: () = assert!(SAMPLE_RATE_HZ == 62_500);

/// What to do with digits typed after the key buffer is full.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum DigitOverflow {
    /// Drop extra digits, keep waiting for the terminator.
    Ignore,
    /// End entry as soon as the buffer is full.
    Finish,
}

impl Default for DigitOverflow {
    fn default() -> Self {
        DigitOverflow::Ignore
    }
}

/// Foreground keypad configuration.
#[derive(Clone, Copy, Debug)]
pub struct KeypadConfig {
    /// Debounce sampling period in milliseconds.
    pub debounce_ms: u8,
    /// Key that ends a numeric entry.
    pub terminator: RawKey,
    /// Key that starts playback (run mode).
    pub start: RawKey,
    /// Key that stops playback and re-enters configuration (run mode).
    pub stop: RawKey,
    /// Policy for digits beyond the key buffer.
    pub overflow: DigitOverflow,
}

impl KeypadConfig {
    pub const DEFAULT: Self = Self {
        debounce_ms: DEBOUNCE_INTERVAL_MS,
        terminator: RawKey::TERMINATOR,
        start: RawKey::START,
        stop: RawKey::STOP,
        overflow: DigitOverflow::Ignore,
    };
}

impl Default for KeypadConfig {
    fn default() -> Self {
        Self::DEFAULT
    }
}
