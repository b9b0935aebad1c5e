//! Audio generation for the cricket call
//!
//! Architecture:
//! - Sine + envelope tables: 256 entries each, built at compile time
//! - DDS engine: 32-bit phase accumulator at 62.5 kHz
//! - Syllable envelope: attack / sustain / release per sample
//! - Output: 8-bit PWM duty, 128 = silence

pub mod dds;
pub mod envelope;
pub mod lut;

pub use dds::{phase_increment, DdsEngine};
pub use envelope::{EnvelopePhase, SyllableEnvelope};
pub use lut::{ENVELOPE_TABLE, LUT_SIZE, SINE_TABLE};
