//! Cricket call parameters and the field table used by parameter entry.

use super::{RELEASE_MS, SAMPLES_PER_MS_X2};

/// Upper entry bounds. The interrupt packs call timers into one word sized
/// from these.
pub const MAX_CHIRP_REPEAT_MS: u16 = 1500;
pub const MAX_SYLLABLES: u8 = 100;
pub const MAX_SYLLABLE_DURATION_MS: u8 = 100;
pub const MAX_SYLLABLE_REPEAT_MS: u8 = 100;

/// User-entered call shape.
///
/// Written by the foreground only while playback is stopped,
/// read by the interrupt context while playing.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct CallParameters {
    /// Time between chirp starts, 10..=1500 ms.
    pub chirp_repeat_interval_ms: u16,
    /// Syllables per chirp, 1..=100.
    pub number_of_syllables: u8,
    /// Audible length of one syllable, 5..=100 ms.
    pub syllable_duration_ms: u8,
    /// Time between syllable starts, 10..=100 ms.
    pub syllable_repeat_interval_ms: u8,
    /// Tone frequency, 500..=6000 Hz.
    pub burst_frequency_hz: u16,
}

impl CallParameters {
    /// Field cricket demo call.
    pub const DEFAULT: Self = Self {
        chirp_repeat_interval_ms: 250,
        number_of_syllables: 4,
        syllable_duration_ms: 18,
        syllable_repeat_interval_ms: 30,
        burst_frequency_hz: 4500,
    };

    /// True if every field is inside its entry range.
    pub fn is_valid(&self) -> bool {
        PARAM_FIELDS.iter().all(|f| f.accepts((f.value)(self) as u32))
    }

    /// Envelope ramp positions for the current syllable duration.
    pub fn ramp_window(&self) -> RampWindow {
        RampWindow::for_duration(self.syllable_duration_ms)
    }
}

impl Default for CallParameters {
    fn default() -> Self {
        Self::DEFAULT
    }
}

/// Sample positions where the release ramp begins and ends.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct RampWindow {
    /// Last sample of sustain (`duration * 62.5`).
    pub ramp_down_start: u32,
    /// Last sample of release (`(duration + 4) * 62.5`).
    pub ramp_down_end: u32,
}

impl RampWindow {
    pub const fn for_duration(duration_ms: u8) -> Self {
        let d = duration_ms as u32;
        Self {
            ramp_down_start: d * SAMPLES_PER_MS_X2 / 2,
            ramp_down_end: (d + RELEASE_MS) * SAMPLES_PER_MS_X2 / 2,
        }
    }
}

impl Default for RampWindow {
    fn default() -> Self {
        CallParameters::DEFAULT.ramp_window()
    }
}

/// One numeric field of the call, in entry order.
pub struct ParamField {
    pub name: &'static str,
    /// Display prompt, written at column 0.
    pub prompt: &'static str,
    pub min: u16,
    pub max: u16,
    pub apply: fn(&mut CallParameters, u16),
    pub value: fn(&CallParameters) -> u16,
}

impl ParamField {
    /// Inclusive range check.
    #[inline]
    pub fn accepts(&self, value: u32) -> bool {
        value >= self.min as u32 && value <= self.max as u32
    }
}

/// Entry order of the five call fields.
pub static PARAM_FIELDS: [ParamField; 5] = [
    ParamField {
        name: "chirp_repeat_interval",
        prompt: "ChrpRpI:",
        min: 10,
        max: MAX_CHIRP_REPEAT_MS,
        apply: set_chirp_repeat,
        value: get_chirp_repeat,
    },
    ParamField {
        name: "number_of_syllables",
        prompt: "NumSyll:",
        min: 1,
        max: MAX_SYLLABLES as u16,
        apply: set_syllables,
        value: get_syllables,
    },
    ParamField {
        name: "syllable_duration",
        prompt: "SylDurn:",
        min: 5,
        max: MAX_SYLLABLE_DURATION_MS as u16,
        apply: set_duration,
        value: get_duration,
    },
    ParamField {
        name: "syllable_repeat_interval",
        prompt: "SylRepI:",
        min: 10,
        max: MAX_SYLLABLE_REPEAT_MS as u16,
        apply: set_syllable_repeat,
        value: get_syllable_repeat,
    },
    ParamField {
        name: "burst_frequency",
        prompt: "BurFreq:",
        min: 500,
        max: 6000,
        apply: set_frequency,
        value: get_frequency,
    },
];

// Setters run after the range check, so the narrowing casts are lossless.

fn set_chirp_repeat(p: &mut CallParameters, v: u16) {
    p.chirp_repeat_interval_ms = v;
}

fn get_chirp_repeat(p: &CallParameters) -> u16 {
    p.chirp_repeat_interval_ms
}

fn set_syllables(p: &mut CallParameters, v: u16) {
    p.number_of_syllables = v as u8;
}

fn get_syllables(p: &CallParameters) -> u16 {
    p.number_of_syllables as u16
}

fn set_duration(p: &mut CallParameters, v: u16) {
    p.syllable_duration_ms = v as u8;
}

fn get_duration(p: &CallParameters) -> u16 {
    p.syllable_duration_ms as u16
}

fn set_syllable_repeat(p: &mut CallParameters, v: u16) {
    p.syllable_repeat_interval_ms = v as u8;
}

fn get_syllable_repeat(p: &CallParameters) -> u16 {
    p.syllable_repeat_interval_ms as u16
}

fn set_frequency(p: &mut CallParameters, v: u16) {
    p.burst_frequency_hz = v;
}

fn get_frequency(p: &CallParameters) -> u16 {
    p.burst_frequency_hz
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_is_valid() {
        assert!(CallParameters::DEFAULT.is_valid());
    }

    #[test]
    fn test_ramp_window_matches_sample_rate() {
        let ramp = RampWindow::for_duration(18);
        assert_eq!(ramp.ramp_down_start, 1125);
        assert_eq!(ramp.ramp_down_end, 1375);

        // Odd durations truncate the half sample
        let ramp = RampWindow::for_duration(5);
        assert_eq!(ramp.ramp_down_start, 312);
        assert_eq!(ramp.ramp_down_end, 562);
    }

    #[test]
    fn test_field_order_and_ranges() {
        let names: Vec<_> = PARAM_FIELDS.iter().map(|f| f.prompt).collect();
        assert_eq!(names, ["ChrpRpI:", "NumSyll:", "SylDurn:", "SylRepI:", "BurFreq:"]);

        let syl = &PARAM_FIELDS[2];
        assert!(syl.accepts(5));
        assert!(syl.accepts(100));
        assert!(!syl.accepts(4));
        assert!(!syl.accepts(101));
    }

    #[test]
    fn test_apply_round_trips_through_value() {
        let mut p = CallParameters::DEFAULT;
        for (i, field) in PARAM_FIELDS.iter().enumerate() {
            (field.apply)(&mut p, field.min + i as u16);
            assert_eq!((field.value)(&p), field.min + i as u16);
        }
        assert!(p.is_valid());
    }

    #[test]
    fn test_out_of_range_field_is_invalid() {
        let mut p = CallParameters::DEFAULT;
        p.burst_frequency_hz = 499;
        assert!(!p.is_valid());
    }
}
