//! Sine and envelope lookup table tests

use cricket_call::audio::lut::{ENVELOPE_TABLE, LUT_SIZE, SINE_TABLE};

#[test]
fn test_lut_size() {
    assert_eq!(SINE_TABLE.len(), LUT_SIZE);
    assert_eq!(ENVELOPE_TABLE.len(), LUT_SIZE);
    assert_eq!(LUT_SIZE, 256);
}

#[test]
fn test_sine_matches_rounded_sine() {
    for (i, &value) in SINE_TABLE.iter().enumerate() {
        let angle = 2.0 * std::f64::consts::PI * i as f64 / LUT_SIZE as f64;
        let expected = (127.0 * angle.sin()).round() as i8;
        assert_eq!(value, expected, "SINE_TABLE[{}]", i);
    }
}

#[test]
fn test_sine_zero_crossing() {
    assert_eq!(SINE_TABLE[0], 0);
    assert_eq!(SINE_TABLE[64], 127);
    assert_eq!(SINE_TABLE[128], 0);
    assert_eq!(SINE_TABLE[192], -127);
}

#[test]
fn test_sine_symmetry() {
    for i in 1..128 {
        assert_eq!(
            SINE_TABLE[i],
            -SINE_TABLE[LUT_SIZE - i],
            "odd symmetry at {}",
            i
        );
    }
}

#[test]
fn test_envelope_is_half_index() {
    for (i, &value) in ENVELOPE_TABLE.iter().enumerate() {
        assert_eq!(value as usize, i >> 1);
    }
    assert_eq!(ENVELOPE_TABLE[255], 127);
}
