//! Sine and envelope lookup tables for the DDS engine
//!
//! Both tables have 256 entries so an 8-bit index covers one full period.
//! Built at compile time, no floating point at run time.

/// Number of entries in each table
pub const LUT_SIZE: usize = 256;

/// One sine period, `round(127 * sin(2π * i / 256))`
///
/// Index 0 = 0°, 64 = 90°, 128 = 180°, 192 = 270°
pub static SINE_TABLE: [i8; LUT_SIZE] = {
    let mut table = [0i8; LUT_SIZE];
    let mut i = 0;
    while i < LUT_SIZE {
        let angle = (i as f64) * core::f64::consts::PI * 2.0 / (LUT_SIZE as f64);
        table[i] = const_round(const_sin(angle) * 127.0) as i8;
        i += 1;
    }
    table
};

/// Attack ramp, `i >> 1` (0 to 127 across the index range)
pub static ENVELOPE_TABLE: [u8; LUT_SIZE] = {
    let mut table = [0u8; LUT_SIZE];
    let mut i = 0;
    while i < LUT_SIZE {
        table[i] = (i >> 1) as u8;
        i += 1;
    }
    table
};

/// Const-compatible sine using a Taylor series
///
/// The argument is folded into [-π/2, π/2] first, where the series
/// through x¹¹ is accurate to a few parts per million.
const fn const_sin(x: f64) -> f64 {
    use core::f64::consts::{FRAC_PI_2, PI};

    let mut x = x;
    while x > PI {
        x -= 2.0 * PI;
    }
    while x < -PI {
        x += 2.0 * PI;
    }
    if x > FRAC_PI_2 {
        x = PI - x;
    } else if x < -FRAC_PI_2 {
        x = -PI - x;
    }

    let x2 = x * x;
    let x3 = x2 * x;
    let x5 = x3 * x2;
    let x7 = x5 * x2;
    let x9 = x7 * x2;
    let x11 = x9 * x2;

    x - x3 / 6.0 + x5 / 120.0 - x7 / 5040.0 + x9 / 362_880.0 - x11 / 39_916_800.0
}

/// Round half away from zero
const fn const_round(x: f64) -> i32 {
    if x >= 0.0 {
        (x + 0.5) as i32
    } else {
        -((-x + 0.5) as i32)
    }
}
