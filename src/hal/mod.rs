//! Hardware Abstraction Layer for CricketCall.
//!
//! Thin wrappers around ESP-IDF peripherals.
//! Business logic stays in core modules, HAL is just I/O.

pub mod keypad;
pub mod pwm;

pub use keypad::GpioKeypadPort;
pub use pwm::{carrier_timer, PwmAudioOut};
