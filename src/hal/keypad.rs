//! Keypad port over eight open-drain GPIOs.
//!
//! Bit n of the emulated port is `pins[n]`. With pull-ups enabled an
//! open-drain pin reads high unless driven low, which matches the
//! direction/level semantics the scanner expects: output bits with level 0
//! pull low, everything else floats high.

use esp_idf_svc::hal::gpio::{AnyIOPin, InputOutput, PinDriver, Pull};
use esp_idf_svc::sys::EspError;

use crate::keypad::KeypadPort;

pub struct GpioKeypadPort<'d> {
    pins: [PinDriver<'d, AnyIOPin, InputOutput>; 8],
}

impl<'d> GpioKeypadPort<'d> {
    /// Configure the pins (port bit order) as open-drain with pull-ups.
    pub fn new(pins: [AnyIOPin; 8]) -> Result<Self, EspError> {
        let [p0, p1, p2, p3, p4, p5, p6, p7] = pins;
        let pins = [
            open_drain(p0)?,
            open_drain(p1)?,
            open_drain(p2)?,
            open_drain(p3)?,
            open_drain(p4)?,
            open_drain(p5)?,
            open_drain(p6)?,
            open_drain(p7)?,
        ];
        Ok(Self { pins })
    }
}

fn open_drain<'d>(pin: AnyIOPin) -> Result<PinDriver<'d, AnyIOPin, InputOutput>, EspError> {
    let mut driver = PinDriver::input_output_od(pin)?;
    driver.set_pull(Pull::Up)?;
    driver.set_high()?;
    Ok(driver)
}

impl KeypadPort for GpioKeypadPort<'_> {
    fn drive(&mut self, direction: u8, level: u8) {
        for (bit, pin) in self.pins.iter_mut().enumerate() {
            let pull_low = direction & (1 << bit) != 0 && level & (1 << bit) == 0;
            // Level writes on a configured pin cannot fail
            let _ = if pull_low { pin.set_low() } else { pin.set_high() };
        }
    }

    fn read(&mut self) -> u8 {
        self.pins
            .iter()
            .enumerate()
            .fold(0u8, |acc, (bit, pin)| acc | ((pin.is_high() as u8) << bit))
    }
}
