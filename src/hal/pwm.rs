//! Audio output: 8-bit LEDC PWM, duty refreshed once per sample.

use esp_idf_svc::hal::gpio::OutputPin;
use esp_idf_svc::hal::ledc::{
    config::TimerConfig, LedcChannel, LedcDriver, LedcTimer, LedcTimerDriver, Resolution,
};
use esp_idf_svc::hal::peripheral::Peripheral;
use esp_idf_svc::hal::prelude::*;
use esp_idf_svc::sys::EspError;

use crate::config::OUTPUT_MIDPOINT;

/// PWM carrier; well above the audio band, 8-bit resolution.
const PWM_CARRIER_KHZ: u32 = 250;

/// Configure an LEDC timer for the audio carrier.
pub fn carrier_timer<'d, T: LedcTimer + 'd>(
    timer: impl Peripheral<P = T> + 'd,
) -> Result<LedcTimerDriver<'d, T>, EspError> {
    LedcTimerDriver::new(
        timer,
        &TimerConfig::new()
            .frequency(PWM_CARRIER_KHZ.kHz().into())
            .resolution(Resolution::Bits8),
    )
}

pub struct PwmAudioOut<'d> {
    channel: LedcDriver<'d>,
}

impl<'d> PwmAudioOut<'d> {
    /// Attach a channel to a carrier timer, output starts at silence.
    pub fn new<C, T>(
        channel: impl Peripheral<P = C> + 'd,
        timer: &'d LedcTimerDriver<'d, T>,
        pin: impl Peripheral<P = impl OutputPin> + 'd,
    ) -> Result<Self, EspError>
    where
        C: LedcChannel<SpeedMode = <T as LedcTimer>::SpeedMode>,
        T: LedcTimer + 'd,
    {
        let mut channel = LedcDriver::new(channel, timer, pin)?;
        channel.set_duty(OUTPUT_MIDPOINT as u32)?;
        Ok(Self { channel })
    }

    /// Load the duty for the next sample.
    #[inline]
    pub fn set_duty(&mut self, duty: u8) {
        let _ = self.channel.set_duty(duty as u32);
    }
}
