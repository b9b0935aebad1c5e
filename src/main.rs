//! CricketCall - Main entry point
//!
//! On ESP32-S3: hardware timer alarm at the sample rate drives the
//! scheduler, LEDC PWM carries the audio, the main task runs the keypad
//! controller, a background thread drains the logs to the console.
//!
//! On host: renders one chirp with the default call offline and prints
//! the log, so the timing can be inspected without hardware.

#[cfg(target_os = "espidf")]
mod firmware {
    use std::time::Duration;

    use esp_idf_svc::hal::delay::Ets;
    use esp_idf_svc::hal::gpio::IOPin;
    use esp_idf_svc::hal::peripherals::Peripherals;
    use esp_idf_svc::hal::timer::{config::Config as TimerConfig, TimerDriver};
    use esp_idf_svc::sys::EspError;

    use cricket_call::config::{KeypadConfig, SAMPLE_RATE_HZ};
    use cricket_call::display::LogDisplay;
    use cricket_call::hal::{carrier_timer, GpioKeypadPort, PwmAudioOut};
    use cricket_call::keypad::KeypadScanner;
    use cricket_call::log_sink::drain_logs;
    use cricket_call::{Controller, KeyReader, Scheduler, SharedState, FG_LOG_STREAM};

    static SHARED: SharedState = SharedState::new();

    pub fn main() -> Result<(), EspError> {
        esp_idf_svc::sys::link_patches();

        let peripherals = Peripherals::take()?;
        let pins = peripherals.pins;

        // Audio: PWM on GPIO4, duty written from the sample interrupt
        let carrier = Box::leak(Box::new(carrier_timer(peripherals.ledc.timer0)?));
        let mut audio = PwmAudioOut::new(peripherals.ledc.channel0, carrier, pins.gpio4)?;

        let mut scheduler = Scheduler::new(&SHARED);
        let mut sample_timer =
            TimerDriver::new(peripherals.timer00, &TimerConfig::new().auto_reload(true))?;
        sample_timer.set_alarm(sample_timer.tick_hz() / SAMPLE_RATE_HZ as u64)?;

        // SAFETY: the callback only touches the scheduler, the PWM channel and
        // SHARED, none of which block or allocate.
        unsafe {
            sample_timer.subscribe(move || {
                let duty = scheduler.tick();
                audio.set_duty(duty);
            })?;
        }
        sample_timer.enable_interrupt()?;
        sample_timer.enable_alarm(true)?;
        sample_timer.enable(true)?;

        std::thread::spawn(|| loop {
            let mut out = String::new();
            if drain_logs(&mut out) > 0 || !out.is_empty() {
                print!("{}", out);
            }
            std::thread::sleep(Duration::from_millis(50));
        });

        cricket_call::rt_info!(FG_LOG_STREAM, SHARED.uptime_ms(), "{}", env!("VERSION_STRING"));

        // Keypad: port bits 0..7 on GPIO5..GPIO12
        let port = GpioKeypadPort::new([
            pins.gpio5.downgrade(),
            pins.gpio6.downgrade(),
            pins.gpio7.downgrade(),
            pins.gpio8.downgrade(),
            pins.gpio9.downgrade(),
            pins.gpio10.downgrade(),
            pins.gpio11.downgrade(),
            pins.gpio12.downgrade(),
        ])?;

        let config = KeypadConfig::default();
        let keys = KeyReader::new(KeypadScanner::new(port, Ets), &SHARED, config.debounce_ms);
        let controller = Controller::new(&SHARED, keys, LogDisplay::new(&SHARED), config);

        // sample_timer stays alive: run() never returns
        controller.run()
    }
}

#[cfg(target_os = "espidf")]
fn main() -> Result<(), esp_idf_svc::sys::EspError> {
    firmware::main()
}

#[cfg(not(target_os = "espidf"))]
fn main() {
    use cricket_call::audio::EnvelopePhase;
    use cricket_call::config::{CallParameters, OUTPUT_MIDPOINT, SAMPLES_PER_MS_X2};
    use cricket_call::log_sink::drain_logs;
    use cricket_call::{Scheduler, SharedState, FG_LOG_STREAM};

    let shared = SharedState::new();
    let params = CallParameters::DEFAULT;
    shared.commit_parameters(params);
    shared.start_playback();

    let mut scheduler = Scheduler::new(&shared);
    let samples = params.chirp_repeat_interval_ms as u32 * SAMPLES_PER_MS_X2 / 2;

    let mut bursts = 0u32;
    let mut audible = 0u32;
    let mut first_audible = None;
    let mut last_phase = EnvelopePhase::Idle;

    for n in 0..samples {
        let duty = scheduler.tick();
        if duty != OUTPUT_MIDPOINT {
            audible += 1;
            first_audible.get_or_insert(n);
        }

        let phase = scheduler.timing().phase();
        if phase == EnvelopePhase::Attack && last_phase != EnvelopePhase::Attack {
            bursts += 1;
        }
        last_phase = phase;
    }

    cricket_call::rt_info!(
        FG_LOG_STREAM,
        shared.uptime_ms(),
        "{}: {} samples, {} bursts, {} audible, first at {:?}",
        env!("VERSION_STRING"),
        samples,
        bursts,
        audible,
        first_audible
    );

    let mut out = String::new();
    drain_logs(&mut out);
    print!("{}", out);
}
