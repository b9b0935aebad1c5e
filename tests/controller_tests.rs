//! Foreground controller tests: configuration retries, start and stop

mod common;

use common::{key, RecordingDisplay, ScriptedKeys};

use cricket_call::config::{CallParameters, KeypadConfig};
use cricket_call::display::PLAYING_TEXT;
use cricket_call::config::{OUTPUT_MIDPOINT, SAMPLE_RATE_HZ};
use cricket_call::{ControlAction, Controller, RawKey, Scheduler, SharedState};

const SLOW_CALL: &str = "500#3#20#40#3000#";

fn slow_call() -> CallParameters {
    CallParameters {
        chirp_repeat_interval_ms: 500,
        number_of_syllables: 3,
        syllable_duration_ms: 20,
        syllable_repeat_interval_ms: 40,
        burst_frequency_hz: 3000,
    }
}

fn controller<'a>(
    shared: &'a SharedState,
    script: &str,
) -> Controller<'a, ScriptedKeys, RecordingDisplay> {
    Controller::new(
        shared,
        ScriptedKeys::new(script),
        RecordingDisplay::new(),
        KeypadConfig::default(),
    )
}

#[test]
fn test_configure_commits_parameters() {
    let shared = SharedState::new();
    let mut ctl = controller(&shared, SLOW_CALL);

    assert_eq!(ctl.configure(), slow_call());
    assert_eq!(shared.parameters(), slow_call());
    assert!(!shared.is_playing());
    assert_eq!(ctl.keys_mut().remaining(), 0);
}

#[test]
fn test_configure_restarts_after_error() {
    let shared = SharedState::new();
    let script = format!("4#250#3A{}", SLOW_CALL);
    let mut ctl = controller(&shared, &script);

    assert_eq!(ctl.configure(), slow_call());
    assert!(ctl.display().shows("Out of Range!"));
    assert!(ctl.display().shows("Valid Num 0-9!"));

    // Three passes through the first prompt
    let first_prompts = ctl
        .display()
        .texts()
        .iter()
        .filter(|t| **t == "ChrpRpI:")
        .count();
    assert_eq!(first_prompts, 3);
}

#[test]
fn test_rejected_set_is_never_committed() {
    let shared = SharedState::new();
    let mut ctl = controller(&shared, "700#2#25#4#");

    // The script ends after the rejected field; nothing may be committed yet
    let result = std::panic::catch_unwind(std::panic::AssertUnwindSafe(|| ctl.configure()));
    assert!(result.is_err(), "script exhausted while waiting for a retry");
    assert_eq!(shared.parameters(), CallParameters::DEFAULT);
}

#[test]
fn test_start_key_starts_playback() {
    let shared = SharedState::new();
    let mut ctl = controller(&shared, SLOW_CALL);
    ctl.configure();

    assert_eq!(ctl.handle_key(RawKey::START), ControlAction::Started);
    assert!(shared.is_playing());
    assert_eq!(shared.ramp(), slow_call().ramp_window());
    assert_eq!(
        ctl.display().writes.last(),
        Some(&(0, 0, PLAYING_TEXT.to_string()))
    );
}

#[test]
fn test_other_keys_ignored_in_run_mode() {
    let shared = SharedState::new();
    let mut ctl = controller(&shared, "");

    for c in ['0', '3', '9', '#', 'C'] {
        assert_eq!(ctl.handle_key(key(c)), ControlAction::Ignored);
    }
    assert!(!shared.is_playing());
    assert!(ctl.display().writes.is_empty());
}

#[test]
fn test_stop_key_reenters_configuration() {
    let shared = SharedState::new();
    let mut ctl = controller(&shared, "");
    ctl.handle_key(RawKey::START);
    assert!(shared.is_playing());

    ctl.keys_mut().push_script(SLOW_CALL);
    assert_eq!(ctl.handle_key(RawKey::STOP), ControlAction::Stopped);

    assert!(!shared.is_playing());
    assert_eq!(shared.parameters(), slow_call());
    assert_eq!(ctl.keys_mut().remaining(), 0);
}

#[test]
fn test_poll_reads_one_key() {
    let shared = SharedState::new();
    let mut ctl = controller(&shared, "1");

    assert_eq!(ctl.poll(), ControlAction::Started);
    assert!(shared.is_playing());
}

#[test]
fn test_start_while_playing_restarts_call() {
    let shared = SharedState::new();
    let mut ctl = controller(&shared, "");
    ctl.handle_key(RawKey::START);

    // Pretend the interrupt ran for a while
    shared.advance_call(&shared.parameters());
    shared.tick_millisecond(true);
    assert_ne!(shared.timers(), cricket_call::CallTimers::EXPIRED);

    assert_eq!(ctl.handle_key(RawKey::START), ControlAction::Started);
    assert_eq!(shared.timers(), cricket_call::CallTimers::EXPIRED);
}

#[test]
fn test_start_key_while_playing_silences_current_syllable() {
    let shared = SharedState::new();
    let mut ctl = controller(&shared, "");
    let mut scheduler = Scheduler::new(&shared);
    let per_ms = SAMPLE_RATE_HZ / 1000;

    ctl.handle_key(RawKey::START);
    // 35 ms in: inside the first 18 ms syllable, which starts at 30 ms
    let sounding = (0..35 * per_ms)
        .map(|_| scheduler.tick())
        .filter(|&d| d != OUTPUT_MIDPOINT)
        .count();
    assert!(sounding > 0);

    assert_eq!(ctl.handle_key(RawKey::START), ControlAction::Started);
    let after: Vec<u8> = (0..25 * per_ms).map(|_| scheduler.tick()).collect();
    assert!(
        after.iter().all(|&d| d == OUTPUT_MIDPOINT),
        "{} audible samples after restart",
        after.iter().filter(|&&d| d != OUTPUT_MIDPOINT).count()
    );
}
