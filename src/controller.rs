//! Foreground control loop.
//!
//! Configuration mode collects a full parameter set; run mode waits for
//! the start and stop keys. Parameters are only ever committed while
//! playback is stopped.

use crate::config::params::CallParameters;
use crate::config::KeypadConfig;
use crate::display::{Display, PLAYING_TEXT};
use crate::entry::ParamEntry;
use crate::keypad::{KeySource, RawKey};
use crate::log_globals::FG_LOG_STREAM;
use crate::shared::SharedState;

/// Result of handling one run-mode key.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ControlAction {
    /// Playback (re)started from the beginning of a chirp.
    Started,
    /// Playback stopped and a new parameter set was entered.
    Stopped,
    /// Key has no meaning in run mode.
    Ignored,
}

pub struct Controller<'a, K, D> {
    shared: &'a SharedState,
    keys: K,
    display: D,
    config: KeypadConfig,
}

impl<'a, K: KeySource, D: Display> Controller<'a, K, D> {
    pub fn new(shared: &'a SharedState, keys: K, display: D, config: KeypadConfig) -> Self {
        Self {
            shared,
            keys,
            display,
            config,
        }
    }

    /// Collect parameters until a complete valid set is entered, then commit it.
    ///
    /// Must run with playback stopped.
    pub fn configure(&mut self) -> CallParameters {
        loop {
            let mut entry = ParamEntry::new(&mut self.keys, &mut self.display, &self.config);

            match entry.collect_call_parameters() {
                Ok(params) => {
                    self.shared.commit_parameters(params);
                    self.display.clear();
                    crate::rt_info!(
                        FG_LOG_STREAM,
                        self.shared.uptime_ms(),
                        "call {}ms x{} {}ms/{}ms {}Hz",
                        params.chirp_repeat_interval_ms,
                        params.number_of_syllables,
                        params.syllable_duration_ms,
                        params.syllable_repeat_interval_ms,
                        params.burst_frequency_hz
                    );
                    return params;
                }
                Err(e) => {
                    let field = entry.failed_field().unwrap_or("?");
                    crate::rt_warn!(
                        FG_LOG_STREAM,
                        self.shared.uptime_ms(),
                        "{} rejected, {}",
                        field,
                        e
                    );
                }
            }
        }
    }

    /// Act on one run-mode key.
    pub fn handle_key(&mut self, key: RawKey) -> ControlAction {
        if key == self.config.stop {
            self.display.clear();
            self.shared.stop_playback();
            crate::rt_info!(FG_LOG_STREAM, self.shared.uptime_ms(), "stop");
            self.configure();
            ControlAction::Stopped
        } else if key == self.config.start {
            self.display.clear();
            self.display.write_at(0, 0, PLAYING_TEXT);
            self.shared.start_playback();
            crate::rt_info!(FG_LOG_STREAM, self.shared.uptime_ms(), "start");
            ControlAction::Started
        } else {
            ControlAction::Ignored
        }
    }

    /// Wait for one key and act on it.
    pub fn poll(&mut self) -> ControlAction {
        let key = self.keys.wait_key();
        self.handle_key(key)
    }

    /// Configure, then serve start/stop forever.
    pub fn run(mut self) -> ! {
        self.configure();
        loop {
            self.poll();
        }
    }

    pub fn display(&self) -> &D {
        &self.display
    }

    pub fn keys_mut(&mut self) -> &mut K {
        &mut self.keys
    }
}
