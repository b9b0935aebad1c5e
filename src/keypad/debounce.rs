//! Debounce state machine.
//!
//! Evaluated once per debounce interval. A key is reported only after it
//! has been seen pressed on two consecutive samples and then seen released
//! on two consecutive samples, so each physical press yields one event.

use super::RawKey;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum DebounceState {
    Released,
    MaybePushed,
    Pushed,
    MaybeReleased,
}

#[derive(Debug)]
pub struct Debouncer {
    state: DebounceState,
    latch: Option<RawKey>,
}

impl Debouncer {
    pub const fn new() -> Self {
        Self {
            state: DebounceState::Released,
            latch: None,
        }
    }

    /// Back to `Released` with nothing latched.
    pub fn reset(&mut self) {
        self.state = DebounceState::Released;
        self.latch = None;
    }

    #[inline]
    pub fn state(&self) -> DebounceState {
        self.state
    }

    #[inline]
    pub fn latch(&self) -> Option<RawKey> {
        self.latch
    }

    /// Feed one scan sample; returns a key on the release that completes a press.
    pub fn evaluate(&mut self, scan: Option<RawKey>) -> Option<RawKey> {
        let same = scan.is_some() && scan == self.latch;

        match self.state {
            DebounceState::Released => {
                if scan.is_some() {
                    self.latch = scan;
                    self.state = DebounceState::MaybePushed;
                }
                None
            }
            DebounceState::MaybePushed => {
                self.state = if same {
                    DebounceState::Pushed
                } else {
                    DebounceState::Released
                };
                None
            }
            DebounceState::Pushed => {
                if !same {
                    self.state = DebounceState::MaybeReleased;
                }
                None
            }
            DebounceState::MaybeReleased => {
                if same {
                    self.state = DebounceState::Pushed;
                    None
                } else {
                    self.state = DebounceState::Released;
                    self.latch
                }
            }
        }
    }
}

impl Default for Debouncer {
    fn default() -> Self {
        Self::new()
    }
}
