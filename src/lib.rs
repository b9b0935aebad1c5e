//! # CricketCall
//!
//! Cricket call synthesizer: DDS tone bursts ("syllables") grouped into
//! repeating chirps, configured from a 4x4 keypad.
//!
//! ## Architecture
//!
//! Two execution contexts share one [`SharedState`]:
//! - Sample interrupt at 62.5 kHz: [`Scheduler::tick`] runs the DDS engine and
//!   call timers, derives the millisecond tick, counts the debounce timer down
//! - Foreground loop: [`Controller`] polls the keypad, debounces, collects
//!   parameters and starts/stops playback
//!
//! The foreground only writes call parameters while stopped. Shared state is
//! lock-free 32-bit atomics: the interrupt never waits on the foreground.

#![cfg_attr(not(test), no_std)]

pub mod audio;
pub mod call;
pub mod config;
pub mod controller;
pub mod display;
pub mod entry;
pub mod keypad;
pub mod log_globals;
pub mod log_sink;
pub mod logging;
pub mod scheduler;
pub mod shared;

#[cfg(target_os = "espidf")]
pub mod hal;

pub use call::{CallEvent, CallTimers, CallTiming};
pub use config::{CallParameters, KeypadConfig};
pub use controller::{ControlAction, Controller};
pub use entry::{EntryError, ParamEntry};
pub use keypad::{KeyReader, KeySource, RawKey};
pub use log_globals::{FG_LOG_STREAM, ISR_LOG_STREAM};
pub use scheduler::Scheduler;
pub use shared::SharedState;
