//! 4x4 matrix keypad input
//!
//! Foreground only. The scanner reads the port, the debouncer turns scan
//! results into one event per press-and-release, and the reader blocks
//! until such an event arrives.

pub mod debounce;
pub mod reader;
pub mod scanner;

pub use debounce::{DebounceState, Debouncer};
pub use reader::KeyReader;
pub use scanner::{decode, KeypadPort, KeypadScanner, KEY_TABLE, NO_KEY};

/// Decoded key position, 0..=15.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct RawKey(u8);

impl RawKey {
    /// Ends numeric entry.
    pub const TERMINATOR: Self = Self(10);
    /// Starts playback in run mode.
    pub const START: Self = Self(1);
    /// Stops playback in run mode.
    pub const STOP: Self = Self(2);

    pub const fn new(value: u8) -> Option<Self> {
        if value < 16 {
            Some(Self(value))
        } else {
            None
        }
    }

    #[inline]
    pub const fn value(self) -> u8 {
        self.0
    }

    /// Decimal digit carried by this key, if any.
    #[inline]
    pub const fn digit(self) -> Option<u8> {
        if self.0 <= 9 {
            Some(self.0)
        } else {
            None
        }
    }
}

/// Blocking source of debounced key events.
///
/// No timeout and no cancellation: returns only when a key has been
/// pressed and released.
pub trait KeySource {
    fn wait_key(&mut self) -> RawKey;
}

impl<K: KeySource + ?Sized> KeySource for &mut K {
    fn wait_key(&mut self) -> RawKey {
        (**self).wait_key()
    }
}
