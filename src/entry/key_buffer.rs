//! Digit buffer for numeric entry

use crate::config::KEY_BUFFER_LEN;

/// Fixed-capacity buffer of decimal digits
pub struct KeyBuffer {
    digits: [u8; KEY_BUFFER_LEN],
    len: usize,
}

impl KeyBuffer {
    pub const fn new() -> Self {
        Self {
            digits: [0; KEY_BUFFER_LEN],
            len: 0,
        }
    }

    /// Append a digit; returns false (and drops it) when full
    pub fn push(&mut self, digit: u8) -> bool {
        debug_assert!(digit <= 9);
        if self.len < KEY_BUFFER_LEN {
            self.digits[self.len] = digit;
            self.len += 1;
            true
        } else {
            false
        }
    }

    pub fn clear(&mut self) {
        self.len = 0;
    }

    pub fn len(&self) -> usize {
        self.len
    }

    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    pub fn digits(&self) -> &[u8] {
        &self.digits[..self.len]
    }

    /// Decimal value of the digits, 0 when empty
    pub fn value(&self) -> u32 {
        self.digits()
            .iter()
            .fold(0u32, |acc, &d| acc * 10 + d as u32)
    }
}

impl Default for KeyBuffer {
    fn default() -> Self {
        Self::new()
    }
}
