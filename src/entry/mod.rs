//! Parameter entry from debounced keypad events
//!
//! Digits are echoed on the display as they are typed. Any error aborts
//! the whole parameter set; nothing is committed until all five fields
//! have been accepted.

pub mod error;
pub mod key_buffer;

pub use error::EntryError;
pub use key_buffer::KeyBuffer;

use crate::config::params::{CallParameters, PARAM_FIELDS};
use crate::config::{DigitOverflow, KeypadConfig, KEY_BUFFER_LEN};
use crate::display::{Display, VALUE_BLANK, VALUE_COLUMN};
use crate::keypad::KeySource;

/// Foreground parameter reader
pub struct ParamEntry<'a, K, D> {
    keys: &'a mut K,
    display: &'a mut D,
    config: &'a KeypadConfig,
    buffer: KeyBuffer,
    /// Field being entered when the last error occurred
    failed_field: Option<&'static str>,
}

impl<'a, K: KeySource, D: Display> ParamEntry<'a, K, D> {
    pub fn new(keys: &'a mut K, display: &'a mut D, config: &'a KeypadConfig) -> Self {
        Self {
            keys,
            display,
            config,
            buffer: KeyBuffer::new(),
            failed_field: None,
        }
    }

    /// Name of the field that failed the last collection
    pub fn failed_field(&self) -> Option<&'static str> {
        self.failed_field
    }

    /// Read up to `max_len` digits, ended by the terminator key
    ///
    /// A non-digit key other than the terminator fails immediately with
    /// [`EntryError::InvalidDigit`]. An empty entry reads as 0.
    pub fn read_digits(&mut self, max_len: usize) -> Result<u32, EntryError> {
        let max_len = max_len.min(KEY_BUFFER_LEN);
        self.buffer.clear();

        loop {
            if self.buffer.len() >= max_len && self.config.overflow == DigitOverflow::Finish {
                break;
            }

            let key = self.keys.wait_key();
            if key == self.config.terminator {
                break;
            }

            let digit = key.digit().ok_or(EntryError::InvalidDigit)?;

            if self.buffer.len() < max_len && self.buffer.push(digit) {
                let col = VALUE_COLUMN + (self.buffer.len() - 1) as u8;
                let mut text = [0u8; 1];
                self.display.write_at(col, 0, digit_str(digit, &mut text));
            }
        }

        Ok(self.buffer.value())
    }

    /// Prompt for all five call fields in order
    ///
    /// On the first invalid digit or out-of-range value the error text is
    /// shown and the remaining fields are skipped.
    pub fn collect_call_parameters(&mut self) -> Result<CallParameters, EntryError> {
        let mut params = CallParameters::DEFAULT;
        self.failed_field = None;

        for field in PARAM_FIELDS.iter() {
            self.display.write_at(0, 0, field.prompt);
            self.display.write_at(VALUE_COLUMN, 0, VALUE_BLANK);

            let result = self.read_digits(KEY_BUFFER_LEN).and_then(|value| {
                if field.accepts(value) {
                    Ok(value as u16)
                } else {
                    Err(EntryError::OutOfRange)
                }
            });

            match result {
                Ok(value) => (field.apply)(&mut params, value),
                Err(e) => {
                    self.display.write_at(0, 0, e.message());
                    self.failed_field = Some(field.name);
                    return Err(e);
                }
            }
        }

        Ok(params)
    }
}

fn digit_str(digit: u8, buf: &mut [u8; 1]) -> &str {
    buf[0] = b'0' + digit;
    // Single ASCII digit is always valid UTF-8
    core::str::from_utf8(&buf[..]).unwrap_or("?")
}
