//! Keypad scanner: two half-scans of an 8-bit port.
//!
//! ```text
//! half 1: low nibble driven low, high nibble read  → column bits
//! half 2: high nibble driven low, low nibble read  → row bits
//! code  = half1 | half2   (0xff = nothing pressed)
//! ```

use embedded_hal::delay::DelayNs;

use super::RawKey;
use crate::config::KEY_SETTLE_US;

/// Composite code with no key down.
pub const NO_KEY: u8 = 0xff;

/// Scan codes in keypad position order.
///
/// Position `i` decodes to key `i + 1`; position 15 decodes to key 0.
pub const KEY_TABLE: [u8; 16] = [
    0x77, 0xb7, 0xd7, 0x7b, //
    0xbb, 0xdb, 0x7d, 0xbd, //
    0xdd, 0xe7, 0xeb, 0xed, //
    0xee, 0xde, 0xbe, 0x7e, //
];

/// Raw 8-bit bidirectional port the keypad is wired to.
pub trait KeypadPort {
    /// Set direction (1 = output) and output levels / pull-ups.
    fn drive(&mut self, direction: u8, level: u8);

    /// Read back the pin levels.
    fn read(&mut self) -> u8;
}

impl<P: KeypadPort + ?Sized> KeypadPort for &mut P {
    fn drive(&mut self, direction: u8, level: u8) {
        (**self).drive(direction, level)
    }

    fn read(&mut self) -> u8 {
        (**self).read()
    }
}

/// Map a composite scan code to a key.
///
/// Unknown codes (e.g. two keys at once) read as no key.
pub fn decode(code: u8) -> Option<RawKey> {
    if code == NO_KEY {
        return None;
    }

    let position = KEY_TABLE.iter().position(|&c| c == code)?;
    RawKey::new(((position + 1) % KEY_TABLE.len()) as u8)
}

/// Stateless scanner over a port and a settle delay.
pub struct KeypadScanner<P, D> {
    port: P,
    delay: D,
}

impl<P: KeypadPort, D: DelayNs> KeypadScanner<P, D> {
    pub fn new(port: P, delay: D) -> Self {
        Self { port, delay }
    }

    /// Perform both half-scans and decode.
    pub fn scan(&mut self) -> Option<RawKey> {
        decode(self.scan_code())
    }

    /// Composite code of both half-scans.
    pub fn scan_code(&mut self) -> u8 {
        self.port.drive(0x0f, 0xf0);
        self.delay.delay_us(KEY_SETTLE_US);
        let mut code = self.port.read();

        self.port.drive(0xf0, 0x0f);
        self.delay.delay_us(KEY_SETTLE_US);
        code |= self.port.read();

        code
    }

    pub fn port_mut(&mut self) -> &mut P {
        &mut self.port
    }
}
