//! Character display collaborator.
//!
//! The LCD driver itself is external; the core only needs "write text at a
//! position" and "clear".

use crate::log_globals::FG_LOG_STREAM;
use crate::shared::SharedState;

/// Column where entered values are echoed (after the 8-char prompt).
pub const VALUE_COLUMN: u8 = 8;

/// Blanks the value area before a new entry.
pub const VALUE_BLANK: &str = "     ";

/// Shown while the call is playing.
pub const PLAYING_TEXT: &str = " playing...";

pub trait Display {
    fn clear(&mut self);

    /// Write `text` starting at (`col`, `row`).
    fn write_at(&mut self, col: u8, row: u8, text: &str);
}

impl<T: Display + ?Sized> Display for &mut T {
    fn clear(&mut self) {
        (**self).clear()
    }

    fn write_at(&mut self, col: u8, row: u8, text: &str) {
        (**self).write_at(col, row, text)
    }
}

/// Display that mirrors every write into the foreground log.
///
/// Stands in for the LCD when only a serial console is attached.
pub struct LogDisplay<'a> {
    shared: &'a SharedState,
}

impl<'a> LogDisplay<'a> {
    pub fn new(shared: &'a SharedState) -> Self {
        Self { shared }
    }
}

impl Display for LogDisplay<'_> {
    fn clear(&mut self) {
        crate::rt_trace!(FG_LOG_STREAM, self.shared.uptime_ms(), "lcd clear");
    }

    fn write_at(&mut self, col: u8, row: u8, text: &str) {
        crate::rt_info!(
            FG_LOG_STREAM,
            self.shared.uptime_ms(),
            "lcd[{},{}] {}",
            col,
            row,
            text
        );
    }
}
