//! Parameter entry error types

/// Entry error with code and display text
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EntryError {
    /// E01: Non-digit key during numeric entry
    InvalidDigit,
    /// E02: Parsed value outside the field range
    OutOfRange,
}

impl EntryError {
    /// Get error code string
    pub fn code(&self) -> &'static str {
        match self {
            Self::InvalidDigit => "E01",
            Self::OutOfRange => "E02",
        }
    }

    /// Text shown on the display
    pub fn message(&self) -> &'static str {
        match self {
            Self::InvalidDigit => "Valid Num 0-9!",
            Self::OutOfRange => "Out of Range!",
        }
    }
}

impl core::fmt::Display for EntryError {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        write!(f, "{}: {}", self.code(), self.message())
    }
}
