use thiserror::Error;

/// Errors produced by the timecode string parser and the register codec.
///
/// Decoding a register whose DBB word carries the no-data sentinel is *not*
/// an error; it surfaces as `Ok(None)` from [`crate::Rp188Frame::to_timecode`].
#[derive(Debug, Error, Clone, Copy, PartialEq, Eq)]
pub enum TimecodeError {
    /// A timecode string must be exactly 11 characters ("HH:MM:SS:FF")
    #[error("timecode string must be 11 characters, got {0}")]
    BadLength(usize),
    /// A character where a decimal digit was expected
    #[error("invalid digit at offset {offset} of timecode string")]
    InvalidDigit { offset: usize },
    /// A BCD units nibble in a register held a value greater than 9
    #[error("BCD nibble out of range: {0:#x}")]
    InvalidBcdDigit(u32),
    /// SMPTE numbers the binary groups 1 through 8
    #[error("binary group number must be 1..=8, got {0}")]
    InvalidBinaryGroup(u32),
    /// SMPTE numbers the user data words 1 through 16
    #[error("user data word number must be 1..=16, got {0}")]
    InvalidUserDataWord(u32),
}
