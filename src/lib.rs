//! Encoding and decoding of SMPTE timecode between a linear frame count, an
//! `HH:MM:SS:FF` string and the packed RP188 hardware register image, plus
//! the audio-sample cadence tables that keep non-integer video rates locked
//! to a fixed audio clock.

use std::fmt::{Display, Formatter};

pub use crate::error::TimecodeError;
pub use crate::frame_rate::{AudioRate, FrameRate, FrameRateFamily};
pub use crate::rp188_frame::Rp188Frame;

pub mod audio_cadence;
mod error;
mod frame_count;
pub mod frame_rate;
pub mod rp188_frame;

/// The closed set of timecode counting formats.
///
/// The format fixes how many frame numbers each second carries and which
/// encoding quirks apply: the two drop-frame variants skip frame numbers at
/// minute boundaries, rates of 40 fps and above borrow the field-ID bit for
/// the frame count, and the PAL rates keep their field-ID bit in the other
/// register word.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TimecodeFormat {
    Unknown,
    TwentyFour,
    TwentyFive,
    Thirty,
    ThirtyDrop,
    FortyEight,
    Fifty,
    Sixty,
    SixtyDrop,
}

impl TimecodeFormat {
    /// Nominal frame numbers per second for this format.
    ///
    /// An unrecognized format has always resolved to 30 fps rather than
    /// failing, so unconfigured callers keep getting NTSC-shaped timecode.
    pub const fn frames_per_second(self) -> u32 {
        match self {
            Self::TwentyFour => 24,
            Self::TwentyFive => 25,
            Self::Thirty | Self::ThirtyDrop => 30,
            Self::FortyEight => 48,
            Self::Fifty => 50,
            Self::Sixty | Self::SixtyDrop => 60,
            Self::Unknown => 30,
        }
    }

    /// True for the formats that skip frame numbers at minute boundaries.
    pub const fn is_drop_frame(self) -> bool {
        matches!(self, Self::ThirtyDrop | Self::SixtyDrop)
    }

    /// True for rates of 40 fps and above. These need an extra bit for the
    /// frame count, borrowed from the field-ID flag.
    pub const fn is_high_rate(self) -> bool {
        matches!(
            self,
            Self::FortyEight | Self::Fifty | Self::Sixty | Self::SixtyDrop
        )
    }

    /// True for the 25/50 fps formats, whose field-ID bit lives in the high
    /// register word instead of the low one.
    pub const fn is_pal(self) -> bool {
        matches!(self, Self::TwentyFive | Self::Fifty)
    }

    /// Frame numbers skipped at the start of every drop minute (0 for the
    /// non-drop formats).
    pub const fn dropped_frames_per_minute(self) -> u32 {
        match self {
            Self::ThirtyDrop => 2,
            Self::SixtyDrop => 4,
            _ => 0,
        }
    }

    /// Total frame numbers in a 24-hour day for this format. Drop-frame
    /// formats count 9 short minutes and 1 full minute per 10-minute block.
    pub const fn max_frames_per_day(self) -> u32 {
        let fps = self.frames_per_second();
        let frames_per_min = fps * 60;
        if self.is_drop_frame() {
            let drop_frames_per_min = frames_per_min - self.dropped_frames_per_minute();
            let drop_frames_per_ten_min = 9 * drop_frames_per_min + frames_per_min;
            drop_frames_per_ten_min * 6 * 24
        } else {
            frames_per_min * 60 * 24
        }
    }

    /// A nominal video frame rate for this format, for callers that have
    /// nothing better to go on. There are plenty of setups where this guess
    /// is wrong (720p60 running 30 fps timecode, 29.97 vs 30, ...), so do
    /// not rely on it being right for any specific rig.
    pub const fn default_frame_rate(self) -> FrameRate {
        match self {
            Self::TwentyFour => FrameRate::Fps24,
            Self::TwentyFive => FrameRate::Fps25,
            Self::Thirty | Self::ThirtyDrop => FrameRate::Fps30,
            Self::FortyEight => FrameRate::Fps48,
            Self::Fifty => FrameRate::Fps50,
            Self::Sixty | Self::SixtyDrop => FrameRate::Fps60,
            Self::Unknown => FrameRate::Unknown,
        }
    }

    /// Pick the timecode format matching a video frame rate.
    ///
    /// SMPTE-372 dual-link doubles the effective rate (24 → 48, 30 → 60);
    /// `drop_frame` upgrades the 30/60 fps formats to their drop variants.
    /// Rates with no timecode mapping of their own fall back to 30 fps drop.
    pub fn from_frame_rate(rate: FrameRate, drop_frame: bool, smpte372: bool) -> Self {
        let mut format = match rate {
            FrameRate::Fps60 | FrameRate::Fps59_94 => Self::Sixty,
            FrameRate::Fps50 => Self::Fifty,
            FrameRate::Fps48 => Self::FortyEight,
            FrameRate::Fps30 | FrameRate::Fps29_97 => Self::Thirty,
            FrameRate::Fps25 => Self::TwentyFive,
            FrameRate::Fps24 | FrameRate::Fps23_98 => Self::TwentyFour,
            _ => Self::ThirtyDrop,
        };

        if smpte372 {
            match rate {
                FrameRate::Fps24 => format = Self::FortyEight,
                FrameRate::Fps30 | FrameRate::Fps29_97 => format = Self::Sixty,
                _ => {}
            }
        }

        if drop_frame {
            match format {
                Self::Thirty => format = Self::ThirtyDrop,
                Self::Sixty => format = Self::SixtyDrop,
                _ => {}
            }
        }

        format
    }
}

/// An hours/minutes/seconds/frames timecode tied to a counting format.
///
/// Values are always normalized: overflow carries upward (frames into
/// seconds into minutes into hours, hours wrapping at 24) and drop-frame
/// formats never hold a frame number that the format drops.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Timecode {
    hours: u32,
    minutes: u32,
    seconds: u32,
    frames: u32,
    format: TimecodeFormat,
}

impl Timecode {
    /// Build a normalized timecode from raw field values.
    ///
    /// Out-of-range fields carry into the next larger unit. In a drop-frame
    /// format, a frame number below the drop count at second 0 of a
    /// non-multiple-of-10 minute does not exist; it rounds up to the first
    /// legal frame of that minute.
    pub fn new(
        hours: u32,
        minutes: u32,
        seconds: u32,
        frames: u32,
        format: TimecodeFormat,
    ) -> Self {
        let fps = format.frames_per_second();

        let mut seconds = seconds + frames / fps;
        let mut frames = frames % fps;
        let mut minutes = minutes + seconds / 60;
        seconds %= 60;
        let mut hours = hours + minutes / 60;
        minutes %= 60;
        hours %= 24;

        let dropped = format.dropped_frames_per_minute();
        if dropped > 0 && seconds == 0 && minutes % 10 != 0 && frames < dropped {
            frames = dropped;
        }

        Self {
            hours,
            minutes,
            seconds,
            frames,
            format,
        }
    }

    /// Parse an `"HH:MM:SS:FF"` string into a timecode of the given format.
    ///
    /// The four fields sit at fixed offsets 0, 3, 6 and 9. The separator
    /// before the frame field (`:` or `;`) is informational only; the
    /// format's own drop-frame flag wins.
    pub fn parse(s: &str, format: TimecodeFormat) -> Result<Self, TimecodeError> {
        let bytes = s.as_bytes();
        if bytes.len() != 11 {
            return Err(TimecodeError::BadLength(bytes.len()));
        }

        let hours = two_digit_field(bytes, 0)?;
        let minutes = two_digit_field(bytes, 3)?;
        let seconds = two_digit_field(bytes, 6)?;
        let frames = two_digit_field(bytes, 9)?;

        Ok(Self::new(hours, minutes, seconds, frames, format))
    }

    pub const fn hours(&self) -> u32 {
        self.hours
    }

    pub const fn minutes(&self) -> u32 {
        self.minutes
    }

    pub const fn seconds(&self) -> u32 {
        self.seconds
    }

    pub const fn frames(&self) -> u32 {
        self.frames
    }

    pub const fn format(&self) -> TimecodeFormat {
        self.format
    }
}

impl Display for Timecode {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        // drop-frame formats flag themselves with ';' before the frame field
        let separator = if self.format.is_drop_frame() { ';' } else { ':' };
        write!(
            f,
            "{:02}:{:02}:{:02}{}{:02}",
            self.hours, self.minutes, self.seconds, separator, self.frames
        )
    }
}

fn two_digit_field(bytes: &[u8], offset: usize) -> Result<u32, TimecodeError> {
    let digit = |index: usize| -> Result<u32, TimecodeError> {
        let b = bytes[index];
        if b.is_ascii_digit() {
            Ok(u32::from(b - b'0'))
        } else {
            Err(TimecodeError::InvalidDigit { offset: index })
        }
    };
    Ok(digit(offset)? * 10 + digit(offset + 1)?)
}
