//! The packed RP188 register image: three 32-bit words holding BCD timecode
//! digits, status flags and the eight binary groups, in the exact layout the
//! hardware reads and writes.

use std::fmt::{Debug, Formatter};
use std::ops::Range;

use intbits::Bits;

use crate::error::TimecodeError;
use crate::{Timecode, TimecodeFormat};

mod user_bits;

/// One RP188 register image as delivered by or handed to the hardware.
///
/// `low` carries frames/seconds plus binary groups 1-4, `high` carries
/// minutes/hours plus binary groups 5-8, and `dbb` is the device-dependent
/// status word. Timecode digits are BCD in fixed bit positions; see the
/// range constants below.
#[derive(Clone, Copy, PartialEq, Eq)]
pub struct Rp188Frame {
    low: u32,
    high: u32,
    dbb: u32,
}

impl Rp188Frame {
    /// DBB value signaling that no timecode was delivered this frame.
    pub const NO_DATA_DBB: u32 = 0xFFFF_FFFF;

    // low word
    const BIT_RANGE_FRAME_UNITS: Range<u32> = 0..4;
    const BIT_RANGE_FRAME_TENS: Range<u32> = 8..10;
    const BIT_DROP_FRAME: u32 = 10;
    const BIT_COLOR_FRAME: u32 = 11;
    const BIT_RANGE_SECOND_UNITS: Range<u32> = 16..20;
    const BIT_RANGE_SECOND_TENS: Range<u32> = 24..27;
    /// field ID for the non-PAL rates; PAL keeps it in the high word
    const BIT_FIELD_ID_NTSC: u32 = 27;
    const BIT_VARICAM_F1_ACTIVE: u32 = 4;
    const BIT_VARICAM_F0_ACTIVE: u32 = 5;

    // high word
    const BIT_RANGE_MINUTE_UNITS: Range<u32> = 0..4;
    const BIT_RANGE_MINUTE_TENS: Range<u32> = 8..11;
    const BIT_RANGE_HOUR_UNITS: Range<u32> = 16..20;
    const BIT_RANGE_HOUR_TENS: Range<u32> = 24..26;
    const BIT_FIELD_ID_PAL: u32 = 27;
    /// BFG1 sits here for PAL and NTSC alike; BFG0/BFG2 swap words
    const BIT_BFG1: u32 = 26;
    const BIT_BFG_ALT: u32 = 11;

    // dbb word: any of these set means the timecode arrived this frame
    const BIT_DBB_RP188_RECEIVED: u32 = 16;
    const BIT_DBB_LTC_RECEIVED: u32 = 18;
    const BIT_DBB_VITC_RECEIVED: u32 = 19;

    /// An all-zero register (valid, frame 00:00:00:00, no flags).
    pub const fn new_empty() -> Self {
        Self {
            low: 0,
            high: 0,
            dbb: 0,
        }
    }

    /// A register carrying the no-data sentinel in its DBB word.
    pub const fn new_no_data() -> Self {
        Self {
            low: 0,
            high: 0,
            dbb: Self::NO_DATA_DBB,
        }
    }

    /// Wrap three raw register words read from the hardware.
    pub const fn from_words(low: u32, high: u32, dbb: u32) -> Self {
        Self { low, high, dbb }
    }

    pub const fn low(&self) -> u32 {
        self.low
    }

    pub const fn high(&self) -> u32 {
        self.high
    }

    pub const fn dbb(&self) -> u32 {
        self.dbb
    }

    /// Encode a timecode into a fresh register image.
    pub fn with_timecode(timecode: &Timecode) -> Self {
        let mut frame = Self::new_empty();
        frame.set_timecode(timecode);
        frame
    }

    /// Encode a timecode into this register. All three words restart from
    /// zero: binary groups and status flags must be applied afterwards
    /// through their own setters.
    pub fn set_timecode(&mut self, timecode: &Timecode) {
        let format = timecode.format();

        self.low = 0;
        self.high = 0;
        self.dbb = 0;

        self.high
            .set_bits(Self::BIT_RANGE_HOUR_TENS, timecode.hours() / 10);
        self.high
            .set_bits(Self::BIT_RANGE_HOUR_UNITS, timecode.hours() % 10);
        self.high
            .set_bits(Self::BIT_RANGE_MINUTE_TENS, timecode.minutes() / 10);
        self.high
            .set_bits(Self::BIT_RANGE_MINUTE_UNITS, timecode.minutes() % 10);
        self.low
            .set_bits(Self::BIT_RANGE_SECOND_TENS, timecode.seconds() / 10);
        self.low
            .set_bits(Self::BIT_RANGE_SECOND_UNITS, timecode.seconds() % 10);

        if format.is_high_rate() {
            // Above 39 fps the two-bit tens field runs out. The frame count
            // is halved and the field-ID bit carries the lost low bit, so
            // the field flag becomes the third bit of a de-facto tens field.
            let frames = timecode.frames();
            self.set_field_id(format, frames % 2 == 1);
            let half = frames / 2;
            self.low.set_bits(Self::BIT_RANGE_FRAME_TENS, half / 10);
            self.low.set_bits(Self::BIT_RANGE_FRAME_UNITS, half % 10);
        } else {
            self.low
                .set_bits(Self::BIT_RANGE_FRAME_TENS, timecode.frames() / 10);
            self.low
                .set_bits(Self::BIT_RANGE_FRAME_UNITS, timecode.frames() % 10);
        }

        self.set_drop_frame(format.is_drop_frame());
    }

    /// Decode the timecode carried in this register.
    ///
    /// Returns `Ok(None)` when the DBB word holds the no-data sentinel:
    /// nothing arrived this frame, which is not an error. A units nibble
    /// above 9 is corrupt BCD and is rejected.
    pub fn to_timecode(&self, format: TimecodeFormat) -> Result<Option<Timecode>, TimecodeError> {
        if self.dbb == Self::NO_DATA_DBB {
            return Ok(None);
        }

        let frames = if format.is_high_rate() {
            // the field ID holds the low bit of the doubled frame count
            let half = self.low.bits(Self::BIT_RANGE_FRAME_TENS) * 10
                + bcd_units(self.low.bits(Self::BIT_RANGE_FRAME_UNITS))?;
            half * 2 + u32::from(self.field_id(format))
        } else {
            self.low.bits(Self::BIT_RANGE_FRAME_TENS) * 10
                + bcd_units(self.low.bits(Self::BIT_RANGE_FRAME_UNITS))?
        };

        let seconds = self.low.bits(Self::BIT_RANGE_SECOND_TENS) * 10
            + bcd_units(self.low.bits(Self::BIT_RANGE_SECOND_UNITS))?;
        let minutes = self.high.bits(Self::BIT_RANGE_MINUTE_TENS) * 10
            + bcd_units(self.high.bits(Self::BIT_RANGE_MINUTE_UNITS))?;
        let hours = self.high.bits(Self::BIT_RANGE_HOUR_TENS) * 10
            + bcd_units(self.high.bits(Self::BIT_RANGE_HOUR_UNITS))?;

        Ok(Some(Timecode::new(hours, minutes, seconds, frames, format)))
    }

    /// True when the register arrived new this video frame, judged from the
    /// DBB receipt bits.
    pub fn is_fresh(&self) -> bool {
        self.dbb.bit(Self::BIT_DBB_RP188_RECEIVED)
            || self.dbb.bit(Self::BIT_DBB_LTC_RECEIVED)
            || self.dbb.bit(Self::BIT_DBB_VITC_RECEIVED)
    }

    pub fn is_drop_frame_set(&self) -> bool {
        self.low.bit(Self::BIT_DROP_FRAME)
    }

    pub fn set_drop_frame(&mut self, drop_frame: bool) {
        self.low.set_bit(Self::BIT_DROP_FRAME, drop_frame);
    }

    pub fn is_color_frame_set(&self) -> bool {
        self.low.bit(Self::BIT_COLOR_FRAME)
    }

    pub fn set_color_frame(&mut self, color_frame: bool) {
        self.low.set_bit(Self::BIT_COLOR_FRAME, color_frame);
    }

    /// Field ID flag. PAL rates keep it at bit 27 of the high word, all
    /// other rates at bit 27 of the low word.
    pub fn field_id(&self, format: TimecodeFormat) -> bool {
        if format.is_pal() {
            self.high.bit(Self::BIT_FIELD_ID_PAL)
        } else {
            self.low.bit(Self::BIT_FIELD_ID_NTSC)
        }
    }

    pub fn set_field_id(&mut self, format: TimecodeFormat, field_id: bool) {
        if format.is_pal() {
            self.high.set_bit(Self::BIT_FIELD_ID_PAL, field_id);
        } else {
            self.low.set_bit(Self::BIT_FIELD_ID_NTSC, field_id);
        }
    }

    /// Varicam marks which of the two fields carry active frames.
    /// Field 0 lives at bit 5 of the low word, field 1 at bit 4.
    pub fn varicam_frame_active(&self, field: u32) -> bool {
        if field == 0 {
            self.low.bit(Self::BIT_VARICAM_F0_ACTIVE)
        } else {
            self.low.bit(Self::BIT_VARICAM_F1_ACTIVE)
        }
    }

    pub fn set_varicam_frame_active(&mut self, field: u32, active: bool) {
        if field == 0 {
            self.low.set_bit(Self::BIT_VARICAM_F0_ACTIVE, active);
        } else {
            self.low.set_bit(Self::BIT_VARICAM_F1_ACTIVE, active);
        }
    }

    /// Binary-format-group flags. BFG1 sits at bit 26 of the high word for
    /// every rate; BFG0 and BFG2 swap positions between PAL and NTSC.
    pub fn set_bfg_bits(&mut self, format: TimecodeFormat, bfg0: bool, bfg1: bool, bfg2: bool) {
        self.high.set_bit(Self::BIT_BFG1, bfg1);

        if format.is_pal() {
            self.low.set_bit(Self::BIT_FIELD_ID_NTSC, bfg0);
            self.high.set_bit(Self::BIT_BFG_ALT, bfg2);
        } else {
            self.high.set_bit(Self::BIT_BFG_ALT, bfg0);
            self.high.set_bit(Self::BIT_FIELD_ID_PAL, bfg2);
        }
    }

    /// Timecode source identifier in the top byte of the DBB word.
    pub fn source(&self) -> u8 {
        ((self.dbb >> 24) & 0xFF) as u8
    }

    pub fn set_source(&mut self, source: u8) {
        self.dbb = (self.dbb & !0xFF00_0000) | (u32::from(source) << 24);
    }

    /// Output filter selection in the bottom byte of the DBB word.
    pub fn output_filter(&self) -> u8 {
        (self.dbb & 0xFF) as u8
    }

    pub fn set_output_filter(&mut self, filter: u8) {
        self.dbb = (self.dbb & !0x0000_00FF) | u32::from(filter);
    }
}

impl Debug for Rp188Frame {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "Rp188Frame {{ low: {:#010x}, high: {:#010x}, dbb: {:#010x} }}",
            self.low, self.high, self.dbb
        )
    }
}

fn bcd_units(nibble: u32) -> Result<u32, TimecodeError> {
    if nibble > 9 {
        return Err(TimecodeError::InvalidBcdDigit(nibble));
    }
    Ok(nibble)
}
