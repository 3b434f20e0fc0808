//! The eight 4-bit binary groups riding alongside the timecode digits.
//! SMPTE numbers the groups 1-8; groups 1-4 interleave with the low word's
//! digits, groups 5-8 with the high word's.

use crate::error::TimecodeError;
use crate::frame_rate::FrameRate;
use crate::rp188_frame::Rp188Frame;

/// Mask of the non-user nibbles (timecode digits and flags) in either word.
const DIGIT_NIBBLES: u32 = 0x0F0F_0F0F;

impl Rp188Frame {
    /// Spread a 32-bit word across all eight binary groups, most significant
    /// nibble into group 8. The timecode digits are untouched.
    pub fn set_user_bits(&mut self, bits: u32) {
        let mut high = self.high & DIGIT_NIBBLES;
        let mut low = self.low & DIGIT_NIBBLES;

        high |= (bits & 0xF000_0000)
            | ((bits & 0x0F00_0000) >> 4)
            | ((bits & 0x00F0_0000) >> 8)
            | ((bits & 0x000F_0000) >> 12);
        low |= ((bits & 0x0000_F000) << 16)
            | ((bits & 0x0000_0F00) << 12)
            | ((bits & 0x0000_00F0) << 8)
            | ((bits & 0x0000_000F) << 4);

        self.low = low;
        self.high = high;
    }

    /// Reassemble the eight binary groups into one 32-bit word, group 8 in
    /// the most significant nibble.
    pub fn user_bits(&self) -> u32 {
        let mut bits = 0u32;
        for group in 1..=8 {
            bits |= self.group_nibble(group) << ((group - 1) * 4);
        }
        bits
    }

    /// Read one binary group (SMPTE number 1..=8).
    pub fn binary_group(&self, smpte_group: u32) -> Result<u32, TimecodeError> {
        if !(1..=8).contains(&smpte_group) {
            return Err(TimecodeError::InvalidBinaryGroup(smpte_group));
        }
        Ok(self.group_nibble(smpte_group))
    }

    /// Write one binary group (SMPTE number 1..=8) without disturbing the
    /// other groups or the timecode digits.
    pub fn set_binary_group(&mut self, smpte_group: u32, bits: u32) -> Result<(), TimecodeError> {
        if !(1..=8).contains(&smpte_group) {
            return Err(TimecodeError::InvalidBinaryGroup(smpte_group));
        }

        if smpte_group < 5 {
            let shift = (smpte_group - 1) * 8 + 4;
            self.low = (self.low & !(0xF << shift)) | ((bits & 0xF) << shift);
        } else {
            let shift = (smpte_group - 5) * 8 + 4;
            self.high = (self.high & !(0xF << shift)) | ((bits & 0xF) << shift);
        }

        Ok(())
    }

    /// Read a user data word (SMPTE number 1..=16): a 4-bit field of the
    /// low word for 1-8, of the high word for 9-16, at nibble offset
    /// `index_within_word` (wrapping at the word boundary).
    pub fn udw(&self, smpte_udw: u32) -> Result<u32, TimecodeError> {
        if !(1..=16).contains(&smpte_udw) {
            return Err(TimecodeError::InvalidUserDataWord(smpte_udw));
        }

        let (word, index) = if smpte_udw <= 8 {
            (self.low, smpte_udw)
        } else {
            (self.high, smpte_udw - 8)
        };

        Ok((word >> (4 * (index % 8))) & 0xF)
    }

    /// The varicam shooting rate, decoded from its BCD digits in binary
    /// groups 4 (tens) and 3 (ones).
    pub fn varicam_rate(&self) -> u32 {
        self.group_nibble(4) * 10 + self.group_nibble(3)
    }

    /// Stamp a shooting frame rate into binary groups 3 and 4.
    pub fn set_varicam_rate(&mut self, rate: FrameRate) {
        let code = rate.varicam_code();
        self.low &= 0x0F0F_FFFF;
        self.low |= (code & 0x0F) << 20;
        self.low |= (code & 0xF0) << 24;
    }

    /// Hex rendering of the binary groups, most significant pair first:
    /// `"87 65 43 21"` group order.
    pub fn user_bits_string(&self) -> String {
        format!(
            "{:X}{:X} {:X}{:X} {:X}{:X} {:X}{:X}",
            self.group_nibble(8),
            self.group_nibble(7),
            self.group_nibble(6),
            self.group_nibble(5),
            self.group_nibble(4),
            self.group_nibble(3),
            self.group_nibble(2),
            self.group_nibble(1),
        )
    }

    fn group_nibble(&self, smpte_group: u32) -> u32 {
        if smpte_group < 5 {
            (self.low >> ((smpte_group - 1) * 8 + 4)) & 0xF
        } else {
            (self.high >> ((smpte_group - 5) * 8 + 4)) & 0xF
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{Timecode, TimecodeFormat};

    #[test]
    fn test_set_user_bits_word_split() {
        let mut frame = Rp188Frame::new_empty();
        frame.set_user_bits(0x1234_5678);
        assert_eq!(frame.low(), 0x5060_7080);
        assert_eq!(frame.high(), 0x1020_3040);
        assert_eq!(frame.user_bits(), 0x1234_5678);
    }

    #[test]
    fn test_set_user_bits_preserves_digits() {
        let tc = Timecode::new(5, 38, 14, 29, TimecodeFormat::Thirty);
        let mut frame = Rp188Frame::with_timecode(&tc);
        frame.set_user_bits(0xFFFF_FFFF);
        assert_eq!(
            frame.to_timecode(TimecodeFormat::Thirty).unwrap().unwrap(),
            tc
        );
        assert_eq!(frame.user_bits(), 0xFFFF_FFFF);
    }

    #[test]
    fn test_binary_groups() {
        let mut frame = Rp188Frame::new_empty();
        frame.set_user_bits(0x1234_5678);
        assert_eq!(frame.binary_group(1), Ok(0x8));
        assert_eq!(frame.binary_group(4), Ok(0x5));
        assert_eq!(frame.binary_group(5), Ok(0x4));
        assert_eq!(frame.binary_group(8), Ok(0x1));
        assert_eq!(
            frame.binary_group(0),
            Err(TimecodeError::InvalidBinaryGroup(0))
        );
        assert_eq!(
            frame.binary_group(9),
            Err(TimecodeError::InvalidBinaryGroup(9))
        );
    }

    #[test]
    fn test_set_binary_group_leaves_others_alone() {
        let mut frame = Rp188Frame::new_empty();
        frame.set_user_bits(0x1111_1111);
        frame.set_binary_group(3, 0xA).unwrap();
        assert_eq!(frame.binary_group(3), Ok(0xA));
        assert_eq!(frame.binary_group(2), Ok(0x1));
        assert_eq!(frame.binary_group(4), Ok(0x1));
        assert_eq!(frame.user_bits(), 0x1111_1A11);

        frame.set_binary_group(7, 0xB).unwrap();
        assert_eq!(frame.user_bits(), 0x1B11_1A11);
        assert_eq!(frame.set_binary_group(9, 0), Err(TimecodeError::InvalidBinaryGroup(9)));
    }

    #[test]
    fn test_udw_addressing() {
        let mut frame = Rp188Frame::new_empty();
        frame.set_user_bits(0x1234_5678);
        assert_eq!(frame.udw(1), Ok(0x8));
        assert_eq!(frame.udw(3), Ok(0x7));
        assert_eq!(frame.udw(9), Ok(0x4));
        assert_eq!(frame.udw(11), Ok(0x3));
        assert_eq!(frame.udw(0), Err(TimecodeError::InvalidUserDataWord(0)));
        assert_eq!(frame.udw(17), Err(TimecodeError::InvalidUserDataWord(17)));
    }

    #[test]
    fn test_varicam_rate_round_trip() {
        let mut frame = Rp188Frame::new_empty();
        frame.set_varicam_rate(FrameRate::Fps59_94);
        assert_eq!(frame.varicam_rate(), 60);
        assert_eq!(frame.binary_group(4), Ok(6));
        assert_eq!(frame.binary_group(3), Ok(0));

        frame.set_varicam_rate(FrameRate::Fps25);
        assert_eq!(frame.varicam_rate(), 25);

        frame.set_varicam_rate(FrameRate::Unknown);
        assert_eq!(frame.varicam_rate(), 0);
    }

    #[test]
    fn test_varicam_rate_leaves_digits_alone() {
        let tc = Timecode::new(5, 38, 14, 29, TimecodeFormat::Thirty);
        let mut frame = Rp188Frame::with_timecode(&tc);
        frame.set_varicam_rate(FrameRate::Fps24);
        assert_eq!(
            frame.to_timecode(TimecodeFormat::Thirty).unwrap().unwrap(),
            tc
        );
    }

    #[test]
    fn test_user_bits_string() {
        let mut frame = Rp188Frame::new_empty();
        frame.set_user_bits(0x1234_5678);
        assert_eq!(frame.user_bits_string(), "12 34 56 78");
    }
}
