//! Video frame rates, audio sample rates and the harmonic groupings between
//! them. NTSC-descended rates carry the 1000/1001 scale factor exactly, as a
//! rational, so nothing downstream ever rounds.

/// A video frame rate. The fractional variants are the NTSC-family rates
/// running 1000/1001 slow of their integer siblings.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FrameRate {
    Unknown,
    Fps120,
    Fps119_88,
    Fps60,
    Fps59_94,
    Fps50,
    Fps48,
    Fps47_95,
    Fps30,
    Fps29_97,
    Fps25,
    Fps24,
    Fps23_98,
    Fps15,
    Fps14_98,
}

impl FrameRate {
    /// The exact rate as a numerator/denominator pair
    /// (e.g. 29.97 fps → (30000, 1001)). Unknown yields (0, 1).
    pub const fn exact_ratio(self) -> (u64, u64) {
        match self {
            Self::Fps120 => (120, 1),
            Self::Fps119_88 => (120_000, 1001),
            Self::Fps60 => (60, 1),
            Self::Fps59_94 => (60_000, 1001),
            Self::Fps50 => (50, 1),
            Self::Fps48 => (48, 1),
            Self::Fps47_95 => (48_000, 1001),
            Self::Fps30 => (30, 1),
            Self::Fps29_97 => (30_000, 1001),
            Self::Fps25 => (25, 1),
            Self::Fps24 => (24, 1),
            Self::Fps23_98 => (24_000, 1001),
            Self::Fps15 => (15, 1),
            Self::Fps14_98 => (15_000, 1001),
            Self::Unknown => (0, 1),
        }
    }

    /// True for the 1000/1001-scaled rates.
    pub const fn is_fractional(self) -> bool {
        self.exact_ratio().1 != 1
    }

    /// The harmonic family this rate belongs to.
    pub const fn family(self) -> FrameRateFamily {
        match self {
            Self::Fps14_98 | Self::Fps29_97 | Self::Fps59_94 | Self::Fps119_88 => {
                FrameRateFamily::Ntsc30
            }
            Self::Fps15 | Self::Fps30 | Self::Fps60 | Self::Fps120 => FrameRateFamily::Smpte30,
            Self::Fps25 | Self::Fps50 => FrameRateFamily::Pal25,
            Self::Fps24 | Self::Fps48 => FrameRateFamily::Film24,
            Self::Fps23_98 | Self::Fps47_95 => FrameRateFamily::Ntsc24,
            Self::Unknown => FrameRateFamily::Unknown,
        }
    }

    /// True when two rates can run genlocked on shared hardware, which
    /// requires a whole-number ratio between them.
    pub fn is_multi_format_compatible(self, other: FrameRate) -> bool {
        self.family() != FrameRateFamily::Unknown && self.family() == other.family()
    }

    /// Varicam "shooting rate" code for this rate: two BCD digits, e.g.
    /// 0x60 for the 60 fps rates. Rates varicam never shoots at yield 0.
    pub(crate) const fn varicam_code(self) -> u32 {
        match self {
            Self::Fps60 | Self::Fps59_94 => 0x60,
            Self::Fps50 => 0x50,
            Self::Fps48 | Self::Fps47_95 => 0x48,
            Self::Fps30 | Self::Fps29_97 => 0x30,
            Self::Fps25 => 0x25,
            Self::Fps24 | Self::Fps23_98 => 0x24,
            Self::Fps15 | Self::Fps14_98 => 0x15,
            Self::Fps120 | Self::Fps119_88 | Self::Unknown => 0,
        }
    }
}

/// Sets of harmonically related frame rates. Rates in one family share a
/// common clock; rates from different families drift against each other.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FrameRateFamily {
    /// 1000/1001-scaled descendants of 30 fps NTSC
    Ntsc30,
    /// integer multiples of 15 fps
    Smpte30,
    /// 25 fps PAL and its double
    Pal25,
    /// 24 fps film and its double
    Film24,
    /// 1000/1001-scaled descendants of 24 fps
    Ntsc24,
    Unknown,
}

impl FrameRateFamily {
    /// Every rate in the family, slowest first.
    pub const fn members(self) -> &'static [FrameRate] {
        match self {
            Self::Ntsc30 => &[
                FrameRate::Fps14_98,
                FrameRate::Fps29_97,
                FrameRate::Fps59_94,
                FrameRate::Fps119_88,
            ],
            Self::Smpte30 => &[
                FrameRate::Fps15,
                FrameRate::Fps30,
                FrameRate::Fps60,
                FrameRate::Fps120,
            ],
            Self::Pal25 => &[FrameRate::Fps25, FrameRate::Fps50],
            Self::Film24 => &[FrameRate::Fps24, FrameRate::Fps48],
            Self::Ntsc24 => &[FrameRate::Fps23_98, FrameRate::Fps47_95],
            Self::Unknown => &[],
        }
    }
}

/// The audio sample rates the hardware clocks at. Everything is an exact
/// power-of-two multiple of 48 kHz.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum AudioRate {
    Rate48K,
    Rate96K,
    Rate192K,
}

impl AudioRate {
    pub const fn hertz(self) -> u32 {
        match self {
            Self::Rate48K => 48_000,
            Self::Rate96K => 96_000,
            Self::Rate192K => 192_000,
        }
    }

    /// Sample-count scale factor relative to 48 kHz.
    pub const fn multiple_of_48k(self) -> u32 {
        match self {
            Self::Rate48K => 1,
            Self::Rate96K => 2,
            Self::Rate192K => 4,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_exact_ratio() {
        assert_eq!(FrameRate::Fps29_97.exact_ratio(), (30_000, 1001));
        assert_eq!(FrameRate::Fps25.exact_ratio(), (25, 1));
        assert!(FrameRate::Fps59_94.is_fractional());
        assert!(!FrameRate::Fps60.is_fractional());
    }

    #[test]
    fn test_family_membership_is_consistent() {
        for family in [
            FrameRateFamily::Ntsc30,
            FrameRateFamily::Smpte30,
            FrameRateFamily::Pal25,
            FrameRateFamily::Film24,
            FrameRateFamily::Ntsc24,
        ] {
            for rate in family.members() {
                assert_eq!(rate.family(), family, "{rate:?}");
            }
        }
    }

    #[test]
    fn test_multi_format_compatibility() {
        assert!(FrameRate::Fps29_97.is_multi_format_compatible(FrameRate::Fps59_94));
        assert!(FrameRate::Fps14_98.is_multi_format_compatible(FrameRate::Fps119_88));
        assert!(FrameRate::Fps24.is_multi_format_compatible(FrameRate::Fps48));
        assert!(!FrameRate::Fps30.is_multi_format_compatible(FrameRate::Fps29_97));
        assert!(!FrameRate::Fps25.is_multi_format_compatible(FrameRate::Fps24));
        assert!(!FrameRate::Unknown.is_multi_format_compatible(FrameRate::Unknown));
    }

    #[test]
    fn test_family_ratios_are_harmonic() {
        // within a family every pair of rates is a whole-number ratio apart
        for family in [
            FrameRateFamily::Ntsc30,
            FrameRateFamily::Smpte30,
            FrameRateFamily::Pal25,
            FrameRateFamily::Film24,
            FrameRateFamily::Ntsc24,
        ] {
            let members = family.members();
            let (base_num, base_den) = members[0].exact_ratio();
            for rate in members {
                let (num, den) = rate.exact_ratio();
                // num/den divided by base_num/base_den must be an integer
                assert_eq!((num * base_den) % (base_num * den), 0, "{rate:?}");
            }
        }
    }

    #[test]
    fn test_audio_rates() {
        assert_eq!(AudioRate::Rate48K.hertz(), 48_000);
        assert_eq!(AudioRate::Rate96K.hertz(), 96_000);
        assert_eq!(AudioRate::Rate192K.hertz(), 192_000);
        for rate in [AudioRate::Rate48K, AudioRate::Rate96K, AudioRate::Rate192K] {
            assert_eq!(rate.hertz(), 48_000 * rate.multiple_of_48k());
        }
    }
}
