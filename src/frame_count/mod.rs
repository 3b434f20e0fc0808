//! Conversion between a linear frame count and a [`Timecode`], including the
//! drop-frame arithmetic and the 24-hour wraparound add/subtract.

use crate::{Timecode, TimecodeFormat};

impl Timecode {
    /// Expand a linear frame count into a timecode (frame 0 = 00:00:00:00).
    ///
    /// Counts of a day or more wrap. For the drop-frame formats the cascade
    /// works in 10-minute blocks: the first minute of each block keeps all
    /// its frames, the other nine start with a short second that skips the
    /// dropped frame numbers.
    pub fn from_frame_count(frame_count: u32, format: TimecodeFormat) -> Self {
        let fps = format.frames_per_second();
        let frames_per_min = fps * 60;

        if !format.is_drop_frame() {
            let frames_per_hr = frames_per_min * 60;
            let frames_per_day = frames_per_hr * 24;

            let mut count = frame_count % frames_per_day;
            let hours = count / frames_per_hr;
            count %= frames_per_hr;
            let minutes = count / frames_per_min;
            count %= frames_per_min;
            let seconds = count / fps;
            let frames = count % fps;

            return Self::new(hours, minutes, seconds, frames, format);
        }

        let dropped = format.dropped_frames_per_minute();
        let drop_frames_per_sec = fps - dropped;
        let drop_frames_per_min = 59 * fps + drop_frames_per_sec;
        let drop_frames_per_ten_min = 9 * drop_frames_per_min + frames_per_min;
        let drop_frames_per_hr = drop_frames_per_ten_min * 6;
        let drop_frames_per_day = drop_frames_per_hr * 24;

        let mut count = frame_count % drop_frames_per_day;

        let hours = count / drop_frames_per_hr;
        count %= drop_frames_per_hr;

        let mut minutes = 10 * (count / drop_frames_per_ten_min);
        count %= drop_frames_per_ten_min;

        // the first minute of each 10-minute block is a full one
        if count >= frames_per_min {
            minutes += 1;
            count -= frames_per_min;
            minutes += count / drop_frames_per_min;
            count %= drop_frames_per_min;
        }

        let mut seconds = 0;
        if minutes % 10 == 0 {
            // full minute: every second is full length
            seconds = count / fps;
            count %= fps;
        } else if count >= drop_frames_per_sec {
            // drop minute: the leading second is short
            seconds = 1 + (count - drop_frames_per_sec) / fps;
            count = (count - drop_frames_per_sec) % fps;
        }

        let mut frames = count;

        // frame numbers in a drop second start above the dropped range
        // (2..=29 rather than 0..=27 at 30 fps)
        if seconds == 0 && minutes % 10 != 0 {
            frames += dropped;
        }

        Self::new(hours, minutes, seconds, frames, format)
    }

    /// Collapse this timecode back to its linear frame count, the exact
    /// inverse of [`Timecode::from_frame_count`].
    pub fn to_frame_count(&self) -> u32 {
        let fps = self.format.frames_per_second();

        if !self.format.is_drop_frame() {
            let minutes = 60 * self.hours + self.minutes;
            let seconds = 60 * minutes + self.seconds;
            return fps * seconds + self.frames;
        }

        let frames_per_min = fps * 60;
        let dropped = self.format.dropped_frames_per_minute();
        let drop_frames_per_sec = fps - dropped;
        let drop_frames_per_min = 59 * fps + drop_frames_per_sec;
        let drop_frames_per_ten_min = 9 * drop_frames_per_min + frames_per_min;
        let drop_frames_per_hr = drop_frames_per_ten_min * 6;

        let mut count = self.hours * drop_frames_per_hr;
        count += (self.minutes / 10) * drop_frames_per_ten_min;

        let mut minutes = self.minutes % 10;
        if minutes > 0 {
            // the first minute of the block is a full one, the rest drop
            count += frames_per_min;
            minutes -= 1;
            count += minutes * drop_frames_per_min;
        }

        let mut seconds = self.seconds;
        if seconds > 0 {
            if self.minutes % 10 != 0 {
                // the leading second of a drop minute is short
                count += drop_frames_per_sec;
                seconds -= 1;
            }
            count += seconds * fps;
        }

        if self.seconds == 0 && self.minutes % 10 != 0 {
            // undo the drop-second frame-number offset
            count += self.frames.saturating_sub(dropped);
        } else {
            count += self.frames;
        }

        count
    }

    /// Advance by `frame_count` frames, wrapping at the 24-hour mark.
    pub fn add_frames(&self, frame_count: u32) -> Self {
        let max = u64::from(self.format.max_frames_per_day());
        let count = (u64::from(self.to_frame_count()) + u64::from(frame_count)) % max;
        Self::from_frame_count(count as u32, self.format)
    }

    /// Step back by `frame_count` frames, wrapping below 00:00:00:00.
    pub fn subtract_frames(&self, frame_count: u32) -> Self {
        let max = self.format.max_frames_per_day();
        let current = self.to_frame_count();
        let amount = frame_count % max;

        let count = if amount <= current {
            current - amount
        } else {
            max - (amount - current)
        };

        Self::from_frame_count(count, self.format)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::{Rng, SeedableRng};

    const ALL_FORMATS: [TimecodeFormat; 8] = [
        TimecodeFormat::TwentyFour,
        TimecodeFormat::TwentyFive,
        TimecodeFormat::Thirty,
        TimecodeFormat::ThirtyDrop,
        TimecodeFormat::FortyEight,
        TimecodeFormat::Fifty,
        TimecodeFormat::Sixty,
        TimecodeFormat::SixtyDrop,
    ];

    #[test]
    fn test_thirty_drop_minute_boundary() {
        let tc = Timecode::from_frame_count(0, TimecodeFormat::ThirtyDrop);
        assert_eq!(tc.to_string(), "00:00:00;00");

        let tc = Timecode::from_frame_count(2, TimecodeFormat::ThirtyDrop);
        assert_eq!(tc.to_string(), "00:00:00;02");

        // one 30 fps minute minus the two dropped frame numbers
        let tc = Timecode::from_frame_count(1800, TimecodeFormat::ThirtyDrop);
        assert_eq!(tc.to_string(), "00:01:00;02");

        // ten-minute boundary keeps all its frames
        let tc = Timecode::from_frame_count(17982, TimecodeFormat::ThirtyDrop);
        assert_eq!(tc.to_string(), "00:10:00;00");
    }

    #[test]
    fn test_sixty_drop_minute_boundary() {
        let tc = Timecode::from_frame_count(3600, TimecodeFormat::SixtyDrop);
        assert_eq!(tc.to_string(), "00:01:00;04");

        let tc = Timecode::from_frame_count(35964, TimecodeFormat::SixtyDrop);
        assert_eq!(tc.to_string(), "00:10:00;00");
    }

    #[test]
    fn test_non_drop_cascade() {
        let tc = Timecode::from_frame_count(2_592_000 - 1, TimecodeFormat::Thirty);
        assert_eq!(tc.to_string(), "23:59:59:29");

        let tc = Timecode::from_frame_count(30 * 60 * 60, TimecodeFormat::Thirty);
        assert_eq!(tc.to_string(), "01:00:00:00");

        // counts of a day or more wrap
        let tc = Timecode::from_frame_count(2_592_000 + 31, TimecodeFormat::Thirty);
        assert_eq!(tc.to_string(), "00:00:01:01");
    }

    #[test]
    fn test_round_trip_boundaries() {
        for format in ALL_FORMATS {
            let max = format.max_frames_per_day();
            for count in [0, 1, max / 2, max - 2, max - 1] {
                let tc = Timecode::from_frame_count(count, format);
                assert_eq!(tc.to_frame_count(), count, "{format:?} at {count}");
            }
        }
    }

    #[test]
    fn test_round_trip_first_hour_exhaustive() {
        // the first hour crosses every kind of minute boundary
        for format in [TimecodeFormat::ThirtyDrop, TimecodeFormat::SixtyDrop] {
            let frames_per_hr = format.max_frames_per_day() / 24;
            for count in 0..frames_per_hr {
                let tc = Timecode::from_frame_count(count, format);
                assert_eq!(tc.to_frame_count(), count, "{format:?} at {count}");
            }
        }
    }

    #[test]
    fn test_round_trip_random() {
        let mut rng = rand::rngs::StdRng::seed_from_u64(0x5274_7269_7021);
        for format in ALL_FORMATS {
            let max = format.max_frames_per_day();
            for _ in 0..5_000 {
                let count = rng.gen_range(0..max);
                let tc = Timecode::from_frame_count(count, format);
                assert_eq!(tc.to_frame_count(), count, "{format:?} at {count}");
            }
        }
    }

    #[test]
    fn test_drop_formats_never_produce_dropped_numbers() {
        let mut rng = rand::rngs::StdRng::seed_from_u64(7);
        for format in [TimecodeFormat::ThirtyDrop, TimecodeFormat::SixtyDrop] {
            let dropped = format.dropped_frames_per_minute();
            for _ in 0..20_000 {
                let count = rng.gen_range(0..format.max_frames_per_day());
                let tc = Timecode::from_frame_count(count, format);
                if tc.seconds() == 0 && tc.minutes() % 10 != 0 {
                    assert!(tc.frames() >= dropped, "{format:?} produced {tc}");
                }
            }
        }
    }

    #[test]
    fn test_add_frames_wraps_at_midnight() {
        for format in ALL_FORMATS {
            let max = format.max_frames_per_day();
            let tc = Timecode::from_frame_count(max - 1, format);
            let wrapped = tc.add_frames(1);
            assert_eq!(wrapped.to_frame_count(), 0, "{format:?}");
        }
    }

    #[test]
    fn test_subtract_frames_wraps_below_zero() {
        for format in ALL_FORMATS {
            let max = format.max_frames_per_day();
            let tc = Timecode::from_frame_count(0, format);
            assert_eq!(tc.subtract_frames(1).to_frame_count(), max - 1);
            assert_eq!(tc.subtract_frames(max).to_frame_count(), 0);
            assert_eq!(tc.subtract_frames(max + 5).to_frame_count(), max - 5);
        }
    }

    #[test]
    fn test_add_subtract_inverse() {
        let mut rng = rand::rngs::StdRng::seed_from_u64(99);
        for format in ALL_FORMATS {
            let max = format.max_frames_per_day();
            for _ in 0..1_000 {
                let start = rng.gen_range(0..max);
                let step = rng.gen_range(0..max * 2);
                let tc = Timecode::from_frame_count(start, format);
                assert_eq!(tc.add_frames(step).subtract_frames(step), tc);
            }
        }
    }
}
