//! Per-frame audio sample counts for video rates that do not divide the
//! audio clock evenly.
//!
//! A 1000/1001 frame rate gets a fractional number of samples per frame
//! (29.97 fps at 48 kHz is 1601.6), so the hardware deals out samples in a
//! repeating 5-frame cadence whose total is exact. Five frames is enough
//! because every supported rate reduces to a rational whose remainder cycle
//! divides 5. Integer-locked rates degenerate to five equal entries.

use crate::frame_rate::{AudioRate, FrameRate};

/// Length of the repeating cadence, in frames.
const CADENCE_FRAMES: usize = 5;

/// Samples per frame at 48 kHz across one cadence group. Higher audio rates
/// scale these entries by an exact power of two.
const fn cadence_48k(frame_rate: FrameRate) -> [u32; CADENCE_FRAMES] {
    match frame_rate {
        FrameRate::Fps120 => [400; 5],
        FrameRate::Fps119_88 => [400, 401, 400, 401, 400],
        FrameRate::Fps60 => [800; 5],
        FrameRate::Fps59_94 => [800, 801, 801, 801, 801],
        FrameRate::Fps50 => [960; 5],
        FrameRate::Fps48 => [1000; 5],
        FrameRate::Fps47_95 => [1001; 5],
        FrameRate::Fps30 => [1600; 5],
        FrameRate::Fps29_97 => [1602, 1601, 1602, 1601, 1602],
        FrameRate::Fps25 => [1920; 5],
        FrameRate::Fps24 => [2000; 5],
        FrameRate::Fps23_98 => [2002; 5],
        FrameRate::Fps15 => [3200; 5],
        FrameRate::Fps14_98 => [3204, 3203, 3203, 3203, 3203],
        FrameRate::Unknown => [0; 5],
    }
}

/// Running totals over one cadence group: `prefix[k]` is the sample count of
/// the first `k` frames, so `prefix[5]` is the full-group total.
const fn cadence_prefix_48k(frame_rate: FrameRate) -> [u64; CADENCE_FRAMES + 1] {
    let pattern = cadence_48k(frame_rate);
    let mut prefix = [0u64; CADENCE_FRAMES + 1];
    let mut i = 0;
    while i < CADENCE_FRAMES {
        prefix[i + 1] = prefix[i] + pattern[i] as u64;
        i += 1;
    }
    prefix
}

/// Audio samples belonging to one video frame.
///
/// `cadence_frame` is the frame's position in the 5-frame cadence (taken
/// modulo 5, so a raw frame number works too). An unknown frame rate yields
/// 0 samples.
pub fn samples_per_frame(frame_rate: FrameRate, audio_rate: AudioRate, cadence_frame: u32) -> u32 {
    let pattern = cadence_48k(frame_rate);
    pattern[(cadence_frame as usize) % CADENCE_FRAMES] * audio_rate.multiple_of_48k()
}

/// Total audio samples in frames `0..frame_count` (exclusive of
/// `frame_count` itself).
///
/// Closed form: whole cadence groups times the constant group total, plus a
/// prefix lookup for the partial group. Recordings run for days and frame
/// numbers reach the billions, so this must not loop over frames.
pub fn total_samples_through_frame(
    frame_rate: FrameRate,
    audio_rate: AudioRate,
    frame_count: u64,
) -> u64 {
    let prefix = cadence_prefix_48k(frame_rate);
    let group_total = prefix[CADENCE_FRAMES];

    let groups = frame_count / CADENCE_FRAMES as u64;
    let partial = prefix[(frame_count % CADENCE_FRAMES as u64) as usize];

    (groups * group_total + partial) * u64::from(audio_rate.multiple_of_48k())
}
