//! Channel downmixing
//!
//! Reduces each frame to a single value in the source's own domain:
//! `0..=255` for 8-bit input, `-32768..=32767` for 16-bit input. Stereo frames
//! are averaged with floor division, so a negative odd sum rounds toward
//! negative infinity (`(0 + -3) / 2 == -2`).

use crate::types::{DecodedAudio, PcmBuffer};

/// Average two channel values, rounding toward negative infinity
#[inline]
pub fn floor_average(left: i32, right: i32) -> i32 {
    (left + right).div_euclid(2)
}

/// Downmix one 8-bit frame
///
/// `frame` holds one or two channel bytes; a stereo frame is averaged.
#[inline]
pub fn mix_u8_frame(frame: &[u8]) -> i32 {
    match *frame {
        [left, right] => floor_average(i32::from(left), i32::from(right)),
        _ => i32::from(frame[0]),
    }
}

/// Downmix one 16-bit frame (one or two channel samples)
#[inline]
pub fn mix_i16_frame(frame: &[i16]) -> i32 {
    match *frame {
        [left, right] => floor_average(i32::from(left), i32::from(right)),
        _ => i32::from(frame[0]),
    }
}

/// Produce one mono value per frame of `audio`
///
/// `DecodedAudio` guarantees one or two channels and a buffer of exactly
/// `frame_count * channels` samples, so every chunk is a whole frame.
pub fn downmix(audio: &DecodedAudio) -> Vec<i32> {
    let channels = usize::from(audio.descriptor().channels);

    match audio.pcm() {
        PcmBuffer::U8(samples) => samples.chunks_exact(channels).map(mix_u8_frame).collect(),
        PcmBuffer::I16(samples) => samples.chunks_exact(channels).map(mix_i16_frame).collect(),
    }
}
