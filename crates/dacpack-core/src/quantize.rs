//! Linear rescaling of mono values onto the 12-bit DAC range
//!
//! The product is truncated toward zero (an integer cast of the floating
//! point result), never rounded to nearest. Operation order is part of the
//! output format: divide by the source full scale first, then multiply by 4095.

use crate::types::{BitDepth, DAC_MAX_VALUE};

const U8_FULL_SCALE: f64 = 255.0;
const I16_FULL_SCALE: f64 = 65535.0;
const I16_OFFSET: i32 = 32768;
const DAC_FULL_SCALE: f64 = DAC_MAX_VALUE as f64;

/// Rescale a downmixed value without clamping
///
/// For the domains the downmixer produces the result is already in
/// `0..=4095`; wider inputs may land outside it.
pub fn scale(bit_depth: BitDepth, value: i32) -> i64 {
    let ratio = match bit_depth {
        BitDepth::U8 => f64::from(value) / U8_FULL_SCALE,
        BitDepth::I16 => f64::from(value + I16_OFFSET) / I16_FULL_SCALE,
    };
    (ratio * DAC_FULL_SCALE) as i64
}

/// Clamp a scaled value into `0..=4095`
#[inline]
pub fn clamp_to_dac(scaled: i64) -> u16 {
    scaled.clamp(0, i64::from(DAC_MAX_VALUE)) as u16
}

/// Rescale and clamp a downmixed value to an unsigned 12-bit magnitude
pub fn quantize(bit_depth: BitDepth, value: i32) -> u16 {
    clamp_to_dac(scale(bit_depth, value))
}
