//! Merging quantized magnitudes with DAC control bits

use crate::config::ControlMask;
use crate::types::{PackedSample, MAGNITUDE_MASK};

/// Combine a control mask with a 12-bit magnitude
///
/// Bits of `scaled` above bit 11 are discarded.
#[inline]
pub fn pack(mask: ControlMask, scaled: u16) -> PackedSample {
    PackedSample(mask.bits() | (scaled & MAGNITUDE_MASK))
}
