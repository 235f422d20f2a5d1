//! Core data types shared by the pipeline stages
//!
//! A conversion run produces these once and drops them when it ends; nothing
//! here is shared or mutated across stages.

use crate::error::{DacPackError, Result};
use std::fmt;

/// Bits of magnitude carried by every packed sample
pub const DAC_RESOLUTION_BITS: u32 = 12;

/// Largest quantized magnitude (`2^12 - 1`)
pub const DAC_MAX_VALUE: u16 = (1 << DAC_RESOLUTION_BITS) - 1;

/// Mask selecting the magnitude bits of a packed sample
pub const MAGNITUDE_MASK: u16 = DAC_MAX_VALUE;

/// PCM sample encodings the decoder accepts
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum BitDepth {
    /// 8-bit unsigned samples in `[0, 255]`
    U8,
    /// 16-bit signed little-endian samples in `[-32768, 32767]`
    I16,
}

impl BitDepth {
    /// Resolve a sample width given in bytes
    ///
    /// # Errors
    ///
    /// Returns `UnsupportedFormat` for anything other than 1 or 2 bytes.
    pub fn from_sample_width(bytes: u16) -> Result<Self> {
        match bytes {
            1 => Ok(Self::U8),
            2 => Ok(Self::I16),
            other => Err(DacPackError::unsupported_format(format!(
                "sample width of {other} bytes ({}-bit)",
                u32::from(other) * 8
            ))),
        }
    }

    /// Resolve a sample width given in bits
    ///
    /// # Errors
    ///
    /// Returns `UnsupportedFormat` for anything other than 8 or 16 bits.
    pub fn from_bits(bits: u16) -> Result<Self> {
        match bits {
            8 => Ok(Self::U8),
            16 => Ok(Self::I16),
            other => Err(DacPackError::unsupported_format(format!(
                "{other}-bit samples"
            ))),
        }
    }

    /// Sample width in bytes
    pub fn bytes(self) -> usize {
        match self {
            Self::U8 => 1,
            Self::I16 => 2,
        }
    }

    /// Sample width in bits
    pub fn bits(self) -> u16 {
        match self {
            Self::U8 => 8,
            Self::I16 => 16,
        }
    }
}

impl fmt::Display for BitDepth {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}-bit", self.bits())
    }
}

/// Description of a decoded PCM stream
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AudioStreamDescriptor {
    /// Number of interleaved channels (1 or 2)
    pub channels: u16,
    /// Sample encoding
    pub bit_depth: BitDepth,
    /// Sample rate in Hz
    pub sample_rate: u32,
    /// Number of frames (one sample per channel each)
    pub frame_count: u32,
}

impl AudioStreamDescriptor {
    /// Sample width in bytes
    pub fn sample_width_bytes(&self) -> usize {
        self.bit_depth.bytes()
    }

    /// Bytes per frame
    pub fn block_align(&self) -> usize {
        usize::from(self.channels) * self.sample_width_bytes()
    }

    /// Size of the interleaved PCM payload in bytes
    pub fn data_len(&self) -> usize {
        self.frame_count as usize * self.block_align()
    }

    /// Total number of interleaved samples across all channels
    pub fn sample_count(&self) -> usize {
        self.frame_count as usize * usize::from(self.channels)
    }

    /// Playback duration in seconds
    pub fn duration_secs(&self) -> f64 {
        if self.sample_rate == 0 {
            return 0.0;
        }
        f64::from(self.frame_count) / f64::from(self.sample_rate)
    }

    /// True for single-channel streams
    pub fn is_mono(&self) -> bool {
        self.channels == 1
    }
}

impl fmt::Display for AudioStreamDescriptor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} ch, {}, {} Hz, {} frames",
            self.channels, self.bit_depth, self.sample_rate, self.frame_count
        )
    }
}

/// Interleaved PCM samples exactly as stored in the container
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PcmBuffer {
    /// 8-bit unsigned samples
    U8(Vec<u8>),
    /// 16-bit signed samples
    I16(Vec<i16>),
}

impl PcmBuffer {
    /// Number of interleaved samples
    pub fn len(&self) -> usize {
        match self {
            Self::U8(samples) => samples.len(),
            Self::I16(samples) => samples.len(),
        }
    }

    /// True if the buffer holds no samples
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Size in bytes of the samples as stored in the container
    pub fn byte_len(&self) -> usize {
        match self {
            Self::U8(samples) => samples.len(),
            Self::I16(samples) => samples.len() * 2,
        }
    }

    /// Encoding of the buffered samples
    pub fn bit_depth(&self) -> BitDepth {
        match self {
            Self::U8(_) => BitDepth::U8,
            Self::I16(_) => BitDepth::I16,
        }
    }
}

/// A decoded stream: its description plus the raw interleaved samples
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DecodedAudio {
    descriptor: AudioStreamDescriptor,
    pcm: PcmBuffer,
}

impl DecodedAudio {
    /// Pair a descriptor with its samples, checking that they agree
    ///
    /// # Errors
    ///
    /// Returns `UnsupportedFormat` unless the stream has one or two channels,
    /// and `Decode` if the buffer does not hold exactly
    /// `frame_count * channels` samples of the declared width.
    pub fn new(descriptor: AudioStreamDescriptor, pcm: PcmBuffer) -> Result<Self> {
        if !(1..=2).contains(&descriptor.channels) {
            return Err(DacPackError::unsupported_format(format!(
                "{} channels (mono or stereo only)",
                descriptor.channels
            )));
        }
        if pcm.bit_depth() != descriptor.bit_depth {
            return Err(DacPackError::decode(format!(
                "sample buffer is {} but stream declares {}",
                pcm.bit_depth(),
                descriptor.bit_depth
            )));
        }
        if pcm.byte_len() != descriptor.data_len() {
            return Err(DacPackError::decode(format!(
                "expected {} bytes of sample data, found {}",
                descriptor.data_len(),
                pcm.byte_len()
            )));
        }
        Ok(Self { descriptor, pcm })
    }

    /// Stream description
    pub fn descriptor(&self) -> &AudioStreamDescriptor {
        &self.descriptor
    }

    /// Interleaved samples, `frame_count * channels` of them
    pub fn pcm(&self) -> &PcmBuffer {
        &self.pcm
    }
}

/// One DAC output word: control bits in the high nibble, magnitude below
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct PackedSample(pub u16);

impl PackedSample {
    /// Raw 16-bit word as sent to the DAC
    pub fn value(self) -> u16 {
        self.0
    }

    /// Bits outside the 12-bit magnitude
    pub fn control_bits(self) -> u16 {
        self.0 & !MAGNITUDE_MASK
    }

    /// Quantized 12-bit magnitude
    pub fn magnitude(self) -> u16 {
        self.0 & MAGNITUDE_MASK
    }
}

impl fmt::Display for PackedSample {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "0x{:04X}", self.0)
    }
}

impl fmt::UpperHex for PackedSample {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::UpperHex::fmt(&self.0, f)
    }
}

/// Ordered, immutable sequence of packed samples, one per input frame
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct OutputTable {
    samples: Vec<PackedSample>,
}

impl OutputTable {
    pub fn len(&self) -> usize {
        self.samples.len()
    }

    pub fn is_empty(&self) -> bool {
        self.samples.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, PackedSample> {
        self.samples.iter()
    }

    pub fn as_slice(&self) -> &[PackedSample] {
        &self.samples
    }
}

impl From<Vec<PackedSample>> for OutputTable {
    fn from(samples: Vec<PackedSample>) -> Self {
        Self { samples }
    }
}

impl FromIterator<PackedSample> for OutputTable {
    fn from_iter<I: IntoIterator<Item = PackedSample>>(iter: I) -> Self {
        Self {
            samples: iter.into_iter().collect(),
        }
    }
}

impl<'a> IntoIterator for &'a OutputTable {
    type Item = &'a PackedSample;
    type IntoIter = std::slice::Iter<'a, PackedSample>;

    fn into_iter(self) -> Self::IntoIter {
        self.samples.iter()
    }
}
