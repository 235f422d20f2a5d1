//! WAV container decoding
//!
//! Opens a RIFF/WAVE file, validates that it carries 8-bit unsigned or 16-bit
//! signed integer PCM in one or two channels, and materializes every sample in
//! memory. A short data chunk is a hard error; nothing is recovered from a
//! partially readable file.

use crate::error::{DacPackError, Result};
use crate::types::{AudioStreamDescriptor, BitDepth, DecodedAudio, PcmBuffer};
use std::fs::File;
use std::io::{BufReader, Read};
use std::path::Path;
use tracing::{debug, info};

/// Largest channel count the downmixer handles
pub const MAX_CHANNELS: u16 = 2;

/// Decode a WAV file from disk
///
/// The file handle is owned by the reader and closed when this returns,
/// whether decoding succeeded or not.
///
/// # Errors
///
/// * `FileNotFound` if `path` does not resolve
/// * `UnsupportedFormat` if samples are not 1 or 2 byte integers, or there
///   are more than two channels
/// * `Decode` if the container is malformed or truncated
pub fn decode_file(path: impl AsRef<Path>) -> Result<DecodedAudio> {
    let path = path.as_ref();
    let file = open_input(path)?;
    debug!("Decoding {}", path.display());
    decode_reader(BufReader::new(file))
}

/// Decode a WAV stream from any reader
pub fn decode_reader<R: Read>(reader: R) -> Result<DecodedAudio> {
    let mut wav = hound::WavReader::new(reader)?;
    let descriptor = describe(wav.spec(), wav.duration())?;

    info!(
        channels = descriptor.channels,
        sample_width_bits = descriptor.bit_depth.bits(),
        sample_rate_hz = descriptor.sample_rate,
        frames = descriptor.frame_count,
        "WAV info"
    );

    // hound hands 8-bit data back re-centred around zero
    let samples = wav
        .samples::<i16>()
        .collect::<std::result::Result<Vec<i16>, hound::Error>>()?;

    let pcm = match descriptor.bit_depth {
        BitDepth::U8 => PcmBuffer::U8(samples.into_iter().map(|s| (s + 128) as u8).collect()),
        BitDepth::I16 => PcmBuffer::I16(samples),
    };

    DecodedAudio::new(descriptor, pcm)
}

/// Read only the stream description, without loading the samples
pub fn read_descriptor(path: impl AsRef<Path>) -> Result<AudioStreamDescriptor> {
    let path = path.as_ref();
    let file = open_input(path)?;
    let wav = hound::WavReader::new(BufReader::new(file))?;
    describe(wav.spec(), wav.duration())
}

fn open_input(path: &Path) -> Result<File> {
    File::open(path).map_err(|e| {
        if e.kind() == std::io::ErrorKind::NotFound {
            DacPackError::file_not_found(path)
        } else {
            DacPackError::io(path, e)
        }
    })
}

fn describe(spec: hound::WavSpec, frame_count: u32) -> Result<AudioStreamDescriptor> {
    if spec.sample_format != hound::SampleFormat::Int {
        return Err(DacPackError::unsupported_format("floating-point samples"));
    }
    if spec.channels == 0 {
        return Err(DacPackError::decode("stream declares zero channels"));
    }
    if spec.channels > MAX_CHANNELS {
        return Err(DacPackError::unsupported_format(format!(
            "{} channels (mono or stereo only)",
            spec.channels
        )));
    }
    if spec.sample_rate == 0 {
        return Err(DacPackError::decode("stream declares a sample rate of 0 Hz"));
    }

    let sample_width = spec.bits_per_sample.div_ceil(8);
    let bit_depth = BitDepth::from_sample_width(sample_width)?;

    Ok(AudioStreamDescriptor {
        channels: spec.channels,
        bit_depth,
        sample_rate: spec.sample_rate,
        frame_count,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Cursor;

    fn wav_bytes(channels: u16, bits_per_sample: u16, samples: &[i32]) -> Vec<u8> {
        let spec = hound::WavSpec {
            channels,
            sample_rate: 8000,
            bits_per_sample,
            sample_format: hound::SampleFormat::Int,
        };
        let mut cursor = Cursor::new(Vec::new());
        {
            let mut writer = hound::WavWriter::new(&mut cursor, spec).unwrap();
            for &sample in samples {
                writer.write_sample(sample).unwrap();
            }
            writer.finalize().unwrap();
        }
        cursor.into_inner()
    }

    #[test]
    fn test_decode_8bit_restores_unsigned_bytes() {
        // hound takes 8-bit input centred on zero
        let bytes = wav_bytes(1, 8, &[-128, 0, 127]);
        let decoded = decode_reader(Cursor::new(bytes)).unwrap();
        assert_eq!(decoded.descriptor().bit_depth, BitDepth::U8);
        assert_eq!(decoded.descriptor().frame_count, 3);
        assert_eq!(decoded.pcm(), &PcmBuffer::U8(vec![0, 128, 255]));
    }

    #[test]
    fn test_decode_16bit_stereo() {
        let bytes = wav_bytes(2, 16, &[0, -2, 32767, -32768]);
        let decoded = decode_reader(Cursor::new(bytes)).unwrap();
        assert_eq!(decoded.descriptor().channels, 2);
        assert_eq!(decoded.descriptor().frame_count, 2);
        assert_eq!(decoded.descriptor().data_len(), 8);
        assert_eq!(decoded.pcm(), &PcmBuffer::I16(vec![0, -2, 32767, -32768]));
    }

    #[test]
    fn test_rejects_24bit() {
        let bytes = wav_bytes(1, 24, &[0, 1]);
        assert!(matches!(
            decode_reader(Cursor::new(bytes)),
            Err(DacPackError::UnsupportedFormat { .. })
        ));
    }

    #[test]
    fn test_rejects_more_than_two_channels() {
        let bytes = wav_bytes(3, 16, &[0, 0, 0]);
        assert!(matches!(
            decode_reader(Cursor::new(bytes)),
            Err(DacPackError::UnsupportedFormat { .. })
        ));
    }

    /// Mono `WAVE_FORMAT_EXTENSIBLE` stream with 2-byte containers and the
    /// given `wValidBitsPerSample`, followed by two zero samples
    fn extensible_wav_bytes(valid_bits: u16) -> Vec<u8> {
        const PCM_SUBFORMAT: [u8; 16] = [
            0x01, 0x00, 0x00, 0x00, 0x00, 0x00, 0x10, 0x00, 0x80, 0x00, 0x00, 0xAA, 0x00, 0x38, 0x9B,
            0x71,
        ];
        let sample_rate: u32 = 8000;
        let block_align: u16 = 2;
        let data = [0u8; 4];

        let mut fmt = Vec::with_capacity(40);
        fmt.extend_from_slice(&0xFFFEu16.to_le_bytes());
        fmt.extend_from_slice(&1u16.to_le_bytes());
        fmt.extend_from_slice(&sample_rate.to_le_bytes());
        fmt.extend_from_slice(&(sample_rate * u32::from(block_align)).to_le_bytes());
        fmt.extend_from_slice(&block_align.to_le_bytes());
        fmt.extend_from_slice(&16u16.to_le_bytes());
        fmt.extend_from_slice(&22u16.to_le_bytes());
        fmt.extend_from_slice(&valid_bits.to_le_bytes());
        fmt.extend_from_slice(&0x4u32.to_le_bytes());
        fmt.extend_from_slice(&PCM_SUBFORMAT);

        let mut bytes = Vec::new();
        bytes.extend_from_slice(b"RIFF");
        let riff_len = 4 + (8 + fmt.len()) + (8 + data.len());
        bytes.extend_from_slice(&(riff_len as u32).to_le_bytes());
        bytes.extend_from_slice(b"WAVE");
        bytes.extend_from_slice(b"fmt ");
        bytes.extend_from_slice(&(fmt.len() as u32).to_le_bytes());
        bytes.extend_from_slice(&fmt);
        bytes.extend_from_slice(b"data");
        bytes.extend_from_slice(&(data.len() as u32).to_le_bytes());
        bytes.extend_from_slice(&data);
        bytes
    }

    #[test]
    fn test_extensible_full_16bit_decodes() {
        let decoded = decode_reader(Cursor::new(extensible_wav_bytes(16))).unwrap();
        assert_eq!(decoded.descriptor().bit_depth, BitDepth::I16);
        assert_eq!(decoded.descriptor().frame_count, 2);
        assert_eq!(decoded.pcm(), &PcmBuffer::I16(vec![0, 0]));
    }

    #[test]
    fn test_extensible_partial_valid_bits_rejected() {
        // hound only reads 16-bit containers when all 16 bits are valid
        assert!(matches!(
            decode_reader(Cursor::new(extensible_wav_bytes(12))),
            Err(DacPackError::UnsupportedFormat { .. })
        ));
    }

    #[test]
    fn test_extensible_oversized_valid_bits_is_an_error() {
        for valid_bits in [0xFFF9, 0xFFFC, 0xFFFF] {
            assert!(matches!(
                decode_reader(Cursor::new(extensible_wav_bytes(valid_bits))),
                Err(DacPackError::UnsupportedFormat { .. })
            ));
        }
    }

    #[test]
    fn test_truncated_data_is_fatal() {
        let mut bytes = wav_bytes(1, 16, &[1, 2, 3, 4]);
        bytes.truncate(bytes.len() - 3);
        assert!(matches!(
            decode_reader(Cursor::new(bytes)),
            Err(DacPackError::Decode { .. })
        ));
    }

    #[test]
    fn test_garbage_is_decode_error() {
        let result = decode_reader(Cursor::new(b"not a wave file at all".to_vec()));
        assert!(matches!(result, Err(DacPackError::Decode { .. })));
    }

    #[test]
    fn test_missing_file() {
        assert!(matches!(
            decode_file("/nonexistent/dir/input.wav"),
            Err(DacPackError::FileNotFound { .. })
        ));
    }
}
