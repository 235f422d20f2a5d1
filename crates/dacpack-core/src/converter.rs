//! The SampleConverter pipeline
//!
//! decode → downmix → quantize → pack → emit, run once per call. Each stage
//! either hands its output to the next or returns the first error; there is
//! no state carried between runs.

use crate::config::ConverterConfig;
use crate::decoder;
use crate::downmix::downmix;
use crate::emit::{emit_header, HeaderContext};
use crate::error::Result;
use crate::pack::pack;
use crate::quantize::{clamp_to_dac, scale};
use crate::types::{AudioStreamDescriptor, DecodedAudio, OutputTable};
use std::path::{Path, PathBuf};
use tracing::{debug, info, warn};

/// Summary of a completed conversion
#[derive(Debug, Clone, PartialEq)]
pub struct ConversionReport {
    /// Stream the table was generated from
    pub descriptor: AudioStreamDescriptor,
    /// Entries in the emitted array
    pub sample_count: usize,
    /// Header that was written
    pub output_path: PathBuf,
    /// Samples whose scaled value fell outside `0..=4095`
    pub clamped_samples: usize,
}

/// Converts PCM WAV files into DAC sample tables
#[derive(Debug, Clone, Default)]
pub struct SampleConverter {
    config: ConverterConfig,
}

impl SampleConverter {
    /// Create a converter, validating `config` up front
    pub fn new(config: ConverterConfig) -> Result<Self> {
        config.validate()?;
        Ok(Self { config })
    }

    /// Active configuration
    pub fn config(&self) -> &ConverterConfig {
        &self.config
    }

    /// Quantize and pack already decoded audio
    pub fn convert_audio(&self, audio: &DecodedAudio) -> OutputTable {
        self.convert_counting_clamps(audio).0
    }

    fn convert_counting_clamps(&self, audio: &DecodedAudio) -> (OutputTable, usize) {
        let bit_depth = audio.descriptor().bit_depth;
        let mask = self.config.control_mask;
        let mut clamped = 0usize;

        let table: OutputTable = downmix(audio)
            .into_iter()
            .map(|mono| {
                let scaled = scale(bit_depth, mono);
                let magnitude = clamp_to_dac(scaled);
                if i64::from(magnitude) != scaled {
                    clamped += 1;
                }
                pack(mask, magnitude)
            })
            .collect();

        if clamped > 0 {
            warn!(clamped, "Scaled samples fell outside the 12-bit range and were clamped");
        }
        (table, clamped)
    }

    /// Convert `input` and write the header to `output`
    pub fn convert_file(&self, input: impl AsRef<Path>, output: impl AsRef<Path>) -> Result<ConversionReport> {
        let input = input.as_ref();
        let output = output.as_ref();

        let audio = decoder::decode_file(input)?;
        let (table, clamped_samples) = self.convert_counting_clamps(&audio);
        debug!(
            samples = table.len(),
            mask = %self.config.control_mask,
            "Packed samples"
        );

        let source_name = input
            .file_name()
            .map(|name| name.to_string_lossy().into_owned())
            .unwrap_or_else(|| input.display().to_string());
        let ctx = HeaderContext::new(&source_name, audio.descriptor(), &self.config.variable_name);
        emit_header(&table, &ctx, output)?;

        info!(
            output = %output.display(),
            samples = table.len(),
            sample_rate_hz = audio.descriptor().sample_rate,
            "Converted and pre-formatted"
        );

        Ok(ConversionReport {
            descriptor: *audio.descriptor(),
            sample_count: table.len(),
            output_path: output.to_path_buf(),
            clamped_samples,
        })
    }

    /// Describe `input` without converting it
    pub fn inspect(&self, input: impl AsRef<Path>) -> Result<AudioStreamDescriptor> {
        decoder::read_descriptor(input)
    }
}
