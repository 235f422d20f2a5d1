//! # dacpack-core: WAV to DAC sample tables
//!
//! Converts uncompressed PCM WAV audio into a `const uint16_t` array that
//! firmware can stream straight from flash into a 12-bit SPI DAC such as the
//! MCP4921/MCP4922.
//!
//! ## Pipeline
//!
//! 1. **Decode**: 8-bit unsigned or 16-bit signed PCM, mono or stereo
//! 2. **Downmix**: stereo frames are floor-averaged to mono
//! 3. **Quantize**: linear rescale onto `0..=4095`, truncating
//! 4. **Pack**: OR with the DAC control bits (`0x3000` by default)
//! 5. **Emit**: C header with guards, `AUDIO_SAMPLE_RATE` and
//!    `NUM_AUDIO_SAMPLES` macros, 12 hex values per line
//!
//! ## Usage
//!
//! ```no_run
//! use dacpack_core::{ConverterConfig, ControlMask, SampleConverter};
//!
//! let config = ConverterConfig::new()
//!     .with_variable_name("chime")
//!     .with_control_mask(ControlMask::CHANNEL_B);
//! let converter = SampleConverter::new(config)?;
//! let report = converter.convert_file("chime.wav", "audio_data.h")?;
//! println!("{} samples at {} Hz", report.sample_count, report.descriptor.sample_rate);
//! # Ok::<(), dacpack_core::DacPackError>(())
//! ```

#![warn(missing_docs)]
#![allow(clippy::module_name_repetitions)]

#[allow(missing_docs)]
pub mod config;
pub mod converter;
pub mod decoder;
pub mod downmix;
pub mod emit;
#[allow(missing_docs)]
pub mod error;
pub mod pack;
pub mod quantize;
#[allow(missing_docs)]
pub mod types;

// Re-export commonly used types
pub use config::{ControlMask, ConverterConfig, DEFAULT_VARIABLE_NAME};
pub use converter::{ConversionReport, SampleConverter};
pub use error::{DacPackError, ErrorCategory, Result};
pub use types::{
    AudioStreamDescriptor, BitDepth, DecodedAudio, OutputTable, PackedSample, PcmBuffer,
};

/// Version information for the library
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
