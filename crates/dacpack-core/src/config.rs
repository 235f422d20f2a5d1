//! Converter configuration
//!
//! The control mask and output variable name are per-run parameters. They can
//! be built in code, or loaded from a TOML file such as:
//!
//! ```toml
//! variable_name = "dac_audio_stream"
//! control_mask = 0x3000
//! ```

use crate::error::{DacPackError, Result};
use crate::types::MAGNITUDE_MASK;
use serde::{Deserialize, Deserializer};
use std::fmt;
use std::path::Path;

/// Default name of the emitted C array
pub const DEFAULT_VARIABLE_NAME: &str = "dac_audio_stream";

/// Static DAC configuration bits merged into every output word
///
/// Only the four bits above the 12-bit magnitude may be set.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ControlMask(u16);

impl ControlMask {
    /// MCP4922 channel A, 1x gain, output active
    pub const CHANNEL_A: Self = Self(0x3000);

    /// MCP4922 channel B, 1x gain, output active
    pub const CHANNEL_B: Self = Self(0xB000);

    /// Build a mask from raw bits
    ///
    /// # Errors
    ///
    /// Returns `InvalidConfig` if any of the low 12 bits are set, since
    /// those belong to the sample magnitude.
    pub fn new(bits: u16) -> Result<Self> {
        if bits & MAGNITUDE_MASK != 0 {
            return Err(DacPackError::invalid_config(format!(
                "control mask 0x{bits:04X} overlaps the 12-bit sample field"
            )));
        }
        Ok(Self(bits))
    }

    pub fn bits(self) -> u16 {
        self.0
    }
}

impl Default for ControlMask {
    fn default() -> Self {
        Self::CHANNEL_A
    }
}

impl fmt::Display for ControlMask {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "0x{:04X}", self.0)
    }
}

impl<'de> Deserialize<'de> for ControlMask {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> std::result::Result<Self, D::Error> {
        let bits = u16::deserialize(deserializer)?;
        Self::new(bits).map_err(serde::de::Error::custom)
    }
}

/// Parameters for one conversion run
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ConverterConfig {
    /// Name of the emitted `const uint16_t` array
    pub variable_name: String,
    /// Control bits OR-ed into every sample
    pub control_mask: ControlMask,
}

impl Default for ConverterConfig {
    fn default() -> Self {
        Self {
            variable_name: DEFAULT_VARIABLE_NAME.to_string(),
            control_mask: ControlMask::default(),
        }
    }
}

impl ConverterConfig {
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the emitted array name
    pub fn with_variable_name(mut self, name: impl Into<String>) -> Self {
        self.variable_name = name.into();
        self
    }

    /// Set the control mask
    pub fn with_control_mask(mut self, mask: ControlMask) -> Self {
        self.control_mask = mask;
        self
    }

    /// Parse a configuration from TOML text; missing keys keep their defaults
    pub fn from_toml_str(text: &str) -> Result<Self> {
        let config: Self = toml::from_str(text)?;
        config.validate()?;
        Ok(config)
    }

    /// Load a configuration file
    pub fn from_toml_file(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let text = std::fs::read_to_string(path).map_err(|e| {
            if e.kind() == std::io::ErrorKind::NotFound {
                DacPackError::file_not_found(path)
            } else {
                DacPackError::io(path, e)
            }
        })?;
        Self::from_toml_str(&text)
    }

    /// Check that the configuration can produce a compilable header
    pub fn validate(&self) -> Result<()> {
        if !is_c_identifier(&self.variable_name) {
            return Err(DacPackError::invalid_config(format!(
                "'{}' is not a valid C identifier",
                self.variable_name
            )));
        }
        ControlMask::new(self.control_mask.bits())?;
        Ok(())
    }
}

fn is_c_identifier(name: &str) -> bool {
    let mut chars = name.chars();
    match chars.next() {
        Some(c) if c == '_' || c.is_ascii_alphabetic() => {}
        _ => return false,
    }
    chars.all(|c| c == '_' || c.is_ascii_alphanumeric())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = ConverterConfig::default();
        assert_eq!(config.variable_name, "dac_audio_stream");
        assert_eq!(config.control_mask.bits(), 0x3000);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_control_mask_rejects_magnitude_bits() {
        assert!(ControlMask::new(0xB000).is_ok());
        assert!(ControlMask::new(0x0000).is_ok());
        assert!(matches!(
            ControlMask::new(0x3001),
            Err(DacPackError::InvalidConfig { .. })
        ));
        assert_eq!(ControlMask::CHANNEL_B.to_string(), "0xB000");
    }

    #[test]
    fn test_variable_name_validation() {
        for name in ["dac_audio_stream", "_x", "Samples2"] {
            assert!(ConverterConfig::new().with_variable_name(name).validate().is_ok());
        }
        for name in ["", "2samples", "dac-audio", "a b"] {
            assert!(ConverterConfig::new().with_variable_name(name).validate().is_err());
        }
    }

    #[test]
    fn test_from_toml() {
        let config = ConverterConfig::from_toml_str(
            "variable_name = \"chime\"\ncontrol_mask = 0xB000\n",
        )
        .unwrap();
        assert_eq!(config.variable_name, "chime");
        assert_eq!(config.control_mask, ControlMask::CHANNEL_B);

        let partial = ConverterConfig::from_toml_str("variable_name = \"chime\"").unwrap();
        assert_eq!(partial.control_mask, ControlMask::CHANNEL_A);

        assert!(ConverterConfig::from_toml_str("control_mask = 0x3FFF").is_err());
        assert!(ConverterConfig::from_toml_str("gain = 2").is_err());
    }
}
