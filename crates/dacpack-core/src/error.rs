//! Error handling for the conversion pipeline
//!
//! Every stage returns [`Result`]; the first failure short-circuits the
//! remaining stages and no output file is produced.

use std::fmt;
use std::path::PathBuf;
use thiserror::Error;

/// Result type alias for conversion operations
pub type Result<T> = std::result::Result<T, DacPackError>;

/// Error type for every stage of the WAV to DAC table conversion
#[derive(Error, Debug)]
pub enum DacPackError {
    /// Input path does not resolve to a file
    #[error("Input file not found: {}", path.display())]
    FileNotFound { path: PathBuf },

    /// Container is valid but carries an encoding we do not convert
    #[error("Unsupported audio format: {details}")]
    UnsupportedFormat { details: String },

    /// Malformed or truncated container
    #[error("Decoding failed: {reason}")]
    Decode { reason: String },

    /// Reading the input or writing the output failed
    #[error("I/O operation failed on {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Invalid converter configuration
    #[error("Invalid configuration: {details}")]
    InvalidConfig { details: String },
}

impl DacPackError {
    /// Create a new file not found error
    pub fn file_not_found(path: impl Into<PathBuf>) -> Self {
        Self::FileNotFound { path: path.into() }
    }

    /// Create a new unsupported format error
    pub fn unsupported_format(details: impl Into<String>) -> Self {
        Self::UnsupportedFormat {
            details: details.into(),
        }
    }

    /// Create a new decode error
    pub fn decode(reason: impl Into<String>) -> Self {
        Self::Decode {
            reason: reason.into(),
        }
    }

    /// Create a new I/O error bound to the path it occurred on
    pub fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::Io {
            path: path.into(),
            source,
        }
    }

    /// Create a new invalid configuration error
    pub fn invalid_config(details: impl Into<String>) -> Self {
        Self::InvalidConfig {
            details: details.into(),
        }
    }

    /// Get the error category
    pub fn category(&self) -> ErrorCategory {
        match self {
            Self::FileNotFound { .. } => ErrorCategory::Input,
            Self::UnsupportedFormat { .. } | Self::Decode { .. } => ErrorCategory::Format,
            Self::Io { .. } => ErrorCategory::Output,
            Self::InvalidConfig { .. } => ErrorCategory::Configuration,
        }
    }

    /// One-line message naming the failure cause, suitable for a terminal
    pub fn user_message(&self) -> String {
        match self {
            Self::FileNotFound { path } => {
                format!("WAV file '{}' not found.", path.display())
            }
            Self::UnsupportedFormat { details } => {
                format!("Only 8-bit or 16-bit PCM WAV files are supported ({details}).")
            }
            Self::Decode { reason } => format!("Could not decode WAV file: {reason}"),
            Self::Io { path, source } => {
                format!("Could not write '{}': {source}", path.display())
            }
            Self::InvalidConfig { details } => format!("Invalid configuration: {details}"),
        }
    }
}

/// Error category for grouping related errors
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCategory {
    /// The input file could not be located
    Input,
    /// The input container is malformed or unsupported
    Format,
    /// The output could not be written
    Output,
    /// Parameter and config file errors
    Configuration,
}

impl fmt::Display for ErrorCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Input => write!(f, "Input"),
            Self::Format => write!(f, "Format"),
            Self::Output => write!(f, "Output"),
            Self::Configuration => write!(f, "Configuration"),
        }
    }
}

/// Map container-level failures reported by `hound`
impl From<hound::Error> for DacPackError {
    fn from(error: hound::Error) -> Self {
        match error {
            hound::Error::Unsupported => {
                Self::unsupported_format("container uses an unsupported encoding")
            }
            hound::Error::TooWide => Self::unsupported_format("sample container wider than 16 bits"),
            hound::Error::InvalidSampleFormat => {
                Self::unsupported_format("sample format does not match the declared width")
            }
            hound::Error::FormatError(reason) => Self::decode(reason),
            hound::Error::UnfinishedSample => Self::decode("data chunk ends inside a sample"),
            hound::Error::IoError(io) => Self::decode(io.to_string()),
        }
    }
}

/// Convert from TOML parsing errors
impl From<toml::de::Error> for DacPackError {
    fn from(error: toml::de::Error) -> Self {
        Self::invalid_config(error.message().to_string())
    }
}
