//! Command-line argument definitions

use clap::{Args, Parser, Subcommand, ValueEnum};
use dacpack_core::ControlMask;
use std::path::PathBuf;

/// Bake PCM WAV audio into a DAC-ready C sample table
#[derive(Parser, Debug)]
#[command(name = "dacpack", author, version, about, long_about = None)]
pub struct Cli {
    /// Increase log verbosity (-v debug, -vv trace)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Only log warnings and errors
    #[arg(short, long, global = true, conflicts_with = "verbose")]
    pub quiet: bool,

    /// TOML config file (defaults to <config dir>/dacpack/config.toml when present)
    #[arg(long, global = true, value_name = "PATH")]
    pub config: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Convert a WAV file into a C header
    Convert(ConvertArgs),
    /// Print the stream parameters of a WAV file
    Info(InfoArgs),
}

#[derive(Args, Debug)]
pub struct ConvertArgs {
    /// Input WAV file (8-bit or 16-bit PCM, mono or stereo)
    pub input: PathBuf,

    /// Header file to write
    #[arg(short, long, default_value = "audio_data.h")]
    pub output: PathBuf,

    /// Name of the emitted const uint16_t array
    #[arg(long, value_name = "NAME")]
    pub variable_name: Option<String>,

    /// Raw control bits, e.g. 0x3000, 0b0011000000000000 or 12288
    #[arg(long, value_name = "MASK", value_parser = parse_mask, conflicts_with = "channel")]
    pub control_mask: Option<u16>,

    /// Target DAC channel preset
    #[arg(long, value_enum)]
    pub channel: Option<DacChannel>,
}

#[derive(Args, Debug)]
pub struct InfoArgs {
    /// Input WAV file
    pub input: PathBuf,
}

/// MCP4922 output channel presets
#[derive(ValueEnum, Clone, Copy, Debug, PartialEq, Eq)]
pub enum DacChannel {
    /// Channel A, 1x gain, active (0x3000)
    A,
    /// Channel B, 1x gain, active (0xB000)
    B,
}

impl DacChannel {
    pub fn mask(self) -> ControlMask {
        match self {
            Self::A => ControlMask::CHANNEL_A,
            Self::B => ControlMask::CHANNEL_B,
        }
    }
}

/// Parse a 16-bit mask in hex, binary or decimal notation
pub fn parse_mask(raw: &str) -> Result<u16, String> {
    let raw = raw.trim().replace('_', "");
    let parsed = if let Some(hex) = raw.strip_prefix("0x").or_else(|| raw.strip_prefix("0X")) {
        u16::from_str_radix(hex, 16)
    } else if let Some(bin) = raw.strip_prefix("0b").or_else(|| raw.strip_prefix("0B")) {
        u16::from_str_radix(bin, 2)
    } else {
        raw.parse::<u16>()
    };
    let bits = parsed.map_err(|e| format!("'{raw}' is not a 16-bit mask: {e}"))?;
    ControlMask::new(bits).map_err(|e| e.to_string())?;
    Ok(bits)
}
