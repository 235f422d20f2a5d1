//! Configuration resolution: defaults < config file < command-line flags

use crate::args::ConvertArgs;
use anyhow::Result;
use dacpack_core::{ControlMask, ConverterConfig};
use std::path::{Path, PathBuf};
use tracing::debug;

/// Per-user config file location, if the platform has a config directory
pub fn default_config_path() -> Option<PathBuf> {
    dirs::config_dir().map(|dir| dir.join("dacpack").join("config.toml"))
}

/// Load the base configuration
///
/// An explicitly named file must exist; the per-user default is optional.
pub fn load_base_config(explicit: Option<&Path>) -> Result<ConverterConfig> {
    if let Some(path) = explicit {
        debug!("Loading config from {}", path.display());
        return Ok(ConverterConfig::from_toml_file(path)?);
    }

    match default_config_path() {
        Some(path) if path.is_file() => {
            debug!("Loading config from {}", path.display());
            Ok(ConverterConfig::from_toml_file(&path)?)
        }
        _ => Ok(ConverterConfig::default()),
    }
}

/// Apply command-line overrides on top of `base`
pub fn apply_overrides(base: ConverterConfig, args: &ConvertArgs) -> Result<ConverterConfig> {
    let mut config = base;
    if let Some(name) = &args.variable_name {
        config = config.with_variable_name(name.clone());
    }
    if let Some(bits) = args.control_mask {
        config = config.with_control_mask(ControlMask::new(bits)?);
    }
    if let Some(channel) = args.channel {
        config = config.with_control_mask(channel.mask());
    }
    config.validate()?;
    Ok(config)
}
