//! Loading the fee desk configuration from a YAML file.
//!
//! ```yaml
//! currency_symbol: "₹"
//! min_amount: 0.01
//! max_amount: 10000000.0
//! max_note_length: 256
//! receipt_prefix: "RCP"
//! ```
//!
//! Missing keys fall back to `FeeDeskConfig::default()`.

use anyhow::{Context, Result};
use log::{debug, info};
use shared::FeeDeskConfig;
use std::fs;
use std::path::{Path, PathBuf};

pub const CONFIG_ENV_VAR: &str = "FEE_DESK_CONFIG";
pub const DEFAULT_CONFIG_FILE: &str = "fee_desk.yaml";

pub fn load_config(path: &Path) -> Result<FeeDeskConfig> {
    let yaml_content = fs::read_to_string(path)
        .with_context(|| format!("Failed to read config file {:?}", path))?;
    let config: FeeDeskConfig = serde_yaml::from_str(&yaml_content)
        .with_context(|| format!("Failed to parse config file {:?}", path))?;
    debug!("Loaded fee desk config from {:?}", path);
    Ok(config)
}

/// Config from `$FEE_DESK_CONFIG`, else `./fee_desk.yaml` if present, else defaults.
/// A path named by the environment variable must exist.
pub fn resolve_config(env_path: Option<PathBuf>) -> Result<FeeDeskConfig> {
    if let Some(path) = env_path {
        return load_config(&path);
    }

    let default_path = PathBuf::from(DEFAULT_CONFIG_FILE);
    if default_path.exists() {
        load_config(&default_path)
    } else {
        info!("No {} found, using default configuration", DEFAULT_CONFIG_FILE);
        Ok(FeeDeskConfig::default())
    }
}
