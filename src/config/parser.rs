use super::Config;
use anyhow::{Context, Result};
use std::path::Path;

/// Read and validate a configuration file
///
/// # Errors
///
/// Returns an error if the file cannot be read, is not valid TOML, or holds
/// values that would make scanning meaningless.
pub fn parse_config_file(path: &Path) -> Result<Config> {
    let content = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read config file: {}", path.display()))?;
    parse_config_str(&content)
}

/// Parse configuration from a TOML string
///
/// # Errors
///
/// Returns an error if the TOML is invalid or fails validation.
pub fn parse_config_str(content: &str) -> Result<Config> {
    let config: Config = toml::from_str(content).with_context(|| "Failed to parse TOML config")?;

    // Validate and return validation errors directly without wrapping
    validate_config(&config)?;
    Ok(config)
}

fn validate_config(config: &Config) -> Result<()> {
    if config.scan.extensions.is_empty() {
        anyhow::bail!("scan.extensions must list at least one extension");
    }

    if let Some(ext) = config.scan.extensions.iter().find(|e| e.contains('/')) {
        anyhow::bail!("Invalid extension '{ext}': extensions cannot contain path separators");
    }

    if config.scan.vcs_dir.is_empty() {
        anyhow::bail!("scan.vcs_dir cannot be empty");
    }

    Ok(())
}
