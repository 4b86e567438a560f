use super::Config;
use anyhow::Result;
use colored::Colorize;
use std::collections::HashSet;
use std::path::Path;

/// Warns about configuration keys that codedoc does not read
pub struct ConfigValidator {
    /// Set of valid configuration fields that are recognized by codedoc
    known_fields: HashSet<String>,
}

impl ConfigValidator {
    /// Create a new validator with known configuration fields
    #[must_use]
    pub fn new() -> Self {
        let known_fields = Config::keys().iter().map(ToString::to_string).collect();
        Self { known_fields }
    }

    /// Validate a configuration file and print a warning for each unknown field
    ///
    /// # Errors
    ///
    /// Returns an error if the config file cannot be read or parsed
    pub fn validate_config_file(&self, config_path: &Path) -> Result<()> {
        if !config_path.exists() {
            return Ok(());
        }

        let content = std::fs::read_to_string(config_path)?;
        let parsed: toml::Value = toml::from_str(&content)?;

        let unknown = self.unknown_fields(&parsed);
        if !unknown.is_empty() {
            eprintln!("{}", "Configuration warnings:".yellow().bold());
            for field in unknown {
                eprintln!("  Unknown configuration field: {}", field.yellow());
            }
            eprintln!();
        }

        Ok(())
    }

    /// Collect dotted paths of leaf fields that are not recognized
    #[must_use]
    pub fn unknown_fields(&self, parsed: &toml::Value) -> Vec<String> {
        let mut unknown = Vec::new();
        self.check_table(parsed, "", &mut unknown);
        unknown
    }

    /// Recursively checks a TOML table for unknown fields
    fn check_table(&self, table: &toml::Value, prefix: &str, unknown: &mut Vec<String>) {
        if let toml::Value::Table(map) = table {
            for (key, value) in map {
                let full_key = if prefix.is_empty() {
                    key.clone()
                } else {
                    format!("{prefix}.{key}")
                };

                if self.known_fields.contains(&full_key) {
                    continue;
                }

                if let toml::Value::Table(_) = value {
                    self.check_table(value, &full_key, unknown);
                } else {
                    unknown.push(full_key);
                }
            }
        }
    }
}

impl Default for ConfigValidator {
    fn default() -> Self {
        Self::new()
    }
}
