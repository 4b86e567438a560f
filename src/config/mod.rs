pub mod parser;
pub mod validator;

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::io::Write;
use std::path::{Path, PathBuf};

#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct Config {
    #[serde(default)]
    pub core: CoreConfig,

    /// Tree scanning rules
    #[serde(default)]
    pub scan: ScanConfig,

    /// Document layout
    #[serde(default)]
    pub document: DocumentConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CoreConfig {
    #[serde(default = "default_store_path")]
    pub store_path: PathBuf,
    #[serde(default = "default_output_path")]
    pub output_path: PathBuf,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ScanConfig {
    /// File extensions (without the dot) that are inventoried
    #[serde(default = "default_extensions")]
    pub extensions: Vec<String>,
    /// Directory names pruned in every repository, ignore file or not
    #[serde(default = "default_builtin_ignores")]
    pub builtin_ignores: Vec<String>,
    #[serde(default = "default_ignore_file")]
    pub ignore_file: String,
    /// Directory whose presence marks a repository as version-controlled
    #[serde(default = "default_vcs_dir")]
    pub vcs_dir: String,
    #[serde(default)]
    pub follow_symlinks: bool,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DocumentConfig {
    /// Files deeper than this get no folder header of their own
    #[serde(default = "default_header_max_depth")]
    pub header_max_depth: usize,
}

impl Default for CoreConfig {
    fn default() -> Self {
        Self {
            store_path: default_store_path(),
            output_path: default_output_path(),
        }
    }
}

impl Default for ScanConfig {
    fn default() -> Self {
        Self {
            extensions: default_extensions(),
            builtin_ignores: default_builtin_ignores(),
            ignore_file: default_ignore_file(),
            vcs_dir: default_vcs_dir(),
            follow_symlinks: false,
        }
    }
}

impl Default for DocumentConfig {
    fn default() -> Self {
        Self {
            header_max_depth: default_header_max_depth(),
        }
    }
}

impl Config {
    /// Load configuration from a file
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - Cannot create parent directories
    /// - Cannot read or parse the configuration file
    /// - Configuration file contains invalid TOML
    pub fn load(path: &Path) -> Result<Self> {
        if !path.exists() {
            // Create default config if it doesn't exist
            let config = Self::default();
            config.save(path)?;
            return Ok(config);
        }

        parser::parse_config_file(path)
    }

    /// Save configuration to a file
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - Cannot create parent directories
    /// - Cannot write to the file
    /// - TOML serialization fails
    pub fn save(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }

        let toml_str = toml::to_string_pretty(self)?;
        let mut file = std::fs::File::create(path)
            .with_context(|| format!("Failed to create config file: {}", path.display()))?;
        file.write_all(toml_str.as_bytes())?;
        Ok(())
    }

    /// Get a configuration value by key
    #[must_use]
    pub fn get(&self, key: &str) -> Option<String> {
        let parts: Vec<&str> = key.split('.').collect();
        if parts.len() != 2 {
            return None;
        }

        match (parts[0], parts[1]) {
            ("core", "store_path") => Some(self.core.store_path.display().to_string()),
            ("core", "output_path") => Some(self.core.output_path.display().to_string()),
            ("scan", "extensions") => Some(self.scan.extensions.join(",")),
            ("scan", "builtin_ignores") => Some(self.scan.builtin_ignores.join(",")),
            ("scan", "ignore_file") => Some(self.scan.ignore_file.clone()),
            ("scan", "vcs_dir") => Some(self.scan.vcs_dir.clone()),
            ("scan", "follow_symlinks") => Some(self.scan.follow_symlinks.to_string()),
            ("document", "header_max_depth") => Some(self.document.header_max_depth.to_string()),
            _ => None,
        }
    }

    /// Set a configuration value by key
    ///
    /// List values are given comma separated.
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - The key format is invalid (must be section.key)
    /// - The key is unknown
    /// - The value is invalid for the key
    pub fn set(&mut self, key: &str, value: String) -> Result<()> {
        let parts: Vec<&str> = key.split('.').collect();
        if parts.len() != 2 {
            return Err(anyhow::anyhow!("Invalid configuration key: {key}"));
        }

        match (parts[0], parts[1]) {
            ("core", "store_path") => self.core.store_path = PathBuf::from(value),
            ("core", "output_path") => self.core.output_path = PathBuf::from(value),
            ("scan", "extensions") => {
                let extensions = split_list(&value)
                    .into_iter()
                    .map(|ext| ext.trim_start_matches('.').to_string())
                    .collect::<Vec<_>>();
                if extensions.is_empty() {
                    return Err(anyhow::anyhow!("At least one extension is required"));
                }
                self.scan.extensions = extensions;
            }
            ("scan", "builtin_ignores") => self.scan.builtin_ignores = split_list(&value),
            ("scan", "ignore_file") => self.scan.ignore_file = value,
            ("scan", "vcs_dir") => self.scan.vcs_dir = value,
            ("scan", "follow_symlinks") => {
                self.scan.follow_symlinks = value
                    .parse()
                    .with_context(|| format!("Invalid boolean: {value}"))?;
            }
            ("document", "header_max_depth") => {
                self.document.header_max_depth = value
                    .parse()
                    .with_context(|| format!("Invalid number: {value}"))?;
            }
            _ => return Err(anyhow::anyhow!("Unknown configuration key: {key}")),
        }
        Ok(())
    }

    /// Reset a configuration value to its default
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - The key format is invalid (must be section.key)
    /// - The key is unknown
    pub fn unset(&mut self, key: &str) -> Result<()> {
        let parts: Vec<&str> = key.split('.').collect();
        if parts.len() != 2 {
            return Err(anyhow::anyhow!("Invalid configuration key: {key}"));
        }

        match (parts[0], parts[1]) {
            ("core", "store_path") => self.core.store_path = default_store_path(),
            ("core", "output_path") => self.core.output_path = default_output_path(),
            ("scan", "extensions") => self.scan.extensions = default_extensions(),
            ("scan", "builtin_ignores") => self.scan.builtin_ignores = default_builtin_ignores(),
            ("scan", "ignore_file") => self.scan.ignore_file = default_ignore_file(),
            ("scan", "vcs_dir") => self.scan.vcs_dir = default_vcs_dir(),
            ("scan", "follow_symlinks") => self.scan.follow_symlinks = false,
            ("document", "header_max_depth") => {
                self.document.header_max_depth = default_header_max_depth();
            }
            _ => return Err(anyhow::anyhow!("Unknown configuration key: {key}")),
        }
        Ok(())
    }

    /// All keys accepted by [`Config::get`] and [`Config::set`], in display order
    #[must_use]
    pub const fn keys() -> &'static [&'static str] {
        &[
            "core.store_path",
            "core.output_path",
            "scan.extensions",
            "scan.builtin_ignores",
            "scan.ignore_file",
            "scan.vcs_dir",
            "scan.follow_symlinks",
            "document.header_max_depth",
        ]
    }
}

fn split_list(value: &str) -> Vec<String> {
    value
        .split(',')
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(str::to_string)
        .collect()
}

// Default functions for serde
fn default_store_path() -> PathBuf {
    PathBuf::from("codedoc.toml")
}

fn default_output_path() -> PathBuf {
    PathBuf::from("~/Desktop/AppReactDocument.txt")
}

fn default_extensions() -> Vec<String> {
    vec!["js".to_string(), "css".to_string()]
}

fn default_builtin_ignores() -> Vec<String> {
    vec![
        ".next".to_string(),
        "node_modules".to_string(),
        "archive".to_string(),
    ]
}

fn default_ignore_file() -> String {
    ".gitignore".to_string()
}

fn default_vcs_dir() -> String {
    ".git".to_string()
}

const fn default_header_max_depth() -> usize {
    4
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_defaults_match_tracked_layout() {
        let config = Config::default();
        assert_eq!(config.scan.extensions, vec!["js", "css"]);
        assert_eq!(
            config.scan.builtin_ignores,
            vec![".next", "node_modules", "archive"]
        );
        assert_eq!(config.document.header_max_depth, 4);
        assert_eq!(config.scan.vcs_dir, ".git");
    }

    #[test]
    fn test_load_creates_default_file() -> Result<()> {
        let temp = TempDir::new()?;
        let path = temp.path().join("nested/config");

        let config = Config::load(&path)?;
        assert!(path.exists());
        assert_eq!(config.core.store_path, PathBuf::from("codedoc.toml"));

        Ok(())
    }

    #[test]
    fn test_partial_file_fills_defaults() -> Result<()> {
        let temp = TempDir::new()?;
        let path = temp.path().join("config");
        std::fs::write(&path, "[scan]\nextensions = [\"ts\"]\n")?;

        let config = Config::load(&path)?;
        assert_eq!(config.scan.extensions, vec!["ts"]);
        assert_eq!(config.scan.ignore_file, ".gitignore");
        assert_eq!(config.document.header_max_depth, 4);

        Ok(())
    }

    #[test]
    fn test_set_get_roundtrip() -> Result<()> {
        let mut config = Config::default();
        config.set("scan.extensions", ".ts, tsx".to_string())?;
        assert_eq!(config.get("scan.extensions").as_deref(), Some("ts,tsx"));

        config.set("document.header_max_depth", "2".to_string())?;
        assert_eq!(config.document.header_max_depth, 2);

        config.unset("document.header_max_depth")?;
        assert_eq!(config.document.header_max_depth, 4);

        Ok(())
    }

    #[test]
    fn test_set_rejects_bad_values() {
        let mut config = Config::default();
        assert!(config.set("scan.follow_symlinks", "maybe".to_string()).is_err());
        assert!(config.set("scan.extensions", " , ".to_string()).is_err());
        assert!(config.set("nope", "1".to_string()).is_err());
        assert!(config.set("core.unknown", "1".to_string()).is_err());
    }

    #[test]
    fn test_every_listed_key_is_gettable() {
        let config = Config::default();
        for key in Config::keys() {
            assert!(config.get(key).is_some(), "{key} should resolve");
        }
    }
}
