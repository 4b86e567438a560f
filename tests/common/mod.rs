#![allow(dead_code)]

use anyhow::Result;
use codedoc::CodedocContext;
use codedoc::store::{RepositoryConfig, Store};
use std::fs;
use std::path::{Path, PathBuf};
use tempfile::TempDir;

/// Scratch workspace holding repositories, a store, a config and an output path
pub struct TestWorkspace {
    pub temp_dir: TempDir,
    pub root: PathBuf,
    pub ctx: CodedocContext,
}

impl TestWorkspace {
    /// Create a workspace with an isolated config and no store yet
    pub fn new() -> Result<Self> {
        let temp_dir = TempDir::new()?;
        let root = temp_dir.path().canonicalize()?;
        let store_path = root.join("codedoc.toml");
        let config_path = root.join(".config/codedoc/config");

        let ctx = CodedocContext::new_explicit(store_path, config_path)?
            .with_output_path(root.join("out/AppReactDocument.txt"));

        Ok(Self {
            temp_dir,
            root,
            ctx,
        })
    }

    /// Create a version-controlled repository directory
    pub fn repo(&self, name: &str) -> Result<PathBuf> {
        let path = self.root.join(name);
        fs::create_dir_all(path.join(".git"))?;
        Ok(path)
    }

    /// Create a plain directory without version control
    pub fn plain_dir(&self, name: &str) -> Result<PathBuf> {
        let path = self.root.join(name);
        fs::create_dir_all(&path)?;
        Ok(path)
    }

    /// Write a file relative to `dir`, creating parents
    pub fn write(&self, dir: &Path, rel: &str, content: &str) -> Result<PathBuf> {
        let path = dir.join(rel);
        fs::create_dir_all(path.parent().unwrap())?;
        fs::write(&path, content)?;
        Ok(path)
    }

    /// Write a store registering the given folders
    pub fn init_store<P: AsRef<Path>>(&self, folders: &[(P, bool)]) -> Result<()> {
        let repositories = folders
            .iter()
            .map(|(folder, want_scan)| RepositoryConfig {
                folder: folder.as_ref().to_path_buf(),
                want_scan: *want_scan,
            })
            .collect();
        Store::create(&self.ctx.store_path, repositories, true)?;
        Ok(())
    }

    /// Set the `WantDoc` flag of a stored entry
    pub fn set_included(&self, path: &Path, included: bool) -> Result<()> {
        let mut store = Store::open(&self.ctx.store_path)?;
        let mut table = store.selections()?;
        let key = path.to_string_lossy();
        table
            .get_mut(&key)
            .ok_or_else(|| anyhow::anyhow!("{key} is not in the selection table"))?
            .included = included;
        store.replace_selections(table);
        store.save()
    }

    /// Set `WantScan` for a registered folder, keeping the selection table
    pub fn set_want_scan(&self, folder: &Path, want_scan: bool) -> Result<()> {
        let store = Store::open(&self.ctx.store_path)?;
        let mut repositories = store.repositories()?.to_vec();
        let selections = store.selections_or_default();
        drop(store);

        for repo in &mut repositories {
            if repo.folder == folder {
                repo.want_scan = want_scan;
            }
        }
        let mut store = Store::create(&self.ctx.store_path, repositories, true)?;
        store.replace_selections(selections);
        store.save()
    }

    /// Stored paths with their flags, in stored order
    pub fn stored(&self) -> Result<Vec<(String, bool)>> {
        let store = Store::open(&self.ctx.store_path)?;
        Ok(store
            .selections()?
            .into_rows()
            .into_iter()
            .map(|e| (e.path, e.included))
            .collect())
    }

    /// Raw store file content
    pub fn store_text(&self) -> Result<String> {
        Ok(fs::read_to_string(&self.ctx.store_path)?)
    }

    /// Read the generated document
    pub fn document(&self) -> Result<String> {
        Ok(fs::read_to_string(&self.ctx.output_path)?)
    }
}

/// Stored key for a path
pub fn key(path: &Path) -> String {
    path.to_string_lossy().into_owned()
}
