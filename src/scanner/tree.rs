//! Depth-first repository walker.
//!
//! Directories are pruned before descent, so an ignored subtree (build
//! output, dependency caches) is never read.

use super::patterns::IgnoreRuleSet;
use std::collections::HashSet;
use std::path::{Path, PathBuf};
use tracing::{Level, debug, span, warn};
use walkdir::{DirEntry, WalkDir};

/// One eligible file found by a scan
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ScanRecord {
    /// Repository root the file was found under
    pub repo_root: PathBuf,
    /// Absolute path of the file
    pub file_path: PathBuf,
    /// Base name of the file
    pub file_name: String,
    /// Directory levels between the repository root and the file
    pub depth: usize,
}

/// Result of scanning one repository
#[derive(Debug, Default)]
pub struct RepoScan {
    /// Eligible files, in traversal order
    pub records: Vec<ScanRecord>,
    /// Entries the walker could not read; logged and skipped
    pub unreadable: Vec<PathBuf>,
}

/// Walker configured with the tracked extensions and built-in directory ignores
#[derive(Debug, Clone)]
pub struct TreeScanner {
    /// Extensions (without the dot) of files to report
    extensions: HashSet<String>,
    /// Directory names pruned wherever they appear
    builtin_ignores: HashSet<String>,
    /// Whether to follow symbolic links
    follow_symlinks: bool,
}

impl TreeScanner {
    /// Create a scanner
    ///
    /// # Arguments
    ///
    /// * `extensions` - File extensions to report, without the leading dot
    /// * `builtin_ignores` - Directory names pruned regardless of ignore rules
    /// * `follow_symlinks` - Whether to follow symbolic links
    #[must_use]
    pub fn new(extensions: &[String], builtin_ignores: &[String], follow_symlinks: bool) -> Self {
        Self {
            extensions: extensions.iter().cloned().collect(),
            builtin_ignores: builtin_ignores.iter().cloned().collect(),
            follow_symlinks,
        }
    }

    /// Create a scanner from the `[scan]` configuration section
    #[must_use]
    pub fn from_config(config: &crate::config::ScanConfig) -> Self {
        Self::new(
            &config.extensions,
            &config.builtin_ignores,
            config.follow_symlinks,
        )
    }

    /// Walk `repo_root` and collect every eligible file
    ///
    /// Unreadable entries are logged and reported in [`RepoScan::unreadable`];
    /// they never abort the walk.
    #[must_use]
    pub fn scan(&self, repo_root: &Path, rules: &IgnoreRuleSet) -> RepoScan {
        let span = span!(Level::INFO, "scan", root = %repo_root.display());
        let _guard = span.enter();

        let mut result = RepoScan::default();

        let walker = WalkDir::new(repo_root)
            .follow_links(self.follow_symlinks)
            .into_iter()
            .filter_entry(|e| !self.should_prune(e, repo_root, rules));

        for entry in walker {
            let entry = match entry {
                Ok(entry) => entry,
                Err(e) => {
                    let path = e.path().map_or_else(|| repo_root.to_path_buf(), Path::to_path_buf);
                    warn!(path = %path.display(), error = %e, "Cannot read directory entry");
                    result.unreadable.push(path);
                    continue;
                }
            };

            if !entry.file_type().is_file() {
                continue;
            }

            if let Some(record) = self.record_for(&entry, repo_root, rules) {
                debug!("Found file {}", record.file_path.display());
                result.records.push(record);
            }
        }

        result
    }

    /// Decide whether a directory entry and everything below it is skipped
    fn should_prune(&self, entry: &DirEntry, repo_root: &Path, rules: &IgnoreRuleSet) -> bool {
        if entry.depth() == 0 || !entry.file_type().is_dir() {
            return false;
        }

        let Ok(rel_dir) = entry.path().strip_prefix(repo_root) else {
            return false;
        };

        if rel_dir
            .components()
            .any(|c| c.as_os_str().to_str().is_some_and(|c| self.builtin_ignores.contains(c)))
        {
            debug!("Skipping built-in ignored directory: {}", rel_dir.display());
            return true;
        }

        if rules.matches_dir(&rel_dir.to_string_lossy()) {
            debug!("Skipping directory {} due to ignore rules", rel_dir.display());
            return true;
        }

        false
    }

    /// Build the record for a regular file, or `None` if it is not eligible
    fn record_for(
        &self,
        entry: &DirEntry,
        repo_root: &Path,
        rules: &IgnoreRuleSet,
    ) -> Option<ScanRecord> {
        let path = entry.path();
        let extension = path.extension()?.to_str()?;
        if !self.extensions.contains(extension) {
            return None;
        }

        let rel_file = path.strip_prefix(repo_root).ok()?;
        if rules.matches(&rel_file.to_string_lossy()) {
            debug!("Skipping file {} due to ignore rules", rel_file.display());
            return None;
        }

        Some(ScanRecord {
            repo_root: repo_root.to_path_buf(),
            file_path: path.to_path_buf(),
            file_name: entry.file_name().to_string_lossy().into_owned(),
            depth: depth_of(rel_file),
        })
    }
}

/// Directory levels above a repository-relative file path (0 for a top-level file)
#[must_use]
pub fn depth_of(rel_file: &Path) -> usize {
    rel_file.components().count().saturating_sub(1)
}

#[cfg(test)]
mod tests {
    use super::*;
    use anyhow::Result;
    use rstest::rstest;
    use std::fs;
    use tempfile::TempDir;

    fn scanner() -> TreeScanner {
        let config = crate::config::ScanConfig::default();
        TreeScanner::from_config(&config)
    }

    fn touch(root: &Path, rel: &str) -> Result<()> {
        let path = root.join(rel);
        fs::create_dir_all(path.parent().unwrap())?;
        fs::write(path, rel)?;
        Ok(())
    }

    fn names(scan: &RepoScan) -> Vec<String> {
        let mut names: Vec<String> = scan
            .records
            .iter()
            .map(|r| r.file_name.clone())
            .collect();
        names.sort();
        names
    }

    #[rstest]
    #[case("z.js", 0)]
    #[case("x/z.js", 1)]
    #[case("x/y/z.js", 2)]
    #[case("a/b/c/d/e/f.css", 5)]
    fn test_depth_of(#[case] rel: &str, #[case] expected: usize) {
        assert_eq!(depth_of(Path::new(rel)), expected);
    }

    #[test]
    fn test_only_tracked_extensions() -> Result<()> {
        let temp = TempDir::new()?;
        touch(temp.path(), "a.js")?;
        touch(temp.path(), "b.css")?;
        touch(temp.path(), "c.ts")?;
        touch(temp.path(), "README.md")?;
        touch(temp.path(), "noext")?;

        let scan = scanner().scan(temp.path(), &IgnoreRuleSet::new());
        assert_eq!(names(&scan), vec!["a.js", "b.css"]);
        Ok(())
    }

    #[test]
    fn test_records_carry_depth_and_root() -> Result<()> {
        let temp = TempDir::new()?;
        touch(temp.path(), "x/y/z.js")?;
        touch(temp.path(), "top.js")?;

        let scan = scanner().scan(temp.path(), &IgnoreRuleSet::new());
        let deep = scan.records.iter().find(|r| r.file_name == "z.js").unwrap();
        let top = scan.records.iter().find(|r| r.file_name == "top.js").unwrap();

        assert_eq!(deep.depth, 2);
        assert_eq!(top.depth, 0);
        assert_eq!(deep.repo_root, temp.path());
        assert_eq!(deep.file_path, temp.path().join("x/y/z.js"));
        Ok(())
    }

    #[test]
    fn test_builtin_ignores_prune_subtrees() -> Result<()> {
        let temp = TempDir::new()?;
        touch(temp.path(), "node_modules/pkg/index.js")?;
        touch(temp.path(), "src/archive/old.js")?;
        touch(temp.path(), ".next/static/chunk.js")?;
        touch(temp.path(), "src/keep.js")?;

        let scan = scanner().scan(temp.path(), &IgnoreRuleSet::new());
        assert_eq!(names(&scan), vec!["keep.js"]);
        Ok(())
    }

    #[test]
    fn test_ignore_rules_prune_directories_and_files() -> Result<()> {
        let temp = TempDir::new()?;
        touch(temp.path(), "build/out.js")?;
        touch(temp.path(), "src/app.js")?;
        touch(temp.path(), "src/app.min.js")?;

        let rules = IgnoreRuleSet::parse("build/\n*.min.js\n");
        let scan = scanner().scan(temp.path(), &rules);
        assert_eq!(names(&scan), vec!["app.js"]);
        Ok(())
    }

    #[test]
    fn test_file_named_like_builtin_ignore_is_kept() -> Result<()> {
        let temp = TempDir::new()?;
        // Only directories are matched against the built-in names
        fs::write(temp.path().join("archive.js"), "x")?;

        let scan = scanner().scan(temp.path(), &IgnoreRuleSet::new());
        assert_eq!(names(&scan), vec!["archive.js"]);
        Ok(())
    }

    #[cfg(unix)]
    #[test]
    fn test_pruned_directory_is_never_read() -> Result<()> {
        use std::os::unix::fs::PermissionsExt;

        let temp = TempDir::new()?;
        touch(temp.path(), "src/a.js")?;
        let probe = temp.path().join("node_modules/probe");
        fs::create_dir_all(&probe)?;
        fs::write(probe.join("hidden.js"), "x")?;
        fs::set_permissions(temp.path().join("node_modules"), fs::Permissions::from_mode(0o000))?;

        let scan = scanner().scan(temp.path(), &IgnoreRuleSet::new());

        fs::set_permissions(temp.path().join("node_modules"), fs::Permissions::from_mode(0o755))?;
        assert!(scan.unreadable.is_empty());
        assert_eq!(names(&scan), vec!["a.js"]);
        Ok(())
    }

    #[cfg(unix)]
    #[test]
    fn test_unreadable_directory_is_reported_not_fatal() -> Result<()> {
        use std::os::unix::fs::PermissionsExt;

        let temp = TempDir::new()?;
        touch(temp.path(), "ok/a.js")?;
        touch(temp.path(), "locked/b.js")?;
        let locked = temp.path().join("locked");
        fs::set_permissions(&locked, fs::Permissions::from_mode(0o000))?;

        // Privileged users read through mode 000; nothing to observe then
        let readable = fs::read_dir(&locked).is_ok();
        let scan = scanner().scan(temp.path(), &IgnoreRuleSet::new());
        fs::set_permissions(&locked, fs::Permissions::from_mode(0o755))?;

        assert!(names(&scan).contains(&"a.js".to_string()));
        if !readable {
            assert_eq!(scan.unreadable, vec![locked]);
            assert_eq!(names(&scan), vec!["a.js"]);
        }
        Ok(())
    }
}
