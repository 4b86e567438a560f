//! Glob-style ignore rules evaluated against repository-relative paths.
//!
//! The rule set is a flat list: every non-empty, non-comment line of the
//! repository's ignore file becomes one glob. There is no negation and no
//! precedence between rules; a path is ignored as soon as any rule matches it.

use anyhow::{Context, Result};
use glob::Pattern;
use std::fs;
use std::path::Path;
use tracing::{debug, info, warn};

/// Ordered, immutable set of ignore globs scoped to one repository
#[derive(Debug, Clone, Default)]
pub struct IgnoreRuleSet {
    /// Compiled globs in file order
    patterns: Vec<Pattern>,
}

impl IgnoreRuleSet {
    /// Create an empty rule set that ignores nothing
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a rule set from raw glob strings
    ///
    /// Every string becomes a rule. A `**` that is not a whole path component
    /// is read as `*`, and a string that is still not a valid glob (such as an
    /// unclosed `[`) matches itself literally.
    pub fn from_patterns<I, S>(patterns: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let patterns = patterns
            .into_iter()
            .filter_map(|raw| compile(raw.as_ref()))
            .collect();
        Self { patterns }
    }

    /// Parse ignore file content: one glob per line, blank lines and `#` comments dropped
    #[must_use]
    pub fn parse(content: &str) -> Self {
        Self::from_patterns(
            content
                .lines()
                .map(str::trim)
                .filter(|line| !line.is_empty() && !line.starts_with('#')),
        )
    }

    /// Load the rule set from `ignore_file` inside `repo_root`
    ///
    /// A repository without an ignore file gets an empty rule set.
    ///
    /// # Errors
    ///
    /// Returns an error if the ignore file exists but cannot be read
    pub fn load(repo_root: &Path, ignore_file: &str) -> Result<Self> {
        let path = repo_root.join(ignore_file);
        if !path.exists() {
            info!("No {ignore_file} found at {}, no patterns loaded", repo_root.display());
            return Ok(Self::new());
        }

        info!("Loading {ignore_file} from {}", path.display());
        let content = fs::read_to_string(&path)
            .with_context(|| format!("Failed to read ignore file: {}", path.display()))?;
        let rules = Self::parse(&content);
        debug!(
            count = rules.len(),
            patterns = ?rules.patterns().collect::<Vec<_>>(),
            "Ignore patterns loaded"
        );
        Ok(rules)
    }

    /// True if `path` matches any rule
    #[must_use]
    pub fn matches(&self, path: &str) -> bool {
        matches(path, &self.patterns)
    }

    /// True if a directory's relative path matches any rule
    ///
    /// The path is tried bare and with a trailing `/`, so `build/` style rules
    /// catch the directory `build`.
    #[must_use]
    pub fn matches_dir(&self, rel_dir: &str) -> bool {
        if self.matches(rel_dir) {
            return true;
        }
        if rel_dir.ends_with('/') {
            return false;
        }
        self.matches(&format!("{rel_dir}/"))
    }

    /// Number of rules
    #[must_use]
    pub fn len(&self) -> usize {
        self.patterns.len()
    }

    /// True if there are no rules
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.patterns.is_empty()
    }

    /// Rules as their source strings
    pub fn patterns(&self) -> impl Iterator<Item = &str> {
        self.patterns.iter().map(Pattern::as_str)
    }
}

/// True if `path` matches any of `patterns`, stopping at the first match
///
/// Default glob options apply: `*` and `?` also match `/`, and matching is
/// case sensitive.
#[must_use]
pub fn matches(path: &str, patterns: &[Pattern]) -> bool {
    patterns.iter().any(|pattern| pattern.matches(path))
}

/// Compile one rule, falling back to a literal match for malformed globs
fn compile(raw: &str) -> Option<Pattern> {
    let normalized = collapse_inline_recursive(raw);
    match Pattern::new(&normalized) {
        Ok(pattern) => Some(pattern),
        Err(e) => {
            debug!(pattern = raw, error = %e, "Treating ignore pattern as literal");
            match Pattern::new(&Pattern::escape(raw)) {
                Ok(pattern) => Some(pattern),
                Err(e) => {
                    warn!(pattern = raw, error = %e, "Skipping invalid ignore pattern");
                    None
                }
            }
        }
    }
}

/// Rewrite runs of `*` to a single `*` unless the run is exactly `**` filling
/// a whole path component
fn collapse_inline_recursive(raw: &str) -> String {
    let chars: Vec<char> = raw.chars().collect();
    let mut out = String::with_capacity(raw.len());
    let mut i = 0;

    while i < chars.len() {
        if chars[i] != '*' {
            out.push(chars[i]);
            i += 1;
            continue;
        }

        let start = i;
        while i < chars.len() && chars[i] == '*' {
            i += 1;
        }
        let whole_component = i - start == 2
            && (start == 0 || chars[start - 1] == '/')
            && (i == chars.len() || chars[i] == '/');
        out.push_str(if whole_component { "**" } else { "*" });
    }

    out
}
