use std::path::{Path, PathBuf};

/// Pick the longest repository root that is a path prefix of `file_path`
///
/// Prefixes are compared by whole components, so `/a/bc` is not under `/a/b`.
/// The longest root wins regardless of the order of `roots`, which makes
/// nested repositories resolve to the innermost one.
#[must_use]
pub fn best_root<'a>(file_path: &Path, roots: &'a [PathBuf]) -> Option<&'a Path> {
    roots
        .iter()
        .filter(|root| file_path.starts_with(root))
        .max_by_key(|root| root.as_os_str().len())
        .map(PathBuf::as_path)
}

/// Folder label for a file, written as seen from one level above its repository
///
/// A file under `/work/app` at `/work/app/src/ui/button.js` is labelled
/// `../app/src/ui`. A file under no root is labelled with the absolute path
/// of its parent directory; this never fails.
#[must_use]
pub fn resolve_label(file_path: &Path, roots: &[PathBuf]) -> String {
    let parent_dir = file_path.parent().unwrap_or(file_path);

    let Some(root) = best_root(file_path, roots) else {
        return parent_dir.display().to_string();
    };

    let above_root = root.parent().unwrap_or(root);
    match parent_dir.strip_prefix(above_root) {
        Ok(rel) => format!("../{}", rel.display()),
        Err(_) => parent_dir.display().to_string(),
    }
}
