use crate::store::SelectionEntry;
use std::fs;
use std::io::{self, Write};
use std::path::Path;
use tracing::{debug, error};

/// Line written before every file body.
pub const FILE_MARKER: &str = "——>>> users code <<<——";

/// Blank lines written after every entry.
pub const ENTRY_SEPARATOR: &str = "\n\n\n\n\n";

/// Folder header line for a label
#[must_use]
pub fn folder_marker(label: &str) -> String {
    format!("——>>> FOLDER : {label} <<<——")
}

/// Inline block replacing the body of a file that could not be read
#[must_use]
pub fn read_error_block(reason: &str) -> String {
    format!("\n[Error reading file: {reason}]\n")
}

/// What an assembly run wrote
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct AssembleStats {
    /// Entries written, successful or not
    pub entries: usize,
    /// Entries whose content could not be read
    pub unreadable: usize,
    /// Folder headers written
    pub headers: usize,
}

/// Write the included entries to `out` in ascending path order
///
/// Each entry gets a folder header when its depth is at most
/// `header_max_depth`; deeper entries share whatever header came before them.
/// A file that cannot be read is replaced by an inline error block and the
/// run carries on.
///
/// # Errors
///
/// Returns an error only if writing to `out` fails.
pub fn assemble<'a, W, I, F>(
    out: &mut W,
    entries: I,
    header_max_depth: usize,
    resolve_label: F,
) -> io::Result<AssembleStats>
where
    W: Write,
    I: IntoIterator<Item = &'a SelectionEntry>,
    F: Fn(&Path) -> String,
{
    let mut selected: Vec<&SelectionEntry> =
        entries.into_iter().filter(|entry| entry.included).collect();
    selected.sort_by(|a, b| a.path.cmp(&b.path));

    let mut stats = AssembleStats::default();

    for entry in selected {
        let file_path = Path::new(&entry.path);

        if entry.depth <= header_max_depth {
            writeln!(out, "{}", folder_marker(&resolve_label(file_path)))?;
            stats.headers += 1;
        }
        writeln!(out, "{FILE_MARKER}")?;

        match fs::read_to_string(file_path) {
            Ok(content) => {
                debug!("Appending {}", file_path.display());
                out.write_all(content.as_bytes())?;
            }
            Err(e) => {
                error!("Error reading file {}: {}", file_path.display(), e);
                out.write_all(read_error_block(&e.to_string()).as_bytes())?;
                stats.unreadable += 1;
            }
        }

        out.write_all(ENTRY_SEPARATOR.as_bytes())?;
        stats.entries += 1;
    }

    Ok(stats)
}
