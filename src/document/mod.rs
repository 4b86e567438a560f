//! Document generation: folder labels and the concatenated output stream.
//!
//! Layout of one entry:
//!
//! ```text
//! ——>>> FOLDER : ../app/src <<<——        (only when depth <= header_max_depth)
//! ——>>> users code <<<——
//! <file content, or an [Error reading file: ...] block>
//! <five blank lines>
//! ```

/// Concatenation of selected files into one stream.
pub mod assemble;

/// Longest-prefix repository matching and label formatting.
pub mod label;

pub use assemble::{AssembleStats, FILE_MARKER, assemble, folder_marker};
pub use label::{best_root, resolve_label};

use crate::store::SelectionEntry;
use std::io::{self, Write};
use std::path::PathBuf;

/// Write a document whose folder labels are resolved against `roots`
///
/// # Errors
///
/// Returns an error only if writing to `out` fails.
pub fn write_document<'a, W, I>(
    out: &mut W,
    entries: I,
    roots: &[PathBuf],
    header_max_depth: usize,
) -> io::Result<AssembleStats>
where
    W: Write,
    I: IntoIterator<Item = &'a SelectionEntry>,
{
    assemble(out, entries, header_max_depth, |path| {
        resolve_label(path, roots)
    })
}
