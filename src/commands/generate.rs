use crate::CodedocContext;
use crate::document::{AssembleStats, write_document};
use crate::output;
use crate::store::Store;
use crate::utils::paths::ensure_parent_dirs;
use anyhow::{Context, Result};
use std::fs::File;
use std::io::{self, BufWriter, Write};
use tracing::info;

/// Execute generate command - bind every selected file into one document
///
/// The document goes to the configured output path, or to stdout when
/// `to_stdout` is set. Files that cannot be read are replaced by an inline
/// error block.
///
/// # Errors
///
/// Returns an error if:
/// - The store is missing, locked, or lacks either table
/// - The output cannot be created or written
pub fn execute(ctx: &CodedocContext, to_stdout: bool) -> Result<AssembleStats> {
    let store = Store::open(&ctx.store_path)?;
    let roots = super::repository_roots(store.repositories()?)?;
    let selections = store.selections()?;
    let header_max_depth = ctx.config.document.header_max_depth;

    if to_stdout {
        let stdout = io::stdout();
        let mut out = stdout.lock();
        let stats = write_document(&mut out, selections.included(), &roots, header_max_depth)
            .context("Failed to write document to stdout")?;
        out.flush()?;
        return Ok(stats);
    }

    let output_path = &ctx.output_path;
    ensure_parent_dirs(output_path)?;
    let file = File::create(output_path)
        .with_context(|| format!("Failed to create document: {}", output_path.display()))?;
    let mut out = BufWriter::new(file);
    let stats = write_document(&mut out, selections.included(), &roots, header_max_depth)
        .with_context(|| format!("Failed to write document: {}", output_path.display()))?;
    out.flush()
        .with_context(|| format!("Failed to write document: {}", output_path.display()))?;

    info!("Document created at {}", output_path.display());
    if stats.unreadable > 0 {
        output::warning(&format!(
            "{} of {} files could not be read; see the inline error blocks",
            stats.unreadable, stats.entries
        ));
    }
    output::success(&format!(
        "Wrote {} files to {}",
        stats.entries,
        output_path.display()
    ));

    Ok(stats)
}
