//! Merge a fresh scan into the persisted selection table.
//!
//! The merge is a full replace that carries operator flags forward: every
//! path in the scan gets an entry, keeping its previous `included` flag if it
//! had one and `false` otherwise; paths missing from the scan are dropped.
//! The function is pure, so it can be tested without a store.

use crate::scanner::ScanRecord;
use crate::store::{SelectionEntry, SelectionTable};

/// Counts describing how a reconcile changed the table
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ReconcileSummary {
    /// Paths present before and after
    pub kept: usize,
    /// Paths seen for the first time
    pub added: usize,
    /// Paths that disappeared
    pub dropped: usize,
    /// Included entries after the merge
    pub included: usize,
}

impl ReconcileSummary {
    /// Compare a table before and after reconciliation
    #[must_use]
    pub fn between(before: &SelectionTable, after: &SelectionTable) -> Self {
        let kept = after.iter().filter(|e| before.contains(&e.path)).count();
        Self {
            kept,
            added: after.len() - kept,
            dropped: before.len() - kept,
            included: after.included().count(),
        }
    }
}

/// Build the new selection table from the previous one and a fresh scan
///
/// A path produced more than once by the scan yields a single entry; the first
/// record seen supplies its file name and depth. Nested repositories that are
/// both scanned report their shared files once per root, in store order.
#[must_use]
pub fn reconcile(existing: &SelectionTable, fresh: &[ScanRecord]) -> SelectionTable {
    let mut table = SelectionTable::new();

    for record in fresh {
        let path = record.file_path.to_string_lossy().into_owned();
        if table.contains(&path) {
            continue;
        }
        let included = existing.get(&path).is_some_and(|entry| entry.included);

        table.insert(SelectionEntry {
            path,
            file_name: record.file_name.clone(),
            depth: record.depth,
            included,
        });
    }

    table
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;

    fn record(path: &str, depth: usize) -> ScanRecord {
        ScanRecord {
            repo_root: PathBuf::from("/r"),
            file_path: PathBuf::from(path),
            file_name: path.rsplit('/').next().unwrap().to_string(),
            depth,
        }
    }

    fn entry(path: &str, included: bool) -> SelectionEntry {
        SelectionEntry {
            path: path.to_string(),
            file_name: path.rsplit('/').next().unwrap().to_string(),
            depth: 0,
            included,
        }
    }

    #[test]
    fn test_new_paths_start_unflagged() {
        let table = reconcile(&SelectionTable::new(), &[record("/r/a.js", 0)]);
        assert_eq!(table.len(), 1);
        assert!(!table.get("/r/a.js").unwrap().included);
    }

    #[test]
    fn test_flags_carry_forward_and_missing_paths_drop() {
        let existing = SelectionTable::from_rows(vec![
            entry("/r/a.js", true),
            entry("/r/gone.js", true),
            entry("/r/b.css", false),
        ]);
        let fresh = [record("/r/b.css", 0), record("/r/a.js", 0), record("/r/new.js", 0)];

        let table = reconcile(&existing, &fresh);
        let rows = table.clone().into_rows();
        let summary: Vec<(&str, bool)> = rows
            .iter()
            .map(|e| (e.path.as_str(), e.included))
            .collect();
        assert_eq!(
            summary,
            vec![("/r/a.js", true), ("/r/b.css", false), ("/r/new.js", false)]
        );

        let counts = ReconcileSummary::between(&existing, &table);
        assert_eq!(
            counts,
            ReconcileSummary {
                kept: 2,
                added: 1,
                dropped: 1,
                included: 1
            }
        );
    }

    #[test]
    fn test_metadata_refreshes_from_scan() {
        let mut stale = entry("/r/x/a.js", true);
        stale.depth = 7;
        stale.file_name = "old".to_string();
        let existing = SelectionTable::from_rows(vec![stale]);

        let table = reconcile(&existing, &[record("/r/x/a.js", 1)]);
        let refreshed = table.get("/r/x/a.js").unwrap();
        assert_eq!(refreshed.depth, 1);
        assert_eq!(refreshed.file_name, "a.js");
        assert!(refreshed.included);
    }

    #[test]
    fn test_duplicate_scan_records_keep_the_first() {
        let table = reconcile(
            &SelectionTable::new(),
            &[record("/r/in/a/a.js", 2), record("/r/in/a/a.js", 1)],
        );
        assert_eq!(table.len(), 1);
        assert_eq!(table.get("/r/in/a/a.js").unwrap().depth, 2);
    }

    #[test]
    fn test_empty_scan_empties_table() {
        let existing = SelectionTable::from_rows(vec![entry("/r/a.js", true)]);
        assert!(reconcile(&existing, &[]).is_empty());
    }

    #[test]
    fn test_second_run_is_a_fixed_point() {
        let existing = SelectionTable::from_rows(vec![entry("/r/a.js", true)]);
        let fresh = [record("/r/a.js", 0), record("/r/b.js", 0)];

        let once = reconcile(&existing, &fresh);
        let twice = reconcile(&once, &fresh);
        assert_eq!(once, twice);
    }
}
