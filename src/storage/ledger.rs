// src/storage/ledger.rs
//
// The batch ledger is not a store: the output tree itself records what
// has been processed. Each `{stem}_quotes.json` artifact maps back to
// exactly one source path through the reversible suffix substitution,
// so re-runs are idempotent by construction and the view can never
// drift from the filesystem. Advisory only; no locking.

use crate::extractors::models::{FiscalYear, Quarter};
use crate::storage::{SourceDoc, ARTIFACT_SUFFIX, SOURCE_EXT};
use std::collections::HashSet;
use std::fs;
use std::path::{Path, PathBuf};

/// Scans the output tree and reconstructs the set of source paths that
/// already have an artifact. The fiscal-year and quarter segments
/// enclosing each artifact place the source in the mirrored tree.
pub fn already_processed(output_root: &Path, source_root: &Path) -> HashSet<PathBuf> {
    let mut processed = HashSet::new();

    for fy in FiscalYear::ALL {
        for quarter in Quarter::ALL {
            let dir = output_root.join(fy.as_str()).join(quarter.as_str());
            let entries = match fs::read_dir(&dir) {
                Ok(entries) => entries,
                Err(_) => continue,
            };

            for entry in entries.flatten() {
                let name = entry.file_name().to_string_lossy().into_owned();
                if let Some(base) = name.strip_suffix(ARTIFACT_SUFFIX) {
                    let source = source_root
                        .join(fy.as_str())
                        .join(quarter.as_str())
                        .join(format!("{}.{}", base, SOURCE_EXT));
                    processed.insert(source);
                }
            }
        }
    }

    tracing::debug!("Ledger holds {} processed documents", processed.len());
    processed
}

/// Filters out documents the ledger already accounts for, preserving
/// the caller's enumeration order.
pub fn unprocessed(docs: Vec<SourceDoc>, processed: &HashSet<PathBuf>) -> Vec<SourceDoc> {
    docs.into_iter()
        .filter(|doc| !processed.contains(&doc.path))
        .collect()
}
