// src/storage/mod.rs
pub mod ledger;

use crate::extractors::models::{FiscalYear, Quarter};
use crate::extractors::{Extraction, QuoteRecord};
use crate::utils::company_name_from_stem;
use crate::utils::error::StorageError;
use std::fs;
use std::path::{Path, PathBuf};

/// Extension of source documents under the pdf root.
pub const SOURCE_EXT: &str = "pdf";
/// Suffix that turns a source base name into its artifact name. The
/// substitution must stay reversible: the ledger reconstructs source
/// paths from it.
pub const ARTIFACT_SUFFIX: &str = "_quotes.json";
const METADATA_SUFFIX: &str = "_quotes_meta.json";

/// One transcript PDF located in the source taxonomy.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SourceDoc {
    pub path: PathBuf,
    pub fiscal_year: FiscalYear,
    pub period: Quarter,
}

impl SourceDoc {
    pub fn file_stem(&self) -> String {
        self.path
            .file_stem()
            .map(|s| s.to_string_lossy().into_owned())
            .unwrap_or_default()
    }

    /// Company name derived from the file stem, e.g.
    /// `hdfc_bank.pdf` -> `Hdfc Bank`.
    pub fn company_name(&self) -> String {
        company_name_from_stem(&self.file_stem())
    }
}

/// Owns the mirrored source/output directory trees and the artifact
/// writes. The output tree doubles as the batch ledger (see `ledger`).
pub struct StorageManager {
    source_root: PathBuf,
    output_root: PathBuf,
}

impl StorageManager {
    pub fn new<P: AsRef<Path>>(source_root: P, output_root: P) -> Result<Self, StorageError> {
        let manager = Self {
            source_root: source_root.as_ref().to_path_buf(),
            output_root: output_root.as_ref().to_path_buf(),
        };
        manager.ensure_layout()?;
        Ok(manager)
    }

    pub fn source_root(&self) -> &Path {
        &self.source_root
    }

    pub fn output_root(&self) -> &Path {
        &self.output_root
    }

    /// Creates the full `{root}/{FY}/{Q}` tree under both roots so
    /// users have somewhere to drop transcripts.
    pub fn ensure_layout(&self) -> Result<(), StorageError> {
        for root in [&self.source_root, &self.output_root] {
            for fy in FiscalYear::ALL {
                for quarter in Quarter::ALL {
                    fs::create_dir_all(root.join(fy.as_str()).join(quarter.as_str()))?;
                }
            }
        }
        Ok(())
    }

    /// Walks the fixed taxonomy in order and returns every source PDF,
    /// sorted by name within each quarter for a stable batch order.
    pub fn enumerate_sources(&self) -> Result<Vec<SourceDoc>, StorageError> {
        let mut docs = Vec::new();

        for fy in FiscalYear::ALL {
            for quarter in Quarter::ALL {
                let dir = self.source_root.join(fy.as_str()).join(quarter.as_str());
                let entries = match fs::read_dir(&dir) {
                    Ok(entries) => entries,
                    Err(_) => continue, // quarter directory absent, nothing to do
                };

                let mut paths: Vec<PathBuf> = entries
                    .flatten()
                    .map(|entry| entry.path())
                    .filter(|path| {
                        // Exact match: the ledger reconstructs source
                        // paths with this extension verbatim, so any
                        // variant spelling would never leave the
                        // pending set.
                        path.extension().and_then(|ext| ext.to_str()) == Some(SOURCE_EXT)
                    })
                    .collect();
                paths.sort();

                docs.extend(paths.into_iter().map(|path| SourceDoc {
                    path,
                    fiscal_year: fy,
                    period: quarter,
                }));
            }
        }

        Ok(docs)
    }

    /// The artifact path mirroring a source document:
    /// `{output_root}/{FY}/{Q}/{stem}_quotes.json`.
    pub fn artifact_path(&self, doc: &SourceDoc) -> PathBuf {
        self.output_root
            .join(doc.fiscal_year.as_str())
            .join(doc.period.as_str())
            .join(format!("{}{}", doc.file_stem(), ARTIFACT_SUFFIX))
    }

    /// Writes the full record list as one JSON document, replacing any
    /// prior artifact. Write-then-rename so a concurrent reader never
    /// observes a partial artifact.
    pub fn save_quotes(
        &self,
        records: &[QuoteRecord],
        artifact_path: &Path,
    ) -> Result<(), StorageError> {
        if let Some(parent) = artifact_path.parent() {
            fs::create_dir_all(parent)?;
        }

        let json = serde_json::to_string_pretty(records)
            .map_err(|e| StorageError::SerializationError(e.to_string()))?;

        let tmp_path = artifact_path.with_extension("json.tmp");
        fs::write(&tmp_path, json)?;
        fs::rename(&tmp_path, artifact_path)?;

        tracing::info!(
            "Saved {} quotes to {}",
            records.len(),
            artifact_path.display()
        );
        Ok(())
    }

    /// Writes a `{stem}_quotes_meta.json` sibling with run details.
    /// The ledger scan matches only the artifact suffix, so metadata
    /// files never count as processed documents.
    pub fn save_metadata(
        &self,
        company: &str,
        extraction: &Extraction,
        artifact_path: &Path,
    ) -> Result<PathBuf, StorageError> {
        let file_name = artifact_path
            .file_name()
            .map(|name| name.to_string_lossy().into_owned())
            .unwrap_or_default();
        let meta_name = match file_name.strip_suffix(ARTIFACT_SUFFIX) {
            Some(base) => format!("{}{}", base, METADATA_SUFFIX),
            None => format!("{}{}", file_name, METADATA_SUFFIX),
        };
        let meta_path = artifact_path.with_file_name(meta_name);

        let metadata = serde_json::json!({
            "company": company,
            "record_count": extraction.records.len(),
            "parse_failures": extraction.parse_failures,
            "extracted_at": chrono::Utc::now().to_rfc3339(),
        });

        let metadata_str = serde_json::to_string_pretty(&metadata)
            .map_err(|e| StorageError::SerializationError(e.to_string()))?;
        fs::write(&meta_path, metadata_str)?;

        tracing::debug!("Saved metadata to {}", meta_path.display());
        Ok(meta_path)
    }
}
