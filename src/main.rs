// src/main.rs
mod extractors;
mod oracle;
mod pdf;
mod publish;
mod storage;
mod utils;

use clap::Parser;
use std::path::Path;

use extractors::{HeuristicStrategy, OracleStrategy, QuoteRecord, QuoteStrategy};
use oracle::client::{OracleClient, DEFAULT_MODEL};
use storage::{ledger, StorageManager};
use utils::AppError;

/// Command Line Interface for the earnings-call quote extractor
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Root directory of transcript PDFs (FY/quarter layout)
    #[arg(long, default_value = "./pdfs")]
    pdf_dir: String,

    /// Output directory for quote artifacts (mirrors the PDF layout)
    #[arg(short, long, default_value = "./output")]
    output_dir: String,

    /// Use the keyword heuristic instead of the generation API
    #[arg(long)]
    heuristic: bool,

    /// Model identifier for the generation API
    #[arg(long, default_value = DEFAULT_MODEL)]
    model: String,

    /// Reprocess documents that already have an artifact
    #[arg(long)]
    force: bool,

    /// Post the quotes from an existing artifact instead of running the batch
    #[arg(long)]
    post_artifact: Option<String>,
}

#[tokio::main]
async fn main() -> Result<(), AppError> {
    // 1. Setup Logging (reads RUST_LOG env var)
    utils::logging::setup_logging();

    // 2. Parse CLI Arguments
    let args = Args::parse();
    tracing::info!("Starting processing for args: {:?}", args);

    // Posting mode short-circuits the batch entirely
    if let Some(artifact) = &args.post_artifact {
        return post_artifact(Path::new(artifact)).await;
    }

    // 3. Initialize storage (creates the FY/quarter trees)
    let storage = StorageManager::new(&args.pdf_dir, &args.output_dir)?;

    // 4. Pick the extraction strategy. Credential checks happen here,
    //    before any document is touched.
    let strategy: Box<dyn QuoteStrategy> = if args.heuristic {
        tracing::info!("Using heuristic sentence extraction");
        Box::new(HeuristicStrategy)
    } else {
        Box::new(OracleStrategy::new(OracleClient::from_env(&args.model)?))
    };

    // 5. Enumerate sources and subtract the ledger
    let sources = storage.enumerate_sources()?;
    tracing::info!("Found {} transcript documents", sources.len());

    let pending = if args.force {
        sources
    } else {
        let processed = ledger::already_processed(storage.output_root(), storage.source_root());
        ledger::unprocessed(sources, &processed)
    };

    if pending.is_empty() {
        tracing::info!("Nothing to do; every document already has an artifact");
        return Ok(());
    }
    tracing::info!("Processing {} pending documents", pending.len());

    // 6. Process each document. Every failure below is local to its
    //    document; the batch always moves on.
    let mut success_count = 0;
    let mut failure_count = 0;

    for doc in &pending {
        tracing::info!(
            "Processing {} ({} {})",
            doc.path.display(),
            doc.fiscal_year,
            doc.period
        );

        let text = match pdf::extract_text(&doc.path) {
            Ok(text) => text,
            Err(e) => {
                tracing::error!("Skipping {}: {}", doc.path.display(), e);
                failure_count += 1;
                continue;
            }
        };

        let company = doc.company_name();
        let mut extraction = match strategy.extract(&text, &company).await {
            Ok(extraction) => extraction,
            Err(e) => {
                tracing::error!("Extraction failed for {}: {}", doc.path.display(), e);
                failure_count += 1;
                continue;
            }
        };

        if extraction.parse_failures > 0 {
            tracing::warn!(
                "{} blocks failed to parse for {}",
                extraction.parse_failures,
                company
            );
        }

        // Tag the records with their place in the taxonomy before they
        // go to the persister.
        for record in &mut extraction.records {
            record.fiscal_year = Some(doc.fiscal_year);
            record.period = Some(doc.period);
        }

        let artifact_path = storage.artifact_path(doc);
        if let Err(e) = storage.save_quotes(&extraction.records, &artifact_path) {
            // Document stays out of the ledger; the next run re-offers it
            tracing::error!("Failed to save artifact for {}: {}", doc.path.display(), e);
            failure_count += 1;
            continue;
        }

        if let Err(e) = storage.save_metadata(&company, &extraction, &artifact_path) {
            tracing::warn!("Failed to save metadata for {}: {}", doc.path.display(), e);
        }

        tracing::info!(
            "Extracted {} quotes from {} ({} parse failures)",
            extraction.records.len(),
            doc.path.display(),
            extraction.parse_failures
        );
        success_count += 1;
    }

    tracing::info!(
        "Processing finished. Success: {}, Failures: {}",
        success_count,
        failure_count
    );

    if success_count == 0 && failure_count > 0 {
        return Err(AppError::Processing(format!(
            "Failed to extract quotes from all {} pending documents",
            failure_count
        )));
    }

    Ok(())
}

/// Loads a persisted artifact and posts its quotes.
async fn post_artifact(path: &Path) -> Result<(), AppError> {
    let poster = publish::Poster::from_env()?;

    let data = std::fs::read_to_string(path)?;
    let records: Vec<QuoteRecord> = serde_json::from_str(&data).map_err(|e| {
        AppError::Processing(format!("Invalid artifact {}: {}", path.display(), e))
    })?;

    tracing::info!("Posting {} quotes from {}", records.len(), path.display());
    let posted = poster.post_quotes(&records).await;
    tracing::info!("Posted {}/{} quotes", posted, records.len());

    if posted == 0 && !records.is_empty() {
        return Err(AppError::Processing(
            "Failed to post any quotes".to_string(),
        ));
    }
    Ok(())
}
