// src/extractors/mod.rs
pub mod block;
pub mod heuristic;
pub mod models;

use async_trait::async_trait;

use crate::oracle::client::{build_prompt, OracleClient};
use crate::utils::error::ExtractError;

// Re-export key extraction types for convenience
pub use models::{derive_hashtag, QuoteRecord};

/// What one strategy produced for one source document.
#[derive(Debug, Default)]
pub struct Extraction {
    pub records: Vec<QuoteRecord>,
    /// Blocks that did not conform to the expected layout. Local to
    /// the document; the batch never aborts on these.
    pub parse_failures: usize,
}

/// A quote-extraction strategy. The batch driver is strategy-agnostic:
/// it hands over the transcript text and the company name and gets
/// back records satisfying the same output contract.
#[async_trait]
pub trait QuoteStrategy: Send + Sync {
    async fn extract(&self, text: &str, company: &str) -> Result<Extraction, ExtractError>;
}

/// Prompts the generation oracle and parses its block-formatted
/// response. One attempt per document, no retry.
pub struct OracleStrategy {
    client: OracleClient,
}

impl OracleStrategy {
    pub fn new(client: OracleClient) -> Self {
        Self { client }
    }
}

#[async_trait]
impl QuoteStrategy for OracleStrategy {
    async fn extract(&self, text: &str, company: &str) -> Result<Extraction, ExtractError> {
        let prompt = build_prompt(company, text);
        let response = self.client.generate(&prompt).await?;
        Ok(block::parse_blocks(&response, company))
    }
}

/// Keyword-based extraction with no external calls. Used as a fallback
/// or when running without API credentials.
pub struct HeuristicStrategy;

const HEURISTIC_DESCRIPTION: &str = "Key financial highlight";

#[async_trait]
impl QuoteStrategy for HeuristicStrategy {
    async fn extract(&self, text: &str, company: &str) -> Result<Extraction, ExtractError> {
        let records = heuristic::extract(text)
            .into_iter()
            .map(|sentence| QuoteRecord {
                company: company.to_string(),
                speaker_role: String::new(),
                speaker_name: String::new(),
                description: HEURISTIC_DESCRIPTION.to_string(),
                quote_text: sentence,
                hashtag: derive_hashtag(company),
                fiscal_year: None,
                period: None,
            })
            .collect();

        Ok(Extraction {
            records,
            parse_failures: 0,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn heuristic_strategy_wraps_sentences_into_records() {
        let strategy = HeuristicStrategy;
        let extraction = tokio_test::block_on(
            strategy.extract("Revenue grew 10%.\nWeather was nice.", "Acme Corp"),
        )
        .unwrap();

        assert_eq!(extraction.parse_failures, 0);
        assert_eq!(extraction.records.len(), 1);
        let record = &extraction.records[0];
        assert_eq!(record.company, "Acme Corp");
        assert_eq!(record.quote_text, "Revenue grew 10.");
        assert_eq!(record.hashtag, "#AcmeCorp");
        assert!(record.speaker_role.is_empty());
        assert!(record.fiscal_year.is_none());
    }
}
