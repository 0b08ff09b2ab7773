// src/publish/mod.rs
//
// Posting sink for persisted artifacts. Reads a record list and emits
// one post per record, spaced out in time. Per-post failures are
// logged and skipped; posting never touches the extraction pipeline.

use crate::extractors::models::QuoteRecord;
use crate::utils::error::PublishError;
use std::time::Duration;

const POST_URL: &str = "https://api.x.com/2/tweets";
// The sink rate-limits aggressively; keep posts two minutes apart.
const POST_SPACING_SECS: u64 = 120;
const REQUEST_TIMEOUT_SECS: u64 = 30;

/// Formats one record as the outgoing post body:
/// header line, quoted text, hashtags.
pub fn format_post(record: &QuoteRecord) -> String {
    let speaker = if record.speaker_name.is_empty() {
        record.speaker_role.clone()
    } else {
        format!("{} [{}]", record.speaker_role, record.speaker_name)
    };

    // Heuristic records carry no speaker at all; drop the segment
    // rather than render a doubled space.
    let header = if speaker.is_empty() {
        format!("{} on {}:", record.company, record.description)
    } else {
        format!("{} {} on {}:", record.company, speaker, record.description)
    };

    let mut post = format!(
        "{}\n\"{}\"\n{}",
        header, record.quote_text, record.hashtag
    );
    if let Some(period) = record.period {
        post.push_str(&format!(" #{}", period.as_str()));
    }
    post
}

/// Client for the posting API, authenticated with a user-context
/// bearer token.
pub struct Poster {
    http: reqwest::Client,
    bearer_token: String,
}

impl Poster {
    /// Builds a poster from `TWITTER_BEARER_TOKEN`. Missing credentials
    /// abort the run before anything is posted.
    pub fn from_env() -> Result<Self, PublishError> {
        let bearer_token = std::env::var("TWITTER_BEARER_TOKEN")
            .map_err(|_| PublishError::MissingCredential("TWITTER_BEARER_TOKEN".to_string()))?;

        let http = reqwest::Client::builder()
            .timeout(Duration::from_secs(REQUEST_TIMEOUT_SECS))
            .build()?;

        Ok(Self { http, bearer_token })
    }

    async fn post(&self, text: &str) -> Result<(), PublishError> {
        let response = self
            .http
            .post(POST_URL)
            .bearer_auth(&self.bearer_token)
            .json(&serde_json::json!({ "text": text }))
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            tracing::error!("HTTP error status {} from posting API", status);
            return Err(PublishError::Http(status));
        }
        Ok(())
    }

    /// Posts every record in order, spacing emissions apart. Returns
    /// the number of successful posts; failures are logged and skipped.
    pub async fn post_quotes(&self, records: &[QuoteRecord]) -> usize {
        let mut posted = 0;

        for (index, record) in records.iter().enumerate() {
            if index > 0 {
                tokio::time::sleep(Duration::from_secs(POST_SPACING_SECS)).await;
            }

            let text = format_post(record);
            match self.post(&text).await {
                Ok(()) => {
                    tracing::info!("Posted quote {}/{}: {:.50}", index + 1, records.len(), text);
                    posted += 1;
                }
                Err(e) => {
                    tracing::error!("Failed to post quote {}/{}: {}", index + 1, records.len(), e);
                }
            }
        }

        posted
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::extractors::models::{FiscalYear, Quarter};

    fn record() -> QuoteRecord {
        QuoteRecord {
            company: "Acme Corp".to_string(),
            speaker_role: "CEO".to_string(),
            speaker_name: "Jane Doe".to_string(),
            description: "Expansion Plans".to_string(),
            quote_text: "We are expanding.".to_string(),
            hashtag: "#AcmeCorp".to_string(),
            fiscal_year: Some(FiscalYear::Fy25),
            period: Some(Quarter::Q4),
        }
    }

    #[test]
    fn formats_full_record() {
        assert_eq!(
            format_post(&record()),
            "Acme Corp CEO [Jane Doe] on Expansion Plans:\n\"We are expanding.\"\n#AcmeCorp #Q4"
        );
    }

    #[test]
    fn omits_name_and_period_when_absent() {
        let mut r = record();
        r.speaker_name = String::new();
        r.period = None;
        assert_eq!(
            format_post(&r),
            "Acme Corp CEO on Expansion Plans:\n\"We are expanding.\"\n#AcmeCorp"
        );
    }

    #[test]
    fn drops_speaker_segment_when_empty() {
        // The heuristic strategy leaves both speaker fields empty
        let mut r = record();
        r.speaker_role = String::new();
        r.speaker_name = String::new();
        assert_eq!(
            format_post(&r),
            "Acme Corp on Expansion Plans:\n\"We are expanding.\"\n#AcmeCorp #Q4"
        );
    }
}
