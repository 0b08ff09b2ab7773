// src/oracle/client.rs
use crate::oracle::models::{Message, MessagesRequest, MessagesResponse};
use crate::utils::error::{AppError, OracleError};
use reqwest::header;
use std::time::Duration;

const API_URL: &str = "https://api.anthropic.com/v1/messages";
const API_VERSION: &str = "2023-06-01";
pub const DEFAULT_MODEL: &str = "claude-3-5-sonnet-20241022";
const MAX_TOKENS: u32 = 2000;
const TEMPERATURE: f32 = 0.5;
// Generation is the slowest step of the batch. Bound it so one hung
// call fails that document instead of stalling the whole run.
const REQUEST_TIMEOUT_SECS: u64 = 180;
// Pacing between documents; keeps us well under the API rate limit.
const REQUEST_DELAY_MS: u64 = 500;

/// Client for the text-generation oracle (Anthropic Messages API).
pub struct OracleClient {
    http: reqwest::Client,
    api_key: String,
    model: String,
}

impl OracleClient {
    /// Builds a client from `ANTHROPIC_API_KEY`. A missing key is a
    /// setup failure: the run must abort before any document is touched.
    pub fn from_env(model: &str) -> Result<Self, AppError> {
        let api_key = std::env::var("ANTHROPIC_API_KEY")
            .map_err(|_| AppError::Config("Missing ANTHROPIC_API_KEY in environment".to_string()))?;

        let http = reqwest::Client::builder()
            .timeout(Duration::from_secs(REQUEST_TIMEOUT_SECS))
            .build()
            .map_err(|e| AppError::Config(format!("Failed to build HTTP client: {}", e)))?;

        Ok(Self {
            http,
            api_key,
            model: model.to_string(),
        })
    }

    /// Sends one prompt and returns the concatenated text content of
    /// the response. Single attempt; the caller treats any error as a
    /// per-document failure.
    pub async fn generate(&self, prompt: &str) -> Result<String, OracleError> {
        tokio::time::sleep(Duration::from_millis(REQUEST_DELAY_MS)).await;

        let request = MessagesRequest {
            model: self.model.clone(),
            max_tokens: MAX_TOKENS,
            temperature: TEMPERATURE,
            messages: vec![Message {
                role: "user".to_string(),
                content: prompt.to_string(),
            }],
        };

        tracing::debug!("Sending {} char prompt to model {}", prompt.len(), self.model);

        let response = self
            .http
            .post(API_URL)
            .header("x-api-key", &self.api_key)
            .header("anthropic-version", API_VERSION)
            .header(header::CONTENT_TYPE, "application/json")
            .json(&request)
            .send()
            .await?; // Propagates reqwest::Error as OracleError::Network

        let status = response.status();
        if !status.is_success() {
            tracing::error!("HTTP error status {} from generation API", status);
            if status == reqwest::StatusCode::TOO_MANY_REQUESTS {
                return Err(OracleError::RateLimited);
            }
            return Err(OracleError::Http(status));
        }

        let body: MessagesResponse = response
            .json()
            .await
            .map_err(|e| OracleError::Parse(e.to_string()))?;

        let text = body
            .content
            .iter()
            .filter(|block| block.kind == "text")
            .map(|block| block.text.as_str())
            .collect::<Vec<_>>()
            .join("\n");

        if text.trim().is_empty() {
            return Err(OracleError::EmptyResponse);
        }

        tracing::debug!("Received {} chars from generation API", text.len());
        Ok(text)
    }
}

/// Builds the analyst prompt for one transcript. The format section is
/// load-bearing: `block::parse_blocks` expects exactly the three-line
/// layout requested here.
pub fn build_prompt(company: &str, transcript: &str) -> String {
    let hashtag_stem: String = company.chars().filter(|c| !c.is_whitespace()).collect();
    format!(
        r#"You are an expert financial analyst with deep experience in earnings call analysis. Review this transcript and identify the 10 most strategically significant quotes, prioritizing those that reveal:

HIGH PRIORITY SIGNALS:
- Major strategic shifts and market or industry trends
- New initiatives, new product launches or expansion to new markets
- Forward-looking growth projections or significant changes in financial metrics or guidance
- Market share gains or losses
- Capital allocation and investment priorities
- Customer/demand trends
- Macro headwinds or tailwinds affecting the business
- Margin and profitability insights
- Technological innovations, technology investments or R&D
- M&A plans or strategic partnerships
- Risk factors and mitigation strategies

QUOTE SELECTION CRITERIA:
- Favor specific, quantitative statements over general observations
- Prioritize forward-looking insights over historical performance
- Focus on structural/strategic changes over quarterly fluctuations
- Include both positive developments and risk factors

Format each quote as follows, with one blank line between quotes:
{company} SPEAKER_ROLE [SPEAKER_NAME] on STRATEGIC_IMPACT:
"VERBATIM_QUOTE"
#{hashtag}

where SPEAKER_ROLE is the title (CEO, CFO, CTO, ...), SPEAKER_NAME is
the speaker's name in square brackets, and STRATEGIC_IMPACT is a brief
analysis of why the quote matters for the company's future.

Note: Do not include any numbering before or after the company name.

Transcript:
{transcript}

Please analyze and return exactly 10 quotes that represent the most strategically significant insights for investors and analysts. Maintain verbatim accuracy in the quotes."#,
        company = company,
        hashtag = hashtag_stem,
        transcript = transcript,
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn prompt_contains_company_and_format_markers() {
        let prompt = build_prompt("Acme Corp", "Q4 was strong.");
        assert!(prompt.contains("Acme Corp SPEAKER_ROLE [SPEAKER_NAME]"));
        assert!(prompt.contains("#AcmeCorp"));
        assert!(prompt.contains("Q4 was strong."));
    }
}
