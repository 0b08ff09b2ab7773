// src/extractors/models.rs
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Fiscal years covered by the source/output directory taxonomy.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum FiscalYear {
    #[serde(rename = "FY25")]
    Fy25,
    #[serde(rename = "FY26")]
    Fy26,
}

impl FiscalYear {
    pub const ALL: [FiscalYear; 2] = [FiscalYear::Fy25, FiscalYear::Fy26];

    pub fn as_str(&self) -> &'static str {
        match self {
            FiscalYear::Fy25 => "FY25",
            FiscalYear::Fy26 => "FY26",
        }
    }
}

impl FromStr for FiscalYear {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "FY25" => Ok(FiscalYear::Fy25),
            "FY26" => Ok(FiscalYear::Fy26),
            other => Err(format!("unrecognized fiscal year segment: {}", other)),
        }
    }
}

impl fmt::Display for FiscalYear {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Quarters within a fiscal year.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Quarter {
    Q1,
    Q2,
    Q3,
    Q4,
}

impl Quarter {
    pub const ALL: [Quarter; 4] = [Quarter::Q1, Quarter::Q2, Quarter::Q3, Quarter::Q4];

    pub fn as_str(&self) -> &'static str {
        match self {
            Quarter::Q1 => "Q1",
            Quarter::Q2 => "Q2",
            Quarter::Q3 => "Q3",
            Quarter::Q4 => "Q4",
        }
    }
}

impl FromStr for Quarter {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "Q1" => Ok(Quarter::Q1),
            "Q2" => Ok(Quarter::Q2),
            "Q3" => Ok(Quarter::Q3),
            "Q4" => Ok(Quarter::Q4),
            other => Err(format!("unrecognized quarter segment: {}", other)),
        }
    }
}

impl fmt::Display for Quarter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One structured quote extracted from an earnings-call transcript.
///
/// Constructed by an extraction strategy, immutable afterwards. The
/// whole record set for a document is replaced on reprocessing; there
/// is no update-in-place.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct QuoteRecord {
    pub company: String,
    /// Speaker role (CEO, CFO, ...). May be empty when the oracle
    /// omitted it or the heuristic strategy produced the record.
    #[serde(default)]
    pub speaker_role: String,
    /// Speaker name from the bracketed part of the header. May be empty.
    #[serde(default)]
    pub speaker_name: String,
    /// Why the quote matters (the oracle's strategic-impact line).
    pub description: String,
    /// Verbatim span, enclosing quotation marks stripped.
    pub quote_text: String,
    /// `#Company`, no internal whitespace.
    pub hashtag: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub fiscal_year: Option<FiscalYear>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub period: Option<Quarter>,
}

/// Derives the fallback hashtag from a company name: `#` plus the name
/// with all whitespace removed.
pub fn derive_hashtag(company: &str) -> String {
    let compact: String = company.chars().filter(|c| !c.is_whitespace()).collect();
    format!("#{}", compact)
}
