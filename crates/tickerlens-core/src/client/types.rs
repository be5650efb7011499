//! Response types of the non-streaming endpoints

use crate::analysis::PriceInfo;
use serde::{Deserialize, Serialize};

/// `GET /health`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HealthStatus {
    pub status: String,
    #[serde(default)]
    pub timestamp: Option<String>,
    #[serde(default)]
    pub ollama_url: Option<String>,
    #[serde(default)]
    pub model: Option<String>,
}

impl HealthStatus {
    pub fn is_healthy(&self) -> bool {
        self.status.eq_ignore_ascii_case("healthy")
    }
}

/// `POST /analyze-simple`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SimpleAnalysis {
    pub ticker: String,
    #[serde(default)]
    pub company_name: String,
    #[serde(default)]
    pub timestamp: String,
    #[serde(default)]
    pub query: String,
    #[serde(default)]
    pub price_info: PriceInfo,
    #[serde(default)]
    pub analysis: String,
    #[serde(default)]
    pub news_count: usize,
}

/// `GET /test-ticker-extraction`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TickerExtraction {
    pub query: String,
    pub extracted_ticker: Option<String>,
    pub success: bool,
}
