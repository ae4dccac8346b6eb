//! Whimsical natural-language read of the ledger from a generative-AI
//! service.
//!
//! The request is a single `generateContent` call. Any failure (no key,
//! network, status, shape of the answer) is logged and replaced by
//! [`fallback`]; callers of [`InsightClient::insights`] never see an error.
use std::time::Duration;

use api_types::{
    Insight,
    generate::{GenerateContentRequest, GenerateContentResponse, GenerationConfig, Schema},
};
use engine::{Currency, EngineError, PersonRecord};
use reqwest::{StatusCode, Url};
use serde::{Deserialize, Serialize};

pub const DEFAULT_MODEL: &str = "gemini-3-flash-preview";
pub const DEFAULT_BASE_URL: &str = "https://generativelanguage.googleapis.com/v1beta/";
const API_KEY_HEADER: &str = "x-goog-api-key";

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct InsightConfig {
    pub api_key: Option<String>,
    pub model: String,
    pub base_url: String,
    pub timeout_secs: u64,
}

impl Default for InsightConfig {
    fn default() -> Self {
        Self {
            api_key: None,
            model: DEFAULT_MODEL.to_string(),
            base_url: DEFAULT_BASE_URL.to_string(),
            timeout_secs: 20,
        }
    }
}

#[derive(Debug, thiserror::Error)]
pub enum InsightError {
    #[error("no API key configured")]
    MissingApiKey,
    #[error("invalid base_url: {0}")]
    InvalidUrl(String),
    #[error("network error: {0}")]
    Network(#[from] reqwest::Error),
    #[error("{status}: {message}")]
    Server { status: StatusCode, message: String },
    #[error("empty response")]
    EmptyResponse,
    #[error("malformed insight: {0}")]
    Malformed(#[from] serde_json::Error),
    #[error(transparent)]
    Engine(#[from] EngineError),
}

#[derive(Debug, Deserialize)]
struct ErrorBody {
    error: ErrorDetail,
}

#[derive(Debug, Deserialize)]
struct ErrorDetail {
    message: String,
}

#[derive(Debug, Clone)]
pub struct InsightClient {
    http: reqwest::Client,
    base_url: Url,
    model: String,
    api_key: Option<String>,
}

impl InsightClient {
    pub fn new(config: InsightConfig) -> Result<Self, InsightError> {
        let mut raw = config.base_url.trim().to_string();
        if !raw.ends_with('/') {
            raw.push('/');
        }
        let base_url = Url::parse(&raw).map_err(|err| InsightError::InvalidUrl(err.to_string()))?;
        let http = reqwest::Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()?;
        let api_key = config
            .api_key
            .map(|key| key.trim().to_string())
            .filter(|key| !key.is_empty());

        Ok(Self {
            http,
            base_url,
            model: config.model,
            api_key,
        })
    }

    pub fn model(&self) -> &str {
        &self.model
    }

    pub fn has_api_key(&self) -> bool {
        self.api_key.is_some()
    }

    pub fn endpoint(&self) -> Result<Url, InsightError> {
        self.base_url
            .join(&format!("models/{}:generateContent", self.model))
            .map_err(|err| InsightError::InvalidUrl(err.to_string()))
    }

    /// Asks for an insight, returning [`fallback`] on any failure.
    pub async fn insights(&self, people: &[PersonRecord], currency: Currency) -> Insight {
        match self.try_insights(people, currency).await {
            Ok(insight) => insight,
            Err(InsightError::MissingApiKey) => {
                tracing::warn!("AI insight skipped: no API key configured");
                fallback()
            }
            Err(err) => {
                tracing::error!("AI insight error: {err}");
                fallback()
            }
        }
    }

    pub async fn try_insights(
        &self,
        people: &[PersonRecord],
        currency: Currency,
    ) -> Result<Insight, InsightError> {
        let api_key = self.api_key.as_deref().ok_or(InsightError::MissingApiKey)?;
        let digest = engine::describe(people, currency)?;
        let request = GenerateContentRequest::from_prompt(build_prompt(&digest)).with_config(
            GenerationConfig::json(Schema::object_of_strings(&["message", "advice"])),
        );

        tracing::debug!(model = %self.model, people = people.len(), "requesting ledger insight");
        let resp = self
            .http
            .post(self.endpoint()?)
            .header(API_KEY_HEADER, api_key)
            .json(&request)
            .send()
            .await?;

        let status = resp.status();
        if !status.is_success() {
            let message = match resp.json::<ErrorBody>().await {
                Ok(body) => body.error.message,
                Err(_) => "unknown error".to_string(),
            };
            return Err(InsightError::Server { status, message });
        }

        let body = resp.json::<GenerateContentResponse>().await?;
        let text = body.first_text().ok_or(InsightError::EmptyResponse)?;
        parse_insight(text)
    }
}

/// The pair shown when the service cannot be reached.
pub fn fallback() -> Insight {
    Insight {
        message: "The abacus is jammed. I can't think straight right now.".to_string(),
        advice: "Keep track of your coins, even when I'm offline.".to_string(),
    }
}

pub fn build_prompt(digest: &str) -> String {
    let summary = if digest.trim().is_empty() {
        "No transactions yet."
    } else {
        digest
    };

    format!(
        "You are 'Hisab Guru', a quirky yet formal financial advisor.\n\
         Review the following ledger summary: {summary}\n\
         Provide a brief, witty, and useful summary of the financial situation.\n\
         Use a tone that is professional but slightly cheeky.\n\
         Format the response as JSON with two fields: 'message' (a string) and 'advice' (a string).\n"
    )
}

pub fn parse_insight(text: &str) -> Result<Insight, InsightError> {
    Ok(serde_json::from_str(text.trim())?)
}
