//! Google Gemini analyzer.
//!
//! Sends the user's text as the sole content part, the scoring rubric as
//! the system instruction, and a schema constraint that forces the response
//! into the seven result fields. Low temperature biases the model toward
//! rule-following output.

use super::{decode, Analyzer, AnalyzerError};
use crate::rubric::{response_schema, SYSTEM_INSTRUCTION};
use crate::types::AnalysisResult;
use async_trait::async_trait;
use reqwest::Client;
use safescan_common::{Config, Error};
use serde::{Deserialize, Serialize};
use std::time::Instant;

const DEFAULT_BASE_URL: &str = "https://generativelanguage.googleapis.com/v1beta";

/// Analyzer backed by the Gemini `generateContent` API.
pub struct GeminiAnalyzer {
    api_key: String,
    model: String,
    temperature: f64,
    max_output_tokens: i64,
    base_url: String,
    client: Client,
}

// ══════════════════════════════════════════════════════════════════════════════
// API REQUEST/RESPONSE TYPES
// ══════════════════════════════════════════════════════════════════════════════

#[derive(Debug, Serialize)]
struct GenerateContentRequest {
    contents: Vec<Content>,
    #[serde(rename = "systemInstruction")]
    system_instruction: Content,
    #[serde(rename = "generationConfig")]
    generation_config: GenerationConfig,
}

#[derive(Debug, Serialize)]
struct Content {
    #[serde(skip_serializing_if = "Option::is_none")]
    role: Option<String>,
    parts: Vec<Part>,
}

#[derive(Debug, Serialize)]
struct Part {
    text: String,
}

#[derive(Debug, Serialize)]
struct GenerationConfig {
    temperature: f64,
    #[serde(rename = "maxOutputTokens")]
    max_output_tokens: i64,
    #[serde(rename = "responseMimeType")]
    response_mime_type: &'static str,
    #[serde(rename = "responseSchema")]
    response_schema: serde_json::Value,
}

#[derive(Debug, Deserialize)]
struct GenerateContentResponse {
    candidates: Option<Vec<Candidate>>,
    error: Option<ApiError>,
    #[serde(rename = "usageMetadata")]
    usage_metadata: Option<UsageMetadata>,
}

#[derive(Debug, Deserialize)]
struct Candidate {
    content: CandidateContent,
    #[serde(rename = "finishReason")]
    finish_reason: Option<String>,
}

#[derive(Debug, Deserialize)]
struct CandidateContent {
    #[serde(default)]
    parts: Vec<ResponsePart>,
}

#[derive(Debug, Deserialize)]
struct ResponsePart {
    text: Option<String>,
}

#[derive(Debug, Deserialize)]
struct ApiError {
    message: String,
}

#[derive(Debug, Deserialize)]
struct UsageMetadata {
    #[serde(rename = "promptTokenCount")]
    prompt_token_count: Option<i64>,
    #[serde(rename = "candidatesTokenCount")]
    candidates_token_count: Option<i64>,
}

impl GeminiAnalyzer {
    /// Create an analyzer from the service configuration.
    ///
    /// Fails fast when no Google API key is configured; no client is built
    /// and no call can be attempted without one.
    pub fn from_config(config: &Config) -> Result<Self, Error> {
        let api_key = config.google_api_key().ok_or_else(|| {
            Error::MissingCredential(
                "Google API key not found. Set GOOGLE_API_KEY or secrets.llm.google.".into(),
            )
        })?;

        Ok(Self::new(
            api_key,
            &config.llm.model,
            config.llm.temperature,
            config.llm.max_output_tokens,
        ))
    }

    /// Create an analyzer with explicit settings.
    pub fn new(api_key: &str, model: &str, temperature: f64, max_output_tokens: i64) -> Self {
        Self {
            api_key: api_key.to_string(),
            model: model.to_string(),
            temperature,
            max_output_tokens,
            base_url: DEFAULT_BASE_URL.to_string(),
            client: Client::builder()
                .timeout(std::time::Duration::from_secs(120))
                .connect_timeout(std::time::Duration::from_secs(10))
                .build()
                .unwrap_or_else(|_| Client::new()),
        }
    }

    /// Point the analyzer at a different endpoint. Used by tests.
    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into();
        self
    }

    fn build_request(&self, text: &str) -> GenerateContentRequest {
        GenerateContentRequest {
            contents: vec![Content {
                role: Some("user".into()),
                parts: vec![Part { text: text.into() }],
            }],
            system_instruction: Content {
                role: None,
                parts: vec![Part {
                    text: SYSTEM_INSTRUCTION.into(),
                }],
            },
            generation_config: GenerationConfig {
                temperature: self.temperature,
                max_output_tokens: self.max_output_tokens,
                response_mime_type: "application/json",
                response_schema: response_schema(),
            },
        }
    }

    fn endpoint(&self) -> String {
        let model_name = if self.model.starts_with("models/") {
            self.model.clone()
        } else {
            format!("models/{}", self.model)
        };

        format!(
            "{}/{model_name}:generateContent?key={}",
            self.base_url, self.api_key
        )
    }

    fn err(&self, message: impl Into<String>, status_code: Option<u16>) -> AnalyzerError {
        AnalyzerError {
            provider: "gemini".into(),
            model: self.model.clone(),
            message: message.into(),
            status_code,
        }
    }
}

#[async_trait]
impl Analyzer for GeminiAnalyzer {
    fn name(&self) -> &str {
        "gemini"
    }

    async fn analyze(&self, text: &str) -> Result<AnalysisResult, AnalyzerError> {
        let start = Instant::now();
        let request = self.build_request(text);

        let response = self
            .client
            .post(self.endpoint())
            .json(&request)
            .send()
            .await
            .map_err(|e| self.err(format!("Request failed: {}", e), None))?;

        let status = response.status();
        if !status.is_success() {
            let error_text = response.text().await.unwrap_or_default();
            return Err(self.err(
                format!("API error ({}): {}", status.as_u16(), error_text),
                Some(status.as_u16()),
            ));
        }

        let result: GenerateContentResponse = response
            .json()
            .await
            .map_err(|e| self.err(format!("Failed to parse response: {}", e), None))?;

        // Check for API error in response body
        if let Some(err) = result.error {
            return Err(self.err(format!("API error: {}", err.message), None));
        }

        let candidate = result
            .candidates
            .and_then(|c| c.into_iter().next())
            .ok_or_else(|| self.err("No response from Gemini", None))?;

        let payload = candidate
            .content
            .parts
            .into_iter()
            .find_map(|p| p.text)
            .unwrap_or_default();

        if payload.is_empty() {
            return Err(self.err("Empty response from model", None));
        }

        let analysis = decode::decode_result(&payload)
            .map_err(|e| self.err(e.to_string(), None))?;

        if let Some(usage) = result.usage_metadata {
            tracing::debug!(
                prompt_tokens = usage.prompt_token_count,
                candidates_tokens = usage.candidates_token_count,
                finish_reason = candidate.finish_reason.as_deref(),
                latency_ms = start.elapsed().as_millis() as u64,
                "Analysis call completed"
            );
        }

        Ok(analysis)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn analyzer() -> GeminiAnalyzer {
        GeminiAnalyzer::new("test-api-key", "gemini-2.5-flash", 0.1, 2048)
    }

    #[test]
    fn test_from_config_requires_credential() {
        let config = Config::default();
        assert!(matches!(
            GeminiAnalyzer::from_config(&config),
            Err(Error::MissingCredential(_))
        ));
    }

    #[test]
    fn test_from_config_with_key() {
        let mut config = Config::default();
        config.secrets.llm.google = Some("test-api-key".into());
        let analyzer = match GeminiAnalyzer::from_config(&config) {
            Ok(analyzer) => analyzer,
            Err(e) => panic!("expected analyzer, got {e}"),
        };
        assert_eq!(analyzer.name(), "gemini");
        assert_eq!(analyzer.model, "gemini-2.5-flash");
    }

    #[test]
    fn test_endpoint_prefixes_bare_model_names() {
        let a = analyzer();
        assert!(a
            .endpoint()
            .starts_with("https://generativelanguage.googleapis.com/v1beta/models/gemini-2.5-flash:generateContent"));

        let a = GeminiAnalyzer::new("k", "models/gemini-2.5-pro", 0.1, 2048);
        assert!(a.endpoint().contains("/models/gemini-2.5-pro:generateContent"));
    }

    #[test]
    fn test_request_carries_rubric_schema_and_temperature() {
        let request = analyzer().build_request("is this a scam?");
        let json = serde_json::to_value(&request).unwrap();

        assert_eq!(json["contents"][0]["role"], "user");
        assert_eq!(json["contents"][0]["parts"][0]["text"], "is this a scam?");
        assert!(json["systemInstruction"]["parts"][0]["text"]
            .as_str()
            .unwrap()
            .contains("TRUST SCORE"));
        assert_eq!(json["generationConfig"]["responseMimeType"], "application/json");
        assert_eq!(
            json["generationConfig"]["responseSchema"]["required"]
                .as_array()
                .unwrap()
                .len(),
            7
        );
        assert!((json["generationConfig"]["temperature"].as_f64().unwrap() - 0.1).abs() < 1e-9);
    }
}
