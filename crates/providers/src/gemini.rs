//! Gemini client for the online simplification path.
//!
//! One HTTPS request per attempt. Models are tried in preference order so a
//! quota-exhausted or unavailable model rotates to the next one; the rotation
//! still counts as a single online attempt from the orchestrator's side.

use async_trait::async_trait;
use reqwest::Client;
use serde::{Deserialize, Serialize};
use shared::error::ApiError;
use shared::settings::AppSettings;
use shared::types::Language;
use std::time::Duration;

use crate::prompt::build_prompt;
use crate::OnlineSimplify;

const MODEL_PREFERENCE: &[&str] = &["gemini-2.5-flash", "gemini-2.0-flash", "gemini-1.5-flash"];

#[derive(Debug, Serialize)]
struct GeminiPart {
    text: String,
}

#[derive(Debug, Serialize)]
struct GeminiContent {
    role: String,
    parts: Vec<GeminiPart>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct GenerationConfig {
    temperature: f32,
    max_output_tokens: u32,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct GeminiRequest {
    contents: Vec<GeminiContent>,
    generation_config: GenerationConfig,
}

#[derive(Debug, Deserialize)]
struct GeminiCandidatePart {
    text: Option<String>,
}

#[derive(Debug, Deserialize)]
struct GeminiCandidateContent {
    parts: Option<Vec<GeminiCandidatePart>>,
}

#[derive(Debug, Deserialize)]
struct GeminiCandidate {
    content: Option<GeminiCandidateContent>,
}

#[derive(Debug, Deserialize)]
struct GeminiResponse {
    #[serde(default)]
    candidates: Vec<GeminiCandidate>,
}

pub struct GeminiClient {
    http: Client,
    auth_token: String,
    models: Vec<String>,
}

impl GeminiClient {
    pub fn new(api_key: impl Into<String>, request_timeout: Duration) -> Result<Self, ApiError> {
        let http = Client::builder()
            .timeout(request_timeout)
            .build()
            .map_err(|e| ApiError::Network(e.to_string()))?;
        Ok(Self {
            http,
            auth_token: api_key.into(),
            models: MODEL_PREFERENCE.iter().map(|m| m.to_string()).collect(),
        })
    }

    /// Build from settings; `NoKey` when no credential is configured.
    pub fn from_settings(settings: &AppSettings) -> Result<Self, ApiError> {
        let key = settings.api_key().ok_or(ApiError::NoKey)?;
        Self::new(key, Duration::from_secs(settings.request_timeout_secs))
    }

    async fn generate(&self, model: &str, prompt: &str) -> Result<String, ApiError> {
        let url = format!(
            "https://generativelanguage.googleapis.com/v1beta/models/{}:generateContent?key={}",
            model, self.auth_token
        );
        let req = GeminiRequest {
            contents: vec![GeminiContent {
                role: "user".to_string(),
                parts: vec![GeminiPart {
                    text: prompt.to_string(),
                }],
            }],
            generation_config: GenerationConfig {
                temperature: 0.3,
                max_output_tokens: 1000,
            },
        };

        let resp = self
            .http
            .post(url)
            .json(&req)
            .send()
            .await
            .map_err(|e| ApiError::Network(e.to_string()))?;

        let status = resp.status();
        if status.as_u16() == 429 {
            return Err(ApiError::RateLimited);
        }
        if !status.is_success() {
            let body = resp.text().await.unwrap_or_default();
            let body: String = body.trim().chars().take(400).collect();
            return Err(ApiError::Network(format!("gemini error: {} {}", status, body)));
        }

        let body: GeminiResponse = resp
            .json()
            .await
            .map_err(|_| ApiError::MalformedResponse)?;
        extract_text(&body)
    }
}

#[async_trait]
impl OnlineSimplify for GeminiClient {
    async fn simplify(&self, text: &str, language: Language) -> Result<String, ApiError> {
        let prompt = build_prompt(text, language);
        let mut last_err = None;

        for model in &self.models {
            match self.generate(model, &prompt).await {
                Ok(raw) => {
                    let cleaned = clean_response(&raw);
                    if cleaned.is_empty() {
                        last_err = Some(ApiError::MalformedResponse);
                        continue;
                    }
                    tracing::info!("simplified via {}", model);
                    return Ok(cleaned);
                }
                Err(e) => {
                    tracing::warn!("model {} failed: {}", model, e);
                    last_err = Some(e);
                }
            }
        }

        Err(last_err.unwrap_or(ApiError::MalformedResponse))
    }
}

fn extract_text(body: &GeminiResponse) -> Result<String, ApiError> {
    body.candidates
        .first()
        .and_then(|c| c.content.as_ref())
        .and_then(|c| c.parts.as_ref())
        .and_then(|p| p.first())
        .and_then(|p| p.text.clone())
        .filter(|t| !t.trim().is_empty())
        .ok_or(ApiError::MalformedResponse)
}

/// Strip wrapping quotes and any "Simplified:"-style prefix the model may add
/// despite the prompt's instructions.
pub fn clean_response(raw: &str) -> String {
    let mut result = raw.trim();

    for quote in ['"', '\''] {
        if result.len() >= 2 && result.starts_with(quote) && result.ends_with(quote) {
            result = &result[1..result.len() - 1];
        }
    }

    let mut result = result.trim().to_string();
    let prefixes = [
        "Simplified version:",
        "Simplified:",
        "آسان جملہ:",
        "سوکھا جملہ:",
        "Here is the simplified version:",
        "Here's the simplified text:",
    ];
    for prefix in prefixes {
        let matched = result
            .get(..prefix.len())
            .map(|head| head.eq_ignore_ascii_case(prefix))
            .unwrap_or(false);
        if matched {
            result = result[prefix.len()..].trim().to_string();
            break;
        }
    }

    result
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(json: &str) -> GeminiResponse {
        serde_json::from_str(json).unwrap()
    }

    #[test]
    fn test_extract_text_happy_path() {
        let body = parse(
            r#"{"candidates":[{"content":{"parts":[{"text":"Mausam acha hai"}]}}]}"#,
        );
        assert_eq!(extract_text(&body).unwrap(), "Mausam acha hai");
    }

    #[test]
    fn test_extract_text_missing_candidates() {
        let body = parse(r#"{"candidates":[]}"#);
        assert!(matches!(
            extract_text(&body),
            Err(ApiError::MalformedResponse)
        ));
    }

    #[test]
    fn test_extract_text_empty_text_field() {
        let body = parse(r#"{"candidates":[{"content":{"parts":[{"text":"  "}]}}]}"#);
        assert!(matches!(
            extract_text(&body),
            Err(ApiError::MalformedResponse)
        ));
    }

    #[test]
    fn test_clean_response_strips_quotes_and_prefix() {
        assert_eq!(clean_response("\"Mausam acha hai\""), "Mausam acha hai");
        assert_eq!(
            clean_response("Simplified: Mausam acha hai"),
            "Mausam acha hai"
        );
        assert_eq!(clean_response("  plain text  "), "plain text");
    }

    #[test]
    fn test_no_key_from_settings() {
        let settings = AppSettings::default();
        if std::env::var("GEMINI_API_KEY").is_err() {
            assert!(matches!(
                GeminiClient::from_settings(&settings),
                Err(ApiError::NoKey)
            ));
        }
    }
}
