use crate::GenerativeModel;
use crate::config::ModelConfig;
use crate::error::{ModelError, Result};
use async_trait::async_trait;
use log::{debug, warn};
use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Client for the Gemini `generateContent` endpoint
pub struct GeminiClient {
    config: ModelConfig,
    api_key: Option<String>,
    http: reqwest::Client,
}

impl std::fmt::Debug for GeminiClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("GeminiClient")
            .field("model", &self.config.model)
            .field("base_url", &self.config.base_url)
            .field("has_api_key", &self.api_key.is_some())
            .finish()
    }
}

impl GeminiClient {
    /// Create a client with an explicit API key (`None` leaves it unavailable)
    pub fn new(config: ModelConfig, api_key: Option<String>) -> Result<Self> {
        config.validate().map_err(ModelError::NotConfigured)?;

        let http = reqwest::Client::builder()
            .timeout(Duration::from_secs(config.request_timeout_secs))
            .build()?;

        Ok(Self {
            config,
            api_key: api_key.filter(|key| !key.trim().is_empty()),
            http,
        })
    }

    /// Create a client reading the API key from `config.api_key_env`
    pub fn from_env(config: ModelConfig) -> Result<Self> {
        let api_key = config.api_key_from_env();
        if api_key.is_none() {
            warn!(
                "{} is not set; generative model calls are disabled",
                config.api_key_env
            );
        }
        Self::new(config, api_key)
    }

    fn endpoint(&self) -> String {
        format!(
            "{}/v1beta/models/{}:generateContent",
            self.config.base_url.trim_end_matches('/'),
            self.config.model
        )
    }

    pub fn config(&self) -> &ModelConfig {
        &self.config
    }
}

#[async_trait]
impl GenerativeModel for GeminiClient {
    fn name(&self) -> &str {
        &self.config.model
    }

    fn is_available(&self) -> bool {
        self.api_key.is_some()
    }

    async fn generate(&self, prompt: &str, max_output_tokens: u32) -> Result<Option<String>> {
        let Some(api_key) = &self.api_key else {
            return Err(ModelError::NotConfigured(format!(
                "{} is not set",
                self.config.api_key_env
            )));
        };

        let body = GenerateContentRequest {
            contents: vec![Content {
                parts: vec![Part {
                    text: prompt.to_string(),
                }],
            }],
            generation_config: GenerationConfig { max_output_tokens },
        };

        debug!(
            "Calling {} (prompt {} chars, max {} tokens)",
            self.config.model,
            prompt.chars().count(),
            max_output_tokens
        );

        let response = self
            .http
            .post(self.endpoint())
            .header("x-goog-api-key", api_key)
            .json(&body)
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let text = response.text().await.unwrap_or_default();
            let message = serde_json::from_str::<ErrorEnvelope>(&text)
                .map(|envelope| envelope.error.message)
                .unwrap_or(text);
            return Err(ModelError::Api {
                status: status.as_u16(),
                message,
            });
        }

        let parsed: GenerateContentResponse = response.json().await?;
        Ok(parsed.text())
    }
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct GenerateContentRequest {
    contents: Vec<Content>,
    generation_config: GenerationConfig,
}

#[derive(Debug, Serialize, Deserialize, Default)]
struct Content {
    #[serde(default)]
    parts: Vec<Part>,
}

#[derive(Debug, Serialize, Deserialize)]
struct Part {
    #[serde(default)]
    text: String,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct GenerationConfig {
    max_output_tokens: u32,
}

#[derive(Debug, Deserialize)]
struct GenerateContentResponse {
    #[serde(default)]
    candidates: Vec<Candidate>,
}

#[derive(Debug, Deserialize)]
struct Candidate {
    #[serde(default)]
    content: Content,
}

impl GenerateContentResponse {
    /// Concatenated text parts of the first candidate, `None` when empty
    fn text(&self) -> Option<String> {
        let candidate = self.candidates.first()?;
        let text: String = candidate
            .content
            .parts
            .iter()
            .map(|part| part.text.as_str())
            .collect();
        if text.is_empty() { None } else { Some(text) }
    }
}

#[derive(Debug, Deserialize)]
struct ErrorEnvelope {
    error: ErrorBody,
}

#[derive(Debug, Deserialize)]
struct ErrorBody {
    message: String,
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_request_serialization() {
        let body = GenerateContentRequest {
            contents: vec![Content {
                parts: vec![Part {
                    text: "Soru".to_string(),
                }],
            }],
            generation_config: GenerationConfig {
                max_output_tokens: 200,
            },
        };
        let json = serde_json::to_value(&body).unwrap();
        assert_eq!(
            json,
            serde_json::json!({
                "contents": [{"parts": [{"text": "Soru"}]}],
                "generationConfig": {"maxOutputTokens": 200}
            })
        );
    }

    #[test]
    fn test_response_text_joins_parts() {
        let response: GenerateContentResponse = serde_json::from_value(serde_json::json!({
            "candidates": [{
                "content": {"parts": [{"text": "Yandal "}, {"text": "programı"}], "role": "model"},
                "finishReason": "STOP"
            }]
        }))
        .unwrap();
        assert_eq!(response.text(), Some("Yandal programı".to_string()));
    }

    #[test]
    fn test_response_without_text() {
        let empty: GenerateContentResponse =
            serde_json::from_value(serde_json::json!({"candidates": []})).unwrap();
        assert_eq!(empty.text(), None);

        let blocked: GenerateContentResponse = serde_json::from_value(serde_json::json!({
            "candidates": [{"finishReason": "SAFETY"}]
        }))
        .unwrap();
        assert_eq!(blocked.text(), None);
    }

    #[test]
    fn test_client_without_key_is_unavailable() {
        let client = GeminiClient::new(ModelConfig::default(), Some("   ".to_string())).unwrap();
        assert!(!client.is_available());
        assert_eq!(client.name(), "gemini-2.5-flash");
    }

    #[test]
    fn test_endpoint_trims_trailing_slash() {
        let config = ModelConfig {
            base_url: "http://localhost:8080/".to_string(),
            ..Default::default()
        };
        let client = GeminiClient::new(config, None).unwrap();
        assert_eq!(
            client.endpoint(),
            "http://localhost:8080/v1beta/models/gemini-2.5-flash:generateContent"
        );
    }
}
