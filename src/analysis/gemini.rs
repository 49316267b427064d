//! Google Gemini `generateContent` client.

use reqwest::Client;
use serde::{Deserialize, Serialize};

use super::{boxed, AnalysisClient, BoxedFuture, ImagePayload, ANALYSIS_PROMPT};
use crate::config::{AnalysisConfig, API_KEY_VAR};
use crate::error::{AnalysisError, AnalysisResult};

/// Gemini API request format
#[derive(Debug, Serialize)]
pub struct GeminiRequest {
    contents: Vec<GeminiContent>,
}

#[derive(Debug, Serialize)]
struct GeminiContent {
    parts: Vec<GeminiPart>,
}

#[derive(Debug, Serialize)]
#[serde(untagged)]
enum GeminiPart {
    InlineData { inline_data: GeminiBlob },
    Text { text: String },
}

#[derive(Debug, Serialize)]
struct GeminiBlob {
    mime_type: String,
    data: String,
}

/// Gemini API response format
#[derive(Debug, Default, Deserialize)]
pub struct GeminiResponse {
    #[serde(default)]
    candidates: Vec<GeminiCandidate>,
    #[serde(default, rename = "promptFeedback")]
    prompt_feedback: Option<GeminiPromptFeedback>,
}

#[derive(Debug, Deserialize)]
struct GeminiCandidate {
    #[serde(default)]
    content: Option<GeminiResponseContent>,
    #[serde(default, rename = "finishReason")]
    finish_reason: Option<String>,
}

#[derive(Debug, Deserialize)]
struct GeminiResponseContent {
    #[serde(default)]
    parts: Vec<GeminiResponsePart>,
}

#[derive(Debug, Deserialize)]
struct GeminiResponsePart {
    #[serde(default)]
    text: Option<String>,
}

#[derive(Debug, Deserialize)]
struct GeminiPromptFeedback {
    #[serde(default, rename = "blockReason")]
    block_reason: Option<String>,
}

/// Error body returned with non-2xx statuses
#[derive(Debug, Deserialize)]
struct GeminiErrorBody {
    error: GeminiErrorDetail,
}

#[derive(Debug, Deserialize)]
struct GeminiErrorDetail {
    message: String,
}

impl GeminiRequest {
    /// One inline PNG followed by the fixed instruction
    pub fn for_image(image: ImagePayload) -> Self {
        let mime_type = image.mime_type().to_owned();
        Self {
            contents: vec![GeminiContent {
                parts: vec![
                    GeminiPart::InlineData {
                        inline_data: GeminiBlob {
                            mime_type,
                            data: image.into_data(),
                        },
                    },
                    GeminiPart::Text {
                        text: ANALYSIS_PROMPT.to_owned(),
                    },
                ],
            }],
        }
    }
}

impl GeminiResponse {
    /// Text of the first candidate, its parts concatenated.
    ///
    /// # Errors
    ///
    /// Returns `AnalysisError::AnalysisFailed` when the prompt was blocked or
    /// the candidate carries no text.
    pub fn into_text(self) -> AnalysisResult<String> {
        if let Some(reason) = self.prompt_feedback.and_then(|f| f.block_reason) {
            return Err(AnalysisError::AnalysisFailed(format!(
                "Response was blocked due to {}",
                reason
            )));
        }

        let candidate = self
            .candidates
            .into_iter()
            .next()
            .ok_or_else(|| AnalysisError::AnalysisFailed("No candidates returned".to_owned()))?;

        let text: String = candidate
            .content
            .map(|content| content.parts.into_iter().filter_map(|p| p.text).collect())
            .unwrap_or_default();

        if text.is_empty() {
            let reason = candidate.finish_reason.unwrap_or_else(|| "UNKNOWN".to_owned());
            return Err(AnalysisError::AnalysisFailed(format!(
                "Text not available. Finish reason: {}",
                reason
            )));
        }
        Ok(text)
    }
}

/// Gemini API client
#[derive(Debug, Clone)]
pub struct GeminiClient {
    config: AnalysisConfig,
    client: Client,
}

impl GeminiClient {
    pub fn new(config: AnalysisConfig) -> Self {
        if !config.has_api_key() {
            log::warn!("{} is not set; analysis requests will fail", API_KEY_VAR);
        }
        Self {
            config,
            client: Client::new(),
        }
    }

    fn url(&self, api_key: &str) -> String {
        format!(
            "{}/{}:generateContent?key={}",
            self.config.endpoint, self.config.model, api_key
        )
    }
}

impl AnalysisClient for GeminiClient {
    fn analyze(&self, image: ImagePayload) -> BoxedFuture<AnalysisResult<String>> {
        let client = self.client.clone();
        let model = self.config.model.clone();
        let api_key = self.config.api_key.clone();
        let url = api_key.as_deref().map(|key| self.url(key));

        boxed(async move {
            let Some(url) = url else {
                return Err(AnalysisError::AnalysisFailed(format!("{} is not set", API_KEY_VAR)));
            };
            log::info!("Sending request to Gemini API ({})...", model);

            let result = send(&client, &url, GeminiRequest::for_image(image)).await;
            match &result {
                Ok(text) => log::info!("Received response from Gemini API ({} chars)", text.len()),
                Err(err) => log::error!("Gemini request failed: {}", err),
            }
            result
        })
    }
}

async fn send(client: &Client, url: &str, request: GeminiRequest) -> AnalysisResult<String> {
    let response = client.post(url).json(&request).send().await?;

    let status = response.status();
    if !status.is_success() {
        let body = response.text().await.unwrap_or_default();
        return Err(AnalysisError::AnalysisFailed(error_message(status, &body)));
    }

    let body: GeminiResponse = response.json().await?;
    body.into_text()
}

/// Prefers the provider's own message over the bare status line.
fn error_message(status: reqwest::StatusCode, body: &str) -> String {
    match serde_json::from_str::<GeminiErrorBody>(body) {
        Ok(parsed) => format!("[{}] {}", status.as_u16(), parsed.error.message),
        Err(_) => status.to_string(),
    }
}
