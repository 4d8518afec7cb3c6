//! Gemini backend for the Remote Estimator
//!
//! One image plus the fixed instruction go out as a `generateContent` call;
//! the structured JSON answer comes back through `parse_estimate`. The
//! transport is synchronous (ureq); callers that must not block run the call
//! on a worker thread.

use crate::config::Config;
use crate::error::{Error, Result};
use crate::types::WeightEstimate;
use crate::vision::prompts::{build_estimation_prompt, build_response_schema};
use crate::vision::{parse_estimate, WeightEstimator};
use base64::engine::general_purpose::STANDARD as BASE64;
use base64::Engine;
use serde::Deserialize;
use serde_json::json;

const API_BASE: &str = "https://generativelanguage.googleapis.com/v1beta/models";
const CALL_TIMEOUT_SECS: u64 = 60;

/// Remote estimator backed by the Gemini `generateContent` endpoint
pub struct GeminiEstimator {
    api_key: String,
    model: String,
}

#[derive(Debug, Deserialize)]
struct GenerateContentResponse {
    #[serde(default)]
    candidates: Vec<Candidate>,
}

#[derive(Debug, Deserialize)]
struct Candidate {
    #[serde(default)]
    content: Option<CandidateContent>,
}

#[derive(Debug, Deserialize)]
struct CandidateContent {
    #[serde(default)]
    parts: Vec<CandidatePart>,
}

#[derive(Debug, Deserialize)]
struct CandidatePart {
    #[serde(default)]
    text: Option<String>,
}

impl GeminiEstimator {
    pub fn new(api_key: String, model: String) -> Self {
        Self { api_key, model }
    }

    /// Build an estimator from configuration; fails with `MissingApiKey`
    /// when no credential can be resolved.
    pub fn from_config(config: &Config) -> Result<Self> {
        let api_key = config.resolve_api_key()?;
        Ok(Self::new(api_key, config.model().to_string()))
    }

    fn endpoint(&self) -> String {
        format!("{}/{}:generateContent", API_BASE, self.model)
    }

    fn build_request_body(&self, image: &[u8]) -> serde_json::Value {
        json!({
            "contents": [{
                "parts": [
                    {
                        "inlineData": {
                            "mimeType": detect_mime(image),
                            "data": BASE64.encode(image),
                        }
                    },
                    { "text": build_estimation_prompt() },
                ]
            }],
            "generationConfig": {
                "responseMimeType": "application/json",
                "responseSchema": build_response_schema(),
            }
        })
    }
}

impl WeightEstimator for GeminiEstimator {
    fn estimate(&self, image_jpeg: &[u8]) -> Result<WeightEstimate> {
        let body = self.build_request_body(image_jpeg);

        tracing::debug!(model = %self.model, bytes = image_jpeg.len(), "calling remote estimator");

        let response = ureq::post(&self.endpoint())
            .set("x-goog-api-key", &self.api_key)
            .timeout(std::time::Duration::from_secs(CALL_TIMEOUT_SECS))
            .send_json(body)
            .map_err(|e| match e {
                ureq::Error::Status(code, resp) => {
                    let detail = resp.into_string().unwrap_or_default();
                    let truncated: String = detail.chars().take(500).collect();
                    tracing::debug!(code, body = %truncated, "estimator HTTP error");
                    Error::AiTransport(format!("HTTP {}", code))
                }
                other => Error::AiTransport(other.to_string()),
            })?;

        let parsed: GenerateContentResponse = response
            .into_json()
            .map_err(|e| Error::AiTransport(format!("unreadable response: {}", e)))?;

        let text = parsed
            .candidates
            .into_iter()
            .next()
            .and_then(|c| c.content)
            .and_then(|c| c.parts.into_iter().find_map(|p| p.text))
            .ok_or_else(|| {
                Error::MalformedAiResponse("response carried no candidate text".to_string())
            })?;

        parse_estimate(&text)
    }
}

/// Best-effort mime detection for the inline payload; captured frames are
/// JPEG, file input may be anything the image crate recognizes.
fn detect_mime(image: &[u8]) -> &'static str {
    match image::guess_format(image) {
        Ok(image::ImageFormat::Png) => "image/png",
        Ok(image::ImageFormat::WebP) => "image/webp",
        Ok(image::ImageFormat::Gif) => "image/gif",
        Ok(image::ImageFormat::Bmp) => "image/bmp",
        _ => "image/jpeg",
    }
}
