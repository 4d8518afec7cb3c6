//! Vision module - AI-powered photo weight estimation
//!
//! The Remote Estimator is an external collaborator; this module owns the
//! request/response contract and the local validation of the response shape.
//! The actual HTTP call lives in `gemini`; tests use the `stub` backend.

pub mod gemini;
pub mod prompts;
pub mod stub;

pub use gemini::GeminiEstimator;

use crate::error::{Error, Result};
use crate::types::WeightEstimate;
use prompts::{KEY_ESTIMATED_WEIGHT_KG, KEY_REASONING};

/// Seam for the Remote Estimator collaborator.
///
/// One image in, one validated estimate out. Implementations must not retain
/// the payload.
pub trait WeightEstimator {
    fn estimate(&self, image_jpeg: &[u8]) -> Result<WeightEstimate>;
}

/// Parse and shape-check an estimator response body.
///
/// Accepts the raw candidate text (possibly wrapped in markdown code fences)
/// and returns a `WeightEstimate` only when `estimatedWeightKg` is a positive
/// finite number and `reasoning` is non-empty text. Everything else is
/// `MalformedAiResponse`; the raw response goes to the diagnostic log only.
pub fn parse_estimate(response: &str) -> Result<WeightEstimate> {
    let json_str = extract_json_from_response(response);

    let value: serde_json::Value = match serde_json::from_str(&json_str) {
        Ok(v) => v,
        Err(e) => {
            let truncated: String = response.chars().take(500).collect();
            tracing::debug!(raw = %truncated, "AI response is not JSON");
            return Err(Error::MalformedAiResponse(format!("not JSON: {}", e)));
        }
    };

    let weight = match value.get(KEY_ESTIMATED_WEIGHT_KG).and_then(|v| v.as_f64()) {
        Some(w) => w,
        None => {
            log_malformed(&value);
            return Err(Error::MalformedAiResponse(format!(
                "{} missing or not a number",
                KEY_ESTIMATED_WEIGHT_KG
            )));
        }
    };
    if !weight.is_finite() || weight <= 0.0 {
        log_malformed(&value);
        return Err(Error::MalformedAiResponse(format!(
            "{} must be a positive number, got {}",
            KEY_ESTIMATED_WEIGHT_KG, weight
        )));
    }

    let reasoning = match value.get(KEY_REASONING).and_then(|v| v.as_str()) {
        Some(r) if !r.trim().is_empty() => r.to_string(),
        _ => {
            log_malformed(&value);
            return Err(Error::MalformedAiResponse(format!(
                "{} missing or empty",
                KEY_REASONING
            )));
        }
    };

    Ok(WeightEstimate {
        estimated_weight_kg: weight,
        reasoning,
    })
}

fn log_malformed(value: &serde_json::Value) {
    // Raw model output is diagnostic-only; it never reaches the user.
    tracing::debug!(raw = %value, "AI response failed shape check");
}

/// Extract JSON from a response (handles markdown code blocks)
pub fn extract_json_from_response(response: &str) -> String {
    let response = response.trim();

    // Check for markdown code block
    if response.starts_with("```json") {
        if let Some(end) = response.rfind("```") {
            let start = response.find('\n').unwrap_or(7) + 1;
            if start < end {
                return response[start..end].trim().to_string();
            }
        }
    }

    // Check for generic code block
    if response.starts_with("```") {
        if let Some(end) = response.rfind("```") {
            let start = response.find('\n').unwrap_or(3) + 1;
            if start < end {
                return response[start..end].trim().to_string();
            }
        }
    }

    // Try to find JSON object directly
    if let Some(start) = response.find('{') {
        if let Some(end) = response.rfind('}') {
            if start < end {
                return response[start..=end].to_string();
            }
        }
    }

    response.to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_extract_json_markdown() {
        let response = "```json\n{\"test\": 123}\n```";
        assert_eq!(extract_json_from_response(response), "{\"test\": 123}");
    }

    #[test]
    fn test_extract_json_plain() {
        let response = "{\"test\": 123}";
        assert_eq!(extract_json_from_response(response), "{\"test\": 123}");
    }

    #[test]
    fn test_extract_json_with_text() {
        let response = "Here is the result: {\"test\": 123} end";
        assert_eq!(extract_json_from_response(response), "{\"test\": 123}");
    }

    #[test]
    fn test_parse_valid_estimate() {
        let response = r#"{"estimatedWeightKg": 42.5, "reasoning": "Cabra adulta de porte médio."}"#;
        let estimate = parse_estimate(response).unwrap();
        assert_eq!(estimate.estimated_weight_kg, 42.5);
        assert_eq!(estimate.reasoning, "Cabra adulta de porte médio.");
    }

    #[test]
    fn test_parse_fenced_estimate() {
        let response = "```json\n{\"estimatedWeightKg\": 38.0, \"reasoning\": \"ok\"}\n```";
        let estimate = parse_estimate(response).unwrap();
        assert_eq!(estimate.estimated_weight_kg, 38.0);
    }

    #[test]
    fn test_missing_reasoning_is_malformed() {
        let response = r#"{"estimatedWeightKg": 42.5}"#;
        assert!(matches!(
            parse_estimate(response),
            Err(Error::MalformedAiResponse(_))
        ));
    }

    #[test]
    fn test_empty_reasoning_is_malformed() {
        let response = r#"{"estimatedWeightKg": 42.5, "reasoning": "  "}"#;
        assert!(matches!(
            parse_estimate(response),
            Err(Error::MalformedAiResponse(_))
        ));
    }

    #[test]
    fn test_non_numeric_weight_is_malformed() {
        let response = r#"{"estimatedWeightKg": "heavy", "reasoning": "..."}"#;
        assert!(matches!(
            parse_estimate(response),
            Err(Error::MalformedAiResponse(_))
        ));
    }

    #[test]
    fn test_non_positive_weight_is_malformed() {
        for bad in ["0", "-3.2"] {
            let response = format!(r#"{{"estimatedWeightKg": {}, "reasoning": "x"}}"#, bad);
            assert!(
                matches!(parse_estimate(&response), Err(Error::MalformedAiResponse(_))),
                "accepted weight {}",
                bad
            );
        }
    }

    #[test]
    fn test_non_json_is_malformed() {
        assert!(matches!(
            parse_estimate("I cannot analyze this image."),
            Err(Error::MalformedAiResponse(_))
        ));
    }
}
