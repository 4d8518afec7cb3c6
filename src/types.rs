//! Core types for weight estimation

use serde::{Deserialize, Serialize};

/// AI weight estimate for a goat/sheep photo.
///
/// Produced only by a successful Remote Estimator call and never mutated
/// afterwards. Wire names follow the service contract.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WeightEstimate {
    /// Estimated live weight in kilograms
    pub estimated_weight_kg: f64,
    /// AI justification for the estimate
    pub reasoning: String,
}

/// Terminal state of one photo-analysis attempt.
///
/// Replaced wholesale on each new attempt; no history is kept. The `Error`
/// payload is the user-facing message, not the raw failure.
#[derive(Debug, Clone, PartialEq)]
pub enum CaptureOutcome {
    Success(WeightEstimate),
    Error(String),
}

/// Estimation method, for report output
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum EstimationMethod {
    /// AI photo analysis
    Photo,
    /// Chest-girth formula
    Girth,
}

impl EstimationMethod {
    pub fn label(&self) -> &'static str {
        match self {
            EstimationMethod::Photo => "análise com IA",
            EstimationMethod::Girth => "medida manual (CT)",
        }
    }
}

/// One estimation result with metadata, as printed by the CLI
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct EstimateReport {
    pub method: EstimationMethod,
    pub estimated_weight_kg: f64,
    /// AI justification (photo method only)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub reasoning: Option<String>,
    /// Chest girth in centimeters (girth method only)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub girth_cm: Option<f64>,
    pub estimated_at: chrono::DateTime<chrono::Utc>,
}

impl EstimateReport {
    pub fn from_photo(estimate: WeightEstimate) -> Self {
        Self {
            method: EstimationMethod::Photo,
            estimated_weight_kg: estimate.estimated_weight_kg,
            reasoning: Some(estimate.reasoning),
            girth_cm: None,
            estimated_at: chrono::Utc::now(),
        }
    }

    pub fn from_girth(girth_cm: f64, weight_kg: f64) -> Self {
        Self {
            method: EstimationMethod::Girth,
            estimated_weight_kg: weight_kg,
            reasoning: None,
            girth_cm: Some(girth_cm),
            estimated_at: chrono::Utc::now(),
        }
    }
}
