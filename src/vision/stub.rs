//! Stub estimator for tests and offline development

use crate::error::{Error, Result};
use crate::types::WeightEstimate;
use crate::vision::WeightEstimator;
use std::sync::atomic::{AtomicUsize, Ordering};

/// Scripted estimator: returns a fixed estimate or a fixed failure and counts
/// invocations. Never touches the network.
pub struct StubEstimator {
    outcome: StubOutcome,
    calls: AtomicUsize,
}

enum StubOutcome {
    Estimate(WeightEstimate),
    Malformed(String),
    Transport(String),
}

impl StubEstimator {
    pub fn returning(weight_kg: f64, reasoning: &str) -> Self {
        Self {
            outcome: StubOutcome::Estimate(WeightEstimate {
                estimated_weight_kg: weight_kg,
                reasoning: reasoning.to_string(),
            }),
            calls: AtomicUsize::new(0),
        }
    }

    pub fn failing_malformed(detail: &str) -> Self {
        Self {
            outcome: StubOutcome::Malformed(detail.to_string()),
            calls: AtomicUsize::new(0),
        }
    }

    pub fn failing_transport(detail: &str) -> Self {
        Self {
            outcome: StubOutcome::Transport(detail.to_string()),
            calls: AtomicUsize::new(0),
        }
    }

    pub fn call_count(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

impl WeightEstimator for StubEstimator {
    fn estimate(&self, _image_jpeg: &[u8]) -> Result<WeightEstimate> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        match &self.outcome {
            StubOutcome::Estimate(estimate) => Ok(estimate.clone()),
            StubOutcome::Malformed(detail) => Err(Error::MalformedAiResponse(detail.clone())),
            StubOutcome::Transport(detail) => Err(Error::AiTransport(detail.clone())),
        }
    }
}
