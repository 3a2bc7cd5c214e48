//! Single-slot analysis state owned by the web controller.
//!
//! The whole application holds at most one in-flight request and one
//! result-or-error at a time. One tagged union models that slot, so
//! impossible combinations (a result and an error at once) cannot be
//! represented even transiently. New submissions overwrite the slot;
//! nothing is queued and nothing survives a reset.

use safescan_analysis::AnalysisResult;
use serde::Serialize;
use tokio::sync::RwLock;

/// The controller's current position in the request lifecycle.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum AnalysisState {
    #[default]
    Idle,
    Loading {
        input: String,
    },
    Success {
        input: String,
        result: AnalysisResult,
    },
    Failure {
        input: String,
        message: String,
    },
}

impl AnalysisState {
    /// Whether a request is currently in flight.
    pub fn is_loading(&self) -> bool {
        matches!(self, Self::Loading { .. })
    }
}

/// The one mutable slot. All transitions happen under the write lock, so
/// readers never observe a partial result.
#[derive(Debug, Default)]
pub struct AnalysisSlot {
    inner: RwLock<AnalysisState>,
}

impl AnalysisSlot {
    /// Create an idle slot.
    pub fn new() -> Self {
        Self::default()
    }

    /// Try to start a new analysis. Returns `false` without any transition
    /// while a request is in flight; otherwise overwrites whatever the slot
    /// held (previous result or error included).
    pub async fn begin(&self, input: impl Into<String>) -> bool {
        let mut state = self.inner.write().await;
        if state.is_loading() {
            return false;
        }
        *state = AnalysisState::Loading {
            input: input.into(),
        };
        true
    }

    /// Resolve the in-flight request with a result. A no-op unless the slot
    /// is still loading (a reset may have cleared it in the meantime).
    pub async fn complete(&self, result: AnalysisResult) {
        let mut state = self.inner.write().await;
        if let AnalysisState::Loading { input } = &*state {
            *state = AnalysisState::Success {
                input: input.clone(),
                result,
            };
        }
    }

    /// Resolve the in-flight request with a failure message. Same guard as
    /// [`complete`](Self::complete).
    pub async fn fail(&self, message: impl Into<String>) {
        let mut state = self.inner.write().await;
        if let AnalysisState::Loading { input } = &*state {
            *state = AnalysisState::Failure {
                input: input.clone(),
                message: message.into(),
            };
        }
    }

    /// Discard input, result, and error in one transition.
    pub async fn reset(&self) {
        let mut state = self.inner.write().await;
        *state = AnalysisState::Idle;
    }

    /// A clone of the current state.
    pub async fn snapshot(&self) -> AnalysisState {
        self.inner.read().await.clone()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use safescan_analysis::RiskLabel;

    fn sample_result() -> AnalysisResult {
        AnalysisResult {
            risk_label: RiskLabel::Legitimate,
            trust_score: 92,
            summary: "Routine newsletter.".into(),
            red_flags: vec![],
            evidence: vec![],
            recommended_action: vec!["No action needed".into()],
            confidence: 0.8,
        }
    }

    #[tokio::test]
    async fn test_begin_transitions_to_loading() {
        let slot = AnalysisSlot::new();
        assert!(slot.begin("some text").await);
        assert!(slot.snapshot().await.is_loading());
    }

    #[tokio::test]
    async fn test_busy_slot_rejects_second_begin() {
        let slot = AnalysisSlot::new();
        assert!(slot.begin("first").await);
        assert!(!slot.begin("second").await);

        // The rejected submission changed nothing.
        match slot.snapshot().await {
            AnalysisState::Loading { input } => assert_eq!(input, "first"),
            other => panic!("unexpected state: {other:?}"),
        }
    }

    #[tokio::test]
    async fn test_new_request_overwrites_previous_result() {
        let slot = AnalysisSlot::new();
        slot.begin("first").await;
        slot.complete(sample_result()).await;

        assert!(slot.begin("second").await);
        assert!(slot.snapshot().await.is_loading());
    }

    #[tokio::test]
    async fn test_complete_and_fail_keep_the_input() {
        let slot = AnalysisSlot::new();
        slot.begin("suspicious text").await;
        slot.complete(sample_result()).await;
        match slot.snapshot().await {
            AnalysisState::Success { input, result } => {
                assert_eq!(input, "suspicious text");
                assert_eq!(result.trust_score, 92);
            }
            other => panic!("unexpected state: {other:?}"),
        }

        slot.begin("other text").await;
        slot.fail("Unable to analyze content.").await;
        match slot.snapshot().await {
            AnalysisState::Failure { input, message } => {
                assert_eq!(input, "other text");
                assert!(message.starts_with("Unable"));
            }
            other => panic!("unexpected state: {other:?}"),
        }
    }

    #[tokio::test]
    async fn test_reset_clears_everything_at_once() {
        let slot = AnalysisSlot::new();
        slot.begin("text").await;
        slot.fail("boom").await;

        slot.reset().await;
        assert_eq!(slot.snapshot().await, AnalysisState::Idle);
    }

    #[tokio::test]
    async fn test_resolution_after_reset_is_dropped() {
        // No cancellation exists, so a request may still resolve after the
        // slot was reset; the stale result must not resurrect.
        let slot = AnalysisSlot::new();
        slot.begin("text").await;
        slot.reset().await;

        slot.complete(sample_result()).await;
        assert_eq!(slot.snapshot().await, AnalysisState::Idle);
    }

    #[tokio::test]
    async fn test_state_serializes_tagged_by_status() {
        let slot = AnalysisSlot::new();
        slot.begin("text").await;
        slot.complete(sample_result()).await;

        let json = serde_json::to_value(slot.snapshot().await).unwrap();
        assert_eq!(json["status"], "success");
        assert_eq!(json["result"]["trust_score"], 92);
    }
}
