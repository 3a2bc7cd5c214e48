//! Capability boundary for the external analysis model.
//!
//! An [`Analyzer`] is "a service that, given text, returns an object
//! satisfying the result schema, or fails". Presentation code only ever
//! sees this trait, so tests can substitute a scripted responder without
//! touching any rendering logic.

mod decode;
mod gemini;

pub use decode::{decode_result, DecodeError};
pub use gemini::GeminiAnalyzer;

use crate::types::AnalysisResult;
use async_trait::async_trait;

/// Unified interface for analysis backends.
#[async_trait]
pub trait Analyzer: Send + Sync {
    /// Get the backend name.
    fn name(&self) -> &str;

    /// Analyze one piece of text. Exactly one outbound call per invocation;
    /// no retries, no caching.
    async fn analyze(&self, text: &str) -> Result<AnalysisResult, AnalyzerError>;
}

/// Error from an analyzer backend.
///
/// Carries enough detail for diagnostics; callers collapse it to a single
/// generic user-facing message.
#[derive(Debug, Clone)]
pub struct AnalyzerError {
    pub provider: String,
    pub model: String,
    pub message: String,
    pub status_code: Option<u16>,
}

impl std::fmt::Display for AnalyzerError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "[{}:{}] {}", self.provider, self.model, self.message)
    }
}

impl std::error::Error for AnalyzerError {}
