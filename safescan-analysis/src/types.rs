//! Structured result types produced by the analysis model.
//!
//! These mirror the JSON contract the model is instructed to satisfy. The
//! payload is untrusted text, so the types stay permissive: the label keeps
//! a catch-all arm and the score is a plain integer that only the gauge
//! clamps.

use serde::{Deserialize, Serialize};

/// Categorical risk assessment, an independent axis from the trust score.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum RiskLabel {
    #[serde(rename = "Legitimate")]
    Legitimate,
    #[serde(rename = "Suspicious")]
    Suspicious,
    #[serde(rename = "High Risk (Scam/Phish)")]
    HighRisk,
    /// Anything else the model invents. Must not fail the decode, and
    /// matches neither the safe nor the high-risk label test.
    #[serde(untagged)]
    Other(String),
}

impl RiskLabel {
    /// Whether the model labeled the content as legitimate.
    pub fn is_legitimate(&self) -> bool {
        matches!(self, Self::Legitimate)
    }

    /// Whether the model labeled the content as a scam or phish.
    pub fn is_high_risk(&self) -> bool {
        matches!(self, Self::HighRisk)
    }

    /// The wire string for this label.
    pub fn as_str(&self) -> &str {
        match self {
            Self::Legitimate => "Legitimate",
            Self::Suspicious => "Suspicious",
            Self::HighRisk => "High Risk (Scam/Phish)",
            Self::Other(label) => label,
        }
    }
}

/// A complete risk assessment as returned by the model.
///
/// Produced entirely by the external service and never mutated locally.
/// All seven fields are required on the wire.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AnalysisResult {
    /// Categorical assessment; secondary to the numeric score.
    pub risk_label: RiskLabel,
    /// 0-100, higher is safer. The primary classifier.
    pub trust_score: i64,
    /// Free-text description of the assessment.
    pub summary: String,
    /// Specific suspicious signals found in the input (possibly empty).
    pub red_flags: Vec<String>,
    /// Literal quoted excerpts from the input supporting the assessment.
    pub evidence: Vec<String>,
    /// What the user should do next.
    pub recommended_action: Vec<String>,
    /// The model's self-reported certainty, 0.0-1.0.
    pub confidence: f64,
}
