//! Defensive decoding of model output.
//!
//! The response is untrusted text. Schema-constrained generation usually
//! returns a clean JSON object, but the model can still wrap it in prose or
//! code fences. Policy: strict decode first, then retry on the span from
//! the first `{` to the last `}`, then give up with a distinct error.

use crate::types::AnalysisResult;
use thiserror::Error;

/// Failure to obtain a structured result from a model payload.
#[derive(Debug, Error)]
pub enum DecodeError {
    #[error("No extractable structured result in model output")]
    NoStructuredResult,
}

/// Decode a model payload into an [`AnalysisResult`], tolerating
/// surrounding prose.
pub fn decode_result(payload: &str) -> Result<AnalysisResult, DecodeError> {
    match serde_json::from_str(payload) {
        Ok(result) => Ok(result),
        Err(err) => {
            tracing::warn!(error = %err, "Strict decode failed, attempting extraction");
            let span = object_span(payload).ok_or(DecodeError::NoStructuredResult)?;
            serde_json::from_str(span).map_err(|err| {
                tracing::warn!(error = %err, "Extracted span did not decode");
                DecodeError::NoStructuredResult
            })
        }
    }
}

/// The widest `{...}` span in the payload, if any.
fn object_span(raw: &str) -> Option<&str> {
    let start = raw.find('{')?;
    let end = raw.rfind('}')?;
    (start < end).then(|| &raw[start..=end])
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::RiskLabel;

    const CLEAN: &str = r#"{
        "risk_label": "Suspicious",
        "trust_score": 55,
        "summary": "Unverifiable sender.",
        "red_flags": ["Generic greeting"],
        "evidence": [],
        "recommended_action": ["Verify through official channels"],
        "confidence": 0.7
    }"#;

    #[test]
    fn test_clean_payload_decodes_strictly() {
        let result = decode_result(CLEAN).unwrap();
        assert_eq!(result.risk_label, RiskLabel::Suspicious);
        assert_eq!(result.trust_score, 55);
    }

    #[test]
    fn test_prose_wrapped_payload_recovers() {
        let wrapped = format!("Here is the assessment you asked for:\n{CLEAN}\nStay safe!");
        let result = decode_result(&wrapped).unwrap();
        assert_eq!(result.trust_score, 55);
    }

    #[test]
    fn test_code_fenced_payload_recovers() {
        let fenced = format!("```json\n{CLEAN}\n```");
        let result = decode_result(&fenced).unwrap();
        assert_eq!(result.risk_label, RiskLabel::Suspicious);
    }

    #[test]
    fn test_payload_without_object_span_fails() {
        let err = decode_result("the model refused to answer").unwrap_err();
        assert!(matches!(err, DecodeError::NoStructuredResult));
    }

    #[test]
    fn test_unbalanced_braces_fail() {
        let err = decode_result("so it goes }{").unwrap_err();
        assert!(matches!(err, DecodeError::NoStructuredResult));
    }

    #[test]
    fn test_span_with_invalid_json_fails() {
        let err = decode_result("prefix { not json at all } suffix").unwrap_err();
        assert!(matches!(err, DecodeError::NoStructuredResult));
    }

    #[test]
    fn test_empty_payload_fails() {
        assert!(decode_result("").is_err());
    }
}
