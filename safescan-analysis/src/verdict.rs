//! Presentation verdict: maps an `AnalysisResult` onto the rendered report.
//!
//! Tier selection OR's the categorical label with the numeric score, and the
//! safe check runs before the high-risk check: a "Legitimate"-labeled result
//! scored 30 renders Safe because the safe check wins, and a score-85 result
//! labeled high risk still renders High Risk by label alone. This is a
//! different rule from [`crate::gauge::GaugeTier::of`], which ignores the
//! label; the two can disagree on the same result.

use crate::types::AnalysisResult;
use serde::Serialize;

/// Affirmation shown in place of an empty red-flag list.
pub const NO_RED_FLAGS_TEXT: &str = "No specific red flags detected.";

/// Three-tier visual classification of a result.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum PresentationTier {
    Safe,
    Caution,
    HighRisk,
}

impl PresentationTier {
    /// Classify a result. Evaluation order matters; see the module docs.
    pub fn of(result: &AnalysisResult) -> Self {
        if result.risk_label.is_legitimate() || result.trust_score >= 80 {
            Self::Safe
        } else if result.risk_label.is_high_risk() || result.trust_score < 50 {
            Self::HighRisk
        } else {
            Self::Caution
        }
    }
}

/// Renderable view of a result: every field the page displays, with the
/// display rules already applied.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ReportView {
    /// Visual tier for the card frame.
    pub tier: PresentationTier,
    pub summary: String,
    /// Red-flag badges. Empty when `no_red_flags_text` is set.
    pub red_flags: Vec<String>,
    /// Affirmation line shown instead of badges when no flags were found.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub no_red_flags_text: Option<String>,
    /// Evidence quotes, each trimmed of one surrounding quotation mark.
    /// `None` means the section is omitted entirely, not rendered empty.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub evidence: Option<Vec<String>>,
    /// Numbered by the renderer in order.
    pub recommended_actions: Vec<String>,
    /// `confidence` as a rounded percentage.
    pub confidence_pct: u8,
}

impl ReportView {
    /// Build the view for a result.
    pub fn of(result: &AnalysisResult) -> Self {
        let no_red_flags_text = result
            .red_flags
            .is_empty()
            .then(|| NO_RED_FLAGS_TEXT.to_string());

        let evidence = if result.evidence.is_empty() {
            None
        } else {
            Some(result.evidence.iter().map(|q| trim_quote(q)).collect())
        };

        Self {
            tier: PresentationTier::of(result),
            summary: result.summary.clone(),
            red_flags: result.red_flags.clone(),
            no_red_flags_text,
            evidence,
            recommended_actions: result.recommended_action.clone(),
            confidence_pct: (result.confidence * 100.0).round() as u8,
        }
    }
}

const QUOTE_MARKS: &[char] = &['"', '\''];

/// Strip one leading and one trailing quotation mark, if present. The page
/// adds its own quotes around evidence excerpts.
fn trim_quote(quote: &str) -> String {
    let trimmed = quote.strip_prefix(QUOTE_MARKS).unwrap_or(quote);
    let trimmed = trimmed.strip_suffix(QUOTE_MARKS).unwrap_or(trimmed);
    trimmed.to_string()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::RiskLabel;

    fn result(label: RiskLabel, score: i64) -> AnalysisResult {
        AnalysisResult {
            risk_label: label,
            trust_score: score,
            summary: "summary".into(),
            red_flags: vec![],
            evidence: vec![],
            recommended_action: vec!["Verify with the sender".into()],
            confidence: 0.9,
        }
    }

    #[test]
    fn test_legitimate_label_wins_regardless_of_score() {
        let tier = PresentationTier::of(&result(RiskLabel::Legitimate, 10));
        assert_eq!(tier, PresentationTier::Safe);
    }

    #[test]
    fn test_high_score_is_safe_regardless_of_label() {
        let tier = PresentationTier::of(&result(RiskLabel::Suspicious, 85));
        assert_eq!(tier, PresentationTier::Safe);
    }

    #[test]
    fn test_safe_check_runs_before_high_risk_check() {
        // Both the legitimate label and the dangerous score apply; the safe
        // check is evaluated first, so the label wins.
        let tier = PresentationTier::of(&result(RiskLabel::Legitimate, 30));
        assert_eq!(tier, PresentationTier::Safe);
    }

    #[test]
    fn test_low_score_is_high_risk() {
        let tier = PresentationTier::of(&result(RiskLabel::Suspicious, 45));
        assert_eq!(tier, PresentationTier::HighRisk);
    }

    #[test]
    fn test_high_risk_label_beats_high_score_when_not_safe() {
        // Score 79 is below the safe band, so the label test applies.
        let tier = PresentationTier::of(&result(RiskLabel::HighRisk, 79));
        assert_eq!(tier, PresentationTier::HighRisk);
    }

    #[test]
    fn test_residual_band_is_caution() {
        let tier = PresentationTier::of(&result(RiskLabel::Suspicious, 65));
        assert_eq!(tier, PresentationTier::Caution);
        let tier = PresentationTier::of(&result(RiskLabel::Other("Odd".into()), 65));
        assert_eq!(tier, PresentationTier::Caution);
    }

    #[test]
    fn test_empty_red_flags_renders_affirmation() {
        let view = ReportView::of(&result(RiskLabel::Legitimate, 95));
        assert!(view.red_flags.is_empty());
        assert_eq!(view.no_red_flags_text.as_deref(), Some(NO_RED_FLAGS_TEXT));
    }

    #[test]
    fn test_red_flags_suppress_affirmation() {
        let mut r = result(RiskLabel::Suspicious, 55);
        r.red_flags = vec!["Urgency pressure".into()];
        let view = ReportView::of(&r);
        assert_eq!(view.red_flags.len(), 1);
        assert!(view.no_red_flags_text.is_none());
    }

    #[test]
    fn test_empty_evidence_omits_section() {
        let view = ReportView::of(&result(RiskLabel::Legitimate, 95));
        assert!(view.evidence.is_none());

        let json = serde_json::to_value(&view).unwrap();
        assert!(json.get("evidence").is_none());
    }

    #[test]
    fn test_evidence_quotes_are_trimmed_once() {
        let mut r = result(RiskLabel::HighRisk, 20);
        r.evidence = vec![
            "\"act now\"".into(),
            "'final notice'".into(),
            "no quotes".into(),
            "\"\"double\"\"".into(),
        ];
        let view = ReportView::of(&r);
        let evidence = view.evidence.unwrap();
        assert_eq!(evidence[0], "act now");
        assert_eq!(evidence[1], "final notice");
        assert_eq!(evidence[2], "no quotes");
        // Only one mark is stripped from each side.
        assert_eq!(evidence[3], "\"double\"");
    }

    #[test]
    fn test_confidence_rounds_to_percentage() {
        let mut r = result(RiskLabel::Legitimate, 95);
        r.confidence = 0.845;
        assert_eq!(ReportView::of(&r).confidence_pct, 85);
        r.confidence = 0.844;
        assert_eq!(ReportView::of(&r).confidence_pct, 84);
        r.confidence = 1.0;
        assert_eq!(ReportView::of(&r).confidence_pct, 100);
        r.confidence = 0.0;
        assert_eq!(ReportView::of(&r).confidence_pct, 0);
    }
}
