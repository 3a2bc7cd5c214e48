//! Trust-score gauge: a pure mapping from a 0-100 score to the semicircular
//! indicator's visual encoding.
//!
//! The gauge classifies on the score alone, ignoring the categorical label,
//! so it can disagree with [`crate::verdict::PresentationTier`] on the same
//! result. The card and the gauge each apply their own rule.

use serde::Serialize;
use std::f64::consts::PI;

/// Gauge radius in SVG units.
pub const RADIUS: f64 = 80.0;
/// Arc stroke width in SVG units.
pub const STROKE_WIDTH: f64 = 12.0;
/// Duration of the arc sweep animation. Cosmetic only.
pub const SWEEP_DURATION_MS: u64 = 1000;

/// Score-only tier of the gauge. Thresholds are evaluated on the raw input
/// score, not the clamped display score.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum GaugeTier {
    HighRisk,
    Caution,
    Safe,
}

impl GaugeTier {
    /// Classify a score: `< 50` high risk, `50..80` caution, `>= 80` safe.
    pub fn of(score: i64) -> Self {
        if score < 50 {
            Self::HighRisk
        } else if score < 80 {
            Self::Caution
        } else {
            Self::Safe
        }
    }

    /// Uppercase label shown under the gauge.
    pub fn label(&self) -> &'static str {
        match self {
            Self::HighRisk => "HIGH RISK",
            Self::Caution => "CAUTION",
            Self::Safe => "SAFE",
        }
    }

    /// Stroke color for the arc and score text.
    pub fn color(&self) -> &'static str {
        match self {
            Self::HighRisk => "#e11d48",
            Self::Caution => "#f59e0b",
            Self::Safe => "#10b981",
        }
    }
}

/// Everything the page needs to draw the gauge. Pure function of the score;
/// no network, no I/O.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct GaugeView {
    /// Display score, clamped to [0, 100].
    pub score: i64,
    /// Tier of the raw (unclamped) score.
    pub tier: GaugeTier,
    pub label: &'static str,
    pub color: &'static str,
    /// Length of the semicircular arc path.
    pub circumference: f64,
    /// Stroke dash offset for the filled portion of the arc.
    pub dash_offset: f64,
    pub sweep_ms: u64,
}

impl GaugeView {
    /// Build the gauge encoding for a score.
    pub fn of(score: i64) -> Self {
        let tier = GaugeTier::of(score);
        let clamped = score.clamp(0, 100);

        let inner_radius = RADIUS - STROKE_WIDTH / 2.0;
        let circumference = PI * inner_radius;
        let dash_offset = circumference - (clamped as f64 / 100.0) * circumference;

        Self {
            score: clamped,
            tier,
            label: tier.label(),
            color: tier.color(),
            circumference,
            dash_offset,
            sweep_ms: SWEEP_DURATION_MS,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_tier_boundaries() {
        assert_eq!(GaugeTier::of(0), GaugeTier::HighRisk);
        assert_eq!(GaugeTier::of(49), GaugeTier::HighRisk);
        assert_eq!(GaugeTier::of(50), GaugeTier::Caution);
        assert_eq!(GaugeTier::of(79), GaugeTier::Caution);
        assert_eq!(GaugeTier::of(80), GaugeTier::Safe);
        assert_eq!(GaugeTier::of(100), GaugeTier::Safe);
    }

    #[test]
    fn test_labels_and_colors() {
        assert_eq!(GaugeTier::HighRisk.label(), "HIGH RISK");
        assert_eq!(GaugeTier::Caution.label(), "CAUTION");
        assert_eq!(GaugeTier::Safe.label(), "SAFE");
        assert_ne!(GaugeTier::HighRisk.color(), GaugeTier::Safe.color());
    }

    #[test]
    fn test_display_score_is_clamped() {
        assert_eq!(GaugeView::of(150).score, 100);
        assert_eq!(GaugeView::of(-5).score, 0);
        assert_eq!(GaugeView::of(42).score, 42);
    }

    #[test]
    fn test_tier_uses_unclamped_score() {
        // Out-of-range scores still classify by the raw value.
        assert_eq!(GaugeView::of(150).tier, GaugeTier::Safe);
        assert_eq!(GaugeView::of(-5).tier, GaugeTier::HighRisk);
    }

    #[test]
    fn test_arc_geometry() {
        let expected = PI * (RADIUS - STROKE_WIDTH / 2.0);

        let empty = GaugeView::of(0);
        assert!((empty.circumference - expected).abs() < 1e-9);
        assert!((empty.dash_offset - expected).abs() < 1e-9);

        let full = GaugeView::of(100);
        assert!(full.dash_offset.abs() < 1e-9);

        let half = GaugeView::of(50);
        assert!((half.dash_offset - expected / 2.0).abs() < 1e-9);
    }
}
