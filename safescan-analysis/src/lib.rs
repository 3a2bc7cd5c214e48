//! SafeScan Analysis - the risk-assessment domain library.
//!
//! This crate provides:
//! - The structured result types the model is asked to produce
//! - The scoring rubric and machine-checkable response schema
//! - The `Analyzer` capability boundary with the Gemini implementation
//! - Defensive decoding of untrusted model output
//! - The presentation verdict (tier selection + report view)
//! - The trust-score gauge model
//!
//! ## Architecture
//!
//! ```text
//! text → Analyzer (one model call → defensive decode) → AnalysisResult
//!                                                          ↓
//!                                          ReportView + GaugeView
//! ```
//!
//! The verdict and the gauge classify independently: the verdict OR's the
//! categorical label with the score, the gauge looks at the score alone.
//! The two can disagree on the same result.

#![warn(clippy::all)]
#![allow(clippy::pedantic)]

pub mod analyzer;
pub mod gauge;
pub mod rubric;
pub mod types;
pub mod verdict;

pub use analyzer::{Analyzer, AnalyzerError, GeminiAnalyzer};
pub use gauge::{GaugeTier, GaugeView};
pub use types::{AnalysisResult, RiskLabel};
pub use verdict::{PresentationTier, ReportView};
