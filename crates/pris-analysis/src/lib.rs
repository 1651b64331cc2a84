//! Risk-evaluation and trend-decision pipeline for PRIS.
//!
//! Normalizes collected signal text, tags it against a risk-keyword list,
//! classifies each signal High/Low, aggregates batch statistics for the
//! daily ledger, and compares today's numbers against yesterday's to derive
//! a trend verdict and recommended action. Deliberately rule-based; there
//! is no language model or statistical scoring in this crate.

pub mod classify;
pub mod error;
pub mod normalize;
pub mod pipeline;
pub mod trend;

pub use classify::classify_tags;
pub use error::AnalysisError;
pub use normalize::clean_text;
pub use pipeline::{analyze_batch, keywords_for, BatchStats};
pub use trend::{evaluate_risk_trend, recommendation, TrendAssessment};
