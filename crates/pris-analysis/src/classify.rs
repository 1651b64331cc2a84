//! Presence-based risk classification.

use pris_core::RiskLevel;

/// Map a tag result to a risk level: any matched keyword is `High`,
/// otherwise `Low`. No weighting — one low-severity match is treated the
/// same as several severe ones.
#[must_use]
pub fn classify_tags(tags: &[String]) -> RiskLevel {
    if tags.is_empty() {
        RiskLevel::Low
    } else {
        RiskLevel::High
    }
}
