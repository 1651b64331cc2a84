//! Outbound alerting for high-risk batches.
//!
//! The delivery channel is simulated: the notifier emits a human-readable
//! console block and structured log lines, and reports success
//! unconditionally. A real SMS/email gateway would slot in behind
//! [`check_for_alerts`] without changing its contract.

use pris_core::{AnalyzedSignal, RiskLevel};
use serde::Serialize;

/// Number of (source, tags) pairs included in a notification.
const MAX_CONCERNS: usize = 3;

/// One entry in the notification body.
#[derive(Debug, Clone, Serialize)]
pub struct AlertConcern {
    pub source: String,
    pub rumor_tags: String,
}

/// Result of evaluating a batch for alerting.
#[derive(Debug, Clone, Serialize)]
pub struct AlertOutcome {
    /// Whether a notification was emitted (any High-risk signal present).
    pub sent: bool,
    pub high_risk_count: usize,
    /// Up to the first three high-risk (source, tags) pairs.
    pub top_concerns: Vec<AlertConcern>,
}

/// Evaluate a batch and emit a notification when at least one High-risk
/// signal is present.
#[must_use]
pub fn check_for_alerts(batch: &[AnalyzedSignal]) -> AlertOutcome {
    let high_risk: Vec<&AnalyzedSignal> = batch
        .iter()
        .filter(|s| s.risk_level == RiskLevel::High)
        .collect();

    tracing::info!(
        high_risk = high_risk.len(),
        total = batch.len(),
        "evaluated batch for alerts"
    );

    if high_risk.is_empty() {
        return AlertOutcome {
            sent: false,
            high_risk_count: 0,
            top_concerns: vec![],
        };
    }

    let top_concerns: Vec<AlertConcern> = high_risk
        .iter()
        .take(MAX_CONCERNS)
        .map(|s| AlertConcern {
            source: s.signal.source.clone(),
            rumor_tags: s.tags_display(),
        })
        .collect();

    emit_notification(high_risk.len(), &top_concerns);

    AlertOutcome {
        sent: true,
        high_risk_count: high_risk.len(),
        top_concerns,
    }
}

fn emit_notification(count: usize, concerns: &[AlertConcern]) {
    tracing::warn!(high_risk = count, "RED ALERT: vaccine rumors detected");

    println!("{}", "!".repeat(30));
    println!("RED ALERT: VACCINE RUMORS DETECTED");
    println!("Total high-risk signals: {count}");
    println!("Top concerns found:");
    for concern in concerns {
        println!("- {}: {}", concern.source, concern.rumor_tags);
        tracing::warn!(
            source = %concern.source,
            tags = %concern.rumor_tags,
            "high-risk rumor"
        );
    }
    println!("{}", "!".repeat(30));
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;
    use pris_core::Signal;

    fn high(source: &str, tag: &str) -> AnalyzedSignal {
        AnalyzedSignal {
            signal: Signal {
                source: source.to_string(),
                title: "t".to_string(),
                description: None,
                location: None,
                published_at: None,
                collected_at: Utc::now(),
            },
            clean_description: String::new(),
            rumor_tags: vec![tag.to_string()],
            risk_level: RiskLevel::High,
        }
    }

    fn low(source: &str) -> AnalyzedSignal {
        AnalyzedSignal {
            rumor_tags: vec![],
            risk_level: RiskLevel::Low,
            ..high(source, "ignored")
        }
    }

    #[test]
    fn clean_batch_sends_nothing() {
        let outcome = check_for_alerts(&[low("KBC"), low("Citizen TV")]);
        assert!(!outcome.sent);
        assert_eq!(outcome.high_risk_count, 0);
        assert!(outcome.top_concerns.is_empty());
    }

    #[test]
    fn single_high_risk_signal_triggers_alert() {
        let outcome = check_for_alerts(&[low("KBC"), high("Daily Nation", "paralysis")]);
        assert!(outcome.sent);
        assert_eq!(outcome.high_risk_count, 1);
        assert_eq!(outcome.top_concerns.len(), 1);
        assert_eq!(outcome.top_concerns[0].source, "Daily Nation");
        assert_eq!(outcome.top_concerns[0].rumor_tags, "paralysis");
    }

    #[test]
    fn notification_lists_at_most_three_concerns() {
        let batch = vec![
            high("A", "fake"),
            high("B", "haram"),
            high("C", "paralysis"),
            high("D", "infertility"),
        ];
        let outcome = check_for_alerts(&batch);
        assert_eq!(outcome.high_risk_count, 4);
        assert_eq!(outcome.top_concerns.len(), 3);
        // First three in batch order.
        assert_eq!(outcome.top_concerns[0].source, "A");
        assert_eq!(outcome.top_concerns[2].source, "C");
    }
}
