//! Trend evaluation against the daily-summary baseline.

use pris_core::RiskTrendVerdict;
use serde::Serialize;

/// Sentiment rate (percentage of flagged signals) above which the situation
/// counts as critical, independent of the rumor-count trend.
pub const CRITICAL_SENTIMENT_RATE: f64 = 40.0;

/// Evaluate the risk trend from today's numbers and yesterday's baseline.
///
/// Pure function over its inputs:
///
/// | today > yesterday | rate > 40 | verdict |
/// |---|---|---|
/// | true  | true  | Crisis  |
/// | true  | false | Warning |
/// | false | true  | Warning |
/// | false | false | Stable  |
#[must_use]
pub fn evaluate_risk_trend(
    today_rumors: i64,
    yesterday_rumors: i64,
    sentiment_rate: f64,
) -> RiskTrendVerdict {
    let trend_increasing = today_rumors > yesterday_rumors;
    let sentiment_critical = sentiment_rate > CRITICAL_SENTIMENT_RATE;

    if trend_increasing && sentiment_critical {
        RiskTrendVerdict::Crisis
    } else if trend_increasing || sentiment_critical {
        RiskTrendVerdict::Warning
    } else {
        RiskTrendVerdict::Stable
    }
}

/// Fixed recommended action for a verdict. One entry per verdict, no
/// fallthrough.
#[must_use]
pub fn recommendation(verdict: RiskTrendVerdict) -> &'static str {
    match verdict {
        RiskTrendVerdict::Crisis => {
            "Immediate action: deploy community engagement teams and clarify misinformation via radio and SMS."
        }
        RiskTrendVerdict::Warning => {
            "Action: increase frequency of data collection and verify the source of rumors."
        }
        RiskTrendVerdict::Stable => "Action: continue routine monitoring.",
    }
}

/// Outcome of a trend evaluation, including the distinguished first-run
/// state when no prior summary exists.
///
/// A missing baseline is never defaulted to zero: a zero "yesterday" would
/// make any non-empty first run read as an alarming increase.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "state", rename_all = "snake_case")]
pub enum TrendAssessment {
    /// Fewer than two daily summaries exist; no comparison is possible yet.
    NoBaseline,
    Assessed {
        verdict: RiskTrendVerdict,
        recommendation: &'static str,
        today_rumors: i64,
        yesterday_rumors: i64,
        sentiment_rate: f64,
    },
}

impl TrendAssessment {
    /// Assess today's numbers against an optional baseline.
    #[must_use]
    pub fn from_counts(
        today_rumors: i64,
        yesterday_rumors: Option<i64>,
        sentiment_rate: f64,
    ) -> Self {
        match yesterday_rumors {
            None => TrendAssessment::NoBaseline,
            Some(yesterday) => {
                let verdict = evaluate_risk_trend(today_rumors, yesterday, sentiment_rate);
                TrendAssessment::Assessed {
                    verdict,
                    recommendation: recommendation(verdict),
                    today_rumors,
                    yesterday_rumors: yesterday,
                    sentiment_rate,
                }
            }
        }
    }

    #[must_use]
    pub fn verdict(&self) -> Option<RiskTrendVerdict> {
        match self {
            TrendAssessment::NoBaseline => None,
            TrendAssessment::Assessed { verdict, .. } => Some(*verdict),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn decision_table_is_exhaustive() {
        // (today, yesterday, rate) -> verdict, covering all four table rows.
        let cases = [
            (10, 4, 55.0, RiskTrendVerdict::Crisis),
            (10, 4, 10.0, RiskTrendVerdict::Warning),
            (2, 5, 55.0, RiskTrendVerdict::Warning),
            (2, 5, 10.0, RiskTrendVerdict::Stable),
        ];
        for (today, yesterday, rate, expected) in cases {
            assert_eq!(
                evaluate_risk_trend(today, yesterday, rate),
                expected,
                "({today}, {yesterday}, {rate})"
            );
        }
    }

    #[test]
    fn evaluator_is_pure() {
        for _ in 0..3 {
            assert_eq!(evaluate_risk_trend(7, 3, 41.0), RiskTrendVerdict::Crisis);
        }
    }

    #[test]
    fn threshold_is_strictly_greater_than() {
        // Exactly 40.0 is not critical; equal counts are not increasing.
        assert_eq!(evaluate_risk_trend(5, 5, 40.0), RiskTrendVerdict::Stable);
        assert_eq!(evaluate_risk_trend(6, 5, 40.0), RiskTrendVerdict::Warning);
        assert_eq!(evaluate_risk_trend(5, 5, 40.1), RiskTrendVerdict::Warning);
    }

    #[test]
    fn crisis_maps_to_deploy_teams_action() {
        let action = recommendation(RiskTrendVerdict::Crisis);
        assert!(action.contains("deploy community engagement teams"));
    }

    #[test]
    fn stable_maps_to_routine_monitoring_action() {
        let action = recommendation(RiskTrendVerdict::Stable);
        assert!(action.contains("routine monitoring"));
    }

    #[test]
    fn missing_baseline_is_a_distinguished_state() {
        let assessment = TrendAssessment::from_counts(10, None, 55.0);
        assert_eq!(assessment, TrendAssessment::NoBaseline);
        assert_eq!(assessment.verdict(), None);
    }

    #[test]
    fn assessed_state_carries_verdict_and_action() {
        let assessment = TrendAssessment::from_counts(10, Some(4), 55.0);
        assert_eq!(assessment.verdict(), Some(RiskTrendVerdict::Crisis));
        match assessment {
            TrendAssessment::Assessed { recommendation, .. } => {
                assert!(recommendation.contains("deploy community engagement teams"));
            }
            TrendAssessment::NoBaseline => panic!("expected assessed state"),
        }
    }
}
