use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// One collected item, as returned by the news collector before analysis.
///
/// Immutable once written; lives for exactly one collection batch (each
/// mission replaces the previous batch in storage).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Signal {
    /// Name of the publishing source (e.g. `"Daily Nation"`).
    pub source: String,
    /// Raw article title.
    pub title: String,
    /// Raw article description. Absent for some upstream articles.
    pub description: Option<String>,
    /// Region/county the signal was attributed to, when known.
    pub location: Option<String>,
    /// Timestamp reported by the upstream source.
    pub published_at: Option<DateTime<Utc>>,
    /// When the collector fetched this signal.
    pub collected_at: DateTime<Utc>,
}

/// A [`Signal`] enriched by the analysis pipeline.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AnalyzedSignal {
    pub signal: Signal,
    /// Normalized description: lowercased, URLs and non-alphabetic
    /// characters removed.
    pub clean_description: String,
    /// Matched risk keywords in keyword-list order. Empty means no match;
    /// display layers render the `none` sentinel instead.
    pub rumor_tags: Vec<String>,
    pub risk_level: RiskLevel,
}

impl AnalyzedSignal {
    /// Comma-joined tag list, or the `none` sentinel when no keywords
    /// matched. This is the wire/ledger representation of `rumor_tags`.
    #[must_use]
    pub fn tags_display(&self) -> String {
        if self.rumor_tags.is_empty() {
            crate::keywords::NO_MATCH_SENTINEL.to_string()
        } else {
            self.rumor_tags.join(", ")
        }
    }
}

/// Coarse risk level assigned by the classifier.
///
/// Two-level by design: any keyword match is `High`, otherwise `Low`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum RiskLevel {
    High,
    Low,
}

impl RiskLevel {
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            RiskLevel::High => "High",
            RiskLevel::Low => "Low",
        }
    }
}

impl std::fmt::Display for RiskLevel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for RiskLevel {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        // Source variants wrote both "High" and "HIGH"; accept any casing.
        match s.to_ascii_lowercase().as_str() {
            "high" => Ok(RiskLevel::High),
            "low" => Ok(RiskLevel::Low),
            other => Err(format!("unknown risk level: {other}")),
        }
    }
}

/// Qualitative verdict from the trend evaluator. Derived, never stored.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RiskTrendVerdict {
    Crisis,
    Warning,
    Stable,
}

impl std::fmt::Display for RiskTrendVerdict {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let label = match self {
            RiskTrendVerdict::Crisis => "CRISIS",
            RiskTrendVerdict::Warning => "WARNING",
            RiskTrendVerdict::Stable => "STABLE",
        };
        f.write_str(label)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;

    fn sample_signal() -> Signal {
        Signal {
            source: "Daily Nation".to_string(),
            title: "Vaccine drive continues".to_string(),
            description: Some("Health teams visit Garissa".to_string()),
            location: Some("Garissa".to_string()),
            published_at: None,
            collected_at: Utc::now(),
        }
    }

    #[test]
    fn risk_level_round_trips_through_str() {
        assert_eq!("High".parse::<RiskLevel>().unwrap(), RiskLevel::High);
        assert_eq!("HIGH".parse::<RiskLevel>().unwrap(), RiskLevel::High);
        assert_eq!("low".parse::<RiskLevel>().unwrap(), RiskLevel::Low);
        assert!("medium".parse::<RiskLevel>().is_err());
    }

    #[test]
    fn tags_display_uses_sentinel_when_empty() {
        let analyzed = AnalyzedSignal {
            signal: sample_signal(),
            clean_description: "health teams visit garissa".to_string(),
            rumor_tags: vec![],
            risk_level: RiskLevel::Low,
        };
        assert_eq!(analyzed.tags_display(), "none");
    }

    #[test]
    fn tags_display_joins_with_comma() {
        let analyzed = AnalyzedSignal {
            signal: sample_signal(),
            clean_description: String::new(),
            rumor_tags: vec!["paralysis".to_string(), "fake".to_string()],
            risk_level: RiskLevel::High,
        };
        assert_eq!(analyzed.tags_display(), "paralysis, fake");
    }

    #[test]
    fn verdict_serializes_lowercase() {
        let json = serde_json::to_string(&RiskTrendVerdict::Crisis).unwrap();
        assert_eq!(json, "\"crisis\"");
    }
}
