//! Batch analysis: normalize, tag, classify, and aggregate.

use std::collections::HashMap;

use pris_core::{AnalyzedSignal, AppConfig, KeywordSet, RiskLevel, Signal};
use serde::Serialize;

use crate::classify::classify_tags;
use crate::error::AnalysisError;
use crate::normalize::clean_text;

/// Aggregates over one analyzed batch, feeding the daily-summary ledger.
#[derive(Debug, Clone, Serialize)]
pub struct BatchStats {
    /// Signals that survived analysis (malformed records are skipped).
    pub total: usize,
    /// Signals classified [`RiskLevel::High`].
    pub flagged: usize,
    /// `flagged / total * 100`; `0.0` for an empty batch.
    pub sentiment_rate: f64,
    /// Most frequent tag, ties broken by keyword-list order; the `none`
    /// sentinel when nothing matched at all.
    pub top_topic: String,
}

/// Resolve the keyword set for this process: the configured YAML file when
/// `PRIS_KEYWORDS_PATH` is set, the built-in list otherwise.
///
/// # Errors
///
/// Returns [`AnalysisError::Keywords`] if a configured file cannot be
/// loaded — a broken override fails loudly instead of silently falling back.
pub fn keywords_for(config: &AppConfig) -> Result<KeywordSet, AnalysisError> {
    match &config.keywords_path {
        Some(path) => Ok(KeywordSet::from_yaml_file(path)?),
        None => Ok(KeywordSet::default()),
    }
}

/// Analyze a collected batch.
///
/// For each signal: normalize the description (falling back to the title
/// when the description is absent), tag it against `keywords`, and classify
/// it. A record with neither title nor description is skipped with a
/// warning — one malformed record never aborts the batch.
#[must_use]
pub fn analyze_batch(
    signals: Vec<Signal>,
    keywords: &KeywordSet,
) -> (Vec<AnalyzedSignal>, BatchStats) {
    let mut analyzed = Vec::with_capacity(signals.len());

    for signal in signals {
        let raw_text = match (&signal.description, signal.title.trim().is_empty()) {
            (Some(description), _) if !description.trim().is_empty() => description.clone(),
            (_, false) => signal.title.clone(),
            _ => {
                tracing::warn!(
                    source = %signal.source,
                    "skipping signal with no title or description"
                );
                continue;
            }
        };

        let clean_description = clean_text(&raw_text);
        let rumor_tags = keywords.tag(&clean_description);
        let risk_level = classify_tags(&rumor_tags);

        analyzed.push(AnalyzedSignal {
            signal,
            clean_description,
            rumor_tags,
            risk_level,
        });
    }

    let stats = batch_stats(&analyzed, keywords);
    (analyzed, stats)
}

fn batch_stats(analyzed: &[AnalyzedSignal], keywords: &KeywordSet) -> BatchStats {
    let total = analyzed.len();
    let flagged = analyzed
        .iter()
        .filter(|s| s.risk_level == RiskLevel::High)
        .count();

    #[allow(clippy::cast_precision_loss)]
    let sentiment_rate = if total == 0 {
        0.0
    } else {
        flagged as f64 / total as f64 * 100.0
    };

    let mut tag_counts: HashMap<&str, usize> = HashMap::new();
    for signal in analyzed {
        for tag in &signal.rumor_tags {
            *tag_counts.entry(tag.as_str()).or_insert(0) += 1;
        }
    }

    // Iterate keywords in list order so ties resolve to the earlier keyword.
    let mut top: Option<(&String, usize)> = None;
    for keyword in keywords.keywords() {
        if let Some(&count) = tag_counts.get(keyword.as_str()) {
            if top.is_none_or(|(_, best)| count > best) {
                top = Some((keyword, count));
            }
        }
    }
    let top_topic = top.map_or_else(
        || pris_core::NO_MATCH_SENTINEL.to_string(),
        |(keyword, _)| keyword.clone(),
    );

    BatchStats {
        total,
        flagged,
        sentiment_rate,
        top_topic,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;

    fn signal(description: Option<&str>) -> Signal {
        Signal {
            source: "Daily Nation".to_string(),
            title: "Headline".to_string(),
            description: description.map(ToString::to_string),
            location: None,
            published_at: None,
            collected_at: Utc::now(),
        }
    }

    #[test]
    fn paralysis_scenario_flags_high() {
        let batch = vec![signal(Some("Vaccine causes paralysis, doctors warn"))];
        let (analyzed, stats) = analyze_batch(batch, &KeywordSet::default());

        assert_eq!(analyzed.len(), 1);
        assert_eq!(analyzed[0].rumor_tags, vec!["paralysis".to_string()]);
        assert_eq!(analyzed[0].risk_level, RiskLevel::High);
        assert_eq!(stats.flagged, 1);
        assert_eq!(stats.top_topic, "paralysis");
    }

    #[test]
    fn clinic_scenario_stays_low() {
        let batch = vec![signal(Some("Local council opens new clinic"))];
        let (analyzed, stats) = analyze_batch(batch, &KeywordSet::default());

        assert!(analyzed[0].rumor_tags.is_empty());
        assert_eq!(analyzed[0].risk_level, RiskLevel::Low);
        assert_eq!(stats.flagged, 0);
        assert_eq!(stats.top_topic, "none");
    }

    #[test]
    fn missing_description_falls_back_to_title() {
        let mut s = signal(None);
        s.title = "Fake vaccine claims spread".to_string();
        let (analyzed, _) = analyze_batch(vec![s], &KeywordSet::default());

        assert_eq!(analyzed[0].rumor_tags, vec!["fake".to_string()]);
    }

    #[test]
    fn record_without_any_text_is_skipped_not_fatal() {
        let mut empty = signal(None);
        empty.title = "  ".to_string();
        let batch = vec![empty, signal(Some("Vaccine is dangerous, elders say"))];

        let (analyzed, stats) = analyze_batch(batch, &KeywordSet::default());
        assert_eq!(analyzed.len(), 1);
        assert_eq!(stats.total, 1);
        assert_eq!(stats.flagged, 1);
    }

    #[test]
    fn sentiment_rate_is_percentage_of_flagged() {
        let batch = vec![
            signal(Some("Vaccine causes paralysis")),
            signal(Some("New clinic opens")),
            signal(Some("Routine immunization continues")),
            signal(Some("Campaign called haram by local leaders")),
        ];
        let (_, stats) = analyze_batch(batch, &KeywordSet::default());

        assert_eq!(stats.total, 4);
        assert_eq!(stats.flagged, 2);
        assert!((stats.sentiment_rate - 50.0).abs() < f64::EPSILON);
    }

    #[test]
    fn empty_batch_yields_zero_rate_and_sentinel_topic() {
        let (analyzed, stats) = analyze_batch(vec![], &KeywordSet::default());
        assert!(analyzed.is_empty());
        assert_eq!(stats.total, 0);
        assert!((stats.sentiment_rate - 0.0).abs() < f64::EPSILON);
        assert_eq!(stats.top_topic, "none");
    }

    #[test]
    fn top_topic_tie_breaks_by_keyword_order() {
        // "infertility" precedes "fake" in the keyword list; both appear once.
        let batch = vec![
            signal(Some("Claims of infertility circulate")),
            signal(Some("Fake certificates reported")),
        ];
        let (_, stats) = analyze_batch(batch, &KeywordSet::default());
        assert_eq!(stats.top_topic, "infertility");
    }

    fn config_with_keywords_path(path: Option<std::path::PathBuf>) -> AppConfig {
        AppConfig {
            database_url: "sqlite::memory:".to_string(),
            news_api_key: "news-key".to_string(),
            gemini_api_key: "gemini-key".to_string(),
            env: pris_core::Environment::Test,
            bind_addr: "127.0.0.1:0".parse().unwrap(),
            log_level: "info".to_string(),
            keywords_path: path,
            default_query: "polio vaccine Kenya".to_string(),
            news_api_base_url: "https://newsapi.org".to_string(),
            db_max_connections: 1,
            db_min_connections: 1,
            db_acquire_timeout_secs: 5,
            collector_timeout_secs: 5,
            collector_user_agent: "test-agent".to_string(),
        }
    }

    #[test]
    fn keywords_for_defaults_without_configured_path() {
        let set = keywords_for(&config_with_keywords_path(None)).unwrap();
        assert_eq!(set.keywords().len(), 6);
    }

    #[test]
    fn keywords_for_loads_configured_yaml_override() {
        let path = std::env::temp_dir().join(format!("pris-pipeline-kw-{}.yaml", std::process::id()));
        std::fs::write(&path, "keywords:\n  - rumor\n  - hoax\n").unwrap();

        let set = keywords_for(&config_with_keywords_path(Some(path.clone()))).unwrap();
        std::fs::remove_file(&path).unwrap();

        assert_eq!(set.keywords(), &["rumor", "hoax"]);
    }

    #[test]
    fn keywords_for_fails_loudly_on_broken_override() {
        let path = std::env::temp_dir().join("pris-pipeline-kw-missing.yaml");
        let err = keywords_for(&config_with_keywords_path(Some(path))).unwrap_err();
        assert!(matches!(err, AnalysisError::Keywords(_)));
    }

    #[test]
    fn urls_never_produce_tags() {
        let batch = vec![signal(Some("see http://fake.example/paralysis"))];
        let (analyzed, _) = analyze_batch(batch, &KeywordSet::default());
        // The whole URL token is stripped before tagging.
        assert!(analyzed[0].rumor_tags.is_empty());
    }
}
