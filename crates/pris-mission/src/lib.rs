//! Mission orchestration for PRIS.
//!
//! A mission is one run-to-completion pass of the pipeline:
//! collect → normalize/tag/classify → persist batch → update the daily
//! ledger → evaluate the trend → notify on high risk. Steps run strictly
//! in that order with no internal concurrency; overlapping missions are
//! serialized by the caller (scheduler or CLI).
//!
//! The upstream LLM-agent loop of the original system is an external
//! collaborator: this crate honors its contract (mission query in,
//! structured [`MissionReport`] out) without reimplementing its reasoning.

pub mod alerts;
mod error;

use chrono::Utc;
use pris_analysis::{analyze_batch, keywords_for, TrendAssessment};
use pris_collector::NewsApiClient;
use pris_core::AppConfig;
use pris_db::DbError;
use serde::Serialize;
use sqlx::SqlitePool;

pub use alerts::{check_for_alerts, AlertConcern, AlertOutcome};
pub use error::MissionError;

/// Structured findings of one mission run.
#[derive(Debug, Clone, Serialize)]
pub struct MissionReport {
    pub query: String,
    /// Signals returned by the news source.
    pub collected: usize,
    /// Signals that survived analysis (malformed records skipped).
    pub analyzed: usize,
    /// High-risk signals in the batch.
    pub flagged: usize,
    pub sentiment_rate: f64,
    pub top_topic: String,
    pub trend: TrendAssessment,
    pub alert: AlertOutcome,
}

/// Run one mission end to end.
///
/// Collection failures abort the run; per-record analysis problems are
/// skipped inside the batch. The daily ledger is upserted by date, so a
/// same-day rerun overwrites today's summary instead of duplicating it.
/// With fewer than two ledger rows the trend is reported as
/// [`TrendAssessment::NoBaseline`] rather than guessed against zero.
///
/// # Errors
///
/// Returns [`MissionError`] if collection, keyword configuration, or
/// storage fails.
pub async fn run_mission(
    pool: &SqlitePool,
    config: &AppConfig,
    query: &str,
) -> Result<MissionReport, MissionError> {
    tracing::info!(query, "mission starting");

    let client = NewsApiClient::new(config)?;
    let signals = client.search(query).await?;
    let collected = signals.len();

    let keywords = keywords_for(config)?;
    let (batch, stats) = analyze_batch(signals, &keywords);

    let stored = pris_db::replace_signal_batch(pool, &batch).await?;
    tracing::info!(collected, stored, flagged = stats.flagged, "batch persisted");

    let today = Utc::now().date_naive();
    let flagged = i64::try_from(stats.flagged).unwrap_or(i64::MAX);
    pris_db::upsert_daily_summary(pool, today, stats.sentiment_rate, flagged, &stats.top_topic)
        .await?;

    let trend = match pris_db::latest_and_previous(pool).await {
        Ok((latest, previous)) => TrendAssessment::from_counts(
            latest.rumor_count,
            Some(previous.rumor_count),
            latest.sentiment_rate,
        ),
        Err(DbError::NotFound) => {
            tracing::info!("no baseline yet; trend evaluation deferred to the next run");
            TrendAssessment::NoBaseline
        }
        Err(e) => return Err(e.into()),
    };

    if let Some(verdict) = trend.verdict() {
        tracing::info!(%verdict, "trend evaluated");
    }

    let alert = check_for_alerts(&batch);

    let report = MissionReport {
        query: query.to_string(),
        collected,
        analyzed: stats.total,
        flagged: stats.flagged,
        sentiment_rate: stats.sentiment_rate,
        top_topic: stats.top_topic,
        trend,
        alert,
    };

    tracing::info!(
        analyzed = report.analyzed,
        flagged = report.flagged,
        alert_sent = report.alert.sent,
        "mission complete"
    );
    Ok(report)
}
