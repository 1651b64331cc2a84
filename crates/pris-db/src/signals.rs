//! Database operations for the `analyzed_signals` table.

use chrono::{DateTime, Utc};
use pris_core::AnalyzedSignal;
use sqlx::SqlitePool;

use crate::DbError;

/// A row from the `analyzed_signals` table.
///
/// `rumor_tags` holds the comma-joined ledger form (`none` when no keywords
/// matched); `risk_level` holds the canonical `High`/`Low` labels.
#[derive(Debug, Clone, sqlx::FromRow)]
pub struct AnalyzedSignalRow {
    pub id: i64,
    pub source: String,
    pub title: String,
    pub description: Option<String>,
    pub location: Option<String>,
    pub published_at: Option<DateTime<Utc>>,
    pub collected_at: DateTime<Utc>,
    pub clean_description: String,
    pub rumor_tags: String,
    pub risk_level: String,
}

/// High/Low row counts for the current batch.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RiskCounts {
    pub high: i64,
    pub low: i64,
}

/// Replace the stored batch with `batch`, atomically.
///
/// The table holds exactly one collection batch at a time; delete + insert
/// run in one transaction so readers never observe a half-written batch.
///
/// Returns the number of rows inserted.
///
/// # Errors
///
/// Returns [`DbError::Sqlx`] if the transaction fails; nothing is written
/// in that case.
pub async fn replace_signal_batch(
    pool: &SqlitePool,
    batch: &[AnalyzedSignal],
) -> Result<usize, DbError> {
    let mut tx = pool.begin().await?;

    sqlx::query("DELETE FROM analyzed_signals")
        .execute(&mut *tx)
        .await?;

    for analyzed in batch {
        sqlx::query(
            "INSERT INTO analyzed_signals \
                 (source, title, description, location, published_at, collected_at, \
                  clean_description, rumor_tags, risk_level) \
             VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9)",
        )
        .bind(&analyzed.signal.source)
        .bind(&analyzed.signal.title)
        .bind(&analyzed.signal.description)
        .bind(&analyzed.signal.location)
        .bind(analyzed.signal.published_at)
        .bind(analyzed.signal.collected_at)
        .bind(&analyzed.clean_description)
        .bind(analyzed.tags_display())
        .bind(analyzed.risk_level.as_str())
        .execute(&mut *tx)
        .await?;
    }

    tx.commit().await?;
    Ok(batch.len())
}

/// List stored signals, newest first by collection time.
///
/// # Errors
///
/// Returns [`DbError::Sqlx`] if the query fails.
pub async fn list_signals(
    pool: &SqlitePool,
    limit: i64,
) -> Result<Vec<AnalyzedSignalRow>, DbError> {
    let rows = sqlx::query_as::<_, AnalyzedSignalRow>(
        "SELECT id, source, title, description, location, published_at, collected_at, \
                clean_description, rumor_tags, risk_level \
         FROM analyzed_signals \
         ORDER BY collected_at DESC, id DESC \
         LIMIT $1",
    )
    .bind(limit)
    .fetch_all(pool)
    .await?;

    Ok(rows)
}

/// List only High-risk signals, newest first.
///
/// # Errors
///
/// Returns [`DbError::Sqlx`] if the query fails.
pub async fn list_high_risk(
    pool: &SqlitePool,
    limit: i64,
) -> Result<Vec<AnalyzedSignalRow>, DbError> {
    let rows = sqlx::query_as::<_, AnalyzedSignalRow>(
        "SELECT id, source, title, description, location, published_at, collected_at, \
                clean_description, rumor_tags, risk_level \
         FROM analyzed_signals \
         WHERE risk_level = 'High' \
         ORDER BY collected_at DESC, id DESC \
         LIMIT $1",
    )
    .bind(limit)
    .fetch_all(pool)
    .await?;

    Ok(rows)
}

/// Count stored signals by risk level.
///
/// # Errors
///
/// Returns [`DbError::Sqlx`] if the query fails.
pub async fn count_by_risk(pool: &SqlitePool) -> Result<RiskCounts, DbError> {
    let high: i64 =
        sqlx::query_scalar("SELECT COUNT(*) FROM analyzed_signals WHERE risk_level = 'High'")
            .fetch_one(pool)
            .await?;
    let low: i64 =
        sqlx::query_scalar("SELECT COUNT(*) FROM analyzed_signals WHERE risk_level = 'Low'")
            .fetch_one(pool)
            .await?;

    Ok(RiskCounts { high, low })
}
