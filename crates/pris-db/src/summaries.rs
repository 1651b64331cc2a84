//! Database operations for the `daily_summaries` ledger.
//!
//! One row per calendar date, enforced with upsert-by-date so same-day
//! reruns overwrite instead of duplicating. The trend evaluator reads the
//! two most recent dates as "today" and "yesterday".

use chrono::{NaiveDate, NaiveDateTime};
use sqlx::SqlitePool;

use crate::DbError;

/// A row from the `daily_summaries` table.
#[derive(Debug, Clone, sqlx::FromRow)]
pub struct DailySummaryRow {
    pub id: i64,
    pub date: NaiveDate,
    pub sentiment_rate: f64,
    pub rumor_count: i64,
    pub top_topic: String,
    pub created_at: NaiveDateTime,
}

/// Insert or replace the summary for `date`.
///
/// The `UNIQUE` constraint on `date` turns a same-day rerun into an update
/// of `sentiment_rate`, `rumor_count`, and `top_topic` rather than a second
/// row — "yesterday" lookups can never land on a same-day duplicate.
///
/// Returns the row id.
///
/// # Errors
///
/// Returns [`DbError::Sqlx`] if the upsert fails.
pub async fn upsert_daily_summary(
    pool: &SqlitePool,
    date: NaiveDate,
    sentiment_rate: f64,
    rumor_count: i64,
    top_topic: &str,
) -> Result<i64, DbError> {
    let id: i64 = sqlx::query_scalar(
        "INSERT INTO daily_summaries (date, sentiment_rate, rumor_count, top_topic) \
         VALUES ($1, $2, $3, $4) \
         ON CONFLICT(date) DO UPDATE SET \
             sentiment_rate = excluded.sentiment_rate, \
             rumor_count = excluded.rumor_count, \
             top_topic = excluded.top_topic \
         RETURNING id",
    )
    .bind(date)
    .bind(sentiment_rate)
    .bind(rumor_count)
    .bind(top_topic)
    .fetch_one(pool)
    .await?;

    Ok(id)
}

/// Return the two most recent summaries, newest first.
///
/// # Errors
///
/// Returns [`DbError::NotFound`] if fewer than two rows exist — callers
/// treat that as the "no baseline yet" state rather than inventing a
/// zero-count yesterday.
pub async fn latest_and_previous(
    pool: &SqlitePool,
) -> Result<(DailySummaryRow, DailySummaryRow), DbError> {
    let mut rows = sqlx::query_as::<_, DailySummaryRow>(
        "SELECT id, date, sentiment_rate, rumor_count, top_topic, created_at \
         FROM daily_summaries \
         ORDER BY date DESC \
         LIMIT 2",
    )
    .fetch_all(pool)
    .await?;

    if rows.len() < 2 {
        return Err(DbError::NotFound);
    }

    let previous = rows.pop().ok_or(DbError::NotFound)?;
    let latest = rows.pop().ok_or(DbError::NotFound)?;
    Ok((latest, previous))
}

/// Return the most recent summary, or `None` on an empty ledger.
///
/// # Errors
///
/// Returns [`DbError::Sqlx`] if the query fails.
pub async fn latest_summary(pool: &SqlitePool) -> Result<Option<DailySummaryRow>, DbError> {
    let row = sqlx::query_as::<_, DailySummaryRow>(
        "SELECT id, date, sentiment_rate, rumor_count, top_topic, created_at \
         FROM daily_summaries \
         ORDER BY date DESC \
         LIMIT 1",
    )
    .fetch_optional(pool)
    .await?;

    Ok(row)
}

/// List recent summaries, newest first.
///
/// # Errors
///
/// Returns [`DbError::Sqlx`] if the query fails.
pub async fn list_daily_summaries(
    pool: &SqlitePool,
    limit: i64,
) -> Result<Vec<DailySummaryRow>, DbError> {
    let rows = sqlx::query_as::<_, DailySummaryRow>(
        "SELECT id, date, sentiment_rate, rumor_count, top_topic, created_at \
         FROM daily_summaries \
         ORDER BY date DESC \
         LIMIT $1",
    )
    .bind(limit)
    .fetch_all(pool)
    .await?;

    Ok(rows)
}
