//! Read-only `status`, `report`, and `export` command handlers.

use std::path::Path;

use chrono::Utc;
use pris_analysis::TrendAssessment;
use sqlx::SqlitePool;

/// Show the daily ledger and the current trend verdict.
///
/// # Errors
///
/// Returns an error if the database query fails.
pub(crate) async fn run_status(pool: &SqlitePool) -> anyhow::Result<()> {
    let summaries = pris_db::list_daily_summaries(pool, 14).await?;

    if summaries.is_empty() {
        println!("no daily summaries yet; run `mission` first");
        return Ok(());
    }

    println!("{:<14}{:<10}{:<12}TOP TOPIC", "DATE", "RUMORS", "RATE");
    for row in &summaries {
        println!(
            "{:<14}{:<10}{:<12}{}",
            row.date,
            row.rumor_count,
            format!("{:.1}%", row.sentiment_rate),
            row.top_topic
        );
    }
    println!();

    match current_trend(pool).await? {
        TrendAssessment::NoBaseline => {
            println!("trend: no baseline yet (need at least two daily summaries)");
        }
        TrendAssessment::Assessed {
            verdict,
            recommendation,
            ..
        } => {
            println!("trend: {verdict}");
            println!("{recommendation}");
        }
    }

    Ok(())
}

/// Generate a markdown intelligence report.
///
/// # Errors
///
/// Returns an error if the database query fails.
pub(crate) async fn run_report(pool: &SqlitePool) -> anyhow::Result<()> {
    let signals = pris_db::list_signals(pool, 100).await?;

    if signals.is_empty() {
        println!("no analyzed signals to report; run `mission` first");
        return Ok(());
    }

    let counts = pris_db::count_by_risk(pool).await?;
    let high_risk = pris_db::list_high_risk(pool, 3).await?;
    let now = Utc::now().format("%Y-%m-%d %H:%M UTC");

    println!("# Rumor Intelligence Report");
    println!();
    println!("**Generated**: {now}");
    println!("**Signals**: {} ({} high risk, {} low)", signals.len(), counts.high, counts.low);
    if let Some(latest) = pris_db::latest_summary(pool).await? {
        println!(
            "**Latest daily summary**: {} — {} rumors, {:.1}% rate, top topic: {}",
            latest.date, latest.rumor_count, latest.sentiment_rate, latest.top_topic
        );
    }
    println!();

    if !high_risk.is_empty() {
        println!("## Top Concerns");
        println!();
        for row in &high_risk {
            println!("- **{}**: {}", row.source, row.rumor_tags);
        }
        println!();
    }

    match current_trend(pool).await? {
        TrendAssessment::NoBaseline => {
            println!("_No trend baseline yet._");
            println!();
        }
        TrendAssessment::Assessed {
            verdict,
            recommendation,
            today_rumors,
            yesterday_rumors,
            ..
        } => {
            println!("## Trend");
            println!();
            println!("**{verdict}** — {today_rumors} rumors today vs {yesterday_rumors} yesterday.");
            println!();
            println!("{recommendation}");
            println!();
        }
    }

    println!("---");
    println!();
    println!("| Source | Collected | Tags | Risk |");
    println!("|--------|-----------|------|------|");
    for row in &signals {
        let collected = row.collected_at.format("%Y-%m-%d %H:%M UTC");
        println!(
            "| {} | {} | {} | {} |",
            row.source, collected, row.rumor_tags, row.risk_level
        );
    }

    Ok(())
}

/// Write the analyzed-signal table to `output` as CSV.
///
/// # Errors
///
/// Returns an error if the database query or the file write fails.
pub(crate) async fn run_export(pool: &SqlitePool, output: &Path) -> anyhow::Result<()> {
    let signals = pris_db::list_signals(pool, 10_000).await?;

    let mut csv = String::from(
        "source,title,description,location,published_at,collected_at,clean_description,rumor_tags,risk_level\n",
    );
    for row in &signals {
        let fields = [
            row.source.as_str(),
            row.title.as_str(),
            row.description.as_deref().unwrap_or(""),
            row.location.as_deref().unwrap_or(""),
            &row.published_at
                .map(|t| t.to_rfc3339())
                .unwrap_or_default(),
            &row.collected_at.to_rfc3339(),
            row.clean_description.as_str(),
            row.rumor_tags.as_str(),
            row.risk_level.as_str(),
        ]
        .map(csv_field);
        csv.push_str(&fields.join(","));
        csv.push('\n');
    }

    if let Some(parent) = output.parent() {
        if !parent.as_os_str().is_empty() {
            std::fs::create_dir_all(parent)?;
        }
    }
    std::fs::write(output, csv)?;
    tracing::info!(rows = signals.len(), path = %output.display(), "csv export written");

    println!("exported {} signals to {}", signals.len(), output.display());
    Ok(())
}

async fn current_trend(pool: &SqlitePool) -> anyhow::Result<TrendAssessment> {
    match pris_db::latest_and_previous(pool).await {
        Ok((latest, previous)) => Ok(TrendAssessment::from_counts(
            latest.rumor_count,
            Some(previous.rumor_count),
            latest.sentiment_rate,
        )),
        Err(pris_db::DbError::NotFound) => Ok(TrendAssessment::NoBaseline),
        Err(e) => Err(e.into()),
    }
}

/// Quote a CSV field, doubling any embedded quotes.
fn csv_field(raw: &str) -> String {
    if raw.contains(['"', ',', '\n']) {
        format!("\"{}\"", raw.replace('"', "\"\""))
    } else {
        raw.to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::csv_field;

    #[test]
    fn plain_fields_pass_through() {
        assert_eq!(csv_field("Daily Nation"), "Daily Nation");
    }

    #[test]
    fn fields_with_commas_are_quoted() {
        assert_eq!(csv_field("paralysis, fake"), "\"paralysis, fake\"");
    }

    #[test]
    fn embedded_quotes_are_doubled() {
        assert_eq!(csv_field("said \"no\""), "\"said \"\"no\"\"\"");
    }
}
