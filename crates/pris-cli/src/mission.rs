//! `mission` command handler.

use pris_analysis::{keywords_for, TrendAssessment};
use pris_core::AppConfig;
use sqlx::SqlitePool;

/// Run one mission from the CLI, or preview it with `--dry-run`.
///
/// # Errors
///
/// Returns an error if keyword configuration, collection, or storage fails.
pub(crate) async fn run_mission_command(
    pool: &SqlitePool,
    config: &AppConfig,
    query: Option<&str>,
    dry_run: bool,
) -> anyhow::Result<()> {
    let query = query.unwrap_or(&config.default_query);

    if dry_run {
        let keywords = keywords_for(config)?;
        println!("dry-run: would search for '{query}'");
        println!(
            "dry-run: tagging against {} keywords: [{}]",
            keywords.keywords().len(),
            keywords.keywords().join(", ")
        );
        return Ok(());
    }

    let report = pris_mission::run_mission(pool, config, query).await?;
    tracing::info!(
        query = %report.query,
        collected = report.collected,
        flagged = report.flagged,
        alert = report.alert.sent,
        "mission finished"
    );

    println!("mission complete for '{}'", report.query);
    println!(
        "  collected {} signals, analyzed {}, flagged {} high-risk ({:.1}% sentiment rate)",
        report.collected, report.analyzed, report.flagged, report.sentiment_rate
    );
    println!("  top topic: {}", report.top_topic);

    match &report.trend {
        TrendAssessment::NoBaseline => {
            println!("  trend: no baseline yet; run again tomorrow for a comparison");
        }
        TrendAssessment::Assessed {
            verdict,
            recommendation,
            today_rumors,
            yesterday_rumors,
            ..
        } => {
            println!("  trend: {verdict} (today {today_rumors} vs yesterday {yesterday_rumors})");
            println!("  {recommendation}");
        }
    }

    if report.alert.sent {
        println!(
            "  alert dispatched for {} high-risk signals",
            report.alert.high_risk_count
        );
    }

    Ok(())
}
