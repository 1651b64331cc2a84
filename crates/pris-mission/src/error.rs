use thiserror::Error;

#[derive(Debug, Error)]
pub enum MissionError {
    #[error("collection failed: {0}")]
    Collector(#[from] pris_collector::CollectorError),

    #[error("analysis failed: {0}")]
    Analysis(#[from] pris_analysis::AnalysisError),

    #[error("storage failed: {0}")]
    Db(#[from] pris_db::DbError),
}
