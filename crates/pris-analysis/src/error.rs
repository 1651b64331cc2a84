use thiserror::Error;

#[derive(Debug, Error)]
pub enum AnalysisError {
    #[error("keyword configuration error: {0}")]
    Keywords(#[from] pris_core::KeywordSetError),
}
