use thiserror::Error;

#[derive(Debug, Error)]
pub enum CollectorError {
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("news source rejected the request ({code}): {message}")]
    Upstream { code: String, message: String },

    #[error("unexpected response status {0} from news source")]
    HttpStatus(u16),
}
