//! NewsAPI `everything` search client.

use std::time::Duration;

use chrono::{DateTime, Utc};
use percent_encoding::{utf8_percent_encode, NON_ALPHANUMERIC};
use pris_core::{AppConfig, Signal};
use serde::Deserialize;

use crate::error::CollectorError;

#[derive(Debug, Deserialize)]
struct NewsApiResponse {
    status: String,
    #[serde(default)]
    articles: Vec<Article>,
    code: Option<String>,
    message: Option<String>,
}

#[derive(Debug, Deserialize)]
struct Article {
    source: ArticleSource,
    title: Option<String>,
    description: Option<String>,
    #[serde(rename = "publishedAt")]
    published_at: Option<DateTime<Utc>>,
}

#[derive(Debug, Deserialize)]
struct ArticleSource {
    name: Option<String>,
}

/// HTTP client for the NewsAPI `/v2/everything` endpoint.
///
/// Carries an explicit request timeout and user agent. The base URL is
/// overridable for tests and proxies. Failures are never retried.
pub struct NewsApiClient {
    client: reqwest::Client,
    api_key: String,
    base_url: String,
}

impl NewsApiClient {
    /// Build a client from application configuration.
    ///
    /// # Errors
    ///
    /// Returns [`CollectorError::Http`] if the underlying `reqwest::Client`
    /// cannot be constructed.
    pub fn new(config: &AppConfig) -> Result<Self, CollectorError> {
        Self::build(
            &config.news_api_key,
            config.collector_timeout_secs,
            &config.news_api_base_url,
            &config.collector_user_agent,
        )
    }

    /// Build a client against an explicit base URL. Used by tests.
    ///
    /// # Errors
    ///
    /// Returns [`CollectorError::Http`] if the underlying `reqwest::Client`
    /// cannot be constructed.
    pub fn with_base_url(
        api_key: &str,
        timeout_secs: u64,
        base_url: &str,
    ) -> Result<Self, CollectorError> {
        Self::build(api_key, timeout_secs, base_url, "pris/0.1 (rumor-intelligence)")
    }

    fn build(
        api_key: &str,
        timeout_secs: u64,
        base_url: &str,
        user_agent: &str,
    ) -> Result<Self, CollectorError> {
        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(timeout_secs))
            .connect_timeout(Duration::from_secs(10))
            .user_agent(user_agent)
            .build()?;

        Ok(Self {
            client,
            api_key: api_key.to_string(),
            base_url: base_url.trim_end_matches('/').to_string(),
        })
    }

    /// Search recent articles for `query` and normalize each hit into a
    /// [`Signal`] stamped with the current collection time.
    ///
    /// Articles with no usable title are dropped; a missing source name
    /// falls back to `"unknown"`.
    ///
    /// # Errors
    ///
    /// Returns [`CollectorError::Upstream`] when NewsAPI rejects the
    /// request (bad key, rate limit), [`CollectorError::HttpStatus`] for a
    /// non-JSON error response, or [`CollectorError::Http`] on network and
    /// decode failures.
    pub async fn search(&self, query: &str) -> Result<Vec<Signal>, CollectorError> {
        let encoded = utf8_percent_encode(query, NON_ALPHANUMERIC).to_string();
        let url = format!(
            "{}/v2/everything?q={encoded}&apiKey={}",
            self.base_url, self.api_key
        );

        let response = self.client.get(&url).send().await?;
        let http_status = response.status();

        if !http_status.is_success() {
            // NewsAPI error payloads carry a machine code and message.
            if let Ok(body) = response.json::<NewsApiResponse>().await {
                if body.status == "error" {
                    return Err(upstream_error(body));
                }
            }
            return Err(CollectorError::HttpStatus(http_status.as_u16()));
        }

        let body = response.json::<NewsApiResponse>().await?;
        if body.status == "error" {
            return Err(upstream_error(body));
        }

        let collected_at = Utc::now();
        let signals: Vec<Signal> = body
            .articles
            .into_iter()
            .filter_map(|article| {
                let title = article.title?;
                if title.trim().is_empty() {
                    return None;
                }
                Some(Signal {
                    source: article
                        .source
                        .name
                        .unwrap_or_else(|| "unknown".to_string()),
                    title,
                    description: article.description,
                    location: None,
                    published_at: article.published_at,
                    collected_at,
                })
            })
            .collect();

        tracing::debug!(query, count = signals.len(), "collected news signals");
        Ok(signals)
    }
}

fn upstream_error(body: NewsApiResponse) -> CollectorError {
    CollectorError::Upstream {
        code: body.code.unwrap_or_else(|| "unknown".to_string()),
        message: body
            .message
            .unwrap_or_else(|| "no message provided".to_string()),
    }
}
