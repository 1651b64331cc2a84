//! News-signal collector for PRIS.
//!
//! Issues keyword searches against the NewsAPI `everything` endpoint and
//! normalizes each hit into a [`pris_core::Signal`]. Upstream failures
//! surface immediately as typed errors; there is no retry policy here —
//! the caller decides whether a failed collection aborts the mission.

mod client;
mod error;

pub use client::NewsApiClient;
pub use error::CollectorError;
