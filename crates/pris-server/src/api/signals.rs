use axum::{
    extract::{Query, State},
    Extension, Json,
};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::middleware::RequestId;

use super::{map_db_error, normalize_limit, ApiError, ApiResponse, AppState, ResponseMeta};

/// Dashboard-facing view of one analyzed signal.
#[derive(Debug, Serialize)]
pub(super) struct SignalItem {
    pub source: String,
    pub title: String,
    pub summary: Option<String>,
    pub location: Option<String>,
    pub published_at: Option<DateTime<Utc>>,
    pub collected_at: DateTime<Utc>,
    pub rumor_tags: String,
    pub risk_level: String,
}

impl From<pris_db::AnalyzedSignalRow> for SignalItem {
    fn from(row: pris_db::AnalyzedSignalRow) -> Self {
        Self {
            source: row.source,
            title: row.title,
            summary: row.description,
            location: row.location,
            published_at: row.published_at,
            collected_at: row.collected_at,
            rumor_tags: row.rumor_tags,
            risk_level: row.risk_level,
        }
    }
}

#[derive(Debug, Deserialize)]
pub(super) struct SignalsQuery {
    pub limit: Option<i64>,
}

pub(super) async fn list_signals(
    State(state): State<AppState>,
    Extension(req_id): Extension<RequestId>,
    Query(query): Query<SignalsQuery>,
) -> Result<Json<ApiResponse<Vec<SignalItem>>>, ApiError> {
    let rows = pris_db::list_signals(&state.pool, normalize_limit(query.limit))
        .await
        .map_err(|e| map_db_error(req_id.0.clone(), &e))?;

    Ok(Json(ApiResponse {
        data: rows.into_iter().map(SignalItem::from).collect(),
        meta: ResponseMeta::new(req_id.0),
    }))
}

pub(super) async fn list_high_risk(
    State(state): State<AppState>,
    Extension(req_id): Extension<RequestId>,
    Query(query): Query<SignalsQuery>,
) -> Result<Json<ApiResponse<Vec<SignalItem>>>, ApiError> {
    let rows = pris_db::list_high_risk(&state.pool, normalize_limit(query.limit))
        .await
        .map_err(|e| map_db_error(req_id.0.clone(), &e))?;

    Ok(Json(ApiResponse {
        data: rows.into_iter().map(SignalItem::from).collect(),
        meta: ResponseMeta::new(req_id.0),
    }))
}
