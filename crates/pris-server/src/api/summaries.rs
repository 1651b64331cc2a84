use axum::{
    extract::{Query, State},
    Extension, Json,
};
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::middleware::RequestId;

use super::{map_db_error, normalize_limit, ApiError, ApiResponse, AppState, ResponseMeta};

#[derive(Debug, Serialize)]
pub(super) struct SummaryItem {
    pub date: NaiveDate,
    pub sentiment_rate: f64,
    pub rumor_count: i64,
    pub top_topic: String,
}

#[derive(Debug, Deserialize)]
pub(super) struct SummariesQuery {
    pub limit: Option<i64>,
}

pub(super) async fn list_summaries(
    State(state): State<AppState>,
    Extension(req_id): Extension<RequestId>,
    Query(query): Query<SummariesQuery>,
) -> Result<Json<ApiResponse<Vec<SummaryItem>>>, ApiError> {
    let rows = pris_db::list_daily_summaries(&state.pool, normalize_limit(query.limit))
        .await
        .map_err(|e| map_db_error(req_id.0.clone(), &e))?;

    let data = rows
        .into_iter()
        .map(|row| SummaryItem {
            date: row.date,
            sentiment_rate: row.sentiment_rate,
            rumor_count: row.rumor_count,
            top_topic: row.top_topic,
        })
        .collect();

    Ok(Json(ApiResponse {
        data,
        meta: ResponseMeta::new(req_id.0),
    }))
}
