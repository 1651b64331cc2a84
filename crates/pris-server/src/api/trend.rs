use axum::{extract::State, Extension, Json};
use pris_analysis::TrendAssessment;

use crate::middleware::RequestId;

use super::{map_db_error, ApiError, ApiResponse, AppState, ResponseMeta};

/// Latest trend assessment derived from the daily-summary ledger.
///
/// With fewer than two ledger rows this reports the distinguished
/// `no_baseline` state instead of comparing against a fabricated zero.
pub(super) async fn get_trend(
    State(state): State<AppState>,
    Extension(req_id): Extension<RequestId>,
) -> Result<Json<ApiResponse<TrendAssessment>>, ApiError> {
    let assessment = match pris_db::latest_and_previous(&state.pool).await {
        Ok((latest, previous)) => TrendAssessment::from_counts(
            latest.rumor_count,
            Some(previous.rumor_count),
            latest.sentiment_rate,
        ),
        Err(pris_db::DbError::NotFound) => TrendAssessment::NoBaseline,
        Err(e) => return Err(map_db_error(req_id.0.clone(), &e)),
    };

    Ok(Json(ApiResponse {
        data: assessment,
        meta: ResponseMeta::new(req_id.0),
    }))
}
