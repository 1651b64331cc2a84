use std::sync::Arc;

use axum::{extract::State, http::StatusCode, Extension, Json};
use serde::{Deserialize, Serialize};

use crate::middleware::RequestId;

use super::{ApiResponse, AppState, ResponseMeta};

#[derive(Debug, Deserialize)]
pub(super) struct MissionRequest {
    pub query: Option<String>,
}

#[derive(Debug, Serialize)]
pub(super) struct MissionAccepted {
    pub message: &'static str,
    pub query: String,
}

/// Start a mission in the background and return immediately.
///
/// The pipeline can block for the full collector timeout, so it runs in a
/// detached task — the dashboard never freezes waiting on it. Outcomes are
/// reported through logs and the signal/summary endpoints, not this
/// response.
pub(super) async fn start_mission(
    State(state): State<AppState>,
    Extension(req_id): Extension<RequestId>,
    body: Option<Json<MissionRequest>>,
) -> (StatusCode, Json<ApiResponse<MissionAccepted>>) {
    let query = body
        .and_then(|Json(req)| req.query)
        .filter(|q| !q.trim().is_empty())
        .unwrap_or_else(|| state.config.default_query.clone());

    let pool = state.pool.clone();
    let config = Arc::clone(&state.config);
    let task_query = query.clone();

    tokio::spawn(async move {
        match pris_mission::run_mission(&pool, &config, &task_query).await {
            Ok(report) => {
                tracing::info!(
                    query = %task_query,
                    analyzed = report.analyzed,
                    flagged = report.flagged,
                    alert_sent = report.alert.sent,
                    "background mission finished"
                );
            }
            Err(e) => {
                tracing::error!(query = %task_query, error = %e, "background mission failed");
            }
        }
    });

    (
        StatusCode::ACCEPTED,
        Json(ApiResponse {
            data: MissionAccepted {
                message: "mission started in background",
                query,
            },
            meta: ResponseMeta::new(req_id.0),
        }),
    )
}
