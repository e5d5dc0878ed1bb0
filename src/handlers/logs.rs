// GET /vpn-logs?userId= - a user's recent connection events, newest first

use axum::extract::{rejection::QueryRejection, Query, State};
use serde::{Deserialize, Serialize};

use super::utils::{non_blank, parse_id};
use crate::api::format::LogView;
use crate::api::state::AppState;
use crate::error::ApiError;
use crate::middleware::response::{ApiResponse, ApiResult};

#[derive(Debug, Deserialize)]
pub struct LogsQuery {
    #[serde(rename = "userId")]
    pub user_id: Option<String>,
}

#[derive(Debug, Serialize)]
pub struct LogListResponse {
    pub logs: Vec<LogView>,
}

pub async fn get(
    State(state): State<AppState>,
    query: Result<Query<LogsQuery>, QueryRejection>,
) -> ApiResult<LogListResponse> {
    let Query(query) = query.map_err(|e| ApiError::bad_request(e.body_text()))?;

    let raw = non_blank(query.user_id).ok_or_else(|| ApiError::bad_request("userId is required"))?;
    let user_id = parse_id(&raw)
        .ok_or_else(|| ApiError::field_error("userId", "userId must be an integer"))?;

    let logs = state
        .store
        .recent_logs(user_id, state.config.vpn.log_limit)
        .await?;

    Ok(ApiResponse::success(LogListResponse {
        logs: logs.iter().map(LogView::from).collect(),
    }))
}
