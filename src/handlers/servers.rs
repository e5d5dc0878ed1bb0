// GET /vpn-servers - active server catalogue, fastest first

use axum::extract::State;
use serde::Serialize;

use crate::api::format::ServerView;
use crate::api::state::AppState;
use crate::middleware::response::{ApiResponse, ApiResult};

#[derive(Debug, Serialize)]
pub struct ServerListResponse {
    pub servers: Vec<ServerView>,
}

pub async fn get(State(state): State<AppState>) -> ApiResult<ServerListResponse> {
    let servers = state.store.list_active_servers().await?;

    Ok(ApiResponse::success(ServerListResponse {
        servers: servers.iter().map(ServerView::from).collect(),
    }))
}
