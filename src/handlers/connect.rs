// POST /vpn-connect - open and close VPN sessions, selected by `action`

use axum::{
    body::Bytes,
    extract::State,
    response::{IntoResponse, Response},
};
use base64::{engine::general_purpose::STANDARD, Engine as _};
use chrono::{Duration, Utc};
use serde::{Deserialize, Serialize};
use tracing::info;

use super::utils::{flexible_id, non_blank, parse_body};
use crate::api::state::AppState;
use crate::database::models::{LogEvent, NewSession};
use crate::error::ApiError;
use crate::middleware::response::{ApiResponse, ApiResult};
use crate::vpn::{download_filename, synthetic_address, OpenVpnProfile};

/// Column width of `config_type` and `encryption`
const MAX_OPTION_LEN: usize = 20;

#[derive(Debug, Deserialize)]
#[serde(tag = "action", rename_all = "lowercase")]
pub enum ConnectRequest {
    Connect(OpenRequest),
    Disconnect(CloseRequest),
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OpenRequest {
    #[serde(deserialize_with = "flexible_id")]
    pub user_id: i32,
    #[serde(deserialize_with = "flexible_id")]
    pub server_id: i32,
    #[serde(default)]
    pub protocol: Option<String>,
    #[serde(default)]
    pub encryption: Option<String>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CloseRequest {
    #[serde(deserialize_with = "flexible_id")]
    pub connection_id: i32,
    #[serde(deserialize_with = "flexible_id")]
    pub user_id: i32,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ConnectResponse {
    pub connection_id: i32,
    pub vpn_ip: String,
    pub server_name: String,
    pub connected_at: String,
    pub config: String,
    pub config_base64: String,
    pub download_filename: String,
}

#[derive(Debug, Serialize)]
pub struct DisconnectResponse {
    pub message: &'static str,
}

pub async fn post(State(state): State<AppState>, body: Bytes) -> Result<Response, ApiError> {
    match parse_body::<ConnectRequest>(&body)? {
        ConnectRequest::Connect(req) => Ok(connect(&state, req).await?.into_response()),
        ConnectRequest::Disconnect(req) => Ok(disconnect(&state, req).await?.into_response()),
    }
}

async fn connect(state: &AppState, req: OpenRequest) -> ApiResult<ConnectResponse> {
    let defaults = &state.config.vpn;
    let protocol = option_or_default("protocol", req.protocol, &defaults.default_protocol)?;
    let encryption = option_or_default("encryption", req.encryption, &defaults.default_encryption)?;

    let server = state
        .store
        .find_active_server(req.server_id)
        .await?
        .ok_or_else(|| ApiError::not_found("Сервер не найден"))?;

    let user = state
        .store
        .find_user(req.user_id)
        .await?
        .ok_or_else(|| ApiError::not_found("Пользователь не найден"))?;

    let now = Utc::now();
    let config = OpenVpnProfile {
        brand: &defaults.brand_name,
        username: &user.username,
        server_ip: &server.ip_address,
        server_port: server.port,
        encryption: &encryption,
        generated_at: now,
    }
    .render();

    let connection = state
        .store
        .open_connection(NewSession {
            user_id: user.id,
            server_id: server.id,
            vpn_ip: synthetic_address(&defaults.address_prefix),
            log_details: LogEvent::connected_details(&encryption),
            config_type: protocol,
            encryption,
            config_content: config.clone(),
            expires_at: now + Duration::days(defaults.config_ttl_days),
        })
        .await?;

    info!(
        connection_id = connection.id,
        user_id = user.id,
        server_id = server.id,
        "Opened VPN connection"
    );

    Ok(ApiResponse::success(ConnectResponse {
        connection_id: connection.id,
        vpn_ip: connection.vpn_ip,
        server_name: server.server_name,
        connected_at: connection.connected_at.to_rfc3339(),
        config_base64: STANDARD.encode(config.as_bytes()),
        config,
        download_filename: download_filename(&server.country, &server.city),
    }))
}

/// Only an open connection owned by the caller can be closed
async fn disconnect(state: &AppState, req: CloseRequest) -> ApiResult<DisconnectResponse> {
    let closed = state
        .store
        .close_connection(req.connection_id, req.user_id)
        .await?
        .ok_or_else(|| ApiError::not_found("Соединение не найдено"))?;

    info!(connection_id = closed.id, user_id = closed.user_id, "Closed VPN connection");

    Ok(ApiResponse::success(DisconnectResponse {
        message: "Отключено от VPN",
    }))
}

fn option_or_default(
    field: &str,
    value: Option<String>,
    default: &str,
) -> Result<String, ApiError> {
    let value = non_blank(value).unwrap_or_else(|| default.to_string());
    if value.chars().count() > MAX_OPTION_LEN {
        return Err(ApiError::field_error(
            field,
            format!("Must be at most {} characters", MAX_OPTION_LEN),
        ));
    }
    Ok(value)
}
