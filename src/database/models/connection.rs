use chrono::{DateTime, Utc};
use serde::Serialize;
use sqlx::FromRow;

/// Values of `vpn_connections.connection_status`
pub struct ConnectionStatus;

impl ConnectionStatus {
    pub const CONNECTED: &'static str = "connected";
    pub const DISCONNECTED: &'static str = "disconnected";
}

#[derive(Debug, Clone, Serialize, FromRow)]
pub struct VpnConnection {
    pub id: i32,
    pub user_id: i32,
    pub server_id: i32,
    pub connection_status: String,
    pub vpn_ip: String,
    pub connected_at: DateTime<Utc>,
    pub disconnected_at: Option<DateTime<Utc>>,
}

impl VpnConnection {
    pub fn is_open(&self) -> bool {
        self.disconnected_at.is_none()
    }
}

/// Everything a connect call persists in one transaction: the connection row,
/// its "connected" log entry and the issued client config.
#[derive(Debug, Clone)]
pub struct NewSession {
    pub user_id: i32,
    pub server_id: i32,
    pub vpn_ip: String,
    pub log_details: String,
    pub config_type: String,
    pub encryption: String,
    pub config_content: String,
    pub expires_at: DateTime<Utc>,
}
