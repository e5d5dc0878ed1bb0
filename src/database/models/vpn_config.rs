use chrono::{DateTime, Utc};
use serde::Serialize;
use sqlx::FromRow;

/// Issued client profile; written on connect, kept for audit
#[derive(Debug, Clone, Serialize, FromRow)]
pub struct VpnConfigRecord {
    pub id: i32,
    pub user_id: i32,
    pub server_id: i32,
    pub config_type: String,
    pub encryption: String,
    pub config_content: String,
    pub expires_at: DateTime<Utc>,
}
