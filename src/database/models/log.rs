use chrono::{DateTime, Utc};
use serde::Serialize;
use sqlx::FromRow;

#[derive(Debug, Clone, Serialize, FromRow)]
pub struct ConnectionLog {
    pub id: i32,
    pub user_id: i32,
    pub connection_id: i32,
    pub event_type: String,
    pub event_details: String,
    pub timestamp: DateTime<Utc>,
}

/// Event types written to `connection_logs`; the labels are shown verbatim in the activity feed
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LogEvent {
    Connected,
    Disconnected,
}

impl LogEvent {
    pub fn label(self) -> &'static str {
        match self {
            LogEvent::Connected => "Подключено",
            LogEvent::Disconnected => "Отключение",
        }
    }

    pub fn connected_details(encryption: &str) -> String {
        format!("Защищенное соединение установлено ({})", encryption)
    }

    pub fn disconnected_details() -> &'static str {
        "Соединение безопасно закрыто"
    }
}
