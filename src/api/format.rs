use serde::Serialize;

use crate::database::models::{ConnectionLog, User, VpnServer};

/// Public part of a user record; never carries the password hash
#[derive(Debug, Clone, Serialize)]
pub struct UserView {
    pub id: i32,
    pub email: String,
    pub username: String,
    pub subscription_tier: String,
    pub created_at: String,
}

impl From<&User> for UserView {
    fn from(user: &User) -> Self {
        Self {
            id: user.id,
            email: user.email.clone(),
            username: user.username.clone(),
            subscription_tier: user.subscription_tier.clone(),
            created_at: user.created_at.to_rfc3339(),
        }
    }
}

/// Server card as rendered by the location picker
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ServerView {
    pub id: String,
    pub country: String,
    pub city: String,
    pub flag: String,
    pub load: f64,
    pub ping: i32,
    pub server_name: String,
    pub ip_address: String,
    pub port: i32,
    pub protocol: String,
}

impl From<&VpnServer> for ServerView {
    fn from(server: &VpnServer) -> Self {
        Self {
            id: server.id.to_string(),
            country: server.country.clone(),
            city: server.city.clone(),
            flag: server.flag_emoji.clone(),
            load: server.current_load,
            ping: server.ping_ms,
            server_name: server.server_name.clone(),
            ip_address: server.ip_address.clone(),
            port: server.port,
            protocol: server.protocol.clone(),
        }
    }
}

/// Activity feed row; only the time of day is shown
#[derive(Debug, Clone, Serialize)]
pub struct LogView {
    pub timestamp: String,
    pub event: String,
    pub details: String,
}

impl From<&ConnectionLog> for LogView {
    fn from(log: &ConnectionLog) -> Self {
        Self {
            timestamp: log.timestamp.format("%H:%M:%S").to_string(),
            event: log.event_type.clone(),
            details: log.event_details.clone(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{TimeZone, Utc};

    #[test]
    fn server_view_uses_client_field_names() {
        let server = VpnServer {
            id: 4,
            server_name: "DE-BER-01".into(),
            country: "Германия".into(),
            city: "Берлин".into(),
            flag_emoji: "🇩🇪".into(),
            ip_address: "198.51.100.20".into(),
            port: 1194,
            protocol: "OpenVPN".into(),
            max_connections: 1000,
            current_load: 28.5,
            ping_ms: 8,
            is_active: true,
        };

        let value = serde_json::to_value(ServerView::from(&server)).unwrap();
        assert_eq!(value["id"], "4");
        assert_eq!(value["flag"], "🇩🇪");
        assert_eq!(value["load"], 28.5);
        assert_eq!(value["serverName"], "DE-BER-01");
        assert_eq!(value["ipAddress"], "198.51.100.20");
        assert!(value.get("max_connections").is_none());
    }

    #[test]
    fn log_view_shows_time_of_day() {
        let log = ConnectionLog {
            id: 1,
            user_id: 1,
            connection_id: 1,
            event_type: "Подключено".into(),
            event_details: "Защищенное соединение установлено (AES-256-GCM)".into(),
            timestamp: Utc.with_ymd_and_hms(2024, 1, 18, 14, 32, 5).unwrap(),
        };

        let view = LogView::from(&log);
        assert_eq!(view.timestamp, "14:32:05");
        assert_eq!(view.event, "Подключено");
    }

    #[test]
    fn user_view_hides_hash() {
        let user = User {
            id: 9,
            email: "a@b.io".into(),
            password_hash: "$argon2id$secret".into(),
            username: "a".into(),
            subscription_tier: "premium".into(),
            is_active: true,
            created_at: Utc.with_ymd_and_hms(2024, 1, 18, 0, 0, 0).unwrap(),
            last_login: None,
        };

        let value = serde_json::to_value(UserView::from(&user)).unwrap();
        assert!(value.get("password_hash").is_none());
        assert_eq!(value["created_at"], "2024-01-18T00:00:00+00:00");
    }
}
