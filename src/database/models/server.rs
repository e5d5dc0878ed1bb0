use serde::{Deserialize, Serialize};
use sqlx::FromRow;

#[derive(Debug, Clone, Serialize, FromRow)]
pub struct VpnServer {
    pub id: i32,
    pub server_name: String,
    pub country: String,
    pub city: String,
    pub flag_emoji: String,
    pub ip_address: String,
    pub port: i32,
    pub protocol: String,
    pub max_connections: i32,
    /// Percentage, stored as NUMERIC and read back as float8
    pub current_load: f64,
    pub ping_ms: i32,
    pub is_active: bool,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NewServer {
    pub server_name: String,
    pub country: String,
    pub city: String,
    pub flag_emoji: String,
    pub ip_address: String,
    pub port: i32,
    pub protocol: String,
    pub max_connections: i32,
    pub current_load: f64,
    pub ping_ms: i32,
}

/// The locations the web client ships with, used to seed an empty catalogue.
/// Addresses come from the documentation ranges.
pub fn default_servers() -> Vec<NewServer> {
    let catalogue = [
        ("US-NY-01", "США", "Нью-Йорк", "🇺🇸", "203.0.113.10", 45.0, 23),
        ("US-LA-01", "США", "Лос-Анджелес", "🇺🇸", "203.0.113.20", 67.0, 35),
        ("UK-LDN-01", "Великобритания", "Лондон", "🇬🇧", "198.51.100.10", 32.0, 12),
        ("DE-BER-01", "Германия", "Берлин", "🇩🇪", "198.51.100.20", 28.0, 8),
        ("NL-AMS-01", "Нидерланды", "Амстердам", "🇳🇱", "198.51.100.30", 51.0, 15),
        ("FR-PAR-01", "Франция", "Париж", "🇫🇷", "198.51.100.40", 39.0, 18),
        ("JP-TYO-01", "Япония", "Токио", "🇯🇵", "192.0.2.10", 73.0, 89),
        ("SG-SIN-01", "Сингапур", "Сингапур", "🇸🇬", "192.0.2.20", 62.0, 102),
        ("CA-TOR-01", "Канада", "Торонто", "🇨🇦", "203.0.113.30", 41.0, 28),
        ("AU-SYD-01", "Австралия", "Сидней", "🇦🇺", "192.0.2.30", 55.0, 156),
    ];

    catalogue
        .into_iter()
        .map(|(name, country, city, flag, ip, load, ping)| NewServer {
            server_name: name.to_string(),
            country: country.to_string(),
            city: city.to_string(),
            flag_emoji: flag.to_string(),
            ip_address: ip.to_string(),
            port: 1194,
            protocol: "OpenVPN".to_string(),
            max_connections: 1000,
            current_load: load,
            ping_ms: ping,
        })
        .collect()
}
