use once_cell::sync::Lazy;
use serde::{Deserialize, Serialize};
use std::env;
use std::ops::RangeInclusive;
use std::str::FromStr;

/// Accepted range for `VPN_LOG_LIMIT`
pub const LOG_LIMIT_RANGE: RangeInclusive<i64> = 1..=1000;
/// Accepted range for `VPN_CONFIG_TTL_DAYS`
pub const CONFIG_TTL_DAYS_RANGE: RangeInclusive<i64> = 1..=3650;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AppConfig {
    pub environment: Environment,
    pub server: ServerConfig,
    pub database: DatabaseConfig,
    pub auth: AuthConfig,
    pub vpn: VpnConfig,
    pub security: SecurityConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub enum Environment {
    Development,
    Staging,
    Production,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServerConfig {
    pub port: u16,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DatabaseConfig {
    /// Connection string, normally taken from DATABASE_URL
    pub url: Option<String>,
    pub max_connections: u32,
    /// Seconds to wait for a pooled connection before giving up
    pub connection_timeout: u64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AuthConfig {
    pub min_password_length: usize,
    pub default_subscription_tier: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct VpnConfig {
    pub brand_name: String,
    /// First two octets of the cosmetic tunnel address
    pub address_prefix: String,
    pub default_protocol: String,
    pub default_encryption: String,
    pub config_ttl_days: i64,
    pub log_limit: i64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SecurityConfig {
    /// "*" allows any origin
    pub cors_origins: Vec<String>,
}

impl AppConfig {
    pub fn from_env() -> Self {
        let environment = match env::var("APP_ENV").as_deref() {
            Ok("production") | Ok("prod") => Environment::Production,
            Ok("staging") | Ok("stage") => Environment::Staging,
            _ => Environment::Development,
        };

        // Set defaults based on environment, then override with specific env vars
        match environment {
            Environment::Production => Self::production(),
            Environment::Staging => Self::staging(),
            Environment::Development => Self::development(),
        }
        .with_env_overrides()
    }

    fn with_env_overrides(mut self) -> Self {
        if let Some(port) = env::var("SERVER_PORT")
            .ok()
            .or_else(|| env::var("PORT").ok())
            .and_then(|s| s.parse::<u16>().ok())
        {
            self.server.port = port;
        }

        // Database overrides
        if let Ok(v) = env::var("DATABASE_URL") {
            self.database.url = Some(v);
        }
        if let Ok(v) = env::var("DATABASE_MAX_CONNECTIONS") {
            self.database.max_connections = v.parse().unwrap_or(self.database.max_connections);
        }
        if let Ok(v) = env::var("DATABASE_CONNECTION_TIMEOUT") {
            self.database.connection_timeout =
                v.parse().unwrap_or(self.database.connection_timeout);
        }

        // Auth overrides
        if let Ok(v) = env::var("AUTH_MIN_PASSWORD_LENGTH") {
            self.auth.min_password_length = v.parse().unwrap_or(self.auth.min_password_length);
        }
        if let Ok(v) = env::var("AUTH_DEFAULT_SUBSCRIPTION_TIER") {
            self.auth.default_subscription_tier = v;
        }

        // VPN overrides
        if let Ok(v) = env::var("VPN_BRAND_NAME") {
            self.vpn.brand_name = v;
        }
        if let Ok(v) = env::var("VPN_CONFIG_TTL_DAYS") {
            self.vpn.config_ttl_days =
                parse_clamped(&v, self.vpn.config_ttl_days, CONFIG_TTL_DAYS_RANGE);
        }
        if let Ok(v) = env::var("VPN_LOG_LIMIT") {
            self.vpn.log_limit = parse_clamped(&v, self.vpn.log_limit, LOG_LIMIT_RANGE);
        }

        // Security overrides
        if let Ok(v) = env::var("SECURITY_CORS_ORIGINS") {
            self.security.cors_origins = v.split(',').map(|s| s.trim().to_string()).collect();
        }

        self
    }

    pub fn development() -> Self {
        Self {
            environment: Environment::Development,
            server: ServerConfig { port: 3000 },
            database: DatabaseConfig {
                url: None,
                max_connections: 5,
                connection_timeout: 30,
            },
            auth: AuthConfig {
                min_password_length: 6,
                default_subscription_tier: "premium".to_string(),
            },
            vpn: VpnConfig::default(),
            security: SecurityConfig {
                cors_origins: vec!["*".to_string()],
            },
        }
    }

    pub fn staging() -> Self {
        Self {
            environment: Environment::Staging,
            server: ServerConfig { port: 3000 },
            database: DatabaseConfig {
                url: None,
                max_connections: 10,
                connection_timeout: 10,
            },
            auth: AuthConfig {
                min_password_length: 8,
                default_subscription_tier: "premium".to_string(),
            },
            vpn: VpnConfig::default(),
            security: SecurityConfig {
                cors_origins: vec!["*".to_string()],
            },
        }
    }

    pub fn production() -> Self {
        Self {
            environment: Environment::Production,
            server: ServerConfig { port: 8080 },
            database: DatabaseConfig {
                url: None,
                max_connections: 20,
                connection_timeout: 5,
            },
            auth: AuthConfig {
                min_password_length: 8,
                default_subscription_tier: "premium".to_string(),
            },
            vpn: VpnConfig::default(),
            security: SecurityConfig {
                cors_origins: vec!["*".to_string()],
            },
        }
    }

    /// Filter used when RUST_LOG is not set
    pub fn default_log_filter(&self) -> &'static str {
        match self.environment {
            Environment::Development => "info,securevpn_api=debug,tower_http=debug",
            _ => "info",
        }
    }
}

/// Parsed value pulled into `range`; unparseable input keeps `current`
fn parse_clamped<T>(raw: &str, current: T, range: RangeInclusive<T>) -> T
where
    T: FromStr + Ord + Copy,
{
    match raw.trim().parse::<T>() {
        Ok(v) => v.clamp(*range.start(), *range.end()),
        Err(_) => current,
    }
}

impl Default for VpnConfig {
    fn default() -> Self {
        Self {
            brand_name: "SecureVPN Pro".to_string(),
            address_prefix: "10.8".to_string(),
            default_protocol: "OpenVPN".to_string(),
            default_encryption: "AES-256-GCM".to_string(),
            config_ttl_days: 30,
            log_limit: 50,
        }
    }
}

// Global singleton config - initialized once at startup
pub static CONFIG: Lazy<AppConfig> = Lazy::new(AppConfig::from_env);

// Convenience function for accessing config
pub fn config() -> &'static AppConfig {
    &CONFIG
}
