//! In-memory `VpnStore` for tests.
//!
//! Mirrors the PostgreSQL store's contract: unique emails, active-only
//! lookups, single-close connections and newest-first logs.

use async_trait::async_trait;
use chrono::Utc;
use tokio::sync::Mutex;

use crate::database::manager::DatabaseError;
use crate::database::models::{
    server::default_servers, ConnectionLog, ConnectionStatus, LogEvent, NewServer, NewSession,
    NewUser, User, VpnConfigRecord, VpnConnection, VpnServer,
};
use crate::database::store::VpnStore;

#[derive(Default)]
struct Tables {
    users: Vec<User>,
    servers: Vec<VpnServer>,
    connections: Vec<VpnConnection>,
    logs: Vec<ConnectionLog>,
    configs: Vec<VpnConfigRecord>,
}

fn next_id(len: usize) -> i32 {
    len as i32 + 1
}

#[derive(Default)]
pub struct MemoryStore {
    tables: Mutex<Tables>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_servers(servers: Vec<NewServer>) -> Self {
        let mut tables = Tables::default();
        for server in servers {
            let row = server_row(next_id(tables.servers.len()), server);
            tables.servers.push(row);
        }
        Self {
            tables: Mutex::new(tables),
        }
    }

    /// Seeded with the stock location list
    pub fn with_default_servers() -> Self {
        Self::with_servers(default_servers())
    }

    /// Row as stored, including inactive users
    pub async fn user_by_email(&self, email: &str) -> Option<User> {
        let tables = self.tables.lock().await;
        tables.users.iter().find(|u| same_email(&u.email, email)).cloned()
    }

    pub async fn set_user_active(&self, id: i32, active: bool) {
        let mut tables = self.tables.lock().await;
        if let Some(user) = tables.users.iter_mut().find(|u| u.id == id) {
            user.is_active = active;
        }
    }

    pub async fn set_server_active(&self, id: i32, active: bool) {
        let mut tables = self.tables.lock().await;
        if let Some(server) = tables.servers.iter_mut().find(|s| s.id == id) {
            server.is_active = active;
        }
    }

    pub async fn connections(&self) -> Vec<VpnConnection> {
        self.tables.lock().await.connections.clone()
    }

    pub async fn configs(&self) -> Vec<VpnConfigRecord> {
        self.tables.lock().await.configs.clone()
    }

    pub async fn log_count(&self) -> usize {
        self.tables.lock().await.logs.len()
    }
}

/// Matches the `lower(email)` index on `users`
fn same_email(stored: &str, wanted: &str) -> bool {
    stored.to_lowercase() == wanted.to_lowercase()
}

fn server_row(id: i32, server: NewServer) -> VpnServer {
    VpnServer {
        id,
        server_name: server.server_name,
        country: server.country,
        city: server.city,
        flag_emoji: server.flag_emoji,
        ip_address: server.ip_address,
        port: server.port,
        protocol: server.protocol,
        max_connections: server.max_connections,
        current_load: server.current_load,
        ping_ms: server.ping_ms,
        is_active: true,
    }
}

#[async_trait]
impl VpnStore for MemoryStore {
    async fn create_user(&self, user: NewUser) -> Result<User, DatabaseError> {
        let mut tables = self.tables.lock().await;
        if tables.users.iter().any(|u| same_email(&u.email, &user.email)) {
            return Err(DatabaseError::Conflict(
                "Пользователь с таким email уже существует".to_string(),
            ));
        }

        let row = User {
            id: next_id(tables.users.len()),
            email: user.email,
            password_hash: user.password_hash,
            username: user.username,
            subscription_tier: user.subscription_tier,
            is_active: true,
            created_at: Utc::now(),
            last_login: None,
        };
        tables.users.push(row.clone());
        Ok(row)
    }

    async fn find_active_user_by_email(&self, email: &str) -> Result<Option<User>, DatabaseError> {
        let tables = self.tables.lock().await;
        Ok(tables
            .users
            .iter()
            .find(|u| same_email(&u.email, email) && u.is_active)
            .cloned())
    }

    async fn find_user(&self, id: i32) -> Result<Option<User>, DatabaseError> {
        let tables = self.tables.lock().await;
        Ok(tables.users.iter().find(|u| u.id == id).cloned())
    }

    async fn record_login(
        &self,
        id: i32,
        rehashed_password: Option<String>,
    ) -> Result<(), DatabaseError> {
        let mut tables = self.tables.lock().await;
        if let Some(user) = tables.users.iter_mut().find(|u| u.id == id) {
            user.last_login = Some(Utc::now());
            if let Some(hash) = rehashed_password {
                user.password_hash = hash;
            }
        }
        Ok(())
    }

    async fn list_active_servers(&self) -> Result<Vec<VpnServer>, DatabaseError> {
        let tables = self.tables.lock().await;
        let mut servers: Vec<VpnServer> =
            tables.servers.iter().filter(|s| s.is_active).cloned().collect();
        servers.sort_by_key(|s| (s.ping_ms, s.id));
        Ok(servers)
    }

    async fn find_active_server(&self, id: i32) -> Result<Option<VpnServer>, DatabaseError> {
        let tables = self.tables.lock().await;
        Ok(tables
            .servers
            .iter()
            .find(|s| s.id == id && s.is_active)
            .cloned())
    }

    async fn insert_server(&self, server: NewServer) -> Result<VpnServer, DatabaseError> {
        let mut tables = self.tables.lock().await;
        if tables.servers.iter().any(|s| s.server_name == server.server_name) {
            return Err(DatabaseError::Conflict(
                "Сервер с таким именем уже существует".to_string(),
            ));
        }
        let row = server_row(next_id(tables.servers.len()), server);
        tables.servers.push(row.clone());
        Ok(row)
    }

    async fn open_connection(&self, session: NewSession) -> Result<VpnConnection, DatabaseError> {
        let mut tables = self.tables.lock().await;
        let now = Utc::now();

        let connection = VpnConnection {
            id: next_id(tables.connections.len()),
            user_id: session.user_id,
            server_id: session.server_id,
            connection_status: ConnectionStatus::CONNECTED.to_string(),
            vpn_ip: session.vpn_ip,
            connected_at: now,
            disconnected_at: None,
        };
        let log = ConnectionLog {
            id: next_id(tables.logs.len()),
            user_id: session.user_id,
            connection_id: connection.id,
            event_type: LogEvent::Connected.label().to_string(),
            event_details: session.log_details,
            timestamp: now,
        };
        let config = VpnConfigRecord {
            id: next_id(tables.configs.len()),
            user_id: session.user_id,
            server_id: session.server_id,
            config_type: session.config_type,
            encryption: session.encryption,
            config_content: session.config_content,
            expires_at: session.expires_at,
        };

        tables.connections.push(connection.clone());
        tables.logs.push(log);
        tables.configs.push(config);
        Ok(connection)
    }

    async fn close_connection(
        &self,
        connection_id: i32,
        user_id: i32,
    ) -> Result<Option<VpnConnection>, DatabaseError> {
        let mut tables = self.tables.lock().await;
        let now = Utc::now();

        let Some(connection) = tables
            .connections
            .iter_mut()
            .find(|c| c.id == connection_id && c.user_id == user_id && c.is_open())
        else {
            return Ok(None);
        };

        connection.disconnected_at = Some(now);
        connection.connection_status = ConnectionStatus::DISCONNECTED.to_string();
        let closed = connection.clone();

        let log = ConnectionLog {
            id: next_id(tables.logs.len()),
            user_id,
            connection_id,
            event_type: LogEvent::Disconnected.label().to_string(),
            event_details: LogEvent::disconnected_details().to_string(),
            timestamp: now,
        };
        tables.logs.push(log);
        Ok(Some(closed))
    }

    async fn recent_logs(
        &self,
        user_id: i32,
        limit: i64,
    ) -> Result<Vec<ConnectionLog>, DatabaseError> {
        let tables = self.tables.lock().await;
        let mut logs: Vec<ConnectionLog> =
            tables.logs.iter().filter(|l| l.user_id == user_id).cloned().collect();
        logs.sort_by(|a, b| b.timestamp.cmp(&a.timestamp).then(b.id.cmp(&a.id)));
        logs.truncate(usize::try_from(limit).unwrap_or(0));
        Ok(logs)
    }

    async fn ping(&self) -> Result<(), DatabaseError> {
        Ok(())
    }
}
