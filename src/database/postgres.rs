use async_trait::async_trait;
use sqlx::PgPool;

use crate::database::manager::DatabaseError;
use crate::database::models::{
    ConnectionLog, ConnectionStatus, LogEvent, NewServer, NewSession, NewUser, User, VpnConnection,
    VpnServer,
};
use crate::database::store::VpnStore;

const USER_COLUMNS: &str =
    "id, email, password_hash, username, subscription_tier, is_active, created_at, last_login";

const SERVER_COLUMNS: &str =
    "id, server_name, country, city, flag_emoji, ip_address, port, protocol, \
     max_connections, current_load::float8 AS current_load, ping_ms, is_active";

const CONNECTION_COLUMNS: &str =
    "id, user_id, server_id, connection_status, vpn_ip, connected_at, disconnected_at";

/// `VpnStore` backed by the shared PostgreSQL pool
#[derive(Clone)]
pub struct PgStore {
    pool: PgPool,
}

impl PgStore {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    pub fn pool(&self) -> &PgPool {
        &self.pool
    }
}

#[async_trait]
impl VpnStore for PgStore {
    async fn create_user(&self, user: NewUser) -> Result<User, DatabaseError> {
        let sql = format!(
            "INSERT INTO users (email, password_hash, username, subscription_tier) \
             VALUES ($1, $2, $3, $4) \
             RETURNING {USER_COLUMNS}"
        );

        sqlx::query_as::<_, User>(&sql)
            .bind(&user.email)
            .bind(&user.password_hash)
            .bind(&user.username)
            .bind(&user.subscription_tier)
            .fetch_one(&self.pool)
            .await
            .map_err(|e| {
                DatabaseError::conflict_on_unique(e, "Пользователь с таким email уже существует")
            })
    }

    async fn find_active_user_by_email(&self, email: &str) -> Result<Option<User>, DatabaseError> {
        let sql = format!(
            "SELECT {USER_COLUMNS} FROM users \
             WHERE lower(email) = lower($1) AND is_active = true \
             ORDER BY id ASC \
             LIMIT 1"
        );

        let user = sqlx::query_as::<_, User>(&sql)
            .bind(email)
            .fetch_optional(&self.pool)
            .await?;
        Ok(user)
    }

    async fn find_user(&self, id: i32) -> Result<Option<User>, DatabaseError> {
        let sql = format!("SELECT {USER_COLUMNS} FROM users WHERE id = $1");

        let user = sqlx::query_as::<_, User>(&sql)
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;
        Ok(user)
    }

    async fn record_login(
        &self,
        id: i32,
        rehashed_password: Option<String>,
    ) -> Result<(), DatabaseError> {
        sqlx::query(
            "UPDATE users \
             SET last_login = CURRENT_TIMESTAMP, \
                 password_hash = COALESCE($2, password_hash) \
             WHERE id = $1",
        )
        .bind(id)
        .bind(rehashed_password)
        .execute(&self.pool)
        .await?;
        Ok(())
    }

    async fn list_active_servers(&self) -> Result<Vec<VpnServer>, DatabaseError> {
        let sql = format!(
            "SELECT {SERVER_COLUMNS} FROM vpn_servers \
             WHERE is_active = true \
             ORDER BY ping_ms ASC, id ASC"
        );

        let servers = sqlx::query_as::<_, VpnServer>(&sql)
            .fetch_all(&self.pool)
            .await?;
        Ok(servers)
    }

    async fn find_active_server(&self, id: i32) -> Result<Option<VpnServer>, DatabaseError> {
        let sql =
            format!("SELECT {SERVER_COLUMNS} FROM vpn_servers WHERE id = $1 AND is_active = true");

        let server = sqlx::query_as::<_, VpnServer>(&sql)
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;
        Ok(server)
    }

    async fn insert_server(&self, server: NewServer) -> Result<VpnServer, DatabaseError> {
        let sql = format!(
            "INSERT INTO vpn_servers \
             (server_name, country, city, flag_emoji, ip_address, port, protocol, \
              max_connections, current_load, ping_ms) \
             VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9::float8::numeric, $10) \
             RETURNING {SERVER_COLUMNS}"
        );

        sqlx::query_as::<_, VpnServer>(&sql)
            .bind(&server.server_name)
            .bind(&server.country)
            .bind(&server.city)
            .bind(&server.flag_emoji)
            .bind(&server.ip_address)
            .bind(server.port)
            .bind(&server.protocol)
            .bind(server.max_connections)
            .bind(server.current_load)
            .bind(server.ping_ms)
            .fetch_one(&self.pool)
            .await
            .map_err(|e| {
                DatabaseError::conflict_on_unique(e, "Сервер с таким именем уже существует")
            })
    }

    async fn open_connection(&self, session: NewSession) -> Result<VpnConnection, DatabaseError> {
        let mut tx = self.pool.begin().await?;

        let sql = format!(
            "INSERT INTO vpn_connections (user_id, server_id, connection_status, vpn_ip) \
             VALUES ($1, $2, $3, $4) \
             RETURNING {CONNECTION_COLUMNS}"
        );
        let connection = sqlx::query_as::<_, VpnConnection>(&sql)
            .bind(session.user_id)
            .bind(session.server_id)
            .bind(ConnectionStatus::CONNECTED)
            .bind(&session.vpn_ip)
            .fetch_one(&mut *tx)
            .await?;

        sqlx::query(
            "INSERT INTO connection_logs (user_id, connection_id, event_type, event_details) \
             VALUES ($1, $2, $3, $4)",
        )
        .bind(session.user_id)
        .bind(connection.id)
        .bind(LogEvent::Connected.label())
        .bind(&session.log_details)
        .execute(&mut *tx)
        .await?;

        sqlx::query(
            "INSERT INTO vpn_configs \
             (user_id, server_id, config_type, encryption, config_content, expires_at) \
             VALUES ($1, $2, $3, $4, $5, $6)",
        )
        .bind(session.user_id)
        .bind(session.server_id)
        .bind(&session.config_type)
        .bind(&session.encryption)
        .bind(&session.config_content)
        .bind(session.expires_at)
        .execute(&mut *tx)
        .await?;

        tx.commit().await?;
        Ok(connection)
    }

    async fn close_connection(
        &self,
        connection_id: i32,
        user_id: i32,
    ) -> Result<Option<VpnConnection>, DatabaseError> {
        let mut tx = self.pool.begin().await?;

        let sql = format!(
            "UPDATE vpn_connections \
             SET disconnected_at = CURRENT_TIMESTAMP, connection_status = $3 \
             WHERE id = $1 AND user_id = $2 AND disconnected_at IS NULL \
             RETURNING {CONNECTION_COLUMNS}"
        );
        let closed = sqlx::query_as::<_, VpnConnection>(&sql)
            .bind(connection_id)
            .bind(user_id)
            .bind(ConnectionStatus::DISCONNECTED)
            .fetch_optional(&mut *tx)
            .await?;

        // Dropping the transaction rolls back; nothing was written anyway
        let Some(connection) = closed else {
            return Ok(None);
        };

        sqlx::query(
            "INSERT INTO connection_logs (user_id, connection_id, event_type, event_details) \
             VALUES ($1, $2, $3, $4)",
        )
        .bind(user_id)
        .bind(connection.id)
        .bind(LogEvent::Disconnected.label())
        .bind(LogEvent::disconnected_details())
        .execute(&mut *tx)
        .await?;

        tx.commit().await?;
        Ok(Some(connection))
    }

    async fn recent_logs(
        &self,
        user_id: i32,
        limit: i64,
    ) -> Result<Vec<ConnectionLog>, DatabaseError> {
        let logs = sqlx::query_as::<_, ConnectionLog>(
            "SELECT id, user_id, connection_id, event_type, event_details, \"timestamp\" \
             FROM connection_logs \
             WHERE user_id = $1 \
             ORDER BY \"timestamp\" DESC, id DESC \
             LIMIT $2",
        )
        .bind(user_id)
        .bind(limit)
        .fetch_all(&self.pool)
        .await?;
        Ok(logs)
    }

    async fn ping(&self) -> Result<(), DatabaseError> {
        sqlx::query("SELECT 1").execute(&self.pool).await?;
        Ok(())
    }
}
