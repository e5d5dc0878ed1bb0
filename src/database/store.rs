use async_trait::async_trait;

use crate::database::manager::DatabaseError;
use crate::database::models::{
    ConnectionLog, NewServer, NewSession, NewUser, User, VpnConnection, VpnServer,
};

/// Persistence operations behind the HTTP handlers.
///
/// Every method is one unit of work: implementations either apply all of
/// its writes or none of them.
#[async_trait]
pub trait VpnStore: Send + Sync {
    /// Inserts a user. A duplicate email yields `DatabaseError::Conflict`.
    async fn create_user(&self, user: NewUser) -> Result<User, DatabaseError>;

    async fn find_active_user_by_email(&self, email: &str) -> Result<Option<User>, DatabaseError>;

    async fn find_user(&self, id: i32) -> Result<Option<User>, DatabaseError>;

    /// Stamps `last_login`, replacing the stored hash when `rehashed_password` is set
    async fn record_login(
        &self,
        id: i32,
        rehashed_password: Option<String>,
    ) -> Result<(), DatabaseError>;

    /// Active servers, ascending by ping
    async fn list_active_servers(&self) -> Result<Vec<VpnServer>, DatabaseError>;

    async fn find_active_server(&self, id: i32) -> Result<Option<VpnServer>, DatabaseError>;

    async fn insert_server(&self, server: NewServer) -> Result<VpnServer, DatabaseError>;

    /// Writes the connection row, its log entry and the config row together
    async fn open_connection(&self, session: NewSession) -> Result<VpnConnection, DatabaseError>;

    /// Closes an open connection owned by `user_id` and logs the event.
    /// Returns `None`, writing nothing, when no open connection matched.
    async fn close_connection(
        &self,
        connection_id: i32,
        user_id: i32,
    ) -> Result<Option<VpnConnection>, DatabaseError>;

    /// Newest first, at most `limit` rows
    async fn recent_logs(
        &self,
        user_id: i32,
        limit: i64,
    ) -> Result<Vec<ConnectionLog>, DatabaseError>;

    async fn ping(&self) -> Result<(), DatabaseError>;
}
