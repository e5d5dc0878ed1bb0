pub mod db;
pub mod logs;
pub mod servers;

use crate::config::config;
use crate::database::{DatabaseManager, PgStore};

/// Store over an eagerly connected pool; CLI commands fail fast when the
/// database is unreachable.
pub(crate) async fn open_store() -> anyhow::Result<PgStore> {
    let pool = DatabaseManager::connect(&config().database).await?;
    Ok(PgStore::new(pool))
}
