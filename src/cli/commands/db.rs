use clap::Subcommand;
use serde_json::json;

use crate::cli::utils::output_success;
use crate::cli::OutputFormat;
use crate::config::config;
use crate::database::DatabaseManager;

#[derive(Subcommand)]
pub enum DbCommands {
    #[command(about = "Apply pending schema migrations")]
    Migrate,

    #[command(about = "Check that the database is reachable")]
    Ping,
}

pub async fn handle(cmd: DbCommands, output_format: OutputFormat) -> anyhow::Result<()> {
    let pool = DatabaseManager::connect(&config().database).await?;

    let result = match cmd {
        DbCommands::Migrate => {
            DatabaseManager::migrate(&pool).await?;
            output_success(&output_format, "Migrations applied", None)
        }
        DbCommands::Ping => {
            sqlx::query("SELECT 1").execute(&pool).await?;
            output_success(
                &output_format,
                "Database reachable",
                Some(json!({ "environment": format!("{:?}", config().environment) })),
            )
        }
    };

    pool.close().await;
    result
}
