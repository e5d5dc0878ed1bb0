pub mod commands;
pub mod utils;

use clap::{Parser, Subcommand};
use serde::{Deserialize, Serialize};

#[derive(Parser)]
#[command(name = "vpnctl")]
#[command(about = "vpnctl - Operator tooling for the SecureVPN API database")]
#[command(version)]
pub struct Cli {
    #[arg(long, global = true, help = "Output in human-readable text format")]
    pub text: bool,

    #[arg(long, global = true, help = "Output in JSON format")]
    pub json: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    #[command(about = "Database schema management")]
    Db {
        #[command(subcommand)]
        cmd: commands::db::DbCommands,
    },

    #[command(about = "VPN server catalogue management")]
    Servers {
        #[command(subcommand)]
        cmd: commands::servers::ServerCommands,
    },

    #[command(about = "Show recent connection events for a user")]
    Logs {
        #[arg(help = "User ID")]
        user_id: i32,

        #[arg(long, help = "Maximum number of entries (defaults to the configured log limit)")]
        limit: Option<i64>,
    },
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub enum OutputFormat {
    Text,
    Json,
}

impl OutputFormat {
    pub fn from_cli(cli: &Cli) -> Self {
        if cli.json {
            OutputFormat::Json
        } else {
            OutputFormat::Text
        }
    }
}

pub async fn run(cli: Cli) -> anyhow::Result<()> {
    let output_format = OutputFormat::from_cli(&cli);

    match cli.command {
        Commands::Db { cmd } => commands::db::handle(cmd, output_format).await,
        Commands::Servers { cmd } => commands::servers::handle(cmd, output_format).await,
        Commands::Logs { user_id, limit } => {
            commands::logs::handle(user_id, limit, output_format).await
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_global_json_flag_after_subcommand() {
        let cli = Cli::try_parse_from(["vpnctl", "servers", "list", "--json"]).unwrap();
        assert!(matches!(OutputFormat::from_cli(&cli), OutputFormat::Json));
    }

    #[test]
    fn logs_takes_user_and_limit() {
        let cli = Cli::try_parse_from(["vpnctl", "logs", "7", "--limit", "5"]).unwrap();
        match cli.command {
            Commands::Logs { user_id, limit } => {
                assert_eq!(user_id, 7);
                assert_eq!(limit, Some(5));
            }
            _ => panic!("expected logs command"),
        }
    }

    #[test]
    fn rejects_non_numeric_user() {
        assert!(Cli::try_parse_from(["vpnctl", "logs", "abc"]).is_err());
    }
}
