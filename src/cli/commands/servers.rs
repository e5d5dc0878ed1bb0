use clap::Subcommand;
use serde_json::json;

use crate::api::format::ServerView;
use crate::cli::utils::{output_empty_collection, output_success};
use crate::cli::OutputFormat;
use crate::database::models::{server::default_servers, NewServer};
use crate::database::{DatabaseError, VpnStore};

#[derive(Subcommand)]
pub enum ServerCommands {
    #[command(about = "List active servers, fastest first")]
    List,

    #[command(about = "Register a server")]
    Add {
        #[arg(help = "Unique server name, e.g. DE-FR-01")]
        name: String,
        #[arg(long, help = "Country label")]
        country: String,
        #[arg(long, help = "City label")]
        city: String,
        #[arg(long, help = "Public IP address")]
        ip: String,
        #[arg(long, default_value = "🏳️", help = "Flag emoji")]
        flag: String,
        #[arg(long, default_value_t = 1194)]
        port: i32,
        #[arg(long, default_value = "OpenVPN")]
        protocol: String,
        #[arg(long, default_value_t = 1000)]
        max_connections: i32,
        #[arg(long, default_value_t = 0.0)]
        load: f64,
        #[arg(long, default_value_t = 0)]
        ping: i32,
    },

    #[command(about = "Insert the stock server locations, skipping names already present")]
    Seed,
}

pub async fn handle(cmd: ServerCommands, output_format: OutputFormat) -> anyhow::Result<()> {
    let store = super::open_store().await?;

    match cmd {
        ServerCommands::List => {
            let servers = store.list_active_servers().await?;
            if servers.is_empty() {
                return output_empty_collection(&output_format, "servers", "No active servers");
            }

            match output_format {
                OutputFormat::Json => {
                    let views: Vec<ServerView> = servers.iter().map(ServerView::from).collect();
                    println!("{}", serde_json::to_string_pretty(&json!({ "servers": views }))?);
                }
                OutputFormat::Text => {
                    println!(
                        "{:<5} {:<12} {:<20} {:<16} {:>6} {:>7}",
                        "ID", "NAME", "LOCATION", "ADDRESS", "LOAD", "PING"
                    );
                    println!("{}", "-".repeat(72));
                    for s in &servers {
                        let location = format!("{}, {}", s.city, s.country);
                        println!(
                            "{:<5} {:<12} {:<20} {:<16} {:>5.1}% {:>5}ms",
                            s.id, s.server_name, location, s.ip_address, s.current_load, s.ping_ms
                        );
                    }
                }
            }
            Ok(())
        }
        ServerCommands::Add {
            name,
            country,
            city,
            ip,
            flag,
            port,
            protocol,
            max_connections,
            load,
            ping,
        } => {
            let server = store
                .insert_server(NewServer {
                    server_name: name,
                    country,
                    city,
                    flag_emoji: flag,
                    ip_address: ip,
                    port,
                    protocol,
                    max_connections,
                    current_load: load,
                    ping_ms: ping,
                })
                .await?;

            output_success(
                &output_format,
                &format!("Server {} added with id {}", server.server_name, server.id),
                Some(json!({ "server": ServerView::from(&server) })),
            )
        }
        ServerCommands::Seed => {
            let mut inserted = 0;
            let mut skipped = 0;

            for server in default_servers() {
                match store.insert_server(server).await {
                    Ok(_) => inserted += 1,
                    Err(DatabaseError::Conflict(_)) => skipped += 1,
                    Err(e) => return Err(e.into()),
                }
            }

            output_success(
                &output_format,
                &format!("Seeded {} servers ({} already present)", inserted, skipped),
                Some(json!({ "inserted": inserted, "skipped": skipped })),
            )
        }
    }
}
