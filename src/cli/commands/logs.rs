use serde_json::json;

use crate::api::format::LogView;
use crate::cli::utils::output_empty_collection;
use crate::cli::OutputFormat;
use crate::config::config;
use crate::database::VpnStore;

pub async fn handle(
    user_id: i32,
    limit: Option<i64>,
    output_format: OutputFormat,
) -> anyhow::Result<()> {
    let store = super::open_store().await?;
    let limit = limit.unwrap_or(config().vpn.log_limit).max(0);

    let logs = store.recent_logs(user_id, limit).await?;
    if logs.is_empty() {
        let message = format!("No events for user {}", user_id);
        return output_empty_collection(&output_format, "logs", &message);
    }

    match output_format {
        OutputFormat::Json => {
            let views: Vec<LogView> = logs.iter().map(LogView::from).collect();
            println!("{}", serde_json::to_string_pretty(&json!({ "logs": views }))?);
        }
        OutputFormat::Text => {
            println!("{:<20} {:<8} {:<14} {}", "DATE", "CONN", "EVENT", "DETAILS");
            println!("{}", "-".repeat(80));
            for log in &logs {
                println!(
                    "{:<20} {:<8} {:<14} {}",
                    log.timestamp.format("%Y-%m-%d %H:%M:%S"),
                    log.connection_id,
                    log.event_type,
                    log.event_details
                );
            }
        }
    }
    Ok(())
}
