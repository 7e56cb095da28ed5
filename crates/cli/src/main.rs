//! Totem CLI - Command-line interface for the attendance queue
//!
//! Talks JSON-RPC to the daemon; meant for the counter operator.

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use colored::Colorize;
use serde::{Deserialize, Serialize};
use serde_json::json;
use tabled::{Table, Tabled};

const DEFAULT_RPC_URL: &str = "http://127.0.0.1:9627";

#[derive(Parser)]
#[command(name = "totem")]
#[command(about = "Totem attendance queue CLI", long_about = None)]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// RPC server URL
    #[arg(long, env = "TOTEM_RPC_URL", default_value = DEFAULT_RPC_URL)]
    rpc_url: String,
}

#[derive(Subcommand)]
enum Commands {
    /// Add a client to the queue
    Add {
        /// Client display name (max 20 characters)
        #[arg(short, long)]
        name: String,

        /// Service class: N (normal) or P (priority)
        #[arg(short, long, default_value = "N")]
        class: String,
    },

    /// List the waiting queue in position order
    List,

    /// Show the client at a given position
    Peek {
        /// Queue position (1 = next to be served)
        position: i64,
    },

    /// Serve the client at the front of the queue
    Serve,

    /// Remove the client at a given position
    Cancel {
        /// Queue position
        position: i64,
    },

    /// Clear the whole queue (new day / test isolation)
    Reset,

    /// Show daemon status
    Status,
}

#[derive(Serialize)]
struct JsonRpcRequest {
    jsonrpc: String,
    method: String,
    params: serde_json::Value,
    id: u64,
}

#[derive(Deserialize)]
struct JsonRpcResponse {
    #[allow(dead_code)]
    jsonrpc: String,
    #[allow(dead_code)]
    id: u64,
    result: Option<serde_json::Value>,
    error: Option<JsonRpcError>,
}

#[derive(Deserialize)]
struct JsonRpcError {
    code: i32,
    message: String,
}

#[derive(Deserialize, Tabled)]
struct EntryRow {
    position: i64,
    name: String,
    class: String,
    id: i64,
    arrival_time: i64,
}

impl EntryRow {
    fn from_value(v: &serde_json::Value) -> Result<Self> {
        serde_json::from_value(v.clone()).context("Malformed entry in response")
    }
}

async fn call_rpc(url: &str, method: &str, params: serde_json::Value) -> Result<serde_json::Value> {
    let request = JsonRpcRequest {
        jsonrpc: "2.0".to_string(),
        method: method.to_string(),
        params,
        id: 1,
    };

    let client = reqwest::Client::new();
    let response: JsonRpcResponse = client
        .post(url)
        .json(&request)
        .send()
        .await
        .context("Failed to connect to daemon")?
        .json()
        .await
        .context("Failed to parse response")?;

    if let Some(error) = response.error {
        anyhow::bail!("RPC error ({}): {}", error.code, error.message);
    }

    response
        .result
        .ok_or_else(|| anyhow::anyhow!("No result in response"))
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    match cli.command {
        Commands::Add { name, class } => {
            let params = json!({
                "name": name,
                "class": class,
            });

            let result = call_rpc(&cli.rpc_url, "queue.enqueue.v1", params).await?;
            let entry = EntryRow::from_value(&result)?;

            println!("{}", "✓ Client added to the queue".green().bold());
            println!();
            println!("{}", Table::new(vec![entry]));
        }

        Commands::List => {
            let result = call_rpc(&cli.rpc_url, "queue.list.v1", json!({})).await?;
            let entries: Vec<EntryRow> = result["entries"]
                .as_array()
                .map(|arr| {
                    arr.iter()
                        .map(EntryRow::from_value)
                        .collect::<Result<Vec<EntryRow>>>()
                })
                .transpose()?
                .unwrap_or_default();

            if entries.is_empty() {
                println!("{}", "The queue is empty".yellow());
            } else {
                println!("{}", format!("{} waiting", entries.len()).cyan().bold());
                println!();
                println!("{}", Table::new(entries));
            }
        }

        Commands::Peek { position } => {
            let params = json!({ "position": position });
            let result = call_rpc(&cli.rpc_url, "queue.peek.v1", params).await?;
            let entry = EntryRow::from_value(&result)?;

            println!("{}", Table::new(vec![entry]));
        }

        Commands::Serve => {
            let result = call_rpc(&cli.rpc_url, "queue.serve_next.v1", json!({})).await?;

            println!(
                "{}",
                format!(
                    "✓ Now serving: {} (class {})",
                    result["name"].as_str().unwrap_or("?"),
                    result["class"].as_str().unwrap_or("?")
                )
                .green()
                .bold()
            );
        }

        Commands::Cancel { position } => {
            let params = json!({ "position": position });
            let result = call_rpc(&cli.rpc_url, "queue.cancel.v1", params).await?;

            println!(
                "{}",
                format!(
                    "✓ Removed {} from position {}",
                    result["name"].as_str().unwrap_or("?"),
                    position
                )
                .green()
                .bold()
            );
        }

        Commands::Reset => {
            let result = call_rpc(&cli.rpc_url, "admin.reset.v1", json!({})).await?;

            println!(
                "{}",
                format!(
                    "✓ Queue cleared ({} entries touched)",
                    result["entries_cleared"]
                )
                .green()
                .bold()
            );
        }

        Commands::Status => {
            println!("{}", "Queue Status".cyan().bold());
            println!();

            match call_rpc(&cli.rpc_url, "admin.status.v1", json!({})).await {
                Ok(status) => {
                    println!("  {} {}", "RPC URL:".bold(), cli.rpc_url);
                    println!("  {} {}", "Status:".bold(), "ONLINE".green());
                    println!();
                    println!("  {} {}", "Waiting:".bold(), status["active"]);
                    match status["next_name"].as_str() {
                        Some(name) => println!("  {} {}", "Next up:".bold(), name),
                        None => println!("  {} {}", "Next up:".bold(), "-".dimmed()),
                    }
                    println!(
                        "  {} {} seconds",
                        "Uptime:".bold(),
                        status["uptime_seconds"]
                    );
                }
                Err(e) => {
                    println!("  {} {}", "Status:".bold(), "ERROR".red());
                    println!("  {} {}", "Error:".bold(), e);
                }
            }
        }
    }

    Ok(())
}
