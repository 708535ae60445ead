//! caddy-route-admin
//!
//! Management CLI for reverse-proxy routes held in a running Caddy server.
//!
//! ```text
//!   caddy-route-admin ──HTTP/JSON──▶ Caddy admin API (:2019)
//!                                        │
//!                                        ▼
//!                      apps.http.servers.srv0.routes[]
//! ```

use std::path::PathBuf;

use clap::{Parser, Subcommand};
use serde::Serialize;

use caddy_route_admin::config::{check, read_config, ConfigError, Settings};
use caddy_route_admin::observability::logging::init_logging;
use caddy_route_admin::{AdminClient, RoutePatch};

#[derive(Parser)]
#[command(name = "caddy-route-admin")]
#[command(about = "Manage reverse-proxy routes through the Caddy admin API", long_about = None)]
struct Cli {
    /// TOML settings file.
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Admin API host (overrides the settings file).
    #[arg(long)]
    host: Option<String>,

    /// Admin API port (overrides the settings file).
    #[arg(short, long)]
    port: Option<u16>,

    /// HTTP server whose routes are managed (overrides the settings file).
    #[arg(long)]
    server_name: Option<String>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// List routes in match order
    List,
    /// Show one route
    Get { id: i64 },
    /// Append a route with the next free ID
    Add {
        #[arg(long)]
        host: String,
        #[arg(long, default_value = "/*")]
        path: String,
        #[arg(long)]
        upstream: String,
    },
    /// Change fields of an existing route
    Edit {
        id: i64,
        #[arg(long)]
        host: Option<String>,
        #[arg(long)]
        path: Option<String>,
        #[arg(long)]
        upstream: Option<String>,
    },
    /// Remove a route
    Delete { id: i64 },
    /// Print the ID the next added route would get
    NextId,
    /// Print the raw config subtree at a path
    Config {
        #[arg(default_value = "")]
        path: String,
    },
    /// Replace the whole live config with a JSON file
    Load { file: PathBuf },
    /// Stop the Caddy process
    Stop,
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();
    let settings = resolve_settings(&cli)?;

    init_logging(&settings.observability.log_level);

    let client = AdminClient::new(settings.admin)?;

    match cli.command {
        Commands::List => print_json(&client.list_routes().await?)?,
        Commands::Get { id } => print_json(&client.get_route(id).await?)?,
        Commands::Add {
            host,
            path,
            upstream,
        } => {
            let route = client
                .create_route_with_next_id(&host, &path, &upstream)
                .await?;
            print_json(&route)?;
        }
        Commands::Edit {
            id,
            host,
            path,
            upstream,
        } => {
            let patch = RoutePatch {
                match_host: host,
                match_path: path,
                upstream_dial: upstream,
            };
            if patch.is_empty() {
                return Err("edit needs at least one of --host, --path, --upstream".into());
            }
            print_json(&client.edit_route(id, patch).await?)?;
        }
        Commands::Delete { id } => client.delete_route(id).await?,
        Commands::NextId => println!("{}", client.next_available_id().await?),
        Commands::Config { path } => {
            let text = client.fetch_config_at(&path).await?;
            match serde_json::from_str::<serde_json::Value>(&text) {
                Ok(value) => print_json(&value)?,
                Err(_) => println!("{}", text.trim_end()),
            }
        }
        Commands::Load { file } => {
            let raw = tokio::fs::read_to_string(&file).await?;
            // Reject garbage locally instead of letting the server do it.
            serde_json::from_str::<serde_json::Value>(&raw)?;
            client.load_full_config(&raw).await?;
        }
        Commands::Stop => client.stop().await?,
    }

    Ok(())
}

/// Settings file (or defaults) with command-line overrides applied,
/// validated as a whole.
fn resolve_settings(cli: &Cli) -> Result<Settings, ConfigError> {
    let mut settings = match &cli.config {
        Some(path) => read_config(path)?,
        None => Settings::default(),
    };
    if let Some(host) = &cli.host {
        settings.admin.host = host.clone();
    }
    if let Some(port) = cli.port {
        settings.admin.port = port;
    }
    if let Some(server_name) = &cli.server_name {
        settings.admin.server_name = server_name.clone();
    }
    check(settings)
}

fn print_json<T: Serialize>(value: &T) -> Result<(), serde_json::Error> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}
