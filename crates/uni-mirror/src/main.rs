//! Binary entry point for uni-mirror.

use anyhow::Result;
use clap::{Parser, Subcommand};
use time::OffsetDateTime;
use tracing::{error, info, warn};
use tracing_subscriber::{EnvFilter, fmt::format::FmtSpan};

use uni_mirror_app::{AppConfig, CacheStore, SyncService};
use uni_mirror_todoist::TodoistClient;

mod server;

/// Mirror a Todoist project into a local assignments snapshot.
#[derive(Parser, Debug)]
#[command(
    name = "uni-mirror",
    version,
    about = "uni-mirror: serves a Todoist project as a local assignments API"
)]
struct Cli {
    #[command(subcommand)]
    cmd: Option<Command>,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Run the HTTP API server (default).
    Serve,

    /// Run a single sync cycle and print a summary.
    Sync,
}

fn main() -> Result<()> {
    // .env is optional; a missing file is not an error.
    dotenvy::dotenv().ok();
    install_tracing();

    let Cli { cmd } = Cli::parse();
    let config = AppConfig::from_env()?;

    tokio::runtime::Runtime::new()?.block_on(async move {
        match cmd.unwrap_or(Command::Serve) {
            Command::Serve => serve(config).await,
            Command::Sync => sync_once(config).await,
        }
    })
}

async fn serve(config: AppConfig) -> Result<()> {
    let cache = CacheStore::open(&config.data_file);
    let service = build_service(&config)?;

    // Initial sync on startup; failure keeps the previous cache serving.
    if config.token_configured() {
        match service.run_cycle(OffsetDateTime::now_utc()).await {
            Ok(result) => {
                info!(assignments = result.assignments.len(), "Initial sync completed");
                if let Err(err) = cache.replace(result) {
                    error!(%err, "Failed to persist initial sync");
                }
            }
            Err(err) => error!(%err, "Initial sync failed"),
        }
    } else {
        warn!("TODOIST_API_TOKEN not set; serving cached data only");
    }

    server::run(config, service, cache).await
}

async fn sync_once(config: AppConfig) -> Result<()> {
    config.require_token()?;
    let cache = CacheStore::open(&config.data_file);
    let service = build_service(&config)?;

    let result = service.run_cycle(OffsetDateTime::now_utc()).await?;
    println!(
        "Synced {} assignments across {} modules",
        result.assignments.len(),
        result.modules.len()
    );
    for module in &result.modules {
        println!("  - {}: {}/{} completed", module.name, module.completed, module.total);
    }
    cache.replace(result)?;
    Ok(())
}

fn build_service(config: &AppConfig) -> Result<SyncService<TodoistClient>> {
    let client = TodoistClient::new(config.api_token.clone())?;
    Ok(SyncService::new(
        client,
        config.project_name.clone(),
        config.assignment_label.clone(),
    ))
}

fn install_tracing() {
    let directives = std::env::var(EnvFilter::DEFAULT_ENV).ok();
    let _ = tracing_subscriber::fmt()
        .with_env_filter(env_filter(directives.as_deref()))
        .with_target(false)
        .with_span_events(FmtSpan::NONE)
        .compact()
        .try_init();
}

// RUST_LOG takes precedence; INFO is only the fallback.
fn env_filter(directives: Option<&str>) -> EnvFilter {
    directives.map_or_else(|| EnvFilter::new("info"), EnvFilter::new)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_defaults_to_serve() {
        let cli = Cli::parse_from(["uni-mirror"]);
        assert!(cli.cmd.is_none());
    }

    #[test]
    fn parse_sync_subcommand() {
        let cli = Cli::parse_from(["uni-mirror", "sync"]);
        assert!(matches!(cli.cmd, Some(Command::Sync)));
    }

    #[test]
    fn rust_log_overrides_the_default_filter() {
        assert_eq!(env_filter(Some("warn")).to_string(), "warn");
    }

    #[test]
    fn missing_rust_log_falls_back_to_info() {
        assert_eq!(env_filter(None).to_string(), "info");
    }
}
