use clap::{Parser, Subcommand};
use gatesync_domain::{CliOverrides, Config};
use gatesync_infrastructure::LogNotifier;
use gatesync_jobs::{GatewaySyncJob, JobRunner};
use std::sync::Arc;
use tokio_util::sync::CancellationToken;
use tracing::{error, info};

mod bootstrap;
mod di;

#[global_allocator]
static GLOBAL: mimalloc::MiMalloc = mimalloc::MiMalloc;

#[derive(Parser)]
#[command(name = "gatesync")]
#[command(version)]
#[command(about = "Sync DNS/SNI blocklist feeds into Zero Trust Gateway lists and rules")]
struct Cli {
    /// Configuration file path
    #[arg(short = 'c', long, value_name = "FILE", global = true)]
    config: Option<String>,

    /// Log level (trace, debug, info, warn, error)
    #[arg(long, global = true)]
    log_level: Option<String>,

    /// Compute everything but never touch the gateway
    #[arg(long, global = true)]
    dry_run: bool,

    /// Gateway account id
    #[arg(long, env = "GATESYNC_ACCOUNT_ID", hide_env_values = true, global = true)]
    account_id: Option<String>,

    /// Gateway API token
    #[arg(long, env = "GATESYNC_API_TOKEN", hide_env_values = true, global = true)]
    api_token: Option<String>,

    /// Telegram bot token
    #[arg(long, env = "GATESYNC_TELEGRAM_TOKEN", hide_env_values = true, global = true)]
    telegram_token: Option<String>,

    /// Telegram chat id
    #[arg(long, env = "GATESYNC_TELEGRAM_CHAT_ID", global = true)]
    telegram_chat_id: Option<String>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Clone, Copy, PartialEq, Eq)]
enum Command {
    /// Run one sync and exit
    Sync,
    /// Sync every `sync.interval_secs` until interrupted
    Run {
        /// Wait one interval before the first sync
        #[arg(long)]
        no_initial_sync: bool,
    },
    /// Delete every list and rule managed by gatesync
    Purge,
    /// Fetch and reconcile feeds, print the result; implies --dry-run
    Check {
        /// Print the report as JSON
        #[arg(long)]
        json: bool,
    },
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let cli_overrides = CliOverrides {
        account_id: cli.account_id.clone(),
        api_token: cli.api_token.clone(),
        telegram_bot_token: cli.telegram_token.clone(),
        telegram_chat_id: cli.telegram_chat_id.clone(),
        log_level: cli.log_level.clone(),
        dry_run: cli.dry_run || matches!(cli.command, Command::Check { .. }),
    };

    let config = bootstrap::load_config(cli.config.as_deref(), cli_overrides)?;
    bootstrap::init_logging(&config.logging);

    info!("gatesync v{}", env!("CARGO_PKG_VERSION"));

    match cli.command {
        Command::Sync => sync(&config).await,
        Command::Run { no_initial_sync } => run(&config, !no_initial_sync).await,
        Command::Purge => purge(&config).await,
        Command::Check { json } => check(&config, json).await,
    }
}

async fn sync(config: &Config) -> anyhow::Result<()> {
    config.validate()?;
    let use_cases = di::UseCases::new(&di::Adapters::new(config)?);

    let report = use_cases
        .sync_gateway
        .execute(&config.sync_request())
        .await?;
    info!(applied = report.applied, "{}", report.summary());
    Ok(())
}

async fn run(config: &Config, run_at_start: bool) -> anyhow::Result<()> {
    config.validate()?;
    let use_cases = di::UseCases::new(&di::Adapters::new(config)?);

    let shutdown = CancellationToken::new();
    let job = GatewaySyncJob::new(use_cases.sync_gateway.clone(), config.sync_request())
        .with_interval(config.sync.interval_secs)
        .with_run_at_start(run_at_start);

    let handles = JobRunner::new()
        .with_gateway_sync(job)
        .with_shutdown_token(shutdown.clone())
        .start()
        .await;

    tokio::signal::ctrl_c().await?;
    info!("Shutdown requested, waiting for the current run to finish");
    shutdown.cancel();

    for handle in handles {
        if let Err(e) = handle.await {
            error!(error = %e, "Background job panicked");
        }
    }

    info!("Shutdown complete");
    Ok(())
}

async fn purge(config: &Config) -> anyhow::Result<()> {
    if config.sync.dry_run {
        info!("Dry run, purge skipped");
        return Ok(());
    }

    config.validate_credentials()?;
    let use_cases = di::UseCases::new(&di::Adapters::new(config)?);

    let (rules, lists) = use_cases
        .purge_gateway
        .execute(&config.sync_request())
        .await?;
    info!(rules, lists, "Purge complete");
    Ok(())
}

async fn check(config: &Config, json: bool) -> anyhow::Result<()> {
    config.validate()?;
    let mut adapters = di::Adapters::new(config)?;
    adapters.notifier = Arc::new(LogNotifier);
    let use_cases = di::UseCases::new(&adapters);

    let report = use_cases
        .sync_gateway
        .execute(&config.sync_request())
        .await?;

    if json {
        println!("{}", serde_json::to_string_pretty(&report)?);
    } else {
        println!("{}", report.summary());
    }
    Ok(())
}
