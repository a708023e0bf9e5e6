#![allow(clippy::nursery)]
#![allow(clippy::pedantic)]

use anyhow::Context;
use clap::Parser;
use hd_auth::DeskError;

mod cli;
mod commands;
mod context;
mod output;
mod ui;

#[tokio::main]
async fn main() {
    if let Err(error) = run().await {
        // Desk failures carry their own user-facing wording.
        match error.downcast_ref::<DeskError>() {
            Some(desk) => {
                tracing::debug!(error = ?desk, "command failed");
                eprintln!("hdk: {}", desk.user_message());
            }
            None => eprintln!("hdk error: {error:#}"),
        }
        std::process::exit(1);
    }
}

async fn run() -> anyhow::Result<()> {
    let cli = cli::Cli::parse();
    init_tracing(cli.quiet, cli.verbose)?;

    let flags = cli.global_flags();
    ui::init(&flags);

    let config = hd_config::HelpdeskConfig::load_with_dotenv()
        .context("failed to load helpdesk configuration")?;
    config
        .require_store()
        .context("the backing store is not configured (set HELPDESK_STORE__URL and HELPDESK_STORE__API_KEY)")?;

    let mut ctx = context::AppContext::init(config)
        .await
        .context("failed to initialize helpdesk application context")?;

    commands::dispatch::dispatch(cli.command, &mut ctx, &flags).await
}

fn init_tracing(quiet: bool, verbose: bool) -> anyhow::Result<()> {
    let level = if quiet {
        "error"
    } else if verbose {
        "debug"
    } else {
        "warn"
    };

    let filter = tracing_subscriber::EnvFilter::try_from_env("HELPDESK_LOG")
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(level));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .try_init()
        .map_err(|error| anyhow::anyhow!("failed to initialize tracing subscriber: {error}"))?;

    Ok(())
}
