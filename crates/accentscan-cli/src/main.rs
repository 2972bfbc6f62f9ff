mod args;
mod commands;
mod web;

use anyhow::Result;
use clap::Parser;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

use args::{Cli, Commands};

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    // Initialize logging based on verbosity
    let filter = match cli.verbose {
        0 => "accentscan=info,accentscan_core=info,accentscan_classify=info",
        1 => "accentscan=debug,accentscan_core=debug,accentscan_classify=debug",
        2 => "accentscan=trace,accentscan_core=trace,accentscan_classify=trace",
        _ => "trace",
    };

    tracing_subscriber::registry()
        .with(fmt::layer().with_target(false).without_time())
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(filter)))
        .init();

    match cli.command {
        Some(Commands::Analyze { url, json }) => {
            commands::analyze::run(&url, json, cli.config.as_deref()).await
        }
        Some(Commands::Serve { bind }) => {
            commands::serve::run(bind.as_deref(), cli.config.as_deref()).await
        }
        Some(Commands::Doctor) => commands::doctor::run(cli.config.as_deref()).await,
        Some(Commands::Config) => commands::config::run(cli.config.as_deref()).await,
        None => {
            // If URL provided directly, treat as analyze command
            if let Some(url) = cli.url {
                commands::analyze::run(&url, cli.json, cli.config.as_deref()).await
            } else {
                // No URL, print help
                use clap::CommandFactory;
                Cli::command().print_help()?;
                println!();
                Ok(())
            }
        }
    }
}
