//! Site Admin CLI
//!
//! Command-line console for the landing page backend.

use clap::Parser;
use site_admin::cli::Cli;
use site_admin::config::{Config, LoggingConfig};
use site_admin::error::ApiError;
use site_admin::shell::Shell;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() {
    let cli = Cli::parse();

    let mut config = match &cli.config {
        Some(path) => match Config::load_with_env(path) {
            Ok(config) => config,
            Err(e) => {
                eprintln!("Error: {}", e);
                std::process::exit(2);
            }
        },
        None => Config::load_default(),
    };
    if let Some(url) = cli.api_url.clone() {
        config.api.base_url = url;
    }

    init_logging(&config.logging);

    if let Err(err) = run(cli, config).await {
        match err.downcast_ref::<ApiError>() {
            Some(api) => {
                eprintln!("Error: {}", api.user_message());
                if api.is_unauthorized() {
                    eprintln!("Run `site-admin login` to sign in again.");
                }
            }
            None => eprintln!("Error: {:#}", err),
        }
        std::process::exit(1);
    }
}

async fn run(cli: Cli, config: Config) -> anyhow::Result<()> {
    tracing::debug!(api = %config.api.base_url, "Site Admin v{}", env!("CARGO_PKG_VERSION"));

    let shell = Shell::open(config, cli.format)?;
    let stdout = std::io::stdout();
    let mut out = stdout.lock();
    shell.run(cli.command, &mut out).await
}

fn init_logging(logging: &LoggingConfig) {
    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| format!("site_admin={}", logging.level).into());

    let registry = tracing_subscriber::registry().with(filter);
    if logging.format == "json" {
        registry
            .with(tracing_subscriber::fmt::layer().json().with_writer(std::io::stderr))
            .init();
    } else {
        registry
            .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
            .init();
    }
}
