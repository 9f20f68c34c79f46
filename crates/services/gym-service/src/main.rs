//! gymctl - command-line front end for the gym service.

use clap::Parser;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use gym_service_lib::{
    cli::Cli,
    commands,
    config::GymServiceConfig,
    GymApp,
};

#[tokio::main]
async fn main() {
    let cli = Cli::parse();

    let mut config = GymServiceConfig::from_env();
    init_tracing(cli.verbose, &config.log.level);

    if let Some(dir) = cli.data_dir {
        config.storage.data_dir = dir;
    }
    tracing::debug!(?config, "Configuration loaded");

    let app = match GymApp::open(config).await {
        Ok(app) => app,
        Err(e) => {
            tracing::error!("Failed to open storage: {}", e);
            std::process::exit(1);
        }
    };

    if let Err(e) = commands::execute(cli.command, &app).await {
        tracing::debug!(code = e.code(), "Command failed: {}", e);
        eprintln!("{}", e.user_message());
        std::process::exit(1);
    }
}

/// Initialize tracing subscriber
fn init_tracing(verbose: bool, default_level: &str) {
    let filter = if verbose {
        "debug".to_string()
    } else {
        std::env::var("RUST_LOG").unwrap_or_else(|_| default_level.to_string())
    };

    tracing_subscriber::registry()
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .with(tracing_subscriber::EnvFilter::new(filter))
        .init();
}
