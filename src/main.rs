//! Development server binary: config, fixtures, serve

use anyhow::Result;
use hoard::config::AppConfig;
use hoard::server::{serve, AppState};

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "hoard=debug,tower_http=debug".into()),
        )
        .init();

    let config = match std::env::var("HOARD_CONFIG") {
        Ok(path) => AppConfig::from_yaml_file(&path)?,
        Err(_) => AppConfig::default(),
    };

    let state = AppState::in_memory();
    if config.seed_fixtures {
        hoard::fixtures::load(state.users.as_ref(), state.treasures.as_ref()).await?;
    }

    serve(state, &config.bind_addr()).await
}
