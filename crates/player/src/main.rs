//! Skirmish - terminal client binary.

use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use skirmish_player::config::ClientConfig;

#[tokio::main(flavor = "current_thread")]
async fn main() -> anyhow::Result<()> {
    if let Err(e) = dotenvy::dotenv() {
        if !e.not_found() {
            return Err(e.into());
        }
    }

    // Logs go to stderr; stdout belongs to the terminal renderer.
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "skirmish_player=info".into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    let config = ClientConfig::from_env()?;
    tracing::info!(?config, "Loaded configuration");

    skirmish_player::runner::run(config).await
}
