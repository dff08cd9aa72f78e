/// Encore - playlist history and preferences from the terminal
use anyhow::Context;
use clap::Parser;
use encore_cli::{open_store, App, Cli, EncoreConfig};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Logs go to stderr so command output can be piped
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "encore_cli=info,encore_playlist=info,encore_storage=warn".into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    let cli = Cli::parse();

    let config = EncoreConfig::load(cli.config.as_deref()).context("failed to load configuration")?;
    let store = open_store(&config)
        .await
        .context("failed to open storage backend")?;

    let app = App::new(config, store);
    let mut stdout = std::io::stdout().lock();
    app.run(cli.command, &mut stdout).await?;

    Ok(())
}
