use anyhow::Context;
use clap::Parser;
use storefront_client_lib::cli::{self, Cli};
use storefront_client_lib::{ClientConfig, Storefront};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    storefront_client_lib::init_tracing();

    let cli = Cli::parse();
    let config = ClientConfig::from_env();
    tracing::debug!(?config, "Loaded configuration");

    let app = Storefront::init(config)
        .await
        .context("failed to start storefront")?;

    cli::run(cli.command, &app, &mut std::io::stdout()).await
}
