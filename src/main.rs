use anyhow::{Context, Result};
use clap::Parser;
use product_lens_relay::models::Config;
use product_lens_relay::relay::Relay;
use product_lens_relay::server::{build_router, shutdown_signal};
use std::net::SocketAddr;
use std::sync::Arc;
use tokio::net::TcpListener;
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[derive(Debug, Parser)]
#[command(name = "product-lens-relay")]
#[command(about = "Relay product analysis requests to Gemini")]
struct CliArgs {
    /// Address to listen on.
    #[arg(long, value_name = "ADDR", default_value = "0.0.0.0:8888")]
    bind: SocketAddr,
}

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "product_lens_relay=info,tower_http=info".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let args = CliArgs::parse();

    info!("Starting product-lens-relay");

    let config = Config::from_env().context("Failed to load configuration")?;

    // Reuse one HTTP connection pool across invocations.
    let relay = Arc::new(Relay::from_config(&config, reqwest::Client::new()));
    let app = build_router(relay);

    let listener = TcpListener::bind(args.bind)
        .await
        .with_context(|| format!("Failed to bind {}", args.bind))?;
    info!("Listening on {}", args.bind);

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    info!("Server stopped");
    Ok(())
}
