use std::sync::Arc;

use anyhow::Context;

use kontakt_api::app::{build_app, services};
use kontakt_infra::Config;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Config first so RUST_LOG / LOG_FORMAT from `.env` reach the subscriber.
    let config = Config::from_env().context("failed to load configuration")?;
    kontakt_observability::init();

    let services = services::build_services(&config)
        .await
        .context("failed to initialize contact store")?;
    let app = build_app(Arc::new(services));

    let addr = config.listen_addr();
    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .with_context(|| format!("failed to bind {addr}"))?;

    tracing::info!("listening on {}", listener.local_addr()?);

    axum::serve(listener, app).await?;
    Ok(())
}
