use std::env;

use advisor_api::build_app;
use advisor_observability::init_tracing;
use anyhow::{Context, Result};

#[tokio::main]
async fn main() -> Result<()> {
    init_tracing("advisor_api");

    let bind = env::var("ADVISOR_BIND").unwrap_or_else(|_| "0.0.0.0:5050".to_string());

    let app = build_app()?;

    let listener = tokio::net::TcpListener::bind(&bind)
        .await
        .with_context(|| format!("failed to bind {bind}"))?;
    tracing::info!(bind = %bind, "travel advisor api started");

    axum::serve(listener, app).await?;
    Ok(())
}
