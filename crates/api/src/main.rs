use std::env;

use anyhow::Result;
use rihla_api::build_app;
use rihla_observability::init_tracing;

#[tokio::main]
async fn main() -> Result<()> {
    init_tracing("rihla_api");

    let data_dir = env::var("RIHLA_DATA_DIR").unwrap_or_else(|_| "data".to_string());
    let bind = env::var("RIHLA_BIND").unwrap_or_else(|_| "0.0.0.0:8080".to_string());

    let app = build_app(&data_dir)?;

    let listener = tokio::net::TcpListener::bind(&bind).await?;
    tracing::info!(bind = %bind, data_dir = %data_dir, "rihla itinerary api started");

    axum::serve(listener, app).await?;
    Ok(())
}
