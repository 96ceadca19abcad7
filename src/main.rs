use std::sync::Arc;

use record_store::config::Config;
use record_store::gateway;
use record_store::store::service::RecordStore;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // A `.env` file in the working directory seeds PORT and DATA_DIR;
    // variables already exported win.
    dotenvy::dotenv().ok();

    tracing_subscriber::fmt()
        .with_max_level(tracing::Level::INFO)
        .init();

    let args: Vec<String> = std::env::args().skip(1).collect();
    let config = Config::load(&args)?;

    // Backend is fixed for the process lifetime; a failed open is fatal.
    let store = match &config.data_dir {
        Some(dir) => {
            tracing::info!("Opening durable record store in {}", dir.display());
            Arc::new(RecordStore::durable(dir)?)
        }
        None => {
            tracing::info!("Using transient in-memory record store");
            Arc::new(RecordStore::in_memory())
        }
    };

    let app = gateway::router(store);

    let listener = tokio::net::TcpListener::bind(config.bind_addr).await?;
    tracing::info!("Server running on http://{}", listener.local_addr()?);

    axum::serve(listener, app).await?;

    Ok(())
}
