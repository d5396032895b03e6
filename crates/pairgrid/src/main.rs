//! Pairgrid server binary.
//!
//! Binds the WebSocket listener and runs the accept loop until the
//! process is terminated. `PAIRGRID_ADDR` overrides the listen
//! address; `RUST_LOG` controls log filtering.

use pairgrid::PairgridServerBuilder;
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let addr = std::env::var("PAIRGRID_ADDR")
        .unwrap_or_else(|_| "0.0.0.0:1234".to_string());

    let server = PairgridServerBuilder::new().bind(&addr).build().await?;
    tracing::info!(%addr, "pairgrid listening");

    server.run().await?;
    Ok(())
}
