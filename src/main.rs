use grubdash::prelude::*;
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new("grubdash=info,tower_http=info")),
        )
        .init();

    let config = GrubDashConfig::from_env()?;
    tracing::info!(
        dishes = config.seed.dishes.len(),
        orders = config.seed.orders.len(),
        "configuration loaded"
    );

    let addr = config.server.address();
    ServerBuilder::new().with_config(&config)?.serve(&addr).await
}
