use std::sync::Arc;

use coffee_service::{http, CoffeeService, Config, InMemoryCoffeeStore};
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let config = Config::from_env()?;
    let service = Arc::new(CoffeeService::new(InMemoryCoffeeStore::new()));

    http::serve(service, &config.bind_addr()).await?;
    Ok(())
}
