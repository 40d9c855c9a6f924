mod coffee;
mod config;
mod service;
mod store;

// HTTP transport (requires "http" feature)
#[cfg(feature = "http")]
pub mod http;

pub use coffee::{location_of, Coffee, CoffeeId, CoffeeInput, RESOURCE_PATH};
pub use config::{Config, ConfigError};
pub use service::{CoffeeService, ServiceError};
pub use store::{CoffeeStore, InMemoryCoffeeStore, StoreError};
