//! Configuration loading and validation

mod endpoint;
mod file;

pub use endpoint::EndpointConfig;
pub use file::{ConfigFile, PriceConfig, Settings, TelegramConfig};
