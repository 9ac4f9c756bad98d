//! pacstatus - Pactus network status bot
//!
//! Queries a pool of Pactus nodes with first-success failover, derives the
//! circulating supply, fetches a PAC/USDT quote, and keeps a Telegram
//! channel message up to date.
//!
//! # Example
//!
//! ```rust,no_run
//! use pacstatus::rpc::{ClientManager, PactusClient};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let mut manager = ClientManager::new();
//!     manager.register(Box::new(PactusClient::new("http://127.0.0.1:8545", 10)?));
//!     manager.register(Box::new(PactusClient::new("http://bootstrap1.pactus.org:8545", 10)?));
//!
//!     let info = manager.chain_info().await?;
//!     println!("height: {}", info.last_block_height);
//!
//!     let supply = pacstatus::supply::circulating_supply(&manager).await?;
//!     println!("circulating: {} PAC", pacstatus::status::to_coin(supply));
//!     Ok(())
//! }
//! ```

pub mod config;
pub mod error;
pub mod price;
pub mod rpc;
pub mod status;
pub mod supply;
pub mod telegram;

// Re-exports for convenience
pub use config::{ConfigFile, EndpointConfig, PriceConfig, Settings, TelegramConfig};
pub use error::{
    ConfigError, EndpointFailure, Error, Result, RpcError, SupplyError, TelegramError,
};
pub use price::PriceClient;
pub use rpc::{ChainInfo, ClientManager, NetworkInfo, NodeClient, PactusClient};
pub use status::{NetworkHealth, STALE_THRESHOLD_SECS};
pub use supply::{Reserve, BLOCK_REWARD, RESERVES, WARM_WALLET_RESERVE};
pub use telegram::TelegramClient;
