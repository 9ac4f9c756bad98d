//! RPC access to Pactus nodes: single-endpoint clients and the failover pool

mod client;
mod pool;
mod types;

pub use client::{NodeClient, PactusClient};
pub use pool::ClientManager;
pub use types::{Account, AccountResponse, BlockInfo, BlockVerbosity, ChainInfo, NetworkInfo};
