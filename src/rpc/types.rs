//! Pactus JSON-RPC data model
//!
//! Only the fields the status bot reads are modeled; everything else the
//! node returns is ignored during deserialization.

use serde::{Deserialize, Serialize};

/// Snapshot of the chain as reported by `pactus.blockchain.get_blockchain_info`.
///
/// Produced fresh on every query, never cached.
#[derive(Debug, Clone, Deserialize)]
pub struct ChainInfo {
    /// Height of the last committed block
    pub last_block_height: u32,
    /// Hash of the last committed block
    #[serde(default)]
    pub last_block_hash: String,
    /// Total number of accounts
    pub total_accounts: i32,
    /// Total number of validators
    pub total_validators: i32,
    /// Total staked power, in minimal currency units
    pub total_power: i64,
    /// Power of the current committee, in minimal currency units
    pub committee_power: i64,
}

/// Network-level info as reported by `pactus.network.get_network_info`.
#[derive(Debug, Clone, Deserialize)]
pub struct NetworkInfo {
    /// Name of the network (e.g. "pactus-mainnet")
    #[serde(default)]
    pub network_name: String,
    /// Number of currently connected peers
    #[serde(default)]
    pub connected_peers_count: u32,
}

/// Subset of `pactus.blockchain.get_block` the bot reads.
#[derive(Debug, Clone, Deserialize)]
pub struct BlockInfo {
    /// Unix timestamp the block was created at
    pub block_time: u64,
    /// Height of the block
    #[serde(default)]
    pub height: u32,
}

/// Response shape of `pactus.blockchain.get_account`.
#[derive(Debug, Clone, Deserialize)]
pub struct AccountResponse {
    pub account: Account,
}

/// Account data embedded in [`AccountResponse`].
#[derive(Debug, Clone, Deserialize)]
pub struct Account {
    /// Account balance in minimal currency units
    pub balance: i64,
}

/// Block verbosity levels accepted by `get_block`
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BlockVerbosity {
    /// Header and basic info only
    Info = 0,
    /// Info plus transaction ids
    Transactions = 1,
    /// Everything
    Detail = 2,
}

/// JSON-RPC 2.0 request envelope
#[derive(Debug, Serialize)]
pub struct JsonRpcRequest<'a> {
    pub jsonrpc: &'static str,
    pub id: u64,
    pub method: &'a str,
    pub params: serde_json::Value,
}

impl<'a> JsonRpcRequest<'a> {
    pub fn new(id: u64, method: &'a str, params: serde_json::Value) -> Self {
        Self {
            jsonrpc: "2.0",
            id,
            method,
            params,
        }
    }
}

/// JSON-RPC 2.0 response envelope
#[derive(Debug, Deserialize)]
pub struct JsonRpcResponse<T> {
    #[serde(default = "Option::default")]
    pub result: Option<T>,
    #[serde(default = "Option::default")]
    pub error: Option<JsonRpcErrorObject>,
}

/// JSON-RPC 2.0 error object
#[derive(Debug, Deserialize)]
pub struct JsonRpcErrorObject {
    pub code: i64,
    pub message: String,
}
