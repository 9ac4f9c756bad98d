//! Single-endpoint Pactus JSON-RPC client
//!
//! Each client wraps one HTTP connection to one node and issues one
//! synchronous round trip per operation (two for [`last_block_time`]).
//! No retry and no failover happen here; that is the [`ClientManager`]'s
//! responsibility.
//!
//! [`last_block_time`]: NodeClient::last_block_time
//! [`ClientManager`]: crate::rpc::ClientManager

use crate::error::RpcError;
use crate::rpc::types::{
    AccountResponse, BlockInfo, BlockVerbosity, ChainInfo, JsonRpcRequest, JsonRpcResponse,
    NetworkInfo,
};
use async_trait::async_trait;
use serde::de::DeserializeOwned;
use std::sync::atomic::{AtomicU64, Ordering};
use std::time::Duration;

/// One logical query surface against a single node.
///
/// The trait is the seam between the failover manager and the transport:
/// production code uses [`PactusClient`], tests substitute scripted
/// implementations.
#[async_trait]
pub trait NodeClient: Send + Sync {
    /// Address of the endpoint this client talks to
    fn endpoint(&self) -> &str;

    /// Fetch a fresh chain snapshot
    async fn chain_info(&self) -> Result<ChainInfo, RpcError>;

    /// Fetch network-level info
    async fn network_info(&self) -> Result<NetworkInfo, RpcError>;

    /// Fetch an account's balance in minimal currency units
    async fn account_balance(&self, address: &str) -> Result<i64, RpcError>;

    /// Fetch `(block_time, block_height)` of the last committed block.
    ///
    /// Compound call: chain info first, then the block at the reported
    /// height. Fails if either sub-call fails.
    async fn last_block_time(&self) -> Result<(u64, u32), RpcError>;
}

/// HTTP JSON-RPC client for a single Pactus node.
///
/// The underlying connection pool is released when the client is dropped;
/// there is no explicit close step.
pub struct PactusClient {
    http: reqwest::Client,
    url: String,
    next_id: AtomicU64,
}

impl PactusClient {
    /// Create a client for `url` with a bounded per-request deadline.
    ///
    /// A hung endpoint therefore surfaces as [`RpcError::Unreachable`]
    /// after `timeout_secs` instead of stalling the whole cycle.
    pub fn new(url: impl Into<String>, timeout_secs: u64) -> Result<Self, RpcError> {
        let http = reqwest::Client::builder()
            .timeout(Duration::from_secs(timeout_secs))
            .build()
            .map_err(|e| RpcError::Unreachable(e.to_string()))?;

        Ok(Self {
            http,
            url: url.into(),
            next_id: AtomicU64::new(1),
        })
    }

    /// Issue one JSON-RPC call and decode the result payload
    async fn call<T: DeserializeOwned>(
        &self,
        method: &str,
        params: serde_json::Value,
    ) -> Result<T, RpcError> {
        let id = self.next_id.fetch_add(1, Ordering::Relaxed);
        let request = JsonRpcRequest::new(id, method, params);

        let response = self
            .http
            .post(&self.url)
            .json(&request)
            .send()
            .await
            .map_err(transport_error)?;

        let body: JsonRpcResponse<T> = response
            .json()
            .await
            .map_err(|e| RpcError::Protocol(format!("{method}: {e}")))?;

        if let Some(err) = body.error {
            return Err(rpc_error(method, err.code, err.message));
        }

        body.result
            .ok_or_else(|| RpcError::Protocol(format!("{method}: response carried no result")))
    }
}

#[async_trait]
impl NodeClient for PactusClient {
    fn endpoint(&self) -> &str {
        &self.url
    }

    async fn chain_info(&self) -> Result<ChainInfo, RpcError> {
        self.call(
            "pactus.blockchain.get_blockchain_info",
            serde_json::json!({}),
        )
        .await
    }

    async fn network_info(&self) -> Result<NetworkInfo, RpcError> {
        self.call(
            "pactus.network.get_network_info",
            serde_json::json!({ "only_connected": true }),
        )
        .await
    }

    async fn account_balance(&self, address: &str) -> Result<i64, RpcError> {
        let response: AccountResponse = self
            .call(
                "pactus.blockchain.get_account",
                serde_json::json!({ "address": address }),
            )
            .await?;

        Ok(response.account.balance)
    }

    async fn last_block_time(&self) -> Result<(u64, u32), RpcError> {
        let info = self.chain_info().await?;

        let block: BlockInfo = self
            .call(
                "pactus.blockchain.get_block",
                serde_json::json!({
                    "height": info.last_block_height,
                    "verbosity": BlockVerbosity::Info as u8,
                }),
            )
            .await?;

        Ok((block.block_time, info.last_block_height))
    }
}

/// Map a reqwest transport error into the RPC taxonomy
fn transport_error(e: reqwest::Error) -> RpcError {
    if e.is_timeout() || e.is_connect() || e.is_request() {
        RpcError::Unreachable(e.to_string())
    } else {
        RpcError::Protocol(e.to_string())
    }
}

/// Map a JSON-RPC error object into the RPC taxonomy
fn rpc_error(method: &str, code: i64, message: String) -> RpcError {
    if message.to_lowercase().contains("not found") {
        RpcError::NotFound(message)
    } else {
        RpcError::Protocol(format!("{method}: {message} (code {code})"))
    }
}
