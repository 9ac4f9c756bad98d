//! Client manager: first-success failover across a pool of node clients

use crate::config::EndpointConfig;
use crate::error::{EndpointFailure, RpcError};
use crate::rpc::client::{NodeClient, PactusClient};
use crate::rpc::types::{ChainInfo, NetworkInfo};
use futures::future::BoxFuture;

/// Ordered pool of node clients behind single logical query operations.
///
/// Registration order is failover priority; by convention the first entry
/// is the preferred/local node. Every query iterates the pool in order and
/// returns the first success, so an endpoint after the first responder is
/// never contacted. When the whole pool fails, the aggregate error carries
/// each endpoint's cause for diagnostics.
///
/// The pool is immutable during querying: clients are registered one at a
/// time before the first query is issued, and the manager holds no other
/// mutable state.
pub struct ClientManager {
    clients: Vec<Box<dyn NodeClient>>,
}

impl ClientManager {
    /// Create a manager with an empty pool
    pub fn new() -> Self {
        Self {
            clients: Vec::new(),
        }
    }

    /// Build a manager from configured endpoints.
    ///
    /// Endpoints that fail client construction are skipped with a warning;
    /// reachability is not validated here.
    pub fn from_endpoints(endpoints: &[EndpointConfig], timeout_secs: u64) -> Self {
        let mut manager = Self::new();

        for endpoint in endpoints.iter().filter(|e| e.enabled) {
            match PactusClient::new(&endpoint.url, timeout_secs) {
                Ok(client) => {
                    tracing::info!(endpoint = %endpoint.url, "client added");
                    manager.register(Box::new(client));
                }
                Err(e) => {
                    tracing::warn!(endpoint = %endpoint.url, %e, "failed to create client, skipping");
                }
            }
        }

        manager
    }

    /// Register a client. Call before querying begins; the pool is not
    /// meant to change once queries are in flight.
    pub fn register(&mut self, client: Box<dyn NodeClient>) {
        self.clients.push(client);
    }

    /// Number of registered clients
    pub fn client_count(&self) -> usize {
        self.clients.len()
    }

    /// Endpoint addresses in pool order
    pub fn endpoints(&self) -> Vec<&str> {
        self.clients.iter().map(|c| c.endpoint()).collect()
    }

    /// Fetch a fresh chain snapshot from the first responsive endpoint
    pub async fn chain_info(&self) -> Result<ChainInfo, RpcError> {
        self.failover("get_blockchain_info", |c| c.chain_info())
            .await
    }

    /// Fetch network info from the first responsive endpoint
    pub async fn network_info(&self) -> Result<NetworkInfo, RpcError> {
        self.failover("get_network_info", |c| c.network_info())
            .await
    }

    /// Fetch `(block_time, block_height)` of the last committed block
    pub async fn last_block_time(&self) -> Result<(u64, u32), RpcError> {
        self.failover("last_block_time", |c| c.last_block_time())
            .await
    }

    /// Fetch an account balance from the first responsive endpoint
    pub async fn account_balance(&self, address: &str) -> Result<i64, RpcError> {
        self.failover("get_account", move |c| c.account_balance(address))
            .await
    }

    /// Run one failover cycle: try clients in pool order, return the first
    /// success, collect every failure. An empty pool fails immediately.
    async fn failover<'a, T, F>(&'a self, op: &str, f: F) -> Result<T, RpcError>
    where
        F: Fn(&'a dyn NodeClient) -> BoxFuture<'a, Result<T, RpcError>>,
    {
        let mut failures = Vec::new();

        for client in &self.clients {
            match f(client.as_ref()).await {
                Ok(value) => return Ok(value),
                Err(e) => {
                    tracing::debug!(endpoint = client.endpoint(), %e, "{op} failed, trying next endpoint");
                    failures.push(EndpointFailure {
                        endpoint: client.endpoint().to_string(),
                        error: e,
                    });
                }
            }
        }

        Err(RpcError::AllEndpointsFailed { failures })
    }
}

impl Default for ClientManager {
    fn default() -> Self {
        Self::new()
    }
}
