//! Circulating supply calculation
//!
//! Derives the circulating supply from the chain totals and the balances
//! of the known reserve addresses, each fetched through the failover pool.
//! Stateless and idempotent: fresh inputs every invocation.

use crate::error::SupplyError;
use crate::rpc::ClientManager;

/// Per-block emission, in minimal currency units
pub const BLOCK_REWARD: i64 = 1_000_000_000;

/// Warm-wallet reserve treated as permanently out of circulation,
/// in minimal currency units
pub const WARM_WALLET_RESERVE: i64 = 630_000_000_000_000;

/// A known reserve address with its maximum allocation
#[derive(Debug, Clone, Copy)]
pub struct Reserve {
    /// Account address holding the reserve
    pub address: &'static str,
    /// Maximum allocation, in minimal currency units
    pub allocation: i64,
}

/// The fixed reserve table. Static for the process lifetime.
pub const RESERVES: [Reserve; 6] = [
    Reserve {
        address: "pc1z2r0fmu8sg2ffa0tgrr08gnefcxl2kq7wvquf8z",
        allocation: 8_400_000_000_000_000,
    },
    Reserve {
        address: "pc1zprhnvcsy3pthekdcu28cw8muw4f432hkwgfasv",
        allocation: 6_300_000_000_000_000,
    },
    Reserve {
        address: "pc1znn2qxsugfrt7j4608zvtnxf8dnz8skrxguyf45",
        allocation: 4_200_000_000_000_000,
    },
    Reserve {
        address: "pc1zs64vdggjcshumjwzaskhfn0j9gfpkvche3kxd3",
        allocation: 2_100_000_000_000_000,
    },
    // warm wallets
    Reserve {
        address: "pc1zuavu4sjcxcx9zsl8rlwwx0amnl94sp0el3u37g",
        allocation: 420_000_000_000_000,
    },
    Reserve {
        address: "pc1zf0gyc4kxlfsvu64pheqzmk8r9eyzxqvxlk6s6t",
        allocation: 210_000_000_000_000,
    },
];

/// Compute the circulating supply as of the most recent height known to
/// any responsive endpoint.
///
/// Chain info is the single fatal dependency: if it cannot be fetched the
/// computation fails with [`SupplyError::ChainInfoUnavailable`] before any
/// reserve balance is queried. Individual reserve-balance failures are
/// tolerated; a failed lookup counts the address as fully allocated
/// (zero released) for this round. This understates the supply during
/// partial outages; callers that need stricter semantics should treat a
/// round with warnings as suspect.
pub async fn circulating_supply(manager: &ClientManager) -> Result<i64, SupplyError> {
    let info = manager
        .chain_info()
        .await
        .map_err(SupplyError::ChainInfoUnavailable)?;

    let minted = i64::from(info.last_block_height) * BLOCK_REWARD;

    let mut released = 0i64;
    for reserve in &RESERVES {
        match manager.account_balance(reserve.address).await {
            Ok(balance) => released += reserve.allocation - balance,
            Err(e) => {
                tracing::warn!(
                    address = reserve.address,
                    %e,
                    "reserve balance unavailable, counting as fully allocated"
                );
            }
        }
    }

    Ok(released + minted - info.total_power - WARM_WALLET_RESERVE)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::RpcError;
    use crate::rpc::{ChainInfo, NetworkInfo, NodeClient};
    use async_trait::async_trait;
    use std::collections::HashMap;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::Arc;

    /// Node whose chain info and balances are fixed up front.
    /// Addresses absent from `balances` fail their lookup.
    struct FixtureNode {
        chain_info: Option<ChainInfo>,
        balances: HashMap<&'static str, i64>,
        balance_queries: Arc<AtomicUsize>,
    }

    impl FixtureNode {
        fn new(chain_info: Option<ChainInfo>, balances: HashMap<&'static str, i64>) -> Self {
            Self {
                chain_info,
                balances,
                balance_queries: Arc::new(AtomicUsize::new(0)),
            }
        }
    }

    #[async_trait]
    impl NodeClient for FixtureNode {
        fn endpoint(&self) -> &str {
            "fixture"
        }

        async fn chain_info(&self) -> Result<ChainInfo, RpcError> {
            self.chain_info
                .clone()
                .ok_or_else(|| RpcError::Unreachable("fixture is down".to_string()))
        }

        async fn network_info(&self) -> Result<NetworkInfo, RpcError> {
            Err(RpcError::Unreachable("fixture is down".to_string()))
        }

        async fn account_balance(&self, address: &str) -> Result<i64, RpcError> {
            self.balance_queries.fetch_add(1, Ordering::SeqCst);
            self.balances
                .get(address)
                .copied()
                .ok_or_else(|| RpcError::NotFound(format!("account {address}")))
        }

        async fn last_block_time(&self) -> Result<(u64, u32), RpcError> {
            Err(RpcError::Unreachable("fixture is down".to_string()))
        }
    }

    fn chain_info(height: u32, total_power: i64) -> ChainInfo {
        ChainInfo {
            last_block_height: height,
            last_block_hash: String::new(),
            total_accounts: 0,
            total_validators: 0,
            total_power,
            committee_power: 0,
        }
    }

    fn full_allocations() -> HashMap<&'static str, i64> {
        RESERVES.iter().map(|r| (r.address, r.allocation)).collect()
    }

    fn manager_with(node: FixtureNode) -> ClientManager {
        let mut manager = ClientManager::new();
        manager.register(Box::new(node));
        manager
    }

    #[test]
    fn test_reserve_table_shape() {
        assert_eq!(RESERVES.len(), 6);

        // Addresses are unique
        let mut addresses: Vec<_> = RESERVES.iter().map(|r| r.address).collect();
        addresses.sort_unstable();
        addresses.dedup();
        assert_eq!(addresses.len(), 6);

        assert_eq!(RESERVES[0].allocation, 8_400_000_000_000_000);
        assert_eq!(RESERVES[5].allocation, 210_000_000_000_000);
        assert!(RESERVES.iter().all(|r| r.address.starts_with("pc1z")));
    }

    #[tokio::test]
    async fn test_nothing_released_yields_minted_minus_staked_and_warm() {
        let total_power = 40_000_000_000i64;
        let manager = manager_with(FixtureNode::new(
            Some(chain_info(100, total_power)),
            full_allocations(),
        ));

        let supply = circulating_supply(&manager).await.unwrap();

        // released-sum is 0 when every reserve still holds its full allocation
        assert_eq!(supply, 100 * BLOCK_REWARD - total_power - WARM_WALLET_RESERVE);
    }

    #[tokio::test]
    async fn test_released_balances_add_to_supply() {
        let mut balances = full_allocations();
        // First reserve has paid out 1000 units
        balances.insert(RESERVES[0].address, RESERVES[0].allocation - 1_000);

        let manager = manager_with(FixtureNode::new(Some(chain_info(100, 0)), balances));
        let supply = circulating_supply(&manager).await.unwrap();

        assert_eq!(supply, 1_000 + 100 * BLOCK_REWARD - WARM_WALLET_RESERVE);
    }

    #[tokio::test]
    async fn test_failed_reserve_lookup_contributes_zero_released() {
        let mut balances = full_allocations();
        // Reserve #3's lookup fails; every other reserve has released 500
        balances.remove(RESERVES[2].address);
        for reserve in RESERVES.iter().filter(|r| r.address != RESERVES[2].address) {
            balances.insert(reserve.address, reserve.allocation - 500);
        }

        let manager = manager_with(FixtureNode::new(Some(chain_info(100, 0)), balances));
        let supply = circulating_supply(&manager).await.unwrap();

        // 5 reserves contribute 500 each; the failed one contributes 0,
        // exactly as if its balance equaled its full allocation.
        assert_eq!(supply, 5 * 500 + 100 * BLOCK_REWARD - WARM_WALLET_RESERVE);
    }

    #[tokio::test]
    async fn test_chain_info_failure_short_circuits_before_balance_queries() {
        let node = FixtureNode::new(None, full_allocations());
        let queries = node.balance_queries.clone();
        let manager = manager_with(node);

        let err = circulating_supply(&manager).await.unwrap_err();

        assert!(matches!(err, SupplyError::ChainInfoUnavailable(_)));
        assert_eq!(queries.load(Ordering::SeqCst), 0);
    }
}
