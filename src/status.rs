//! Status message formatting and network health
//!
//! Pure functions over values the RPC layer already provides; nothing in
//! here touches the network.

use crate::rpc::ChainInfo;
use chrono::{DateTime, Utc};

/// Seconds without a new block before the network is reported unhealthy
pub const STALE_THRESHOLD_SECS: i64 = 15;

/// Minimal currency units per whole PAC
const UNITS_PER_PAC: i64 = 1_000_000_000;

/// Health assessment for one cycle
#[derive(Debug, Clone)]
pub struct NetworkHealth {
    /// Whether the last block is fresh enough
    pub healthy: bool,
    /// Unix timestamp of the last block
    pub last_block_time: u64,
    /// Wall-clock seconds since the last block
    pub seconds_since: i64,
}

impl NetworkHealth {
    /// Status label shown in the message
    pub fn label(&self) -> &'static str {
        if self.healthy {
            "Healthy✅"
        } else {
            "UnHealthy❌"
        }
    }

    /// Last block time formatted for the message, e.g. "27/08/2026, 14:03:59"
    pub fn formatted_block_time(&self) -> String {
        DateTime::<Utc>::from_timestamp(self.last_block_time as i64, 0)
            .map(|t| t.format("%d/%m/%Y, %H:%M:%S").to_string())
            .unwrap_or_else(|| "unknown".to_string())
    }
}

/// Assess health from the last block time and the current wall clock
pub fn assess_health(last_block_time: u64, now_unix: i64) -> NetworkHealth {
    let seconds_since = now_unix - last_block_time as i64;

    NetworkHealth {
        healthy: seconds_since <= STALE_THRESHOLD_SECS,
        last_block_time,
        seconds_since,
    }
}

/// Convert minimal currency units to whole PAC, truncating
pub fn to_coin(units: i64) -> i64 {
    units / UNITS_PER_PAC
}

/// Format an integer with thousands separators: 1234567 -> "1,234,567"
pub fn format_number(num: i64) -> String {
    let (sign, digits) = if num < 0 {
        ("-", num.unsigned_abs().to_string())
    } else {
        ("", num.to_string())
    };

    let mut formatted = String::with_capacity(digits.len() + digits.len() / 3 + 1);
    for (i, c) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            formatted.push(',');
        }
        formatted.push(c);
    }

    format!("{sign}{formatted}")
}

/// Render a price quote, or the sentinel when the feed was unavailable
pub fn format_price(price: Option<f64>) -> String {
    match price {
        Some(p) => format!("{p}"),
        None => "N/A".to_string(),
    }
}

/// Build the full channel message for one cycle
pub fn build_message(
    info: &ChainInfo,
    circulating: i64,
    health: &NetworkHealth,
    price: Option<f64>,
    last_block_height: u32,
) -> String {
    let mut s = String::new();

    s.push_str("🟢 Pactus Network Status Update\n\n");
    s.push_str(&format!(
        "⛓️ **{}** Last Block Height\n\n",
        format_number(i64::from(last_block_height))
    ));
    s.push_str(&format!(
        "👤 **{}** Accounts\n\n",
        format_number(i64::from(info.total_accounts))
    ));
    s.push_str(&format!(
        "🕵️ **{}** Validators\n\n",
        format_number(i64::from(info.total_validators))
    ));
    s.push_str(&format!(
        "🦾 **{}** PAC Staked\n\n",
        format_number(to_coin(info.total_power))
    ));
    s.push_str(&format!(
        "🦾 **{} PAC** Committee Power\n\n",
        format_number(to_coin(info.committee_power))
    ));
    s.push_str(&format!(
        "🔄 **{} PAC** Circulating Supply\n\n",
        format_number(to_coin(circulating))
    ));
    s.push_str(&format!(
        "🪙 **{}** Total PAC Exist\n\n",
        format_number(to_coin(circulating + info.total_power))
    ));

    s.push_str(
        "Note This the last price of Exbitron and it's an unofficial listing\nno financial advice/DYOR\n",
    );
    s.push_str(&format!("📈 **{}$** Exbitron Price\n\n", format_price(price)));

    s.push_str(&format!(
        "```🧑🏻‍⚕️NetworkStatus Network is {}\n\n{} is The LastBlock time and there is {} seconds passed from last block```",
        health.label(),
        health.formatted_block_time(),
        health.seconds_since
    ));

    s
}
