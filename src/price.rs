//! PAC/USDT price quote from the Exbitron ticker API
//!
//! The feed is best-effort: any transport, decode, or parse failure yields
//! `None` and the status message renders the sentinel instead. A missing
//! quote must never fail a cycle.

use serde::Deserialize;
use std::collections::HashMap;
use std::time::Duration;

/// Default Exbitron CMC-style ticker endpoint
pub const DEFAULT_PRICE_ENDPOINT: &str = "https://api.exbitron.digital/api/v1/cmc/ticker";

/// Ticker group and symbol the bot reads from the feed
const TICKER_GROUP: &str = "ticker_name";
const TICKER_SYMBOL: &str = "PAC_USDT";

/// One ticker entry; only the last price is read
#[derive(Debug, Deserialize)]
struct Ticker {
    last_price: String,
}

/// HTTP client for the price feed
pub struct PriceClient {
    http: reqwest::Client,
    url: String,
}

impl PriceClient {
    /// Create a client for the given ticker endpoint
    pub fn new(url: impl Into<String>, timeout_secs: u64) -> Result<Self, reqwest::Error> {
        let http = reqwest::Client::builder()
            .timeout(Duration::from_secs(timeout_secs))
            .build()?;

        Ok(Self {
            http,
            url: url.into(),
        })
    }

    /// Fetch the current PAC/USDT price, or `None` if the feed is
    /// unavailable or the quote cannot be parsed.
    pub async fn pac_price(&self) -> Option<f64> {
        let response = match self.http.get(&self.url).send().await {
            Ok(r) => r,
            Err(e) => {
                tracing::debug!(%e, "price feed unreachable");
                return None;
            }
        };

        let tickers: HashMap<String, HashMap<String, Ticker>> = match response.json().await {
            Ok(t) => t,
            Err(e) => {
                tracing::debug!(%e, "price feed returned malformed payload");
                return None;
            }
        };

        let quote = tickers.get(TICKER_GROUP)?.get(TICKER_SYMBOL)?;

        match quote.last_price.parse::<f64>() {
            Ok(price) => Some(price),
            Err(e) => {
                tracing::debug!(%e, raw = %quote.last_price, "price quote is not numeric");
                None
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    async fn client_for(server: &mockito::Server) -> PriceClient {
        PriceClient::new(format!("{}/ticker", server.url()), 5).unwrap()
    }

    #[tokio::test]
    async fn test_price_happy_path() {
        let mut server = mockito::Server::new_async().await;
        server
            .mock("GET", "/ticker")
            .with_status(200)
            .with_body(r#"{"ticker_name": {"PAC_USDT": {"last_price": "0.0421"}}}"#)
            .create_async()
            .await;

        let price = client_for(&server).await.pac_price().await;
        assert_eq!(price, Some(0.0421));
    }

    #[tokio::test]
    async fn test_missing_symbol_yields_none() {
        let mut server = mockito::Server::new_async().await;
        server
            .mock("GET", "/ticker")
            .with_status(200)
            .with_body(r#"{"ticker_name": {"BTC_USDT": {"last_price": "60000"}}}"#)
            .create_async()
            .await;

        assert_eq!(client_for(&server).await.pac_price().await, None);
    }

    #[tokio::test]
    async fn test_malformed_payload_yields_none() {
        let mut server = mockito::Server::new_async().await;
        server
            .mock("GET", "/ticker")
            .with_status(200)
            .with_body("not json at all")
            .create_async()
            .await;

        assert_eq!(client_for(&server).await.pac_price().await, None);
    }

    #[tokio::test]
    async fn test_non_numeric_quote_yields_none() {
        let mut server = mockito::Server::new_async().await;
        server
            .mock("GET", "/ticker")
            .with_status(200)
            .with_body(r#"{"ticker_name": {"PAC_USDT": {"last_price": "n/a"}}}"#)
            .create_async()
            .await;

        assert_eq!(client_for(&server).await.pac_price().await, None);
    }

    #[tokio::test]
    async fn test_unreachable_feed_yields_none() {
        let client = PriceClient::new("http://127.0.0.1:9/ticker", 2).unwrap();
        assert_eq!(client.pac_price().await, None);
    }
}
