use std::num::NonZeroU32;
use std::time::Duration;

use async_trait::async_trait;
use governor::clock::DefaultClock;
use governor::state::{InMemoryState, NotKeyed};
use governor::{Quota, RateLimiter};
use reqwest::{header, Url};
use rust_decimal::Decimal;
use tracing::{debug, trace};

use crate::address::Address;
use crate::error::{ConfigError, UpstreamError, UpstreamErrorKind};
use crate::http::parse_endpoint;
use crate::types::TransactionRecord;

use super::super::types::ServerInfo;
use super::super::LedgerRpc;
use super::parsing::{parse_balance, parse_server_info, parse_transactions};
use super::protocol::{unwrap_envelope, RpcRequest};

/// Default per-request timeout for ledger calls.
pub const DEFAULT_LEDGER_TIMEOUT: Duration = Duration::from_secs(15);

type DirectRateLimiter = RateLimiter<NotKeyed, InMemoryState, DefaultClock>;

/// `rippled` JSON-RPC client over HTTP(S).
pub struct HttpLedgerClient {
    client: reqwest::Client,
    url: Url,
    timeout: Duration,
    limiter: Option<DirectRateLimiter>,
}

impl HttpLedgerClient {
    /// Create a client for an `http://` or `https://` endpoint.
    ///
    /// `timeout` bounds each call end to end, including any wait for the rate
    /// limiter. If `requests_per_second` is set, outbound calls are
    /// rate-limited client side.
    pub fn new(
        endpoint: &str,
        timeout: Duration,
        requests_per_second: Option<u32>,
    ) -> Result<Self, ConfigError> {
        let url = parse_endpoint(endpoint)?;

        let client = reqwest::Client::builder()
            .connect_timeout(timeout.min(Duration::from_secs(10)))
            .timeout(timeout)
            .pool_max_idle_per_host(32)
            .tcp_nodelay(true)
            .build()?;

        let limiter = match requests_per_second {
            None => None,
            Some(limit) => {
                let limit = NonZeroU32::new(limit).ok_or_else(|| {
                    ConfigError::InvalidSetting("requests_per_second must be at least 1".to_owned())
                })?;
                Some(RateLimiter::direct(Quota::per_second(limit)))
            }
        };

        Ok(Self {
            client,
            url,
            timeout,
            limiter,
        })
    }

    async fn wait_for_rate_limit(&self) {
        if let Some(limiter) = &self.limiter {
            limiter.until_ready().await;
        }
    }

    async fn rpc_call(
        &self,
        method: &str,
        params: serde_json::Value,
    ) -> Result<serde_json::Value, UpstreamError> {
        tokio::time::timeout(self.timeout, self.send_rpc(method, params))
            .await
            .map_err(|_| {
                UpstreamError::new(
                    UpstreamErrorKind::Transport,
                    method,
                    format!("no response within {:?}", self.timeout),
                )
            })?
    }

    async fn send_rpc(
        &self,
        method: &str,
        params: serde_json::Value,
    ) -> Result<serde_json::Value, UpstreamError> {
        self.wait_for_rate_limit().await;
        debug!(rpc.method = method, "rpc call");
        let req = RpcRequest {
            method,
            params: [params],
        };

        let response = self
            .client
            .post(self.url.clone())
            .header(header::CONTENT_TYPE, "application/json")
            .json(&req)
            .send()
            .await
            .map_err(|e| UpstreamError::from_reqwest(method, e))?;
        let status = response.status();

        let body = response
            .text()
            .await
            .map_err(|e| UpstreamError::from_reqwest(method, e))?;
        debug!(rpc.method = method, %status, body_len = body.len(), "rpc response");
        trace!(rpc.method = method, body = %body, "rpc response body");

        unwrap_envelope(method, status, &body)
    }
}

#[async_trait]
impl LedgerRpc for HttpLedgerClient {
    async fn fetch_balance(&self, address: &Address) -> Result<Decimal, UpstreamError> {
        const METHOD: &str = "account_info";
        let result = self
            .rpc_call(
                METHOD,
                serde_json::json!({
                    "account": address.as_str(),
                    "ledger_index": "validated",
                }),
            )
            .await?;
        parse_balance(METHOD, &result)
    }

    async fn fetch_transactions(
        &self,
        address: &Address,
        limit: u32,
    ) -> Result<Vec<TransactionRecord>, UpstreamError> {
        const METHOD: &str = "account_tx";
        let result = self
            .rpc_call(
                METHOD,
                serde_json::json!({
                    "account": address.as_str(),
                    "limit": limit,
                    "ledger_index_min": -1,
                    "binary": false,
                }),
            )
            .await?;
        parse_transactions(METHOD, &result)
    }

    async fn server_info(&self) -> Result<ServerInfo, UpstreamError> {
        const METHOD: &str = "server_info";
        let result = self.rpc_call(METHOD, serde_json::json!({})).await?;
        parse_server_info(METHOD, result)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn new_rejects_zero_rate_limit() {
        let err = HttpLedgerClient::new("http://127.0.0.1:5005", DEFAULT_LEDGER_TIMEOUT, Some(0))
            .err()
            .expect("zero rate limit must be rejected");
        assert!(err.to_string().contains("at least 1"));
    }

    #[test]
    fn new_rejects_non_http_endpoint() {
        assert!(HttpLedgerClient::new("ftp://example.com", DEFAULT_LEDGER_TIMEOUT, None).is_err());
    }

    #[test]
    fn request_body_matches_wire_shape() {
        let req = RpcRequest {
            method: "account_info",
            params: [serde_json::json!({ "account": "rX", "ledger_index": "validated" })],
        };
        assert_eq!(
            serde_json::to_value(&req).expect("serialize"),
            serde_json::json!({
                "method": "account_info",
                "params": [{ "account": "rX", "ledger_index": "validated" }],
            })
        );
    }
}
