use std::str::FromStr;
use std::time::Duration;

use async_trait::async_trait;
use reqwest::{header, Url};
use rust_decimal::Decimal;
use tracing::{debug, trace};

use crate::error::{ConfigError, UpstreamError, UpstreamErrorKind};
use crate::http::parse_endpoint;

use super::PriceFeed;

/// Default per-request timeout for price lookups.
pub const DEFAULT_PRICE_TIMEOUT: Duration = Duration::from_secs(10);

const METHOD: &str = "simple/price";

/// CoinGecko-compatible `/simple/price` client for a single asset.
///
/// Requests `?ids=<asset>&vs_currencies=<fiat>` and reads `<asset>.<fiat>`.
pub struct HttpPriceClient {
    client: reqwest::Client,
    base: Url,
    asset: String,
    fiat: String,
}

impl HttpPriceClient {
    pub fn new(
        endpoint: &str,
        asset: &str,
        fiat: &str,
        timeout: Duration,
    ) -> Result<Self, ConfigError> {
        if asset.is_empty() || fiat.is_empty() {
            return Err(ConfigError::InvalidSetting(
                "price asset and fiat currency must be non-empty".to_owned(),
            ));
        }
        let base = parse_endpoint(endpoint)?;
        let client = reqwest::Client::builder().timeout(timeout).build()?;

        Ok(Self {
            client,
            base,
            asset: asset.to_owned(),
            fiat: fiat.to_ascii_lowercase(),
        })
    }

    fn quote_url(&self) -> Url {
        let mut url = self.base.clone();
        url.query_pairs_mut()
            .append_pair("ids", &self.asset)
            .append_pair("vs_currencies", &self.fiat);
        url
    }
}

#[async_trait]
impl PriceFeed for HttpPriceClient {
    async fn fetch_price(&self) -> Result<Decimal, UpstreamError> {
        let url = self.quote_url();
        debug!(price.asset = %self.asset, price.fiat = %self.fiat, "price request");

        let response = self
            .client
            .get(url)
            .header(header::ACCEPT, "application/json")
            .send()
            .await
            .map_err(|e| UpstreamError::from_reqwest(METHOD, e))?;
        let status = response.status();
        if !status.is_success() {
            return Err(UpstreamError::new(
                UpstreamErrorKind::Status,
                METHOD,
                format!("HTTP {status}"),
            ));
        }

        let body = response
            .text()
            .await
            .map_err(|e| UpstreamError::from_reqwest(METHOD, e))?;
        trace!(body = %body, "price response body");

        let parsed: serde_json::Value = serde_json::from_str(&body)
            .map_err(|e| UpstreamError::malformed(METHOD, format!("decode price response: {e}")))?;
        extract_quote(&parsed, &self.asset, &self.fiat)
    }

    fn currency(&self) -> &str {
        &self.fiat
    }
}

/// Read `<asset>.<fiat>` from a `/simple/price` body.
fn extract_quote(
    body: &serde_json::Value,
    asset: &str,
    fiat: &str,
) -> Result<Decimal, UpstreamError> {
    let raw = body
        .get(asset)
        .and_then(|quotes| quotes.get(fiat))
        .ok_or_else(|| {
            UpstreamError::malformed(METHOD, format!("missing {asset}.{fiat} quote"))
        })?;

    let quote = parse_decimal(raw)
        .ok_or_else(|| UpstreamError::malformed(METHOD, format!("invalid quote `{raw}`")))?;
    if quote.is_sign_negative() {
        return Err(UpstreamError::malformed(
            METHOD,
            format!("negative quote `{raw}`"),
        ));
    }
    Ok(quote)
}

/// Parse from the JSON text so the decimal is exact rather than rounded
/// through `f64`.
fn parse_decimal(value: &serde_json::Value) -> Option<Decimal> {
    let text = match value {
        serde_json::Value::Number(n) => n.to_string(),
        serde_json::Value::String(s) => s.clone(),
        _ => return None,
    };
    Decimal::from_str(&text)
        .or_else(|_| Decimal::from_scientific(&text))
        .ok()
}
