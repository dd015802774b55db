//! Endpoint handling shared by the ledger and price clients.

use reqwest::Url;

use crate::error::ConfigError;

pub(crate) fn parse_endpoint(endpoint: &str) -> Result<Url, ConfigError> {
    let parsed = Url::parse(endpoint).map_err(|e| ConfigError::InvalidEndpoint {
        url: endpoint.to_owned(),
        reason: format!("expected HTTP(S) URL ({e})"),
    })?;
    match parsed.scheme() {
        "http" | "https" => Ok(parsed),
        other => Err(ConfigError::InvalidEndpoint {
            url: endpoint.to_owned(),
            reason: format!("unsupported scheme `{other}`; expected http or https"),
        }),
    }
}
