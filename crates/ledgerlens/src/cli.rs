use clap::Parser;
use rust_decimal::Decimal;

/// LedgerLens: read-only XRP Ledger wallet explorer.
#[derive(Parser)]
#[command(version, about)]
pub struct Cli {
    /// rippled JSON-RPC URL.
    #[arg(long, default_value = "https://s1.ripple.com:51234/", env = "LEDGERLENS_RPC_URL")]
    pub rpc_url: String,

    /// Per-request timeout for ledger calls, in seconds.
    #[arg(long, default_value = "15", env = "LEDGERLENS_RPC_TIMEOUT_SECS")]
    pub rpc_timeout_secs: u64,

    /// Maximum ledger requests per second (unlimited when omitted).
    #[arg(long, env = "LEDGERLENS_RPC_RATE_LIMIT")]
    pub rpc_rate_limit: Option<u32>,

    /// Price quote endpoint (CoinGecko-compatible `/simple/price`).
    #[arg(
        long,
        default_value = "https://api.coingecko.com/api/v3/simple/price",
        env = "LEDGERLENS_PRICE_URL"
    )]
    pub price_url: String,

    /// Asset id to quote.
    #[arg(long, default_value = "ripple", env = "LEDGERLENS_PRICE_ASSET")]
    pub price_asset: String,

    /// Fiat currency code to quote in.
    #[arg(long, default_value = "usd", env = "LEDGERLENS_PRICE_CURRENCY")]
    pub price_currency: String,

    /// Per-request timeout for price lookups, in seconds.
    #[arg(long, default_value = "10", env = "LEDGERLENS_PRICE_TIMEOUT_SECS")]
    pub price_timeout_secs: u64,

    /// Price used when the quote service is unavailable.
    #[arg(long, default_value = "0.50", env = "LEDGERLENS_FALLBACK_PRICE")]
    pub fallback_price: Decimal,

    /// Number of recent transactions returned per address.
    #[arg(long, default_value = "10")]
    pub tx_limit: u32,

    /// Lifetime of cached wallet snapshots, in seconds.
    #[arg(long, default_value = "300", env = "LEDGERLENS_CACHE_TTL_SECS")]
    pub cache_ttl_secs: u64,

    /// Maximum number of cached wallet snapshots.
    #[arg(long, default_value = "10000")]
    pub cache_capacity: usize,

    /// Address to bind the web server to.
    #[arg(long, default_value = "127.0.0.1")]
    pub bind: String,

    /// Port to listen on.
    #[arg(long, default_value = "3000", env = "LEDGERLENS_PORT")]
    pub port: u16,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_match_recommended_constants() {
        let cli = Cli::try_parse_from(["ledgerlens"]).expect("defaults must parse");
        assert_eq!(cli.rpc_timeout_secs, 15);
        assert_eq!(cli.price_timeout_secs, 10);
        assert_eq!(cli.cache_ttl_secs, 300);
        assert_eq!(cli.tx_limit, 10);
        assert_eq!(cli.fallback_price, Decimal::new(50, 2));
    }

    #[test]
    fn rejects_non_numeric_fallback_price() {
        assert!(Cli::try_parse_from(["ledgerlens", "--fallback-price", "cheap"]).is_err());
    }
}
