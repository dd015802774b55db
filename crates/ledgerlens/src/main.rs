mod cli;
mod server;

use std::sync::Arc;
use std::time::Duration;

use clap::Parser;
use eyre::WrapErr;

use ledgerlens_core::cache::TtlCache;
use ledgerlens_core::ledger::{HttpLedgerClient, LedgerRpc};
use ledgerlens_core::price::HttpPriceClient;
use ledgerlens_core::{ExplorerConfig, WalletExplorer};

#[tokio::main]
async fn main() -> eyre::Result<()> {
    let args = cli::Cli::parse();

    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .with_file(true)
        .with_line_number(true)
        .with_level(true)
        .init();

    let ledger = Arc::new(
        HttpLedgerClient::new(
            &args.rpc_url,
            Duration::from_secs(args.rpc_timeout_secs),
            args.rpc_rate_limit,
        )
        .wrap_err("configure ledger RPC client")?,
    );
    let prices = Arc::new(
        HttpPriceClient::new(
            &args.price_url,
            &args.price_asset,
            &args.price_currency,
            Duration::from_secs(args.price_timeout_secs),
        )
        .wrap_err("configure price client")?,
    );

    // Probe the node so misconfiguration shows up at startup. The explorer
    // still starts if the node is temporarily unreachable.
    match ledger.server_info().await {
        Ok(info) => tracing::info!(
            build_version = %info.build_version,
            server_state = %info.server_state,
            validated_seq = info.validated_ledger.map(|l| l.seq),
            "connected to ledger node"
        ),
        Err(err) => tracing::warn!(
            rpc_url = %args.rpc_url,
            error = %err,
            "ledger node probe failed; requests will fail until it is reachable"
        ),
    }

    let config = ExplorerConfig {
        transaction_limit: args.tx_limit,
        fallback_price: args.fallback_price,
        cache_ttl: Duration::from_secs(args.cache_ttl_secs),
    };
    let explorer = WalletExplorer::new(
        ledger,
        prices,
        Arc::new(TtlCache::with_capacity(args.cache_capacity)),
        config,
    )
    .wrap_err("configure wallet explorer")?;

    let bind_addr = format!("{}:{}", args.bind, args.port);
    let origin = format!("http://{}:{}", args.bind, args.port);
    let router = server::build_router(
        server::AppState {
            explorer: Arc::new(explorer),
        },
        &origin,
    )?;

    if args.bind == "0.0.0.0" {
        tracing::warn!("server is bound to 0.0.0.0; it is accessible from the network");
    }

    let listener = tokio::net::TcpListener::bind(&bind_addr)
        .await
        .context("bind TCP listener")?;

    tracing::info!("listening on {bind_addr}");
    axum::serve(listener, router)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .context("run HTTP server")?;

    Ok(())
}

async fn shutdown_signal() {
    if let Err(err) = tokio::signal::ctrl_c().await {
        tracing::error!(error = %err, "install Ctrl-C handler");
        std::future::pending::<()>().await;
    }
    tracing::info!("shutting down");
}
