//! Server initialization for stdio and HTTP transports.
//!
//! Provides [`serve_stdio`] and [`serve_http`] entry points that load the quote
//! store, start the background refresh, and wire the command handler into a
//! running MCP server.

use crate::tools::QuoteTools;
use anyhow::{Context, Result};
use quotebot::config::QuotebotConfig;
use quotebot::quotes::{spawn_refresh_task, LoadOptions, QuoteStore};
use quotebot::source;
use rmcp::ServiceExt;
use std::sync::Arc;
use tokio::task::JoinHandle;
use tokio_util::sync::CancellationToken;

/// Create the configured source and perform the initial load.
///
/// An unknown source or a failed first fetch is fatal: there is nothing to serve.
pub async fn open_store(config: &QuotebotConfig) -> Result<Arc<QuoteStore>> {
    let source = source::create_source(&config.source).context("failed to create quote source")?;
    let options = LoadOptions {
        skip_blank_lines: config.source.skip_blank_lines,
    };
    let store = QuoteStore::open(source, options)
        .await
        .context("initial quote load failed")?;
    Ok(Arc::new(store))
}

/// Shared setup: load the store and start the refresh task bound to `shutdown`.
async fn setup_shared_state(
    config: &QuotebotConfig,
    shutdown: &CancellationToken,
) -> Result<(Arc<QuoteStore>, Option<JoinHandle<()>>)> {
    let store = open_store(config).await?;
    tracing::info!(
        source = store.source_name(),
        quotes = store.len(),
        "quote store ready"
    );

    let refresh = config
        .refresh
        .interval()
        .map(|every| spawn_refresh_task(Arc::clone(&store), every, shutdown.clone()));
    if refresh.is_none() {
        tracing::info!("background refresh disabled");
    }

    Ok((store, refresh))
}

/// Cancel the refresh task and wait for it to exit.
async fn stop_refresh(shutdown: CancellationToken, refresh: Option<JoinHandle<()>>) {
    shutdown.cancel();
    if let Some(handle) = refresh {
        if let Err(e) = handle.await {
            tracing::warn!(error = %e, "refresh task did not exit cleanly");
        }
    }
}

/// Start the MCP server over stdio transport.
pub async fn serve_stdio(config: QuotebotConfig) -> Result<()> {
    tracing::info!("starting quotebot on stdio");

    let shutdown = CancellationToken::new();
    let (store, refresh) = setup_shared_state(&config, &shutdown).await?;

    let tools = QuoteTools::new(store);
    let transport = rmcp::transport::stdio();

    let server = tools.serve(transport).await?;
    tracing::info!("server running — waiting for client");

    tokio::select! {
        result = server.waiting() => {
            result?;
        }
        _ = tokio::signal::ctrl_c() => {
            tracing::info!("shutdown signal received");
        }
    }

    stop_refresh(shutdown, refresh).await;
    tracing::info!("server shut down");

    Ok(())
}

/// Start the MCP server over Streamable HTTP transport.
pub async fn serve_http(config: QuotebotConfig) -> Result<()> {
    let bind_addr = format!("{}:{}", config.server.host, config.server.port);
    tracing::info!(addr = %bind_addr, "starting quotebot on HTTP");

    let shutdown = CancellationToken::new();
    let (store, refresh) = setup_shared_state(&config, &shutdown).await?;

    let service = rmcp::transport::streamable_http_server::StreamableHttpService::new(
        move || Ok(QuoteTools::new(Arc::clone(&store))),
        rmcp::transport::streamable_http_server::session::local::LocalSessionManager::default()
            .into(),
        Default::default(),
    );

    let router = axum::Router::new().nest_service("/mcp", service);

    let listener = tokio::net::TcpListener::bind(&bind_addr)
        .await
        .with_context(|| format!("failed to bind {bind_addr}"))?;
    tracing::info!(addr = %bind_addr, "listening at http://{bind_addr}/mcp");

    let signal = shutdown.clone();
    axum::serve(listener, router)
        .with_graceful_shutdown(async move {
            tokio::select! {
                result = tokio::signal::ctrl_c() => {
                    if let Err(e) = result {
                        tracing::error!(error = %e, "failed to listen for ctrl-c");
                    }
                }
                _ = signal.cancelled() => {}
            }
            tracing::info!("shutting down HTTP server");
        })
        .await?;

    stop_refresh(shutdown, refresh).await;

    Ok(())
}
