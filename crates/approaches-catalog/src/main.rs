mod config;
mod controller;
mod error;
mod filter;
mod html;
mod model;
mod render;
mod server;
mod sort;
mod store;
#[cfg(test)]
mod test_support;
mod view;

use rmcp::{ServiceExt, transport::stdio};
use tokio::net::TcpListener;
use tracing::info;
use tracing_subscriber::EnvFilter;

use config::Config;
use controller::CatalogSession;
use handbook_common::fetch::SourceFetcher;
use server::ApproachesServer;
use store::CatalogStore;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Initialize tracing to stderr (stdout is reserved for MCP JSON-RPC)
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::from_default_env().add_directive(tracing::Level::INFO.into()),
        )
        .with_writer(std::io::stderr)
        .with_ansi(false)
        .init();

    info!("starting approaches-catalog MCP server");

    let config = Config::from_env()?;
    info!(
        catalog = %config.catalog,
        fetch_timeout_secs = config.fetch_timeout.as_secs(),
        tcp = config.tcp_listen_addr.is_some(),
        "configuration loaded"
    );

    // A failed load is not fatal: the session renders the inline error until
    // reload_catalog succeeds.
    let fetcher = SourceFetcher::new(config.fetch_timeout)?;
    let store = CatalogStore::load(&fetcher, &config.catalog).await;
    let session = CatalogSession::new(store);
    info!(
        approaches = session.store().approaches().len(),
        failed = session.store().is_failed(),
        "catalog session ready"
    );

    let server = ApproachesServer::new(session, fetcher, config.catalog.clone());

    if let Some(addr) = config.tcp_listen_addr.as_deref() {
        let listener = TcpListener::bind(addr).await?;
        info!(listen_addr = %addr, "MCP server ready, serving on TCP");
        loop {
            let (stream, peer) = listener.accept().await?;
            let server = server.clone();
            tokio::spawn(async move {
                tracing::info!(peer = %peer, "MCP client connected");
                let service = server.serve(stream).await.inspect_err(|e| {
                    tracing::error!(error = %e, "MCP server error");
                })?;
                service.waiting().await?;
                tracing::info!(peer = %peer, "MCP client disconnected");
                Ok::<(), anyhow::Error>(())
            });
        }
    } else {
        info!("MCP server ready, serving on stdio");
        let service = server.serve(stdio()).await.inspect_err(|e| {
            tracing::error!(error = %e, "MCP server error");
        })?;
        service.waiting().await?;
        info!("MCP server shut down");
    }
    Ok(())
}
