use anyhow::Context;
use dpp_passport::config::AppConfig;
use dpp_passport::server::{self, AppState};
use dpp_passport::upstream::{HttpChatBackend, HttpProductSource, build_client};
use std::net::SocketAddr;
use std::sync::Arc;
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    init_tracing();
    let config = AppConfig::from_env()?;
    let client = build_client(config.upstream_timeout).context("building upstream http client")?;
    let products = Arc::new(HttpProductSource::new(
        config.product_api_base.clone(),
        client.clone(),
    ));
    let chat = Arc::new(HttpChatBackend::new(config.chat_api_base.clone(), client));
    tracing::info!(
        products = %config.product_api_base,
        chat = %config.chat_api_base,
        timeout = ?config.upstream_timeout,
        "upstream services configured"
    );

    let addr: SocketAddr = config.bind_addr;
    let state = AppState::new(config, products, chat);
    tracing::info!(%addr, "starting dpp-passport server");
    server::run(addr, state).await?;
    Ok(())
}

fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .try_init();
}
