use crate::config::AppConfig;
use crate::fetcher::ProductFetcher;
use crate::script::page_script;
use crate::upstream::{ChatBackend, ProductSource};
use axum::Router;
use axum::routing::{get, post};
use std::net::SocketAddr;
use std::sync::Arc;
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;
use tracing::info;

#[derive(Clone)]
pub struct AppState {
    pub config: AppConfig,
    pub fetcher: ProductFetcher,
    pub chat: Arc<dyn ChatBackend>,
    pub script: Arc<str>,
}

impl AppState {
    pub fn new(
        config: AppConfig,
        products: Arc<dyn ProductSource>,
        chat: Arc<dyn ChatBackend>,
    ) -> Self {
        let script = page_script(config.service_worker_path.as_deref()).into();
        Self {
            config,
            fetcher: ProductFetcher::new(products),
            chat,
            script,
        }
    }
}

pub fn router(state: AppState) -> Router {
    let enable_cors = state.config.enable_cors;
    let router = Router::new()
        .route("/", get(crate::api::index))
        .route("/passport.js", get(crate::api::serve_script))
        .route("/api/passport", get(crate::api::get_passport))
        .route("/api/chat", post(crate::api::post_chat))
        .route("/api/registration", post(crate::api::post_registration))
        .route("/healthz", get(crate::api::healthz))
        .layer(TraceLayer::new_for_http())
        .with_state(state);
    if enable_cors {
        router.layer(CorsLayer::permissive())
    } else {
        router
    }
}

pub async fn run(addr: SocketAddr, state: AppState) -> anyhow::Result<()> {
    let listener = tokio::net::TcpListener::bind(addr).await?;
    info!(addr = %listener.local_addr()?, "listening");
    axum::serve(listener, router(state))
        .with_graceful_shutdown(shutdown_signal())
        .await?;
    Ok(())
}

async fn shutdown_signal() {
    if let Err(err) = tokio::signal::ctrl_c().await {
        tracing::warn!(?err, "failed to listen for ctrl-c");
        std::future::pending::<()>().await;
    }
    info!("shutdown requested");
}
