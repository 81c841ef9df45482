use crate::product::{DisplayModel, ProductId, ProductRecord, display_text};
use crate::region::DisplayRegion;
use crate::render::{render_notice, render_passport};
use crate::upstream::{ProductSource, UpstreamError};
use http::StatusCode;
use serde_json::Value;
use std::sync::Arc;
use tracing::{debug, error, info};

pub const LOADING: &str = "Loading medical product details...";
pub const NO_IDENTIFIER: &str = "❌ No product ID specified in URL.";
pub const INVALID_RESPONSE: &str = "❌ Invalid response from server.";
pub const LOAD_FAILED: &str = "Failed to load medical product.";
pub const TRY_AGAIN: &str = "❌ Failed to load medical product. Try again later.";

/// How a product load ended.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FetchOutcome {
    MissingIdentifier,
    InvalidResponse,
    /// Non-200 reply; carries the remote `error` text or the generic message.
    Rejected(String),
    Unreachable,
    Loaded(DisplayModel),
}

impl FetchOutcome {
    /// Markup mounted into the display region for this outcome.
    pub fn render(&self) -> String {
        match self {
            Self::MissingIdentifier => render_notice(NO_IDENTIFIER),
            Self::InvalidResponse => render_notice(INVALID_RESPONSE),
            Self::Rejected(message) => render_notice(&format!("❌ {message}")),
            Self::Unreachable => render_notice(TRY_AGAIN),
            Self::Loaded(model) => render_passport(model),
        }
    }
}

/// Performs the single product lookup of a page load.
#[derive(Clone)]
pub struct ProductFetcher {
    source: Arc<dyn ProductSource>,
}

impl ProductFetcher {
    pub fn new(source: Arc<dyn ProductSource>) -> Self {
        Self { source }
    }

    /// Writes the loading notice, then replaces it with the passport or an error notice.
    pub async fn fetch_product<R>(&self, id: Option<&ProductId>, region: &mut R) -> FetchOutcome
    where
        R: DisplayRegion + ?Sized,
    {
        region.replace(render_notice(LOADING));
        let outcome = self.load(id).await;
        region.replace(outcome.render());
        outcome
    }

    async fn load(&self, id: Option<&ProductId>) -> FetchOutcome {
        let Some(id) = id else {
            return FetchOutcome::MissingIdentifier;
        };

        let resp = match self.source.lookup(id).await {
            Ok(resp) => resp,
            Err(err @ UpstreamError::Body(_)) => {
                info!(%id, %err, "product response body unreadable");
                return FetchOutcome::InvalidResponse;
            }
            Err(err) => {
                error!(%id, %err, "product fetch failed");
                return FetchOutcome::Unreachable;
            }
        };

        let data: Value = match serde_json::from_slice(&resp.body) {
            Ok(data) => data,
            Err(err) => {
                info!(%id, status = %resp.status, %err, "product response is not json");
                return FetchOutcome::InvalidResponse;
            }
        };
        info!(%id, status = %resp.status, "product fetch response");
        debug!(%id, ?data, "product fetch data");

        // A `null` body has no fields to read, on either the error or the success path.
        if data.is_null() {
            error!(%id, status = %resp.status, "product response body is null");
            return FetchOutcome::Unreachable;
        }

        if resp.status != StatusCode::OK {
            let message = data
                .get("error")
                .and_then(display_text)
                .unwrap_or_else(|| LOAD_FAILED.to_string());
            return FetchOutcome::Rejected(message);
        }

        FetchOutcome::Loaded(DisplayModel::from(ProductRecord::from_json(&data)))
    }
}
