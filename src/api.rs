use crate::chat::ChatWidget;
use crate::page::loading_shell;
use crate::product::ProductId;
use crate::region::{RenderedRegion, TranscriptBuffer};
use crate::registration::{RegistrationReport, log_registration};
use crate::server::AppState;
use axum::Json;
use axum::extract::{Query, State};
use axum::http::{HeaderValue, StatusCode, header};
use axum::response::{Html, IntoResponse, Response};
use serde::{Deserialize, Serialize};
use tracing::error;

pub async fn index() -> impl IntoResponse {
    match loading_shell() {
        Ok(html) => Html(html).into_response(),
        Err(err) => {
            error!(?err, "failed to build page shell");
            (StatusCode::INTERNAL_SERVER_ERROR, err.to_string()).into_response()
        }
    }
}

pub async fn serve_script(State(state): State<AppState>) -> impl IntoResponse {
    let mut resp = Response::new(state.script.to_string());
    resp.headers_mut().insert(
        header::CONTENT_TYPE,
        HeaderValue::from_static("application/javascript"),
    );
    resp
}

/// Display region HTML for the identifier in the query.
pub async fn get_passport(
    State(state): State<AppState>,
    Query(query): Query<Vec<(String, String)>>,
) -> impl IntoResponse {
    let id = ProductId::from_query(&query);
    let mut region = RenderedRegion::new();
    state.fetcher.fetch_product(id.as_ref(), &mut region).await;
    Html(region.into_html().unwrap_or_default())
}

#[derive(Debug, Deserialize)]
pub struct ChatSubmitRequest {
    #[serde(default)]
    pub message: String,
}

#[derive(Debug, Serialize)]
pub struct ChatSubmitResponse {
    /// Lines to append, in order; empty when the message was blank.
    pub lines: Vec<String>,
}

pub async fn post_chat(
    State(state): State<AppState>,
    Json(body): Json<ChatSubmitRequest>,
) -> impl IntoResponse {
    let widget = ChatWidget::new(state.chat.clone());
    let mut input = body.message;
    let mut transcript = TranscriptBuffer::new();
    widget.submit(&mut input, &mut transcript).await;
    Json(ChatSubmitResponse {
        lines: transcript.into_lines(),
    })
}

pub async fn post_registration(
    State(state): State<AppState>,
    Json(report): Json<RegistrationReport>,
) -> impl IntoResponse {
    let path = state
        .config
        .service_worker_path
        .as_deref()
        .unwrap_or("<disabled>");
    log_registration(&report, path);
    StatusCode::ACCEPTED
}

pub async fn healthz() -> impl IntoResponse {
    "ok"
}
