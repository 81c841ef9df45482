use crate::product::ProductId;
use async_trait::async_trait;
use http::StatusCode;
use serde::Serialize;
use std::time::Duration;
use thiserror::Error;
use tracing::debug;
use url::Url;

/// Failure to obtain a usable reply from an upstream service.
#[derive(Debug, Error)]
pub enum UpstreamError {
    #[error("base url {0} cannot carry a path")]
    CannotBeBase(String),
    #[error("upstream request failed: {0}")]
    Transport(#[from] reqwest::Error),
    /// Headers arrived but the body could not be read to the end.
    #[error("reading upstream body failed: {0}")]
    Body(String),
}

/// Status and raw body of an upstream reply; parsing is left to the caller.
#[derive(Debug, Clone)]
pub struct UpstreamResponse {
    pub status: StatusCode,
    pub body: Vec<u8>,
}

impl UpstreamResponse {
    pub fn new(status: StatusCode, body: impl Into<Vec<u8>>) -> Self {
        Self {
            status,
            body: body.into(),
        }
    }
}

/// Remote product lookup service.
#[async_trait]
pub trait ProductSource: Send + Sync {
    async fn lookup(&self, id: &ProductId) -> Result<UpstreamResponse, UpstreamError>;
}

/// Remote chat service.
#[async_trait]
pub trait ChatBackend: Send + Sync {
    async fn send(&self, message: &str) -> Result<UpstreamResponse, UpstreamError>;
}

#[derive(Debug, Serialize)]
struct ChatRequest<'a> {
    message: &'a str,
}

/// Shared reqwest client; `timeout` of `None` leaves requests unbounded.
pub fn build_client(timeout: Option<Duration>) -> Result<reqwest::Client, UpstreamError> {
    let mut builder = reqwest::Client::builder();
    if let Some(timeout) = timeout {
        builder = builder.timeout(timeout);
    }
    Ok(builder.build()?)
}

/// Appends percent-encoded path segments to `base`.
fn endpoint(base: &Url, segments: &[&str]) -> Result<Url, UpstreamError> {
    let mut url = base.clone();
    url.path_segments_mut()
        .map_err(|_| UpstreamError::CannotBeBase(base.to_string()))?
        .pop_if_empty()
        .extend(segments);
    Ok(url)
}

async fn into_response(resp: reqwest::Response) -> Result<UpstreamResponse, UpstreamError> {
    let status = resp.status();
    let body = resp
        .bytes()
        .await
        .map_err(|err| UpstreamError::Body(err.to_string()))?;
    Ok(UpstreamResponse::new(status, body.to_vec()))
}

/// `GET <base>/patient/<id>`.
#[derive(Clone)]
pub struct HttpProductSource {
    base: Url,
    client: reqwest::Client,
}

impl HttpProductSource {
    pub fn new(base: Url, client: reqwest::Client) -> Self {
        Self { base, client }
    }
}

#[async_trait]
impl ProductSource for HttpProductSource {
    async fn lookup(&self, id: &ProductId) -> Result<UpstreamResponse, UpstreamError> {
        let url = endpoint(&self.base, &["patient", id.as_str()])?;
        debug!(%url, "product lookup");
        let resp = self.client.get(url).send().await?;
        into_response(resp).await
    }
}

/// `POST <base>/chat` with `{"message": ...}`.
#[derive(Clone)]
pub struct HttpChatBackend {
    base: Url,
    client: reqwest::Client,
}

impl HttpChatBackend {
    pub fn new(base: Url, client: reqwest::Client) -> Self {
        Self { base, client }
    }
}

#[async_trait]
impl ChatBackend for HttpChatBackend {
    async fn send(&self, message: &str) -> Result<UpstreamResponse, UpstreamError> {
        let url = endpoint(&self.base, &["chat"])?;
        debug!(%url, "chat request");
        let resp = self
            .client
            .post(url)
            .json(&ChatRequest { message })
            .send()
            .await?;
        into_response(resp).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::Json;
    use axum::Router;
    use axum::extract::Path;
    use axum::routing::{get, post};
    use serde_json::{Value, json};
    use std::net::SocketAddr;

    async fn spawn(router: Router) -> SocketAddr {
        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        tokio::spawn(async move {
            axum::serve(listener, router).await.unwrap();
        });
        addr
    }

    #[test]
    fn endpoint_encodes_identifier_as_one_segment() {
        let base = Url::parse("https://example.test/api/").unwrap();
        let url = endpoint(&base, &["patient", "a/b c"]).unwrap();
        assert_eq!(url.as_str(), "https://example.test/api/patient/a%2Fb%20c");

        let bare = Url::parse("https://example.test").unwrap();
        assert_eq!(
            endpoint(&bare, &["chat"]).unwrap().as_str(),
            "https://example.test/chat"
        );
    }

    #[tokio::test]
    async fn product_source_returns_status_and_body() {
        let router = Router::new().route(
            "/patient/{id}",
            get(|Path(id): Path<String>| async move {
                (StatusCode::NOT_FOUND, Json(json!({"error": format!("{id} unknown")})))
            }),
        );
        let addr = spawn(router).await;
        let base = Url::parse(&format!("http://{addr}")).unwrap();
        let source = HttpProductSource::new(base, build_client(None).unwrap());
        let resp = source
            .lookup(&ProductId::from_query(&[("id".to_string(), "X9".to_string())]).unwrap())
            .await
            .unwrap();
        assert_eq!(resp.status, StatusCode::NOT_FOUND);
        let body: Value = serde_json::from_slice(&resp.body).unwrap();
        assert_eq!(body["error"], "X9 unknown");
    }

    #[tokio::test]
    async fn chat_backend_posts_message_json() {
        let router = Router::new().route(
            "/chat",
            post(|Json(body): Json<Value>| async move {
                Json(json!({"reply": format!("echo {}", body["message"].as_str().unwrap_or(""))}))
            }),
        );
        let addr = spawn(router).await;
        let base = Url::parse(&format!("http://{addr}")).unwrap();
        let backend = HttpChatBackend::new(base, build_client(None).unwrap());
        let resp = backend.send("hello").await.unwrap();
        assert!(resp.status.is_success());
        let body: Value = serde_json::from_slice(&resp.body).unwrap();
        assert_eq!(body["reply"], "echo hello");
    }

    #[tokio::test]
    async fn unreachable_upstream_is_transport_error() {
        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        drop(listener);
        let base = Url::parse(&format!("http://{addr}")).unwrap();
        let backend = HttpChatBackend::new(base, build_client(None).unwrap());
        let err = backend.send("hello").await.unwrap_err();
        assert!(matches!(err, UpstreamError::Transport(_)));
    }
}
