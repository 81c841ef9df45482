use anyhow::Context;
use serde::{Deserialize, Serialize};
use std::net::SocketAddr;
use std::time::Duration;
use url::Url;

const DEFAULT_PRODUCT_API_BASE: &str = "https://medical-dpp-backend.onrender.com";
const DEFAULT_CHAT_API_BASE: &str = "https://dpp-chatbot-backend.onrender.com";
const DEFAULT_SERVICE_WORKER_PATH: &str = "/firebase-messaging-sw.js";

/// Runtime configuration for the passport server.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AppConfig {
    pub bind_addr: SocketAddr,
    pub product_api_base: Url,
    pub chat_api_base: Url,
    /// Applied to both upstream clients. `None` keeps requests open indefinitely.
    pub upstream_timeout: Option<Duration>,
    pub enable_cors: bool,
    /// Worker script registered by the page; `None` disables registration.
    pub service_worker_path: Option<String>,
}

impl AppConfig {
    pub fn from_env() -> anyhow::Result<Self> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Builds the config from an arbitrary key lookup so tests never touch the process env.
    pub fn from_lookup<F>(lookup: F) -> anyhow::Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let bind_addr: SocketAddr = lookup("BIND_ADDR")
            .unwrap_or_else(|| "0.0.0.0:8080".to_string())
            .parse()
            .context("failed to parse BIND_ADDR")?;

        let product_api_base = lookup("PRODUCT_API_BASE")
            .unwrap_or_else(|| DEFAULT_PRODUCT_API_BASE.to_string());
        let product_api_base =
            Url::parse(&product_api_base).context("failed to parse PRODUCT_API_BASE")?;

        let chat_api_base =
            lookup("CHAT_API_BASE").unwrap_or_else(|| DEFAULT_CHAT_API_BASE.to_string());
        let chat_api_base = Url::parse(&chat_api_base).context("failed to parse CHAT_API_BASE")?;

        let upstream_timeout = lookup("UPSTREAM_TIMEOUT_MS")
            .and_then(|v| v.parse::<u64>().ok())
            .filter(|ms| *ms > 0)
            .map(Duration::from_millis);

        let enable_cors = lookup("ENABLE_CORS")
            .map(|v| v == "1" || v.eq_ignore_ascii_case("true"))
            .unwrap_or(false);

        let service_worker_path = match lookup("SERVICE_WORKER_PATH") {
            Some(path) if path.trim().is_empty() => None,
            Some(path) => Some(path.trim().to_string()),
            None => Some(DEFAULT_SERVICE_WORKER_PATH.to_string()),
        };

        Ok(Self {
            bind_addr,
            product_api_base,
            chat_api_base,
            upstream_timeout,
            enable_cors,
            service_worker_path,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn config_from(pairs: &[(&str, &str)]) -> anyhow::Result<AppConfig> {
        let vars: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        AppConfig::from_lookup(|key| vars.get(key).cloned())
    }

    #[test]
    fn defaults_point_at_hosted_backends() {
        let cfg = config_from(&[]).unwrap();
        assert_eq!(cfg.bind_addr.port(), 8080);
        assert_eq!(cfg.product_api_base.host_str(), Some("medical-dpp-backend.onrender.com"));
        assert_eq!(cfg.chat_api_base.host_str(), Some("dpp-chatbot-backend.onrender.com"));
        assert!(cfg.upstream_timeout.is_none());
        assert!(!cfg.enable_cors);
        assert_eq!(cfg.service_worker_path.as_deref(), Some("/firebase-messaging-sw.js"));
    }

    #[test]
    fn overrides_are_applied() {
        let cfg = config_from(&[
            ("BIND_ADDR", "127.0.0.1:3000"),
            ("PRODUCT_API_BASE", "http://localhost:9000/v1/"),
            ("UPSTREAM_TIMEOUT_MS", "1500"),
            ("ENABLE_CORS", "TRUE"),
            ("SERVICE_WORKER_PATH", ""),
        ])
        .unwrap();
        assert_eq!(cfg.bind_addr.port(), 3000);
        assert_eq!(cfg.product_api_base.path(), "/v1/");
        assert_eq!(cfg.upstream_timeout, Some(Duration::from_millis(1500)));
        assert!(cfg.enable_cors);
        assert!(cfg.service_worker_path.is_none());
    }

    #[test]
    fn rejects_bad_bind_addr() {
        let err = config_from(&[("BIND_ADDR", "not-an-addr")]).unwrap_err();
        assert!(err.to_string().contains("BIND_ADDR"));
    }
}
