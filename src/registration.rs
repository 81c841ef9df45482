use serde::Deserialize;
use tracing::{info, warn};

/// Outcome of the page's one-shot worker registration, as reported by the browser.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(tag = "outcome", rename_all = "lowercase")]
pub enum RegistrationReport {
    Registered {
        scope: String,
    },
    Failed {
        #[serde(default)]
        error: Option<String>,
    },
}

/// Logs a registration report; nothing else depends on it.
pub fn log_registration(report: &RegistrationReport, path: &str) {
    let at = chrono::Utc::now().to_rfc3339();
    match report {
        RegistrationReport::Registered { scope } => {
            info!(%path, %scope, %at, "✅ service worker registered");
        }
        RegistrationReport::Failed { error } => {
            warn!(
                %path,
                error = error.as_deref().unwrap_or("unknown"),
                %at,
                "❌ service worker registration failed"
            );
        }
    }
}

/// Browser snippet that registers `worker_path` when the capability exists and reports
/// the outcome to `report_url`. Empty when registration is disabled.
pub fn registration_script(worker_path: Option<&str>, report_url: &str) -> String {
    let Some(worker_path) = worker_path else {
        return String::new();
    };
    let worker_path = serde_json::Value::from(worker_path).to_string();
    let report_url = serde_json::Value::from(report_url).to_string();
    format!(
        r#"  function report(body) {{
    fetch({report_url}, {{
      method: "POST",
      headers: {{ "Content-Type": "application/json" }},
      body: JSON.stringify(body),
    }}).catch(() => {{}});
  }}

  if ("serviceWorker" in navigator) {{
    navigator.serviceWorker
      .register({worker_path})
      .then((registration) => {{
        console.log("✅ Service Worker registered with scope:", registration.scope);
        report({{ outcome: "registered", scope: registration.scope }});
      }})
      .catch((error) => {{
        console.error("❌ Service Worker registration failed:", error);
        report({{ outcome: "failed", error: String(error) }});
      }});
  }}
"#
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn parses_both_outcomes() {
        let ok: RegistrationReport =
            serde_json::from_value(json!({"outcome": "registered", "scope": "/"})).unwrap();
        assert_eq!(ok, RegistrationReport::Registered { scope: "/".into() });
        let failed: RegistrationReport =
            serde_json::from_value(json!({"outcome": "failed"})).unwrap();
        assert_eq!(failed, RegistrationReport::Failed { error: None });
        log_registration(&failed, "/firebase-messaging-sw.js");
    }

    #[test]
    fn script_is_omitted_when_disabled() {
        assert!(registration_script(None, "/api/registration").is_empty());
    }

    #[test]
    fn script_quotes_worker_path() {
        let script = registration_script(Some("/sw\".js"), "/api/registration");
        assert!(script.contains(r#".register("/sw\".js")"#));
        assert!(script.contains(r#"fetch("/api/registration""#));
        assert!(script.contains(r#""serviceWorker" in navigator"#));
    }
}
