use crate::product::display_text;
use crate::region::Transcript;
use crate::upstream::{ChatBackend, UpstreamResponse};
use html_escape::encode_text;
use serde_json::Value;
use std::sync::Arc;
use tracing::{error, warn};

pub const TYPING_PLACEHOLDER: &str = "<div><em>AI is typing...</em></div>";
pub const MIC_NOT_IMPLEMENTED: &str = "🎤 Voice input not yet implemented.";
pub const UNEXPECTED_RESPONSE: &str = "🤖 Unexpected server response.";
pub const UNREACHABLE: &str = "❌ Error reaching AI service.";

pub const PANEL_CLASS: &str = "chat-popup";
/// Class the page script toggles on the panel to show it.
pub const PANEL_VISIBLE_CLASS: &str = "visible";

/// Result of one chat round trip.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ChatOutcome {
    Reply(String),
    Error(String),
    Unexpected,
    Unreachable,
}

impl ChatOutcome {
    /// Classifies an upstream reply. A body that is not JSON counts as unreachable.
    pub fn from_response(resp: &UpstreamResponse) -> Self {
        let data: Value = match serde_json::from_slice(&resp.body) {
            Ok(data) => data,
            Err(err) => {
                error!(status = %resp.status, %err, "chat response is not json");
                return Self::Unreachable;
            }
        };
        if resp.status.is_success()
            && let Some(reply) = data.get("reply").and_then(display_text)
        {
            return Self::Reply(reply);
        }
        if let Some(err) = data.get("error").and_then(display_text) {
            error!(status = %resp.status, error = %err, "chat backend error");
            return Self::Error(err);
        }
        error!(status = %resp.status, ?data, "unexpected chat response");
        Self::Unexpected
    }

    /// Text following the `AI:` label.
    pub fn message(&self) -> String {
        match self {
            Self::Reply(reply) => reply.clone(),
            Self::Error(err) => format!("❌ Error: {err}"),
            Self::Unexpected => UNEXPECTED_RESPONSE.to_string(),
            Self::Unreachable => UNREACHABLE.to_string(),
        }
    }

    /// Transcript line markup; the message is escaped.
    pub fn line(&self) -> String {
        format!(
            "<div><strong>AI:</strong> {}</div>",
            encode_text(&self.message())
        )
    }
}

/// Server half of the chat panel: relays submits to the backend.
pub struct ChatWidget {
    backend: Arc<dyn ChatBackend>,
}

impl ChatWidget {
    pub fn new(backend: Arc<dyn ChatBackend>) -> Self {
        Self { backend }
    }

    /// Sends the trimmed `input` and appends the outcome line to `transcript`.
    ///
    /// Whitespace-only input is a no-op and returns `None`. Otherwise `input` is cleared
    /// before the request goes out, and the typing placeholder is removed before the
    /// outcome line is appended.
    pub async fn submit<T>(&self, input: &mut String, transcript: &mut T) -> Option<ChatOutcome>
    where
        T: Transcript + ?Sized,
    {
        let message = input.trim().to_string();
        if message.is_empty() {
            return None;
        }

        let typing = transcript.append(TYPING_PLACEHOLDER.to_string());
        transcript.scroll_to_latest();
        input.clear();

        let outcome = match self.backend.send(&message).await {
            Ok(resp) => ChatOutcome::from_response(&resp),
            Err(err) => {
                warn!(%err, "chat service unreachable");
                ChatOutcome::Unreachable
            }
        };

        transcript.remove(typing);
        transcript.append(outcome.line());
        transcript.scroll_to_latest();
        Some(outcome)
    }
}
