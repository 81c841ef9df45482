use crate::chat::{ChatOutcome, MIC_NOT_IMPLEMENTED, PANEL_VISIBLE_CLASS, TYPING_PLACEHOLDER};
use crate::fetcher::TRY_AGAIN;
use crate::registration::registration_script;
use crate::render::render_notice;

pub const PASSPORT_URL: &str = "/api/passport";
pub const CHAT_URL: &str = "/api/chat";
pub const REGISTRATION_URL: &str = "/api/registration";

fn js_string(value: &str) -> String {
    serde_json::Value::from(value).to_string()
}

/// Browser glue for the passport page: mounts the rendered region, wires the chat
/// controls, and optionally registers the background worker.
pub fn page_script(service_worker_path: Option<&str>) -> String {
    let passport_url = js_string(PASSPORT_URL);
    let chat_url = js_string(CHAT_URL);
    let visible = js_string(PANEL_VISIBLE_CLASS);
    let typing = js_string(TYPING_PLACEHOLDER);
    let unreachable = js_string(&ChatOutcome::Unreachable.line());
    let try_again = js_string(&render_notice(TRY_AGAIN));
    let mic = js_string(MIC_NOT_IMPLEMENTED);
    let registration = registration_script(service_worker_path, REGISTRATION_URL);

    format!(
        r##"// Medical product passport page script
(function () {{
  const container = document.getElementById("product-container");
  const search = window.location.search;

  async function loadPassport() {{
    try {{
      const res = await fetch({passport_url} + search);
      container.innerHTML = await res.text();
    }} catch (err) {{
      console.error("Fetch error:", err);
      container.innerHTML = {try_again};
      return;
    }}
    attachChatEvents();
  }}

  function toggleChat() {{
    const popup = container.querySelector("#chatbot-popup");
    if (!popup) return;
    popup.classList.toggle({visible});
    if (popup.classList.contains({visible})) {{
      const input = container.querySelector("#chat-input");
      if (input) input.focus();
    }}
  }}

  function attachChatEvents() {{
    const sendBtn = container.querySelector("#send-btn");
    const micBtn = container.querySelector("#mic-btn");
    const messages = container.querySelector("#chat-messages");
    const input = container.querySelector("#chat-input");
    if (!sendBtn || !messages || !input) return;

    container
      .querySelectorAll('[data-action="toggle-chat"]')
      .forEach((el) => el.addEventListener("click", toggleChat));

    let pending = false;
    function setPending(value) {{
      pending = value;
      sendBtn.disabled = value;
      input.disabled = value;
    }}

    async function send() {{
      const message = input.value.trim();
      if (!message || pending) return;
      setPending(true);

      messages.insertAdjacentHTML("beforeend", {typing});
      const typingLine = messages.lastElementChild;
      messages.scrollTop = messages.scrollHeight;
      input.value = "";

      let lines;
      try {{
        const res = await fetch({chat_url}, {{
          method: "POST",
          headers: {{ "Content-Type": "application/json" }},
          body: JSON.stringify({{ message }}),
        }});
        const data = await res.json();
        lines = Array.isArray(data.lines) ? data.lines : [{unreachable}];
      }} catch (err) {{
        console.error(err);
        lines = [{unreachable}];
      }}

      if (typingLine) typingLine.remove();
      for (const line of lines) messages.insertAdjacentHTML("beforeend", line);
      messages.scrollTop = messages.scrollHeight;
      setPending(false);
      input.focus();
    }}

    sendBtn.addEventListener("click", send);
    if (micBtn) micBtn.addEventListener("click", () => alert({mic}));
    input.addEventListener("keydown", (e) => {{
      if (e.key === "Enter") send();
    }});
  }}

{registration}
  loadPassport();
}})();
"##
    )
}
