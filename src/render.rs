use crate::chat::PANEL_CLASS;
use crate::product::DisplayModel;
use html_escape::{encode_double_quoted_attribute, encode_text};
use std::fmt::Write;

pub const CHAT_INPUT_PLACEHOLDER: &str = "Ask something about this medical product...";

/// Inline notice shown in place of the passport.
pub fn render_notice(message: &str) -> String {
    format!("<p>{}</p>", encode_text(message))
}

/// Full passport layout including the chat panel in its initial state.
pub fn render_passport(model: &DisplayModel) -> String {
    let mut html = String::with_capacity(2048);
    html.push_str("<div class=\"medical-passport\">");
    html.push_str("<div class=\"header\">DIGITAL MEDICAL PRODUCT PASSPORT</div>");

    html.push_str("<div class=\"passport-body\">");
    let _ = write!(
        html,
        "<div class=\"product-photo\"><img src=\"{}\" alt=\"{}\" /></div>",
        encode_double_quoted_attribute(&model.image),
        encode_double_quoted_attribute(&model.image_alt),
    );
    let _ = write!(
        html,
        "<div class=\"product-info\"><h2>{}</h2><ul>",
        encode_text(&model.name)
    );
    for (label, value) in [
        ("Product ID", &model.product_id),
        ("Manufacturer", &model.manufacturer),
        ("Batch Number", &model.batch_number),
        ("Expiry Date", &model.expiry_date),
        ("Certification", &model.certification),
        ("Description", &model.description),
    ] {
        let _ = write!(
            html,
            "<li><strong>{label}:</strong> {}</li>",
            encode_text(value)
        );
    }
    html.push_str("</ul></div></div>");

    let _ = write!(
        html,
        "<div class=\"footer\"><div class=\"footer-name\">{}</div><div class=\"footer-details\">{}</div>\
         <button class=\"chat-button\" data-action=\"toggle-chat\">Ask AI</button></div>",
        encode_text(&model.name),
        encode_text(&model.footer_details),
    );

    html.push_str(&render_chat_panel());
    html.push_str("</div>");
    html
}

/// Chat panel markup; it is hidden until the page script adds the visible class.
fn render_chat_panel() -> String {
    format!(
        "<div id=\"chatbot-popup\" class=\"{PANEL_CLASS}\">\
         <div class=\"chat-header\">Ask AI <span data-action=\"toggle-chat\" style=\"cursor:pointer;float:right;\">❌</span></div>\
         <div id=\"chat-messages\" class=\"chat-messages\"></div>\
         <div class=\"chat-input\">\
         <input type=\"text\" id=\"chat-input\" placeholder=\"{CHAT_INPUT_PLACEHOLDER}\" autocomplete=\"off\" />\
         <button id=\"mic-btn\" title=\"Voice input not implemented yet\">🎤</button>\
         <button id=\"send-btn\" title=\"Send message\">➤</button>\
         </div></div>"
    )
}
