use crate::fetcher::LOADING;
use crate::render::render_notice;
use kuchiki::NodeRef;
use kuchiki::traits::*;
use thiserror::Error;

pub const DISPLAY_REGION: &str = "#product-container";

#[derive(Debug, Error)]
pub enum PageError {
    #[error("html manipulation failed: {0}")]
    Html(String),
    #[error("region {0} not found in page")]
    MissingRegion(String),
}

const SHELL: &str = r#"<!DOCTYPE html>
<html lang="en">
<head>
<meta charset="utf-8">
<meta name="viewport" content="width=device-width, initial-scale=1">
<title>Digital Medical Product Passport</title>
<style>
body{font-family:system-ui,sans-serif;background:#eef2f5;margin:0;padding:24px}
.medical-passport{max-width:820px;margin:0 auto;background:#fff;border-radius:12px;box-shadow:0 2px 12px rgba(0,0,0,.12);overflow:hidden;position:relative}
.header{background:#0b4f6c;color:#fff;padding:14px 20px;font-weight:700;letter-spacing:1px}
.passport-body{display:flex;gap:24px;padding:20px}
.product-photo img{width:300px;max-width:100%;border-radius:8px}
.product-info ul{list-style:none;padding:0}
.product-info li{margin:6px 0}
.footer{display:flex;align-items:center;gap:16px;padding:14px 20px;border-top:1px solid #dde3e8}
.footer-name{font-weight:700}
.chat-button{margin-left:auto;background:#0b4f6c;color:#fff;border:none;border-radius:6px;padding:8px 14px;cursor:pointer}
.chat-popup{display:none;position:fixed;right:24px;bottom:24px;width:340px;background:#fff;border-radius:10px;box-shadow:0 4px 18px rgba(0,0,0,.2)}
.chat-popup.visible{display:block}
.chat-header{background:#0b4f6c;color:#fff;padding:10px 12px;border-radius:10px 10px 0 0}
.chat-messages{height:260px;overflow-y:auto;padding:10px;font-size:.9rem}
.chat-input{display:flex;gap:6px;padding:8px;border-top:1px solid #dde3e8}
.chat-input input{flex:1;padding:6px}
</style>
</head>
<body>
<div id="product-container"></div>
<script src="/passport.js"></script>
</body>
</html>
"#;

/// Page shell with `region_html` mounted in the display region.
pub fn render_shell(region_html: &str) -> Result<String, PageError> {
    let document = kuchiki::parse_html().one(SHELL);
    replace_selector_inner_html(&document, DISPLAY_REGION, region_html)?;
    Ok(document.to_string())
}

/// Page shell in its first observable state, showing the loading notice.
pub fn loading_shell() -> Result<String, PageError> {
    render_shell(&render_notice(LOADING))
}

fn replace_selector_inner_html(
    document: &NodeRef,
    selector: &str,
    new_html: &str,
) -> Result<(), PageError> {
    let region = document
        .select_first(selector)
        .map_err(|_| PageError::MissingRegion(selector.to_string()))?;
    let region = region.as_node();
    for child in region.children().collect::<Vec<_>>() {
        child.detach();
    }

    // html5ever puts a bare fragment under <html><body>; only the body's children move.
    let parsed = kuchiki::parse_html().one(new_html);
    let body = parsed
        .select_first("body")
        .map_err(|_| PageError::Html("region html produced no body".to_string()))?;
    for child in body.as_node().children().collect::<Vec<_>>() {
        region.append(child);
    }
    Ok(())
}
