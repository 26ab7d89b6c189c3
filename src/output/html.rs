use anyhow::{Context, Result};
use serde_json::json;

use crate::host::{self, Host, MemoryHost};
use crate::model::DisplayState;

/// Escape text for use in HTML element content or a quoted attribute.
pub fn escape_html(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    for c in s.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            _ => out.push(c),
        }
    }
    out
}

fn children(host: &MemoryHost, id: &str) -> Result<String> {
    let el = host
        .element(id)
        .with_context(|| format!("element #{} not found", id))?;
    Ok(el.children.concat())
}

/// Render a self-contained receipt page from a host the view has already
/// drawn into.
///
/// Both time styles are embedded so the page's toggle button works without
/// recomputing anything; `alternate` is what the first toggle shows.
pub fn render_page(
    host: &MemoryHost,
    current: &DisplayState,
    alternate: &DisplayState,
) -> Result<String> {
    let receipt = escape_html(&host.read_text(host::RECEIPT)?);
    let keydate = escape_html(&host.read_text(host::KEYDATE)?);
    let now = escape_html(&host.read_text(host::NOW)?);
    let square_class = host
        .element(host::SQUARE)
        .and_then(|el| el.class.clone())
        .unwrap_or_default();
    let qrcode = children(host, host::QRCODE)?;
    let footer = host
        .element(host::JSFOOTER)
        .map(|el| el.children.concat())
        .unwrap_or_default();

    let (twelve, twenty_four) = if current.hour12 {
        (current, alternate)
    } else {
        (alternate, current)
    };
    let times = json!({
        "initial_hour12": current.hour12,
        "hour12": { "keydate": twelve.receipt_time, "now": twelve.now_time },
        "hour24": { "keydate": twenty_four.receipt_time, "now": twenty_four.now_time },
    });
    // HTML5 parsers match </script> case-insensitively, so every `<` is
    // neutralized rather than just the lowercase closing tag.
    let safe_json = serde_json::to_string(&times)?.replace('<', "\\u003c");

    Ok(format!(
        r##"<!DOCTYPE html>
<html lang="en">
<head>
<meta charset="UTF-8">
<meta name="viewport" content="width=device-width, initial-scale=1.0">
<title>Survey Completion Receipt</title>
<style>
body {{
  font-family: -apple-system, BlinkMacSystemFont, 'Segoe UI', Roboto, sans-serif;
  line-height: 1.6;
  padding: 2rem;
  max-width: 720px;
  margin: 0 auto;
  text-align: center;
}}
#qrcode svg {{ display: block; margin: 1rem auto; }}
#receipt {{ font-family: monospace; font-size: 1.2rem; word-break: break-all; }}
.status {{ display: flex; align-items: center; justify-content: center; gap: 0.75rem; }}
#square {{ width: 2rem; height: 2rem; border-radius: 4px; }}
.grey-square {{ background-color: #999999; }}
.blue-square {{ background-color: #88CCEE; }}
.yellow-square {{ background-color: #DDCC77; }}
.red-square {{ background-color: #CC6677; }}
.rbutton {{ padding: 0.5rem 1rem; border-radius: 4px; cursor: pointer; }}
.footer {{ text-align: left; margin-top: 2rem; }}
.color-box {{ display: inline-block; padding: 0.25rem 0.75rem; margin-right: 0.5rem; border-radius: 4px; }}
</style>
</head>
<body>
<div id="qrcode">{qrcode}</div>
<p id="receipt">{receipt}</p>
<div class="status">
  <div id="square" class="{square_class}"></div>
  <div>
    <div>Receipt time: <span id="keydate">{keydate}</span></div>
    <div>Page loaded: <span id="now">{now}</span></div>
  </div>
</div>
<div id="jsfooter">{footer}</div>
<script>
const RECEIPT_TIMES = {safe_json};

let hour12 = RECEIPT_TIMES.initial_hour12;

function changeTimeStyle() {{
  hour12 = !hour12;
  const t = hour12 ? RECEIPT_TIMES.hour12 : RECEIPT_TIMES.hour24;
  document.getElementById('keydate').textContent = t.keydate;
  document.getElementById('now').textContent = t.now;
}}
</script>
</body>
</html>
"##,
        square_class = escape_html(&square_class),
    ))
}
