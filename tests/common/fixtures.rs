//! Test fixtures - firmware sources holding raw HTML literals.

/// Both pages, minimal bodies
pub const WEB_PAGES_CPP: &str = r#"#include "web_pages.h"

const char htmlPage[] PROGMEM = R"rawliteral(<h1>Hi</h1>)rawliteral";

const char apHtmlPage[] PROGMEM = R"rawliteral(<h1>AP</h1>)rawliteral";
"#;

/// Only the primary page; the access-point literal is missing
pub const WEB_PAGES_CPP_NO_AP: &str = r#"#include "web_pages.h"

const char htmlPage[] PROGMEM = R"rawliteral(<h1>Hi</h1>)rawliteral";
"#;

/// Realistic multi-line pages
pub const WEB_PAGES_CPP_FULL: &str = r#"#include "web_pages.h"

const char htmlPage[] PROGMEM = R"rawliteral(
<!DOCTYPE html>
<html>
<head><meta name="viewport" content="width=device-width"><title>Analyzer</title></head>
<body>
  <h1>Audio Analyzer</h1>
  <div id="status">Connecting&hellip;</div>
  <script>
    const ws = new WebSocket(`ws://${location.host}/ws`);
    ws.onmessage = (e) => { document.getElementById("status").textContent = e.data; };
  </script>
</body>
</html>
)rawliteral";

const char apHtmlPage[] PROGMEM = R"rawliteral(
<!DOCTYPE html>
<html>
<body>
  <h1>Wi-Fi Setup</h1>
  <form action="/save" method="POST">
    <input name="ssid" placeholder="SSID">
    <input name="pass" type="password" placeholder="Password">
    <button type="submit">Save</button>
  </form>
</body>
</html>
)rawliteral";
"#;

/// Text of `htmlPage` in WEB_PAGES_CPP_FULL
pub fn full_html_page() -> &'static str {
    body_of(WEB_PAGES_CPP_FULL, "htmlPage")
}

/// Text of `apHtmlPage` in WEB_PAGES_CPP_FULL
pub fn full_ap_html_page() -> &'static str {
    body_of(WEB_PAGES_CPP_FULL, "apHtmlPage")
}

fn body_of(source: &'static str, name: &str) -> &'static str {
    let open = format!("const char {name}[] PROGMEM = R\"rawliteral(");
    let start = source.find(&open).expect("literal start") + open.len();
    let len = source[start..].find(")rawliteral\"").expect("literal end");
    &source[start..start + len]
}
