//! Request routing and HTML rendering for the web form.
//!
//! Kept free of any server types so routing can be tested without sockets.

use crate::present::OutputFormat;
use serde_json::json;
use url::form_urlencoded;

pub const TITLE: &str = "YouTube Video Sentiment Analysis";
pub const DESCRIPTION: &str =
    "Enter a YouTube video ID to analyze the sentiment of each line by line.";
pub const FIELD_LABEL: &str = "YouTube Video ID";

/// Response produced by [`route`].
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Reply {
    pub status: u16,
    pub content_type: &'static str,
    pub body: String,
}

impl Reply {
    fn html(status: u16, body: String) -> Self {
        Self {
            status,
            content_type: "text/html; charset=utf-8",
            body,
        }
    }

    fn json(status: u16, body: String) -> Self {
        Self {
            status,
            content_type: "application/json",
            body,
        }
    }

    fn text(status: u16, body: &str) -> Self {
        Self {
            status,
            content_type: "text/plain; charset=utf-8",
            body: body.to_string(),
        }
    }
}

/// Route one request.
///
/// `analyze` receives the submitted video id (or URL) and returns the
/// rendered outcome in the requested format.
pub fn route<F>(method: &str, url: &str, body: &str, mut analyze: F) -> Reply
where
    F: FnMut(&str, OutputFormat) -> String,
{
    let (path, query) = url.split_once('?').unwrap_or((url, ""));

    match (method, path) {
        ("GET", "/") => match field(query, "video_id") {
            Some(video_id) => {
                let output = analyze(&video_id, OutputFormat::Text);
                Reply::html(200, page(&video_id, Some(&output)))
            }
            None => Reply::html(200, page("", None)),
        },
        ("POST", "/") => match field(body, "video_id") {
            Some(video_id) => {
                let output = analyze(&video_id, OutputFormat::Text);
                Reply::html(200, page(&video_id, Some(&output)))
            }
            None => Reply::html(200, page("", Some("Please enter a YouTube video ID."))),
        },
        ("GET", "/api/analyze") => match field(query, "video_id") {
            Some(video_id) => Reply::json(200, analyze(&video_id, OutputFormat::Json)),
            None => Reply::json(
                400,
                json!({ "error": "missing video_id parameter", "kind": "request" }).to_string(),
            ),
        },
        (_, "/" | "/api/analyze") => Reply::text(405, "Method Not Allowed"),
        _ => Reply::text(404, "Not Found"),
    }
}

/// First non-blank value of `key` in a urlencoded string.
fn field(encoded: &str, key: &str) -> Option<String> {
    form_urlencoded::parse(encoded.as_bytes())
        .find(|(k, _)| k == key)
        .map(|(_, v)| v.trim().to_string())
        .filter(|v| !v.is_empty())
}

/// Render the form page, optionally followed by an output block.
pub fn page(video_id: &str, output: Option<&str>) -> String {
    let output = output
        .map(|text| format!("\n    <h2>Output</h2>\n    <pre>{}</pre>", escape_html(text)))
        .unwrap_or_default();

    format!(
        r#"<!DOCTYPE html>
<html lang="en">
<head>
  <meta charset="utf-8">
  <title>{TITLE}</title>
  <style>
    body {{ font-family: sans-serif; max-width: 48rem; margin: 2rem auto; padding: 0 1rem; }}
    input[type=text] {{ width: 100%; padding: 0.5rem; box-sizing: border-box; }}
    pre {{ background: #f4f4f4; padding: 1rem; white-space: pre-wrap; }}
  </style>
</head>
<body>
  <main>
    <h1>{TITLE}</h1>
    <p>{DESCRIPTION}</p>
    <form method="post" action="/">
      <label for="video_id">{FIELD_LABEL}</label>
      <input type="text" id="video_id" name="video_id" value="{value}" autofocus>
      <button type="submit">Submit</button>
    </form>{output}
  </main>
</body>
</html>
"#,
        value = escape_html(video_id),
    )
}

/// Escape text for HTML element content and attribute values.
pub fn escape_html(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for c in text.chars() {
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
