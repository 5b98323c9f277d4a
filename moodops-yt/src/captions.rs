//! Timedtext XML parsing.
//!
//! YouTube serves caption tracks as
//! `<transcript><text start="0.5" dur="1.2">Hello &amp;amp; welcome</text>…</transcript>`.
//! Entity text is escaped twice (XML, then HTML) and may carry inline markup.

use crate::error::{FetchError, Result};
use crate::transcript::CaptionEntry;
use regex::Regex;
use std::sync::LazyLock;

static TEXT_ELEMENT: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r#"(?s)<text\b([^>]*?)(?:/>|>(.*?)</text>)"#).expect("valid regex")
});

static ATTRIBUTE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r#"(\w+)="([^"]*)""#).expect("valid regex"));

static MARKUP: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"<[^>]*>").expect("valid regex"));

/// Parse a timedtext document into caption entries.
///
/// Entries without text (or whose text is only markup) are dropped.
pub fn parse_timedtext(xml: &str) -> Result<Vec<CaptionEntry>> {
    if !xml.contains("<transcript") {
        return Err(FetchError::Unparsable(
            "timedtext response has no <transcript> element".to_string(),
        ));
    }

    let entries = TEXT_ELEMENT
        .captures_iter(xml)
        .filter_map(|caps| {
            let attrs = caps.get(1).map_or("", |m| m.as_str());
            let body = caps.get(2)?.as_str();

            let text = clean_text(body);
            if text.is_empty() {
                return None;
            }

            Some(CaptionEntry {
                text,
                start: attribute(attrs, "start").unwrap_or(0.0),
                duration: attribute(attrs, "dur").unwrap_or(0.0),
            })
        })
        .collect();

    Ok(entries)
}

fn attribute(attrs: &str, name: &str) -> Option<f32> {
    ATTRIBUTE
        .captures_iter(attrs)
        .find(|caps| &caps[1] == name)
        .and_then(|caps| caps[2].parse().ok())
}

/// XML-unescape, HTML-unescape, then strip inline markup.
fn clean_text(raw: &str) -> String {
    let text = unescape(&unescape(raw));
    MARKUP.replace_all(&text, "").trim().to_string()
}

/// Decode named and numeric character references.
///
/// Unknown references are kept verbatim.
pub fn unescape(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    let mut rest = s;

    while let Some(amp) = rest.find('&') {
        out.push_str(&rest[..amp]);
        rest = &rest[amp..];

        let decoded = rest
            .find(';')
            .filter(|&semi| semi <= 10)
            .and_then(|semi| decode_reference(&rest[1..semi]).map(|c| (c, semi)));

        match decoded {
            Some((c, semi)) => {
                out.push(c);
                rest = &rest[semi + 1..];
            }
            None => {
                out.push('&');
                rest = &rest[1..];
            }
        }
    }

    out.push_str(rest);
    out
}

fn decode_reference(name: &str) -> Option<char> {
    if let Some(num) = name.strip_prefix('#') {
        let code = match num.strip_prefix(['x', 'X']) {
            Some(hex) => u32::from_str_radix(hex, 16).ok()?,
            None => num.parse().ok()?,
        };
        return char::from_u32(code);
    }

    let c = match name {
        "amp" => '&',
        "lt" => '<',
        "gt" => '>',
        "quot" => '"',
        "apos" => '\'',
        "nbsp" => '\u{a0}',
        _ => return None,
    };
    Some(c)
}
