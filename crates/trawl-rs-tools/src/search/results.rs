//! Parsing and rendering of search replies.

use crate::WebError;
use log::warn;
use serde_json::Value;
use trawl_rs_protocol::{SearchPage, SearchPayload, ToolCallResult};

/// Extract the result pages from a `tools/call` result.
///
/// Only the first text block is consulted. Its text is itself a JSON object
/// with a `pages` list.
pub fn parse_search_reply(result: &Value, query: &str) -> Result<Vec<SearchPage>, WebError> {
    let call_result = ToolCallResult::from_value(result);
    if call_result.is_error {
        warn!("remote search flagged its result as an error");
    }
    let text = match call_result.first_text() {
        Some(text) if !text.is_empty() => text,
        _ => return Err(no_results(query)),
    };

    let payload = serde_json::from_str::<Value>(text)
        .and_then(serde_json::from_value::<SearchPayload>)
        .map_err(|err| WebError::MalformedPayload {
            reason: err.to_string(),
            raw: text.to_string(),
        })?;
    if payload.pages.is_empty() {
        return Err(no_results(query));
    }
    Ok(payload.pages)
}

/// Render pages as numbered blocks under a `Results for:` header.
pub fn format_results(query: &str, pages: &[SearchPage]) -> String {
    let mut lines = vec![format!("Results for: {query}\n")];
    for (index, page) in pages.iter().enumerate() {
        lines.push(format!("{}. {}", index + 1, page.title));
        lines.push(format!("   URL: {}", page.url));
        lines.push(format!("   Snippet: {}", page.snippet));
        lines.push(String::new());
    }
    lines.join("\n").trim().to_string()
}

fn no_results(query: &str) -> WebError {
    WebError::NoResults {
        query: query.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use serde_json::json;

    fn reply_with_text(text: &str) -> Value {
        json!({ "content": [{ "type": "text", "text": text }] })
    }

    #[test]
    fn formats_every_page() {
        let payload = json!({
            "pages": [
                { "title": "Rust", "url": "https://www.rust-lang.org", "snippet": "A language" },
                { "url": "https://crates.io" },
            ]
        });
        let pages = parse_search_reply(&reply_with_text(&payload.to_string()), "rust")
            .expect("pages");
        assert_eq!(
            format_results("rust", &pages),
            "Results for: rust\n\n1. Rust\n   URL: https://www.rust-lang.org\n   Snippet: A language\n\n2. No Title\n   URL: https://crates.io\n   Snippet:"
        );
    }

    #[test]
    fn missing_text_block_means_no_results() {
        let err = parse_search_reply(&json!({ "content": [{ "type": "image" }] }), "rust")
            .expect_err("no results");
        assert_eq!(err.to_agent_message(), "No search results found for query: rust");

        let err = parse_search_reply(&json!({}), "rust").expect_err("no results");
        assert!(matches!(err, WebError::NoResults { .. }));
    }

    #[test]
    fn empty_pages_are_distinct_from_parse_failures() {
        let err = parse_search_reply(&reply_with_text(r#"{"pages": []}"#), "rust")
            .expect_err("no results");
        assert!(matches!(err, WebError::NoResults { .. }));
    }

    #[test]
    fn malformed_payload_keeps_raw_text() {
        let err = parse_search_reply(&reply_with_text("upstream quota exceeded"), "rust")
            .expect_err("malformed");
        let WebError::MalformedPayload { raw, .. } = &err else {
            panic!("expected malformed payload, got {err:?}");
        };
        assert_eq!(raw, "upstream quota exceeded");
        assert!(err
            .to_agent_message()
            .ends_with("Raw response: upstream quota exceeded"));
    }

    #[test]
    fn only_the_first_text_block_is_used() {
        let result = json!({
            "content": [
                { "type": "text", "text": r#"{"pages": [{"title": "first", "url": "u", "snippet": "s"}]}"# },
                { "type": "text", "text": r#"{"pages": [{"title": "second", "url": "u", "snippet": "s"}]}"# },
            ]
        });
        let pages = parse_search_reply(&result, "q").expect("pages");
        assert_eq!(pages.len(), 1);
        assert_eq!(pages[0].title, "first");
    }
}
