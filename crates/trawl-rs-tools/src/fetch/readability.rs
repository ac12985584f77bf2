//! Main-content extraction for HTML pages.
//!
//! A heuristic, not a DOM parser: noise subtrees are dropped, the first
//! region with visible text among `<article>`, `<main>`, `role="main"` and
//! `<body>` is kept, and page chrome inside it is removed.

use crate::WebError;
use crate::fetch::markdown::{HtmlRules, compile};
use regex::Regex;

/// Title and main-content HTML of a page.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReadableDocument {
    pub title: Option<String>,
    pub content_html: String,
}

#[derive(Debug, Clone)]
pub struct Readability {
    comments: Regex,
    noise: Regex,
    chrome: Regex,
    regions: Vec<Regex>,
    title: Regex,
    og_title: Vec<Regex>,
    first_h1: Regex,
    whitespace: Regex,
}

impl Readability {
    pub fn new() -> Result<Self, WebError> {
        Ok(Self {
            comments: compile(r"(?s)<!--.*?-->")?,
            noise: compile(
                r"(?i)<(?P<tag>script|style|noscript|template|svg|iframe|form)\b[^>]*>",
            )?,
            chrome: compile(r"(?i)<(?P<tag>nav|header|footer|aside)\b[^>]*>")?,
            regions: vec![
                compile(r"(?i)<(?P<tag>article)\b[^>]*>")?,
                compile(r"(?i)<(?P<tag>main)\b[^>]*>")?,
                compile(r#"(?i)<(?P<tag>[a-z][a-z0-9]*)\b[^>]*\brole\s*=\s*["']?main\b[^>]*>"#)?,
                compile(r"(?i)<(?P<tag>body)\b[^>]*>")?,
            ],
            title: compile(r"(?is)<title\b[^>]*>(.*?)</title\s*>")?,
            og_title: vec![
                compile(
                    r#"(?is)<meta\b[^>]*property\s*=\s*["']og:title["'][^>]*content\s*=\s*["']([^"']*)["']"#,
                )?,
                compile(
                    r#"(?is)<meta\b[^>]*content\s*=\s*["']([^"']*)["'][^>]*property\s*=\s*["']og:title["']"#,
                )?,
            ],
            first_h1: compile(r"(?is)<h1\b[^>]*>(.*?)</h1\s*>")?,
            whitespace: compile(r"\s+")?,
        })
    }

    /// Extract the title and main-content HTML.
    ///
    /// Fails when no visible text remains anywhere in the page.
    pub fn extract(&self, html: &str, rules: &HtmlRules) -> Result<ReadableDocument, WebError> {
        let title = self.title(html, rules);
        let cleaned = self.comments.replace_all(html, "");
        let cleaned = remove_elements(&cleaned, &self.noise);

        let region = self
            .regions
            .iter()
            .flat_map(|open| element_contents(&cleaned, open))
            .find(|candidate| has_visible_text(candidate, rules))
            .unwrap_or(cleaned.as_str());
        let content_html = remove_elements(region, &self.chrome);

        if !has_visible_text(&content_html, rules) {
            return Err(WebError::Extraction(
                "no readable content found in page".to_string(),
            ));
        }
        Ok(ReadableDocument {
            title,
            content_html,
        })
    }

    /// `<title>`, then `og:title`, then the first `<h1>`.
    pub fn title(&self, html: &str, rules: &HtmlRules) -> Option<String> {
        std::iter::once(&self.title)
            .chain(self.og_title.iter())
            .chain(std::iter::once(&self.first_h1))
            .filter_map(|pattern| pattern.captures(html))
            .filter_map(|caps| caps.get(1).map(|inner| inner.as_str().to_string()))
            .map(|inner| self.clean_title(&inner, rules))
            .find(|title| !title.is_empty())
    }

    fn clean_title(&self, inner: &str, rules: &HtmlRules) -> String {
        let text = rules.strip_tags(inner);
        self.whitespace.replace_all(&text, " ").trim().to_string()
    }
}

fn has_visible_text(html: &str, rules: &HtmlRules) -> bool {
    !rules.strip_tags(html).is_empty()
}

/// Inner HTML of every element whose opening tag matches `open`.
///
/// `open` must capture the tag name as `tag`. Nested elements of the same
/// name are balanced; an unclosed element runs to the end of the input.
fn element_contents<'a>(html: &'a str, open: &Regex) -> Vec<&'a str> {
    let lowered = html.to_ascii_lowercase();
    open.captures_iter(html)
        .filter_map(|caps| {
            let whole = caps.get(0)?;
            let tag = caps.name("tag")?.as_str().to_ascii_lowercase();
            let (close_start, _) = find_closing(&lowered, whole.end(), &tag);
            Some(&html[whole.end()..close_start])
        })
        .collect()
}

/// Remove every element matched by `open`, including its contents.
fn remove_elements(html: &str, open: &Regex) -> String {
    let mut current = html.to_string();
    while let Some(caps) = open.captures(&current) {
        let (Some(whole), Some(tag)) = (caps.get(0), caps.name("tag")) else {
            break;
        };
        let start = whole.start();
        let tag = tag.as_str().to_ascii_lowercase();
        let lowered = current.to_ascii_lowercase();
        let (_, close_end) = find_closing(&lowered, whole.end(), &tag);
        current.replace_range(start..close_end, "");
    }
    current
}

/// Locate the closing tag that balances an element opened before `from`.
///
/// `lowered` must be ASCII-lowercased so byte offsets match the original.
/// Returns the start and end offsets of the closing tag, or the input length
/// twice when the element is never closed.
fn find_closing(lowered: &str, from: usize, tag: &str) -> (usize, usize) {
    let opening = format!("<{tag}");
    let closing = format!("</{tag}");
    let mut depth = 1usize;
    let mut cursor = from;
    while let Some(offset) = lowered[cursor..].find('<') {
        let at = cursor + offset;
        let rest = &lowered[at..];
        if starts_with_tag(rest, &closing) {
            depth -= 1;
            if depth == 0 {
                let end = rest.find('>').map_or(lowered.len(), |gt| at + gt + 1);
                return (at, end);
            }
        } else if starts_with_tag(rest, &opening) {
            depth += 1;
        }
        cursor = at + 1;
    }
    (lowered.len(), lowered.len())
}

fn starts_with_tag(rest: &str, prefix: &str) -> bool {
    rest.starts_with(prefix)
        && rest[prefix.len()..]
            .chars()
            .next()
            .is_none_or(|next| !next.is_ascii_alphanumeric())
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn extract(html: &str) -> Result<ReadableDocument, WebError> {
        let rules = HtmlRules::new().expect("rules");
        Readability::new().expect("readability").extract(html, &rules)
    }

    #[test]
    fn prefers_article_over_body() {
        let doc = extract(concat!(
            "<html><head><title> Launch  notes </title></head><body>",
            "<nav>Home | About</nav>",
            "<article><h1>Release</h1><p>Shipped today.</p></article>",
            "<footer>(c) 2024</footer></body></html>"
        ))
        .expect("doc");
        assert_eq!(doc.title.as_deref(), Some("Launch notes"));
        assert_eq!(doc.content_html, "<h1>Release</h1><p>Shipped today.</p>");
    }

    #[test]
    fn skips_empty_articles_and_falls_back_to_main() {
        let doc = extract(
            "<body><article> </article><main><p>Main text</p></main><p>outside</p></body>",
        )
        .expect("doc");
        assert_eq!(doc.content_html, "<p>Main text</p>");
    }

    #[test]
    fn role_main_region_is_balanced() {
        let doc = extract(concat!(
            "<body><div class=\"shell\"><div role=\"main\"><div>inner</div><p>tail</p></div>",
            "<div>sidebar</div></div></body>"
        ))
        .expect("doc");
        assert_eq!(doc.content_html, "<div>inner</div><p>tail</p>");
    }

    #[test]
    fn noise_and_chrome_are_removed_from_body() {
        let doc = extract(concat!(
            "<body><header><nav>menu</nav></header><!-- tracking -->",
            "<script>track()</script><p>Body text</p><aside>ads</aside>",
            "<form><input></form></body>"
        ))
        .expect("doc");
        assert_eq!(doc.content_html, "<p>Body text</p>");
    }

    #[test]
    fn fragments_without_body_use_the_whole_document() {
        let doc = extract("<p>Just a <b>fragment</b></p>").expect("doc");
        assert_eq!(doc.title, None);
        assert_eq!(doc.content_html, "<p>Just a <b>fragment</b></p>");
    }

    #[test]
    fn title_falls_back_to_og_title_then_h1() {
        let rules = HtmlRules::new().expect("rules");
        let readability = Readability::new().expect("readability");
        assert_eq!(
            readability
                .title(
                    r#"<meta content="Shared Title" property="og:title"><h1>Heading</h1>"#,
                    &rules
                )
                .as_deref(),
            Some("Shared Title")
        );
        assert_eq!(
            readability
                .title("<title></title><h1>Heading &amp; more</h1>", &rules)
                .as_deref(),
            Some("Heading & more")
        );
    }

    #[test]
    fn pages_without_text_are_extraction_errors() {
        let err = extract("<html><body><script>only()</script></body></html>")
            .expect_err("empty");
        assert!(matches!(err, WebError::Extraction(_)));
    }
}
