//! Regex-based HTML to markdown/text conversion.
//!
//! Each rule is a separate text-to-text step. `to_markdown` applies them in
//! order: anchors, headings, list items, block closes, line breaks, then tag
//! stripping and whitespace normalization.

use crate::WebError;
use regex::{Captures, Regex};

/// Compiled patterns for the conversion rules.
#[derive(Debug, Clone)]
pub struct HtmlRules {
    script: Regex,
    style: Regex,
    tag: Regex,
    anchor: Regex,
    headings: Vec<Regex>,
    list_item: Regex,
    block_close: Regex,
    line_break: Regex,
    spaces: Regex,
    blank_lines: Regex,
}

impl HtmlRules {
    pub fn new() -> Result<Self, WebError> {
        let headings = (1..=6)
            .map(|level| compile(&format!(r"(?i)<h{level}[^>]*>([\s\S]*?)</h{level}>")))
            .collect::<Result<Vec<_>, _>>()?;
        Ok(Self {
            script: compile(r"(?i)<script[\s\S]*?</script>")?,
            style: compile(r"(?i)<style[\s\S]*?</style>")?,
            tag: compile(r"<[^>]+>")?,
            anchor: compile(r#"(?i)<a\s+[^>]*href=["']([^"']+)["'][^>]*>([\s\S]*?)</a>"#)?,
            headings,
            list_item: compile(r"(?i)<li[^>]*>([\s\S]*?)</li>")?,
            block_close: compile(r"(?i)</(p|div|section|article)>")?,
            line_break: compile(r"(?i)<(br|hr)\s*/?>")?,
            spaces: compile(r"[ \t]+")?,
            blank_lines: compile(r"\n{3,}")?,
        })
    }

    /// Remove script/style blocks and all tags, decode entities, trim.
    ///
    /// Repeats until nothing changes, so decoded entities that form new tags
    /// are removed too and a second application is a no-op.
    pub fn strip_tags(&self, html: &str) -> String {
        let mut current = self.strip_once(html);
        // Escaped brackets (`&lt;T&gt;`, `a &lt; b ... c &gt; d`) decode into
        // tag-shaped text and are dropped on the next pass. Idempotence wins
        // over keeping that text.
        loop {
            let next = self.strip_once(&current);
            if next == current {
                return current;
            }
            current = next;
        }
    }

    fn strip_once(&self, html: &str) -> String {
        let text = self.script.replace_all(html, "");
        let text = self.style.replace_all(&text, "");
        let text = self.tag.replace_all(&text, "");
        html_escape::decode_html_entities(&text).trim().to_string()
    }

    /// Collapse space/tab runs and 3+ newlines, then trim.
    pub fn normalize(&self, text: &str) -> String {
        let text = self.spaces.replace_all(text, " ");
        self.blank_lines
            .replace_all(&text, "\n\n")
            .trim()
            .to_string()
    }

    /// `<a href="U">inner</a>` becomes `[inner](U)`.
    pub fn convert_anchors(&self, html: &str) -> String {
        self.anchor
            .replace_all(html, |caps: &Captures| {
                format!("[{}]({})", self.strip_tags(&caps[2]), &caps[1])
            })
            .into_owned()
    }

    /// `<hN>inner</hN>` becomes a line of N hashes and the inner text.
    pub fn convert_headings(&self, html: &str) -> String {
        let mut text = html.to_string();
        for (index, heading) in self.headings.iter().enumerate() {
            let hashes = "#".repeat(index + 1);
            text = heading
                .replace_all(&text, |caps: &Captures| {
                    format!("\n{hashes} {}\n", self.strip_tags(&caps[1]))
                })
                .into_owned();
        }
        text
    }

    /// `<li>inner</li>` becomes a `- ` bullet on its own line.
    pub fn convert_list_items(&self, html: &str) -> String {
        self.list_item
            .replace_all(html, |caps: &Captures| {
                format!("\n- {}", self.strip_tags(&caps[1]))
            })
            .into_owned()
    }

    /// Closing `p`, `div`, `section` and `article` tags become paragraph breaks.
    pub fn convert_block_closes(&self, html: &str) -> String {
        self.block_close.replace_all(html, "\n\n").into_owned()
    }

    /// `br` and `hr` become single newlines.
    pub fn convert_line_breaks(&self, html: &str) -> String {
        self.line_break.replace_all(html, "\n").into_owned()
    }

    pub fn to_markdown(&self, html: &str) -> String {
        let text = self.convert_anchors(html);
        let text = self.convert_headings(&text);
        let text = self.convert_list_items(&text);
        let text = self.convert_block_closes(&text);
        let text = self.convert_line_breaks(&text);
        self.normalize(&self.strip_tags(&text))
    }

    pub fn to_text(&self, html: &str) -> String {
        self.strip_tags(html)
    }
}

pub(crate) fn compile(pattern: &str) -> Result<Regex, WebError> {
    Regex::new(pattern)
        .map_err(|err| WebError::Extraction(format!("invalid pattern {pattern}: {err}")))
}

#[cfg(test)]
mod tests {
    use super::HtmlRules;
    use pretty_assertions::assert_eq;

    fn rules() -> HtmlRules {
        HtmlRules::new().expect("rules")
    }

    #[test]
    fn anchors_become_links() {
        assert_eq!(
            rules().convert_anchors(r#"see <a class="x" href="https://a.example/p">the <b>docs</b></a>."#),
            "see [the docs](https://a.example/p)."
        );
        assert_eq!(
            rules().convert_anchors("<a href='/rel'>x</a>"),
            "[x](/rel)"
        );
    }

    #[test]
    fn headings_keep_their_level() {
        assert_eq!(rules().convert_headings("<h1>Top</h1>"), "\n# Top\n");
        assert_eq!(
            rules().convert_headings(r#"<H3 id="s">Sub <em>part</em></H3>"#),
            "\n### Sub part\n"
        );
        assert_eq!(rules().convert_headings("<h2>a</h3>"), "<h2>a</h3>");
    }

    #[test]
    fn list_items_become_bullets() {
        assert_eq!(
            rules().convert_list_items("<ul><li>one</li><li class=\"b\">two</li></ul>"),
            "<ul>\n- one\n- two</ul>"
        );
    }

    #[test]
    fn block_closes_and_breaks() {
        let rules = rules();
        assert_eq!(
            rules.convert_block_closes("<p>a</p><div>b</DIV><span>c</span>"),
            "<p>a\n\n<div>b\n\n<span>c</span>"
        );
        assert_eq!(rules.convert_line_breaks("a<br>b<br/>c<hr />d"), "a\nb\nc\nd");
    }

    #[test]
    fn strip_tags_removes_scripts_and_decodes_entities() {
        assert_eq!(
            rules().strip_tags("  <script>var a = 1;</script><p>Fish &amp; chips</p><style>p{}</style> "),
            "Fish & chips"
        );
    }

    #[test]
    fn strip_tags_is_idempotent() {
        let rules = rules();
        for input in [
            "<p>a &lt;b&gt;bold&lt;/b&gt; move</p>",
            "&amp;lt;i&amp;gt; nested",
            "  plain text  ",
            "<div><span>x</span> &nbsp; y</div>",
        ] {
            let once = rules.strip_tags(input);
            assert_eq!(rules.strip_tags(&once), once, "input: {input}");
        }
    }

    #[test]
    fn normalize_collapses_whitespace() {
        assert_eq!(
            rules().normalize("  a \t b\n\n\n\n c  "),
            "a b\n\n c"
        );
    }

    #[test]
    fn to_markdown_applies_rules_in_order() {
        let html = concat!(
            "<article><h2>Intro</h2><p>Read <a href=\"https://x.example\">this</a>.</p>",
            "<ul><li>first</li><li>second</li></ul>\n<p>line<br>next</p></article>"
        );
        assert_eq!(
            rules().to_markdown(html),
            "## Intro\nRead [this](https://x.example).\n\n- first\n- second\nline\nnext"
        );
    }

    #[test]
    fn escaped_angle_brackets_are_lost_to_idempotence() {
        let rules = rules();
        assert_eq!(
            rules.to_markdown("<p>use Vec&lt;String&gt; here</p>"),
            "use Vec here"
        );
        let stripped = rules.strip_tags("if a &lt; b and c &gt; d then");
        assert_eq!(stripped, "if a  d then");
        assert_eq!(rules.strip_tags(&stripped), stripped);
        assert_eq!(rules.strip_tags("a &lt; b"), "a < b");
    }
}
