//! Rich text blocks and their HTML rendering

use serde::{Deserialize, Serialize};

use crate::helpers::html_escape;

/// A block of structured text from the content API
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RichTextBlock {
    #[serde(rename = "type")]
    pub kind: String,
    pub text: String,
    pub spans: Vec<Span>,
}

/// Inline formatting over a range of a block's text
///
/// `start` and `end` count UTF-16 code units.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Span {
    pub start: usize,
    pub end: usize,
    #[serde(rename = "type")]
    pub kind: String,
    pub data: Option<SpanData>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SpanData {
    pub url: Option<String>,
}

/// Render a sequence of blocks as HTML
///
/// Consecutive list items are wrapped in a single `<ul>` or `<ol>`.
pub fn render_blocks(blocks: &[RichTextBlock]) -> String {
    let mut html = String::new();
    let mut open_list: Option<&'static str> = None;

    for block in blocks {
        let list = match block.kind.as_str() {
            "list-item" => Some("ul"),
            "o-list-item" => Some("ol"),
            _ => None,
        };

        if open_list != list {
            if let Some(tag) = open_list {
                html.push_str(&format!("</{}>", tag));
            }
            if let Some(tag) = list {
                html.push_str(&format!("<{}>", tag));
            }
            open_list = list;
        }

        let inner = render_inline(&block.text, &block.spans);
        let element = match block.kind.as_str() {
            "heading1" => "h1",
            "heading2" => "h2",
            "heading3" => "h3",
            "heading4" => "h4",
            "heading5" => "h5",
            "heading6" => "h6",
            "list-item" | "o-list-item" => "li",
            "preformatted" => "pre",
            _ => "p",
        };
        html.push_str(&format!("<{0}>{1}</{0}>", element, inner));
    }

    if let Some(tag) = open_list {
        html.push_str(&format!("</{}>", tag));
    }

    html
}

/// Render text with its spans applied; overlapping spans after the first are ignored
fn render_inline(text: &str, spans: &[Span]) -> String {
    let units: Vec<u16> = text.encode_utf16().collect();
    let mut spans: Vec<&Span> = spans
        .iter()
        .filter(|s| s.start < s.end && s.end <= units.len())
        .collect();
    spans.sort_by_key(|s| s.start);

    let slice = |from: usize, to: usize| html_escape(&String::from_utf16_lossy(&units[from..to]));

    let mut html = String::new();
    let mut pos = 0;
    for span in spans {
        if span.start < pos {
            continue;
        }
        html.push_str(&slice(pos, span.start));
        let inner = slice(span.start, span.end);
        match span.kind.as_str() {
            "strong" => html.push_str(&format!("<strong>{}</strong>", inner)),
            "em" => html.push_str(&format!("<em>{}</em>", inner)),
            "hyperlink" => {
                match span.data.as_ref().and_then(|d| d.url.as_deref()) {
                    Some(url) => html.push_str(&format!(
                        r#"<a href="{}" target="_blank" rel="noopener">{}</a>"#,
                        html_escape(url),
                        inner
                    )),
                    None => html.push_str(&inner),
                }
            }
            _ => html.push_str(&inner),
        }
        pos = span.end;
    }
    html.push_str(&slice(pos, units.len()));

    html
}

#[cfg(test)]
mod tests {
    use super::*;

    fn block(kind: &str, text: &str) -> RichTextBlock {
        RichTextBlock {
            kind: kind.to_string(),
            text: text.to_string(),
            spans: Vec::new(),
        }
    }

    fn span(start: usize, end: usize, kind: &str) -> Span {
        Span {
            start,
            end,
            kind: kind.to_string(),
            data: None,
        }
    }

    #[test]
    fn test_paragraphs_and_headings() {
        let html = render_blocks(&[block("heading2", "Intro"), block("paragraph", "a < b")]);
        assert_eq!(html, "<h2>Intro</h2><p>a &lt; b</p>");
    }

    #[test]
    fn test_list_grouping() {
        let html = render_blocks(&[
            block("list-item", "one"),
            block("list-item", "two"),
            block("o-list-item", "first"),
            block("paragraph", "end"),
        ]);
        assert_eq!(
            html,
            "<ul><li>one</li><li>two</li></ul><ol><li>first</li></ol><p>end</p>"
        );
    }

    #[test]
    fn test_spans() {
        let mut b = block("paragraph", "Hello bold world");
        b.spans = vec![span(6, 10, "strong")];
        assert_eq!(render_blocks(&[b]), "<p>Hello <strong>bold</strong> world</p>");
    }

    #[test]
    fn test_hyperlink_span() {
        let mut b = block("paragraph", "see docs");
        let mut link = span(4, 8, "hyperlink");
        link.data = Some(SpanData {
            url: Some("https://example.com/?a=1&b=2".to_string()),
        });
        b.spans = vec![link];
        assert_eq!(
            render_blocks(&[b]),
            r#"<p>see <a href="https://example.com/?a=1&amp;b=2" target="_blank" rel="noopener">docs</a></p>"#
        );
    }

    #[test]
    fn test_spans_use_utf16_offsets() {
        // "ação" is four UTF-16 units
        let mut b = block("paragraph", "ação rápida");
        b.spans = vec![span(5, 11, "em")];
        assert_eq!(render_blocks(&[b]), "<p>ação <em>rápida</em></p>");
    }

    #[test]
    fn test_out_of_range_span_ignored() {
        let mut b = block("paragraph", "short");
        b.spans = vec![span(2, 50, "strong"), span(0, 2, "em"), span(1, 3, "strong")];
        assert_eq!(render_blocks(&[b]), "<p><em>sh</em>ort</p>");
    }
}
