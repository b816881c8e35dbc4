//! Inline span parsing.
//!
//! Text is split in a fixed order: bold, italic, code, links, images. Each
//! stage only descends into spans that are still plain, so styles never nest.

use once_cell::sync::Lazy;
use regex::Regex;

use crate::block::{Span, SpanKind};
use crate::error::{Error, Result};
use crate::node::Node;

static LINK_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"\[([^\[\]]*)\]\(([^\(\)]*)\)").unwrap());

static IMAGE_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"!\[([^\[\]]*)\]\(([^\(\)]*)\)").unwrap());

const DELIMITERS: [(&str, SpanKind); 3] = [
    ("**", SpanKind::Bold),
    ("_", SpanKind::Italic),
    ("`", SpanKind::Code),
];

/// Split `text` into styled spans.
pub fn parse_spans(text: &str) -> Result<Vec<Span>> {
    let mut spans = vec![Span::plain(text)];
    for (delimiter, kind) in DELIMITERS {
        spans = split_delimiter(spans, delimiter, kind)?;
    }
    spans = split_pattern(spans, &LINK_RE, SpanKind::Link);
    spans = split_pattern(spans, &IMAGE_RE, SpanKind::Image);
    Ok(spans)
}

/// Parse `text` and convert every span to a node.
pub fn inline_nodes(text: &str) -> Result<Vec<Node>> {
    parse_spans(text)?.into_iter().map(span_to_node).collect()
}

pub fn span_to_node(span: Span) -> Result<Node> {
    let Span { text, kind, url } = span;
    let node = match kind {
        SpanKind::Plain => Node::text(text),
        SpanKind::Bold => Node::leaf("b", text),
        SpanKind::Italic => Node::leaf("i", text),
        SpanKind::Code => Node::leaf("code", text),
        SpanKind::Link => {
            let Some(url) = url else {
                return Err(Error::MissingUrl { kind, text });
            };
            Node::leaf("a", text).with_attribute("href", url)
        }
        SpanKind::Image => {
            let Some(url) = url else {
                return Err(Error::MissingUrl { kind, text });
            };
            Node::leaf("img", "")
                .with_attribute("src", url)
                .with_attribute("alt", text)
        }
    };
    Ok(node)
}

fn split_delimiter(
    spans: Vec<Span>,
    delimiter: &'static str,
    kind: SpanKind,
) -> Result<Vec<Span>> {
    let mut out = Vec::with_capacity(spans.len());
    for span in spans {
        if !span.is_plain() {
            out.push(span);
            continue;
        }

        let parts: Vec<&str> = span.text.split(delimiter).collect();
        if parts.len() % 2 == 0 {
            return Err(Error::UnmatchedDelimiter {
                delimiter,
                text: span.text,
            });
        }

        for (i, part) in parts.into_iter().enumerate() {
            if part.is_empty() {
                continue;
            }
            let part_kind = if i % 2 == 0 { SpanKind::Plain } else { kind };
            out.push(Span::new(part, part_kind));
        }
    }
    Ok(out)
}

/// Pull `[text](url)` style matches out of plain spans, left to right.
fn split_pattern(spans: Vec<Span>, pattern: &Regex, kind: SpanKind) -> Vec<Span> {
    let mut out = Vec::with_capacity(spans.len());
    for span in spans {
        if !span.is_plain() {
            out.push(span);
            continue;
        }

        let text = span.text.as_str();
        let mut rest = 0;
        for caps in pattern.captures_iter(text) {
            let (Some(whole), Some(label), Some(url)) = (caps.get(0), caps.get(1), caps.get(2))
            else {
                continue;
            };
            // `![alt](url)` belongs to the image stage
            if kind == SpanKind::Link && text[..whole.start()].ends_with('!') {
                continue;
            }

            if whole.start() > rest {
                out.push(Span::plain(&text[rest..whole.start()]));
            }
            out.push(Span {
                text: label.as_str().to_string(),
                kind,
                url: Some(url.as_str().to_string()),
            });
            rest = whole.end();
        }

        if rest < text.len() {
            out.push(Span::plain(&text[rest..]));
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use rstest::rstest;

    #[test]
    fn plain_text_is_one_span() {
        assert_eq!(
            parse_spans("just words").unwrap(),
            vec![Span::plain("just words")]
        );
    }

    #[test]
    fn empty_text_has_no_spans() {
        assert!(parse_spans("").unwrap().is_empty());
    }

    #[test]
    fn bold_delimiter() {
        assert_eq!(
            parse_spans("This is **bold** text").unwrap(),
            vec![
                Span::plain("This is "),
                Span::new("bold", SpanKind::Bold),
                Span::plain(" text"),
            ]
        );
    }

    #[test]
    fn multiple_bold_runs() {
        assert_eq!(
            parse_spans("**one** and **two**").unwrap(),
            vec![
                Span::new("one", SpanKind::Bold),
                Span::plain(" and "),
                Span::new("two", SpanKind::Bold),
            ]
        );
    }

    #[test]
    fn every_style_in_one_line() {
        let spans = parse_spans(
            "This is **text** with an _italic_ word and a `code block` and an \
             ![obi wan image](https://i.imgur.com/fJRm4Vk.jpeg) and a [link](https://boot.dev)",
        )
        .unwrap();
        assert_eq!(
            spans,
            vec![
                Span::plain("This is "),
                Span::new("text", SpanKind::Bold),
                Span::plain(" with an "),
                Span::new("italic", SpanKind::Italic),
                Span::plain(" word and a "),
                Span::new("code block", SpanKind::Code),
                Span::plain(" and an "),
                Span::image("obi wan image", "https://i.imgur.com/fJRm4Vk.jpeg"),
                Span::plain(" and a "),
                Span::link("link", "https://boot.dev"),
            ]
        );
    }

    #[rstest]
    #[case("a **b", "**")]
    #[case("a _b", "_")]
    #[case("a `b", "`")]
    #[case("**a** **b", "**")]
    fn unmatched_delimiter_is_an_error(#[case] text: &str, #[case] expected: &str) {
        match parse_spans(text) {
            Err(Error::UnmatchedDelimiter { delimiter, .. }) => assert_eq!(delimiter, expected),
            other => panic!("expected unmatched delimiter, got {other:?}"),
        }
    }

    #[test]
    fn styled_text_is_not_reparsed() {
        assert_eq!(
            parse_spans("**a_b** c").unwrap(),
            vec![Span::new("a_b", SpanKind::Bold), Span::plain(" c")]
        );
    }

    #[test]
    fn italic_stage_runs_before_code() {
        let err = parse_spans("`c_d`").unwrap_err();
        assert!(matches!(err, Error::UnmatchedDelimiter { delimiter: "_", .. }));
    }

    #[test]
    fn code_and_bold_in_one_line() {
        assert_eq!(
            parse_spans("`x` and **y**").unwrap(),
            vec![
                Span::new("x", SpanKind::Code),
                Span::plain(" and "),
                Span::new("y", SpanKind::Bold),
            ]
        );
    }

    #[test]
    fn empty_styled_segments_are_dropped() {
        assert_eq!(
            parse_spans("a****b").unwrap(),
            vec![Span::plain("a"), Span::plain("b")]
        );
    }

    #[test]
    fn link_is_not_mistaken_for_image() {
        assert_eq!(
            parse_spans("see [the docs](https://example.com/docs) now").unwrap(),
            vec![
                Span::plain("see "),
                Span::link("the docs", "https://example.com/docs"),
                Span::plain(" now"),
            ]
        );
    }

    #[test]
    fn image_is_not_mistaken_for_link() {
        assert_eq!(
            parse_spans("![alt text](/img.png)").unwrap(),
            vec![Span::image("alt text", "/img.png")]
        );
    }

    #[test]
    fn adjacent_image_and_link() {
        assert_eq!(
            parse_spans("![i](/i.png)[l](/l)").unwrap(),
            vec![Span::image("i", "/i.png"), Span::link("l", "/l")]
        );
    }

    #[test]
    fn repeated_identical_links() {
        assert_eq!(
            parse_spans("[a](/x) then [a](/x)").unwrap(),
            vec![
                Span::link("a", "/x"),
                Span::plain(" then "),
                Span::link("a", "/x"),
            ]
        );
    }

    #[test]
    fn spans_become_nodes() {
        let html: String = inline_nodes("a **b** _c_ `d` [e](/f) ![g](/h.png)")
            .unwrap()
            .iter()
            .map(|n| n.to_html().unwrap())
            .collect();
        assert_eq!(
            html,
            r#"a <b>b</b> <i>c</i> <code>d</code> <a href="/f">e</a> <img src="/h.png" alt="g"></img>"#
        );
    }

    #[rstest]
    #[case(SpanKind::Link)]
    #[case(SpanKind::Image)]
    fn missing_url_is_an_error(#[case] kind: SpanKind) {
        let err = span_to_node(Span::new("text", kind)).unwrap_err();
        assert!(matches!(err, Error::MissingUrl { kind: k, .. } if k == kind));
    }
}
