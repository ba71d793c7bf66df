//! End-to-end scenarios: the engine drives a capture wrapping the HTML
//! backend, and the captured element list is checked against the rendering
//! the backend would produce on its own.

use mdtap_capture::{Capture, CapturedElement};
use mdtap_engine::Engine;
use mdtap_renderer::HtmlRenderer;
use pretty_assertions::assert_eq;

fn capture(input: &str) -> Vec<CapturedElement> {
    let capture = Capture::new(HtmlRenderer::new());
    Engine::new().render(input, &capture);
    capture.elements()
}

fn tags(elements: &[CapturedElement]) -> Vec<&'static str> {
    elements.iter().map(|element| element.tag).collect()
}

#[test]
fn test_single_header() {
    let elements = capture("# Header 1");
    assert_eq!(
        elements,
        vec![CapturedElement {
            tag: "h1",
            content: "<h1>Header 1</h1>\n".to_owned(),
        }]
    );
}

#[test]
fn test_header_then_multiline_paragraph() {
    let elements = capture(
        "# Header 1\nSome paragraph of text which spans across\nmultiple lines",
    );
    assert_eq!(
        elements,
        vec![
            CapturedElement {
                tag: "h1",
                content: "<h1>Header 1</h1>\n".to_owned(),
            },
            CapturedElement {
                tag: "paragraph",
                content: "<p>Some paragraph of text which spans across\nmultiple lines</p>\n"
                    .to_owned(),
            },
        ]
    );
}

#[test]
fn test_emphasis_stays_inside_its_paragraph() {
    let elements = capture("A *fine* day");
    assert_eq!(elements.len(), 1);
    assert_eq!(elements[0].tag, "paragraph");
    assert!(elements[0].content.starts_with("<p>"));
    assert!(elements[0].content.ends_with("</p>\n"));
    assert!(elements[0].content.contains("<em>"));
}

#[test]
fn test_empty_input_captures_nothing() {
    assert_eq!(capture(""), vec![]);
}

#[test]
fn test_one_element_per_block_callback_in_document_order() {
    let input = "\
# Title

Intro paragraph.

- one
- two

```rust
fn main() {}
```

> quoted

---
";
    let elements = capture(input);
    assert_eq!(
        tags(&elements),
        vec![
            "h1",
            "paragraph",
            "listitem",
            "listitem",
            "list",
            "code",
            "paragraph",
            "blockquote",
            "hrule",
        ]
    );
}

#[test]
fn test_table_constructs_in_completion_order() {
    let elements = capture("# Data\n\n| A | B |\n|---|---|\n| 1 | 2 |");
    assert_eq!(
        tags(&elements),
        vec!["h1", "th", "th", "tablerow", "td", "td", "tablerow", "table"]
    );
}

#[test]
fn test_footnote_constructs_trail_the_document() {
    let elements = capture("Text[^1].\n\n[^1]: Note.");
    assert_eq!(
        tags(&elements),
        vec!["paragraph", "paragraph", "footnoteitem", "footnotes"]
    );
    assert!(elements[0].content.contains("footnote-ref"));
}

#[test]
fn test_code_block_content_matches_backend_rendering() {
    let elements = capture("```rust\nfn main() {}\n```");
    assert_eq!(
        elements,
        vec![CapturedElement {
            tag: "code",
            content: "<pre><code class=\"language-rust\">fn main() {}\n</code></pre>\n"
                .to_owned(),
        }]
    );
}

#[test]
fn test_decorated_render_leaves_engine_buffer_empty() {
    let capture = Capture::new(HtmlRenderer::new());
    let rendered = Engine::new().render("# Hello\n\nWorld", &capture);
    // The capture swallows everything into its own buffers; the engine's
    // top-level buffer stays empty.
    assert_eq!(rendered, "");
    assert_eq!(capture.len(), 2);
}

#[test]
fn test_accessor_repeats_after_render() {
    let capture = Capture::new(HtmlRenderer::new());
    Engine::new().render("# A\n\nB", &capture);
    assert_eq!(capture.elements(), capture.elements());
}

#[test]
fn test_capture_forwards_like_plain_backend() {
    // A heading rendered through the capture captures exactly what the
    // plain backend writes for the same input.
    let plain = Engine::new().render("## Section", &HtmlRenderer::new());
    let elements = capture("## Section");
    assert_eq!(elements.len(), 1);
    assert_eq!(elements[0].tag, "h2");
    assert_eq!(elements[0].content, plain);
}
