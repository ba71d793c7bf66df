//! Event traversal driving the callback protocol.

use std::collections::HashMap;

use mdtap_renderer::{Alignment, AutolinkKind, ListKind, OutBuf, Renderer};
use pulldown_cmark::{
    Alignment as CmarkAlignment, CodeBlockKind, Event, HeadingLevel, LinkType, Options, Parser,
    Tag,
};
use tracing::{debug, trace};

/// Markdown parsing engine.
///
/// Parses source text with `pulldown-cmark` and drives a [`Renderer`]
/// through the callback protocol: block-level calls in document order, with
/// container blocks re-entering the engine through their content-producer
/// so span-level calls fire between a block's open and close.
pub struct Engine {
    options: Options,
}

impl Engine {
    /// Engine with tables, strikethrough, and footnotes enabled.
    #[must_use]
    pub fn new() -> Self {
        Self {
            options: Options::ENABLE_TABLES
                | Options::ENABLE_STRIKETHROUGH
                | Options::ENABLE_FOOTNOTES,
        }
    }

    /// Engine with an explicit parser option set.
    #[must_use]
    pub fn with_options(options: Options) -> Self {
        Self { options }
    }

    /// Parser options this engine was built with.
    #[must_use]
    pub fn options(&self) -> Options {
        self.options
    }

    /// Render `input`, driving `renderer` through the callback protocol,
    /// and return whatever the renderer wrote to the top-level buffer.
    pub fn render(&self, input: &str, renderer: &dyn Renderer) -> String {
        debug!(bytes = input.len(), "rendering markdown document");
        let events: Vec<Event<'_>> = Parser::new_ext(input, self.options).collect();
        let out = OutBuf::new();
        let mut walk = Walk {
            renderer,
            footnotes: Vec::new(),
            numbers: HashMap::new(),
        };
        renderer.document_header(&out);
        walk.blocks(&events, &out);
        walk.flush_footnotes(&out);
        renderer.document_footer(&out);
        out.contents()
    }
}

impl Default for Engine {
    fn default() -> Self {
        Self::new()
    }
}

/// One traversal over a parsed event stream.
struct Walk<'r, 'a> {
    renderer: &'r dyn Renderer,
    /// Footnote definitions encountered during the walk, emitted as one
    /// trailing footnote block.
    footnotes: Vec<(String, Vec<Event<'a>>)>,
    /// Footnote reference numbers in first-use order.
    numbers: HashMap<String, usize>,
}

impl<'a> Walk<'_, 'a> {
    fn blocks(&mut self, events: &[Event<'a>], out: &OutBuf) {
        let mut i = 0;
        while i < events.len() {
            match &events[i] {
                Event::Start(tag) => {
                    let end = matching_end(events, i);
                    self.block(tag, &events[i + 1..end], out);
                    i = end + 1;
                }
                event => {
                    self.inline_event(event, out);
                    i += 1;
                }
            }
        }
    }

    fn block(&mut self, tag: &Tag<'a>, inner: &[Event<'a>], out: &OutBuf) {
        trace!(?tag, "block construct");
        match tag {
            Tag::Paragraph => {
                let renderer = self.renderer;
                let target = out.clone();
                renderer.paragraph(out, &mut || {
                    self.inline(inner, &target);
                    true
                });
            }
            Tag::Heading { level, id, .. } => {
                let renderer = self.renderer;
                let target = out.clone();
                renderer.header(
                    out,
                    &mut || {
                        self.inline(inner, &target);
                        true
                    },
                    heading_level_num(*level),
                    id.as_deref(),
                );
            }
            Tag::BlockQuote(_) => {
                let work = OutBuf::new();
                self.blocks(inner, &work);
                self.renderer.block_quote(out, &work.contents());
            }
            Tag::CodeBlock(kind) => {
                let lang = match kind {
                    CodeBlockKind::Fenced(info) => fence_lang(info),
                    CodeBlockKind::Indented => "",
                };
                self.renderer.block_code(out, &collect_text(inner), lang);
            }
            Tag::HtmlBlock => {
                self.renderer.block_html(out, &collect_raw(inner));
            }
            Tag::List(start) => {
                let kind = match start {
                    Some(start) => ListKind::Ordered { start: *start },
                    None => ListKind::Unordered,
                };
                let renderer = self.renderer;
                let target = out.clone();
                renderer.list(
                    out,
                    &mut || {
                        self.list_items(inner, &target, kind);
                        true
                    },
                    kind,
                );
            }
            Tag::Table(alignments) => self.table(inner, alignments, out),
            Tag::FootnoteDefinition(name) => {
                self.footnotes.push((name.to_string(), inner.to_vec()));
            }
            Tag::MetadataBlock(_) => {
                self.renderer.title_block(out, collect_text(inner).trim());
            }
            // Span-level container reaching the block dispatcher (e.g. a
            // list item whose content is bare inline text).
            _ => self.span(tag, inner, out),
        }
    }

    fn list_items(&mut self, events: &[Event<'a>], out: &OutBuf, kind: ListKind) {
        let mut i = 0;
        while i < events.len() {
            if let Event::Start(Tag::Item) = &events[i] {
                let end = matching_end(events, i);
                let inner = &events[i + 1..end];
                let work = OutBuf::new();
                if contains_block(inner) {
                    self.blocks(inner, &work);
                } else {
                    self.inline(inner, &work);
                }
                self.renderer.list_item(out, &work.contents(), kind);
                i = end + 1;
            } else {
                i += 1;
            }
        }
    }

    fn table(&mut self, inner: &[Event<'a>], alignments: &[CmarkAlignment], out: &OutBuf) {
        let alignments: Vec<Alignment> = alignments.iter().copied().map(convert_alignment).collect();
        let head = OutBuf::new();
        let body = OutBuf::new();
        let mut i = 0;
        while i < inner.len() {
            match &inner[i] {
                Event::Start(Tag::TableHead) => {
                    let end = matching_end(inner, i);
                    self.table_row(&inner[i + 1..end], &head, &alignments, true);
                    i = end + 1;
                }
                Event::Start(Tag::TableRow) => {
                    let end = matching_end(inner, i);
                    self.table_row(&inner[i + 1..end], &body, &alignments, false);
                    i = end + 1;
                }
                _ => i += 1,
            }
        }
        self.renderer
            .table(out, &head.contents(), &body.contents(), &alignments);
    }

    fn table_row(
        &mut self,
        cells: &[Event<'a>],
        out: &OutBuf,
        alignments: &[Alignment],
        header: bool,
    ) {
        let row = OutBuf::new();
        let mut column = 0;
        let mut i = 0;
        while i < cells.len() {
            if let Event::Start(Tag::TableCell) = &cells[i] {
                let end = matching_end(cells, i);
                let text = self.rendered_inline(&cells[i + 1..end]);
                let align = alignments.get(column).copied().unwrap_or_default();
                if header {
                    self.renderer.table_header_cell(&row, &text, align);
                } else {
                    self.renderer.table_cell(&row, &text, align);
                }
                column += 1;
                i = end + 1;
            } else {
                i += 1;
            }
        }
        self.renderer.table_row(out, &row.contents());
    }

    fn flush_footnotes(&mut self, out: &OutBuf) {
        if self.footnotes.is_empty() {
            return;
        }
        debug!(count = self.footnotes.len(), "emitting footnote block");
        let renderer = self.renderer;
        let target = out.clone();
        let definitions = std::mem::take(&mut self.footnotes);
        renderer.footnotes(out, &mut || {
            for (name, events) in &definitions {
                let work = OutBuf::new();
                if contains_block(events) {
                    self.blocks(events, &work);
                } else {
                    self.inline(events, &work);
                }
                self.renderer.footnote_item(&target, name, &work.contents());
            }
            true
        });
    }

    fn inline(&mut self, events: &[Event<'a>], out: &OutBuf) {
        let mut i = 0;
        while i < events.len() {
            match &events[i] {
                Event::Start(tag) => {
                    let end = matching_end(events, i);
                    self.span(tag, &events[i + 1..end], out);
                    i = end + 1;
                }
                event => {
                    self.inline_event(event, out);
                    i += 1;
                }
            }
        }
    }

    fn span(&mut self, tag: &Tag<'a>, inner: &[Event<'a>], out: &OutBuf) {
        match tag {
            Tag::Emphasis => {
                let text = self.rendered_inline(inner);
                self.renderer.emphasis(out, &text);
            }
            Tag::Strong => {
                let text = self.rendered_inline(inner);
                self.renderer.double_emphasis(out, &text);
            }
            Tag::Strikethrough => {
                let text = self.rendered_inline(inner);
                self.renderer.strikethrough(out, &text);
            }
            Tag::Link {
                link_type,
                dest_url,
                title,
                ..
            } => match link_type {
                LinkType::Autolink => self.renderer.autolink(out, dest_url, AutolinkKind::Uri),
                LinkType::Email => self.renderer.autolink(out, dest_url, AutolinkKind::Email),
                _ => {
                    let content = self.rendered_inline(inner);
                    self.renderer.link(out, dest_url, title, &content);
                }
            },
            Tag::Image {
                dest_url, title, ..
            } => {
                self.renderer.image(out, dest_url, title, &collect_text(inner));
            }
            // Constructs without a callback of their own are transparent.
            _ => self.inline(inner, out),
        }
    }

    fn inline_event(&mut self, event: &Event<'a>, out: &OutBuf) {
        match event {
            Event::Text(text) => self.renderer.normal_text(out, text),
            Event::Code(code) => self.renderer.code_span(out, code),
            Event::SoftBreak => self.renderer.normal_text(out, "\n"),
            Event::HardBreak => self.renderer.line_break(out),
            Event::Html(html) | Event::InlineHtml(html) => self.renderer.raw_html_tag(out, html),
            Event::FootnoteReference(name) => {
                let number = self.footnote_number(name);
                self.renderer.footnote_ref(out, name, number);
            }
            Event::Rule => self.renderer.hrule(out),
            Event::TaskListMarker(_)
            | Event::InlineMath(_)
            | Event::DisplayMath(_)
            | Event::Start(_)
            | Event::End(_) => {}
        }
    }

    /// Render inline events into a scratch buffer and return the text.
    fn rendered_inline(&mut self, events: &[Event<'a>]) -> String {
        let work = OutBuf::new();
        self.inline(events, &work);
        work.contents()
    }

    fn footnote_number(&mut self, name: &str) -> usize {
        let next = self.numbers.len() + 1;
        *self.numbers.entry(name.to_owned()).or_insert(next)
    }
}

/// Index of the `End` event closing the `Start` at `start`.
fn matching_end(events: &[Event<'_>], start: usize) -> usize {
    let mut depth = 0usize;
    for (i, event) in events.iter().enumerate().skip(start) {
        match event {
            Event::Start(_) => depth += 1,
            Event::End(_) => {
                depth -= 1;
                if depth == 0 {
                    return i;
                }
            }
            _ => {}
        }
    }
    events.len()
}

fn contains_block(events: &[Event<'_>]) -> bool {
    events.iter().any(|event| {
        matches!(
            event,
            Event::Start(
                Tag::Paragraph
                    | Tag::Heading { .. }
                    | Tag::BlockQuote(_)
                    | Tag::CodeBlock(_)
                    | Tag::HtmlBlock
                    | Tag::List(_)
                    | Tag::Table(_)
            )
        )
    })
}

/// First word of a fence info string (`rust,no_run` attributes are dropped).
fn fence_lang(info: &str) -> &str {
    info.split([' ', '\t', ',']).next().unwrap_or("")
}

fn collect_text(events: &[Event<'_>]) -> String {
    let mut text = String::new();
    for event in events {
        match event {
            Event::Text(t) | Event::Code(t) => text.push_str(t),
            Event::SoftBreak | Event::HardBreak => text.push('\n'),
            _ => {}
        }
    }
    text
}

fn collect_raw(events: &[Event<'_>]) -> String {
    let mut raw = String::new();
    for event in events {
        match event {
            Event::Html(html) | Event::InlineHtml(html) | Event::Text(html) => {
                raw.push_str(html);
            }
            _ => {}
        }
    }
    raw
}

fn heading_level_num(level: HeadingLevel) -> u8 {
    match level {
        HeadingLevel::H1 => 1,
        HeadingLevel::H2 => 2,
        HeadingLevel::H3 => 3,
        HeadingLevel::H4 => 4,
        HeadingLevel::H5 => 5,
        HeadingLevel::H6 => 6,
    }
}

fn convert_alignment(alignment: CmarkAlignment) -> Alignment {
    match alignment {
        CmarkAlignment::None => Alignment::None,
        CmarkAlignment::Left => Alignment::Left,
        CmarkAlignment::Center => Alignment::Center,
        CmarkAlignment::Right => Alignment::Right,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use mdtap_renderer::HtmlRenderer;
    use pretty_assertions::assert_eq;

    fn render(input: &str) -> String {
        Engine::new().render(input, &HtmlRenderer::new())
    }

    #[test]
    fn test_empty_input() {
        assert_eq!(render(""), "");
    }

    #[test]
    fn test_heading() {
        assert_eq!(render("# Header 1"), "<h1>Header 1</h1>\n");
    }

    #[test]
    fn test_heading_levels() {
        assert_eq!(render("### Three"), "<h3>Three</h3>\n");
        assert_eq!(render("###### Six"), "<h6>Six</h6>\n");
    }

    #[test]
    fn test_paragraph_preserves_soft_break() {
        assert_eq!(
            render("Some paragraph of text which spans across\nmultiple lines"),
            "<p>Some paragraph of text which spans across\nmultiple lines</p>\n"
        );
    }

    #[test]
    fn test_heading_then_paragraph() {
        assert_eq!(
            render("# Header 1\nSome text"),
            "<h1>Header 1</h1>\n<p>Some text</p>\n"
        );
    }

    #[test]
    fn test_emphasis_inline() {
        assert_eq!(
            render("*italic* and **bold**"),
            "<p><em>italic</em> and <strong>bold</strong></p>\n"
        );
    }

    #[test]
    fn test_strikethrough() {
        assert_eq!(render("~~gone~~"), "<p><del>gone</del></p>\n");
    }

    #[test]
    fn test_code_span() {
        assert_eq!(render("run `make`"), "<p>run <code>make</code></p>\n");
    }

    #[test]
    fn test_fenced_code_block() {
        assert_eq!(
            render("```rust\nfn main() {}\n```"),
            "<pre><code class=\"language-rust\">fn main() {}\n</code></pre>\n"
        );
    }

    #[test]
    fn test_fence_attributes_dropped() {
        assert_eq!(
            render("```rust,no_run\nlet x = 1;\n```"),
            "<pre><code class=\"language-rust\">let x = 1;\n</code></pre>\n"
        );
    }

    #[test]
    fn test_indented_code_block() {
        assert_eq!(
            render("    x = 1\n"),
            "<pre><code>x = 1\n</code></pre>\n"
        );
    }

    #[test]
    fn test_blockquote_wraps_inner_blocks() {
        assert_eq!(
            render("> Note"),
            "<blockquote>\n<p>Note</p>\n</blockquote>\n"
        );
    }

    #[test]
    fn test_unordered_list() {
        assert_eq!(
            render("- one\n- two"),
            "<ul>\n<li>one</li>\n<li>two</li>\n</ul>\n"
        );
    }

    #[test]
    fn test_ordered_list_with_start() {
        assert_eq!(
            render("3. three\n4. four"),
            "<ol start=\"3\">\n<li>three</li>\n<li>four</li>\n</ol>\n"
        );
    }

    #[test]
    fn test_loose_list_items_wrap_paragraphs() {
        assert_eq!(
            render("- one\n\n- two"),
            "<ul>\n<li><p>one</p>\n</li>\n<li><p>two</p>\n</li>\n</ul>\n"
        );
    }

    #[test]
    fn test_nested_list() {
        assert_eq!(
            render("- a\n  - b"),
            "<ul>\n<li>a<ul>\n<li>b</li>\n</ul>\n</li>\n</ul>\n"
        );
    }

    #[test]
    fn test_rule() {
        assert_eq!(render("---"), "<hr>\n");
    }

    #[test]
    fn test_hard_break() {
        assert_eq!(render("a  \nb"), "<p>a<br>\nb</p>\n");
    }

    #[test]
    fn test_table() {
        assert_eq!(
            render("| A | B |\n|---|---|\n| 1 | 2 |"),
            "<table>\n<thead>\n<tr>\n<th>A</th>\n<th>B</th>\n</tr>\n</thead>\n<tbody>\n<tr>\n<td>1</td>\n<td>2</td>\n</tr>\n</tbody>\n</table>\n"
        );
    }

    #[test]
    fn test_table_alignment() {
        let html = render("| A |\n|:-:|\n| 1 |");
        assert!(html.contains("<th align=\"center\">A</th>"));
        assert!(html.contains("<td align=\"center\">1</td>"));
    }

    #[test]
    fn test_link() {
        assert_eq!(
            render("[text](https://example.com)"),
            "<p><a href=\"https://example.com\">text</a></p>\n"
        );
    }

    #[test]
    fn test_link_with_title() {
        assert_eq!(
            render("[t](/u \"T\")"),
            "<p><a href=\"/u\" title=\"T\">t</a></p>\n"
        );
    }

    #[test]
    fn test_autolink() {
        assert_eq!(
            render("<https://example.com>"),
            "<p><a href=\"https://example.com\">https://example.com</a></p>\n"
        );
    }

    #[test]
    fn test_email_autolink() {
        assert_eq!(
            render("<user@example.com>"),
            "<p><a href=\"mailto:user@example.com\">user@example.com</a></p>\n"
        );
    }

    #[test]
    fn test_image() {
        assert_eq!(
            render("![Alt](image.png)"),
            "<p><img src=\"image.png\" alt=\"Alt\"></p>\n"
        );
    }

    #[test]
    fn test_inline_html_passthrough() {
        assert_eq!(
            render("a <span>b</span>"),
            "<p>a <span>b</span></p>\n"
        );
    }

    #[test]
    fn test_text_is_escaped() {
        assert_eq!(render("2 < 3 & true"), "<p>2 &lt; 3 &amp; true</p>\n");
    }

    #[test]
    fn test_html_block_passthrough() {
        assert_eq!(render("<div>\nraw\n</div>"), "<div>\nraw\n</div>\n");
    }

    #[test]
    fn test_metadata_title_block() {
        let engine = Engine::with_options(Options::ENABLE_YAML_STYLE_METADATA_BLOCKS);
        let html = engine.render("---\ntitle: X\n---\n\nBody", &HtmlRenderer::new());
        assert_eq!(html, "<h1 class=\"title\">title: X</h1>\n<p>Body</p>\n");
    }

    #[test]
    fn test_footnotes_collected_into_trailing_block() {
        assert_eq!(
            render("Text[^1].\n\n[^1]: Note."),
            "<p>Text<sup class=\"footnote-ref\" id=\"fnref:1\"><a href=\"#fn:1\">1</a></sup>.</p>\n\
             <div class=\"footnotes\">\n<hr>\n<ol>\n<li id=\"fn:1\"><p>Note.</p>\n</li>\n</ol>\n</div>\n"
        );
    }

    #[test]
    fn test_footnote_numbers_follow_first_use() {
        let html = render("A[^b] and B[^a].\n\n[^a]: first\n[^b]: second");
        assert!(html.contains("<a href=\"#fn:b\">1</a>"));
        assert!(html.contains("<a href=\"#fn:a\">2</a>"));
    }

    #[test]
    fn test_tables_disabled_without_option() {
        let engine = Engine::with_options(Options::empty());
        let html = engine.render("| A |\n|---|\n| 1 |", &HtmlRenderer::new());
        assert!(!html.contains("<table>"));
    }

    #[test]
    fn test_default_matches_new() {
        assert_eq!(Engine::default().options(), Engine::new().options());
    }
}
