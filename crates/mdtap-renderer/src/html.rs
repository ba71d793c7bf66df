//! HTML rendering backend.

use crate::buffer::OutBuf;
use crate::renderer::{Content, Renderer};
use crate::types::{Alignment, AutolinkKind, ListKind, RenderFlags};
use crate::util::escape_html;

/// HTML render backend.
///
/// Produces semantic HTML, one construct per callback, each block construct
/// terminated with a newline. Behavior is tuned through [`RenderFlags`]:
/// [`RenderFlags::SKIP_HTML`] suppresses raw markup pass-through and
/// [`RenderFlags::USE_XHTML`] switches void elements to self-closing form.
pub struct HtmlRenderer {
    flags: RenderFlags,
}

impl HtmlRenderer {
    #[must_use]
    pub fn new() -> Self {
        Self {
            flags: RenderFlags::empty(),
        }
    }

    #[must_use]
    pub fn with_flags(flags: RenderFlags) -> Self {
        Self { flags }
    }

    fn void_close(&self) -> &'static str {
        if self.flags.contains(RenderFlags::USE_XHTML) {
            " />"
        } else {
            ">"
        }
    }
}

impl Default for HtmlRenderer {
    fn default() -> Self {
        Self::new()
    }
}

fn align_attr(align: Alignment) -> &'static str {
    match align {
        Alignment::None => "",
        Alignment::Left => r#" align="left""#,
        Alignment::Center => r#" align="center""#,
        Alignment::Right => r#" align="right""#,
    }
}

impl Renderer for HtmlRenderer {
    fn block_code(&self, out: &OutBuf, text: &str, lang: &str) {
        if lang.is_empty() {
            writeln!(out, "<pre><code>{}</code></pre>", escape_html(text));
        } else {
            writeln!(
                out,
                "<pre><code class=\"language-{}\">{}</code></pre>",
                escape_html(lang),
                escape_html(text)
            );
        }
    }

    fn block_quote(&self, out: &OutBuf, text: &str) {
        out.push_str("<blockquote>\n");
        out.push_str(text);
        out.push_str("</blockquote>\n");
    }

    fn block_html(&self, out: &OutBuf, text: &str) {
        if self.flags.contains(RenderFlags::SKIP_HTML) {
            return;
        }
        out.push_str(text);
        if !text.ends_with('\n') {
            out.push('\n');
        }
    }

    fn header(&self, out: &OutBuf, content: Content<'_>, level: u8, id: Option<&str>) {
        let marker = out.len();
        match id {
            Some(id) => write!(out, "<h{level} id=\"{}\">", escape_html(id)),
            None => write!(out, "<h{level}>"),
        }
        if !content() {
            out.truncate(marker);
            return;
        }
        writeln!(out, "</h{level}>");
    }

    fn hrule(&self, out: &OutBuf) {
        writeln!(out, "<hr{}", self.void_close());
    }

    fn list(&self, out: &OutBuf, content: Content<'_>, kind: ListKind) {
        let marker = out.len();
        match kind {
            ListKind::Unordered => out.push_str("<ul>\n"),
            ListKind::Ordered { start: 1 } => out.push_str("<ol>\n"),
            ListKind::Ordered { start } => writeln!(out, "<ol start=\"{start}\">"),
        }
        if !content() {
            out.truncate(marker);
            return;
        }
        match kind {
            ListKind::Unordered => out.push_str("</ul>\n"),
            ListKind::Ordered { .. } => out.push_str("</ol>\n"),
        }
    }

    fn list_item(&self, out: &OutBuf, text: &str, _kind: ListKind) {
        writeln!(out, "<li>{text}</li>");
    }

    fn paragraph(&self, out: &OutBuf, content: Content<'_>) {
        let marker = out.len();
        out.push_str("<p>");
        if !content() {
            out.truncate(marker);
            return;
        }
        out.push_str("</p>\n");
    }

    fn table(&self, out: &OutBuf, header: &str, body: &str, _alignments: &[Alignment]) {
        out.push_str("<table>\n<thead>\n");
        out.push_str(header);
        out.push_str("</thead>\n<tbody>\n");
        out.push_str(body);
        out.push_str("</tbody>\n</table>\n");
    }

    fn table_row(&self, out: &OutBuf, text: &str) {
        out.push_str("<tr>\n");
        out.push_str(text);
        out.push_str("</tr>\n");
    }

    fn table_header_cell(&self, out: &OutBuf, text: &str, align: Alignment) {
        writeln!(out, "<th{}>{text}</th>", align_attr(align));
    }

    fn table_cell(&self, out: &OutBuf, text: &str, align: Alignment) {
        writeln!(out, "<td{}>{text}</td>", align_attr(align));
    }

    fn footnotes(&self, out: &OutBuf, content: Content<'_>) {
        let marker = out.len();
        writeln!(out, "<div class=\"footnotes\">");
        writeln!(out, "<hr{}", self.void_close());
        out.push_str("<ol>\n");
        if !content() {
            out.truncate(marker);
            return;
        }
        out.push_str("</ol>\n</div>\n");
    }

    fn footnote_item(&self, out: &OutBuf, name: &str, text: &str) {
        writeln!(out, "<li id=\"fn:{}\">{text}</li>", escape_html(name));
    }

    fn title_block(&self, out: &OutBuf, text: &str) {
        writeln!(out, "<h1 class=\"title\">{}</h1>", escape_html(text));
    }

    fn emphasis(&self, out: &OutBuf, text: &str) {
        write!(out, "<em>{text}</em>");
    }

    fn double_emphasis(&self, out: &OutBuf, text: &str) {
        write!(out, "<strong>{text}</strong>");
    }

    fn triple_emphasis(&self, out: &OutBuf, text: &str) {
        write!(out, "<strong><em>{text}</em></strong>");
    }

    fn strikethrough(&self, out: &OutBuf, text: &str) {
        write!(out, "<del>{text}</del>");
    }

    fn code_span(&self, out: &OutBuf, text: &str) {
        write!(out, "<code>{}</code>", escape_html(text));
    }

    fn autolink(&self, out: &OutBuf, link: &str, kind: AutolinkKind) {
        let display = escape_html(link);
        match kind {
            AutolinkKind::Email if !link.starts_with("mailto:") => {
                write!(out, "<a href=\"mailto:{display}\">{display}</a>");
            }
            _ => write!(out, "<a href=\"{display}\">{display}</a>"),
        }
    }

    fn link(&self, out: &OutBuf, dest: &str, title: &str, content: &str) {
        write!(out, "<a href=\"{}\"", escape_html(dest));
        if !title.is_empty() {
            write!(out, " title=\"{}\"", escape_html(title));
        }
        write!(out, ">{content}</a>");
    }

    fn image(&self, out: &OutBuf, dest: &str, title: &str, alt: &str) {
        write!(
            out,
            "<img src=\"{}\" alt=\"{}\"",
            escape_html(dest),
            escape_html(alt)
        );
        if !title.is_empty() {
            write!(out, " title=\"{}\"", escape_html(title));
        }
        out.push_str(self.void_close());
    }

    fn line_break(&self, out: &OutBuf) {
        writeln!(out, "<br{}", self.void_close());
    }

    fn raw_html_tag(&self, out: &OutBuf, html: &str) {
        if self.flags.contains(RenderFlags::SKIP_HTML) {
            return;
        }
        out.push_str(html);
    }

    fn footnote_ref(&self, out: &OutBuf, name: &str, number: usize) {
        let name = escape_html(name);
        write!(
            out,
            "<sup class=\"footnote-ref\" id=\"fnref:{name}\"><a href=\"#fn:{name}\">{number}</a></sup>"
        );
    }

    fn normal_text(&self, out: &OutBuf, text: &str) {
        out.push_str(&escape_html(text));
    }

    fn entity(&self, out: &OutBuf, entity: &str) {
        out.push_str(entity);
    }

    fn document_header(&self, _out: &OutBuf) {}

    fn document_footer(&self, _out: &OutBuf) {}

    fn flags(&self) -> RenderFlags {
        self.flags
    }
}
