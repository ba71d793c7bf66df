//! The capturing decorator.

use std::cell::RefCell;

use mdtap_renderer::{
    Alignment, AutolinkKind, Content, ListKind, OutBuf, RenderFlags, Renderer,
};

use crate::element::{CapturedElement, Element, heading_tag};

/// Decorator that records one element per block-level callback while
/// forwarding every call to the wrapped backend.
///
/// Block-level callbacks open a fresh buffer, remember it as the active
/// target, and delegate to the backend with that buffer in place of the
/// caller-supplied one; once the backend returns, the buffer is committed
/// as a [`CapturedElement`]. Span-level and low-level callbacks ignore the
/// caller-supplied buffer entirely and delegate against the active target,
/// so inline content produced while a block's content-producer re-enters
/// the engine lands in that block's buffer even though the engine passes no
/// tree context of its own.
///
/// A `Capture` is single-use: it accumulates elements for one traversal and
/// is not reset between documents. It is deliberately `!Send`/`!Sync`; the
/// traversal is one synchronous call stack.
///
/// # Panics
///
/// A span-level or low-level callback arriving before any block-level
/// callback has opened a target is a protocol violation on the engine's
/// side and panics immediately.
pub struct Capture<R> {
    backend: R,
    elements: RefCell<Vec<Element>>,
    /// Buffer of the innermost open block; `None` until the first
    /// block-level callback of the traversal.
    target: RefCell<Option<OutBuf>>,
}

impl<R> Capture<R> {
    /// Wrap a backend; the capture starts empty with no active target.
    pub fn new(backend: R) -> Self {
        Self {
            backend,
            elements: RefCell::new(Vec::new()),
            target: RefCell::new(None),
        }
    }

    /// Materialize the captured elements in document order.
    ///
    /// Buffers are converted to text at this point, so the call is
    /// idempotent and safe mid-traversal (it then reflects progress so
    /// far).
    #[must_use]
    pub fn elements(&self) -> Vec<CapturedElement> {
        self.elements
            .borrow()
            .iter()
            .map(|element| CapturedElement {
                tag: element.tag,
                content: element.content.contents(),
            })
            .collect()
    }

    /// Number of elements captured so far.
    #[must_use]
    pub fn len(&self) -> usize {
        self.elements.borrow().len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.elements.borrow().is_empty()
    }

    /// The wrapped backend.
    pub fn backend(&self) -> &R {
        &self.backend
    }

    /// Unwrap, discarding the capture state.
    pub fn into_inner(self) -> R {
        self.backend
    }

    /// Open a fresh buffer and make it the active target.
    fn open(&self) -> OutBuf {
        let buf = OutBuf::new();
        *self.target.borrow_mut() = Some(buf.clone());
        buf
    }

    /// Append a finished element to the document.
    fn commit(&self, tag: &'static str, content: OutBuf) {
        self.elements.borrow_mut().push(Element { tag, content });
    }

    /// The active target buffer.
    fn target(&self) -> OutBuf {
        self.target
            .borrow()
            .clone()
            .expect("span-level callback before any block-level callback opened a target")
    }
}

impl<R: Renderer> Renderer for Capture<R> {
    fn block_code(&self, _out: &OutBuf, text: &str, lang: &str) {
        let buf = self.open();
        self.backend.block_code(&buf, text, lang);
        self.commit("code", buf);
    }

    fn block_quote(&self, _out: &OutBuf, text: &str) {
        let buf = self.open();
        self.backend.block_quote(&buf, text);
        self.commit("blockquote", buf);
    }

    fn block_html(&self, _out: &OutBuf, text: &str) {
        let buf = self.open();
        self.backend.block_html(&buf, text);
        self.commit("html", buf.clone());
        // The html block stays the routing target for raw inline calls that
        // may trail it.
        *self.target.borrow_mut() = Some(buf);
    }

    fn header(&self, _out: &OutBuf, content: Content<'_>, level: u8, id: Option<&str>) {
        let buf = self.open();
        self.backend.header(&buf, content, level, id);
        self.commit(heading_tag(level), buf);
    }

    fn hrule(&self, _out: &OutBuf) {
        let buf = self.open();
        self.backend.hrule(&buf);
        self.commit("hrule", buf);
    }

    fn list(&self, _out: &OutBuf, content: Content<'_>, kind: ListKind) {
        let buf = self.open();
        self.backend.list(&buf, content, kind);
        self.commit("list", buf);
    }

    fn list_item(&self, _out: &OutBuf, text: &str, kind: ListKind) {
        let buf = self.open();
        self.backend.list_item(&buf, text, kind);
        self.commit("listitem", buf);
    }

    fn paragraph(&self, _out: &OutBuf, content: Content<'_>) {
        let buf = self.open();
        self.backend.paragraph(&buf, content);
        self.commit("paragraph", buf);
    }

    fn table(&self, _out: &OutBuf, header: &str, body: &str, alignments: &[Alignment]) {
        let buf = self.open();
        self.backend.table(&buf, header, body, alignments);
        self.commit("table", buf);
    }

    fn table_row(&self, _out: &OutBuf, text: &str) {
        let buf = self.open();
        self.backend.table_row(&buf, text);
        self.commit("tablerow", buf);
    }

    fn table_header_cell(&self, _out: &OutBuf, text: &str, align: Alignment) {
        let buf = self.open();
        self.backend.table_header_cell(&buf, text, align);
        self.commit("th", buf);
    }

    fn table_cell(&self, _out: &OutBuf, text: &str, align: Alignment) {
        let buf = self.open();
        self.backend.table_cell(&buf, text, align);
        self.commit("td", buf);
    }

    fn footnotes(&self, _out: &OutBuf, content: Content<'_>) {
        let buf = self.open();
        self.backend.footnotes(&buf, content);
        self.commit("footnotes", buf);
    }

    fn footnote_item(&self, _out: &OutBuf, name: &str, text: &str) {
        let buf = self.open();
        self.backend.footnote_item(&buf, name, text);
        self.commit("footnoteitem", buf);
    }

    fn title_block(&self, _out: &OutBuf, text: &str) {
        let buf = self.open();
        self.backend.title_block(&buf, text);
        self.commit("title", buf);
    }

    fn emphasis(&self, _out: &OutBuf, text: &str) {
        self.backend.emphasis(&self.target(), text);
    }

    fn double_emphasis(&self, _out: &OutBuf, text: &str) {
        self.backend.double_emphasis(&self.target(), text);
    }

    fn triple_emphasis(&self, _out: &OutBuf, text: &str) {
        self.backend.triple_emphasis(&self.target(), text);
    }

    fn strikethrough(&self, _out: &OutBuf, text: &str) {
        self.backend.strikethrough(&self.target(), text);
    }

    fn code_span(&self, _out: &OutBuf, text: &str) {
        self.backend.code_span(&self.target(), text);
    }

    fn autolink(&self, _out: &OutBuf, link: &str, kind: AutolinkKind) {
        self.backend.autolink(&self.target(), link, kind);
    }

    fn link(&self, _out: &OutBuf, dest: &str, title: &str, content: &str) {
        self.backend.link(&self.target(), dest, title, content);
    }

    fn image(&self, _out: &OutBuf, dest: &str, title: &str, alt: &str) {
        self.backend.image(&self.target(), dest, title, alt);
    }

    fn line_break(&self, _out: &OutBuf) {
        self.backend.line_break(&self.target());
    }

    fn raw_html_tag(&self, _out: &OutBuf, html: &str) {
        self.backend.raw_html_tag(&self.target(), html);
    }

    fn footnote_ref(&self, _out: &OutBuf, name: &str, number: usize) {
        self.backend.footnote_ref(&self.target(), name, number);
    }

    fn normal_text(&self, _out: &OutBuf, text: &str) {
        self.backend.normal_text(&self.target(), text);
    }

    fn entity(&self, _out: &OutBuf, entity: &str) {
        self.backend.entity(&self.target(), entity);
    }

    // Document boundaries carry no construct tag; nothing is captured.

    fn document_header(&self, _out: &OutBuf) {}

    fn document_footer(&self, _out: &OutBuf) {}

    fn flags(&self) -> RenderFlags {
        RenderFlags::empty()
    }
}
