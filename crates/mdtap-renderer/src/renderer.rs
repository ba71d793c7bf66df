//! The render-callback capability surface.

use crate::buffer::OutBuf;
use crate::types::{Alignment, AutolinkKind, ListKind, RenderFlags};

/// Content-producer a container block hands back to its renderer.
///
/// Invoking it makes the engine recurse into the construct's children,
/// firing further callbacks on the outermost renderer before the block-level
/// call returns. Returns `true` on completion; on `false` the renderer rolls
/// the construct back by truncating its buffer to a marker taken before the
/// prefix was written.
pub type Content<'a> = &'a mut dyn FnMut() -> bool;

/// One callback per document construct, invoked by the parsing engine in
/// traversal order.
///
/// The engine walks the document once, depth first. Block-level operations
/// fire once per block; container blocks (heading, paragraph, list,
/// footnote block) receive a [`Content`] producer that re-enters the engine,
/// while leaf blocks receive their content pre-rendered as text. Span-level
/// and low-level operations fire between a container's open and close and
/// carry no tree context of their own.
///
/// Escaping convention: [`normal_text`](Self::normal_text) and
/// [`code_span`](Self::code_span) are the operations that escape their
/// input. Span-level operations taking a `text`/`content` argument receive
/// already-rendered markup and must write it verbatim;
/// [`entity`](Self::entity) receives a pre-encoded entity.
///
/// All methods take `&self`: the traversal is one call stack, and a
/// renderer that keeps state does so behind interior mutability so that
/// re-entrant dispatch through a content-producer stays expressible.
pub trait Renderer {
    // Block-level callbacks.

    fn block_code(&self, out: &OutBuf, text: &str, lang: &str);

    /// Block quote with its inner blocks already rendered into `text`.
    fn block_quote(&self, out: &OutBuf, text: &str);

    /// Raw block-level markup, passed through from the source document.
    fn block_html(&self, out: &OutBuf, text: &str);

    /// Heading at `level` (1-6), with an optional explicit fragment id.
    fn header(&self, out: &OutBuf, content: Content<'_>, level: u8, id: Option<&str>);

    fn hrule(&self, out: &OutBuf);

    fn list(&self, out: &OutBuf, content: Content<'_>, kind: ListKind);

    fn list_item(&self, out: &OutBuf, text: &str, kind: ListKind);

    fn paragraph(&self, out: &OutBuf, content: Content<'_>);

    /// Table with pre-rendered `header` and `body` row groups.
    fn table(&self, out: &OutBuf, header: &str, body: &str, alignments: &[Alignment]);

    fn table_row(&self, out: &OutBuf, text: &str);

    fn table_header_cell(&self, out: &OutBuf, text: &str, align: Alignment);

    fn table_cell(&self, out: &OutBuf, text: &str, align: Alignment);

    /// Footnote block collecting every footnote definition in the document.
    fn footnotes(&self, out: &OutBuf, content: Content<'_>);

    fn footnote_item(&self, out: &OutBuf, name: &str, text: &str);

    /// Document title block (metadata prologue), raw text.
    fn title_block(&self, out: &OutBuf, text: &str);

    // Span-level callbacks.

    fn emphasis(&self, out: &OutBuf, text: &str);

    fn double_emphasis(&self, out: &OutBuf, text: &str);

    fn triple_emphasis(&self, out: &OutBuf, text: &str);

    fn strikethrough(&self, out: &OutBuf, text: &str);

    fn code_span(&self, out: &OutBuf, text: &str);

    fn autolink(&self, out: &OutBuf, link: &str, kind: AutolinkKind);

    fn link(&self, out: &OutBuf, dest: &str, title: &str, content: &str);

    fn image(&self, out: &OutBuf, dest: &str, title: &str, alt: &str);

    fn line_break(&self, out: &OutBuf);

    /// Raw inline markup, passed through from the source document.
    fn raw_html_tag(&self, out: &OutBuf, html: &str);

    /// Reference mark pointing at footnote `name`, numbered in first-use
    /// order.
    fn footnote_ref(&self, out: &OutBuf, name: &str, number: usize);

    // Low-level callbacks.

    /// Literal document text; the escaping point for the output format.
    fn normal_text(&self, out: &OutBuf, text: &str);

    /// Pre-encoded character entity, written verbatim.
    fn entity(&self, out: &OutBuf, entity: &str);

    // Document boundaries.

    fn document_header(&self, out: &OutBuf);

    fn document_footer(&self, out: &OutBuf);

    /// Capability bitmask this renderer reports to its caller.
    fn flags(&self) -> RenderFlags;
}
