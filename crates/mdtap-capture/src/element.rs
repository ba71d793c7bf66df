//! Captured element data model.

use mdtap_renderer::OutBuf;

/// One captured top-level construct: its semantic tag and the markup the
/// wrapped backend produced for it.
///
/// Tags are fixed literals: `"h1"`..`"h6"`, `"paragraph"`, `"code"`,
/// `"blockquote"`, `"list"`, `"listitem"`, `"table"`, `"tablerow"`, `"th"`,
/// `"td"`, `"hrule"`, `"html"`, `"footnotes"`, `"footnoteitem"`, `"title"`.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct CapturedElement {
    /// Construct tag, assigned once at capture time.
    pub tag: &'static str,
    /// Rendered markup, verbatim as the backend wrote it.
    pub content: String,
}

/// Still-accumulating element: the tag plus the live buffer the backend
/// renders into while this block is open.
pub(crate) struct Element {
    pub(crate) tag: &'static str,
    pub(crate) content: OutBuf,
}

/// Tag literal for a heading of the given level.
pub(crate) fn heading_tag(level: u8) -> &'static str {
    match level {
        1 => "h1",
        2 => "h2",
        3 => "h3",
        4 => "h4",
        5 => "h5",
        _ => "h6",
    }
}
