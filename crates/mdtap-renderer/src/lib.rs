//! Render-callback capability surface for markdown rendering.
//!
//! A parsing engine drives rendering through one callback per document
//! construct against the [`Renderer`] trait. Anything that satisfies the
//! trait can stand in for a plain backend: a concrete renderer such as
//! [`HtmlRenderer`], or a decorator wrapping one (see the `mdtap-capture`
//! crate).
//!
//! Output goes through [`OutBuf`], a cheaply clonable shared text buffer.
//! Container constructs hand the renderer a content-producer closure which
//! re-enters the engine, so several callback frames append to the same
//! buffer on one call stack; the shared handle makes that shape expressible
//! without holding any borrow across the recursion.
//!
//! # Example
//!
//! ```
//! use mdtap_renderer::{HtmlRenderer, OutBuf, Renderer};
//!
//! let html = HtmlRenderer::new();
//! let out = OutBuf::new();
//! html.block_code(&out, "fn main() {}", "rust");
//! assert_eq!(
//!     out.contents(),
//!     "<pre><code class=\"language-rust\">fn main() {}</code></pre>\n"
//! );
//! ```

mod buffer;
mod html;
mod renderer;
mod types;
mod util;

pub use buffer::OutBuf;
pub use html::HtmlRenderer;
pub use renderer::{Content, Renderer};
pub use types::{Alignment, AutolinkKind, ListKind, RenderFlags};
pub use util::escape_html;
