//! Markdown parsing engine for the render-callback surface.
//!
//! [`Engine`] parses markdown with `pulldown-cmark` and replays the event
//! stream as the fixed callback protocol of
//! [`Renderer`](mdtap_renderer::Renderer): one block-level call per block
//! construct (container blocks receive a content-producer that re-enters
//! the engine), span-level calls for inline constructs, and low-level calls
//! for literal text. Any implementation of the trait can sit on the other
//! end — a concrete backend or a decorator stack.
//!
//! # Example
//!
//! ```
//! use mdtap_engine::Engine;
//! use mdtap_renderer::HtmlRenderer;
//!
//! let html = Engine::new().render("# Hello", &HtmlRenderer::new());
//! assert_eq!(html, "<h1>Hello</h1>\n");
//! ```

mod engine;

pub use engine::Engine;
pub use pulldown_cmark::Options;
