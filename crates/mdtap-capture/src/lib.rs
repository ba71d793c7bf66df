//! Capturing decorator for the render-callback surface.
//!
//! [`Capture`] wraps any [`Renderer`](mdtap_renderer::Renderer) and records,
//! as a side effect of a normal render pass, the ordered list of block-level
//! constructs the engine visited — each as a [`CapturedElement`] carrying a
//! semantic tag and the markup the wrapped backend produced for it. Every
//! callback is forwarded, so rendering through a `Capture` behaves exactly
//! like rendering through the backend alone.
//!
//! The capture is deliberately flat: span-level content lands inside the
//! buffer of the innermost open block, and nested blocks each record their
//! own element rather than forming a tree. See [`Capture`] for the routing
//! discipline that makes this work.
//!
//! # Example
//!
//! ```
//! use mdtap_capture::Capture;
//! use mdtap_engine::Engine;
//! use mdtap_renderer::HtmlRenderer;
//!
//! let capture = Capture::new(HtmlRenderer::new());
//! Engine::new().render("# Hello\n\nSome text.", &capture);
//!
//! let elements = capture.elements();
//! assert_eq!(elements[0].tag, "h1");
//! assert_eq!(elements[0].content, "<h1>Hello</h1>\n");
//! assert_eq!(elements[1].tag, "paragraph");
//! assert_eq!(elements[1].content, "<p>Some text.</p>\n");
//! ```

mod capture;
mod element;

pub use capture::Capture;
pub use element::CapturedElement;
