//! fOS XSS Filter
//!
//! Whitelist-based HTML sanitizer for untrusted markup.
//!
//! The filter is lexical: a single pass separates text from tags, each tag
//! is checked against a whitelist of tag and attribute names, and anything
//! not recognized as permitted markup is escaped (`<` -> `&lt;`,
//! `>` -> `&gt;`). There is no DOM and no attempt to balance tags.
//!
//! # Example
//! ```rust
//! use fos_xss::sanitize;
//!
//! assert_eq!(sanitize(r#"<p onclick="x()">hi</p>"#), "<p>hi</p>");
//! assert_eq!(sanitize("<script>alert(1)</script>"), "&lt;script&gt;alert(1)&lt;/script&gt;");
//! ```
//!
//! Attribute values are not inspected unless an attribute hook is given:
//! ```rust
//! use fos_xss::sanitize_with_hook;
//!
//! let out = sanitize_with_hook(r#"<a href="x">l</a>"#, |_tag, attr, value| {
//!     (attr == "href").then(|| value.to_uppercase())
//! });
//! assert_eq!(out, r#"<a href="X">l</a>"#);
//! ```

pub mod attributes;
pub mod escape;
pub mod filter;
pub mod scanner;
pub mod tag;
pub mod whitelist;

pub use attributes::{noop_hook, AttrHook, AttrTokenizer, RawAttr};
pub use escape::no_tag;
pub use filter::{sanitize, sanitize_with, sanitize_with_hook, XssFilter};
pub use scanner::{ScanState, Scanner, Span};
pub use tag::TagToken;
pub use whitelist::{default_whitelist, NameKind, Whitelist, DEFAULT_TAGS};

/// Whitelist configuration error
#[derive(Debug, thiserror::Error)]
pub enum XssError {
    #[error("Invalid {kind} name: {name:?}")]
    InvalidName { kind: NameKind, name: String },

    #[error("Whitelist JSON error: {0}")]
    Json(#[from] serde_json::Error),
}
