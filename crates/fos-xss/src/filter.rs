//! Sanitizer front end
//!
//! Drives the scanner and routes its spans: text is escaped, tags go
//! through validation.

use crate::attributes::{noop_hook, AttrHook};
use crate::escape::no_tag_into;
use crate::scanner::{Scanner, Span};
use crate::tag::TagToken;
use crate::whitelist::{default_whitelist, Whitelist};
use std::fmt;

fn run<H>(html: &str, whitelist: &Whitelist, hook: &H) -> String
where
    H: Fn(&str, &str, &str) -> Option<String> + ?Sized,
{
    let mut out = String::with_capacity(html.len());
    let mut tags = 0usize;

    for span in Scanner::new(html) {
        match span {
            Span::Text(text) => no_tag_into(&mut out, text),
            Span::Tag(raw) => {
                tags += 1;
                TagToken::parse(raw).write(&mut out, whitelist, hook);
            }
        }
    }

    tracing::debug!(
        "Sanitized {} bytes -> {} bytes ({} tags)",
        html.len(),
        out.len(),
        tags
    );
    out
}

/// Sanitize with the built-in whitelist
pub fn sanitize(html: &str) -> String {
    run(html, default_whitelist(), &noop_hook)
}

/// Sanitize with the built-in whitelist and an attribute value hook
pub fn sanitize_with_hook<F>(html: &str, on_attr: F) -> String
where
    F: Fn(&str, &str, &str) -> Option<String>,
{
    run(html, default_whitelist(), &on_attr)
}

/// Sanitize with a caller-supplied whitelist and attribute value hook.
/// Pass [`noop_hook`] to keep values as they are.
pub fn sanitize_with<F>(html: &str, whitelist: &Whitelist, on_attr: F) -> String
where
    F: Fn(&str, &str, &str) -> Option<String>,
{
    run(html, whitelist, &on_attr)
}

/// Reusable sanitizer owning its whitelist and hook
///
/// ```rust
/// use fos_xss::XssFilter;
///
/// let filter = XssFilter::new().on_attr(|_tag, attr, value| {
///     (attr == "href" && value.starts_with("javascript:")).then(|| "#".to_string())
/// });
/// assert_eq!(
///     filter.sanitize(r#"<a href="javascript:alert(1)">x</a>"#),
///     r##"<a href="#">x</a>"##
/// );
/// ```
pub struct XssFilter {
    whitelist: Whitelist,
    on_attr: Option<Box<AttrHook>>,
}

impl XssFilter {
    /// Create a filter using the built-in whitelist and no hook
    pub fn new() -> Self {
        Self {
            whitelist: default_whitelist().clone(),
            on_attr: None,
        }
    }

    /// Replace the whitelist
    pub fn with_whitelist(mut self, whitelist: Whitelist) -> Self {
        self.whitelist = whitelist;
        self
    }

    /// Set the attribute value hook
    pub fn on_attr<F>(mut self, on_attr: F) -> Self
    where
        F: Fn(&str, &str, &str) -> Option<String> + Send + Sync + 'static,
    {
        self.on_attr = Some(Box::new(on_attr));
        self
    }

    pub fn whitelist(&self) -> &Whitelist {
        &self.whitelist
    }

    pub fn whitelist_mut(&mut self) -> &mut Whitelist {
        &mut self.whitelist
    }

    /// Sanitize `html`
    pub fn sanitize(&self, html: &str) -> String {
        match &self.on_attr {
            Some(hook) => run(html, &self.whitelist, &**hook),
            None => run(html, &self.whitelist, &noop_hook),
        }
    }
}

impl Default for XssFilter {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Debug for XssFilter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("XssFilter")
            .field("whitelist", &self.whitelist)
            .field("on_attr", &self.on_attr.is_some())
            .finish()
    }
}
