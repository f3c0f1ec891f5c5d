//! Attribute tokenizing and filtering
//!
//! Attribute text is split with a small forward scan instead of a real
//! attribute grammar:
//!
//! - `=` turns the text since the last boundary into a pending name.
//! - With a pending name, a quote starts a value that runs to the next
//!   identical quote. An unterminated value ends tokenizing and the rest
//!   of the text is dropped.
//! - Without a pending name, a space ends a bare attribute.
//! - Text left over at the end is one final bare attribute.
//!
//! Tokens that do not look like attributes at all fall out naturally at
//! the filtering stage, since their "names" are never whitelisted.

use crate::escape::quote_safe;
use memchr::memchr;
use std::borrow::Cow;

/// Attribute value hook: `(tag, attr, value) -> replacement`
///
/// Returning `None` keeps the value unchanged. A replacement is trimmed
/// like any other value.
pub type AttrHook = dyn Fn(&str, &str, &str) -> Option<String> + Send + Sync;

/// Hook that never rewrites anything
pub fn noop_hook(_tag: &str, _attr: &str, _value: &str) -> Option<String> {
    None
}

/// One attribute as it appeared in the tag, untrimmed
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RawAttr<'a> {
    pub name: &'a str,
    pub value: Option<&'a str>,
}

/// Iterator over the raw attributes of a tag's attribute text
pub struct AttrTokenizer<'a> {
    input: &'a str,
    pos: usize,
    /// Start of the text not yet assigned to a name or value
    last: usize,
    pending: Option<&'a str>,
    done: bool,
}

impl<'a> AttrTokenizer<'a> {
    pub fn new(input: &'a str) -> Self {
        Self {
            input,
            pos: 0,
            last: 0,
            pending: None,
            done: false,
        }
    }
}

impl<'a> Iterator for AttrTokenizer<'a> {
    type Item = RawAttr<'a>;

    fn next(&mut self) -> Option<RawAttr<'a>> {
        if self.done {
            return None;
        }

        let bytes = self.input.as_bytes();

        while self.pos < bytes.len() {
            let i = self.pos;
            let c = bytes[i];
            self.pos += 1;

            if c == b'=' {
                self.pending = Some(&self.input[self.last..i]);
                self.last = i + 1;
                continue;
            }

            match self.pending {
                Some(name) if c == b'"' || c == b'\'' => {
                    let Some(offset) = memchr(c, &bytes[i + 1..]) else {
                        // Unterminated value
                        self.done = true;
                        return None;
                    };
                    let close = i + 1 + offset;
                    self.pending = None;
                    self.pos = close + 1;
                    self.last = close + 1;
                    return Some(RawAttr {
                        name,
                        value: Some(&self.input[i + 1..close]),
                    });
                }
                None if c == b' ' => {
                    let name = &self.input[self.last..i];
                    self.last = i + 1;
                    return Some(RawAttr { name, value: None });
                }
                _ => {}
            }
        }

        self.done = true;
        if self.last < bytes.len() {
            return Some(RawAttr {
                name: &self.input[self.last..],
                value: None,
            });
        }
        None
    }
}

/// Tokenize `raw` and append every attribute permitted by `allowed` to
/// `out`, each preceded by a space.
///
/// The hook sees every attribute that carries a non-empty value, before
/// the name is checked against `allowed`. Values are re-wrapped in double
/// quotes; empty values are written as bare names.
///
/// A `"` inside a value is written as `&quot;` so the value cannot close
/// its quotes early. Nothing else in a value is escaped.
pub(crate) fn write_attributes<H>(
    out: &mut String,
    tag: &str,
    raw: &str,
    allowed: &[String],
    hook: &H,
) where
    H: Fn(&str, &str, &str) -> Option<String> + ?Sized,
{
    for attr in AttrTokenizer::new(raw) {
        let name = attr.name.trim().to_lowercase();

        let value: Option<Cow<'_, str>> = attr
            .value
            .map(str::trim)
            .filter(|v| !v.is_empty())
            .map(|v| match hook(tag, &name, v) {
                Some(replaced) => Cow::Owned(replaced.trim().to_string()),
                None => Cow::Borrowed(v),
            });

        if !allowed.iter().any(|a| *a == name) {
            tracing::trace!("Dropped attribute {:?} on <{}>", name, tag);
            continue;
        }

        out.push(' ');
        out.push_str(&name);
        match value {
            Some(value) if !value.is_empty() => {
                out.push_str("=\"");
                out.push_str(&quote_safe(&value));
                out.push('"');
            }
            _ => {}
        }
    }
}
