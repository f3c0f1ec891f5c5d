//! Tag validation
//!
//! Checks one `<...>` token from the scanner against the whitelist and
//! writes either a rebuilt tag or the escaped token.

use crate::attributes::write_attributes;
use crate::escape::no_tag_into;
use crate::whitelist::Whitelist;
use memchr::memchr;

/// A candidate tag as cut out of the input by the scanner
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TagToken<'a> {
    raw: &'a str,
    name: String,
    closing: bool,
    attrs: Option<&'a str>,
}

impl<'a> TagToken<'a> {
    /// Split a raw `<...>` / `</...>` token into name and attribute text.
    ///
    /// The name runs from after `<` or `</` to the first space (or the
    /// final `>`), and is trimmed and lowercased. Everything between that
    /// space and the final `>` is attribute text.
    pub fn parse(raw: &'a str) -> Self {
        debug_assert!(raw.starts_with('<') && raw.ends_with('>'));

        let closing = raw.starts_with("</");
        let skip = if closing { 2 } else { 1 };
        let end = raw.len().saturating_sub(1);

        let (name_end, attrs) = match memchr(b' ', raw.as_bytes()) {
            Some(space) if space < end => (space, raw.get(space + 1..end)),
            _ => (end, None),
        };
        let name = raw.get(skip..name_end).unwrap_or("").trim().to_lowercase();

        Self { raw, name, closing, attrs }
    }

    /// The token exactly as it appeared in the input
    pub fn raw(&self) -> &'a str {
        self.raw
    }

    /// Lowercased tag name
    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn is_closing(&self) -> bool {
        self.closing
    }

    /// Untrimmed attribute text, if the token had a space after the name
    pub fn attrs(&self) -> Option<&'a str> {
        self.attrs
    }

    /// Write the sanitized form of this token to `out`.
    ///
    /// Unknown tags are escaped whole. Known tags are rebuilt from the
    /// lowercased name plus, for opening tags, the permitted attributes.
    /// Attribute text on closing tags is ignored.
    pub fn write<H>(&self, out: &mut String, whitelist: &Whitelist, hook: &H)
    where
        H: Fn(&str, &str, &str) -> Option<String> + ?Sized,
    {
        let Some(allowed) = whitelist.attrs(&self.name) else {
            tracing::trace!("Escaped tag {:?}", self.raw);
            no_tag_into(out, self.raw);
            return;
        };

        out.push_str(if self.closing { "</" } else { "<" });
        out.push_str(&self.name);
        if !self.closing {
            if let Some(attrs) = self.attrs {
                write_attributes(out, &self.name, attrs.trim(), allowed, hook);
            }
        }
        out.push('>');
    }
}
