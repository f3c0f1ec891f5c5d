//! Text escaping
//!
//! Plain-text runs only ever have `<` and `>` rewritten. Nothing else is
//! touched, so existing entities in the input pass through unchanged.

use memchr::{memchr, memchr2};
use std::borrow::Cow;

/// Escape `<` and `>` in `text`, appending the result to `out`
pub fn no_tag_into(out: &mut String, text: &str) {
    let bytes = text.as_bytes();
    let mut last = 0;
    
    // memchr2 skips the runs that need no rewriting
    while let Some(offset) = memchr2(b'<', b'>', &bytes[last..]) {
        let pos = last + offset;
        out.push_str(&text[last..pos]);
        out.push_str(if bytes[pos] == b'<' { "&lt;" } else { "&gt;" });
        last = pos + 1;
    }
    
    out.push_str(&text[last..]);
}

/// Escape `<` and `>` in `text`
pub fn no_tag(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    no_tag_into(&mut out, text);
    out
}

/// Make an attribute value safe to wrap in double quotes.
pub(crate) fn quote_safe(value: &str) -> Cow<'_, str> {
    if memchr(b'"', value.as_bytes()).is_none() {
        return Cow::Borrowed(value);
    }
    Cow::Owned(value.replace('"', "&quot;"))
}
