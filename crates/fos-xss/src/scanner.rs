//! Markup scanner
//!
//! Splits input into plain-text spans and candidate tag spans. The scan is
//! a single left-to-right pass over the bytes; the only delimiters are
//! ASCII (`<`, `>`, `"`, `'`), so every span boundary is a valid UTF-8
//! boundary as well.
//!
//! - `<` in text opens a tag.
//! - `<` inside an open tag abandons it: everything before the new `<` is
//!   text and the scan restarts from there.
//! - A quote inside a tag hides `>` and `<` until the same quote closes.
//! - `>` outside quotes closes the tag.
//! - Anything left at the end of input, an unterminated tag included, is
//!   text.

use memchr::memchr;

/// Where the scanner currently is
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ScanState {
    /// Outside of any tag
    InText,
    /// Inside a tag that opened at `start`
    InTag { start: usize },
    /// Inside a quoted value of a tag that opened at `start`
    InQuote { start: usize, quote: u8 },
}

/// A span of the input
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Span<'a> {
    /// Text to be escaped
    Text(&'a str),
    /// A complete `<...>` token to be validated
    Tag(&'a str),
}

/// Iterator over the spans of an HTML string
pub struct Scanner<'a> {
    input: &'a str,
    pos: usize,
    /// Everything before this offset has been handed out
    flushed: usize,
    state: ScanState,
    /// Tag to return after the text preceding it
    queued: Option<&'a str>,
}

impl<'a> Scanner<'a> {
    /// Create a new scanner for the given input
    pub fn new(input: &'a str) -> Self {
        Self {
            input,
            pos: 0,
            flushed: 0,
            state: ScanState::InText,
            queued: None,
        }
    }

    /// Get the current state
    #[inline]
    pub fn state(&self) -> ScanState {
        self.state
    }

    /// Get the current position
    #[inline]
    pub fn position(&self) -> usize {
        self.pos
    }
}

impl<'a> Iterator for Scanner<'a> {
    type Item = Span<'a>;

    fn next(&mut self) -> Option<Span<'a>> {
        if let Some(tag) = self.queued.take() {
            return Some(Span::Tag(tag));
        }

        let bytes = self.input.as_bytes();

        while self.pos < bytes.len() {
            match self.state {
                ScanState::InText => match memchr(b'<', &bytes[self.pos..]) {
                    Some(offset) => {
                        let start = self.pos + offset;
                        self.state = ScanState::InTag { start };
                        self.pos = start + 1;
                    }
                    None => self.pos = bytes.len(),
                },
                ScanState::InTag { start } => {
                    let i = self.pos;
                    self.pos += 1;

                    match bytes[i] {
                        b'<' => {
                            // Unterminated tag, restart at the new '<'
                            let text = &self.input[self.flushed..i];
                            self.flushed = i;
                            self.state = ScanState::InTag { start: i };
                            if !text.is_empty() {
                                return Some(Span::Text(text));
                            }
                        }
                        b'>' => {
                            let text = &self.input[self.flushed..start];
                            let tag = &self.input[start..=i];
                            self.flushed = i + 1;
                            self.state = ScanState::InText;

                            if text.is_empty() {
                                return Some(Span::Tag(tag));
                            }
                            self.queued = Some(tag);
                            return Some(Span::Text(text));
                        }
                        quote @ (b'"' | b'\'') => {
                            self.state = ScanState::InQuote { start, quote };
                        }
                        _ => {}
                    }
                }
                ScanState::InQuote { start, quote } => {
                    match memchr(quote, &bytes[self.pos..]) {
                        Some(offset) => {
                            self.pos += offset + 1;
                            self.state = ScanState::InTag { start };
                        }
                        None => self.pos = bytes.len(),
                    }
                }
            }
        }

        if self.flushed < bytes.len() {
            let text = &self.input[self.flushed..];
            self.flushed = bytes.len();
            return Some(Span::Text(text));
        }

        None
    }
}
