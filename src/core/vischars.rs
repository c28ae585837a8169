// src/core/vischars.rs
// Visible-text character iterator over an HTML fragment.
// Tags (<...>, quote-aware), comments (<!-- ... -->), entities (&...;) and
// ASCII whitespace all separate words: any run of them yields a single ' '.
// Never leading or trailing.

pub struct VisChars<'a> {
    s: &'a str,
    b: &'a [u8],
    i: usize,
    n: usize,
    started: bool,
    pending_sep: bool,
}

impl<'a> VisChars<'a> {
    pub fn new(s: &'a str) -> Self {
        Self { s, b: s.as_bytes(), i: 0, n: s.len(), started: false, pending_sep: false }
    }

    #[inline]
    fn skip_markup(&mut self) {
        // called when current byte is '<'
        if self.b[self.i..].starts_with(b"<!--") {
            self.i = match self.s[self.i + 4..].find("-->") {
                Some(off) => self.i + 4 + off + 3,
                None => self.n,
            };
            return;
        }
        self.i = super::html::tag_end(self.b, self.i);
    }

    #[inline]
    fn skip_entity(&mut self) {
        // called when current byte is '&'
        self.i += 1;
        while self.i < self.n {
            match self.b[self.i] {
                b';' => { self.i += 1; return; }
                c if c.is_ascii_alphanumeric() || c == b'#' => self.i += 1,
                _ => break,
            }
        }
    }

    #[inline]
    fn next_char(&mut self) -> Option<char> {
        let ch = self.s[self.i..].chars().next()?;
        self.i += ch.len_utf8();
        Some(ch)
    }
}

impl Iterator for VisChars<'_> {
    type Item = char;
    fn next(&mut self) -> Option<Self::Item> {
        while self.i < self.n {
            match self.b[self.i] {
                b'<' => self.skip_markup(),
                b'&' => self.skip_entity(),
                b' ' | b'\t' | b'\r' | b'\n' => self.i += 1,
                _ => {
                    // a separator is only emitted between two visible chars
                    if self.pending_sep && self.started {
                        self.pending_sep = false;
                        return Some(' ');
                    }
                    self.pending_sep = false;
                    self.started = true;
                    return self.next_char();
                }
            }
            self.pending_sep = true;
        }
        None
    }
}

/// Flattened visible text of a fragment: words separated by single spaces.
pub fn visible_text(fragment: &str) -> String {
    VisChars::new(fragment).collect()
}
