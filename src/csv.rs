// src/csv.rs
use std::io::{self, Write};

pub const SEP: char = ',';

/* ---------------- Reading ---------------- */

/// Records of a CSV text, one `Vec` of fields each. Quoted fields may hold
/// separators, line breaks and `""` escapes. CRLF is accepted; blank lines
/// are skipped. Malformed quoting never fails: an unterminated quote runs to
/// end of input.
pub struct Records<'a> {
    rest: &'a str,
}

impl<'a> Records<'a> {
    pub fn new(text: &'a str) -> Self { Self { rest: text } }
}

impl Iterator for Records<'_> {
    type Item = Vec<String>;

    fn next(&mut self) -> Option<Vec<String>> {
        self.rest = self.rest.trim_start_matches(['\r', '\n']);
        if self.rest.is_empty() {
            return None;
        }

        let mut fields = Vec::new();
        loop {
            let (field, after) = read_field(self.rest);
            fields.push(field);
            match after.chars().next() {
                Some(SEP) => self.rest = &after[1..],
                Some('\r') => {
                    self.rest = after.strip_prefix("\r\n").unwrap_or(&after[1..]);
                    return Some(fields);
                }
                Some('\n') => {
                    self.rest = &after[1..];
                    return Some(fields);
                }
                _ => {
                    self.rest = after;
                    return Some(fields);
                }
            }
        }
    }
}

/// One field from the start of `s`; returns it and the input left after it
/// (which begins at a separator, a line break, or is empty).
fn read_field(s: &str) -> (String, &str) {
    let delim = |t: &str| t.find([SEP, '\r', '\n']).unwrap_or(t.len());

    let Some(mut rest) = s.strip_prefix('"') else {
        let end = delim(s);
        return (s!(&s[..end]), &s[end..]);
    };

    let mut out = s!();
    while let Some(q) = rest.find('"') {
        out.push_str(&rest[..q]);
        rest = &rest[q + 1..];
        match rest.strip_prefix('"') {
            Some(more) => {
                out.push('"');
                rest = more;
            }
            None => {
                // closing quote; stray text up to the delimiter is kept
                let end = delim(rest);
                out.push_str(&rest[..end]);
                return (out, &rest[end..]);
            }
        }
    }
    out.push_str(rest);
    (out, "")
}

/// All records of `text`.
pub fn parse_rows(text: &str) -> Vec<Vec<String>> {
    Records::new(text).collect()
}

/* ---------------- Writing ---------------- */

fn needs_quotes(field: &str) -> bool {
    field.contains(SEP) || field.contains('"') || field.contains('\n') || field.contains('\r')
}

/// Write a single CSV row to any writer.
pub fn write_row<W: Write, S: AsRef<str>>(mut w: W, row: &[S]) -> io::Result<()> {
    let mut first = true;
    for cell in row {
        let cell = cell.as_ref();
        if !first { write!(w, "{}", SEP)?; } else { first = false; }
        if needs_quotes(cell) {
            let escaped = cell.replace('"', "\"\"");
            write!(w, "\"{}\"", escaped)?;
        } else {
            write!(w, "{}", cell)?;
        }
    }
    writeln!(w)
}
