// src/core/html.rs
// Tolerant HTML tag scanning. Case-insensitive on tag names, quote-aware inside
// tags, never fails: unterminated constructs run to end of input.

use super::vischars::visible_text;

/// Index just past the '>' closing the tag that starts at `lt` (quote-aware),
/// or `b.len()` if the tag never closes.
pub fn tag_end(b: &[u8], lt: usize) -> usize {
    let n = b.len();
    let mut i = lt + 1;
    let mut in_s = false; // '
    let mut in_d = false; // "
    while i < n {
        match b[i] {
            b'\'' if !in_d => in_s = !in_s,
            b'"'  if !in_s => in_d = !in_d,
            b'>' if !in_s && !in_d => return i + 1,
            _ => {}
        }
        i += 1;
    }
    n
}

/// One tag occurrence in a document.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Tag {
    /// Byte offset of '<'
    pub start: usize,
    /// Byte offset just past '>'
    pub end: usize,
    /// Lowercased tag name ("li", "td", ...)
    pub name: String,
    pub is_close: bool,
    pub self_closing: bool,
}

/// Iterator over element tags; comments, doctypes and processing
/// instructions are skipped.
pub struct Tags<'a> {
    doc: &'a str,
    i: usize,
}

impl<'a> Tags<'a> {
    pub fn new(doc: &'a str) -> Self { Self { doc, i: 0 } }
}

impl<'a> Iterator for Tags<'a> {
    type Item = Tag;

    fn next(&mut self) -> Option<Tag> {
        let b = self.doc.as_bytes();
        loop {
            let lt = self.i + self.doc.get(self.i..)?.find('<')?;

            if b[lt..].starts_with(b"<!--") {
                self.i = match self.doc[lt + 4..].find("-->") {
                    Some(off) => lt + 4 + off + 3,
                    None => b.len(),
                };
                continue;
            }

            let end = tag_end(b, lt);
            self.i = end;

            let inner = self.doc[lt + 1..end].trim_end_matches('>');
            let (is_close, body) = match inner.strip_prefix('/') {
                Some(rest) => (true, rest),
                None => (false, inner),
            };
            let name: String = body
                .chars()
                .take_while(|c| c.is_ascii_alphanumeric())
                .collect::<String>()
                .to_ascii_lowercase();

            // "<!doctype>", "<?xml ...?>", or a stray '<' in text
            if name.is_empty() || !body.starts_with(|c: char| c.is_ascii_alphabetic()) {
                continue;
            }

            return Some(Tag {
                start: lt,
                end,
                self_closing: !is_close && inner.trim_end().ends_with('/'),
                name,
                is_close,
            });
        }
    }
}

/// Elements that never have content.
const VOID: &[&str] = &[
    "area", "base", "br", "col", "embed", "hr", "img", "input", "link", "meta", "param", "source", "track", "wbr",
];

/// Start tags that end an open `<p>`.
const BLOCKS: &[&str] = &[
    "address", "article", "aside", "blockquote", "div", "dl", "fieldset", "footer", "form", "h1", "h2", "h3", "h4",
    "h5", "h6", "header", "hr", "li", "main", "nav", "ol", "p", "pre", "section", "table", "ul",
];

/// An implied end tag: the innermost open element named in `ends` is closed,
/// unless an element named in `scope` is found first.
struct Implied {
    ends: &'static [&'static str],
    scope: &'static [&'static str],
}

const END_P: Implied = Implied { ends: &["p"], scope: &["button", "table", "td", "th"] };
const END_LI: Implied = Implied { ends: &["li"], scope: &["ul", "ol", "table"] };
const END_CELL: Implied = Implied { ends: &["td", "th"], scope: &["tr", "table"] };
const END_ROW: Implied = Implied { ends: &["tr"], scope: &["table"] };

const ON_LI: &[Implied] = &[END_P, END_LI];
const ON_CELL: &[Implied] = &[END_CELL];
const ON_ROW: &[Implied] = &[END_ROW];
const ON_BLOCK: &[Implied] = &[END_P];

fn implied_by(name: &str) -> &'static [Implied] {
    match name {
        "li" => ON_LI,
        "td" | "th" => ON_CELL,
        "tr" => ON_ROW,
        n if BLOCKS.contains(&n) => ON_BLOCK,
        _ => &[],
    }
}

struct Open {
    name: String,
    /// Byte offset of the element's content
    from: usize,
    wanted: bool,
}

fn find_open(open: &[Open], ends: &[&str], scope: &[&str]) -> Option<usize> {
    for (depth, el) in open.iter().enumerate().rev() {
        if ends.contains(&el.name.as_str()) {
            return Some(depth);
        }
        if scope.contains(&el.name.as_str()) {
            return None;
        }
    }
    None
}

/// Close `open[depth..]` with their content ending at `at`, innermost first.
fn close_from(open: &mut Vec<Open>, depth: usize, at: usize, doc: &str, out: &mut Vec<String>) {
    for el in open.drain(depth..).rev() {
        if el.wanted {
            out.push(visible_text(&doc[el.from..at]));
        }
    }
}

/// Flattened visible text of every element whose tag name is in `tags`.
///
/// End tags may be omitted the way HTML allows: an `<li>` ends at the next
/// sibling `<li>`, a cell at the next cell or row, a `<p>` at the next block,
/// and anything still open ends at its parent's closing tag. Only elements
/// open at end of input run to end of input. A selected element nested in
/// another (an `<li>` in a sub-list) is reported alone and inside its parent.
pub fn element_texts(doc: &str, tags: &[&str]) -> Vec<String> {
    let wanted = |name: &str| tags.iter().any(|t| t.eq_ignore_ascii_case(name));

    let mut open: Vec<Open> = Vec::new();
    let mut out = Vec::new();

    for tag in Tags::new(doc) {
        let name = tag.name.as_str();

        if tag.is_close {
            // stray closers are ignored
            if let Some(depth) = find_open(&open, &[name], &[]) {
                close_from(&mut open, depth, tag.start, doc, &mut out);
            }
            continue;
        }

        for rule in implied_by(name) {
            if let Some(depth) = find_open(&open, rule.ends, rule.scope) {
                close_from(&mut open, depth, tag.start, doc, &mut out);
            }
        }
        if tag.self_closing || VOID.contains(&name) {
            continue;
        }
        open.push(Open { name: s!(name), from: tag.end, wanted: wanted(name) });
    }
    close_from(&mut open, 0, doc.len(), doc, &mut out);

    out.retain(|t| !t.is_empty());
    out
}
