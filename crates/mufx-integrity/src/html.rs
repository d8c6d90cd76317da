//! Structural HTML tag scanner.
//!
//! This is not an HTML parser. It walks the tag stream of a document and
//! reports byte offsets, which is all the integrity tooling needs: locate an
//! element, pair it with its closing tag, read or rewrite attributes on its
//! opening tag, and cut whole elements out. Everything outside the touched
//! spans is left byte-for-byte intact.
//!
//! Rules:
//!
//! - Tag names match ASCII case-insensitively and must be followed by
//!   whitespace, `/` or `>` (`<articles>` is not an `article`).
//! - Quoted attribute values may contain `>`.
//! - `<!-- comments -->` are skipped.
//! - `script` and `style` contents are raw text; tags inside them are ignored.
//! - Closing tags are paired with their opening tag by nesting depth of
//!   same-named elements.

use std::ops::Range;

/// Elements whose contents are raw text rather than markup.
const RAW_TEXT_ELEMENTS: [&str; 2] = ["script", "style"];

/// Elements that never have content or a closing tag.
const VOID_ELEMENTS: [&str; 13] = [
    "area", "base", "br", "col", "embed", "hr", "img", "input", "link", "meta", "source",
    "track", "wbr",
];

/// Whether a scanned tag opens or closes an element.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TagKind {
    /// `<name ...>` or `<name ... />`
    Open,
    /// `</name>`
    Close,
}

/// A single tag found in a document.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Tag {
    /// Open or close.
    pub kind: TagKind,
    /// Offset of `<`.
    pub start: usize,
    /// Offset just past `>`.
    pub end: usize,
    /// Offsets of the tag name.
    pub name: Range<usize>,
    /// Opening tag written as `<name ... />`.
    pub self_closing: bool,
}

impl Tag {
    /// Whether this tag's name equals `name`, ignoring ASCII case.
    pub fn is_named(&self, doc: &str, name: &str) -> bool {
        doc[self.name.clone()].eq_ignore_ascii_case(name)
    }

    fn is_raw_text(&self, doc: &str) -> bool {
        RAW_TEXT_ELEMENTS.iter().any(|n| self.is_named(doc, n))
    }

    fn is_void(&self, doc: &str) -> bool {
        VOID_ELEMENTS.iter().any(|n| self.is_named(doc, n))
    }
}

/// Byte offsets of a complete element: opening tag, content, closing tag.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Element {
    /// Offset of the opening tag's `<`.
    pub start: usize,
    /// Offset just past the opening tag's name.
    pub name_end: usize,
    /// Offset just past the opening tag's `>`.
    pub open_end: usize,
    /// Offset of the closing tag's `<`.
    pub close_start: usize,
    /// Offset just past the closing tag's `>`.
    pub end: usize,
}

impl Element {
    /// Content between the opening and closing tags.
    pub fn inner<'a>(&self, doc: &'a str) -> &'a str {
        &doc[self.open_end..self.close_start]
    }

    /// Whether this element's span contains `other`'s, equal spans included.
    pub fn encloses(&self, other: &Element) -> bool {
        self.start <= other.start && other.end <= self.end
    }

    /// Attributes of the opening tag, with absolute offsets.
    pub fn attributes(&self, doc: &str) -> Vec<Attribute> {
        parse_attributes(doc, self.name_end, self.open_end - 1)
    }

    /// Look up an attribute of the opening tag by name, ignoring ASCII case.
    pub fn attribute(&self, doc: &str, name: &str) -> Option<Attribute> {
        self.attributes(doc)
            .into_iter()
            .find(|a| doc[a.name.clone()].eq_ignore_ascii_case(name))
    }
}

/// An attribute on an opening tag.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Attribute {
    /// Offsets of the attribute name.
    pub name: Range<usize>,
    /// Offsets of the value, excluding quotes. `None` for bare attributes.
    pub value: Option<Range<usize>>,
    /// Offsets of the whole attribute, closing quote included.
    pub span: Range<usize>,
}

impl Attribute {
    /// The attribute value, or `""` for a bare attribute.
    pub fn value<'a>(&self, doc: &'a str) -> &'a str {
        self.value.clone().map_or("", |v| &doc[v])
    }
}

/// Iterator over the tags of a document, starting at a byte offset.
pub struct Tags<'a> {
    doc: &'a str,
    pos: usize,
}

impl<'a> Tags<'a> {
    /// Scan `doc` from offset `from`.
    pub fn new(doc: &'a str, from: usize) -> Self {
        Self { doc, pos: from }
    }
}

impl Iterator for Tags<'_> {
    type Item = Tag;

    fn next(&mut self) -> Option<Tag> {
        let bytes = self.doc.as_bytes();

        while self.pos < bytes.len() {
            let start = self.pos + bytes[self.pos..].iter().position(|&b| b == b'<')?;

            if bytes[start..].starts_with(b"<!--") {
                self.pos = find_bytes(bytes, start + 4, b"-->")? + 3;
                continue;
            }

            let (kind, name_start) = if bytes.get(start + 1) == Some(&b'/') {
                (TagKind::Close, start + 2)
            } else {
                (TagKind::Open, start + 1)
            };

            if !bytes.get(name_start).is_some_and(u8::is_ascii_alphabetic) {
                // Stray `<`, doctype, or processing instruction.
                self.pos = start + 1;
                continue;
            }

            let name_end = bytes[name_start..]
                .iter()
                .position(|&b| !(b.is_ascii_alphanumeric() || b == b'-' || b == b':'))
                .map_or(bytes.len(), |off| name_start + off);

            let end = tag_end(bytes, name_end)?;
            let self_closing = kind == TagKind::Open
                && bytes[name_end..end - 1].trim_ascii_end().last() == Some(&b'/');

            let tag = Tag {
                kind,
                start,
                end,
                name: name_start..name_end,
                self_closing,
            };

            self.pos = end;
            if tag.kind == TagKind::Open && !tag.self_closing && tag.is_raw_text(self.doc) {
                // Jump straight to the closing tag; markup inside is text.
                self.pos = find_closing_raw(bytes, end, &bytes[tag.name.clone()])
                    .unwrap_or(bytes.len());
            }
            return Some(tag);
        }

        None
    }
}

/// Find the first complete element named `name`.
pub fn find_element(doc: &str, name: &str) -> Option<Element> {
    find_element_where(doc, 0, |tag| tag.is_named(doc, name))
}

/// Find the first complete element at or after `from` whose opening tag
/// satisfies `pred`.
///
/// Opening tags without a matching closing tag are passed over and the
/// search continues after them.
pub fn find_element_where<F>(doc: &str, from: usize, pred: F) -> Option<Element>
where
    F: Fn(&Tag) -> bool,
{
    Tags::new(doc, from)
        .filter(|t| t.kind == TagKind::Open && !t.self_closing && pred(t))
        .find_map(|open| match_close(doc, &open))
}

/// Pair an opening tag with its closing tag.
pub fn match_close(doc: &str, open: &Tag) -> Option<Element> {
    let bytes = doc.as_bytes();
    let element = |close_start: usize, end: usize| Element {
        start: open.start,
        name_end: open.name.end,
        open_end: open.end,
        close_start,
        end,
    };

    if open.is_raw_text(doc) {
        let close_start = find_closing_raw(bytes, open.end, &bytes[open.name.clone()])?;
        let end = tag_end(bytes, close_start + 2)?;
        return Some(element(close_start, end));
    }

    let name = &doc[open.name.clone()];
    let mut depth = 1usize;
    for tag in Tags::new(doc, open.end).filter(|t| t.is_named(doc, name)) {
        match tag.kind {
            TagKind::Open if !tag.self_closing => depth += 1,
            TagKind::Open => {}
            TagKind::Close => {
                depth -= 1;
                if depth == 0 {
                    return Some(element(tag.start, tag.end));
                }
            }
        }
    }
    None
}

/// Remove every complete element named in `names`, tags and content.
///
/// Unclosed opening tags are left in place.
pub fn remove_elements(fragment: &str, names: &[&str]) -> String {
    remove_elements_where(fragment, |tag| names.iter().any(|n| tag.is_named(fragment, n))).0
}

/// Remove every complete element whose opening tag satisfies `pred`.
///
/// Returns the rewritten text and the number of elements removed. Elements
/// nested inside a removed element go with it.
pub fn remove_elements_where<F>(doc: &str, pred: F) -> (String, usize)
where
    F: Fn(&Tag) -> bool,
{
    remove_elements_except(doc, pred, |_| false)
}

/// Like [`remove_elements_where`], but elements for which `spare` returns
/// true stay in place. Scanning continues inside a spared element, so
/// selected elements nested in it are still removed.
pub fn remove_elements_except<F, S>(doc: &str, pred: F, spare: S) -> (String, usize)
where
    F: Fn(&Tag) -> bool,
    S: Fn(&Element) -> bool,
{
    let mut out = String::with_capacity(doc.len());
    let mut cursor = 0;
    let mut removed = 0;
    let mut tags = Tags::new(doc, 0);

    while let Some(tag) = tags.next() {
        if tag.kind != TagKind::Open || !pred(&tag) {
            continue;
        }
        let Some(el) = element_at(doc, &tag) else {
            continue;
        };
        if spare(&el) {
            continue;
        }
        out.push_str(&doc[cursor..el.start]);
        cursor = el.end;
        removed += 1;
        tags = Tags::new(doc, el.end);
    }
    out.push_str(&doc[cursor..]);
    (out, removed)
}

/// The element an opening tag starts.
///
/// Void (`<img>`) and self-closing (`<hr/>`) tags are elements on their
/// own. Other tags are paired with their closing tag.
pub fn element_at(doc: &str, open: &Tag) -> Option<Element> {
    if open.self_closing || open.is_void(doc) {
        return Some(Element {
            start: open.start,
            name_end: open.name.end,
            open_end: open.end,
            close_start: open.end,
            end: open.end,
        });
    }
    match_close(doc, open)
}

/// Replace every tag-like run `<...>` with a single space.
///
/// A run is a `<` followed by at least one character and the next `>`.
/// A `<` with no following `>` (or `<>`) is kept as text.
pub fn strip_tags(fragment: &str) -> String {
    let mut out = String::with_capacity(fragment.len());
    let mut rest = fragment;

    while let Some(lt) = rest.find('<') {
        out.push_str(&rest[..lt]);
        match rest[lt + 1..].find('>') {
            Some(gt) if gt > 0 => {
                out.push(' ');
                rest = &rest[lt + 1 + gt + 1..];
            }
            _ => {
                out.push('<');
                rest = &rest[lt + 1..];
            }
        }
    }
    out.push_str(rest);
    out
}

/// Whether an opening tag's `class` attribute lists `class`.
pub fn has_class(doc: &str, tag: &Tag, class: &str) -> bool {
    parse_attributes(doc, tag.name.end, tag.end - 1)
        .iter()
        .filter(|a| doc[a.name.clone()].eq_ignore_ascii_case("class"))
        .any(|a| a.value(doc).split_ascii_whitespace().any(|c| c == class))
}

/// Offset just past the first `>` at or after `from` that is not inside a
/// quoted attribute value.
fn tag_end(bytes: &[u8], from: usize) -> Option<usize> {
    let mut quote: Option<u8> = None;
    let mut after_equals = false;

    for (i, &b) in bytes.iter().enumerate().skip(from) {
        if let Some(q) = quote {
            if b == q {
                quote = None;
            }
            continue;
        }
        match b {
            b'>' => return Some(i + 1),
            b'=' => after_equals = true,
            b'"' | b'\'' if after_equals => {
                quote = Some(b);
                after_equals = false;
            }
            _ if b.is_ascii_whitespace() => {}
            _ => after_equals = false,
        }
    }
    None
}

/// Offset of the `</name` that closes a raw text element.
fn find_closing_raw(bytes: &[u8], from: usize, name: &[u8]) -> Option<usize> {
    let mut pos = from;
    while let Some(lt) = find_bytes(bytes, pos, b"</") {
        let name_start = lt + 2;
        let name_end = name_start + name.len();
        let named = bytes
            .get(name_start..name_end)
            .is_some_and(|n| n.eq_ignore_ascii_case(name));
        let delimited = bytes
            .get(name_end)
            .is_none_or(|&b| b == b'>' || b == b'/' || b.is_ascii_whitespace());
        if named && delimited {
            return Some(lt);
        }
        pos = name_start;
    }
    None
}

fn find_bytes(bytes: &[u8], from: usize, needle: &[u8]) -> Option<usize> {
    bytes
        .get(from..)?
        .windows(needle.len())
        .position(|w| w == needle)
        .map(|off| from + off)
}

/// Parse the attributes found between `from` and `to` (the tag's `>`).
fn parse_attributes(doc: &str, from: usize, to: usize) -> Vec<Attribute> {
    let bytes = doc.as_bytes();
    let mut attrs = Vec::new();
    let mut pos = from;

    let skip_ws = |mut p: usize| {
        while p < to && bytes[p].is_ascii_whitespace() {
            p += 1;
        }
        p
    };

    while pos < to {
        pos = skip_ws(pos);
        if pos >= to {
            break;
        }
        if bytes[pos] == b'/' {
            pos += 1;
            continue;
        }

        let name_start = pos;
        while pos < to && !matches!(bytes[pos], b'=' | b'/') && !bytes[pos].is_ascii_whitespace() {
            pos += 1;
        }
        let name = name_start..pos;
        if name.is_empty() {
            pos += 1;
            continue;
        }

        let after_name = skip_ws(pos);
        if after_name < to && bytes[after_name] == b'=' {
            let value_start = skip_ws(after_name + 1);
            let (value, end) = match bytes.get(value_start).copied() {
                Some(q) if value_start < to && (q == b'"' || q == b'\'') => {
                    let close = bytes[value_start + 1..to]
                        .iter()
                        .position(|&b| b == q)
                        .map_or(to, |off| value_start + 1 + off);
                    (value_start + 1..close, (close + 1).min(to))
                }
                _ => {
                    let mut p = value_start;
                    while p < to && !bytes[p].is_ascii_whitespace() {
                        p += 1;
                    }
                    (value_start..p, p)
                }
            };
            attrs.push(Attribute {
                name: name.clone(),
                value: Some(value),
                span: name.start..end,
            });
            pos = end;
        } else {
            attrs.push(Attribute {
                name: name.clone(),
                value: None,
                span: name,
            });
        }
    }
    attrs
}
