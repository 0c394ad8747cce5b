//! Markup parser: HTML-subset text into detached DOM fragments.
//!
//! The parser is deliberately lenient where a browser is lenient: stray
//! close tags are ignored, unclosed elements auto-close at end of input,
//! void elements (`br`, `img`, ...) never take children. It is strict where
//! the input is unrecoverable (end of input inside a tag, unterminated
//! quoted attribute). Text is not entity-decoded and passes through
//! verbatim; attribute values decode `&quot;` and `&amp;`, the two entities
//! the serializer emits, so values round-trip unchanged.

use super::node::{ElementData, NodeData, NodeId};
use super::tree::Dom;

/// Errors from markup parsing.
#[derive(Debug, thiserror::Error)]
pub enum MarkupError {
    #[error("unexpected end of input inside a tag at byte {0}")]
    UnexpectedEof(usize),
    #[error("unterminated quoted attribute value starting at byte {0}")]
    UnterminatedAttribute(usize),
    #[error("malformed tag at byte {offset}: {message}")]
    MalformedTag { offset: usize, message: String },
}

/// Elements that never have children and need no close tag.
const VOID_ELEMENTS: &[&str] = &[
    "area", "base", "br", "col", "embed", "hr", "img", "input", "link", "meta",
    "param", "source", "track", "wbr",
];

/// Whether `tag` is a void element (`<br>`, `<img>`, ...).
pub(crate) fn is_void(tag: &str) -> bool {
    VOID_ELEMENTS.contains(&tag)
}

/// Parse markup text into a list of detached root nodes inside `dom`.
///
/// Whitespace-only text runs between elements are dropped; all other text is
/// preserved byte-for-byte.
pub fn parse_fragment(dom: &mut Dom, input: &str) -> Result<Vec<NodeId>, MarkupError> {
    Parser {
        dom,
        input,
        pos: 0,
    }
    .run()
}

struct Parser<'a, 'd> {
    dom: &'d mut Dom,
    input: &'a str,
    pos: usize,
}

impl Parser<'_, '_> {
    fn run(&mut self) -> Result<Vec<NodeId>, MarkupError> {
        let mut roots: Vec<NodeId> = Vec::new();
        // Open elements; children attach to the top, roots when empty.
        let mut stack: Vec<(String, NodeId)> = Vec::new();

        while self.pos < self.input.len() {
            if self.starts_with("<!--") {
                self.skip_comment();
            } else if self.starts_with("</") {
                let name = self.read_close_tag()?;
                // Pop to the nearest matching open element; stray closers are
                // ignored, everything inside stays where it was attached.
                if let Some(idx) = stack.iter().rposition(|(tag, _)| *tag == name) {
                    stack.truncate(idx);
                }
            } else if self.starts_with("<!") {
                self.skip_to_tag_end();
            } else if self.peek() == Some(b'<') && self.peek_at(1).is_some_and(|b| b.is_ascii_alphabetic()) {
                let (tag, id, open) = self.read_open_tag()?;
                match stack.last() {
                    Some(&(_, parent)) => self.dom.append_child(parent, id),
                    None => roots.push(id),
                }
                if open {
                    stack.push((tag, id));
                }
            } else {
                self.read_text(&mut roots, &stack);
            }
        }

        Ok(roots)
    }

    // ── Scanning helpers ─────────────────────────────────────────────

    fn bytes(&self) -> &[u8] {
        self.input.as_bytes()
    }

    fn peek(&self) -> Option<u8> {
        self.bytes().get(self.pos).copied()
    }

    fn peek_at(&self, offset: usize) -> Option<u8> {
        self.bytes().get(self.pos + offset).copied()
    }

    fn starts_with(&self, prefix: &str) -> bool {
        self.input[self.pos..].starts_with(prefix)
    }

    fn skip_whitespace(&mut self) {
        while self.peek().is_some_and(|b| b.is_ascii_whitespace()) {
            self.pos += 1;
        }
    }

    fn skip_comment(&mut self) {
        // Unterminated comments swallow the rest of the input, browser-style.
        self.pos += 4;
        match self.input[self.pos..].find("-->") {
            Some(end) => self.pos += end + 3,
            None => self.pos = self.input.len(),
        }
    }

    fn skip_to_tag_end(&mut self) {
        match self.input[self.pos..].find('>') {
            Some(end) => self.pos += end + 1,
            None => self.pos = self.input.len(),
        }
    }

    // ── Productions ──────────────────────────────────────────────────

    /// Read `<tag attr=... >`, create the (detached) element, and return
    /// `(tag, id, still_open)`.
    fn read_open_tag(&mut self) -> Result<(String, NodeId, bool), MarkupError> {
        self.pos += 1; // consume '<'
        let tag = self.read_name()?;
        let mut el = ElementData::new(tag.clone());

        let open = loop {
            self.skip_whitespace();
            match self.peek() {
                None => return Err(MarkupError::UnexpectedEof(self.pos)),
                Some(b'>') => {
                    self.pos += 1;
                    break !VOID_ELEMENTS.contains(&tag.as_str());
                }
                Some(b'/') if self.peek_at(1) == Some(b'>') => {
                    self.pos += 2;
                    break false;
                }
                Some(_) => {
                    let name = self.read_attr_name()?;
                    self.skip_whitespace();
                    let value = if self.peek() == Some(b'=') {
                        self.pos += 1;
                        self.skip_whitespace();
                        self.read_attr_value()?
                    } else {
                        String::new()
                    };
                    el.set_attr(name, value);
                }
            }
        };

        let id = self.dom.create(NodeData::Element(el));
        Ok((tag, id, open))
    }

    /// Read `</tag>` and return the (lowercased) tag name.
    fn read_close_tag(&mut self) -> Result<String, MarkupError> {
        self.pos += 2; // consume '</'
        let name = self.read_name()?;
        self.skip_whitespace();
        match self.peek() {
            Some(b'>') => {
                self.pos += 1;
                Ok(name)
            }
            None => Err(MarkupError::UnexpectedEof(self.pos)),
            Some(_) => Err(MarkupError::MalformedTag {
                offset: self.pos,
                message: format!("expected '>' after close tag \"{name}\""),
            }),
        }
    }

    /// Tag names: ASCII letters, digits, `-`; lowercased.
    fn read_name(&mut self) -> Result<String, MarkupError> {
        let start = self.pos;
        while self
            .peek()
            .is_some_and(|b| b.is_ascii_alphanumeric() || b == b'-')
        {
            self.pos += 1;
        }
        if self.pos == start {
            return Err(MarkupError::MalformedTag {
                offset: start,
                message: "expected a tag name".into(),
            });
        }
        Ok(self.input[start..self.pos].to_ascii_lowercase())
    }

    /// Attribute names: anything up to whitespace, `=`, `/` or `>`.
    fn read_attr_name(&mut self) -> Result<String, MarkupError> {
        let start = self.pos;
        while self
            .peek()
            .is_some_and(|b| !b.is_ascii_whitespace() && !matches!(b, b'=' | b'/' | b'>'))
        {
            self.pos += 1;
        }
        if self.pos == start {
            return Err(MarkupError::MalformedTag {
                offset: start,
                message: "expected an attribute name".into(),
            });
        }
        Ok(self.input[start..self.pos].to_string())
    }

    /// Attribute values: `"..."`, `'...'`, or unquoted up to whitespace/`>`.
    fn read_attr_value(&mut self) -> Result<String, MarkupError> {
        match self.peek() {
            Some(quote @ (b'"' | b'\'')) => {
                let start = self.pos;
                self.pos += 1;
                let value_start = self.pos;
                while let Some(b) = self.peek() {
                    if b == quote {
                        let value = decode_attr(&self.input[value_start..self.pos]);
                        self.pos += 1;
                        return Ok(value);
                    }
                    self.pos += 1;
                }
                Err(MarkupError::UnterminatedAttribute(start))
            }
            _ => {
                let start = self.pos;
                while self
                    .peek()
                    .is_some_and(|b| !b.is_ascii_whitespace() && b != b'>')
                {
                    self.pos += 1;
                }
                Ok(decode_attr(&self.input[start..self.pos]))
            }
        }
    }

    /// Read a text run up to the next `<` and attach it unless it is
    /// whitespace-only.
    fn read_text(&mut self, roots: &mut Vec<NodeId>, stack: &[(String, NodeId)]) {
        let start = self.pos;
        // A '<' that did not open a tag is literal text; step past it so the
        // scan below looks for the next one.
        let search_from = if self.peek() == Some(b'<') {
            self.pos + 1
        } else {
            self.pos
        };
        let end = match self.input[search_from..].find('<') {
            Some(offset) => search_from + offset,
            None => self.input.len(),
        };
        self.pos = end;
        let text = &self.input[start..end];
        if text.trim().is_empty() {
            return;
        }
        let id = self.dom.create(NodeData::text(text));
        match stack.last() {
            Some(&(_, parent)) => self.dom.append_child(parent, id),
            None => roots.push(id),
        }
    }
}

/// Decode the two entities the serializer emits in attribute values. `&amp;`
/// decodes last so `&amp;quot;` comes back as the literal text `&quot;`.
fn decode_attr(raw: &str) -> String {
    if !raw.contains('&') {
        return raw.to_string();
    }
    raw.replace("&quot;", "\"").replace("&amp;", "&")
}
