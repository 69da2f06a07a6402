//! XML parser
//!
//! Parses XML source into the element tree. Covers the subset that
//! descriptive metadata records actually use: namespaces, attributes,
//! character data, CDATA sections, comments, processing instructions
//! and an optional DOCTYPE. Not a validating parser.

use std::collections::HashMap;

use thiserror::Error;

use super::element::{Attribute, Element, Node};

/// Parse failure
#[derive(Error, Debug)]
pub enum XmlError {
    #[error("unexpected end of input")]
    UnexpectedEof,

    #[error("malformed XML at byte {0}")]
    Malformed(usize),

    #[error("mismatched closing tag: expected </{expected}>, found </{found}>")]
    MismatchedClose { expected: String, found: String },

    #[error("document has no root element")]
    NoRootElement,

    #[error("content after the root element")]
    TrailingContent,

    #[error("unknown entity reference: &{0};")]
    UnknownEntity(String),

    #[error("invalid character reference")]
    InvalidCharRef,
}

/// A parsed XML document
#[derive(Debug, Clone, PartialEq)]
pub struct Document {
    root: Element,
}

impl Document {
    /// Parse a complete document from a string.
    pub fn parse(input: &str) -> Result<Document, XmlError> {
        let mut parser = Parser::new(input);
        let root = parser.parse_document()?;
        Ok(Document { root })
    }

    /// The document root element.
    pub fn root(&self) -> &Element {
        &self.root
    }

    /// Consume the document and return the root element.
    pub fn into_root(self) -> Element {
        self.root
    }
}

enum Opened {
    Open(Element),
    SelfClosed(Element),
}

struct Parser<'a> {
    input: &'a str,
    bytes: &'a [u8],
    pos: usize,
    scopes: Vec<HashMap<String, String>>,
}

impl<'a> Parser<'a> {
    fn new(input: &'a str) -> Self {
        let input = input.strip_prefix('\u{feff}').unwrap_or(input);
        Parser {
            input,
            bytes: input.as_bytes(),
            pos: 0,
            scopes: Vec::new(),
        }
    }

    fn parse_document(&mut self) -> Result<Element, XmlError> {
        self.skip_misc()?;
        if self.pos >= self.bytes.len() {
            return Err(XmlError::NoRootElement);
        }
        let root = self.parse_tree()?;
        self.skip_misc()?;
        if self.pos < self.bytes.len() {
            return Err(XmlError::TrailingContent);
        }
        Ok(root)
    }

    /// Build one element tree. The cursor must sit on the `<` of a start tag.
    fn parse_tree(&mut self) -> Result<Element, XmlError> {
        let mut stack: Vec<Element> = Vec::new();
        loop {
            if self.pos >= self.bytes.len() {
                return Err(XmlError::UnexpectedEof);
            }
            if !stack.is_empty() && self.bytes[self.pos] != b'<' {
                let text = self.read_text()?;
                if let Some(top) = stack.last_mut() {
                    top.children.push(Node::Text(text));
                }
                continue;
            }
            if self.starts_with(b"</") {
                let el = self.close_tag(&mut stack)?;
                match stack.last_mut() {
                    Some(parent) => parent.children.push(Node::Element(el)),
                    None => return Ok(el),
                }
            } else if self.starts_with(b"<!--") {
                self.skip_until(b"-->")?;
            } else if self.starts_with(b"<![CDATA[") {
                let raw = self.read_cdata()?;
                if let Some(top) = stack.last_mut() {
                    top.children.push(Node::Text(raw));
                }
            } else if self.starts_with(b"<?") {
                self.skip_until(b"?>")?;
            } else {
                match self.open_tag()? {
                    Opened::SelfClosed(el) => match stack.last_mut() {
                        Some(parent) => parent.children.push(Node::Element(el)),
                        None => return Ok(el),
                    },
                    Opened::Open(el) => stack.push(el),
                }
            }
        }
    }

    fn open_tag(&mut self) -> Result<Opened, XmlError> {
        self.expect(b'<')?;
        let (prefix, local) = self.read_name()?;
        let mut raw_attrs: Vec<(Option<String>, String, String)> = Vec::new();
        let self_closing;
        loop {
            self.skip_whitespace();
            match self.bytes.get(self.pos) {
                None => return Err(XmlError::UnexpectedEof),
                Some(b'>') => {
                    self.pos += 1;
                    self_closing = false;
                    break;
                }
                Some(b'/') => {
                    self.pos += 1;
                    self.expect(b'>')?;
                    self_closing = true;
                    break;
                }
                Some(_) => {
                    let (attr_prefix, attr_name) = self.read_name()?;
                    self.skip_whitespace();
                    self.expect(b'=')?;
                    self.skip_whitespace();
                    let value = self.read_quoted()?;
                    raw_attrs.push((attr_prefix, attr_name, value));
                }
            }
        }

        // xmlns declarations feed the namespace scope, everything else
        // stays on the element
        let mut scope = HashMap::new();
        let mut attributes = Vec::new();
        for (attr_prefix, attr_name, value) in raw_attrs {
            if attr_prefix.is_none() && attr_name == "xmlns" {
                scope.insert(String::new(), value);
            } else if attr_prefix.as_deref() == Some("xmlns") {
                scope.insert(attr_name, value);
            } else {
                attributes.push(Attribute {
                    prefix: attr_prefix,
                    name: attr_name,
                    value,
                });
            }
        }
        self.scopes.push(scope);

        let namespace = match &prefix {
            Some(p) => self.lookup(p),
            None => self.lookup(""),
        };
        let element = Element {
            name: local,
            namespace,
            attributes,
            children: Vec::new(),
        };
        if self_closing {
            self.scopes.pop();
            Ok(Opened::SelfClosed(element))
        } else {
            Ok(Opened::Open(element))
        }
    }

    fn close_tag(&mut self, stack: &mut Vec<Element>) -> Result<Element, XmlError> {
        self.pos += 2;
        let (_, local) = self.read_name()?;
        self.skip_whitespace();
        self.expect(b'>')?;
        let element = match stack.pop() {
            Some(el) => el,
            None => return Err(XmlError::Malformed(self.pos)),
        };
        if element.name != local {
            return Err(XmlError::MismatchedClose {
                expected: element.name,
                found: local,
            });
        }
        self.scopes.pop();
        Ok(element)
    }

    fn lookup(&self, prefix: &str) -> Option<String> {
        for scope in self.scopes.iter().rev() {
            if let Some(uri) = scope.get(prefix) {
                // xmlns="" undeclares the default namespace
                if uri.is_empty() {
                    return None;
                }
                return Some(uri.clone());
            }
        }
        if prefix == "xml" {
            return Some("http://www.w3.org/XML/1998/namespace".to_string());
        }
        None
    }

    fn read_name(&mut self) -> Result<(Option<String>, String), XmlError> {
        let start = self.pos;
        while self.pos < self.bytes.len() && is_name_byte(self.bytes[self.pos]) {
            self.pos += 1;
        }
        if self.pos == start {
            return Err(XmlError::Malformed(start));
        }
        let name = &self.input[start..self.pos];
        match name.split_once(':') {
            Some((prefix, local)) => Ok((Some(prefix.to_string()), local.to_string())),
            None => Ok((None, name.to_string())),
        }
    }

    fn read_quoted(&mut self) -> Result<String, XmlError> {
        let quote = match self.bytes.get(self.pos) {
            Some(q @ (b'"' | b'\'')) => *q,
            Some(_) => return Err(XmlError::Malformed(self.pos)),
            None => return Err(XmlError::UnexpectedEof),
        };
        self.pos += 1;
        let start = self.pos;
        while self.pos < self.bytes.len() && self.bytes[self.pos] != quote {
            self.pos += 1;
        }
        if self.pos >= self.bytes.len() {
            return Err(XmlError::UnexpectedEof);
        }
        let raw = &self.input[start..self.pos];
        self.pos += 1;
        decode_entities(raw)
    }

    fn read_text(&mut self) -> Result<String, XmlError> {
        let start = self.pos;
        while self.pos < self.bytes.len() && self.bytes[self.pos] != b'<' {
            self.pos += 1;
        }
        decode_entities(&self.input[start..self.pos])
    }

    fn read_cdata(&mut self) -> Result<String, XmlError> {
        self.pos += 9; // past "<![CDATA["
        let start = self.pos;
        while self.pos + 3 <= self.bytes.len() {
            if &self.bytes[self.pos..self.pos + 3] == b"]]>" {
                let raw = self.input[start..self.pos].to_string();
                self.pos += 3;
                return Ok(raw);
            }
            self.pos += 1;
        }
        Err(XmlError::UnexpectedEof)
    }

    fn skip_misc(&mut self) -> Result<(), XmlError> {
        loop {
            self.skip_whitespace();
            if self.starts_with(b"<?") {
                self.skip_until(b"?>")?;
            } else if self.starts_with(b"<!--") {
                self.skip_until(b"-->")?;
            } else if self.starts_with(b"<!DOCTYPE") {
                self.skip_doctype()?;
            } else {
                return Ok(());
            }
        }
    }

    fn skip_doctype(&mut self) -> Result<(), XmlError> {
        self.pos += 9; // past "<!DOCTYPE"
        let mut depth = 0usize;
        while self.pos < self.bytes.len() {
            match self.bytes[self.pos] {
                b'[' => depth += 1,
                b']' => depth = depth.saturating_sub(1),
                b'>' if depth == 0 => {
                    self.pos += 1;
                    return Ok(());
                }
                _ => {}
            }
            self.pos += 1;
        }
        Err(XmlError::UnexpectedEof)
    }

    fn skip_until(&mut self, end: &[u8]) -> Result<(), XmlError> {
        while self.pos + end.len() <= self.bytes.len() {
            if &self.bytes[self.pos..self.pos + end.len()] == end {
                self.pos += end.len();
                return Ok(());
            }
            self.pos += 1;
        }
        Err(XmlError::UnexpectedEof)
    }

    fn skip_whitespace(&mut self) {
        while self.pos < self.bytes.len() && self.bytes[self.pos].is_ascii_whitespace() {
            self.pos += 1;
        }
    }

    fn starts_with(&self, pattern: &[u8]) -> bool {
        self.bytes[self.pos..].starts_with(pattern)
    }

    fn expect(&mut self, byte: u8) -> Result<(), XmlError> {
        match self.bytes.get(self.pos) {
            Some(b) if *b == byte => {
                self.pos += 1;
                Ok(())
            }
            Some(_) => Err(XmlError::Malformed(self.pos)),
            None => Err(XmlError::UnexpectedEof),
        }
    }
}

fn is_name_byte(b: u8) -> bool {
    !b.is_ascii_whitespace() && !matches!(b, b'<' | b'>' | b'/' | b'=' | b'"' | b'\'' | b'&')
}

fn decode_entities(raw: &str) -> Result<String, XmlError> {
    if !raw.contains('&') {
        return Ok(raw.to_string());
    }
    let mut out = String::with_capacity(raw.len());
    let mut rest = raw;
    while let Some(amp) = rest.find('&') {
        out.push_str(&rest[..amp]);
        let after = &rest[amp + 1..];
        let semi = match after.find(';') {
            Some(i) => i,
            None => return Err(XmlError::UnknownEntity(after.chars().take(12).collect())),
        };
        let entity = &after[..semi];
        match entity {
            "amp" => out.push('&'),
            "lt" => out.push('<'),
            "gt" => out.push('>'),
            "apos" => out.push('\''),
            "quot" => out.push('"'),
            _ if entity.starts_with("#x") || entity.starts_with("#X") => {
                let code =
                    u32::from_str_radix(&entity[2..], 16).map_err(|_| XmlError::InvalidCharRef)?;
                out.push(char::from_u32(code).ok_or(XmlError::InvalidCharRef)?);
            }
            _ if entity.starts_with('#') => {
                let code: u32 = entity[1..].parse().map_err(|_| XmlError::InvalidCharRef)?;
                out.push(char::from_u32(code).ok_or(XmlError::InvalidCharRef)?);
            }
            _ => return Err(XmlError::UnknownEntity(entity.to_string())),
        }
        rest = &after[semi + 1..];
    }
    out.push_str(rest);
    Ok(out)
}
