//! Event-driven XML tree builder
//!
//! Consumes the quick-xml event stream and builds the intermediate
//! representation handed to the JSON formatter: an insertion-ordered
//! `serde_json::Value` tree. The mapping convention is the conventional
//! one for XML-to-mapping conversion:
//!
//! - attribute keys carry a prefix marker (default `@`);
//! - text content of an element that also has attributes or children is
//!   stored under a sentinel key (default `#text`);
//! - repeated sibling tags collect into an array under the shared key,
//!   in document order;
//! - an element with no attributes, children, or text becomes `null`.
//!
//! All attribute and text values stay strings; nothing is coerced to
//! numbers or booleans.

use crate::error::{ParseError, ParseResult};
use crate::parser::{location_at, preview_at};
use quick_xml::events::{BytesStart, Event};
use quick_xml::Reader;
use serde_json::{Map, Value};

/// Naming convention and limits for the XML to mapping conversion
#[derive(Debug, Clone, PartialEq)]
pub struct TreeOptions {
    /// Prefix distinguishing attribute keys from child element keys
    pub attribute_prefix: String,
    /// Key holding text content of elements that also carry attributes or children
    pub text_key: String,
    /// Maximum element nesting depth
    pub max_depth: usize,
}

impl Default for TreeOptions {
    fn default() -> Self {
        Self {
            attribute_prefix: "@".to_string(),
            text_key: "#text".to_string(),
            max_depth: 1000,
        }
    }
}

/// A parsed XML document together with counters gathered during the build
#[derive(Debug, Clone)]
pub struct ParsedDocument {
    /// The intermediate representation: one top-level key for the root element
    pub value: Value,
    pub element_count: usize,
    pub attribute_count: usize,
    pub max_depth: usize,
}

/// Parse a complete XML document into its intermediate representation
pub fn parse_document(xml: &str, options: &TreeOptions) -> ParseResult<ParsedDocument> {
    // A leading BOM would otherwise show up as stray text before the root
    let xml = xml.strip_prefix('\u{feff}').unwrap_or(xml);
    if xml.trim().is_empty() {
        return Err(ParseError::new("empty XML document".to_string(), None));
    }

    let mut reader = Reader::from_str(xml);
    reader.trim_text(true);

    let mut builder = TreeBuilder::new(xml, options);
    loop {
        let position = reader.buffer_position();
        match reader.read_event() {
            Ok(Event::Start(start)) => builder.open_element(&start, position)?,
            Ok(Event::Empty(start)) => {
                builder.open_element(&start, position)?;
                builder.close_element(position)?;
            }
            Ok(Event::End(_)) => builder.close_element(position)?,
            Ok(Event::Text(text)) => {
                let unescaped = text.unescape().map_err(|e| {
                    builder.error_at(format!("invalid text content: {}", e), position)
                })?;
                builder.append_text(&unescaped, position)?;
            }
            Ok(Event::CData(data)) => {
                let bytes = data.into_inner();
                let text = String::from_utf8_lossy(&bytes).into_owned();
                builder.append_cdata(&text, position)?;
            }
            Ok(Event::Decl(_) | Event::Comment(_) | Event::PI(_) | Event::DocType(_)) => {}
            Ok(Event::Eof) => break,
            Err(e) => {
                return Err(builder.error_at(e.to_string(), reader.buffer_position()));
            }
        }
    }
    builder.finish()
}

/// An element whose closing tag has not been seen yet
struct OpenElement {
    name: String,
    map: Map<String, Value>,
    text: String,
    has_children: bool,
    has_attributes: bool,
}

impl OpenElement {
    fn new(name: String) -> Self {
        Self {
            name,
            map: Map::new(),
            text: String::new(),
            has_children: false,
            has_attributes: false,
        }
    }

    /// Collapse this element into its mapped value
    fn into_value(self, text_key: &str) -> (String, Value) {
        let OpenElement {
            name,
            mut map,
            text,
            has_children,
            has_attributes,
        } = self;

        let value = if !has_children && !has_attributes {
            if text.is_empty() {
                Value::Null
            } else {
                Value::String(text)
            }
        } else {
            if !text.is_empty() {
                map.insert(text_key.to_string(), Value::String(text));
            }
            Value::Object(map)
        };

        (name, value)
    }
}

struct TreeBuilder<'a> {
    source: &'a str,
    options: &'a TreeOptions,
    /// Open elements; index 0 is a synthetic document frame holding the root
    stack: Vec<OpenElement>,
    element_count: usize,
    attribute_count: usize,
    max_depth: usize,
}

impl<'a> TreeBuilder<'a> {
    fn new(source: &'a str, options: &'a TreeOptions) -> Self {
        Self {
            source,
            options,
            stack: vec![OpenElement::new(String::new())],
            element_count: 0,
            attribute_count: 0,
            max_depth: 0,
        }
    }

    fn open_element(&mut self, start: &BytesStart<'_>, position: usize) -> ParseResult<()> {
        let depth = self.stack.len();
        if depth > self.options.max_depth {
            return Err(self.error_at(
                format!(
                    "maximum nesting depth exceeded: {}",
                    self.options.max_depth
                ),
                position,
            ));
        }
        if depth == 1 && !self.stack[0].map.is_empty() {
            return Err(self.error_at("multiple root elements".to_string(), position));
        }

        let name = self.decode(start.name().as_ref(), position)?;
        let mut element = OpenElement::new(name);

        for attribute in start.attributes() {
            let attribute = attribute
                .map_err(|e| self.error_at(format!("malformed attribute: {}", e), position))?;
            let key = self.decode(attribute.key.as_ref(), position)?;
            let value = attribute
                .unescape_value()
                .map_err(|e| self.error_at(format!("invalid attribute value: {}", e), position))?
                .into_owned();
            element.map.insert(
                format!("{}{}", self.options.attribute_prefix, key),
                Value::String(value),
            );
            element.has_attributes = true;
            self.attribute_count += 1;
        }

        self.element_count += 1;
        self.max_depth = self.max_depth.max(depth);
        self.stack.push(element);
        Ok(())
    }

    fn close_element(&mut self, position: usize) -> ParseResult<()> {
        // quick-xml already rejects mismatched closing tag names; this
        // guards a closing tag with no opening tag at all.
        if self.stack.len() <= 1 {
            return Err(self.error_at(
                "closing tag without matching opening tag".to_string(),
                position,
            ));
        }
        let element = match self.stack.pop() {
            Some(element) => element,
            None => {
                return Err(self.error_at("unbalanced document".to_string(), position));
            }
        };

        let (name, value) = element.into_value(&self.options.text_key);
        if let Some(parent) = self.stack.last_mut() {
            parent.has_children = true;
            insert_child(&mut parent.map, name, value);
        }
        Ok(())
    }

    fn append_text(&mut self, text: &str, position: usize) -> ParseResult<()> {
        if text.is_empty() {
            return Ok(());
        }
        if self.stack.len() <= 1 {
            return Err(self.error_at(
                "text content outside of the root element".to_string(),
                position,
            ));
        }
        if let Some(element) = self.stack.last_mut() {
            element.text.push_str(text);
        }
        Ok(())
    }

    /// CDATA is literal character data; it joins the surrounding text unescaped
    fn append_cdata(&mut self, text: &str, position: usize) -> ParseResult<()> {
        self.append_text(text, position)
    }

    fn finish(mut self) -> ParseResult<ParsedDocument> {
        if self.stack.len() > 1 {
            let unclosed = self
                .stack
                .last()
                .map(|element| element.name.clone())
                .unwrap_or_default();
            return Err(self.error_at(
                format!("unexpected end of document: unclosed element <{}>", unclosed),
                self.source.len(),
            ));
        }
        let document = match self.stack.pop() {
            Some(document) => document,
            None => {
                return Err(ParseError::new("unbalanced document".to_string(), None));
            }
        };
        if document.map.is_empty() {
            return Err(ParseError::new("no root element found".to_string(), None));
        }

        Ok(ParsedDocument {
            value: Value::Object(document.map),
            element_count: self.element_count,
            attribute_count: self.attribute_count,
            max_depth: self.max_depth,
        })
    }

    fn decode(&self, bytes: &[u8], position: usize) -> ParseResult<String> {
        std::str::from_utf8(bytes)
            .map(str::to_owned)
            .map_err(|e| self.error_at(format!("invalid UTF-8 in name: {}", e), position))
    }

    fn error_at(&self, message: String, position: usize) -> ParseError {
        let (line, column) = location_at(self.source, position);
        ParseError::new(message, Some((line, column)))
            .with_preview(preview_at(self.source, line, column))
    }
}

/// Insert a completed child under its tag name, promoting repeated sibling
/// tags to an array. Element values are never arrays themselves, so an
/// existing array under the key always means earlier same-named siblings.
fn insert_child(map: &mut Map<String, Value>, name: String, value: Value) {
    match map.get_mut(&name) {
        Some(Value::Array(items)) => items.push(value),
        Some(existing) => {
            let first = existing.take();
            *existing = Value::Array(vec![first, value]);
        }
        None => {
            map.insert(name, value);
        }
    }
}
