//! XML well-formedness validation
//!
//! A full scan of the event stream without building the tree, used by
//! `--validate-only` and as a cheap pre-check. Reports the first problem
//! with its line and column.

use crate::error::{ParseError, ParseResult};
use crate::parser::{location_at, preview_at};
use quick_xml::events::Event;
use quick_xml::Reader;

/// Check that the input is a single well-formed XML document
pub fn validate_xml_structure(xml: &str) -> ParseResult<()> {
    let xml = xml.strip_prefix('\u{feff}').unwrap_or(xml);
    if xml.trim().is_empty() {
        return Err(ParseError::new("empty XML document".to_string(), None));
    }

    let mut reader = Reader::from_str(xml);
    reader.trim_text(true);

    let mut depth = 0usize;
    let mut roots = 0usize;
    loop {
        let position = reader.buffer_position();
        match reader.read_event() {
            Ok(Event::Start(start)) => {
                if depth == 0 {
                    roots += 1;
                    if roots > 1 {
                        return Err(error_at(xml, "multiple root elements", position));
                    }
                }
                for attribute in start.attributes() {
                    attribute.map_err(|e| {
                        error_at(xml, &format!("malformed attribute: {}", e), position)
                    })?;
                }
                depth += 1;
            }
            Ok(Event::Empty(start)) => {
                if depth == 0 {
                    roots += 1;
                    if roots > 1 {
                        return Err(error_at(xml, "multiple root elements", position));
                    }
                }
                for attribute in start.attributes() {
                    attribute.map_err(|e| {
                        error_at(xml, &format!("malformed attribute: {}", e), position)
                    })?;
                }
            }
            Ok(Event::End(_)) => {
                if depth == 0 {
                    return Err(error_at(
                        xml,
                        "closing tag without matching opening tag",
                        position,
                    ));
                }
                depth -= 1;
            }
            Ok(Event::Text(text)) => {
                if depth == 0 {
                    return Err(error_at(
                        xml,
                        "text content outside of the root element",
                        position,
                    ));
                }
                text.unescape().map_err(|e| {
                    error_at(xml, &format!("invalid text content: {}", e), position)
                })?;
            }
            Ok(Event::Eof) => break,
            Ok(_) => {}
            Err(e) => {
                return Err(error_at(xml, &e.to_string(), reader.buffer_position()));
            }
        }
    }

    if depth > 0 {
        return Err(ParseError::new(
            "unexpected end of document: unclosed element".to_string(),
            Some(location_at(xml, xml.len())),
        ));
    }
    if roots == 0 {
        return Err(ParseError::new("no root element found".to_string(), None));
    }
    Ok(())
}

fn error_at(xml: &str, message: &str, position: usize) -> ParseError {
    let (line, column) = location_at(xml, position);
    ParseError::new(message.to_string(), Some((line, column)))
        .with_preview(preview_at(xml, line, column))
}
