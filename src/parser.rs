//! MusicXML parsing
//!
//! Bridges XML events onto element construction: every start tag becomes
//! an [`XmlElement`], attributes and text flow through the same
//! validators as programmatic input, and each completed element is
//! attached to its parent through the ordinary `add_child` path. Because
//! the writer's ordering matches the schema ordering, round-tripping a
//! valid document is structure-preserving modulo whitespace.
//!
//! All failures surface as [`crate::error::Error::Parse`] carrying the
//! element path and the byte offset in the input.

use std::path::Path;

use quick_xml::events::Event;
use quick_xml::Reader;

use crate::element::XmlElement;
use crate::error::{Error, ParseError, Result};

/// Parsing options
#[derive(Debug, Clone)]
pub struct ParseOptions {
    /// Whether constructed elements keep schema checking enabled
    pub xsd_check: bool,
}

impl Default for ParseOptions {
    fn default() -> Self {
        Self { xsd_check: true }
    }
}

/// Parse a MusicXML file into an element tree
pub fn parse_musicxml(path: impl AsRef<Path>) -> Result<XmlElement> {
    parse_musicxml_with(path, &ParseOptions::default())
}

/// Parse a MusicXML file with explicit options
pub fn parse_musicxml_with(path: impl AsRef<Path>, options: &ParseOptions) -> Result<XmlElement> {
    let text = std::fs::read_to_string(path)?;
    parse_musicxml_str_with(&text, options)
}

/// Parse MusicXML text into an element tree
pub fn parse_musicxml_str(text: &str) -> Result<XmlElement> {
    parse_musicxml_str_with(text, &ParseOptions::default())
}

/// Parse MusicXML text with explicit options
pub fn parse_musicxml_str_with(text: &str, options: &ParseOptions) -> Result<XmlElement> {
    let mut reader = Reader::from_str(text);
    reader.trim_text(true);

    let mut stack: Vec<XmlElement> = Vec::new();
    let mut root: Option<XmlElement> = None;

    loop {
        let offset = reader.buffer_position() as u64;
        match reader.read_event() {
            Ok(Event::Start(start)) => {
                let element = open_element(start.local_name().as_ref(), &stack, offset, options)?;
                set_attributes(&element, &start, &stack, offset)?;
                stack.push(element);
            }
            Ok(Event::Empty(start)) => {
                let element = open_element(start.local_name().as_ref(), &stack, offset, options)?;
                set_attributes(&element, &start, &stack, offset)?;
                close_element(element, &mut stack, &mut root, offset)?;
            }
            Ok(Event::Text(t)) => {
                let text = t
                    .unescape()
                    .map_err(|e| parse_error(e.to_string(), &stack, offset))?;
                set_text(text.trim(), &stack, offset)?;
            }
            Ok(Event::CData(t)) => {
                let text = String::from_utf8_lossy(&t.into_inner()).into_owned();
                set_text(&text, &stack, offset)?;
            }
            Ok(Event::End(_)) => {
                let element = stack
                    .pop()
                    .ok_or_else(|| parse_error("unexpected closing tag", &stack, offset))?;
                close_element(element, &mut stack, &mut root, offset)?;
            }
            Ok(Event::Eof) => break,
            Ok(_) => {} // declaration, comments, processing instructions
            Err(e) => return Err(parse_error(e.to_string(), &stack, offset)),
        }
    }

    if !stack.is_empty() {
        return Err(parse_error(
            "unexpected end of document",
            &stack,
            reader.buffer_position() as u64,
        ));
    }
    let root = root.ok_or_else(|| parse_error("document has no root element", &stack, 0))?;
    log::debug!("parsed '{}' document", root.name());
    Ok(root)
}

fn open_element(
    raw_name: &[u8],
    stack: &[XmlElement],
    offset: u64,
    options: &ParseOptions,
) -> Result<XmlElement> {
    let name = std::str::from_utf8(raw_name)
        .map_err(|_| parse_error("element name is not valid UTF-8", stack, offset))?;
    let element = XmlElement::new(name).map_err(|e| parse_error(e.to_string(), stack, offset))?;
    element.set_xsd_check(options.xsd_check);
    Ok(element)
}

fn set_attributes(
    element: &XmlElement,
    start: &quick_xml::events::BytesStart<'_>,
    stack: &[XmlElement],
    offset: u64,
) -> Result<()> {
    for attr in start.attributes() {
        let attr = attr.map_err(|e| parse_error(e.to_string(), stack, offset))?;
        let key = std::str::from_utf8(attr.key.as_ref())
            .map_err(|_| parse_error("attribute name is not valid UTF-8", stack, offset))?;
        let value = attr
            .unescape_value()
            .map_err(|e| parse_error(e.to_string(), stack, offset))?;
        element
            .set_attribute(key, value.as_ref())
            .map_err(|e| parse_error(e.to_string(), stack, offset))?;
    }
    Ok(())
}

fn set_text(text: &str, stack: &[XmlElement], offset: u64) -> Result<()> {
    if text.is_empty() {
        return Ok(());
    }
    let element = stack
        .last()
        .ok_or_else(|| parse_error("text outside of the root element", stack, offset))?;
    element
        .set_value(text)
        .map_err(|e| parse_error(e.to_string(), stack, offset))
}

fn close_element(
    element: XmlElement,
    stack: &mut Vec<XmlElement>,
    root: &mut Option<XmlElement>,
    offset: u64,
) -> Result<()> {
    match stack.last() {
        Some(parent) => {
            parent
                .add_child(element)
                .map_err(|e| parse_error(e.to_string(), stack, offset))?;
        }
        None => {
            if root.is_some() {
                return Err(parse_error("multiple root elements", stack, offset));
            }
            *root = Some(element);
        }
    }
    Ok(())
}

fn parse_error(message: impl Into<String>, stack: &[XmlElement], offset: u64) -> Error {
    let path = if stack.is_empty() {
        "/".to_string()
    } else {
        stack
            .iter()
            .map(|e| format!("/{}", e.name()))
            .collect::<String>()
    };
    Error::Parse(
        ParseError::new(message)
            .with_path(path)
            .with_offset(offset),
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_pitch() {
        let tree = parse_musicxml_str("<pitch>\n  <step>G</step>\n  <octave>3</octave>\n</pitch>")
            .unwrap();
        assert_eq!(tree.name(), "pitch");
        let names: Vec<_> = tree.get_children(true).iter().map(|c| c.name()).collect();
        assert_eq!(names, vec!["step", "octave"]);
    }

    #[test]
    fn test_parse_coerces_values() {
        let tree = parse_musicxml_str("<pitch><step>G</step><octave>3</octave></pitch>").unwrap();
        assert_eq!(
            tree.child("octave").unwrap().value(),
            Some(crate::schema::XmlValue::Integer(3))
        );
    }

    #[test]
    fn test_parse_attributes() {
        let tree =
            parse_musicxml_str(r#"<part-name font-family="Arial" justify="left">Flute</part-name>"#)
                .unwrap();
        assert_eq!(
            tree.attribute("justify"),
            Some(crate::schema::XmlValue::String("left".to_string()))
        );
    }

    #[test]
    fn test_parse_unknown_element() {
        let err = parse_musicxml_str("<bogus/>").unwrap_err();
        assert!(matches!(err, Error::Parse(_)));
        assert!(err.to_string().contains("bogus"));
    }

    #[test]
    fn test_parse_bad_value_reports_path() {
        let err = parse_musicxml_str("<pitch><step>H</step></pitch>").unwrap_err();
        match err {
            Error::Parse(parse) => {
                assert_eq!(parse.path.as_deref(), Some("/pitch/step"));
                assert!(parse.offset.is_some());
            }
            other => panic!("unexpected error: {:?}", other),
        }
    }

    #[test]
    fn test_parse_misplaced_child() {
        let err = parse_musicxml_str("<pitch><fifths>3</fifths></pitch>").unwrap_err();
        assert!(err.to_string().contains("not allowed"));
    }

    #[test]
    fn test_parse_misplaced_child_accepted_unchecked() {
        let options = ParseOptions { xsd_check: false };
        let tree =
            parse_musicxml_str_with("<pitch><fifths>3</fifths></pitch>", &options).unwrap();
        assert_eq!(tree.get_children(true).len(), 1);
    }

    #[test]
    fn test_parse_truncated_document() {
        let err = parse_musicxml_str("<pitch><step>G</step>").unwrap_err();
        assert!(err.to_string().contains("unexpected end of document"));
    }

    #[test]
    fn test_parse_xml_declaration_and_comments() {
        let text = "<?xml version=\"1.0\" encoding=\"UTF-8\"?>\n<!-- a comment -->\n<chord />";
        let tree = parse_musicxml_str(text).unwrap();
        assert_eq!(tree.name(), "chord");
    }
}
