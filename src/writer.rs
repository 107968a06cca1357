//! XML serialization
//!
//! Pre-order emission of a validated element tree: attributes in schema
//! declaration order, children in document order (insertion order while
//! `xsd_check` is disabled), text content inline, empty elements
//! self-closed, two-space indentation per depth by default. The output
//! matches what common scorewriters export.

use crate::element::XmlElement;

/// Serialization options
#[derive(Debug, Clone)]
pub struct WriteOptions {
    /// Indentation width per depth level
    pub indent: usize,
    /// Whether to emit the `<?xml ...?>` header
    pub xml_declaration: bool,
}

impl Default for WriteOptions {
    fn default() -> Self {
        Self {
            indent: 2,
            xml_declaration: true,
        }
    }
}

/// The XML declaration emitted when requested
pub const XML_DECLARATION: &str = "<?xml version=\"1.0\" encoding=\"UTF-8\"?>";

/// Serialize a tree; the caller is responsible for running final checks
pub(crate) fn serialize_tree(root: &XmlElement, options: &WriteOptions) -> String {
    let mut out = String::new();
    if options.xml_declaration {
        out.push_str(XML_DECLARATION);
        out.push('\n');
    }
    emit(root, 0, options, &mut out);
    out.push('\n');
    out
}

fn emit(element: &XmlElement, depth: usize, options: &WriteOptions, out: &mut String) {
    let pad = " ".repeat(options.indent * depth);
    out.push_str(&pad);
    out.push('<');
    out.push_str(element.name());
    for (name, value) in element.attributes() {
        out.push(' ');
        out.push_str(&name);
        out.push_str("=\"");
        out.push_str(&escape_attribute(&value.to_xml_text()));
        out.push('"');
    }

    let children = element.output_children();
    let value = element.value();

    if children.is_empty() && value.is_none() {
        out.push_str(" />");
        return;
    }

    out.push('>');
    if children.is_empty() {
        if let Some(value) = value {
            out.push_str(&escape_text(&value.to_xml_text()));
        }
        out.push_str("</");
        out.push_str(element.name());
        out.push('>');
        return;
    }

    if let Some(value) = value {
        // rare mixed content: text line before the children
        out.push('\n');
        out.push_str(&" ".repeat(options.indent * (depth + 1)));
        out.push_str(&escape_text(&value.to_xml_text()));
    }
    for child in &children {
        out.push('\n');
        emit(child, depth + 1, options, out);
    }
    out.push('\n');
    out.push_str(&pad);
    out.push_str("</");
    out.push_str(element.name());
    out.push('>');
}

fn escape_text(text: &str) -> String {
    text.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
}

fn escape_attribute(text: &str) -> String {
    escape_text(text).replace('"', "&quot;")
}
