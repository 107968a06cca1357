//! XSD complex-type descriptors
//!
//! A [`ComplexTypeDef`] binds an element to its declaration-ordered
//! attribute list, its content-model root particle, and — for elements
//! carrying text alongside attributes — the simple type of that text.
//!
//! Reference: https://www.w3.org/TR/xmlschema11-1/#Complex_Type_Definitions

use crate::schema::particles::Particle;

/// An attribute declared for a complex type
#[derive(Debug, Clone)]
pub struct AttributeDecl {
    /// Attribute name as it appears in XML
    pub name: &'static str,
    /// Name of the simple type validating the attribute value
    pub type_ref: &'static str,
    /// Whether use="required"
    pub required: bool,
    /// Declared default value, if any
    pub default: Option<&'static str>,
}

impl AttributeDecl {
    /// Optional attribute
    pub fn new(name: &'static str, type_ref: &'static str) -> Self {
        Self {
            name,
            type_ref,
            required: false,
            default: None,
        }
    }

    /// Required attribute
    pub fn required(name: &'static str, type_ref: &'static str) -> Self {
        Self {
            name,
            type_ref,
            required: true,
            default: None,
        }
    }

    /// Attach a declared default
    pub fn with_default(mut self, default: &'static str) -> Self {
        self.default = Some(default);
        self
    }
}

/// A complex type from the schema table
#[derive(Debug, Clone)]
pub struct ComplexTypeDef {
    /// Type name (matches the element name for anonymous inline types,
    /// which is how the table generator hoists them)
    pub name: &'static str,
    /// Attribute declarations in schema order
    pub attributes: Vec<AttributeDecl>,
    /// Root of the content model; None for empty or simple content
    pub content: Option<Particle>,
    /// Simple type of the text content, for simple-content types
    pub simple_content: Option<&'static str>,
}

impl ComplexTypeDef {
    /// Type with element content
    pub fn with_content(name: &'static str, content: Particle) -> Self {
        Self {
            name,
            attributes: Vec::new(),
            content: Some(content),
            simple_content: None,
        }
    }

    /// Type with simple (text) content
    pub fn with_simple_content(name: &'static str, simple_content: &'static str) -> Self {
        Self {
            name,
            attributes: Vec::new(),
            content: None,
            simple_content: Some(simple_content),
        }
    }

    /// Type with neither text nor children
    pub fn empty(name: &'static str) -> Self {
        Self {
            name,
            attributes: Vec::new(),
            content: None,
            simple_content: None,
        }
    }

    /// Append attribute declarations (builder, declaration order preserved)
    pub fn with_attributes(mut self, attributes: Vec<AttributeDecl>) -> Self {
        self.attributes.extend(attributes);
        self
    }

    /// Look up an attribute declaration by name
    pub fn attribute(&self, name: &str) -> Option<&AttributeDecl> {
        self.attributes.iter().find(|a| a.name == name)
    }

    /// Position of an attribute in declaration order
    pub fn attribute_index(&self, name: &str) -> Option<usize> {
        self.attributes.iter().position(|a| a.name == name)
    }
}
