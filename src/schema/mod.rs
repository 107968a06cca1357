//! Compiled-in MusicXML schema metadata
//!
//! The schema table is built once, on first use, from the generated
//! tables in [`tables`] and never mutated afterwards. Every lookup is by
//! string name. A name that is referenced by the tables but absent from
//! them is a bug in the generator output, not a user error, and panics.

use std::collections::HashMap;

use once_cell::sync::Lazy;

pub mod complex_types;
pub mod particles;
pub mod simple_types;
mod tables;

pub use complex_types::{AttributeDecl, ComplexTypeDef};
pub use particles::{Occurs, Particle, ParticleKind};
pub use simple_types::{FacetSet, Primitive, SimpleTypeDef, SimpleTypeKind, XmlValue};

use crate::error::Result;

/// How an element binds to its type
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TypeRef {
    /// The element's content is a bare simple type (text only, no attributes)
    Simple(&'static str),
    /// The element has a complex type (attributes and/or children)
    Complex(&'static str),
}

/// An element declaration hoisted from the XSD
#[derive(Debug, Clone)]
pub struct ElementDecl {
    /// Element name as it appears in documents
    pub name: &'static str,
    /// Binding to the validating type
    pub type_ref: TypeRef,
}

/// Process-wide, immutable schema metadata
#[derive(Debug, Default)]
pub struct SchemaTable {
    elements: HashMap<&'static str, ElementDecl>,
    complex_types: HashMap<&'static str, ComplexTypeDef>,
    simple_types: HashMap<&'static str, SimpleTypeDef>,
    groups: HashMap<&'static str, Particle>,
}

static SCHEMA: Lazy<SchemaTable> = Lazy::new(|| {
    let table = tables::build();
    log::debug!(
        "schema table initialized: {} elements, {} complex types, {} simple types, {} groups",
        table.elements.len(),
        table.complex_types.len(),
        table.simple_types.len(),
        table.groups.len()
    );
    table
});

/// The process-wide schema table
pub fn schema() -> &'static SchemaTable {
    &SCHEMA
}

impl SchemaTable {
    /// Look up an element declaration, or None if the name is not declared
    pub fn element(&self, name: &str) -> Option<&ElementDecl> {
        self.elements.get(name)
    }

    /// Look up a complex type; panics on a dangling reference
    pub fn complex_type(&self, name: &str) -> &ComplexTypeDef {
        self.complex_types
            .get(name)
            .unwrap_or_else(|| panic!("schema table: undefined complex type '{}'", name))
    }

    /// Look up a simple type; panics on a dangling reference
    pub fn simple_type(&self, name: &str) -> &SimpleTypeDef {
        self.simple_types
            .get(name)
            .unwrap_or_else(|| panic!("schema table: undefined simple type '{}'", name))
    }

    /// Look up a named model group; panics on a dangling reference
    pub fn group(&self, name: &str) -> &Particle {
        self.groups
            .get(name)
            .unwrap_or_else(|| panic!("schema table: undefined group '{}'", name))
    }

    /// Validate a scalar against a named simple type, returning the
    /// normalized value
    pub fn validate_simple(&self, type_name: &str, value: &XmlValue) -> Result<XmlValue> {
        self.simple_type(type_name).validate(self, value)
    }

    /// All declared element names, for diagnostics
    pub fn element_names(&self) -> impl Iterator<Item = &'static str> + '_ {
        self.elements.keys().copied()
    }

    pub(crate) fn insert_element(&mut self, decl: ElementDecl) {
        self.elements.insert(decl.name, decl);
    }

    pub(crate) fn insert_complex_type(&mut self, def: ComplexTypeDef) {
        self.complex_types.insert(def.name, def);
    }

    pub(crate) fn insert_simple_type(&mut self, def: SimpleTypeDef) {
        self.simple_types.insert(def.name, def);
    }

    pub(crate) fn insert_group(&mut self, name: &'static str, root: Particle) {
        self.groups.insert(name, root);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_known_elements_present() {
        let table = schema();
        for name in ["score-partwise", "pitch", "step", "octave", "note", "part-list"] {
            assert!(table.element(name).is_some(), "missing element '{}'", name);
        }
    }

    #[test]
    fn test_unknown_element_is_none() {
        assert!(schema().element("no-such-element").is_none());
    }

    #[test]
    fn test_element_type_bindings() {
        let table = schema();
        match table.element("pitch").unwrap().type_ref {
            TypeRef::Complex(name) => assert_eq!(name, "pitch"),
            other => panic!("unexpected binding: {:?}", other),
        }
        match table.element("step").unwrap().type_ref {
            TypeRef::Simple(name) => assert_eq!(name, "step"),
            other => panic!("unexpected binding: {:?}", other),
        }
    }

    #[test]
    fn test_group_lookup() {
        let table = schema();
        let root = table.group("music-data");
        assert!(matches!(root.kind, ParticleKind::Sequence(_)));
        assert!(matches!(
            root.branches()[0].kind,
            ParticleKind::Choice(_)
        ));
    }

    #[test]
    #[should_panic(expected = "undefined simple type")]
    fn test_dangling_simple_type_panics() {
        schema().simple_type("no-such-type");
    }
}
