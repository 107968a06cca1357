//! MusicXML element nodes
//!
//! [`XmlElement`] is the public entity of the crate: a named node with a
//! typed value, validated attributes, an ordered child list, and — for
//! element content — a live content-model container that decides where
//! children may legally attach.
//!
//! An `XmlElement` is a cheap handle (`Rc`) to the underlying node;
//! `clone()` shares the node, [`XmlElement::deep_copy`] rebuilds an
//! independent subtree. A parent exclusively owns its children; a child
//! holds only a weak back-reference to its parent.

use std::cell::RefCell;
use std::collections::HashMap;
use std::fmt;
use std::path::Path;
use std::rc::{Rc, Weak};

use crate::container::ChildContainer;
use crate::error::{Error, Result};
use crate::schema::{schema, ComplexTypeDef, ElementDecl, TypeRef, XmlValue};
use crate::writer::{self, WriteOptions};

struct ElementData {
    decl: &'static ElementDecl,
    value: Option<XmlValue>,
    /// Validated attributes in set order; serialization re-orders by
    /// declaration index
    attributes: Vec<(String, XmlValue)>,
    /// Children in the order `add_child` accepted them
    unordered_children: Vec<XmlElement>,
    parent: Weak<RefCell<ElementData>>,
    container: Option<ChildContainer>,
    xsd_check: bool,
}

/// A node of a MusicXML document tree
#[derive(Clone)]
pub struct XmlElement {
    data: Rc<RefCell<ElementData>>,
}

impl XmlElement {
    // -------------------------------------------------------------------------
    // Construction
    // -------------------------------------------------------------------------

    /// Create an element by its declared name, e.g. `"pitch"`
    pub fn new(name: &str) -> Result<Self> {
        let decl = schema().element(name).ok_or_else(|| Error::UnknownElement {
            name: name.to_string(),
        })?;
        Ok(Self::from_decl(decl))
    }

    /// Create an element and set its validated value in one step
    pub fn new_with_value(name: &str, value: impl Into<XmlValue>) -> Result<Self> {
        let element = Self::new(name)?;
        element.set_value(value)?;
        Ok(element)
    }

    fn from_decl(decl: &'static ElementDecl) -> Self {
        let container = match decl.type_ref {
            TypeRef::Complex(type_name) => {
                let def = schema().complex_type(type_name);
                def.content.as_ref().map(ChildContainer::new)
            }
            TypeRef::Simple(_) => None,
        };
        Self {
            data: Rc::new(RefCell::new(ElementData {
                decl,
                value: None,
                attributes: Vec::new(),
                unordered_children: Vec::new(),
                parent: Weak::new(),
                container,
                xsd_check: true,
            })),
        }
    }

    /// Builder-style attribute setter for construction chains
    pub fn with_attribute(self, name: &str, value: impl Into<XmlValue>) -> Result<Self> {
        self.set_attribute(name, value)?;
        Ok(self)
    }

    /// Builder-style `xsd_check` setter for construction chains
    pub fn with_xsd_check(self, xsd_check: bool) -> Self {
        self.set_xsd_check(xsd_check);
        self
    }

    // -------------------------------------------------------------------------
    // Identity and basics
    // -------------------------------------------------------------------------

    /// The element name as it appears in documents
    pub fn name(&self) -> &'static str {
        self.data.borrow().decl.name
    }

    /// Whether schema checking is active for this element (default true)
    pub fn xsd_check(&self) -> bool {
        self.data.borrow().xsd_check
    }

    /// Enable or disable schema checking on add/remove and final checks
    pub fn set_xsd_check(&self, xsd_check: bool) {
        self.data.borrow_mut().xsd_check = xsd_check;
    }

    /// The parent element, while it is still alive
    pub fn parent(&self) -> Option<XmlElement> {
        self.data
            .borrow()
            .parent
            .upgrade()
            .map(|data| XmlElement { data })
    }

    /// True when both handles refer to the same node
    pub(crate) fn same_node(&self, other: &XmlElement) -> bool {
        Rc::ptr_eq(&self.data, &other.data)
    }

    fn complex_type(&self) -> Option<&'static ComplexTypeDef> {
        match self.data.borrow().decl.type_ref {
            TypeRef::Complex(type_name) => Some(schema().complex_type(type_name)),
            TypeRef::Simple(_) => None,
        }
    }

    /// The simple type validating this element's text content, if any
    fn value_type(&self) -> Option<&'static str> {
        match self.data.borrow().decl.type_ref {
            TypeRef::Simple(type_name) => Some(type_name),
            TypeRef::Complex(type_name) => schema().complex_type(type_name).simple_content,
        }
    }

    // -------------------------------------------------------------------------
    // Value
    // -------------------------------------------------------------------------

    /// The element's validated value, if set
    pub fn value(&self) -> Option<XmlValue> {
        self.data.borrow().value.clone()
    }

    /// Validate and set the element's value
    pub fn set_value(&self, value: impl Into<XmlValue>) -> Result<()> {
        let value = value.into();
        let type_name = self.value_type().ok_or_else(|| Error::BadValue {
            type_name: self.name().to_string(),
            value: value.to_xml_text(),
            reason: "element does not allow text content".to_string(),
        })?;
        let normalized = schema().validate_simple(type_name, &value)?;
        self.data.borrow_mut().value = Some(normalized);
        Ok(())
    }

    /// Remove the element's value
    pub fn clear_value(&self) {
        self.data.borrow_mut().value = None;
    }

    // -------------------------------------------------------------------------
    // Attributes
    // -------------------------------------------------------------------------

    /// Validate and set an attribute; unknown names are rejected
    pub fn set_attribute(&self, name: &str, value: impl Into<XmlValue>) -> Result<()> {
        let def = self.complex_type().ok_or_else(|| Error::UnknownAttribute {
            element: self.name().to_string(),
            attribute: name.to_string(),
        })?;
        let decl = def.attribute(name).ok_or_else(|| Error::UnknownAttribute {
            element: self.name().to_string(),
            attribute: name.to_string(),
        })?;
        let normalized = schema().validate_simple(decl.type_ref, &value.into())?;

        let mut data = self.data.borrow_mut();
        if let Some(slot) = data.attributes.iter_mut().find(|(n, _)| n == name) {
            slot.1 = normalized;
        } else {
            data.attributes.push((name.to_string(), normalized));
        }
        Ok(())
    }

    /// Remove an attribute; unknown names are rejected
    pub fn clear_attribute(&self, name: &str) -> Result<()> {
        let known = self
            .complex_type()
            .map(|def| def.attribute(name).is_some())
            .unwrap_or(false);
        if !known {
            return Err(Error::UnknownAttribute {
                element: self.name().to_string(),
                attribute: name.to_string(),
            });
        }
        self.data.borrow_mut().attributes.retain(|(n, _)| n != name);
        Ok(())
    }

    /// Read an attribute value
    pub fn attribute(&self, name: &str) -> Option<XmlValue> {
        self.data
            .borrow()
            .attributes
            .iter()
            .find(|(n, _)| n == name)
            .map(|(_, v)| v.clone())
    }

    /// Attributes in declaration order, as emitted by the serializer
    pub fn attributes(&self) -> Vec<(String, XmlValue)> {
        let data = self.data.borrow();
        let mut attrs = data.attributes.clone();
        if let Some(def) = self.complex_type() {
            attrs.sort_by_key(|(name, _)| def.attribute_index(name).unwrap_or(usize::MAX));
        }
        attrs
    }

    // -------------------------------------------------------------------------
    // Children
    // -------------------------------------------------------------------------

    /// Attach a child at the first legal placement in the content model.
    ///
    /// Children must arrive in content-model order: a child cannot be
    /// placed past a required particle that is still unsatisfied, so add
    /// calls follow the schema's document order (optional particles may
    /// be skipped and filled in later).
    ///
    /// With `xsd_check` disabled the child is appended without any check.
    /// Returns the child handle for chaining.
    pub fn add_child(&self, child: XmlElement) -> Result<XmlElement> {
        self.add_child_forward(child, 0)
    }

    /// Attach a child, skipping the first `forward` name-matching leaves
    /// of the content model.
    ///
    /// The escape hatch for content models with several leaves for the
    /// same element name, where the caller wants a specific slot instead
    /// of the first one placement finds; `forward` counts name-matching
    /// leaves in traversal order.
    pub fn add_child_forward(&self, child: XmlElement, forward: usize) -> Result<XmlElement> {
        let element_name = self.name();
        if self.xsd_check() {
            let mut data = self.data.borrow_mut();
            match data.container {
                Some(ref mut container) => {
                    container
                        .try_attach(&child, forward)
                        .map_err(|reason| Error::ChildNotAllowed {
                            element: element_name.to_string(),
                            child: child.name().to_string(),
                            reason,
                        })?;
                }
                None => {
                    return Err(Error::ChildNotAllowed {
                        element: element_name.to_string(),
                        child: child.name().to_string(),
                        reason: "element cannot have children".to_string(),
                    })
                }
            }
        }
        let mut data = self.data.borrow_mut();
        data.unordered_children.push(child.clone());
        child.data.borrow_mut().parent = Rc::downgrade(&self.data);
        Ok(child)
    }

    /// Detach a child from this element and its container
    pub fn remove(&self, child: &XmlElement) -> Result<()> {
        let element_name = self.name();
        let mut data = self.data.borrow_mut();
        let pos = data
            .unordered_children
            .iter()
            .position(|c| c.same_node(child))
            .ok_or_else(|| Error::ChildNotAllowed {
                element: element_name.to_string(),
                child: child.name().to_string(),
                reason: "not currently attached to this element".to_string(),
            })?;
        data.unordered_children.remove(pos);
        if let Some(ref mut container) = data.container {
            container.remove(child);
        }
        drop(data);
        child.data.borrow_mut().parent = Weak::new();
        Ok(())
    }

    /// Atomically replace `old` with `new`; on failure the tree is left
    /// as it was
    pub fn replace_child(&self, old: &XmlElement, new: XmlElement) -> Result<XmlElement> {
        let pos = self
            .data
            .borrow()
            .unordered_children
            .iter()
            .position(|c| c.same_node(old))
            .ok_or_else(|| Error::ChildNotAllowed {
                element: self.name().to_string(),
                child: old.name().to_string(),
                reason: "not currently attached to this element".to_string(),
            })?;

        self.remove(old)?;
        match self.add_child(new) {
            Ok(new) => {
                // keep the replaced child's insertion position
                let mut data = self.data.borrow_mut();
                let last = data.unordered_children.len() - 1;
                let moved = data.unordered_children.remove(last);
                data.unordered_children.insert(pos, moved);
                Ok(new)
            }
            Err(err) => {
                self.add_child(old.clone())
                    .expect("restoring a just-removed child cannot fail");
                let mut data = self.data.borrow_mut();
                let last = data.unordered_children.len() - 1;
                let moved = data.unordered_children.remove(last);
                data.unordered_children.insert(pos, moved);
                Err(err)
            }
        }
    }

    /// Children of this element.
    ///
    /// `ordered` returns document order (the container's view); the
    /// unordered view returns insertion order, which is also what the
    /// serializer uses while `xsd_check` is disabled.
    pub fn get_children(&self, ordered: bool) -> Vec<XmlElement> {
        let data = self.data.borrow();
        if ordered && data.xsd_check {
            if let Some(ref container) = data.container {
                return container.ordered_elements();
            }
        }
        data.unordered_children.clone()
    }

    /// First child with the given name, in insertion order
    pub fn find_child(&self, name: &str) -> Option<XmlElement> {
        self.data
            .borrow()
            .unordered_children
            .iter()
            .find(|c| c.name() == name)
            .cloned()
    }

    /// All children with the given name, in insertion order
    pub fn find_children(&self, name: &str) -> Vec<XmlElement> {
        self.data
            .borrow()
            .unordered_children
            .iter()
            .filter(|c| c.name() == name)
            .cloned()
            .collect()
    }

    /// Element names this element's content model can host
    pub fn possible_children_names(&self) -> Vec<&'static str> {
        self.data
            .borrow()
            .container
            .as_ref()
            .map(|c| c.possible_children_names())
            .unwrap_or_default()
    }

    // -------------------------------------------------------------------------
    // Name-keyed accessors
    // -------------------------------------------------------------------------

    /// First child with the given name, in document order
    pub fn child(&self, name: &str) -> Option<XmlElement> {
        self.get_children(true).into_iter().find(|c| c.name() == name)
    }

    /// Attach `element` as the `name` child, replacing the first existing
    /// child of that name
    pub fn set_child(&self, name: &str, element: XmlElement) -> Result<XmlElement> {
        match self.child(name) {
            Some(existing) => self.replace_child(&existing, element),
            None => self.add_child(element),
        }
    }

    /// Set the `name` child from a scalar: updates the first existing
    /// child of that name, or constructs the element with the scalar as
    /// its value
    pub fn set_child_value(&self, name: &str, value: impl Into<XmlValue>) -> Result<XmlElement> {
        match self.child(name) {
            Some(existing) => {
                existing.set_value(value)?;
                Ok(existing)
            }
            None => self.add_child(XmlElement::new_with_value(name, value)?),
        }
    }

    /// Remove the first child with the given name, if present
    pub fn clear_child(&self, name: &str) -> Result<()> {
        if let Some(existing) = self.child(name) {
            self.remove(&existing)?;
        }
        Ok(())
    }

    // -------------------------------------------------------------------------
    // Final checks and serialization
    // -------------------------------------------------------------------------

    /// Verify this subtree is schema-complete: container completion,
    /// required attributes, values of simple-typed elements. Skipped for
    /// elements whose `xsd_check` is disabled.
    pub fn final_checks(&self) -> Result<()> {
        let data = self.data.borrow();
        if !data.xsd_check {
            return Ok(());
        }

        if let TypeRef::Simple(type_name) = data.decl.type_ref {
            if data.value.is_none() {
                return Err(Error::BadValue {
                    type_name: type_name.to_string(),
                    value: String::new(),
                    reason: "a value is required".to_string(),
                });
            }
        }

        if let Some(ref container) = data.container {
            container
                .validate_completion()
                .map_err(|particle_path| Error::RequiredChildMissing {
                    element: data.decl.name.to_string(),
                    particle_path,
                })?;
        }

        if let Some(def) = match data.decl.type_ref {
            TypeRef::Complex(type_name) => Some(schema().complex_type(type_name)),
            TypeRef::Simple(_) => None,
        } {
            for attr in &def.attributes {
                if attr.required && !data.attributes.iter().any(|(n, _)| n == attr.name) {
                    return Err(Error::RequiredAttributeMissing {
                        element: data.decl.name.to_string(),
                        attribute: attr.name.to_string(),
                    });
                }
            }
        }

        drop(data);
        for child in self.get_children(true) {
            child.final_checks()?;
        }
        Ok(())
    }

    /// Serialize with default formatting: two-space indent, no XML
    /// declaration, trailing newline. Runs the final checks first.
    pub fn to_string(&self) -> Result<String> {
        self.serialize(&WriteOptions {
            xml_declaration: false,
            ..WriteOptions::default()
        })
    }

    /// Serialize with explicit options. Runs the final checks first.
    pub fn serialize(&self, options: &WriteOptions) -> Result<String> {
        self.final_checks()?;
        Ok(writer::serialize_tree(self, options))
    }

    /// Serialize with default options (XML declaration included) and
    /// write to a file
    pub fn write(&self, path: impl AsRef<Path>) -> Result<()> {
        let text = self.serialize(&WriteOptions::default())?;
        std::fs::write(path, text)?;
        Ok(())
    }

    /// Children in the order the serializer emits them
    pub(crate) fn output_children(&self) -> Vec<XmlElement> {
        self.get_children(true)
    }

    // -------------------------------------------------------------------------
    // Copying
    // -------------------------------------------------------------------------

    /// Build an independent copy of this subtree with its own container
    /// state; slot assignments of all children are preserved
    pub fn deep_copy(&self) -> XmlElement {
        let data = self.data.borrow();
        let copy = XmlElement::from_decl(data.decl);
        {
            let mut copy_data = copy.data.borrow_mut();
            copy_data.value = data.value.clone();
            copy_data.attributes = data.attributes.clone();
            copy_data.xsd_check = data.xsd_check;
        }

        let mut map: HashMap<usize, XmlElement> = HashMap::new();
        for child in &data.unordered_children {
            let child_copy = child.deep_copy();
            child_copy.data.borrow_mut().parent = Rc::downgrade(&copy.data);
            map.insert(Rc::as_ptr(&child.data) as usize, child_copy.clone());
            copy.data.borrow_mut().unordered_children.push(child_copy);
        }
        if let Some(ref container) = data.container {
            let mapped = container.clone_mapped(&|old: &XmlElement| {
                map.get(&(Rc::as_ptr(&old.data) as usize))
                    .cloned()
                    .expect("container hosts a child missing from the copy map")
            });
            copy.data.borrow_mut().container = Some(mapped);
        }
        copy
    }

    /// Copy this node only, sharing the children by reference.
    ///
    /// The shared children keep their original parent link; intended for
    /// tooling that inspects alternative node states, not for building
    /// documents.
    pub fn shallow_copy(&self) -> XmlElement {
        let data = self.data.borrow();
        let copy = XmlElement::from_decl(data.decl);
        {
            let mut copy_data = copy.data.borrow_mut();
            copy_data.value = data.value.clone();
            copy_data.attributes = data.attributes.clone();
            copy_data.xsd_check = data.xsd_check;
            copy_data.unordered_children = data.unordered_children.clone();
            copy_data.container = data
                .container
                .as_ref()
                .map(|c| c.clone_mapped(&|old: &XmlElement| old.clone()));
        }
        copy
    }
}

impl PartialEq for XmlElement {
    /// Handle identity, not structural equality
    fn eq(&self, other: &Self) -> bool {
        self.same_node(other)
    }
}

impl fmt::Debug for XmlElement {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let data = self.data.borrow();
        f.debug_struct("XmlElement")
            .field("name", &data.decl.name)
            .field("value", &data.value)
            .field("children", &data.unordered_children.len())
            .finish()
    }
}
