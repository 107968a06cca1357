//! XSD simple-type validators
//!
//! Every scalar that enters the tree — element values and attribute
//! values — is validated against a [`SimpleTypeDef`] from the schema
//! table. A definition is one of:
//! - **Atomic**: a built-in XSD primitive (string, token, integer kinds,
//!   decimal, double, boolean, date, ...)
//! - **Enumeration**: membership in a fixed value set
//! - **Restriction**: a base type constrained by facets (pattern, length,
//!   numeric bounds)
//! - **List**: whitespace-separated items, each validated by an item type
//! - **Union**: the first member type that accepts the value wins
//!
//! Validation normalizes: a string input to a numeric kind is parsed into
//! the typed value, so parser input and programmatic input share one code
//! path.
//!
//! Reference: https://www.w3.org/TR/xmlschema-2/

use std::fmt;

use regex::Regex;
use rust_decimal::Decimal;

use crate::error::{Error, Result};
use crate::schema::SchemaTable;

// =============================================================================
// Scalar values
// =============================================================================

/// A validated scalar carried by an element value or attribute
#[derive(Debug, Clone, PartialEq)]
pub enum XmlValue {
    /// Character data
    String(String),
    /// xs:integer and its derived kinds
    Integer(i64),
    /// xs:decimal
    Decimal(Decimal),
    /// xs:double / xs:float
    Double(f64),
    /// xs:boolean
    Boolean(bool),
}

impl XmlValue {
    /// The lexical form used in serialized XML
    pub fn to_xml_text(&self) -> String {
        match self {
            XmlValue::String(s) => s.clone(),
            XmlValue::Integer(i) => i.to_string(),
            XmlValue::Decimal(d) => d.to_string(),
            XmlValue::Double(d) => {
                if d.fract() == 0.0 && d.is_finite() && d.abs() < 1e15 {
                    format!("{}", *d as i64)
                } else {
                    d.to_string()
                }
            }
            XmlValue::Boolean(b) => b.to_string(),
        }
    }

    /// Borrow the string content, if this is a string value
    pub fn as_str(&self) -> Option<&str> {
        match self {
            XmlValue::String(s) => Some(s),
            _ => None,
        }
    }
}

impl fmt::Display for XmlValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.to_xml_text())
    }
}

impl From<&str> for XmlValue {
    fn from(v: &str) -> Self {
        XmlValue::String(v.to_string())
    }
}

impl From<String> for XmlValue {
    fn from(v: String) -> Self {
        XmlValue::String(v)
    }
}

impl From<i64> for XmlValue {
    fn from(v: i64) -> Self {
        XmlValue::Integer(v)
    }
}

impl From<i32> for XmlValue {
    fn from(v: i32) -> Self {
        XmlValue::Integer(v as i64)
    }
}

impl From<u32> for XmlValue {
    fn from(v: u32) -> Self {
        XmlValue::Integer(v as i64)
    }
}

impl From<f64> for XmlValue {
    fn from(v: f64) -> Self {
        XmlValue::Double(v)
    }
}

impl From<bool> for XmlValue {
    fn from(v: bool) -> Self {
        XmlValue::Boolean(v)
    }
}

impl From<Decimal> for XmlValue {
    fn from(v: Decimal) -> Self {
        XmlValue::Decimal(v)
    }
}

// =============================================================================
// Built-in primitives
// =============================================================================

/// Built-in XSD primitive kinds used by the MusicXML schema
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Primitive {
    /// xs:string — whitespace preserved
    String,
    /// xs:token — whitespace collapsed
    Token,
    /// xs:NMTOKEN — token without whitespace
    NmToken,
    /// xs:ID — NCName used as a document-unique identifier
    Id,
    /// xs:IDREF — NCName referring to an ID
    Idref,
    /// xs:anyURI
    AnyUri,
    /// xs:date — YYYY-MM-DD with optional timezone
    Date,
    /// xs:integer
    Integer,
    /// xs:nonNegativeInteger
    NonNegativeInteger,
    /// xs:positiveInteger
    PositiveInteger,
    /// xs:decimal
    Decimal,
    /// xs:double
    Double,
    /// xs:boolean — true|false|1|0
    Boolean,
}

/// Collapse XML whitespace: trim ends, fold internal runs to one space
fn collapse_whitespace(s: &str) -> String {
    s.split_whitespace().collect::<Vec<_>>().join(" ")
}

fn is_ncname(s: &str) -> bool {
    let mut chars = s.chars();
    match chars.next() {
        Some(c) if c.is_alphabetic() || c == '_' => {}
        _ => return false,
    }
    chars.all(|c| c.is_alphanumeric() || matches!(c, '_' | '-' | '.'))
}

impl Primitive {
    /// Validate and normalize a value against this primitive
    pub fn validate(&self, type_name: &str, value: &XmlValue) -> Result<XmlValue> {
        let bad = |reason: &str| Error::BadValue {
            type_name: type_name.to_string(),
            value: value.to_xml_text(),
            reason: reason.to_string(),
        };

        match self {
            Primitive::String => match value {
                XmlValue::String(s) => Ok(XmlValue::String(s.clone())),
                _ => Err(bad("expected a string value")),
            },
            Primitive::Token => match value {
                XmlValue::String(s) => Ok(XmlValue::String(collapse_whitespace(s))),
                _ => Err(bad("expected a string value")),
            },
            Primitive::NmToken => match value {
                XmlValue::String(s) => {
                    let collapsed = collapse_whitespace(s);
                    if collapsed.is_empty() || collapsed.contains(' ') {
                        Err(bad("not a valid NMTOKEN"))
                    } else {
                        Ok(XmlValue::String(collapsed))
                    }
                }
                _ => Err(bad("expected a string value")),
            },
            Primitive::Id | Primitive::Idref => match value {
                XmlValue::String(s) => {
                    let collapsed = collapse_whitespace(s);
                    if is_ncname(&collapsed) {
                        Ok(XmlValue::String(collapsed))
                    } else {
                        Err(bad("not a valid NCName"))
                    }
                }
                _ => Err(bad("expected a string value")),
            },
            Primitive::AnyUri => match value {
                XmlValue::String(s) => Ok(XmlValue::String(collapse_whitespace(s))),
                _ => Err(bad("expected a string value")),
            },
            Primitive::Date => match value {
                XmlValue::String(s) => {
                    let collapsed = collapse_whitespace(s);
                    if DATE_RE.is_match(&collapsed) {
                        Ok(XmlValue::String(collapsed))
                    } else {
                        Err(bad("not a valid date (expected YYYY-MM-DD)"))
                    }
                }
                _ => Err(bad("expected a date string")),
            },
            Primitive::Integer => self.validate_integer(type_name, value, i64::MIN),
            Primitive::NonNegativeInteger => self.validate_integer(type_name, value, 0),
            Primitive::PositiveInteger => self.validate_integer(type_name, value, 1),
            Primitive::Decimal => match value {
                XmlValue::Decimal(d) => Ok(XmlValue::Decimal(*d)),
                XmlValue::Integer(i) => Ok(XmlValue::Decimal(Decimal::from(*i))),
                XmlValue::Double(d) => Decimal::try_from(*d)
                    .map(XmlValue::Decimal)
                    .map_err(|_| bad("not representable as a decimal")),
                XmlValue::String(s) => collapse_whitespace(s)
                    .parse::<Decimal>()
                    .map(XmlValue::Decimal)
                    .map_err(|_| bad("not a decimal number")),
                XmlValue::Boolean(_) => Err(bad("expected a decimal number")),
            },
            Primitive::Double => match value {
                XmlValue::Double(d) => Ok(XmlValue::Double(*d)),
                XmlValue::Integer(i) => Ok(XmlValue::Double(*i as f64)),
                XmlValue::Decimal(d) => Ok(XmlValue::Double(
                    d.to_string().parse::<f64>().unwrap_or(f64::NAN),
                )),
                XmlValue::String(s) => collapse_whitespace(s)
                    .parse::<f64>()
                    .map(XmlValue::Double)
                    .map_err(|_| bad("not a floating-point number")),
                XmlValue::Boolean(_) => Err(bad("expected a floating-point number")),
            },
            Primitive::Boolean => match value {
                XmlValue::Boolean(b) => Ok(XmlValue::Boolean(*b)),
                XmlValue::String(s) => match collapse_whitespace(s).as_str() {
                    "true" | "1" => Ok(XmlValue::Boolean(true)),
                    "false" | "0" => Ok(XmlValue::Boolean(false)),
                    _ => Err(bad("not a boolean (expected true|false|1|0)")),
                },
                _ => Err(bad("expected a boolean")),
            },
        }
    }

    fn validate_integer(&self, type_name: &str, value: &XmlValue, min: i64) -> Result<XmlValue> {
        let bad = |reason: String| Error::BadValue {
            type_name: type_name.to_string(),
            value: value.to_xml_text(),
            reason,
        };

        let parsed = match value {
            XmlValue::Integer(i) => Ok(*i),
            XmlValue::String(s) => collapse_whitespace(s)
                .parse::<i64>()
                .map_err(|_| bad("not an integer".to_string())),
            _ => Err(bad("expected an integer".to_string())),
        }?;

        if parsed < min {
            return Err(bad(format!("must be >= {}", min)));
        }
        Ok(XmlValue::Integer(parsed))
    }
}

lazy_static::lazy_static! {
    static ref DATE_RE: Regex =
        Regex::new(r"^-?\d{4,}-\d{2}-\d{2}(Z|[+-]\d{2}:\d{2})?$").unwrap();
}

// =============================================================================
// Facets
// =============================================================================

/// Constraining facets applied by a restriction type
#[derive(Debug, Clone, Default)]
pub struct FacetSet {
    /// Pattern facet (XSD regex, anchored to the whole value)
    pub pattern: Option<Regex>,
    /// Minimum string length
    pub min_length: Option<usize>,
    /// Maximum string length
    pub max_length: Option<usize>,
    /// Inclusive lower bound
    pub min_inclusive: Option<Decimal>,
    /// Inclusive upper bound
    pub max_inclusive: Option<Decimal>,
    /// Exclusive lower bound
    pub min_exclusive: Option<Decimal>,
    /// Exclusive upper bound
    pub max_exclusive: Option<Decimal>,
}

impl FacetSet {
    /// Empty facet set
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the pattern facet; the expression is anchored on both ends
    pub fn with_pattern(mut self, pattern: &str) -> Self {
        let anchored = format!("^(?:{})$", pattern);
        self.pattern = Some(Regex::new(&anchored).expect("invalid pattern facet in schema table"));
        self
    }

    /// Set the minLength facet
    pub fn with_min_length(mut self, min_length: usize) -> Self {
        self.min_length = Some(min_length);
        self
    }

    /// Set the maxLength facet
    pub fn with_max_length(mut self, max_length: usize) -> Self {
        self.max_length = Some(max_length);
        self
    }

    /// Set the minInclusive facet
    pub fn with_min_inclusive(mut self, bound: Decimal) -> Self {
        self.min_inclusive = Some(bound);
        self
    }

    /// Set the maxInclusive facet
    pub fn with_max_inclusive(mut self, bound: Decimal) -> Self {
        self.max_inclusive = Some(bound);
        self
    }

    /// Set the minExclusive facet
    pub fn with_min_exclusive(mut self, bound: Decimal) -> Self {
        self.min_exclusive = Some(bound);
        self
    }

    /// Set the maxExclusive facet
    pub fn with_max_exclusive(mut self, bound: Decimal) -> Self {
        self.max_exclusive = Some(bound);
        self
    }

    /// Check string-form facets (pattern, length) against a lexical value
    fn check_lexical(&self, type_name: &str, lexical: &str) -> Result<()> {
        let bad = |reason: String| Error::BadValue {
            type_name: type_name.to_string(),
            value: lexical.to_string(),
            reason,
        };

        if let Some(ref re) = self.pattern {
            if !re.is_match(lexical) {
                return Err(bad(format!("must match pattern {}", re.as_str())));
            }
        }
        if let Some(min) = self.min_length {
            if lexical.chars().count() < min {
                return Err(bad(format!("length must be >= {}", min)));
            }
        }
        if let Some(max) = self.max_length {
            if lexical.chars().count() > max {
                return Err(bad(format!("length must be <= {}", max)));
            }
        }
        Ok(())
    }

    /// Check numeric-bound facets against a normalized value
    fn check_bounds(&self, type_name: &str, value: &XmlValue) -> Result<()> {
        let number = match value {
            XmlValue::Integer(i) => Some(Decimal::from(*i)),
            XmlValue::Decimal(d) => Some(*d),
            XmlValue::Double(d) => Decimal::try_from(*d).ok(),
            _ => None,
        };
        let number = match number {
            Some(n) => n,
            // Non-numeric value with numeric facets never happens in the
            // compiled tables; nothing to check.
            None => return Ok(()),
        };

        let bad = |reason: String| Error::BadValue {
            type_name: type_name.to_string(),
            value: value.to_xml_text(),
            reason,
        };

        if let Some(min) = self.min_inclusive {
            if number < min {
                return Err(bad(format!("must be >= {}", min)));
            }
        }
        if let Some(max) = self.max_inclusive {
            if number > max {
                return Err(bad(format!("must be <= {}", max)));
            }
        }
        if let Some(min) = self.min_exclusive {
            if number <= min {
                return Err(bad(format!("must be > {}", min)));
            }
        }
        if let Some(max) = self.max_exclusive {
            if number >= max {
                return Err(bad(format!("must be < {}", max)));
            }
        }
        Ok(())
    }
}

// =============================================================================
// Simple type definitions
// =============================================================================

/// The variety of a simple type
#[derive(Debug, Clone)]
pub enum SimpleTypeKind {
    /// Built-in primitive
    Atomic(Primitive),
    /// Fixed value set over a token base
    Enumeration(Vec<&'static str>),
    /// Base type constrained by facets
    Restriction {
        /// Name of the base simple type in the schema table
        base: &'static str,
        /// Constraining facets
        facets: FacetSet,
    },
    /// Whitespace-separated list of items
    List {
        /// Name of the item simple type in the schema table
        item: &'static str,
    },
    /// First member type that accepts the value wins
    Union {
        /// Member simple type names, tried in order
        members: Vec<&'static str>,
    },
}

/// A named simple type from the schema table
#[derive(Debug, Clone)]
pub struct SimpleTypeDef {
    /// Type name as declared in the XSD
    pub name: &'static str,
    /// Variety and constraints
    pub kind: SimpleTypeKind,
}

impl SimpleTypeDef {
    /// Atomic definition
    pub fn atomic(name: &'static str, primitive: Primitive) -> Self {
        Self {
            name,
            kind: SimpleTypeKind::Atomic(primitive),
        }
    }

    /// Enumeration definition
    pub fn enumeration(name: &'static str, values: Vec<&'static str>) -> Self {
        Self {
            name,
            kind: SimpleTypeKind::Enumeration(values),
        }
    }

    /// Restriction definition
    pub fn restriction(name: &'static str, base: &'static str, facets: FacetSet) -> Self {
        Self {
            name,
            kind: SimpleTypeKind::Restriction { base, facets },
        }
    }

    /// List definition
    pub fn list(name: &'static str, item: &'static str) -> Self {
        Self {
            name,
            kind: SimpleTypeKind::List { item },
        }
    }

    /// Union definition
    pub fn union(name: &'static str, members: Vec<&'static str>) -> Self {
        Self {
            name,
            kind: SimpleTypeKind::Union { members },
        }
    }

    /// Validate a value against this type, returning the normalized value
    ///
    /// The table is needed to resolve restriction bases, list item types
    /// and union members.
    pub fn validate(&self, table: &SchemaTable, value: &XmlValue) -> Result<XmlValue> {
        match &self.kind {
            SimpleTypeKind::Atomic(primitive) => primitive.validate(self.name, value),

            SimpleTypeKind::Enumeration(values) => {
                let lexical = match value {
                    XmlValue::String(s) => collapse_whitespace(s),
                    other => other.to_xml_text(),
                };
                if values.contains(&lexical.as_str()) {
                    Ok(XmlValue::String(lexical))
                } else {
                    Err(Error::BadValue {
                        type_name: self.name.to_string(),
                        value: value.to_xml_text(),
                        reason: "not in enumeration".to_string(),
                    })
                }
            }

            SimpleTypeKind::Restriction { base, facets } => {
                facets.check_lexical(self.name, &lexical_form(value))?;
                let normalized = table.simple_type(base).validate_as(table, self.name, value)?;
                facets.check_bounds(self.name, &normalized)?;
                Ok(normalized)
            }

            SimpleTypeKind::List { item } => {
                let lexical = match value {
                    XmlValue::String(s) => collapse_whitespace(s),
                    other => other.to_xml_text(),
                };
                let item_type = table.simple_type(item);
                for (i, piece) in lexical.split(' ').filter(|p| !p.is_empty()).enumerate() {
                    item_type
                        .validate(table, &XmlValue::String(piece.to_string()))
                        .map_err(|e| Error::BadValue {
                            type_name: self.name.to_string(),
                            value: lexical.clone(),
                            reason: format!("item {} is invalid: {}", i + 1, e),
                        })?;
                }
                Ok(XmlValue::String(lexical))
            }

            SimpleTypeKind::Union { members } => {
                for member in members {
                    if let Ok(normalized) = table.simple_type(member).validate(table, value) {
                        return Ok(normalized);
                    }
                }
                Err(Error::BadValue {
                    type_name: self.name.to_string(),
                    value: value.to_xml_text(),
                    reason: format!(
                        "no member type accepted the value (tried {})",
                        members.join(", ")
                    ),
                })
            }
        }
    }

    /// Validate reporting errors under an outer type name
    ///
    /// Used by restrictions so that a base-type failure names the derived
    /// type the caller actually used.
    fn validate_as(
        &self,
        table: &SchemaTable,
        outer_name: &str,
        value: &XmlValue,
    ) -> Result<XmlValue> {
        self.validate(table, value).map_err(|e| match e {
            Error::BadValue { value, reason, .. } => Error::BadValue {
                type_name: outer_name.to_string(),
                value,
                reason,
            },
            other => other,
        })
    }
}

/// Lexical form of a value for pattern and length facets
fn lexical_form(value: &XmlValue) -> String {
    match value {
        XmlValue::String(s) => collapse_whitespace(s),
        other => other.to_xml_text(),
    }
}
