//! # musicxml
//!
//! Build, validate, parse and write MusicXML 4.0 documents.
//!
//! Elements are constructed by name against a compiled-in schema table.
//! Every element owns a live content-model container mirroring its XSD
//! complex type: the container decides where each added child may legally
//! attach (backtracking across choice branches where the schema is
//! ambiguous) and verifies required particles and attributes before
//! serialization.
//!
//! ## Example
//!
//! ```rust
//! use musicxml::XmlElement;
//!
//! # fn main() -> musicxml::Result<()> {
//! let pitch = XmlElement::new("pitch")?;
//! pitch.add_child(XmlElement::new_with_value("step", "G")?)?;
//! pitch.set_child_value("octave", 3)?;
//! assert_eq!(
//!     pitch.to_string()?,
//!     "<pitch>\n  <step>G</step>\n  <octave>3</octave>\n</pitch>\n"
//! );
//! # Ok(())
//! # }
//! ```
//!
//! Schema checking can be disabled per element (`xsd_check`), in which
//! case children are appended in call order and the final checks are
//! skipped.

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod error;
pub mod schema;

mod container;
pub mod element;
pub mod parser;
pub mod writer;

pub use element::XmlElement;
pub use error::{Error, ParseError, Result};
pub use parser::{parse_musicxml, parse_musicxml_str, parse_musicxml_str_with, parse_musicxml_with, ParseOptions};
pub use schema::{schema, XmlValue};
pub use writer::WriteOptions;

/// Version of the MusicXML schema compiled into the tables
pub const MUSICXML_VERSION: &str = "4.0";
