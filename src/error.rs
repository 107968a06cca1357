//! Error types for the musicxml crate
//!
//! Every failure a caller can see is a variant of [`Error`]. All of them
//! are recoverable: a failed operation leaves the element tree exactly as
//! it was before the call. Schema-table corruption (a dangling type or
//! group reference in the compiled-in tables) is a programmer error and
//! panics instead.

use std::fmt;
use thiserror::Error;

/// Result type alias using the musicxml [`Error`]
pub type Result<T> = std::result::Result<T, Error>;

/// Main error type for musicxml operations
#[derive(Error, Debug)]
pub enum Error {
    /// A scalar value failed simple-type validation
    #[error("value '{value}' is not a valid '{type_name}': {reason}")]
    BadValue {
        /// Name of the XSD simple type
        type_name: String,
        /// The offending value, rendered as text
        value: String,
        /// What the value violated
        reason: String,
    },

    /// An attribute name is not declared for the element's complex type
    #[error("'{element}' has no attribute '{attribute}'")]
    UnknownAttribute {
        /// Element name
        element: String,
        /// The undeclared attribute name
        attribute: String,
    },

    /// A required attribute was absent at final check
    #[error("'{element}' requires attribute '{attribute}'")]
    RequiredAttributeMissing {
        /// Element name
        element: String,
        /// The missing attribute name
        attribute: String,
    },

    /// The content model has no legal placement for a child
    #[error("'{child}' is not allowed in '{element}': {reason}")]
    ChildNotAllowed {
        /// Parent element name
        element: String,
        /// Rejected child element name
        child: String,
        /// Why placement failed
        reason: String,
    },

    /// A required particle was unsatisfied at final check
    #[error("'{element}' requires child '{particle_path}'")]
    RequiredChildMissing {
        /// Element name
        element: String,
        /// Path to the unsatisfied particle (leaf element names)
        particle_path: String,
    },

    /// An element name with no declaration in the schema table
    ///
    /// Raised by the name-keyed constructor; the Rust analogue of
    /// referencing a class the generator never emitted.
    #[error("no element '{name}' is declared in the schema")]
    UnknownElement {
        /// The undeclared element name
        name: String,
    },

    /// XML parsing error
    #[error("parse error: {0}")]
    Parse(#[from] ParseError),

    /// I/O error
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// XML parsing error with document context
#[derive(Debug, Clone)]
pub struct ParseError {
    /// Error message
    pub message: String,
    /// Element path at the point of failure, e.g. `/score-partwise/part`
    pub path: Option<String>,
    /// Byte offset into the input
    pub offset: Option<u64>,
}

impl ParseError {
    /// Create a new parse error
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            path: None,
            offset: None,
        }
    }

    /// Set the element path where parsing failed
    pub fn with_path(mut self, path: impl Into<String>) -> Self {
        self.path = Some(path.into());
        self
    }

    /// Set the byte offset where parsing failed
    pub fn with_offset(mut self, offset: u64) -> Self {
        self.offset = Some(offset);
        self
    }
}

impl fmt::Display for ParseError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.message)?;
        if let Some(ref path) = self.path {
            write!(f, " (at {})", path)?;
        }
        if let Some(offset) = self.offset {
            write!(f, " (byte {})", offset)?;
        }
        Ok(())
    }
}

impl std::error::Error for ParseError {}
