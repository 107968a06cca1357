//! XSD particle model
//!
//! Particles are the nodes of a complex type's content model: sequences,
//! choices, all-groups, references to named groups, and element leaves.
//! Each carries occurrence bounds (minOccurs, maxOccurs).
//!
//! Reference: https://www.w3.org/TR/xmlschema11-1/#p

use std::fmt;

/// Occurrence bounds for a particle (minOccurs, maxOccurs)
/// None for max means unbounded
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Occurs {
    /// Minimum number of occurrences (default 1)
    pub min: u32,
    /// Maximum number of occurrences (None = unbounded, default 1)
    pub max: Option<u32>,
}

impl Occurs {
    /// Create new occurrence bounds
    pub const fn new(min: u32, max: Option<u32>) -> Self {
        Self { min, max }
    }

    /// Default occurrence (1, 1)
    pub const fn once() -> Self {
        Self { min: 1, max: Some(1) }
    }

    /// Optional occurrence (0, 1)
    pub const fn optional() -> Self {
        Self { min: 0, max: Some(1) }
    }

    /// Zero or more (0, unbounded)
    pub const fn zero_or_more() -> Self {
        Self { min: 0, max: None }
    }

    /// One or more (1, unbounded)
    pub const fn one_or_more() -> Self {
        Self { min: 1, max: None }
    }

    /// Check if this particle can be absent (minOccurs == 0)
    pub fn is_emptiable(&self) -> bool {
        self.min == 0
    }

    /// Check if this particle has maxOccurs == 1
    pub fn is_single(&self) -> bool {
        self.max == Some(1)
    }

    /// Check if this particle can occur more than once
    pub fn is_multiple(&self) -> bool {
        !self.is_single()
    }

    /// Check if an occurrence count is under the minimum
    pub fn is_missing(&self, count: u32) -> bool {
        count < self.min
    }

    /// Check if an occurrence count has reached the maximum
    pub fn is_over(&self, count: u32) -> bool {
        match self.max {
            Some(max) => count >= max,
            None => false,
        }
    }
}

impl Default for Occurs {
    fn default() -> Self {
        Self::once()
    }
}

impl fmt::Display for Occurs {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.max {
            Some(max) => write!(f, "{}..{}", self.min, max),
            None => write!(f, "{}..unbounded", self.min),
        }
    }
}

/// The kind of a content-model particle
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ParticleKind {
    /// Ordered sequence of branches
    Sequence(Vec<Particle>),
    /// One of several alternative branches
    Choice(Vec<Particle>),
    /// Branches matched in any order, each at most once
    All(Vec<Particle>),
    /// Reference to a named model group in the schema table
    GroupRef(&'static str),
    /// Element leaf, named by the element it hosts
    Element(&'static str),
}

/// A node in a complex type's content-model tree
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Particle {
    /// Node kind with branch particles for compositors
    pub kind: ParticleKind,
    /// Occurrence bounds of this node
    pub occurs: Occurs,
}

impl Particle {
    /// Sequence particle with default occurrence
    pub fn sequence(branches: Vec<Particle>) -> Self {
        Self {
            kind: ParticleKind::Sequence(branches),
            occurs: Occurs::once(),
        }
    }

    /// Choice particle with default occurrence
    pub fn choice(branches: Vec<Particle>) -> Self {
        Self {
            kind: ParticleKind::Choice(branches),
            occurs: Occurs::once(),
        }
    }

    /// All particle with default occurrence
    pub fn all(branches: Vec<Particle>) -> Self {
        Self {
            kind: ParticleKind::All(branches),
            occurs: Occurs::once(),
        }
    }

    /// Reference to a named group
    pub fn group_ref(name: &'static str) -> Self {
        Self {
            kind: ParticleKind::GroupRef(name),
            occurs: Occurs::once(),
        }
    }

    /// Element leaf with default occurrence
    pub fn element(name: &'static str) -> Self {
        Self {
            kind: ParticleKind::Element(name),
            occurs: Occurs::once(),
        }
    }

    /// Override the occurrence bounds
    pub fn with_occurs(mut self, min: u32, max: Option<u32>) -> Self {
        self.occurs = Occurs::new(min, max);
        self
    }

    /// Mark the particle optional (0, 1)
    pub fn optional(mut self) -> Self {
        self.occurs = Occurs::optional();
        self
    }

    /// Mark the particle repeatable (0, unbounded)
    pub fn zero_or_more(mut self) -> Self {
        self.occurs = Occurs::zero_or_more();
        self
    }

    /// Mark the particle repeatable and required (1, unbounded)
    pub fn one_or_more(mut self) -> Self {
        self.occurs = Occurs::one_or_more();
        self
    }

    /// Branch particles of a compositor; empty for leaves and group refs
    pub fn branches(&self) -> &[Particle] {
        match &self.kind {
            ParticleKind::Sequence(b) | ParticleKind::Choice(b) | ParticleKind::All(b) => b,
            ParticleKind::GroupRef(_) | ParticleKind::Element(_) => &[],
        }
    }

    /// Short tag for diagnostics: "sequence", "choice", "all", "group", or the element name
    pub fn tag(&self) -> &str {
        match &self.kind {
            ParticleKind::Sequence(_) => "sequence",
            ParticleKind::Choice(_) => "choice",
            ParticleKind::All(_) => "all",
            ParticleKind::GroupRef(name) => name,
            ParticleKind::Element(name) => name,
        }
    }
}
