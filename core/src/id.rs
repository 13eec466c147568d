//! Identity types for femcat components.
//!
//! Every component instance is identified by its kind plus a tag:
//! - Tags are unique within their kind
//! - Tags are immutable once assigned and never reused within a session
//! - Tag 0 is reserved for fixed-identity instances (the Global region)

use serde::Serialize;
use std::fmt;

/// The kinds of component an analysis configuration is assembled from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
pub enum ComponentKind {
    ConstraintHandler,
    Numberer,
    System,
    Pattern,
    Damping,
    Region,
}

impl ComponentKind {
    /// All kinds, in the order the solver consumes them.
    ///
    /// Dampings precede regions because regions reference them.
    pub const ALL: [ComponentKind; 6] = [
        ComponentKind::ConstraintHandler,
        ComponentKind::Numberer,
        ComponentKind::System,
        ComponentKind::Damping,
        ComponentKind::Region,
        ComponentKind::Pattern,
    ];

    /// Human-readable name of the kind.
    pub fn name(&self) -> &'static str {
        match self {
            ComponentKind::ConstraintHandler => "constraint handler",
            ComponentKind::Numberer => "numberer",
            ComponentKind::System => "system",
            ComponentKind::Pattern => "pattern",
            ComponentKind::Damping => "damping",
            ComponentKind::Region => "region",
        }
    }
}

impl fmt::Display for ComponentKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Identifier for a component instance within its kind.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
#[serde(transparent)]
pub struct Tag(pub u32);

impl Tag {
    /// The tag reserved for fixed-identity instances.
    pub const FIXED: Tag = Tag(0);

    /// Create a new Tag from a raw value.
    pub fn new(tag: u32) -> Self {
        Self(tag)
    }

    /// Get the raw value.
    pub fn raw(&self) -> u32 {
        self.0
    }
}

impl fmt::Display for Tag {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// A fully qualified reference to a component: kind plus tag.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
pub struct ComponentRef {
    pub kind: ComponentKind,
    pub tag: Tag,
}

impl ComponentRef {
    pub fn new(kind: ComponentKind, tag: Tag) -> Self {
        Self { kind, tag }
    }
}

impl fmt::Display for ComponentRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {}", self.kind, self.tag)
    }
}
