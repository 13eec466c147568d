//! Registry error types.

use femcat_core::{ComponentKind, ComponentRef, Tag};
use femcat_schema::SchemaError;
use femcat_validate::ValidationError;
use std::fmt;
use thiserror::Error;

/// Why an instance cannot be removed or replaced.
#[derive(Debug, Clone, PartialEq)]
pub enum ProtectionReason {
    /// Fixed-identity instance (the Global region).
    Fixed,
    /// Still referenced by these components.
    ReferencedBy(Vec<ComponentRef>),
}

impl fmt::Display for ProtectionReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ProtectionReason::Fixed => write!(f, "fixed instance"),
            ProtectionReason::ReferencedBy(refs) => {
                write!(f, "referenced by ")?;
                for (i, r) in refs.iter().enumerate() {
                    if i > 0 {
                        write!(f, ", ")?;
                    }
                    write!(f, "{}", r)?;
                }
                Ok(())
            }
        }
    }
}

/// Errors reported by registry operations.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum RegistryError {
    #[error("Unknown {kind} variant: {name}{}", suggestion_hint(.suggestion))]
    UnknownVariant {
        kind: ComponentKind,
        name: String,
        available: Vec<String>,
        suggestion: Option<String>,
    },

    #[error(transparent)]
    Validation(#[from] ValidationError),

    #[error("Singleton conflict: {kind} {existing} already exists, cannot create {variant}")]
    SingletonConflict {
        kind: ComponentKind,
        variant: String,
        existing: Tag,
    },

    #[error("Protected instance: cannot remove {kind} {tag} ({reason})")]
    ProtectedInstance {
        kind: ComponentKind,
        tag: Tag,
        reason: ProtectionReason,
    },

    #[error("{kind} {} not found", tag_or_current(.tag))]
    NotFound {
        kind: ComponentKind,
        tag: Option<Tag>,
    },

    #[error("Duplicate {kind} variant: {name}")]
    DuplicateVariant { kind: ComponentKind, name: String },

    #[error("Invalid schema: {0}")]
    InvalidSchema(#[from] SchemaError),
}

impl RegistryError {
    pub fn not_found(kind: ComponentKind, tag: Option<Tag>) -> Self {
        Self::NotFound { kind, tag }
    }

    pub fn singleton_conflict(kind: ComponentKind, variant: impl Into<String>, existing: Tag) -> Self {
        Self::SingletonConflict {
            kind,
            variant: variant.into(),
            existing,
        }
    }

    pub fn protected(kind: ComponentKind, tag: Tag, reason: ProtectionReason) -> Self {
        Self::ProtectedInstance { kind, tag, reason }
    }

    /// The validation failure, if this is one.
    pub fn as_validation(&self) -> Option<&ValidationError> {
        match self {
            Self::Validation(e) => Some(e),
            _ => None,
        }
    }
}

fn suggestion_hint(suggestion: &Option<String>) -> String {
    match suggestion {
        Some(s) => format!(" (did you mean `{}`?)", s),
        None => String::new(),
    }
}

fn tag_or_current(tag: &Option<Tag>) -> String {
    match tag {
        Some(tag) => tag.to_string(),
        None => "(current)".to_string(),
    }
}

/// Result type for registry operations.
pub type RegistryResult<T> = Result<T, RegistryError>;
