//! Component instances.
//!
//! An instance is one concrete constraint handler, numberer, system, pattern,
//! damping or region: a variant name plus its validated parameters.

use crate::{ComponentKind, ComponentRef, Params, Tag, Value};
use std::fmt;

/// A live component in a session.
///
/// Instances are only produced by a registry after validation, so callers
/// never observe a partially constructed one.
#[derive(Debug, Clone, PartialEq)]
pub struct ComponentInstance {
    /// Kind of this component.
    pub kind: ComponentKind,
    /// Identifier, unique within the kind.
    pub tag: Tag,
    /// Name of the variant this instance was created from.
    pub variant: String,
    /// Validated parameters with defaults applied.
    pub params: Params,
    /// Bumped on every successful parameter update.
    pub version: u64,
    /// Outgoing references: (parameter name, referenced component).
    references: Vec<(String, ComponentRef)>,
}

impl ComponentInstance {
    /// Create a new instance. `references` lists the `Ref` parameters resolved to their kinds.
    pub fn new(
        kind: ComponentKind,
        tag: Tag,
        variant: impl Into<String>,
        params: Params,
        references: Vec<(String, ComponentRef)>,
    ) -> Self {
        Self {
            kind,
            tag,
            variant: variant.into(),
            params,
            version: 1,
            references,
        }
    }

    /// This instance as a reference target.
    pub fn component_ref(&self) -> ComponentRef {
        ComponentRef::new(self.kind, self.tag)
    }

    /// Get a parameter value by name.
    pub fn get_param(&self, name: &str) -> Option<&Value> {
        self.params.get(name)
    }

    /// Check whether a parameter is set.
    pub fn has_param(&self, name: &str) -> bool {
        self.params.contains_key(name)
    }

    /// Components this instance refers to.
    pub fn references(&self) -> impl Iterator<Item = ComponentRef> + '_ {
        self.references.iter().map(|(_, r)| *r)
    }

    /// The component referenced through a specific parameter.
    pub fn reference(&self, param: &str) -> Option<ComponentRef> {
        self.references
            .iter()
            .find(|(name, _)| name == param)
            .map(|(_, r)| *r)
    }

    /// Replace parameters and references after a successful revalidation.
    pub fn replace_params(&mut self, params: Params, references: Vec<(String, ComponentRef)>) {
        self.params = params;
        self.references = references;
        self.version += 1;
    }
}

impl fmt::Display for ComponentInstance {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {} {}", self.kind, self.tag, self.variant)?;
        if !self.params.is_empty() {
            write!(f, " (")?;
            for (i, (name, value)) in self.params.iter().enumerate() {
                if i > 0 {
                    write!(f, ", ")?;
                }
                write!(f, "{}={}", name, value)?;
            }
            write!(f, ")")?;
        }
        Ok(())
    }
}
