//! Solver handoff records.

use femcat_core::{ComponentInstance, ComponentKind, Tag, Value};
use femcat_schema::VariantDef;
use serde::Serialize;
use std::fmt;

/// One component, flattened for the solver: identity plus positional arguments.
///
/// Arguments follow the variant's parameter schema order. Absent optional
/// parameters are `Null`; references carry the referenced tag.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SolverRecord {
    pub kind: ComponentKind,
    pub tag: Tag,
    pub variant: String,
    pub args: Vec<Value>,
}

impl SolverRecord {
    pub fn new(instance: &ComponentInstance, variant: &VariantDef) -> Self {
        let args = variant
            .params
            .iter()
            .map(|p| instance.get_param(&p.name).cloned().unwrap_or(Value::Null))
            .collect();
        Self {
            kind: instance.kind,
            tag: instance.tag,
            variant: instance.variant.clone(),
            args,
        }
    }
}

impl fmt::Display for SolverRecord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {} {}", self.kind, self.tag.raw(), self.variant)?;
        for arg in &self.args {
            write!(f, " {}", arg)?;
        }
        Ok(())
    }
}
