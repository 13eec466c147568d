//! Read-only model summaries.

use femcat_core::{ComponentKind, ComponentRef, Params, Tag};
use serde::Serialize;
use std::fmt;

use crate::Session;

/// Snapshot of one live component.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ComponentSummary {
    pub kind: ComponentKind,
    pub tag: Tag,
    pub variant: String,
    pub params: Params,
    pub references: Vec<ComponentRef>,
    pub version: u64,
}

/// Snapshot of a whole session, kinds in handoff order.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ModelReport {
    pub components: Vec<ComponentSummary>,
}

impl ModelReport {
    /// Summaries of one kind, in tag order.
    pub fn of_kind(&self, kind: ComponentKind) -> impl Iterator<Item = &ComponentSummary> {
        self.components.iter().filter(move |c| c.kind == kind)
    }

    pub fn count(&self, kind: ComponentKind) -> usize {
        self.of_kind(kind).count()
    }
}

impl fmt::Display for ModelReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for kind in ComponentKind::ALL {
            writeln!(f, "{} ({})", kind, self.count(kind))?;
            for summary in self.of_kind(kind) {
                write!(f, "  {} {}", summary.tag, summary.variant)?;
                for (name, value) in &summary.params {
                    write!(f, " {}={}", name, value)?;
                }
                writeln!(f)?;
            }
        }
        Ok(())
    }
}

impl Session {
    /// Summarize every live component.
    pub fn report(&self) -> ModelReport {
        let components = ComponentKind::ALL
            .iter()
            .flat_map(|kind| self.list(*kind))
            .map(|instance| ComponentSummary {
                kind: instance.kind,
                tag: instance.tag,
                variant: instance.variant.clone(),
                params: instance.params.clone(),
                references: instance.references().collect(),
                version: instance.version,
            })
            .collect();
        ModelReport { components }
    }
}
