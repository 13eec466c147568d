//! Region graph operations.
//!
//! Regions select parts of the model along two axes (elements and nodes),
//! each given either as an explicit list or as an inclusive range, and may
//! carry one damping. A region without its own damping falls back to the
//! Global region's.

use femcat_core::{ComponentKind, Tag, Value};
use femcat_registry::RegistryResult;
use femcat_schema::builtins::region as keys;
use std::fmt;

use crate::Session;

/// One form of a region axis.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum RegionAxis {
    Element,
    ElementRange,
    Node,
    NodeRange,
}

impl RegionAxis {
    pub const ALL: [RegionAxis; 4] = [
        RegionAxis::Element,
        RegionAxis::ElementRange,
        RegionAxis::Node,
        RegionAxis::NodeRange,
    ];

    /// Parameter holding this axis form.
    pub fn param(&self) -> &'static str {
        match self {
            RegionAxis::Element => keys::ELEMENTS,
            RegionAxis::ElementRange => keys::ELEMENT_RANGE,
            RegionAxis::Node => keys::NODES,
            RegionAxis::NodeRange => keys::NODE_RANGE,
        }
    }
}

impl fmt::Display for RegionAxis {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.param())
    }
}

/// Lifecycle of a region. There is no terminal state.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RegionState {
    /// Created with nothing selected and no damping.
    Uninitialized,
    /// Some component or damping has been set.
    Configured,
}

impl Session {
    /// Set one axis form of a region.
    ///
    /// Any other form of the same axis is cleared first, so the last write
    /// wins. Variants that do not declare the axis reject it as unknown.
    pub fn set_component(
        &mut self,
        region: Tag,
        axis: RegionAxis,
        values: impl Into<Value>,
    ) -> RegistryResult<()> {
        let instance = self.get(ComponentKind::Region, Some(region))?;
        let partners: Vec<String> = self
            .variant(ComponentKind::Region, &instance.variant)
            .map(|def| {
                def.exclusive_partners(axis.param())
                    .map(String::from)
                    .collect()
            })
            .unwrap_or_default();

        let value = values.into();
        self.edit(ComponentKind::Region, region, |params| {
            for partner in &partners {
                params.remove(partner);
            }
            params.insert(axis.param().to_string(), value);
        })
    }

    /// Replace or clear a region's damping. The damping must exist.
    pub fn assign_damping(&mut self, region: Tag, damping: Option<Tag>) -> RegistryResult<()> {
        self.edit(ComponentKind::Region, region, |params| match damping {
            Some(tag) => {
                params.insert(keys::DAMPING.to_string(), Value::Ref(tag));
            }
            None => {
                params.remove(keys::DAMPING);
            }
        })
    }

    /// The damping that applies to a region: its own, else the Global region's.
    pub fn effective_damping(&self, region: Tag) -> RegistryResult<Option<Tag>> {
        let own = self
            .get(ComponentKind::Region, Some(region))?
            .reference(keys::DAMPING);
        if let Some(damping) = own {
            return Ok(Some(damping.tag));
        }
        let global = self.get(ComponentKind::Region, Some(Tag::FIXED))?;
        Ok(global.reference(keys::DAMPING).map(|r| r.tag))
    }

    /// Current lifecycle state of a region.
    pub fn region_state(&self, region: Tag) -> RegistryResult<RegionState> {
        let instance = self.get(ComponentKind::Region, Some(region))?;
        let fixed = self
            .variant(ComponentKind::Region, &instance.variant)
            .and_then(|def| def.fixed_tag())
            .is_some();
        let selected = RegionAxis::ALL
            .iter()
            .any(|axis| instance.has_param(axis.param()));

        if fixed || selected || instance.has_param(keys::DAMPING) || instance.version > 1 {
            Ok(RegionState::Configured)
        } else {
            Ok(RegionState::Uninitialized)
        }
    }
}
