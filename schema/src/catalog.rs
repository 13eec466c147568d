//! The Catalog - variant lookup across all component kinds.

use crate::{KindPolicy, VariantDef};
use femcat_core::ComponentKind;
use std::collections::HashMap;

/// Variant descriptors and instance policies for every kind.
///
/// A catalog seeds the per-kind registries of a session; it is not consulted
/// after that.
#[derive(Debug, Clone, Default)]
pub struct Catalog {
    /// Variant definitions by kind, in registration order.
    variants: HashMap<ComponentKind, Vec<VariantDef>>,
    /// Instance policy by kind. Missing kinds are unbounded.
    policies: HashMap<ComponentKind, KindPolicy>,
}

impl Catalog {
    pub(crate) fn new(
        variants: HashMap<ComponentKind, Vec<VariantDef>>,
        policies: HashMap<ComponentKind, KindPolicy>,
    ) -> Self {
        Self { variants, policies }
    }

    /// Get a variant definition by kind and name.
    pub fn get(&self, kind: ComponentKind, name: &str) -> Option<&VariantDef> {
        self.variants(kind).iter().find(|v| v.name == name)
    }

    /// All variants of a kind, in registration order.
    pub fn variants(&self, kind: ComponentKind) -> &[VariantDef] {
        self.variants.get(&kind).map(Vec::as_slice).unwrap_or_default()
    }

    /// Variant names of a kind, in registration order.
    pub fn variant_names(&self, kind: ComponentKind) -> impl Iterator<Item = &str> {
        self.variants(kind).iter().map(|v| v.name.as_str())
    }

    /// Instance policy of a kind.
    pub fn policy(&self, kind: ComponentKind) -> KindPolicy {
        self.policies.get(&kind).copied().unwrap_or_default()
    }

    /// Total number of variants across all kinds.
    pub fn variant_count(&self) -> usize {
        self.variants.values().map(Vec::len).sum()
    }
}
