//! Reverse reference index.

use femcat_core::ComponentRef;
use std::collections::{BTreeSet, HashMap};

/// Tracks which components reference which, keyed by the referenced component.
///
/// A component with any referrer cannot be removed.
#[derive(Debug, Default, Clone)]
pub struct ReferenceIndex {
    index: HashMap<ComponentRef, BTreeSet<ComponentRef>>,
}

impl ReferenceIndex {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, target: ComponentRef, referrer: ComponentRef) {
        self.index.entry(target).or_default().insert(referrer);
    }

    pub fn remove(&mut self, target: ComponentRef, referrer: ComponentRef) {
        if let Some(set) = self.index.get_mut(&target) {
            set.remove(&referrer);
            if set.is_empty() {
                self.index.remove(&target);
            }
        }
    }

    /// Components referencing `target`, in (kind, tag) order.
    pub fn referrers(&self, target: ComponentRef) -> impl Iterator<Item = ComponentRef> + '_ {
        self.index
            .get(&target)
            .into_iter()
            .flat_map(|set| set.iter().copied())
    }

    /// Check if anything references `target`.
    pub fn is_referenced(&self, target: ComponentRef) -> bool {
        self.index
            .get(&target)
            .map(|set| !set.is_empty())
            .unwrap_or(false)
    }

    pub fn clear(&mut self) {
        self.index.clear();
    }
}
