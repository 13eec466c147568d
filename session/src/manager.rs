//! Per-kind facades over a session.

use femcat_core::{ComponentInstance, ComponentKind, Params, Tag, Value};
use femcat_registry::RegistryResult;
use femcat_schema::{SchemaError, VariantDef};
use std::collections::btree_map;
use std::ops::{Deref, DerefMut};

use crate::{RegionAxis, RegionState, Session};

/// All operations of a session, narrowed to one component kind.
pub struct ComponentManager<'s> {
    session: &'s mut Session,
    kind: ComponentKind,
}

impl<'s> ComponentManager<'s> {
    pub(crate) fn new(session: &'s mut Session, kind: ComponentKind) -> Self {
        Self { session, kind }
    }

    pub fn create(&mut self, variant: &str, params: Params) -> RegistryResult<Tag> {
        self.session.create(self.kind, variant, params)
    }

    pub fn get(&self, tag: Option<Tag>) -> RegistryResult<&ComponentInstance> {
        self.session.get(self.kind, tag)
    }

    pub fn current(&self) -> Option<&ComponentInstance> {
        self.session.current(self.kind)
    }

    pub fn list(&self) -> btree_map::Values<'_, Tag, ComponentInstance> {
        self.session.list(self.kind)
    }

    pub fn remove(&mut self, tag: Tag) -> RegistryResult<ComponentInstance> {
        self.session.remove(self.kind, tag)
    }

    pub fn set_param(&mut self, tag: Tag, name: &str, value: impl Into<Value>) -> RegistryResult<()> {
        self.session.set_param(self.kind, tag, name, value)
    }

    pub fn unset_param(&mut self, tag: Tag, name: &str) -> RegistryResult<()> {
        self.session.unset_param(self.kind, tag, name)
    }

    /// Register a variant. Its kind must match this manager's.
    pub fn register_variant(&mut self, def: VariantDef) -> RegistryResult<()> {
        if def.kind != self.kind {
            return Err(SchemaError::KindMismatch {
                variant: def.name,
                expected: self.kind,
                actual: def.kind,
            }
            .into());
        }
        self.session.register_variant(def)
    }

    pub fn variants(&self) -> &[VariantDef] {
        self.session.variants(self.kind)
    }
}

/// Region facade: the generic operations plus the region graph.
pub struct RegionManager<'s> {
    inner: ComponentManager<'s>,
}

impl<'s> RegionManager<'s> {
    pub(crate) fn new(session: &'s mut Session) -> Self {
        Self {
            inner: ComponentManager::new(session, ComponentKind::Region),
        }
    }

    /// The Global region.
    pub fn global(&self) -> RegistryResult<&ComponentInstance> {
        self.inner.get(Some(Tag::FIXED))
    }

    pub fn set_component(
        &mut self,
        region: Tag,
        axis: RegionAxis,
        values: impl Into<Value>,
    ) -> RegistryResult<()> {
        self.inner.session.set_component(region, axis, values)
    }

    pub fn assign_damping(&mut self, region: Tag, damping: Option<Tag>) -> RegistryResult<()> {
        self.inner.session.assign_damping(region, damping)
    }

    pub fn effective_damping(&self, region: Tag) -> RegistryResult<Option<Tag>> {
        self.inner.session.effective_damping(region)
    }

    pub fn state(&self, region: Tag) -> RegistryResult<RegionState> {
        self.inner.session.region_state(region)
    }
}

impl<'s> Deref for RegionManager<'s> {
    type Target = ComponentManager<'s>;

    fn deref(&self) -> &Self::Target {
        &self.inner
    }
}

impl<'s> DerefMut for RegionManager<'s> {
    fn deref_mut(&mut self) -> &mut Self::Target {
        &mut self.inner
    }
}

impl Session {
    pub fn constraint_handlers(&mut self) -> ComponentManager<'_> {
        ComponentManager::new(self, ComponentKind::ConstraintHandler)
    }

    pub fn numberers(&mut self) -> ComponentManager<'_> {
        ComponentManager::new(self, ComponentKind::Numberer)
    }

    pub fn systems(&mut self) -> ComponentManager<'_> {
        ComponentManager::new(self, ComponentKind::System)
    }

    pub fn patterns(&mut self) -> ComponentManager<'_> {
        ComponentManager::new(self, ComponentKind::Pattern)
    }

    pub fn dampings(&mut self) -> ComponentManager<'_> {
        ComponentManager::new(self, ComponentKind::Damping)
    }

    pub fn regions(&mut self) -> RegionManager<'_> {
        RegionManager::new(self)
    }
}
