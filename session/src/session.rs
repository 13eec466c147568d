//! Session manager.

use femcat_core::{ComponentInstance, ComponentKind, ComponentRef, Params, Tag, Value};
use femcat_registry::{
    ComponentRegistry, PendingInstance, ReferenceIndex, RegistryError, RegistryResult,
    SolverRecord,
};
use femcat_schema::{builtins, Catalog, CatalogBuilder, VariantDef};
use std::collections::btree_map;
use tracing::{info, warn};

use crate::config::SessionConfig;

/// One registry per component kind.
#[derive(Debug, Clone)]
struct Registries {
    constraint_handlers: ComponentRegistry,
    numberers: ComponentRegistry,
    systems: ComponentRegistry,
    patterns: ComponentRegistry,
    dampings: ComponentRegistry,
    regions: ComponentRegistry,
}

impl Registries {
    fn from_catalog(catalog: &Catalog) -> RegistryResult<Self> {
        let load = |kind: ComponentKind| ComponentRegistry::from_catalog(kind, catalog);
        Ok(Self {
            constraint_handlers: load(ComponentKind::ConstraintHandler)?,
            numberers: load(ComponentKind::Numberer)?,
            systems: load(ComponentKind::System)?,
            patterns: load(ComponentKind::Pattern)?,
            dampings: load(ComponentKind::Damping)?,
            regions: load(ComponentKind::Region)?,
        })
    }

    fn get(&self, kind: ComponentKind) -> &ComponentRegistry {
        match kind {
            ComponentKind::ConstraintHandler => &self.constraint_handlers,
            ComponentKind::Numberer => &self.numberers,
            ComponentKind::System => &self.systems,
            ComponentKind::Pattern => &self.patterns,
            ComponentKind::Damping => &self.dampings,
            ComponentKind::Region => &self.regions,
        }
    }

    fn get_mut(&mut self, kind: ComponentKind) -> &mut ComponentRegistry {
        match kind {
            ComponentKind::ConstraintHandler => &mut self.constraint_handlers,
            ComponentKind::Numberer => &mut self.numberers,
            ComponentKind::System => &mut self.systems,
            ComponentKind::Pattern => &mut self.patterns,
            ComponentKind::Damping => &mut self.dampings,
            ComponentKind::Region => &mut self.regions,
        }
    }
}

/// A femcat session: the component registries of one model plus the
/// references between their instances.
///
/// Every mutating operation checks first and commits last, so a failed call
/// leaves the session exactly as it was.
#[derive(Debug, Clone)]
pub struct Session {
    config: SessionConfig,
    registries: Registries,
    /// Reverse references: referenced component -> referrers.
    refs: ReferenceIndex,
}

impl Session {
    /// Create a session with the built-in catalog.
    pub fn new() -> RegistryResult<Self> {
        Self::with_config(SessionConfig::default())
    }

    /// Create a session from explicit configuration.
    ///
    /// Fails if the catalog is rejected or the configured global damping
    /// cannot be created.
    pub fn with_config(config: SessionConfig) -> RegistryResult<Self> {
        let catalog = build_catalog(&config)?;
        let mut session = Self {
            registries: Registries::from_catalog(&catalog)?,
            refs: ReferenceIndex::new(),
            config,
        };
        session.attach_global_damping()?;
        Ok(session)
    }

    // ==================== Components ====================

    /// Create a component and return its tag.
    pub fn create(
        &mut self,
        kind: ComponentKind,
        variant: &str,
        params: Params,
    ) -> RegistryResult<Tag> {
        let pending = self.registries.get(kind).prepare(variant, &params)?;
        self.check_targets(&pending)?;

        let created = self.registries.get_mut(kind).commit(pending, &self.refs)?;
        if let Some(replaced) = &created.replaced {
            unlink(&mut self.refs, replaced);
        }
        let instance = self.registries.get(kind).get(Some(created.tag))?;
        link(&mut self.refs, instance);
        Ok(created.tag)
    }

    /// Get a component by tag, or the current one of its kind.
    pub fn get(&self, kind: ComponentKind, tag: Option<Tag>) -> RegistryResult<&ComponentInstance> {
        self.registries.get(kind).get(tag)
    }

    /// The most recently created live component of a kind.
    pub fn current(&self, kind: ComponentKind) -> Option<&ComponentInstance> {
        self.registries.get(kind).current()
    }

    /// Live components of a kind, in tag order.
    pub fn list(&self, kind: ComponentKind) -> btree_map::Values<'_, Tag, ComponentInstance> {
        self.registries.get(kind).list()
    }

    /// Check whether a component exists.
    pub fn contains(&self, kind: ComponentKind, tag: Tag) -> bool {
        self.registries.get(kind).contains(tag)
    }

    /// Remove a component. Fails while anything references it.
    pub fn remove(&mut self, kind: ComponentKind, tag: Tag) -> RegistryResult<ComponentInstance> {
        match self.registries.get_mut(kind).remove(tag, &self.refs) {
            Ok(removed) => {
                unlink(&mut self.refs, &removed);
                Ok(removed)
            }
            Err(e) => {
                if let RegistryError::ProtectedInstance { reason, .. } = &e {
                    warn!(%kind, %tag, %reason, "removal refused");
                }
                Err(e)
            }
        }
    }

    /// Components referencing `target`.
    pub fn referrers(&self, kind: ComponentKind, tag: Tag) -> Vec<ComponentRef> {
        self.refs.referrers(ComponentRef::new(kind, tag)).collect()
    }

    /// Set one parameter, revalidating the whole map.
    pub fn set_param(
        &mut self,
        kind: ComponentKind,
        tag: Tag,
        name: &str,
        value: impl Into<Value>,
    ) -> RegistryResult<()> {
        let value = value.into();
        self.edit(kind, tag, |params| {
            params.insert(name.to_string(), value);
        })
    }

    /// Clear one parameter. Its default, if any, applies again.
    pub fn unset_param(&mut self, kind: ComponentKind, tag: Tag, name: &str) -> RegistryResult<()> {
        self.edit(kind, tag, |params| {
            params.remove(name);
        })
    }

    /// Replace a component's whole parameter map.
    pub fn update(&mut self, kind: ComponentKind, tag: Tag, params: Params) -> RegistryResult<()> {
        self.edit(kind, tag, |current| *current = params)
    }

    /// Validate parameters for a variant without creating anything.
    pub fn validate(
        &self,
        kind: ComponentKind,
        variant: &str,
        params: &Params,
    ) -> RegistryResult<Params> {
        self.registries.get(kind).validate(variant, params)
    }

    /// Apply `edit` to a copy of the params, revalidate, then commit and
    /// move the instance's references.
    pub(crate) fn edit(
        &mut self,
        kind: ComponentKind,
        tag: Tag,
        edit: impl FnOnce(&mut Params),
    ) -> RegistryResult<()> {
        let pending = self.registries.get(kind).prepare_update(tag, edit)?;
        self.check_targets(&pending)?;

        let referrer = ComponentRef::new(kind, tag);
        let previous = self.registries.get_mut(kind).commit_update(tag, pending)?;
        for target in previous {
            self.refs.remove(target, referrer);
        }
        let instance = self.registries.get(kind).get(Some(tag))?;
        link(&mut self.refs, instance);
        Ok(())
    }

    fn check_targets(&self, pending: &PendingInstance) -> RegistryResult<()> {
        for target in pending.targets() {
            if !self.contains(target.kind, target.tag) {
                return Err(RegistryError::not_found(target.kind, Some(target.tag)));
            }
        }
        Ok(())
    }

    // ==================== Variants ====================

    /// Add a variant to a kind's catalog.
    pub fn register_variant(&mut self, def: VariantDef) -> RegistryResult<()> {
        self.registries.get_mut(def.kind).register_variant(def)
    }

    /// Registered variants of a kind, in registration order.
    pub fn variants(&self, kind: ComponentKind) -> &[VariantDef] {
        self.registries.get(kind).variants()
    }

    pub fn variant(&self, kind: ComponentKind, name: &str) -> Option<&VariantDef> {
        self.registries.get(kind).variant(name)
    }

    // ==================== Session ====================

    /// Drop every component, restart tags and recreate the Global region.
    /// Registered variants survive.
    ///
    /// The configured global damping is attached again. If that fails the
    /// session is still reset, and the error is returned.
    pub fn reset(&mut self) -> RegistryResult<()> {
        for kind in ComponentKind::ALL {
            self.registries.get_mut(kind).reset();
        }
        self.refs.clear();
        info!("session reset");
        self.attach_global_damping()
    }

    /// Flat records for the solver: kinds in handoff order, tags ascending.
    pub fn solver_records(&self) -> Vec<SolverRecord> {
        ComponentKind::ALL
            .iter()
            .flat_map(|kind| self.registries.get(*kind).records())
            .collect()
    }

    fn attach_global_damping(&mut self) -> RegistryResult<()> {
        let Some((variant, params)) = self.config.global_damping.clone() else {
            return Ok(());
        };
        let damping = self.create(ComponentKind::Damping, &variant, params)?;
        self.assign_damping(Tag::FIXED, Some(damping))
    }

    // ==================== Convenience ====================

    pub fn create_handler(&mut self, variant: &str, params: Params) -> RegistryResult<Tag> {
        self.create(ComponentKind::ConstraintHandler, variant, params)
    }

    pub fn create_numberer(&mut self, variant: &str, params: Params) -> RegistryResult<Tag> {
        self.create(ComponentKind::Numberer, variant, params)
    }

    /// The numberer in use.
    pub fn get_numberer(&self) -> RegistryResult<&ComponentInstance> {
        self.get(ComponentKind::Numberer, None)
    }

    pub fn create_system(&mut self, variant: &str, params: Params) -> RegistryResult<Tag> {
        self.create(ComponentKind::System, variant, params)
    }

    pub fn create_pattern(&mut self, variant: &str, params: Params) -> RegistryResult<Tag> {
        self.create(ComponentKind::Pattern, variant, params)
    }

    pub fn create_damping(&mut self, variant: &str, params: Params) -> RegistryResult<Tag> {
        self.create(ComponentKind::Damping, variant, params)
    }

    pub fn create_region(&mut self, variant: &str, params: Params) -> RegistryResult<Tag> {
        self.create(ComponentKind::Region, variant, params)
    }
}

fn build_catalog(config: &SessionConfig) -> RegistryResult<Catalog> {
    let mut builder = CatalogBuilder::new();
    if config.builtins {
        builtins::register_all(&mut builder)?;
    } else {
        builtins::register_essentials(&mut builder)?;
    }
    builder.singleton_policy(config.singleton_policy);
    Ok(builder.build())
}

fn link(refs: &mut ReferenceIndex, instance: &ComponentInstance) {
    let referrer = instance.component_ref();
    for target in instance.references() {
        refs.insert(target, referrer);
    }
}

fn unlink(refs: &mut ReferenceIndex, instance: &ComponentInstance) {
    let referrer = instance.component_ref();
    for target in instance.references() {
        refs.remove(target, referrer);
    }
}
