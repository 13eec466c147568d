//! The ComponentRegistry - variants and live instances of one kind.

use crate::{ProtectionReason, ReferenceIndex, RegistryError, RegistryResult, SolverRecord};
use femcat_core::{ComponentInstance, ComponentKind, ComponentRef, Params, Tag};
use femcat_schema::{Catalog, ConflictPolicy, KindPolicy, SchemaError, VariantDef};
use femcat_validate::{check_defaults, suggest, validate};
use std::collections::{btree_map, BTreeMap};
use tracing::{debug, warn};

/// Validated parameters waiting to become an instance.
///
/// Produced by [`ComponentRegistry::prepare`] and [`ComponentRegistry::prepare_update`];
/// nothing in the registry changes until it is committed.
#[derive(Debug, Clone, PartialEq)]
pub struct PendingInstance {
    pub variant: String,
    /// Parameters with defaults applied.
    pub params: Params,
    /// Outgoing references found in `Ref` parameters.
    pub references: Vec<(String, ComponentRef)>,
}

impl PendingInstance {
    /// Referenced components, without parameter names.
    pub fn targets(&self) -> impl Iterator<Item = ComponentRef> + '_ {
        self.references.iter().map(|(_, r)| *r)
    }
}

/// Outcome of a successful commit.
#[derive(Debug, Clone, PartialEq)]
pub struct Created {
    pub tag: Tag,
    /// Singleton instance displaced by this one.
    pub replaced: Option<ComponentInstance>,
}

/// Hands out tags in increasing order, starting at 1. Tags are never reused.
#[derive(Debug, Clone)]
struct TagAllocator {
    next: u32,
}

impl TagAllocator {
    fn new() -> Self {
        Self { next: 1 }
    }

    fn allocate(&mut self) -> Tag {
        let tag = Tag::new(self.next);
        self.next += 1;
        tag
    }

    fn peek(&self) -> Tag {
        Tag::new(self.next)
    }
}

/// Registry for one component kind.
///
/// Owns the kind's variant descriptors and its live instances keyed by tag.
/// Cross-kind reference checks need a [`ReferenceIndex`] supplied by the caller.
#[derive(Debug, Clone)]
pub struct ComponentRegistry {
    kind: ComponentKind,
    policy: KindPolicy,
    /// Variant descriptors, in registration order.
    variants: Vec<VariantDef>,
    /// Live instances by tag.
    instances: BTreeMap<Tag, ComponentInstance>,
    /// Fixed instances as first created, restored on reset.
    fixed: Vec<ComponentInstance>,
    tags: TagAllocator,
}

impl ComponentRegistry {
    /// Create an empty registry.
    pub fn new(kind: ComponentKind, policy: KindPolicy) -> Self {
        Self {
            kind,
            policy,
            variants: Vec::new(),
            instances: BTreeMap::new(),
            fixed: Vec::new(),
            tags: TagAllocator::new(),
        }
    }

    /// Create a registry seeded with a catalog's variants for `kind`.
    pub fn from_catalog(kind: ComponentKind, catalog: &Catalog) -> RegistryResult<Self> {
        let mut registry = Self::new(kind, catalog.policy(kind));
        for def in catalog.variants(kind) {
            registry.register_variant(def.clone())?;
        }
        Ok(registry)
    }

    // ==================== Variants ====================

    /// Register a variant descriptor.
    ///
    /// A fixed variant is instantiated immediately from its defaults.
    pub fn register_variant(&mut self, def: VariantDef) -> RegistryResult<()> {
        if def.kind != self.kind {
            return Err(SchemaError::KindMismatch {
                variant: def.name,
                expected: self.kind,
                actual: def.kind,
            }
            .into());
        }
        def.check()?;
        check_defaults(&def)?;
        if self.variant(&def.name).is_some() {
            return Err(RegistryError::DuplicateVariant {
                kind: self.kind,
                name: def.name,
            });
        }

        if let Some(tag) = def.fixed_tag() {
            if let (true, Some(existing)) = (self.policy.is_singleton(), self.current()) {
                let existing = existing.tag;
                return Err(RegistryError::singleton_conflict(self.kind, def.name, existing));
            }
            if self.instances.contains_key(&tag) {
                return Err(SchemaError::FixedTagTaken {
                    variant: def.name,
                    tag,
                }
                .into());
            }
            let params = validate(&def, &Params::new())?;
            let instance = ComponentInstance::new(self.kind, tag, &def.name, params, Vec::new());
            debug!(kind = %self.kind, %tag, variant = %def.name, "fixed instance created");
            self.instances.insert(tag, instance.clone());
            self.fixed.push(instance);
        }

        debug!(kind = %self.kind, variant = %def.name, "variant registered");
        self.variants.push(def);
        Ok(())
    }

    /// Get a variant descriptor by name.
    pub fn variant(&self, name: &str) -> Option<&VariantDef> {
        self.variants.iter().find(|v| v.name == name)
    }

    /// All variant descriptors, in registration order.
    pub fn variants(&self) -> &[VariantDef] {
        &self.variants
    }

    pub fn variant_names(&self) -> impl Iterator<Item = &str> {
        self.variants.iter().map(|v| v.name.as_str())
    }

    /// Look up a variant, reporting the available names when it is unknown.
    pub fn resolve(&self, name: &str) -> RegistryResult<&VariantDef> {
        self.variant(name)
            .ok_or_else(|| RegistryError::UnknownVariant {
                kind: self.kind,
                name: name.to_string(),
                available: self.variant_names().map(String::from).collect(),
                suggestion: suggest(name, self.variant_names()),
            })
    }

    // ==================== Creation ====================

    /// Validate a creation request without changing anything.
    pub fn prepare(&self, name: &str, params: &Params) -> RegistryResult<PendingInstance> {
        let def = self.resolve(name)?;
        if let Some(tag) = def.fixed_tag() {
            return Err(RegistryError::singleton_conflict(self.kind, name, tag));
        }
        let params = validate(def, params)?;
        Ok(PendingInstance {
            variant: def.name.clone(),
            references: collect_references(def, &params),
            params,
        })
    }

    /// Turn a prepared request into a live instance.
    ///
    /// Enforces the kind's singleton policy. The tag is allocated only once
    /// every check has passed. Callers are responsible for checking that the
    /// pending references exist.
    pub fn commit(
        &mut self,
        pending: PendingInstance,
        refs: &ReferenceIndex,
    ) -> RegistryResult<Created> {
        let mut replaced = None;
        if let KindPolicy::Singleton(conflict) = self.policy {
            if let Some(existing) = self.instances.values().next_back() {
                let existing_tag = existing.tag;
                match conflict {
                    ConflictPolicy::Reject => {
                        return Err(RegistryError::singleton_conflict(
                            self.kind,
                            pending.variant,
                            existing_tag,
                        ));
                    }
                    ConflictPolicy::Replace => {
                        if self.is_fixed(existing) {
                            return Err(RegistryError::protected(
                                self.kind,
                                existing_tag,
                                ProtectionReason::Fixed,
                            ));
                        }
                        self.check_unreferenced(existing_tag, refs)?;
                        warn!(
                            kind = %self.kind,
                            tag = %existing_tag,
                            variant = %existing.variant,
                            replacement = %pending.variant,
                            "singleton replaced"
                        );
                        replaced = self.instances.remove(&existing_tag);
                    }
                }
            }
        }

        let tag = self.tags.allocate();
        let instance = ComponentInstance::new(
            self.kind,
            tag,
            pending.variant,
            pending.params,
            pending.references,
        );
        debug!(kind = %self.kind, %tag, variant = %instance.variant, "instance created");
        self.instances.insert(tag, instance);
        Ok(Created { tag, replaced })
    }

    /// Prepare and commit in one step.
    pub fn create(
        &mut self,
        name: &str,
        params: &Params,
        refs: &ReferenceIndex,
    ) -> RegistryResult<Created> {
        let pending = self.prepare(name, params)?;
        self.commit(pending, refs)
    }

    // ==================== Lookup ====================

    /// Get an instance by tag, or the current one when `tag` is `None`.
    pub fn get(&self, tag: Option<Tag>) -> RegistryResult<&ComponentInstance> {
        let instance = match tag {
            Some(tag) => self.instances.get(&tag),
            None => self.current(),
        };
        instance.ok_or_else(|| RegistryError::not_found(self.kind, tag))
    }

    /// The most recently created instance still alive.
    pub fn current(&self) -> Option<&ComponentInstance> {
        self.instances.values().next_back()
    }

    pub fn contains(&self, tag: Tag) -> bool {
        self.instances.contains_key(&tag)
    }

    /// Live instances in tag order.
    pub fn list(&self) -> btree_map::Values<'_, Tag, ComponentInstance> {
        self.instances.values()
    }

    pub fn len(&self) -> usize {
        self.instances.len()
    }

    pub fn is_empty(&self) -> bool {
        self.instances.is_empty()
    }

    /// The tag the next created instance will get.
    pub fn next_tag(&self) -> Tag {
        self.tags.peek()
    }

    // ==================== Removal ====================

    /// Remove an instance. Fixed and referenced instances are protected.
    pub fn remove(&mut self, tag: Tag, refs: &ReferenceIndex) -> RegistryResult<ComponentInstance> {
        let instance = self
            .instances
            .get(&tag)
            .ok_or_else(|| RegistryError::not_found(self.kind, Some(tag)))?;
        if self.is_fixed(instance) {
            return Err(RegistryError::protected(
                self.kind,
                tag,
                ProtectionReason::Fixed,
            ));
        }
        self.check_unreferenced(tag, refs)?;

        let removed = self
            .instances
            .remove(&tag)
            .ok_or_else(|| RegistryError::not_found(self.kind, Some(tag)))?;
        debug!(kind = %self.kind, %tag, variant = %removed.variant, "instance removed");
        Ok(removed)
    }

    /// Check whether an instance came from a fixed variant.
    pub fn is_fixed(&self, instance: &ComponentInstance) -> bool {
        self.variant(&instance.variant)
            .and_then(VariantDef::fixed_tag)
            .is_some()
    }

    fn check_unreferenced(&self, tag: Tag, refs: &ReferenceIndex) -> RegistryResult<()> {
        let target = ComponentRef::new(self.kind, tag);
        let referrers: Vec<ComponentRef> = refs.referrers(target).collect();
        if referrers.is_empty() {
            Ok(())
        } else {
            Err(RegistryError::protected(
                self.kind,
                tag,
                ProtectionReason::ReferencedBy(referrers),
            ))
        }
    }

    // ==================== Update ====================

    /// Revalidate an instance's parameters after applying `edit` to a copy.
    ///
    /// The instance itself is untouched; commit the result with
    /// [`ComponentRegistry::commit_update`].
    pub fn prepare_update(
        &self,
        tag: Tag,
        edit: impl FnOnce(&mut Params),
    ) -> RegistryResult<PendingInstance> {
        let instance = self.get(Some(tag))?;
        let def = self.resolve(&instance.variant)?;
        let mut params = instance.params.clone();
        edit(&mut params);
        let params = validate(def, &params)?;
        Ok(PendingInstance {
            variant: def.name.clone(),
            references: collect_references(def, &params),
            params,
        })
    }

    /// Validate `params` for a variant without creating anything.
    pub fn validate(&self, name: &str, params: &Params) -> RegistryResult<Params> {
        let def = self.resolve(name)?;
        Ok(validate(def, params)?)
    }

    /// Replace an instance's whole parameter map, validating first.
    ///
    /// Returns the references the instance held before.
    pub fn update(&mut self, tag: Tag, params: &Params) -> RegistryResult<Vec<ComponentRef>> {
        let pending = self.prepare_update(tag, |current| *current = params.clone())?;
        self.commit_update(tag, pending)
    }

    /// Apply a prepared update. Returns the references the instance held before.
    pub fn commit_update(
        &mut self,
        tag: Tag,
        pending: PendingInstance,
    ) -> RegistryResult<Vec<ComponentRef>> {
        let instance = self
            .instances
            .get_mut(&tag)
            .ok_or_else(|| RegistryError::not_found(self.kind, Some(tag)))?;
        let previous = instance.references().collect();
        instance.replace_params(pending.params, pending.references);
        debug!(kind = %self.kind, %tag, version = instance.version, "instance updated");
        Ok(previous)
    }

    // ==================== Session ====================

    /// Drop every instance and restart tag numbering. Variants are kept and
    /// fixed instances are restored to their initial state.
    pub fn reset(&mut self) {
        self.instances.clear();
        self.tags = TagAllocator::new();
        for instance in &self.fixed {
            self.instances.insert(instance.tag, instance.clone());
        }
    }

    /// Solver records for every live instance, in tag order.
    pub fn records(&self) -> impl Iterator<Item = SolverRecord> + '_ {
        self.instances.values().filter_map(move |instance| {
            self.variant(&instance.variant)
                .map(|def| SolverRecord::new(instance, def))
        })
    }
}

/// Resolve the `Ref` parameters of validated params to component references.
fn collect_references(def: &VariantDef, params: &Params) -> Vec<(String, ComponentRef)> {
    def.reference_params()
        .filter_map(|(name, kind)| {
            params
                .get(name)
                .and_then(|v| v.as_ref_tag())
                .map(|tag| (name.to_string(), ComponentRef::new(kind, tag)))
        })
        .collect()
}
