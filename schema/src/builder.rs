//! CatalogBuilder for assembling a variant catalog.

use crate::{Catalog, ConflictPolicy, KindPolicy, ParamDef, ParamType, VariantDef, VariantRule};
use femcat_core::{ComponentKind, Tag};
use std::collections::{HashMap, HashSet};
use thiserror::Error;

/// Errors in a variant schema or catalog.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum SchemaError {
    #[error("Duplicate {kind} variant: {name}")]
    DuplicateVariant { kind: ComponentKind, name: String },

    #[error("Duplicate parameter {param} in variant {variant}")]
    DuplicateParam { variant: String, param: String },

    #[error("Rule in variant {variant} names unknown parameter {param}")]
    UnknownRuleParam { variant: String, param: String },

    #[error("Parameter {param} of variant {variant} is in an exclusive group and cannot have a default")]
    DefaultInExclusiveGroup { variant: String, param: String },

    #[error("Invalid default for {param} of variant {variant}: {reason}")]
    InvalidDefault {
        variant: String,
        param: String,
        reason: String,
    },

    #[error("Invalid match pattern for {param} of variant {variant}: {pattern}")]
    InvalidPattern {
        variant: String,
        param: String,
        pattern: String,
    },

    #[error("Variant {variant} belongs to {actual}, not {expected}")]
    KindMismatch {
        variant: String,
        expected: ComponentKind,
        actual: ComponentKind,
    },

    #[error("Fixed tag {tag} of variant {variant} is already taken")]
    FixedTagTaken { variant: String, tag: Tag },

    #[error("Variant {variant} is fixed at {tag}, but fixed variants must use tag {}", Tag::FIXED)]
    UnsupportedFixedTag { variant: String, tag: Tag },
}

impl SchemaError {
    pub fn duplicate_variant(kind: ComponentKind, name: impl Into<String>) -> Self {
        Self::DuplicateVariant {
            kind,
            name: name.into(),
        }
    }

    pub fn invalid_default(
        variant: impl Into<String>,
        param: impl Into<String>,
        reason: impl Into<String>,
    ) -> Self {
        Self::InvalidDefault {
            variant: variant.into(),
            param: param.into(),
            reason: reason.into(),
        }
    }
}

/// Result type for schema operations.
pub type SchemaResult<T> = Result<T, SchemaError>;

impl VariantDef {
    /// Check the structural consistency of this descriptor.
    ///
    /// Domain checks of defaults need the validator and happen at registration.
    pub fn check(&self) -> SchemaResult<()> {
        // Allocated tags start at 1, so only the reserved tag can never collide
        if let Some(tag) = self.fixed_tag() {
            if tag != Tag::FIXED {
                return Err(SchemaError::UnsupportedFixedTag {
                    variant: self.name.clone(),
                    tag,
                });
            }
        }

        let mut seen = HashSet::new();
        for param in &self.params {
            if !seen.insert(param.name.as_str()) {
                return Err(SchemaError::DuplicateParam {
                    variant: self.name.clone(),
                    param: param.name.clone(),
                });
            }
            if let Some(pattern) = &param.match_pattern {
                if regex_lite::Regex::new(pattern).is_err() {
                    return Err(SchemaError::InvalidPattern {
                        variant: self.name.clone(),
                        param: param.name.clone(),
                        pattern: pattern.clone(),
                    });
                }
            }
        }

        for rule in &self.rules {
            for name in rule.params() {
                let Some(param) = self.get_param(name) else {
                    return Err(SchemaError::UnknownRuleParam {
                        variant: self.name.clone(),
                        param: name.to_string(),
                    });
                };
                if matches!(rule, VariantRule::Exclusive(_)) && param.default.is_some() {
                    return Err(SchemaError::DefaultInExclusiveGroup {
                        variant: self.name.clone(),
                        param: name.to_string(),
                    });
                }
            }
        }

        for param in &self.params {
            if let Some(default) = &param.default {
                if matches!(param.ty, ParamType::Ref(_)) {
                    return Err(SchemaError::invalid_default(
                        &self.name,
                        &param.name,
                        "references cannot have defaults",
                    ));
                }
                if param.required {
                    return Err(SchemaError::invalid_default(
                        &self.name,
                        &param.name,
                        format!("required parameter has default {}", default),
                    ));
                }
            }
        }

        Ok(())
    }
}

/// Builder for a variant catalog covering every component kind.
#[derive(Debug, Default)]
pub struct CatalogBuilder {
    variants: HashMap<ComponentKind, Vec<VariantDef>>,
    policies: HashMap<ComponentKind, KindPolicy>,
}

impl CatalogBuilder {
    /// Create a new builder. Every kind starts unbounded.
    pub fn new() -> Self {
        Self::default()
    }

    /// Declare the instance policy of a kind.
    pub fn kind_policy(&mut self, kind: ComponentKind, policy: KindPolicy) -> &mut Self {
        self.policies.insert(kind, policy);
        self
    }

    /// Apply one conflict policy to every singleton kind declared so far.
    pub fn singleton_policy(&mut self, conflict: ConflictPolicy) -> &mut Self {
        for policy in self.policies.values_mut() {
            if policy.is_singleton() {
                *policy = KindPolicy::Singleton(conflict);
            }
        }
        self
    }

    /// Add a variant definition.
    pub fn add_variant(&mut self, kind: ComponentKind, name: impl Into<String>) -> VariantBuilder<'_> {
        VariantBuilder {
            def: VariantDef::new(kind, name),
            builder: self,
        }
    }

    /// Add a prebuilt descriptor.
    pub fn add(&mut self, def: VariantDef) -> SchemaResult<()> {
        def.check()?;
        let variants = self.variants.entry(def.kind).or_default();
        if variants.iter().any(|v| v.name == def.name) {
            return Err(SchemaError::duplicate_variant(def.kind, def.name));
        }
        if let Some(tag) = def.fixed_tag() {
            if variants.iter().any(|v| v.fixed_tag() == Some(tag)) {
                return Err(SchemaError::FixedTagTaken {
                    variant: def.name,
                    tag,
                });
            }
        }
        variants.push(def);
        Ok(())
    }

    /// Build the catalog.
    pub fn build(self) -> Catalog {
        Catalog::new(self.variants, self.policies)
    }
}

/// Builder for a single variant inside a catalog.
pub struct VariantBuilder<'a> {
    builder: &'a mut CatalogBuilder,
    def: VariantDef,
}

impl<'a> VariantBuilder<'a> {
    /// Add a parameter.
    pub fn param(mut self, param: ParamDef) -> Self {
        self.def = self.def.param(param);
        self
    }

    /// Declare a mutually exclusive group.
    pub fn exclusive<I, S>(mut self, names: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.def = self.def.exclusive(names);
        self
    }

    /// Declare an ordering between two parameters.
    pub fn ordered(mut self, lower: impl Into<String>, upper: impl Into<String>) -> Self {
        self.def = self.def.ordered(lower, upper);
        self
    }

    /// Mark as a fixed-identity variant.
    pub fn fixed(mut self, tag: Tag) -> Self {
        self.def = self.def.fixed(tag);
        self
    }

    pub fn doc(mut self, doc: impl Into<String>) -> Self {
        self.def = self.def.with_doc(doc);
        self
    }

    /// Finish building this variant.
    pub fn done(self) -> SchemaResult<()> {
        self.builder.add(self.def)
    }
}
