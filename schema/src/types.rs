//! Schema definition types.

use femcat_core::{ComponentKind, Tag, Value};
use std::fmt;

/// Declared type of a parameter.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ParamType {
    Bool,
    Int,
    Float,
    String,
    /// List of integers (element or node tags).
    IntList,
    /// List of floats.
    FloatList,
    /// Exactly two integers `[start, end]` with `start <= end`.
    Range,
    /// Tag of another component of the given kind.
    Ref(ComponentKind),
}

impl ParamType {
    /// Type name used in diagnostics.
    pub fn name(&self) -> &'static str {
        match self {
            ParamType::Bool => "Bool",
            ParamType::Int => "Int",
            ParamType::Float => "Float",
            ParamType::String => "String",
            ParamType::IntList => "IntList",
            ParamType::FloatList => "FloatList",
            ParamType::Range => "Range",
            ParamType::Ref(_) => "Ref",
        }
    }

    /// Whether values of this type are lists (bounds then apply per item).
    pub fn is_list(&self) -> bool {
        matches!(
            self,
            ParamType::IntList | ParamType::FloatList | ParamType::Range
        )
    }
}

impl fmt::Display for ParamType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ParamType::Ref(kind) => write!(f, "Ref({})", kind),
            other => f.write_str(other.name()),
        }
    }
}

/// A lower or upper bound on a numeric parameter.
#[derive(Debug, Clone, PartialEq)]
pub struct Bound {
    pub value: Value,
    pub inclusive: bool,
}

impl Bound {
    pub fn inclusive(value: impl Into<Value>) -> Self {
        Self {
            value: value.into(),
            inclusive: true,
        }
    }

    pub fn exclusive(value: impl Into<Value>) -> Self {
        Self {
            value: value.into(),
            inclusive: false,
        }
    }

    /// Check `value` against this bound used as a minimum.
    pub fn admits_above(&self, value: &Value) -> bool {
        if self.inclusive {
            value.gte(&self.value)
        } else {
            value.gt(&self.value)
        }
    }

    /// Check `value` against this bound used as a maximum.
    pub fn admits_below(&self, value: &Value) -> bool {
        if self.inclusive {
            value.lte(&self.value)
        } else {
            value.lt(&self.value)
        }
    }
}

/// Parameter definition within a variant.
#[derive(Debug, Clone)]
pub struct ParamDef {
    /// Parameter name.
    pub name: String,
    /// Declared type.
    pub ty: ParamType,
    /// Whether this parameter must be supplied.
    pub required: bool,
    /// Default value if not provided.
    pub default: Option<Value>,
    /// Minimum value constraint (numbers, or each list item).
    pub min: Option<Bound>,
    /// Maximum value constraint (numbers, or each list item).
    pub max: Option<Bound>,
    /// Allowed values (in: [...] constraint).
    pub allowed_values: Option<Vec<Value>>,
    /// Minimum list or string length.
    pub length_min: Option<usize>,
    /// Maximum list or string length.
    pub length_max: Option<usize>,
    /// Match pattern constraint for strings (regex).
    pub match_pattern: Option<String>,
    /// One-line description for reporting.
    pub doc: Option<String>,
}

impl ParamDef {
    pub fn new(name: impl Into<String>, ty: ParamType) -> Self {
        Self {
            name: name.into(),
            ty,
            required: false,
            default: None,
            min: None,
            max: None,
            allowed_values: None,
            length_min: None,
            length_max: None,
            match_pattern: None,
            doc: None,
        }
    }

    pub fn bool(name: impl Into<String>) -> Self {
        Self::new(name, ParamType::Bool)
    }

    pub fn int(name: impl Into<String>) -> Self {
        Self::new(name, ParamType::Int)
    }

    pub fn float(name: impl Into<String>) -> Self {
        Self::new(name, ParamType::Float)
    }

    pub fn string(name: impl Into<String>) -> Self {
        Self::new(name, ParamType::String)
    }

    pub fn int_list(name: impl Into<String>) -> Self {
        Self::new(name, ParamType::IntList)
    }

    pub fn float_list(name: impl Into<String>) -> Self {
        Self::new(name, ParamType::FloatList)
    }

    pub fn range(name: impl Into<String>) -> Self {
        Self::new(name, ParamType::Range)
    }

    pub fn reference(name: impl Into<String>, kind: ComponentKind) -> Self {
        Self::new(name, ParamType::Ref(kind))
    }

    pub fn required(mut self) -> Self {
        self.required = true;
        self
    }

    pub fn with_default(mut self, value: impl Into<Value>) -> Self {
        self.default = Some(value.into());
        self
    }

    /// Inclusive range. Merges rather than replaces: only updates the side that is `Some`.
    pub fn with_range(mut self, min: Option<Value>, max: Option<Value>) -> Self {
        if let Some(min) = min {
            self.min = Some(Bound::inclusive(min));
        }
        if let Some(max) = max {
            self.max = Some(Bound::inclusive(max));
        }
        self
    }

    pub fn with_min(mut self, bound: Bound) -> Self {
        self.min = Some(bound);
        self
    }

    pub fn with_max(mut self, bound: Bound) -> Self {
        self.max = Some(bound);
        self
    }

    /// Strictly greater than zero.
    pub fn positive(self) -> Self {
        let zero = self.zero();
        self.with_min(Bound::exclusive(zero))
    }

    /// Greater than or equal to zero.
    pub fn non_negative(self) -> Self {
        let zero = self.zero();
        self.with_min(Bound::inclusive(zero))
    }

    pub fn with_allowed_values(mut self, values: Vec<Value>) -> Self {
        self.allowed_values = Some(values);
        self
    }

    pub fn with_length(mut self, min: usize, max: usize) -> Self {
        self.length_min = Some(min);
        self.length_max = Some(max);
        self
    }

    pub fn with_exact_length(self, len: usize) -> Self {
        self.with_length(len, len)
    }

    pub fn with_min_length(mut self, min: usize) -> Self {
        self.length_min = Some(min);
        self
    }

    pub fn with_match_pattern(mut self, pattern: impl Into<String>) -> Self {
        self.match_pattern = Some(pattern.into());
        self
    }

    pub fn with_doc(mut self, doc: impl Into<String>) -> Self {
        self.doc = Some(doc.into());
        self
    }

    fn zero(&self) -> Value {
        match self.ty {
            ParamType::Int | ParamType::IntList | ParamType::Range => Value::Int(0),
            _ => Value::Float(0.0),
        }
    }
}

/// Cross-field rule evaluated after per-field checks.
#[derive(Debug, Clone, PartialEq)]
pub enum VariantRule {
    /// At most one of the named parameters may be set.
    Exclusive(Vec<String>),
    /// When both are set, `lower` must be strictly less than `upper`.
    Ordered { lower: String, upper: String },
}

impl VariantRule {
    /// Parameter names this rule mentions.
    pub fn params(&self) -> Vec<&str> {
        match self {
            VariantRule::Exclusive(names) => names.iter().map(|s| s.as_str()).collect(),
            VariantRule::Ordered { lower, upper } => vec![lower.as_str(), upper.as_str()],
        }
    }
}

/// How instances of a variant come into existence.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ConstructionRule {
    /// Created on request with a freshly allocated tag.
    #[default]
    Normal,
    /// Created once by the registry itself with a fixed tag, never created
    /// on request and never removable.
    Fixed { tag: Tag },
}

/// What `create` does when a singleton kind already holds an instance.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ConflictPolicy {
    /// Remove the existing instance and register the new one.
    #[default]
    Replace,
    /// Fail with a singleton conflict.
    Reject,
}

/// Instance cardinality declared for a whole kind.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum KindPolicy {
    #[default]
    Unbounded,
    /// At most one live instance.
    Singleton(ConflictPolicy),
}

impl KindPolicy {
    pub fn is_singleton(&self) -> bool {
        matches!(self, KindPolicy::Singleton(_))
    }

    pub fn max_instances(&self) -> Option<usize> {
        match self {
            KindPolicy::Unbounded => None,
            KindPolicy::Singleton(_) => Some(1),
        }
    }
}

/// Variant descriptor: everything `create` needs to know about one variant.
#[derive(Debug, Clone)]
pub struct VariantDef {
    /// Kind this variant belongs to.
    pub kind: ComponentKind,
    /// Variant name, case-sensitive and unique within the kind.
    pub name: String,
    /// Ordered parameter schema. The order is the solver argument order.
    pub params: Vec<ParamDef>,
    /// Cross-field rules.
    pub rules: Vec<VariantRule>,
    /// Construction rule.
    pub construction: ConstructionRule,
    /// One-line description for reporting.
    pub doc: Option<String>,
}

impl VariantDef {
    pub fn new(kind: ComponentKind, name: impl Into<String>) -> Self {
        Self {
            kind,
            name: name.into(),
            params: Vec::new(),
            rules: Vec::new(),
            construction: ConstructionRule::Normal,
            doc: None,
        }
    }

    /// Append a parameter.
    pub fn param(mut self, param: ParamDef) -> Self {
        self.params.push(param);
        self
    }

    /// Declare a mutually exclusive group.
    pub fn exclusive<I, S>(mut self, names: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.rules
            .push(VariantRule::Exclusive(names.into_iter().map(Into::into).collect()));
        self
    }

    /// Declare that `lower < upper` whenever both are set.
    pub fn ordered(mut self, lower: impl Into<String>, upper: impl Into<String>) -> Self {
        self.rules.push(VariantRule::Ordered {
            lower: lower.into(),
            upper: upper.into(),
        });
        self
    }

    /// Mark as a fixed-identity variant.
    pub fn fixed(mut self, tag: Tag) -> Self {
        self.construction = ConstructionRule::Fixed { tag };
        self
    }

    pub fn with_doc(mut self, doc: impl Into<String>) -> Self {
        self.doc = Some(doc.into());
        self
    }

    /// Get a parameter definition by name.
    pub fn get_param(&self, name: &str) -> Option<&ParamDef> {
        self.params.iter().find(|p| p.name == name)
    }

    /// Check if this variant declares a parameter.
    pub fn has_param(&self, name: &str) -> bool {
        self.get_param(name).is_some()
    }

    /// Parameter names in schema order.
    pub fn param_names(&self) -> impl Iterator<Item = &str> {
        self.params.iter().map(|p| p.name.as_str())
    }

    /// Exclusive groups declared on this variant.
    pub fn exclusive_groups(&self) -> impl Iterator<Item = &[String]> {
        self.rules.iter().filter_map(|r| match r {
            VariantRule::Exclusive(names) => Some(names.as_slice()),
            VariantRule::Ordered { .. } => None,
        })
    }

    /// Other members of the exclusive group containing `name`.
    pub fn exclusive_partners<'a>(&'a self, name: &'a str) -> impl Iterator<Item = &'a str> + 'a {
        self.exclusive_groups()
            .filter(move |group| group.iter().any(|n| n == name))
            .flat_map(|group| group.iter().map(|n| n.as_str()))
            .filter(move |n| *n != name)
    }

    /// The fixed tag, if this is a fixed-identity variant.
    pub fn fixed_tag(&self) -> Option<Tag> {
        match self.construction {
            ConstructionRule::Fixed { tag } => Some(tag),
            ConstructionRule::Normal => None,
        }
    }

    /// Parameters that reference other components, with the target kind.
    pub fn reference_params(&self) -> impl Iterator<Item = (&str, ComponentKind)> {
        self.params.iter().filter_map(|p| match p.ty {
            ParamType::Ref(kind) => Some((p.name.as_str(), kind)),
            _ => None,
        })
    }
}
