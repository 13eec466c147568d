//! Validation violation types.

use femcat_core::ComponentKind;
use std::fmt;
use thiserror::Error;

/// Why a field (or group of fields) was rejected.
#[derive(Debug, Clone, PartialEq)]
pub enum ViolationReason {
    /// The variant does not declare this parameter.
    UnknownParameter { suggestion: Option<String> },
    /// A required parameter was not supplied.
    MissingRequired,
    /// Wrong value type. No coercion is attempted.
    TypeMismatch { expected: String, actual: String },
    /// Numeric value outside its declared bounds.
    OutOfRange { value: String, range: String },
    /// Value not in the allowed set.
    NotAllowed { value: String, allowed: String },
    /// List or string length outside its declared bounds.
    BadLength {
        len: usize,
        min: Option<usize>,
        max: Option<usize>,
    },
    /// String does not match the declared pattern.
    PatternMismatch { pattern: String },
    /// Range is not an ordered pair `[start, end]` with `start <= end`.
    MalformedRange { detail: String },
    /// More than one member of an exclusive group is set.
    MutuallyExclusive,
    /// Two ordered parameters are not strictly increasing.
    Ordering,
}

impl fmt::Display for ViolationReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ViolationReason::UnknownParameter { suggestion: None } => {
                write!(f, "unknown parameter")
            }
            ViolationReason::UnknownParameter {
                suggestion: Some(s),
            } => write!(f, "unknown parameter (did you mean `{}`?)", s),
            ViolationReason::MissingRequired => write!(f, "missing required parameter"),
            ViolationReason::TypeMismatch { expected, actual } => {
                write!(f, "expected {}, got {}", expected, actual)
            }
            ViolationReason::OutOfRange { value, range } => {
                write!(f, "value {} is out of range {}", value, range)
            }
            ViolationReason::NotAllowed { value, allowed } => {
                write!(f, "value {} is not one of {}", value, allowed)
            }
            ViolationReason::BadLength { len, min, max } => {
                write!(f, "length {} is outside ", len)?;
                match (min, max) {
                    (Some(a), Some(b)) if a == b => write!(f, "[{}]", a),
                    (Some(a), Some(b)) => write!(f, "[{}..{}]", a, b),
                    (Some(a), None) => write!(f, "[>= {}]", a),
                    (None, Some(b)) => write!(f, "[<= {}]", b),
                    (None, None) => write!(f, "[any]"),
                }
            }
            ViolationReason::PatternMismatch { pattern } => {
                write!(f, "does not match pattern {}", pattern)
            }
            ViolationReason::MalformedRange { detail } => write!(f, "malformed range: {}", detail),
            ViolationReason::MutuallyExclusive => write!(f, "mutually exclusive, set only one"),
            ViolationReason::Ordering => write!(f, "must be strictly increasing"),
        }
    }
}

/// A violation attached to the field(s) it concerns.
#[derive(Debug, Clone, PartialEq)]
pub struct FieldViolation {
    /// Offending parameter names. Group rules cite every member involved.
    pub fields: Vec<String>,
    pub reason: ViolationReason,
}

impl FieldViolation {
    pub fn new(field: impl Into<String>, reason: ViolationReason) -> Self {
        Self {
            fields: vec![field.into()],
            reason,
        }
    }

    pub fn group<I, S>(fields: I, reason: ViolationReason) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            fields: fields.into_iter().map(Into::into).collect(),
            reason,
        }
    }

    /// Check whether this violation cites a field.
    pub fn cites(&self, field: &str) -> bool {
        self.fields.iter().any(|f| f == field)
    }
}

impl fmt::Display for FieldViolation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.fields.join(", "), self.reason)
    }
}

/// Structured validation failure for one variant.
#[derive(Debug, Clone, PartialEq, Error)]
#[error("invalid parameters for {kind} {variant}: {}", join_violations(.violations))]
pub struct ValidationError {
    pub kind: ComponentKind,
    pub variant: String,
    pub violations: Vec<FieldViolation>,
}

impl ValidationError {
    pub fn new(
        kind: ComponentKind,
        variant: impl Into<String>,
        violations: Vec<FieldViolation>,
    ) -> Self {
        Self {
            kind,
            variant: variant.into(),
            violations,
        }
    }

    /// Every field cited by any violation, deduplicated, in order of first mention.
    pub fn fields(&self) -> Vec<&str> {
        let mut fields: Vec<&str> = Vec::new();
        for violation in &self.violations {
            for field in &violation.fields {
                if !fields.contains(&field.as_str()) {
                    fields.push(field);
                }
            }
        }
        fields
    }

    /// Check whether any violation has the given reason (compared by variant only).
    pub fn has_reason(&self, reason: &ViolationReason) -> bool {
        self.violations
            .iter()
            .any(|v| std::mem::discriminant(&v.reason) == std::mem::discriminant(reason))
    }

    /// Violations citing a field.
    pub fn for_field<'a>(&'a self, field: &'a str) -> impl Iterator<Item = &'a FieldViolation> {
        self.violations.iter().filter(move |v| v.cites(field))
    }
}

fn join_violations(violations: &[FieldViolation]) -> String {
    violations
        .iter()
        .map(|v| v.to_string())
        .collect::<Vec<_>>()
        .join("; ")
}
