//! Parameter validation against a variant schema.

use crate::{FieldViolation, ValidationError, ViolationReason};
use femcat_core::{Params, Value};
use femcat_schema::{ParamDef, ParamType, SchemaError, SchemaResult, VariantDef, VariantRule};

/// Validate `params` for `variant`.
///
/// On success returns a new map with defaults applied to absent optional
/// parameters. On failure returns every violation found; the input is never
/// modified and no defaults are applied.
pub fn validate(variant: &VariantDef, params: &Params) -> Result<Params, ValidationError> {
    let mut violations = Vec::new();

    // Unknown names and per-field checks
    for (name, value) in params {
        match variant.get_param(name) {
            Some(def) => {
                for reason in check_value(def, value) {
                    violations.push(FieldViolation::new(name, reason));
                }
            }
            None => violations.push(FieldViolation::new(
                name,
                ViolationReason::UnknownParameter {
                    suggestion: suggest(name, variant.param_names()),
                },
            )),
        }
    }

    // Required fields
    for def in &variant.params {
        if def.required && !params.contains_key(&def.name) {
            violations.push(FieldViolation::new(
                &def.name,
                ViolationReason::MissingRequired,
            ));
        }
    }

    // Cross-field rules
    for rule in &variant.rules {
        match rule {
            VariantRule::Exclusive(group) => {
                let set: Vec<&String> = group.iter().filter(|n| params.contains_key(*n)).collect();
                if set.len() > 1 {
                    violations.push(FieldViolation::group(
                        set,
                        ViolationReason::MutuallyExclusive,
                    ));
                }
            }
            VariantRule::Ordered { lower, upper } => {
                if let (Some(lo), Some(hi)) = (params.get(lower), params.get(upper)) {
                    // Only compare values that passed their type check
                    let comparable = matches!(
                        (lo, hi),
                        (Value::Int(_), Value::Int(_)) | (Value::Float(_), Value::Float(_))
                    );
                    if comparable && !lo.lt(hi) {
                        violations.push(FieldViolation::group(
                            [lower, upper],
                            ViolationReason::Ordering,
                        ));
                    }
                }
            }
        }
    }

    if !violations.is_empty() {
        return Err(ValidationError::new(
            variant.kind,
            &variant.name,
            violations,
        ));
    }

    let mut validated = params.clone();
    for def in &variant.params {
        if !validated.contains_key(&def.name) {
            if let Some(default) = &def.default {
                validated.insert(def.name.clone(), default.clone());
            }
        }
    }
    Ok(validated)
}

/// Check a single value against its parameter definition.
pub fn check_value(def: &ParamDef, value: &Value) -> Vec<ViolationReason> {
    let mut reasons = Vec::new();

    match (def.ty, value) {
        (ParamType::Bool, Value::Bool(_)) => {}
        (ParamType::Int, Value::Int(_)) => check_bounds(def, value, &mut reasons),
        (ParamType::Float, Value::Float(f)) => {
            if !f.is_finite() {
                reasons.push(ViolationReason::OutOfRange {
                    value: value.to_string(),
                    range: "(finite)".to_string(),
                });
            } else {
                check_bounds(def, value, &mut reasons);
            }
        }
        (ParamType::String, Value::String(s)) => {
            check_length(def, s.chars().count(), &mut reasons);
            if let Some(pattern) = &def.match_pattern {
                // Patterns are checked when the schema is registered
                let matched = regex_lite::Regex::new(pattern)
                    .map(|re| re.is_match(s))
                    .unwrap_or(false);
                if !matched {
                    reasons.push(ViolationReason::PatternMismatch {
                        pattern: pattern.clone(),
                    });
                }
            }
        }
        (ParamType::IntList, Value::List(items)) => {
            check_items(def, items, "Int", |v| matches!(v, Value::Int(_)), &mut reasons)
        }
        (ParamType::FloatList, Value::List(items)) => check_items(
            def,
            items,
            "Float",
            |v| matches!(v, Value::Float(f) if f.is_finite()),
            &mut reasons,
        ),
        (ParamType::Range, Value::List(items)) => check_range(def, items, &mut reasons),
        (ParamType::Ref(_), Value::Ref(_)) => {}
        (ty, actual) => reasons.push(ViolationReason::TypeMismatch {
            expected: ty.to_string(),
            actual: describe_type(actual),
        }),
    }

    if reasons.is_empty() {
        check_allowed(def, value, &mut reasons);
    }
    reasons
}

/// Check that every default in a schema satisfies its own parameter domain.
pub fn check_defaults(variant: &VariantDef) -> SchemaResult<()> {
    for def in &variant.params {
        if let Some(default) = &def.default {
            if let Some(reason) = check_value(def, default).into_iter().next() {
                return Err(SchemaError::invalid_default(
                    &variant.name,
                    &def.name,
                    reason.to_string(),
                ));
            }
        }
    }
    Ok(())
}

/// Suggest the closest candidate name, if one is within edit distance 3.
pub fn suggest<'a>(name: &str, candidates: impl Iterator<Item = &'a str>) -> Option<String> {
    candidates
        .map(|c| (strsim::levenshtein(name, c), c))
        .filter(|(d, _)| *d <= 3)
        .min_by_key(|(d, _)| *d)
        .map(|(_, c)| c.to_string())
}

fn check_bounds(def: &ParamDef, value: &Value, reasons: &mut Vec<ViolationReason>) {
    let above = def.min.as_ref().map_or(true, |b| b.admits_above(value));
    let below = def.max.as_ref().map_or(true, |b| b.admits_below(value));
    if !(above && below) {
        reasons.push(ViolationReason::OutOfRange {
            value: value.to_string(),
            range: describe_bounds(def),
        });
    }
}

fn check_length(def: &ParamDef, len: usize, reasons: &mut Vec<ViolationReason>) {
    let too_short = def.length_min.is_some_and(|min| len < min);
    let too_long = def.length_max.is_some_and(|max| len > max);
    if too_short || too_long {
        reasons.push(ViolationReason::BadLength {
            len,
            min: def.length_min,
            max: def.length_max,
        });
    }
}

fn check_items(
    def: &ParamDef,
    items: &[Value],
    item_type: &str,
    is_item: impl Fn(&Value) -> bool,
    reasons: &mut Vec<ViolationReason>,
) {
    if let Some(bad) = items.iter().find(|v| !is_item(v)) {
        reasons.push(ViolationReason::TypeMismatch {
            expected: format!("{} ({} items)", def.ty, item_type),
            actual: format!("List containing {}", bad),
        });
        return;
    }
    check_length(def, items.len(), reasons);
    for item in items {
        check_bounds(def, item, reasons);
        if !reasons.is_empty() {
            // One out-of-range report per field is enough
            break;
        }
    }
}

fn check_range(def: &ParamDef, items: &[Value], reasons: &mut Vec<ViolationReason>) {
    let (start, end) = match items {
        [Value::Int(start), Value::Int(end)] => (*start, *end),
        [_, _] => {
            reasons.push(ViolationReason::MalformedRange {
                detail: "start and end must be integers".to_string(),
            });
            return;
        }
        _ => {
            reasons.push(ViolationReason::MalformedRange {
                detail: format!("expected [start, end], got {} items", items.len()),
            });
            return;
        }
    };
    if start > end {
        reasons.push(ViolationReason::MalformedRange {
            detail: format!("start {} > end {}", start, end),
        });
        return;
    }
    for item in items {
        check_bounds(def, item, reasons);
        if !reasons.is_empty() {
            break;
        }
    }
}

fn check_allowed(def: &ParamDef, value: &Value, reasons: &mut Vec<ViolationReason>) {
    if let Some(allowed) = &def.allowed_values {
        if !allowed.contains(value) {
            reasons.push(ViolationReason::NotAllowed {
                value: value.to_string(),
                allowed: Value::List(allowed.clone()).to_string(),
            });
        }
    }
}

fn describe_bounds(def: &ParamDef) -> String {
    let lower = def.min.as_ref().map(|b| {
        let bracket = if b.inclusive { "[" } else { "(" };
        format!("{}{}", bracket, b.value)
    });
    let upper = def.max.as_ref().map(|b| {
        let bracket = if b.inclusive { "]" } else { ")" };
        format!("{}{}", b.value, bracket)
    });
    match (lower, upper) {
        (Some(lo), Some(hi)) => format!("{}..{}", lo, hi),
        (Some(lo), None) => format!("{}..)", lo),
        (None, Some(hi)) => format!("(..{}", hi),
        (None, None) => "(..)".to_string(),
    }
}

fn describe_type(value: &Value) -> String {
    match value {
        Value::List(items) => match items.first() {
            Some(first) => format!("List of {}", first.type_name()),
            None => "empty List".to_string(),
        },
        other => other.type_name().to_string(),
    }
}
