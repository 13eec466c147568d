//! femcat parameter validation
//!
//! Pure checks of caller-supplied parameters against a variant schema:
//! value domains, mutual exclusivity, required fields and range shape.
//! Validation never mutates its input and reports every violation it finds.

mod validator;
mod violation;

pub use validator::{check_defaults, check_value, suggest, validate};
pub use violation::{FieldViolation, ValidationError, ViolationReason};
