//! femcat schema
//!
//! Variant descriptors for every component kind: parameter schemas,
//! cross-field rules, construction rules and per-kind singleton policies.
//! The built-in catalog lives in [`builtins`].

mod builder;
pub mod builtins;
mod catalog;
mod types;

pub use builder::{CatalogBuilder, SchemaError, SchemaResult, VariantBuilder};
pub use catalog::Catalog;
pub use types::*;
