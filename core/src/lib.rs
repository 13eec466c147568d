//! femcat core types
//!
//! This crate provides the foundational types shared by every femcat crate:
//! - Component kinds and identity types (ComponentKind, Tag, ComponentRef)
//! - Parameter values (the Value enum and the Params map)
//! - Component instances (ComponentInstance)

mod id;
mod instance;
mod value;

pub use id::*;
pub use instance::*;
pub use value::*;
