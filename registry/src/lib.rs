//! femcat registry
//!
//! One registry per component kind: maps variant names to descriptors,
//! validates and constructs instances, allocates tags, enforces singleton
//! and fixed-identity rules, and refuses removals that would leave dangling
//! references.

mod error;
mod index;
mod record;
mod registry;

pub use error::{ProtectionReason, RegistryError, RegistryResult};
pub use index::ReferenceIndex;
pub use record::SolverRecord;
pub use registry::{ComponentRegistry, Created, PendingInstance};
