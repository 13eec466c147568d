//! femcat session
//!
//! The explicit session object a model-building context owns: one registry
//! per component kind, the reverse reference index between them, region
//! graph operations, per-kind manager facades, solver handoff and reporting.

mod config;
mod manager;
mod region;
mod report;
mod session;
mod shared;

pub use config::SessionConfig;
pub use manager::{ComponentManager, RegionManager};
pub use region::{RegionAxis, RegionState};
pub use report::{ComponentSummary, ModelReport};
pub use session::Session;
pub use shared::SharedSession;

pub use femcat_registry::{ProtectionReason, RegistryError, RegistryResult, SolverRecord};
