//! Session configuration.

use femcat_core::Params;
use femcat_schema::ConflictPolicy;

/// Options fixed when a session is created.
#[derive(Debug, Clone, PartialEq)]
pub struct SessionConfig {
    /// Register the built-in variant catalog. Without it a session only knows
    /// the Global region and variants registered later.
    pub builtins: bool,
    /// Conflict policy applied to every singleton kind.
    pub singleton_policy: ConflictPolicy,
    /// Damping (variant name, params) attached to the Global region at
    /// initialization and after every reset.
    pub global_damping: Option<(String, Params)>,
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            builtins: true,
            singleton_policy: ConflictPolicy::Replace,
            global_damping: None,
        }
    }
}

impl SessionConfig {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_builtins(mut self, builtins: bool) -> Self {
        self.builtins = builtins;
        self
    }

    pub fn with_singleton_policy(mut self, policy: ConflictPolicy) -> Self {
        self.singleton_policy = policy;
        self
    }

    pub fn with_global_damping(mut self, variant: impl Into<String>, params: Params) -> Self {
        self.global_damping = Some((variant.into(), params));
        self
    }
}
