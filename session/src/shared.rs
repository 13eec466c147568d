//! Thread-safe session handle.

use femcat_registry::RegistryResult;
use parking_lot::Mutex;
use std::sync::Arc;

use crate::{Session, SessionConfig};

/// A session shared between threads.
///
/// Every call holds the lock for its whole check-then-act sequence, so
/// reference checks and commits never interleave.
#[derive(Debug, Clone)]
pub struct SharedSession {
    inner: Arc<Mutex<Session>>,
}

impl SharedSession {
    pub fn new(session: Session) -> Self {
        Self {
            inner: Arc::new(Mutex::new(session)),
        }
    }

    pub fn with_config(config: SessionConfig) -> RegistryResult<Self> {
        Session::with_config(config).map(Self::new)
    }

    /// Run a read-only operation under the lock.
    pub fn with<R>(&self, f: impl FnOnce(&Session) -> R) -> R {
        f(&self.inner.lock())
    }

    /// Run a mutating operation under the lock.
    pub fn with_mut<R>(&self, f: impl FnOnce(&mut Session) -> R) -> R {
        f(&mut self.inner.lock())
    }
}
