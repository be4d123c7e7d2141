//! In-memory limits registry
//!
//! `RwLock`-backed [`LimitsRegistry`] for embedding hosts and tests.
//! Lock and persistence failures can be injected to exercise the
//! engine's abandonment paths.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::RwLock;

use super::{LimitsRegistry, RegistryData, RegistryError};

/// In-memory [`LimitsRegistry`] implementation
#[derive(Debug, Default)]
pub struct MemoryRegistry {
    data: RwLock<RegistryData>,
    fail_lock: AtomicBool,
    fail_persist: AtomicBool,
}

impl MemoryRegistry {
    /// Create a registry seeded with the given tables
    pub fn new(data: RegistryData) -> Self {
        Self {
            data: RwLock::new(data),
            fail_lock: AtomicBool::new(false),
            fail_persist: AtomicBool::new(false),
        }
    }

    /// Snapshot the current registry contents
    pub fn snapshot(&self) -> RegistryData {
        self.data.read().map(|d| (*d).clone()).unwrap_or_default()
    }

    /// Make subsequent `with_write` calls fail with `LockUnavailable`
    pub fn fail_next_lock(&self, fail: bool) {
        self.fail_lock.store(fail, Ordering::SeqCst);
    }

    /// Make subsequent `persist` calls fail
    pub fn fail_next_persist(&self, fail: bool) {
        self.fail_persist.store(fail, Ordering::SeqCst);
    }
}

impl LimitsRegistry for MemoryRegistry {
    fn with_write(
        &self,
        mutate: &mut dyn FnMut(&mut RegistryData),
    ) -> Result<(), RegistryError> {
        if self.fail_lock.load(Ordering::SeqCst) {
            return Err(RegistryError::LockUnavailable);
        }
        let mut guard = self.data.write().map_err(|_| RegistryError::LockUnavailable)?;
        mutate(&mut guard);
        Ok(())
    }

    fn persist(&self) -> Result<(), RegistryError> {
        if self.fail_persist.load(Ordering::SeqCst) {
            return Err(RegistryError::Persist("injected failure".to_string()));
        }
        Ok(())
    }
}
