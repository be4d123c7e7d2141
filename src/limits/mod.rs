//! Shared account/QoS limit registry abstraction
//!
//! Group CPU caps live in a registry owned by the host scheduler; the
//! engine only rewrites them in place inside the registry's exclusive
//! section. The cap itself is a tagged value ([`CpuCap`]) so the
//! "unlimited" sentinel can never be scaled by accident.

mod memory;

pub use memory::MemoryRegistry;

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Group CPU cap: a finite quantity or the "no limit" sentinel
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CpuCap {
    /// Finite cap in CPUs
    Finite(u64),
    /// No limit; never scaled
    Unlimited,
}

impl CpuCap {
    /// Multiply a finite cap by `factor`, truncating to an integer and
    /// flooring the result at 1 so a partition can never become
    /// unusable. `Unlimited` is returned unchanged.
    pub fn scaled(self, factor: f64) -> Self {
        match self {
            Self::Unlimited => Self::Unlimited,
            Self::Finite(cap) => Self::Finite(((cap as f64 * factor) as u64).max(1)),
        }
    }

    /// Check for the "no limit" sentinel
    pub fn is_unlimited(self) -> bool {
        matches!(self, Self::Unlimited)
    }
}

/// Binding of an account (and optionally a partition) to its limits
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Association {
    /// Account name
    pub account: String,
    /// Partition this association is scoped to (`None` = global)
    pub partition: Option<String>,
    /// Group CPU cap for the association
    pub cpu_cap: CpuCap,
}

/// A quality-of-service class carrying its own limits. QoS records are
/// not partition-scoped; every adjustment touches all of them.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct QosRecord {
    /// QoS name
    pub name: String,
    /// Group CPU cap for the QoS
    pub cpu_cap: CpuCap,
}

/// The two limit tables the registry guards together
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct RegistryData {
    /// Account associations
    pub associations: Vec<Association>,
    /// QoS records
    pub qos: Vec<QosRecord>,
}

/// Errors surfaced by a [`LimitsRegistry`]
#[derive(Error, Debug)]
pub enum RegistryError {
    /// Exclusive access could not be acquired
    #[error("registry write lock unavailable")]
    LockUnavailable,

    /// The durability/reconfiguration hook failed
    #[error("registry persistence failed: {0}")]
    Persist(String),
}

/// Exclusive-access interface to the shared limits registry.
///
/// `with_write` must hold exclusive access to associations and QoS
/// records *together* for the whole closure, so concurrent readers can
/// never observe one table updated and the other stale.
pub trait LimitsRegistry {
    /// Run `mutate` under exclusive write access to both limit tables
    fn with_write(
        &self,
        mutate: &mut dyn FnMut(&mut RegistryData),
    ) -> Result<(), RegistryError>;

    /// Persist/broadcast the current registry contents (opaque host hook)
    fn persist(&self) -> Result<(), RegistryError>;
}
