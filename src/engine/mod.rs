//! Adjustment engine entry point
//!
//! Orchestrates sampling, decision, and mutation for one partition per
//! submission event (or every partition on a broadcast submission). The
//! engine is an advisory side effect of submission: it never fails the
//! triggering call, and every internal error is logged and swallowed.

pub mod decision;
pub mod mutator;
pub mod sampler;

pub use decision::{decide, Adjustment, HYSTERESIS_BAND};
pub use mutator::apply_adjustment;
pub use sampler::{sample_idle_ratio, sample_partition, PartitionSnapshot};

use std::sync::{Arc, Mutex, MutexGuard};

use chrono::{DateTime, Utc};
use tracing::{debug, info, warn};

use crate::cluster::ClusterView;
use crate::config::{PartitionPolicy, PolicyStore};
use crate::error::{DynLimitsError, Result};
use crate::limits::LimitsRegistry;

/// Reactive limit-adjustment engine bound to a cluster view and a
/// limits registry
pub struct Engine<C, R> {
    policies: Mutex<PolicyStore>,
    cluster: Arc<C>,
    registry: Arc<R>,
}

impl<C, R> Engine<C, R>
where
    C: ClusterView,
    R: LimitsRegistry,
{
    /// Build an engine from a policy configuration string
    pub fn new(policy_config: &str, cluster: Arc<C>, registry: Arc<R>) -> Self {
        Self::with_store(PolicyStore::load(policy_config), cluster, registry)
    }

    /// Build an engine around an already-loaded policy store
    pub fn with_store(policies: PolicyStore, cluster: Arc<C>, registry: Arc<R>) -> Self {
        Self {
            policies: Mutex::new(policies),
            cluster,
            registry,
        }
    }

    /// Handle one submission event.
    ///
    /// With a partition name, adjusts that partition (unknown names are
    /// a silent no-op). Without one, adjusts every known partition
    /// independently; one partition's failure never stops the rest.
    /// Always returns success to the caller.
    pub fn on_submission(&self, partition: Option<&str>) {
        let now = Utc::now();
        match partition {
            Some(name) => {
                if self.cluster.partition_members(name).is_none() {
                    debug!(partition = name, "submission for unknown partition, skipping");
                    return;
                }
                self.adjust_partition_logged(name, now);
            }
            None => {
                for name in self.cluster.partitions() {
                    self.adjust_partition_logged(&name, now);
                }
            }
        }
    }

    /// Handle a job-modify event. Modification never triggers an
    /// adjustment; this exists for host hook parity.
    pub fn on_modify(&self) {}

    /// Copy of the current per-partition policies, cooldown stamps
    /// included
    pub fn policy_snapshot(&self) -> Vec<PartitionPolicy> {
        self.lock_policies().iter().cloned().collect()
    }

    /// Policy snapshot as JSON, for host-side introspection endpoints
    pub fn policy_snapshot_json(&self) -> serde_json::Value {
        serde_json::to_value(self.policy_snapshot()).unwrap_or_default()
    }

    fn adjust_partition_logged(&self, partition: &str, now: DateTime<Utc>) {
        match self.adjust_partition(partition, now) {
            Ok(adjustment) => {
                if adjustment != Adjustment::NoOp {
                    info!(partition, ?adjustment, "partition limits adjusted");
                }
            }
            Err(err) if err.is_retryable() => {
                warn!(partition, error = %err, "adjustment abandoned, will retry on next submission");
            }
            Err(err) => {
                debug!(partition, error = %err, "skipping partition adjustment");
            }
        }
    }

    /// Run the sample -> decide -> apply sequence for one partition.
    ///
    /// Sampling happens before the registry's exclusive section is
    /// entered, so two concurrent submissions can both act on stale
    /// snapshots and double-apply a step. That window is an accepted
    /// imprecision of this engine; the cooldown stamp bounds how often
    /// it can occur.
    fn adjust_partition(&self, partition: &str, now: DateTime<Utc>) -> Result<Adjustment> {
        let idle_ratio = sampler::sample_idle_ratio(self.cluster.as_ref(), partition)?;

        let policy = self
            .lock_policies()
            .resolve(partition)
            .cloned()
            .ok_or_else(|| DynLimitsError::PolicyNotFound(partition.to_string()))?;

        let adjustment = decision::decide(idle_ratio, &policy, now);
        if adjustment == Adjustment::NoOp {
            debug!(
                partition,
                idle_ratio,
                threshold = policy.threshold,
                "no adjustment needed"
            );
            return Ok(Adjustment::NoOp);
        }

        mutator::apply_adjustment(self.registry.as_ref(), partition, adjustment, policy.rate)?;

        // Stamp the cooldown only after both mutation and persistence
        // succeeded; an abandoned attempt must retry from the same state.
        if let Some(entry) = self.lock_policies().resolve_mut(partition) {
            entry.last_adjustment = Some(now);
        }
        Ok(adjustment)
    }

    fn lock_policies(&self) -> MutexGuard<'_, PolicyStore> {
        // A panic while holding the store cannot corrupt it (plain data),
        // so recover from poisoning instead of propagating it.
        match self.policies.lock() {
            Ok(guard) => guard,
            Err(poisoned) => poisoned.into_inner(),
        }
    }
}
