//! Partition utilization sampling
//!
//! Computes the fraction of a partition's CPU capacity that is currently
//! idle, straight from the live node registry. Snapshots are derived
//! fresh on every call and never cached.

use tracing::debug;

use crate::cluster::{ClusterView, NodeState};
use crate::error::{DynLimitsError, Result};

/// Capacity totals for one partition at one instant
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct PartitionSnapshot {
    /// Summed CPU capacity of all usable member nodes
    pub total_cpus: u64,
    /// Summed unallocated CPUs across those nodes
    pub idle_cpus: u64,
}

impl PartitionSnapshot {
    /// Idle fraction in `[0, 1]`, or `None` when total capacity is zero
    pub fn idle_ratio(&self) -> Option<f64> {
        if self.total_cpus == 0 {
            None
        } else {
            Some(self.idle_cpus as f64 / self.total_cpus as f64)
        }
    }
}

/// Sum capacity over a partition's members.
///
/// Down nodes contribute nothing. Idle nodes contribute their full
/// capacity to both totals; busy nodes contribute their unallocated
/// remainder to the idle total. Pure summation, so the result does not
/// depend on member iteration order.
pub fn sample_partition<C>(cluster: &C, partition: &str) -> Result<PartitionSnapshot>
where
    C: ClusterView + ?Sized,
{
    let members = cluster
        .partition_members(partition)
        .ok_or_else(|| DynLimitsError::UnknownPartition(partition.to_string()))?;

    let mut snapshot = PartitionSnapshot::default();
    for node in members {
        let capacity = cluster.node_capacity(node);
        match cluster.node_state(node) {
            NodeState::Down => continue,
            NodeState::Idle => {
                snapshot.total_cpus += capacity;
                snapshot.idle_cpus += capacity;
            }
            NodeState::Busy => {
                snapshot.total_cpus += capacity;
                snapshot.idle_cpus += capacity.saturating_sub(cluster.node_allocated(node));
            }
        }
    }

    Ok(snapshot)
}

/// Sample a partition's idle ratio, refusing to divide by zero capacity
pub fn sample_idle_ratio<C>(cluster: &C, partition: &str) -> Result<f64>
where
    C: ClusterView + ?Sized,
{
    let snapshot = sample_partition(cluster, partition)?;
    let ratio = snapshot
        .idle_ratio()
        .ok_or_else(|| DynLimitsError::degenerate_sample(partition))?;

    debug!(
        partition,
        total_cpus = snapshot.total_cpus,
        idle_cpus = snapshot.idle_cpus,
        idle_ratio = ratio,
        "sampled partition"
    );
    Ok(ratio)
}
