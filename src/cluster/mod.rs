//! Partition and node registry abstraction
//!
//! The engine never owns cluster topology; the host scheduler exposes it
//! through the [`ClusterView`] trait. A ready-made in-memory
//! implementation, [`MemoryCluster`], is provided for embedding hosts
//! that keep their node table in process memory, and for tests.

mod memory;

pub use memory::MemoryCluster;

use serde::{Deserialize, Serialize};

/// Opaque handle identifying one node within a [`ClusterView`]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct NodeId(pub u32);

/// Scheduling state of a node
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum NodeState {
    /// Node is unusable; it contributes nothing to capacity
    Down,
    /// Node is up with no CPUs allocated
    Idle,
    /// Node is up with at least one CPU allocated
    Busy,
}

impl NodeState {
    /// Get human-readable name
    pub fn name(&self) -> &'static str {
        match self {
            Self::Down => "down",
            Self::Idle => "idle",
            Self::Busy => "busy",
        }
    }
}

/// Read-only view of partitions and node state, provided by the host
pub trait ClusterView {
    /// Names of all partitions known to the cluster
    fn partitions(&self) -> Vec<String>;

    /// Node membership of a partition, or `None` if the partition is
    /// unknown
    fn partition_members(&self, partition: &str) -> Option<Vec<NodeId>>;

    /// Current scheduling state of a node
    fn node_state(&self, node: NodeId) -> NodeState;

    /// Configured CPU capacity of a node
    fn node_capacity(&self, node: NodeId) -> u64;

    /// CPUs currently allocated on a node (never exceeds capacity by
    /// host invariant)
    fn node_allocated(&self, node: NodeId) -> u64;
}
