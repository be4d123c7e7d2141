//! In-memory cluster view
//!
//! Backs [`ClusterView`] with plain collections. Suitable for hosts that
//! mirror their node table into the engine's process, and for tests.

use std::collections::HashMap;

use super::{ClusterView, NodeId, NodeState};

/// One node's snapshot inside a [`MemoryCluster`]
#[derive(Debug, Clone)]
struct NodeEntry {
    state: NodeState,
    capacity: u64,
    allocated: u64,
}

/// In-memory [`ClusterView`] implementation
#[derive(Debug, Default)]
pub struct MemoryCluster {
    nodes: Vec<NodeEntry>,
    partitions: HashMap<String, Vec<NodeId>>,
    partition_order: Vec<String>,
}

impl MemoryCluster {
    /// Create an empty cluster
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a node and return its handle
    pub fn add_node(&mut self, state: NodeState, capacity: u64, allocated: u64) -> NodeId {
        let id = NodeId(self.nodes.len() as u32);
        self.nodes.push(NodeEntry {
            state,
            capacity,
            allocated,
        });
        id
    }

    /// Register a partition with the given member nodes
    pub fn add_partition(&mut self, name: impl Into<String>, members: Vec<NodeId>) {
        let name = name.into();
        if !self.partitions.contains_key(&name) {
            self.partition_order.push(name.clone());
        }
        self.partitions.insert(name, members);
    }

    /// Update a node's state and allocation in place
    pub fn set_node(&mut self, node: NodeId, state: NodeState, allocated: u64) {
        if let Some(entry) = self.nodes.get_mut(node.0 as usize) {
            entry.state = state;
            entry.allocated = allocated;
        }
    }

    fn entry(&self, node: NodeId) -> Option<&NodeEntry> {
        self.nodes.get(node.0 as usize)
    }
}

impl ClusterView for MemoryCluster {
    fn partitions(&self) -> Vec<String> {
        self.partition_order.clone()
    }

    fn partition_members(&self, partition: &str) -> Option<Vec<NodeId>> {
        self.partitions.get(partition).cloned()
    }

    fn node_state(&self, node: NodeId) -> NodeState {
        self.entry(node).map_or(NodeState::Down, |e| e.state)
    }

    fn node_capacity(&self, node: NodeId) -> u64 {
        self.entry(node).map_or(0, |e| e.capacity)
    }

    fn node_allocated(&self, node: NodeId) -> u64 {
        self.entry(node).map_or(0, |e| e.allocated)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_membership_and_state() {
        let mut cluster = MemoryCluster::new();
        let a = cluster.add_node(NodeState::Idle, 16, 0);
        let b = cluster.add_node(NodeState::Busy, 32, 20);
        cluster.add_partition("compute", vec![a, b]);

        assert_eq!(cluster.partitions(), vec!["compute".to_string()]);
        assert_eq!(cluster.partition_members("compute").unwrap(), vec![a, b]);
        assert!(cluster.partition_members("missing").is_none());

        assert_eq!(cluster.node_state(a), NodeState::Idle);
        assert_eq!(cluster.node_capacity(b), 32);
        assert_eq!(cluster.node_allocated(b), 20);
    }

    #[test]
    fn test_unknown_node_is_down() {
        let cluster = MemoryCluster::new();
        assert_eq!(cluster.node_state(NodeId(99)), NodeState::Down);
        assert_eq!(cluster.node_capacity(NodeId(99)), 0);
    }

    #[test]
    fn test_set_node_updates_in_place() {
        let mut cluster = MemoryCluster::new();
        let a = cluster.add_node(NodeState::Idle, 16, 0);
        cluster.set_node(a, NodeState::Busy, 8);
        assert_eq!(cluster.node_state(a), NodeState::Busy);
        assert_eq!(cluster.node_allocated(a), 8);
    }
}
