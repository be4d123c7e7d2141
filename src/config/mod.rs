//! Per-partition policy configuration
//!
//! Parses the administrator-supplied policy string into a [`PolicyStore`]
//! and resolves partitions to their tunable adjustment policy.

mod policy;

pub use policy::{PartitionPolicy, PolicyStore, DEFAULT_POLICY_NAME};
