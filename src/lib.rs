//! # DynLimits - Reactive Limit Adjustment for HPC Schedulers
//!
//! DynLimits keeps per-partition aggregate resource limits (group-level
//! CPU caps on account associations and QoS classes) in step with
//! observed cluster idleness. It is invoked synchronously on every job
//! submission: it samples the targeted partition's idle-CPU ratio and,
//! gated by a cooldown and a fixed hysteresis band, tightens or loosens
//! the CPU caps of every limit holder bound to that partition.
//!
//! ## Features
//!
//! - **Per-partition policy**: threshold, step rate, and cooldown from a
//!   compact configuration string, with a synthesized `DEFAULT` fallback
//! - **Hysteresis + cooldown**: no limit flapping when utilization
//!   hovers near the threshold or submissions arrive in bursts
//! - **Sentinel-safe caps**: "unlimited" is a tagged variant and can
//!   never be scaled; finite caps are floored at 1
//! - **Injected collaborators**: cluster topology and the limits
//!   registry are traits, with in-memory implementations included
//! - **Advisory by design**: the engine never fails the triggering
//!   submission; every internal error is logged and swallowed
//!
//! ## Quick Start
//!
//! ```
//! use dynlimits::cluster::{MemoryCluster, NodeState};
//! use dynlimits::limits::{Association, CpuCap, MemoryRegistry, RegistryData};
//! use dynlimits::Engine;
//! use std::sync::Arc;
//!
//! let mut cluster = MemoryCluster::new();
//! let node = cluster.add_node(NodeState::Busy, 100, 98);
//! cluster.add_partition("compute", vec![node]);
//!
//! let registry = MemoryRegistry::new(RegistryData {
//!     associations: vec![Association {
//!         account: "research".to_string(),
//!         partition: None,
//!         cpu_cap: CpuCap::Finite(100),
//!     }],
//!     qos: Vec::new(),
//! });
//!
//! let engine = Engine::new(
//!     "compute:95:10:15",
//!     Arc::new(cluster),
//!     Arc::new(registry),
//! );
//!
//! // 98% utilization is above the 95% threshold: caps tighten by 10%.
//! engine.on_submission(Some("compute"));
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod cluster;
pub mod config;
pub mod engine;
pub mod error;
pub mod limits;

// Re-export commonly used types
pub use config::{PartitionPolicy, PolicyStore};
pub use engine::{Adjustment, Engine};
pub use error::{DynLimitsError, Result};
pub use limits::{CpuCap, LimitsRegistry};

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Human-readable engine name, for host plugin tables
pub const ENGINE_NAME: &str = "Dynamic limits adjustment engine";

/// Engine kind identifier, for host plugin tables
pub const ENGINE_KIND: &str = "job_submit/dynamic_limits";

/// Prelude module for convenient imports
pub mod prelude {
    //! Convenient re-exports for common usage
    //!
    //! ```
    //! use dynlimits::prelude::*;
    //! ```

    pub use crate::cluster::{ClusterView, MemoryCluster, NodeId, NodeState};
    pub use crate::config::{PartitionPolicy, PolicyStore};
    pub use crate::engine::{decide, Adjustment, Engine, PartitionSnapshot};
    pub use crate::error::{DynLimitsError, Result};
    pub use crate::limits::{
        Association, CpuCap, LimitsRegistry, MemoryRegistry, QosRecord, RegistryData,
    };
}
