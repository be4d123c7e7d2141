//! Error types for DynLimits
//!
//! This module defines all error types used throughout the engine. Every
//! error here is local-recovery-and-log: nothing in this crate is fatal
//! to the host scheduler process.

use thiserror::Error;

use crate::limits::RegistryError;

/// Main error type for DynLimits operations
#[derive(Error, Debug)]
pub enum DynLimitsError {
    /// Malformed policy configuration entry
    #[error("Configuration error: {0}")]
    Config(String),

    /// Partition name could not be resolved against the cluster
    #[error("Unknown partition: {0}")]
    UnknownPartition(String),

    /// No policy could be resolved for a partition (DEFAULT missing)
    #[error("No policy found for partition '{0}'")]
    PolicyNotFound(String),

    /// Partition has zero usable CPU capacity; an idle ratio would be
    /// meaningless, so sampling refuses to produce one
    #[error("Partition '{0}' has zero total CPU capacity")]
    DegenerateSample(String),

    /// Shared limits registry could not be locked or persisted
    #[error("Registry error: {0}")]
    Registry(#[from] RegistryError),
}

impl DynLimitsError {
    /// Create a configuration error
    pub fn config(message: impl Into<String>) -> Self {
        Self::Config(message.into())
    }

    /// Create a degenerate-sample error
    pub fn degenerate_sample(partition: impl Into<String>) -> Self {
        Self::DegenerateSample(partition.into())
    }

    /// Check if this error means the adjustment should be retried on the
    /// next submission (registry contention or persistence failure)
    pub fn is_retryable(&self) -> bool {
        matches!(self, Self::Registry(_))
    }
}

/// Result type alias for DynLimits operations
pub type Result<T> = std::result::Result<T, DynLimitsError>;
