//! Policy store and configuration-string parsing
//!
//! The policy string is a comma-separated list of entries:
//!
//! ```text
//! partitionName:thresholdPct[:ratePct[:cooldownMinutes]]
//! ```
//!
//! Example: `compute:90:5:60,DEFAULT:95:10:15` — the `compute` partition
//! adjusts at 90% utilization with a 5% step and a 60-minute cooldown;
//! every other partition falls back to the `DEFAULT` entry.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::time::Duration;
use tracing::{debug, warn};

/// Name of the fallback policy entry
pub const DEFAULT_POLICY_NAME: &str = "DEFAULT";

/// Default utilization threshold (95%)
const DEFAULT_THRESHOLD: f64 = 0.95;
/// Default adjustment rate (10%)
const DEFAULT_RATE: f64 = 0.10;
/// Default cooldown between adjustments
const DEFAULT_COOLDOWN: Duration = Duration::from_secs(15 * 60);

/// Tunable adjustment policy for one partition
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PartitionPolicy {
    /// Partition name this policy applies to (unique key)
    pub name: String,
    /// Utilization fraction above which limits tighten
    pub threshold: f64,
    /// Relative size of each adjustment step
    pub rate: f64,
    /// Minimum spacing between adjustments
    pub cooldown: Duration,
    /// Time of the last applied adjustment (`None` = never adjusted)
    pub last_adjustment: Option<DateTime<Utc>>,
}

impl PartitionPolicy {
    /// Create a policy with the built-in defaults for the given name
    pub fn with_defaults(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            threshold: DEFAULT_THRESHOLD,
            rate: DEFAULT_RATE,
            cooldown: DEFAULT_COOLDOWN,
            last_adjustment: None,
        }
    }
}

/// Holds one policy per configured partition, plus the `DEFAULT` fallback
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct PolicyStore {
    policies: Vec<PartitionPolicy>,
}

impl PolicyStore {
    /// Parse a policy configuration string.
    ///
    /// Malformed entries are logged and skipped; they never abort loading
    /// of subsequent entries. If no `DEFAULT` entry survives parsing, a
    /// synthesized one (95% threshold, 10% rate, 15-minute cooldown) is
    /// appended so resolution always succeeds for any partition name.
    pub fn load(config: &str) -> Self {
        let mut policies = Vec::new();

        for entry in config.split(',').map(str::trim).filter(|e| !e.is_empty()) {
            match parse_entry(entry) {
                Ok(policy) => {
                    debug!(
                        partition = %policy.name,
                        threshold = policy.threshold,
                        rate = policy.rate,
                        cooldown_secs = policy.cooldown.as_secs(),
                        "loaded partition policy"
                    );
                    policies.push(policy);
                }
                Err(reason) => {
                    warn!(entry, reason, "invalid partition policy entry, skipping");
                }
            }
        }

        if !policies.iter().any(|p| p.name == DEFAULT_POLICY_NAME) {
            debug!("no DEFAULT policy configured, synthesizing one");
            policies.push(PartitionPolicy::with_defaults(DEFAULT_POLICY_NAME));
        }

        Self { policies }
    }

    /// Resolve the policy for a partition: exact-name match first, else
    /// the `DEFAULT` entry, else `None` (only possible on a store that
    /// was never loaded).
    pub fn resolve(&self, partition: &str) -> Option<&PartitionPolicy> {
        self.policies
            .iter()
            .find(|p| p.name == partition)
            .or_else(|| self.policies.iter().find(|p| p.name == DEFAULT_POLICY_NAME))
    }

    /// Mutable variant of [`resolve`](Self::resolve), used by the engine
    /// to stamp `last_adjustment` after a successful adjustment.
    pub fn resolve_mut(&mut self, partition: &str) -> Option<&mut PartitionPolicy> {
        let idx = self
            .policies
            .iter()
            .position(|p| p.name == partition)
            .or_else(|| {
                self.policies
                    .iter()
                    .position(|p| p.name == DEFAULT_POLICY_NAME)
            })?;
        Some(&mut self.policies[idx])
    }

    /// Drop all policy entries. Idempotent; safe on an empty store.
    pub fn clear(&mut self) {
        self.policies.clear();
    }

    /// Number of loaded policy entries
    pub fn len(&self) -> usize {
        self.policies.len()
    }

    /// Check if the store holds no entries
    pub fn is_empty(&self) -> bool {
        self.policies.is_empty()
    }

    /// Iterate over all loaded policies
    pub fn iter(&self) -> impl Iterator<Item = &PartitionPolicy> {
        self.policies.iter()
    }
}

/// Parse one `name:thresholdPct[:ratePct[:cooldownMinutes]]` entry.
///
/// Strict: empty fields, non-numeric values, negative values, and
/// trailing fields beyond the cooldown are all rejected.
fn parse_entry(entry: &str) -> std::result::Result<PartitionPolicy, &'static str> {
    let mut fields = entry.split(':');

    let name = fields.next().filter(|n| !n.is_empty()).ok_or("empty partition name")?;

    let threshold_pct: f64 = fields
        .next()
        .ok_or("missing ':' separator")?
        .parse()
        .map_err(|_| "threshold is not a number")?;

    let rate_pct: f64 = match fields.next() {
        Some(raw) => raw.parse().map_err(|_| "rate is not a number")?,
        None => DEFAULT_RATE * 100.0,
    };

    let cooldown_minutes: u64 = match fields.next() {
        Some(raw) => raw.parse().map_err(|_| "cooldown is not a number")?,
        None => DEFAULT_COOLDOWN.as_secs() / 60,
    };
    let cooldown_secs = cooldown_minutes
        .checked_mul(60)
        .ok_or("cooldown out of range")?;

    if fields.next().is_some() {
        return Err("trailing fields after cooldown");
    }
    if !threshold_pct.is_finite() || threshold_pct < 0.0 {
        return Err("threshold out of range");
    }
    if !rate_pct.is_finite() || rate_pct < 0.0 {
        return Err("rate out of range");
    }

    Ok(PartitionPolicy {
        name: name.to_string(),
        threshold: threshold_pct / 100.0,
        rate: rate_pct / 100.0,
        cooldown: Duration::from_secs(cooldown_secs),
        last_adjustment: None,
    })
}
