//! Limit mutation
//!
//! Applies one tighten/loosen step to every account association bound to
//! a partition (or globally scoped) and to every QoS record, inside the
//! registry's exclusive section, then triggers the host's durability
//! hook.

use tracing::debug;

use crate::engine::decision::Adjustment;
use crate::error::Result;
use crate::limits::LimitsRegistry;

/// Scale group CPU caps by `1 ± rate` for the given direction.
///
/// Unlimited caps are never touched; finite caps are truncated to an
/// integer and floored at 1. Both limit tables are rewritten under a
/// single exclusive section, and the registry is persisted before this
/// function reports success. On any failure the caller must not advance
/// the partition's cooldown timestamp.
pub fn apply_adjustment<R>(
    registry: &R,
    partition: &str,
    direction: Adjustment,
    rate: f64,
) -> Result<()>
where
    R: LimitsRegistry + ?Sized,
{
    let factor = match direction {
        Adjustment::NoOp => return Ok(()),
        Adjustment::Tighten => 1.0 - rate,
        Adjustment::Loosen => 1.0 + rate,
    };

    let mut associations_scaled = 0usize;
    let mut qos_scaled = 0usize;

    registry.with_write(&mut |data| {
        for assoc in &mut data.associations {
            // Partition-scoped associations of other partitions are
            // untouched; global associations always participate.
            if let Some(scope) = &assoc.partition {
                if scope != partition {
                    continue;
                }
            }
            if !assoc.cpu_cap.is_unlimited() {
                assoc.cpu_cap = assoc.cpu_cap.scaled(factor);
                associations_scaled += 1;
            }
        }

        // QoS records carry no partition scope; all participate.
        for qos in &mut data.qos {
            if !qos.cpu_cap.is_unlimited() {
                qos.cpu_cap = qos.cpu_cap.scaled(factor);
                qos_scaled += 1;
            }
        }
    })?;

    registry.persist()?;

    debug!(
        partition,
        ?direction,
        factor,
        associations_scaled,
        qos_scaled,
        "applied limit adjustment"
    );
    Ok(())
}
