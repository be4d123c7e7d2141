//! Adjustment decision
//!
//! Pure policy function: given a freshly sampled idle ratio and the
//! partition's policy, decide whether limits should tighten, loosen, or
//! stay put. A fixed hysteresis band below the tighten threshold keeps
//! utilization hovering near the threshold from flapping limits on
//! every submission.

use chrono::{DateTime, Duration, Utc};

use crate::config::PartitionPolicy;

/// Width of the no-adjustment band below the tighten threshold
pub const HYSTERESIS_BAND: f64 = 0.05;

/// Outcome of one adjustment decision
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Adjustment {
    /// Leave limits untouched
    NoOp,
    /// Utilization above threshold: scale caps down
    Tighten,
    /// Utilization below the hysteresis band: scale caps up
    Loosen,
}

/// Decide the adjustment for one partition.
///
/// The cooldown gate applies only once an adjustment has happened; a
/// partition that has never been adjusted is never cooldown-blocked.
pub fn decide(idle_ratio: f64, policy: &PartitionPolicy, now: DateTime<Utc>) -> Adjustment {
    let utilization = 1.0 - idle_ratio;

    if let Some(last) = policy.last_adjustment {
        let cooldown = Duration::seconds(policy.cooldown.as_secs() as i64);
        if now.signed_duration_since(last) < cooldown {
            return Adjustment::NoOp;
        }
    }

    if utilization > policy.threshold {
        Adjustment::Tighten
    } else if utilization < policy.threshold - HYSTERESIS_BAND {
        Adjustment::Loosen
    } else {
        Adjustment::NoOp
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::PolicyStore;
    use proptest::prelude::*;

    fn policy() -> PartitionPolicy {
        PolicyStore::load("compute:95:10:15")
            .resolve("compute")
            .unwrap()
            .clone()
    }

    #[test]
    fn test_tighten_above_threshold() {
        // utilization 0.98 > 0.95
        assert_eq!(decide(0.02, &policy(), Utc::now()), Adjustment::Tighten);
    }

    #[test]
    fn test_loosen_below_band() {
        // utilization 0.80 < 0.90
        assert_eq!(decide(0.20, &policy(), Utc::now()), Adjustment::Loosen);
    }

    #[test]
    fn test_noop_inside_band() {
        // utilization 0.93 sits inside [0.90, 0.95]
        assert_eq!(decide(0.07, &policy(), Utc::now()), Adjustment::NoOp);
    }

    #[test]
    fn test_threshold_itself_is_noop() {
        // utilization exactly at threshold: strict comparison, no-op
        assert_eq!(decide(0.05, &policy(), Utc::now()), Adjustment::NoOp);
    }

    #[test]
    fn test_cooldown_blocks_regardless_of_utilization() {
        let now = Utc::now();
        let mut p = policy();
        p.last_adjustment = Some(now);

        let within = now + Duration::seconds(p.cooldown.as_secs() as i64 - 1);
        assert_eq!(decide(0.0, &p, within), Adjustment::NoOp);
        assert_eq!(decide(1.0, &p, within), Adjustment::NoOp);

        let elapsed = now + Duration::seconds(p.cooldown.as_secs() as i64);
        assert_eq!(decide(0.0, &p, elapsed), Adjustment::Tighten);
    }

    #[test]
    fn test_first_adjustment_never_blocked() {
        let p = policy();
        assert!(p.last_adjustment.is_none());
        assert_eq!(decide(0.0, &p, Utc::now()), Adjustment::Tighten);
    }

    proptest! {
        #[test]
        fn prop_decision_is_monotonic(idle in 0.0f64..=1.0) {
            let p = policy();
            let decision = decide(idle, &p, Utc::now());
            let utilization = 1.0 - idle;
            if utilization > p.threshold {
                prop_assert_eq!(decision, Adjustment::Tighten);
            } else if utilization < p.threshold - HYSTERESIS_BAND {
                prop_assert_eq!(decision, Adjustment::Loosen);
            } else {
                prop_assert_eq!(decision, Adjustment::NoOp);
            }
        }

        #[test]
        fn prop_cooldown_always_wins(idle in 0.0f64..=1.0, ago in 0i64..900) {
            let now = Utc::now();
            let mut p = policy();
            p.last_adjustment = Some(now - Duration::seconds(ago));
            prop_assert_eq!(decide(idle, &p, now), Adjustment::NoOp);
        }
    }
}
