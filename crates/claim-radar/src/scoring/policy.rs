use serde::{Deserialize, Serialize};

use crate::intake::ClaimAmount;

/// Coarse viability band derived from the total score.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Tier {
    High,
    Medium,
    Low,
}

pub const HIGH_TIER_FLOOR: u8 = 70;
pub const MEDIUM_TIER_FLOOR: u8 = 45;

impl Tier {
    pub const fn ordered() -> [Self; 3] {
        [Self::High, Self::Medium, Self::Low]
    }

    /// First matching band, highest threshold first.
    pub const fn from_score(score: u8) -> Self {
        if score >= HIGH_TIER_FLOOR {
            Self::High
        } else if score >= MEDIUM_TIER_FLOOR {
            Self::Medium
        } else {
            Self::Low
        }
    }

    pub const fn recovery_range(self) -> RecoveryRange {
        match self {
            Self::High => RecoveryRange::new(7_000, 9_000),
            Self::Medium => RecoveryRange::new(4_500, 7_000),
            Self::Low => RecoveryRange::new(1_500, 4_500),
        }
    }

    pub const fn recommendations(self) -> &'static [Recommendation; 4] {
        match self {
            Self::High => &HIGH_PLAYBOOK,
            Self::Medium => &MEDIUM_PLAYBOOK,
            Self::Low => &LOW_PLAYBOOK,
        }
    }
}

const BASIS_POINTS: u64 = 10_000;
const CENTS_PER_UNIT: u64 = 100;

/// Fractions of the claim expected to be recoverable, in basis points.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct RecoveryRange {
    pub low_bps: u16,
    pub high_bps: u16,
}

impl RecoveryRange {
    pub const fn new(low_bps: u16, high_bps: u16) -> Self {
        Self { low_bps, high_bps }
    }

    pub fn low_fraction(self) -> f64 {
        f64::from(self.low_bps) / BASIS_POINTS as f64
    }

    pub fn high_fraction(self) -> f64 {
        f64::from(self.high_bps) / BASIS_POINTS as f64
    }

    /// Whole currency units recoverable at each end of the range.
    pub fn project(self, amount: ClaimAmount) -> (u64, u64) {
        (
            apply_fraction(amount, self.low_bps),
            apply_fraction(amount, self.high_bps),
        )
    }
}

/// `amount * bps / 10_000`, rounded half away from zero to whole units.
fn apply_fraction(amount: ClaimAmount, bps: u16) -> u64 {
    let divisor = u128::from(BASIS_POINTS * CENTS_PER_UNIT);
    let scaled = u128::from(amount.cents()) * u128::from(bps);
    let rounded = (scaled + divisor / 2) / divisor;
    u64::try_from(rounded).unwrap_or(u64::MAX)
}

/// One step of the recommended recovery roadmap.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Recommendation {
    pub title: &'static str,
    pub detail: &'static str,
}

const HIGH_PLAYBOOK: [Recommendation; 4] = [
    Recommendation {
        title: "EVIDENCE AUDIT",
        detail: "Consolidate every supporting document to make the claim watertight.",
    },
    Recommendation {
        title: "CERTIFIED FORMAL DEMAND",
        detail: "Interrupt the limitation period and give the debtor a last chance to settle amicably.",
    },
    Recommendation {
        title: "ASSET PROTECTION",
        detail: "If non-payment persists, request precautionary measures over the debtor's assets.",
    },
    Recommendation {
        title: "ORDER FOR PAYMENT",
        detail: "Open the fast-track court procedure to obtain an enforceable title.",
    },
];

const MEDIUM_PLAYBOOK: [Recommendation; 4] = [
    Recommendation {
        title: "DOCUMENTARY REINFORCEMENT",
        detail: "Locate the missing delivery note or written acceptance before going further.",
    },
    Recommendation {
        title: "ASSET INVESTIGATION",
        detail: "Run a preventive search of the property and companies registers.",
    },
    Recommendation {
        title: "NEGOTIATION STRATEGY",
        detail: "Propose an instalment plan backed by a signed acknowledgment of debt.",
    },
    Recommendation {
        title: "DEMAND WITH LITIGATION WARNING",
        detail: "Send a lawyer-drafted certified demand to apply real pressure.",
    },
];

const LOW_PLAYBOOK: [Recommendation; 4] = [
    Recommendation {
        title: "LIMITATION REVIEW",
        detail: "Confirm the right to claim has not lapsed.",
    },
    Recommendation {
        title: "ASSERTIVE OUT-OF-COURT NEGOTIATION",
        detail: "Seek a discount or deferral agreement to recover at least the principal.",
    },
    Recommendation {
        title: "COST/BENEFIT ASSESSMENT",
        detail: "Check the economics of the claim before incurring court fees.",
    },
    Recommendation {
        title: "DEBTOR TRACING",
        detail: "Use address and solvency tracing services to locate the debtor.",
    },
];

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn tier_bands_match_thresholds_exactly() {
        assert_eq!(Tier::from_score(100), Tier::High);
        assert_eq!(Tier::from_score(70), Tier::High);
        assert_eq!(Tier::from_score(69), Tier::Medium);
        assert_eq!(Tier::from_score(45), Tier::Medium);
        assert_eq!(Tier::from_score(44), Tier::Low);
        assert_eq!(Tier::from_score(0), Tier::Low);
    }

    #[test]
    fn recovery_ranges_are_ordered_and_within_unity() {
        for tier in Tier::ordered() {
            let range = tier.recovery_range();
            assert!(range.low_bps <= range.high_bps, "{tier:?}");
            assert!(u64::from(range.high_bps) <= BASIS_POINTS, "{tier:?}");
        }
        assert_eq!(Tier::Medium.recovery_range().low_fraction(), 0.45);
    }

    #[test]
    fn projection_rounds_half_away_from_zero() {
        let amount = ClaimAmount::from_units(5_000).expect("valid");
        assert_eq!(Tier::High.recovery_range().project(amount), (3_500, 4_500));

        // 0.45 * 1 = 0.45 -> 0 ; 0.45 * 10 = 4.5 -> 5
        let one = ClaimAmount::from_units(1).expect("valid");
        assert_eq!(RecoveryRange::new(4_500, 4_500).project(one), (0, 0));
        let ten = ClaimAmount::from_units(10).expect("valid");
        assert_eq!(RecoveryRange::new(4_500, 4_500).project(ten), (5, 5));

        // 0.15 * 3.30 = 0.495 -> 0 ; 0.45 * 3.30 = 1.485 -> 1
        let cents = ClaimAmount::from_cents(330).expect("valid");
        assert_eq!(Tier::Low.recovery_range().project(cents), (0, 1));
    }

    #[test]
    fn playbooks_are_distinct_per_tier() {
        let high = Tier::High.recommendations();
        let medium = Tier::Medium.recommendations();
        let low = Tier::Low.recommendations();
        assert_ne!(high, medium);
        assert_ne!(medium, low);
        assert_ne!(high, low);
        for tier in Tier::ordered() {
            for recommendation in tier.recommendations() {
                assert!(!recommendation.title.is_empty());
                assert!(!recommendation.detail.is_empty());
            }
        }
    }
}
