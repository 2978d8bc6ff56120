//! Viability scoring for unpaid-debt claims.
//!
//! [`assess`] is a pure function of the answer set and the evaluation date. Only
//! [`assess_today`] touches the clock.

mod policy;
pub mod rules;

pub use policy::{Recommendation, RecoveryRange, Tier, HIGH_TIER_FLOOR, MEDIUM_TIER_FLOOR};
pub use rules::ScoreAxis;

use chrono::{Local, NaiveDate};
use serde::Serialize;

use crate::intake::AnswerSet;

/// Discrete contribution to the score, kept for audit trails and the report breakdown.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ScoreComponent {
    pub axis: ScoreAxis,
    pub points: u8,
    pub cap: u8,
    pub notes: String,
}

/// Scored assessment of a single claim.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ViabilityResult {
    pub score: u8,
    pub tier: Tier,
    pub recoverable_min: u64,
    pub recoverable_max: u64,
    pub recommendations: [Recommendation; 4],
    pub breakdown: Vec<ScoreComponent>,
}

impl ViabilityResult {
    pub fn component(&self, axis: ScoreAxis) -> Option<&ScoreComponent> {
        self.breakdown
            .iter()
            .find(|component| component.axis == axis)
    }
}

pub fn assess(answers: &AnswerSet, evaluated_on: NaiveDate) -> ViabilityResult {
    let (breakdown, score) = rules::score_answers(answers, evaluated_on);
    let tier = Tier::from_score(score);
    let (recoverable_min, recoverable_max) = tier
        .recovery_range()
        .project(answers.claim().claim_amount);

    ViabilityResult {
        score,
        tier,
        recoverable_min,
        recoverable_max,
        recommendations: *tier.recommendations(),
        breakdown,
    }
}

/// [`assess`] against the local calendar date.
pub fn assess_today(answers: &AnswerSet) -> ViabilityResult {
    assess(answers, Local::now().date_naive())
}
