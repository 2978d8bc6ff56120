//! Weight tables for the four scoring axes.
//!
//! Each table is a total `match` over its answer enum so the rubric can be audited in one
//! place and tested without going through tier or recommendation logic.

use std::collections::BTreeSet;

use chrono::{Datelike, NaiveDate};
use serde::{Deserialize, Serialize};

use super::ScoreComponent;
use crate::intake::{
    AnswerSet, DebtorIdentification, DebtorLocation, DebtorProfile, EvidenceKind, PriorAction,
    SolvencyHint,
};

pub const EVIDENCE_CAP: u8 = 40;
pub const TIMELINESS_CAP: u8 = 20;
pub const DEBTOR_CAP: u8 = 20;
pub const PRIOR_ACTION_CAP: u8 = 20;
pub const TOTAL_CAP: u8 = 100;

/// The four weighted axes of the viability rubric.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ScoreAxis {
    Evidence,
    Timeliness,
    Debtor,
    PriorAction,
}

impl ScoreAxis {
    pub const fn ordered() -> [Self; 4] {
        [
            Self::Evidence,
            Self::Timeliness,
            Self::Debtor,
            Self::PriorAction,
        ]
    }

    pub const fn label(self) -> &'static str {
        match self {
            Self::Evidence => "Evidence",
            Self::Timeliness => "Timeliness",
            Self::Debtor => "Debtor",
            Self::PriorAction => "Prior action",
        }
    }

    pub const fn cap(self) -> u8 {
        match self {
            Self::Evidence => EVIDENCE_CAP,
            Self::Timeliness => TIMELINESS_CAP,
            Self::Debtor => DEBTOR_CAP,
            Self::PriorAction => PRIOR_ACTION_CAP,
        }
    }
}

/// Witnesses are offered as a choice but carry no weight; partial payments carry 2.
pub const fn evidence_weight(kind: EvidenceKind) -> u8 {
    match kind {
        EvidenceKind::Invoice => 10,
        EvidenceKind::Contract => 10,
        EvidenceKind::DeliveryNote => 10,
        EvidenceKind::WrittenAcknowledgment => 8,
        EvidenceKind::PartialPayments => 2,
        EvidenceKind::Witnesses => 0,
    }
}

pub fn evidence_points(evidence: &BTreeSet<EvidenceKind>) -> u8 {
    let raw: u32 = evidence
        .iter()
        .map(|kind| u32::from(evidence_weight(*kind)))
        .sum();
    raw.min(u32::from(EVIDENCE_CAP)) as u8
}

/// Whole calendar months between two dates, ignoring the day of month.
pub fn elapsed_months(from: NaiveDate, to: NaiveDate) -> i32 {
    (to.year() - from.year()) * 12 + (to.month() as i32 - from.month() as i32)
}

/// Step decay of claim value with age. Bands are inclusive at their upper edge.
pub const fn timeliness_points(elapsed_months: i32) -> u8 {
    if elapsed_months <= 6 {
        20
    } else if elapsed_months <= 18 {
        15
    } else if elapsed_months <= 36 {
        10
    } else {
        5
    }
}

pub const fn identification_weight(identification: DebtorIdentification) -> u8 {
    match identification {
        DebtorIdentification::Full => 10,
        DebtorIdentification::Partial => 5,
        DebtorIdentification::None => 0,
    }
}

pub const fn location_weight(location: DebtorLocation) -> u8 {
    match location {
        DebtorLocation::SameJurisdiction => 5,
        DebtorLocation::OtherJurisdiction => 3,
        DebtorLocation::Unknown => 0,
    }
}

pub const fn solvency_weight(solvency: SolvencyHint) -> u8 {
    match solvency {
        SolvencyHint::Solvent => 5,
        SolvencyHint::Unknown => 2,
        SolvencyHint::Insolvent => 0,
    }
}

pub fn debtor_points(debtor: &DebtorProfile) -> u8 {
    let raw = identification_weight(debtor.identification)
        + location_weight(debtor.location)
        + solvency_weight(debtor.solvency);
    raw.min(DEBTOR_CAP)
}

/// A documented formal notice outranks counsel already engaged.
pub const fn prior_action_weight(action: PriorAction) -> u8 {
    match action {
        PriorAction::None => 5,
        PriorAction::Email => 10,
        PriorAction::FormalNotice => 15,
        PriorAction::LegalCounsel => 12,
    }
}

pub(crate) fn score_answers(
    answers: &AnswerSet,
    evaluated_on: NaiveDate,
) -> (Vec<ScoreComponent>, u8) {
    let claim = answers.claim();
    let mut components = Vec::with_capacity(4);

    let evidence = evidence_points(&claim.evidence);
    components.push(ScoreComponent {
        axis: ScoreAxis::Evidence,
        points: evidence,
        cap: ScoreAxis::Evidence.cap(),
        notes: if claim.evidence.is_empty() {
            "no supporting evidence declared".to_string()
        } else {
            format!("{} evidence item(s) declared", claim.evidence.len())
        },
    });

    let months = elapsed_months(claim.invoice_date, evaluated_on);
    components.push(ScoreComponent {
        axis: ScoreAxis::Timeliness,
        points: timeliness_points(months),
        cap: ScoreAxis::Timeliness.cap(),
        notes: format!("{} month(s) since invoice", months.max(0)),
    });

    let debtor = answers.debtor();
    components.push(ScoreComponent {
        axis: ScoreAxis::Debtor,
        points: debtor_points(debtor),
        cap: ScoreAxis::Debtor.cap(),
        notes: format!(
            "identification {}, location {}, solvency {}",
            identification_weight(debtor.identification),
            location_weight(debtor.location),
            solvency_weight(debtor.solvency)
        ),
    });

    let action = answers.prior_action();
    components.push(ScoreComponent {
        axis: ScoreAxis::PriorAction,
        points: prior_action_weight(action),
        cap: ScoreAxis::PriorAction.cap(),
        notes: action.label().to_string(),
    });

    let total: u32 = components
        .iter()
        .map(|component| u32::from(component.points))
        .sum();
    let total = total.min(u32::from(TOTAL_CAP)) as u8;

    (components, total)
}
