//! Claimant questionnaire: draft answers, validation, and the stage-by-stage flow.

pub mod domain;
mod flow;
mod guard;

#[cfg(test)]
mod tests;

pub use domain::{
    group_thousands, AmountError, AnswerField, AnswerSet, CaseType, ClaimAmount, ClaimFacts,
    ContactDetails, DebtorIdentification, DebtorLocation, DebtorProfile, DebtorType, DraftAnswers,
    EvidenceKind, FieldUpdate, IntakeStage, PriorAction, RecoveryPriority, SolvencyHint,
};
pub use flow::{CompletedIntake, IntakeError, IntakeFlow, IntakeProgress};
pub use guard::{IntakeGuard, IntakePolicy, IntakeRejection, IntakeViolation};
