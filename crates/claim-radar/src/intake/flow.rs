use chrono::NaiveDate;
use serde::Serialize;
use tracing::{debug, info};

use super::domain::{AnswerField, AnswerSet, DraftAnswers, EvidenceKind, FieldUpdate, IntakeStage};
use super::guard::{IntakeGuard, IntakeRejection};
use crate::scoring::{assess, ViabilityResult};

/// Errors surfaced while a claimant moves through the questionnaire.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum IntakeError {
    #[error("stage '{stage}' is missing: {}", list_fields(.missing))]
    StageIncomplete {
        stage: IntakeStage,
        missing: Vec<AnswerField>,
    },
    #[error("already at the first stage")]
    AtFirstStage,
    #[error("already at the final stage")]
    AtFinalStage,
    #[error(transparent)]
    Rejected(#[from] IntakeRejection),
}

fn list_fields(fields: &[AnswerField]) -> String {
    fields
        .iter()
        .map(|field| field.label())
        .collect::<Vec<_>>()
        .join(", ")
}

/// Position in the questionnaire, as shown by a progress bar.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct IntakeProgress {
    pub step: usize,
    pub total: usize,
    pub percent: u8,
}

/// Outcome of a successful [`IntakeFlow::finalize`].
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CompletedIntake {
    pub answers: AnswerSet,
    pub result: ViabilityResult,
    pub evaluated_on: NaiveDate,
}

/// In-memory state machine for one claimant's questionnaire session.
#[derive(Debug, Clone)]
pub struct IntakeFlow {
    stage: IntakeStage,
    draft: DraftAnswers,
    guard: IntakeGuard,
    error: Option<IntakeError>,
}

impl Default for IntakeFlow {
    fn default() -> Self {
        Self::new()
    }
}

impl IntakeFlow {
    pub fn new() -> Self {
        Self::with_guard(IntakeGuard::default())
    }

    pub fn with_guard(guard: IntakeGuard) -> Self {
        Self {
            stage: IntakeStage::Welcome,
            draft: DraftAnswers::default(),
            guard,
            error: None,
        }
    }

    /// Resume with answers collected elsewhere, positioned on the final stage.
    pub fn from_draft(draft: DraftAnswers, guard: IntakeGuard) -> Self {
        Self {
            stage: IntakeStage::Contact,
            draft,
            guard,
            error: None,
        }
    }

    pub fn stage(&self) -> IntakeStage {
        self.stage
    }

    pub fn draft(&self) -> &DraftAnswers {
        &self.draft
    }

    /// Last error surfaced to the claimant, cleared by the next edit.
    pub fn error(&self) -> Option<&IntakeError> {
        self.error.as_ref()
    }

    pub fn update(&mut self, update: FieldUpdate) {
        self.draft.apply(update);
        self.error = None;
    }

    pub fn toggle_evidence(&mut self, kind: EvidenceKind) -> bool {
        self.error = None;
        self.draft.toggle_evidence(kind)
    }

    pub fn advance(&mut self) -> Result<IntakeStage, IntakeError> {
        let missing = self.draft.missing_for(self.stage);
        if !missing.is_empty() {
            return Err(self.surface(IntakeError::StageIncomplete {
                stage: self.stage,
                missing,
            }));
        }

        let next = self
            .stage
            .next()
            .ok_or_else(|| self.surface(IntakeError::AtFinalStage))?;
        debug!(from = ?self.stage, to = ?next, "intake stage advanced");
        self.stage = next;
        self.error = None;
        Ok(next)
    }

    pub fn back(&mut self) -> Result<IntakeStage, IntakeError> {
        let previous = self
            .stage
            .previous()
            .ok_or_else(|| self.surface(IntakeError::AtFirstStage))?;
        self.stage = previous;
        self.error = None;
        Ok(previous)
    }

    pub fn progress(&self) -> IntakeProgress {
        let total = IntakeStage::ordered().len();
        let step = self.stage.position() + 1;
        IntakeProgress {
            step,
            total,
            percent: (step * 100 / total) as u8,
        }
    }

    /// Validate the whole draft and score it.
    ///
    /// On rejection the flow moves to the earliest stage holding a violation and keeps every
    /// answer entered so far; the scoring engine is not invoked.
    pub fn finalize(&mut self, evaluated_on: NaiveDate) -> Result<CompletedIntake, IntakeError> {
        match self.guard.answers_from_draft(&self.draft, evaluated_on) {
            Ok(answers) => {
                let result = assess(&answers, evaluated_on);
                info!(
                    score = result.score,
                    tier = ?result.tier,
                    %evaluated_on,
                    "intake assessed"
                );
                self.error = None;
                Ok(CompletedIntake {
                    answers,
                    result,
                    evaluated_on,
                })
            }
            Err(rejection) => {
                if let Some(stage) = rejection.first_stage() {
                    self.stage = stage;
                }
                info!(
                    violations = rejection.violations.len(),
                    stage = ?self.stage,
                    "intake rejected"
                );
                Err(self.surface(IntakeError::Rejected(rejection)))
            }
        }
    }

    fn surface(&mut self, error: IntakeError) -> IntakeError {
        self.error = Some(error.clone());
        error
    }
}
