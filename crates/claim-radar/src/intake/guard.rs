use std::sync::OnceLock;

use chrono::NaiveDate;
use regex::Regex;
use serde::Serialize;

use super::domain::{
    AmountError, AnswerField, AnswerSet, CaseType, ClaimAmount, ClaimFacts, ContactDetails,
    DebtorProfile, DraftAnswers, IntakeStage,
};

/// A single reason a draft cannot become an [`AnswerSet`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, thiserror::Error)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum IntakeViolation {
    #[error("{field} is required")]
    MissingField { field: AnswerField },
    #[error("{reason}")]
    InvalidAmount {
        #[serde(serialize_with = "serialize_display")]
        reason: AmountError,
    },
    #[error("invoice date {invoice_date} is after the evaluation date {evaluated_on}")]
    InvoiceDateInFuture {
        invoice_date: NaiveDate,
        evaluated_on: NaiveDate,
    },
    #[error("full name must contain at least {min} characters")]
    NameTooShort { min: usize },
    #[error("email address '{value}' is not valid")]
    InvalidEmail { value: String },
    #[error("phone number must contain at least {min} characters")]
    PhoneTooShort { min: usize },
    #[error("the privacy policy must be accepted")]
    PrivacyConsentMissing,
    #[error("consent to be contacted by a lawyer is required")]
    ContactConsentMissing,
}

impl IntakeViolation {
    /// Stage the claimant must revisit to fix this violation.
    pub fn stage(&self) -> IntakeStage {
        match self {
            Self::MissingField { field } => field.stage(),
            Self::InvalidAmount { .. } | Self::InvoiceDateInFuture { .. } => {
                IntakeStage::AmountsAndDates
            }
            Self::NameTooShort { .. }
            | Self::InvalidEmail { .. }
            | Self::PhoneTooShort { .. }
            | Self::PrivacyConsentMissing
            | Self::ContactConsentMissing => IntakeStage::Contact,
        }
    }
}

fn serialize_display<S, T>(value: &T, serializer: S) -> Result<S::Ok, S::Error>
where
    S: serde::Serializer,
    T: std::fmt::Display,
{
    serializer.collect_str(value)
}

/// Every violation found while validating a draft, in stage order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, thiserror::Error)]
#[error("intake incomplete: {}", summarize(.violations))]
pub struct IntakeRejection {
    pub violations: Vec<IntakeViolation>,
}

impl IntakeRejection {
    /// Earliest stage holding a violation, which is the one to re-present.
    pub fn first_stage(&self) -> Option<IntakeStage> {
        self.violations.iter().map(IntakeViolation::stage).min()
    }
}

fn summarize(violations: &[IntakeViolation]) -> String {
    violations
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join("; ")
}

const DEFAULT_MIN_NAME_CHARS: usize = 2;
const DEFAULT_MIN_PHONE_CHARS: usize = 9;

/// Length thresholds applied to the contact stage.
#[derive(Debug, Clone)]
pub struct IntakePolicy {
    min_name_chars: usize,
    min_phone_chars: usize,
}

impl IntakePolicy {
    pub fn new(min_name_chars: usize, min_phone_chars: usize) -> Self {
        Self {
            min_name_chars: if min_name_chars == 0 {
                DEFAULT_MIN_NAME_CHARS
            } else {
                min_name_chars
            },
            min_phone_chars: if min_phone_chars == 0 {
                DEFAULT_MIN_PHONE_CHARS
            } else {
                min_phone_chars
            },
        }
    }

    pub fn min_name_chars(&self) -> usize {
        self.min_name_chars
    }

    pub fn min_phone_chars(&self) -> usize {
        self.min_phone_chars
    }
}

impl Default for IntakePolicy {
    fn default() -> Self {
        Self::new(DEFAULT_MIN_NAME_CHARS, DEFAULT_MIN_PHONE_CHARS)
    }
}

fn email_pattern() -> &'static Regex {
    static PATTERN: OnceLock<Regex> = OnceLock::new();
    PATTERN.get_or_init(|| {
        Regex::new(r"^[^\s@]+@[^\s@]+\.[^\s@]+$").expect("email pattern compiles")
    })
}

/// Guard responsible for turning a [`DraftAnswers`] into an [`AnswerSet`].
#[derive(Debug, Clone, Default)]
pub struct IntakeGuard {
    policy: IntakePolicy,
}

impl IntakeGuard {
    pub fn with_policy(policy: IntakePolicy) -> Self {
        Self { policy }
    }

    /// Validate every constraint at once and build the answer set on success.
    pub fn answers_from_draft(
        &self,
        draft: &DraftAnswers,
        evaluated_on: NaiveDate,
    ) -> Result<AnswerSet, IntakeRejection> {
        let mut violations = Vec::new();

        let case_type = require(draft.case_type, AnswerField::CaseType, &mut violations);

        let claim_amount = match draft.claim_amount {
            Some(raw) => match ClaimAmount::try_from(raw) {
                Ok(amount) => Some(amount),
                Err(reason) => {
                    violations.push(IntakeViolation::InvalidAmount { reason });
                    None
                }
            },
            None => {
                violations.push(IntakeViolation::MissingField {
                    field: AnswerField::ClaimAmount,
                });
                None
            }
        };

        let invoice_date = require(
            draft.invoice_date,
            AnswerField::InvoiceDate,
            &mut violations,
        );
        if let Some(invoice_date) = invoice_date {
            if invoice_date > evaluated_on {
                violations.push(IntakeViolation::InvoiceDateInFuture {
                    invoice_date,
                    evaluated_on,
                });
            }
        }
        let last_contact_date = require(
            draft.last_contact_date,
            AnswerField::LastContactDate,
            &mut violations,
        );

        let debtor_type = require(draft.debtor_type, AnswerField::DebtorType, &mut violations);
        let identification = require(
            draft.debtor_identified,
            AnswerField::DebtorIdentified,
            &mut violations,
        );
        let location = require(
            draft.debtor_location,
            AnswerField::DebtorLocation,
            &mut violations,
        );
        let solvency = require(
            draft.debtor_solvency_hint,
            AnswerField::DebtorSolvency,
            &mut violations,
        );
        let prior_action = require(
            draft.prior_actions,
            AnswerField::PriorActions,
            &mut violations,
        );
        let priority = require(draft.priority, AnswerField::Priority, &mut violations);

        let full_name = check_text(
            draft.full_name.as_deref(),
            AnswerField::FullName,
            self.policy.min_name_chars,
            |min| IntakeViolation::NameTooShort { min },
            &mut violations,
        );
        let email = match trimmed(draft.email.as_deref()) {
            Some(value) if email_pattern().is_match(value) => Some(value.to_string()),
            Some(value) => {
                violations.push(IntakeViolation::InvalidEmail {
                    value: value.to_string(),
                });
                None
            }
            None => {
                violations.push(IntakeViolation::MissingField {
                    field: AnswerField::Email,
                });
                None
            }
        };
        let phone = check_text(
            draft.phone.as_deref(),
            AnswerField::Phone,
            self.policy.min_phone_chars,
            |min| IntakeViolation::PhoneTooShort { min },
            &mut violations,
        );

        if !draft.consent_privacy {
            violations.push(IntakeViolation::PrivacyConsentMissing);
        }
        if !draft.consent_contact {
            violations.push(IntakeViolation::ContactConsentMissing);
        }

        match (
            case_type,
            claim_amount,
            invoice_date,
            last_contact_date,
            debtor_type,
            identification,
            location,
            solvency,
            prior_action,
            priority,
            full_name,
            email,
            phone,
        ) {
            (
                Some(case_type),
                Some(claim_amount),
                Some(invoice_date),
                Some(last_contact_date),
                Some(debtor_type),
                Some(identification),
                Some(location),
                Some(solvency),
                Some(prior_action),
                Some(priority),
                Some(full_name),
                Some(email),
                Some(phone),
            ) if violations.is_empty() => Ok(AnswerSet {
                claim: ClaimFacts {
                    case_type,
                    case_summary: case_summary(case_type, draft.case_type_other.as_deref()),
                    claim_amount,
                    invoice_date,
                    last_contact_date,
                    evidence: draft.evidence.clone(),
                },
                debtor: DebtorProfile {
                    debtor_type,
                    identification,
                    location,
                    solvency,
                },
                prior_action,
                priority,
                contact: ContactDetails {
                    full_name,
                    email,
                    phone,
                    company: trimmed(draft.company.as_deref()).map(str::to_string),
                },
            }),
            _ => {
                violations.sort_by_key(IntakeViolation::stage);
                Err(IntakeRejection { violations })
            }
        }
    }
}

fn check_text(
    value: Option<&str>,
    field: AnswerField,
    min_chars: usize,
    too_short: impl FnOnce(usize) -> IntakeViolation,
    violations: &mut Vec<IntakeViolation>,
) -> Option<String> {
    match trimmed(value) {
        Some(text) if text.chars().count() >= min_chars => Some(text.to_string()),
        Some(_) => {
            violations.push(too_short(min_chars));
            None
        }
        None => {
            violations.push(IntakeViolation::MissingField { field });
            None
        }
    }
}

fn require<T>(
    value: Option<T>,
    field: AnswerField,
    violations: &mut Vec<IntakeViolation>,
) -> Option<T> {
    if value.is_none() {
        violations.push(IntakeViolation::MissingField { field });
    }
    value
}

fn trimmed(value: Option<&str>) -> Option<&str> {
    value.map(str::trim).filter(|text| !text.is_empty())
}

fn case_summary(case_type: CaseType, raw: Option<&str>) -> Option<String> {
    match case_type {
        CaseType::Other => trimmed(raw).map(str::to_string),
        _ => None,
    }
}
