use std::collections::BTreeSet;
use std::fmt;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// Nature of the unpaid debt being claimed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CaseType {
    Invoice,
    Individual,
    Deposit,
    Other,
}

impl CaseType {
    pub const fn label(self) -> &'static str {
        match self {
            Self::Invoice => "Unpaid invoice or service (business client)",
            Self::Individual => "Unpaid private client",
            Self::Deposit => "Deposit or advance not returned",
            Self::Other => "Other",
        }
    }
}

/// Supporting proof the claimant says they hold.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EvidenceKind {
    Invoice,
    Contract,
    DeliveryNote,
    WrittenAcknowledgment,
    PartialPayments,
    Witnesses,
}

impl EvidenceKind {
    pub const fn ordered() -> [Self; 6] {
        [
            Self::Invoice,
            Self::Contract,
            Self::DeliveryNote,
            Self::WrittenAcknowledgment,
            Self::PartialPayments,
            Self::Witnesses,
        ]
    }

    pub const fn label(self) -> &'static str {
        match self {
            Self::Invoice => "Issued invoice",
            Self::Contract => "Contract or accepted quote",
            Self::DeliveryNote => "Signed delivery note or work order",
            Self::WrittenAcknowledgment => "Emails/messages acknowledging the debt",
            Self::PartialPayments => "Transfers or partial payments",
            Self::Witnesses => "Witnesses or other support",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DebtorType {
    Company,
    Individual,
}

impl DebtorType {
    pub const fn label(self) -> &'static str {
        match self {
            Self::Company => "Company",
            Self::Individual => "Individual",
        }
    }
}

/// How much identifying data (tax id, address) the claimant has on the debtor.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DebtorIdentification {
    Full,
    Partial,
    None,
}

impl DebtorIdentification {
    pub const fn label(self) -> &'static str {
        match self {
            Self::Full => "Full details (tax id, address)",
            Self::Partial => "Partial details",
            Self::None => "Hardly any details",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DebtorLocation {
    SameJurisdiction,
    OtherJurisdiction,
    Unknown,
}

impl DebtorLocation {
    pub const fn label(self) -> &'static str {
        match self {
            Self::SameJurisdiction => "Same jurisdiction",
            Self::OtherJurisdiction => "Another jurisdiction",
            Self::Unknown => "Unknown",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SolvencyHint {
    Solvent,
    Unknown,
    Insolvent,
}

impl SolvencyHint {
    pub const fn label(self) -> &'static str {
        match self {
            Self::Solvent => "Appears solvent",
            Self::Unknown => "Unknown",
            Self::Insolvent => "Probably insolvent",
        }
    }
}

/// Strongest step the claimant has already taken to recover the debt.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PriorAction {
    None,
    Email,
    FormalNotice,
    LegalCounsel,
}

impl PriorAction {
    pub const fn label(self) -> &'static str {
        match self {
            Self::None => "Nothing formal, only messages",
            Self::Email => "Formal demand by email",
            Self::FormalNotice => "Certified formal notice",
            Self::LegalCounsel => "Negotiation or lawyer already involved",
        }
    }
}

/// Claimant's stated preference for the recovery route. Collected but not scored.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RecoveryPriority {
    Fastest,
    Eventual,
    AvoidTrial,
}

impl RecoveryPriority {
    pub const fn label(self) -> &'static str {
        match self {
            Self::Fastest => "Recover quickly",
            Self::Eventual => "Recover even if it takes longer",
            Self::AvoidTrial => "Avoid court if possible",
        }
    }
}

/// Validation failures for monetary input.
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
pub enum AmountError {
    #[error("claim amount must be greater than zero")]
    NotPositive,
    #[error("claim amount is smaller than one cent")]
    BelowOneCent,
    #[error("claim amount is not a finite number")]
    NotFinite,
    #[error("claim amount exceeds the supported maximum")]
    TooLarge,
}

const MAX_AMOUNT_CENTS: u64 = 1_000_000_000_000_000;

/// Positive claim amount, stored in cents so projections can be computed exactly.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "f64", into = "f64")]
pub struct ClaimAmount {
    cents: u64,
}

impl ClaimAmount {
    pub fn from_cents(cents: u64) -> Result<Self, AmountError> {
        if cents == 0 {
            return Err(AmountError::NotPositive);
        }
        if cents > MAX_AMOUNT_CENTS {
            return Err(AmountError::TooLarge);
        }
        Ok(Self { cents })
    }

    pub fn from_units(units: u64) -> Result<Self, AmountError> {
        let cents = units.checked_mul(100).ok_or(AmountError::TooLarge)?;
        Self::from_cents(cents)
    }

    pub const fn cents(self) -> u64 {
        self.cents
    }

    pub fn as_units(self) -> f64 {
        self.cents as f64 / 100.0
    }
}

impl TryFrom<f64> for ClaimAmount {
    type Error = AmountError;

    fn try_from(value: f64) -> Result<Self, Self::Error> {
        if !value.is_finite() {
            return Err(AmountError::NotFinite);
        }
        if value <= 0.0 {
            return Err(AmountError::NotPositive);
        }

        let cents = (value * 100.0).round();
        if cents < 1.0 {
            return Err(AmountError::BelowOneCent);
        }
        if cents > MAX_AMOUNT_CENTS as f64 {
            return Err(AmountError::TooLarge);
        }
        Self::from_cents(cents as u64)
    }
}

impl From<ClaimAmount> for f64 {
    fn from(amount: ClaimAmount) -> Self {
        amount.as_units()
    }
}

impl fmt::Display for ClaimAmount {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let units = group_thousands(self.cents / 100);
        match self.cents % 100 {
            0 => write!(f, "{units}"),
            fraction => write!(f, "{units}.{fraction:02}"),
        }
    }
}

/// Render whole currency units with comma thousands separators.
pub fn group_thousands(units: u64) -> String {
    let digits = units.to_string();
    let mut grouped = String::with_capacity(digits.len() + digits.len() / 3);
    for (index, digit) in digits.chars().enumerate() {
        if index > 0 && (digits.len() - index) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(digit);
    }
    grouped
}

/// Questionnaire stages in presentation order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum IntakeStage {
    Welcome,
    CaseType,
    AmountsAndDates,
    Evidence,
    Debtor,
    PriorActions,
    Contact,
}

impl IntakeStage {
    pub const fn ordered() -> [Self; 7] {
        [
            Self::Welcome,
            Self::CaseType,
            Self::AmountsAndDates,
            Self::Evidence,
            Self::Debtor,
            Self::PriorActions,
            Self::Contact,
        ]
    }

    pub const fn label(self) -> &'static str {
        match self {
            Self::Welcome => "Welcome",
            Self::CaseType => "What are you owed?",
            Self::AmountsAndDates => "Amounts & dates",
            Self::Evidence => "Evidence",
            Self::Debtor => "Debtor",
            Self::PriorActions => "Prior actions & priority",
            Self::Contact => "Contact & consent",
        }
    }

    /// Zero-based position in [`IntakeStage::ordered`].
    pub const fn position(self) -> usize {
        self as usize
    }

    pub fn next(self) -> Option<Self> {
        Self::ordered().get(self.position() + 1).copied()
    }

    pub fn previous(self) -> Option<Self> {
        self.position()
            .checked_sub(1)
            .and_then(|index| Self::ordered().get(index).copied())
    }

    /// Answers that must be present before leaving this stage.
    pub const fn required_fields(self) -> &'static [AnswerField] {
        match self {
            Self::Welcome | Self::Evidence => &[],
            Self::CaseType => &[AnswerField::CaseType],
            Self::AmountsAndDates => &[
                AnswerField::ClaimAmount,
                AnswerField::InvoiceDate,
                AnswerField::LastContactDate,
            ],
            Self::Debtor => &[
                AnswerField::DebtorType,
                AnswerField::DebtorIdentified,
                AnswerField::DebtorLocation,
                AnswerField::DebtorSolvency,
            ],
            Self::PriorActions => &[AnswerField::PriorActions, AnswerField::Priority],
            Self::Contact => &[
                AnswerField::FullName,
                AnswerField::Email,
                AnswerField::Phone,
            ],
        }
    }
}

impl fmt::Display for IntakeStage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Required questionnaire fields, used to report what is missing.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AnswerField {
    CaseType,
    ClaimAmount,
    InvoiceDate,
    LastContactDate,
    DebtorType,
    DebtorIdentified,
    DebtorLocation,
    DebtorSolvency,
    PriorActions,
    Priority,
    FullName,
    Email,
    Phone,
}

impl AnswerField {
    pub const fn label(self) -> &'static str {
        match self {
            Self::CaseType => "case type",
            Self::ClaimAmount => "claim amount",
            Self::InvoiceDate => "invoice date",
            Self::LastContactDate => "last contact date",
            Self::DebtorType => "debtor type",
            Self::DebtorIdentified => "debtor identification",
            Self::DebtorLocation => "debtor location",
            Self::DebtorSolvency => "debtor solvency",
            Self::PriorActions => "prior actions",
            Self::Priority => "recovery priority",
            Self::FullName => "full name",
            Self::Email => "email",
            Self::Phone => "phone",
        }
    }

    pub const fn stage(self) -> IntakeStage {
        match self {
            Self::CaseType => IntakeStage::CaseType,
            Self::ClaimAmount | Self::InvoiceDate | Self::LastContactDate => {
                IntakeStage::AmountsAndDates
            }
            Self::DebtorType
            | Self::DebtorIdentified
            | Self::DebtorLocation
            | Self::DebtorSolvency => IntakeStage::Debtor,
            Self::PriorActions | Self::Priority => IntakeStage::PriorActions,
            Self::FullName | Self::Email | Self::Phone => IntakeStage::Contact,
        }
    }
}

impl fmt::Display for AnswerField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Partially completed questionnaire accumulated while the claimant moves through stages.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DraftAnswers {
    pub case_type: Option<CaseType>,
    pub case_type_other: Option<String>,
    pub claim_amount: Option<f64>,
    pub invoice_date: Option<NaiveDate>,
    pub last_contact_date: Option<NaiveDate>,
    pub evidence: BTreeSet<EvidenceKind>,
    pub debtor_type: Option<DebtorType>,
    pub debtor_identified: Option<DebtorIdentification>,
    pub debtor_location: Option<DebtorLocation>,
    pub debtor_solvency_hint: Option<SolvencyHint>,
    pub prior_actions: Option<PriorAction>,
    pub priority: Option<RecoveryPriority>,
    pub full_name: Option<String>,
    pub email: Option<String>,
    pub phone: Option<String>,
    pub company: Option<String>,
    pub consent_privacy: bool,
    pub consent_contact: bool,
}

/// Single incremental edit applied to a [`DraftAnswers`].
#[derive(Debug, Clone, PartialEq)]
pub enum FieldUpdate {
    CaseType(CaseType),
    CaseSummary(String),
    ClaimAmount(f64),
    InvoiceDate(NaiveDate),
    LastContactDate(NaiveDate),
    DebtorType(DebtorType),
    DebtorIdentified(DebtorIdentification),
    DebtorLocation(DebtorLocation),
    DebtorSolvency(SolvencyHint),
    PriorActions(PriorAction),
    Priority(RecoveryPriority),
    FullName(String),
    Email(String),
    Phone(String),
    Company(String),
    PrivacyConsent(bool),
    ContactConsent(bool),
}

impl DraftAnswers {
    pub fn apply(&mut self, update: FieldUpdate) {
        match update {
            FieldUpdate::CaseType(value) => self.case_type = Some(value),
            FieldUpdate::CaseSummary(value) => self.case_type_other = Some(value),
            FieldUpdate::ClaimAmount(value) => self.claim_amount = Some(value),
            FieldUpdate::InvoiceDate(value) => self.invoice_date = Some(value),
            FieldUpdate::LastContactDate(value) => self.last_contact_date = Some(value),
            FieldUpdate::DebtorType(value) => self.debtor_type = Some(value),
            FieldUpdate::DebtorIdentified(value) => self.debtor_identified = Some(value),
            FieldUpdate::DebtorLocation(value) => self.debtor_location = Some(value),
            FieldUpdate::DebtorSolvency(value) => self.debtor_solvency_hint = Some(value),
            FieldUpdate::PriorActions(value) => self.prior_actions = Some(value),
            FieldUpdate::Priority(value) => self.priority = Some(value),
            FieldUpdate::FullName(value) => self.full_name = Some(value),
            FieldUpdate::Email(value) => self.email = Some(value),
            FieldUpdate::Phone(value) => self.phone = Some(value),
            FieldUpdate::Company(value) => self.company = Some(value),
            FieldUpdate::PrivacyConsent(value) => self.consent_privacy = value,
            FieldUpdate::ContactConsent(value) => self.consent_contact = value,
        }
    }

    /// Add the tag when absent, remove it otherwise. Returns whether it is now held.
    pub fn toggle_evidence(&mut self, kind: EvidenceKind) -> bool {
        if self.evidence.remove(&kind) {
            false
        } else {
            self.evidence.insert(kind);
            true
        }
    }

    pub fn has_answer(&self, field: AnswerField) -> bool {
        match field {
            AnswerField::CaseType => self.case_type.is_some(),
            AnswerField::ClaimAmount => self.claim_amount.is_some(),
            AnswerField::InvoiceDate => self.invoice_date.is_some(),
            AnswerField::LastContactDate => self.last_contact_date.is_some(),
            AnswerField::DebtorType => self.debtor_type.is_some(),
            AnswerField::DebtorIdentified => self.debtor_identified.is_some(),
            AnswerField::DebtorLocation => self.debtor_location.is_some(),
            AnswerField::DebtorSolvency => self.debtor_solvency_hint.is_some(),
            AnswerField::PriorActions => self.prior_actions.is_some(),
            AnswerField::Priority => self.priority.is_some(),
            AnswerField::FullName => has_text(&self.full_name),
            AnswerField::Email => has_text(&self.email),
            AnswerField::Phone => has_text(&self.phone),
        }
    }

    pub fn missing_for(&self, stage: IntakeStage) -> Vec<AnswerField> {
        stage
            .required_fields()
            .iter()
            .copied()
            .filter(|field| !self.has_answer(*field))
            .collect()
    }
}

fn has_text(value: &Option<String>) -> bool {
    value
        .as_deref()
        .map(|text| !text.trim().is_empty())
        .unwrap_or(false)
}

/// Facts about the debt itself.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ClaimFacts {
    pub case_type: CaseType,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub case_summary: Option<String>,
    pub claim_amount: ClaimAmount,
    pub invoice_date: NaiveDate,
    pub last_contact_date: NaiveDate,
    pub evidence: BTreeSet<EvidenceKind>,
}

/// What the claimant knows about the debtor.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct DebtorProfile {
    pub debtor_type: DebtorType,
    pub identification: DebtorIdentification,
    pub location: DebtorLocation,
    pub solvency: SolvencyHint,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ContactDetails {
    pub full_name: String,
    pub email: String,
    pub phone: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub company: Option<String>,
}

/// The complete, validated questionnaire for one claim.
///
/// Only [`super::IntakeGuard`] can build one, so holding an `AnswerSet` proves every required
/// answer is present and within its constraints.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AnswerSet {
    pub(super) claim: ClaimFacts,
    pub(super) debtor: DebtorProfile,
    pub(super) prior_action: PriorAction,
    pub(super) priority: RecoveryPriority,
    pub(super) contact: ContactDetails,
}

impl AnswerSet {
    pub fn claim(&self) -> &ClaimFacts {
        &self.claim
    }

    pub fn debtor(&self) -> &DebtorProfile {
        &self.debtor
    }

    pub fn prior_action(&self) -> PriorAction {
        self.prior_action
    }

    pub fn priority(&self) -> RecoveryPriority {
        self.priority
    }

    pub fn contact(&self) -> &ContactDetails {
        &self.contact
    }
}
