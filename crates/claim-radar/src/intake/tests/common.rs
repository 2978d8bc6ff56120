use chrono::NaiveDate;

use crate::intake::domain::{
    CaseType, DebtorIdentification, DebtorLocation, DebtorType, DraftAnswers, EvidenceKind,
    PriorAction, RecoveryPriority, SolvencyHint,
};

pub(super) fn evaluated_on() -> NaiveDate {
    NaiveDate::from_ymd_opt(2026, 10, 19).expect("valid date")
}

pub(super) fn complete_draft() -> DraftAnswers {
    DraftAnswers {
        case_type: Some(CaseType::Invoice),
        case_type_other: Some("ignored for invoices".to_string()),
        claim_amount: Some(5_000.0),
        invoice_date: NaiveDate::from_ymd_opt(2026, 7, 19),
        last_contact_date: NaiveDate::from_ymd_opt(2026, 9, 30),
        evidence: [
            EvidenceKind::Invoice,
            EvidenceKind::Contract,
            EvidenceKind::DeliveryNote,
            EvidenceKind::WrittenAcknowledgment,
        ]
        .into_iter()
        .collect(),
        debtor_type: Some(DebtorType::Company),
        debtor_identified: Some(DebtorIdentification::Full),
        debtor_location: Some(DebtorLocation::SameJurisdiction),
        debtor_solvency_hint: Some(SolvencyHint::Solvent),
        prior_actions: Some(PriorAction::FormalNotice),
        priority: Some(RecoveryPriority::Fastest),
        full_name: Some("  Ana Pereira Souto ".to_string()),
        email: Some("ana.pereira@example.com".to_string()),
        phone: Some("+34 600 123 456".to_string()),
        company: Some("   ".to_string()),
        consent_privacy: true,
        consent_contact: true,
    }
}
