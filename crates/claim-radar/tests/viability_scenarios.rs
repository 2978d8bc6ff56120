//! End-to-end scoring scenarios driven through the public intake guard.
//!
//! Answer sets are built only from draft answers, exactly as a claimant would submit them, so
//! these tests cover validation, scoring, tiering and report rendering together.

mod common {
    use chrono::NaiveDate;

    use claim_radar::intake::{
        AnswerSet, CaseType, DebtorIdentification, DebtorLocation, DebtorType, DraftAnswers,
        EvidenceKind, IntakeGuard, PriorAction, RecoveryPriority, SolvencyHint,
    };

    pub(super) fn evaluated_on() -> NaiveDate {
        NaiveDate::from_ymd_opt(2026, 10, 19).expect("valid date")
    }

    pub(super) fn date(year: i32, month: u32, day: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(year, month, day).expect("valid date")
    }

    pub(super) struct Claim {
        pub(super) amount: f64,
        pub(super) invoice_date: NaiveDate,
        pub(super) evidence: Vec<EvidenceKind>,
        pub(super) identification: DebtorIdentification,
        pub(super) location: DebtorLocation,
        pub(super) solvency: SolvencyHint,
        pub(super) prior_action: PriorAction,
    }

    pub(super) fn draft(claim: &Claim) -> DraftAnswers {
        DraftAnswers {
            case_type: Some(CaseType::Invoice),
            claim_amount: Some(claim.amount),
            invoice_date: Some(claim.invoice_date),
            last_contact_date: Some(date(2026, 10, 1)),
            evidence: claim.evidence.iter().copied().collect(),
            debtor_type: Some(DebtorType::Company),
            debtor_identified: Some(claim.identification),
            debtor_location: Some(claim.location),
            debtor_solvency_hint: Some(claim.solvency),
            prior_actions: Some(claim.prior_action),
            priority: Some(RecoveryPriority::Eventual),
            full_name: Some("Xoán Rial Castro".to_string()),
            email: Some("xoan@example.es".to_string()),
            phone: Some("981 000 111".to_string()),
            company: Some("Rial Obras SL".to_string()),
            consent_privacy: true,
            consent_contact: true,
            ..DraftAnswers::default()
        }
    }

    pub(super) fn answers(claim: &Claim) -> AnswerSet {
        IntakeGuard::default()
            .answers_from_draft(&draft(claim), evaluated_on())
            .expect("scenario answers are valid")
    }

    pub(super) fn strong_claim() -> Claim {
        Claim {
            amount: 5_000.0,
            invoice_date: date(2026, 7, 19),
            evidence: vec![
                EvidenceKind::Invoice,
                EvidenceKind::Contract,
                EvidenceKind::DeliveryNote,
                EvidenceKind::WrittenAcknowledgment,
            ],
            identification: DebtorIdentification::Full,
            location: DebtorLocation::SameJurisdiction,
            solvency: SolvencyHint::Solvent,
            prior_action: PriorAction::FormalNotice,
        }
    }

    pub(super) fn weak_claim() -> Claim {
        Claim {
            amount: 10_000.0,
            invoice_date: date(2023, 6, 19),
            evidence: Vec::new(),
            identification: DebtorIdentification::None,
            location: DebtorLocation::Unknown,
            solvency: SolvencyHint::Unknown,
            prior_action: PriorAction::None,
        }
    }
}

use claim_radar::config::FirmConfig;
use claim_radar::intake::{
    DebtorIdentification, DebtorLocation, EvidenceKind, PriorAction, SolvencyHint,
};
use claim_radar::report::{render, PageLayout, ReportDocument, CHECKLIST_ITEMS};
use claim_radar::scoring::{assess, ScoreAxis, Tier};
use common::*;

#[test]
fn strong_recent_claim_scores_high() {
    let result = assess(&answers(&strong_claim()), evaluated_on());

    assert_eq!(result.score, 93);
    assert_eq!(result.tier, Tier::High);
    assert_eq!((result.recoverable_min, result.recoverable_max), (3_500, 4_500));
    assert_eq!(result.recommendations[0].title, "EVIDENCE AUDIT");

    let points: Vec<u8> = ScoreAxis::ordered()
        .into_iter()
        .map(|axis| result.component(axis).expect("axis scored").points)
        .collect();
    assert_eq!(points, vec![38, 20, 20, 15]);
}

#[test]
fn stale_undocumented_claim_scores_low() {
    let result = assess(&answers(&weak_claim()), evaluated_on());

    assert_eq!(result.score, 12);
    assert_eq!(result.tier, Tier::Low);
    assert_eq!((result.recoverable_min, result.recoverable_max), (1_500, 4_500));
    assert_eq!(result.recommendations, *Tier::Low.recommendations());
}

#[test]
fn invoice_exactly_eighteen_months_old_keeps_middle_band() {
    let mut claim = strong_claim();
    claim.invoice_date = date(2025, 4, 19);
    let result = assess(&answers(&claim), evaluated_on());

    let timeliness = result
        .component(ScoreAxis::Timeliness)
        .expect("timeliness scored");
    assert_eq!(timeliness.points, 15);
    assert_eq!(result.score, 88);
}

#[test]
fn eighteen_month_boundary_isolated_from_other_axes() {
    let mut claim = weak_claim();
    claim.solvency = SolvencyHint::Insolvent;
    claim.invoice_date = date(2025, 4, 19);
    let result = assess(&answers(&claim), evaluated_on());

    let points: Vec<u8> = ScoreAxis::ordered()
        .into_iter()
        .map(|axis| result.component(axis).expect("axis scored").points)
        .collect();
    assert_eq!(points, vec![0, 15, 0, 5]);
    assert_eq!(result.score, 20);

    claim.invoice_date = date(2025, 3, 19);
    let result = assess(&answers(&claim), evaluated_on());
    assert_eq!(
        result
            .component(ScoreAxis::Timeliness)
            .expect("timeliness scored")
            .points,
        10
    );
    assert_eq!(result.score, 15);
}

#[test]
fn tier_boundaries_follow_thresholds() {
    // 2 + 20 + 12 + 10 = 44
    let mut claim = strong_claim();
    claim.evidence = vec![EvidenceKind::PartialPayments];
    claim.location = DebtorLocation::Unknown;
    claim.solvency = SolvencyHint::Unknown;
    claim.prior_action = PriorAction::Email;
    let result = assess(&answers(&claim), evaluated_on());
    assert_eq!((result.score, result.tier), (44, Tier::Low));

    // 10 + 20 + 10 + 5 = 45
    claim.evidence = vec![EvidenceKind::Invoice];
    claim.solvency = SolvencyHint::Insolvent;
    claim.prior_action = PriorAction::None;
    let result = assess(&answers(&claim), evaluated_on());
    assert_eq!((result.score, result.tier), (45, Tier::Medium));

    // 30 + 15 + 12 + 12 = 69
    claim.evidence = vec![
        EvidenceKind::Invoice,
        EvidenceKind::Contract,
        EvidenceKind::DeliveryNote,
    ];
    claim.invoice_date = date(2025, 10, 19);
    claim.identification = DebtorIdentification::Full;
    claim.location = DebtorLocation::Unknown;
    claim.solvency = SolvencyHint::Unknown;
    claim.prior_action = PriorAction::LegalCounsel;
    let result = assess(&answers(&claim), evaluated_on());
    assert_eq!((result.score, result.tier), (69, Tier::Medium));

    // 30 + 15 + 13 + 12 = 70
    claim.location = DebtorLocation::OtherJurisdiction;
    claim.solvency = SolvencyHint::Insolvent;
    let result = assess(&answers(&claim), evaluated_on());
    assert_eq!((result.score, result.tier), (70, Tier::High));
}

#[test]
fn assessment_is_idempotent() {
    let answers = answers(&strong_claim());
    assert_eq!(assess(&answers, evaluated_on()), assess(&answers, evaluated_on()));
}

#[test]
fn recovery_range_rounds_to_whole_units() {
    let mut claim = weak_claim();
    claim.amount = 1_234.56;
    let result = assess(&answers(&claim), evaluated_on());

    // 0.15 * 1234.56 = 185.184 ; 0.45 * 1234.56 = 555.552
    assert_eq!((result.recoverable_min, result.recoverable_max), (185, 556));
}

#[test]
fn report_contains_every_required_section() {
    let answers = answers(&strong_claim());
    let result = assess(&answers, evaluated_on());
    let document =
        ReportDocument::build(&FirmConfig::default(), &answers, &result, evaluated_on());

    assert_eq!(document.roadmap.len(), 4);
    assert_eq!(document.checklist.len(), 7);
    assert_eq!(document.checklist[..], CHECKLIST_ITEMS[..7]);
    assert_eq!(document.client.principal, "€5,000");
    assert_eq!(document.projection.formatted, "€3,500 - €4,500");

    let text = render(&document, PageLayout::default()).to_text();
    for expected in [
        "RADAR LEGAL",
        "TECHNICAL LEGAL VIABILITY OPINION",
        "Client: Xoán Rial Castro",
        "Principal owed: €5,000",
        "Client priority: Recover even if it takes longer",
        "Issue date: 19/10/2026",
        "ESTIMATED VIABILITY: HIGH",
        "LEGAL SCORE: 93 / 100",
        "70% - 90% of principal",
        "1. EVIDENCE AUDIT",
        "4. ORDER FOR PAYMENT",
        "[ ] Original invoice or quote",
        "[ ] Key dates (service, invoice, due date)",
        "automated analysis subject to review",
        "Contact: hola@radarlegal.com",
        "https://calendly.com/radar-legal/revision",
        "Page 1 of 1",
    ] {
        assert!(text.contains(expected), "missing '{expected}' in report");
    }
    assert!(!text.contains(CHECKLIST_ITEMS[7]));
}

#[test]
fn small_pages_split_the_report_with_form_feeds() {
    let answers = answers(&weak_claim());
    let result = assess(&answers, evaluated_on());
    let document =
        ReportDocument::build(&FirmConfig::default(), &answers, &result, evaluated_on());

    let layout = PageLayout::new(20, 50);
    let report = render(&document, layout);
    assert!(report.page_count() > 1);
    for page in &report.pages {
        assert_eq!(page.lines().count(), 20);
        assert!(page.lines().all(|line| line.chars().count() <= 50));
    }

    let text = report.to_text();
    assert_eq!(text.matches('\u{c}').count(), report.page_count() - 1);
    let last = format!("Page {0} of {0}", report.page_count());
    assert!(text.contains(&last));
}
