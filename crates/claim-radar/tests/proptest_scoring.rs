//! Property tests for the scoring engine over randomly generated valid answer sets.

use std::collections::BTreeSet;

use chrono::{Days, NaiveDate};
use claim_radar::intake::{
    AnswerSet, CaseType, DebtorIdentification, DebtorLocation, DebtorType, DraftAnswers,
    EvidenceKind, IntakeGuard, PriorAction, RecoveryPriority, SolvencyHint,
};
use claim_radar::scoring::rules::{evidence_points, EVIDENCE_CAP};
use claim_radar::scoring::{assess, Tier};
use proptest::prelude::*;
use proptest::sample::{select, subsequence};

fn evaluated_on() -> NaiveDate {
    NaiveDate::from_ymd_opt(2026, 10, 19).expect("valid date")
}

fn evidence_set() -> impl Strategy<Value = BTreeSet<EvidenceKind>> {
    subsequence(EvidenceKind::ordered().to_vec(), 0..=6)
        .prop_map(|kinds| kinds.into_iter().collect())
}

prop_compose! {
    fn answer_set()(
        cents in 1u64..=10_000_000_000,
        age_days in 0u64..=6_000,
        evidence in evidence_set(),
        identification in select(vec![
            DebtorIdentification::Full,
            DebtorIdentification::Partial,
            DebtorIdentification::None,
        ]),
        location in select(vec![
            DebtorLocation::SameJurisdiction,
            DebtorLocation::OtherJurisdiction,
            DebtorLocation::Unknown,
        ]),
        solvency in select(vec![
            SolvencyHint::Solvent,
            SolvencyHint::Unknown,
            SolvencyHint::Insolvent,
        ]),
        prior_action in select(vec![
            PriorAction::None,
            PriorAction::Email,
            PriorAction::FormalNotice,
            PriorAction::LegalCounsel,
        ])
    ) -> AnswerSet {
        let invoice_date = evaluated_on()
            .checked_sub_days(Days::new(age_days))
            .expect("date in range");
        let draft = DraftAnswers {
            case_type: Some(CaseType::Individual),
            claim_amount: Some(cents as f64 / 100.0),
            invoice_date: Some(invoice_date),
            last_contact_date: Some(invoice_date),
            evidence,
            debtor_type: Some(DebtorType::Individual),
            debtor_identified: Some(identification),
            debtor_location: Some(location),
            debtor_solvency_hint: Some(solvency),
            prior_actions: Some(prior_action),
            priority: Some(RecoveryPriority::AvoidTrial),
            full_name: Some("Uxía Lema".to_string()),
            email: Some("uxia@example.org".to_string()),
            phone: Some("+34 981 222 333".to_string()),
            consent_privacy: true,
            consent_contact: true,
            ..DraftAnswers::default()
        };
        IntakeGuard::default()
            .answers_from_draft(&draft, evaluated_on())
            .expect("generated answers are valid")
    }
}

proptest! {
    #[test]
    fn score_and_range_stay_within_bounds(answers in answer_set()) {
        let result = assess(&answers, evaluated_on());

        prop_assert!(result.score <= 100);
        prop_assert_eq!(result.tier, Tier::from_score(result.score));
        prop_assert!(result.recoverable_min <= result.recoverable_max);
        prop_assert!(result.recoverable_max * 100 <= answers.claim().claim_amount.cents() + 50);
        prop_assert_eq!(
            result.breakdown.iter().map(|c| u32::from(c.points)).sum::<u32>(),
            u32::from(result.score)
        );
    }

    #[test]
    fn recommendations_depend_only_on_tier(answers in answer_set()) {
        let result = assess(&answers, evaluated_on());
        prop_assert_eq!(result.recommendations.len(), 4);
        prop_assert_eq!(&result.recommendations, result.tier.recommendations());
    }

    #[test]
    fn assess_is_deterministic(answers in answer_set()) {
        prop_assert_eq!(assess(&answers, evaluated_on()), assess(&answers, evaluated_on()));
    }

    #[test]
    fn evidence_points_are_monotonic_and_capped(
        base in evidence_set(),
        extra in select(EvidenceKind::ordered().to_vec())
    ) {
        let mut larger = base.clone();
        larger.insert(extra);

        prop_assert!(evidence_points(&base) <= evidence_points(&larger));
        prop_assert!(evidence_points(&larger) <= EVIDENCE_CAP);
    }
}
