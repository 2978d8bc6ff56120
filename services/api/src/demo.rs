use crate::infra::{parse_date, read_draft};
use chrono::{Local, Months, NaiveDate};
use clap::{Args, ValueEnum};
use claim_radar::config::{AppConfig, FirmConfig};
use claim_radar::error::AppError;
use claim_radar::intake::{
    AnswerSet, CaseType, CompletedIntake, DebtorIdentification, DebtorLocation, DebtorType,
    EvidenceKind, FieldUpdate, IntakeFlow, IntakeGuard, IntakeStage, PriorAction,
    RecoveryPriority, SolvencyHint,
};
use claim_radar::report::{render, report_file_name, summary_view, PageLayout, ReportDocument};
use claim_radar::scoring::{ScoreAxis, ViabilityResult};
use std::path::PathBuf;

#[derive(Args, Debug)]
pub(crate) struct AssessArgs {
    /// JSON document holding the claimant's answers
    #[arg(long)]
    pub(crate) answers: PathBuf,
    /// Evaluation date (YYYY-MM-DD). Defaults to today.
    #[arg(long, value_parser = parse_date)]
    pub(crate) today: Option<NaiveDate>,
    /// Print the full paginated report after the summary
    #[arg(long)]
    pub(crate) report: bool,
}

#[derive(Args, Debug, Default)]
pub(crate) struct DemoArgs {
    /// Evaluation date (YYYY-MM-DD). Defaults to today.
    #[arg(long, value_parser = parse_date)]
    pub(crate) today: Option<NaiveDate>,
    /// Which canned claim to walk through
    #[arg(long, value_enum, default_value_t = DemoTier::High)]
    pub(crate) tier: DemoTier,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, ValueEnum)]
pub(crate) enum DemoTier {
    #[default]
    High,
    Medium,
    Low,
}

pub(crate) fn run_assess(args: AssessArgs) -> Result<(), AppError> {
    let AssessArgs {
        answers,
        today,
        report,
    } = args;

    let firm = AppConfig::load()?.firm;
    let today = today.unwrap_or_else(|| Local::now().date_naive());
    let draft = read_draft(&answers)?;
    let mut flow = IntakeFlow::from_draft(draft, IntakeGuard::default());
    let completed = flow.finalize(today)?;

    render_summary(&firm, &completed);
    if report {
        render_report(&firm, &completed.answers, &completed.result, today);
    }
    Ok(())
}

pub(crate) fn run_demo(args: DemoArgs) -> Result<(), AppError> {
    let firm = AppConfig::load()?.firm;
    let today = args.today.unwrap_or_else(|| Local::now().date_naive());

    println!("{} claim radar demo ({:?} scenario)", firm.name, args.tier);
    let mut flow = IntakeFlow::new();
    play_script(&mut flow, demo_script(args.tier, today))?;

    let completed = flow.finalize(today)?;
    println!();
    render_summary(&firm, &completed);
    render_report(&firm, &completed.answers, &completed.result, today);
    Ok(())
}

enum DemoInput {
    Answer(FieldUpdate),
    Evidence(EvidenceKind),
}

fn play_script(
    flow: &mut IntakeFlow,
    script: Vec<(IntakeStage, Vec<DemoInput>)>,
) -> Result<(), AppError> {
    for (stage, inputs) in script {
        let progress = flow.progress();
        println!(
            "[{}/{} {:>3}%] {}",
            progress.step,
            progress.total,
            progress.percent,
            stage.label()
        );
        for input in inputs {
            match input {
                DemoInput::Answer(update) => flow.update(update),
                DemoInput::Evidence(kind) => {
                    flow.toggle_evidence(kind);
                }
            }
        }
        if stage != IntakeStage::Contact {
            flow.advance()?;
        }
    }
    Ok(())
}

fn months_before(today: NaiveDate, months: u32) -> NaiveDate {
    today.checked_sub_months(Months::new(months)).unwrap_or(today)
}

/// Answers entered at each stage for the chosen scenario.
fn demo_script(tier: DemoTier, today: NaiveDate) -> Vec<(IntakeStage, Vec<DemoInput>)> {
    use DemoInput::{Answer, Evidence};

    let (amount, invoice_age, evidence, debtor, prior_action) = match tier {
        DemoTier::High => (
            5_000.0,
            3,
            vec![
                EvidenceKind::Invoice,
                EvidenceKind::Contract,
                EvidenceKind::DeliveryNote,
                EvidenceKind::WrittenAcknowledgment,
            ],
            (
                DebtorIdentification::Full,
                DebtorLocation::SameJurisdiction,
                SolvencyHint::Solvent,
            ),
            PriorAction::FormalNotice,
        ),
        DemoTier::Medium => (
            12_400.0,
            12,
            vec![
                EvidenceKind::Invoice,
                EvidenceKind::Contract,
                EvidenceKind::DeliveryNote,
            ],
            (
                DebtorIdentification::Full,
                DebtorLocation::OtherJurisdiction,
                SolvencyHint::Insolvent,
            ),
            PriorAction::Email,
        ),
        DemoTier::Low => (
            10_000.0,
            40,
            Vec::new(),
            (
                DebtorIdentification::None,
                DebtorLocation::Unknown,
                SolvencyHint::Unknown,
            ),
            PriorAction::None,
        ),
    };
    let (identification, location, solvency) = debtor;

    vec![
        (IntakeStage::Welcome, Vec::new()),
        (
            IntakeStage::CaseType,
            vec![Answer(FieldUpdate::CaseType(CaseType::Invoice))],
        ),
        (
            IntakeStage::AmountsAndDates,
            vec![
                Answer(FieldUpdate::ClaimAmount(amount)),
                Answer(FieldUpdate::InvoiceDate(months_before(today, invoice_age))),
                Answer(FieldUpdate::LastContactDate(months_before(today, 1))),
            ],
        ),
        (
            IntakeStage::Evidence,
            evidence.into_iter().map(Evidence).collect(),
        ),
        (
            IntakeStage::Debtor,
            vec![
                Answer(FieldUpdate::DebtorType(DebtorType::Company)),
                Answer(FieldUpdate::DebtorIdentified(identification)),
                Answer(FieldUpdate::DebtorLocation(location)),
                Answer(FieldUpdate::DebtorSolvency(solvency)),
            ],
        ),
        (
            IntakeStage::PriorActions,
            vec![
                Answer(FieldUpdate::PriorActions(prior_action)),
                Answer(FieldUpdate::Priority(RecoveryPriority::Fastest)),
            ],
        ),
        (
            IntakeStage::Contact,
            vec![
                Answer(FieldUpdate::FullName("Ana Pereira Souto".to_string())),
                Answer(FieldUpdate::Email("ana.pereira@example.com".to_string())),
                Answer(FieldUpdate::Phone("+34 600 123 456".to_string())),
                Answer(FieldUpdate::Company("Talleres Souto SL".to_string())),
                Answer(FieldUpdate::PrivacyConsent(true)),
                Answer(FieldUpdate::ContactConsent(true)),
            ],
        ),
    ]
}

fn render_summary(firm: &FirmConfig, completed: &CompletedIntake) {
    let summary = summary_view(firm, &completed.answers, &completed.result);
    println!(
        "{} | score {} / 100 | {}",
        summary.presentation.label, summary.score, summary.presentation.badge
    );
    println!("{}", summary.presentation.status);
    println!("{}", summary.presentation.narrative);
    println!("Estimated recovery: {}", summary.recoverable_range);

    println!("Score breakdown:");
    for axis in ScoreAxis::ordered() {
        if let Some(component) = completed.result.component(axis) {
            println!(
                "  - {}: {} / {} ({})",
                axis.label(),
                component.points,
                component.cap,
                component.notes
            );
        }
    }

    println!("Roadmap:");
    for (index, recommendation) in summary.recommendations.iter().enumerate() {
        println!("  {}. {}", index + 1, recommendation.title);
        println!("     {}", recommendation.detail);
    }

    println!("Documents to gather:");
    for item in summary.checklist {
        println!("  [ ] {item}");
    }

    println!("Recommended next step:");
    println!("  Write to us: {}", summary.next_steps.contact_link);
    println!("  Book a 15-minute strategy call: {}", summary.next_steps.booking_url);
    println!(
        "Report file: {}",
        report_file_name(&completed.answers.contact().full_name)
    );
}

fn render_report(
    firm: &FirmConfig,
    answers: &AnswerSet,
    result: &ViabilityResult,
    issued_on: NaiveDate,
) {
    let document = ReportDocument::build(firm, answers, result, issued_on);
    let report = render(&document, PageLayout::default());
    println!();
    println!("{}", report.to_text());
}

#[cfg(test)]
mod tests {
    use super::*;
    use claim_radar::scoring::Tier;

    fn walk(tier: DemoTier) -> CompletedIntake {
        let today = NaiveDate::from_ymd_opt(2026, 10, 19).expect("valid date");
        let mut flow = IntakeFlow::new();
        play_script(&mut flow, demo_script(tier, today)).expect("demo stages complete");
        assert_eq!(flow.stage(), IntakeStage::Contact);
        flow.finalize(today).expect("demo answers are valid")
    }

    #[test]
    fn demo_scenarios_land_in_their_tiers() {
        let high = walk(DemoTier::High);
        assert_eq!((high.result.score, high.result.tier), (93, Tier::High));

        let medium = walk(DemoTier::Medium);
        assert_eq!((medium.result.score, medium.result.tier), (68, Tier::Medium));

        let low = walk(DemoTier::Low);
        assert_eq!((low.result.score, low.result.tier), (12, Tier::Low));
        assert_eq!(
            (low.result.recoverable_min, low.result.recoverable_max),
            (1_500, 4_500)
        );
    }
}
