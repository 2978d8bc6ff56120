use chrono::NaiveDate;
use serde::Serialize;

use super::views::format_currency;
use super::{CHECKLIST_ITEMS, PRINTED_CHECKLIST_ITEMS};
use crate::config::FirmConfig;
use crate::intake::AnswerSet;
use crate::scoring::{Tier, ViabilityResult};

pub const REPORT_TITLE: &str = "TECHNICAL LEGAL VIABILITY OPINION";
pub const REVIEW_DISCLAIMER: &str =
    "This document is an automated analysis subject to review by a licensed lawyer.";

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ClientBlock {
    pub client_name: String,
    pub principal: String,
    pub case_type: &'static str,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub case_summary: Option<String>,
    pub debtor_type: &'static str,
    pub priority: &'static str,
    pub issued_on: NaiveDate,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct AssessmentBlock {
    pub tier: Tier,
    pub tier_label: &'static str,
    pub score: u8,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ProjectionBlock {
    pub recoverable_min: u64,
    pub recoverable_max: u64,
    pub formatted: String,
    pub share_of_principal: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RoadmapStep {
    pub index: usize,
    pub title: &'static str,
    pub detail: &'static str,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ReportFooter {
    pub tagline: String,
    pub contact: String,
    pub disclaimer: &'static str,
}

/// Structured content of the printable report, independent of layout.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ReportDocument {
    pub firm_name: String,
    pub title: &'static str,
    pub client: ClientBlock,
    pub assessment: AssessmentBlock,
    pub projection: ProjectionBlock,
    pub roadmap: Vec<RoadmapStep>,
    pub checklist: Vec<&'static str>,
    pub footer: ReportFooter,
}

const fn report_tier_label(tier: Tier) -> &'static str {
    match tier {
        Tier::High => "HIGH",
        Tier::Medium => "MEDIUM",
        Tier::Low => "COMPLEX",
    }
}

impl ReportDocument {
    pub fn build(
        firm: &FirmConfig,
        answers: &AnswerSet,
        result: &ViabilityResult,
        issued_on: NaiveDate,
    ) -> Self {
        let claim = answers.claim();
        let range = result.tier.recovery_range();

        let roadmap = result
            .recommendations
            .iter()
            .enumerate()
            .map(|(position, recommendation)| RoadmapStep {
                index: position + 1,
                title: recommendation.title,
                detail: recommendation.detail,
            })
            .collect();

        Self {
            firm_name: firm.name.to_uppercase(),
            title: REPORT_TITLE,
            client: ClientBlock {
                client_name: answers.contact().full_name.clone(),
                principal: format!("€{}", claim.claim_amount),
                case_type: claim.case_type.label(),
                case_summary: claim.case_summary.clone(),
                debtor_type: answers.debtor().debtor_type.label(),
                priority: answers.priority().label(),
                issued_on,
            },
            assessment: AssessmentBlock {
                tier: result.tier,
                tier_label: report_tier_label(result.tier),
                score: result.score,
            },
            projection: ProjectionBlock {
                recoverable_min: result.recoverable_min,
                recoverable_max: result.recoverable_max,
                formatted: format!(
                    "{} - {}",
                    format_currency(result.recoverable_min),
                    format_currency(result.recoverable_max)
                ),
                share_of_principal: format!(
                    "{:.0}% - {:.0}% of principal",
                    range.low_fraction() * 100.0,
                    range.high_fraction() * 100.0
                ),
            },
            roadmap,
            checklist: CHECKLIST_ITEMS[..PRINTED_CHECKLIST_ITEMS].to_vec(),
            footer: ReportFooter {
                tagline: firm.tagline(),
                contact: format!(
                    "Contact: {} · Booking: {}",
                    firm.contact_email, firm.booking_url
                ),
                disclaimer: REVIEW_DISCLAIMER,
            },
        }
    }

    /// Body lines before wrapping and pagination. The footer is laid out by the renderer.
    pub(super) fn body_lines(&self) -> Vec<String> {
        let mut lines = vec![
            self.firm_name.clone(),
            self.title.to_string(),
            String::new(),
            "CASE DETAILS".to_string(),
            format!("Client: {}", self.client.client_name),
            format!("Principal owed: {}", self.client.principal),
            format!("Case type: {}", self.client.case_type),
        ];
        if let Some(summary) = &self.client.case_summary {
            lines.push(format!("Case description: {summary}"));
        }
        lines.extend([
            format!("Debtor type: {}", self.client.debtor_type),
            format!("Client priority: {}", self.client.priority),
            format!("Issue date: {}", self.client.issued_on.format("%d/%m/%Y")),
            String::new(),
            format!("ESTIMATED VIABILITY: {}", self.assessment.tier_label),
            format!("LEGAL SCORE: {} / 100", self.assessment.score),
            String::new(),
            "RECOVERY PROJECTION (ESTIMATED)".to_string(),
            self.projection.formatted.clone(),
            self.projection.share_of_principal.clone(),
            String::new(),
            "STRATEGIC ROADMAP".to_string(),
        ]);
        for step in &self.roadmap {
            lines.push(format!("{}. {}", step.index, step.title));
            lines.push(format!("   {}", step.detail));
        }
        lines.push(String::new());
        lines.push("RECOMMENDED DOCUMENT AUDIT".to_string());
        lines.extend(self.checklist.iter().map(|item| format!("[ ] {item}")));
        lines
    }
}
