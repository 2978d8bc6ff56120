use serde::Serialize;
use url::form_urlencoded;

use super::CHECKLIST_ITEMS;
use crate::config::FirmConfig;
use crate::intake::{group_thousands, AnswerSet};
use crate::scoring::{Recommendation, ScoreComponent, Tier, ViabilityResult};

const CONTACT_SUBJECT: &str = "Professional recovery request";

/// Per-tier copy shown next to the score.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct TierPresentation {
    pub label: &'static str,
    pub status: &'static str,
    pub narrative: &'static str,
    pub badge: &'static str,
}

impl TierPresentation {
    pub const fn for_tier(tier: Tier) -> Self {
        match tier {
            Tier::High => Self {
                label: "High viability",
                status: "Priority case",
                narrative: "Your case is technically solid. With immediate action the debtor has few legal ways to avoid payment.",
                badge: "High priority",
            },
            Tier::Medium => Self {
                label: "Medium viability",
                status: "Needs professional reinforcement",
                narrative: "There is a legal basis, but gaps in the evidence will let the debtor delay payment unless the claim is handled rigorously.",
                badge: "Watch",
            },
            Tier::Low => Self {
                label: "Complex viability",
                status: "Rescue intervention",
                narrative: "The scenario is difficult but not hopeless. An assertive negotiation strategy is needed to save part or all of the principal.",
                badge: "Watch",
            },
        }
    }
}

/// Recommended next step: write to the firm or book a consultation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct NextSteps {
    pub contact_email: String,
    /// `mailto:` link prefilled with the client's name and claim amount.
    pub contact_link: String,
    pub booking_url: String,
}

impl NextSteps {
    pub fn new(firm: &FirmConfig, answers: &AnswerSet) -> Self {
        let message = format!(
            "Hello, I am {}. I have received my viability opinion (amount: €{}). \
             I would like to start the technical audit to recover my capital as soon as possible.",
            answers.contact().full_name,
            answers.claim().claim_amount
        );

        Self {
            contact_link: format!(
                "mailto:{}?subject={}&body={}",
                firm.contact_email,
                encode_component(CONTACT_SUBJECT),
                encode_component(&message)
            ),
            contact_email: firm.contact_email.clone(),
            booking_url: firm.booking_url.clone(),
        }
    }
}

/// Percent-encode a `mailto:` query component, spaces as `%20`.
fn encode_component(text: &str) -> String {
    form_urlencoded::byte_serialize(text.as_bytes())
        .collect::<String>()
        .replace('+', "%20")
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct AssessmentSummaryView {
    pub score: u8,
    pub tier: Tier,
    #[serde(flatten)]
    pub presentation: TierPresentation,
    pub recoverable_range: String,
    pub recommendations: [Recommendation; 4],
    pub breakdown: Vec<ScoreComponent>,
    pub checklist: &'static [&'static str],
    pub next_steps: NextSteps,
}

pub fn summary_view(
    firm: &FirmConfig,
    answers: &AnswerSet,
    result: &ViabilityResult,
) -> AssessmentSummaryView {
    AssessmentSummaryView {
        score: result.score,
        tier: result.tier,
        presentation: TierPresentation::for_tier(result.tier),
        recoverable_range: format!(
            "{} - {}",
            format_currency(result.recoverable_min),
            format_currency(result.recoverable_max)
        ),
        recommendations: result.recommendations,
        breakdown: result.breakdown.clone(),
        checklist: &CHECKLIST_ITEMS,
        next_steps: NextSteps::new(firm, answers),
    }
}

pub fn format_currency(units: u64) -> String {
    format!("€{}", group_thousands(units))
}
