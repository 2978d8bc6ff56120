//! Printable viability report and the on-screen summary view.

mod document;
mod render;
mod views;

pub use document::{
    AssessmentBlock, ClientBlock, ProjectionBlock, ReportDocument, ReportFooter, RoadmapStep,
};
pub use render::{render, PageLayout, RenderedReport};
pub use views::{
    format_currency, summary_view, AssessmentSummaryView, NextSteps, TierPresentation,
};

/// Documents a claimant should gather before a lawyer reviews the file.
pub const CHECKLIST_ITEMS: [&str; 10] = [
    "Original invoice or quote",
    "Contract or written acceptance (email/messages)",
    "Proof of delivery or service (signed delivery note or work order)",
    "Recent conversations (email/messages)",
    "Full debtor details (tax id, address)",
    "History of partial payments, if any",
    "Key dates (service, invoice, due date)",
    "Certified notices or previous demands sent",
    "Collection bank account and payment receipts",
    "Any additional document (photos, witnesses, etc.)",
];

/// Only the leading items fit the printed report.
pub const PRINTED_CHECKLIST_ITEMS: usize = 7;

/// Suggested download name, e.g. `viability-report-Ana-Pereira.txt`.
pub fn report_file_name(full_name: &str) -> String {
    let slug = full_name.split_whitespace().collect::<Vec<_>>().join("-");
    if slug.is_empty() {
        "viability-report.txt".to_string()
    } else {
        format!("viability-report-{slug}.txt")
    }
}
