//! Lead qualification for unpaid-debt claims.
//!
//! The intake flow collects and validates a claimant's answers, [`scoring::assess`] turns
//! them into a viability result, and the report module renders the printable summary.

pub mod config;
pub mod error;
pub mod intake;
pub mod report;
pub mod scoring;
pub mod telemetry;
