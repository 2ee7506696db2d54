//! Immigration-profile eligibility scoring and case administration.

pub mod cases;
pub mod config;
pub mod eligibility;
pub mod error;
pub mod intake;
pub mod telemetry;
