pub mod builder;

pub use builder::{ComplianceReportBuilder, ScoreWeights};
