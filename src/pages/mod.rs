pub mod analysis;
pub mod home;
pub mod not_found;
pub mod policy_as_code;

use crate::error::GraphError;
use crate::policy::{ComplianceResult, LogEntry, PolicyEngine};

const SAMPLE_LOGS: &str = include_str!("../../data/logs/sample_logs.json");

/// The bundled log sample.
fn sample_logs() -> Result<Vec<LogEntry>, GraphError> {
	LogEntry::parse_all(SAMPLE_LOGS)
}

/// The bundled log sample and its evaluation with the default templates.
fn evaluated_sample() -> Result<(Vec<LogEntry>, ComplianceResult), GraphError> {
	let logs = sample_logs()?;
	let result = PolicyEngine::default().evaluate_compliance(&logs);
	Ok((logs, result))
}
