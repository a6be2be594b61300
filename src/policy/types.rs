use serde::{Deserialize, Serialize};

use crate::error::GraphError;

/// One observed log record and the checks it already failed.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LogEntry {
	pub id: String,
	pub timestamp: String,
	pub event_type: String,
	#[serde(default, skip_serializing_if = "Option::is_none")]
	pub identity: Option<String>,
	#[serde(default, skip_serializing_if = "Option::is_none")]
	pub source_id: Option<String>,
	#[serde(default, skip_serializing_if = "Option::is_none")]
	pub severity: Option<String>,
	#[serde(default, skip_serializing_if = "Option::is_none")]
	pub outcome: Option<String>,
	#[serde(default, skip_serializing_if = "Option::is_none")]
	pub session_id: Option<String>,
	pub central_forwarding: bool,
	pub retention_days: u32,
	pub immutable: bool,
	pub has_timezone: bool,
	pub compliant: bool,
	#[serde(default)]
	pub violations: Vec<String>,
}

/// Entries already classified as failing one or more checks, in input order.
pub fn non_compliant(logs: &[LogEntry]) -> impl Iterator<Item = &LogEntry> {
	logs.iter().filter(|log| !log.compliant)
}

/// An attribute counts as recorded only when it is present and non-empty.
fn recorded(value: &Option<String>) -> Option<&str> {
	value.as_deref().filter(|v| !v.is_empty())
}

impl LogEntry {
	pub fn parse_all(json: &str) -> Result<Vec<Self>, GraphError> {
		Ok(serde_json::from_str(json)?)
	}

	pub fn source(&self) -> Option<&str> {
		recorded(&self.source_id)
	}

	pub fn actor(&self) -> Option<&str> {
		recorded(&self.identity)
	}

	pub fn session(&self) -> Option<&str> {
		recorded(&self.session_id)
	}

	/// Identity, source and session are all recorded.
	pub fn has_required_attributes(&self) -> bool {
		self.actor().is_some() && self.source().is_some() && self.session().is_some()
	}
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Severity {
	Low,
	Medium,
	High,
	Critical,
}

impl Severity {
	pub fn as_str(self) -> &'static str {
		match self {
			Severity::Low => "low",
			Severity::Medium => "medium",
			Severity::High => "high",
			Severity::Critical => "critical",
		}
	}
}

/// A failed requirement with the clause it breaks and how to fix it.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Violation {
	pub policy_id: String,
	pub requirement_id: String,
	pub title: String,
	pub clause_text: String,
	pub reason: String,
	pub evidence: Vec<String>,
	pub remediation: String,
	pub severity: Severity,
}

impl Violation {
	/// Id of the offending entry, read back from the first evidence line.
	pub fn log_id(&self) -> Option<&str> {
		self.evidence
			.first()
			.and_then(|line| line.strip_prefix("Log ID: "))
			.filter(|id| !id.is_empty())
	}
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum Overall {
	#[serde(rename = "COMPLIANT")]
	Compliant,
	#[serde(rename = "NON-COMPLIANT")]
	NonCompliant,
}

impl Overall {
	pub fn as_str(self) -> &'static str {
		match self {
			Overall::Compliant => "COMPLIANT",
			Overall::NonCompliant => "NON-COMPLIANT",
		}
	}
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ComplianceResult {
	pub overall: Overall,
	pub violations: Vec<Violation>,
	pub compliant_count: usize,
	pub non_compliant_count: usize,
	pub total_checks: usize,
}

/// Outcome of one named whole-batch rule.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct RuleCheck {
	pub name: &'static str,
	pub passed: bool,
}
