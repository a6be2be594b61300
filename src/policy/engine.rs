use std::collections::HashMap;

use log::debug;

use super::types::{ComplianceResult, LogEntry, Overall, RuleCheck, Severity, Violation};

pub const POLICY_ID: &str = "TECH05.01";
const RETENTION_PLACEHOLDER: &str = "{retention_days}";
const MIN_RETENTION_DAYS: u32 = 365;

/// Human-readable text for one violation code. `reason` may contain
/// `{retention_days}`, filled from the offending entry.
#[derive(Clone, Debug, PartialEq)]
pub struct ViolationTemplate {
	pub policy_id: String,
	pub requirement_id: String,
	pub title: String,
	pub clause_text: String,
	pub reason: String,
	pub remediation: String,
	pub severity: Severity,
}

impl ViolationTemplate {
	fn new(
		requirement_id: &str,
		title: &str,
		clause_text: &str,
		reason: &str,
		remediation: &str,
		severity: Severity,
	) -> Self {
		Self {
			policy_id: POLICY_ID.into(),
			requirement_id: requirement_id.into(),
			title: title.into(),
			clause_text: clause_text.into(),
			reason: reason.into(),
			remediation: remediation.into(),
			severity,
		}
	}

	fn unknown(code: &str) -> Self {
		Self::new(
			"UNKNOWN",
			"Unknown Violation",
			"Unknown requirement",
			code,
			"Review policy requirements",
			Severity::Medium,
		)
	}

	fn instantiate(&self, log: &LogEntry) -> Violation {
		Violation {
			policy_id: self.policy_id.clone(),
			requirement_id: self.requirement_id.clone(),
			title: self.title.clone(),
			clause_text: self.clause_text.clone(),
			reason: self
				.reason
				.replace(RETENTION_PLACEHOLDER, &log.retention_days.to_string()),
			evidence: evidence_for(log),
			remediation: self.remediation.clone(),
			severity: self.severity,
		}
	}
}

fn evidence_for(log: &LogEntry) -> Vec<String> {
	vec![
		format!("Log ID: {}", log.id),
		format!("Timestamp: {}", log.timestamp),
		format!("Event Type: {}", log.event_type),
		format!("Source: {}", log.source().unwrap_or("N/A")),
		format!("Identity: {}", log.actor().unwrap_or("N/A")),
	]
}

/// Lookup table from violation code to template.
#[derive(Clone, Debug, PartialEq)]
pub struct ViolationTemplates {
	templates: HashMap<String, ViolationTemplate>,
}

impl ViolationTemplates {
	pub fn new(templates: impl IntoIterator<Item = (String, ViolationTemplate)>) -> Self {
		Self {
			templates: templates.into_iter().collect(),
		}
	}

	pub fn get(&self, code: &str) -> Option<&ViolationTemplate> {
		self.templates.get(code)
	}

	pub fn insert(&mut self, code: impl Into<String>, template: ViolationTemplate) {
		self.templates.insert(code.into(), template);
	}
}

impl Default for ViolationTemplates {
	fn default() -> Self {
		let entries = [
			(
				"missing-timezone",
				ViolationTemplate::new(
					"REQ-007",
					"Missing Timezone in Timestamp",
					"Logs must include an accurate timestamp with time zone identification that enables automated processing.",
					"Log entry does not contain timezone information in timestamp",
					"Configure logging system to include timezone (preferably UTC) in all timestamps. Format: ISO 8601 with timezone (e.g., 2026-02-11T14:23:45Z or 2026-02-11T14:23:45+00:00)",
					Severity::High,
				),
			),
			(
				"not-centralized",
				ViolationTemplate::new(
					"REQ-009",
					"Logs Not Forwarded to Central Repository",
					"Logs must be forwarded to a central repository.",
					"Log entry is not being forwarded to the centralized logging system",
					"Configure log forwarding to enterprise logging framework (e.g., Splunk, ELK Stack). Ensure log shipping agents are installed and configured.",
					Severity::High,
				),
			),
			(
				"retention-too-short",
				ViolationTemplate::new(
					"REQ-003",
					"Retention Period Below 12 Months",
					"Security and Audit Logs must be forwarded to a centralized repository and retained for at least 12 months, with a minimum of 3 months online.",
					"Log retention period ({retention_days} days) is less than the required 365 days (12 months)",
					"Update retention policy to retain logs for at least 12 months (365 days) with minimum 3 months online. Configure archival for offline storage after 3 months.",
					Severity::Medium,
				),
			),
			(
				"logs-mutable",
				ViolationTemplate::new(
					"REQ-010",
					"Logs Can Be Modified or Deleted",
					"Logs must be protected from unauthorized modification or deletion.",
					"Log entries are not protected with immutability controls",
					"Enable write-once-read-many (WORM) storage, implement log signing, or use immutable storage backends. Restrict write/delete permissions to logging system only.",
					Severity::High,
				),
			),
			(
				"missing-identity",
				ViolationTemplate::new(
					"REQ-013",
					"Missing Required Attribute: Identity",
					"Event records must include: Identity or credential information (E-Mail, domain, username, account, device, group, role, key)",
					"Log entry is missing identity or credential information",
					"Configure logging to capture identity information (user, service account, API key, etc.) for all events. Ensure authentication context is preserved.",
					Severity::Medium,
				),
			),
			(
				"missing-source-id",
				ViolationTemplate::new(
					"REQ-013",
					"Missing Required Attribute: Source Identifier",
					"Event records must include: Unique Source Identifier (hostname, Internet Protocol (IP), instance ID)",
					"Log entry is missing unique source identifier",
					"Configure logging to include source identifier (hostname, IP address, instance ID, or container ID). Ensure source context is captured.",
					Severity::Medium,
				),
			),
			(
				"missing-session-id",
				ViolationTemplate::new(
					"REQ-013",
					"Missing Required Attribute: Session/Transaction ID",
					"Event records must include: Unique session or transaction identifier",
					"Log entry is missing unique session or transaction identifier",
					"Implement session tracking and include session/transaction IDs in all log entries. Use correlation IDs for distributed tracing.",
					Severity::Medium,
				),
			),
		];
		Self::new(entries.into_iter().map(|(code, t)| (code.to_string(), t)))
	}
}

/// Turns pre-classified log entries into violations with remediation text.
#[derive(Clone, Debug, Default)]
pub struct PolicyEngine {
	templates: ViolationTemplates,
}

impl PolicyEngine {
	pub fn new(templates: ViolationTemplates) -> Self {
		Self { templates }
	}

	pub fn evaluate_compliance(&self, logs: &[LogEntry]) -> ComplianceResult {
		let violations: Vec<Violation> = logs
			.iter()
			.filter(|log| !log.compliant)
			.flat_map(|log| {
				log.violations.iter().map(move |code| match self.templates.get(code) {
					Some(template) => template.instantiate(log),
					None => ViolationTemplate::unknown(code).instantiate(log),
				})
			})
			.collect();

		let total_checks = logs.len();
		let non_compliant_count = logs.iter().filter(|l| !l.compliant).count();
		debug!(
			"Evaluated {} log entries: {} non-compliant, {} violations",
			total_checks,
			non_compliant_count,
			violations.len()
		);

		ComplianceResult {
			overall: if violations.is_empty() {
				Overall::Compliant
			} else {
				Overall::NonCompliant
			},
			violations,
			compliant_count: total_checks - non_compliant_count,
			non_compliant_count,
			total_checks,
		}
	}

	/// Whole-batch checks; each passes vacuously for an empty batch.
	pub fn evaluate_rule_checks(&self, logs: &[LogEntry]) -> Vec<RuleCheck> {
		let all = |pred: fn(&LogEntry) -> bool| logs.iter().all(pred);
		vec![
			RuleCheck {
				name: "all_logs_have_timezone",
				passed: all(|l| l.has_timezone),
			},
			RuleCheck {
				name: "all_logs_centralized",
				passed: all(|l| l.central_forwarding),
			},
			RuleCheck {
				name: "all_logs_retention_12months",
				passed: all(|l| l.retention_days >= MIN_RETENTION_DAYS),
			},
			RuleCheck {
				name: "all_logs_immutable",
				passed: all(|l| l.immutable),
			},
			RuleCheck {
				name: "all_logs_have_required_attributes",
				passed: all(LogEntry::has_required_attributes),
			},
		]
	}
}
