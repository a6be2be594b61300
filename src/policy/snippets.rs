//! Rego renditions of the automated TECH05.01 checks, for display.

/// One rule as it would be written for Open Policy Agent.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct PolicySnippet {
	pub id: &'static str,
	pub name: &'static str,
	pub requirement_id: &'static str,
	pub source: &'static str,
}

pub const DEFAULT_SNIPPET: &str = "timezone_check";

pub const SNIPPETS: [PolicySnippet; 5] = [
	PolicySnippet {
		id: "timezone_check",
		name: "Timezone Validation",
		requirement_id: "REQ-007",
		source: r#"package tech05_01.timezone

default has_timezone = false

# Rule: All logs must have timezone in timestamp
has_timezone {
    input.timestamp
    regex.match("(Z|[+-]\d{2}:\d{2})$", input.timestamp)
}

# Violation when timezone is missing
violation[{"msg": msg, "requirement": "REQ-007"}] {
    not has_timezone
    msg := sprintf("Log entry %v missing timezone in timestamp", [input.id])
}"#,
	},
	PolicySnippet {
		id: "centralization_check",
		name: "Centralization Check",
		requirement_id: "REQ-009",
		source: r#"package tech05_01.centralization

default centralized = false

# Rule: Logs must be forwarded to central repository
centralized {
    input.centralForwarding == true
}

# Violation when not centralized
violation[{"msg": msg, "requirement": "REQ-009"}] {
    not centralized
    msg := sprintf("Log entry %v not forwarded to central repository", [input.id])
}"#,
	},
	PolicySnippet {
		id: "retention_check",
		name: "Retention Policy",
		requirement_id: "REQ-003",
		source: r#"package tech05_01.retention

default retention_compliant = false

# Rule: Security logs must be retained for at least 12 months
retention_compliant {
    input.retentionDays >= 365
}

# Violation when retention period is too short
violation[{"msg": msg, "requirement": "REQ-003"}] {
    not retention_compliant
    msg := sprintf("Log entry %v retention period (%v days) < 365 days",
                   [input.id, input.retentionDays])
}"#,
	},
	PolicySnippet {
		id: "immutability_check",
		name: "Immutability Control",
		requirement_id: "REQ-010",
		source: r#"package tech05_01.immutability

default immutable = false

# Rule: Logs must be protected from modification/deletion
immutable {
    input.immutable == true
}

# Violation when logs are mutable
violation[{"msg": msg, "requirement": "REQ-010"}] {
    not immutable
    msg := sprintf("Log entry %v is not immutable", [input.id])
}"#,
	},
	PolicySnippet {
		id: "attributes_check",
		name: "Required Attributes",
		requirement_id: "REQ-013",
		source: r#"package tech05_01.attributes

default has_required_attributes = false

# Rule: Logs must have required attributes
has_required_attributes {
    input.identity
    input.sourceId
    input.severity
    input.outcome
    input.sessionId
}

# Violation when required attributes are missing
violation[{"msg": msg, "requirement": "REQ-013"}] {
    not has_required_attributes
    missing := missing_attributes
    msg := sprintf("Log entry %v missing required attributes: %v",
                   [input.id, missing])
}

missing_attributes[attr] {
    not input.identity
    attr := "identity"
}

missing_attributes[attr] {
    not input.sourceId
    attr := "sourceId"
}

missing_attributes[attr] {
    not input.sessionId
    attr := "sessionId"
}"#,
	},
];

pub fn snippet(id: &str) -> Option<&'static PolicySnippet> {
	SNIPPETS.iter().find(|s| s.id == id)
}
