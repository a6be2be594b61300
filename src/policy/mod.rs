//! Log-entry compliance checks against the TECH05.01 logging standard.

mod document;
mod engine;
pub mod snippets;
mod types;

pub use document::{PolicyDocument, Requirement, Section};
pub use engine::{PolicyEngine, ViolationTemplate, ViolationTemplates};
pub use types::{ComplianceResult, LogEntry, Overall, RuleCheck, Severity, Violation, non_compliant};
