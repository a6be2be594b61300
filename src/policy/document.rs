use serde::{Deserialize, Serialize};

use crate::error::GraphError;

/// A published standard broken into sections of numbered requirements.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PolicyDocument {
	pub id: String,
	pub name: String,
	pub organization: String,
	#[serde(rename = "type")]
	pub doc_type: String,
	pub version: String,
	pub statement: String,
	pub scope: String,
	pub responsibility: String,
	pub exception_criteria: String,
	pub adoption_date: String,
	pub adoption_schedule: String,
	pub sections: Vec<Section>,
	#[serde(default)]
	pub related_policies: Vec<String>,
	#[serde(default)]
	pub related_documents: Vec<String>,
	#[serde(default)]
	pub log_sources: Vec<String>,
	#[serde(default)]
	pub event_types: Vec<String>,
	#[serde(default)]
	pub required_attributes: Vec<String>,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Section {
	pub id: String,
	pub name: String,
	pub requirements: Vec<Requirement>,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Requirement {
	pub id: String,
	pub text: String,
	pub category: String,
	pub mandatory: bool,
	#[serde(default)]
	pub standards: Vec<String>,
	#[serde(default, skip_serializing_if = "Option::is_none")]
	pub controls: Option<Vec<String>>,
}

impl PolicyDocument {
	pub fn from_json(json: &str) -> Result<Self, GraphError> {
		Ok(serde_json::from_str(json)?)
	}

	/// Every requirement, in section order.
	pub fn requirements(&self) -> impl Iterator<Item = &Requirement> {
		self.sections.iter().flat_map(|s| s.requirements.iter())
	}

	pub fn requirement(&self, id: &str) -> Option<&Requirement> {
		self.requirements().find(|r| r.id == id)
	}

	pub fn mandatory_count(&self) -> usize {
		self.requirements().filter(|r| r.mandatory).count()
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	const DOC: &str = r#"{
		"id": "TECH05.01", "name": "Logging", "organization": "Sec", "type": "Standard",
		"version": "1", "statement": "s", "scope": "all", "responsibility": "owners",
		"exceptionCriteria": "none", "adoptionDate": "2024-03-01", "adoptionSchedule": "now",
		"sections": [
			{ "id": "a", "name": "A", "requirements": [
				{ "id": "REQ-1", "text": "one", "category": "c", "mandatory": true, "standards": [] },
				{ "id": "REQ-2", "text": "two", "category": "c", "mandatory": false, "standards": ["ISO"],
				  "controls": ["WORM"] }
			] },
			{ "id": "b", "name": "B", "requirements": [
				{ "id": "REQ-3", "text": "three", "category": "c", "mandatory": true, "standards": [] }
			] }
		]
	}"#;

	#[test]
	fn requirements_flatten_in_section_order() {
		let doc = PolicyDocument::from_json(DOC).unwrap();
		let ids: Vec<&str> = doc.requirements().map(|r| r.id.as_str()).collect();
		assert_eq!(ids, vec!["REQ-1", "REQ-2", "REQ-3"]);
		assert_eq!(doc.mandatory_count(), 2);
		assert_eq!(doc.doc_type, "Standard");
		assert!(doc.related_policies.is_empty());
	}

	#[test]
	fn looks_up_requirements_by_id() {
		let doc = PolicyDocument::from_json(DOC).unwrap();
		let req = doc.requirement("REQ-2").unwrap();
		assert_eq!(req.controls.as_deref(), Some(&["WORM".to_string()][..]));
		assert!(doc.requirement("REQ-9").is_none());
		assert_eq!(doc.requirement("REQ-1").unwrap().controls, None);
	}
}
