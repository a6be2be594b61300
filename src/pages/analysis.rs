use leptos::prelude::*;

use super::evaluated_sample;
use crate::components::graph_viewer::{Graph, GraphViewer, GraphViewerConfig};
use crate::components::violation_card::ViolationCard;
use crate::error::GraphError;
use crate::policy::{ComplianceResult, LogEntry, PolicyDocument, non_compliant};

const POLICY_DOCUMENT: &str = include_str!("../../data/policies/tech05_01.json");
const RELATED_GRAPH: &str = include_str!("../../data/graphs/tech05_01_related.json");
const REQUIREMENTS_GRAPH: &str = include_str!("../../data/graphs/tech05_01_requirements.json");

/// Violations shown on the findings tab before the overflow note.
pub const MAX_LISTED_FINDINGS: usize = 10;
const GRAPH_HEIGHT: f64 = 600.0;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum Tab {
	Policy,
	Related,
	Requirements,
	Logs,
	Findings,
}

impl Tab {
	const ALL: [Tab; 5] = [
		Tab::Policy,
		Tab::Related,
		Tab::Requirements,
		Tab::Logs,
		Tab::Findings,
	];

	fn label(self) -> &'static str {
		match self {
			Tab::Policy => "Policy Document",
			Tab::Related => "Related Docs Graph",
			Tab::Requirements => "Requirements Graph",
			Tab::Logs => "Logs Analysis",
			Tab::Findings => "Findings",
		}
	}
}

fn findings_note(total: usize) -> Option<String> {
	(total > MAX_LISTED_FINDINGS).then(|| {
		format!("Showing first {MAX_LISTED_FINDINGS} of {total} violations. The policy-as-code page lists them all.")
	})
}

fn policy_tab(doc: &PolicyDocument) -> AnyView {
	let sections = doc
		.sections
		.iter()
		.map(|section| {
			let requirements = section
				.requirements
				.iter()
				.map(|req| {
					view! {
						<li>
							<strong>{req.id.clone()} ": "</strong>
							{req.text.clone()}
							{req.mandatory.then(|| view! { <span class="badge badge-error">"Mandatory"</span> })}
						</li>
					}
				})
				.collect_view();
			view! {
				<h4 class="policy-section">{section.name.clone()}</h4>
				<ul>{requirements}</ul>
			}
		})
		.collect_view();
	let related = doc
		.related_policies
		.iter()
		.map(|p| view! { <span class="badge badge-info">{p.clone()}</span> })
		.collect_view();

	view! {
		<div class="card">
			<h2 class="section-title">{format!("{} {}", doc.id, doc.name)}</h2>
			<dl class="doc-info">
				<dt>"Policy ID:"</dt><dd>{doc.id.clone()}</dd>
				<dt>"Organization:"</dt><dd>{doc.organization.clone()}</dd>
				<dt>"Version:"</dt><dd>{doc.version.clone()}</dd>
				<dt>"Adopted:"</dt><dd>{doc.adoption_date.clone()}</dd>
			</dl>
			<h3>"Statement"</h3>
			<p>{doc.statement.clone()}</p>
			<h3>"Scope"</h3>
			<p>{doc.scope.clone()}</p>
			<h3>{format!("Requirements Summary ({} mandatory)", doc.mandatory_count())}</h3>
			{sections}
			<h3>"Related Policies & Standards"</h3>
			<div class="badge-row">{related}</div>
		</div>
	}
	.into_any()
}

fn graph_tab(graph: Graph, title: &'static str, description: &'static str) -> AnyView {
	let config = GraphViewerConfig {
		height: GRAPH_HEIGHT,
		..GraphViewerConfig::default()
	};
	view! {
		<div class="card">
			<GraphViewer data=Signal::derive(move || graph.clone()) title=title config=config />
			<p class="graph-description">{description}</p>
		</div>
	}
	.into_any()
}

fn logs_tab(logs: &[LogEntry]) -> AnyView {
	let failing: Vec<&LogEntry> = non_compliant(logs).collect();
	let summary = format!(
		"Showing {} non-compliant log entries out of {} total logs.",
		failing.len(),
		logs.len()
	);
	let rows = failing
		.into_iter()
		.map(|log| {
			let codes = log
				.violations
				.iter()
				.map(|code| view! { <span class="badge badge-warning">{code.clone()}</span> })
				.collect_view();
			view! {
				<tr class="row-fail">
					<td><code>{log.id.clone()}</code></td>
					<td>{log.timestamp.clone()}</td>
					<td>{log.event_type.clone()}</td>
					<td>{log.source().unwrap_or("N/A").to_string()}</td>
					<td><span class="badge badge-error">"Non-Compliant"</span></td>
					<td>{codes}</td>
				</tr>
			}
		})
		.collect_view();

	view! {
		<div class="card">
			<h2 class="section-title">"Logs from the Enterprise Logging Framework"</h2>
			<p>{summary}</p>
			<table class="table">
				<thead>
					<tr>
						<th>"Log ID"</th>
						<th>"Timestamp"</th>
						<th>"Event Type"</th>
						<th>"Source"</th>
						<th>"Status"</th>
						<th>"Violations"</th>
					</tr>
				</thead>
				<tbody>{rows}</tbody>
			</table>
		</div>
	}
	.into_any()
}

fn findings_tab(result: &ComplianceResult) -> AnyView {
	let cards = result
		.violations
		.iter()
		.take(MAX_LISTED_FINDINGS)
		.cloned()
		.map(|violation| view! { <ViolationCard violation=violation /> })
		.collect_view();

	view! {
		<div class="card">
			<h2 class="section-title">"Commentary & Findings"</h2>
			<p>"Total Violations: " <strong>{result.violations.len()}</strong></p>
			{cards}
			{findings_note(result.violations.len()).map(|note| view! { <p class="overflow-note">{note}</p> })}
		</div>
	}
	.into_any()
}

fn deep_dive() -> Result<impl IntoView, GraphError> {
	let doc = PolicyDocument::from_json(POLICY_DOCUMENT)?;
	let related = Graph::from_json(RELATED_GRAPH)?;
	let requirements = Graph::from_json(REQUIREMENTS_GRAPH)?;
	let (logs, result) = evaluated_sample()?;
	let tab = RwSignal::new(Tab::Policy);

	let tabs = Tab::ALL
		.into_iter()
		.map(move |target| {
			view! {
				<button
					class=move || if tab.get() == target { "nav-tab active" } else { "nav-tab" }
					on:click=move |_| tab.set(target)
				>
					{target.label()}
				</button>
			}
		})
		.collect_view();

	Ok(view! {
		<nav class="nav-tabs">{tabs}</nav>
		{move || match tab.get() {
			Tab::Policy => policy_tab(&doc),
			Tab::Related => graph_tab(
				related.clone(),
				"Related Documents & Policy Network",
				"TECH05.01 and the policies, standards, regulatory guidance and supporting documents it relates to, mentions or links to. Enable Galaxy Mode to see the whole network.",
			),
			Tab::Requirements => graph_tab(
				requirements.clone(),
				"Requirements & Controls Graph",
				"The explainability chain from TECH05.01 through its sections and requirements to controls, evidence types and findings.",
			),
			Tab::Logs => logs_tab(&logs),
			Tab::Findings => findings_tab(&result),
		}}
	})
}

/// Policy text, knowledge graphs, failing logs and findings for TECH05.01.
#[component]
pub fn Analysis() -> impl IntoView {
	view! {
		<ErrorBoundary fallback=|errors| {
			view! {
				<h1>"Analysis data could not be loaded"</h1>
				<ul>
					{move || {
						errors
							.get()
							.into_iter()
							.map(|(_, e)| view! { <li>{e.to_string()}</li> })
							.collect_view()
					}}
				</ul>
			}
		}>
			<div class="page">
				<h1>"Policy Analysis & Explainability: TECH05.01"</h1>
				<p class="subtitle">
					<a href="/">"Compliance summary"</a>
					" · "
					<a href="/policy-as-code">"Policy-as-code rules"</a>
				</p>
				{deep_dive()}
			</div>
		</ErrorBoundary>
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn bundled_graphs_parse_without_dangling_edges() {
		for json in [RELATED_GRAPH, REQUIREMENTS_GRAPH] {
			let graph = Graph::from_json(json).unwrap();
			assert!(!graph.nodes.is_empty());
			for edge in &graph.edges {
				assert!(graph.node(&edge.from).is_some(), "{} missing", edge.from);
				assert!(graph.node(&edge.to).is_some(), "{} missing", edge.to);
			}
			assert_eq!(graph.nodes[0].node_type, "Document");
		}
	}

	#[test]
	fn policy_document_covers_every_templated_requirement() {
		let doc = PolicyDocument::from_json(POLICY_DOCUMENT).unwrap();
		let (_, result) = evaluated_sample().unwrap();
		for violation in &result.violations {
			assert!(
				doc.requirement(&violation.requirement_id).is_some(),
				"{} not in the document",
				violation.requirement_id
			);
		}
		assert_eq!(doc.sections.len(), 3);
	}

	#[test]
	fn findings_overflow_is_noted_past_the_cap() {
		assert_eq!(findings_note(MAX_LISTED_FINDINGS), None);
		assert_eq!(
			findings_note(14).as_deref(),
			Some("Showing first 10 of 14 violations. The policy-as-code page lists them all.")
		);
	}
}
