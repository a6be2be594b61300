use leptos::prelude::*;

use super::evaluated_sample;
use crate::error::GraphError;
use crate::policy::snippets::{DEFAULT_SNIPPET, SNIPPETS, snippet};
use crate::policy::{Severity, Violation};

const MAX_LIVE_VIOLATIONS: usize = 8;
const MAX_TABLE_ROWS: usize = 15;
const CLAUSE_EXCERPT_CHARS: usize = 60;
const REMEDIATION_EXCERPT_CHARS: usize = 80;

/// First `max_chars` characters, with an ellipsis when anything was cut.
fn excerpt(text: &str, max_chars: usize) -> String {
	if text.chars().count() > max_chars {
		let mut short: String = text.chars().take(max_chars).collect();
		short.push_str("...");
		short
	} else {
		text.to_string()
	}
}

fn severity_badge(severity: Severity) -> &'static str {
	match severity {
		Severity::High | Severity::Critical => "badge badge-error",
		Severity::Low | Severity::Medium => "badge badge-warning",
	}
}

fn live_violation(violation: &Violation) -> impl IntoView + use<> {
	let evidence = violation.evidence.first().cloned().unwrap_or_default();
	view! {
		<div class="live-violation">
			<div class="live-violation-head">
				<code>{violation.requirement_id.clone()}</code>
				<span class={severity_badge(violation.severity)}>{violation.severity.as_str()}</span>
			</div>
			<strong>{violation.title.clone()}</strong>
			<p>{violation.reason.clone()}</p>
			<div class="evidence"><strong>"Evidence: "</strong>{evidence}</div>
			<div class="remediation"><strong>"Fix: "</strong>{violation.remediation.clone()}</div>
		</div>
	}
}

fn violation_row(violation: &Violation) -> impl IntoView + use<> {
	view! {
		<tr>
			<td><code>{violation.requirement_id.clone()}</code></td>
			<td>{excerpt(&violation.clause_text, CLAUSE_EXCERPT_CHARS)}</td>
			<td><code>{violation.log_id().unwrap_or("N/A").to_string()}</code></td>
			<td>{violation.title.clone()}</td>
			<td><span class={severity_badge(violation.severity)}>{violation.severity.as_str()}</span></td>
			<td>{excerpt(&violation.remediation, REMEDIATION_EXCERPT_CHARS)}</td>
		</tr>
	}
}

fn showcase() -> Result<impl IntoView, GraphError> {
	let (logs, result) = evaluated_sample()?;
	let active = RwSignal::new(DEFAULT_SNIPPET);

	let options = SNIPPETS
		.iter()
		.map(|s| {
			view! {
				<option value={s.id} selected={s.id == DEFAULT_SNIPPET}>
					{format!("{} ({})", s.name, s.requirement_id)}
				</option>
			}
		})
		.collect_view();
	let live = result
		.violations
		.iter()
		.take(MAX_LIVE_VIOLATIONS)
		.map(live_violation)
		.collect_view();
	let rows = result
		.violations
		.iter()
		.take(MAX_TABLE_ROWS)
		.map(violation_row)
		.collect_view();

	Ok(view! {
		<div class="split-view">
			<div class="card">
				<h2 class="section-title">"OPA/Rego Policy Snippets"</h2>
				<label for="snippet-select">"Select Policy Rule:"</label>
				<select
					id="snippet-select"
					class="input"
					on:change=move |ev| {
						if let Some(s) = snippet(&event_target_value(&ev)) {
							active.set(s.id);
						}
					}
				>
					{options}
				</select>
				<pre class="code-block">
					{move || snippet(active.get()).map(|s| s.source)}
				</pre>
				<ol class="how-it-works">
					<li>"Input log entry is evaluated against the rule"</li>
					<li>"If the rule passes, the log is compliant"</li>
					<li>"If the rule fails, a violation is generated with details"</li>
					<li>"Violations include requirement ID, message, and remediation"</li>
				</ol>
			</div>
			<div class="card">
				<h2 class="section-title">"Live Violations with Mapping"</h2>
				<div class="stats">
					<div>"Total Logs " <strong>{logs.len()}</strong></div>
					<div>"Violations " <strong>{result.violations.len()}</strong></div>
				</div>
				<div class="live-violations">{live}</div>
			</div>
		</div>
		<div class="card">
			<h2 class="section-title">"Detailed Violation Analysis"</h2>
			<table class="table">
				<thead>
					<tr>
						<th>"Requirement"</th>
						<th>"Clause"</th>
						<th>"Log ID"</th>
						<th>"Violation Type"</th>
						<th>"Severity"</th>
						<th>"Remediation"</th>
					</tr>
				</thead>
				<tbody>{rows}</tbody>
			</table>
		</div>
	})
}

/// Machine-executable renditions of the TECH05.01 checks next to the violations they raise.
#[component]
pub fn PolicyAsCode() -> impl IntoView {
	view! {
		<ErrorBoundary fallback=|errors| {
			view! {
				<h1>"Policy data could not be loaded"</h1>
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
				<h1>"Policy-as-Code Showcase: TECH05.01"</h1>
				<p class="subtitle">
					<a href="/">"Compliance summary"</a>
					" · "
					<a href="/analysis">"Deep-dive analysis"</a>
				</p>
				<div class="card">
					<h2 class="section-title">"What is Policy-as-Code?"</h2>
					<p>
						"Policy-as-Code translates human-readable requirements into machine-executable rules. "
						"These rules use Open Policy Agent Rego syntax to enforce the TECH05.01 logging requirements."
					</p>
				</div>
				{showcase()}
				<div class="card next-steps">
					<h3>"Next Steps for Compliance"</h3>
					<ol>
						<li><strong>"Immediate: "</strong>"Include the time zone in every timestamp (ISO 8601)"</li>
						<li><strong>"Short-term: "</strong>"Forward all logs to the enterprise SIEM"</li>
						<li><strong>"Medium-term: "</strong>"Retain logs 12 months with 3 months online"</li>
						<li><strong>"Ongoing: "</strong>"Enable immutability controls on log storage"</li>
						<li><strong>"Validation: "</strong>"Run the policy engine continuously"</li>
					</ol>
				</div>
			</div>
		</ErrorBoundary>
	}
}
