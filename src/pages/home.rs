use leptos::prelude::*;
use log::info;

use super::sample_logs;
use crate::components::violation_card::ViolationCard;
use crate::error::GraphError;
use crate::policy::{ComplianceResult, Overall, PolicyEngine, RuleCheck};

fn evaluate_sample_logs() -> Result<(ComplianceResult, Vec<RuleCheck>), GraphError> {
	let logs = sample_logs()?;
	let engine = PolicyEngine::default();
	let result = engine.evaluate_compliance(&logs);
	info!(
		"Sample logs: {} ({} violations)",
		result.overall.as_str(),
		result.violations.len()
	);
	Ok((result, engine.evaluate_rule_checks(&logs)))
}

fn compliance_report() -> Result<impl IntoView, GraphError> {
	let (result, checks) = evaluate_sample_logs()?;
	let verdict_class = match result.overall {
		Overall::Compliant => "verdict verdict-pass",
		Overall::NonCompliant => "verdict verdict-fail",
	};
	let checks = checks
		.into_iter()
		.map(|check| {
			view! {
				<li>
					{if check.passed { "✔ " } else { "✘ " }}
					<code>{check.name}</code>
				</li>
			}
		})
		.collect_view();
	let violations = result
		.violations
		.into_iter()
		.map(|violation| view! { <ViolationCard violation=violation /> })
		.collect_view();

	Ok(view! {
		<section class="compliance-summary">
			<div class=verdict_class>{result.overall.as_str()}</div>
			<p>
				{result.compliant_count} " of " {result.total_checks} " log entries compliant, "
				{result.non_compliant_count} " non-compliant"
			</p>
			<ul class="rule-checks">{checks}</ul>
		</section>
		<section class="violations">{violations}</section>
	})
}

/// Compliance summary for the bundled log sample.
#[component]
pub fn Home() -> impl IntoView {
	view! {
		<ErrorBoundary fallback=|errors| {
			view! {
				<h1>"Uh oh! Something went wrong!"</h1>

				<p>"Errors: "</p>
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
				<h1>"TECH05.01 Logging Compliance"</h1>
				<p class="subtitle">
					"Sample log entries evaluated against the logging standard. "
					<a href="/analysis">"Deep-dive analysis"</a>
					" · "
					<a href="/policy-as-code">"Policy-as-code rules"</a>
				</p>
				{compliance_report()}
			</div>
		</ErrorBoundary>
	}
}
