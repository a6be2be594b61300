use leptos::prelude::*;

use crate::policy::Violation;

/// One violation with its clause, reason, evidence and remediation.
#[component]
pub fn ViolationCard(violation: Violation) -> impl IntoView {
	let evidence = violation
		.evidence
		.into_iter()
		.map(|line| view! { <li>{line}</li> })
		.collect_view();

	view! {
		<div class=format!("card violation severity-{}", violation.severity.as_str())>
			<h4>{violation.title}</h4>
			<div class="violation-meta">
				<span class="badge">{violation.policy_id}</span>
				<span class="badge">{violation.requirement_id}</span>
				<span class="badge badge-severity">{violation.severity.as_str()}</span>
			</div>
			<blockquote>{violation.clause_text}</blockquote>
			<p><strong>"Reason: "</strong>{violation.reason}</p>
			<p><strong>"Remediation: "</strong>{violation.remediation}</p>
			<ul class="evidence">{evidence}</ul>
		</div>
	}
}
