//! Leptos client-side app: policy knowledge graphs and log compliance checks.

use leptos::prelude::*;
use leptos_meta::*;
use leptos_router::components::*;
use leptos_router::path;
use log::{Level, info};

// Modules
pub mod components;
mod error;
mod pages;
pub mod policy;

// Top-Level pages
use crate::pages::analysis::Analysis;
use crate::pages::home::Home;
use crate::pages::not_found::NotFound;
use crate::pages::policy_as_code::PolicyAsCode;

pub use crate::error::GraphError;

/// Initialize logging and panic hooks for the WASM target.
pub fn init_logging() {
	let _ = console_log::init_with_level(Level::Debug);
	console_error_panic_hook::set_once();
	info!("Logging initialized");
}

/// An app router for the summary, analysis and policy-as-code pages, handling 404's
#[component]
pub fn App() -> impl IntoView {
	// Provides context that manages stylesheets, titles, meta tags, etc.
	provide_meta_context();

	view! {
		<Html attr:lang="en" attr:dir="ltr" attr:data-theme="light" />

		// sets the document title
		<Title text="Policy Graph Compliance" />

		// injects metadata in the <head> of the page
		<Meta charset="UTF-8" />
		<Meta name="viewport" content="width=device-width, initial-scale=1.0" />

		<Router>
			<Routes fallback=|| view! { <NotFound /> }>
				<Route path=path!("/") view=Home />
				<Route path=path!("/analysis") view=Analysis />
				<Route path=path!("/policy-as-code") view=PolicyAsCode />
			</Routes>
		</Router>
	}
}
