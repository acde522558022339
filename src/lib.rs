//! Leptos client-side topic explorer: hypershelf bars, topic fingerprints and
//! the topic cluster plot.

use leptos::prelude::*;
use leptos_meta::*;
use leptos_router::components::*;
use leptos_router::path;
use log::{Level, info, warn};

pub mod api;
pub mod config;
pub mod data;
pub mod layout;
pub mod query;
pub mod search;

// Modules
mod components;
mod pages;

// Top-Level pages
use crate::config::ExplorerConfig;
use crate::pages::home::Home;
use crate::pages::not_found::NotFound;

/// Element holding the JSON page configuration.
const CONFIG_ELEMENT_ID: &str = "explorer-config";

/// Initialize logging and panic hooks for the WASM target.
pub fn init_logging() {
	let _ = console_log::init_with_level(Level::Debug);
	console_error_panic_hook::set_once();
	info!("Logging initialized");
}

/// Read the page's `<script id="explorer-config" type="application/json">`,
/// falling back to defaults when it is absent or malformed.
pub fn load_config() -> ExplorerConfig {
	let text = web_sys::window()
		.and_then(|w| w.document())
		.and_then(|d| d.get_element_by_id(CONFIG_ELEMENT_ID))
		.and_then(|el| el.text_content());
	let Some(text) = text else {
		info!("no #{CONFIG_ELEMENT_ID}, using default configuration");
		return ExplorerConfig::default();
	};
	ExplorerConfig::from_json(&text).unwrap_or_else(|e| {
		warn!("bad #{CONFIG_ELEMENT_ID}: {e}");
		ExplorerConfig::default()
	})
}

/// An app router which renders the explorer and handles 404's
#[component]
pub fn App() -> impl IntoView {
	// Provides context that manages stylesheets, titles, meta tags, etc.
	provide_meta_context();
	provide_context(load_config());

	view! {
		<Html attr:lang="en" attr:dir="ltr" attr:data-theme="light" />

		// sets the document title
		<Title text="Topic Explorer" />

		// injects metadata in the <head> of the page
		<Meta charset="UTF-8" />
		<Meta name="viewport" content="width=device-width, initial-scale=1.0" />

		<Router>
			<Routes fallback=|| view! { <NotFound /> }>
				<Route path=path!("/") view=Home />
				<Route path=path!("/:k") view=Home />
			</Routes>
		</Router>
	}
}
