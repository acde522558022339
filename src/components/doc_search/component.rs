use std::cell::RefCell;
use std::rc::Rc;

use gloo_timers::callback::Timeout;
use indexmap::IndexMap;
use leptos::prelude::*;
use leptos_router::hooks::use_navigate;
use log::{debug, warn};

use crate::api::{ApiClient, Generation};
use crate::config::ExplorerConfig;
use crate::query::ViewQuery;
use crate::search::rank_suggestions;

/// Label and id pairs in suggestion order.
fn suggestions(query: &str, found: Vec<(String, String)>, limit: usize) -> Vec<(String, String)> {
	let ids: IndexMap<String, String> = found.into_iter().collect();
	let labels: Vec<&String> = ids.keys().collect();
	rank_suggestions(query, &labels, limit)
		.into_iter()
		.filter_map(|label| ids.get(&label).map(|id| (label, id.clone())))
		.collect()
}

#[component]
pub fn DocSearch() -> impl IntoView {
	let config = use_context::<ExplorerConfig>().unwrap_or_default();
	let api = ApiClient::new(config.host.clone());
	let (results, set_results) = signal(Vec::<(String, String)>::new());
	let (error, set_error) = signal(None::<String>);
	let pending: Rc<RefCell<Option<Timeout>>> = Rc::new(RefCell::new(None));
	let generation = Generation::default();
	let limit = config.suggestion_limit;
	let delay = config.search_debounce_ms;

	let api_search = api.clone();
	let on_input = move |ev: web_sys::Event| {
		let query = event_target_value(&ev);
		// Dropping the previous timeout cancels it.
		pending.borrow_mut().take();
		let ticket = generation.begin();
		if query.trim().is_empty() {
			set_results.set(Vec::new());
			return;
		}
		let api = api_search.clone();
		*pending.borrow_mut() = Some(Timeout::new(delay, move || {
			wasm_bindgen_futures::spawn_local(async move {
				debug!("document search: {query}");
				match api.docs(&query).await {
					Ok(docs) if ticket.is_current() => {
						let found = docs.into_iter().map(|d| (d.label, d.id)).collect();
						set_error.set(None);
						set_results.set(suggestions(&query, found, limit));
					}
					Ok(_) => {}
					Err(e) => {
						warn!("document search failed: {e}");
						set_error.set(Some(e.to_string()));
					}
				}
			});
		}));
	};

	let navigate = use_navigate();
	let open = move |id: &str| {
		set_results.set(Vec::new());
		navigate(&format!("?{}", ViewQuery::Document(id.to_string()).to_query_string()), Default::default());
	};

	let open_random = open.clone();
	let on_random = move |_: web_sys::MouseEvent| {
		let api = api.clone();
		let open = open_random.clone();
		wasm_bindgen_futures::spawn_local(async move {
			match api.random_doc().await {
				Ok(Some(doc)) => open(&doc.id),
				Ok(None) => warn!("random document: empty corpus"),
				Err(e) => {
					warn!("random document failed: {e}");
					set_error.set(Some(e.to_string()));
				}
			}
		});
	};

	view! {
		<div class="doc-search">
			<input type="search" placeholder="Search documents" on:input=on_input />
			<button on:click=on_random>"Random document"</button>
			<Show when=move || error.get().is_some()>
				<p class="has-error">{move || error.get()}</p>
			</Show>
			<ul class="suggestions">
				{move || {
					results
						.get()
						.into_iter()
						.map(|(label, id)| {
							let open = open.clone();
							view! {
								<li>
									<a href="#" on:click=move |ev: web_sys::MouseEvent| {
										ev.prevent_default();
										open(&id);
									}>{label}</a>
								</li>
							}
						})
						.collect_view()
				}}
			</ul>
		</div>
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn suggestions_keep_ids() {
		let found = vec![
			("Phaedo".to_string(), "plato/phaedo".to_string()),
			("Republic".to_string(), "plato/rep".to_string()),
		];
		assert_eq!(
			suggestions("Re", found, 12),
			[
				("Republic".to_string(), "plato/rep".to_string()),
				("Phaedo".to_string(), "plato/phaedo".to_string())
			]
		);
	}
}
