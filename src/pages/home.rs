use leptos::prelude::*;
use leptos_router::hooks::use_query_map;

use crate::components::cluster_plot::ClusterPlot;
use crate::components::doc_search::DocSearch;
use crate::components::fingerprint::Fingerprint;
use crate::components::hypershelf::Hypershelf;
use crate::query::ViewQuery;

/// Explorer page, driven by `?doc=`, `?topic=` and `?q=`.
#[component]
pub fn Home() -> impl IntoView {
	let params = use_query_map();
	let query = Memo::new(move |_| {
		params.with(|p| {
			ViewQuery::from_params(
				p.get("doc").as_deref(),
				p.get("topic").as_deref(),
				p.get("q").as_deref(),
			)
		})
	});
	let focal = Signal::derive(move || query.with(|q| q.focal_doc().map(str::to_string)));

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
			<div class="explorer">
				<header>
					<h1>"Topic Explorer"</h1>
					<DocSearch />
				</header>
				<section class="hypershelf-section">
					<Hypershelf query=query />
				</section>
				<Show when=move || focal.with(Option::is_some)>
					<section class="fingerprint-section">
						<h2>"Topic fingerprint"</h2>
						<Fingerprint doc=focal />
					</section>
				</Show>
				<section class="cluster-section">
					<h2>"Topic clusters"</h2>
					<ClusterPlot />
				</section>
			</div>
		</ErrorBoundary>
	}
}
