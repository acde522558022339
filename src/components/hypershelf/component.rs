use std::cell::RefCell;
use std::rc::Rc;

use leptos::html::Canvas;
use leptos::prelude::*;
use leptos_router::hooks::use_navigate;
use log::{debug, info, warn};
use wasm_bindgen::prelude::*;
use web_sys::{HtmlCanvasElement, MouseEvent, Window};

use super::render;
use super::state::{ShelfLayout, ShelfState};
use crate::api::{ApiClient, ApiError, Generation};
use crate::components::canvas::{canvas_point, context_2d, parent_width};
use crate::config::ExplorerConfig;
use crate::data::{DocRecord, TopicHit, Topics};
use crate::layout::TopicId;
use crate::query::ViewQuery;

const FALLBACK_WIDTH: f64 = 960.0;
const TOPIC_HITS: usize = 10;

fn draw(canvas_ref: NodeRef<Canvas>, state: &ShelfState, bar_height: f64) {
	let Some(canvas) = canvas_ref.get_untracked() else {
		return;
	};
	let canvas: HtmlCanvasElement = canvas.into();
	let layout = ShelfLayout::new(
		parent_width(&canvas, FALLBACK_WIDTH),
		state.docs.len(),
		bar_height,
	);
	canvas.set_width(layout.width as u32);
	canvas.set_height(layout.height as u32);
	if let Some(ctx) = context_2d(&canvas) {
		render::render(state, &layout, &ctx);
	}
}

/// Documents for the current view, then the topic list they are colored by.
async fn load(
	api: &ApiClient,
	config: &ExplorerConfig,
	view: &ViewQuery,
) -> Result<Option<(Vec<DocRecord>, Topics)>, ApiError> {
	let (k, n) = (config.k, config.docs_per_query);
	let docs = match view {
		ViewQuery::Document(id) => api.doc_topics(k, id, n).await?,
		ViewQuery::Topic(t) => api.topic_docs(k, *t, n).await?,
		ViewQuery::Words(words) => api.word_docs(k, words, n).await?,
		ViewQuery::Empty => return Ok(None),
	};
	let topics = api.topics(k).await?;
	Ok(Some((docs, topics)))
}

#[component]
pub fn Hypershelf(#[prop(into)] query: Signal<ViewQuery>) -> impl IntoView {
	let config = use_context::<ExplorerConfig>().unwrap_or_default();
	let api = ApiClient::new(config.host.clone());
	let bar_height = config.bar_height;
	let canvas_ref = NodeRef::<Canvas>::new();
	let state = Rc::new(RefCell::new(ShelfState::new(true)));
	let generation = Generation::default();
	let resize_cb: Rc<RefCell<Option<Closure<dyn FnMut()>>>> = Rc::new(RefCell::new(None));

	let (loading, set_loading) = signal(false);
	let (warning, set_warning) = signal(None::<ApiError>);
	let (selected, set_selected) = signal(None::<TopicId>);
	let (alphabetical, set_alphabetical) = signal(false);
	let (hits, set_hits) = signal(Vec::<TopicHit>::new());

	let redraw = {
		let state = state.clone();
		move || draw(canvas_ref, &state.borrow(), bar_height)
	};

	let (redraw_resize, resize_init) = (redraw.clone(), resize_cb.clone());
	Effect::new(move |_| {
		if canvas_ref.get().is_none() || resize_init.borrow().is_some() {
			return;
		}
		let Some(window): Option<Window> = web_sys::window() else {
			return;
		};
		let redraw = redraw_resize.clone();
		let cb = Closure::<dyn FnMut()>::new(move || redraw());
		let _ = window.add_event_listener_with_callback("resize", cb.as_ref().unchecked_ref());
		*resize_init.borrow_mut() = Some(cb);
	});

	let (state_load, redraw_load) = (state.clone(), redraw.clone());
	Effect::new(move |_| {
		let view = query.get();
		let ticket = generation.begin();
		let (api, config, state, redraw) = (
			api.clone(),
			config.clone(),
			state_load.clone(),
			redraw_load.clone(),
		);
		set_warning.set(None);
		set_hits.set(Vec::new());
		set_loading.set(view != ViewQuery::Empty);

		wasm_bindgen_futures::spawn_local(async move {
			if let ViewQuery::Words(words) = &view {
				match api.word_topics(words).await {
					Ok(found) if ticket.is_current() => {
						set_hits.set(found.into_iter().take(TOPIC_HITS).collect());
					}
					Ok(_) => {}
					Err(e) => {
						if ticket.is_current() {
							set_warning.set(Some(e));
							set_loading.set(false);
						}
						return;
					}
				}
			}

			let result = load(&api, &config, &view).await;
			if !ticket.is_current() {
				debug!("dropping stale hypershelf response for {view:?}");
				return;
			}
			set_loading.set(false);
			match result {
				Ok(Some((docs, topics))) => {
					info!("hypershelf: {} documents, {} topics", docs.len(), topics.len());
					let mut shelf = state.borrow_mut();
					shelf.set_data(docs, topics, view.focal_doc().map(str::to_string));
					if let ViewQuery::Topic(t) = &view {
						shelf.select_topic(&t.to_string());
					}
					set_selected.set(shelf.selected.clone());
					set_alphabetical.set(shelf.is_alphabetical());
				}
				Ok(None) => {
					state.borrow_mut().set_data(Vec::new(), Topics::new(), None);
					set_alphabetical.set(false);
				}
				Err(e) => {
					warn!("hypershelf load failed: {e}");
					set_warning.set(Some(e));
				}
			}
			redraw();
		});
	});

	let (state_scale, redraw_scale) = (state.clone(), redraw.clone());
	let on_scale = move |ev: web_sys::Event| {
		state_scale.borrow_mut().set_scaled(event_target_checked(&ev));
		redraw_scale();
	};

	let (state_alpha, redraw_alpha) = (state.clone(), redraw.clone());
	let on_alphabetical = move |ev: web_sys::Event| {
		let checked = event_target_checked(&ev);
		state_alpha.borrow_mut().sort_alphabetical(checked);
		set_alphabetical.set(checked);
		redraw_alpha();
	};

	let (state_reset, redraw_reset) = (state.clone(), redraw.clone());
	let on_reset = move |_: MouseEvent| {
		state_reset.borrow_mut().reset_topic_sort();
		set_selected.set(None);
		redraw_reset();
	};

	let (state_click, redraw_click) = (state.clone(), redraw.clone());
	let on_click = move |ev: MouseEvent| {
		let Some(canvas) = canvas_ref.get_untracked() else {
			return;
		};
		let canvas: HtmlCanvasElement = canvas.into();
		let (x, y) = canvas_point(&canvas, &ev);
		let mut shelf = state_click.borrow_mut();
		let layout = ShelfLayout::new(canvas.width() as f64, shelf.docs.len(), bar_height);
		let Some(topic) = layout.hit(&shelf, x, y).map(|(_, seg)| seg.name.clone()) else {
			return;
		};
		debug!("hypershelf: sorting by topic {topic}");
		shelf.select_topic(&topic);
		debug!("hypershelf: topic order {:?}", shelf.topic_order());
		let alpha = shelf.is_alphabetical();
		drop(shelf);
		set_alphabetical.set(alpha);
		set_selected.set(Some(topic));
		redraw_click();
	};

	let navigate = use_navigate();
	let on_top_docs = move |_: MouseEvent| {
		if let Some(t) = selected.get_untracked().and_then(|t| t.parse().ok()) {
			navigate(&format!("?{}", ViewQuery::Topic(t).to_query_string()), Default::default());
		}
	};

	view! {
		<div class="hypershelf">
			<div class="controls">
				<label>
					<input type="checkbox" prop:checked=true on:change=on_scale />
					" Scale by similarity"
				</label>
				<label>
					<input
						type="checkbox"
						prop:checked=move || alphabetical.get()
						on:change=on_alphabetical
					/>
					" Alphabetical"
				</label>
				<button class="reset" disabled=move || selected.get().is_none() on:click=on_reset>
					"Reset topic sort"
				</button>
				<button class="topdoc" disabled=move || selected.get().is_none() on:click=on_top_docs>
					{move || match selected.get() {
						Some(t) => format!("Top Documents for Topic {t}"),
						None => "Click a topic segment below to find related documents.".to_string(),
					}}
				</button>
			</div>
			<Show when=move || warning.get().is_some()>
				<p class=move || {
					if warning.get().is_some_and(|e| e.is_query_warning()) {
						"has-warning"
					} else {
						"has-error"
					}
				}>{move || warning.get().map(|e| e.to_string())}</p>
			</Show>
			<Show when=move || loading.get()>
				<p class="loading">"Loading documents..."</p>
			</Show>
			<ul class="topic-hits">
				{move || {
					hits.get()
						.into_iter()
						.map(|h| {
							view! {
								<li>
									<a href=format!("/{}/?topic={}", h.k, h.t)>
										{format!("Topic {} (k = {})", h.t, h.k)}
									</a>
								</li>
							}
						})
						.collect_view()
				}}
			</ul>
			<canvas
				node_ref=canvas_ref
				class="hypershelf-canvas"
				on:click=on_click
				style="display: block; cursor: pointer;"
			/>
		</div>
	}
}
