use leptos::html::Canvas;
use leptos::prelude::*;
use log::warn;
use web_sys::{HtmlCanvasElement, MouseEvent};

use super::render;
use super::state::{FingerprintBar, FingerprintLayout, invalid_document, topic_list_failed};
use crate::api::{ApiClient, Generation, Ticket};
use crate::components::canvas::{canvas_point, context_2d, navigate_to, parent_width};
use crate::config::ExplorerConfig;

fn update_bar(
	bars: RwSignal<Vec<FingerprintBar>>,
	idx: usize,
	ticket: &Ticket,
	f: impl FnOnce(FingerprintBar) -> FingerprintBar,
) {
	if !ticket.is_current() {
		return;
	}
	bars.update(|bars| {
		if let Some(slot) = bars.get_mut(idx) {
			*slot = f(slot.clone());
		}
	});
}

/// Document, then topic list, for one model size.
async fn load_bar(
	api: ApiClient,
	k: usize,
	id: String,
	idx: usize,
	ticket: Ticket,
	bars: RwSignal<Vec<FingerprintBar>>,
) {
	match api.doc_topics(k, &id, 1).await {
		Ok(docs) if !docs.is_empty() => update_bar(bars, idx, &ticket, |b| b.with_docs(docs, &id)),
		Ok(_) => return update_bar(bars, idx, &ticket, |b| b.with_status(invalid_document(&id))),
		Err(e) => {
			warn!("fingerprint k={k}: {e}");
			return update_bar(bars, idx, &ticket, |b| b.with_status(invalid_document(&id)));
		}
	}
	match api.topics(k).await {
		Ok(topics) => update_bar(bars, idx, &ticket, |b| b.with_topics(topics)),
		Err(e) => {
			warn!("fingerprint topics k={k}: {e}");
			update_bar(bars, idx, &ticket, |b| b.with_status(topic_list_failed()));
		}
	}
}

fn layout_for(canvas: &HtmlCanvasElement, bar_height: f64) -> FingerprintLayout {
	FingerprintLayout::new(parent_width(canvas, 600.0), bar_height)
}

#[component]
pub fn Fingerprint(#[prop(into)] doc: Signal<Option<String>>) -> impl IntoView {
	let config = use_context::<ExplorerConfig>().unwrap_or_default();
	let api = ApiClient::new(config.host.clone());
	let bar_height = config.fingerprint_height;
	let canvas_ref = NodeRef::<Canvas>::new();
	let bars = RwSignal::new(Vec::<FingerprintBar>::new());
	let (tooltip, set_tooltip) = signal(None::<String>);
	let generation = Generation::default();

	let ks = config.ks.clone();
	Effect::new(move |_| {
		let ticket = generation.begin();
		set_tooltip.set(None);
		let Some(id) = doc.get() else {
			bars.set(Vec::new());
			return;
		};
		bars.set(ks.iter().map(|&k| FingerprintBar::loading(k)).collect());
		for (idx, &k) in ks.iter().enumerate() {
			wasm_bindgen_futures::spawn_local(load_bar(api.clone(), k, id.clone(), idx, ticket.clone(), bars));
		}
	});

	Effect::new(move |_| {
		let Some(canvas) = canvas_ref.get() else {
			return;
		};
		let canvas: HtmlCanvasElement = canvas.into();
		bars.with(|bars| {
			let complete: Vec<&FingerprintBar> = bars.iter().filter(|b| b.is_complete()).collect();
			let layout = layout_for(&canvas, bar_height);
			canvas.set_width(layout.width as u32);
			canvas.set_height(layout.height(complete.len()) as u32);
			if let Some(ctx) = context_2d(&canvas) {
				render::render(&complete, &layout, &ctx);
			}
		});
	});

	let bar_under = move |ev: &MouseEvent| -> Option<(FingerprintBar, f64)> {
		let canvas: HtmlCanvasElement = canvas_ref.get_untracked()?.into();
		let (x, y) = canvas_point(&canvas, ev);
		let (row, fraction) = layout_for(&canvas, bar_height).hit(x, y)?;
		bars.with_untracked(|bars| {
			bars.iter()
				.filter(|b| b.is_complete())
				.nth(row)
				.map(|b| (b.clone(), fraction))
		})
	};

	let on_mousemove = move |ev: MouseEvent| {
		set_tooltip.set(bar_under(&ev).and_then(|(bar, fraction)| bar.tooltip_at(fraction)));
	};

	let host = config.host.clone();
	let on_click = move |ev: MouseEvent| {
		if let Some(url) = bar_under(&ev).and_then(|(bar, _)| bar.explorer_url(&host)) {
			navigate_to(&url);
		}
	};

	view! {
		<div class="fingerprint">
			<dl class="fingerprint-status">
				{move || {
					bars.get()
						.into_iter()
						.filter(|b| !b.is_complete())
						.map(|b| {
							let (percent, caption) = b.status.progress();
							view! {
								<dt>{format!("{} Topics", b.k)}</dt>
								<dd class="progress">
									<div class="bar" style=format!("width: {percent}%")>{caption}</div>
								</dd>
							}
						})
						.collect_view()
				}}
			</dl>
			<canvas
				node_ref=canvas_ref
				class="fingerprint-canvas"
				on:mousemove=on_mousemove
				on:mouseleave=move |_| set_tooltip.set(None)
				on:click=on_click
				style="display: block; cursor: pointer;"
			/>
			<p class="fingerprint-tooltip">{move || tooltip.get()}</p>
		</div>
	}
}
