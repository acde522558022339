use std::cell::RefCell;
use std::rc::Rc;

use leptos::prelude::*;
use log::{info, warn};
use wasm_bindgen::prelude::*;
use web_sys::{HtmlCanvasElement, MouseEvent, Window};

use super::render;
use super::state::ClusterPlotState;
use crate::api::ApiClient;
use crate::components::canvas::{canvas_point, context_2d, navigate_to, parent_width};
use crate::config::ExplorerConfig;
use crate::data::ClusterRow;

#[component]
pub fn ClusterPlot(#[prop(default = 480.0)] height: f64) -> impl IntoView {
	let config = use_context::<ExplorerConfig>().unwrap_or_default();
	let canvas_ref = NodeRef::<leptos::html::Canvas>::new();
	let state: Rc<RefCell<Option<ClusterPlotState>>> = Rc::new(RefCell::new(None));
	let animate: Rc<RefCell<Option<Closure<dyn FnMut()>>>> = Rc::new(RefCell::new(None));
	let resize_cb: Rc<RefCell<Option<Closure<dyn FnMut()>>>> = Rc::new(RefCell::new(None));
	let (rows, set_rows) = signal(None::<Vec<ClusterRow>>);
	let (error, set_error) = signal(None::<String>);
	let (collide, set_collide) = signal(true);

	let api = ApiClient::new(config.host.clone());
	wasm_bindgen_futures::spawn_local(async move {
		match api.cluster().await {
			Ok(loaded) => {
				info!("cluster plot: {} topics", loaded.len());
				set_rows.set(Some(loaded));
			}
			Err(e) => {
				warn!("cluster.csv: {e}");
				set_error.set(Some(e.to_string()));
			}
		}
	});

	let (state_init, animate_init, resize_cb_init) =
		(state.clone(), animate.clone(), resize_cb.clone());
	Effect::new(move |_| {
		let (Some(canvas), Some(rows)) = (canvas_ref.get(), rows.get()) else {
			return;
		};
		let canvas: HtmlCanvasElement = canvas.into();
		let Some(window): Option<Window> = web_sys::window() else {
			return;
		};
		let Some(ctx) = context_2d(&canvas) else {
			return;
		};

		let w = parent_width(&canvas, 800.0);
		canvas.set_width(w as u32);
		canvas.set_height(height as u32);
		let seed = js_sys::Date::now() as u64;
		let mut plot = ClusterPlotState::new(
			rows,
			w,
			height,
			config.node_radius,
			config.collide_padding,
			seed,
		);
		plot.sim.set_collide(collide.get_untracked());
		*state_init.borrow_mut() = Some(plot);

		if animate_init.borrow().is_some() {
			return;
		}

		let (state_resize, canvas_resize) = (state_init.clone(), canvas.clone());
		*resize_cb_init.borrow_mut() = Some(Closure::new(move || {
			let nw = parent_width(&canvas_resize, 800.0);
			canvas_resize.set_width(nw as u32);
			if let Some(ref mut s) = *state_resize.borrow_mut() {
				s.resize(nw, s.height);
			}
		}));
		if let Some(ref cb) = *resize_cb_init.borrow() {
			let _ = window.add_event_listener_with_callback("resize", cb.as_ref().unchecked_ref());
		}

		let (state_anim, animate_inner) = (state_init.clone(), animate_init.clone());
		*animate_init.borrow_mut() = Some(Closure::new(move || {
			if let Some(ref mut s) = *state_anim.borrow_mut() {
				s.sim.tick();
				render::render(s, &ctx);
			}
			if let (Some(cb), Some(win)) = (animate_inner.borrow().as_ref(), web_sys::window()) {
				let _ = win.request_animation_frame(cb.as_ref().unchecked_ref());
			}
		}));
		if let Some(ref cb) = *animate_init.borrow() {
			let _ = window.request_animation_frame(cb.as_ref().unchecked_ref());
		}
	});

	let state_toggle = state.clone();
	let on_collide = move |ev: web_sys::Event| {
		let enabled = event_target_checked(&ev);
		set_collide.set(enabled);
		if let Some(ref mut s) = *state_toggle.borrow_mut() {
			s.sim.set_collide(enabled);
		}
	};

	let state_mm = state.clone();
	let on_mousemove = move |ev: MouseEvent| {
		let Some(canvas) = canvas_ref.get_untracked() else {
			return;
		};
		let canvas: HtmlCanvasElement = canvas.into();
		let (x, y) = canvas_point(&canvas, &ev);
		if let Some(ref mut s) = *state_mm.borrow_mut() {
			s.set_hover(x, y);
		}
	};

	let state_ml = state.clone();
	let on_mouseleave = move |_: MouseEvent| {
		if let Some(ref mut s) = *state_ml.borrow_mut() {
			s.hover = None;
		}
	};

	let state_click = state.clone();
	let on_click = move |_: MouseEvent| {
		let url = state_click
			.borrow()
			.as_ref()
			.and_then(|s| s.hover.and_then(|i| s.topic_url(i)));
		if let Some(url) = url {
			navigate_to(&url);
		}
	};

	view! {
		<div class="cluster-plot">
			<label>
				<input type="checkbox" prop:checked=move || collide.get() on:change=on_collide />
				" Collision detection"
			</label>
			<Show when=move || error.get().is_some()>
				<p class="has-error">{move || error.get()}</p>
			</Show>
			<canvas
				node_ref=canvas_ref
				class="cluster-plot-canvas"
				on:mousemove=on_mousemove
				on:mouseleave=on_mouseleave
				on:click=on_click
				style="display: block; cursor: pointer;"
			/>
		</div>
	}
}
