use wasm_bindgen::JsCast;
use web_sys::{CanvasRenderingContext2d, HtmlCanvasElement, MouseEvent};

pub fn context_2d(canvas: &HtmlCanvasElement) -> Option<CanvasRenderingContext2d> {
	let ctx = canvas.get_context("2d").ok().flatten()?.dyn_into().ok();
	if ctx.is_none() {
		log::warn!("canvas has no 2d context");
	}
	ctx
}

/// Pointer position relative to the canvas' top-left corner.
pub fn canvas_point(canvas: &HtmlCanvasElement, ev: &MouseEvent) -> (f64, f64) {
	let rect = canvas.get_bounding_client_rect();
	(
		ev.client_x() as f64 - rect.left(),
		ev.client_y() as f64 - rect.top(),
	)
}

pub fn parent_width(canvas: &HtmlCanvasElement, fallback: f64) -> f64 {
	canvas
		.parent_element()
		.map(|p| p.client_width() as f64)
		.filter(|w| *w > 0.0)
		.unwrap_or(fallback)
}

pub fn navigate_to(url: &str) {
	if let Some(window) = web_sys::window() {
		if let Err(e) = window.location().set_href(url) {
			log::warn!("navigation to {url} failed: {e:?}");
		}
	}
}
