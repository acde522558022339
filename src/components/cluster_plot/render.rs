use std::f64::consts::PI;

use web_sys::CanvasRenderingContext2d;

use super::state::ClusterPlotState;

pub fn render(state: &ClusterPlotState, ctx: &CanvasRenderingContext2d) {
	ctx.set_fill_style_str("#ffffff");
	ctx.fill_rect(0.0, 0.0, state.width, state.height);
	draw_nodes(state, ctx);
	draw_hover_label(state, ctx);
}

fn draw_nodes(state: &ClusterPlotState, ctx: &CanvasRenderingContext2d) {
	let dimmed = state.hover.is_some();
	for (i, node) in state.sim.nodes.iter().enumerate() {
		let is_hovered = state.hover == Some(i);
		ctx.set_global_alpha(if dimmed && !is_hovered { 0.5 } else { 1.0 });
		ctx.begin_path();
		let _ = ctx.arc(node.x, node.y, node.radius, 0.0, 2.0 * PI);
		ctx.set_fill_style_str(&node.color);
		ctx.fill();
		if is_hovered {
			ctx.set_stroke_style_str("#000000");
			ctx.set_line_width(1.5);
			ctx.stroke();
		}
	}
	ctx.set_global_alpha(1.0);
}

fn draw_hover_label(state: &ClusterPlotState, ctx: &CanvasRenderingContext2d) {
	let (Some(idx), Some(row)) = (state.hover, state.hovered()) else {
		return;
	};
	let node = &state.sim.nodes[idx];
	let text = format!("Topic {} (k = {}, cluster {})", row.topic, row.k, row.cluster);
	ctx.set_font("12px sans-serif");
	let width = ctx.measure_text(&text).map(|m| m.width()).unwrap_or(120.0);
	// keep the label inside the canvas
	let x = (node.x + node.radius + 4.0).min(state.width - width - 4.0).max(4.0);
	let y = (node.y - node.radius - 4.0).max(14.0);
	ctx.set_fill_style_str("rgba(255, 255, 255, 0.85)");
	ctx.fill_rect(x - 2.0, y - 12.0, width + 4.0, 16.0);
	ctx.set_fill_style_str("#222222");
	let _ = ctx.fill_text(&text, x, y);
}
