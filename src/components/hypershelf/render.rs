use web_sys::CanvasRenderingContext2d;

use super::state::{MARGIN_LEFT, ShelfLayout, ShelfState};

const AXIS_COLOR: &str = "#555555";

pub fn render(state: &ShelfState, layout: &ShelfLayout, ctx: &CanvasRenderingContext2d) {
	ctx.clear_rect(0.0, 0.0, layout.width, layout.height);
	draw_axis(state, layout, ctx);
	draw_bars(state, layout, ctx);
}

fn axis_label(state: &ShelfState) -> String {
	if !state.scaled {
		return "Proportion of document assigned to topic".into();
	}
	let focal = state
		.focal
		.as_deref()
		.and_then(|id| state.docs.iter().find(|d| d.id == id));
	match focal {
		Some(doc) => format!("Similarity to {}", doc.label),
		None => "Similarity to query".into(),
	}
}

fn draw_axis(state: &ShelfState, layout: &ShelfLayout, ctx: &CanvasRenderingContext2d) {
	let baseline = layout.y.range.0 - 4.0;
	ctx.set_stroke_style_str(AXIS_COLOR);
	ctx.set_fill_style_str(AXIS_COLOR);
	ctx.set_line_width(1.0);
	ctx.set_font("10px sans-serif");
	ctx.set_text_align("center");

	ctx.begin_path();
	ctx.move_to(layout.x.range.0, baseline);
	ctx.line_to(layout.x.range.1, baseline);
	for tick in layout.x.ticks(10) {
		let px = layout.x.apply(tick);
		ctx.move_to(px, baseline);
		ctx.line_to(px, baseline - 4.0);
		let _ = ctx.fill_text(&format!("{:.0}%", tick * 100.0), px, baseline - 7.0);
	}
	ctx.stroke();

	ctx.set_text_align("left");
	let _ = ctx.fill_text(&axis_label(state), layout.x.range.0, 10.0);
}

fn draw_bars(state: &ShelfState, layout: &ShelfLayout, ctx: &CanvasRenderingContext2d) {
	let x0 = layout.x.apply(0.0);
	for (row, doc) in state.docs.iter().enumerate() {
		let (top, height) = layout.y.band(row);

		ctx.set_text_align("right");
		ctx.set_fill_style_str("#222222");
		let is_focal = state.focal.as_deref() == Some(doc.id.as_str());
		ctx.set_font(if is_focal { "bold 12px sans-serif" } else { "12px sans-serif" });
		let _ = ctx.fill_text(&truncate(&doc.label, 32), MARGIN_LEFT - 8.0, top + height * 0.7);

		for seg in &doc.segments {
			let (sx, ex) = (layout.x.apply(seg.start), layout.x.apply(seg.end));
			if ex - sx <= 0.0 {
				continue;
			}
			ctx.set_fill_style_str(state.color_of(&seg.name));
			ctx.fill_rect(sx, top, ex - sx, height);
		}

		if let Some(selected) = state.selected.as_deref() {
			if let Some(seg) = doc.segments.iter().find(|s| s.name == selected) {
				let (sx, ex) = (layout.x.apply(seg.start), layout.x.apply(seg.end));
				ctx.set_stroke_style_str("#000000");
				ctx.set_line_width(2.0);
				ctx.stroke_rect(sx, top, ex - sx, height);
			}
		}

		ctx.set_stroke_style_str("#dddddd");
		ctx.set_line_width(0.5);
		ctx.stroke_rect(x0, top, layout.x.apply(1.0) - x0, height);
	}
}

fn truncate(label: &str, max: usize) -> String {
	if label.chars().count() <= max {
		return label.to_string();
	}
	let mut out: String = label.chars().take(max - 1).collect();
	out.push('…');
	out
}
