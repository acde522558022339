use web_sys::CanvasRenderingContext2d;

use super::state::{FingerprintBar, FingerprintLayout, LABEL_WIDTH};

/// Draw the completed bars, one row per model size.
pub fn render(bars: &[&FingerprintBar], layout: &FingerprintLayout, ctx: &CanvasRenderingContext2d) {
	ctx.clear_rect(0.0, 0.0, layout.width, layout.height(bars.len()));
	ctx.set_font("12px sans-serif");
	ctx.set_text_align("left");

	for (row, bar) in bars.iter().enumerate() {
		let top = layout.row_top(row);
		ctx.set_fill_style_str("#222222");
		let _ = ctx.fill_text(&format!("{} Topics", bar.k), 0.0, top + layout.bar_height * 0.75);

		let Some(doc) = bar.doc.as_ref() else {
			continue;
		};
		for seg in &doc.segments {
			let (sx, ex) = (layout.x.apply(seg.start), layout.x.apply(seg.end));
			let color = bar.topics.get(&seg.name).map(|t| t.color.as_str()).unwrap_or("#999999");
			ctx.set_fill_style_str(color);
			ctx.fill_rect(sx, top, ex - sx, layout.bar_height);
		}
		ctx.set_stroke_style_str("#dddddd");
		ctx.set_line_width(0.5);
		ctx.stroke_rect(LABEL_WIDTH, top, layout.x.apply(1.0) - LABEL_WIDTH, layout.bar_height);
	}
}
