use crate::data::ClusterRow;
use crate::layout::{LinearScale, Node, Simulation};

const COLORS: &[&str] = &[
	"#1f77b4", "#ff7f0e", "#2ca02c", "#d62728", "#9467bd", "#8c564b", "#e377c2", "#7f7f7f",
	"#bcbd22", "#17becf",
];

pub const MARGIN: f64 = 30.0;

pub fn cluster_color(cluster: usize) -> &'static str {
	COLORS[cluster % COLORS.len()]
}

pub struct ClusterPlotState {
	pub sim: Simulation,
	pub rows: Vec<ClusterRow>,
	pub x: LinearScale,
	pub y: LinearScale,
	pub width: f64,
	pub height: f64,
	pub hover: Option<usize>,
}

impl ClusterPlotState {
	/// Nodes start at the plot center and ease out to their cluster
	/// coordinates.
	pub fn new(rows: Vec<ClusterRow>, width: f64, height: f64, radius: f64, padding: f64, seed: u64) -> Self {
		let (x, y) = scales(&rows, width, height);
		let (cx, cy) = (width / 2.0, height / 2.0);
		let nodes = rows
			.iter()
			.map(|row| Node {
				target_x: x.apply(row.orig_x),
				target_y: y.apply(row.orig_y),
				..Node::new(cx, cy, radius, cluster_color(row.cluster))
			})
			.collect();
		Self {
			sim: Simulation::new(nodes, padding, seed),
			rows,
			x,
			y,
			width,
			height,
			hover: None,
		}
	}

	pub fn resize(&mut self, width: f64, height: f64) {
		self.width = width;
		self.height = height;
		let (x, y) = scales(&self.rows, width, height);
		self.x = x;
		self.y = y;
		let rows = &self.rows;
		self.sim
			.retarget(|i, _| (x.apply(rows[i].orig_x), y.apply(rows[i].orig_y)));
	}

	pub fn set_hover(&mut self, px: f64, py: f64) {
		self.hover = self.sim.node_at(px, py);
	}

	pub fn hovered(&self) -> Option<&ClusterRow> {
		self.hover.and_then(|i| self.rows.get(i))
	}

	/// Explorer page for a node's topic.
	pub fn topic_url(&self, idx: usize) -> Option<String> {
		self.rows.get(idx).map(|r| format!("/{}/?topic={}", r.k, r.topic))
	}
}

fn scales(rows: &[ClusterRow], width: f64, height: f64) -> (LinearScale, LinearScale) {
	let x = LinearScale::fit(rows.iter().map(|r| r.orig_x), (MARGIN, width - MARGIN));
	// screen y grows downward
	let y = LinearScale::fit(rows.iter().map(|r| r.orig_y), (height - MARGIN, MARGIN));
	(x, y)
}
