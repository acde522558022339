//! Pairwise collision separation for circular nodes.

use rand::rngs::SmallRng;
use rand::{Rng, SeedableRng};

use super::quadtree::{Bounds, QuadTree};

/// Offset applied to coincident nodes before separating them.
const JIGGLE: f64 = 1e-6;

/// A circle in the cluster plot, eased toward `(target_x, target_y)`.
#[derive(Clone, Debug, PartialEq)]
pub struct Node {
	/// Current position.
	pub x: f64,
	/// Current position.
	pub y: f64,
	/// Where easing pulls the node.
	pub target_x: f64,
	/// Where easing pulls the node.
	pub target_y: f64,
	/// Circle radius in pixels.
	pub radius: f64,
	/// Category key. Padding only applies between nodes of different colors.
	pub color: String,
}

impl Node {
	/// Node resting at its own target.
	pub fn new(x: f64, y: f64, radius: f64, color: impl Into<String>) -> Self {
		Self {
			x,
			y,
			target_x: x,
			target_y: y,
			radius,
			color: color.into(),
		}
	}

	/// Distance between centers.
	pub fn distance_to(&self, other: &Node) -> f64 {
		(self.x - other.x).hypot(self.y - other.y)
	}
}

/// Collision force with its own RNG for breaking ties between coincident
/// nodes.
#[derive(Clone, Debug)]
pub struct Collider {
	/// Extra gap enforced between nodes of different colors.
	pub padding: f64,
	rng: SmallRng,
}

impl Collider {
	/// Collider whose jiggle is seeded with `seed`.
	pub fn new(padding: f64, seed: u64) -> Self {
		Self {
			padding,
			rng: SmallRng::seed_from_u64(seed),
		}
	}

	/// Push overlapping nodes apart, scaled by `alpha`.
	///
	/// Nodes that already keep their minimum distance are not moved. Each
	/// member of an overlapping pair takes half of the correction, in opposite
	/// directions, so with `alpha = 1` a lone pair lands exactly on its
	/// minimum distance. A full step for each node would overshoot by the
	/// overlap.
	pub fn apply(&mut self, nodes: &mut [Node], alpha: f64) {
		if nodes.is_empty() || alpha <= 0.0 {
			return;
		}

		let positions: Vec<(f64, f64)> = nodes.iter().map(|n| (n.x, n.y)).collect();
		let tree = QuadTree::build(&positions);
		let max_radius = nodes.iter().map(|n| n.radius).fold(0.0, f64::max);
		let padding = self.padding;

		for i in 0..nodes.len() {
			let reach = nodes[i].radius + max_radius + padding;
			let area = Bounds::around(nodes[i].x, nodes[i].y, reach);
			tree.visit(|points, bounds| {
				for &j in points {
					if j != i {
						self.resolve(nodes, i, j, alpha);
					}
				}
				!bounds.intersects(&area)
			});
		}
	}

	fn resolve(&mut self, nodes: &mut [Node], i: usize, j: usize, alpha: f64) {
		let (d, p) = (&nodes[i], &nodes[j]);
		let mut dx = d.x - p.x;
		let mut dy = d.y - p.y;
		let min_dist = d.radius + p.radius + if d.color != p.color { self.padding } else { 0.0 };

		let mut dist = dx.hypot(dy);
		if dist >= min_dist {
			return;
		}
		if dist == 0.0 {
			dx = self.jiggle();
			dy = self.jiggle();
			dist = dx.hypot(dy);
		}

		let k = (dist - min_dist) / dist * alpha * 0.5;
		let (mx, my) = (dx * k, dy * k);
		nodes[i].x -= mx;
		nodes[i].y -= my;
		nodes[j].x += mx;
		nodes[j].y += my;
	}

	fn jiggle(&mut self) -> f64 {
		let v = self.rng.gen_range(-0.5..0.5) * JIGGLE;
		if v == 0.0 { JIGGLE } else { v }
	}
}

/// One collision pass with a fixed seed. See [`Collider::apply`].
pub fn separate(nodes: &mut [Node], padding: f64, alpha: f64) {
	Collider::new(padding, nodes.len() as u64).apply(nodes, alpha);
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn overlapping_pair_resolves_to_min_distance() {
		let mut nodes = vec![Node::new(0.0, 0.0, 1.0, "red"), Node::new(1.0, 0.0, 1.0, "blue")];
		separate(&mut nodes, 0.0, 1.0);
		assert!((nodes[0].distance_to(&nodes[1]) - 2.0).abs() < 1e-9);
		assert!((nodes[0].x + 0.5).abs() < 1e-9);
		assert!((nodes[1].x - 1.5).abs() < 1e-9);
	}

	#[test]
	fn padding_only_between_colors() {
		let mut same = vec![Node::new(0.0, 0.0, 1.0, "a"), Node::new(2.5, 0.0, 1.0, "a")];
		separate(&mut same, 1.0, 1.0);
		assert_eq!(same[0].x, 0.0);
		assert_eq!(same[1].x, 2.5);

		let mut mixed = vec![Node::new(0.0, 0.0, 1.0, "a"), Node::new(2.5, 0.0, 1.0, "b")];
		separate(&mut mixed, 1.0, 1.0);
		assert!((mixed[0].distance_to(&mixed[1]) - 3.0).abs() < 1e-9);
	}

	#[test]
	fn coincident_nodes_are_split() {
		let mut nodes = vec![Node::new(5.0, 5.0, 1.0, "a"), Node::new(5.0, 5.0, 1.0, "b")];
		separate(&mut nodes, 0.0, 0.5);
		let dist = nodes[0].distance_to(&nodes[1]);
		assert!(dist.is_finite());
		assert!(dist > 0.0);
		assert!(nodes.iter().all(|n| n.x.is_finite() && n.y.is_finite()));
	}

	#[test]
	fn zero_alpha_is_a_no_op() {
		let mut nodes = vec![Node::new(0.0, 0.0, 1.0, "a"), Node::new(0.5, 0.0, 1.0, "b")];
		let before = nodes.clone();
		separate(&mut nodes, 0.0, 0.0);
		assert_eq!(nodes, before);
	}

	#[test]
	fn empty_input_is_a_no_op() {
		let mut nodes: Vec<Node> = Vec::new();
		separate(&mut nodes, 2.0, 1.0);
		assert!(nodes.is_empty());
	}
}
