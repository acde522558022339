use rand::rngs::SmallRng;
use rand::{Rng, SeedableRng};
use topic_explorer_viz::layout::{Node, Segment, Simulation, TopicOrder, TopicWeights, by_weight_desc, segment, separate};

fn weights(pairs: &[(&str, f64)]) -> TopicWeights {
	pairs.iter().map(|(k, w)| (k.to_string(), *w)).collect()
}

fn assert_contiguous(segs: &[Segment], total: f64) {
	let mut x0 = 0.0;
	for s in segs {
		assert!((s.start - x0).abs() < 1e-12, "gap before {}", s.name);
		assert!(s.end >= s.start);
		x0 = s.end;
	}
	assert!((x0 - total).abs() < 1e-9);
}

#[test]
fn segments_partition_the_scaled_total() {
	let w = weights(&[("3", 0.05), ("0", 0.4), ("7", 0.0), ("1", 0.25), ("2", 0.3)]);
	for scale in [1.0, 0.37, 2.5] {
		assert_contiguous(&segment(&w, scale, TopicOrder::Natural), scale);
		let cmp = by_weight_desc(&w);
		assert_contiguous(&segment(&w, scale, TopicOrder::Sorted(&cmp)), scale);
	}
}

#[test]
fn segmentation_is_idempotent() {
	let w = weights(&[("a", 0.1), ("b", 0.6), ("c", 0.3)]);
	let cmp = by_weight_desc(&w);
	assert_eq!(
		segment(&w, 0.8, TopicOrder::Sorted(&cmp)),
		segment(&w, 0.8, TopicOrder::Sorted(&cmp))
	);
}

#[test]
fn unit_weights_end_at_one() {
	let w = weights(&[("0", 0.1), ("1", 0.2), ("2", 0.3), ("3", 0.4)]);
	let segs = segment(&w, 1.0, TopicOrder::Natural);
	assert!((segs.last().map(|s| s.end).unwrap_or_default() - 1.0).abs() < 1e-9);
}

#[test]
fn natural_order_example() {
	let w = weights(&[("A", 0.2), ("B", 0.5), ("C", 0.3)]);
	let segs = segment(&w, 1.0, TopicOrder::Natural);
	let got: Vec<(&str, f64, f64)> = segs.iter().map(|s| (s.name.as_str(), s.start, s.end)).collect();
	let want = [("A", 0.0, 0.2), ("B", 0.2, 0.7), ("C", 0.7, 1.0)];
	for (g, w) in got.iter().zip(want) {
		assert_eq!(g.0, w.0);
		assert!((g.1 - w.1).abs() < 1e-9);
		assert!((g.2 - w.2).abs() < 1e-9);
	}
}

#[test]
fn previous_order_is_kept() {
	let w = weights(&[("A", 0.2), ("B", 0.5), ("C", 0.3)]);
	let previous = ["C".to_string(), "A".to_string(), "B".to_string()];
	let names: Vec<String> = segment(&w, 1.0, TopicOrder::Previous(&previous))
		.into_iter()
		.map(|s| s.name)
		.collect();
	assert_eq!(names, ["C", "A", "B"]);
}

#[test]
fn overlapping_nodes_move_apart() {
	let mut nodes = vec![Node::new(10.0, 10.0, 4.0, "red"), Node::new(13.0, 11.0, 5.0, "blue")];
	let before = nodes[0].distance_to(&nodes[1]);
	separate(&mut nodes, 1.5, 0.3);
	assert!(nodes[0].distance_to(&nodes[1]) > before);
}

#[test]
fn separation_is_symmetric() {
	let start = vec![Node::new(0.0, 0.0, 3.0, "red"), Node::new(2.0, -1.0, 3.0, "blue")];
	let mut nodes = start.clone();
	separate(&mut nodes, 2.0, 0.7);
	let da = (nodes[0].x - start[0].x, nodes[0].y - start[0].y);
	let db = (nodes[1].x - start[1].x, nodes[1].y - start[1].y);
	assert!(da.0.abs() > 0.0);
	assert!((da.0 + db.0).abs() < 1e-12);
	assert!((da.1 + db.1).abs() < 1e-12);
}

#[test]
fn separated_nodes_stay_put() {
	let start = vec![
		Node::new(0.0, 0.0, 1.0, "red"),
		Node::new(3.0, 0.0, 1.0, "blue"),
		Node::new(0.0, 2.0, 1.0, "red"),
	];
	let mut nodes = start.clone();
	separate(&mut nodes, 1.0, 1.0);
	assert_eq!(nodes, start);
}

#[test]
fn unit_pair_example() {
	let mut nodes = vec![Node::new(0.0, 0.0, 1.0, "red"), Node::new(1.0, 0.0, 1.0, "blue")];
	separate(&mut nodes, 0.0, 1.0);
	assert!((nodes[0].distance_to(&nodes[1]) - 2.0).abs() < 1e-9);
}

#[test]
fn coincident_nodes_are_split() {
	let mut nodes = vec![Node::new(5.0, 5.0, 1.0, "red"), Node::new(5.0, 5.0, 1.0, "blue")];
	separate(&mut nodes, 0.0, 1.0);
	assert!(nodes.iter().all(|n| n.x.is_finite() && n.y.is_finite()));
	assert!(nodes[0].distance_to(&nodes[1]) > 0.0);
}

#[test]
fn empty_input_is_a_no_op() {
	let mut nodes: Vec<Node> = Vec::new();
	separate(&mut nodes, 1.0, 1.0);
	assert!(segment(&TopicWeights::new(), 1.0, TopicOrder::Natural).is_empty());
}

#[test]
fn simulation_settles_without_overlap() {
	let nodes: Vec<Node> = (0..30)
		.map(|i| {
			let color = if i % 2 == 0 { "red" } else { "blue" };
			let mut n = Node::new(100.0, 100.0, 4.0, color);
			n.target_x = 100.0 + (i % 6) as f64;
			n.target_y = 100.0 + (i / 6) as f64;
			n
		})
		.collect();
	let mut sim = Simulation::new(nodes, 1.0, 7);
	let mut ticks = 0;
	while sim.tick() {
		ticks += 1;
	}
	assert!(ticks > 0);
	assert!(!sim.is_running());
	assert!(sim.nodes.iter().all(|n| n.x.is_finite() && n.y.is_finite()));
}

/// Every ordered pair, no spatial index.
fn separate_all_pairs(nodes: &mut [Node], padding: f64, alpha: f64) {
	for i in 0..nodes.len() {
		for j in 0..nodes.len() {
			if i == j {
				continue;
			}
			let dx = nodes[i].x - nodes[j].x;
			let dy = nodes[i].y - nodes[j].y;
			let pad = if nodes[i].color != nodes[j].color { padding } else { 0.0 };
			let min_dist = nodes[i].radius + nodes[j].radius + pad;
			let dist = dx.hypot(dy);
			if dist >= min_dist {
				continue;
			}
			let k = (dist - min_dist) / dist * alpha * 0.5;
			nodes[i].x -= dx * k;
			nodes[i].y -= dy * k;
			nodes[j].x += dx * k;
			nodes[j].y += dy * k;
		}
	}
}

#[test]
fn pruned_separation_matches_all_pairs() {
	let radii = [1.0, 3.0, 10.0];
	let colors = ["red", "blue"];
	let mut rng = SmallRng::seed_from_u64(42);
	for _ in 0..50 {
		// Overlapping pairs on a coarse grid so no two pairs can touch.
		let mut nodes = Vec::new();
		for cell in 0..36 {
			let (cx, cy) = ((cell % 6) as f64 * 100.0, (cell / 6) as f64 * 100.0);
			let a = Node::new(
				cx + rng.gen_range(-5.0..5.0),
				cy + rng.gen_range(-5.0..5.0),
				radii[rng.gen_range(0..radii.len())],
				colors[rng.gen_range(0..2)],
			);
			let rb = radii[rng.gen_range(0..radii.len())];
			let angle = rng.gen_range(0.0..std::f64::consts::TAU);
			let d = rng.gen_range(0.1..(a.radius + rb));
			let b = Node::new(a.x + d * angle.cos(), a.y + d * angle.sin(), rb, colors[rng.gen_range(0..2)]);
			nodes.push(a);
			nodes.push(b);
		}
		let alpha = rng.gen_range(0.05..1.0);
		let mut expected = nodes.clone();
		separate_all_pairs(&mut expected, 1.5, alpha);
		separate(&mut nodes, 1.5, alpha);
		for (got, want) in nodes.iter().zip(&expected) {
			assert!((got.x - want.x).abs() < 1e-9, "{got:?} != {want:?}");
			assert!((got.y - want.y).abs() < 1e-9, "{got:?} != {want:?}");
		}
	}
}
