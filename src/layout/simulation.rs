//! Tick driver for the cluster plot: ease toward data positions, then
//! optionally separate collisions, while alpha decays.

use super::collide::{Collider, Node};

/// Alpha after a start or reheat.
pub const ALPHA_START: f64 = 0.1;
/// The simulation stops once alpha drops below this.
pub const ALPHA_MIN: f64 = 0.005;
/// Per-tick alpha multiplier.
pub const ALPHA_DECAY: f64 = 0.99;
/// Fraction of the distance to its target a node covers per tick at alpha 1.
pub const EASE: f64 = 0.1;

/// Whether ticks still move nodes.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum RunState {
	/// Ticking until alpha cools.
	Running,
	/// Cooled or stopped by hand. Positions are kept.
	Stopped,
}

/// Nodes plus the cooling schedule that moves them.
#[derive(Clone, Debug)]
pub struct Simulation {
	/// Plotted nodes, in input order.
	pub nodes: Vec<Node>,
	/// Current temperature. Scales both easing and collision.
	pub alpha: f64,
	/// Running or stopped.
	pub state: RunState,
	collide: bool,
	collider: Collider,
}

impl Simulation {
	/// Running simulation with collisions on. `seed` feeds the collision jiggle.
	pub fn new(nodes: Vec<Node>, padding: f64, seed: u64) -> Self {
		Self {
			nodes,
			alpha: ALPHA_START,
			state: RunState::Running,
			collide: true,
			collider: Collider::new(padding, seed),
		}
	}

	/// True until alpha cools or [`Simulation::stop`] is called.
	pub fn is_running(&self) -> bool {
		self.state == RunState::Running
	}

	/// Whether ticks run the collision pass.
	pub fn collide_enabled(&self) -> bool {
		self.collide
	}

	/// Reheat to [`ALPHA_START`] and resume ticking.
	pub fn start(&mut self) {
		self.alpha = ALPHA_START;
		self.state = RunState::Running;
	}

	/// Stop ticking, keeping the current positions.
	pub fn stop(&mut self) {
		self.state = RunState::Stopped;
	}

	/// Toggle collision separation and reheat so the change is visible.
	pub fn set_collide(&mut self, enabled: bool) {
		self.collide = enabled;
		self.start();
	}

	/// Replace every node's target, e.g. after the plot is resized.
	pub fn retarget<F>(&mut self, mut target: F)
	where
		F: FnMut(usize, &Node) -> (f64, f64),
	{
		for (i, node) in self.nodes.iter_mut().enumerate() {
			let (tx, ty) = target(i, node);
			node.target_x = tx;
			node.target_y = ty;
		}
		self.start();
	}

	/// Advance one tick. Returns `false` once the simulation has stopped.
	pub fn tick(&mut self) -> bool {
		if !self.is_running() {
			return false;
		}

		let alpha = self.alpha;
		for node in &mut self.nodes {
			node.x += (node.target_x - node.x) * EASE * alpha;
			node.y += (node.target_y - node.y) * EASE * alpha;
		}
		if self.collide {
			self.collider.apply(&mut self.nodes, alpha);
		}

		self.alpha *= ALPHA_DECAY;
		if self.alpha < ALPHA_MIN {
			self.alpha = 0.0;
			self.state = RunState::Stopped;
		}
		self.is_running()
	}

	/// Index of the topmost node covering `(x, y)`.
	pub fn node_at(&self, x: f64, y: f64) -> Option<usize> {
		self.nodes
			.iter()
			.enumerate()
			.rev()
			.find(|(_, n)| (n.x - x).hypot(n.y - y) <= n.radius)
			.map(|(i, _)| i)
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	fn node_at(x: f64, y: f64, tx: f64, ty: f64) -> Node {
		Node {
			target_x: tx,
			target_y: ty,
			..Node::new(x, y, 2.0, "a")
		}
	}

	#[test]
	fn eases_toward_target() {
		let mut sim = Simulation::new(vec![node_at(0.0, 0.0, 100.0, 50.0)], 1.5, 1);
		sim.tick();
		let n = &sim.nodes[0];
		assert!((n.x - 100.0 * EASE * ALPHA_START).abs() < 1e-9);
		assert!((n.y - 50.0 * EASE * ALPHA_START).abs() < 1e-9);
	}

	#[test]
	fn stops_when_alpha_decays() {
		let mut sim = Simulation::new(vec![node_at(0.0, 0.0, 10.0, 10.0)], 1.5, 1);
		let mut ticks = 0;
		while sim.tick() {
			ticks += 1;
			assert!(ticks < 1000);
		}
		assert_eq!(sim.state, RunState::Stopped);
		// 0.1 * 0.99^n < 0.005 first holds at n = 299
		assert_eq!(ticks, 298);
		let x = sim.nodes[0].x;
		assert!(!sim.tick());
		assert_eq!(sim.nodes[0].x, x);
	}

	#[test]
	fn stopped_simulation_restarts() {
		let mut sim = Simulation::new(vec![node_at(0.0, 0.0, 10.0, 10.0)], 1.5, 1);
		sim.stop();
		assert!(!sim.tick());
		sim.start();
		assert!(sim.is_running());
		assert_eq!(sim.alpha, ALPHA_START);
	}

	#[test]
	fn collide_toggle_reheats() {
		let mut sim = Simulation::new(vec![node_at(0.0, 0.0, 0.0, 0.0)], 1.5, 1);
		sim.alpha = 0.01;
		sim.set_collide(false);
		assert!(!sim.collide_enabled());
		assert_eq!(sim.alpha, ALPHA_START);
	}

	#[test]
	fn collisions_keep_nodes_apart() {
		let nodes = vec![node_at(0.0, 0.0, 0.0, 0.0), {
			let mut n = node_at(0.0, 0.0, 0.0, 0.0);
			n.color = "b".into();
			n
		}];
		let mut sim = Simulation::new(nodes, 1.0, 7);
		for _ in 0..50 {
			sim.tick();
		}
		assert!(sim.nodes[0].distance_to(&sim.nodes[1]) > 0.0);
	}

	#[test]
	fn retarget_moves_targets() {
		let mut sim = Simulation::new(vec![node_at(0.0, 0.0, 1.0, 1.0)], 1.5, 1);
		sim.stop();
		sim.retarget(|_, n| (n.target_x * 2.0, n.target_y * 3.0));
		assert_eq!((sim.nodes[0].target_x, sim.nodes[0].target_y), (2.0, 3.0));
		assert!(sim.is_running());
	}

	#[test]
	fn hit_test_prefers_last_drawn() {
		let sim = Simulation::new(vec![node_at(0.0, 0.0, 0.0, 0.0), node_at(1.0, 0.0, 1.0, 0.0)], 1.5, 1);
		assert_eq!(sim.node_at(0.5, 0.0), Some(1));
		assert_eq!(sim.node_at(50.0, 0.0), None);
	}
}
