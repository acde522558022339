//! Point quadtree over node positions.
//!
//! Cells are stored flat in a `Vec`; children refer to their index. Points are
//! kept as indices into the slice the tree was built from, so the caller can
//! mutate the underlying nodes while walking the tree.

/// Axis-aligned rectangle, `x0 <= x1` and `y0 <= y1`.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Bounds {
	/// Left edge.
	pub x0: f64,
	/// Top edge.
	pub y0: f64,
	/// Right edge.
	pub x1: f64,
	/// Bottom edge.
	pub y1: f64,
}

impl Bounds {
	/// Square of half-width `r` centered on `(x, y)`.
	pub fn around(x: f64, y: f64, r: f64) -> Self {
		Self {
			x0: x - r,
			y0: y - r,
			x1: x + r,
			y1: y + r,
		}
	}

	/// Overlap test; touching edges count.
	pub fn intersects(&self, other: &Bounds) -> bool {
		!(self.x0 > other.x1 || self.x1 < other.x0 || self.y0 > other.y1 || self.y1 < other.y0)
	}
}

const MAX_DEPTH: usize = 24;

#[derive(Debug)]
enum CellKind {
	Leaf(Vec<usize>),
	Branch([Option<usize>; 4]),
}

#[derive(Debug)]
struct Cell {
	bounds: Bounds,
	kind: CellKind,
}

/// Quadtree built once from a set of positions.
#[derive(Debug, Default)]
pub struct QuadTree {
	cells: Vec<Cell>,
}

impl QuadTree {
	/// Build a tree over `positions`. Index `i` in the tree refers to
	/// `positions[i]`.
	pub fn build(positions: &[(f64, f64)]) -> Self {
		if positions.is_empty() {
			return Self::default();
		}

		let (mut x0, mut y0, mut x1, mut y1) = (f64::MAX, f64::MAX, f64::MIN, f64::MIN);
		for &(x, y) in positions {
			x0 = x0.min(x);
			y0 = y0.min(y);
			x1 = x1.max(x);
			y1 = y1.max(y);
		}
		// Square extent so every subdivision stays square.
		let size = (x1 - x0).max(y1 - y0).max(1.0);

		let mut tree = Self {
			cells: Vec::with_capacity(positions.len() * 2),
		};
		let indices: Vec<usize> = (0..positions.len()).collect();
		tree.build_cell(positions, indices, x0, y0, size, 0);
		tree
	}

	fn build_cell(
		&mut self,
		positions: &[(f64, f64)],
		indices: Vec<usize>,
		x0: f64,
		y0: f64,
		size: f64,
		depth: usize,
	) -> usize {
		let idx = self.cells.len();
		let bounds = Bounds {
			x0,
			y0,
			x1: x0 + size,
			y1: y0 + size,
		};

		if indices.len() <= 1 || depth >= MAX_DEPTH || all_coincident(positions, &indices) {
			self.cells.push(Cell {
				bounds,
				kind: CellKind::Leaf(indices),
			});
			return idx;
		}
		self.cells.push(Cell {
			bounds,
			kind: CellKind::Branch([None; 4]),
		});

		let half = size / 2.0;
		let (mx, my) = (x0 + half, y0 + half);
		let mut quadrants: [Vec<usize>; 4] = Default::default();
		for i in indices {
			let (x, y) = positions[i];
			let q = usize::from(x >= mx) | (usize::from(y >= my) << 1);
			quadrants[q].push(i);
		}

		let mut children = [None; 4];
		for (q, points) in quadrants.into_iter().enumerate() {
			if points.is_empty() {
				continue;
			}
			let cx = if q & 1 == 0 { x0 } else { mx };
			let cy = if q & 2 == 0 { y0 } else { my };
			children[q] = Some(self.build_cell(positions, points, cx, cy, half, depth + 1));
		}
		self.cells[idx].kind = CellKind::Branch(children);
		idx
	}

	/// True when built from no points.
	pub fn is_empty(&self) -> bool {
		self.cells.is_empty()
	}

	/// Walk the tree depth first. `visit` receives the cell's point indices
	/// (empty for inner cells) and bounds, and returns `true` to skip the
	/// cell's children.
	pub fn visit<F>(&self, mut visit: F)
	where
		F: FnMut(&[usize], &Bounds) -> bool,
	{
		if self.cells.is_empty() {
			return;
		}
		let mut stack = vec![0usize];
		while let Some(idx) = stack.pop() {
			let cell = &self.cells[idx];
			match &cell.kind {
				CellKind::Leaf(points) => {
					visit(points, &cell.bounds);
				}
				CellKind::Branch(children) => {
					if !visit(&[], &cell.bounds) {
						stack.extend(children.iter().rev().flatten());
					}
				}
			}
		}
	}
}

fn all_coincident(positions: &[(f64, f64)], indices: &[usize]) -> bool {
	let first = positions[indices[0]];
	indices.iter().all(|&i| positions[i] == first)
}
