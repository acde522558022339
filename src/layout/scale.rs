//! Linear and band scales mapping data space to canvas pixels.

/// Maps a continuous domain onto a pixel range.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct LinearScale {
	/// Data interval.
	pub domain: (f64, f64),
	/// Pixel interval the domain maps to.
	pub range: (f64, f64),
}

impl LinearScale {
	/// Scale from `domain` to `range`.
	pub fn new(domain: (f64, f64), range: (f64, f64)) -> Self {
		Self { domain, range }
	}

	/// Scale whose domain spans the extent of `values`.
	pub fn fit(values: impl IntoIterator<Item = f64>, range: (f64, f64)) -> Self {
		let (mut lo, mut hi) = (f64::INFINITY, f64::NEG_INFINITY);
		for v in values {
			lo = lo.min(v);
			hi = hi.max(v);
		}
		if lo > hi {
			(lo, hi) = (0.0, 1.0);
		}
		Self::new((lo, hi), range)
	}

	/// Pixel for `v`. A zero-width domain maps to the middle of the range.
	pub fn apply(&self, v: f64) -> f64 {
		let (d0, d1) = self.domain;
		let (r0, r1) = self.range;
		if d1 == d0 {
			return (r0 + r1) / 2.0;
		}
		r0 + (v - d0) / (d1 - d0) * (r1 - r0)
	}

	/// Domain value under pixel `px`.
	pub fn invert(&self, px: f64) -> f64 {
		let (d0, d1) = self.domain;
		let (r0, r1) = self.range;
		if r1 == r0 {
			return (d0 + d1) / 2.0;
		}
		d0 + (px - r0) / (r1 - r0) * (d1 - d0)
	}

	/// `count + 1` evenly spaced domain values from start to end.
	pub fn ticks(&self, count: usize) -> Vec<f64> {
		let (d0, d1) = self.domain;
		let count = count.max(1);
		(0..=count).map(|i| d0 + (d1 - d0) * i as f64 / count as f64).collect()
	}
}

/// Evenly sized bands over a pixel range, with padding between them.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct BandScale {
	/// Number of bands.
	pub count: usize,
	/// Pixel interval the bands share.
	pub range: (f64, f64),
	/// Gap between bands as a fraction of the step.
	pub padding: f64,
}

impl BandScale {
	/// `count` bands over `range` with the default padding of 0.1.
	pub fn new(count: usize, range: (f64, f64)) -> Self {
		Self {
			count,
			range,
			padding: 0.1,
		}
	}

	/// Distance between the starts of neighbouring bands.
	pub fn step(&self) -> f64 {
		if self.count == 0 {
			return 0.0;
		}
		(self.range.1 - self.range.0) / (self.count as f64 + self.padding)
	}

	/// Width of one band.
	pub fn bandwidth(&self) -> f64 {
		self.step() * (1.0 - self.padding)
	}

	/// Top-left offset and width of band `i`.
	pub fn band(&self, i: usize) -> (f64, f64) {
		let step = self.step();
		(self.range.0 + step * (self.padding + i as f64), self.bandwidth())
	}

	/// Band under pixel `px`, ignoring the gaps between bands.
	pub fn index_at(&self, px: f64) -> Option<usize> {
		(0..self.count).find(|&i| {
			let (start, width) = self.band(i);
			px >= start && px < start + width
		})
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn linear_round_trip() {
		let s = LinearScale::new((0.0, 1.0), (10.0, 110.0));
		assert_eq!(s.apply(0.5), 60.0);
		assert_eq!(s.invert(60.0), 0.5);
	}

	#[test]
	fn fit_uses_extent() {
		let s = LinearScale::fit([3.0, -1.0, 7.0], (0.0, 80.0));
		assert_eq!(s.domain, (-1.0, 7.0));
		assert_eq!(s.apply(7.0), 80.0);
	}

	#[test]
	fn degenerate_domain_maps_to_middle() {
		let s = LinearScale::fit([2.0, 2.0], (0.0, 100.0));
		assert_eq!(s.apply(2.0), 50.0);
		let empty = LinearScale::fit(std::iter::empty(), (0.0, 10.0));
		assert_eq!(empty.domain, (0.0, 1.0));
	}

	#[test]
	fn ticks_cover_domain() {
		let s = LinearScale::new((0.0, 1.0), (0.0, 500.0));
		let t = s.ticks(10);
		assert_eq!(t.len(), 11);
		assert_eq!(t[0], 0.0);
		assert!((t[10] - 1.0).abs() < 1e-12);
	}

	#[test]
	fn bands_are_padded() {
		let b = BandScale::new(3, (0.0, 310.0));
		assert!((b.step() - 100.0).abs() < 1e-9);
		let (start, width) = b.band(1);
		assert!((start - 110.0).abs() < 1e-9);
		assert!((width - 90.0).abs() < 1e-9);
		assert_eq!(b.index_at(150.0), Some(1));
		assert_eq!(b.index_at(205.0), None);
		assert_eq!(BandScale::new(0, (0.0, 10.0)).index_at(1.0), None);
	}
}
