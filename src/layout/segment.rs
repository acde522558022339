//! Proportional segmentation of a document bar into topic segments.
//!
//! A document's topic distribution is laid end to end along `[0, sum * scale]`,
//! one contiguous segment per topic. The order of the segments is chosen by a
//! [`TopicOrder`].

use std::cmp::Ordering;

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

/// Topic identifier as it appears in the JSON payloads (`"0"`, `"1"`, ...).
pub type TopicId = String;

/// A document's topic distribution, in payload order.
pub type TopicWeights = IndexMap<TopicId, f64>;

/// One topic's share of a document bar.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Segment {
	/// Topic this segment belongs to.
	pub name: TopicId,
	/// Offset from the left end of the bar.
	pub start: f64,
	/// `start` plus the scaled weight.
	pub end: f64,
}

impl Segment {
	/// Length along the bar.
	pub fn width(&self) -> f64 {
		self.end - self.start
	}

	/// Half-open: a boundary belongs to the segment on its right.
	pub fn contains(&self, x: f64) -> bool {
		x >= self.start && x < self.end
	}
}

/// How topics are ordered along the bar.
#[derive(Clone, Copy)]
pub enum TopicOrder<'a> {
	/// Payload order of the weight map.
	Natural,
	/// Keep a previously computed order. Topics missing from it are appended
	/// in payload order.
	Previous(&'a [TopicId]),
	/// Sort with a caller-supplied comparator.
	Sorted(&'a dyn Fn(&str, &str) -> Ordering),
}

/// Lay out `weights` as contiguous segments starting at 0.
///
/// Each segment is `weight * scale` wide. Weights must be non-negative.
pub fn segment(weights: &TopicWeights, scale: f64, order: TopicOrder<'_>) -> Vec<Segment> {
	let mut x0 = 0.0;
	ordered_topics(weights, order)
		.into_iter()
		.map(|(name, weight)| {
			debug_assert!(weight >= 0.0, "negative weight for topic {name}");
			let start = x0;
			x0 += weight * scale;
			Segment {
				name: name.clone(),
				start,
				end: x0,
			}
		})
		.collect()
}

/// The topic ids of a segmentation, in bar order.
pub fn order_of(segments: &[Segment]) -> Vec<TopicId> {
	segments.iter().map(|s| s.name.clone()).collect()
}

fn ordered_topics<'w>(weights: &'w TopicWeights, order: TopicOrder<'_>) -> Vec<(&'w TopicId, f64)> {
	match order {
		TopicOrder::Natural => weights.iter().map(|(k, &w)| (k, w)).collect(),
		TopicOrder::Previous(previous) => {
			let mut out: Vec<_> = previous
				.iter()
				.filter_map(|id| weights.get_key_value(id.as_str()))
				.map(|(k, &w)| (k, w))
				.collect();
			out.extend(
				weights
					.iter()
					.filter(|(k, _)| !previous.contains(*k))
					.map(|(k, &w)| (k, w)),
			);
			out
		}
		TopicOrder::Sorted(cmp) => {
			let mut out: Vec<_> = weights.iter().map(|(k, &w)| (k, w)).collect();
			out.sort_by(|a, b| cmp(a.0.as_str(), b.0.as_str()));
			out
		}
	}
}

/// Comparator: descending weight in `reference`, ties broken by id.
///
/// Topics missing from `reference` count as zero.
pub fn by_weight_desc(reference: &TopicWeights) -> impl Fn(&str, &str) -> Ordering + '_ {
	move |a: &str, b: &str| {
		let (wa, wb) = (weight_of(reference, a), weight_of(reference, b));
		wb.total_cmp(&wa).then_with(|| a.cmp(b))
	}
}

/// Comparator: `focal` first, everything else by [`by_weight_desc`].
pub fn focal_first<'a>(focal: &'a str, reference: &'a TopicWeights) -> impl Fn(&str, &str) -> Ordering + 'a {
	let rest = by_weight_desc(reference);
	move |a: &str, b: &str| match (a == focal, b == focal) {
		(true, true) => Ordering::Equal,
		(true, false) => Ordering::Less,
		(false, true) => Ordering::Greater,
		(false, false) => rest(a, b),
	}
}

fn weight_of(weights: &TopicWeights, id: &str) -> f64 {
	weights.get(id).copied().unwrap_or(0.0)
}
