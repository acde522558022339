use crate::data::{DocRecord, Topics, segment_records};
use crate::layout::segment::order_of;
use crate::layout::{BandScale, LinearScale, Segment, TopicId, TopicOrder, TopicWeights, by_weight_desc, focal_first};

pub const MARGIN_LEFT: f64 = 220.0;
pub const MARGIN_RIGHT: f64 = 20.0;
pub const MARGIN_TOP: f64 = 36.0;

#[derive(Clone, Debug, Default, PartialEq)]
pub enum DocSort {
	/// Most similar to the focal document first.
	#[default]
	Similarity,
	Alphabetical,
	/// Highest weight of the topic first.
	Topic(TopicId),
}

/// Everything the hypershelf draws. Mutated only through its methods, each of
/// which leaves the segments consistent with the flags.
#[derive(Clone, Debug, Default)]
pub struct ShelfState {
	pub docs: Vec<DocRecord>,
	pub topics: Topics,
	pub focal: Option<String>,
	/// Scale bars by document similarity instead of filling the full width.
	pub scaled: bool,
	pub doc_sort: DocSort,
	pub selected: Option<TopicId>,
	topic_order: Vec<TopicId>,
}

impl ShelfState {
	pub fn new(scaled: bool) -> Self {
		Self {
			scaled,
			..Self::default()
		}
	}

	pub fn is_empty(&self) -> bool {
		self.docs.is_empty()
	}

	pub fn topic_order(&self) -> &[TopicId] {
		&self.topic_order
	}

	/// Replace the dataset. Documents are ordered by similarity and topics by
	/// their weight in the focal document.
	pub fn set_data(&mut self, docs: Vec<DocRecord>, topics: Topics, focal: Option<String>) {
		self.docs = docs;
		self.topics = topics;
		self.focal = focal;
		self.selected = None;
		self.doc_sort = DocSort::Similarity;
		self.sort_docs();
		self.resegment_by_focal();
	}

	/// The distribution topics are ordered by: the focal document when it is in
	/// the dataset, else the first document.
	pub fn reference_weights(&self) -> TopicWeights {
		self.focal
			.as_deref()
			.and_then(|id| self.docs.iter().find(|d| d.id == id))
			.or_else(|| self.docs.first())
			.map(|d| d.topics.clone())
			.unwrap_or_default()
	}

	pub fn set_scaled(&mut self, scaled: bool) {
		self.scaled = scaled;
		let order = std::mem::take(&mut self.topic_order);
		self.resegment(TopicOrder::Previous(&order));
	}

	/// Whether the alphabetical toggle should show as checked.
	pub fn is_alphabetical(&self) -> bool {
		self.doc_sort == DocSort::Alphabetical
	}

	pub fn sort_alphabetical(&mut self, alphabetical: bool) {
		self.doc_sort = if alphabetical {
			DocSort::Alphabetical
		} else {
			DocSort::Similarity
		};
		self.sort_docs();
	}

	/// Order documents by `topic` and move it to the front of every bar.
	///
	/// Replaces an alphabetical sort. The remaining topics follow the focal
	/// document's weights, not those of the new top document, so the bar
	/// order stays stable while browsing topics.
	pub fn select_topic(&mut self, topic: &str) {
		if self.is_empty() {
			return;
		}
		self.selected = Some(topic.to_string());
		self.doc_sort = DocSort::Topic(topic.to_string());
		self.sort_docs();
		let reference = self.reference_weights();
		let cmp = focal_first(topic, &reference);
		self.resegment(TopicOrder::Sorted(&cmp));
	}

	pub fn reset_topic_sort(&mut self) {
		self.selected = None;
		if self.doc_sort != DocSort::Alphabetical {
			self.doc_sort = DocSort::Similarity;
			self.sort_docs();
		}
		self.resegment_by_focal();
	}

	fn resegment_by_focal(&mut self) {
		let reference = self.reference_weights();
		let cmp = by_weight_desc(&reference);
		self.resegment(TopicOrder::Sorted(&cmp));
	}

	fn resegment(&mut self, order: TopicOrder<'_>) {
		segment_records(&mut self.docs, self.scaled, order);
		self.topic_order = self.docs.first().map(|d| order_of(&d.segments)).unwrap_or_default();
	}

	fn sort_docs(&mut self) {
		match &self.doc_sort {
			DocSort::Similarity => self.docs.sort_by(|a, b| b.prob.total_cmp(&a.prob)),
			DocSort::Alphabetical => self.docs.sort_by(|a, b| a.label.cmp(&b.label)),
			DocSort::Topic(topic) => {
				let topic = topic.clone();
				self.docs.sort_by(|a, b| b.weight(&topic).total_cmp(&a.weight(&topic)));
			}
		}
	}

	pub fn segment_at(&self, row: usize, fraction: f64) -> Option<&Segment> {
		self.docs.get(row)?.segments.iter().find(|s| s.contains(fraction))
	}

	pub fn color_of(&self, topic: &str) -> &str {
		self.topics.get(topic).map(|t| t.color.as_str()).unwrap_or("#999999")
	}
}

/// Pixel geometry of the shelf for a given canvas width.
#[derive(Clone, Copy, Debug)]
pub struct ShelfLayout {
	pub x: LinearScale,
	pub y: BandScale,
	pub width: f64,
	pub height: f64,
}

impl ShelfLayout {
	pub fn new(width: f64, rows: usize, bar_height: f64) -> Self {
		let height = MARGIN_TOP + rows as f64 * bar_height + 10.0;
		let right = (width - MARGIN_RIGHT).max(MARGIN_LEFT + 1.0);
		Self {
			x: LinearScale::new((0.0, 1.0), (MARGIN_LEFT, right)),
			y: BandScale::new(rows, (MARGIN_TOP, MARGIN_TOP + rows as f64 * bar_height)),
			width,
			height,
		}
	}

	/// Row and topic under a canvas point.
	pub fn hit<'s>(&self, state: &'s ShelfState, px: f64, py: f64) -> Option<(usize, &'s Segment)> {
		let row = self.y.index_at(py)?;
		let fraction = self.x.invert(px);
		state.segment_at(row, fraction).map(|s| (row, s))
	}
}
