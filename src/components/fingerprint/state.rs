use crate::data::{DocRecord, Topics};
use crate::layout::{LinearScale, TopicOrder, by_weight_desc, segment};
use crate::query::ViewQuery;

pub const LABEL_WIDTH: f64 = 90.0;
pub const ROW_GAP: f64 = 10.0;

#[derive(Clone, Debug, PartialEq)]
pub enum FingerprintStatus {
	LoadingDocuments,
	LoadingTopics,
	Complete,
	Failed(String),
}

impl FingerprintStatus {
	/// Progress bar width in percent and its caption.
	pub fn progress(&self) -> (u32, String) {
		match self {
			Self::LoadingDocuments => (25, "Loading documents...".into()),
			Self::LoadingTopics => (50, "Loading topics...".into()),
			Self::Complete => (100, "Complete!".into()),
			Self::Failed(msg) => (100, msg.clone()),
		}
	}
}

/// One model's bar for the fingerprinted document.
#[derive(Clone, Debug, PartialEq)]
pub struct FingerprintBar {
	pub k: usize,
	pub status: FingerprintStatus,
	pub doc: Option<DocRecord>,
	pub topics: Topics,
}

impl FingerprintBar {
	pub fn loading(k: usize) -> Self {
		Self {
			k,
			status: FingerprintStatus::LoadingDocuments,
			doc: None,
			topics: Topics::new(),
		}
	}

	/// Take the document out of a `docs_topics?n=1` response.
	pub fn with_docs(mut self, docs: Vec<DocRecord>, id: &str) -> Self {
		match docs.into_iter().next() {
			Some(doc) => {
				self.doc = Some(doc);
				self.status = FingerprintStatus::LoadingTopics;
			}
			None => self.status = invalid_document(id),
		}
		self
	}

	/// Attach the topic list and lay out the bar, largest topic first.
	pub fn with_topics(mut self, topics: Topics) -> Self {
		self.topics = topics;
		if let Some(doc) = self.doc.as_mut() {
			let cmp = by_weight_desc(&doc.topics);
			doc.segments = segment(&doc.topics, doc.prob, TopicOrder::Sorted(&cmp));
		}
		self.status = FingerprintStatus::Complete;
		self
	}

	pub fn with_status(mut self, status: FingerprintStatus) -> Self {
		self.status = status;
		self
	}

	pub fn is_complete(&self) -> bool {
		self.status == FingerprintStatus::Complete
	}

	/// Top words of the topic at `fraction` along the bar.
	pub fn tooltip_at(&self, fraction: f64) -> Option<String> {
		let seg = self.doc.as_ref()?.segments.iter().find(|s| s.contains(fraction))?;
		let topic = self.topics.get(&seg.name)?;
		Some(format!("Topic {}: {}", seg.name, topic.summary()))
	}

	/// Full explorer view of the document for this model.
	pub fn explorer_url(&self, host: &str) -> Option<String> {
		let doc = self.doc.as_ref()?;
		Some(format!(
			"{host}/{}/?{}",
			self.k,
			ViewQuery::Document(doc.id.clone()).to_query_string()
		))
	}
}

pub fn invalid_document(id: &str) -> FingerprintStatus {
	FingerprintStatus::Failed(format!("Invalid document: {id}."))
}

pub fn topic_list_failed() -> FingerprintStatus {
	FingerprintStatus::Failed("Could not load topic list.".into())
}

/// Rows of completed bars on the canvas.
#[derive(Clone, Copy, Debug)]
pub struct FingerprintLayout {
	pub x: LinearScale,
	pub bar_height: f64,
	pub width: f64,
}

impl FingerprintLayout {
	pub fn new(width: f64, bar_height: f64) -> Self {
		Self {
			x: LinearScale::new((0.0, 1.0), (LABEL_WIDTH, width.max(LABEL_WIDTH + 1.0))),
			bar_height,
			width,
		}
	}

	pub fn row_top(&self, row: usize) -> f64 {
		row as f64 * (self.bar_height + ROW_GAP)
	}

	pub fn height(&self, rows: usize) -> f64 {
		self.row_top(rows)
	}

	/// Row and bar fraction under a canvas point.
	pub fn hit(&self, px: f64, py: f64) -> Option<(usize, f64)> {
		if px < LABEL_WIDTH || py < 0.0 {
			return None;
		}
		let step = self.bar_height + ROW_GAP;
		let row = (py / step) as usize;
		if py - row as f64 * step > self.bar_height {
			return None;
		}
		Some((row, self.x.invert(px)))
	}
}

#[cfg(test)]
mod tests {
	use super::*;
	use crate::data::TopicInfo;
	use indexmap::IndexMap;

	fn doc() -> DocRecord {
		DocRecord {
			id: "plato/rep.txt".into(),
			label: "Republic".into(),
			metadata: IndexMap::new(),
			prob: 0.9,
			topics: [("0", 0.2), ("1", 0.7), ("2", 0.1)]
				.into_iter()
				.map(|(k, w)| (k.to_string(), w))
				.collect(),
			segments: Vec::new(),
		}
	}

	fn topics() -> Topics {
		(0..3)
			.map(|i| {
				(
					i.to_string(),
					TopicInfo {
						color: "#123456".into(),
						words: [(format!("w{i}"), 0.5), (format!("v{i}"), 0.1)].into_iter().collect(),
					},
				)
			})
			.collect()
	}

	#[test]
	fn loads_in_stages() {
		let bar = FingerprintBar::loading(20);
		assert_eq!(bar.status.progress().0, 25);
		let bar = bar.with_docs(vec![doc()], "plato/rep.txt");
		assert_eq!(bar.status, FingerprintStatus::LoadingTopics);
		assert_eq!(bar.status.progress().0, 50);
		let bar = bar.with_topics(topics());
		assert!(bar.is_complete());
		assert_eq!(bar.status.progress(), (100, "Complete!".to_string()));
		let segs = &bar.doc.as_ref().unwrap().segments;
		assert_eq!(segs[0].name, "1");
		assert!((segs.last().unwrap().end - 0.9).abs() < 1e-9);
	}

	#[test]
	fn missing_document_fails() {
		let bar = FingerprintBar::loading(20).with_docs(Vec::new(), "nope");
		assert_eq!(bar.status.progress().1, "Invalid document: nope.");
		assert_eq!(
			FingerprintBar::loading(40).with_status(topic_list_failed()).status,
			FingerprintStatus::Failed("Could not load topic list.".into())
		);
	}

	#[test]
	fn tooltips_and_links() {
		let bar = FingerprintBar::loading(20).with_docs(vec![doc()], "plato/rep.txt").with_topics(topics());
		assert_eq!(bar.tooltip_at(0.1).as_deref(), Some("Topic 1: w1, v1, ..."));
		assert_eq!(bar.tooltip_at(0.95), None);
		assert_eq!(
			bar.explorer_url("").as_deref(),
			Some("/20/?doc=plato%2Frep.txt")
		);
	}

	#[test]
	fn hit_rows() {
		let layout = FingerprintLayout::new(490.0, 20.0);
		assert_eq!(layout.hit(10.0, 5.0), None);
		let (row, fraction) = layout.hit(290.0, 35.0).unwrap();
		assert_eq!(row, 1);
		assert!((fraction - 0.5).abs() < 1e-9);
		assert_eq!(layout.hit(290.0, 25.0), None);
		assert_eq!(layout.height(2), 60.0);
	}
}
