//! Payloads returned by the explorer backend.

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::layout::{Segment, TopicId, TopicOrder, TopicWeights, segment};

/// Why `cluster.csv` could not be read. Line numbers are 1-based.
#[derive(Debug, Error, PartialEq)]
pub enum DataError {
	/// No non-blank lines.
	#[error("cluster.csv is empty")]
	EmptyCsv,
	/// First line is not `k,topic,orig_x,orig_y,cluster`.
	#[error("unexpected cluster.csv header: {0:?}")]
	BadHeader(String),
	/// Row with the wrong number of fields.
	#[error("line {line}: expected 5 fields, found {found}")]
	FieldCount {
		/// Offending line.
		line: usize,
		/// Fields actually present.
		found: usize,
	},
	/// Field that does not parse as its column's type.
	#[error("line {line}: invalid {field} value {value:?}")]
	BadValue {
		/// Offending line.
		line: usize,
		/// Column name.
		field: &'static str,
		/// Raw text of the field.
		value: String,
	},
}

/// Entry of `docs.json`.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct DocSummary {
	/// Corpus id, as used in `?doc=`.
	pub id: String,
	/// Display title.
	pub label: String,
	/// Free-form fields from the corpus metadata.
	#[serde(default)]
	pub metadata: IndexMap<String, String>,
}

/// Entry of `docs_topics/{id}.json` and `word_docs.json`: a document with its
/// similarity to the query and its topic distribution.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct DocRecord {
	/// Corpus id.
	pub id: String,
	/// Display title.
	pub label: String,
	/// Free-form fields from the corpus metadata.
	#[serde(default)]
	pub metadata: IndexMap<String, String>,
	/// Similarity to the focal document or query, in `[0, 1]`.
	pub prob: f64,
	/// Topic distribution, summing to 1.
	pub topics: TopicWeights,
	/// Layout of the bar, filled in by [`segment_records`].
	#[serde(skip)]
	pub segments: Vec<Segment>,
}

impl DocRecord {
	/// Weight of `topic`, zero when absent.
	pub fn weight(&self, topic: &str) -> f64 {
		self.topics.get(topic).copied().unwrap_or(0.0)
	}
}

/// Entry of `{k}/topics.json`.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct TopicInfo {
	/// CSS color of the topic's segments.
	pub color: String,
	/// Word probabilities within the topic.
	pub words: IndexMap<String, f64>,
}

impl TopicInfo {
	/// Words by descending probability, ties alphabetical.
	pub fn top_words(&self) -> Vec<&str> {
		let mut words: Vec<(&str, f64)> = self.words.iter().map(|(w, &p)| (w.as_str(), p)).collect();
		words.sort_by(|a, b| b.1.total_cmp(&a.1).then_with(|| a.0.cmp(b.0)));
		words.into_iter().map(|(w, _)| w).collect()
	}

	/// Tooltip text: the top words followed by an ellipsis.
	pub fn summary(&self) -> String {
		format!("{}, ...", self.top_words().join(", "))
	}
}

/// Topic list of one model, keyed by topic id.
pub type Topics = IndexMap<TopicId, TopicInfo>;

/// Entry of `topics.json?q=`: a topic of model `k` close to the query words.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct TopicHit {
	/// Number of topics in the model.
	pub k: usize,
	/// Topic id within that model.
	pub t: usize,
	/// Distance to the query; smaller is closer.
	pub distance: f64,
}

/// Row of `cluster.csv`.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct ClusterRow {
	/// Model size.
	pub k: usize,
	/// Topic id within the model.
	pub topic: usize,
	/// Projected x coordinate.
	pub orig_x: f64,
	/// Projected y coordinate.
	pub orig_y: f64,
	/// Cluster index, used for the color.
	pub cluster: usize,
}

const CLUSTER_HEADER: [&str; 5] = ["k", "topic", "orig_x", "orig_y", "cluster"];

/// Parse `cluster.csv` (`k,topic,orig_x,orig_y,cluster`).
pub fn parse_cluster_csv(text: &str) -> Result<Vec<ClusterRow>, DataError> {
	let mut lines = text.lines().enumerate().filter(|(_, l)| !l.trim().is_empty());
	let (_, header) = lines.next().ok_or(DataError::EmptyCsv)?;
	let names: Vec<&str> = header.split(',').map(str::trim).collect();
	if names != CLUSTER_HEADER {
		return Err(DataError::BadHeader(header.to_string()));
	}

	lines
		.map(|(i, line)| {
			let line_no = i + 1;
			let fields: Vec<&str> = line.split(',').map(str::trim).collect();
			if fields.len() != CLUSTER_HEADER.len() {
				return Err(DataError::FieldCount {
					line: line_no,
					found: fields.len(),
				});
			}
			Ok(ClusterRow {
				k: field(line_no, "k", fields[0])?,
				topic: field(line_no, "topic", fields[1])?,
				orig_x: field(line_no, "orig_x", fields[2])?,
				orig_y: field(line_no, "orig_y", fields[3])?,
				cluster: field(line_no, "cluster", fields[4])?,
			})
		})
		.collect()
}

fn field<T: std::str::FromStr>(line: usize, name: &'static str, value: &str) -> Result<T, DataError> {
	value.parse().map_err(|_| DataError::BadValue {
		line,
		field: name,
		value: value.to_string(),
	})
}

/// Segment every record. With `scaled`, bars are scaled by the document's
/// `prob` so lengths compare across documents; otherwise they sum to 1.
pub fn segment_records(records: &mut [DocRecord], scaled: bool, order: TopicOrder<'_>) {
	for doc in records {
		let scale = if scaled { doc.prob } else { 1.0 };
		doc.segments = segment(&doc.topics, scale, order);
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	const DOCS_TOPICS: &str = r#"[
		{"id": "a.txt", "label": "A", "metadata": {"year": "1901"}, "prob": 1.0,
		 "topics": {"0": 0.2, "1": 0.5, "2": 0.3}},
		{"id": "b.txt", "label": "B", "prob": 0.5,
		 "topics": {"0": 0.6, "1": 0.2, "2": 0.2}}
	]"#;

	#[test]
	fn decodes_doc_records() {
		let docs: Vec<DocRecord> = serde_json::from_str(DOCS_TOPICS).unwrap();
		assert_eq!(docs.len(), 2);
		assert_eq!(docs[0].metadata["year"], "1901");
		assert!(docs[1].metadata.is_empty());
		assert_eq!(docs[0].topics.keys().collect::<Vec<_>>(), ["0", "1", "2"]);
		assert_eq!(docs[1].weight("0"), 0.6);
		assert_eq!(docs[1].weight("9"), 0.0);
	}

	#[test]
	fn segments_scale_by_prob() {
		let mut docs: Vec<DocRecord> = serde_json::from_str(DOCS_TOPICS).unwrap();
		segment_records(&mut docs, true, TopicOrder::Natural);
		assert!((docs[0].segments.last().unwrap().end - 1.0).abs() < 1e-9);
		assert!((docs[1].segments.last().unwrap().end - 0.5).abs() < 1e-9);

		segment_records(&mut docs, false, TopicOrder::Natural);
		assert!((docs[1].segments.last().unwrap().end - 1.0).abs() < 1e-9);
	}

	#[test]
	fn segmenting_nothing_is_fine() {
		segment_records(&mut [], true, TopicOrder::Natural);
	}

	#[test]
	fn topic_words_rank_by_probability() {
		let topics: Topics = serde_json::from_str(
			r##"{"0": {"color": "#1f77b4", "words": {"mind": 0.1, "body": 0.3, "soul": 0.1}}}"##,
		)
		.unwrap();
		assert_eq!(topics["0"].top_words(), ["body", "mind", "soul"]);
		assert_eq!(topics["0"].summary(), "body, mind, soul, ...");
	}

	#[test]
	fn decodes_topic_hits() {
		let hits: Vec<TopicHit> = serde_json::from_str(r#"[{"k": 20, "t": 4, "distance": 0.12}]"#).unwrap();
		assert_eq!(hits[0], TopicHit { k: 20, t: 4, distance: 0.12 });
	}

	#[test]
	fn parses_cluster_csv() {
		let rows = parse_cluster_csv("k,topic,orig_x,orig_y,cluster\n20,0,0.5,-1.25,3\n\n20,1,1e-2,2,0\n").unwrap();
		assert_eq!(rows.len(), 2);
		assert_eq!(rows[0].cluster, 3);
		assert_eq!(rows[0].orig_y, -1.25);
		assert_eq!(rows[1].orig_x, 0.01);
	}

	#[test]
	fn cluster_csv_errors_name_the_line() {
		assert_eq!(parse_cluster_csv(""), Err(DataError::EmptyCsv));
		assert!(matches!(parse_cluster_csv("x,y\n"), Err(DataError::BadHeader(_))));
		assert_eq!(
			parse_cluster_csv("k,topic,orig_x,orig_y,cluster\n20,0,0.5\n"),
			Err(DataError::FieldCount { line: 2, found: 3 })
		);
		assert_eq!(
			parse_cluster_csv("k,topic,orig_x,orig_y,cluster\n20,0,oops,1,1\n"),
			Err(DataError::BadValue {
				line: 2,
				field: "orig_x",
				value: "oops".into()
			})
		);
	}
}
