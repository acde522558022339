//! View state carried in the page URL (`?doc=`, `?topic=`, `?q=`).

/// What the explorer page is centered on.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub enum ViewQuery {
	/// `?doc=<id>`: compare documents to a focal document.
	Document(String),
	/// `?topic=<n>`: top documents for a topic.
	Topic(usize),
	/// `?q=a|b`: documents matching query words.
	Words(Vec<String>),
	/// Nothing selected yet.
	#[default]
	Empty,
}

impl ViewQuery {
	/// Build from already-decoded query parameters. A focal document wins over
	/// a topic, which wins over words.
	pub fn from_params(doc: Option<&str>, topic: Option<&str>, q: Option<&str>) -> Self {
		if let Some(doc) = doc.map(str::trim).filter(|d| !d.is_empty()) {
			return Self::Document(doc.to_string());
		}
		if let Some(topic) = topic.and_then(|t| t.trim().parse().ok()) {
			return Self::Topic(topic);
		}
		let words = q.map(split_words).unwrap_or_default();
		if words.is_empty() {
			Self::Empty
		} else {
			Self::Words(words)
		}
	}

	/// The document the view compares against, if any.
	pub fn focal_doc(&self) -> Option<&str> {
		match self {
			Self::Document(id) => Some(id),
			_ => None,
		}
	}

	/// Query string (without `?`) that reproduces this view.
	pub fn to_query_string(&self) -> String {
		match self {
			Self::Document(id) => format!("doc={}", urlencoding::encode(id)),
			Self::Topic(t) => format!("topic={t}"),
			Self::Words(words) => format!("q={}", join_words(words)),
			Self::Empty => String::new(),
		}
	}
}

/// Split a `|`- or space-separated word query.
pub fn split_words(q: &str) -> Vec<String> {
	q.split(['|', ' '])
		.map(str::trim)
		.filter(|w| !w.is_empty())
		.map(str::to_string)
		.collect()
}

/// Percent-encode each word and join them with `|`.
pub fn join_words(words: &[String]) -> String {
	let encoded: Vec<_> = words.iter().map(|w| urlencoding::encode(w)).collect();
	encoded.join("|")
}
