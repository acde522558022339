//! Explorer settings. The host page may override any of them with a JSON
//! object; missing keys keep their defaults.

use serde::{Deserialize, Serialize};

/// Settings shared with every component through context.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ExplorerConfig {
	/// Prefix for every API request, e.g. `""` or `"https://host:8000"`.
	pub host: String,
	/// Model sizes served by the backend.
	pub ks: Vec<usize>,
	/// Model size used by the hypershelf.
	pub k: usize,
	/// Documents fetched per hypershelf query.
	pub docs_per_query: i32,
	/// Cluster plot circle radius.
	pub node_radius: f64,
	/// Gap kept between cluster plot nodes of different clusters.
	pub collide_padding: f64,
	/// Hypershelf row height.
	pub bar_height: f64,
	/// Fingerprint row height.
	pub fingerprint_height: f64,
	/// Most suggestions shown under the search box.
	pub suggestion_limit: usize,
	/// Quiet period before a search request.
	pub search_debounce_ms: u32,
}

impl Default for ExplorerConfig {
	fn default() -> Self {
		Self {
			host: String::new(),
			ks: vec![20, 40, 60, 80],
			k: 20,
			docs_per_query: 40,
			node_radius: 5.0,
			collide_padding: 1.5,
			bar_height: 30.0,
			fingerprint_height: 20.0,
			suggestion_limit: 12,
			search_debounce_ms: 300,
		}
	}
}

impl ExplorerConfig {
	/// Defaults overridden by the keys present in `json`.
	pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
		serde_json::from_str(json)
	}
}
