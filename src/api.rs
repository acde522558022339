//! HTTP client for the explorer backend.
//!
//! URL construction and status handling are plain functions; the fetchers use
//! gloo-net and run on the browser's event loop.

use std::cell::Cell;
use std::rc::Rc;

use gloo_net::http::{Request, Response};
use log::{debug, warn};
use serde::de::DeserializeOwned;
use thiserror::Error;

use crate::data::{ClusterRow, DocRecord, DocSummary, TopicHit, Topics, parse_cluster_csv};
use crate::query::join_words;

/// Failure of a backend request.
#[derive(Clone, Debug, Error, PartialEq)]
pub enum ApiError {
	/// The request never got a response.
	#[error("network error: {0}")]
	Network(String),
	/// Non-2xx status outside of a word query.
	#[error("HTTP {status}: {text}")]
	Status {
		/// HTTP status code.
		status: u16,
		/// Status text.
		text: String,
	},
	/// 404 on a word query.
	#[error("Terms not in corpus: \"{0}\". Try another query...")]
	TermNotInCorpus(String),
	/// 410 on a word query.
	#[error("Terms removed by stoplisting: \"{0}\". Try another query...")]
	TermStoplisted(String),
	/// Body did not parse.
	#[error("could not decode response: {0}")]
	Decode(String),
}

impl ApiError {
	/// Whether the error is about the user's query rather than the server.
	pub fn is_query_warning(&self) -> bool {
		matches!(self, Self::TermNotInCorpus(_) | Self::TermStoplisted(_))
	}
}

/// Map an HTTP status to an error. `words` is the query of a word search, for
/// which 404 and 410 mean unknown and stoplisted terms.
pub fn check_status(status: u16, text: &str, words: Option<&[String]>) -> Result<(), ApiError> {
	if (200..300).contains(&status) {
		return Ok(());
	}
	match (status, words) {
		(404, Some(words)) => Err(ApiError::TermNotInCorpus(words.join(" "))),
		(410, Some(words)) => Err(ApiError::TermStoplisted(words.join(" "))),
		_ => Err(ApiError::Status {
			status,
			text: text.to_string(),
		}),
	}
}

/// Builds endpoint URLs relative to `host`.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct ApiClient {
	/// Base URL without a trailing slash; empty for same-origin.
	pub host: String,
}

impl ApiClient {
	/// Client for `host`. A trailing `/` is dropped.
	pub fn new(host: impl Into<String>) -> Self {
		Self {
			host: host.into().trim_end_matches('/').to_string(),
		}
	}

	/// `docs.json?q=`: label search.
	pub fn docs_url(&self, query: &str) -> String {
		format!("{}/docs.json?q={}", self.host, urlencoding::encode(query))
	}

	/// `docs.json?random=1`.
	pub fn random_doc_url(&self) -> String {
		format!("{}/docs.json?random=1", self.host)
	}

	/// Documents most similar to `id`, with their topics.
	pub fn doc_topics_url(&self, k: usize, id: &str, n: i32) -> String {
		format!("{}/{k}/docs_topics/{}.json?n={n}", self.host, urlencoding::encode(id))
	}

	/// Top documents for `topic`.
	pub fn topic_docs_url(&self, k: usize, topic: usize, n: i32) -> String {
		format!("{}/{k}/topics/{topic}.json?n={n}", self.host)
	}

	/// Topic list of model `k`.
	pub fn topics_url(&self, k: usize) -> String {
		format!("{}/{k}/topics.json", self.host)
	}

	/// Topics across all models closest to `words`.
	pub fn word_topics_url(&self, words: &[String]) -> String {
		format!("{}/topics.json?q={}", self.host, join_words(words))
	}

	/// Documents matching `words`.
	pub fn word_docs_url(&self, k: usize, words: &[String], n: i32) -> String {
		format!("{}/{k}/word_docs.json?q={}&n={n}", self.host, join_words(words))
	}

	/// Projected topic coordinates.
	pub fn cluster_url(&self) -> String {
		format!("{}/cluster.csv", self.host)
	}

	/// Documents whose label matches `query`.
	pub async fn docs(&self, query: &str) -> Result<Vec<DocSummary>, ApiError> {
		get_json(&self.docs_url(query), None).await
	}

	/// A random document, `None` for an empty corpus.
	pub async fn random_doc(&self) -> Result<Option<DocSummary>, ApiError> {
		let docs: Vec<DocSummary> = get_json(&self.random_doc_url(), None).await?;
		Ok(docs.into_iter().next())
	}

	/// See [`ApiClient::doc_topics_url`].
	pub async fn doc_topics(&self, k: usize, id: &str, n: i32) -> Result<Vec<DocRecord>, ApiError> {
		get_json(&self.doc_topics_url(k, id, n), None).await
	}

	/// See [`ApiClient::topic_docs_url`].
	pub async fn topic_docs(&self, k: usize, topic: usize, n: i32) -> Result<Vec<DocRecord>, ApiError> {
		get_json(&self.topic_docs_url(k, topic, n), None).await
	}

	/// See [`ApiClient::topics_url`].
	pub async fn topics(&self, k: usize) -> Result<Topics, ApiError> {
		get_json(&self.topics_url(k), None).await
	}

	/// 404 and 410 map to the term errors.
	pub async fn word_topics(&self, words: &[String]) -> Result<Vec<TopicHit>, ApiError> {
		get_json(&self.word_topics_url(words), Some(words)).await
	}

	/// 404 and 410 map to the term errors.
	pub async fn word_docs(&self, k: usize, words: &[String], n: i32) -> Result<Vec<DocRecord>, ApiError> {
		get_json(&self.word_docs_url(k, words, n), Some(words)).await
	}

	/// Fetch and parse `cluster.csv`.
	pub async fn cluster(&self) -> Result<Vec<ClusterRow>, ApiError> {
		let text = get_text(&self.cluster_url(), None).await?;
		parse_cluster_csv(&text).map_err(|e| ApiError::Decode(e.to_string()))
	}
}

async fn send(url: &str, words: Option<&[String]>) -> Result<Response, ApiError> {
	debug!("GET {url}");
	let resp = Request::get(url).send().await.map_err(|e| {
		warn!("GET {url} failed: {e}");
		ApiError::Network(e.to_string())
	})?;
	check_status(resp.status(), &resp.status_text(), words).inspect_err(|e| warn!("GET {url}: {e}"))?;
	Ok(resp)
}

async fn get_json<T: DeserializeOwned>(url: &str, words: Option<&[String]>) -> Result<T, ApiError> {
	send(url, words)
		.await?
		.json()
		.await
		.map_err(|e| ApiError::Decode(e.to_string()))
}

async fn get_text(url: &str, words: Option<&[String]>) -> Result<String, ApiError> {
	send(url, words)
		.await?
		.text()
		.await
		.map_err(|e| ApiError::Decode(e.to_string()))
}

/// Tracks the latest request of a view so late responses to superseded
/// requests can be dropped.
#[derive(Clone, Debug, Default)]
pub struct Generation(Rc<Cell<u64>>);

/// Handle for one request, see [`Generation::begin`].
#[derive(Clone, Debug)]
pub struct Ticket {
	id: u64,
	current: Rc<Cell<u64>>,
}

impl Generation {
	/// Start a request, superseding every earlier ticket.
	pub fn begin(&self) -> Ticket {
		let id = self.0.get() + 1;
		self.0.set(id);
		Ticket {
			id,
			current: self.0.clone(),
		}
	}
}

impl Ticket {
	/// False once a newer ticket was issued.
	pub fn is_current(&self) -> bool {
		self.current.get() == self.id
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	fn words(ws: &[&str]) -> Vec<String> {
		ws.iter().map(|w| w.to_string()).collect()
	}

	#[test]
	fn urls() {
		let api = ApiClient::new("http://localhost:8000/");
		assert_eq!(api.docs_url("the rep"), "http://localhost:8000/docs.json?q=the%20rep");
		assert_eq!(
			api.doc_topics_url(20, "plato/rep.txt", 1),
			"http://localhost:8000/20/docs_topics/plato%2Frep.txt.json?n=1"
		);
		assert_eq!(api.topics_url(40), "http://localhost:8000/40/topics.json");
		assert_eq!(api.topic_docs_url(20, 3, 40), "http://localhost:8000/20/topics/3.json?n=40");
		assert_eq!(
			api.word_topics_url(&words(&["mind", "body"])),
			"http://localhost:8000/topics.json?q=mind|body"
		);
		assert_eq!(
			api.word_docs_url(20, &words(&["mind"]), 40),
			"http://localhost:8000/20/word_docs.json?q=mind&n=40"
		);
		assert_eq!(ApiClient::default().cluster_url(), "/cluster.csv");
		assert_eq!(ApiClient::new("").random_doc_url(), "/docs.json?random=1");
	}

	#[test]
	fn word_query_statuses() {
		let q = words(&["zzz"]);
		assert_eq!(check_status(200, "OK", Some(&q)), Ok(()));
		let missing = check_status(404, "Not Found", Some(&q)).unwrap_err();
		assert_eq!(missing, ApiError::TermNotInCorpus("zzz".into()));
		assert!(missing.is_query_warning());
		assert_eq!(
			check_status(410, "Gone", Some(&q)),
			Err(ApiError::TermStoplisted("zzz".into()))
		);
		assert_eq!(
			missing.to_string(),
			"Terms not in corpus: \"zzz\". Try another query..."
		);
	}

	#[test]
	fn plain_statuses() {
		let err = check_status(404, "Not Found", None).unwrap_err();
		assert_eq!(
			err,
			ApiError::Status {
				status: 404,
				text: "Not Found".into()
			}
		);
		assert!(!err.is_query_warning());
		assert!(check_status(500, "", Some(&[])).is_err());
	}

	#[test]
	fn later_requests_supersede() {
		let generation = Generation::default();
		let first = generation.begin();
		assert!(first.is_current());
		let second = generation.begin();
		assert!(!first.is_current());
		assert!(second.is_current());
	}
}
