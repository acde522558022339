//! Typeahead suggestion ranking for the document search box.

/// Sort `labels` alphabetically, put those starting with `query` first and
/// keep at most `limit`.
pub fn rank_suggestions<S: AsRef<str>>(query: &str, labels: &[S], limit: usize) -> Vec<String> {
	let mut sorted: Vec<&str> = Vec::with_capacity(labels.len());
	for label in labels {
		sorted.push(label.as_ref());
	}
	sorted.sort_unstable();
	sorted.dedup();
	let (start, elsewhere): (Vec<&str>, Vec<&str>) = sorted.into_iter().partition(|l| l.starts_with(query));
	start
		.into_iter()
		.chain(elsewhere)
		.take(limit)
		.map(str::to_string)
		.collect()
}
