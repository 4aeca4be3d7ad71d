//! Turns a typed request into a complete engine search spec. The per-kind
//! variance (collection, matched fields, default sort, bucket count) all
//! comes from the [`EntityKind`] table.

use cinelog_domain::EntityKind;
use cinelog_engine::{MultiSearchEntry, SearchParams};

#[derive(Debug, Clone)]
pub struct SearchSpec {
	pub kind: EntityKind,
	pub params: SearchParams,
}
impl SearchSpec {
	pub fn into_entry(self) -> MultiSearchEntry {
		MultiSearchEntry { collection: self.kind.collection().to_string(), params: self.params }
	}
}

pub fn plan(
	kind: EntityKind,
	query: &str,
	page: u32,
	per_page: u32,
	sort_field: Option<&str>,
	filter_by: Option<String>,
) -> SearchSpec {
	let sort_field = sort_field.unwrap_or_else(|| kind.default_sort_field());

	SearchSpec {
		kind,
		params: SearchParams {
			q: query.to_string(),
			query_by: kind.query_by().join(","),
			page,
			per_page,
			sort_by: sort_expression(kind, sort_field),
			filter_by,
		},
	}
}

/// Relevance first, business metric second. Multi-field kinds bucket
/// near-equal text-match scores so the secondary sort decides within a
/// bucket; single-field kinds sort on the raw score.
pub fn sort_expression(kind: EntityKind, sort_field: &str) -> String {
	match kind.text_match_buckets() {
		Some(buckets) => format!("_text_match(buckets: {buckets}):desc,{sort_field}:desc"),
		None => format!("_text_match:desc,{sort_field}:desc"),
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn multi_field_kinds_bucket_text_match() {
		assert_eq!(
			sort_expression(EntityKind::Movie, "popularity"),
			"_text_match(buckets: 10):desc,popularity:desc"
		);
	}

	#[test]
	fn single_field_kinds_sort_on_raw_score() {
		assert_eq!(
			sort_expression(EntityKind::User, "followers_count"),
			"_text_match:desc,followers_count:desc"
		);
		assert_eq!(
			sort_expression(EntityKind::Person, "popularity"),
			"_text_match:desc,popularity:desc"
		);
	}

	#[test]
	fn default_sort_field_applies_when_omitted() {
		let spec = plan(EntityKind::Playlist, "road trip", 1, 10, None, None);

		assert_eq!(spec.params.sort_by, "_text_match(buckets: 10):desc,created_at:desc");
		assert_eq!(spec.params.query_by, "title,description");
	}

	#[test]
	fn requested_sort_field_wins() {
		let spec = plan(EntityKind::Movie, "dune", 2, 20, Some("release_date"), None);

		assert_eq!(spec.params.sort_by, "_text_match(buckets: 10):desc,release_date:desc");
		assert_eq!(spec.params.page, 2);
		assert_eq!(spec.params.per_page, 20);
	}
}
