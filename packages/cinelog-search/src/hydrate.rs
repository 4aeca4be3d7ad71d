//! Order-preserving hydration helpers. The engine decides rank; the store
//! only supplies the full rows.

use std::{collections::HashMap, fmt::Debug, hash::Hash};

use serde_json::Value;
use tracing::{debug, warn};
use uuid::Uuid;

use cinelog_engine::EngineHit;

/// Re-orders freshly fetched rows to match engine rank. IDs without a row
/// are stale index entries (deleted or hidden after indexing) and are
/// dropped silently; the output may be shorter than `ordered_ids`.
pub fn order_by_ids<T, K, F>(ordered_ids: &[K], rows: Vec<T>, key: F) -> Vec<T>
where
	K: Eq + Hash + Debug,
	F: Fn(&T) -> K,
{
	let mut by_id: HashMap<K, T> = rows.into_iter().map(|row| (key(&row), row)).collect();
	let mut ordered = Vec::with_capacity(ordered_ids.len());

	for id in ordered_ids {
		match by_id.remove(id) {
			Some(row) => ordered.push(row),
			None => {
				debug!(?id, "Dropping stale engine hit with no primary-store row.");
			},
		}
	}

	ordered
}

/// Engine-rank-ordered numeric IDs from a hit page. Hits whose documents
/// lack a parseable ID cannot exist in the store and are skipped like stale
/// entries.
pub fn numeric_ids(hits: &[EngineHit]) -> Vec<i64> {
	hits.iter()
		.filter_map(|hit| match document_id(&hit.document).map(str::parse::<i64>) {
			Some(Ok(id)) => Some(id),
			_ => {
				warn!("Skipping engine hit with a missing or non-numeric document ID.");

				None
			},
		})
		.collect()
}

/// Engine-rank-ordered UUIDs from a hit page.
pub fn uuid_ids(hits: &[EngineHit]) -> Vec<Uuid> {
	hits.iter()
		.filter_map(|hit| match document_id(&hit.document).map(Uuid::parse_str) {
			Some(Ok(id)) => Some(id),
			_ => {
				warn!("Skipping engine hit with a missing or malformed document UUID.");

				None
			},
		})
		.collect()
}

pub fn document_id(document: &Value) -> Option<&str> {
	document.get("id").and_then(Value::as_str)
}
