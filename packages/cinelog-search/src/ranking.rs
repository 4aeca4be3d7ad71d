//! Cross-type best-result ranking. Text relevance and popularity are
//! incomparable across collections, so both are normalized against the
//! candidate pool's maxima before blending.

use serde_json::Value;

use cinelog_domain::EntityKind;

const TEXT_WEIGHT: f64 = 0.9;
const METRIC_WEIGHT: f64 = 0.1;

/// The rank-0 hit of one entity type, reduced to its ranking signals.
#[derive(Debug, Clone)]
pub struct BestCandidate {
	pub kind: EntityKind,
	pub id: String,
	pub text_match: f64,
	pub metric: f64,
}

#[derive(Debug, Clone, serde::Serialize)]
pub struct RankedBest {
	pub kind: EntityKind,
	pub id: String,
	pub score: f64,
}

/// Reads the candidate's popularity signal from its engine document. The
/// field is a fixed per-kind lookup, not a runtime probe across documents.
pub fn metric_of(kind: EntityKind, document: &Value) -> f64 {
	document.get(kind.metric_field()).and_then(Value::as_f64).unwrap_or(0.0)
}

/// Picks the global winner. Candidates must be supplied in
/// [`EntityKind::ALL`] order: the update rule is strictly-greater, so exact
/// score ties resolve to the earlier kind. Both maxima are floored at 1 to
/// keep an all-zero pool at score 0 instead of NaN.
pub fn rank_best(candidates: &[BestCandidate]) -> Option<RankedBest> {
	let max_text = candidates.iter().map(|c| c.text_match).fold(1.0_f64, f64::max);
	let max_metric = candidates.iter().map(|c| c.metric).fold(1.0_f64, f64::max);
	let mut best: Option<RankedBest> = None;

	for candidate in candidates {
		let normalized_text = candidate.text_match / max_text;
		let normalized_metric = candidate.metric / max_metric;
		let score = TEXT_WEIGHT * normalized_text + METRIC_WEIGHT * normalized_metric;

		if best.as_ref().map(|current| score > current.score).unwrap_or(true) {
			best = Some(RankedBest { kind: candidate.kind, id: candidate.id.clone(), score });
		}
	}

	best
}

#[cfg(test)]
mod tests {
	use super::*;

	fn candidate(kind: EntityKind, id: &str, text_match: f64, metric: f64) -> BestCandidate {
		BestCandidate { kind, id: id.to_string(), text_match, metric }
	}

	#[test]
	fn no_candidates_no_winner() {
		assert!(rank_best(&[]).is_none());
	}

	#[test]
	fn normalizes_against_pool_maxima() {
		// Same relevance, movie far more popular: movie lands at exactly
		// 0.9 + 0.1, person at 0.9 + 0.1 * (10/50).
		let candidates = [
			candidate(EntityKind::Movie, "603", 8.0, 50.0),
			candidate(EntityKind::Person, "6384", 8.0, 10.0),
		];
		let best = rank_best(&candidates).expect("winner expected");

		assert_eq!(best.kind, EntityKind::Movie);
		assert_eq!(best.id, "603");
		assert!((best.score - 1.0).abs() < 1e-9);
	}

	#[test]
	fn scores_stay_within_unit_interval() {
		let candidates = [
			candidate(EntityKind::Movie, "1", 3.5, 120.0),
			candidate(EntityKind::TvSeries, "2", 7.0, 0.5),
			candidate(EntityKind::User, "3", 0.1, 9000.0),
		];

		for slice_end in 1..=candidates.len() {
			let best = rank_best(&candidates[..slice_end]).expect("winner expected");

			assert!(best.score >= 0.0);
			assert!(best.score <= 1.0);
		}
	}

	#[test]
	fn all_zero_signals_score_zero_without_nan() {
		let candidates = [
			candidate(EntityKind::Movie, "1", 0.0, 0.0),
			candidate(EntityKind::Playlist, "2", 0.0, 0.0),
		];
		let best = rank_best(&candidates).expect("winner expected");

		assert_eq!(best.score, 0.0);
		// First candidate in iteration order wins the tie.
		assert_eq!(best.kind, EntityKind::Movie);
	}

	#[test]
	fn exact_ties_resolve_to_the_earlier_kind() {
		let candidates = [
			candidate(EntityKind::Movie, "10", 4.0, 30.0),
			candidate(EntityKind::Person, "20", 4.0, 30.0),
		];
		let best = rank_best(&candidates).expect("winner expected");

		assert_eq!(best.kind, EntityKind::Movie);
	}

	#[test]
	fn metric_reads_the_kind_specific_field() {
		let document = serde_json::json!({
			"popularity": 12.5,
			"followers_count": 400,
			"likes_count": 77
		});

		assert_eq!(metric_of(EntityKind::Movie, &document), 12.5);
		assert_eq!(metric_of(EntityKind::User, &document), 400.0);
		assert_eq!(metric_of(EntityKind::Playlist, &document), 77.0);
		assert_eq!(metric_of(EntityKind::Movie, &serde_json::json!({})), 0.0);
	}
}
