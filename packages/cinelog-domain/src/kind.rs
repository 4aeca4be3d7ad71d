/// The five searchable entity types, in ranking iteration order.
///
/// The order of [`EntityKind::ALL`] is a contract: the best-result ranker
/// walks it front to back and keeps the first candidate on exact score ties,
/// so movies win ties against every other kind.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EntityKind {
	Movie,
	TvSeries,
	Person,
	User,
	Playlist,
}
impl EntityKind {
	pub const ALL: [Self; 5] = [Self::Movie, Self::TvSeries, Self::Person, Self::User, Self::Playlist];

	pub fn as_str(self) -> &'static str {
		match self {
			Self::Movie => "movie",
			Self::TvSeries => "tv_series",
			Self::Person => "person",
			Self::User => "user",
			Self::Playlist => "playlist",
		}
	}

	/// Search-engine collection holding this kind's documents.
	pub fn collection(self) -> &'static str {
		match self {
			Self::Movie => "movies",
			Self::TvSeries => "tv_series",
			Self::Person => "persons",
			Self::User => "users",
			Self::Playlist => "playlists",
		}
	}

	/// Engine fields matched against the free-text query. Static per kind,
	/// never caller-controlled.
	pub fn query_by(self) -> &'static [&'static str] {
		match self {
			Self::Movie => &["title", "original_title"],
			Self::TvSeries => &["name", "original_name"],
			Self::Person => &["name"],
			Self::User => &["username", "full_name"],
			Self::Playlist => &["title", "description"],
		}
	}

	/// Secondary sort field applied when the caller does not request one.
	pub fn default_sort_field(self) -> &'static str {
		match self {
			Self::Movie | Self::TvSeries | Self::Person => "popularity",
			Self::User => "followers_count",
			Self::Playlist => "created_at",
		}
	}

	/// Text-match bucket count for the sort expression. Multi-field kinds
	/// bucket near-equal relevance scores so the secondary sort can break
	/// ties; single-field kinds sort on the raw score.
	pub fn text_match_buckets(self) -> Option<u32> {
		match self {
			Self::Movie | Self::TvSeries | Self::Playlist => Some(10),
			Self::Person | Self::User => None,
		}
	}

	/// Engine document field holding this kind's popularity signal, read by
	/// the best-result ranker.
	pub fn metric_field(self) -> &'static str {
		match self {
			Self::Movie | Self::TvSeries | Self::Person => "popularity",
			Self::User => "followers_count",
			Self::Playlist => "likes_count",
		}
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn iteration_order_is_movie_first() {
		assert_eq!(EntityKind::ALL[0], EntityKind::Movie);
		assert_eq!(EntityKind::ALL[4], EntityKind::Playlist);
	}

	#[test]
	fn metric_fields_cover_every_kind() {
		assert_eq!(EntityKind::Movie.metric_field(), "popularity");
		assert_eq!(EntityKind::User.metric_field(), "followers_count");
		assert_eq!(EntityKind::Playlist.metric_field(), "likes_count");
	}

	#[test]
	fn serializes_snake_case() {
		let json = serde_json::to_string(&EntityKind::TvSeries).expect("serialize failed");

		assert_eq!(json, "\"tv_series\"");
	}

	#[test]
	fn single_field_kinds_skip_buckets() {
		assert_eq!(EntityKind::Person.text_match_buckets(), None);
		assert_eq!(EntityKind::User.text_match_buckets(), None);
		assert_eq!(EntityKind::Movie.text_match_buckets(), Some(10));
	}
}
