use time::{Date, OffsetDateTime};
use uuid::Uuid;

#[derive(Debug, Clone, serde::Serialize, sqlx::FromRow)]
pub struct Movie {
	pub id: i64,
	pub title: String,
	pub original_title: Option<String>,
	pub overview: Option<String>,
	pub poster_path: Option<String>,
	#[serde(with = "crate::time_serde::date_option")]
	pub release_date: Option<Date>,
	pub runtime: Option<i32>,
	pub genre_ids: Vec<i32>,
	pub popularity: f64,
	pub vote_average: f64,
}

#[derive(Debug, Clone, serde::Serialize, sqlx::FromRow)]
pub struct TvSeries {
	pub id: i64,
	pub name: String,
	pub original_name: Option<String>,
	pub overview: Option<String>,
	pub poster_path: Option<String>,
	#[serde(with = "crate::time_serde::date_option")]
	pub first_air_date: Option<Date>,
	pub number_of_seasons: Option<i32>,
	pub genre_ids: Vec<i32>,
	pub popularity: f64,
	pub vote_average: f64,
}

#[derive(Debug, Clone, serde::Serialize, sqlx::FromRow)]
pub struct Person {
	pub id: i64,
	pub name: String,
	pub profile_path: Option<String>,
	pub known_for_department: Option<String>,
	pub popularity: f64,
}

#[derive(Debug, Clone, serde::Serialize, sqlx::FromRow)]
pub struct Profile {
	pub id: Uuid,
	pub username: String,
	pub full_name: Option<String>,
	pub avatar_url: Option<String>,
	pub followers_count: i32,
	#[serde(with = "crate::time_serde")]
	pub created_at: OffsetDateTime,
}

#[derive(Debug, Clone, serde::Serialize, sqlx::FromRow)]
pub struct Playlist {
	pub id: Uuid,
	pub owner_id: Uuid,
	pub title: String,
	pub description: Option<String>,
	pub visibility: String,
	pub likes_count: i32,
	pub guest_ids: Vec<Uuid>,
	#[serde(with = "crate::time_serde")]
	pub created_at: OffsetDateTime,
	#[serde(with = "crate::time_serde")]
	pub updated_at: OffsetDateTime,
}

/// A playlist with its owning profile resolved in the same hydration query.
/// The owner join is fixed, not per-call configurable.
#[derive(Debug, Clone, serde::Serialize)]
pub struct PlaylistWithOwner {
	#[serde(flatten)]
	pub playlist: Playlist,
	pub owner: Profile,
}

#[cfg(test)]
mod tests {
	use time::macros::{date, datetime};
	use uuid::Uuid;

	use super::*;

	#[test]
	fn movie_dates_serialize_as_plain_iso_dates() {
		let movie = Movie {
			id: 603,
			title: "The Matrix".to_string(),
			original_title: None,
			overview: None,
			poster_path: None,
			release_date: Some(date!(1999 - 03 - 31)),
			runtime: Some(136),
			genre_ids: vec![28, 878],
			popularity: 85.5,
			vote_average: 8.2,
		};
		let json = serde_json::to_value(&movie).expect("serialize failed");

		assert_eq!(json["release_date"], "1999-03-31");
		assert_eq!(json["genre_ids"], serde_json::json!([28, 878]));
	}

	#[test]
	fn playlist_flattens_and_nests_its_owner() {
		let owner_id = Uuid::new_v4();
		let entry = PlaylistWithOwner {
			playlist: Playlist {
				id: Uuid::new_v4(),
				owner_id,
				title: "Heist movies".to_string(),
				description: None,
				visibility: "public".to_string(),
				likes_count: 7,
				guest_ids: Vec::new(),
				created_at: datetime!(2024-04-01 9:30 UTC),
				updated_at: datetime!(2024-04-01 9:30 UTC),
			},
			owner: Profile {
				id: owner_id,
				username: "curator".to_string(),
				full_name: None,
				avatar_url: None,
				followers_count: 42,
				created_at: datetime!(2024-03-01 12:00 UTC),
			},
		};
		let json = serde_json::to_value(&entry).expect("serialize failed");

		// Playlist fields sit at the top level; the owner is a nested object.
		assert_eq!(json["title"], "Heist movies");
		assert_eq!(json["created_at"], "2024-04-01T09:30:00Z");
		assert_eq!(json["owner"]["username"], "curator");
	}
}
