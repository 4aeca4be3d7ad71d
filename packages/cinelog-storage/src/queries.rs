//! Batched hydration fetches. Every function issues a single `= ANY($1)`
//! query; callers re-order rows to engine rank themselves.

use time::OffsetDateTime;
use uuid::Uuid;

use crate::{
	Error, Result,
	db::Db,
	models::{Movie, Person, Playlist, PlaylistWithOwner, Profile, TvSeries},
};

pub async fn movies_by_ids(db: &Db, ids: &[i64]) -> Result<Vec<Movie>> {
	if ids.is_empty() {
		return Ok(Vec::new());
	}

	sqlx::query_as::<_, Movie>(
		"\
SELECT
	id,
	title,
	original_title,
	overview,
	poster_path,
	release_date,
	runtime,
	genre_ids,
	popularity,
	vote_average
FROM movies
WHERE id = ANY($1)",
	)
	.bind(ids)
	.fetch_all(&db.pool)
	.await
	.map_err(|err| Error::Hydration { table: "movies", source: err })
}

pub async fn tv_series_by_ids(db: &Db, ids: &[i64]) -> Result<Vec<TvSeries>> {
	if ids.is_empty() {
		return Ok(Vec::new());
	}

	sqlx::query_as::<_, TvSeries>(
		"\
SELECT
	id,
	name,
	original_name,
	overview,
	poster_path,
	first_air_date,
	number_of_seasons,
	genre_ids,
	popularity,
	vote_average
FROM tv_series
WHERE id = ANY($1)",
	)
	.bind(ids)
	.fetch_all(&db.pool)
	.await
	.map_err(|err| Error::Hydration { table: "tv_series", source: err })
}

pub async fn persons_by_ids(db: &Db, ids: &[i64]) -> Result<Vec<Person>> {
	if ids.is_empty() {
		return Ok(Vec::new());
	}

	sqlx::query_as::<_, Person>(
		"\
SELECT id, name, profile_path, known_for_department, popularity
FROM persons
WHERE id = ANY($1)",
	)
	.bind(ids)
	.fetch_all(&db.pool)
	.await
	.map_err(|err| Error::Hydration { table: "persons", source: err })
}

pub async fn profiles_by_ids(db: &Db, ids: &[Uuid]) -> Result<Vec<Profile>> {
	if ids.is_empty() {
		return Ok(Vec::new());
	}

	sqlx::query_as::<_, Profile>(
		"\
SELECT id, username, full_name, avatar_url, followers_count, created_at
FROM profiles
WHERE id = ANY($1)",
	)
	.bind(ids)
	.fetch_all(&db.pool)
	.await
	.map_err(|err| Error::Hydration { table: "profiles", source: err })
}

/// Playlists always hydrate with their owning profile joined in the same
/// statement.
pub async fn playlists_by_ids(db: &Db, ids: &[Uuid]) -> Result<Vec<PlaylistWithOwner>> {
	if ids.is_empty() {
		return Ok(Vec::new());
	}

	let rows = sqlx::query_as::<_, PlaylistOwnerRow>(
		"\
SELECT
	p.id,
	p.owner_id,
	p.title,
	p.description,
	p.visibility,
	p.likes_count,
	p.guest_ids,
	p.created_at,
	p.updated_at,
	u.username AS owner_username,
	u.full_name AS owner_full_name,
	u.avatar_url AS owner_avatar_url,
	u.followers_count AS owner_followers_count,
	u.created_at AS owner_created_at
FROM playlists p
JOIN profiles u ON u.id = p.owner_id
WHERE p.id = ANY($1)",
	)
	.bind(ids)
	.fetch_all(&db.pool)
	.await
	.map_err(|err| Error::Hydration { table: "playlists", source: err })?;

	Ok(rows.into_iter().map(PlaylistOwnerRow::into_model).collect())
}

#[derive(Debug, sqlx::FromRow)]
struct PlaylistOwnerRow {
	id: Uuid,
	owner_id: Uuid,
	title: String,
	description: Option<String>,
	visibility: String,
	likes_count: i32,
	guest_ids: Vec<Uuid>,
	created_at: OffsetDateTime,
	updated_at: OffsetDateTime,
	owner_username: String,
	owner_full_name: Option<String>,
	owner_avatar_url: Option<String>,
	owner_followers_count: i32,
	owner_created_at: OffsetDateTime,
}
impl PlaylistOwnerRow {
	fn into_model(self) -> PlaylistWithOwner {
		PlaylistWithOwner {
			playlist: Playlist {
				id: self.id,
				owner_id: self.owner_id,
				title: self.title,
				description: self.description,
				visibility: self.visibility,
				likes_count: self.likes_count,
				guest_ids: self.guest_ids,
				created_at: self.created_at,
				updated_at: self.updated_at,
			},
			owner: Profile {
				id: self.owner_id,
				username: self.owner_username,
				full_name: self.owner_full_name,
				avatar_url: self.owner_avatar_url,
				followers_count: self.owner_followers_count,
				created_at: self.owner_created_at,
			},
		}
	}
}
