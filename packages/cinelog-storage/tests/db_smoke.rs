//! Live-database checks. Each test provisions a throwaway database through
//! the testkit, so they only run when CINELOG_PG_DSN points at a reachable
//! Postgres:
//!
//! ```text
//! CINELOG_PG_DSN=postgres://postgres@localhost cargo test -p cinelog-storage -- --ignored
//! ```

use time::macros::{date, datetime};
use uuid::Uuid;

use cinelog_config::Postgres;
use cinelog_storage::{db::Db, queries};
use cinelog_testkit::{Error, Result, env_dsn, with_test_db};

async fn connect(dsn: &str) -> Result<Db> {
	let cfg = Postgres { dsn: dsn.to_string(), pool_max_conns: 5 };
	let db = Db::connect(&cfg).await.map_err(|err| Error::Message(err.to_string()))?;

	db.ensure_schema().await.map_err(|err| Error::Message(err.to_string()))?;

	Ok(db)
}

fn storage_err(err: cinelog_storage::Error) -> Error {
	Error::Message(err.to_string())
}

fn sqlx_err(err: sqlx::Error) -> Error {
	Error::Message(err.to_string())
}

async fn insert_profile(db: &Db, id: Uuid, username: &str) -> Result<()> {
	sqlx::query(
		"\
INSERT INTO profiles (id, username, full_name, avatar_url, followers_count, created_at)
VALUES ($1, $2, $3, NULL, $4, $5)",
	)
	.bind(id)
	.bind(username)
	.bind(format!("{username} full"))
	.bind(42_i32)
	.bind(datetime!(2024-03-01 12:00 UTC))
	.execute(&db.pool)
	.await
	.map_err(sqlx_err)?;

	Ok(())
}

#[tokio::test]
#[ignore = "requires CINELOG_PG_DSN"]
async fn schema_bootstrap_is_idempotent() {
	let Some(dsn) = env_dsn() else {
		return;
	};

	with_test_db(&dsn, |db_dsn| async move {
		let db = connect(&db_dsn).await?;

		// A second pass must not fail on already-existing objects.
		db.ensure_schema().await.map_err(storage_err)?;

		Ok(())
	})
	.await
	.expect("bootstrap failed");
}

#[tokio::test]
#[ignore = "requires CINELOG_PG_DSN"]
async fn movies_hydrate_by_id_batch() {
	let Some(dsn) = env_dsn() else {
		return;
	};

	with_test_db(&dsn, |db_dsn| async move {
		let db = connect(&db_dsn).await?;

		sqlx::query(
			"\
INSERT INTO movies (id, title, original_title, overview, poster_path, release_date, runtime, genre_ids, popularity, vote_average)
VALUES
	(603, 'The Matrix', NULL, NULL, NULL, $1, 136, $2, 85.5, 8.2),
	(604, 'The Matrix Reloaded', NULL, NULL, NULL, NULL, NULL, $3, 60.1, 7.0)",
		)
		.bind(date!(1999 - 03 - 31))
		.bind(vec![28_i32, 878])
		.bind(Vec::<i32>::new())
		.execute(&db.pool)
		.await
		.map_err(sqlx_err)?;

		// 999 has no row; the batch returns only what exists.
		let movies = queries::movies_by_ids(&db, &[603, 604, 999]).await.map_err(storage_err)?;

		assert_eq!(movies.len(), 2);

		let matrix = movies.iter().find(|movie| movie.id == 603).expect("movie 603 missing");

		assert_eq!(matrix.title, "The Matrix");
		assert_eq!(matrix.release_date, Some(date!(1999 - 03 - 31)));
		assert_eq!(matrix.genre_ids, vec![28, 878]);

		Ok(())
	})
	.await
	.expect("hydration failed");
}

#[tokio::test]
#[ignore = "requires CINELOG_PG_DSN"]
async fn playlists_hydrate_with_their_owner() {
	let Some(dsn) = env_dsn() else {
		return;
	};

	with_test_db(&dsn, |db_dsn| async move {
		let db = connect(&db_dsn).await?;
		let owner_id = Uuid::new_v4();
		let guest_id = Uuid::new_v4();
		let playlist_id = Uuid::new_v4();

		insert_profile(&db, owner_id, "curator").await?;

		sqlx::query(
			"\
INSERT INTO playlists (id, owner_id, title, description, visibility, likes_count, guest_ids, created_at, updated_at)
VALUES ($1, $2, 'Heist movies', NULL, 'private', 7, $3, $4, $4)",
		)
		.bind(playlist_id)
		.bind(owner_id)
		.bind(vec![guest_id])
		.bind(datetime!(2024-04-01 9:30 UTC))
		.execute(&db.pool)
		.await
		.map_err(sqlx_err)?;

		let playlists =
			queries::playlists_by_ids(&db, &[playlist_id]).await.map_err(storage_err)?;

		assert_eq!(playlists.len(), 1);

		let entry = &playlists[0];

		assert_eq!(entry.playlist.title, "Heist movies");
		assert_eq!(entry.playlist.guest_ids, vec![guest_id]);
		assert_eq!(entry.owner.id, owner_id);
		assert_eq!(entry.owner.username, "curator");

		Ok(())
	})
	.await
	.expect("hydration failed");
}

#[tokio::test]
#[ignore = "requires CINELOG_PG_DSN"]
async fn profile_hydration_skips_missing_ids() {
	let Some(dsn) = env_dsn() else {
		return;
	};

	with_test_db(&dsn, |db_dsn| async move {
		let db = connect(&db_dsn).await?;
		let known = Uuid::new_v4();

		insert_profile(&db, known, "alice").await?;

		let profiles =
			queries::profiles_by_ids(&db, &[known, Uuid::new_v4()]).await.map_err(storage_err)?;

		assert_eq!(profiles.len(), 1);
		assert_eq!(profiles[0].username, "alice");

		// An empty batch never touches the database.
		let none = queries::profiles_by_ids(&db, &[]).await.map_err(storage_err)?;

		assert!(none.is_empty());

		Ok(())
	})
	.await
	.expect("hydration failed");
}
