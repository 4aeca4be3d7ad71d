#[derive(Debug, thiserror::Error)]
pub enum Error {
	#[error(transparent)]
	Sqlx(#[from] sqlx::Error),
	#[error("Hydration query failed for table {table}.")]
	Hydration { table: &'static str, source: sqlx::Error },
}
