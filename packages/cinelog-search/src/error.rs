pub type Result<T, E = Error> = std::result::Result<T, E>;

#[derive(Debug, thiserror::Error)]
pub enum Error {
	#[error("Invalid request: {message}")]
	InvalidRequest { message: String },
	#[error("Engine error: {message}")]
	Engine { message: String },
	#[error("Storage error: {message}")]
	Storage { message: String },
	#[error("Hydration failed for table {table}: {message}")]
	Hydration { table: &'static str, message: String },
}
impl From<cinelog_engine::Error> for Error {
	fn from(err: cinelog_engine::Error) -> Self {
		Self::Engine { message: err.to_string() }
	}
}
impl From<cinelog_storage::Error> for Error {
	fn from(err: cinelog_storage::Error) -> Self {
		match err {
			cinelog_storage::Error::Sqlx(inner) => Self::Storage { message: inner.to_string() },
			cinelog_storage::Error::Hydration { table, source } =>
				Self::Hydration { table, message: source.to_string() },
		}
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn hydration_failures_keep_the_affected_table() {
		let err = Error::from(cinelog_storage::Error::Hydration {
			table: "movies",
			source: sqlx::Error::RowNotFound,
		});

		assert!(matches!(err, Error::Hydration { table: "movies", .. }));
	}

	#[test]
	fn pool_failures_map_to_storage() {
		let err = Error::from(cinelog_storage::Error::Sqlx(sqlx::Error::PoolClosed));

		assert!(matches!(err, Error::Storage { .. }));
	}
}
