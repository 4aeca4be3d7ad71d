pub mod filter;
pub mod hydrate;
pub mod paging;
pub mod plan;
pub mod ranking;
pub mod search;

mod error;

pub use error::{Error, Result};
pub use paging::PageMeta;
pub use plan::SearchSpec;
pub use ranking::{BestCandidate, RankedBest};
pub use search::{
	BestResult, BestResultData, CombinedSearchRequest, CombinedSearchResponse, MovieFilters,
	MovieSearchRequest, MovieSort, PagedResponse, PersonSearchRequest, PersonSort,
	PlaylistFilters, PlaylistSearchRequest, PlaylistSort, TvSeriesFilters, TvSeriesSearchRequest,
	TvSeriesSort, UserFilters, UserSearchRequest, UserSort,
};

use std::{future::Future, pin::Pin, sync::Arc};

use tracing_subscriber::EnvFilter;
use uuid::Uuid;

use cinelog_engine::{EngineResponse, MultiSearchEntry, SearchParams, TypesenseClient};
use cinelog_storage::{
	db::Db,
	models::{Movie, Person, PlaylistWithOwner, Profile, TvSeries},
	queries,
};

pub type BoxFuture<'a, T> = Pin<Box<dyn Future<Output = T> + Send + 'a>>;

/// Installs the global tracing subscriber with the configured log level.
/// Hosts call this once before constructing the service.
pub fn init_tracing(cfg: &cinelog_config::Config) {
	let filter =
		EnvFilter::try_new(&cfg.service.log_level).unwrap_or_else(|_| EnvFilter::new("info"));

	tracing_subscriber::fmt().with_env_filter(filter).init();
}

/// Search-engine boundary. One implementation speaks to the real engine;
/// tests substitute recording fakes.
pub trait SearchEngine
where
	Self: Send + Sync,
{
	fn search<'a>(
		&'a self,
		collection: &'a str,
		params: &'a SearchParams,
	) -> BoxFuture<'a, Result<EngineResponse>>;

	/// Submits all specs as one batch; the result order matches the
	/// submission order.
	fn multi_search<'a>(
		&'a self,
		searches: &'a [MultiSearchEntry],
	) -> BoxFuture<'a, Result<Vec<EngineResponse>>>;
}

/// Primary-store boundary for hydration. Each call is a single batched
/// fetch; row order is unspecified.
pub trait SearchStore
where
	Self: Send + Sync,
{
	fn movies_by_ids<'a>(&'a self, ids: &'a [i64]) -> BoxFuture<'a, Result<Vec<Movie>>>;
	fn tv_series_by_ids<'a>(&'a self, ids: &'a [i64]) -> BoxFuture<'a, Result<Vec<TvSeries>>>;
	fn persons_by_ids<'a>(&'a self, ids: &'a [i64]) -> BoxFuture<'a, Result<Vec<Person>>>;
	fn profiles_by_ids<'a>(&'a self, ids: &'a [Uuid]) -> BoxFuture<'a, Result<Vec<Profile>>>;
	fn playlists_by_ids<'a>(
		&'a self,
		ids: &'a [Uuid],
	) -> BoxFuture<'a, Result<Vec<PlaylistWithOwner>>>;
}

pub struct SearchService {
	pub cfg: cinelog_config::Config,
	pub engine: Arc<dyn SearchEngine>,
	pub store: Arc<dyn SearchStore>,
}
impl SearchService {
	pub fn new(cfg: cinelog_config::Config, db: Db, client: TypesenseClient) -> Self {
		Self {
			cfg,
			engine: Arc::new(DefaultEngine { client }),
			store: Arc::new(DefaultStore { db: Arc::new(db) }),
		}
	}

	pub fn with_collaborators(
		cfg: cinelog_config::Config,
		engine: Arc<dyn SearchEngine>,
		store: Arc<dyn SearchStore>,
	) -> Self {
		Self { cfg, engine, store }
	}
}

struct DefaultEngine {
	client: TypesenseClient,
}
impl SearchEngine for DefaultEngine {
	fn search<'a>(
		&'a self,
		collection: &'a str,
		params: &'a SearchParams,
	) -> BoxFuture<'a, Result<EngineResponse>> {
		Box::pin(async move { Ok(self.client.search(collection, params).await?) })
	}

	fn multi_search<'a>(
		&'a self,
		searches: &'a [MultiSearchEntry],
	) -> BoxFuture<'a, Result<Vec<EngineResponse>>> {
		Box::pin(async move { Ok(self.client.multi_search(searches).await?) })
	}
}

struct DefaultStore {
	db: Arc<Db>,
}
impl SearchStore for DefaultStore {
	fn movies_by_ids<'a>(&'a self, ids: &'a [i64]) -> BoxFuture<'a, Result<Vec<Movie>>> {
		Box::pin(async move { Ok(queries::movies_by_ids(&self.db, ids).await?) })
	}

	fn tv_series_by_ids<'a>(&'a self, ids: &'a [i64]) -> BoxFuture<'a, Result<Vec<TvSeries>>> {
		Box::pin(async move { Ok(queries::tv_series_by_ids(&self.db, ids).await?) })
	}

	fn persons_by_ids<'a>(&'a self, ids: &'a [i64]) -> BoxFuture<'a, Result<Vec<Person>>> {
		Box::pin(async move { Ok(queries::persons_by_ids(&self.db, ids).await?) })
	}

	fn profiles_by_ids<'a>(&'a self, ids: &'a [Uuid]) -> BoxFuture<'a, Result<Vec<Profile>>> {
		Box::pin(async move { Ok(queries::profiles_by_ids(&self.db, ids).await?) })
	}

	fn playlists_by_ids<'a>(
		&'a self,
		ids: &'a [Uuid],
	) -> BoxFuture<'a, Result<Vec<PlaylistWithOwner>>> {
		Box::pin(async move { Ok(queries::playlists_by_ids(&self.db, ids).await?) })
	}
}
