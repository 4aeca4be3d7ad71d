use uuid::Uuid;

use cinelog_domain::EntityKind;
use cinelog_storage::models::{Movie, Person, PlaylistWithOwner, Profile, TvSeries};

use crate::{
	Error, Result, SearchService, filter, hydrate,
	paging::{self, PageMeta},
	plan::{self, SearchSpec},
	ranking::{self, BestCandidate, RankedBest},
};

#[derive(Debug, Clone, Copy, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MovieSort {
	Popularity,
	ReleaseDate,
	VoteAverage,
}
impl MovieSort {
	fn field(self) -> &'static str {
		match self {
			Self::Popularity => "popularity",
			Self::ReleaseDate => "release_date",
			Self::VoteAverage => "vote_average",
		}
	}
}

#[derive(Debug, Clone, Copy, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TvSeriesSort {
	Popularity,
	FirstAirDate,
	VoteAverage,
}
impl TvSeriesSort {
	fn field(self) -> &'static str {
		match self {
			Self::Popularity => "popularity",
			Self::FirstAirDate => "first_air_date",
			Self::VoteAverage => "vote_average",
		}
	}
}

#[derive(Debug, Clone, Copy, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PersonSort {
	Popularity,
}
impl PersonSort {
	fn field(self) -> &'static str {
		match self {
			Self::Popularity => "popularity",
		}
	}
}

#[derive(Debug, Clone, Copy, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum UserSort {
	FollowersCount,
	CreatedAt,
}
impl UserSort {
	fn field(self) -> &'static str {
		match self {
			Self::FollowersCount => "followers_count",
			Self::CreatedAt => "created_at",
		}
	}
}

#[derive(Debug, Clone, Copy, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PlaylistSort {
	CreatedAt,
	LikesCount,
}
impl PlaylistSort {
	fn field(self) -> &'static str {
		match self {
			Self::CreatedAt => "created_at",
			Self::LikesCount => "likes_count",
		}
	}
}

#[derive(Debug, Clone, Default, serde::Serialize, serde::Deserialize)]
#[serde(default)]
pub struct MovieFilters {
	pub genre_ids: Option<String>,
	pub release_date_min: Option<String>,
	pub release_date_max: Option<String>,
	pub runtime_min: Option<f64>,
	pub runtime_max: Option<f64>,
	pub rating_min: Option<f64>,
	pub rating_max: Option<f64>,
}
impl MovieFilters {
	pub(crate) fn to_filter_by(&self) -> Result<Option<String>> {
		let mut clauses = Vec::new();

		if let Some(raw) = self.genre_ids.as_deref()
			&& let Some(clause) = filter::id_list_clause("genre_ids", raw)
		{
			clauses.push(clause);
		}
		if let Some(clause) = filter::date_range_clause(
			"release_date",
			self.release_date_min.as_deref(),
			self.release_date_max.as_deref(),
		)? {
			clauses.push(clause);
		}
		if let Some(clause) = filter::range_clause("runtime", self.runtime_min, self.runtime_max) {
			clauses.push(clause);
		}
		if let Some(clause) = filter::range_clause("vote_average", self.rating_min, self.rating_max)
		{
			clauses.push(clause);
		}

		Ok(filter::join_clauses(clauses))
	}
}

#[derive(Debug, Clone, Default, serde::Serialize, serde::Deserialize)]
#[serde(default)]
pub struct TvSeriesFilters {
	pub genre_ids: Option<String>,
	pub first_air_date_min: Option<String>,
	pub first_air_date_max: Option<String>,
	pub rating_min: Option<f64>,
	pub rating_max: Option<f64>,
}
impl TvSeriesFilters {
	pub(crate) fn to_filter_by(&self) -> Result<Option<String>> {
		let mut clauses = Vec::new();

		if let Some(raw) = self.genre_ids.as_deref()
			&& let Some(clause) = filter::id_list_clause("genre_ids", raw)
		{
			clauses.push(clause);
		}
		if let Some(clause) = filter::date_range_clause(
			"first_air_date",
			self.first_air_date_min.as_deref(),
			self.first_air_date_max.as_deref(),
		)? {
			clauses.push(clause);
		}
		if let Some(clause) = filter::range_clause("vote_average", self.rating_min, self.rating_max)
		{
			clauses.push(clause);
		}

		Ok(filter::join_clauses(clauses))
	}
}

#[derive(Debug, Clone, Default, serde::Serialize, serde::Deserialize)]
#[serde(default)]
pub struct UserFilters {
	/// Comma-separated user IDs to drop from the results, e.g. the caller
	/// themselves or accounts they blocked.
	pub exclude_ids: Option<String>,
}
impl UserFilters {
	pub(crate) fn to_filter_by(&self) -> Option<String> {
		let clauses = self
			.exclude_ids
			.as_deref()
			.map(|raw| filter::exclusion_clauses("id", raw))
			.unwrap_or_default();

		filter::join_clauses(clauses)
	}
}

#[derive(Debug, Clone, Default, serde::Serialize, serde::Deserialize)]
#[serde(default)]
pub struct PlaylistFilters {
	pub created_at_min: Option<String>,
	pub created_at_max: Option<String>,
}
impl PlaylistFilters {
	/// The visibility predicate is mandatory on every playlist search; the
	/// date range is optional on top of it.
	pub(crate) fn to_filter_by(&self, searcher: Option<Uuid>) -> Result<Option<String>> {
		let visibility = filter::visibility_clause(searcher);
		let date_clause = filter::date_range_clause(
			"created_at",
			self.created_at_min.as_deref(),
			self.created_at_max.as_deref(),
		)?;
		let Some(date_clause) = date_clause else {
			return Ok(Some(visibility));
		};

		Ok(filter::join_clauses(vec![filter::group(visibility), date_clause]))
	}
}

#[derive(Debug, Clone, serde::Serialize, serde::Deserialize)]
pub struct MovieSearchRequest {
	pub query: String,
	pub page: Option<u32>,
	pub per_page: Option<u32>,
	pub sort_by: Option<MovieSort>,
	#[serde(default)]
	pub filters: MovieFilters,
}

#[derive(Debug, Clone, serde::Serialize, serde::Deserialize)]
pub struct TvSeriesSearchRequest {
	pub query: String,
	pub page: Option<u32>,
	pub per_page: Option<u32>,
	pub sort_by: Option<TvSeriesSort>,
	#[serde(default)]
	pub filters: TvSeriesFilters,
}

#[derive(Debug, Clone, serde::Serialize, serde::Deserialize)]
pub struct PersonSearchRequest {
	pub query: String,
	pub page: Option<u32>,
	pub per_page: Option<u32>,
	pub sort_by: Option<PersonSort>,
}

#[derive(Debug, Clone, serde::Serialize, serde::Deserialize)]
pub struct UserSearchRequest {
	pub query: String,
	pub page: Option<u32>,
	pub per_page: Option<u32>,
	pub sort_by: Option<UserSort>,
	#[serde(default)]
	pub filters: UserFilters,
}

#[derive(Debug, Clone, serde::Serialize, serde::Deserialize)]
pub struct PlaylistSearchRequest {
	pub query: String,
	pub page: Option<u32>,
	pub per_page: Option<u32>,
	pub sort_by: Option<PlaylistSort>,
	#[serde(default)]
	pub filters: PlaylistFilters,
	/// Authenticated caller, if any. Drives the visibility predicate.
	pub searcher: Option<Uuid>,
}

#[derive(Debug, Clone, serde::Serialize, serde::Deserialize)]
pub struct CombinedSearchRequest {
	pub query: String,
	pub results_per_type: Option<u32>,
	pub searcher: Option<Uuid>,
}

#[derive(Debug, Clone, serde::Serialize)]
pub struct PagedResponse<T> {
	pub data: Vec<T>,
	pub pagination: PageMeta,
}

#[derive(Debug, Clone, serde::Serialize)]
#[serde(untagged)]
pub enum BestResultData {
	Movie(Movie),
	TvSeries(TvSeries),
	Person(Person),
	User(Profile),
	Playlist(PlaylistWithOwner),
}

#[derive(Debug, Clone, serde::Serialize)]
pub struct BestResult {
	#[serde(rename = "type")]
	pub kind: EntityKind,
	pub data: BestResultData,
}

#[derive(Debug, Clone, serde::Serialize)]
pub struct CombinedSearchResponse {
	/// Serialized as `bestResult`, the one camelCase key in the response.
	#[serde(rename = "bestResult")]
	pub best_result: Option<BestResult>,
	pub movies: PagedResponse<Movie>,
	pub tv_series: PagedResponse<TvSeries>,
	pub persons: PagedResponse<Person>,
	pub users: PagedResponse<Profile>,
	pub playlists: PagedResponse<PlaylistWithOwner>,
}

impl SearchService {
	pub async fn search_movies(&self, req: MovieSearchRequest) -> Result<PagedResponse<Movie>> {
		let query = required_query(&req.query)?;
		let (page, per_page) = self.page_params(req.page, req.per_page);
		let spec = plan::plan(
			EntityKind::Movie,
			query,
			page,
			per_page,
			req.sort_by.map(MovieSort::field),
			req.filters.to_filter_by()?,
		);
		let res = self.engine.search(spec.kind.collection(), &spec.params).await?;

		if res.found == 0 {
			return Ok(empty_page(page, per_page));
		}

		let ids = hydrate::numeric_ids(&res.hits);
		let rows = self.store.movies_by_ids(&ids).await?;

		Ok(PagedResponse {
			data: hydrate::order_by_ids(&ids, rows, |movie| movie.id),
			pagination: paging::page_meta(res.found, page, per_page),
		})
	}

	pub async fn search_tv_series(
		&self,
		req: TvSeriesSearchRequest,
	) -> Result<PagedResponse<TvSeries>> {
		let query = required_query(&req.query)?;
		let (page, per_page) = self.page_params(req.page, req.per_page);
		let spec = plan::plan(
			EntityKind::TvSeries,
			query,
			page,
			per_page,
			req.sort_by.map(TvSeriesSort::field),
			req.filters.to_filter_by()?,
		);
		let res = self.engine.search(spec.kind.collection(), &spec.params).await?;

		if res.found == 0 {
			return Ok(empty_page(page, per_page));
		}

		let ids = hydrate::numeric_ids(&res.hits);
		let rows = self.store.tv_series_by_ids(&ids).await?;

		Ok(PagedResponse {
			data: hydrate::order_by_ids(&ids, rows, |series| series.id),
			pagination: paging::page_meta(res.found, page, per_page),
		})
	}

	pub async fn search_persons(&self, req: PersonSearchRequest) -> Result<PagedResponse<Person>> {
		let query = required_query(&req.query)?;
		let (page, per_page) = self.page_params(req.page, req.per_page);
		let spec = plan::plan(
			EntityKind::Person,
			query,
			page,
			per_page,
			req.sort_by.map(PersonSort::field),
			None,
		);
		let res = self.engine.search(spec.kind.collection(), &spec.params).await?;

		if res.found == 0 {
			return Ok(empty_page(page, per_page));
		}

		let ids = hydrate::numeric_ids(&res.hits);
		let rows = self.store.persons_by_ids(&ids).await?;

		Ok(PagedResponse {
			data: hydrate::order_by_ids(&ids, rows, |person| person.id),
			pagination: paging::page_meta(res.found, page, per_page),
		})
	}

	pub async fn search_users(&self, req: UserSearchRequest) -> Result<PagedResponse<Profile>> {
		let query = required_query(&req.query)?;
		let (page, per_page) = self.page_params(req.page, req.per_page);
		let spec = plan::plan(
			EntityKind::User,
			query,
			page,
			per_page,
			req.sort_by.map(UserSort::field),
			req.filters.to_filter_by(),
		);
		let res = self.engine.search(spec.kind.collection(), &spec.params).await?;

		if res.found == 0 {
			return Ok(empty_page(page, per_page));
		}

		let ids = hydrate::uuid_ids(&res.hits);
		let rows = self.store.profiles_by_ids(&ids).await?;

		Ok(PagedResponse {
			data: hydrate::order_by_ids(&ids, rows, |profile| profile.id),
			pagination: paging::page_meta(res.found, page, per_page),
		})
	}

	pub async fn search_playlists(
		&self,
		req: PlaylistSearchRequest,
	) -> Result<PagedResponse<PlaylistWithOwner>> {
		let query = required_query(&req.query)?;
		let (page, per_page) = self.page_params(req.page, req.per_page);
		let spec = plan::plan(
			EntityKind::Playlist,
			query,
			page,
			per_page,
			req.sort_by.map(PlaylistSort::field),
			req.filters.to_filter_by(req.searcher)?,
		);
		let res = self.engine.search(spec.kind.collection(), &spec.params).await?;

		if res.found == 0 {
			return Ok(empty_page(page, per_page));
		}

		let ids = hydrate::uuid_ids(&res.hits);
		let rows = self.store.playlists_by_ids(&ids).await?;

		Ok(PagedResponse {
			data: hydrate::order_by_ids(&ids, rows, |entry| entry.playlist.id),
			pagination: paging::page_meta(res.found, page, per_page),
		})
	}

	/// The combined endpoint: one multi-search batch across all five
	/// collections, concurrent hydration, and a single cross-type best
	/// result.
	pub async fn search_all(&self, req: CombinedSearchRequest) -> Result<CombinedSearchResponse> {
		let query = required_query(&req.query)?;
		let per_type =
			req.results_per_type.unwrap_or(self.cfg.search.default_results_per_type).max(1);
		let specs = EntityKind::ALL
			.iter()
			.map(|&kind| {
				let filter_by = match kind {
					EntityKind::Playlist => Some(filter::visibility_clause(req.searcher)),
					_ => None,
				};

				plan::plan(kind, query, 1, per_type, None, filter_by)
			})
			.collect::<Vec<_>>();
		let entries = specs.into_iter().map(SearchSpec::into_entry).collect::<Vec<_>>();
		let results = self.engine.multi_search(&entries).await?;
		// Results zip back to their kind by submission index, never by any
		// engine-provided label.
		let [movies_res, tv_res, persons_res, users_res, playlists_res]: [_; 5] =
			results.try_into().map_err(|results: Vec<_>| Error::Engine {
				message: format!("Multi-search returned {} result sets, expected 5.", results.len()),
			})?;

		let movie_ids = hydrate::numeric_ids(&movies_res.hits);
		let tv_ids = hydrate::numeric_ids(&tv_res.hits);
		let person_ids = hydrate::numeric_ids(&persons_res.hits);
		let user_ids = hydrate::uuid_ids(&users_res.hits);
		let playlist_ids = hydrate::uuid_ids(&playlists_res.hits);
		let (movies, tv_series, persons, users, playlists) = tokio::try_join!(
			self.store.movies_by_ids(&movie_ids),
			self.store.tv_series_by_ids(&tv_ids),
			self.store.persons_by_ids(&person_ids),
			self.store.profiles_by_ids(&user_ids),
			self.store.playlists_by_ids(&playlist_ids),
		)?;
		let movies = hydrate::order_by_ids(&movie_ids, movies, |movie| movie.id);
		let tv_series = hydrate::order_by_ids(&tv_ids, tv_series, |series| series.id);
		let persons = hydrate::order_by_ids(&person_ids, persons, |person| person.id);
		let users = hydrate::order_by_ids(&user_ids, users, |profile| profile.id);
		let playlists = hydrate::order_by_ids(&playlist_ids, playlists, |entry| entry.playlist.id);

		let mut candidates = Vec::new();

		for (kind, res) in EntityKind::ALL
			.into_iter()
			.zip([&movies_res, &tv_res, &persons_res, &users_res, &playlists_res])
		{
			let Some(hit) = res.hits.first() else {
				continue;
			};
			let Some(id) = hydrate::document_id(&hit.document) else {
				continue;
			};

			candidates.push(BestCandidate {
				kind,
				id: id.to_string(),
				text_match: hit.text_match,
				metric: ranking::metric_of(kind, &hit.document),
			});
		}

		let best_result = ranking::rank_best(&candidates)
			.and_then(|best| locate_best(best, &movies, &tv_series, &persons, &users, &playlists));

		Ok(CombinedSearchResponse {
			best_result,
			movies: PagedResponse {
				data: movies,
				pagination: paging::page_meta(movies_res.found, 1, per_type),
			},
			tv_series: PagedResponse {
				data: tv_series,
				pagination: paging::page_meta(tv_res.found, 1, per_type),
			},
			persons: PagedResponse {
				data: persons,
				pagination: paging::page_meta(persons_res.found, 1, per_type),
			},
			users: PagedResponse {
				data: users,
				pagination: paging::page_meta(users_res.found, 1, per_type),
			},
			playlists: PagedResponse {
				data: playlists,
				pagination: paging::page_meta(playlists_res.found, 1, per_type),
			},
		})
	}

	fn page_params(&self, page: Option<u32>, per_page: Option<u32>) -> (u32, u32) {
		(page.unwrap_or(1).max(1), per_page.unwrap_or(self.cfg.search.default_per_page).max(1))
	}
}

/// The winner's record comes from the already-hydrated list for its kind,
/// never from a second store fetch. A winner hydration dropped as stale
/// yields no best result.
fn locate_best(
	best: RankedBest,
	movies: &[Movie],
	tv_series: &[TvSeries],
	persons: &[Person],
	users: &[Profile],
	playlists: &[PlaylistWithOwner],
) -> Option<BestResult> {
	let data = match best.kind {
		EntityKind::Movie => {
			let id = best.id.parse::<i64>().ok()?;

			movies.iter().find(|movie| movie.id == id).cloned().map(BestResultData::Movie)
		},
		EntityKind::TvSeries => {
			let id = best.id.parse::<i64>().ok()?;

			tv_series.iter().find(|series| series.id == id).cloned().map(BestResultData::TvSeries)
		},
		EntityKind::Person => {
			let id = best.id.parse::<i64>().ok()?;

			persons.iter().find(|person| person.id == id).cloned().map(BestResultData::Person)
		},
		EntityKind::User => {
			let id = Uuid::parse_str(&best.id).ok()?;

			users.iter().find(|profile| profile.id == id).cloned().map(BestResultData::User)
		},
		EntityKind::Playlist => {
			let id = Uuid::parse_str(&best.id).ok()?;

			playlists
				.iter()
				.find(|entry| entry.playlist.id == id)
				.cloned()
				.map(BestResultData::Playlist)
		},
	}?;

	Some(BestResult { kind: best.kind, data })
}

fn required_query(raw: &str) -> Result<&str> {
	let query = raw.trim();

	if query.is_empty() {
		return Err(Error::InvalidRequest { message: "query is required.".to_string() });
	}

	Ok(query)
}

fn empty_page<T>(page: u32, per_page: u32) -> PagedResponse<T> {
	PagedResponse { data: Vec::new(), pagination: paging::page_meta(0, page, per_page) }
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn movie_filters_combine_with_and() {
		let filters = MovieFilters {
			genre_ids: Some("28,12,abc".to_string()),
			runtime_min: Some(90.0),
			runtime_max: Some(150.0),
			..Default::default()
		};
		let filter_by = filters.to_filter_by().expect("valid filters");

		assert_eq!(filter_by.as_deref(), Some("genre_ids:[28,12] && runtime:[90..150]"));
	}

	#[test]
	fn empty_movie_filters_emit_no_filter() {
		let filter_by = MovieFilters::default().to_filter_by().expect("valid filters");

		assert_eq!(filter_by, None);
	}

	#[test]
	fn anonymous_playlist_filter_is_exactly_public() {
		let filter_by =
			PlaylistFilters::default().to_filter_by(None).expect("valid filters");

		assert_eq!(filter_by.as_deref(), Some("visibility:=public"));
	}

	#[test]
	fn authenticated_playlist_filter_is_an_unwrapped_or_group() {
		let user = Uuid::parse_str("3de6c2a5-0b67-4b0d-9f15-5a2f6a1f9ad7").expect("uuid");
		let filter_by =
			PlaylistFilters::default().to_filter_by(Some(user)).expect("valid filters");

		assert_eq!(
			filter_by,
			Some(format!("visibility:=public || owner_id:={user} || guest_ids:={user}"))
		);
	}

	#[test]
	fn playlist_date_filter_parenthesizes_the_visibility_group() {
		let user = Uuid::parse_str("3de6c2a5-0b67-4b0d-9f15-5a2f6a1f9ad7").expect("uuid");
		let filters =
			PlaylistFilters { created_at_min: Some("2024-01-01".to_string()), ..Default::default() };
		let filter_by = filters.to_filter_by(Some(user)).expect("valid filters");

		assert_eq!(
			filter_by,
			Some(format!(
				"(visibility:=public || owner_id:={user} || guest_ids:={user}) && created_at:>=1704067200"
			))
		);
	}

	#[test]
	fn user_exclusions_join_with_and() {
		let filters = UserFilters { exclude_ids: Some("u1, u2".to_string()) };

		assert_eq!(filters.to_filter_by().as_deref(), Some("id:!=u1 && id:!=u2"));
		assert_eq!(UserFilters::default().to_filter_by(), None);
	}
}
