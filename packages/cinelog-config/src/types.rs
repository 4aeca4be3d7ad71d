use serde::Deserialize;

#[derive(Debug, Deserialize)]
pub struct Config {
	pub service: Service,
	pub storage: Storage,
	#[serde(default)]
	pub search: Search,
}

#[derive(Debug, Deserialize)]
pub struct Service {
	pub log_level: String,
}

#[derive(Debug, Deserialize)]
pub struct Storage {
	pub postgres: Postgres,
	pub typesense: Typesense,
}

#[derive(Debug, Deserialize)]
pub struct Postgres {
	pub dsn: String,
	pub pool_max_conns: u32,
}

#[derive(Debug, Deserialize)]
pub struct Typesense {
	pub url: String,
	pub api_key: String,
	pub timeout_ms: u64,
}

#[derive(Debug, Deserialize)]
#[serde(default)]
pub struct Search {
	/// Page size applied when a caller omits `per_page`.
	pub default_per_page: u32,
	/// Hits requested per entity type by the combined best-result search.
	pub default_results_per_type: u32,
}
impl Default for Search {
	fn default() -> Self {
		Self { default_per_page: 10, default_results_per_type: 5 }
	}
}
