mod error;
mod types;

pub use error::{Error, Result};
pub use types::{Config, Postgres, Search, Service, Storage, Typesense};

use std::{fs, path::Path};

pub fn load(path: &Path) -> Result<Config> {
	let raw = fs::read_to_string(path)
		.map_err(|err| Error::ReadConfig { path: path.to_path_buf(), source: err })?;

	let mut cfg: Config = toml::from_str(&raw)
		.map_err(|err| Error::ParseConfig { path: path.to_path_buf(), source: err })?;

	normalize(&mut cfg);

	validate(&cfg)?;

	Ok(cfg)
}

pub fn validate(cfg: &Config) -> Result<()> {
	if cfg.storage.postgres.dsn.trim().is_empty() {
		return Err(Error::Validation {
			message: "storage.postgres.dsn must be non-empty.".to_string(),
		});
	}
	if cfg.storage.postgres.pool_max_conns == 0 {
		return Err(Error::Validation {
			message: "storage.postgres.pool_max_conns must be greater than zero.".to_string(),
		});
	}
	if cfg.storage.typesense.url.trim().is_empty() {
		return Err(Error::Validation {
			message: "storage.typesense.url must be non-empty.".to_string(),
		});
	}
	if cfg.storage.typesense.api_key.trim().is_empty() {
		return Err(Error::Validation {
			message: "storage.typesense.api_key must be non-empty.".to_string(),
		});
	}
	if cfg.storage.typesense.timeout_ms == 0 {
		return Err(Error::Validation {
			message: "storage.typesense.timeout_ms must be greater than zero.".to_string(),
		});
	}
	if cfg.search.default_per_page == 0 {
		return Err(Error::Validation {
			message: "search.default_per_page must be greater than zero.".to_string(),
		});
	}
	if cfg.search.default_results_per_type == 0 {
		return Err(Error::Validation {
			message: "search.default_results_per_type must be greater than zero.".to_string(),
		});
	}

	Ok(())
}

fn normalize(cfg: &mut Config) {
	let url = cfg.storage.typesense.url.trim();

	// Engine paths are joined onto the base URL; a trailing slash would
	// produce double-slash request paths.
	cfg.storage.typesense.url = url.strip_suffix('/').unwrap_or(url).to_string();

	if cfg.service.log_level.trim().is_empty() {
		cfg.service.log_level = "info".to_string();
	}
}
