//! Builders for the engine's textual filter grammar. Every function is pure;
//! clauses for one request are joined with `&&`.

use time::{Date, format_description::FormatItem, macros::format_description};
use tracing::debug;
use uuid::Uuid;

use crate::{Error, Result};

const ISO_DATE: &[FormatItem<'_>] = format_description!("[year]-[month]-[day]");

/// `field:[min..max]` when both bounds are present, `field:>=min` /
/// `field:<=max` for a single bound, nothing when the range is unbounded.
pub fn range_clause(field: &str, min: Option<f64>, max: Option<f64>) -> Option<String> {
	format_range(field, min.map(format_number), max.map(format_number))
}

/// Same shape as [`range_clause`], with ISO date bounds converted to Unix
/// epoch seconds first. Engine documents store dates as epoch integers.
pub fn date_range_clause(
	field: &str,
	min: Option<&str>,
	max: Option<&str>,
) -> Result<Option<String>> {
	let min = min.map(|raw| epoch_seconds(field, raw)).transpose()?;
	let max = max.map(|raw| epoch_seconds(field, raw)).transpose()?;

	Ok(format_range(field, min.map(|s| s.to_string()), max.map(|s| s.to_string())))
}

/// `field:[id1,id2,...]` from a comma-separated list. Non-numeric tokens are
/// dropped, not rejected; an empty surviving list emits no clause.
pub fn id_list_clause(field: &str, raw: &str) -> Option<String> {
	let ids = raw
		.split(',')
		.filter_map(|token| {
			let token = token.trim();

			match token.parse::<i64>() {
				Ok(id) => Some(id),
				Err(_) => {
					if !token.is_empty() {
						debug!(field, token, "Dropping non-numeric ID token from list filter.");
					}

					None
				},
			}
		})
		.map(|id| id.to_string())
		.collect::<Vec<_>>();

	if ids.is_empty() {
		None
	} else {
		Some(format!("{field}:[{}]", ids.join(",")))
	}
}

/// One `field:!=id` clause per excluded ID. ANDed together by the caller,
/// the inequalities read "none of these".
pub fn exclusion_clauses(field: &str, raw: &str) -> Vec<String> {
	raw.split(',')
		.map(str::trim)
		.filter(|token| !token.is_empty())
		.map(|token| format!("{field}:!={token}"))
		.collect()
}

/// Playlist permission predicate. Anonymous callers see public playlists
/// only; an authenticated caller additionally sees playlists they own or
/// are a guest on.
pub fn visibility_clause(searcher: Option<Uuid>) -> String {
	match searcher {
		None => format!("visibility:={}", cinelog_domain::Visibility::Public.as_str()),
		Some(user) => format!(
			"visibility:={} || owner_id:={user} || guest_ids:={user}",
			cinelog_domain::Visibility::Public.as_str()
		),
	}
}

pub fn join_clauses(clauses: Vec<String>) -> Option<String> {
	if clauses.is_empty() { None } else { Some(clauses.join(" && ")) }
}

/// Wraps an OR-group so it binds correctly when ANDed with other clauses.
pub fn group(clause: String) -> String {
	if clause.contains(" || ") { format!("({clause})") } else { clause }
}

fn format_range(field: &str, min: Option<String>, max: Option<String>) -> Option<String> {
	match (min, max) {
		(Some(min), Some(max)) => Some(format!("{field}:[{min}..{max}]")),
		(Some(min), None) => Some(format!("{field}:>={min}")),
		(None, Some(max)) => Some(format!("{field}:<={max}")),
		(None, None) => None,
	}
}

fn format_number(value: f64) -> String {
	if value.fract() == 0.0 && value.abs() < i64::MAX as f64 {
		format!("{}", value as i64)
	} else {
		value.to_string()
	}
}

fn epoch_seconds(field: &str, raw: &str) -> Result<i64> {
	let date = Date::parse(raw, &ISO_DATE).map_err(|_| Error::InvalidRequest {
		message: format!("Invalid date {raw:?} for filter field {field}."),
	})?;

	Ok(date.midnight().assume_utc().unix_timestamp())
}
