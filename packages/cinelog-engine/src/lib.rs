mod error;

pub use error::{Error, Result};

use std::time::Duration;

use reqwest::{
	Client,
	header::{HeaderMap, HeaderName, HeaderValue},
};
use serde_json::Value;

const API_KEY_HEADER: &str = "x-typesense-api-key";

/// One engine search request. Field names match the engine's query grammar;
/// the struct serializes directly into query parameters (single search) or a
/// `searches` entry (multi-search batch).
#[derive(Debug, Clone, serde::Serialize)]
pub struct SearchParams {
	pub q: String,
	pub query_by: String,
	pub page: u32,
	pub per_page: u32,
	pub sort_by: String,
	#[serde(skip_serializing_if = "Option::is_none")]
	pub filter_by: Option<String>,
}

#[derive(Debug, Clone, serde::Serialize)]
pub struct MultiSearchEntry {
	pub collection: String,
	#[serde(flatten)]
	pub params: SearchParams,
}

#[derive(Debug, Clone)]
pub struct EngineHit {
	pub document: Value,
	pub text_match: f64,
}

#[derive(Debug, Clone)]
pub struct EngineResponse {
	/// Total hit count reported by the engine, not the page size.
	pub found: u64,
	pub hits: Vec<EngineHit>,
}

#[derive(Debug, Clone)]
pub struct TypesenseClient {
	http: Client,
	base_url: String,
	api_key: String,
}
impl TypesenseClient {
	pub fn new(cfg: &cinelog_config::Typesense) -> Result<Self> {
		let http = Client::builder().timeout(Duration::from_millis(cfg.timeout_ms)).build()?;

		Ok(Self { http, base_url: cfg.url.clone(), api_key: cfg.api_key.clone() })
	}

	pub async fn search(&self, collection: &str, params: &SearchParams) -> Result<EngineResponse> {
		let url = format!("{}/collections/{collection}/documents/search", self.base_url);
		let res =
			self.http.get(url).headers(self.auth_headers()?).query(params).send().await?;
		let json: Value = res.error_for_status()?.json().await?;

		parse_search_response(&json)
	}

	/// Submits every entry as one batched call so the engine parallelizes
	/// them server-side. The response array preserves submission order.
	pub async fn multi_search(&self, searches: &[MultiSearchEntry]) -> Result<Vec<EngineResponse>> {
		let url = format!("{}/multi_search", self.base_url);
		let body = serde_json::json!({ "searches": searches });
		let res = self.http.post(url).headers(self.auth_headers()?).json(&body).send().await?;
		let json: Value = res.error_for_status()?.json().await?;

		parse_multi_search_response(&json, searches.len())
	}

	fn auth_headers(&self) -> Result<HeaderMap> {
		let mut headers = HeaderMap::new();
		let value = HeaderValue::from_str(&self.api_key)
			.map_err(|err| Error::InvalidHeader { message: err.to_string() })?;

		headers.insert(HeaderName::from_static(API_KEY_HEADER), value);

		Ok(headers)
	}
}

fn parse_search_response(json: &Value) -> Result<EngineResponse> {
	let found = json.get("found").and_then(Value::as_u64).ok_or_else(|| {
		Error::UnexpectedResponse { message: "Search response is missing found.".to_string() }
	})?;
	let raw_hits = json.get("hits").and_then(Value::as_array).ok_or_else(|| {
		Error::UnexpectedResponse { message: "Search response is missing hits.".to_string() }
	})?;
	let mut hits = Vec::with_capacity(raw_hits.len());

	for hit in raw_hits {
		let document = hit.get("document").cloned().ok_or_else(|| Error::UnexpectedResponse {
			message: "Search hit is missing document.".to_string(),
		})?;
		// The engine omits text_match for wildcard queries.
		let text_match = hit.get("text_match").and_then(Value::as_f64).unwrap_or(0.0);

		hits.push(EngineHit { document, text_match });
	}

	Ok(EngineResponse { found, hits })
}

fn parse_multi_search_response(json: &Value, expected: usize) -> Result<Vec<EngineResponse>> {
	let entries = json.get("results").and_then(Value::as_array).ok_or_else(|| {
		Error::UnexpectedResponse { message: "Multi-search response is missing results.".to_string() }
	})?;

	if entries.len() != expected {
		return Err(Error::UnexpectedResponse {
			message: format!(
				"Multi-search returned {} results for {expected} submitted searches.",
				entries.len()
			),
		});
	}

	entries
		.iter()
		.map(|entry| {
			if let Some(message) = entry.get("error").and_then(Value::as_str) {
				return Err(Error::UnexpectedResponse {
					message: format!("Multi-search entry failed: {message}"),
				});
			}

			parse_search_response(entry)
		})
		.collect()
}
