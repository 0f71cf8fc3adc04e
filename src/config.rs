//! Immutable client configuration and the builder that validates it.
//!
//! A [`Config`] bundles the OAuth2 client credentials, the API key/secret pair used for request
//! signatures, the provider base URL, and the corporate identifiers that business endpoints embed
//! in their paths. Values are supplied once at construction and never mutated afterwards.

/// Builder API for assembling client configuration.
pub mod builder;

pub use builder::*;

// std
use std::path::PathBuf;
// self
use crate::{_prelude::*, auth::Secret, error::ConfigError, retry::RetryPolicy};

/// Token endpoint path used by the provider.
pub const DEFAULT_TOKEN_PATH: &str = "/api/oauth/token";

/// Rollover schedule of the JSON log file.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum LogRotation {
	/// New file every hour.
	Hourly,
	/// New file every day.
	#[default]
	Daily,
	/// Single file, never rolled.
	Never,
}

/// Validated configuration consumed by [`BcaClient`](crate::client::BcaClient).
#[derive(Clone, Debug)]
pub struct Config {
	/// OAuth2 client identifier.
	pub client_id: String,
	/// OAuth2 client secret.
	pub client_secret: Secret,
	/// API key sent in the `X-BCA-Key` header.
	pub api_key: String,
	/// API secret used as the HMAC key for request signatures.
	pub api_secret: Secret,
	/// Provider base URL (scheme, host, optional path prefix).
	pub base_url: Url,
	/// Originating host sent in the `Origin` header.
	pub origin_host: String,
	/// Corporate identifier embedded in banking paths and transfer payloads.
	pub corporate_id: String,
	/// Channel identifier required by domestic transfers.
	pub channel_id: Option<String>,
	/// Credential identifier required by domestic transfers.
	pub credential_id: Option<String>,
	/// Destination file for JSON logs, when installed via the `subscriber` feature.
	pub log_path: Option<PathBuf>,
	/// How often the log file at [`Config::log_path`] is rolled over.
	pub log_rotation: LogRotation,
	/// Number of rolled log files kept on disk; `None` keeps all of them.
	pub log_max_files: Option<usize>,
	/// Offset applied to signing timestamps.
	pub utc_offset: UtcOffset,
	/// Token endpoint path relative to the base URL.
	pub token_path: String,
	/// Business-level retry policy.
	pub retry: RetryPolicy,
}
impl Config {
	/// Returns a builder with defaults for every optional field.
	pub fn builder() -> ConfigBuilder {
		ConfigBuilder::default()
	}

	/// Resolves `path_and_query` (for example `/fire/accounts` or `/x?a=1`) against the base URL.
	///
	/// Any path prefix carried by the base URL is preserved.
	pub fn endpoint(&self, path_and_query: &str) -> Result<Url, ConfigError> {
		let base = self.base_url.as_str().trim_end_matches('/');
		let suffix = path_and_query.trim_start_matches('/');

		Url::parse(&format!("{base}/{suffix}"))
			.map_err(|source| ConfigError::InvalidEndpoint { path: path_and_query.into(), source })
	}

	/// Builds the outbound URL for unencoded path `segments` and `query` pairs.
	///
	/// Segments are percent-encoded one by one after any base-URL prefix, and the query is
	/// form-encoded, so separators inside a value never split it.
	pub fn resolve(
		&self,
		segments: &[String],
		query: &[(String, String)],
	) -> Result<Url, ConfigError> {
		let mut url = self.base_url.clone();

		url.set_query(None);
		url.set_fragment(None);
		url.path_segments_mut()
			.map_err(|()| ConfigBuildError::InvalidBaseUrl {
				url: self.base_url.to_string(),
				reason: "URL cannot carry a path".into(),
			})?
			.pop_if_empty()
			.extend(segments);

		if !query.is_empty() {
			let mut pairs = url.query_pairs_mut();

			for (key, value) in query {
				pairs.append_pair(key, value);
			}
		}

		Ok(url)
	}

	/// Returns the encoded path and query of `url` relative to the base URL.
	///
	/// This is the form that enters the string-to-sign; a base-URL prefix such as `/gateway` is
	/// sent but not signed.
	pub fn relative_path_and_query(&self, url: &Url) -> String {
		let prefix = self.base_url.path().trim_end_matches('/');
		let path =
			url.path().strip_prefix(prefix).filter(|p| p.starts_with('/')).unwrap_or(url.path());

		match url.query() {
			Some(query) if !query.is_empty() => format!("{path}?{query}"),
			_ => path.to_owned(),
		}
	}
}
