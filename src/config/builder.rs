// std
use std::path::PathBuf;
// self
use crate::{
	_prelude::*,
	auth::Secret,
	config::{Config, DEFAULT_TOKEN_PATH, LogRotation},
	retry::RetryPolicy,
};

/// Errors raised while constructing or validating a [`Config`].
#[derive(Debug, PartialEq, Eq, ThisError)]
pub enum ConfigBuildError {
	/// A required field was never supplied or was blank.
	#[error("Missing required configuration field `{field}`.")]
	MissingField {
		/// Name of the missing field.
		field: &'static str,
	},
	/// Base URL could not be parsed.
	#[error("Base URL `{url}` is invalid: {reason}.")]
	InvalidBaseUrl {
		/// Raw URL that failed validation.
		url: String,
		/// Parser or validation reason.
		reason: String,
	},
	/// Retry policy must allow at least one attempt.
	#[error("The retry policy must allow at least one attempt.")]
	ZeroAttempts,
}

/// Builder for [`Config`] values.
#[derive(Debug, Default)]
pub struct ConfigBuilder {
	/// OAuth2 client identifier.
	pub client_id: Option<String>,
	/// OAuth2 client secret.
	pub client_secret: Option<Secret>,
	/// API key.
	pub api_key: Option<String>,
	/// API secret.
	pub api_secret: Option<Secret>,
	/// Raw provider base URL.
	pub base_url: Option<String>,
	/// Originating host.
	pub origin_host: Option<String>,
	/// Corporate identifier.
	pub corporate_id: Option<String>,
	/// Optional channel identifier.
	pub channel_id: Option<String>,
	/// Optional credential identifier.
	pub credential_id: Option<String>,
	/// Optional log destination.
	pub log_path: Option<PathBuf>,
	/// Optional log rollover schedule (defaults to daily).
	pub log_rotation: Option<LogRotation>,
	/// Optional cap on rolled log files kept.
	pub log_max_files: Option<usize>,
	/// Optional timestamp offset (defaults to UTC).
	pub utc_offset: Option<UtcOffset>,
	/// Optional token endpoint override.
	pub token_path: Option<String>,
	/// Optional retry policy override.
	pub retry: Option<RetryPolicy>,
}
impl ConfigBuilder {
	/// Sets the OAuth2 client identifier.
	pub fn client_id(mut self, value: impl Into<String>) -> Self {
		self.client_id = Some(value.into());

		self
	}

	/// Sets the OAuth2 client secret.
	pub fn client_secret(mut self, value: impl Into<Secret>) -> Self {
		self.client_secret = Some(value.into());

		self
	}

	/// Sets the API key.
	pub fn api_key(mut self, value: impl Into<String>) -> Self {
		self.api_key = Some(value.into());

		self
	}

	/// Sets the API secret used for signatures.
	pub fn api_secret(mut self, value: impl Into<Secret>) -> Self {
		self.api_secret = Some(value.into());

		self
	}

	/// Sets the provider base URL.
	pub fn base_url(mut self, value: impl Into<String>) -> Self {
		self.base_url = Some(value.into());

		self
	}

	/// Sets the `Origin` header value.
	pub fn origin_host(mut self, value: impl Into<String>) -> Self {
		self.origin_host = Some(value.into());

		self
	}

	/// Sets the corporate identifier.
	pub fn corporate_id(mut self, value: impl Into<String>) -> Self {
		self.corporate_id = Some(value.into());

		self
	}

	/// Sets the channel identifier used by domestic transfers.
	pub fn channel_id(mut self, value: impl Into<String>) -> Self {
		self.channel_id = Some(value.into());

		self
	}

	/// Sets the credential identifier used by domestic transfers.
	pub fn credential_id(mut self, value: impl Into<String>) -> Self {
		self.credential_id = Some(value.into());

		self
	}

	/// Sets the JSON log destination.
	pub fn log_path(mut self, value: impl Into<PathBuf>) -> Self {
		self.log_path = Some(value.into());

		self
	}

	/// Sets how often the log file rolls over.
	pub fn log_rotation(mut self, rotation: LogRotation) -> Self {
		self.log_rotation = Some(rotation);

		self
	}

	/// Caps the number of rolled log files kept on disk.
	pub fn log_max_files(mut self, count: usize) -> Self {
		self.log_max_files = Some(count);

		self
	}

	/// Overrides the offset used when rendering signing timestamps.
	pub fn utc_offset(mut self, offset: UtcOffset) -> Self {
		self.utc_offset = Some(offset);

		self
	}

	/// Overrides the token endpoint path.
	pub fn token_path(mut self, value: impl Into<String>) -> Self {
		self.token_path = Some(value.into());

		self
	}

	/// Overrides the business-level retry policy.
	pub fn retry(mut self, policy: RetryPolicy) -> Self {
		self.retry = Some(policy);

		self
	}

	/// Shorthand for overriding only the maximum attempt count.
	pub fn max_retry_attempts(mut self, attempts: u32) -> Self {
		self.retry = Some(self.retry.take().unwrap_or_default().with_max_attempts(attempts));

		self
	}

	/// Consumes the builder and validates the resulting configuration.
	pub fn build(self) -> Result<Config, ConfigBuildError> {
		let raw_url = required("base_url", self.base_url)?;
		let base_url = Url::parse(&raw_url).map_err(|e| ConfigBuildError::InvalidBaseUrl {
			url: raw_url.clone(),
			reason: e.to_string(),
		})?;

		if base_url.cannot_be_a_base() {
			return Err(ConfigBuildError::InvalidBaseUrl {
				url: raw_url,
				reason: "URL cannot carry a path".into(),
			});
		}

		let retry = self.retry.unwrap_or_default();

		if retry.max_attempts == 0 {
			return Err(ConfigBuildError::ZeroAttempts);
		}

		Ok(Config {
			client_id: required("client_id", self.client_id)?,
			client_secret: required_secret("client_secret", self.client_secret)?,
			api_key: required("api_key", self.api_key)?,
			api_secret: required_secret("api_secret", self.api_secret)?,
			base_url,
			origin_host: required("origin_host", self.origin_host)?,
			corporate_id: required("corporate_id", self.corporate_id)?,
			channel_id: self.channel_id.filter(|v| !v.trim().is_empty()),
			credential_id: self.credential_id.filter(|v| !v.trim().is_empty()),
			log_path: self.log_path,
			log_rotation: self.log_rotation.unwrap_or_default(),
			log_max_files: self.log_max_files.filter(|count| *count > 0),
			utc_offset: self.utc_offset.unwrap_or(UtcOffset::UTC),
			token_path: self.token_path.unwrap_or_else(|| DEFAULT_TOKEN_PATH.into()),
			retry,
		})
	}
}

fn required(field: &'static str, value: Option<String>) -> Result<String, ConfigBuildError> {
	value.filter(|v| !v.trim().is_empty()).ok_or(ConfigBuildError::MissingField { field })
}

fn required_secret(field: &'static str, value: Option<Secret>) -> Result<Secret, ConfigBuildError> {
	value.filter(|v| !v.is_empty()).ok_or(ConfigBuildError::MissingField { field })
}
