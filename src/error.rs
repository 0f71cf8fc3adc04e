//! Client-level error types shared across authentication, dispatch, and retries.

// self
use crate::{_prelude::*, config::ConfigBuildError, obs::Operation, retry::TokenSignal};

/// Client-wide result type alias returning [`Error`] by default.
pub type Result<T, E = Error> = std::result::Result<T, E>;

type BoxError = Box<dyn std::error::Error + Send + Sync>;

/// Canonical client error exposed by public APIs.
#[derive(Debug, ThisError)]
pub enum Error {
	/// Local configuration problem.
	#[error(transparent)]
	Config(#[from] ConfigError),
	/// Transport failure (DNS, TCP, TLS, timeout).
	#[error(transparent)]
	Transport(#[from] TransportError),
	/// Response body could not be decoded.
	#[error(transparent)]
	Decode(#[from] DecodeError),

	/// Token endpoint refused to issue a bearer token.
	#[error("Token endpoint rejected the client credentials: {reason}.")]
	AuthenticationRejected {
		/// HTTP status code returned by the token endpoint.
		status: u16,
		/// Provider error code, when the body carried one.
		code: Option<String>,
		/// Provider- or client-supplied reason string.
		reason: String,
	},
	/// Provider kept rejecting the bearer token after every permitted attempt.
	#[error("The {operation} call was rejected with an invalid token after {attempts} attempt(s) ({signal}).")]
	TokenInvalid {
		/// Operation that exhausted its attempts.
		operation: Operation,
		/// Number of attempts issued.
		attempts: u32,
		/// Last token-invalid signal observed.
		signal: TokenSignal,
	},
	/// Caller cancelled the call.
	#[error("The call was cancelled.")]
	Cancelled,
	/// Caller deadline elapsed before the call completed.
	#[error("The call deadline elapsed.")]
	DeadlineExceeded,
}

/// Configuration and request-construction failures raised by the client.
#[derive(Debug, ThisError)]
pub enum ConfigError {
	/// HTTP client could not be constructed.
	#[error("HTTP client could not be constructed.")]
	HttpClientBuild {
		/// Underlying transport builder failure.
		#[source]
		source: BoxError,
	},
	/// HTTP request construction failed.
	#[error(transparent)]
	HttpRequest(#[from] oauth2::http::Error),
	/// Configuration values failed validation.
	#[error(transparent)]
	Invalid(#[from] ConfigBuildError),
	/// Endpoint URL could not be derived from the base URL.
	#[error("Endpoint `{path}` cannot be joined onto the base URL.")]
	InvalidEndpoint {
		/// Path that failed to join.
		path: String,
		/// Underlying parsing failure.
		#[source]
		source: url::ParseError,
	},
	/// Request payload could not be serialized.
	#[error("Request payload for {operation} could not be serialized.")]
	RequestEncode {
		/// Operation whose payload failed.
		operation: Operation,
		/// Underlying serializer failure.
		#[source]
		source: serde_json::Error,
	},
	/// Signing timestamp could not be rendered.
	#[error("Signing timestamp could not be formatted.")]
	Timestamp(#[from] time::error::Format),
	/// HMAC key was rejected.
	#[error("API secret cannot be used as an HMAC key.")]
	SigningKey,
	/// Endpoint requires identifiers that were not configured.
	#[error("The {operation} endpoint requires `{field}` to be configured.")]
	MissingEndpointField {
		/// Operation that requires the field.
		operation: Operation,
		/// Missing configuration field.
		field: &'static str,
	},
}
impl ConfigError {
	/// Wraps a transport's builder failure inside [`ConfigError`].
	pub fn http_client_build(src: impl 'static + Send + Sync + std::error::Error) -> Self {
		Self::HttpClientBuild { source: Box::new(src) }
	}
}
#[cfg(feature = "reqwest")]
impl From<ReqwestError> for ConfigError {
	fn from(e: ReqwestError) -> Self {
		Self::http_client_build(e)
	}
}

/// Response decoding failures.
#[derive(Debug, ThisError)]
pub enum DecodeError {
	/// Response body was not the JSON shape the operation expects.
	#[error("The {operation} response (HTTP {status}) is malformed at `{}`.", .source.path())]
	Json {
		/// Operation whose response failed to decode.
		operation: Operation,
		/// HTTP status code of the response.
		status: u16,
		/// Structured parsing failure.
		#[source]
		source: serde_path_to_error::Error<serde_json::Error>,
	},
}

/// Transport-level failures (network, IO).
#[derive(Debug, ThisError)]
pub enum TransportError {
	/// Underlying HTTP client reported a network failure.
	#[error("Network error occurred while calling the {operation} endpoint.")]
	Network {
		/// Operation in flight.
		operation: Operation,
		/// Transport-specific network error.
		#[source]
		source: BoxError,
	},
	/// Underlying HTTP client gave up waiting for the provider.
	#[error("Request timed out while calling the {operation} endpoint.")]
	Timeout {
		/// Operation in flight.
		operation: Operation,
		/// Transport-specific timeout error.
		#[source]
		source: BoxError,
	},
	/// Underlying IO failure surfaced during transport.
	#[error("I/O error occurred while calling the endpoint.")]
	Io(#[from] std::io::Error),
	/// Transport failed without a structured error.
	#[error("HTTP client error occurred while calling the {operation} endpoint: {message}.")]
	Other {
		/// Operation in flight.
		operation: Operation,
		/// Transport-supplied message.
		message: String,
	},
}
impl TransportError {
	/// Wraps a transport-specific network error.
	pub fn network(operation: Operation, src: impl 'static + Send + Sync + StdError) -> Self {
		Self::Network { operation, source: Box::new(src) }
	}

	/// Wraps a transport-specific timeout.
	pub fn timeout(operation: Operation, src: impl 'static + Send + Sync + StdError) -> Self {
		Self::Timeout { operation, source: Box::new(src) }
	}
}

#[cfg(test)]
mod tests {
	// std
	use std::error::Error as StdError;
	// self
	use super::*;

	#[test]
	fn decode_error_reports_failing_path() {
		let mut de = serde_json::Deserializer::from_str("{\"ErrorCode\":7}");
		let source = serde_path_to_error::deserialize::<_, crate::dto::ProviderError>(&mut de)
			.expect_err("Numeric error codes should not decode.");
		let err: Error =
			DecodeError::Json { operation: Operation::FundTransfer, status: 200, source }.into();

		assert!(matches!(err, Error::Decode(_)));
		assert!(err.to_string().contains("ErrorCode"), "{err}");
		assert!(StdError::source(&err).is_some());
	}

	#[test]
	fn token_invalid_mentions_attempts() {
		let err = Error::TokenInvalid {
			operation: Operation::BalanceInformation,
			attempts: 2,
			signal: TokenSignal::Unauthorized,
		};

		assert_eq!(
			err.to_string(),
			"The balance_information call was rejected with an invalid token after 2 attempt(s) (HTTP 401)."
		);
	}
}
