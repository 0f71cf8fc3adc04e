//! Transport primitives for signed provider calls.
//!
//! [`BankHttpClient`] is the client's only dependency on an HTTP stack: it sends one fully built
//! request and hands back the status, headers, and body bytes. Transport-level retries (for
//! example on refused connections) belong to the implementation and are independent of the
//! business-level [`RetryPolicy`](crate::retry::RetryPolicy). [`TransportErrorMapper`] turns the
//! implementation's errors into [`Error`] values tagged with the operation in flight.

// crates.io
use oauth2::{HttpClientError, HttpRequest, HttpResponse};
// self
use crate::{
	_prelude::*,
	error::{ConfigError, TransportError},
	obs::Operation,
};

/// Boxed future returned by [`BankHttpClient::execute`].
pub type HttpFuture<'a, E> =
	Pin<Box<dyn Future<Output = Result<HttpResponse, HttpClientError<E>>> + 'a + Send>>;

/// Abstraction over HTTP transports able to execute signed provider requests.
///
/// Implementations must be `Send + Sync + 'static` so one transport can be shared by every clone
/// of a client, and the returned future must be `Send` so calls can hop executors.
pub trait BankHttpClient
where
	Self: 'static + Send + Sync,
{
	/// Concrete error emitted by the underlying transport.
	type TransportError: 'static + Send + Sync + StdError;

	/// Sends `request` and returns the complete response.
	///
	/// Non-2xx statuses are responses, not errors.
	fn execute(&self, request: HttpRequest) -> HttpFuture<'_, Self::TransportError>;
}

/// Maps transport errors into client [`Error`] values.
pub trait TransportErrorMapper<E>
where
	Self: 'static + Send + Sync,
	E: 'static + Send + Sync + StdError,
{
	/// Converts an [`HttpClientError`] emitted while running `operation`.
	fn map_transport_error(&self, operation: Operation, error: HttpClientError<E>) -> Error;
}

/// Default number of transport-level retries on connection failures.
pub const DEFAULT_TRANSPORT_RETRIES: u32 = 1;

/// Pooled reqwest transport that retries requests which never reached the provider.
///
/// Only connection failures are retried; once the request may have been received the error is
/// returned as-is, so business calls are never silently duplicated. Redirects are not followed.
#[cfg(feature = "reqwest")]
#[derive(Clone, Debug)]
pub struct ReqwestHttpClient {
	client: ReqwestClient,
	max_retries: u32,
}
#[cfg(feature = "reqwest")]
impl ReqwestHttpClient {
	/// Builds a pooled client that does not follow redirects.
	pub fn new() -> Result<Self, ConfigError> {
		let client = ReqwestClient::builder().redirect(reqwest::redirect::Policy::none()).build()?;

		Ok(Self::with_client(client))
	}

	/// Wraps an existing reqwest [`ReqwestClient`].
	pub fn with_client(client: ReqwestClient) -> Self {
		Self { client, max_retries: DEFAULT_TRANSPORT_RETRIES }
	}

	/// Overrides the number of transport-level retries.
	pub fn with_max_retries(mut self, max_retries: u32) -> Self {
		self.max_retries = max_retries;

		self
	}

	/// Returns the number of transport-level retries.
	pub fn max_retries(&self) -> u32 {
		self.max_retries
	}
}
#[cfg(feature = "reqwest")]
impl AsRef<ReqwestClient> for ReqwestHttpClient {
	fn as_ref(&self) -> &ReqwestClient {
		&self.client
	}
}
#[cfg(feature = "reqwest")]
impl BankHttpClient for ReqwestHttpClient {
	type TransportError = ReqwestError;

	fn execute(&self, request: HttpRequest) -> HttpFuture<'_, Self::TransportError> {
		Box::pin(async move {
			let request: reqwest::Request = request.try_into().map_err(Box::new)?;
			let mut retries_left = self.max_retries;
			let response = loop {
				let Some(attempt) = request.try_clone() else {
					break self.client.execute(request).await.map_err(Box::new)?;
				};

				match self.client.execute(attempt).await {
					Ok(response) => break response,
					Err(e) if e.is_connect() && retries_left > 0 => retries_left -= 1,
					Err(e) => return Err(Box::new(e).into()),
				}
			};
			let status = response.status();
			let headers = response.headers().to_owned();
			let mut response_new =
				HttpResponse::new(response.bytes().await.map_err(Box::new)?.to_vec());

			*response_new.status_mut() = status;
			*response_new.headers_mut() = headers;

			Ok(response_new)
		})
	}
}

/// Default mapper for reqwest-backed transports.
#[cfg(feature = "reqwest")]
#[derive(Clone, Debug, Default)]
pub struct ReqwestTransportErrorMapper;
#[cfg(feature = "reqwest")]
impl TransportErrorMapper<ReqwestError> for ReqwestTransportErrorMapper {
	fn map_transport_error(
		&self,
		operation: Operation,
		error: HttpClientError<ReqwestError>,
	) -> Error {
		match error {
			HttpClientError::Reqwest(inner) => map_reqwest_error(operation, *inner),
			other => map_generic_error(operation, other),
		}
	}
}

/// Mapper for custom transports whose errors carry no reqwest-specific structure.
///
/// Every transport error becomes [`TransportError::Network`].
#[derive(Clone, Debug, Default)]
pub struct GenericTransportErrorMapper;
impl<E> TransportErrorMapper<E> for GenericTransportErrorMapper
where
	E: 'static + Send + Sync + StdError,
{
	fn map_transport_error(&self, operation: Operation, error: HttpClientError<E>) -> Error {
		match error {
			HttpClientError::Reqwest(inner) => TransportError::Network { operation, source: inner }.into(),
			other => map_generic_error(operation, other),
		}
	}
}

#[cfg(feature = "reqwest")]
fn map_reqwest_error(operation: Operation, err: ReqwestError) -> Error {
	if err.is_builder() {
		return ConfigError::from(err).into();
	}
	if err.is_timeout() {
		return TransportError::timeout(operation, err).into();
	}

	TransportError::network(operation, err).into()
}

fn map_generic_error<E>(operation: Operation, error: HttpClientError<E>) -> Error
where
	E: 'static + Send + Sync + StdError,
{
	match error {
		HttpClientError::Reqwest(inner) => TransportError::Network { operation, source: inner }.into(),
		HttpClientError::Http(inner) => ConfigError::from(inner).into(),
		HttpClientError::Io(inner) => TransportError::Io(inner).into(),
		HttpClientError::Other(message) => TransportError::Other { operation, message }.into(),
		_ => TransportError::Other { operation, message: "unknown transport failure".into() }.into(),
	}
}
