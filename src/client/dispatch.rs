//! Single signed request/response exchange.

// crates.io
use oauth2::{
	HttpRequest, HttpResponse,
	http::{
		Method, Request, StatusCode,
		header::{ACCEPT, AUTHORIZATION, CONTENT_TYPE, ORIGIN},
	},
};
// self
use crate::{
	_prelude::*,
	client::BcaClient,
	context::CallContext,
	error::{ConfigError, DecodeError},
	http::{BankHttpClient, TransportErrorMapper},
	obs::{self, Operation},
	signature,
};

/// Header carrying the API key.
pub const HEADER_API_KEY: &str = "X-BCA-Key";
/// Header carrying the signing timestamp.
pub const HEADER_TIMESTAMP: &str = "X-BCA-Timestamp";
/// Header carrying the request signature.
pub const HEADER_SIGNATURE: &str = "X-BCA-Signature";
/// Header carrying the channel identifier.
pub const HEADER_CHANNEL_ID: &str = "ChannelID";
/// Header carrying the credential identifier.
pub const HEADER_CREDENTIAL_ID: &str = "CredentialID";

/// Business request before signing.
///
/// Built once per operation and replayed unchanged on every attempt; the token, timestamp, and
/// signature are recomputed each time it is sent. Path segments and query pairs are kept
/// unencoded and only percent-encoded when the URL is resolved, so the signed path is always the
/// one that goes on the wire.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ApiRequest {
	/// HTTP method.
	pub method: Method,
	/// Path segments relative to the base URL, unencoded.
	pub segments: Vec<String>,
	/// Query parameters in send order, unencoded.
	pub query: Vec<(String, String)>,
	/// Extra headers sent after the standard ones.
	pub headers: Vec<(&'static str, String)>,
	/// Raw body; empty for `GET`.
	pub body: String,
}
impl ApiRequest {
	/// Creates a request with an empty body.
	pub fn new<I>(method: Method, segments: I) -> Self
	where
		I: IntoIterator,
		I::Item: Into<String>,
	{
		Self {
			method,
			segments: segments.into_iter().map(Into::into).collect(),
			query: Vec::new(),
			headers: Vec::new(),
			body: String::new(),
		}
	}

	/// Creates a `GET` request.
	pub fn get<I>(segments: I) -> Self
	where
		I: IntoIterator,
		I::Item: Into<String>,
	{
		Self::new(Method::GET, segments)
	}

	/// Creates a `POST` request whose body is `payload` encoded as JSON.
	pub fn post_json<I, B>(operation: Operation, segments: I, payload: &B) -> Result<Self, ConfigError>
	where
		I: IntoIterator,
		I::Item: Into<String>,
		B: ?Sized + Serialize,
	{
		let body = serde_json::to_string(payload)
			.map_err(|source| ConfigError::RequestEncode { operation, source })?;

		Ok(Self { body, ..Self::new(Method::POST, segments) })
	}

	/// Appends a query parameter.
	pub fn with_query(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
		self.query.push((key.into(), value.into()));

		self
	}

	/// Appends an extra header.
	pub fn with_header(mut self, name: &'static str, value: impl Into<String>) -> Self {
		self.headers.push((name, value.into()));

		self
	}
}

/// Result of one dispatched request.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Reply<T> {
	/// Provider answered HTTP 401; the body is not decoded.
	Unauthorized,
	/// Body decoded into the caller's shape, whatever its status.
	Decoded {
		/// HTTP status code.
		status: u16,
		/// Decoded payload.
		payload: T,
	},
}

impl<C, M> BcaClient<C, M>
where
	C: ?Sized + BankHttpClient,
	M: ?Sized + TransportErrorMapper<C::TransportError>,
{
	/// Signs and sends `request` once with the current session, then decodes the response.
	///
	/// No retry decision is made here; see [`BcaClient::execute`].
	pub async fn dispatch<T>(
		&self,
		ctx: &CallContext,
		operation: Operation,
		request: &ApiRequest,
	) -> Result<Reply<T>>
	where
		T: DeserializeOwned,
	{
		ctx.check()?;

		let session = self.store.current();
		let url = self.config.resolve(&request.segments, &request.query)?;
		let signed_path = self.config.relative_path_and_query(&url);
		let timestamp = signature::format_timestamp(
			OffsetDateTime::now_utc().to_offset(self.config.utc_offset),
		)?;
		let signed = signature::sign(
			self.config.api_secret.expose(),
			request.method.as_str(),
			&signed_path,
			session.access_token.expose(),
			&request.body,
			&timestamp,
		)?;
		let mut builder = Request::builder()
			.method(request.method.clone())
			.uri(url.as_str())
			.header(CONTENT_TYPE, "application/json")
			.header(ACCEPT, "application/json")
			.header(AUTHORIZATION, format!("Bearer {}", session.access_token.expose()))
			.header(ORIGIN, self.config.origin_host.as_str())
			.header(HEADER_API_KEY, self.config.api_key.as_str())
			.header(HEADER_TIMESTAMP, timestamp.as_str())
			.header(HEADER_SIGNATURE, signed.signature.as_str());

		for (name, value) in &request.headers {
			builder = builder.header(*name, value.as_str());
		}

		let http_request =
			builder.body(request.body.clone().into_bytes()).map_err(ConfigError::from)?;

		obs::echo_request(request.method.as_str(), &url, &request.body);

		let response = self.send(ctx, operation, http_request).await?;
		let status = response.status();

		obs::echo_response(status.as_u16(), response.body());

		if status == StatusCode::UNAUTHORIZED {
			return Ok(Reply::Unauthorized);
		}

		let payload = decode(operation, status.as_u16(), response.body())?;

		Ok(Reply::Decoded { status: status.as_u16(), payload })
	}

	pub(crate) async fn send(
		&self,
		ctx: &CallContext,
		operation: Operation,
		request: HttpRequest,
	) -> Result<HttpResponse> {
		ctx.run(self.http_client.execute(request))
			.await?
			.map_err(|e| self.transport_mapper.map_transport_error(operation, e))
	}
}

pub(crate) fn decode<T>(operation: Operation, status: u16, body: &[u8]) -> Result<T, DecodeError>
where
	T: DeserializeOwned,
{
	let mut de = serde_json::Deserializer::from_slice(body);

	serde_path_to_error::deserialize(&mut de)
		.map_err(|source| DecodeError::Json { operation, status, source })
}
