//! Signed provider client.
//!
//! [`BcaClient`] owns the configuration, the shared [`TokenStore`], and the transport. Each
//! public operation builds an [`ApiRequest`] and hands it to [`BcaClient::execute`], which signs
//! and sends it through [`BcaClient::dispatch`], re-authenticating and replaying the call when
//! the provider rejects the bearer token.

pub mod dispatch;

mod authenticate;
mod banking;
mod execute;
mod fire;

pub use dispatch::*;

// self
use crate::{
	_prelude::*,
	config::Config,
	http::{BankHttpClient, TransportErrorMapper},
	store::{Session, TokenStore},
};
#[cfg(feature = "reqwest")]
use crate::{
	error::ConfigError,
	http::{ReqwestHttpClient, ReqwestTransportErrorMapper},
};

#[cfg(feature = "reqwest")]
/// Client specialized for the crate's default reqwest transport stack.
pub type ReqwestBcaClient = BcaClient<ReqwestHttpClient, ReqwestTransportErrorMapper>;

/// Client for the provider's corporate API.
///
/// Cloning is cheap and every clone shares the same session, so a token refreshed by one caller
/// is immediately used by the others. Concurrent re-authentications are not coalesced; the last
/// one to finish wins.
pub struct BcaClient<C, M>
where
	C: ?Sized + BankHttpClient,
	M: ?Sized + TransportErrorMapper<C::TransportError>,
{
	/// HTTP client used for every outbound provider request.
	pub http_client: Arc<C>,
	/// Mapper applied to transport-layer errors before surfacing them to callers.
	pub transport_mapper: Arc<M>,
	config: Arc<Config>,
	store: Arc<TokenStore>,
}
impl<C, M> BcaClient<C, M>
where
	C: ?Sized + BankHttpClient,
	M: ?Sized + TransportErrorMapper<C::TransportError>,
{
	/// Creates a client that reuses the caller-provided transport + mapper pair.
	pub fn with_http_client(
		config: Config,
		http_client: impl Into<Arc<C>>,
		mapper: impl Into<Arc<M>>,
	) -> Self {
		Self {
			http_client: http_client.into(),
			transport_mapper: mapper.into(),
			config: Arc::new(config),
			store: Default::default(),
		}
	}

	/// Returns the immutable configuration.
	pub fn config(&self) -> &Config {
		&self.config
	}

	/// Returns the shared session store.
	pub fn store(&self) -> &TokenStore {
		&self.store
	}

	/// Returns a snapshot of the current session.
	pub fn session(&self) -> Arc<Session> {
		self.store.current()
	}
}
#[cfg(feature = "reqwest")]
impl BcaClient<ReqwestHttpClient, ReqwestTransportErrorMapper> {
	/// Creates a client backed by a pooled reqwest transport.
	pub fn new(config: Config) -> Result<Self, ConfigError> {
		Ok(Self::with_http_client(config, ReqwestHttpClient::new()?, ReqwestTransportErrorMapper))
	}
}
impl<C, M> Clone for BcaClient<C, M>
where
	C: ?Sized + BankHttpClient,
	M: ?Sized + TransportErrorMapper<C::TransportError>,
{
	fn clone(&self) -> Self {
		Self {
			http_client: self.http_client.clone(),
			transport_mapper: self.transport_mapper.clone(),
			config: self.config.clone(),
			store: self.store.clone(),
		}
	}
}
impl<C, M> Debug for BcaClient<C, M>
where
	C: ?Sized + BankHttpClient,
	M: ?Sized + TransportErrorMapper<C::TransportError>,
{
	fn fmt(&self, f: &mut Formatter) -> FmtResult {
		f.debug_struct("BcaClient")
			.field("base_url", &self.config.base_url.as_str())
			.field("client_id", &self.config.client_id)
			.field("session_id", &self.store.session_id())
			.finish()
	}
}
