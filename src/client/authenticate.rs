// crates.io
use base64::{Engine, prelude::BASE64_STANDARD};
use oauth2::http::{
	Method, Request,
	header::{ACCEPT, AUTHORIZATION, CONTENT_TYPE},
};
// self
use crate::{
	_prelude::*,
	auth::SessionId,
	client::{BcaClient, dispatch},
	context::CallContext,
	dto::{AuthToken, HasProviderError},
	error::ConfigError,
	http::{BankHttpClient, TransportErrorMapper},
	obs::{self, Operation, OperationSpan, Outcome},
};

const CLIENT_CREDENTIALS_FORM: &str = "grant_type=client_credentials";

impl<C, M> BcaClient<C, M>
where
	C: ?Sized + BankHttpClient,
	M: ?Sized + TransportErrorMapper<C::TransportError>,
{
	/// Exchanges the client credentials for a bearer token and publishes it as the new session.
	///
	/// The session, with a freshly minted correlation identifier, is only replaced when the token
	/// endpoint answers 2xx with a non-empty token and no error code. Every failure leaves the
	/// previous session untouched.
	pub async fn authenticate(&self, ctx: &CallContext) -> Result<AuthToken> {
		const OPERATION: Operation = Operation::Authenticate;

		let span = OperationSpan::new(OPERATION);

		obs::record_outcome(OPERATION, Outcome::Attempt);

		let result = span
			.instrument(async {
				span.record_session(&self.store.session_id());
				obs::log_start(OPERATION);
				ctx.check()?;

				let url = self.config.endpoint(&self.config.token_path)?;
				let credentials = BASE64_STANDARD.encode(format!(
					"{}:{}",
					self.config.client_id,
					self.config.client_secret.expose()
				));
				let request = Request::builder()
					.method(Method::POST)
					.uri(url.as_str())
					.header(AUTHORIZATION, format!("Basic {credentials}"))
					.header(CONTENT_TYPE, "application/x-www-form-urlencoded")
					.header(ACCEPT, "application/json")
					.body(CLIENT_CREDENTIALS_FORM.as_bytes().to_vec())
					.map_err(ConfigError::from)?;

				obs::echo_request(Method::POST.as_str(), &url, CLIENT_CREDENTIALS_FORM);

				let response = self.send(ctx, OPERATION, request).await?;
				let status = response.status();
				let token = match dispatch::decode::<AuthToken>(OPERATION, status.as_u16(), response.body())
				{
					Ok(token) => token,
					Err(_) if !status.is_success() =>
						return Err(Error::AuthenticationRejected {
							status: status.as_u16(),
							code: None,
							reason: format!("HTTP {}", status.as_u16()),
						}),
					Err(e) => return Err(e.into()),
				};

				obs::echo_decoded(status.as_u16(), &token);

				if token.has_provider_error() {
					return Err(Error::AuthenticationRejected {
						status: status.as_u16(),
						code: Some(token.error.error_code.clone()),
						reason: token.error.to_string(),
					});
				}
				if !status.is_success() {
					return Err(Error::AuthenticationRejected {
						status: status.as_u16(),
						code: None,
						reason: format!("HTTP {}", status.as_u16()),
					});
				}
				if token.access_token.is_empty() {
					return Err(Error::AuthenticationRejected {
						status: status.as_u16(),
						code: None,
						reason: "the response carried no access token".into(),
					});
				}

				let session_id = SessionId::generate();

				span.record_session(&session_id);
				self.store.set(token.access_token.clone(), session_id);

				Ok(token)
			})
			.await;

		span.in_scope(|| match &result {
			Ok(_) => {
				obs::record_outcome(OPERATION, Outcome::Success);
				obs::log_end(OPERATION, true);
			},
			Err(e) => {
				obs::record_outcome(OPERATION, Outcome::Failure);
				obs::log_failure(OPERATION, e);
				obs::log_end(OPERATION, false);
			},
		});

		result
	}
}
