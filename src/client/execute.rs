// self
use crate::{
	_prelude::*,
	client::{ApiRequest, BcaClient, Reply},
	context::CallContext,
	dto::HasProviderError,
	http::{BankHttpClient, TransportErrorMapper},
	obs::{self, Operation, OperationSpan, Outcome},
	retry::{self, RetryEvent, RetryMachine, Step, TokenSignal},
};

impl<C, M> BcaClient<C, M>
where
	C: ?Sized + BankHttpClient,
	M: ?Sized + TransportErrorMapper<C::TransportError>,
{
	/// Sends `request`, re-authenticating and replaying it while the provider rejects the token.
	///
	/// - Transport, decode, and cancellation failures return immediately.
	/// - HTTP 401 and the configured token-invalid codes trigger a re-authentication (after the
	///   policy's backoff), then a replay while the attempt budget lasts. Once the budget is
	///   spent the call fails with [`Error::TokenInvalid`]; a failing re-authentication replaces
	///   that error with its own.
	/// - Every other payload, business errors included, is returned as-is.
	pub async fn execute<T>(
		&self,
		ctx: &CallContext,
		operation: Operation,
		request: ApiRequest,
	) -> Result<T>
	where
		T: DeserializeOwned + HasProviderError,
	{
		let span = OperationSpan::new(operation);

		obs::record_outcome(operation, Outcome::Attempt);

		let result = span
			.instrument(async {
				obs::log_start(operation);

				let policy = &self.config.retry;
				let mut machine = RetryMachine::new(policy);

				loop {
					let attempt = machine.attempt();

					span.record_attempt(attempt);
					span.record_session(&self.store.session_id());

					let signal = match self.dispatch::<T>(ctx, operation, &request).await {
						Ok(Reply::Unauthorized) => TokenSignal::Unauthorized,
						Ok(Reply::Decoded { payload, .. }) => match retry::classify(policy, &payload) {
							Some(signal) => signal,
							None => {
								machine.advance(RetryEvent::Accepted);

								return Ok(payload);
							},
						},
						Err(e) => {
							machine.advance(RetryEvent::Failed);

							return Err(e);
						},
					};
					let backoff = policy.backoff_for(&signal);
					let step = machine.advance(RetryEvent::TokenInvalid(signal.clone()));

					obs::record_outcome(operation, Outcome::Reauthenticate);
					obs::log_reauthenticate(operation, attempt, &signal);

					if !backoff.is_zero() {
						ctx.run(tokio::time::sleep(backoff)).await?;
					}

					self.authenticate(ctx).await?;

					if step != (Step::Reauthenticate { retry: true }) {
						return Err(Error::TokenInvalid { operation, attempts: attempt, signal });
					}
				}
			})
			.await;

		span.in_scope(|| match &result {
			Ok(_) => {
				obs::record_outcome(operation, Outcome::Success);
				obs::log_end(operation, true);
			},
			Err(e) => {
				obs::record_outcome(operation, Outcome::Failure);
				obs::log_failure(operation, e);
				obs::log_end(operation, false);
			},
		});

		result
	}
}
