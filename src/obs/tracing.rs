// self
use crate::{_prelude::*, auth::SessionId, obs::Operation};

/// Maximum number of body characters echoed into a single log event.
pub const ECHO_PREVIEW_LIMIT: usize = 1_024;

/// Type alias that resolves to an instrumented future when tracing is enabled.
#[cfg(feature = "tracing")]
pub type InstrumentedOperation<F> = tracing::instrument::Instrumented<F>;
/// Passthrough future type when tracing is disabled.
#[cfg(not(feature = "tracing"))]
pub type InstrumentedOperation<F> = F;

/// Span wrapping one public client operation, retries included.
#[derive(Clone, Debug)]
pub struct OperationSpan {
	#[cfg(feature = "tracing")]
	span: tracing::Span,
}
impl OperationSpan {
	/// Creates a new span tagged with the provided operation.
	///
	/// `session_id` and `attempt` start empty and are filled in as the call progresses.
	pub fn new(operation: Operation) -> Self {
		#[cfg(feature = "tracing")]
		{
			let span = tracing::info_span!(
				"bca_api.operation",
				operation = operation.as_str(),
				session_id = tracing::field::Empty,
				attempt = tracing::field::Empty,
			);

			Self { span }
		}
		#[cfg(not(feature = "tracing"))]
		{
			let _ = operation;

			Self {}
		}
	}

	/// Records the correlation identifier of the session used by the current attempt.
	pub fn record_session(&self, session_id: &SessionId) {
		#[cfg(feature = "tracing")]
		{
			self.span.record("session_id", session_id.as_str());
		}
		#[cfg(not(feature = "tracing"))]
		{
			let _ = session_id;
		}
	}

	/// Records the 1-based attempt number.
	pub fn record_attempt(&self, attempt: u32) {
		#[cfg(feature = "tracing")]
		{
			self.span.record("attempt", attempt);
		}
		#[cfg(not(feature = "tracing"))]
		{
			let _ = attempt;
		}
	}

	/// Runs a synchronous closure inside the span.
	pub fn in_scope<F, R>(&self, f: F) -> R
	where
		F: FnOnce() -> R,
	{
		#[cfg(feature = "tracing")]
		{
			self.span.in_scope(f)
		}
		#[cfg(not(feature = "tracing"))]
		{
			f()
		}
	}

	/// Instruments an async block without holding a guard across `.await` points.
	pub fn instrument<Fut>(&self, fut: Fut) -> InstrumentedOperation<Fut>
	where
		Fut: Future,
	{
		#[cfg(feature = "tracing")]
		{
			use tracing::Instrument;

			fut.instrument(self.span.clone())
		}
		#[cfg(not(feature = "tracing"))]
		{
			fut
		}
	}
}

/// Emits the start marker of an operation.
pub fn log_start(operation: Operation) {
	#[cfg(feature = "tracing")]
	tracing::info!(operation = operation.as_str(), "start");
	#[cfg(not(feature = "tracing"))]
	let _ = operation;
}

/// Emits the end marker of an operation.
pub fn log_end(operation: Operation, ok: bool) {
	#[cfg(feature = "tracing")]
	tracing::info!(operation = operation.as_str(), ok, "end");
	#[cfg(not(feature = "tracing"))]
	let _ = (operation, ok);
}

/// Echoes an outbound request line and its body.
pub fn echo_request(method: &str, url: &Url, body: &str) {
	#[cfg(feature = "tracing")]
	tracing::debug!(method, url = url.as_str(), body = %truncate_preview(body), "request");
	#[cfg(not(feature = "tracing"))]
	let _ = (method, url, body);
}

/// Echoes an inbound response status and body.
pub fn echo_response(status: u16, body: &[u8]) {
	#[cfg(feature = "tracing")]
	tracing::debug!(
		status,
		body = %truncate_preview(&String::from_utf8_lossy(body)),
		"response"
	);
	#[cfg(not(feature = "tracing"))]
	let _ = (status, body);
}

/// Echoes a decoded payload through its `Debug` form, which keeps secrets redacted.
pub fn echo_decoded(status: u16, payload: &dyn Debug) {
	#[cfg(feature = "tracing")]
	tracing::debug!(status, payload = ?payload, "response");
	#[cfg(not(feature = "tracing"))]
	let _ = (status, payload);
}

/// Logs a token-invalid signal that will trigger a re-authentication.
pub fn log_reauthenticate(operation: Operation, attempt: u32, signal: &dyn Display) {
	#[cfg(feature = "tracing")]
	tracing::warn!(
		operation = operation.as_str(),
		attempt,
		signal = %signal,
		"token rejected, re-authenticating"
	);
	#[cfg(not(feature = "tracing"))]
	let _ = (operation, attempt, signal);
}

/// Logs an error that is about to be returned to the caller.
pub fn log_failure(operation: Operation, error: &Error) {
	#[cfg(feature = "tracing")]
	tracing::error!(operation = operation.as_str(), error = %error, "operation failed");
	#[cfg(not(feature = "tracing"))]
	let _ = (operation, error);
}

/// Truncates `body` to [`ECHO_PREVIEW_LIMIT`] characters.
pub fn truncate_preview(body: &str) -> String {
	match body.char_indices().nth(ECHO_PREVIEW_LIMIT) {
		Some((idx, _)) => format!("{}...", &body[..idx]),
		None => body.to_owned(),
	}
}
