//! Per-call cancellation and deadline handling.

// std
use std::time::Duration as StdDuration;
// crates.io
use tokio::time::{self, Instant};
use tokio_util::sync::CancellationToken;
// self
use crate::_prelude::*;

/// Cancellation signal plus optional deadline propagated through every network wait of one call,
/// including re-authentication and backoff sleeps.
#[derive(Clone, Debug, Default)]
pub struct CallContext {
	cancellation: CancellationToken,
	deadline: Option<Instant>,
}
impl CallContext {
	/// Creates a context that never cancels and has no deadline.
	pub fn new() -> Self {
		Self::default()
	}

	/// Uses `token` as the cancellation signal.
	pub fn with_cancellation(mut self, token: CancellationToken) -> Self {
		self.cancellation = token;

		self
	}

	/// Sets the deadline to `timeout` from now.
	///
	/// A timeout too large to represent as an instant leaves the deadline unchanged.
	pub fn with_timeout(self, timeout: StdDuration) -> Self {
		match Instant::now().checked_add(timeout) {
			Some(deadline) => self.with_deadline(deadline),
			None => self,
		}
	}

	/// Sets an absolute deadline.
	pub fn with_deadline(mut self, deadline: Instant) -> Self {
		self.deadline = Some(deadline);

		self
	}

	/// Returns the cancellation token observed by this context.
	pub fn cancellation(&self) -> &CancellationToken {
		&self.cancellation
	}

	/// Returns the deadline, if any.
	pub fn deadline(&self) -> Option<Instant> {
		self.deadline
	}

	/// Fails fast when the context is already cancelled or past its deadline.
	pub fn check(&self) -> Result<()> {
		if self.cancellation.is_cancelled() {
			return Err(Error::Cancelled);
		}
		if self.deadline.is_some_and(|deadline| Instant::now() >= deadline) {
			return Err(Error::DeadlineExceeded);
		}

		Ok(())
	}

	/// Drives `fut` until it completes, the context is cancelled, or the deadline elapses.
	///
	/// Cancellation wins over the deadline when both are ready.
	pub async fn run<F>(&self, fut: F) -> Result<F::Output>
	where
		F: Future,
	{
		let deadline = async {
			match self.deadline {
				Some(deadline) => time::sleep_until(deadline).await,
				None => std::future::pending::<()>().await,
			}
		};

		tokio::select! {
			biased;
			_ = self.cancellation.cancelled() => Err(Error::Cancelled),
			_ = deadline => Err(Error::DeadlineExceeded),
			out = fut => Ok(out),
		}
	}
}

#[cfg(test)]
mod tests {
	// self
	use super::*;

	#[tokio::test]
	async fn run_returns_output_without_limits() {
		let ctx = CallContext::new();

		assert_eq!(ctx.run(async { 7 }).await.expect("Future should complete."), 7);
		assert!(ctx.check().is_ok());
	}

	#[tokio::test]
	async fn cancelled_context_short_circuits() {
		let token = CancellationToken::new();
		let ctx = CallContext::new().with_cancellation(token.clone());

		token.cancel();

		assert!(matches!(ctx.check(), Err(Error::Cancelled)));
		assert!(matches!(ctx.run(std::future::pending::<()>()).await, Err(Error::Cancelled)));
	}

	#[tokio::test(start_paused = true)]
	async fn deadline_interrupts_pending_future() {
		let ctx = CallContext::new().with_timeout(StdDuration::from_millis(50));
		let result = ctx.run(time::sleep(StdDuration::from_secs(60))).await;

		assert!(matches!(result, Err(Error::DeadlineExceeded)));
		assert!(matches!(ctx.check(), Err(Error::DeadlineExceeded)));
	}

	#[test]
	fn unrepresentable_timeout_leaves_the_call_unbounded() {
		let ctx = CallContext::new().with_timeout(StdDuration::MAX);

		assert!(ctx.deadline().is_none());
		assert!(ctx.check().is_ok());
	}
}
