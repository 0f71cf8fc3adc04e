//! Bounded re-authenticate-and-replay state machine.
//!
//! The provider signals an expired bearer token two ways: HTTP 401 on some endpoints, and an
//! embedded error code inside an otherwise successful JSON body on others. [`classify`]
//! normalizes both into a [`TokenSignal`], and [`RetryMachine`] decides, without touching the
//! network or a clock, whether the caller should re-authenticate and replay the call or stop.

// std
use std::time::Duration as StdDuration;
// self
use crate::{_prelude::*, dto::HasProviderError};

/// Default number of attempts (first call plus replays) for one business operation.
pub const DEFAULT_MAX_ATTEMPTS: u32 = 2;
/// Provider error code meaning the bearer token is expired or rejected.
pub const TOKEN_INVALID_CODE: &str = "ESB-14-009";

/// Business-level retry settings.
///
/// Transport failures never reach this policy; they are retried (if at all) by the transport.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct RetryPolicy {
	/// Total attempts allowed, including the first; must be at least 1.
	pub max_attempts: u32,
	/// Embedded error codes treated as token-invalid signals.
	pub token_invalid_codes: Vec<String>,
	/// Delay before re-authenticating after an HTTP 401.
	pub unauthorized_backoff: StdDuration,
	/// Delay before re-authenticating after an embedded token-invalid code.
	pub error_code_backoff: StdDuration,
}
impl RetryPolicy {
	/// Overrides the attempt budget.
	pub fn with_max_attempts(mut self, max_attempts: u32) -> Self {
		self.max_attempts = max_attempts;

		self
	}

	/// Adds an embedded error code that should trigger re-authentication.
	pub fn with_token_invalid_code(mut self, code: impl Into<String>) -> Self {
		let code = code.into();

		if !self.token_invalid_codes.contains(&code) {
			self.token_invalid_codes.push(code);
		}

		self
	}

	/// Sets the delay applied before re-authenticating after an HTTP 401.
	pub fn with_unauthorized_backoff(mut self, backoff: StdDuration) -> Self {
		self.unauthorized_backoff = backoff;

		self
	}

	/// Sets the delay applied before re-authenticating after an embedded token-invalid code.
	pub fn with_error_code_backoff(mut self, backoff: StdDuration) -> Self {
		self.error_code_backoff = backoff;

		self
	}

	/// Returns `true` when `code` is one of the configured token-invalid codes.
	pub fn is_token_invalid_code(&self, code: &str) -> bool {
		self.token_invalid_codes.iter().any(|c| c == code)
	}

	/// Delay to apply before re-authenticating for `signal`.
	pub fn backoff_for(&self, signal: &TokenSignal) -> StdDuration {
		match signal {
			TokenSignal::Unauthorized => self.unauthorized_backoff,
			TokenSignal::ErrorCode(_) => self.error_code_backoff,
		}
	}
}
impl Default for RetryPolicy {
	fn default() -> Self {
		Self {
			max_attempts: DEFAULT_MAX_ATTEMPTS,
			token_invalid_codes: vec![TOKEN_INVALID_CODE.into()],
			unauthorized_backoff: StdDuration::ZERO,
			error_code_backoff: StdDuration::ZERO,
		}
	}
}

/// How the provider indicated that the bearer token is no longer accepted.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum TokenSignal {
	/// HTTP 401 status.
	Unauthorized,
	/// Token-invalid code embedded in the response body.
	ErrorCode(String),
}
impl Display for TokenSignal {
	fn fmt(&self, f: &mut Formatter) -> FmtResult {
		match self {
			TokenSignal::Unauthorized => f.write_str("HTTP 401"),
			TokenSignal::ErrorCode(code) => write!(f, "error code {code}"),
		}
	}
}

/// Returns the token-invalid signal carried by a decoded payload, if any.
///
/// Empty codes and every other business code yield `None`: those payloads go back to the caller.
pub fn classify<T>(policy: &RetryPolicy, payload: &T) -> Option<TokenSignal>
where
	T: ?Sized + HasProviderError,
{
	let code = payload.provider_error().error_code.as_str();

	(!code.is_empty() && policy.is_token_invalid_code(code))
		.then(|| TokenSignal::ErrorCode(code.to_owned()))
}

/// Outcome of one dispatched attempt, as seen by the state machine.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum RetryEvent {
	/// Decoded payload without a token-invalid signal (business errors included).
	Accepted,
	/// Transport, decode, or cancellation failure; never retried here.
	Failed,
	/// Provider rejected the bearer token.
	TokenInvalid(TokenSignal),
}

/// How the machine finished.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Completion {
	/// Last attempt produced a payload for the caller.
	Succeeded {
		/// Attempts issued.
		attempts: u32,
	},
	/// Last attempt failed below the token layer.
	Failed {
		/// Attempts issued.
		attempts: u32,
	},
	/// Every permitted attempt was rejected with a token-invalid signal.
	Exhausted {
		/// Attempts issued.
		attempts: u32,
		/// Final token-invalid signal.
		signal: TokenSignal,
	},
}

/// Current state of a [`RetryMachine`].
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum RetryState {
	/// Attempt `attempt` (1-based) is in flight or about to be issued.
	Attempting {
		/// 1-based attempt number.
		attempt: u32,
	},
	/// No more attempts will be issued.
	Done(Completion),
}

/// Action the driver must take after feeding an event.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Step {
	/// Stop and return the current result (see [`RetryMachine::state`]).
	Return,
	/// Re-authenticate; replay the call afterwards when `retry` is `true`.
	Reauthenticate {
		/// Whether another attempt follows the re-authentication.
		retry: bool,
	},
}

/// Pure state machine behind the re-authenticate-and-replay loop.
#[derive(Debug)]
pub struct RetryMachine<'a> {
	policy: &'a RetryPolicy,
	state: RetryState,
}
impl<'a> RetryMachine<'a> {
	/// Starts at attempt 1.
	pub fn new(policy: &'a RetryPolicy) -> Self {
		Self { policy, state: RetryState::Attempting { attempt: 1 } }
	}

	/// Returns the current state.
	pub fn state(&self) -> &RetryState {
		&self.state
	}

	/// Returns the current (or last issued) 1-based attempt number.
	pub fn attempt(&self) -> u32 {
		match &self.state {
			RetryState::Attempting { attempt } => *attempt,
			RetryState::Done(
				Completion::Succeeded { attempts }
				| Completion::Failed { attempts }
				| Completion::Exhausted { attempts, .. },
			) => *attempts,
		}
	}

	/// Feeds the outcome of the current attempt and returns the next step.
	///
	/// Events fed after the machine is done are ignored.
	pub fn advance(&mut self, event: RetryEvent) -> Step {
		let RetryState::Attempting { attempt } = self.state else {
			return Step::Return;
		};

		match event {
			RetryEvent::Accepted => {
				self.state = RetryState::Done(Completion::Succeeded { attempts: attempt });

				Step::Return
			},
			RetryEvent::Failed => {
				self.state = RetryState::Done(Completion::Failed { attempts: attempt });

				Step::Return
			},
			RetryEvent::TokenInvalid(signal) =>
				if attempt < self.policy.max_attempts {
					self.state = RetryState::Attempting { attempt: attempt + 1 };

					Step::Reauthenticate { retry: true }
				} else {
					self.state =
						RetryState::Done(Completion::Exhausted { attempts: attempt, signal });

					Step::Reauthenticate { retry: false }
				},
		}
	}
}
