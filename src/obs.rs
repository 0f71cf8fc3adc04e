//! Observability helpers for client operations.
//!
//! # Feature Flags
//!
//! - `tracing` (default) wraps every public operation in a span named `bca_api.operation` with the
//!   `operation`, `session_id`, and `attempt` fields, and emits start/end markers plus
//!   request/response echoes inside it.
//! - `metrics` increments the `bca_api_operation_total` counter for every
//!   attempt/success/failure/reauthenticate, labeled by `operation` + `outcome`.
//! - `subscriber` exposes [`logging::init`] to install a JSON subscriber writing to stdout and the
//!   configured rolling log file.

#[cfg(feature = "subscriber")] pub mod logging;

mod metrics;
mod tracing;

pub use metrics::*;
pub use tracing::*;

// self
use crate::_prelude::*;

/// Client operations observed by spans, logs, and metrics.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Operation {
	/// OAuth2 client-credentials exchange.
	Authenticate,
	/// Account balance inquiry.
	BalanceInformation,
	/// Account statement inquiry.
	AccountStatement,
	/// Transfer between accounts of the same bank.
	FundTransfer,
	/// Transfer to another domestic bank.
	DomesticFundTransfer,
	/// FIRE remittance beneficiary account inquiry.
	InquiryAccount,
}
impl Operation {
	/// Returns a stable label suitable for span or metric fields.
	pub const fn as_str(self) -> &'static str {
		match self {
			Operation::Authenticate => "authenticate",
			Operation::BalanceInformation => "balance_information",
			Operation::AccountStatement => "account_statement",
			Operation::FundTransfer => "fund_transfer",
			Operation::DomesticFundTransfer => "domestic_fund_transfer",
			Operation::InquiryAccount => "inquiry_account",
		}
	}
}
impl Display for Operation {
	fn fmt(&self, f: &mut Formatter) -> FmtResult {
		f.write_str(self.as_str())
	}
}

/// Outcome labels recorded for each operation.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Outcome {
	/// Entry to a public operation.
	Attempt,
	/// Successful completion.
	Success,
	/// Failure propagated back to the caller.
	Failure,
	/// Token-invalid signal that triggered a re-authentication.
	Reauthenticate,
}
impl Outcome {
	/// Returns a stable label suitable for span or metric fields.
	pub const fn as_str(self) -> &'static str {
		match self {
			Outcome::Attempt => "attempt",
			Outcome::Success => "success",
			Outcome::Failure => "failure",
			Outcome::Reauthenticate => "reauthenticate",
		}
	}
}
impl Display for Outcome {
	fn fmt(&self, f: &mut Formatter) -> FmtResult {
		f.write_str(self.as_str())
	}
}

#[cfg(test)]
mod tests {
	// self
	use super::*;

	#[test]
	fn labels_are_stable() {
		assert_eq!(Operation::DomesticFundTransfer.to_string(), "domestic_fund_transfer");
		assert_eq!(Operation::InquiryAccount.as_str(), "inquiry_account");
		assert_eq!(Outcome::Reauthenticate.to_string(), "reauthenticate");
	}
}
